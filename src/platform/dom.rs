//! DOM-backed HUD

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::ui::{CooldownStatus, GameOverReport, Hud};

pub const HEALTH_ID: &str = "playerHealth";
pub const SCORE_ID: &str = "playerScore";
pub const TIMER_ID: &str = "gameTimer";
pub const COOLDOWN_FILL_ID: &str = "gameCooldownFill";
pub const COOLDOWN_TEXT_ID: &str = "gameCooldownText";

/// Writes match state into the page's HUD elements
pub struct DomHud {
    window: Window,
    document: Document,
}

impl DomHud {
    pub fn new(window: Window, document: Document) -> Self {
        for id in [
            HEALTH_ID,
            SCORE_ID,
            TIMER_ID,
            COOLDOWN_FILL_ID,
            COOLDOWN_TEXT_ID,
        ] {
            if document.get_element_by_id(id).is_none() {
                log::warn!("HUD element #{} not found; updates to it are skipped", id);
            }
        }
        Self { window, document }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }
}

impl Hud for DomHud {
    fn show_health(&mut self, health: f32) {
        self.set_text(HEALTH_ID, &(health.max(0.0).floor() as u32).to_string());
    }

    fn show_score(&mut self, score: u32) {
        self.set_text(SCORE_ID, &score.to_string());
    }

    fn show_time(&mut self, seconds_left: u32) {
        self.set_text(TIMER_ID, &seconds_left.to_string());
    }

    fn show_cooldown(&mut self, status: CooldownStatus) {
        if let Some(fill) = self
            .document
            .get_element_by_id(COOLDOWN_FILL_ID)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = fill
                .style()
                .set_property("width", &format!("{}%", status.percent()));
        }
        self.set_text(COOLDOWN_TEXT_ID, &status.label());
    }

    fn game_over(&mut self, report: &GameOverReport) {
        let _ = self.window.alert_with_message(&report.message());
    }
}
