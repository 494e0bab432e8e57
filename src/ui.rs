//! HUD contract
//!
//! The session pushes display updates through [`Hud`]; the browser build
//! writes them into the page, the native build logs them.

use serde::Serialize;

use crate::sim::EndReason;

/// Attack cooldown as shown on the cooldown bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CooldownStatus {
    /// Recharging; `percent` is elapsed/cooldown in [0, 100]
    Charging { percent: f32, remaining_ms: f64 },
    Ready,
}

impl CooldownStatus {
    pub fn from_remaining(remaining_ms: f64, cooldown_ms: f64) -> Self {
        if remaining_ms <= 0.0 || cooldown_ms <= 0.0 {
            return CooldownStatus::Ready;
        }
        let percent = ((cooldown_ms - remaining_ms) / cooldown_ms * 100.0).clamp(0.0, 100.0);
        CooldownStatus::Charging {
            percent: percent as f32,
            remaining_ms,
        }
    }

    /// Bar fill width in percent
    pub fn percent(&self) -> f32 {
        match self {
            CooldownStatus::Charging { percent, .. } => *percent,
            CooldownStatus::Ready => 100.0,
        }
    }

    /// Text next to the bar, e.g. `2.4s` or `Ready!`
    pub fn label(&self) -> String {
        match self {
            CooldownStatus::Charging { remaining_ms, .. } => {
                format!("{:.1}s", remaining_ms / 1000.0)
            }
            CooldownStatus::Ready => "Ready!".to_string(),
        }
    }
}

/// Final result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOverReport {
    pub reason: EndReason,
    pub score: u32,
    pub survived_secs: u32,
}

impl GameOverReport {
    /// Multi-line message shown in the game-over dialog
    pub fn message(&self) -> String {
        let verdict = match self.reason {
            EndReason::TimeUp => "⏰ Time's up!",
            EndReason::Defeated => "💔 You were defeated!",
        };
        format!(
            "🏝️ Game Over!\n\nYour Score: {}\nYou survived for {} seconds!\n\n{}",
            self.score, self.survived_secs, verdict
        )
    }
}

/// Display surface for match state
pub trait Hud {
    fn show_health(&mut self, health: f32);
    fn show_score(&mut self, score: u32);
    fn show_time(&mut self, seconds_left: u32);
    /// Called every frame while recharging, and once when ready again
    fn show_cooldown(&mut self, status: CooldownStatus);
    fn game_over(&mut self, report: &GameOverReport);
}

/// HUD that writes changes to the log
#[derive(Debug, Default)]
pub struct LogHud {
    last_health: Option<u32>,
}

impl Hud for LogHud {
    fn show_health(&mut self, health: f32) {
        // Health changes in half points; only log whole-point changes
        let shown = health.floor() as u32;
        if self.last_health != Some(shown) {
            self.last_health = Some(shown);
            log::debug!("Health: {}", shown);
        }
    }

    fn show_score(&mut self, score: u32) {
        log::info!("Score: {}", score);
    }

    fn show_time(&mut self, seconds_left: u32) {
        if seconds_left % 10 == 0 {
            log::info!("Time left: {}s", seconds_left);
        }
    }

    fn show_cooldown(&mut self, status: CooldownStatus) {
        if status == CooldownStatus::Ready {
            log::debug!("Attack ready");
        }
    }

    fn game_over(&mut self, report: &GameOverReport) {
        for line in report.message().lines().filter(|l| !l.is_empty()) {
            log::info!("{}", line);
        }
    }
}
