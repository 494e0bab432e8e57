//! Match session
//!
//! Owns everything a running match needs: state, input, timers and the HUD.
//! The platform calls [`Session::frame`] once per display refresh with the
//! current timestamp; spawner and countdown timers ride the same clock, so
//! tests can drive a full match by passing timestamps.

use glam::Vec2;

use crate::consts::COUNTDOWN_PERIOD_MS;
use crate::renderer::{Frame, build_frame};
use crate::settings::Settings;
use crate::sim::{
    GameEvent, GamePhase, GameState, InputEvent, InputState, Scheduler, TimerId, TimerKind,
    countdown, periodic_spawn, seed_enemies, tick,
};
use crate::ui::{CooldownStatus, GameOverReport, Hud};

/// What the frame loop should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Schedule another frame
    Running,
    /// Not running; do not reschedule
    Stopped,
    /// The match ended during this frame
    Ended(GameOverReport),
}

/// A match and its lifecycle: `Stopped → Running → Stopped`
pub struct Session<H: Hud> {
    settings: Settings,
    state: GameState,
    input: InputState,
    scheduler: Scheduler,
    hud: H,
    seed: u64,
    /// Bumped on every start so stale frame callbacks can bow out
    generation: u64,
    spawn_timer: Option<TimerId>,
    countdown_timer: Option<TimerId>,
    /// Whether the HUD currently shows the attack as ready
    cooldown_ready: bool,
}

impl<H: Hud> Session<H> {
    /// Create a stopped session. A seed in `settings` overrides `seed`.
    pub fn new(settings: Settings, arena: Vec2, seed: u64, hud: H) -> Self {
        let seed = settings.seed.unwrap_or(seed);
        Self {
            state: GameState::new(settings.clone(), arena, seed),
            settings,
            input: InputState::new(),
            scheduler: Scheduler::new(0.0),
            hud,
            seed,
            generation: 0,
            spawn_timer: None,
            countdown_timer: None,
            cooldown_ready: true,
        }
    }

    /// Begin a fresh match at `now_ms`, discarding any match in progress
    pub fn start(&mut self, now_ms: f64) {
        self.stop();
        self.generation += 1;

        let seed = self.seed.wrapping_add(self.generation - 1);
        self.state = GameState::new(self.settings.clone(), self.state.arena, seed);
        self.state.phase = GamePhase::Running;
        self.input.reset();
        self.scheduler = Scheduler::new(now_ms);

        seed_enemies(&mut self.state);

        self.spawn_timer = Some(
            self.scheduler
                .set_interval(TimerKind::Spawn, self.settings.spawn_interval_ms),
        );
        self.countdown_timer = Some(
            self.scheduler
                .set_interval(TimerKind::Countdown, COUNTDOWN_PERIOD_MS),
        );

        self.hud.show_health(self.state.player.health);
        self.hud.show_score(self.state.score);
        self.hud.show_time(self.state.time_left);
        self.hud.show_cooldown(CooldownStatus::Ready);
        self.cooldown_ready = true;

        log::info!(
            "Match {} started (seed {}, arena {}x{})",
            self.generation,
            seed,
            self.state.arena.x,
            self.state.arena.y
        );
    }

    /// Halt the match and cancel its timers. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(id) = self.spawn_timer.take() {
            self.scheduler.clear(id);
        }
        if let Some(id) = self.countdown_timer.take() {
            self.scheduler.clear(id);
        }
        if self.state.is_running() {
            self.state.phase = GamePhase::Stopped;
            log::info!("Match {} stopped", self.generation);
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    /// Queue a platform input event for the next step
    pub fn handle_input(&mut self, event: InputEvent) {
        self.input.handle(event, self.state.arena.x);
    }

    /// Follow a canvas resize
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.arena = Vec2::new(width.max(0.0), height.max(0.0));
    }

    /// Run due timers, one simulation step and HUD updates
    pub fn frame(&mut self, now_ms: f64) -> FrameStatus {
        if !self.state.is_running() {
            return FrameStatus::Stopped;
        }

        while let Some(kind) = self.scheduler.next_due(now_ms) {
            match kind {
                TimerKind::Spawn => {
                    periodic_spawn(&mut self.state);
                }
                TimerKind::Countdown => {
                    countdown(&mut self.state);
                    self.hud.show_time(self.state.time_left);
                }
            }
            if !self.state.is_running() {
                break;
            }
        }
        self.scheduler.finish_advance(now_ms);

        if self.state.is_running() {
            let input = self.input.snapshot();
            tick(&mut self.state, &input, now_ms);
        }

        self.publish(now_ms);

        match self.report() {
            Some(report) if !self.state.is_running() => {
                self.stop();
                log::info!(
                    "Game over ({:?}): score {}, survived {}s",
                    report.reason,
                    report.score,
                    report.survived_secs
                );
                self.hud.game_over(&report);
                FrameStatus::Ended(report)
            }
            _ => FrameStatus::Running,
        }
    }

    /// Final result, once the match has ended on its own
    pub fn report(&self) -> Option<GameOverReport> {
        self.state.end_reason.map(|reason| GameOverReport {
            reason,
            score: self.state.score,
            survived_secs: self.state.survived_secs(),
        })
    }

    /// Draw commands for the current state
    pub fn render(&self) -> Frame {
        build_frame(&self.state, &self.input.joystick)
    }

    /// Forward step events and cooldown progress to the HUD
    fn publish(&mut self, now_ms: f64) {
        let mut score_changed = false;
        for event in self.state.take_events() {
            match event {
                GameEvent::PlayerHurt { health } => self.hud.show_health(health),
                GameEvent::EnemyKilled { .. } => score_changed = true,
                GameEvent::AttackFired { .. } => self.cooldown_ready = false,
                GameEvent::Ended(_) => {}
            }
        }
        if score_changed {
            self.hud.show_score(self.state.score);
        }

        let remaining = self.state.cooldown_remaining_ms(now_ms);
        if remaining > 0.0 {
            self.hud.show_cooldown(CooldownStatus::from_remaining(
                remaining,
                self.settings.attack_cooldown_ms,
            ));
        } else if !self.cooldown_ready {
            self.cooldown_ready = true;
            self.hud.show_cooldown(CooldownStatus::Ready);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ENEMY_KILL_SCORE, FRAME_MS, PROJECTILE_LIFETIME};
    use crate::sim::{EndReason, Enemy, EnemyKind, Key};
    use proptest::prelude::*;
    use std::collections::{HashMap, HashSet};

    #[derive(Debug, Default)]
    struct RecordingHud {
        health: Vec<f32>,
        scores: Vec<u32>,
        times: Vec<u32>,
        cooldowns: Vec<CooldownStatus>,
        reports: Vec<GameOverReport>,
    }

    impl Hud for RecordingHud {
        fn show_health(&mut self, health: f32) {
            self.health.push(health);
        }
        fn show_score(&mut self, score: u32) {
            self.scores.push(score);
        }
        fn show_time(&mut self, seconds_left: u32) {
            self.times.push(seconds_left);
        }
        fn show_cooldown(&mut self, status: CooldownStatus) {
            self.cooldowns.push(status);
        }
        fn game_over(&mut self, report: &GameOverReport) {
            self.reports.push(*report);
        }
    }

    fn session() -> Session<RecordingHud> {
        Session::new(
            Settings::default(),
            Vec2::new(800.0, 600.0),
            2024,
            RecordingHud::default(),
        )
    }

    fn park_enemy_on_player(s: &mut Session<RecordingHud>) {
        let id = s.state.next_entity_id();
        let pos = s.state.player.pos + Vec2::new(10.0, 0.0);
        s.state.enemies.push(Enemy::new(id, pos, 0.0, EnemyKind::Blowfish));
    }

    #[test]
    fn test_start_seeds_and_resets_hud() {
        let mut s = session();
        assert!(!s.is_running());
        s.start(0.0);
        assert!(s.is_running());
        assert_eq!(s.state().enemies.len(), 5);
        assert_eq!(s.hud().health, vec![100.0]);
        assert_eq!(s.hud().scores, vec![0]);
        assert_eq!(s.hud().times, vec![60]);
        assert_eq!(s.hud().cooldowns, vec![CooldownStatus::Ready]);
        assert!(s.state().events.is_empty());
    }

    #[test]
    fn test_frame_before_start_is_stopped() {
        let mut s = session();
        assert_eq!(s.frame(0.0), FrameStatus::Stopped);
    }

    #[test]
    fn test_stop_is_idempotent_and_cancels_timers() {
        let mut s = session();
        s.start(0.0);
        s.stop();
        s.stop();
        assert!(!s.is_running());
        assert!(s.scheduler.is_empty());

        let enemies = s.state().enemies.len();
        assert_eq!(s.frame(10_000.0), FrameStatus::Stopped);
        assert_eq!(s.state().enemies.len(), enemies);
        assert_eq!(s.state().time_left, 60);
        assert!(s.hud().reports.is_empty());
    }

    #[test]
    fn test_stop_then_start_is_fresh() {
        let mut s = session();
        s.start(0.0);
        for i in 1..=120 {
            s.frame(i as f64 * FRAME_MS);
        }
        s.state.score = 50;
        s.state.player.health = 20.0;
        s.stop();

        s.start(5000.0);
        assert_eq!(s.generation(), 2);
        assert_eq!(s.state().enemies.len(), 5);
        assert_eq!(s.state().score, 0);
        assert_eq!(s.state().time_left, 60);
        assert_eq!(s.state().player.health, 100.0);
        assert!(s.state().projectiles.is_empty());
        assert_eq!(s.hud().health.last(), Some(&100.0));
        assert_eq!(s.hud().scores.last(), Some(&0));
        assert_eq!(s.hud().times.last(), Some(&60));

        // Timers restart relative to the new start time
        s.frame(5999.0);
        assert_eq!(s.state().time_left, 60);
        s.frame(6000.0);
        assert_eq!(s.state().time_left, 59);
    }

    #[test]
    fn test_countdown_runs_out() {
        let mut s = session();
        s.start(0.0);
        s.state.score = 70;

        let status = s.frame(60_000.0);
        let expected = GameOverReport {
            reason: EndReason::TimeUp,
            score: 70,
            survived_secs: 60,
        };
        assert_eq!(status, FrameStatus::Ended(expected));
        assert_eq!(s.hud().reports, vec![expected]);
        assert_eq!(s.hud().times.len(), 61);
        assert_eq!(s.hud().times.last(), Some(&0));
        assert!(s.scheduler.is_empty());
        assert_eq!(s.frame(61_000.0), FrameStatus::Stopped);
        assert_eq!(s.hud().reports.len(), 1);
    }

    #[test]
    fn test_contact_defeat_ends_match() {
        let mut s = session();
        s.start(0.0);
        s.state.player.health = 0.5;
        park_enemy_on_player(&mut s);

        match s.frame(FRAME_MS) {
            FrameStatus::Ended(report) => {
                assert_eq!(report.reason, EndReason::Defeated);
                assert_eq!(report.survived_secs, 0);
            }
            other => panic!("expected game over, got {:?}", other),
        }
        assert_eq!(s.state().player.health, 0.0);
        assert_eq!(s.hud().health.last(), Some(&0.0));
        assert_eq!(s.hud().reports.len(), 1);
        assert!(s.scheduler.is_empty());
    }

    #[test]
    fn test_attack_cooldown_through_session() {
        let mut s = session();
        s.start(0.0);
        s.state.enemies.clear();

        s.handle_input(InputEvent::PointerMove(Vec2::new(500.0, 300.0)));
        s.handle_input(InputEvent::Click);
        s.frame(100.0);
        assert_eq!(s.state().projectiles.len(), 1);
        assert!(matches!(
            s.hud().cooldowns.last(),
            Some(CooldownStatus::Charging { .. })
        ));

        s.handle_input(InputEvent::Click);
        s.frame(200.0);
        assert_eq!(
            s.state().projectiles.len(),
            1,
            "second request inside the window is dropped"
        );

        s.frame(3100.0);
        assert_eq!(s.hud().cooldowns.last(), Some(&CooldownStatus::Ready));
        let readies = s
            .hud()
            .cooldowns
            .iter()
            .filter(|c| **c == CooldownStatus::Ready)
            .count();
        s.frame(3150.0);
        let readies_after = s
            .hud()
            .cooldowns
            .iter()
            .filter(|c| **c == CooldownStatus::Ready)
            .count();
        assert_eq!(readies, readies_after, "ready is announced once");

        s.handle_input(InputEvent::KeyDown(Key::Attack));
        s.frame(3200.0);
        // The first projectile is still in flight
        assert_eq!(s.state().projectiles.len(), 2);
        assert_eq!(s.state().last_attack_ms, Some(3200.0));
    }

    #[test]
    fn test_kill_updates_score_display() {
        let mut s = session();
        s.start(0.0);
        s.state.enemies.clear();
        let id = s.state.next_entity_id();
        let mut enemy = Enemy::new(id, Vec2::new(600.0, 300.0), 0.0, EnemyKind::Crab);
        enemy.health = 25.0;
        s.state.enemies.push(enemy);

        s.handle_input(InputEvent::PointerMove(Vec2::new(600.0, 300.0)));
        s.handle_input(InputEvent::Click);
        let mut now = 0.0;
        while s.state().score == 0 && now < 2000.0 {
            now += FRAME_MS;
            s.frame(now);
        }
        assert_eq!(s.state().score, 10);
        assert_eq!(s.hud().scores.last(), Some(&10));
    }

    #[test]
    fn test_spawner_respects_ceiling() {
        let mut s = session();
        s.settings.contact_damage = crate::ContactDamage::PerFrame { amount: 0.0 };
        s.start(0.0);
        let mut now = 0.0;
        while s.is_running() {
            now += 250.0;
            s.frame(now);
            assert!(s.state().enemies.len() <= 10);
        }
        assert_eq!(s.state().enemies.len(), 10);
        assert_eq!(s.report().map(|r| r.reason), Some(EndReason::TimeUp));
    }

    #[test]
    fn test_settings_seed_wins() {
        let settings = Settings {
            seed: Some(99),
            ..Settings::default()
        };
        let mut a = Session::new(settings.clone(), Vec2::new(800.0, 600.0), 1, RecordingHud::default());
        let mut b = Session::new(settings, Vec2::new(800.0, 600.0), 2, RecordingHud::default());
        a.start(0.0);
        b.start(0.0);
        let pa: Vec<Vec2> = a.state().enemies.iter().map(|e| e.pos).collect();
        let pb: Vec<Vec2> = b.state().enemies.iter().map(|e| e.pos).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_resize_changes_arena() {
        let mut s = session();
        s.resize(1024.0, 700.0);
        s.start(0.0);
        assert_eq!(s.state().arena, Vec2::new(1024.0, 700.0));
    }

    /// Hold `negative`, `positive` or neither, by the sign of `dir`
    fn press_axis(s: &mut Session<RecordingHud>, dir: i8, negative: Key, positive: Key) {
        s.handle_input(InputEvent::KeyUp(negative));
        s.handle_input(InputEvent::KeyUp(positive));
        match dir.signum() {
            -1 => s.handle_input(InputEvent::KeyDown(negative)),
            1 => s.handle_input(InputEvent::KeyDown(positive)),
            _ => {}
        }
    }

    proptest! {
        #[test]
        fn prop_match_never_heals_and_scores_each_kill_once(
            seed in any::<u64>(),
            script in prop::collection::vec(
                ((-1i8..=1, -1i8..=1), (0.0f32..800.0, 0.0f32..600.0), any::<bool>()),
                60..600,
            ),
        ) {
            let settings = Settings {
                seed: Some(seed),
                attack_cooldown_ms: 300.0,
                ..Settings::default()
            };
            let mut s = Session::new(settings, Vec2::new(800.0, 600.0), 0, RecordingHud::default());
            s.start(0.0);

            let mut removed: HashSet<u32> = HashSet::new();
            let mut now = 0.0;
            for ((dx, dy), (px, py), fire) in script {
                press_axis(&mut s, dx, Key::Left, Key::Right);
                press_axis(&mut s, dy, Key::Up, Key::Down);
                s.handle_input(InputEvent::PointerMove(Vec2::new(px, py)));
                if fire {
                    s.handle_input(InputEvent::Click);
                }

                let prev_health = s.state().player.health;
                let prev_score = s.state().score;
                let prev_enemies: HashMap<u32, f32> =
                    s.state().enemies.iter().map(|e| (e.id, e.health)).collect();
                let prev_lifetimes: Vec<u32> =
                    s.state().projectiles.iter().map(|p| p.lifetime).collect();

                now += FRAME_MS;
                let status = s.frame(now);
                let state = s.state();

                prop_assert!(state.player.health <= prev_health);

                let mut killed = 0;
                for id in prev_enemies.keys() {
                    if !state.enemies.iter().any(|e| e.id == *id) {
                        prop_assert!(removed.insert(*id));
                        killed += 1;
                    }
                }
                for e in &state.enemies {
                    prop_assert!(!removed.contains(&e.id));
                    if let Some(before) = prev_enemies.get(&e.id) {
                        prop_assert!(e.health <= *before);
                    }
                }
                prop_assert_eq!(state.score, prev_score + ENEMY_KILL_SCORE * killed);

                if status != FrameStatus::Running {
                    break;
                }

                // Only a projectile fired this frame can be at its first decrement
                let fresh = PROJECTILE_LIFETIME - 1;
                let lifetimes: Vec<u32> = state.projectiles.iter().map(|p| p.lifetime).collect();
                prop_assert!(lifetimes.iter().filter(|l| **l == fresh).count() <= 1);
                let carried: Vec<u32> = lifetimes.into_iter().filter(|l| *l != fresh).collect();
                prop_assert!(carried.len() <= prev_lifetimes.len());
                for l in carried {
                    prop_assert!(prev_lifetimes.contains(&(l + 1)));
                }
            }
        }
    }
}
