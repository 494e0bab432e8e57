//! Game state and core simulation types
//!
//! Everything a match mutates lives in [`GameState`]: the player, the enemy,
//! projectile and particle collections, score, countdown and RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Settings;

/// Lifecycle of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Not simulating (before the first start, after stop or game over)
    Stopped,
    /// Frames advance the simulation
    Running,
}

/// Why a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Player health reached zero
    Defeated,
    /// Countdown reached zero
    TimeUp,
}

/// Things that happened during a step, drained by the session for the HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// An attack was accepted and a projectile launched
    AttackFired { angle: f32 },
    EnemyKilled { id: u32, pos: Vec2 },
    /// Player took contact damage; carries the new health
    PlayerHurt { health: f32 },
    /// Match ended this step
    Ended(EndReason),
}

/// Enemy flavours (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Crab,
    Lobster,
    Octopus,
    Squid,
    Blowfish,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::Crab,
        EnemyKind::Lobster,
        EnemyKind::Octopus,
        EnemyKind::Squid,
        EnemyKind::Blowfish,
    ];

    pub fn glyph(&self) -> &'static str {
        match self {
            EnemyKind::Crab => "🦀",
            EnemyKind::Lobster => "🦞",
            EnemyKind::Octopus => "🐙",
            EnemyKind::Squid => "🦑",
            EnemyKind::Blowfish => "🐡",
        }
    }
}

/// The single player-controlled surfer
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Units per frame at full input
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    /// Facing angle (radians), toward the pointer
    pub facing: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            facing: 0.0,
        }
    }
}

impl Player {
    /// Apply damage, clamping at zero. Returns true if this hit was the killing blow.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        let was_alive = self.health > 0.0;
        self.health = (self.health - amount).clamp(0.0, self.max_health);
        was_alive && self.health <= 0.0
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// An enemy chasing the player
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, speed: f32, kind: EnemyKind) -> Self {
        Self {
            id,
            pos,
            radius: ENEMY_RADIUS,
            speed,
            health: ENEMY_MAX_HEALTH,
            max_health: ENEMY_MAX_HEALTH,
            kind,
        }
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, self.max_health);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Step toward `target` at this enemy's speed
    pub fn step_toward(&mut self, target: Vec2) {
        let delta = target - self.pos;
        let dist = delta.length();
        // Already on top of the target: nothing to normalize
        if dist > 0.0 {
            self.pos += delta / dist * self.speed;
        }
    }
}

/// A thrown projectile
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
    /// Frames remaining
    pub lifetime: u32,
}

/// Particle flavours, used for color lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Sparks thrown off an attack
    Muzzle,
    /// Ring burst from a defeated enemy
    Explosion,
}

/// A purely cosmetic particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub kind: ParticleKind,
    /// Frames remaining
    pub lifetime: u32,
    /// Lifetime at spawn, for fading
    pub max_lifetime: u32,
}

impl Particle {
    /// Remaining lifetime as a fraction of the initial lifetime
    pub fn life_fraction(&self) -> f32 {
        if self.max_lifetime == 0 {
            0.0
        } else {
            self.lifetime as f32 / self.max_lifetime as f32
        }
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Arena size (canvas width, height)
    pub arena: Vec2,
    pub phase: GamePhase,
    /// Set once when the match ends
    pub end_reason: Option<EndReason>,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub score: u32,
    /// Countdown seconds remaining
    pub time_left: u32,
    /// Wall-clock time of the last accepted attack
    pub last_attack_ms: Option<f64>,
    /// Wall-clock time of the previous simulation step
    pub last_step_ms: Option<f64>,
    /// Step events not yet drained
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a stopped match with a fresh player and no enemies
    pub fn new(settings: Settings, arena: Vec2, seed: u64) -> Self {
        let time_left = settings.match_seconds;
        Self {
            settings,
            arena,
            phase: GamePhase::Stopped,
            end_reason: None,
            player: Player::default(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            score: 0,
            time_left,
            last_attack_ms: None,
            last_step_ms: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// End the match (first reason wins)
    pub fn end(&mut self, reason: EndReason) {
        if self.end_reason.is_none() {
            self.end_reason = Some(reason);
            self.events.push(GameEvent::Ended(reason));
        }
        self.phase = GamePhase::Stopped;
    }

    /// Milliseconds until the next attack is accepted (0 when ready)
    pub fn cooldown_remaining_ms(&self, now_ms: f64) -> f64 {
        match self.last_attack_ms {
            Some(last) => (self.settings.attack_cooldown_ms - (now_ms - last)).max(0.0),
            None => 0.0,
        }
    }

    /// Seconds survived so far
    pub fn survived_secs(&self) -> u32 {
        self.settings.match_seconds.saturating_sub(self.time_left)
    }

    /// Drain pending step events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(Settings::default(), Vec2::new(800.0, 600.0), 1)
    }

    #[test]
    fn test_new_state_is_stopped() {
        let s = state();
        assert_eq!(s.phase, GamePhase::Stopped);
        assert_eq!(s.time_left, 60);
        assert_eq!(s.player.pos, Vec2::new(400.0, 300.0));
        assert!(s.enemies.is_empty());
    }

    #[test]
    fn test_player_damage_clamps_and_reports_kill_once() {
        let mut p = Player::default();
        p.health = 0.5;
        assert!(p.take_damage(0.5));
        assert_eq!(p.health, 0.0);
        assert!(!p.take_damage(0.5));
        assert_eq!(p.health, 0.0);
    }

    #[test]
    fn test_enemy_step_toward_zero_distance() {
        let mut e = Enemy::new(1, Vec2::new(10.0, 10.0), 2.0, EnemyKind::Crab);
        e.step_toward(Vec2::new(10.0, 10.0));
        assert_eq!(e.pos, Vec2::new(10.0, 10.0));
        assert!(e.pos.is_finite());
    }

    #[test]
    fn test_enemy_step_toward_moves_by_speed() {
        let mut e = Enemy::new(1, Vec2::ZERO, 2.0, EnemyKind::Squid);
        e.step_toward(Vec2::new(10.0, 0.0));
        assert_eq!(e.pos, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_end_records_first_reason() {
        let mut s = state();
        s.phase = GamePhase::Running;
        s.end(EndReason::Defeated);
        s.end(EndReason::TimeUp);
        assert_eq!(s.end_reason, Some(EndReason::Defeated));
        assert_eq!(s.take_events(), vec![GameEvent::Ended(EndReason::Defeated)]);
        assert!(!s.is_running());
    }

    #[test]
    fn test_cooldown_remaining() {
        let mut s = state();
        assert_eq!(s.cooldown_remaining_ms(0.0), 0.0);
        s.last_attack_ms = Some(1000.0);
        assert_eq!(s.cooldown_remaining_ms(2000.0), 2000.0);
        assert_eq!(s.cooldown_remaining_ms(5000.0), 0.0);
    }

    #[test]
    fn test_particle_life_fraction() {
        let p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: 3.0,
            kind: ParticleKind::Muzzle,
            lifetime: 10,
            max_lifetime: 20,
        };
        assert_eq!(p.life_fraction(), 0.5);
    }
}
