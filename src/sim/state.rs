//! Game state and core simulation types
//!
//! Everything the renderer and UI read back after a tick lives here. The
//! coordinator owns one `GameState`; all mutation happens inside `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::powerup::{ActivePowerUps, PowerUpKind};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, nothing simulates
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended; entities stay frozen for the final frame
    GameOver,
}

/// Discrete cues emitted during a tick for the audio sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Item collected or plane shot down
    Collect,
    /// Plane hit the player
    Crash,
    /// Timed power-up activated
    PowerUp,
}

/// Viewport dimensions, supplied read-only each tick (kept square by the
/// frontend, resized externally).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The player's avatar, a 40x40 square near the bottom edge.
///
/// Size and speed are derived from active power-ups at use time; only the
/// position is stored.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub x: f32,
    pub y: f32,
}

impl Player {
    /// Spawn centered, one margin above the bottom edge.
    pub fn spawn(viewport: &Viewport) -> Self {
        Self {
            x: viewport.width / 2.0 - PLAYER_SIZE / 2.0,
            y: viewport.height - PLAYER_BOTTOM_MARGIN,
        }
    }

    /// Return to the spawn position (after a crash).
    pub fn reset(&mut self, viewport: &Viewport) {
        *self = Self::spawn(viewport);
    }

    /// The un-modified 40x40 bounding box.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_SIZE, PLAYER_SIZE)
    }

    /// Side length after power-ups (x1.5 while sizeup is active).
    pub fn effective_size(&self, power_ups: &ActivePowerUps) -> f32 {
        if power_ups.is_active(PowerUpKind::SizeUp) {
            PLAYER_SIZE * 1.5
        } else {
            PLAYER_SIZE
        }
    }

    /// The hit-tested bounding box: grown size, centered on the base rect.
    pub fn effective_rect(&self, power_ups: &ActivePowerUps) -> Rect {
        let size = self.effective_size(power_ups);
        let offset = (size - PLAYER_SIZE) / 2.0;
        Rect::new(self.x - offset, self.y - offset, size, size)
    }

    /// Horizontal speed after power-ups (x2 while speedboost is active).
    pub fn effective_speed(&self, power_ups: &ActivePowerUps) -> f32 {
        if power_ups.is_active(PowerUpKind::SpeedBoost) {
            PLAYER_BASE_SPEED * 2.0
        } else {
            PLAYER_BASE_SPEED
        }
    }
}

/// A descending plane.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Fall speed in pixels per tick, drawn from the difficulty band at spawn
    pub speed: f32,
}

impl Plane {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// The eight collectible token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    /// +100 score
    BoardingPass,
    /// +1 life, capped at 5
    Fuel,
    SpeedBoost,
    Ghost,
    SlowMo,
    SizeUp,
    SpeedUp,
    Gun,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 8] = [
        CollectibleKind::BoardingPass,
        CollectibleKind::Fuel,
        CollectibleKind::SpeedBoost,
        CollectibleKind::Ghost,
        CollectibleKind::SlowMo,
        CollectibleKind::SizeUp,
        CollectibleKind::SpeedUp,
        CollectibleKind::Gun,
    ];

    /// The timed effect this kind grants, if any. BoardingPass and Fuel
    /// apply instantly instead.
    pub fn power_up(self) -> Option<PowerUpKind> {
        match self {
            CollectibleKind::BoardingPass | CollectibleKind::Fuel => None,
            CollectibleKind::SpeedBoost => Some(PowerUpKind::SpeedBoost),
            CollectibleKind::Ghost => Some(PowerUpKind::Ghost),
            CollectibleKind::SlowMo => Some(PowerUpKind::SlowMo),
            CollectibleKind::SizeUp => Some(PowerUpKind::SizeUp),
            CollectibleKind::SpeedUp => Some(PowerUpKind::SpeedUp),
            CollectibleKind::Gun => Some(PowerUpKind::Gun),
        }
    }
}

/// A falling token.
#[derive(Debug, Clone, Copy)]
pub struct Collectible {
    pub x: f32,
    pub y: f32,
    pub kind: CollectibleKind,
    /// Spin angle in radians; rendering only, never hit-tested
    pub rotation: f32,
}

impl Collectible {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, COLLECTIBLE_SIZE, COLLECTIBLE_SIZE)
    }
}

/// Explosion burst tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    /// Player crash
    Red,
    /// Plane shot down
    Orange,
    /// Item collected
    Yellow,
}

impl ParticleColor {
    /// CSS color for the canvas renderer.
    pub fn as_css(&self) -> &'static str {
        match self {
            ParticleColor::Red => "#ff0000",
            ParticleColor::Orange => "#ffaa00",
            ParticleColor::Yellow => "#ffff00",
        }
    }
}

/// A cosmetic explosion fragment. No gameplay effect.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds of life left, from 0.5 down
    pub life: f32,
    pub color: ParticleColor,
}

impl Particle {
    pub fn new(pos: Vec2, angle: f32, color: ParticleColor) -> Self {
        Self {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * PARTICLE_SPEED,
            life: PARTICLE_LIFE,
            color,
        }
    }
}

/// A gun shot traveling upward.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    /// Vertical velocity in pixels per tick (negative = up)
    pub velocity_y: f32,
}

impl Projectile {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }
}

/// Complete game state, owned by the coordinator and mutated only in `tick`.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// 0..=5; hitting 0 ends the run
    pub lives: u8,
    /// Mirrors the difficulty level, for the UI sink
    pub level: u32,
    /// Seconds of playing time this run
    pub elapsed: f32,
    pub player: Player,
    pub planes: Vec<Plane>,
    pub collectibles: Vec<Collectible>,
    pub particles: Vec<Particle>,
    pub projectiles: Vec<Projectile>,
    pub power_ups: ActivePowerUps,
    /// Audio cues emitted by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state on the menu screen with the given seed.
    pub fn new(seed: u64, viewport: &Viewport) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            score: 0,
            lives: START_LIVES,
            level: 1,
            elapsed: 0.0,
            player: Player::spawn(viewport),
            planes: Vec::new(),
            collectibles: Vec::new(),
            particles: Vec::new(),
            projectiles: Vec::new(),
            power_ups: ActivePowerUps::new(),
            events: Vec::new(),
        }
    }

    /// The start/restart command: Menu or GameOver to Playing, full reset.
    ///
    /// The RNG stream continues across restarts, so successive runs differ;
    /// construct a fresh state for a reproducible run.
    pub fn start(&mut self, viewport: &Viewport) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = START_LIVES;
        self.level = 1;
        self.elapsed = 0.0;
        self.player = Player::spawn(viewport);
        self.planes.clear();
        self.collectibles.clear();
        self.particles.clear();
        self.projectiles.clear();
        self.power_ups.clear();
        self.events.clear();
        log::info!("game started");
    }

    /// Emit an 8-particle radial burst centered on (x, y).
    pub(crate) fn spawn_explosion(&mut self, x: f32, y: f32, color: ParticleColor) {
        let center = Vec2::new(x, y);
        for i in 0..EXPLOSION_PARTICLES {
            let angle = std::f32::consts::TAU * i as f32 / EXPLOSION_PARTICLES as f32;
            self.particles.push(Particle::new(center, angle, color));
        }
    }

    /// Hand the tick's cues to the audio sink, leaving the queue empty.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
