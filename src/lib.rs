//! Plane Dodger - a single-screen dodging/collecting arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, power-ups, game state)
//! - `audio`: Procedural sound cues (Web Audio on wasm)
//! - `settings`: Player preferences with LocalStorage persistence

pub mod audio;
pub mod settings;
pub mod sim;

pub use audio::AudioManager;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Player square side length (pixels)
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Player horizontal speed (pixels per tick)
    pub const PLAYER_BASE_SPEED: f32 = 5.0;
    /// Distance from the viewport bottom to the player's spawn row
    pub const PLAYER_BOTTOM_MARGIN: f32 = 60.0;

    /// Starting lives
    pub const START_LIVES: u8 = 3;
    /// Lives cap (fuel pickups cannot exceed this)
    pub const MAX_LIVES: u8 = 5;

    /// Smallest plane width; widths are drawn from [min, min + range)
    pub const PLANE_MIN_WIDTH: f32 = 60.0;
    pub const PLANE_WIDTH_RANGE: f32 = 20.0;
    /// Plane height as a fraction of its width
    pub const PLANE_ASPECT: f32 = 0.6;

    /// Collectible square side length
    pub const COLLECTIBLE_SIZE: f32 = 30.0;
    /// Collectible fall speed (pixels per tick)
    pub const COLLECTIBLE_FALL_SPEED: f32 = 2.0;
    /// Collectible spin (radians per tick, cosmetic)
    pub const COLLECTIBLE_SPIN: f32 = 0.1;
    /// Probability per tick of a collectible spawn (level-independent)
    pub const COLLECTIBLE_SPAWN_CHANCE: f32 = 0.005;

    /// Particles per explosion burst
    pub const EXPLOSION_PARTICLES: u32 = 8;
    /// Particle launch speed (pixels per tick)
    pub const PARTICLE_SPEED: f32 = 5.0;
    /// Particle lifetime (seconds)
    pub const PARTICLE_LIFE: f32 = 0.5;
    /// Downward acceleration on particles (pixels per tick squared)
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    /// Fixed per-tick life decay, assumes ~60fps (see DESIGN.md)
    pub const PARTICLE_LIFE_DECAY: f32 = 0.016;

    /// Projectile dimensions
    pub const PROJECTILE_WIDTH: f32 = 8.0;
    pub const PROJECTILE_HEIGHT: f32 = 16.0;
    /// Projectile upward speed (pixels per tick)
    pub const PROJECTILE_SPEED: f32 = 8.0;

    /// Power-up effect duration (seconds); re-collection resets to this
    pub const POWER_UP_DURATION: f32 = 5.0;
    /// Seconds of gun uptime between projectile shots
    pub const GUN_FIRE_INTERVAL: f32 = 0.2;

    /// Survival scoring rate (points per second, truncated per tick)
    pub const SURVIVAL_SCORE_RATE: f32 = 2.0;
    /// Score for collecting a boarding pass
    pub const BOARDING_PASS_SCORE: u64 = 100;
    /// Score for shooting down a plane
    pub const PLANE_DESTROY_SCORE: u64 = 50;

    /// Seconds of playing time per difficulty level
    pub const LEVEL_INTERVAL: f32 = 30.0;
    /// Plane spawn probability per tick at level 1
    pub const BASE_SPAWN_RATE: f32 = 0.015;
    /// Spawn probability gained per level
    pub const SPAWN_RATE_PER_LEVEL: f32 = 0.003;
    /// Spawn probability cap
    pub const MAX_SPAWN_RATE: f32 = 0.05;
    /// Slowest plane speed at level 1 (pixels per tick)
    pub const BASE_PLANE_SPEED: f32 = 1.5;
    /// Slowest plane speed gained per level
    pub const PLANE_SPEED_PER_LEVEL: f32 = 0.3;
    /// Fastest plane speed at level 1
    pub const BASE_MAX_PLANE_SPEED: f32 = 3.0;
    /// Fastest plane speed gained per level
    pub const MAX_PLANE_SPEED_PER_LEVEL: f32 = 0.5;
}
