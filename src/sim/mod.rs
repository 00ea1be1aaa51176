//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (removal passes preserve list order)
//! - No rendering, DOM, or audio dependencies
//!
//! The frontend drives it with `tick` once per animation frame and reads
//! `GameState` back as a read-only snapshot.

pub mod collision;
pub mod difficulty;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use difficulty::{Difficulty, compute_difficulty};
pub use powerup::{ActivePowerUps, PowerUpKind};
pub use state::{
    Collectible, CollectibleKind, GameEvent, GamePhase, GameState, Particle, ParticleColor, Plane,
    Player, Projectile, Viewport,
};
pub use tick::{TickInput, tick};
