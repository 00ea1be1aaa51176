//! Active power-up tracking
//!
//! A fixed-size table from the closed set of power-up kinds to remaining
//! duration. Durations decay by real elapsed time once per tick; collecting
//! a kind that is already active resets its clock rather than extending it.

use crate::consts::{GUN_FIRE_INTERVAL, POWER_UP_DURATION};

/// The closed set of timed power-up effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Player horizontal speed x2
    SpeedBoost,
    /// Player passes through planes unharmed
    Ghost,
    /// Plane fall speed x0.5
    SlowMo,
    /// Player hit-tested and rendered at x1.5 size
    SizeUp,
    /// Plane fall speed x1.5
    SpeedUp,
    /// Auto-fires a projectile every 0.2s of uptime
    Gun,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::Ghost,
        PowerUpKind::SlowMo,
        PowerUpKind::SizeUp,
        PowerUpKind::SpeedUp,
        PowerUpKind::Gun,
    ];

    fn index(self) -> usize {
        match self {
            PowerUpKind::SpeedBoost => 0,
            PowerUpKind::Ghost => 1,
            PowerUpKind::SlowMo => 2,
            PowerUpKind::SizeUp => 3,
            PowerUpKind::SpeedUp => 4,
            PowerUpKind::Gun => 5,
        }
    }

    /// Badge label for the HUD.
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::SpeedBoost => "speedboost",
            PowerUpKind::Ghost => "ghost",
            PowerUpKind::SlowMo => "slowmo",
            PowerUpKind::SizeUp => "sizeup",
            PowerUpKind::SpeedUp => "speedup",
            PowerUpKind::Gun => "gun",
        }
    }
}

/// Remaining durations for every active power-up, plus the gun's fire timer.
///
/// The fire timer lives here because its lifecycle is bound to Gun: it is
/// zeroed on a fresh activation and pinned at zero while Gun is inactive,
/// so no partial firing interval survives a deactivation.
#[derive(Debug, Clone, Default)]
pub struct ActivePowerUps {
    remaining: [Option<f32>; 6],
    gun_timer: f32,
}

impl ActivePowerUps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) an effect at the full duration.
    pub fn activate(&mut self, kind: PowerUpKind) {
        self.remaining[kind.index()] = Some(POWER_UP_DURATION);
        if kind == PowerUpKind::Gun {
            self.gun_timer = 0.0;
        }
    }

    /// Decay all active effects by `dt` seconds, expiring those that hit zero.
    pub fn tick(&mut self, dt: f32) {
        for slot in &mut self.remaining {
            if let Some(left) = slot {
                *left -= dt;
                if *left <= 0.0 {
                    *slot = None;
                }
            }
        }
        if !self.is_active(PowerUpKind::Gun) {
            self.gun_timer = 0.0;
        }
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.remaining[kind.index()].is_some()
    }

    /// Seconds left on an effect, if active.
    pub fn remaining(&self, kind: PowerUpKind) -> Option<f32> {
        self.remaining[kind.index()]
    }

    /// Active kinds with their remaining durations, in declaration order.
    pub fn iter_active(&self) -> impl Iterator<Item = (PowerUpKind, f32)> + '_ {
        PowerUpKind::ALL
            .iter()
            .filter_map(|&kind| self.remaining(kind).map(|left| (kind, left)))
    }

    /// Accumulate gun uptime; true when a shot is due this tick.
    ///
    /// At most one shot per tick, and the timer snaps back to zero on
    /// firing (overshoot is discarded). Reaching the interval exactly fires.
    pub fn gun_should_fire(&mut self, dt: f32) -> bool {
        if !self.is_active(PowerUpKind::Gun) {
            self.gun_timer = 0.0;
            return false;
        }
        self.gun_timer += dt;
        if self.gun_timer >= GUN_FIRE_INTERVAL {
            self.gun_timer = 0.0;
            true
        } else {
            false
        }
    }

    pub fn gun_timer(&self) -> f32 {
        self.gun_timer
    }

    /// Drop every effect (new game).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
