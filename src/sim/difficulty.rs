//! Difficulty scheduling
//!
//! Spawn rate and plane speed bounds are pure functions of elapsed playing
//! time. Recomputed every tick; cheap enough that memoization would only
//! add state.

use crate::consts::*;

/// Spawn and speed parameters for a moment of playing time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// 1-based level, advances every 30 seconds
    pub level: u32,
    /// Probability per tick that a plane spawn attempt succeeds
    pub spawn_rate: f32,
    /// Slowest speed a newly spawned plane may get (pixels per tick)
    pub min_plane_speed: f32,
    /// Fastest speed a newly spawned plane may get
    pub max_plane_speed: f32,
}

/// Derive the difficulty parameters for `elapsed` seconds of playing time.
///
/// The constants define game feel and balance; tests pin them exactly.
pub fn compute_difficulty(elapsed: f32) -> Difficulty {
    let level = (elapsed / LEVEL_INTERVAL).floor() as u32 + 1;
    let steps = (level - 1) as f32;
    Difficulty {
        level,
        spawn_rate: (BASE_SPAWN_RATE + steps * SPAWN_RATE_PER_LEVEL).min(MAX_SPAWN_RATE),
        min_plane_speed: BASE_PLANE_SPEED + steps * PLANE_SPEED_PER_LEVEL,
        max_plane_speed: BASE_MAX_PLANE_SPEED + steps * MAX_PLANE_SPEED_PER_LEVEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn level_boundaries() {
        assert_eq!(compute_difficulty(0.0).level, 1);
        assert_eq!(compute_difficulty(29.99).level, 1);
        assert_eq!(compute_difficulty(30.0).level, 2);
        assert_eq!(compute_difficulty(59.9).level, 2);
        assert_eq!(compute_difficulty(60.0).level, 3);
        assert_eq!(compute_difficulty(300.0).level, 11);
    }

    #[test]
    fn level_one_parameters() {
        let d = compute_difficulty(0.0);
        assert_eq!(d.spawn_rate, 0.015);
        assert_eq!(d.min_plane_speed, 1.5);
        assert_eq!(d.max_plane_speed, 3.0);
    }

    #[test]
    fn level_two_parameters() {
        let d = compute_difficulty(30.0);
        assert!((d.spawn_rate - 0.018).abs() < 1e-6);
        assert!((d.min_plane_speed - 1.8).abs() < 1e-6);
        assert!((d.max_plane_speed - 3.5).abs() < 1e-6);
    }

    #[test]
    fn spawn_rate_caps_at_high_levels() {
        // Level 12 is the last uncapped level (0.015 + 11 * 0.003 = 0.048)
        let d12 = compute_difficulty(11.0 * 30.0);
        assert_eq!(d12.level, 12);
        assert!((d12.spawn_rate - 0.048).abs() < 1e-6);

        // From level 13 on the cap holds
        let d13 = compute_difficulty(12.0 * 30.0);
        assert_eq!(d13.spawn_rate, 0.05);
        let d40 = compute_difficulty(39.0 * 30.0);
        assert_eq!(d40.spawn_rate, 0.05);
    }

    #[test]
    fn speed_band_stays_ordered() {
        for level in 0..50 {
            let d = compute_difficulty(level as f32 * 30.0);
            assert!(d.min_plane_speed < d.max_plane_speed);
        }
    }

    proptest! {
        #[test]
        fn parameters_never_decrease(t in 0.0f32..7200.0, dt in 0.0f32..600.0) {
            let a = compute_difficulty(t);
            let b = compute_difficulty(t + dt);
            prop_assert!(b.level >= a.level);
            prop_assert!(b.spawn_rate >= a.spawn_rate);
            prop_assert!(b.min_plane_speed >= a.min_plane_speed);
            prop_assert!(b.max_plane_speed >= a.max_plane_speed);
        }

        #[test]
        fn spawn_rate_respects_cap(t in 0.0f32..100_000.0) {
            prop_assert!(compute_difficulty(t).spawn_rate <= 0.05);
        }

        #[test]
        fn level_matches_formula(t in 0.0f32..7200.0) {
            prop_assert_eq!(compute_difficulty(t).level, (t / 30.0) as u32 + 1);
        }
    }
}
