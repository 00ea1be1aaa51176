//! The per-frame simulation step
//!
//! One call advances the whole game by one frame: timing, scoring, player
//! movement, spawning, collisions, power-up decay. The step order is load
//! bearing - spawns happen before their movement passes, the gun fires after
//! existing projectiles move, and a fatal crash aborts the remainder of the
//! tick so nothing simulates past the GameOver transition.
//!
//! All removal passes preserve list order (mark-and-compact or `retain`),
//! so which plane a projectile hits first is deterministic: first match in
//! list order wins.

use rand::Rng;

use super::difficulty::compute_difficulty;
use super::powerup::PowerUpKind;
use super::state::{
    Collectible, CollectibleKind, GameEvent, GamePhase, GameState, ParticleColor, Plane,
    Projectile, Viewport,
};
use crate::consts::*;

/// Held logical directions for a single tick.
///
/// The frontend folds keyboard and touch state into this; the core never
/// sees raw device events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Advance the game by one frame.
///
/// `dt` is wall-clock seconds since the previous tick. Runs only while
/// `Playing`; Menu and GameOver are inert. Cues for the audio sink are left
/// in `state.events`, replacing the previous tick's.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, viewport: &Viewport) {
    state.events.clear();
    if state.phase != GamePhase::Playing {
        return;
    }

    // Timing and difficulty
    state.elapsed += dt;
    let difficulty = compute_difficulty(state.elapsed);
    if difficulty.level > state.level {
        log::info!("reached level {}", difficulty.level);
    }
    state.level = difficulty.level;

    // Survival scoring: 2 points/second, truncated per tick (sub-half-second
    // frames score nothing; kept as-is, see DESIGN.md)
    state.score += (dt * SURVIVAL_SCORE_RATE).floor() as u64;

    // Player movement and boundary clamp
    update_player(state, input, viewport);

    // Plane spawn roll
    if state.rng.random::<f32>() < difficulty.spawn_rate {
        spawn_plane(state, difficulty.min_plane_speed, difficulty.max_plane_speed, viewport);
    }

    // Plane movement and player collisions; a fatal crash ends the tick here
    if update_planes(state, viewport) {
        return;
    }

    // Projectiles in flight
    update_projectiles(state);

    // Gun auto-fire
    if state.power_ups.gun_should_fire(dt) {
        let center_x = state.player.x + PLAYER_SIZE / 2.0;
        state.projectiles.push(Projectile {
            x: center_x - PROJECTILE_WIDTH / 2.0,
            y: state.player.y - PROJECTILE_HEIGHT,
            velocity_y: -PROJECTILE_SPEED,
        });
    }

    // Collectible spawn roll (level-independent)
    if state.rng.random::<f32>() < COLLECTIBLE_SPAWN_CHANCE {
        spawn_collectible(state, viewport);
    }

    // Collectible movement and pickups
    update_collectibles(state, viewport);

    // Particle integration
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.vel.y += PARTICLE_GRAVITY;
        particle.life -= PARTICLE_LIFE_DECAY;
    }
    state.particles.retain(|p| p.life > 0.0);

    // Power-up duration decay
    state.power_ups.tick(dt);
}

fn update_player(state: &mut GameState, input: &TickInput, viewport: &Viewport) {
    let speed = state.player.effective_speed(&state.power_ups);
    if input.left {
        state.player.x -= speed;
    }
    if input.right {
        state.player.x += speed;
    }

    // Clamp so the effective (possibly grown) rect stays inside the viewport
    let size = state.player.effective_size(&state.power_ups);
    let offset = (size - PLAYER_SIZE) / 2.0;
    if state.player.x < offset {
        state.player.x = offset;
    }
    if state.player.x > viewport.width - size + offset {
        state.player.x = viewport.width - size + offset;
    }
}

fn spawn_plane(state: &mut GameState, min_speed: f32, max_speed: f32, viewport: &Viewport) {
    let x = state.rng.random::<f32>() * (viewport.width - PLANE_MIN_WIDTH);
    let width = PLANE_MIN_WIDTH + state.rng.random::<f32>() * PLANE_WIDTH_RANGE;
    let speed = min_speed + state.rng.random::<f32>() * (max_speed - min_speed);
    state.planes.push(Plane {
        x,
        y: -width,
        width,
        height: width * PLANE_ASPECT,
        speed,
    });
}

/// Move planes, resolve player collisions, drop planes past the bottom edge.
///
/// Returns true when the crash was fatal; later planes are left untouched in
/// that case so no simulation runs past the GameOver transition.
fn update_planes(state: &mut GameState, viewport: &Viewport) -> bool {
    let ghost = state.power_ups.is_active(PowerUpKind::Ghost);
    let speed_factor = plane_speed_factor(state);

    let mut keep = vec![true; state.planes.len()];
    for i in 0..state.planes.len() {
        let plane = &mut state.planes[i];
        plane.y += plane.speed * speed_factor;
        let plane_rect = plane.rect();
        let off_screen = plane.y > viewport.height;

        let player_rect = state.player.effective_rect(&state.power_ups);
        if plane_rect.intersects(&player_rect) && !ghost {
            state.lives = state.lives.saturating_sub(1);
            let (px, py) = (state.player.x, state.player.y);
            state.spawn_explosion(px, py, ParticleColor::Red);
            state.events.push(GameEvent::Crash);
            state.player.reset(viewport);

            if state.lives == 0 {
                state.phase = GamePhase::GameOver;
                log::info!("game over: score {}, level {}", state.score, state.level);
                compact(&mut state.planes, &keep);
                return true;
            }
        }

        if off_screen {
            keep[i] = false;
        }
    }
    compact(&mut state.planes, &keep);
    false
}

/// Combined SlowMo/SpeedUp factor on plane fall speed. Both apply when both
/// are active (0.75x net).
fn plane_speed_factor(state: &GameState) -> f32 {
    let mut factor = 1.0;
    if state.power_ups.is_active(PowerUpKind::SlowMo) {
        factor *= 0.5;
    }
    if state.power_ups.is_active(PowerUpKind::SpeedUp) {
        factor *= 1.5;
    }
    factor
}

/// Move projectiles and resolve plane hits; the first plane in list order
/// takes the hit.
fn update_projectiles(state: &mut GameState) {
    let mut keep_planes = vec![true; state.planes.len()];
    let mut keep_projectiles = vec![true; state.projectiles.len()];

    for i in 0..state.projectiles.len() {
        {
            let projectile = &mut state.projectiles[i];
            projectile.y += projectile.velocity_y;
        }
        let projectile_rect = state.projectiles[i].rect();

        let mut hit = false;
        for j in 0..state.planes.len() {
            if keep_planes[j] && projectile_rect.intersects(&state.planes[j].rect()) {
                keep_planes[j] = false;
                let (px, py) = (state.planes[j].x, state.planes[j].y);
                state.spawn_explosion(px, py, ParticleColor::Orange);
                state.score += PLANE_DESTROY_SCORE;
                state.events.push(GameEvent::Collect);
                hit = true;
                break;
            }
        }

        if hit || state.projectiles[i].y + PROJECTILE_HEIGHT < 0.0 {
            keep_projectiles[i] = false;
        }
    }

    compact(&mut state.planes, &keep_planes);
    compact(&mut state.projectiles, &keep_projectiles);
}

fn spawn_collectible(state: &mut GameState, viewport: &Viewport) {
    let x = state.rng.random::<f32>() * (viewport.width - COLLECTIBLE_SIZE);
    let kind = CollectibleKind::ALL[state.rng.random_range(0..CollectibleKind::ALL.len())];
    state.collectibles.push(Collectible {
        x,
        y: -COLLECTIBLE_SIZE,
        kind,
        rotation: 0.0,
    });
}

/// Move collectibles, apply pickups, drop tokens past the bottom edge.
fn update_collectibles(state: &mut GameState, viewport: &Viewport) {
    let player_rect = state.player.effective_rect(&state.power_ups);

    let mut keep = vec![true; state.collectibles.len()];
    for i in 0..state.collectibles.len() {
        let item = &mut state.collectibles[i];
        item.y += COLLECTIBLE_FALL_SPEED;
        item.rotation += COLLECTIBLE_SPIN;

        if item.rect().intersects(&player_rect) {
            let (kind, x, y) = (item.kind, item.x, item.y);
            state.spawn_explosion(x, y, ParticleColor::Yellow);
            apply_pickup(state, kind);
            keep[i] = false;
        } else if state.collectibles[i].y > viewport.height {
            keep[i] = false;
        }
    }
    compact(&mut state.collectibles, &keep);
}

fn apply_pickup(state: &mut GameState, kind: CollectibleKind) {
    match kind {
        CollectibleKind::BoardingPass => {
            state.score += BOARDING_PASS_SCORE;
            state.events.push(GameEvent::Collect);
        }
        CollectibleKind::Fuel => {
            state.lives = (state.lives + 1).min(MAX_LIVES);
            state.events.push(GameEvent::Collect);
        }
        _ => {
            // The remaining kinds are all timed effects
            if let Some(power_up) = kind.power_up() {
                state.power_ups.activate(power_up);
                state.events.push(GameEvent::PowerUp);
            }
        }
    }
}

/// Order-preserving removal: drop the entries whose flag is false.
fn compact<T>(entries: &mut Vec<T>, keep: &[bool]) {
    let mut index = 0;
    entries.retain(|_| {
        let kept = keep.get(index).copied().unwrap_or(true);
        index += 1;
        kept
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Player;

    const VIEWPORT: Viewport = Viewport {
        width: 400.0,
        height: 400.0,
    };

    /// Small enough that survival scoring truncates to zero.
    const FRAME: f32 = 0.016;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42, &VIEWPORT);
        state.start(&VIEWPORT);
        state
    }

    fn plane_at(x: f32, y: f32, speed: f32) -> Plane {
        Plane {
            x,
            y,
            width: 60.0,
            height: 36.0,
            speed,
        }
    }

    fn item_on_player(state: &GameState, kind: CollectibleKind) -> Collectible {
        Collectible {
            x: state.player.x,
            y: state.player.y,
            kind,
            rotation: 0.0,
        }
    }

    #[test]
    fn menu_and_game_over_are_inert() {
        let mut state = GameState::new(1, &VIEWPORT);
        tick(&mut state, &TickInput::default(), 1.0, &VIEWPORT);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.score, 0);

        state.phase = GamePhase::GameOver;
        tick(&mut state, &TickInput::default(), 1.0, &VIEWPORT);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn one_second_survival_tick() {
        let mut state = playing_state();
        tick(&mut state, &TickInput::default(), 1.0, &VIEWPORT);
        assert_eq!(state.elapsed, 1.0);
        assert_eq!(state.score, 2);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn sub_half_second_frames_score_nothing() {
        let mut state = playing_state();
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), FRAME, &VIEWPORT);
        }
        assert_eq!(state.score, 0);
        assert!((state.elapsed - 0.48).abs() < 1e-4);
    }

    #[test]
    fn level_advances_with_elapsed_time() {
        let mut state = playing_state();
        tick(&mut state, &TickInput::default(), 30.0, &VIEWPORT);
        assert_eq!(state.level, 2);
        tick(&mut state, &TickInput::default(), 30.0, &VIEWPORT);
        assert_eq!(state.level, 3);
    }

    #[test]
    fn player_clamps_to_both_edges() {
        let mut state = playing_state();
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..40 {
            tick(&mut state, &right, FRAME, &VIEWPORT);
        }
        assert_eq!(state.player.x, VIEWPORT.width - PLAYER_SIZE);

        let left = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..75 {
            tick(&mut state, &left, FRAME, &VIEWPORT);
        }
        assert_eq!(state.player.x, 0.0);
    }

    #[test]
    fn sizeup_clamp_keeps_effective_rect_inside() {
        let mut state = playing_state();
        state.power_ups.activate(PowerUpKind::SizeUp);
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..40 {
            tick(&mut state, &left, FRAME, &VIEWPORT);
        }
        let rect = state.player.effective_rect(&state.power_ups);
        assert_eq!(rect.x, 0.0);
        assert_eq!(state.player.x, 10.0);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..72 {
            tick(&mut state, &right, FRAME, &VIEWPORT);
        }
        let rect = state.player.effective_rect(&state.power_ups);
        assert_eq!(rect.x + rect.width, VIEWPORT.width);
    }

    #[test]
    fn speedboost_doubles_movement() {
        let mut state = playing_state();
        let start_x = state.player.x;
        state.power_ups.activate(PowerUpKind::SpeedBoost);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right, FRAME, &VIEWPORT);
        assert_eq!(state.player.x, start_x + 10.0);
    }

    #[test]
    fn ghost_passes_through_planes() {
        let mut state = playing_state();
        state.power_ups.activate(PowerUpKind::Ghost);
        state.planes.push(plane_at(state.player.x, state.player.y, 0.0));

        tick(&mut state, &TickInput::default(), FRAME, &VIEWPORT);

        assert_eq!(state.lives, 3);
        assert_eq!(state.player.x, Player::spawn(&VIEWPORT).x);
        assert!(!state.events.contains(&GameEvent::Crash));
        assert!(state.particles.is_empty());
    }

    #[test]
    fn crash_costs_a_life_and_resets_the_player() {
        let mut state = playing_state();
        state.planes.push(plane_at(170.0, 330.0, 0.0));

        // Move off spawn on the same tick so the reset is observable
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right, FRAME, &VIEWPORT);

        assert_eq!(state.lives, 2);
        assert_eq!(state.player.x, Player::spawn(&VIEWPORT).x);
        assert_eq!(
            state.events.iter().filter(|e| **e == GameEvent::Crash).count(),
            1
        );
        assert_eq!(state.particles.len(), 8);
        assert!(state
            .particles
            .iter()
            .all(|p| p.color == ParticleColor::Red));
        // The plane survives the crash
        assert!(state.planes.iter().any(|p| p.y == 330.0));
    }

    #[test]
    fn fatal_crash_stops_the_tick() {
        let mut state = playing_state();
        state.lives = 1;
        state.planes.push(plane_at(170.0, 330.0, 0.0));
        state.planes.push(plane_at(0.0, 100.0, 2.0));

        tick(&mut state, &TickInput::default(), FRAME, &VIEWPORT);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);
        assert!(state.events.contains(&GameEvent::Crash));
        // The plane after the fatal one was never moved
        assert_eq!(state.planes[1].y, 100.0);

        // GameOver is inert
        let elapsed = state.elapsed;
        tick(&mut state, &TickInput::default(), 1.0, &VIEWPORT);
        assert_eq!(state.elapsed, elapsed);
    }

    #[test]
    fn fuel_adds_a_life_up_to_the_cap() {
        let mut state = playing_state();
        state
            .collectibles
            .push(item_on_player(&state, CollectibleKind::Fuel));
        tick(&mut state, &TickInput::default(), FRAME, &VIEWPORT);
        assert_eq!(state.lives, 4);
        assert!(state.events.contains(&GameEvent::Collect));
        assert_eq!(state.particles.len(), 8);
        assert!(state
            .particles
            .iter()
            .all(|p| p.color == ParticleColor::Yellow));

        state.lives = 5;
        state
            .collectibles
            .push(item_on_player(&state, CollectibleKind::Fuel));
        tick(&mut state, &TickInput::default(), FRAME, &VIEWPORT);
        assert_eq!(state.lives, 5);
    }

    #[test]
    fn boarding_pass_scores_a_hundred() {
        let mut state = playing_state();
        state
            .collectibles
            .push(item_on_player(&state, CollectibleKind::BoardingPass));
        tick(&mut state, &TickInput::default(), FRAME, &VIEWPORT);
        assert_eq!(state.score, 100);
        assert!(state.events.contains(&GameEvent::Collect));
    }

    #[test]
    fn power_up_pickup_activates_the_effect() {
        let mut state = playing_state();
        state
            .collectibles
            .push(item_on_player(&state, CollectibleKind::Ghost));
        tick(&mut state, &TickInput::default(), FRAME, &VIEWPORT);

        assert!(state.power_ups.is_active(PowerUpKind::Ghost));
        // Activation happens before the registry decay step
        let left = state.power_ups.remaining(PowerUpKind::Ghost).unwrap();
        assert!(left > 4.9 && left < 5.0);
        assert!(state.events.contains(&GameEvent::PowerUp));
    }

    #[test]
    fn missed_collectibles_fall_off_screen() {
        let mut state = playing_state();
        state.collectibles.push(Collectible {
            x: 0.0,
            y: VIEWPORT.height - 1.0,
            kind: CollectibleKind::BoardingPass,
            rotation: 0.0,
        });
        tick(&mut state, &TickInput::default(), FRAME, &VIEWPORT);
        assert!(!state.collectibles.iter().any(|c| c.x == 0.0));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn gun_fires_on_the_quantized_interval() {
        let mut state = playing_state();
        state.power_ups.activate(PowerUpKind::Gun);

        // 0.25s in one tick: exactly one shot, overshoot discarded
        tick(&mut state, &TickInput::default(), 0.25, &VIEWPORT);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.power_ups.gun_timer(), 0.0);
        // Spawned at the player's top-center
        assert_eq!(
            state.projectiles[0].x,
            state.player.x + PLAYER_SIZE / 2.0 - PROJECTILE_WIDTH / 2.0
        );

        // Under the interval: no shot
        tick(&mut state, &TickInput::default(), 0.1, &VIEWPORT);
        assert_eq!(state.projectiles.len(), 1);

        // Reaching the interval exactly fires
        tick(&mut state, &TickInput::default(), 0.1, &VIEWPORT);
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn projectile_hits_the_first_plane_in_list_order() {
        let mut state = playing_state();
        state.planes.push(plane_at(180.0, 250.0, 0.0));
        state.planes.push(plane_at(190.0, 250.0, 0.0));
        state.projectiles.push(Projectile {
            x: 196.0,
            y: 260.0,
            velocity_y: -PROJECTILE_SPEED,
        });

        tick(&mut state, &TickInput::default(), FRAME, &VIEWPORT);

        // Only the earlier plane is gone
        let remaining: Vec<f32> = state
            .planes
            .iter()
            .filter(|p| p.y == 250.0)
            .map(|p| p.x)
            .collect();
        assert_eq!(remaining, vec![190.0]);
        assert_eq!(state.score, PLANE_DESTROY_SCORE);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.particles.len(), 8);
        assert!(state
            .particles
            .iter()
            .all(|p| p.color == ParticleColor::Orange));
        assert!(state.events.contains(&GameEvent::Collect));
    }

    #[test]
    fn slowmo_and_speedup_compose_multiplicatively() {
        for (slowmo, speedup, expected_y) in [
            (true, false, 1.0),
            (false, true, 3.0),
            (true, true, 1.5),
        ] {
            let mut state = playing_state();
            state.planes.insert(0, plane_at(0.0, 0.0, 2.0));
            if slowmo {
                state.power_ups.activate(PowerUpKind::SlowMo);
            }
            if speedup {
                state.power_ups.activate(PowerUpKind::SpeedUp);
            }
            tick(&mut state, &TickInput::default(), FRAME, &VIEWPORT);
            assert_eq!(state.planes[0].y, expected_y);
        }
    }

    #[test]
    fn planes_leave_through_the_bottom_edge() {
        let mut state = playing_state();
        state.planes.insert(0, plane_at(0.0, VIEWPORT.height - 1.0, 2.0));
        tick(&mut state, &TickInput::default(), FRAME, &VIEWPORT);
        assert!(!state.planes.iter().any(|p| p.x == 0.0));
    }

    #[test]
    fn particles_decay_on_a_fixed_step() {
        let mut state = playing_state();
        state.spawn_explosion(100.0, 100.0, ParticleColor::Yellow);

        // 0.5s of life at 0.016s per tick survives 31 ticks
        for _ in 0..31 {
            tick(&mut state, &TickInput::default(), 0.001, &VIEWPORT);
        }
        assert_eq!(state.particles.len(), 8);

        tick(&mut state, &TickInput::default(), 0.001, &VIEWPORT);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn power_ups_expire_during_the_tick() {
        let mut state = playing_state();
        state.power_ups.activate(PowerUpKind::SpeedBoost);
        tick(&mut state, &TickInput::default(), 5.0, &VIEWPORT);
        assert!(!state.power_ups.is_active(PowerUpKind::SpeedBoost));
    }

    #[test]
    fn events_are_replaced_each_tick() {
        let mut state = playing_state();
        state
            .collectibles
            .push(item_on_player(&state, CollectibleKind::Fuel));
        tick(&mut state, &TickInput::default(), FRAME, &VIEWPORT);
        assert!(!state.events.is_empty());

        tick(&mut state, &TickInput::default(), FRAME, &VIEWPORT);
        assert!(state.events.is_empty());
    }

    #[test]
    fn restart_after_game_over() {
        let mut state = playing_state();
        state.lives = 1;
        state.planes.push(plane_at(170.0, 330.0, 0.0));
        tick(&mut state, &TickInput::default(), FRAME, &VIEWPORT);
        assert_eq!(state.phase, GamePhase::GameOver);

        state.start(&VIEWPORT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert!(state.planes.is_empty());

        tick(&mut state, &TickInput::default(), 1.0, &VIEWPORT);
        assert_eq!(state.elapsed, 1.0);
        assert_eq!(state.score, 2);
    }
}
