//! Simulation tick
//!
//! Advances a mission by one logical step. Velocities are in units per tick;
//! fire cooldowns run on the mission clock (`now_ms`) so fire rate does not
//! depend on the tick rate.

use glam::Vec2;

use super::combat::resolve_hits;
use super::state::{Explosion, MissionState};
use crate::consts::*;
use crate::geom::{Bounds, angle_to, cap_length, heading};

/// Control state sampled for a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// Accelerate along the facing axis
    pub thrust: bool,
    /// Accelerate against the facing axis
    pub brake: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub fire: bool,
    /// Aim point in playfield coordinates
    pub target: Vec2,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            thrust: false,
            brake: false,
            strafe_left: false,
            strafe_right: false,
            fire: false,
            target: Vec2::new(GAME_WIDTH / 2.0, 0.0),
        }
    }
}

/// The playfield rectangle
pub const PLAYFIELD: Bounds = Bounds::from_size(GAME_WIDTH, GAME_HEIGHT);

/// Compute the next mission state from the previous one
pub fn step(prev: &MissionState, input: &TickInput, now_ms: f64) -> MissionState {
    let mut next = prev.clone();
    tick(&mut next, input, now_ms);
    next
}

/// Advance the mission state by one tick in place
pub fn tick(state: &mut MissionState, input: &TickInput, now_ms: f64) {
    if !state.started {
        return;
    }

    state.time_ticks += 1;
    let player_was_alive = state.player.is_alive();

    if player_was_alive {
        update_player(state, input, now_ms);
    }
    update_enemies(state, now_ms);

    for projectile in &mut state.projectiles {
        projectile.pos += projectile.vel;
    }

    resolve_hits(state);
    cleanup(state, player_was_alive, now_ms);
}

fn update_player(state: &mut MissionState, input: &TickInput, now_ms: f64) {
    let player = &mut state.player;
    player.rotation = angle_to(player.pos, input.target);

    let mut forward = 0.0;
    let mut strafe = 0.0;
    if input.thrust {
        forward += PLAYER_ACCELERATION;
    }
    if input.brake {
        forward -= PLAYER_ACCELERATION;
    }
    if input.strafe_left {
        strafe -= PLAYER_ACCELERATION;
    }
    if input.strafe_right {
        strafe += PLAYER_ACCELERATION;
    }

    let facing = heading(player.rotation);
    let side = facing.perp();
    player.vel += facing * forward + side * strafe;
    player.vel = cap_length(player.vel, PLAYER_MAX_SPEED);
    player.vel *= PLAYER_FRICTION;

    player.pos += player.vel;
    player.pos = PLAYFIELD.inset(player.radius).clamp(player.pos);

    if input.fire && now_ms > state.last_player_fire + PLAYER_FIRE_RATE_MS {
        let pos = player.pos;
        let vel = facing * PLAYER_PROJECTILE_SPEED;
        state.spawn_projectile(
            pos,
            vel,
            PLAYER_PROJECTILE_RADIUS,
            PLAYER_PROJECTILE_DAMAGE,
            true,
        );
        state.last_player_fire = now_ms;
    }
}

fn update_enemies(state: &mut MissionState, now_ms: f64) {
    let target = state.player.pos;
    let mut shots: Vec<(Vec2, Vec2, f32, f32)> = Vec::new();

    for enemy in &mut state.enemies {
        let ship = &mut enemy.ship;
        let to_player = target - ship.pos;
        let distance = to_player.length();
        ship.rotation = angle_to(ship.pos, target);

        ship.vel = enemy_velocity(to_player, ship.rotation, enemy.profile.max_speed);
        ship.pos += ship.vel;

        if now_ms > enemy.last_fired + enemy.fire_rate_ms && distance < ENEMY_FIRING_RANGE {
            shots.push((
                ship.pos,
                heading(ship.rotation) * enemy.profile.projectile_speed,
                enemy.profile.projectile_radius,
                enemy.profile.projectile_damage,
            ));
            enemy.last_fired = now_ms;
        }
    }

    for (pos, vel, radius, damage) in shots {
        state.spawn_projectile(pos, vel, radius, damage, false);
    }
}

/// Chase beyond `ENEMY_CHASE_DISTANCE`, circle at half speed inside it.
///
/// Re-evaluated from the instantaneous distance every tick.
pub fn enemy_velocity(to_player: Vec2, rotation: f32, max_speed: f32) -> Vec2 {
    let distance = to_player.length();
    if distance > ENEMY_CHASE_DISTANCE {
        to_player / distance * max_speed
    } else {
        heading(rotation).perp() * max_speed * 0.5
    }
}

fn cleanup(state: &mut MissionState, player_was_alive: bool, now_ms: f64) {
    let mut new_explosions = Vec::new();

    for enemy in &mut state.enemies {
        // Also catches hull zeroed outside of combat
        enemy.ship.mark_if_wrecked();
        if enemy.ship.destroyed {
            new_explosions.push((enemy.ship.pos, enemy.ship.radius));
        }
    }
    state.player.mark_if_wrecked();
    if player_was_alive && state.player.destroyed {
        new_explosions.push((state.player.pos, state.player.radius));
    }

    let cull = PLAYFIELD.expand(PROJECTILE_CULL_MARGIN);
    state
        .projectiles
        .retain(|p| !p.spent && cull.contains(p.pos));
    state.enemies.retain(|e| !e.ship.destroyed);

    for explosion in &mut state.explosions {
        explosion.life = explosion.life.saturating_sub(1);
    }
    state.explosions.retain(|e| e.life > 0);
    for (pos, radius) in new_explosions {
        let id = state.next_entity_id();
        state.explosions.push(Explosion::new(id, pos, radius));
    }

    if state.message.as_ref().is_some_and(|m| now_ms > m.expires_at) {
        state.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{EnemyKind, LevelConfig};
    use proptest::prelude::*;

    /// A started mission with no enemies
    fn empty_mission() -> MissionState {
        MissionState::start(&LevelConfig::default(), 1)
    }

    fn fire_input() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_unstarted_state_is_unchanged() {
        let state = MissionState::default();
        let next = step(&state, &fire_input(), 5000.0);
        assert_eq!(next.time_ticks, 0);
        assert!(next.projectiles.is_empty());
        assert_eq!(next.player, state.player);
    }

    #[test]
    fn test_step_leaves_previous_state_untouched() {
        let state = empty_mission();
        let next = step(&state, &fire_input(), 1000.0);
        assert_eq!(state.projectiles.len(), 0);
        assert_eq!(next.projectiles.len(), 1);
        assert_eq!(next.time_ticks, state.time_ticks + 1);
    }

    #[test]
    fn test_player_faces_target() {
        let mut state = empty_mission();
        let input = TickInput {
            target: state.player.pos + Vec2::new(100.0, 0.0),
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        assert!(state.player.rotation.abs() < 1e-6);
    }

    #[test]
    fn test_thrust_accelerates_toward_target() {
        let mut state = empty_mission();
        let start = state.player.pos;
        let input = TickInput {
            thrust: true,
            target: start + Vec2::new(0.0, -300.0),
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        let expected = PLAYER_ACCELERATION * PLAYER_FRICTION;
        assert!((state.player.vel.y + expected).abs() < 1e-6);
        assert!(state.player.vel.x.abs() < 1e-6);
        assert!(state.player.pos.y < start.y);
    }

    #[test]
    fn test_brake_accelerates_away_from_target() {
        let mut state = empty_mission();
        state.player.pos = Vec2::new(640.0, 360.0);
        let input = TickInput {
            brake: true,
            target: Vec2::new(640.0, 60.0),
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        let expected = PLAYER_ACCELERATION * PLAYER_FRICTION;
        assert!((state.player.vel.y - expected).abs() < 1e-6);
        assert!(state.player.pos.y > 360.0);
    }

    #[test]
    fn test_strafe_moves_perpendicular() {
        let mut state = empty_mission();
        // Facing +x, so right-hand side is +y on a y-down screen
        let input = TickInput {
            strafe_right: true,
            target: state.player.pos + Vec2::new(300.0, 0.0),
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        assert!(state.player.vel.y > 0.0);
        assert!(state.player.vel.x.abs() < 1e-6);
    }

    #[test]
    fn test_speed_is_capped_then_decays() {
        let mut state = empty_mission();
        state.player.pos = Vec2::new(640.0, 360.0);
        state.player.vel = Vec2::new(10.0, 0.0);
        let input = TickInput {
            target: Vec2::new(2000.0, 360.0),
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        let expected = PLAYER_MAX_SPEED * PLAYER_FRICTION;
        assert!((state.player.vel.length() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_player_clamped_to_playfield() {
        let mut state = empty_mission();
        state.player.pos = Vec2::new(21.0, 21.0);
        state.player.vel = Vec2::new(-4.0, -4.0);
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_RADIUS, PLAYER_RADIUS));
    }

    #[test]
    fn test_fire_gate() {
        let mut state = empty_mission();
        let input = fire_input();

        tick(&mut state, &input, 250.0);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.last_player_fire, 250.0);

        // Held fire inside the cooldown produces nothing new
        for t in [260.0, 300.0, 400.0, 450.0] {
            tick(&mut state, &input, t);
            assert_eq!(state.projectiles.len(), 1, "extra shot at {t}");
        }

        tick(&mut state, &input, 450.5);
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_fires_on_first_tick() {
        let mut state = empty_mission();
        tick(&mut state, &fire_input(), TICK_MS);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.last_player_fire, TICK_MS);
    }

    #[test]
    fn test_enemy_fires_on_first_tick() {
        let mut state = empty_mission();
        state.player.pos = Vec2::new(640.0, 650.0);
        state.spawn_enemy(EnemyKind::Capital, Vec2::new(640.0, 300.0));
        tick(&mut state, &TickInput::default(), TICK_MS);
        assert_eq!(state.projectiles.len(), 1);
        assert!(!state.projectiles[0].from_player);
        assert_eq!(state.enemies[0].last_fired, TICK_MS);
    }

    #[test]
    fn test_player_projectile_stats() {
        let mut state = empty_mission();
        let input = TickInput {
            fire: true,
            target: state.player.pos + Vec2::new(0.0, -100.0),
            ..Default::default()
        };
        tick(&mut state, &input, 1000.0);
        let shot = &state.projectiles[0];
        assert!(shot.from_player);
        assert_eq!(shot.damage, PLAYER_PROJECTILE_DAMAGE);
        assert_eq!(shot.radius, PLAYER_PROJECTILE_RADIUS);
        assert!((shot.vel - Vec2::new(0.0, -PLAYER_PROJECTILE_SPEED)).length() < 1e-4);
    }

    #[test]
    fn test_projectile_moves_by_velocity() {
        let mut state = empty_mission();
        state.spawn_projectile(Vec2::new(300.0, 300.0), Vec2::new(3.0, -2.0), 4.0, 1.0, true);
        for i in 1..=10 {
            tick(&mut state, &TickInput::default(), 0.0);
            let expected = Vec2::new(300.0, 300.0) + Vec2::new(3.0, -2.0) * i as f32;
            assert!((state.projectiles[0].pos - expected).length() < 1e-3);
        }
    }

    #[test]
    fn test_projectiles_culled_outside_margin() {
        let mut state = empty_mission();
        state.spawn_projectile(Vec2::new(-95.0, 300.0), Vec2::new(-3.0, 0.0), 4.0, 1.0, true);
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.projectiles.len(), 1);
        tick(&mut state, &TickInput::default(), 0.0);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_player_hit_damages_shield_then_removes_shot() {
        let mut state = empty_mission();
        let id = state.spawn_enemy(EnemyKind::Fighter, Vec2::new(200.0, 200.0));
        // Park the enemy far from the player so it cannot fire back
        state.player.pos = Vec2::new(1200.0, 650.0);
        let enemy_pos = state.enemies[0].ship.pos;
        state.spawn_projectile(enemy_pos + Vec2::new(0.0, 10.0), Vec2::ZERO, 4.0, 10.0, true);

        tick(&mut state, &TickInput::default(), 0.0);

        let enemy = state.enemies.iter().find(|e| e.ship.id == id).unwrap();
        assert_eq!(enemy.ship.shield, 10.0);
        assert_eq!(enemy.ship.hull, 20.0);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_enemy_shot_hits_player() {
        let mut state = empty_mission();
        let pos = state.player.pos;
        state.spawn_projectile(pos, Vec2::ZERO, 3.0, 5.0, false);
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.player.shield, PLAYER_MAX_SHIELD - 5.0);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_destroyed_enemy_becomes_explosion() {
        let mut state = empty_mission();
        state.player.pos = Vec2::new(1200.0, 650.0);
        state.spawn_enemy(EnemyKind::Fighter, Vec2::new(100.0, 100.0));
        state.enemies[0].ship.shield = 0.0;
        state.enemies[0].ship.hull = 5.0;
        let pos = state.enemies[0].ship.pos;
        state.spawn_projectile(pos, Vec2::ZERO, 4.0, 10.0, true);

        tick(&mut state, &TickInput::default(), 0.0);

        assert!(state.enemies.is_empty());
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].life, EXPLOSION_LIFE);
        assert_eq!(state.explosions[0].radius, 18.0);
    }

    #[test]
    fn test_injected_hull_zero_clears_level() {
        let level = LevelConfig::new(&[(EnemyKind::Fighter, 1)]);
        let mut state = MissionState::start(&level, 11);
        state.enemies[0].ship.hull = 0.0;
        tick(&mut state, &TickInput::default(), 16.0);
        assert!(state.enemies.is_empty());
        assert_eq!(state.explosions.len(), 1);
    }

    #[test]
    fn test_player_explodes_once() {
        let mut state = empty_mission();
        state.player.hull = 0.0;
        tick(&mut state, &TickInput::default(), 0.0);
        assert!(state.player.destroyed);
        assert_eq!(state.explosions.len(), 1);

        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].life, EXPLOSION_LIFE - 1);
    }

    #[test]
    fn test_destroyed_player_is_inert() {
        let mut state = empty_mission();
        state.player.destroyed = true;
        state.player.hull = 0.0;
        let pos = state.player.pos;
        tick(&mut state, &TickInput { thrust: true, ..fire_input() }, 5000.0);
        assert_eq!(state.player.pos, pos);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_explosion_lives_exactly_thirty_ticks() {
        let mut state = empty_mission();
        let id = state.next_entity_id();
        state.explosions.push(Explosion::new(id, Vec2::new(10.0, 10.0), 5.0));

        for _ in 0..29 {
            tick(&mut state, &TickInput::default(), 0.0);
        }
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].life, 1);

        tick(&mut state, &TickInput::default(), 0.0);
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_enemy_chases_when_far() {
        let mut state = empty_mission();
        state.player.pos = Vec2::new(640.0, 600.0);
        state.spawn_enemy(EnemyKind::Interceptor, Vec2::new(640.0, 100.0));
        tick(&mut state, &TickInput { target: Vec2::new(640.0, 0.0), ..Default::default() }, 0.0);

        let enemy = &state.enemies[0];
        assert!((enemy.ship.vel.length() - 3.5).abs() < 1e-4);
        assert!(enemy.ship.vel.y > 0.0);
        assert!(enemy.ship.vel.x.abs() < 1e-4);
    }

    #[test]
    fn test_enemy_orbits_when_close() {
        let to_player = Vec2::new(150.0, 0.0);
        let vel = enemy_velocity(to_player, 0.0, 2.5);
        assert!((vel.length() - 1.25).abs() < 1e-6);
        assert!(vel.dot(to_player).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_at_threshold_orbits() {
        // Exactly at the threshold the enemy circles rather than chases
        let to_player = Vec2::new(0.0, ENEMY_CHASE_DISTANCE);
        let vel = enemy_velocity(to_player, std::f32::consts::FRAC_PI_2, 2.0);
        assert!((vel.length() - 1.0).abs() < 1e-6);
        assert!(vel.dot(to_player).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_fires_only_in_range() {
        let mut state = empty_mission();
        state.player.pos = Vec2::new(640.0, 650.0);
        state.spawn_enemy(EnemyKind::Fighter, Vec2::new(640.0, 50.0));
        tick(&mut state, &TickInput::default(), 5000.0);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies[0].last_fired, -state.enemies[0].fire_rate_ms);

        state.enemies[0].ship.pos = Vec2::new(640.0, 300.0);
        tick(&mut state, &TickInput::default(), 5100.0);
        assert_eq!(state.projectiles.len(), 1);
        let shot = &state.projectiles[0];
        assert!(!shot.from_player);
        assert_eq!(shot.damage, 5.0);
        assert_eq!(state.enemies[0].last_fired, 5100.0);

        tick(&mut state, &TickInput::default(), 5500.0);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_escaped_enemy_keeps_mission_alive() {
        // Enemies are never clamped or culled, even far off the playfield
        let mut state = empty_mission();
        state.spawn_enemy(EnemyKind::Capital, Vec2::new(-5000.0, -5000.0));
        for i in 0..120 {
            tick(&mut state, &TickInput::default(), i as f64 * TICK_MS);
        }
        assert_eq!(state.enemies.len(), 1);
        assert!(!PLAYFIELD.contains(state.enemies[0].ship.pos));
    }

    #[test]
    fn test_message_expires() {
        let mut state = empty_mission();
        tick(&mut state, &TickInput::default(), START_MESSAGE_MS);
        assert!(state.message.is_some());
        tick(&mut state, &TickInput::default(), START_MESSAGE_MS + 1.0);
        assert!(state.message.is_none());
    }

    #[test]
    fn test_determinism() {
        let level = LevelConfig::new(&[(EnemyKind::Fighter, 3), (EnemyKind::Bomber, 1)]);
        let mut a = MissionState::start(&level, 99999);
        let mut b = MissionState::start(&level, 99999);
        let input = TickInput {
            thrust: true,
            fire: true,
            target: Vec2::new(300.0, 100.0),
            ..Default::default()
        };
        for i in 0..200 {
            let now = i as f64 * TICK_MS;
            tick(&mut a, &input, now);
            tick(&mut b, &input, now);
        }
        assert_eq!(a.player, b.player);
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.projectiles, b.projectiles);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (
            any::<[bool; 5]>(),
            -200.0f32..1500.0,
            -200.0f32..900.0,
        )
            .prop_map(|(keys, x, y)| TickInput {
                thrust: keys[0],
                brake: keys[1],
                strafe_left: keys[2],
                strafe_right: keys[3],
                fire: keys[4],
                target: Vec2::new(x, y),
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_ship_invariants_hold(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(arb_input(), 1..240),
        ) {
            let level = LevelConfig::new(&[
                (EnemyKind::Fighter, 3),
                (EnemyKind::Interceptor, 2),
                (EnemyKind::Bomber, 1),
            ]);
            let mut state = MissionState::start(&level, seed);
            let mut player_was_destroyed = false;

            for (i, input) in inputs.iter().enumerate() {
                tick(&mut state, input, i as f64 * TICK_MS);

                let p = &state.player;
                prop_assert!(p.shield >= 0.0 && p.shield <= p.max_shield);
                prop_assert!(p.hull >= 0.0 && p.hull <= p.max_hull);
                prop_assert!(p.pos.x >= p.radius && p.pos.x <= GAME_WIDTH - p.radius);
                prop_assert!(p.pos.y >= p.radius && p.pos.y <= GAME_HEIGHT - p.radius);
                prop_assert_eq!(p.hull == 0.0, p.destroyed);
                prop_assert!(!player_was_destroyed || p.destroyed);
                player_was_destroyed = p.destroyed;

                for e in &state.enemies {
                    prop_assert!(e.ship.shield >= 0.0 && e.ship.shield <= e.ship.max_shield);
                    prop_assert!(e.ship.hull > 0.0 && e.ship.hull <= e.ship.max_hull);
                    prop_assert!(!e.ship.destroyed);
                }
                for shot in &state.projectiles {
                    prop_assert!(!shot.spent);
                }
            }
        }
    }
}
