//! Demo pilot - the game plays itself
//!
//! Produces the same `TickInput` a human would, so the simulation cannot tell
//! the difference. Used for the headless native run.

use glam::Vec2;

use super::state::MissionState;
use super::tick::TickInput;
use crate::consts::ENEMY_CHASE_DISTANCE;

/// Pick controls for the current state
pub fn demo_input(state: &MissionState) -> TickInput {
    let player = &state.player;

    // Aim at the nearest enemy
    let Some(target) = state
        .enemies
        .iter()
        .map(|e| e.ship.pos)
        .min_by(|a, b| {
            a.distance_squared(player.pos)
                .partial_cmp(&b.distance_squared(player.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    else {
        return TickInput {
            target: player.pos + Vec2::new(0.0, -1.0),
            ..Default::default()
        };
    };

    let distance = target.distance(player.pos);

    // Keep some room, and weave so incoming fire misses
    let weave = (state.time_ticks / 90) % 2 == 0;
    TickInput {
        thrust: distance > ENEMY_CHASE_DISTANCE * 2.0,
        brake: distance < ENEMY_CHASE_DISTANCE,
        strafe_left: weave,
        strafe_right: !weave,
        fire: true,
        target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::EnemyKind;

    #[test]
    fn test_aims_at_nearest_enemy() {
        let mut state = MissionState::default();
        state.started = true;
        state.player.pos = Vec2::new(100.0, 100.0);
        state.spawn_enemy(EnemyKind::Fighter, Vec2::new(900.0, 100.0));
        state.spawn_enemy(EnemyKind::Bomber, Vec2::new(150.0, 300.0));

        let input = demo_input(&state);
        assert_eq!(input.target, Vec2::new(150.0, 300.0));
        assert!(input.fire);
        assert!(input.brake || !input.thrust);
    }

    #[test]
    fn test_idle_without_enemies() {
        let state = MissionState::default();
        let input = demo_input(&state);
        assert!(!input.fire);
        assert!(!input.thrust);
    }
}
