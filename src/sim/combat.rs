//! Damage and hit resolution
//!
//! Projectiles are never removed here. A hit only marks the projectile spent;
//! the cleanup pass drops it, so one shot can damage at most one ship per tick.

use super::state::{MissionState, Projectile, Ship};
use crate::geom::circles_overlap;

impl Ship {
    /// Apply damage to the shield if it has any left, otherwise to the hull.
    ///
    /// Overflow past an emptied shield is discarded. Returns true if this hit
    /// destroyed the ship.
    pub fn apply_damage(&mut self, damage: f32) -> bool {
        if self.shield > 0.0 {
            self.shield = (self.shield - damage).max(0.0);
        } else {
            self.hull = (self.hull - damage).max(0.0);
        }
        self.mark_if_wrecked()
    }

    /// Latch `destroyed` once the hull is gone. Returns true on the transition.
    pub fn mark_if_wrecked(&mut self) -> bool {
        if self.hull <= 0.0 && !self.destroyed {
            self.hull = 0.0;
            self.destroyed = true;
            return true;
        }
        false
    }
}

/// Does this projectile overlap the ship?
#[inline]
pub fn projectile_hits(projectile: &Projectile, ship: &Ship) -> bool {
    circles_overlap(projectile.pos, projectile.radius, ship.pos, ship.radius)
}

/// Resolve all projectile hits for this tick
pub fn resolve_hits(state: &mut MissionState) {
    let MissionState {
        player,
        enemies,
        projectiles,
        ..
    } = state;

    for projectile in projectiles.iter_mut() {
        if projectile.spent {
            continue;
        }

        if projectile.from_player {
            // First live enemy in roster order takes the hit
            let target = enemies
                .iter_mut()
                .filter(|e| e.ship.is_alive())
                .find(|e| projectile_hits(projectile, &e.ship));
            if let Some(enemy) = target {
                projectile.spent = true;
                if enemy.ship.apply_damage(projectile.damage) {
                    log::debug!("{} {} destroyed", enemy.kind, enemy.ship.id);
                }
            }
        } else if player.is_alive() && projectile_hits(projectile, player) {
            projectile.spent = true;
            if player.apply_damage(projectile.damage) {
                log::debug!("Player ship destroyed");
            }
        }
    }
}
