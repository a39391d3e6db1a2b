//! Mission state and entity types
//!
//! Everything the simulation step reads and writes lives in `MissionState`.
//! The aggregate is built fresh for every mission and never outlives it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::{EnemyKind, EnemyProfile, LevelConfig};

/// A ship with shield and hull pools (player or enemy)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Facing (radians)
    pub rotation: f32,
    pub max_shield: f32,
    pub shield: f32,
    pub max_hull: f32,
    pub hull: f32,
    /// Set once hull reaches zero, never cleared
    pub destroyed: bool,
}

impl Ship {
    /// Fresh ship at full shield and hull
    pub fn new(id: u32, pos: Vec2, radius: f32, max_shield: f32, max_hull: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            rotation: 0.0,
            max_shield,
            shield: max_shield,
            max_hull,
            hull: max_hull,
            destroyed: false,
        }
    }

    /// The player's ship at the start position
    pub fn player(id: u32) -> Self {
        let mut ship = Self::new(
            id,
            Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            PLAYER_RADIUS,
            PLAYER_MAX_SHIELD,
            PLAYER_MAX_HULL,
        );
        ship.rotation = -std::f32::consts::FRAC_PI_2;
        ship
    }

    pub fn is_alive(&self) -> bool {
        !self.destroyed
    }
}

/// A hostile ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub ship: Ship,
    pub kind: EnemyKind,
    /// Stats captured at spawn time
    pub profile: EnemyProfile,
    /// Milliseconds between shots
    pub fire_rate_ms: f64,
    /// Mission-clock time of the last shot, one interval back when fresh
    pub last_fired: f64,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, vel: Vec2) -> Self {
        let profile = kind.profile();
        let mut ship = Ship::new(id, pos, profile.radius, profile.max_shield, profile.max_hull);
        ship.vel = vel;
        ship.rotation = std::f32::consts::FRAC_PI_2;
        Self {
            ship,
            kind,
            profile,
            fire_rate_ms: profile.fire_rate_ms,
            last_fired: -profile.fire_rate_ms,
        }
    }
}

/// A shot in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub rotation: f32,
    pub damage: f32,
    /// Player shots hit enemies, enemy shots hit the player
    pub from_player: bool,
    /// Already hit something this tick; dropped during cleanup
    #[serde(default)]
    pub spent: bool,
}

/// Visual-only blast left behind by a destroyed ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Remaining ticks
    pub life: u32,
    pub max_life: u32,
}

impl Explosion {
    pub fn new(id: u32, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            radius,
            life: EXPLOSION_LIFE,
            max_life: EXPLOSION_LIFE,
        }
    }

    /// Remaining life as a fraction (1 = just spawned)
    pub fn progress(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// Transient banner text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    /// Mission-clock time after which the banner is cleared
    pub expires_at: f64,
}

/// Complete mission state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionState {
    /// Seed used for spawn placement
    pub seed: u64,
    pub player: Ship,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub explosions: Vec<Explosion>,
    /// Mission-clock time of the player's last shot
    pub last_player_fire: f64,
    pub message: Option<Message>,
    /// False until the mission has been initialized from a level
    pub started: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl Default for MissionState {
    /// An uninitialized mission; ticking and drawing it are no-ops
    fn default() -> Self {
        Self {
            seed: 0,
            player: Ship::player(0),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            explosions: Vec::new(),
            last_player_fire: -PLAYER_FIRE_RATE_MS,
            message: None,
            started: false,
            time_ticks: 0,
            next_id: 1,
        }
    }
}

impl MissionState {
    /// Build a fresh mission from a level roster
    pub fn start(level: &LevelConfig, seed: u64) -> Self {
        let mut state = Self {
            seed,
            ..Self::default()
        };
        let player_id = state.next_entity_id();
        state.player = Ship::player(player_id);

        let mut rng = Pcg32::seed_from_u64(seed);
        for group in &level.enemies {
            for _ in 0..group.count {
                let id = state.next_entity_id();
                let pos = Vec2::new(
                    rng.random_range(50.0..GAME_WIDTH - 50.0),
                    rng.random_range(50.0..250.0),
                );
                let vel = Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(0.5..1.5));
                state.enemies.push(Enemy::new(id, group.kind, pos, vel));
            }
        }

        state.message = Some(Message {
            text: START_MESSAGE.to_string(),
            expires_at: START_MESSAGE_MS,
        });
        state.started = true;

        log::info!(
            "Mission initialized: {} enemies, seed {}",
            state.enemies.len(),
            seed
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an enemy outside the level roster (tests, scripted encounters)
    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, kind, pos, Vec2::ZERO));
        id
    }

    /// Add a projectile
    pub fn spawn_projectile(
        &mut self,
        pos: Vec2,
        vel: Vec2,
        radius: f32,
        damage: f32,
        from_player: bool,
    ) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile {
            id,
            pos,
            vel,
            radius,
            rotation: vel.y.atan2(vel.x),
            damage,
            from_player,
            spent: false,
        });
        id
    }

    pub fn enemies_remaining(&self) -> usize {
        self.enemies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_started() {
        let state = MissionState::default();
        assert!(!state.started);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_start_spawns_roster() {
        let level = LevelConfig::new(&[(EnemyKind::Fighter, 4), (EnemyKind::Bomber, 2)]);
        let state = MissionState::start(&level, 7);

        assert!(state.started);
        assert_eq!(state.enemies.len(), 6);
        assert_eq!(state.enemies[0].kind, EnemyKind::Fighter);
        assert_eq!(state.enemies[5].kind, EnemyKind::Bomber);
        assert_eq!(state.player.pos, Vec2::new(640.0, 620.0));
        assert_eq!(state.player.shield, PLAYER_MAX_SHIELD);
        assert_eq!(state.message.as_ref().map(|m| m.text.as_str()), Some("MISSION START"));

        for enemy in &state.enemies {
            let p = enemy.ship.pos;
            assert!((50.0..GAME_WIDTH - 50.0).contains(&p.x));
            assert!((50.0..250.0).contains(&p.y));
            assert!((0.5..1.5).contains(&enemy.ship.vel.y));
            assert_eq!(enemy.ship.hull, enemy.profile.max_hull);
            assert_eq!(enemy.last_fired, -enemy.profile.fire_rate_ms);
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let level = LevelConfig::new(&[(EnemyKind::Interceptor, 6)]);
        let state = MissionState::start(&level, 3);
        let mut ids: Vec<u32> = state.enemies.iter().map(|e| e.ship.id).collect();
        ids.push(state.player.id);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 7);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let level = LevelConfig::new(&[(EnemyKind::Fighter, 3)]);
        let a = MissionState::start(&level, 42);
        let b = MissionState::start(&level, 42);
        assert_eq!(a.enemies, b.enemies);
    }
}
