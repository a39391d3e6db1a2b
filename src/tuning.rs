//! Data-driven game balance
//!
//! Enemy stat profiles and the campaign level table. Profiles are looked up once
//! when an enemy spawns and copied into the entity.

use serde::{Deserialize, Serialize};

/// Enemy hull classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Fighter,
    Interceptor,
    Bomber,
    #[serde(rename = "Capital Ship")]
    Capital,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Fighter,
        EnemyKind::Interceptor,
        EnemyKind::Bomber,
        EnemyKind::Capital,
    ];

    /// Display name, also used in briefing requests
    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Fighter => "Fighter",
            EnemyKind::Interceptor => "Interceptor",
            EnemyKind::Bomber => "Bomber",
            EnemyKind::Capital => "Capital Ship",
        }
    }

    /// Static stat profile for this class
    pub fn profile(&self) -> EnemyProfile {
        match self {
            EnemyKind::Fighter => EnemyProfile {
                radius: 18.0,
                max_speed: 2.5,
                max_shield: 20.0,
                max_hull: 20.0,
                fire_rate_ms: 1000.0,
                projectile_speed: 6.0,
                projectile_damage: 5.0,
                projectile_radius: 3.0,
            },
            EnemyKind::Interceptor => EnemyProfile {
                radius: 15.0,
                max_speed: 3.5,
                max_shield: 10.0,
                max_hull: 15.0,
                fire_rate_ms: 700.0,
                projectile_speed: 7.0,
                projectile_damage: 4.0,
                projectile_radius: 3.0,
            },
            EnemyKind::Bomber => EnemyProfile {
                radius: 25.0,
                max_speed: 1.8,
                max_shield: 40.0,
                max_hull: 40.0,
                fire_rate_ms: 1500.0,
                projectile_speed: 5.0,
                projectile_damage: 15.0,
                projectile_radius: 5.0,
            },
            EnemyKind::Capital => EnemyProfile {
                radius: 100.0,
                max_speed: 0.5,
                max_shield: 500.0,
                max_hull: 250.0,
                fire_rate_ms: 2000.0,
                projectile_speed: 8.0,
                projectile_damage: 25.0,
                projectile_radius: 8.0,
            },
        }
    }
}

impl std::fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-class combat stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    /// Collision radius
    pub radius: f32,
    /// Speed in units per tick
    pub max_speed: f32,
    pub max_shield: f32,
    pub max_hull: f32,
    /// Minimum milliseconds between shots
    pub fire_rate_ms: f64,
    pub projectile_speed: f32,
    pub projectile_damage: f32,
    pub projectile_radius: f32,
}

/// A batch of identical enemies in a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyGroup {
    #[serde(rename = "type")]
    pub kind: EnemyKind,
    pub count: u32,
}

/// Enemy roster for one mission
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelConfig {
    pub enemies: Vec<EnemyGroup>,
}

impl LevelConfig {
    pub fn new(groups: &[(EnemyKind, u32)]) -> Self {
        Self {
            enemies: groups
                .iter()
                .map(|&(kind, count)| EnemyGroup { kind, count })
                .collect(),
        }
    }

    /// Total number of enemies the level spawns
    pub fn enemy_count(&self) -> u32 {
        self.enemies.iter().map(|g| g.count).sum()
    }

    /// One entry per group, in roster order
    pub fn enemy_types(&self) -> Vec<String> {
        self.enemies.iter().map(|g| g.kind.as_str().to_string()).collect()
    }
}

/// The campaign, in play order
pub fn campaign_levels() -> Vec<LevelConfig> {
    use EnemyKind::*;
    vec![
        LevelConfig::new(&[(Fighter, 3)]),
        LevelConfig::new(&[(Fighter, 4), (Interceptor, 2)]),
        LevelConfig::new(&[(Bomber, 2), (Fighter, 5)]),
        LevelConfig::new(&[(Interceptor, 6), (Bomber, 2)]),
        LevelConfig::new(&[(Capital, 1), (Fighter, 6)]),
    ]
}
