//! Scene description built from mission state
//!
//! A pure read of `MissionState` into draw commands in playfield coordinates.
//! Layer order is fixed: projectiles, enemies, player, explosions. The banner
//! message is carried alongside for the DOM overlay.

use glam::Vec2;

use super::vertex::colors;
use crate::sim::{Enemy, Explosion, MissionState, Projectile, Ship};
use crate::tuning::EnemyKind;

/// Outline width for ship silhouettes
pub const OUTLINE_WIDTH: f32 = 2.0;

/// One thing to draw
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled convex polygon, points already placed in the playfield
    Polygon {
        points: Vec<Vec2>,
        fill: [f32; 4],
        outline: [f32; 4],
        /// Halo color, drawn under the shape
        glow: [f32; 4],
        center: Vec2,
        radius: f32,
    },
    /// Filled disc
    Disc {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
        /// Halo color, drawn under the disc
        glow: Option<[f32; 4]>,
    },
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub commands: Vec<DrawCommand>,
    /// Banner text shown over the playfield
    pub message: Option<String>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.message.is_none()
    }
}

/// Build the scene for the current state. Empty until the mission starts.
pub fn build(state: &MissionState) -> Scene {
    let mut scene = Scene::default();
    if !state.started {
        return scene;
    }

    for projectile in state.projectiles.iter().filter(|p| !p.spent) {
        scene.commands.push(projectile_command(projectile));
    }

    for enemy in &state.enemies {
        scene.commands.push(enemy_command(enemy));
    }

    if !state.player.destroyed {
        scene.commands.push(player_command(&state.player));
    }

    for explosion in &state.explosions {
        scene.commands.extend(explosion_commands(explosion));
    }

    scene.message = state.message.as_ref().map(|m| m.text.clone());
    scene
}

/// Silhouette of an enemy kind in local space (nose along +x)
pub fn enemy_outline(kind: EnemyKind, r: f32) -> Vec<Vec2> {
    match kind {
        EnemyKind::Fighter => vec![
            Vec2::new(r, 0.0),
            Vec2::new(-r, -r / 2.0),
            Vec2::new(-r, r / 2.0),
        ],
        EnemyKind::Interceptor => vec![
            Vec2::new(r, 0.0),
            Vec2::new(-r / 2.0, -r),
            Vec2::new(-r, 0.0),
            Vec2::new(-r / 2.0, r),
        ],
        EnemyKind::Bomber => vec![
            Vec2::new(-r, -r / 2.0),
            Vec2::new(r, -r / 2.0),
            Vec2::new(r, r / 2.0),
            Vec2::new(-r, r / 2.0),
        ],
        EnemyKind::Capital => vec![
            Vec2::new(r, 0.0),
            Vec2::new(r / 2.0, -r / 1.5),
            Vec2::new(-r, -r / 3.0),
            Vec2::new(-r, r / 3.0),
            Vec2::new(r / 2.0, r / 1.5),
        ],
    }
}

/// Player silhouette in local space
pub fn player_outline(r: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(r, 0.0),
        Vec2::new(-r / 2.0, -r * 0.8),
        Vec2::new(-r / 2.0, r * 0.8),
    ]
}

/// Rotate then translate local points into the playfield
fn place(points: Vec<Vec2>, pos: Vec2, rotation: f32) -> Vec<Vec2> {
    let rot = Vec2::from_angle(rotation);
    points.into_iter().map(|p| pos + rot.rotate(p)).collect()
}

fn enemy_command(enemy: &Enemy) -> DrawCommand {
    let ship = &enemy.ship;
    DrawCommand::Polygon {
        points: place(
            enemy_outline(enemy.kind, enemy.profile.radius),
            ship.pos,
            ship.rotation,
        ),
        fill: colors::ENEMY,
        outline: colors::ENEMY_OUTLINE,
        glow: colors::ENEMY,
        center: ship.pos,
        radius: ship.radius,
    }
}

fn player_command(player: &Ship) -> DrawCommand {
    DrawCommand::Polygon {
        points: place(player_outline(player.radius), player.pos, player.rotation),
        fill: colors::PLAYER,
        outline: colors::PLAYER_OUTLINE,
        glow: colors::PLAYER,
        center: player.pos,
        radius: player.radius,
    }
}

fn projectile_command(projectile: &Projectile) -> DrawCommand {
    let color = if projectile.from_player {
        colors::PLAYER_SHOT
    } else {
        colors::ENEMY_SHOT
    };
    DrawCommand::Disc {
        center: projectile.pos,
        radius: projectile.radius,
        color,
        glow: Some(color),
    }
}

/// Radius and opacity of an explosion at its current life
pub fn explosion_look(explosion: &Explosion) -> (f32, f32) {
    let progress = explosion.progress();
    (explosion.radius * (1.5 - progress), progress)
}

fn explosion_commands(explosion: &Explosion) -> [DrawCommand; 2] {
    let (radius, alpha) = explosion_look(explosion);
    [
        DrawCommand::Disc {
            center: explosion.pos,
            radius,
            color: colors::with_alpha(colors::EXPLOSION, alpha),
            glow: Some(colors::with_alpha(colors::EXPLOSION_GLOW, alpha)),
        },
        DrawCommand::Disc {
            center: explosion.pos,
            radius: radius * 0.6,
            color: colors::with_alpha(colors::EXPLOSION_CORE, alpha),
            glow: None,
        },
    ]
}
