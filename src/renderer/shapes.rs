//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::scene::{DrawCommand, OUTLINE_WIDTH, Scene};
use super::vertex::{Vertex, colors};

/// Halo size relative to the shape radius
const GLOW_SCALE: f32 = 1.8;
/// Halo opacity at the shape edge
const GLOW_ALPHA: f32 = 0.35;

/// Tessellation settings
#[derive(Debug, Clone, Copy)]
pub struct TessellateOptions {
    /// Triangles per full circle
    pub segments: u32,
    pub glow: bool,
}

impl Default for TessellateOptions {
    fn default() -> Self {
        Self {
            segments: 18,
            glow: true,
        }
    }
}

/// Turn a scene into a triangle list in playfield coordinates
pub fn tessellate(scene: &Scene, opts: TessellateOptions) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let segments = opts.segments.max(3);

    for cmd in &scene.commands {
        match cmd {
            DrawCommand::Polygon {
                points,
                fill,
                outline,
                glow,
                center,
                radius,
            } => {
                if opts.glow {
                    vertices.extend(glow_halo(*center, *radius, *glow, segments));
                }
                vertices.extend(polygon(points, *fill));
                vertices.extend(polyline_loop(points, OUTLINE_WIDTH, *outline));
            }
            DrawCommand::Disc {
                center,
                radius,
                color,
                glow,
            } => {
                if opts.glow {
                    if let Some(glow) = glow {
                        vertices.extend(glow_halo(*center, *radius, *glow, segments));
                    }
                }
                vertices.extend(circle(*center, *radius, *color, segments));
            }
        }
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring with separate inner and outer colors
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    inner_color: [f32; 4],
    outer_color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let at = |r: f32, theta: f32| center + Vec2::new(r * theta.cos(), r * theta.sin());

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = at(inner_radius, theta1);
        let outer1 = at(outer_radius, theta1);
        let inner2 = at(inner_radius, theta2);
        let outer2 = at(outer_radius, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));

        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(outer2.x, outer2.y, outer_color));
    }

    vertices
}

/// Soft halo: a ring fading from `GLOW_ALPHA` at the edge to nothing
pub fn glow_halo(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ring(
        center,
        radius,
        radius * GLOW_SCALE,
        colors::with_alpha(color, GLOW_ALPHA),
        colors::with_alpha(color, 0.0),
        segments,
    )
}

/// Triangle fan over a convex polygon
pub fn polygon(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    let first = points[0];
    for pair in points[1..].windows(2) {
        vertices.push(Vertex::new(first.x, first.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }

    vertices
}

/// Closed outline as one quad per edge
pub fn polyline_loop(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let half = width / 2.0;
    let mut vertices = Vec::with_capacity(points.len() * 6);

    for i in 0..points.len() {
        let p1 = points[i];
        let p2 = points[(i + 1) % points.len()];
        let perp = (p2 - p1).normalize_or_zero().perp() * half;

        let a1 = p1 + perp;
        let b1 = p1 - perp;
        let a2 = p2 + perp;
        let b2 = p2 - perp;

        vertices.push(Vertex::new(a1.x, a1.y, color));
        vertices.push(Vertex::new(b1.x, b1.y, color));
        vertices.push(Vertex::new(a2.x, a2.y, color));

        vertices.push(Vertex::new(a2.x, a2.y, color));
        vertices.push(Vertex::new(b1.x, b1.y, color));
        vertices.push(Vertex::new(b2.x, b2.y, color));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_fan_counts() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        assert_eq!(polygon(&square, colors::ENEMY).len(), 6);
        assert!(polygon(&square[..2], colors::ENEMY).is_empty());
        assert_eq!(polyline_loop(&square, 2.0, colors::ENEMY).len(), 24);
    }

    #[test]
    fn test_circle_stays_on_radius() {
        let verts = circle(Vec2::new(10.0, 10.0), 5.0, colors::PLAYER_SHOT, 12);
        assert_eq!(verts.len(), 36);
        for v in &verts {
            let d = Vec2::from(v.position).distance(Vec2::new(10.0, 10.0));
            assert!(d <= 5.0 + 1e-4);
        }
    }

    #[test]
    fn test_glow_toggle() {
        let scene = Scene {
            commands: vec![DrawCommand::Disc {
                center: Vec2::ZERO,
                radius: 4.0,
                color: colors::PLAYER_SHOT,
                glow: Some(colors::PLAYER_SHOT),
            }],
            message: None,
        };
        let plain = tessellate(
            &scene,
            TessellateOptions {
                segments: 8,
                glow: false,
            },
        );
        let glowing = tessellate(
            &scene,
            TessellateOptions {
                segments: 8,
                glow: true,
            },
        );
        assert_eq!(plain.len(), 24);
        assert_eq!(glowing.len(), 24 + 48);
        // Halo fades out toward its rim
        assert!(glowing.iter().any(|v| v.color[3] == 0.0));
    }
}
