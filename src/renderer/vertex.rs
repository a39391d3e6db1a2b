//! Vertex layout and color palette

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const PLAYER: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const PLAYER_OUTLINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const ENEMY: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const ENEMY_OUTLINE: [f32; 4] = [1.0, 0.53, 0.53, 1.0];
    pub const PLAYER_SHOT: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const ENEMY_SHOT: [f32; 4] = [1.0, 0.53, 0.0, 1.0];
    pub const EXPLOSION: [f32; 4] = [1.0, 0.65, 0.0, 1.0];
    pub const EXPLOSION_CORE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const EXPLOSION_GLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    /// Same color with alpha scaled by `alpha`
    pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
    }
}
