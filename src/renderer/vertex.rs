//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
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
    /// Build a color from a 0xRRGGBB literal
    pub const fn rgb(hex: u32) -> [f32; 4] {
        [
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
            1.0,
        ]
    }

    pub const BACKGROUND: [f32; 4] = rgb(0xf0f8ff);
    pub const FLOOR: [f32; 4] = rgb(0x8b5a2b);
    pub const CEILING: [f32; 4] = rgb(0x323232);
    pub const WALL: [f32; 4] = rgb(0x000000);

    pub const BACKBOARD: [f32; 4] = rgb(0xc8c8c8);
    pub const BACKBOARD_EDGE: [f32; 4] = rgb(0x646464);
    pub const RIM: [f32; 4] = rgb(0xff6400);
    pub const NET: [f32; 4] = rgb(0xc8c8c8);

    pub const BALL: [f32; 4] = rgb(0xff7f00);
    pub const BALL_EDGE: [f32; 4] = rgb(0xc85000);

    pub const AIM_LINE: [f32; 4] = rgb(0x009600);
    pub const AIM_TIP: [f32; 4] = rgb(0x00c800);
    pub const POWER_FRAME: [f32; 4] = rgb(0x646464);
    pub const POWER_LOW: [f32; 4] = rgb(0x00ff00);
    pub const POWER_MEDIUM: [f32; 4] = rgb(0xffa500);
    pub const POWER_HIGH: [f32; 4] = rgb(0xff0000);

    pub const CLOWN_FACE: [f32; 4] = rgb(0xffffc8);
    pub const CLOWN_OUTLINE: [f32; 4] = rgb(0x000000);
    pub const CLOWN_NOSE: [f32; 4] = rgb(0xff0000);
    pub const CLOWN_EYE: [f32; 4] = rgb(0xffffff);
    pub const CLOWN_PUPIL: [f32; 4] = rgb(0x000000);
    pub const CLOWN_SMILE: [f32; 4] = rgb(0xc80000);
    pub const CLOWN_HAIR: [[f32; 4]; 5] = [
        rgb(0xff0000),
        rgb(0xffa500),
        rgb(0xffff00),
        rgb(0x00ff00),
        rgb(0x0000ff),
    ];
}
