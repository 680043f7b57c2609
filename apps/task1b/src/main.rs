//! Task 1b: a triangle that spins while drifting, reflecting off the edges
//! of clip space. The geometry is regenerated on the CPU and re-uploaded
//! every frame.

use ash::vk;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use prism_app::{AppConfig, Exercise};
use prism_gpu::{CommandPool, GpuContext};
use prism_render::{RenderScene, Swapchain, SwapchainDesc};
use rand::Rng;

const VERT_SHADER: &str = concat!(env!("OUT_DIR"), "/shader.vert.spv");
const FRAG_SHADER: &str = concat!(env!("OUT_DIR"), "/shader.frag.spv");

const TWO_PI: f32 = std::f32::consts::TAU;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct Vertex {
    pos: Vec2,
    color: [f32; 3],
}

const BASE_VERTICES: [Vertex; 3] = [
    Vertex {
        pos: Vec2::new(0.0, -0.2),
        color: [1.0, 0.0, 0.0],
    },
    Vertex {
        pos: Vec2::new(0.2, 0.2),
        color: [0.0, 1.0, 0.0],
    },
    Vertex {
        pos: Vec2::new(-0.2, 0.2),
        color: [0.0, 0.0, 1.0],
    },
];

const INDICES: [u32; 3] = [0, 2, 1];

/// Wrap an accumulating angle back into one turn.
fn regularize_angle(angle: f32) -> f32 {
    angle - (angle / TWO_PI).trunc() * TWO_PI
}

/// Reflect the speed away from whichever edges `pos` has crossed.
fn bounce(pos: Vec2, speed: &mut Vec2) -> bool {
    let mut collided = false;
    if pos.x > 1.0 {
        speed.x = -speed.x.abs();
        collided = true;
    }
    if pos.x < -1.0 {
        speed.x = speed.x.abs();
        collided = true;
    }
    if pos.y > 1.0 {
        speed.y = -speed.y.abs();
        collided = true;
    }
    if pos.y < -1.0 {
        speed.y = speed.y.abs();
        collided = true;
    }
    collided
}

struct Task1b {
    vertices: Vec<Vertex>,
    lin_pos: Vec2,
    lin_speed: Vec2,
    rot_pos: f32,
    rot_speed: f32,
}

impl RenderScene for Task1b {
    fn vertex_binding(&self) -> vk::VertexInputBindingDescription {
        vk::VertexInputBindingDescription::default()
            .binding(0)
            .stride(std::mem::size_of::<Vertex>() as u32)
            .input_rate(vk::VertexInputRate::VERTEX)
    }

    fn vertex_attributes(&self) -> Vec<vk::VertexInputAttributeDescription> {
        vec![
            vk::VertexInputAttributeDescription::default()
                .location(0)
                .binding(0)
                .format(vk::Format::R32G32_SFLOAT)
                .offset(std::mem::offset_of!(Vertex, pos) as u32),
            vk::VertexInputAttributeDescription::default()
                .location(1)
                .binding(0)
                .format(vk::Format::R32G32B32_SFLOAT)
                .offset(std::mem::offset_of!(Vertex, color) as u32),
        ]
    }
}

impl Exercise for Task1b {
    fn init(_gpu: &GpuContext, _pool: &CommandPool) -> anyhow::Result<Self> {
        let mut rng = rand::thread_rng();

        Ok(Self {
            vertices: BASE_VERTICES.to_vec(),
            lin_pos: Vec2::ZERO,
            lin_speed: Vec2::new(
                rng.gen_range(-1.0..1.0) * 0.2,
                rng.gen_range(-1.0..1.0) * 0.2,
            ),
            rot_pos: rng.gen_range(-1.0..1.0) * std::f32::consts::PI,
            rot_speed: 1.0,
        })
    }

    fn swapchain_desc(&self) -> SwapchainDesc {
        SwapchainDesc::new(&self.vertices, &INDICES, VERT_SHADER, FRAG_SHADER)
    }

    fn update(
        &mut self,
        _gpu: &GpuContext,
        swapchain: &mut Swapchain,
        dt: f32,
    ) -> anyhow::Result<()> {
        self.rot_pos = regularize_angle(self.rot_pos + dt * self.rot_speed);
        let (sin, cos) = self.rot_pos.sin_cos();

        self.lin_pos += self.lin_speed * dt;

        for (vertex, base) in self.vertices.iter_mut().zip(&BASE_VERTICES) {
            let local = base.pos;
            let pos = self.lin_pos
                + Vec2::new(
                    cos * local.x - sin * local.y,
                    sin * local.x + cos * local.y,
                );

            if bounce(pos, &mut self.lin_speed) {
                tracing::debug!("bounce at ({:.2}, {:.2})", pos.x, pos.y);
            }

            vertex.pos = pos;
        }

        swapchain.reupload_vertices(&self.vertices)?;
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    prism_app::run::<Task1b>(AppConfig::new("Task 1b").with_size(800, 800))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn regularize_keeps_angle_within_one_turn() {
        assert_relative_eq!(regularize_angle(TWO_PI + 0.5), 0.5, epsilon = 1e-5);
        assert_relative_eq!(regularize_angle(3.0 * TWO_PI), 0.0, epsilon = 1e-4);
        assert_relative_eq!(regularize_angle(1.0), 1.0);
    }

    #[test]
    fn bounce_reflects_toward_the_interior() {
        let mut speed = Vec2::new(0.3, -0.1);
        assert!(bounce(Vec2::new(1.2, 0.0), &mut speed));
        assert!(speed.x < 0.0);

        let mut speed = Vec2::new(-0.3, 0.1);
        assert!(bounce(Vec2::new(-1.2, 0.0), &mut speed));
        assert!(speed.x > 0.0);

        let mut speed = Vec2::new(0.0, 0.4);
        assert!(bounce(Vec2::new(0.0, 1.5), &mut speed));
        assert!(speed.y < 0.0);
    }

    #[test]
    fn bounce_leaves_interior_positions_alone() {
        let mut speed = Vec2::new(0.3, 0.2);
        assert!(!bounce(Vec2::new(0.0, 0.0), &mut speed));
        assert_eq!(speed, Vec2::new(0.3, 0.2));
    }
}
