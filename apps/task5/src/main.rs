//! Task 5: a textured rectangle, split into two triangles, drifts and spins
//! as one body while bouncing off the window edges. A mouse click launches
//! both triangles apart with randomized impulses; a constant pull drags them
//! back together while the impulse decays.

use ash::vk;
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use prism_app::{AppConfig, Exercise};
use prism_gpu::{CommandPool, GpuContext, Texture};
use prism_render::{RenderScene, Swapchain, SwapchainDesc};
use rand::Rng;
use std::path::Path;
use winit::event::{ElementState, MouseButton, WindowEvent};

const VERT_SHADER: &str = concat!(env!("OUT_DIR"), "/shader.vert.spv");
const FRAG_SHADER: &str = concat!(env!("OUT_DIR"), "/shader.frag.spv");
const TEXTURE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../media/texture.jpg");

const TWO_PI: f32 = std::f32::consts::TAU;

const RECT_WIDTH: f32 = 0.8;
const RECT_HEIGHT: f32 = 0.6;

const MAX_LINEAR_SPEED: f32 = 0.5;
const MAX_ROTATION_SPEED: f32 = 0.8;

// Constant speed that pulls the triangles back to center
const PULL_TO_CENTER: f32 = 2.0;
// Starting impulse range on click
const EXPLODE_SPEED_MIN: f32 = 1.0;
const EXPLODE_SPEED_MAX: f32 = 5.0;
// How fast the impulse decays per second
const EXPLODE_DETERIORATION: f32 = 2.0;

const NUM_TRIANGLES: usize = 2;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct Vertex {
    pos: Vec3,
    tex_coord: Vec2,
}

const fn vert(x: f32, y: f32, u: f32, v: f32) -> Vertex {
    Vertex {
        pos: Vec3::new(x, y, 0.0),
        tex_coord: Vec2::new(u, v),
    }
}

const HW: f32 = RECT_WIDTH * 0.5;
const HH: f32 = RECT_HEIGHT * 0.5;

const BASE_VERTICES: [Vertex; 6] = [
    vert(-HW, -HH, 0.0, 0.0),
    vert(HW, -HH, 1.0, 0.0),
    vert(-HW, HH, 0.0, 1.0),
    vert(HW, HH, 1.0, 1.0),
    vert(HW, -HH, 1.0, 0.0),
    vert(-HW, HH, 0.0, 1.0),
];

const INDICES: [u32; 6] = [1, 0, 2, 3, 4, 5];

const CORNERS: [Vec2; 4] = [
    Vec2::new(-HW, -HH),
    Vec2::new(HW, -HH),
    Vec2::new(-HW, HH),
    Vec2::new(HW, HH),
];

fn regularize_angle(angle: f32) -> f32 {
    angle - (angle / TWO_PI).trunc() * TWO_PI
}

fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

/// Decay an impulse toward zero; shift distance steepens the decay.
fn deteriorate_impulse(impulse: Vec2, shift: Vec2, dt: f32) -> Vec2 {
    let speed = impulse.length();
    if speed <= 0.01 {
        return Vec2::ZERO;
    }
    let direction = impulse / speed;
    let deterioration = (1.0 + shift.length()) * EXPLODE_DETERIORATION;
    (speed - dt * deterioration).max(0.0) * direction
}

/// Apply the impulse, then drag the shift back toward the center.
fn pull_to_center(shift: Vec2, impulse: Vec2, dt: f32) -> Vec2 {
    let shifted = shift + impulse * dt;
    let distance = shifted.length();
    if distance <= 1e-4 {
        return Vec2::ZERO;
    }
    let direction = shifted / distance;
    (distance - dt * PULL_TO_CENTER).max(0.0) * direction
}

struct Task5 {
    vertices: Vec<Vertex>,
    texture: Texture,

    lin_pos: Vec2,
    lin_speed: Vec2,
    rot_pos: f32,
    rot_speed: f32,

    explode_impulse: [Vec2; NUM_TRIANGLES],
    explode_shift: [Vec2; NUM_TRIANGLES],
    cursor: Vec2,
    clicked: bool,
}

impl RenderScene for Task5 {
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
                .format(vk::Format::R32G32B32_SFLOAT)
                .offset(std::mem::offset_of!(Vertex, pos) as u32),
            vk::VertexInputAttributeDescription::default()
                .location(1)
                .binding(0)
                .format(vk::Format::R32G32_SFLOAT)
                .offset(std::mem::offset_of!(Vertex, tex_coord) as u32),
        ]
    }

    fn descriptor_bindings(&self) -> Vec<vk::DescriptorSetLayoutBinding<'static>> {
        vec![vk::DescriptorSetLayoutBinding::default()
            .binding(0)
            .descriptor_type(vk::DescriptorType::COMBINED_IMAGE_SAMPLER)
            .descriptor_count(1)
            .stage_flags(vk::ShaderStageFlags::FRAGMENT)]
    }

    fn write_descriptor_set(&self, gpu: &GpuContext, set: vk::DescriptorSet, _entry_index: usize) {
        let image_info = self.texture.descriptor_info();
        let write = vk::WriteDescriptorSet::default()
            .dst_set(set)
            .dst_binding(0)
            .descriptor_type(vk::DescriptorType::COMBINED_IMAGE_SAMPLER)
            .image_info(std::slice::from_ref(&image_info));

        unsafe {
            gpu.device().update_descriptor_sets(&[write], &[]);
        }
    }
}

impl Exercise for Task5 {
    fn init(gpu: &GpuContext, pool: &CommandPool) -> anyhow::Result<Self> {
        let texture = Texture::from_file(gpu, pool, Path::new(TEXTURE_PATH))?;

        let mut rng = rand::thread_rng();
        Ok(Self {
            vertices: BASE_VERTICES.to_vec(),
            texture,
            lin_pos: Vec2::ZERO,
            lin_speed: Vec2::new(
                rng.gen_range(-1.0..1.0) * MAX_LINEAR_SPEED,
                rng.gen_range(-1.0..1.0) * MAX_LINEAR_SPEED,
            ),
            rot_pos: 0.0,
            rot_speed: rng.gen_range(-1.0..1.0) * MAX_ROTATION_SPEED,
            explode_impulse: [Vec2::ZERO; NUM_TRIANGLES],
            explode_shift: [Vec2::ZERO; NUM_TRIANGLES],
            cursor: Vec2::ZERO,
            clicked: false,
        })
    }

    fn swapchain_desc(&self) -> SwapchainDesc {
        SwapchainDesc::new(&self.vertices, &INDICES, VERT_SHADER, FRAG_SHADER)
    }

    fn on_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                tracing::info!("Mouse click at ({:.0}, {:.0})", self.cursor.x, self.cursor.y);
                self.clicked = true;
            }
            _ => {}
        }
    }

    fn update(
        &mut self,
        _gpu: &GpuContext,
        swapchain: &mut Swapchain,
        dt: f32,
    ) -> anyhow::Result<()> {
        let mut rng = rand::thread_rng();

        if std::mem::take(&mut self.clicked) {
            for impulse in &mut self.explode_impulse {
                let angle = rng.gen_range(0.0..TWO_PI);
                let magnitude = rng.gen_range(EXPLODE_SPEED_MIN..EXPLODE_SPEED_MAX);
                *impulse += magnitude * Vec2::new(angle.cos(), angle.sin());
            }
        }

        // Random walk on the body's speeds
        self.lin_speed.x = (self.lin_speed.x
            + dt * MAX_LINEAR_SPEED * rng.gen_range(-1.0..1.0))
        .clamp(-MAX_LINEAR_SPEED, MAX_LINEAR_SPEED);
        self.lin_speed.y = (self.lin_speed.y
            + dt * MAX_LINEAR_SPEED * rng.gen_range(-1.0..1.0))
        .clamp(-MAX_LINEAR_SPEED, MAX_LINEAR_SPEED);
        self.rot_speed = (self.rot_speed
            + dt * MAX_ROTATION_SPEED * rng.gen_range(-1.0..1.0))
        .clamp(-MAX_ROTATION_SPEED, MAX_ROTATION_SPEED);

        self.lin_pos += self.lin_speed * dt;
        self.rot_pos = regularize_angle(self.rot_pos + dt * self.rot_speed);

        // Bounce the whole rectangle off the edges, tested corner by corner
        for corner in CORNERS {
            let pos = self.lin_pos + rotate(corner, self.rot_pos);
            if pos.x > 1.0 {
                self.lin_speed.x = -self.lin_speed.x.abs();
            }
            if pos.x < -1.0 {
                self.lin_speed.x = self.lin_speed.x.abs();
            }
            if pos.y > 1.0 {
                self.lin_speed.y = -self.lin_speed.y.abs();
            }
            if pos.y < -1.0 {
                self.lin_speed.y = self.lin_speed.y.abs();
            }
        }

        // Per-triangle explosion shift
        for tri in 0..NUM_TRIANGLES {
            self.explode_impulse[tri] =
                deteriorate_impulse(self.explode_impulse[tri], self.explode_shift[tri], dt);
            self.explode_shift[tri] =
                pull_to_center(self.explode_shift[tri], self.explode_impulse[tri], dt);

            for i in 0..3 {
                let base = BASE_VERTICES[3 * tri + i].pos;
                let rotated = rotate(Vec2::new(base.x, base.y), self.rot_pos);
                let pos = rotated + self.lin_pos + self.explode_shift[tri];
                self.vertices[3 * tri + i].pos = Vec3::new(pos.x, pos.y, 0.0);
            }
        }

        swapchain.reupload_vertices(&self.vertices)?;
        Ok(())
    }

    fn destroy(&mut self, gpu: &GpuContext) {
        self.texture.destroy(gpu);
    }
}

fn main() -> anyhow::Result<()> {
    prism_app::run::<Task5>(AppConfig::new("Task 5").with_size(800, 800))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn impulse_decays_to_zero() {
        let mut impulse = Vec2::new(3.0, 0.0);
        let mut steps = 0;
        while impulse != Vec2::ZERO && steps < 1000 {
            impulse = deteriorate_impulse(impulse, Vec2::ZERO, 0.016);
            steps += 1;
        }
        assert_eq!(impulse, Vec2::ZERO);
    }

    #[test]
    fn impulse_decays_faster_when_shifted_far() {
        let near = deteriorate_impulse(Vec2::new(3.0, 0.0), Vec2::ZERO, 0.1);
        let far = deteriorate_impulse(Vec2::new(3.0, 0.0), Vec2::new(2.0, 0.0), 0.1);
        assert!(far.length() < near.length());
    }

    #[test]
    fn shift_returns_to_center_without_impulse() {
        let shift = pull_to_center(Vec2::new(0.1, 0.0), Vec2::ZERO, 1.0);
        assert_eq!(shift, Vec2::ZERO);
    }

    #[test]
    fn pull_preserves_direction() {
        let shift = pull_to_center(Vec2::new(1.0, 1.0), Vec2::ZERO, 0.01);
        assert_relative_eq!(shift.x, shift.y, epsilon = 1e-6);
        assert!(shift.length() < Vec2::new(1.0, 1.0).length());
    }
}
