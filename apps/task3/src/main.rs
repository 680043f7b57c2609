//! Task 3: two pieces of geometry in one vertex stream. A flat triangle
//! spins and drifts in 2D while a textured rectangle tumbles through all
//! three axes, its rotation speeds nudged by a random walk. A per-vertex
//! flag selects between vertex color and the sampled texture.

use ash::vk;
use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Vec2, Vec3};
use prism_app::{AppConfig, Exercise};
use prism_gpu::{CommandPool, GpuContext, Texture};
use prism_render::{RenderScene, Swapchain, SwapchainDesc};
use rand::Rng;
use std::path::Path;

const VERT_SHADER: &str = concat!(env!("OUT_DIR"), "/shader.vert.spv");
const FRAG_SHADER: &str = concat!(env!("OUT_DIR"), "/shader.frag.spv");
const TEXTURE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../media/texture.jpg");

const TWO_PI: f32 = std::f32::consts::TAU;
const MAX_ROTATION_SPEED: f32 = 0.5;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct Vertex {
    pos: Vec3,
    color: Vec3,
    tex_coord: Vec2,
    textured: u32,
}

const fn colored(pos: [f32; 3], color: [f32; 3]) -> Vertex {
    Vertex {
        pos: Vec3::new(pos[0], pos[1], pos[2]),
        color: Vec3::new(color[0], color[1], color[2]),
        tex_coord: Vec2::ZERO,
        textured: 0,
    }
}

const fn textured(pos: [f32; 3], color: [f32; 3], uv: [f32; 2]) -> Vertex {
    Vertex {
        pos: Vec3::new(pos[0], pos[1], pos[2]),
        color: Vec3::new(color[0], color[1], color[2]),
        tex_coord: Vec2::new(uv[0], uv[1]),
        textured: 1,
    }
}

const BASE_VERTICES: [Vertex; 7] = [
    // Triangle
    colored([0.0, -0.2, 0.0], [1.0, 0.0, 0.0]),
    colored([0.2, 0.2, 0.0], [0.0, 1.0, 0.0]),
    colored([-0.2, 0.2, 0.0], [0.0, 0.0, 1.0]),
    // Rectangle
    textured([-0.4, -0.3, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0]),
    textured([0.4, -0.3, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0]),
    textured([-0.4, 0.3, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
    textured([0.4, 0.3, 0.0], [0.6, 0.6, 0.6], [1.0, 1.0]),
];

const INDICES: [u32; 15] = [
    // Triangle
    0, 2, 1, //
    // Rectangle, both windings so it stays visible from behind
    4, 3, 5, 4, 5, 6, //
    3, 4, 5, 5, 4, 6,
];

fn regularize_angle(angle: f32) -> f32 {
    angle - (angle / TWO_PI).trunc() * TWO_PI
}

struct Task3 {
    vertices: Vec<Vertex>,
    texture: Texture,

    tri_lin_pos: Vec2,
    tri_lin_speed: Vec2,
    tri_rot_pos: f32,
    tri_rot_speed: f32,

    rec_rot_pos: Vec3,
    rec_rot_speed: Vec3,
}

impl RenderScene for Task3 {
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
                .format(vk::Format::R32G32B32_SFLOAT)
                .offset(std::mem::offset_of!(Vertex, color) as u32),
            vk::VertexInputAttributeDescription::default()
                .location(2)
                .binding(0)
                .format(vk::Format::R32G32_SFLOAT)
                .offset(std::mem::offset_of!(Vertex, tex_coord) as u32),
            vk::VertexInputAttributeDescription::default()
                .location(3)
                .binding(0)
                .format(vk::Format::R32_UINT)
                .offset(std::mem::offset_of!(Vertex, textured) as u32),
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

impl Exercise for Task3 {
    fn init(gpu: &GpuContext, pool: &CommandPool) -> anyhow::Result<Self> {
        let texture = Texture::from_file(gpu, pool, Path::new(TEXTURE_PATH))?;

        let mut rng = rand::thread_rng();
        Ok(Self {
            vertices: BASE_VERTICES.to_vec(),
            texture,
            tri_lin_pos: Vec2::ZERO,
            tri_lin_speed: Vec2::new(
                rng.gen_range(-1.0..1.0) * 0.2,
                rng.gen_range(-1.0..1.0) * 0.2,
            ),
            tri_rot_pos: rng.gen_range(-1.0..1.0) * std::f32::consts::PI,
            tri_rot_speed: 1.0,
            rec_rot_pos: Vec3::ZERO,
            rec_rot_speed: Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            ) * MAX_ROTATION_SPEED,
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
        let mut rng = rand::thread_rng();

        // Triangle: spin, drift, bounce
        self.tri_rot_pos = regularize_angle(self.tri_rot_pos + dt * self.tri_rot_speed);
        let (sin, cos) = self.tri_rot_pos.sin_cos();
        self.tri_lin_pos += self.tri_lin_speed * dt;

        for (vertex, base) in self.vertices.iter_mut().zip(&BASE_VERTICES).take(3) {
            let local = base.pos;
            let pos = self.tri_lin_pos
                + Vec2::new(
                    cos * local.x - sin * local.y,
                    sin * local.x + cos * local.y,
                );

            if pos.x > 1.0 {
                self.tri_lin_speed.x = -self.tri_lin_speed.x.abs();
            }
            if pos.x < -1.0 {
                self.tri_lin_speed.x = self.tri_lin_speed.x.abs();
            }
            if pos.y > 1.0 {
                self.tri_lin_speed.y = -self.tri_lin_speed.y.abs();
            }
            if pos.y < -1.0 {
                self.tri_lin_speed.y = self.tri_lin_speed.y.abs();
            }

            vertex.pos = Vec3::new(pos.x, pos.y, 0.0);
        }

        // Rectangle: tumble through all three axes
        self.rec_rot_pos += self.rec_rot_speed * dt;
        self.rec_rot_pos = Vec3::new(
            regularize_angle(self.rec_rot_pos.x),
            regularize_angle(self.rec_rot_pos.y),
            regularize_angle(self.rec_rot_pos.z),
        );

        let rotation = Mat3::from_rotation_z(self.rec_rot_pos.z)
            * Mat3::from_rotation_y(self.rec_rot_pos.y)
            * Mat3::from_rotation_x(self.rec_rot_pos.x);

        for (vertex, base) in self.vertices.iter_mut().zip(&BASE_VERTICES).skip(3) {
            vertex.pos = rotation * base.pos;
        }

        // Nudge the tumble speeds a little every frame
        for axis in 0..3 {
            self.rec_rot_speed[axis] = (self.rec_rot_speed[axis]
                + dt * MAX_ROTATION_SPEED * rng.gen_range(-1.0..1.0))
            .clamp(-MAX_ROTATION_SPEED, MAX_ROTATION_SPEED);
        }

        swapchain.reupload_vertices(&self.vertices)?;
        Ok(())
    }

    fn destroy(&mut self, gpu: &GpuContext) {
        self.texture.destroy(gpu);
    }
}

fn main() -> anyhow::Result<()> {
    prism_app::run::<Task3>(AppConfig::new("Task 3").with_size(800, 800))
}
