//! Texture mapping tutorial: a textured quad spun by a per-image uniform
//! buffer holding the model/view/projection matrices.

use ash::vk;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use prism_app::{AppConfig, Exercise};
use prism_gpu::{CommandPool, GpuContext, Texture};
use prism_render::{RenderScene, SwapchainDesc, SwapchainInfo, UniformSet};
use std::path::Path;
use std::time::Instant;

const VERT_SHADER: &str = concat!(env!("OUT_DIR"), "/shader.vert.spv");
const FRAG_SHADER: &str = concat!(env!("OUT_DIR"), "/shader.frag.spv");
const TEXTURE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../media/texture.jpg");

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct Vertex {
    pos: Vec2,
    color: Vec3,
    tex_coord: Vec2,
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct UniformBufferObject {
    model: Mat4,
    view: Mat4,
    proj: Mat4,
}

const VERTICES: [Vertex; 4] = [
    Vertex {
        pos: Vec2::new(-0.5, -0.5),
        color: Vec3::new(1.0, 0.0, 0.0),
        tex_coord: Vec2::new(1.0, 0.0),
    },
    Vertex {
        pos: Vec2::new(0.5, -0.5),
        color: Vec3::new(0.0, 1.0, 0.0),
        tex_coord: Vec2::new(0.0, 0.0),
    },
    Vertex {
        pos: Vec2::new(0.5, 0.5),
        color: Vec3::new(0.0, 0.0, 1.0),
        tex_coord: Vec2::new(0.0, 1.0),
    },
    Vertex {
        pos: Vec2::new(-0.5, 0.5),
        color: Vec3::new(1.0, 1.0, 1.0),
        tex_coord: Vec2::new(1.0, 1.0),
    },
];

const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

struct TextureApp {
    texture: Texture,
    uniforms: UniformSet<UniformBufferObject>,
    start: Instant,
}

impl RenderScene for TextureApp {
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
            vk::VertexInputAttributeDescription::default()
                .location(2)
                .binding(0)
                .format(vk::Format::R32G32_SFLOAT)
                .offset(std::mem::offset_of!(Vertex, tex_coord) as u32),
        ]
    }

    fn descriptor_bindings(&self) -> Vec<vk::DescriptorSetLayoutBinding<'static>> {
        vec![
            vk::DescriptorSetLayoutBinding::default()
                .binding(0)
                .descriptor_type(vk::DescriptorType::UNIFORM_BUFFER)
                .descriptor_count(1)
                .stage_flags(vk::ShaderStageFlags::VERTEX),
            vk::DescriptorSetLayoutBinding::default()
                .binding(1)
                .descriptor_type(vk::DescriptorType::COMBINED_IMAGE_SAMPLER)
                .descriptor_count(1)
                .stage_flags(vk::ShaderStageFlags::FRAGMENT),
        ]
    }

    fn init_render_entries(
        &mut self,
        gpu: &GpuContext,
        info: &SwapchainInfo,
    ) -> prism_gpu::Result<()> {
        self.uniforms.init(gpu, info.image_count as usize)
    }

    fn clear_render_entries(&mut self, gpu: &GpuContext) {
        self.uniforms.clear(gpu);
    }

    fn write_descriptor_set(&self, gpu: &GpuContext, set: vk::DescriptorSet, entry_index: usize) {
        let buffer_info = self.uniforms.buffer_info(entry_index);
        let image_info = self.texture.descriptor_info();

        let writes = [
            vk::WriteDescriptorSet::default()
                .dst_set(set)
                .dst_binding(0)
                .descriptor_type(vk::DescriptorType::UNIFORM_BUFFER)
                .buffer_info(std::slice::from_ref(&buffer_info)),
            vk::WriteDescriptorSet::default()
                .dst_set(set)
                .dst_binding(1)
                .descriptor_type(vk::DescriptorType::COMBINED_IMAGE_SAMPLER)
                .image_info(std::slice::from_ref(&image_info)),
        ];

        unsafe {
            gpu.device().update_descriptor_sets(&writes, &[]);
        }
    }

    fn update_render_entry(
        &mut self,
        _gpu: &GpuContext,
        info: &SwapchainInfo,
        entry_index: usize,
    ) -> prism_gpu::Result<()> {
        let time = self.start.elapsed().as_secs_f32();
        let aspect = info.extent.width as f32 / info.extent.height as f32;

        let mut proj = Mat4::perspective_rh(45f32.to_radians(), aspect, 0.1, 10.0);
        proj.y_axis.y *= -1.0;

        let ubo = UniformBufferObject {
            model: Mat4::from_rotation_z(time * 90f32.to_radians()),
            view: Mat4::look_at_rh(Vec3::new(2.0, 2.0, 2.0), Vec3::ZERO, Vec3::Z),
            proj,
        };

        self.uniforms.write(entry_index, &ubo)
    }
}

impl Exercise for TextureApp {
    fn init(gpu: &GpuContext, pool: &CommandPool) -> anyhow::Result<Self> {
        Ok(Self {
            texture: Texture::from_file(gpu, pool, Path::new(TEXTURE_PATH))?,
            uniforms: UniformSet::new(),
            start: Instant::now(),
        })
    }

    fn swapchain_desc(&self) -> SwapchainDesc {
        SwapchainDesc::new(&VERTICES, &INDICES, VERT_SHADER, FRAG_SHADER)
    }

    fn destroy(&mut self, gpu: &GpuContext) {
        self.texture.destroy(gpu);
    }
}

fn main() -> anyhow::Result<()> {
    prism_app::run::<TextureApp>(AppConfig::new("Tutorial: Texture").with_size(800, 600))
}
