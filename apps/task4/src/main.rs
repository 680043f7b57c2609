//! Task 4: the viking room model, textured, rotating about its vertical
//! axis through a per-image uniform buffer.

use ash::vk;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use prism_app::{AppConfig, Exercise};
use prism_gpu::{CommandPool, GpuContext, GpuError, Texture};
use prism_render::{RenderScene, SwapchainDesc, SwapchainInfo, UniformSet};
use std::path::Path;
use std::time::Instant;

const VERT_SHADER: &str = concat!(env!("OUT_DIR"), "/shader.vert.spv");
const FRAG_SHADER: &str = concat!(env!("OUT_DIR"), "/shader.frag.spv");
const MODEL_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../media/viking_room.obj");
const TEXTURE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../media/viking_room.png");

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct Vertex {
    pos: Vec3,
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

/// Load an OBJ file into a single indexed mesh. `single_index` makes tobj
/// deduplicate position/texcoord pairs for us.
fn load_model(path: &Path) -> anyhow::Result<(Vec<Vertex>, Vec<u32>)> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|e| GpuError::AssetLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for model in models {
        let mesh = model.mesh;
        let base = vertices.len() as u32;

        for i in 0..mesh.positions.len() / 3 {
            let u = mesh.texcoords.get(2 * i).copied().unwrap_or(0.0);
            let v = mesh.texcoords.get(2 * i + 1).copied().unwrap_or(0.0);

            vertices.push(Vertex {
                pos: Vec3::new(
                    mesh.positions[3 * i],
                    mesh.positions[3 * i + 1],
                    mesh.positions[3 * i + 2],
                ),
                color: Vec3::ONE,
                // OBJ texture space has v pointing up
                tex_coord: Vec2::new(u, 1.0 - v),
            });
        }

        indices.extend(mesh.indices.iter().map(|&index| base + index));
    }

    tracing::info!(
        "Loaded {}: {} vertices, {} indices",
        path.display(),
        vertices.len(),
        indices.len()
    );

    Ok((vertices, indices))
}

struct Task4 {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    texture: Texture,
    uniforms: UniformSet<UniformBufferObject>,
    start: Instant,
}

impl RenderScene for Task4 {
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

impl Exercise for Task4 {
    fn init(gpu: &GpuContext, pool: &CommandPool) -> anyhow::Result<Self> {
        let (vertices, indices) = load_model(Path::new(MODEL_PATH))?;
        let texture = Texture::from_file(gpu, pool, Path::new(TEXTURE_PATH))?;

        Ok(Self {
            vertices,
            indices,
            texture,
            uniforms: UniformSet::new(),
            start: Instant::now(),
        })
    }

    fn swapchain_desc(&self) -> SwapchainDesc {
        SwapchainDesc::new(&self.vertices, &self.indices, VERT_SHADER, FRAG_SHADER)
    }

    fn destroy(&mut self, gpu: &GpuContext) {
        self.texture.destroy(gpu);
    }
}

fn main() -> anyhow::Result<()> {
    prism_app::run::<Task4>(AppConfig::new("Task 4").with_size(800, 800))
}
