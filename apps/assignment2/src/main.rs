//! Assignment 2: a full-screen quad with all the work done in the fragment
//! shader. Declares no descriptors at all, so the framework builds the
//! pipeline with zero descriptor set layouts and skips the pool entirely.

use ash::vk;
use bytemuck::{Pod, Zeroable};
use prism_app::{AppConfig, Exercise};
use prism_gpu::{CommandPool, GpuContext};
use prism_render::{RenderScene, SwapchainDesc};

const VERT_SHADER: &str = concat!(env!("OUT_DIR"), "/shader.vert.spv");
const FRAG_SHADER: &str = concat!(env!("OUT_DIR"), "/shader.frag.spv");

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct Vertex {
    pos: [f32; 2],
}

const VERTICES: [Vertex; 4] = [
    Vertex { pos: [-1.0, -1.0] },
    Vertex { pos: [1.0, -1.0] },
    Vertex { pos: [-1.0, 1.0] },
    Vertex { pos: [1.0, 1.0] },
];

const INDICES: [u32; 6] = [1, 0, 2, 1, 2, 3];

struct Assignment2;

impl RenderScene for Assignment2 {
    fn vertex_binding(&self) -> vk::VertexInputBindingDescription {
        vk::VertexInputBindingDescription::default()
            .binding(0)
            .stride(std::mem::size_of::<Vertex>() as u32)
            .input_rate(vk::VertexInputRate::VERTEX)
    }

    fn vertex_attributes(&self) -> Vec<vk::VertexInputAttributeDescription> {
        vec![vk::VertexInputAttributeDescription::default()
            .location(0)
            .binding(0)
            .format(vk::Format::R32G32_SFLOAT)
            .offset(std::mem::offset_of!(Vertex, pos) as u32)]
    }
}

impl Exercise for Assignment2 {
    fn init(_gpu: &GpuContext, _pool: &CommandPool) -> anyhow::Result<Self> {
        Ok(Self)
    }

    fn swapchain_desc(&self) -> SwapchainDesc {
        SwapchainDesc::new(&VERTICES, &INDICES, VERT_SHADER, FRAG_SHADER)
    }
}

fn main() -> anyhow::Result<()> {
    prism_app::run::<Assignment2>(AppConfig::new("Assignment 2").with_size(800, 600))
}
