//! Task 1a: a small static triangle.

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
    color: [f32; 3],
}

const VERTICES: [Vertex; 3] = [
    Vertex {
        pos: [0.0, -0.2],
        color: [1.0, 0.0, 0.0],
    },
    Vertex {
        pos: [0.2, 0.2],
        color: [0.0, 1.0, 0.0],
    },
    Vertex {
        pos: [-0.2, 0.2],
        color: [0.0, 0.0, 1.0],
    },
];

const INDICES: [u32; 3] = [0, 2, 1];

struct Task1a;

impl RenderScene for Task1a {
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

impl Exercise for Task1a {
    fn init(_gpu: &GpuContext, _pool: &CommandPool) -> anyhow::Result<Self> {
        Ok(Self)
    }

    fn swapchain_desc(&self) -> SwapchainDesc {
        SwapchainDesc::new(&VERTICES, &INDICES, VERT_SHADER, FRAG_SHADER)
    }
}

fn main() -> anyhow::Result<()> {
    prism_app::run::<Task1a>(AppConfig::new("Task 1a").with_size(800, 600))
}
