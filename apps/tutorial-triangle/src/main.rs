//! The classic Vulkan triangle: three colored vertices and nothing else.

use ash::vk;
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use prism_app::{AppConfig, Exercise};
use prism_gpu::{CommandPool, GpuContext};
use prism_render::{RenderScene, SwapchainDesc};

const VERT_SHADER: &str = concat!(env!("OUT_DIR"), "/shader.vert.spv");
const FRAG_SHADER: &str = concat!(env!("OUT_DIR"), "/shader.frag.spv");

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct Vertex {
    pos: Vec2,
    color: Vec3,
}

const VERTICES: [Vertex; 3] = [
    Vertex {
        pos: Vec2::new(0.0, -0.5),
        color: Vec3::new(1.0, 0.0, 0.0),
    },
    Vertex {
        pos: Vec2::new(0.5, 0.5),
        color: Vec3::new(0.0, 1.0, 0.0),
    },
    Vertex {
        pos: Vec2::new(-0.5, 0.5),
        color: Vec3::new(0.0, 0.0, 1.0),
    },
];

const INDICES: [u32; 3] = [0, 1, 2];

struct TriangleApp;

impl RenderScene for TriangleApp {
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

impl Exercise for TriangleApp {
    fn init(_gpu: &GpuContext, _pool: &CommandPool) -> anyhow::Result<Self> {
        Ok(Self)
    }

    fn swapchain_desc(&self) -> SwapchainDesc {
        SwapchainDesc::new(&VERTICES, &INDICES, VERT_SHADER, FRAG_SHADER)
    }
}

fn main() -> anyhow::Result<()> {
    prism_app::run::<TriangleApp>(AppConfig::new("Tutorial: Triangle").with_size(800, 600))
}
