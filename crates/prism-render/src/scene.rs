//! The per-exercise capability interface.

use crate::swapchain::SwapchainInfo;
use ash::vk;
use bytemuck::Pod;
use prism_gpu::error::Result;
use prism_gpu::GpuContext;
use std::path::PathBuf;

/// What an exercise supplies to the swapchain.
///
/// Each exercise implements this trait once; the swapchain queries the vertex
/// and descriptor layout at build time and calls the per-image hooks as
/// images are created, destroyed and drawn. The swapchain never stores the
/// scene — it is passed in by the caller for every operation that needs it.
pub trait RenderScene {
    /// Vertex buffer binding description. Queried once per pipeline build.
    fn vertex_binding(&self) -> vk::VertexInputBindingDescription;

    /// Vertex attribute descriptions. Queried once per pipeline build.
    fn vertex_attributes(&self) -> Vec<vk::VertexInputAttributeDescription>;

    /// Descriptor set layout bindings. An empty list (the default) skips
    /// descriptor layout, pool and set creation entirely.
    fn descriptor_bindings(&self) -> Vec<vk::DescriptorSetLayoutBinding<'static>> {
        Vec::new()
    }

    /// Allocate per-image resources (uniform buffers and the like) for the
    /// negotiated image count. Called on every swapchain (re)build.
    #[allow(unused_variables)]
    fn init_render_entries(&mut self, gpu: &GpuContext, info: &SwapchainInfo) -> Result<()> {
        Ok(())
    }

    /// Release per-image resources. Called on every swapchain teardown.
    #[allow(unused_variables)]
    fn clear_render_entries(&mut self, gpu: &GpuContext) {}

    /// Write the descriptor set for one image slot. Called once per image
    /// whenever descriptor sets are (re)allocated.
    #[allow(unused_variables)]
    fn write_descriptor_set(&self, gpu: &GpuContext, set: vk::DescriptorSet, entry_index: usize) {}

    /// Per-frame update for the image about to be drawn. This is the only
    /// hook invoked from inside `draw_frame`, after the image's previous
    /// frame has provably finished.
    #[allow(unused_variables)]
    fn update_render_entry(
        &mut self,
        gpu: &GpuContext,
        info: &SwapchainInfo,
        entry_index: usize,
    ) -> Result<()> {
        Ok(())
    }

    /// Record the draw call into a pre-recorded command buffer. The default
    /// is a single indexed draw; exercises with special geometry handling
    /// can record their own commands.
    ///
    /// # Safety
    /// Called inside an active render pass with pipeline, vertex/index
    /// buffers and any descriptor set already bound.
    #[allow(unused_variables)]
    unsafe fn record_draw(
        &self,
        device: &ash::Device,
        cmd: vk::CommandBuffer,
        entry_index: usize,
        index_count: u32,
    ) {
        unsafe {
            device.cmd_draw_indexed(cmd, index_count, 1, 0, 0, 0);
        }
    }
}

/// Static inputs for a swapchain build: mesh data and shader paths.
pub struct SwapchainDesc {
    pub(crate) vertex_data: Vec<u8>,
    pub(crate) index_data: Vec<u32>,
    pub(crate) vertex_shader: PathBuf,
    pub(crate) fragment_shader: PathBuf,
}

impl SwapchainDesc {
    /// Describe a mesh and its shader pair.
    pub fn new<V: Pod>(
        vertices: &[V],
        indices: &[u32],
        vertex_shader: impl Into<PathBuf>,
        fragment_shader: impl Into<PathBuf>,
    ) -> Self {
        Self {
            vertex_data: bytemuck::cast_slice(vertices).to_vec(),
            index_data: indices.to_vec(),
            vertex_shader: vertex_shader.into(),
            fragment_shader: fragment_shader.into(),
        }
    }
}
