//! Graphics pipeline construction.

use crate::shader::{create_shader_module, load_spirv};
use ash::vk;
use prism_gpu::error::{GpuError, Result};
use std::path::Path;

/// Everything a pipeline build needs besides the scene's vertex layout.
pub struct PipelineParams<'a> {
    /// Path of the vertex shader SPIR-V file.
    pub vertex_shader: &'a Path,
    /// Path of the fragment shader SPIR-V file.
    pub fragment_shader: &'a Path,
    /// Vertex buffer binding description.
    pub vertex_binding: vk::VertexInputBindingDescription,
    /// Vertex attribute descriptions.
    pub vertex_attributes: Vec<vk::VertexInputAttributeDescription>,
    /// Zero or one descriptor set layouts.
    pub set_layouts: Vec<vk::DescriptorSetLayout>,
    /// Render pass the pipeline draws into.
    pub render_pass: vk::RenderPass,
    /// Fixed viewport extent; the pipeline is rebuilt on resize.
    pub extent: vk::Extent2D,
}

/// Build the graphics pipeline and its layout.
///
/// Shader bytecode is loaded from disk here, on both the initial build and
/// every swapchain rebuild.
///
/// # Safety
/// The device and render pass must be valid.
pub unsafe fn create_graphics_pipeline(
    device: &ash::Device,
    params: &PipelineParams<'_>,
) -> Result<(vk::Pipeline, vk::PipelineLayout)> {
    let vert_code = load_spirv(params.vertex_shader)?;
    let frag_code = load_spirv(params.fragment_shader)?;

    let vert_module = unsafe { create_shader_module(device, &vert_code)? };
    let frag_module = unsafe { create_shader_module(device, &frag_code)? };

    let shader_stages = [
        vk::PipelineShaderStageCreateInfo::default()
            .stage(vk::ShaderStageFlags::VERTEX)
            .module(vert_module)
            .name(c"main"),
        vk::PipelineShaderStageCreateInfo::default()
            .stage(vk::ShaderStageFlags::FRAGMENT)
            .module(frag_module)
            .name(c"main"),
    ];

    let vertex_bindings = [params.vertex_binding];
    let vertex_input = vk::PipelineVertexInputStateCreateInfo::default()
        .vertex_binding_descriptions(&vertex_bindings)
        .vertex_attribute_descriptions(&params.vertex_attributes);

    let input_assembly = vk::PipelineInputAssemblyStateCreateInfo::default()
        .topology(vk::PrimitiveTopology::TRIANGLE_LIST)
        .primitive_restart_enable(false);

    let viewport = vk::Viewport::default()
        .width(params.extent.width as f32)
        .height(params.extent.height as f32)
        .min_depth(0.0)
        .max_depth(1.0);
    let scissor = vk::Rect2D::default().extent(params.extent);
    let viewport_state = vk::PipelineViewportStateCreateInfo::default()
        .viewports(std::slice::from_ref(&viewport))
        .scissors(std::slice::from_ref(&scissor));

    let rasterization = vk::PipelineRasterizationStateCreateInfo::default()
        .depth_clamp_enable(false)
        .rasterizer_discard_enable(false)
        .polygon_mode(vk::PolygonMode::FILL)
        // The 2D exercises rotate flat geometry through 3D; both faces stay visible
        .cull_mode(vk::CullModeFlags::NONE)
        .front_face(vk::FrontFace::COUNTER_CLOCKWISE)
        .depth_bias_enable(false)
        .line_width(1.0);

    let multisampling = vk::PipelineMultisampleStateCreateInfo::default()
        .rasterization_samples(vk::SampleCountFlags::TYPE_1)
        .sample_shading_enable(false);

    let depth_stencil = vk::PipelineDepthStencilStateCreateInfo::default()
        .depth_test_enable(true)
        .depth_write_enable(true)
        .depth_compare_op(vk::CompareOp::LESS)
        .depth_bounds_test_enable(false)
        .stencil_test_enable(false);

    let color_blend_attachment = vk::PipelineColorBlendAttachmentState::default()
        .blend_enable(false)
        .color_write_mask(vk::ColorComponentFlags::RGBA);
    let color_blending = vk::PipelineColorBlendStateCreateInfo::default()
        .logic_op_enable(false)
        .attachments(std::slice::from_ref(&color_blend_attachment));

    let layout_info = vk::PipelineLayoutCreateInfo::default().set_layouts(&params.set_layouts);
    let layout = unsafe {
        device
            .create_pipeline_layout(&layout_info, None)
            .map_err(|e| GpuError::PipelineCreation(e.to_string()))?
    };

    let pipeline_info = vk::GraphicsPipelineCreateInfo::default()
        .stages(&shader_stages)
        .vertex_input_state(&vertex_input)
        .input_assembly_state(&input_assembly)
        .viewport_state(&viewport_state)
        .rasterization_state(&rasterization)
        .multisample_state(&multisampling)
        .depth_stencil_state(&depth_stencil)
        .color_blend_state(&color_blending)
        .layout(layout)
        .render_pass(params.render_pass)
        .subpass(0);

    let pipelines = unsafe {
        device.create_graphics_pipelines(vk::PipelineCache::null(), &[pipeline_info], None)
    };

    unsafe {
        device.destroy_shader_module(vert_module, None);
        device.destroy_shader_module(frag_module, None);
    }

    match pipelines {
        Ok(pipelines) => Ok((pipelines[0], layout)),
        Err((_, e)) => {
            unsafe { device.destroy_pipeline_layout(layout, None) };
            Err(GpuError::PipelineCreation(e.to_string()))
        }
    }
}
