//! The swapchain frame-lifecycle manager.
//!
//! Owns the presentable image chain and everything whose lifetime is tied to
//! it: render pass, pipeline, depth buffer, per-image framebuffers, command
//! buffers and descriptor sets. Drives the acquire → submit → present loop
//! and rebuilds all of it when the surface changes size.
//!
//! Device-level resources (context, surface, command pool) and the
//! fixed-size frame slots survive a rebuild; only resolution-dependent
//! state is torn down.

use crate::depth::{find_depth_format, DepthBuffer};
use crate::descriptors;
use crate::pacer::{FramePacer, FRAMES_IN_FLIGHT};
use crate::pipeline::{create_graphics_pipeline, PipelineParams};
use crate::render_pass::create_render_pass;
use crate::scene::{RenderScene, SwapchainDesc};
use ash::vk;
use bytemuck::Pod;
use gpu_allocator::MemoryLocation;
use prism_gpu::command;
use prism_gpu::error::{GpuError, Result};
use prism_gpu::sync::{create_fence, create_semaphore, reset_fence, wait_for_fence};
use prism_gpu::{CommandPool, GpuBuffer, GpuContext, SurfaceContext};

/// Negotiated swapchain parameters.
///
/// Recomputed wholesale on every (re)creation; never patched incrementally.
pub struct SwapchainInfo {
    /// Raw surface capabilities at query time.
    pub capabilities: vk::SurfaceCapabilitiesKHR,
    /// Formats the surface supports.
    pub formats: Vec<vk::SurfaceFormatKHR>,
    /// Present modes the surface supports.
    pub present_modes: Vec<vk::PresentModeKHR>,
    /// The chosen surface format.
    pub surface_format: vk::SurfaceFormatKHR,
    /// The chosen present mode.
    pub present_mode: vk::PresentModeKHR,
    /// The chosen extent.
    pub extent: vk::Extent2D,
    /// The negotiated presentable image count.
    pub image_count: u32,
}

impl SwapchainInfo {
    /// Query surface support and negotiate format, present mode, extent and
    /// image count.
    pub fn query(
        gpu: &GpuContext,
        surface: &SurfaceContext,
        window_extent: vk::Extent2D,
    ) -> Result<Self> {
        let support = surface.support(gpu)?;

        let surface_format = choose_surface_format(&support.formats)
            .ok_or_else(|| GpuError::SwapchainCreation("surface reports no formats".to_string()))?;
        let present_mode = choose_present_mode(&support.present_modes);
        let extent = clamp_extent(&support.capabilities, window_extent);
        let image_count = negotiate_image_count(&support.capabilities);

        Ok(Self {
            capabilities: support.capabilities,
            formats: support.formats,
            present_modes: support.present_modes,
            surface_format,
            present_mode,
            extent,
            image_count,
        })
    }
}

/// Prefer B8G8R8A8 sRGB; otherwise take whatever comes first.
fn choose_surface_format(formats: &[vk::SurfaceFormatKHR]) -> Option<vk::SurfaceFormatKHR> {
    formats
        .iter()
        .find(|f| {
            f.format == vk::Format::B8G8R8A8_SRGB
                && f.color_space == vk::ColorSpaceKHR::SRGB_NONLINEAR
        })
        .or_else(|| formats.first())
        .copied()
}

/// Prefer mailbox; FIFO is always available as the fallback.
fn choose_present_mode(modes: &[vk::PresentModeKHR]) -> vk::PresentModeKHR {
    if modes.contains(&vk::PresentModeKHR::MAILBOX) {
        vk::PresentModeKHR::MAILBOX
    } else {
        vk::PresentModeKHR::FIFO
    }
}

/// Use the surface's fixed extent when it has one, otherwise clamp the
/// window size into the allowed range.
fn clamp_extent(
    capabilities: &vk::SurfaceCapabilitiesKHR,
    window_extent: vk::Extent2D,
) -> vk::Extent2D {
    if capabilities.current_extent.width != u32::MAX {
        capabilities.current_extent
    } else {
        vk::Extent2D {
            width: window_extent.width.clamp(
                capabilities.min_image_extent.width,
                capabilities.max_image_extent.width,
            ),
            height: window_extent.height.clamp(
                capabilities.min_image_extent.height,
                capabilities.max_image_extent.height,
            ),
        }
    }
}

/// Request one image above the minimum, within the surface maximum
/// (zero maximum means unlimited).
fn negotiate_image_count(capabilities: &vk::SurfaceCapabilitiesKHR) -> u32 {
    let mut count = capabilities.min_image_count + 1;
    if capabilities.max_image_count > 0 && count > capabilities.max_image_count {
        count = capabilities.max_image_count;
    }
    count
}

fn is_zero_extent(extent: vk::Extent2D) -> bool {
    extent.width == 0 || extent.height == 0
}

/// Per-presentable-image resources.
///
/// The image handle itself belongs to the presentation engine; everything
/// else here is owned and rebuilt with the swapchain.
struct SwapchainEntry {
    // Non-owning; retrieved from and released by the presentation engine
    #[allow(dead_code)]
    image: vk::Image,
    view: vk::ImageView,
    framebuffer: vk::Framebuffer,
    command_buffer: vk::CommandBuffer,
    descriptor_set: vk::DescriptorSet,
}

/// Per-frame-slot synchronization primitives. Created once per swapchain
/// object lifetime and never recreated on resize.
struct FrameSlot {
    image_available: vk::Semaphore,
    render_finished: vk::Semaphore,
    in_flight: vk::Fence,
}

impl FrameSlot {
    unsafe fn new(device: &ash::Device) -> Result<Self> {
        unsafe {
            Ok(Self {
                image_available: create_semaphore(device)?,
                render_finished: create_semaphore(device)?,
                in_flight: create_fence(device, true)?,
            })
        }
    }

    unsafe fn destroy(&self, device: &ash::Device) {
        unsafe {
            device.destroy_semaphore(self.image_available, None);
            device.destroy_semaphore(self.render_finished, None);
            device.destroy_fence(self.in_flight, None);
        }
    }
}

/// The swapchain lifecycle manager.
pub struct Swapchain {
    handle: vk::SwapchainKHR,
    info: SwapchainInfo,
    entries: Vec<SwapchainEntry>,
    slots: Vec<FrameSlot>,
    pacer: FramePacer,

    render_pass: vk::RenderPass,
    pipeline: vk::Pipeline,
    pipeline_layout: vk::PipelineLayout,
    descriptor_layout: vk::DescriptorSetLayout,
    descriptor_pool: vk::DescriptorPool,
    depth: Option<DepthBuffer>,

    vertex_buffer: GpuBuffer,
    index_buffer: GpuBuffer,
    index_count: u32,

    desc: SwapchainDesc,
    command_pool: vk::CommandPool,
    resize_requested: bool,
}

impl Swapchain {
    /// Build the swapchain and every dependent resource.
    ///
    /// Any native-API failure propagates immediately; there is no partial
    /// success to recover from and callers are expected to abort.
    pub fn new(
        gpu: &GpuContext,
        surface: &SurfaceContext,
        pool: &CommandPool,
        scene: &mut dyn RenderScene,
        desc: SwapchainDesc,
        window_extent: vk::Extent2D,
    ) -> Result<Self> {
        let device = gpu.device();

        let mut allocator = gpu.allocator().lock();
        let vertex_buffer = allocator.create_buffer(
            desc.vertex_data.len() as u64,
            vk::BufferUsageFlags::VERTEX_BUFFER,
            MemoryLocation::CpuToGpu,
            "vertices",
        )?;
        let index_buffer = allocator.create_buffer(
            std::mem::size_of_val(desc.index_data.as_slice()) as u64,
            vk::BufferUsageFlags::INDEX_BUFFER,
            MemoryLocation::CpuToGpu,
            "indices",
        )?;
        drop(allocator);

        vertex_buffer.write(desc.vertex_data.as_slice())?;
        index_buffer.write(desc.index_data.as_slice())?;

        let mut slots = Vec::with_capacity(FRAMES_IN_FLIGHT);
        for _ in 0..FRAMES_IN_FLIGHT {
            slots.push(unsafe { FrameSlot::new(device)? });
        }

        let index_count = desc.index_data.len() as u32;

        let mut swapchain = Self {
            handle: vk::SwapchainKHR::null(),
            info: SwapchainInfo {
                capabilities: vk::SurfaceCapabilitiesKHR::default(),
                formats: Vec::new(),
                present_modes: Vec::new(),
                surface_format: vk::SurfaceFormatKHR::default(),
                present_mode: vk::PresentModeKHR::FIFO,
                extent: vk::Extent2D::default(),
                image_count: 0,
            },
            entries: Vec::new(),
            slots,
            pacer: FramePacer::new(FRAMES_IN_FLIGHT, 0),
            render_pass: vk::RenderPass::null(),
            pipeline: vk::Pipeline::null(),
            pipeline_layout: vk::PipelineLayout::null(),
            descriptor_layout: vk::DescriptorSetLayout::null(),
            descriptor_pool: vk::DescriptorPool::null(),
            depth: None,
            vertex_buffer,
            index_buffer,
            index_count,
            desc,
            command_pool: pool.handle(),
            resize_requested: false,
        };

        swapchain.build_chain(gpu, surface, scene, window_extent)?;

        tracing::info!(
            "Swapchain created: {}x{} ({} images)",
            swapchain.info.extent.width,
            swapchain.info.extent.height,
            swapchain.info.image_count
        );

        Ok(swapchain)
    }

    /// Negotiated parameters of the current chain.
    pub fn info(&self) -> &SwapchainInfo {
        &self.info
    }

    /// Current swapchain extent.
    pub fn extent(&self) -> vk::Extent2D {
        self.info.extent
    }

    /// Note that the window was resized. Consulted at the end of the next
    /// `draw_frame`; teardown only ever happens between frames.
    pub fn request_resize(&mut self) {
        self.resize_requested = true;
    }

    /// Overwrite the vertex buffer contents, for exercises that regenerate
    /// their geometry every frame.
    pub fn reupload_vertices<V: Pod>(&mut self, vertices: &[V]) -> Result<()> {
        self.vertex_buffer.write(bytemuck::cast_slice::<V, u8>(vertices))
    }

    /// Draw one frame: wait, acquire, update, submit, present.
    ///
    /// A stale surface (out-of-date acquire or present, suboptimal present,
    /// or a pending resize request) triggers a full rebuild of the
    /// resolution-dependent resources; the frame is skipped in the acquire
    /// case and the next one renders against the new chain.
    pub fn draw_frame(
        &mut self,
        gpu: &GpuContext,
        surface: &SurfaceContext,
        scene: &mut dyn RenderScene,
        window_extent: vk::Extent2D,
    ) -> Result<()> {
        if is_zero_extent(window_extent) {
            // Minimized; nothing to present until the window comes back
            self.resize_requested = true;
            return Ok(());
        }

        let device = gpu.device();
        let slot = &self.slots[self.pacer.current_slot()];
        let image_available = slot.image_available;
        let render_finished = slot.render_finished;
        let in_flight = slot.in_flight;

        unsafe {
            wait_for_fence(device, in_flight)?;
        }

        let acquired = unsafe {
            surface.swapchain_loader.acquire_next_image(
                self.handle,
                u64::MAX,
                image_available,
                vk::Fence::null(),
            )
        };

        let image_index = match acquired {
            Ok((index, _suboptimal)) => index as usize,
            Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
                self.recreate(gpu, surface, scene, window_extent)?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        scene.update_render_entry(gpu, &self.info, image_index)?;

        // The image may still be in flight under another slot's fence
        if let Some(previous_slot) = self.pacer.stamp_entry(image_index) {
            unsafe {
                wait_for_fence(device, self.slots[previous_slot].in_flight)?;
            }
        }

        unsafe {
            reset_fence(device, in_flight)?;
            command::submit(
                device,
                gpu.graphics_queue(),
                self.entries[image_index].command_buffer,
                &[image_available],
                &[vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT],
                &[render_finished],
                in_flight,
            )?;
        }

        let presented = unsafe {
            let swapchains = [self.handle];
            let image_indices = [image_index as u32];
            let wait_semaphores = [render_finished];
            let present_info = vk::PresentInfoKHR::default()
                .wait_semaphores(&wait_semaphores)
                .swapchains(&swapchains)
                .image_indices(&image_indices);

            surface
                .swapchain_loader
                .queue_present(gpu.graphics_queue(), &present_info)
        };

        let stale = match presented {
            Ok(suboptimal) => suboptimal,
            Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => true,
            Err(e) => return Err(e.into()),
        };

        if stale || self.resize_requested {
            self.recreate(gpu, surface, scene, window_extent)?;
        }

        self.pacer.advance();
        Ok(())
    }

    /// Tear down and rebuild every resolution-dependent resource.
    ///
    /// Frame slots, vertex/index buffers and the command pool survive. With
    /// a zero window extent (minimized) no swapchain is created; the request
    /// stays pending until the window has a size again.
    pub fn recreate(
        &mut self,
        gpu: &GpuContext,
        surface: &SurfaceContext,
        scene: &mut dyn RenderScene,
        window_extent: vk::Extent2D,
    ) -> Result<()> {
        if is_zero_extent(window_extent) {
            self.resize_requested = true;
            return Ok(());
        }
        self.resize_requested = false;

        gpu.wait_idle()?;
        self.destroy_chain(gpu, surface, scene);
        self.build_chain(gpu, surface, scene, window_extent)?;

        tracing::info!(
            "Swapchain recreated: {}x{} ({} images)",
            self.info.extent.width,
            self.info.extent.height,
            self.info.image_count
        );

        Ok(())
    }

    /// Destroy everything, including the frame slots and mesh buffers.
    pub fn destroy(&mut self, gpu: &GpuContext, surface: &SurfaceContext, scene: &mut dyn RenderScene) {
        let _ = gpu.wait_idle();

        self.destroy_chain(gpu, surface, scene);

        let device = gpu.device();
        unsafe {
            for slot in &self.slots {
                slot.destroy(device);
            }
        }
        self.slots.clear();

        let mut allocator = gpu.allocator().lock();
        let _ = allocator.free_buffer(&mut self.vertex_buffer);
        let _ = allocator.free_buffer(&mut self.index_buffer);
    }

    /// Build the chain and all per-image resources, in dependency order.
    fn build_chain(
        &mut self,
        gpu: &GpuContext,
        surface: &SurfaceContext,
        scene: &mut dyn RenderScene,
        window_extent: vk::Extent2D,
    ) -> Result<()> {
        let device = gpu.device();
        let info = SwapchainInfo::query(gpu, surface, window_extent)?;

        let create_info = vk::SwapchainCreateInfoKHR::default()
            .surface(surface.surface)
            .min_image_count(info.image_count)
            .image_format(info.surface_format.format)
            .image_color_space(info.surface_format.color_space)
            .image_extent(info.extent)
            .image_array_layers(1)
            .image_usage(vk::ImageUsageFlags::COLOR_ATTACHMENT)
            .image_sharing_mode(vk::SharingMode::EXCLUSIVE)
            .pre_transform(info.capabilities.current_transform)
            .composite_alpha(vk::CompositeAlphaFlagsKHR::OPAQUE)
            .present_mode(info.present_mode)
            .clipped(true)
            .old_swapchain(vk::SwapchainKHR::null());

        let handle = unsafe {
            surface
                .swapchain_loader
                .create_swapchain(&create_info, None)
                .map_err(|e| GpuError::SwapchainCreation(e.to_string()))?
        };

        let images = unsafe { surface.swapchain_loader.get_swapchain_images(handle)? };
        let image_count = images.len();

        let mut views = Vec::with_capacity(image_count);
        for &image in &images {
            views.push(unsafe {
                prism_gpu::texture::create_image_view(
                    device,
                    image,
                    info.surface_format.format,
                    vk::ImageAspectFlags::COLOR,
                )?
            });
        }

        let depth_format = find_depth_format(gpu)?;
        let render_pass =
            unsafe { create_render_pass(device, info.surface_format.format, depth_format)? };

        let bindings = scene.descriptor_bindings();
        let descriptor_layout = if bindings.is_empty() {
            vk::DescriptorSetLayout::null()
        } else {
            unsafe { descriptors::create_layout(device, &bindings)? }
        };

        let set_layouts: Vec<vk::DescriptorSetLayout> = if bindings.is_empty() {
            Vec::new()
        } else {
            vec![descriptor_layout]
        };

        let (pipeline, pipeline_layout) = unsafe {
            create_graphics_pipeline(
                device,
                &PipelineParams {
                    vertex_shader: self.desc.vertex_shader.as_path(),
                    fragment_shader: self.desc.fragment_shader.as_path(),
                    vertex_binding: scene.vertex_binding(),
                    vertex_attributes: scene.vertex_attributes(),
                    set_layouts,
                    render_pass,
                    extent: info.extent,
                },
            )?
        };

        let depth = DepthBuffer::new(gpu, info.extent, depth_format)?;

        scene.init_render_entries(gpu, &info)?;

        let sizes = descriptors::pool_sizes(&bindings, image_count as u32);
        let (descriptor_pool, descriptor_sets) = if sizes.is_empty() {
            (
                vk::DescriptorPool::null(),
                vec![vk::DescriptorSet::null(); image_count],
            )
        } else {
            let pool = unsafe { descriptors::create_pool(device, &sizes, image_count as u32)? };
            let sets = unsafe {
                descriptors::allocate_sets(device, pool, descriptor_layout, image_count as u32)?
            };
            for (index, &set) in sets.iter().enumerate() {
                scene.write_descriptor_set(gpu, set, index);
            }
            (pool, sets)
        };

        let mut framebuffers = Vec::with_capacity(image_count);
        for &view in &views {
            let attachments = [view, depth.view()];
            let framebuffer_info = vk::FramebufferCreateInfo::default()
                .render_pass(render_pass)
                .attachments(&attachments)
                .width(info.extent.width)
                .height(info.extent.height)
                .layers(1);
            framebuffers.push(unsafe { device.create_framebuffer(&framebuffer_info, None)? });
        }

        let alloc_info = vk::CommandBufferAllocateInfo::default()
            .command_pool(self.command_pool)
            .level(vk::CommandBufferLevel::PRIMARY)
            .command_buffer_count(image_count as u32);
        let command_buffers = unsafe { device.allocate_command_buffers(&alloc_info)? };

        self.handle = handle;
        self.info = info;
        self.render_pass = render_pass;
        self.pipeline = pipeline;
        self.pipeline_layout = pipeline_layout;
        self.descriptor_layout = descriptor_layout;
        self.descriptor_pool = descriptor_pool;
        self.depth = Some(depth);
        self.entries = images
            .into_iter()
            .zip(views)
            .zip(framebuffers)
            .zip(command_buffers)
            .zip(descriptor_sets)
            .map(
                |((((image, view), framebuffer), command_buffer), descriptor_set)| SwapchainEntry {
                    image,
                    view,
                    framebuffer,
                    command_buffer,
                    descriptor_set,
                },
            )
            .collect();
        self.pacer.reset_entries(image_count);

        self.record_command_buffers(gpu, scene)?;

        Ok(())
    }

    /// Pre-record the static draw commands for every image.
    fn record_command_buffers(&self, gpu: &GpuContext, scene: &dyn RenderScene) -> Result<()> {
        let device = gpu.device();

        let clear_values = [
            vk::ClearValue {
                color: vk::ClearColorValue {
                    float32: [0.0, 0.0, 0.0, 1.0],
                },
            },
            vk::ClearValue {
                depth_stencil: vk::ClearDepthStencilValue {
                    depth: 1.0,
                    stencil: 0,
                },
            },
        ];

        for (index, entry) in self.entries.iter().enumerate() {
            let cmd = entry.command_buffer;
            unsafe {
                command::begin_command_buffer(device, cmd, false)?;

                let pass_begin = vk::RenderPassBeginInfo::default()
                    .render_pass(self.render_pass)
                    .framebuffer(entry.framebuffer)
                    .render_area(vk::Rect2D::default().extent(self.info.extent))
                    .clear_values(&clear_values);

                device.cmd_begin_render_pass(cmd, &pass_begin, vk::SubpassContents::INLINE);
                device.cmd_bind_pipeline(cmd, vk::PipelineBindPoint::GRAPHICS, self.pipeline);
                device.cmd_bind_vertex_buffers(cmd, 0, &[self.vertex_buffer.buffer], &[0]);
                device.cmd_bind_index_buffer(
                    cmd,
                    self.index_buffer.buffer,
                    0,
                    vk::IndexType::UINT32,
                );
                if entry.descriptor_set != vk::DescriptorSet::null() {
                    device.cmd_bind_descriptor_sets(
                        cmd,
                        vk::PipelineBindPoint::GRAPHICS,
                        self.pipeline_layout,
                        0,
                        &[entry.descriptor_set],
                        &[],
                    );
                }

                scene.record_draw(device, cmd, index, self.index_count);

                device.cmd_end_render_pass(cmd);
                command::end_command_buffer(device, cmd)?;
            }
        }

        Ok(())
    }

    /// Destroy every resolution-dependent resource. The caller has already
    /// made sure the device is idle.
    fn destroy_chain(
        &mut self,
        gpu: &GpuContext,
        surface: &SurfaceContext,
        scene: &mut dyn RenderScene,
    ) {
        let device = gpu.device();

        unsafe {
            let command_buffers: Vec<vk::CommandBuffer> =
                self.entries.iter().map(|e| e.command_buffer).collect();
            if !command_buffers.is_empty() {
                device.free_command_buffers(self.command_pool, &command_buffers);
            }

            for entry in &self.entries {
                device.destroy_framebuffer(entry.framebuffer, None);
                device.destroy_image_view(entry.view, None);
                // entry.image belongs to the presentation engine
            }
            self.entries.clear();

            if self.pipeline != vk::Pipeline::null() {
                device.destroy_pipeline(self.pipeline, None);
                self.pipeline = vk::Pipeline::null();
            }
            if self.pipeline_layout != vk::PipelineLayout::null() {
                device.destroy_pipeline_layout(self.pipeline_layout, None);
                self.pipeline_layout = vk::PipelineLayout::null();
            }
            if self.render_pass != vk::RenderPass::null() {
                device.destroy_render_pass(self.render_pass, None);
                self.render_pass = vk::RenderPass::null();
            }
            if self.descriptor_pool != vk::DescriptorPool::null() {
                device.destroy_descriptor_pool(self.descriptor_pool, None);
                self.descriptor_pool = vk::DescriptorPool::null();
            }
            if self.descriptor_layout != vk::DescriptorSetLayout::null() {
                device.destroy_descriptor_set_layout(self.descriptor_layout, None);
                self.descriptor_layout = vk::DescriptorSetLayout::null();
            }
        }

        if let Some(mut depth) = self.depth.take() {
            depth.destroy(gpu);
        }

        scene.clear_render_entries(gpu);

        unsafe {
            if self.handle != vk::SwapchainKHR::null() {
                surface.swapchain_loader.destroy_swapchain(self.handle, None);
                self.handle = vk::SwapchainKHR::null();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(min: u32, max: u32) -> vk::SurfaceCapabilitiesKHR {
        vk::SurfaceCapabilitiesKHR {
            min_image_count: min,
            max_image_count: max,
            ..Default::default()
        }
    }

    #[test]
    fn image_count_is_min_plus_one() {
        assert_eq!(negotiate_image_count(&caps(2, 0)), 3);
        assert_eq!(negotiate_image_count(&caps(2, 8)), 3);
    }

    #[test]
    fn image_count_respects_surface_maximum() {
        assert_eq!(negotiate_image_count(&caps(3, 3)), 3);
    }

    #[test]
    fn extent_uses_surface_extent_when_fixed() {
        let mut capabilities = caps(2, 0);
        capabilities.current_extent = vk::Extent2D {
            width: 1024,
            height: 768,
        };
        let extent = clamp_extent(
            &capabilities,
            vk::Extent2D {
                width: 640,
                height: 480,
            },
        );
        assert_eq!(extent.width, 1024);
        assert_eq!(extent.height, 768);
    }

    #[test]
    fn extent_clamps_window_size_otherwise() {
        let mut capabilities = caps(2, 0);
        capabilities.current_extent = vk::Extent2D {
            width: u32::MAX,
            height: u32::MAX,
        };
        capabilities.min_image_extent = vk::Extent2D {
            width: 200,
            height: 200,
        };
        capabilities.max_image_extent = vk::Extent2D {
            width: 1000,
            height: 1000,
        };

        let extent = clamp_extent(
            &capabilities,
            vk::Extent2D {
                width: 4000,
                height: 100,
            },
        );
        assert_eq!(extent.width, 1000);
        assert_eq!(extent.height, 200);
    }

    #[test]
    fn surface_format_prefers_srgb() {
        let formats = [
            vk::SurfaceFormatKHR {
                format: vk::Format::R8G8B8A8_UNORM,
                color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
            },
            vk::SurfaceFormatKHR {
                format: vk::Format::B8G8R8A8_SRGB,
                color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
            },
        ];
        let chosen = choose_surface_format(&formats).unwrap();
        assert_eq!(chosen.format, vk::Format::B8G8R8A8_SRGB);
    }

    #[test]
    fn surface_format_falls_back_to_first() {
        let formats = [vk::SurfaceFormatKHR {
            format: vk::Format::R8G8B8A8_UNORM,
            color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
        }];
        let chosen = choose_surface_format(&formats).unwrap();
        assert_eq!(chosen.format, vk::Format::R8G8B8A8_UNORM);

        assert!(choose_surface_format(&[]).is_none());
    }

    #[test]
    fn present_mode_prefers_mailbox_over_fifo() {
        assert_eq!(
            choose_present_mode(&[vk::PresentModeKHR::FIFO, vk::PresentModeKHR::MAILBOX]),
            vk::PresentModeKHR::MAILBOX
        );
        assert_eq!(
            choose_present_mode(&[vk::PresentModeKHR::FIFO]),
            vk::PresentModeKHR::FIFO
        );
    }

    #[test]
    fn zero_extent_blocks_recreation() {
        assert!(is_zero_extent(vk::Extent2D {
            width: 0,
            height: 300
        }));
        assert!(is_zero_extent(vk::Extent2D {
            width: 400,
            height: 0
        }));
        assert!(!is_zero_extent(vk::Extent2D {
            width: 400,
            height: 300
        }));
    }
}
