//! Sampled textures with synchronous staged upload.

use crate::command::{run_single_use, CommandPool};
use crate::context::GpuContext;
use crate::error::{GpuError, Result};
use crate::memory::GpuImage;
use ash::vk;
use gpu_allocator::MemoryLocation;
use std::path::Path;

/// A sampled 2D texture: image, memory, view and sampler as one unit.
pub struct Texture {
    image: GpuImage,
    view: vk::ImageView,
    sampler: vk::Sampler,
    layout: vk::ImageLayout,
}

impl Texture {
    /// Load an image file and upload it as an RGBA8 sRGB texture.
    ///
    /// The upload is fully synchronous: staging buffer write, layout
    /// transition, buffer-to-image copy and the final transition each run as
    /// a blocking single-use command buffer.
    pub fn from_file(gpu: &GpuContext, pool: &CommandPool, path: &Path) -> Result<Self> {
        let decoded = image::open(path)
            .map_err(|e| GpuError::AssetLoad {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        let pixels = decoded.into_raw();

        let mut staging = gpu.allocator().lock().create_buffer(
            pixels.len() as u64,
            vk::BufferUsageFlags::TRANSFER_SRC,
            MemoryLocation::CpuToGpu,
            "texture staging",
        )?;
        staging.write(&pixels)?;

        let mut texture = Self::new(
            gpu,
            width,
            height,
            vk::Format::R8G8B8A8_SRGB,
            vk::ImageUsageFlags::TRANSFER_DST | vk::ImageUsageFlags::SAMPLED,
        )?;

        let upload = (|| {
            texture.transition_layout(gpu, pool, vk::ImageLayout::TRANSFER_DST_OPTIMAL)?;
            texture.copy_from_buffer(gpu, pool, staging.buffer, width, height)?;
            texture.transition_layout(gpu, pool, vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL)
        })();

        gpu.allocator().lock().free_buffer(&mut staging)?;
        upload?;

        tracing::debug!("Loaded texture {} ({width}x{height})", path.display());

        Ok(texture)
    }

    /// Create an empty device-local texture in UNDEFINED layout.
    pub fn new(
        gpu: &GpuContext,
        width: u32,
        height: u32,
        format: vk::Format,
        usage: vk::ImageUsageFlags,
    ) -> Result<Self> {
        let image_info = vk::ImageCreateInfo::default()
            .image_type(vk::ImageType::TYPE_2D)
            .extent(vk::Extent3D {
                width,
                height,
                depth: 1,
            })
            .mip_levels(1)
            .array_layers(1)
            .format(format)
            .tiling(vk::ImageTiling::OPTIMAL)
            .initial_layout(vk::ImageLayout::UNDEFINED)
            .usage(usage)
            .samples(vk::SampleCountFlags::TYPE_1)
            .sharing_mode(vk::SharingMode::EXCLUSIVE);

        let image = gpu.allocator().lock().create_image(
            &image_info,
            MemoryLocation::GpuOnly,
            "texture",
        )?;

        let view = unsafe {
            create_image_view(
                gpu.device(),
                image.image,
                format,
                vk::ImageAspectFlags::COLOR,
            )?
        };
        let sampler = unsafe { create_sampler(gpu)? };

        Ok(Self {
            image,
            view,
            sampler,
            layout: vk::ImageLayout::UNDEFINED,
        })
    }

    /// Texture width in pixels.
    pub fn width(&self) -> u32 {
        self.image.extent.width
    }

    /// Texture height in pixels.
    pub fn height(&self) -> u32 {
        self.image.extent.height
    }

    /// Descriptor info for binding the texture as a combined image sampler.
    pub fn descriptor_info(&self) -> vk::DescriptorImageInfo {
        vk::DescriptorImageInfo::default()
            .image_layout(self.layout)
            .image_view(self.view)
            .sampler(self.sampler)
    }

    /// Transition the image to a new layout with a blocking one-shot barrier.
    ///
    /// Only the two transitions of the upload path are supported.
    pub fn transition_layout(
        &mut self,
        gpu: &GpuContext,
        pool: &CommandPool,
        new_layout: vk::ImageLayout,
    ) -> Result<()> {
        let old_layout = self.layout;
        if old_layout == new_layout {
            return Ok(());
        }

        let (src_access, dst_access, src_stage, dst_stage) = match (old_layout, new_layout) {
            (vk::ImageLayout::UNDEFINED, vk::ImageLayout::TRANSFER_DST_OPTIMAL) => (
                vk::AccessFlags::empty(),
                vk::AccessFlags::TRANSFER_WRITE,
                vk::PipelineStageFlags::TOP_OF_PIPE,
                vk::PipelineStageFlags::TRANSFER,
            ),
            (
                vk::ImageLayout::TRANSFER_DST_OPTIMAL,
                vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL,
            ) => (
                vk::AccessFlags::TRANSFER_WRITE,
                vk::AccessFlags::SHADER_READ,
                vk::PipelineStageFlags::TRANSFER,
                vk::PipelineStageFlags::FRAGMENT_SHADER,
            ),
            _ => {
                return Err(GpuError::InvalidState(format!(
                    "Unsupported layout transition {old_layout:?} -> {new_layout:?}"
                )))
            }
        };

        let barrier = vk::ImageMemoryBarrier::default()
            .old_layout(old_layout)
            .new_layout(new_layout)
            .src_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
            .dst_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
            .image(self.image.image)
            .subresource_range(
                vk::ImageSubresourceRange::default()
                    .aspect_mask(vk::ImageAspectFlags::COLOR)
                    .level_count(1)
                    .layer_count(1),
            )
            .src_access_mask(src_access)
            .dst_access_mask(dst_access);

        unsafe {
            run_single_use(gpu.device(), pool, gpu.graphics_queue(), |cmd| {
                gpu.device().cmd_pipeline_barrier(
                    cmd,
                    src_stage,
                    dst_stage,
                    vk::DependencyFlags::empty(),
                    &[],
                    &[],
                    &[barrier],
                );
            })?;
        }

        self.layout = new_layout;
        Ok(())
    }

    fn copy_from_buffer(
        &self,
        gpu: &GpuContext,
        pool: &CommandPool,
        buffer: vk::Buffer,
        width: u32,
        height: u32,
    ) -> Result<()> {
        let region = vk::BufferImageCopy::default()
            .image_subresource(
                vk::ImageSubresourceLayers::default()
                    .aspect_mask(vk::ImageAspectFlags::COLOR)
                    .layer_count(1),
            )
            .image_extent(vk::Extent3D {
                width,
                height,
                depth: 1,
            });

        unsafe {
            run_single_use(gpu.device(), pool, gpu.graphics_queue(), |cmd| {
                gpu.device().cmd_copy_buffer_to_image(
                    cmd,
                    buffer,
                    self.image.image,
                    vk::ImageLayout::TRANSFER_DST_OPTIMAL,
                    &[region],
                );
            })?;
        }

        Ok(())
    }

    /// Destroy the view, sampler, image and allocation. Safe to call twice.
    pub fn destroy(&mut self, gpu: &GpuContext) {
        unsafe {
            if self.sampler != vk::Sampler::null() {
                gpu.device().destroy_sampler(self.sampler, None);
                self.sampler = vk::Sampler::null();
            }
            if self.view != vk::ImageView::null() {
                gpu.device().destroy_image_view(self.view, None);
                self.view = vk::ImageView::null();
            }
        }
        let _ = gpu.allocator().lock().free_image(&mut self.image);
    }
}

/// Create a 2D image view.
///
/// # Safety
/// The device and image must be valid.
pub unsafe fn create_image_view(
    device: &ash::Device,
    image: vk::Image,
    format: vk::Format,
    aspect: vk::ImageAspectFlags,
) -> Result<vk::ImageView> {
    let view_info = vk::ImageViewCreateInfo::default()
        .image(image)
        .view_type(vk::ImageViewType::TYPE_2D)
        .format(format)
        .subresource_range(
            vk::ImageSubresourceRange::default()
                .aspect_mask(aspect)
                .base_mip_level(0)
                .level_count(1)
                .base_array_layer(0)
                .layer_count(1),
        );

    let view = unsafe { device.create_image_view(&view_info, None)? };
    Ok(view)
}

/// Create a repeat-addressed linear sampler with max anisotropy.
///
/// # Safety
/// The context must be valid.
unsafe fn create_sampler(gpu: &GpuContext) -> Result<vk::Sampler> {
    let sampler_info = vk::SamplerCreateInfo::default()
        .mag_filter(vk::Filter::LINEAR)
        .min_filter(vk::Filter::LINEAR)
        .address_mode_u(vk::SamplerAddressMode::REPEAT)
        .address_mode_v(vk::SamplerAddressMode::REPEAT)
        .address_mode_w(vk::SamplerAddressMode::REPEAT)
        .anisotropy_enable(true)
        .max_anisotropy(gpu.properties().limits.max_sampler_anisotropy)
        .border_color(vk::BorderColor::INT_OPAQUE_BLACK)
        .unnormalized_coordinates(false)
        .compare_enable(false)
        .compare_op(vk::CompareOp::ALWAYS)
        .mipmap_mode(vk::SamplerMipmapMode::LINEAR);

    let sampler = unsafe { gpu.device().create_sampler(&sampler_info, None)? };
    Ok(sampler)
}
