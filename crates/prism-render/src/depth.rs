//! Depth buffer management.

use ash::vk;
use gpu_allocator::MemoryLocation;
use prism_gpu::error::{GpuError, Result};
use prism_gpu::texture::create_image_view;
use prism_gpu::{GpuContext, GpuImage};

/// Depth formats tried in order of preference.
pub const DEPTH_FORMAT_PREFERENCES: [vk::Format; 3] = [
    vk::Format::D32_SFLOAT,
    vk::Format::D32_SFLOAT_S8_UINT,
    vk::Format::D24_UNORM_S8_UINT,
];

/// First-match search over the preference list.
///
/// `supported` reports whether a format supports optimal-tiling depth
/// attachments on the current device.
pub fn select_depth_format(supported: impl Fn(vk::Format) -> bool) -> Result<vk::Format> {
    DEPTH_FORMAT_PREFERENCES
        .iter()
        .copied()
        .find(|&format| supported(format))
        .ok_or_else(|| GpuError::NoSupportedFormat("depth attachment".to_string()))
}

/// Pick the device's depth format.
pub fn find_depth_format(gpu: &GpuContext) -> Result<vk::Format> {
    select_depth_format(|format| {
        let props = unsafe {
            gpu.instance()
                .get_physical_device_format_properties(gpu.physical_device(), format)
        };
        props
            .optimal_tiling_features
            .contains(vk::FormatFeatureFlags::DEPTH_STENCIL_ATTACHMENT)
    })
}

/// Depth image plus view, recreated with the swapchain.
pub struct DepthBuffer {
    image: GpuImage,
    view: vk::ImageView,
    format: vk::Format,
}

impl DepthBuffer {
    /// Create a depth buffer matching the swapchain extent, in the format
    /// the render pass was built with.
    pub fn new(gpu: &GpuContext, extent: vk::Extent2D, format: vk::Format) -> Result<Self> {
        let image_info = vk::ImageCreateInfo::default()
            .image_type(vk::ImageType::TYPE_2D)
            .extent(vk::Extent3D {
                width: extent.width,
                height: extent.height,
                depth: 1,
            })
            .mip_levels(1)
            .array_layers(1)
            .format(format)
            .tiling(vk::ImageTiling::OPTIMAL)
            .initial_layout(vk::ImageLayout::UNDEFINED)
            .usage(vk::ImageUsageFlags::DEPTH_STENCIL_ATTACHMENT)
            .samples(vk::SampleCountFlags::TYPE_1)
            .sharing_mode(vk::SharingMode::EXCLUSIVE);

        let image =
            gpu.allocator()
                .lock()
                .create_image(&image_info, MemoryLocation::GpuOnly, "depth buffer")?;

        let view = unsafe {
            create_image_view(
                gpu.device(),
                image.image,
                format,
                vk::ImageAspectFlags::DEPTH,
            )?
        };

        Ok(Self {
            image,
            view,
            format,
        })
    }

    /// The depth image view.
    pub fn view(&self) -> vk::ImageView {
        self.view
    }

    /// The selected depth format.
    pub fn format(&self) -> vk::Format {
        self.format
    }

    /// Destroy the view, image and allocation. Safe to call twice.
    pub fn destroy(&mut self, gpu: &GpuContext) {
        unsafe {
            if self.view != vk::ImageView::null() {
                gpu.device().destroy_image_view(self.view, None);
                self.view = vk::ImageView::null();
            }
        }
        let _ = gpu.allocator().lock().free_image(&mut self.image);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_supported_format() {
        let format = select_depth_format(|f| f == vk::Format::D24_UNORM_S8_UINT).unwrap();
        assert_eq!(format, vk::Format::D24_UNORM_S8_UINT);

        // Earlier preferences win when several are supported
        let format = select_depth_format(|_| true).unwrap();
        assert_eq!(format, vk::Format::D32_SFLOAT);
    }

    #[test]
    fn errors_when_nothing_matches() {
        assert!(select_depth_format(|_| false).is_err());
    }
}
