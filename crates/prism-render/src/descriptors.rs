//! Descriptor layout, pool and set management.

use ash::vk;
use prism_gpu::error::Result;

/// Pool sizes for the declared bindings, one set per swapchain image.
///
/// An empty binding list yields no sizes; the caller then skips pool and set
/// creation entirely.
pub fn pool_sizes(
    bindings: &[vk::DescriptorSetLayoutBinding<'_>],
    image_count: u32,
) -> Vec<vk::DescriptorPoolSize> {
    bindings
        .iter()
        .map(|binding| {
            vk::DescriptorPoolSize::default()
                .ty(binding.descriptor_type)
                .descriptor_count(binding.descriptor_count * image_count)
        })
        .collect()
}

/// Create a descriptor set layout from the scene's bindings.
///
/// # Safety
/// The device must be valid.
pub unsafe fn create_layout(
    device: &ash::Device,
    bindings: &[vk::DescriptorSetLayoutBinding<'_>],
) -> Result<vk::DescriptorSetLayout> {
    let layout_info = vk::DescriptorSetLayoutCreateInfo::default().bindings(bindings);
    let layout = unsafe { device.create_descriptor_set_layout(&layout_info, None)? };
    Ok(layout)
}

/// Create a descriptor pool sized for `max_sets` sets.
///
/// # Safety
/// The device must be valid; `sizes` must be non-empty.
pub unsafe fn create_pool(
    device: &ash::Device,
    sizes: &[vk::DescriptorPoolSize],
    max_sets: u32,
) -> Result<vk::DescriptorPool> {
    let create_info = vk::DescriptorPoolCreateInfo::default()
        .max_sets(max_sets)
        .pool_sizes(sizes);

    let pool = unsafe { device.create_descriptor_pool(&create_info, None)? };
    Ok(pool)
}

/// Allocate one descriptor set per swapchain image.
///
/// # Safety
/// The device, pool and layout must be valid.
pub unsafe fn allocate_sets(
    device: &ash::Device,
    pool: vk::DescriptorPool,
    layout: vk::DescriptorSetLayout,
    count: u32,
) -> Result<Vec<vk::DescriptorSet>> {
    let layouts = vec![layout; count as usize];
    let alloc_info = vk::DescriptorSetAllocateInfo::default()
        .descriptor_pool(pool)
        .set_layouts(&layouts);

    let sets = unsafe { device.allocate_descriptor_sets(&alloc_info)? };
    Ok(sets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bindings_yield_no_pool_sizes() {
        assert!(pool_sizes(&[], 3).is_empty());
    }

    #[test]
    fn sizes_scale_with_image_count() {
        let bindings = [
            vk::DescriptorSetLayoutBinding::default()
                .binding(0)
                .descriptor_type(vk::DescriptorType::UNIFORM_BUFFER)
                .descriptor_count(1),
            vk::DescriptorSetLayoutBinding::default()
                .binding(1)
                .descriptor_type(vk::DescriptorType::COMBINED_IMAGE_SAMPLER)
                .descriptor_count(1),
        ];

        let sizes = pool_sizes(&bindings, 3);
        assert_eq!(sizes.len(), 2);
        assert_eq!(sizes[0].ty, vk::DescriptorType::UNIFORM_BUFFER);
        assert_eq!(sizes[0].descriptor_count, 3);
        assert_eq!(sizes[1].ty, vk::DescriptorType::COMBINED_IMAGE_SAMPLER);
        assert_eq!(sizes[1].descriptor_count, 3);
    }
}
