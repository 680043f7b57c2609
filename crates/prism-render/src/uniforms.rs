//! Per-image uniform buffers.

use ash::vk;
use bytemuck::Pod;
use gpu_allocator::MemoryLocation;
use prism_gpu::error::Result;
use prism_gpu::{GpuBuffer, GpuContext};
use std::marker::PhantomData;

/// One host-visible uniform buffer per swapchain image.
///
/// Allocated in a scene's `init_render_entries` and released in
/// `clear_render_entries`, so the buffer count always tracks the negotiated
/// image count across swapchain rebuilds.
pub struct UniformSet<T: Pod> {
    buffers: Vec<GpuBuffer>,
    _marker: PhantomData<T>,
}

impl<T: Pod> UniformSet<T> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            buffers: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Allocate `count` uniform buffers, replacing any previous set.
    pub fn init(&mut self, gpu: &GpuContext, count: usize) -> Result<()> {
        self.clear(gpu);

        let size = std::mem::size_of::<T>() as u64;
        let mut allocator = gpu.allocator().lock();
        for index in 0..count {
            self.buffers.push(allocator.create_buffer(
                size,
                vk::BufferUsageFlags::UNIFORM_BUFFER,
                MemoryLocation::CpuToGpu,
                &format!("uniforms[{index}]"),
            )?);
        }

        Ok(())
    }

    /// Number of buffers in the set.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Write `value` into the buffer for one image slot.
    pub fn write(&self, index: usize, value: &T) -> Result<()> {
        self.buffers[index].write(std::slice::from_ref(value))
    }

    /// Descriptor info for binding one buffer.
    pub fn buffer_info(&self, index: usize) -> vk::DescriptorBufferInfo {
        vk::DescriptorBufferInfo::default()
            .buffer(self.buffers[index].buffer)
            .offset(0)
            .range(std::mem::size_of::<T>() as u64)
    }

    /// Free all buffers. Safe to call twice.
    pub fn clear(&mut self, gpu: &GpuContext) {
        let mut allocator = gpu.allocator().lock();
        for buffer in &mut self.buffers {
            let _ = allocator.free_buffer(buffer);
        }
        self.buffers.clear();
    }
}

impl<T: Pod> Default for UniformSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
