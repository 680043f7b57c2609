//! Vulkan utility layer for the Prism exercises.
//!
//! This crate wraps the device-level boilerplate the exercises share:
//! - instance and logical device creation (`GpuContext`)
//! - window surface management (`SurfaceContext`)
//! - command pool and one-shot submission helpers
//! - memory allocation via gpu-allocator
//! - sampled textures with synchronous staged upload

pub mod command;
pub mod context;
pub mod error;
pub mod instance;
pub mod memory;
pub mod surface;
pub mod sync;
pub mod texture;

pub use command::CommandPool;
pub use context::{GpuContext, GpuContextBuilder};
pub use error::{GpuError, Result};
pub use memory::{GpuAllocator, GpuBuffer, GpuImage};
pub use surface::{SurfaceContext, SurfaceSupport};
pub use texture::Texture;
