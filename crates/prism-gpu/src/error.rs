//! GPU error types.

use ash::vk;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the GPU and rendering layers.
///
/// Every native-API failure is converted into one of these immediately at the
/// call site and propagated; nothing is retried.
#[derive(Error, Debug)]
pub enum GpuError {
    /// Vulkan error.
    #[error("Vulkan error: {0}")]
    Vulkan(#[from] vk::Result),

    /// No physical device with a graphics queue was found.
    #[error("No suitable GPU found")]
    NoSuitableDevice,

    /// The graphics queue family cannot present to the window surface.
    #[error("Graphics queue family cannot present to this surface")]
    PresentNotSupported,

    /// Surface creation failed.
    #[error("Surface creation failed: {0}")]
    SurfaceCreation(String),

    /// Swapchain creation failed.
    #[error("Swapchain creation failed: {0}")]
    SwapchainCreation(String),

    /// Memory allocation failed.
    #[error("Memory allocation failed: {0}")]
    AllocationFailed(String),

    /// Shader bytecode could not be read from disk.
    #[error("Failed to read shader {}: {source}", path.display())]
    ShaderLoad {
        /// Path of the missing or unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Shader bytecode was readable but not valid SPIR-V.
    #[error("Invalid SPIR-V in {}: {message}", path.display())]
    ShaderInvalid {
        /// Path of the offending file.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// Pipeline creation failed.
    #[error("Pipeline creation failed: {0}")]
    PipelineCreation(String),

    /// A texture or model file could not be loaded.
    #[error("Failed to load asset {}: {message}", path.display())]
    AssetLoad {
        /// Path of the asset.
        path: PathBuf,
        /// Message from the decoding library.
        message: String,
    },

    /// No format in a preference list was supported.
    #[error("No supported format found: {0}")]
    NoSupportedFormat(String),

    /// Invalid state.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, GpuError>;
