//! Swapchain lifecycle management for the Prism exercises.
//!
//! The centerpiece is [`Swapchain`], which owns the presentable image chain
//! and every resource whose lifetime is tied to it, drives the per-frame
//! acquire/submit/present protocol, and rebuilds itself when the surface
//! goes stale. Exercises plug in through the [`RenderScene`] trait.

pub mod depth;
pub mod descriptors;
pub mod pacer;
pub mod pipeline;
pub mod render_pass;
pub mod scene;
pub mod shader;
pub mod swapchain;
pub mod uniforms;

pub use pacer::{FramePacer, FRAMES_IN_FLIGHT};
pub use scene::{RenderScene, SwapchainDesc};
pub use swapchain::{Swapchain, SwapchainInfo};
pub use uniforms::UniformSet;
