//! Application framework for the Prism exercises.
//!
//! Each exercise binary implements [`Exercise`] (which extends
//! [`prism_render::RenderScene`]) and calls [`run`] with an [`AppConfig`].
//! The framework owns the window, event loop, GPU context, command pool and
//! swapchain; the exercise supplies mesh data, shaders, descriptor layout
//! and per-frame updates.

mod config;
mod runner;

pub use config::AppConfig;
pub use runner::{run, Exercise};
