//! Exercise runner and event loop.

use std::sync::Arc;
use std::time::Instant;

use ash::vk;
use anyhow::Context as _;
use prism_gpu::{CommandPool, GpuContext, GpuContextBuilder, SurfaceContext};
use prism_render::{RenderScene, Swapchain, SwapchainDesc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::AppConfig;

/// A standalone exercise.
///
/// Implementors supply the mesh, shaders and per-frame behavior; the runner
/// owns the window, GPU context, command pool and swapchain and drives the
/// poll + draw loop.
pub trait Exercise: RenderScene + Sized {
    /// Create the exercise's own resources (textures, models, initial state).
    fn init(gpu: &GpuContext, pool: &CommandPool) -> anyhow::Result<Self>;

    /// Mesh data and shader paths for the swapchain build.
    fn swapchain_desc(&self) -> SwapchainDesc;

    /// Advance animation state. Runs once per frame, before the draw.
    #[allow(unused_variables)]
    fn update(
        &mut self,
        gpu: &GpuContext,
        swapchain: &mut Swapchain,
        dt: f32,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    /// Observe raw window events (mouse input and the like).
    #[allow(unused_variables)]
    fn on_window_event(&mut self, event: &WindowEvent) {}

    /// Release the exercise's own resources. The device is idle.
    #[allow(unused_variables)]
    fn destroy(&mut self, gpu: &GpuContext) {}
}

/// Run an exercise to completion.
///
/// Initializes logging, creates the window and every GPU component, then
/// polls events until the window closes or a frame fails. Cleanup runs on
/// both paths; a failed frame is returned as the process error.
pub fn run<E: Exercise + 'static>(config: AppConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("{} starting", config.title);

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut runner = Runner::<E> {
        config,
        state: None,
        failure: None,
    };

    event_loop.run_app(&mut runner).context("Event loop error")?;

    match runner.failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct Runner<E: Exercise> {
    config: AppConfig,
    state: Option<State<E>>,
    failure: Option<anyhow::Error>,
}

struct State<E: Exercise> {
    window: Arc<Window>,
    gpu: GpuContext,
    surface: SurfaceContext,
    pool: CommandPool,
    swapchain: Swapchain,
    exercise: E,
    last_frame: Instant,
}

impl<E: Exercise + 'static> ApplicationHandler for Runner<E> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match self.create_state(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                error!("Initialization failed: {err:#}");
                self.failure = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            state.exercise.on_window_event(&event);
        }

        match event {
            WindowEvent::CloseRequested => {
                if let Some(mut state) = self.state.take() {
                    state.cleanup();
                }
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let failed = self
                    .state
                    .as_mut()
                    .and_then(|state| state.frame().err());
                if let Some(err) = failed {
                    error!("Frame failed: {err:#}");
                    if let Some(mut state) = self.state.take() {
                        state.cleanup();
                    }
                    self.failure = Some(err);
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(_) => {
                // Teardown must wait for the gap between frames; just flag it
                if let Some(state) = &mut self.state {
                    state.swapchain.request_resize();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

impl<E: Exercise + 'static> Runner<E> {
    fn create_state(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<State<E>> {
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let gpu = GpuContextBuilder::new()
            .app_name(&self.config.title)
            .validation(self.config.validation)
            .build()?;

        let surface = unsafe { SurfaceContext::from_window(&gpu, window.as_ref())? };
        let pool = unsafe { CommandPool::new(gpu.device(), gpu.graphics_queue_family())? };

        let mut exercise = E::init(&gpu, &pool)?;
        let desc = exercise.swapchain_desc();
        let swapchain = Swapchain::new(
            &gpu,
            &surface,
            &pool,
            &mut exercise,
            desc,
            window_extent(&window),
        )?;

        Ok(State {
            window,
            gpu,
            surface,
            pool,
            swapchain,
            exercise,
            last_frame: Instant::now(),
        })
    }
}

impl<E: Exercise> State<E> {
    fn frame(&mut self) -> anyhow::Result<()> {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.exercise.update(&self.gpu, &mut self.swapchain, dt)?;

        self.swapchain.draw_frame(
            &self.gpu,
            &self.surface,
            &mut self.exercise,
            window_extent(&self.window),
        )?;

        Ok(())
    }

    fn cleanup(&mut self) {
        info!("Shutting down");

        if let Err(err) = self.gpu.wait_idle() {
            error!("Device wait failed during shutdown: {err}");
        }

        self.swapchain
            .destroy(&self.gpu, &self.surface, &mut self.exercise);
        self.exercise.destroy(&self.gpu);

        unsafe {
            self.pool.destroy(self.gpu.device());
            self.surface.destroy();
        }
        // GpuContext releases the allocator, device and instance on drop
    }
}

fn window_extent(window: &Window) -> vk::Extent2D {
    let size = window.inner_size();
    vk::Extent2D {
        width: size.width,
        height: size.height,
    }
}
