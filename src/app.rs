use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::Settings;
use crate::controller::{FrameClock, FrameLoop, FrameStats, InputState};
use crate::error::StartupError;
use crate::model::{margin, TRIANGLE};
use crate::view::{GpuContext, ShaderSources, SurfaceErrorAction, TriangleRenderer};

/// Open the window and run the frame loop until a close is requested.
pub fn run(settings: Settings) -> Result<(), StartupError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(settings);
    event_loop.run_app(&mut app)?;

    match app.startup_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Everything that exists once setup succeeded.
struct Running {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: TriangleRenderer,
    input: InputState,
    frame_loop: FrameLoop,
    clock: FrameClock,
    stats: FrameStats,
    /// Zero-sized framebuffer; drawing resumes on the next non-zero resize.
    minimized: bool,
    should_close: bool,
}

pub struct App {
    settings: Settings,
    running: Option<Running>,
    startup_error: Option<StartupError>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            running: None,
            startup_error: None,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running, StartupError> {
        let settings = &self.settings;
        let attrs = Window::default_attributes()
            .with_title(settings.window.title.clone())
            .with_inner_size(LogicalSize::new(settings.window.width, settings.window.height));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let shaders = ShaderSources::load(&settings.vertex_shader_path(), &settings.fragment_shader_path())?;
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;
        let renderer = TriangleRenderer::new(
            &gpu.device,
            gpu.format,
            &shaders,
            &TRIANGLE,
            settings.clear_color(),
            gpu.size(),
        )?;

        let margin = margin(&TRIANGLE);
        tracing::info!(
            width = gpu.config.width,
            height = gpu.config.height,
            margin,
            "window ready"
        );

        Ok(Running {
            window,
            gpu,
            renderer,
            input: InputState::new(settings.bindings.clone()),
            frame_loop: FrameLoop::new(settings.motion, margin),
            clock: FrameClock::new(),
            stats: FrameStats::default(),
            minimized: false,
            should_close: false,
        })
    }
}

impl Running {
    fn redraw(&mut self) {
        let dt = self.clock.tick();
        if let Some(fps) = self.stats.record(dt) {
            tracing::debug!(fps, "frame rate");
        }

        let out = self.frame_loop.step(&self.input, dt);
        let pose = self.frame_loop.pose;
        tracing::trace!(x = pose.x, y = pose.y, angle = pose.angle, dt, "pose");

        if out.exit_requested {
            self.should_close = true;
        }

        if self.minimized {
            return;
        }

        let result = self
            .renderer
            .draw_frame(&self.gpu.device, &self.gpu.queue, &self.gpu.surface, out.model);
        if let Err(err) = result {
            match self.gpu.handle_surface_error(err.clone()) {
                SurfaceErrorAction::Reconfigured => tracing::debug!("surface reconfigured"),
                SurfaceErrorAction::SkipFrame => tracing::warn!("skipping frame: {err}"),
                SurfaceErrorAction::Fatal => {
                    tracing::error!("surface error: {err}");
                    self.should_close = true;
                }
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                self.running = Some(running);
            }
            Err(err) => {
                self.startup_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };
        if running.window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                running.should_close = true;
            }
            WindowEvent::Resized(size) => {
                running.minimized = !running.gpu.resize(size);
                if !running.minimized {
                    running.renderer.set_viewport(size);
                    tracing::debug!(width = size.width, height = size.height, "framebuffer resized");
                }
            }
            WindowEvent::Focused(false) => {
                running.input.clear_keys();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                running.input.process_key_event(&event);
            }
            WindowEvent::RedrawRequested => {
                running.redraw();
            }
            _ => {}
        }

        if running.should_close {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = self.running.as_ref() else {
            return;
        };
        if running.should_close {
            event_loop.exit();
            return;
        }
        event_loop.set_control_flow(ControlFlow::Wait);
        running.window.request_redraw();
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = self.running.take() {
            running.renderer.destroy();
            tracing::info!("shut down");
        }
    }
}
