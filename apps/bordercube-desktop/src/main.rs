use anyhow::Result;
use bordercube_core::{
    BackendError, FrameHooks, FrameLoop, FramePacer, LoopState, RecordingBackend,
    RotatingCubeRenderer, RunConfig,
};
use bordercube_render_wgpu::WgpuBackend;
use clap::Parser;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser, Debug)]
#[command(
    name = "bordercube-desktop",
    about = "Rotating color cube with darkened edges"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Target frames per second
    #[arg(long, default_value = "60")]
    framerate: f64,

    /// Frames to draw before exiting (0 runs until the window is closed)
    #[arg(long, default_value = "360")]
    framecount: u64,

    /// Initial window width in pixels
    #[arg(long, default_value = "512")]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value = "512")]
    height: u32,

    /// Run against a recording backend without opening a window
    #[arg(long)]
    headless: bool,
}

impl Cli {
    fn run_config(&self) -> Result<RunConfig> {
        if !(self.framerate.is_finite() && self.framerate > 0.0) {
            anyhow::bail!("--framerate must be positive, got {}", self.framerate);
        }
        Ok(RunConfig {
            framerate: self.framerate,
            framecount: self.framecount,
        })
    }
}

/// Window and the renderer drawing into it.
struct Gpu {
    window: Arc<Window>,
    renderer: RotatingCubeRenderer<WgpuBackend>,
}

struct CubeApp {
    initial_size: PhysicalSize<u32>,
    gpu: Option<Gpu>,
    frames: FrameLoop,
    pacer: FramePacer,
    next_frame: Instant,
    last_frame: Instant,
    error: Option<anyhow::Error>,
}

impl CubeApp {
    fn new(config: &RunConfig, initial_size: PhysicalSize<u32>) -> Self {
        let now = Instant::now();
        Self {
            initial_size,
            gpu: None,
            frames: FrameLoop::new(config),
            pacer: FramePacer::new(config.framerate),
            next_frame: now,
            last_frame: now,
            error: None,
        }
    }

    fn init_gpu(&self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let attrs = Window::default_attributes()
            .with_title("Color border cube")
            .with_inner_size(self.initial_size);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| BackendError::Surface(e.to_string()))?;

        let size = window.inner_size();
        let backend = WgpuBackend::new(
            &instance,
            surface,
            size.width,
            size.height,
            wgpu::Color::WHITE,
        )?;
        let (width, height) = backend.size();
        tracing::info!(
            format = ?backend.surface_format(),
            width,
            height,
            "surface configured"
        );

        let mut renderer = RotatingCubeRenderer::new(backend)?;
        renderer.on_init()?;
        renderer.on_resize(size.width, size.height)?;

        Ok(Gpu { window, renderer })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        tracing::error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for CubeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match self.init_gpu(event_loop) {
            Ok(gpu) => {
                let now = Instant::now();
                self.next_frame = now;
                self.last_frame = now;
                gpu.window.request_redraw();
                self.gpu = Some(gpu);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                let result = match &mut self.gpu {
                    Some(gpu) => gpu.renderer.on_resize(new_size.width, new_size.height),
                    None => Ok(()),
                };
                if let Err(e) = result {
                    self.fail(event_loop, e.into());
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.last_frame).as_secs_f32();
                self.last_frame = now;

                let Some(gpu) = &mut self.gpu else {
                    return;
                };
                match self.frames.step(&mut gpu.renderer, dt) {
                    Ok(LoopState::Running) => {}
                    Ok(LoopState::Finished) => event_loop.exit(),
                    Err(e) => self.fail(event_loop, e.into()),
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.frames.is_finished() {
            event_loop.exit();
            return;
        }
        let Some(gpu) = &self.gpu else {
            return;
        };

        let now = Instant::now();
        if now >= self.next_frame {
            gpu.window.request_redraw();
            self.next_frame = self.pacer.next_deadline(self.next_frame, now);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}

/// Drive the renderer through a full run without a window.
fn run_headless(
    config: &RunConfig,
    width: u32,
    height: u32,
) -> Result<RotatingCubeRenderer<RecordingBackend>> {
    if config.framecount == 0 {
        anyhow::bail!("headless runs need a non-zero --framecount");
    }

    let mut renderer = RotatingCubeRenderer::new(RecordingBackend::new())?;
    renderer.on_init()?;
    renderer.on_resize(width, height)?;

    let mut frames = FrameLoop::new(config);
    let dt = FramePacer::new(config.framerate).interval().as_secs_f32();
    while frames.step(&mut renderer, dt)? == LoopState::Running {}

    Ok(renderer)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = cli.run_config()?;
    tracing::info!(
        framerate = config.framerate,
        framecount = config.framecount,
        "bordercube-desktop starting"
    );

    if cli.headless {
        let renderer = run_headless(&config, cli.width, cli.height)?;
        let rotation = renderer.rotation();
        tracing::info!(
            frames = renderer.frames_drawn(),
            draw_calls = renderer.gfx().draw_count(),
            theta = rotation.theta,
            phi = rotation.phi,
            "headless run complete"
        );
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = CubeApp::new(&config, PhysicalSize::new(cli.width, cli.height));
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_demo_run() {
        let cli = Cli::try_parse_from(["bordercube-desktop"]).unwrap();
        assert_eq!(cli.run_config().unwrap(), RunConfig::default());
        assert_eq!((cli.width, cli.height), (512, 512));
        assert!(!cli.headless);
    }

    #[test]
    fn cli_rejects_non_positive_framerate() {
        let cli = Cli::try_parse_from(["bordercube-desktop", "--framerate", "0"]).unwrap();
        assert!(cli.run_config().is_err());
    }

    #[test]
    fn headless_run_stops_at_framecount() {
        let config = RunConfig {
            framerate: 60.0,
            framecount: 12,
        };
        let renderer = run_headless(&config, 800, 600).unwrap();
        assert_eq!(renderer.frames_drawn(), 12);
        assert_eq!(renderer.gfx().draw_count(), 12);
        assert_eq!(renderer.rotation().theta, 42.0);
        assert_eq!(renderer.rotation().phi, 28.0);
    }

    #[test]
    fn headless_run_requires_budget() {
        let config = RunConfig {
            framerate: 60.0,
            framecount: 0,
        };
        assert!(run_headless(&config, 512, 512).is_err());
    }
}
