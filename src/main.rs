//! Constellation: ambient particle-field background animation.
//!
//! Mount-to-start, close-to-stop: the event loop advances the field and
//! renders once per display frame until the window is closed.

use field_renderer::{FieldRenderer, InitError};
use field_simulation::{FieldParams, ParticleField};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    field: ParticleField,
    renderer: FieldRenderer,

    start_time: Instant,
    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
}

impl GpuState {
    async fn new(window: Arc<Window>) -> Result<Self, InitError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let field = ParticleField::new(
            size.width,
            size.height,
            FieldParams::default(),
            &mut rand::rng(),
        );
        log::info!(
            "✓ Initialized {} particles for {}x{}",
            field.len(),
            size.width,
            size.height
        );

        let renderer = FieldRenderer::new(&device, &config, field.len());
        log::info!("✓ Renderer initialized");

        let now = Instant::now();
        Ok(Self {
            surface,
            device,
            queue,
            config,
            field,
            renderer,
            start_time: now,
            frame_times: VecDeque::with_capacity(100),
            last_frame_time: now,
        })
    }

    /// Reconfigure the surface and respawn the whole field at the new
    /// dimensions. The running loop is untouched; the next scheduled frame
    /// simply renders the fresh set.
    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.field
                .repopulate(new_size.width, new_size.height, &mut rand::rng());
        }
    }

    /// One frame: advance the simulation, then draw it.
    fn render(&mut self) -> Result<f32, wgpu::SurfaceError> {
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32() * 1000.0;
        self.last_frame_time = now;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > 100 {
            self.frame_times.pop_front();
        }

        self.field.step();

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.render(
            &self.device,
            &self.queue,
            &view,
            self.field.particles(),
            (self.config.width, self.config.height),
            self.start_time.elapsed().as_secs_f32(),
        );

        output.present();

        let avg_frame_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        Ok(1000.0 / avg_frame_time)
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    exiting: bool,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attributes = Window::default_attributes()
                .with_title("Constellation")
                .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

            let window = Arc::new(event_loop.create_window(window_attributes).unwrap());

            // Pure decoration: let pointer input fall through to whatever
            // sits underneath, where the platform supports it.
            if let Err(e) = window.set_cursor_hittest(false) {
                log::debug!("cursor pass-through unavailable: {e}");
            }

            self.window = Some(window.clone());

            // A missing GPU only costs the decoration, never the app: keep
            // running with no state and draw nothing.
            match pollster::block_on(GpuState::new(window)) {
                Ok(state) => self.gpu_state = Some(state),
                Err(e) => log::warn!("renderer unavailable, running without drawing: {e}"),
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.exiting = true;
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) {
                    match gpu_state.render() {
                        Ok(fps) => {
                            window.set_title(&format!(
                                "Constellation - {:.0} FPS - {} particles",
                                fps,
                                gpu_state.field.len()
                            ));
                        }
                        Err(wgpu::SurfaceError::Lost) => gpu_state.resize(window.inner_size()),
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => log::error!("render error: {e:?}"),
                    }
                }
            }

            _ => {}
        }

        // Keep the loop spinning, but never past a stop: no frame may fire
        // once close has been requested.
        if !self.exiting {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

fn main() {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting constellation background...");

    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        window: None,
        gpu_state: None,
        exiting: false,
    };

    event_loop.run_app(&mut app).unwrap();
}
