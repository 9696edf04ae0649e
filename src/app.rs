use rand::rngs::ThreadRng;
use rand::Rng;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::{
    CELL_SIZE, DRIZZLE_PROBABILITY, DRIZZLE_RADIUS, DRIZZLE_STRENGTH, EXCITE_RADIUS,
    EXCITE_STRENGTH, GRID_HEIGHT, GRID_WIDTH,
};
use crate::gpu::{FieldBuffers, GpuContext, RenderPipeline};
use crate::simulation::{FieldResult, Impulse, Shape, WaveField, WaveParams};

/// Attempts at finding a medium cell for a random drop before giving up
const DRIZZLE_TRIES: usize = 64;

/// Everything that only exists once a window is up
struct Graphics {
    window: Arc<Window>,
    gpu: GpuContext,
    buffers: FieldBuffers,
    pipeline: RenderPipeline,
    bind_group: wgpu::BindGroup,
}

/// Application state
pub struct App {
    graphics: Option<Graphics>,
    field: WaveField,
    shape: Shape,
    shape_index: usize,
    pointer: Option<PhysicalPosition<f64>>,
    mouse_down: bool,
    paused: bool,
    drizzle: bool,
    rng: ThreadRng,
    fps_counter: FpsCounter,
}

impl App {
    pub fn new() -> FieldResult<Self> {
        let shape = Shape::preset(0, GRID_WIDTH, GRID_HEIGHT);
        let field = build_field(shape)?;

        Ok(Self {
            graphics: None,
            field,
            shape,
            shape_index: 0,
            pointer: None,
            mouse_down: false,
            paused: false,
            drizzle: false,
            rng: rand::thread_rng(),
            fps_counter: FpsCounter::new(),
        })
    }

    /// Drive the field for one frame: input, optional drop, one step
    fn advance(&mut self) {
        if self.paused {
            return;
        }

        if self.mouse_down {
            if let Some(graphics) = &self.graphics {
                let size = graphics.window.inner_size();
                if let Some((x, y)) = self.pointer.and_then(|p| {
                    window_to_lattice(p, size.width, size.height, GRID_WIDTH, GRID_HEIGHT)
                }) {
                    self.field.excite(x, y, EXCITE_STRENGTH, EXCITE_RADIUS);
                }
            }
        }

        if self.drizzle && self.rng.gen::<f64>() < DRIZZLE_PROBABILITY {
            self.drop_random();
        }

        self.field.step();
    }

    /// Excite a random cell inside the medium
    fn drop_random(&mut self) {
        for _ in 0..DRIZZLE_TRIES {
            let x = self.rng.gen_range(0..GRID_WIDTH) as isize;
            let y = self.rng.gen_range(0..GRID_HEIGHT) as isize;
            if self.field.is_inside(x, y) {
                self.field
                    .excite(x as f64, y as f64, DRIZZLE_STRENGTH, DRIZZLE_RADIUS);
                return;
            }
        }
        log::debug!("No medium cell found for a drop this frame");
    }

    fn render(&mut self) {
        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };
        let gpu = &graphics.gpu;

        graphics.buffers.upload_heights(&gpu.queue, &self.field);
        graphics.buffers.update_render_params(&gpu.queue, self.paused);

        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        graphics.pipeline.draw(&mut encoder, &view, &graphics.bind_group);

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if let Some(fps) = self.fps_counter.tick() {
            let mut title = format!(
                "Wave Pond - {:.0} FPS - {}",
                fps,
                self.shape.name()
            );
            if self.paused {
                title.push_str(" [paused]");
            }
            if self.drizzle {
                title.push_str(" [drizzle]");
            }
            graphics.window.set_title(&title);
            log::trace!(
                "step {} energy {:.3} max |h| {:.3}",
                self.field.steps(),
                self.field.energy(),
                self.field.max_abs_height()
            );
        }
    }

    /// Swap in a new membrane shape. The field restarts from rest.
    fn select_shape(&mut self, index: usize) {
        if index == self.shape_index {
            log::debug!("Shape {} already active", self.shape.name());
            return;
        }
        let shape = Shape::preset(index, GRID_WIDTH, GRID_HEIGHT);
        let field = match build_field(shape) {
            Ok(field) => field,
            Err(e) => {
                log::warn!("Keeping current shape, could not build {}: {}", shape.name(), e);
                return;
            }
        };

        self.field = field;
        self.shape = shape;
        self.shape_index = index;

        if let Some(graphics) = self.graphics.as_mut() {
            let gpu = &graphics.gpu;
            graphics.buffers = FieldBuffers::new(&gpu.device, &gpu.queue, &self.field);
            graphics.bind_group = graphics
                .pipeline
                .create_bind_group(&gpu.device, &graphics.buffers);
        }

        log::info!(
            "Switched to {} membrane ({} medium cells)",
            shape.name(),
            self.field.medium_cell_count()
        );
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Space => {
                self.paused = !self.paused;
                log::info!("Simulation {}", if self.paused { "paused" } else { "resumed" });
            }

            KeyCode::KeyR => {
                self.field.reset();
                log::info!("Field reset");
            }

            KeyCode::KeyI => {
                let impulse = match self.field.params().impulse {
                    Impulse::Height => Impulse::Velocity,
                    Impulse::Velocity => Impulse::Height,
                };
                self.field.set_impulse(impulse);
                log::info!("Clicks now push on {:?}", impulse);
            }

            KeyCode::KeyD => {
                self.drizzle = !self.drizzle;
                log::info!("Drizzle: {}", if self.drizzle { "ON" } else { "OFF" });
            }

            KeyCode::Digit1 => self.select_shape(0),
            KeyCode::Digit2 => self.select_shape(1),
            KeyCode::Digit3 => self.select_shape(2),
            KeyCode::Digit4 => self.select_shape(3),

            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        log::info!("Initializing wave pond...");
        log::info!("Lattice: {}x{} ({})", GRID_WIDTH, GRID_HEIGHT, self.shape.name());

        let window_attrs = Window::default_attributes()
            .with_title("Wave Pond - Initializing...")
            .with_inner_size(winit::dpi::PhysicalSize::new(
                GRID_WIDTH * CELL_SIZE,
                GRID_HEIGHT * CELL_SIZE,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        log::info!("Creating GPU context...");
        let gpu = match pollster::block_on(GpuContext::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let buffers = FieldBuffers::new(&gpu.device, &gpu.queue, &self.field);
        let pipeline = RenderPipeline::new(&gpu.device, gpu.format());
        let bind_group = pipeline.create_bind_group(&gpu.device, &buffers);

        log::info!("Initialization complete!");
        log::info!("Controls:");
        log::info!("  Left mouse (hold): Make waves");
        log::info!("  Space: Pause/resume");
        log::info!("  R: Reset field");
        log::info!("  D: Toggle drizzle");
        log::info!("  I: Toggle height/velocity impulses");
        log::info!("  1-4: Circle / ellipse / rectangle / annulus");
        log::info!("  Escape: Quit");

        window.request_redraw();
        self.graphics = Some(Graphics {
            window,
            gpu,
            buffers,
            pipeline,
            bind_group,
        });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = Some(position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer = None;
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.mouse_down = state == ElementState::Pressed;
            }
            WindowEvent::Resized(new_size) => {
                if let Some(graphics) = &mut self.graphics {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    graphics.gpu.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.advance();
                self.render();
                if let Some(graphics) = &self.graphics {
                    graphics.window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn build_field(shape: Shape) -> FieldResult<WaveField> {
    WaveField::from_shape(
        GRID_WIDTH as usize,
        GRID_HEIGHT as usize,
        shape,
        WaveParams::default(),
    )
}

/// Map a cursor position to the lattice cell under it, or None off-window.
///
/// The lattice is stretched over the whole window, so this follows resizes.
fn window_to_lattice(
    position: PhysicalPosition<f64>,
    window_width: u32,
    window_height: u32,
    grid_width: u32,
    grid_height: u32,
) -> Option<(f64, f64)> {
    if window_width == 0 || window_height == 0 {
        return None;
    }
    let u = position.x / window_width as f64;
    let v = position.y / window_height as f64;
    if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
        return None;
    }
    Some((
        (u * grid_width as f64).floor(),
        (v * grid_height as f64).floor(),
    ))
}

/// Simple FPS counter
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Tick the counter, returns Some(fps) every second
    fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}
