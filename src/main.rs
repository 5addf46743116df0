mod animation;
mod capture;
mod graphics;
mod input;
mod math;
mod picker;
mod scene;
mod state;

use std::path::Path;
use std::time::{Duration, Instant};

use pixels::{Pixels, SurfaceTexture};
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::input::{Effect, InputEvent, Key, MouseButton};
use crate::math::Point;
use crate::state::{AppState, BG_COLOR, HEIGHT, TARGET_FPS, WIDTH};

struct App {
    window: Option<&'static Window>,
    pixels: Option<Pixels<'static>>,
    state: AppState,
    cursor: Point,
    last_frame: Instant,
    frames_since_fps_update: u32,
    last_fps_update: Instant,
    fps: f64,
}

impl App {
    fn new() -> Self {
        App {
            window: None,
            pixels: None,
            state: AppState::new(),
            cursor: Point::new(0.0, 0.0),
            last_frame: Instant::now(),
            frames_since_fps_update: 0,
            last_fps_update: Instant::now(),
            fps: 0.0,
        }
    }

    /// Runs one input event through the reducer and executes any effect
    fn dispatch(&mut self, event: InputEvent) {
        if let Some(Effect::SaveScreenshot) = input::apply(&mut self.state, &event) {
            if let Some(pixels) = &self.pixels {
                match capture::save_screenshot(
                    pixels.frame(),
                    WIDTH,
                    HEIGHT,
                    Path::new(capture::SCREENSHOT_DIR),
                ) {
                    Ok(path) => info!(path = %path.display(), "screenshot saved"),
                    Err(err) => warn!(%err, "screenshot failed"),
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = frame_start;

        animation::step(&mut self.state, dt);

        self.frames_since_fps_update += 1;
        let elapsed = self.last_fps_update.elapsed().as_secs_f64();
        if elapsed >= 1.0 {
            self.fps = self.frames_since_fps_update as f64 / elapsed;
            self.frames_since_fps_update = 0;
            self.last_fps_update = Instant::now();
        }

        if let Some(pixels) = &mut self.pixels {
            let frame = pixels.frame_mut();
            graphics::fill(frame, BG_COLOR);
            scene::render(frame, WIDTH, HEIGHT, &self.state, self.fps);
            if let Err(err) = pixels.render() {
                error!(%err, "surface render failed");
                event_loop.exit();
                return;
            }
        }

        // sleep off the rest of the frame budget to cap at the target rate
        let budget = Duration::from_secs_f64(1.0 / TARGET_FPS);
        if let Some(rest) = budget.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
        if let Some(window) = self.window {
            window.request_redraw();
        }
    }
}

/// Maps a pressed key to a sandbox action key
fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::KeyC => Some(Key::C),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyP => Some(Key::P),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::KeyT => Some(Key::T),
        _ => None,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.pixels.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title("Shapepad - Drawing Shapes")
            .with_inner_size(LogicalSize::new(WIDTH, HEIGHT))
            .with_resizable(false);

        let window = match event_loop.create_window(attrs) {
            Ok(window) => &*Box::leak(Box::new(window)),
            Err(err) => {
                error!(%err, "failed to create window");
                event_loop.exit();
                return;
            }
        };
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, window);
        let pixels = match Pixels::new(WIDTH, HEIGHT, surface) {
            Ok(pixels) => pixels,
            Err(err) => {
                error!(%err, "failed to acquire render surface");
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.pixels = Some(pixels);
        self.last_frame = Instant::now();
        self.last_fps_update = Instant::now();
        window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.dispatch(InputEvent::Quit),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        if let Some(key) = map_key(code) {
                            self.dispatch(InputEvent::KeyPress(key));
                        }
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let mapped = match button {
                    winit::event::MouseButton::Left => Some(MouseButton::Left),
                    winit::event::MouseButton::Right => Some(MouseButton::Right),
                    _ => None,
                };
                if let Some(button) = mapped {
                    let pos = self.cursor;
                    match state {
                        ElementState::Pressed => {
                            self.dispatch(InputEvent::MouseDown { button, pos });
                        }
                        ElementState::Released => {
                            self.dispatch(InputEvent::MouseUp { pos });
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Point::new(position.x, position.y);
                self.dispatch(InputEvent::MouseMove { pos: self.cursor });
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }

        if !self.state.running {
            event_loop.exit();
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            error!(%err, "failed to create event loop");
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new();
    if let Err(err) = event_loop.run_app(&mut app) {
        error!(%err, "event loop failed");
        std::process::exit(1);
    }
}
