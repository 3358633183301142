//! Winit graphical backend for twenty48.
//!
//! Renders the canvas as coloured text tiles in a native window using:
//! - [`winit`] for window creation and input events
//! - [`softbuffer`] for CPU-based pixel rendering
//! - [`fontdue`] for lightweight font rasterization
//!
//! # Usage
//!
//! ```rust,no_run
//! use twenty48_view::{AppRunner, EventLoopDriver};
//! use twenty48_winit::{WinitConfig, WinitDriver};
//!
//! let config = WinitConfig::default();
//! let driver = WinitDriver::new(config);
//! // let runner = AppRunner::new(Box::new(my_model), 31, 20);
//! // driver.run(runner).unwrap();
//! ```

mod error;
mod font;
mod input;
mod renderer;

use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::ModifiersState,
    window::{Window, WindowId},
};

use twenty48_view::{AppRunner, EventLoopDriver, Msg};

pub use error::WinitError;
use renderer::GridRenderer;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the winit driver.
#[derive(Clone, Debug)]
pub struct WinitConfig {
    /// Window title.
    pub title: String,
    /// TTF/OTF font file. If `None`, common system monospace fonts are tried.
    pub font_path: Option<PathBuf>,
    /// Font size in pixels.
    pub font_size: f32,
}

impl Default for WinitConfig {
    fn default() -> Self {
        Self {
            title: "2048".into(),
            font_path: None,
            font_size: 20.0,
        }
    }
}

// ---------------------------------------------------------------------------
// WinitDriver
// ---------------------------------------------------------------------------

/// Winit-based graphical driver.
///
/// Implements [`EventLoopDriver`]: it owns the main-thread event loop and
/// drives an [`AppRunner`]. The canvas keeps the runner's size and is drawn
/// centred in the window.
pub struct WinitDriver {
    config: WinitConfig,
}

impl WinitDriver {
    pub fn new(config: WinitConfig) -> Self {
        Self { config }
    }
}

impl EventLoopDriver for WinitDriver {
    fn run(self, runner: AppRunner) -> Result<(), Box<dyn std::error::Error>> {
        let font = font::load_font(self.config.font_path.as_deref())?;
        let (cols, rows) = runner.size();
        let renderer = GridRenderer::new(font, self.config.font_size, cols as usize, rows as usize);

        let event_loop = EventLoop::new().map_err(WinitError::from)?;
        let mut app = WinitApp::new(self.config, runner, renderer);
        event_loop.run_app(&mut app).map_err(WinitError::from)?;
        match app.error.take() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// WinitApp: ApplicationHandler
// ---------------------------------------------------------------------------

struct WinitApp {
    config: WinitConfig,
    runner: AppRunner,
    renderer: GridRenderer,
    modifiers: ModifiersState,
    state: Option<WinitState>,
    error: Option<WinitError>,
}

struct WinitState {
    window: Arc<Window>,
    surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
    pixel_width: u32,
    pixel_height: u32,
}

fn non_zero(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN)
}

impl WinitApp {
    fn new(config: WinitConfig, runner: AppRunner, renderer: GridRenderer) -> Self {
        Self {
            config,
            runner,
            renderer,
            modifiers: ModifiersState::empty(),
            state: None,
            error: None,
        }
    }

    fn create_state(&self, event_loop: &ActiveEventLoop) -> Result<WinitState, WinitError> {
        let pixel_w = self.renderer.pixel_width() as u32;
        let pixel_h = self.renderer.pixel_height() as u32;

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(pixel_w, pixel_h))
            .with_min_inner_size(LogicalSize::new(pixel_w / 2, pixel_h / 2))
            .with_resizable(true);
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let context = softbuffer::Context::new(window.clone())?;
        let mut surface = softbuffer::Surface::new(&context, window.clone())?;
        let size = window.inner_size();
        surface.resize(non_zero(size.width), non_zero(size.height))?;

        Ok(WinitState {
            window,
            surface,
            pixel_width: size.width,
            pixel_height: size.height,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: WinitError) {
        log::error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn render(&mut self) -> Result<(), WinitError> {
        if let Some(frame) = self.runner.draw_frame() {
            self.renderer.apply_frame(&frame);
        }

        let Some(state) = self.state.as_mut() else {
            return Ok(());
        };
        let (width, height) = (state.pixel_width, state.pixel_height);
        if width == 0 || height == 0 {
            return Ok(());
        }

        let mut buf = state.surface.buffer_mut()?;
        self.renderer
            .blit_to_buffer(&mut buf, width as usize, height as usize);
        buf.present()?;
        Ok(())
    }

    fn request_redraw(&self) {
        if let Some(state) = self.state.as_ref() {
            state.window.request_redraw();
        }
    }
}

impl ApplicationHandler for WinitApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.create_state(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(err) => return self.fail(event_loop, err),
        }
        self.runner.init();
        self.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.runner.handle_msg(Msg::Quit);
                event_loop.exit();
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(state) = self.state.as_mut() {
                    state.pixel_width = width;
                    state.pixel_height = height;
                    if let Err(err) = state.surface.resize(non_zero(width), non_zero(height)) {
                        return self.fail(event_loop, err.into());
                    }
                }
                self.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.render() {
                    self.fail(event_loop, err);
                }
            }

            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(msg) = input::translate_keyboard(&event, self.modifiers) {
                    self.runner.handle_msg(msg);
                    if self.runner.should_quit() {
                        event_loop.exit();
                        return;
                    }
                    self.request_redraw();
                }
            }

            _ => {}
        }
    }
}
