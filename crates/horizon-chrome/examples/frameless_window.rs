//! Frameless window with custom chrome.
//!
//! Opens an undecorated window and drives the chrome state machine from
//! winit events. The caption drags the window, the edges resize it, and the
//! three caption buttons minimize, maximize and close. Visual state changes
//! are logged instead of drawn.
//!
//! Run with: cargo run -p horizon-chrome --example frameless_window
//!
//! Set `RUST_LOG=horizon_chrome=trace` to see every dispatch step.

use std::sync::Arc;

use horizon_chrome::platform::winit_bridge::{
    WinitEventTranslator, WinitWindowRequests, begin_default_handling,
};
use horizon_chrome::window::{ChromeConfig, ChromeEvent, WindowController};
use horizon_chrome::{ChromeScene, HitTestCode, RegionId};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

/// Per-window chrome state.
struct ChromeWindow {
    window: Arc<Window>,
    translator: WinitEventTranslator,
    controller: WindowController<ChromeScene, WinitWindowRequests>,
    last_code: HitTestCode,
}

impl ChromeWindow {
    fn new(event_loop: &ActiveEventLoop, config: &ChromeConfig) -> Self {
        let attrs = Window::default_attributes()
            .with_title("Horizon Chrome")
            .with_inner_size(LogicalSize::new(700, 500))
            .with_decorations(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("failed to create window"),
        );

        let mut translator = WinitEventTranslator::new(config.resize_borders());
        let mut controller = WindowController::new(
            config,
            ChromeScene::with_default_palettes(),
            WinitWindowRequests::new(Arc::clone(&window)),
        )
        .expect("failed to create chrome controller");

        for event in translator.sync(&window) {
            controller.handle_event(event);
        }

        Self {
            window,
            translator,
            controller,
            last_code: HitTestCode::Nowhere,
        }
    }

    fn handle(&mut self, event: &WindowEvent) {
        for chrome_event in self.translator.translate(&self.window, event) {
            let response = self.controller.handle_event(chrome_event);
            if let Some(code) = response.hit_test {
                self.last_code = code;
            }
            if self.translator.is_primary_press(&chrome_event) && response.runs_default() {
                if let Err(error) = begin_default_handling(&self.window, self.last_code) {
                    tracing::warn!(%error, "default handling failed");
                }
            }
        }

        if self.controller.render_mut().take_dirty() {
            self.log_scene();
            self.window.request_redraw();
        }
    }

    fn log_scene(&self) {
        let scene = self.controller.render();
        for id in [
            RegionId::SystemMenu,
            RegionId::Minimize,
            RegionId::Maximize,
            RegionId::Close,
        ] {
            if let Some(node) = scene.node(id) {
                tracing::info!(
                    ?id,
                    state = ?node.state,
                    color = ?node.fill_color(),
                    "region"
                );
            }
        }
    }
}

struct App {
    config: ChromeConfig,
    window: Option<ChromeWindow>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            self.window = Some(ChromeWindow::new(event_loop, &self.config));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(state) = self.window.as_mut() else {
            return;
        };

        if let WindowEvent::CloseRequested = event {
            state.controller.handle_event(ChromeEvent::WindowClosing);
            event_loop.exit();
            return;
        }

        state.handle(&event);

        if state.controller.requests_mut().take_close_request() {
            state.controller.handle_event(ChromeEvent::WindowClosing);
            event_loop.exit();
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ChromeConfig::load_or_default();
    tracing::info!(?config, "starting frameless window");

    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut app = App {
        config,
        window: None,
    };
    event_loop.run_app(&mut app).expect("event loop failed");
}
