//! Horizon Chrome - custom non-client window chrome for borderless windows.
//!
//! This is the umbrella crate. It re-exports the core vocabulary and the
//! render contract, and adds the chrome state machine ([`window`]) and the
//! platform glue ([`platform`]).
//!
//! # Example
//!
//! ```no_run
//! use horizon_chrome::platform::winit_bridge::{WinitEventTranslator, WinitWindowRequests};
//! use horizon_chrome::window::{ChromeConfig, WindowController};
//! use horizon_chrome::ChromeScene;
//!
//! # fn run(window: std::sync::Arc<winit::window::Window>) -> Result<(), Box<dyn std::error::Error>> {
//! let config = ChromeConfig::load_or_default();
//! let mut translator = WinitEventTranslator::new(config.resize_borders());
//! let mut controller = WindowController::new(
//!     &config,
//!     ChromeScene::with_default_palettes(),
//!     WinitWindowRequests::new(window.clone()),
//! )?;
//!
//! // In the event loop:
//! // for event in translator.translate(&window, &window_event) {
//! //     let response = controller.handle_event(event);
//! // }
//! # let _ = (&mut translator, &mut controller);
//! # Ok(())
//! # }
//! ```

pub use horizon_chrome_core::*;

/// Geometry, visual states and render targets.
pub mod render {
    pub use horizon_chrome_render::*;
}

pub use horizon_chrome_render::{
    ChromeScene, Color, Point, RecordingTarget, Rect, RenderTarget, Size, VisualState,
};

pub mod platform;
pub mod window;

static_assertions::assert_impl_all!(window::RegionSet: Send, Sync);
static_assertions::assert_impl_all!(window::InputDispatcher: Send, Sync);
static_assertions::assert_impl_all!(window::ChromeConfig: Send, Sync);
