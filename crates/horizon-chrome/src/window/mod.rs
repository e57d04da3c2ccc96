//! Window chrome state machine.
//!
//! This module holds everything between a native window message and a
//! visual update: the hit regions, the classifier that answers hit-test
//! queries, the layout engine, the hover/press dispatcher and the
//! controller that ties them together.
//!
//! # Controller
//!
//! ```
//! use horizon_chrome::window::{ChromeConfig, ChromeEvent, WindowController};
//! use horizon_chrome::platform::{RecordingRequests, WindowRequest};
//! use horizon_chrome::{MouseButton, RecordingTarget, Rect, RegionId};
//!
//! let mut controller = WindowController::new(
//!     &ChromeConfig::default(),
//!     RecordingTarget::new(),
//!     RecordingRequests::new(),
//! )
//! .unwrap();
//!
//! controller.handle_event(ChromeEvent::SizeChanged {
//!     client_rect: Rect::new(0.0, 0.0, 700.0, 500.0),
//!     maximized: false,
//! });
//!
//! controller.handle_event(ChromeEvent::client_move(670.0, 20.0));
//! assert_eq!(controller.dispatcher().hovered(), Some(RegionId::Close));
//!
//! controller.handle_event(ChromeEvent::client_down(670.0, 20.0, MouseButton::Left));
//! controller.handle_event(ChromeEvent::client_up(670.0, 20.0, MouseButton::Left));
//! assert_eq!(controller.requests().count(&WindowRequest::Close), 1);
//! ```
//!
//! # Configuration
//!
//! ```ignore
//! use horizon_chrome::window::ChromeConfig;
//!
//! // Loaded from the platform config directory, defaults if absent
//! let config = ChromeConfig::load_or_default();
//!
//! // Or built in code
//! let config = ChromeConfig::new()
//!     .with_caption_height(32)
//!     .with_content_canvas(true);
//! ```

mod bindings;
mod chrome_config;
mod controller;
mod dispatcher;
mod event;
mod layout;
mod region;
mod region_set;

pub use bindings::{Binding, BindingTable, Gesture, MenuAnchor, RegionAction};
pub use chrome_config::{CONFIG_FILE_NAME, ChromeConfig, ConfigError, ConfigResult};
pub use controller::{Disposition, EventResponse, WindowController};
pub use dispatcher::{ActionRequest, DispatchEffect, InputDispatcher};
pub use event::{ChromeEvent, EventPoint};
pub use hit_test::{
    DEFAULT_RESIZE_BORDER, DEFAULT_RESIZE_CORNER, DEFAULT_TOP_RESIZE_BAND, HitTestClassifier,
    ResizeBorders, TopBandPrecedence,
};
pub use layout::{
    ChromeLayout, ChromeMetrics, DEFAULT_BUTTON_WIDTH, DEFAULT_CAPTION_HEIGHT, LayoutDirection,
    LayoutEngine,
};
pub use region::HitRegion;
pub use region_set::RegionSet;
