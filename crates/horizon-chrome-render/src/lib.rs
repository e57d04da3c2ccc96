//! Rendering contract for Horizon Chrome.
//!
//! The chrome state machine in `horizon-chrome` never draws. It describes the
//! chrome through a [`RenderTarget`]: region bounds, a [`VisualState`] per
//! region, a rasterization scale, and a pointer indicator. This crate defines
//! that contract, the geometry it is expressed in, and two targets:
//!
//! - [`ChromeScene`]: a retained model a compositor can repaint from.
//! - [`RecordingTarget`]: records every call, for tests and diagnostics.
//!
//! It also hosts backdrop material selection ([`select_backdrop`]).
//!
//! # Example
//!
//! ```
//! use horizon_chrome_core::RegionId;
//! use horizon_chrome_render::{RecordingTarget, RenderCommand, RenderTarget, VisualState};
//!
//! let mut target = RecordingTarget::new();
//! target.set_region_visual_state(RegionId::Minimize, VisualState::Hovered);
//!
//! assert_eq!(
//!     target.commands(),
//!     &[RenderCommand::VisualState(RegionId::Minimize, VisualState::Hovered)]
//! );
//! ```

pub mod backdrop;
mod error;
pub mod scene;
pub mod target;
mod types;
mod visual_state;

pub use backdrop::{BackdropKind, BackdropProbe, select_backdrop, select_backdrop_or};
pub use error::{RenderError, RenderResult};
pub use scene::{ChromeScene, Glyph, PointerIndicator, SceneNode};
pub use target::{RecordingTarget, RenderCommand, RenderTarget};
pub use types::{Color, Point, Rect, Size};
pub use visual_state::{StateColors, VisualState};
