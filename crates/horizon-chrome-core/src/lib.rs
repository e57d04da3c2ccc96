//! Core vocabulary for Horizon Chrome.
//!
//! This crate holds the small set of types every layer of the chrome stack
//! agrees on:
//!
//! - **Hit-test codes**: [`HitTestCode`], the window manager's classification
//!   of a point (caption, resize border, button, client)
//! - **Region ids**: [`RegionId`], the semantic tag of an interactive region
//! - **Pointer input**: [`MouseButton`] and [`PointerOrigin`]
//! - **DPI scaling**: [`DpiScale`], conversion from logical to device pixels
//! - **Errors**: [`ChromeError`] and the [`Result`] alias
//! - **Logging**: tracing targets in [`logging::targets`]
//!
//! # Example
//!
//! ```
//! use horizon_chrome_core::{DpiScale, HitTestCode, RegionId};
//!
//! let scale = DpiScale::new(144).unwrap();
//! assert_eq!(scale.scale(44), 66);
//!
//! assert_eq!(RegionId::Close.hit_test_code(), HitTestCode::CloseButton);
//! assert!(HitTestCode::TopLeftCorner.is_resize());
//! ```

pub mod dpi;
pub mod error;
pub mod hit_test_code;
pub mod input;
pub mod logging;
pub mod region_id;

pub use dpi::{BASE_DPI, DpiScale};
pub use error::{ChromeError, Result};
pub use hit_test_code::HitTestCode;
pub use input::{MouseButton, PointerOrigin};
pub use region_id::RegionId;

static_assertions::assert_impl_all!(HitTestCode: Send, Sync, Copy);
static_assertions::assert_impl_all!(RegionId: Send, Sync, Copy);
static_assertions::assert_impl_all!(ChromeError: Send, Sync);
