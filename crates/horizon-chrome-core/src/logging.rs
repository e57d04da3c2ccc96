//! Logging facilities for Horizon Chrome.
//!
//! Horizon Chrome uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_chrome::dispatch=trace")
//!     .init();
//! ```
//!
//! Every event is emitted with one of the [`targets`] so subsystems can be
//! filtered independently. Pointer transitions are logged at `trace`, layout
//! passes and region actions at `debug`, failed platform requests at `warn`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Hover/press state machine.
    pub const DISPATCH: &str = "horizon_chrome::dispatch";
    /// Hit-test classification.
    pub const HIT_TEST: &str = "horizon_chrome::hit_test";
    /// Region layout passes.
    pub const LAYOUT: &str = "horizon_chrome::layout";
    /// Requests sent to the platform window.
    pub const PLATFORM: &str = "horizon_chrome::platform";
    /// Configuration loading.
    pub const CONFIG: &str = "horizon_chrome::config";
    /// Rendering collaborator.
    pub const RENDER: &str = "horizon_chrome::render";
}
