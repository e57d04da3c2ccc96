//! Inbound events for the window controller.
//!
//! Platform glue translates native window messages into [`ChromeEvent`]s and
//! feeds them to [`WindowController::handle_event`](super::WindowController::handle_event)
//! one at a time, on the UI thread.

use horizon_chrome_core::{HitTestCode, MouseButton, PointerOrigin};
use horizon_chrome_render::{Point, Rect};

/// A pointer position as delivered by the platform.
///
/// Non-client messages usually carry screen coordinates; the controller
/// converts them to client coordinates before any region lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventPoint {
    /// Client coordinates (origin at the top-left of the client area).
    Client(Point),
    /// Screen coordinates.
    Screen(Point),
}

impl EventPoint {
    /// A point in client coordinates.
    #[inline]
    pub fn client(x: f32, y: f32) -> Self {
        Self::Client(Point::new(x, y))
    }

    /// A point in screen coordinates.
    #[inline]
    pub fn screen(x: f32, y: f32) -> Self {
        Self::Screen(Point::new(x, y))
    }
}

/// An event delivered to the chrome controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChromeEvent {
    /// The pointer moved.
    PointerMove {
        position: EventPoint,
        origin: PointerOrigin,
    },
    /// The pointer left the tracked area.
    PointerLeave,
    /// A button was pressed.
    PointerDown {
        position: EventPoint,
        button: MouseButton,
        origin: PointerOrigin,
    },
    /// A button was released.
    PointerUp {
        position: EventPoint,
        button: MouseButton,
        origin: PointerOrigin,
    },
    /// A button was double-clicked. Replaces the second press.
    PointerDoubleClick {
        position: EventPoint,
        button: MouseButton,
        origin: PointerOrigin,
    },
    /// The client area was resized.
    SizeChanged { client_rect: Rect, maximized: bool },
    /// The window moved to a monitor with a different DPI.
    DpiChanged { suggested_rect: Rect, dpi: u32 },
    /// The window manager asks what is under a point.
    HitTestQuery {
        point: EventPoint,
        platform_default: HitTestCode,
    },
    /// The window is being destroyed. No further events are expected.
    WindowClosing,
}

impl ChromeEvent {
    /// A client-area move.
    pub fn client_move(x: f32, y: f32) -> Self {
        Self::PointerMove {
            position: EventPoint::client(x, y),
            origin: PointerOrigin::Client,
        }
    }

    /// A client-area press.
    pub fn client_down(x: f32, y: f32, button: MouseButton) -> Self {
        Self::PointerDown {
            position: EventPoint::client(x, y),
            button,
            origin: PointerOrigin::Client,
        }
    }

    /// A client-area release.
    pub fn client_up(x: f32, y: f32, button: MouseButton) -> Self {
        Self::PointerUp {
            position: EventPoint::client(x, y),
            button,
            origin: PointerOrigin::Client,
        }
    }

    /// Check if this is a pointer event.
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::PointerMove { .. }
                | Self::PointerLeave
                | Self::PointerDown { .. }
                | Self::PointerUp { .. }
                | Self::PointerDoubleClick { .. }
        )
    }

    /// The channel a pointer event arrived on.
    pub fn origin(&self) -> Option<PointerOrigin> {
        match *self {
            Self::PointerMove { origin, .. }
            | Self::PointerDown { origin, .. }
            | Self::PointerUp { origin, .. }
            | Self::PointerDoubleClick { origin, .. } => Some(origin),
            _ => None,
        }
    }
}
