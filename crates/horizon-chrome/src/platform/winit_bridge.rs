//! winit integration.
//!
//! winit has no non-client channel: with decorations turned off every
//! pointer message is a client message and the window manager never asks
//! for a hit-test code. This bridge fills that gap on the client side.
//!
//! - [`WinitEventTranslator`] turns `WindowEvent`s into [`ChromeEvent`]s. It
//!   emits a [`ChromeEvent::HitTestQuery`] before every move and press, with
//!   the platform default computed from [`ResizeBorders`], and detects
//!   double-clicks.
//! - [`WinitWindowRequests`] carries out requests on a winit `Window`.
//! - [`begin_default_handling`] starts the native move or resize loop for a
//!   caption or resize code, standing in for the window manager's own
//!   default handling.
//!
//! # Example
//!
//! ```ignore
//! for event in translator.translate(&window, &window_event) {
//!     let response = controller.handle_event(event);
//!     if let Some(code) = response.hit_test {
//!         last_code = code;
//!     }
//!     if translator.is_primary_press(&event) && response.runs_default() {
//!         begin_default_handling(&window, last_code)?;
//!     }
//! }
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use horizon_chrome_core::logging::targets;
use horizon_chrome_core::{ChromeError, DpiScale, HitTestCode, MouseButton, PointerOrigin, Result};
use horizon_chrome_render::{Point, Rect, Size};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::window::{ResizeDirection, Window};

use super::{SystemMenuRequest, WindowRequests};
use crate::window::{ChromeEvent, EventPoint, ResizeBorders};

/// Default double-click time threshold in milliseconds.
pub const DEFAULT_DOUBLE_CLICK_TIME_MS: u64 = 500;

/// Default double-click distance threshold in pixels.
pub const DEFAULT_DOUBLE_CLICK_DISTANCE: f32 = 5.0;

/// Converts a winit mouse button to a chrome [`MouseButton`].
///
/// Buttons the chrome never binds return `None`.
pub fn from_winit_mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Back | WinitMouseButton::Forward | WinitMouseButton::Other(_) => None,
    }
}

/// The winit resize direction for a resize code.
pub fn resize_direction(code: HitTestCode) -> Option<ResizeDirection> {
    match code {
        HitTestCode::LeftBorder => Some(ResizeDirection::West),
        HitTestCode::RightBorder => Some(ResizeDirection::East),
        HitTestCode::TopBorder => Some(ResizeDirection::North),
        HitTestCode::BottomBorder => Some(ResizeDirection::South),
        HitTestCode::TopLeftCorner => Some(ResizeDirection::NorthWest),
        HitTestCode::TopRightCorner => Some(ResizeDirection::NorthEast),
        HitTestCode::BottomLeftCorner => Some(ResizeDirection::SouthWest),
        HitTestCode::BottomRightCorner => Some(ResizeDirection::SouthEast),
        _ => None,
    }
}

/// Start the window manager's move or resize loop for a hit-test code.
///
/// Returns `Ok(true)` if a loop was started, `Ok(false)` if the code has no
/// default handling.
pub fn begin_default_handling(window: &Window, code: HitTestCode) -> Result<bool> {
    if code == HitTestCode::Caption {
        window.drag_window().map_err(ChromeError::platform)?;
        tracing::trace!(target: targets::PLATFORM, "drag started");
        return Ok(true);
    }
    if let Some(direction) = resize_direction(code) {
        window
            .drag_resize_window(direction)
            .map_err(ChromeError::platform)?;
        tracing::trace!(target: targets::PLATFORM, ?direction, "resize started");
        return Ok(true);
    }
    Ok(false)
}

/// State for tracking a potential double-click.
#[derive(Debug, Clone, Copy)]
struct ClickState {
    button: MouseButton,
    position: Point,
    time: Instant,
}

/// Translates winit window events into chrome events.
#[derive(Debug)]
pub struct WinitEventTranslator {
    borders: ResizeBorders,
    position: Point,
    size: Size,
    dpi: DpiScale,
    maximized: bool,
    last_click: Option<ClickState>,
    double_click_time: Duration,
    double_click_distance: f32,
}

impl WinitEventTranslator {
    /// Create a translator with client-side resize borders.
    pub fn new(borders: ResizeBorders) -> Self {
        Self {
            borders,
            position: Point::ZERO,
            size: Size::ZERO,
            dpi: DpiScale::IDENTITY,
            maximized: false,
            last_click: None,
            double_click_time: Duration::from_millis(DEFAULT_DOUBLE_CLICK_TIME_MS),
            double_click_distance: DEFAULT_DOUBLE_CLICK_DISTANCE,
        }
    }

    /// Set the double-click time threshold.
    pub fn with_double_click_time(mut self, time: Duration) -> Self {
        self.double_click_time = time;
        self
    }

    /// Set the double-click distance threshold.
    pub fn with_double_click_distance(mut self, distance: f32) -> Self {
        self.double_click_distance = distance;
        self
    }

    /// The last known pointer position, client coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    /// The last known DPI scale.
    pub fn dpi(&self) -> DpiScale {
        self.dpi
    }

    /// Read the current size, scale and window state from `window`.
    ///
    /// Call once after the window is created.
    pub fn sync(&mut self, window: &Window) -> Vec<ChromeEvent> {
        let mut events = self.scale_factor_changed(window.scale_factor());
        events.extend(self.resized(window.inner_size(), window.is_maximized()));
        events
    }

    /// Translate one window event.
    pub fn translate(&mut self, window: &Window, event: &WindowEvent) -> Vec<ChromeEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => self.cursor_moved(*position),
            WindowEvent::CursorLeft { .. } => self.cursor_left(),
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_input(*state, *button, Instant::now())
            }
            WindowEvent::Resized(size) => self.resized(*size, window.is_maximized()),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor_changed(*scale_factor)
            }
            WindowEvent::Destroyed => vec![ChromeEvent::WindowClosing],
            _ => Vec::new(),
        }
    }

    /// Check if `event` is a primary-button press, the trigger for
    /// [`begin_default_handling`].
    pub fn is_primary_press(&self, event: &ChromeEvent) -> bool {
        matches!(
            event,
            ChromeEvent::PointerDown {
                button: MouseButton::Left,
                ..
            }
        )
    }

    /// The pointer moved to a physical client position.
    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> Vec<ChromeEvent> {
        self.position = Point::new(position.x as f32, position.y as f32);
        let (query, origin) = self.query();
        vec![
            query,
            ChromeEvent::PointerMove {
                position: EventPoint::Client(self.position),
                origin,
            },
        ]
    }

    /// The pointer left the window.
    pub fn cursor_left(&mut self) -> Vec<ChromeEvent> {
        vec![ChromeEvent::PointerLeave]
    }

    /// A button changed state at the last known position.
    pub fn mouse_input(
        &mut self,
        state: ElementState,
        button: WinitMouseButton,
        now: Instant,
    ) -> Vec<ChromeEvent> {
        let Some(button) = from_winit_mouse_button(button) else {
            return Vec::new();
        };
        let position = EventPoint::Client(self.position);
        let (query, origin) = self.query();

        match state {
            ElementState::Pressed => {
                let double_click = self.last_click.is_some_and(|last| {
                    last.button == button
                        && now.saturating_duration_since(last.time) < self.double_click_time
                        && distance(last.position, self.position) < self.double_click_distance
                });

                let event = if double_click {
                    // A third press starts a new sequence.
                    self.last_click = None;
                    ChromeEvent::PointerDoubleClick {
                        position,
                        button,
                        origin,
                    }
                } else {
                    self.last_click = Some(ClickState {
                        button,
                        position: self.position,
                        time: now,
                    });
                    ChromeEvent::PointerDown {
                        position,
                        button,
                        origin,
                    }
                };
                vec![query, event]
            }
            ElementState::Released => vec![ChromeEvent::PointerUp {
                position,
                button,
                origin,
            }],
        }
    }

    /// The client area was resized.
    pub fn resized(&mut self, size: PhysicalSize<u32>, maximized: bool) -> Vec<ChromeEvent> {
        self.size = Size::new(size.width as f32, size.height as f32);
        self.maximized = maximized;
        vec![ChromeEvent::SizeChanged {
            client_rect: Rect::from_size(self.size),
            maximized,
        }]
    }

    /// The scale factor changed.
    pub fn scale_factor_changed(&mut self, scale_factor: f64) -> Vec<ChromeEvent> {
        match DpiScale::from_factor(scale_factor) {
            Ok(dpi) => {
                self.dpi = dpi;
                vec![ChromeEvent::DpiChanged {
                    suggested_rect: Rect::from_size(self.size),
                    dpi: dpi.dpi(),
                }]
            }
            Err(error) => {
                tracing::warn!(target: targets::PLATFORM, scale_factor, %error, "ignoring scale factor");
                Vec::new()
            }
        }
    }

    fn query(&self) -> (ChromeEvent, PointerOrigin) {
        // Maximized windows cannot be resized from their edges.
        let border = if self.maximized {
            None
        } else {
            self.borders.hit_test(self.position, self.size, self.dpi)
        };
        let query = ChromeEvent::HitTestQuery {
            point: EventPoint::Client(self.position),
            platform_default: border.unwrap_or(HitTestCode::Client),
        };
        let origin = border.map_or(PointerOrigin::Client, PointerOrigin::NonClient);
        (query, origin)
    }
}

impl Default for WinitEventTranslator {
    fn default() -> Self {
        Self::new(ResizeBorders::default())
    }
}

fn distance(a: Point, b: Point) -> f32 {
    let (dx, dy) = (a.x - b.x, a.y - b.y);
    (dx * dx + dy * dy).sqrt()
}

/// [`WindowRequests`] on a winit window.
///
/// winit cannot close a window on its own; a close request sets a flag the
/// application polls with [`take_close_request`](Self::take_close_request).
/// Client moves are always delivered by winit, so redelivery and leave
/// tracking are no-ops.
#[derive(Debug, Clone)]
pub struct WinitWindowRequests {
    window: Arc<Window>,
    close_requested: bool,
}

impl WinitWindowRequests {
    /// Wrap a window.
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            close_requested: false,
        }
    }

    /// The wrapped window.
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Return whether a close was requested since the last call, and reset
    /// the flag.
    pub fn take_close_request(&mut self) -> bool {
        std::mem::take(&mut self.close_requested)
    }
}

impl WindowRequests for WinitWindowRequests {
    fn request_close(&mut self) -> Result<()> {
        self.close_requested = true;
        Ok(())
    }

    fn request_minimize(&mut self) -> Result<()> {
        self.window.set_minimized(true);
        Ok(())
    }

    fn toggle_maximize(&mut self) -> Result<()> {
        let maximized = self.window.is_maximized();
        tracing::debug!(target: targets::PLATFORM, maximized, "toggling maximize");
        self.window.set_maximized(!maximized);
        Ok(())
    }

    fn show_system_menu(&mut self, request: &SystemMenuRequest) -> Result<()> {
        // winit picks the menu items itself; only the position is ours.
        let position = PhysicalPosition::new(request.anchor.x as f64, request.anchor.y as f64);
        self.window.show_window_menu(position);
        Ok(())
    }

    fn redeliver_as_client_move(&mut self, _point: Point) -> Result<()> {
        Ok(())
    }

    fn track_pointer_leave(&mut self, _non_client: bool) -> Result<()> {
        Ok(())
    }

    fn screen_to_client(&self, point: Point) -> Result<Point> {
        let origin = self.window.inner_position().map_err(ChromeError::platform)?;
        Ok(Point::new(point.x - origin.x as f32, point.y - origin.y as f32))
    }
}
