//! Platform glue.
//!
//! The controller talks to the window system only through [`WindowRequests`].
//! Two bridges implement it:
//!
//! - [`winit_bridge`]: any platform winit supports. Translates winit
//!   `WindowEvent`s into [`ChromeEvent`](crate::window::ChromeEvent)s and
//!   carries out requests on a winit `Window`.
//! - `win32` (Windows only): a message bridge for a raw `HWND` window
//!   procedure, including the non-client messages winit never surfaces.
//!
//! [`RecordingRequests`] records every request and is used by the tests.

use horizon_chrome_core::{ChromeError, MouseButton, RegionId, Result};
use horizon_chrome_render::Point;

pub mod winit_bridge;

#[cfg(target_os = "windows")]
pub mod win32;

/// The default (bold) item of the system menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItem {
    /// "Restore", shown while the window is maximized.
    Restore,
    /// "Maximize", shown otherwise.
    Maximize,
}

impl MenuItem {
    /// The default item for a window state.
    pub fn default_for(maximized: bool) -> Self {
        if maximized {
            Self::Restore
        } else {
            Self::Maximize
        }
    }
}

/// Everything needed to show the native system menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemMenuRequest {
    /// The region that triggered the menu.
    pub region: RegionId,
    /// Top-left corner of the menu, in client coordinates.
    pub anchor: Point,
    /// The button that opened the menu.
    pub button: MouseButton,
    /// The item to show in bold.
    pub default_item: MenuItem,
    /// Mirror the menu for right-to-left layouts.
    pub right_to_left: bool,
    /// Whether the window is currently maximized. Decides which of
    /// restore/move/size/maximize are enabled.
    pub maximized: bool,
}

/// Requests the chrome makes of the window system.
///
/// Every method is fire-and-forget from the controller's point of view: a
/// failure is logged and never changes chrome state.
pub trait WindowRequests {
    /// Close the window.
    fn request_close(&mut self) -> Result<()>;

    /// Minimize the window.
    fn request_minimize(&mut self) -> Result<()>;

    /// Maximize the window, or restore it if it is maximized.
    fn toggle_maximize(&mut self) -> Result<()>;

    /// Show the native system menu.
    fn show_system_menu(&mut self, request: &SystemMenuRequest) -> Result<()>;

    /// Deliver a client-area move at `point` (client coordinates) in
    /// addition to the non-client move being handled.
    fn redeliver_as_client_move(&mut self, point: Point) -> Result<()>;

    /// Ask for a leave notification on the client or non-client channel.
    fn track_pointer_leave(&mut self, non_client: bool) -> Result<()>;

    /// Convert a screen point to client coordinates.
    fn screen_to_client(&self, point: Point) -> Result<Point>;
}

impl<T: WindowRequests + ?Sized> WindowRequests for &mut T {
    fn request_close(&mut self) -> Result<()> {
        (**self).request_close()
    }

    fn request_minimize(&mut self) -> Result<()> {
        (**self).request_minimize()
    }

    fn toggle_maximize(&mut self) -> Result<()> {
        (**self).toggle_maximize()
    }

    fn show_system_menu(&mut self, request: &SystemMenuRequest) -> Result<()> {
        (**self).show_system_menu(request)
    }

    fn redeliver_as_client_move(&mut self, point: Point) -> Result<()> {
        (**self).redeliver_as_client_move(point)
    }

    fn track_pointer_leave(&mut self, non_client: bool) -> Result<()> {
        (**self).track_pointer_leave(non_client)
    }

    fn screen_to_client(&self, point: Point) -> Result<Point> {
        (**self).screen_to_client(point)
    }
}

/// A single request made through [`WindowRequests`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowRequest {
    Close,
    Minimize,
    ToggleMaximize,
    SystemMenu(SystemMenuRequest),
    RedeliverClientMove(Point),
    TrackLeave { non_client: bool },
}

/// A [`WindowRequests`] implementation that records every request.
///
/// Screen points are converted by subtracting the configured client origin.
/// With [`failing`](Self::failing) every request is still recorded but
/// reports a platform error.
#[derive(Debug, Clone, Default)]
pub struct RecordingRequests {
    requests: Vec<WindowRequest>,
    client_origin: Point,
    fail: bool,
}

impl RecordingRequests {
    /// Create a recorder with the client origin at the screen origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the screen position of the client area's top-left corner.
    pub fn with_client_origin(mut self, origin: Point) -> Self {
        self.client_origin = origin;
        self
    }

    /// Make every request fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// All requests recorded so far, oldest first.
    pub fn requests(&self) -> &[WindowRequest] {
        &self.requests
    }

    /// Take the recorded requests.
    pub fn take(&mut self) -> Vec<WindowRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Forget all recorded requests.
    pub fn clear(&mut self) {
        self.requests.clear();
    }

    /// The system menu requests recorded so far.
    pub fn system_menus(&self) -> impl Iterator<Item = &SystemMenuRequest> {
        self.requests.iter().filter_map(|request| match request {
            WindowRequest::SystemMenu(menu) => Some(menu),
            _ => None,
        })
    }

    /// Number of recorded requests equal to `request`.
    pub fn count(&self, request: &WindowRequest) -> usize {
        self.requests.iter().filter(|r| *r == request).count()
    }

    fn record(&mut self, request: WindowRequest) -> Result<()> {
        self.requests.push(request);
        if self.fail {
            return Err(ChromeError::platform(format!("{request:?} rejected")));
        }
        Ok(())
    }
}

impl WindowRequests for RecordingRequests {
    fn request_close(&mut self) -> Result<()> {
        self.record(WindowRequest::Close)
    }

    fn request_minimize(&mut self) -> Result<()> {
        self.record(WindowRequest::Minimize)
    }

    fn toggle_maximize(&mut self) -> Result<()> {
        self.record(WindowRequest::ToggleMaximize)
    }

    fn show_system_menu(&mut self, request: &SystemMenuRequest) -> Result<()> {
        self.record(WindowRequest::SystemMenu(*request))
    }

    fn redeliver_as_client_move(&mut self, point: Point) -> Result<()> {
        self.record(WindowRequest::RedeliverClientMove(point))
    }

    fn track_pointer_leave(&mut self, non_client: bool) -> Result<()> {
        self.record(WindowRequest::TrackLeave { non_client })
    }

    fn screen_to_client(&self, point: Point) -> Result<Point> {
        if self.fail {
            return Err(ChromeError::platform("screen_to_client rejected"));
        }
        Ok(Point::new(
            point.x - self.client_origin.x,
            point.y - self.client_origin.y,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_menu_item() {
        assert_eq!(MenuItem::default_for(true), MenuItem::Restore);
        assert_eq!(MenuItem::default_for(false), MenuItem::Maximize);
    }

    #[test]
    fn test_recording_requests() {
        let mut requests = RecordingRequests::new().with_client_origin(Point::new(100.0, 50.0));
        requests.request_close().unwrap();
        requests.track_pointer_leave(true).unwrap();

        assert_eq!(
            requests.requests(),
            &[WindowRequest::Close, WindowRequest::TrackLeave { non_client: true }]
        );
        assert_eq!(
            requests.screen_to_client(Point::new(770.0, 70.0)).unwrap(),
            Point::new(670.0, 20.0)
        );
    }

    #[test]
    fn test_failing_requests_still_record() {
        let mut requests = RecordingRequests::new().failing();
        assert!(matches!(requests.request_minimize(), Err(ChromeError::Platform(_))));
        assert_eq!(requests.count(&WindowRequest::Minimize), 1);
        assert!(requests.screen_to_client(Point::ZERO).is_err());
    }
}
