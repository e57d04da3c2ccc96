//! Win32 message bridge.
//!
//! [`Win32Chrome`] sits in a window procedure and turns the messages the
//! chrome cares about into [`ChromeEvent`]s:
//!
//! - `WM_NCHITTEST` becomes a hit-test query; the window manager's own
//!   answer from `DefWindowProcW` is the platform default.
//! - `WM_NCCALCSIZE` removes the native caption while keeping the side and
//!   bottom resize frame.
//! - Client and non-client mouse messages become pointer events. Non-client
//!   messages carry screen coordinates and the hit-test code in `wParam`.
//! - `WM_SIZE`, `WM_DPICHANGED` and `WM_DESTROY` drive layout and teardown.
//!
//! Requests are queued by [`Win32Requests`] and carried out in order after
//! the controller is released, since closing, showing the system menu and
//! sending a client move all re-enter the window procedure. Leave tracking
//! goes through the same queue, so it is re-armed after a redelivered move.
//!
//! # Example
//!
//! ```ignore
//! unsafe extern "system" fn wnd_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
//!     let chrome = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const Win32Chrome<ChromeScene>;
//!     if let Some(chrome) = chrome.as_ref() {
//!         if let Some(result) = chrome.handle_message(msg, wparam, lparam) {
//!             return result;
//!         }
//!     }
//!     DefWindowProcW(hwnd, msg, wparam, lparam)
//! }
//! ```

use std::cell::{Cell, Ref, RefCell, RefMut};

use horizon_chrome_core::logging::targets;
use horizon_chrome_core::{ChromeError, HitTestCode, MouseButton, PointerOrigin, Result};
use horizon_chrome_render::{Point, Rect, RenderTarget};
use windows::Win32::Foundation::{FALSE, HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{ClientToScreen, ScreenToClient};
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, GetDpiForWindow, SetProcessDpiAwarenessContext,
};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    TME_LEAVE, TME_NONCLIENT, TRACKMOUSEEVENT, TrackMouseEvent,
};
use windows::Win32::UI::WindowsAndMessaging::{
    DefWindowProcW, DestroyWindow, EnableMenuItem, GetClientRect, GetSystemMenu, GetSystemMetrics,
    IsIconic, IsZoomed, MF_BYCOMMAND, MF_ENABLED, MF_GRAYED, SC_MAXIMIZE, SC_MINIMIZE, SC_MOVE,
    SC_RESTORE, SC_SIZE, SIZE_MAXIMIZED, SM_MENUDROPALIGNMENT, SW_MAXIMIZE, SW_MINIMIZE,
    SW_RESTORE, SWP_NOACTIVATE, SWP_NOZORDER, SendMessageW, SetMenuDefaultItem, SetWindowPos,
    ShowWindow, TPM_LAYOUTRTL, TPM_RETURNCMD, TPM_RIGHTALIGN, TPM_RIGHTBUTTON, TPM_TOPALIGN,
    TrackPopupMenu, WM_DESTROY, WM_DPICHANGED, WM_LBUTTONDBLCLK, WM_LBUTTONDOWN, WM_LBUTTONUP,
    WM_MBUTTONDBLCLK, WM_MBUTTONDOWN, WM_MBUTTONUP, WM_MOUSELEAVE, WM_MOUSEMOVE,
    WM_NCCALCSIZE, WM_NCHITTEST, WM_NCLBUTTONDBLCLK, WM_NCLBUTTONDOWN, WM_NCLBUTTONUP,
    WM_NCMBUTTONDBLCLK, WM_NCMBUTTONDOWN, WM_NCMBUTTONUP, WM_NCMOUSELEAVE, WM_NCMOUSEMOVE,
    WM_NCRBUTTONDBLCLK, WM_NCRBUTTONDOWN, WM_NCRBUTTONUP, WM_RBUTTONDBLCLK, WM_RBUTTONDOWN,
    WM_RBUTTONUP, WM_SIZE, WM_SYSCOMMAND,
};

use super::{SystemMenuRequest, WindowRequests};
use crate::window::{ChromeConfig, ChromeEvent, EventPoint, WindowController};

/// Opt the process into per-monitor (v2) DPI awareness.
///
/// Must run before the first window is created.
pub fn enable_per_monitor_dpi_awareness() -> Result<()> {
    unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) }
        .map_err(ChromeError::platform)
}

// ============================================================================
// Message Decoding
// ============================================================================

/// What a mouse message does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MouseAction {
    Move,
    Down(MouseButton),
    Up(MouseButton),
    DoubleClick(MouseButton),
}

/// Decode a mouse message into its action and channel.
fn decode_mouse_message(msg: u32) -> Option<(MouseAction, bool)> {
    let decoded = match msg {
        WM_MOUSEMOVE => (MouseAction::Move, false),
        WM_LBUTTONDOWN => (MouseAction::Down(MouseButton::Left), false),
        WM_LBUTTONUP => (MouseAction::Up(MouseButton::Left), false),
        WM_LBUTTONDBLCLK => (MouseAction::DoubleClick(MouseButton::Left), false),
        WM_RBUTTONDOWN => (MouseAction::Down(MouseButton::Right), false),
        WM_RBUTTONUP => (MouseAction::Up(MouseButton::Right), false),
        WM_RBUTTONDBLCLK => (MouseAction::DoubleClick(MouseButton::Right), false),
        WM_MBUTTONDOWN => (MouseAction::Down(MouseButton::Middle), false),
        WM_MBUTTONUP => (MouseAction::Up(MouseButton::Middle), false),
        WM_MBUTTONDBLCLK => (MouseAction::DoubleClick(MouseButton::Middle), false),
        WM_NCMOUSEMOVE => (MouseAction::Move, true),
        WM_NCLBUTTONDOWN => (MouseAction::Down(MouseButton::Left), true),
        WM_NCLBUTTONUP => (MouseAction::Up(MouseButton::Left), true),
        WM_NCLBUTTONDBLCLK => (MouseAction::DoubleClick(MouseButton::Left), true),
        WM_NCRBUTTONDOWN => (MouseAction::Down(MouseButton::Right), true),
        WM_NCRBUTTONUP => (MouseAction::Up(MouseButton::Right), true),
        WM_NCRBUTTONDBLCLK => (MouseAction::DoubleClick(MouseButton::Right), true),
        WM_NCMBUTTONDOWN => (MouseAction::Down(MouseButton::Middle), true),
        WM_NCMBUTTONUP => (MouseAction::Up(MouseButton::Middle), true),
        WM_NCMBUTTONDBLCLK => (MouseAction::DoubleClick(MouseButton::Middle), true),
        _ => return None,
    };
    Some(decoded)
}

/// Signed x and y packed in an `LPARAM`.
fn point_from_lparam(lparam: LPARAM) -> Point {
    let x = (lparam.0 & 0xFFFF) as u16 as i16;
    let y = ((lparam.0 >> 16) & 0xFFFF) as u16 as i16;
    Point::new(f32::from(x), f32::from(y))
}

/// Pack a point into an `LPARAM`.
fn lparam_from_point(x: i32, y: i32) -> LPARAM {
    let packed = (u32::from(y as u16) << 16) | u32::from(x as u16);
    LPARAM(packed as i32 as isize)
}

fn rect_from_win32(rect: &RECT) -> Rect {
    Rect::from_ltrb(
        rect.left as f32,
        rect.top as f32,
        rect.right as f32,
        rect.bottom as f32,
    )
}

fn track_mouse_leave(hwnd: HWND, non_client: bool) -> Result<()> {
    let mut flags = TME_LEAVE;
    if non_client {
        flags |= TME_NONCLIENT;
    }
    let mut tme = TRACKMOUSEEVENT {
        cbSize: std::mem::size_of::<TRACKMOUSEEVENT>() as u32,
        dwFlags: flags,
        hwndTrack: hwnd,
        dwHoverTime: 0,
    };
    unsafe { TrackMouseEvent(&mut tme) }.map_err(ChromeError::platform)
}

fn last_error() -> ChromeError {
    ChromeError::platform(windows::core::Error::from_win32())
}

// ============================================================================
// Requests
// ============================================================================

/// A request held back until the controller is released.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Deferred {
    Close,
    Minimize,
    ToggleMaximize,
    SystemMenu(SystemMenuRequest),
    ClientMove(Point),
    TrackLeave { non_client: bool },
}

/// [`WindowRequests`] on a raw window handle.
#[derive(Debug)]
pub struct Win32Requests {
    hwnd: HWND,
    pending: Vec<Deferred>,
}

impl Win32Requests {
    /// Wrap a window handle.
    pub fn new(hwnd: HWND) -> Self {
        Self {
            hwnd,
            pending: Vec::new(),
        }
    }

    /// The window handle.
    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    fn take_pending(&mut self) -> Vec<Deferred> {
        std::mem::take(&mut self.pending)
    }
}

impl WindowRequests for Win32Requests {
    fn request_close(&mut self) -> Result<()> {
        self.pending.push(Deferred::Close);
        Ok(())
    }

    fn request_minimize(&mut self) -> Result<()> {
        self.pending.push(Deferred::Minimize);
        Ok(())
    }

    fn toggle_maximize(&mut self) -> Result<()> {
        self.pending.push(Deferred::ToggleMaximize);
        Ok(())
    }

    fn show_system_menu(&mut self, request: &SystemMenuRequest) -> Result<()> {
        self.pending.push(Deferred::SystemMenu(*request));
        Ok(())
    }

    fn redeliver_as_client_move(&mut self, point: Point) -> Result<()> {
        self.pending.push(Deferred::ClientMove(point));
        Ok(())
    }

    fn track_pointer_leave(&mut self, non_client: bool) -> Result<()> {
        // Queued so it is re-armed after any client move redelivered ahead of it.
        self.pending.push(Deferred::TrackLeave { non_client });
        Ok(())
    }

    fn screen_to_client(&self, point: Point) -> Result<Point> {
        let mut pt = POINT {
            x: point.x.round() as i32,
            y: point.y.round() as i32,
        };
        if !unsafe { ScreenToClient(self.hwnd, &mut pt) }.as_bool() {
            return Err(last_error());
        }
        Ok(Point::new(pt.x as f32, pt.y as f32))
    }
}

// ============================================================================
// Message Bridge
// ============================================================================

/// Chrome for one native window, driven from its window procedure.
pub struct Win32Chrome<R: RenderTarget> {
    hwnd: HWND,
    controller: RefCell<WindowController<R, Win32Requests>>,
    redelivering: Cell<bool>,
}

impl<R: RenderTarget> Win32Chrome<R> {
    /// Create chrome for a window and lay it out at its current size and DPI.
    pub fn new(hwnd: HWND, config: &ChromeConfig, render: R) -> Result<Self> {
        let dpi = horizon_chrome_core::DpiScale::new(unsafe { GetDpiForWindow(hwnd) })?;
        let controller = WindowController::new(config, render, Win32Requests::new(hwnd))?
            .with_dpi(dpi);
        let chrome = Self {
            hwnd,
            controller: RefCell::new(controller),
            redelivering: Cell::new(false),
        };
        chrome.sync_size(false)?;
        Ok(chrome)
    }

    /// The window handle.
    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// The controller.
    ///
    /// # Panics
    ///
    /// Panics if called from inside [`handle_message`](Self::handle_message).
    pub fn controller(&self) -> Ref<'_, WindowController<R, Win32Requests>> {
        self.controller.borrow()
    }

    /// The controller, mutably. Same restriction as [`controller`](Self::controller).
    pub fn controller_mut(&self) -> RefMut<'_, WindowController<R, Win32Requests>> {
        self.controller.borrow_mut()
    }

    /// Handle a window message.
    ///
    /// Returns the result to return from the window procedure, or `None` if
    /// the caller should run its own handling and `DefWindowProcW`.
    ///
    /// # Safety
    ///
    /// Must be called from the window procedure of this chrome's window with
    /// the message's own `wparam` and `lparam`; pointer-carrying messages
    /// are dereferenced.
    pub unsafe fn handle_message(&self, msg: u32, wparam: WPARAM, lparam: LPARAM) -> Option<LRESULT> {
        let result = match msg {
            WM_NCCALCSIZE => Some(unsafe { self.calc_size(wparam, lparam) }),
            WM_NCHITTEST => Some(self.hit_test(wparam, lparam)),
            WM_SIZE => {
                if let Err(error) = self.sync_size(wparam.0 as u32 == SIZE_MAXIMIZED) {
                    tracing::warn!(target: targets::PLATFORM, %error, "failed to read client rect");
                }
                None
            }
            WM_DPICHANGED => Some(unsafe { self.dpi_changed(wparam, lparam) }),
            WM_MOUSELEAVE | WM_NCMOUSELEAVE => {
                self.dispatch(ChromeEvent::PointerLeave);
                None
            }
            WM_DESTROY => {
                self.dispatch(ChromeEvent::WindowClosing);
                None
            }
            _ => {
                let (action, non_client) = decode_mouse_message(msg)?;
                self.mouse(action, non_client, wparam, lparam)
            }
        };
        self.flush();
        result
    }

    unsafe fn calc_size(&self, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
        // Both the RECT and NCCALCSIZE_PARAMS forms start with the window rect.
        let rect = lparam.0 as *mut RECT;
        unsafe {
            let top = (*rect).top;
            let result = DefWindowProcW(self.hwnd, WM_NCCALCSIZE, wparam, lparam);
            (*rect).top = top;
            result
        }
    }

    fn hit_test(&self, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
        let default = unsafe { DefWindowProcW(self.hwnd, WM_NCHITTEST, wparam, lparam) };
        let platform_default = HitTestCode::from_raw(default.0 as i32).unwrap_or(HitTestCode::Client);
        let response = self.dispatch(ChromeEvent::HitTestQuery {
            point: EventPoint::Screen(point_from_lparam(lparam)),
            platform_default,
        });
        let code = response.hit_test.unwrap_or(platform_default);
        LRESULT(code.to_raw() as isize)
    }

    unsafe fn dpi_changed(&self, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
        let dpi = (wparam.0 & 0xFFFF) as u32;
        let suggested = unsafe { *(lparam.0 as *const RECT) };
        let moved = unsafe {
            SetWindowPos(
                self.hwnd,
                HWND::default(),
                suggested.left,
                suggested.top,
                suggested.right - suggested.left,
                suggested.bottom - suggested.top,
                SWP_NOZORDER | SWP_NOACTIVATE,
            )
        };
        if let Err(error) = moved {
            tracing::warn!(target: targets::PLATFORM, %error, "failed to apply suggested rect");
        }
        self.dispatch(ChromeEvent::DpiChanged {
            suggested_rect: rect_from_win32(&suggested),
            dpi,
        });
        LRESULT(0)
    }

    fn mouse(
        &self,
        action: MouseAction,
        non_client: bool,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> Option<LRESULT> {
        if self.redelivering.get() {
            // Our own mirrored move; leave it to the host's client handling.
            return None;
        }

        let point = point_from_lparam(lparam);
        let (position, origin) = if non_client {
            let code = HitTestCode::from_raw(wparam.0 as i32).unwrap_or(HitTestCode::Nowhere);
            (EventPoint::Screen(point), PointerOrigin::NonClient(code))
        } else {
            (EventPoint::Client(point), PointerOrigin::Client)
        };

        let event = match action {
            MouseAction::Move => ChromeEvent::PointerMove { position, origin },
            MouseAction::Down(button) => ChromeEvent::PointerDown {
                position,
                button,
                origin,
            },
            MouseAction::Up(button) => ChromeEvent::PointerUp {
                position,
                button,
                origin,
            },
            MouseAction::DoubleClick(button) => ChromeEvent::PointerDoubleClick {
                position,
                button,
                origin,
            },
        };

        if self.dispatch(event).runs_default() {
            None
        } else {
            Some(LRESULT(0))
        }
    }

    fn sync_size(&self, maximized: bool) -> Result<()> {
        let mut rect = RECT::default();
        unsafe { GetClientRect(self.hwnd, &mut rect) }.map_err(ChromeError::platform)?;
        let maximized = maximized || unsafe { IsZoomed(self.hwnd) }.as_bool();
        self.dispatch(ChromeEvent::SizeChanged {
            client_rect: rect_from_win32(&rect),
            maximized,
        });
        Ok(())
    }

    fn dispatch(&self, event: ChromeEvent) -> crate::window::EventResponse {
        self.controller.borrow_mut().handle_event(event)
    }

    /// Carry out queued requests. The controller is not borrowed while a
    /// request runs, so messages sent by it can be handled.
    fn flush(&self) {
        loop {
            let pending = self.controller.borrow_mut().requests_mut().take_pending();
            if pending.is_empty() {
                break;
            }
            for request in pending {
                if let Err(error) = self.execute(request) {
                    tracing::warn!(target: targets::PLATFORM, ?request, %error, "platform request failed");
                }
            }
        }
    }

    fn execute(&self, request: Deferred) -> Result<()> {
        let hwnd = self.hwnd;
        match request {
            Deferred::Close => unsafe { DestroyWindow(hwnd) }.map_err(ChromeError::platform),
            Deferred::Minimize => {
                let _ = unsafe { ShowWindow(hwnd, SW_MINIMIZE) };
                Ok(())
            }
            Deferred::ToggleMaximize => {
                let command = if unsafe { IsZoomed(hwnd) }.as_bool() {
                    SW_RESTORE
                } else {
                    SW_MAXIMIZE
                };
                let _ = unsafe { ShowWindow(hwnd, command) };
                Ok(())
            }
            Deferred::SystemMenu(menu) => self.show_system_menu(&menu),
            Deferred::ClientMove(point) => {
                self.redelivering.set(true);
                unsafe {
                    SendMessageW(
                        hwnd,
                        WM_MOUSEMOVE,
                        WPARAM(0),
                        lparam_from_point(point.x.round() as i32, point.y.round() as i32),
                    );
                }
                self.redelivering.set(false);
                Ok(())
            }
            Deferred::TrackLeave { non_client } => track_mouse_leave(hwnd, non_client),
        }
    }

    fn show_system_menu(&self, request: &SystemMenuRequest) -> Result<()> {
        let hwnd = self.hwnd;
        let hmenu = unsafe { GetSystemMenu(hwnd, FALSE) };
        if hmenu.is_invalid() {
            return Err(ChromeError::platform("window has no system menu"));
        }

        let maximized = unsafe { IsZoomed(hwnd) }.as_bool();
        let minimized = unsafe { IsIconic(hwnd) }.as_bool();
        let restored = !maximized && !minimized;

        let default_item = match request.default_item {
            super::MenuItem::Restore => SC_RESTORE,
            super::MenuItem::Maximize => SC_MAXIMIZE,
        };
        unsafe { SetMenuDefaultItem(hmenu, default_item, 0) }.map_err(ChromeError::platform)?;

        for (command, enabled) in [
            (SC_RESTORE, !restored),
            (SC_SIZE, restored),
            (SC_MOVE, restored),
            (SC_MINIMIZE, !minimized),
            (SC_MAXIMIZE, !maximized),
        ] {
            let state = if enabled { MF_ENABLED } else { MF_GRAYED };
            if unsafe { EnableMenuItem(hmenu, command, MF_BYCOMMAND | state) }.0 == -1 {
                tracing::trace!(target: targets::PLATFORM, command, "menu item missing");
            }
        }

        let mut flags = TPM_TOPALIGN | TPM_RETURNCMD;
        if request.button == MouseButton::Right {
            flags |= TPM_RIGHTBUTTON;
        }
        if request.right_to_left {
            flags |= TPM_LAYOUTRTL;
        }
        if unsafe { GetSystemMetrics(SM_MENUDROPALIGNMENT) } != 0 {
            flags |= TPM_RIGHTALIGN;
        }

        let mut pt = POINT {
            x: request.anchor.x.round() as i32,
            y: request.anchor.y.round() as i32,
        };
        if !unsafe { ClientToScreen(hwnd, &mut pt) }.as_bool() {
            return Err(last_error());
        }

        let command = unsafe { TrackPopupMenu(hmenu, flags, pt.x, pt.y, 0, hwnd, None) }.0;
        tracing::debug!(target: targets::PLATFORM, command, region = %request.region, "system menu closed");
        if command != 0 {
            unsafe {
                SendMessageW(
                    hwnd,
                    WM_SYSCOMMAND,
                    WPARAM(command as usize),
                    lparam_from_point(pt.x, pt.y),
                );
            }
        }
        Ok(())
    }
}

impl<R: RenderTarget> std::fmt::Debug for Win32Chrome<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Win32Chrome")
            .field("hwnd", &self.hwnd)
            .field("redelivering", &self.redelivering.get())
            .finish_non_exhaustive()
    }
}
