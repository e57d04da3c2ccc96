//! The window controller.
//!
//! [`WindowController`] is the single context object behind a chrome window.
//! It owns the region set, the dispatcher, the classifier and the layout
//! engine, and it is the only thing platform glue talks to: every native
//! message becomes a [`ChromeEvent`], goes through
//! [`handle_event`](WindowController::handle_event), and comes back as an
//! [`EventResponse`] telling the glue what to answer and whether to run the
//! platform's default handling.
//!
//! # Disposition
//!
//! Default handling must still run where the window manager owns the
//! behavior:
//!
//! - the message carries a resize code (native resize and snap),
//! - the pointer is outside every region,
//! - the region passes to default (the caption, so native drag works),
//!   unless the event fired one of its bindings.
//!
//! Everything else (buttons, the icon, the content canvas) is swallowed.
//!
//! # Teardown
//!
//! After [`ChromeEvent::WindowClosing`] the region set is empty. Late events
//! still get an answer: pointer events run default handling and fire
//! nothing, hit tests return the platform default unchanged.

use horizon_chrome_core::logging::targets;
use horizon_chrome_core::{ChromeError, DpiScale, HitTestCode, PointerOrigin, RegionId, Result};
use horizon_chrome_render::{Point, Rect, RenderTarget};

use super::chrome_config::{ChromeConfig, ConfigError};
use super::dispatcher::{ActionRequest, DispatchEffect, InputDispatcher};
use super::event::{ChromeEvent, EventPoint};
use super::bindings::RegionAction;
use super::hit_test::HitTestClassifier;
use super::layout::LayoutEngine;
use super::region::HitRegion;
use super::region_set::RegionSet;
use crate::platform::{MenuItem, SystemMenuRequest, WindowRequests};

/// What the platform glue should do with the message after the controller
/// handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Disposition {
    /// Also run the platform's default handling.
    #[default]
    Default,
    /// The message was consumed.
    Handled,
}

/// The controller's answer to one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EventResponse {
    /// The hit-test code, for [`ChromeEvent::HitTestQuery`].
    pub hit_test: Option<HitTestCode>,
    /// Whether default handling should run.
    pub disposition: Disposition,
}

impl EventResponse {
    /// Run default handling, no hit-test answer.
    pub const DEFAULT: Self = Self {
        hit_test: None,
        disposition: Disposition::Default,
    };

    /// The message was consumed.
    pub const HANDLED: Self = Self {
        hit_test: None,
        disposition: Disposition::Handled,
    };

    /// A hit-test answer.
    pub fn hit_test(code: HitTestCode) -> Self {
        Self {
            hit_test: Some(code),
            disposition: Disposition::Handled,
        }
    }

    /// Check if default handling should run.
    #[inline]
    pub fn runs_default(&self) -> bool {
        self.disposition == Disposition::Default
    }
}

/// The chrome state machine for one window.
///
/// `R` receives visual updates, `P` carries out window requests. Both are
/// owned; pass `&mut` references to keep ownership outside.
pub struct WindowController<R, P> {
    regions: RegionSet,
    dispatcher: InputDispatcher,
    classifier: HitTestClassifier,
    layout: LayoutEngine,
    dpi: DpiScale,
    client_rect: Rect,
    maximized: bool,
    closed: bool,
    render: R,
    requests: P,
}

impl<R: RenderTarget, P: WindowRequests> WindowController<R, P> {
    /// Create a controller for a window.
    ///
    /// Regions are created immediately with empty bounds; the first
    /// [`ChromeEvent::SizeChanged`] lays them out.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::InvalidMetric`] if `config` fails
    /// [`ChromeConfig::validate`].
    pub fn new(config: &ChromeConfig, render: R, requests: P) -> Result<Self> {
        config.validate().map_err(|error| match error {
            ConfigError::Invalid { field, reason } => ChromeError::InvalidMetric { field, reason },
            other => ChromeError::InvalidMetric {
                field: "config",
                reason: other.to_string(),
            },
        })?;
        let layout = config.layout_engine();
        let regions = layout.create_regions(&config.synthesize_client_moves)?;
        tracing::debug!(
            target: targets::DISPATCH,
            regions = regions.len(),
            rtl = layout.direction().is_rtl(),
            "chrome controller created"
        );

        Ok(Self {
            regions,
            dispatcher: InputDispatcher::with_bindings(config.binding_table()),
            classifier: config.classifier(),
            layout,
            dpi: DpiScale::IDENTITY,
            client_rect: Rect::ZERO,
            maximized: false,
            closed: false,
            render,
            requests,
        })
    }

    /// Set the initial DPI before the first layout pass.
    pub fn with_dpi(mut self, dpi: DpiScale) -> Self {
        self.dpi = dpi;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The region set.
    pub fn regions(&self) -> &RegionSet {
        &self.regions
    }

    /// The dispatcher.
    pub fn dispatcher(&self) -> &InputDispatcher {
        &self.dispatcher
    }

    /// The classifier.
    pub fn classifier(&self) -> &HitTestClassifier {
        &self.classifier
    }

    /// The layout engine.
    pub fn layout_engine(&self) -> &LayoutEngine {
        &self.layout
    }

    /// The current DPI scale.
    pub fn dpi(&self) -> DpiScale {
        self.dpi
    }

    /// The current client rectangle.
    pub fn client_rect(&self) -> Rect {
        self.client_rect
    }

    /// Whether the window is maximized.
    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    /// Whether [`ChromeEvent::WindowClosing`] was handled.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The render target.
    pub fn render(&self) -> &R {
        &self.render
    }

    /// The render target, mutably.
    pub fn render_mut(&mut self) -> &mut R {
        &mut self.render
    }

    /// The window requests.
    pub fn requests(&self) -> &P {
        &self.requests
    }

    /// The window requests, mutably.
    pub fn requests_mut(&mut self) -> &mut P {
        &mut self.requests
    }

    /// Consume the controller and return the render target and requests.
    pub fn into_parts(self) -> (R, P) {
        (self.render, self.requests)
    }

    /// Add a region on top of the chrome with fixed bounds.
    ///
    /// Layout passes leave its bounds alone; move it with
    /// [`set_region_bounds`](Self::set_region_bounds).
    pub fn add_region(&mut self, region: HitRegion) -> Result<()> {
        if self.closed {
            return Err(ChromeError::WindowClosed);
        }
        let (id, bounds) = (region.id(), region.bounds());
        self.regions.insert(region)?;
        self.render.set_region_bounds(id, bounds);
        self.render.set_rasterization_scale(id, self.dpi.factor());
        Ok(())
    }

    /// Move a region.
    pub fn set_region_bounds(&mut self, id: RegionId, bounds: Rect) -> Result<()> {
        if self.closed {
            return Err(ChromeError::WindowClosed);
        }
        self.regions.set_bounds(id, bounds)?;
        self.render.set_region_bounds(id, bounds);
        Ok(())
    }

    // =========================================================================
    // Event Handling
    // =========================================================================

    /// Handle one event.
    pub fn handle_event(&mut self, event: ChromeEvent) -> EventResponse {
        match event {
            ChromeEvent::HitTestQuery {
                point,
                platform_default,
            } => self.hit_test(point, platform_default),
            ChromeEvent::PointerLeave => {
                if !self.closed {
                    let effects = self.dispatcher.pointer_leave(&mut self.regions);
                    self.apply(effects);
                }
                EventResponse::DEFAULT
            }
            ChromeEvent::PointerMove { position, origin } => {
                self.pointer_event(position, origin, |dispatcher, regions, point| {
                    dispatcher.pointer_move(regions, point, origin)
                })
            }
            ChromeEvent::PointerDown {
                position,
                button,
                origin,
            } => self.pointer_event(position, origin, |dispatcher, regions, point| {
                dispatcher.pointer_down(regions, point, button)
            }),
            ChromeEvent::PointerUp {
                position,
                button,
                origin,
            } => self.pointer_event(position, origin, |dispatcher, regions, point| {
                dispatcher.pointer_up(regions, point, button)
            }),
            ChromeEvent::PointerDoubleClick {
                position,
                button,
                origin,
            } => self.pointer_event(position, origin, |dispatcher, regions, point| {
                dispatcher.pointer_double_click(regions, point, button)
            }),
            ChromeEvent::SizeChanged {
                client_rect,
                maximized,
            } => {
                self.client_rect = client_rect;
                if maximized != self.maximized {
                    self.maximized = maximized;
                    tracing::debug!(target: targets::LAYOUT, maximized, "window state changed");
                    self.render.set_window_maximized(maximized);
                }
                self.layout_pass();
                EventResponse::HANDLED
            }
            ChromeEvent::DpiChanged { dpi, .. } => {
                match DpiScale::new(dpi) {
                    Ok(scale) => {
                        self.dpi = scale;
                        self.layout_pass();
                    }
                    Err(error) => {
                        tracing::warn!(
                            target: targets::LAYOUT,
                            %error,
                            current = self.dpi.dpi(),
                            "ignoring DPI change"
                        );
                    }
                }
                EventResponse::HANDLED
            }
            ChromeEvent::WindowClosing => {
                self.teardown();
                EventResponse::HANDLED
            }
        }
    }

    fn hit_test(&mut self, point: EventPoint, platform_default: HitTestCode) -> EventResponse {
        if self.closed {
            return EventResponse::hit_test(platform_default);
        }
        let Some(point) = self.to_client(point) else {
            return EventResponse::hit_test(platform_default);
        };
        let code = self
            .classifier
            .classify(point, platform_default, &self.regions, self.dpi);
        EventResponse::hit_test(code)
    }

    fn pointer_event(
        &mut self,
        position: EventPoint,
        origin: PointerOrigin,
        dispatch: impl FnOnce(&mut InputDispatcher, &mut RegionSet, Point) -> Vec<DispatchEffect>,
    ) -> EventResponse {
        if self.closed {
            tracing::trace!(target: targets::DISPATCH, ?origin, "pointer event after close");
            return EventResponse::DEFAULT;
        }
        let Some(point) = self.to_client(position) else {
            return EventResponse::DEFAULT;
        };

        let effects = dispatch(&mut self.dispatcher, &mut self.regions, point);
        let acted = effects
            .iter()
            .any(|effect| matches!(effect, DispatchEffect::Action(_)));
        self.apply(effects);
        self.disposition(point, origin, acted)
    }

    fn disposition(&self, point: Point, origin: PointerOrigin, acted: bool) -> EventResponse {
        if origin.hit_test_code().is_resize() {
            return EventResponse::DEFAULT;
        }
        // The platform must not run its own version of an action we just
        // fired (a caption right-click would open a second system menu).
        if acted {
            return EventResponse::HANDLED;
        }
        match self.regions.find_at(point) {
            Some(region) if !region.passes_to_default() => EventResponse::HANDLED,
            _ => EventResponse::DEFAULT,
        }
    }

    fn to_client(&self, point: EventPoint) -> Option<Point> {
        match point {
            EventPoint::Client(point) => Some(point),
            EventPoint::Screen(point) => match self.requests.screen_to_client(point) {
                Ok(point) => Some(point),
                Err(error) => {
                    tracing::warn!(target: targets::PLATFORM, %error, "screen_to_client failed");
                    None
                }
            },
        }
    }

    fn layout_pass(&mut self) {
        if self.closed {
            return;
        }
        let layout = self.layout.layout(self.client_rect, self.dpi);
        let scale = layout.rasterization_scale();
        for (id, rect) in layout.iter() {
            if self.regions.set_bounds(id, rect).is_ok() {
                self.render.set_region_bounds(id, rect);
                self.render.set_rasterization_scale(id, scale);
            }
        }
    }

    fn teardown(&mut self) {
        if self.closed {
            return;
        }
        tracing::debug!(target: targets::DISPATCH, "window closing, dropping regions");
        // Implicit leave and release: the target sees every region back at
        // Normal and the indicator hidden before the regions go away.
        let effects = self.dispatcher.pointer_leave(&mut self.regions);
        self.apply(effects);
        self.closed = true;
        self.dispatcher.reset();
        self.regions.clear();
    }

    fn apply(&mut self, effects: Vec<DispatchEffect>) {
        for effect in effects {
            match effect {
                DispatchEffect::VisualState { region, state } => {
                    self.render.set_region_visual_state(region, state);
                }
                DispatchEffect::Entered(region) => self.render.region_entered(region),
                DispatchEffect::Left(region) => self.render.region_left(region),
                DispatchEffect::ShowPointer { position, pressed } => {
                    self.render.show_pointer_indicator(position, pressed);
                }
                DispatchEffect::HidePointer => self.render.hide_pointer_indicator(),
                DispatchEffect::RedeliverClientMove(point) => {
                    let result = self.requests.redeliver_as_client_move(point);
                    report(result, "redeliver_as_client_move");
                }
                DispatchEffect::TrackLeave { non_client } => {
                    let result = self.requests.track_pointer_leave(non_client);
                    report(result, "track_pointer_leave");
                }
                DispatchEffect::Action(request) => self.perform(request),
            }
        }
    }

    fn perform(&mut self, request: ActionRequest) {
        let result = match request.action {
            RegionAction::Close => self.requests.request_close(),
            RegionAction::Minimize => self.requests.request_minimize(),
            RegionAction::ToggleMaximize => self.requests.toggle_maximize(),
            RegionAction::ShowSystemMenu(_) => {
                self.requests.show_system_menu(&SystemMenuRequest {
                    region: request.region,
                    anchor: request.anchor,
                    button: request.button,
                    default_item: MenuItem::default_for(self.maximized),
                    right_to_left: self.layout.direction().is_rtl(),
                    maximized: self.maximized,
                })
            }
        };
        report(result, "region action");
    }
}

fn report(result: Result<()>, request: &'static str) {
    if let Err(error) = result {
        tracing::warn!(target: targets::PLATFORM, request, %error, "platform request failed");
    }
}

impl<R, P> std::fmt::Debug for WindowController<R, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowController")
            .field("regions", &self.regions)
            .field("dispatcher", &self.dispatcher)
            .field("dpi", &self.dpi)
            .field("client_rect", &self.client_rect)
            .field("maximized", &self.maximized)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
