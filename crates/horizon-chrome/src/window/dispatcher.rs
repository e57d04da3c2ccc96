//! Hover/press state machine.
//!
//! The [`InputDispatcher`] consumes pointer events that have already been
//! converted to client coordinates, tracks which region is hovered and which
//! one is pressed, keeps every region's [`VisualState`] in sync with that
//! state, and reports everything the outside world has to do as a list of
//! [`DispatchEffect`]s.
//!
//! Hover and press are tracked separately because they are orthogonal: a
//! region can be hovered and pressed at the same time (it renders Pressed),
//! pressed but no longer hovered (the pointer slid off while the button is
//! held; it renders Normal), or only hovered.
//!
//! # Visual states
//!
//! After every event:
//!
//! - the hovered region is `Pressed` if it is also the pressed region,
//!   `Hovered` otherwise;
//! - every other region is `Normal`.
//!
//! Only regions whose state changed produce a [`DispatchEffect::VisualState`].
//!
//! # Clicks
//!
//! A release is a click iff it resolves to the region the matching press
//! resolved to, with the same button, and no other press happened in between.
//! Every release clears the press, click or not.
//!
//! # Stale ids
//!
//! A hovered or pressed id whose region is no longer in the set is dropped
//! before the event is processed, which amounts to an implicit leave and
//! release.

use horizon_chrome_core::logging::targets;
use horizon_chrome_core::{MouseButton, PointerOrigin, RegionId};
use horizon_chrome_render::{Point, VisualState};

use super::bindings::{BindingTable, Gesture, MenuAnchor, RegionAction};
use super::region_set::RegionSet;

/// A region action ready to be carried out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionRequest {
    /// The region the gesture landed on.
    pub region: RegionId,
    /// What to do.
    pub action: RegionAction,
    /// The button that triggered it.
    pub button: MouseButton,
    /// Anchor point for menus, in client coordinates.
    pub anchor: Point,
}

/// Something the controller has to do after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DispatchEffect {
    /// A region's visual state changed.
    VisualState {
        region: RegionId,
        state: VisualState,
    },
    /// The pointer entered a region.
    Entered(RegionId),
    /// The pointer left a region.
    Left(RegionId),
    /// Move the pointer indicator.
    ShowPointer { position: Point, pressed: bool },
    /// Hide the pointer indicator.
    HidePointer,
    /// Re-deliver a non-client move as a client move at this client point.
    RedeliverClientMove(Point),
    /// Re-arm leave notifications for the given channel.
    TrackLeave { non_client: bool },
    /// Carry out a bound region action.
    Action(ActionRequest),
}

/// The hover/press state machine.
#[derive(Debug, Clone, Default)]
pub struct InputDispatcher {
    bindings: BindingTable,
    hovered: Option<RegionId>,
    pressed: Option<(RegionId, MouseButton)>,
    // A button is down, over a region or not. Drives the pointer indicator.
    held: bool,
}

impl InputDispatcher {
    /// Create a dispatcher with the standard bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher with a custom binding table.
    pub fn with_bindings(bindings: BindingTable) -> Self {
        Self {
            bindings,
            hovered: None,
            pressed: None,
            held: false,
        }
    }

    /// The binding table.
    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// The binding table, mutably.
    pub fn bindings_mut(&mut self) -> &mut BindingTable {
        &mut self.bindings
    }

    /// The region under the pointer.
    #[inline]
    pub fn hovered(&self) -> Option<RegionId> {
        self.hovered
    }

    /// The pressed region and the button pressed on it.
    #[inline]
    pub fn pressed(&self) -> Option<(RegionId, MouseButton)> {
        self.pressed
    }

    /// The visual state the state machine assigns to a region.
    pub fn visual_state_for(&self, id: RegionId) -> VisualState {
        if self.hovered != Some(id) {
            VisualState::Normal
        } else if self.pressed.is_some_and(|(pressed, _)| pressed == id) {
            VisualState::Pressed
        } else {
            VisualState::Hovered
        }
    }

    /// Handle a pointer move to a client point.
    ///
    /// `origin` is the channel the move arrived on. Non-client moves over a
    /// region that synthesizes client moves request a client redelivery.
    /// Leave tracking is re-armed on every move.
    pub fn pointer_move(
        &mut self,
        regions: &mut RegionSet,
        point: Point,
        origin: PointerOrigin,
    ) -> Vec<DispatchEffect> {
        let mut effects = Vec::new();
        self.drop_stale(regions);

        let resolved = regions.find_at(point);
        let synthesize = origin.is_non_client()
            && resolved.is_some_and(|region| region.synthesizes_client_moves());
        let resolved = resolved.map(|region| region.id());

        self.hover(regions, resolved, &mut effects);
        effects.push(DispatchEffect::ShowPointer {
            position: point,
            pressed: self.held,
        });

        if synthesize {
            effects.push(DispatchEffect::RedeliverClientMove(point));
        }
        // Re-armed after any redelivery so the outer message's channel wins.
        effects.push(DispatchEffect::TrackLeave {
            non_client: origin.is_non_client(),
        });
        effects
    }

    /// Handle the pointer leaving the tracked area.
    ///
    /// Clears hover and press, returns every region to Normal and hides the
    /// pointer indicator.
    pub fn pointer_leave(&mut self, regions: &mut RegionSet) -> Vec<DispatchEffect> {
        let mut effects = Vec::new();
        self.drop_stale(regions);

        if let Some((id, button)) = self.pressed.take() {
            tracing::trace!(target: targets::DISPATCH, %id, ?button, "press cancelled by leave");
        }
        self.held = false;
        self.hover(regions, None, &mut effects);
        effects.push(DispatchEffect::HidePointer);
        effects
    }

    /// Handle a button press at a client point.
    ///
    /// The press is recorded only if a region resolves; that region also
    /// becomes hovered so it renders Pressed. Press bindings fire here.
    pub fn pointer_down(
        &mut self,
        regions: &mut RegionSet,
        point: Point,
        button: MouseButton,
    ) -> Vec<DispatchEffect> {
        let mut effects = Vec::new();
        self.drop_stale(regions);

        let resolved = regions.region_at(point);
        self.pressed = resolved.map(|id| (id, button));
        self.held = true;
        tracing::trace!(target: targets::DISPATCH, region = ?resolved, ?button, "pointer down");

        self.hover(regions, resolved, &mut effects);
        effects.push(DispatchEffect::ShowPointer {
            position: point,
            pressed: self.held,
        });

        if let Some(id) = resolved {
            self.fire(regions, id, Gesture::Press, button, point, &mut effects);
        }
        effects
    }

    /// Handle a button release at a client point.
    ///
    /// Fires the click binding if the release completes a click. The press
    /// is always cleared and hover refreshed.
    pub fn pointer_up(
        &mut self,
        regions: &mut RegionSet,
        point: Point,
        button: MouseButton,
    ) -> Vec<DispatchEffect> {
        let mut effects = Vec::new();
        self.drop_stale(regions);

        let resolved = regions.region_at(point);
        let click = resolved.is_some() && self.pressed == resolved.map(|id| (id, button));
        self.pressed = None;
        self.held = false;
        tracing::trace!(target: targets::DISPATCH, region = ?resolved, ?button, click, "pointer up");

        self.hover(regions, resolved, &mut effects);
        effects.push(DispatchEffect::ShowPointer {
            position: point,
            pressed: false,
        });

        if let Some(id) = resolved.filter(|_| click) {
            self.fire(regions, id, Gesture::Click, button, point, &mut effects);
        }
        effects
    }

    /// Handle a double-click at a client point.
    ///
    /// Refreshes hover like a move, then fires the double-click binding. A
    /// double-click does not start a press, so the release that follows it
    /// is never a click.
    pub fn pointer_double_click(
        &mut self,
        regions: &mut RegionSet,
        point: Point,
        button: MouseButton,
    ) -> Vec<DispatchEffect> {
        let mut effects = Vec::new();
        self.drop_stale(regions);

        let resolved = regions.region_at(point);
        self.hover(regions, resolved, &mut effects);
        effects.push(DispatchEffect::ShowPointer {
            position: point,
            pressed: self.held,
        });

        if let Some(id) = resolved {
            self.fire(regions, id, Gesture::DoubleClick, button, point, &mut effects);
        }
        effects
    }

    /// Forget hover and press without producing effects.
    pub fn reset(&mut self) {
        self.hovered = None;
        self.pressed = None;
        self.held = false;
    }

    fn drop_stale(&mut self, regions: &RegionSet) {
        if let Some(id) = self.hovered.filter(|id| !regions.contains_id(*id)) {
            tracing::trace!(target: targets::DISPATCH, %id, "hovered region is gone");
            self.hovered = None;
        }
        if let Some((id, _)) = self.pressed.filter(|(id, _)| !regions.contains_id(*id)) {
            tracing::trace!(target: targets::DISPATCH, %id, "pressed region is gone");
            self.pressed = None;
        }
    }

    fn hover(
        &mut self,
        regions: &mut RegionSet,
        resolved: Option<RegionId>,
        effects: &mut Vec<DispatchEffect>,
    ) {
        if self.hovered != resolved {
            if let Some(old) = self.hovered.take() {
                tracing::trace!(target: targets::DISPATCH, region = %old, "leave");
                effects.push(DispatchEffect::Left(old));
            }
            self.hovered = resolved;
            if let Some(new) = resolved {
                tracing::trace!(target: targets::DISPATCH, region = %new, "enter");
                effects.push(DispatchEffect::Entered(new));
            }
        }
        self.sync_visual_states(regions, effects);
    }

    fn sync_visual_states(&self, regions: &mut RegionSet, effects: &mut Vec<DispatchEffect>) {
        for region in regions.top_down_mut() {
            let state = self.visual_state_for(region.id());
            if region.set_visual_state(state) {
                effects.push(DispatchEffect::VisualState {
                    region: region.id(),
                    state,
                });
            }
        }
    }

    fn fire(
        &self,
        regions: &RegionSet,
        id: RegionId,
        gesture: Gesture,
        button: MouseButton,
        point: Point,
        effects: &mut Vec<DispatchEffect>,
    ) {
        let Some(action) = self.bindings.lookup(id, gesture, button) else {
            return;
        };
        let anchor = match action {
            RegionAction::ShowSystemMenu(MenuAnchor::RegionBottomLeft) => regions
                .get(id)
                .map_or(point, |region| region.bounds().bottom_left()),
            _ => point,
        };
        tracing::debug!(target: targets::DISPATCH, region = %id, ?gesture, ?button, ?action, "region action");
        effects.push(DispatchEffect::Action(ActionRequest {
            region: id,
            action,
            button,
            anchor,
        }));
    }
}

#[cfg(test)]
mod tests {
    use horizon_chrome_core::{DpiScale, HitTestCode};
    use horizon_chrome_render::Rect;

    use super::*;
    use crate::window::LayoutEngine;

    fn regions() -> RegionSet {
        let engine = LayoutEngine::new();
        let mut regions = engine.create_regions(&[RegionId::Maximize]).unwrap();
        let layout = engine.layout(Rect::new(0.0, 0.0, 700.0, 500.0), DpiScale::IDENTITY);
        for (id, rect) in layout.iter() {
            regions.set_bounds(id, rect).unwrap();
        }
        regions
    }

    fn actions(effects: &[DispatchEffect]) -> Vec<RegionAction> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                DispatchEffect::Action(request) => Some(request.action),
                _ => None,
            })
            .collect()
    }

    const CLOSE: Point = Point::new(670.0, 20.0);
    const MAXIMIZE: Point = Point::new(630.0, 20.0);
    const CAPTION: Point = Point::new(300.0, 20.0);
    const ICON: Point = Point::new(20.0, 20.0);
    const CONTENT: Point = Point::new(300.0, 300.0);

    #[test]
    fn test_move_enters_and_hovers() {
        let mut regions = regions();
        let mut dispatcher = InputDispatcher::new();

        let effects = dispatcher.pointer_move(&mut regions, CLOSE, PointerOrigin::Client);
        assert!(effects.contains(&DispatchEffect::Entered(RegionId::Close)));
        assert!(effects.contains(&DispatchEffect::VisualState {
            region: RegionId::Close,
            state: VisualState::Hovered,
        }));
        assert_eq!(dispatcher.hovered(), Some(RegionId::Close));
        assert_eq!(
            effects.last(),
            Some(&DispatchEffect::TrackLeave { non_client: false })
        );
    }

    #[test]
    fn test_move_twice_is_idempotent() {
        let mut regions = regions();
        let mut dispatcher = InputDispatcher::new();

        dispatcher.pointer_move(&mut regions, CLOSE, PointerOrigin::Client);
        let effects = dispatcher.pointer_move(&mut regions, CLOSE, PointerOrigin::Client);
        assert!(!effects.iter().any(|effect| matches!(
            effect,
            DispatchEffect::Entered(_) | DispatchEffect::Left(_) | DispatchEffect::VisualState { .. }
        )));
    }

    #[test]
    fn test_move_between_regions() {
        let mut regions = regions();
        let mut dispatcher = InputDispatcher::new();

        dispatcher.pointer_move(&mut regions, CLOSE, PointerOrigin::Client);
        let effects = dispatcher.pointer_move(&mut regions, MAXIMIZE, PointerOrigin::Client);

        let left = effects.iter().position(|e| *e == DispatchEffect::Left(RegionId::Close));
        let entered = effects
            .iter()
            .position(|e| *e == DispatchEffect::Entered(RegionId::Maximize));
        assert!(left.is_some() && entered.is_some() && left < entered);
        assert_eq!(regions.get(RegionId::Close).map(|r| r.visual_state()), Some(VisualState::Normal));
        assert_eq!(
            regions.get(RegionId::Maximize).map(|r| r.visual_state()),
            Some(VisualState::Hovered)
        );
    }

    #[test]
    fn test_move_to_nothing_leaves() {
        let mut regions = regions();
        let mut dispatcher = InputDispatcher::new();

        dispatcher.pointer_move(&mut regions, CLOSE, PointerOrigin::Client);
        let effects = dispatcher.pointer_move(&mut regions, CONTENT, PointerOrigin::Client);
        assert!(effects.contains(&DispatchEffect::Left(RegionId::Close)));
        assert_eq!(dispatcher.hovered(), None);
        assert!(regions.top_down().all(|r| r.visual_state() == VisualState::Normal));
    }

    #[test]
    fn test_click_fires_on_matching_release() {
        let mut regions = regions();
        let mut dispatcher = InputDispatcher::new();

        let down = dispatcher.pointer_down(&mut regions, CLOSE, MouseButton::Left);
        assert!(actions(&down).is_empty());
        assert_eq!(
            regions.get(RegionId::Close).map(|r| r.visual_state()),
            Some(VisualState::Pressed)
        );

        let up = dispatcher.pointer_up(&mut regions, CLOSE, MouseButton::Left);
        assert_eq!(actions(&up), vec![RegionAction::Close]);
        assert_eq!(dispatcher.pressed(), None);
        assert_eq!(
            regions.get(RegionId::Close).map(|r| r.visual_state()),
            Some(VisualState::Hovered)
        );
    }

    #[test]
    fn test_other_button_release_is_not_a_click() {
        let mut regions = regions();
        let mut dispatcher = InputDispatcher::new();

        dispatcher.pointer_down(&mut regions, CLOSE, MouseButton::Left);
        let up = dispatcher.pointer_up(&mut regions, CLOSE, MouseButton::Right);
        assert!(actions(&up).is_empty());
        assert_eq!(dispatcher.pressed(), None);
    }

    #[test]
    fn test_up_without_down() {
        let mut regions = regions();
        let mut dispatcher = InputDispatcher::new();
        let up = dispatcher.pointer_up(&mut regions, CLOSE, MouseButton::Left);
        assert!(actions(&up).is_empty());
    }

    #[test]
    fn test_pressed_region_slides_off() {
        let mut regions = regions();
        let mut dispatcher = InputDispatcher::new();

        dispatcher.pointer_down(&mut regions, MAXIMIZE, MouseButton::Left);
        dispatcher.pointer_move(&mut regions, CLOSE, PointerOrigin::Client);
        assert_eq!(
            regions.get(RegionId::Maximize).map(|r| r.visual_state()),
            Some(VisualState::Normal)
        );
        assert_eq!(
            regions.get(RegionId::Close).map(|r| r.visual_state()),
            Some(VisualState::Hovered)
        );

        // Back over the pressed region while held
        dispatcher.pointer_move(&mut regions, MAXIMIZE, PointerOrigin::Client);
        assert_eq!(
            regions.get(RegionId::Maximize).map(|r| r.visual_state()),
            Some(VisualState::Pressed)
        );

        let up = dispatcher.pointer_up(&mut regions, MAXIMIZE, MouseButton::Left);
        assert_eq!(actions(&up), vec![RegionAction::ToggleMaximize]);
    }

    #[test]
    fn test_second_press_replaces_first() {
        let mut regions = regions();
        let mut dispatcher = InputDispatcher::new();

        dispatcher.pointer_down(&mut regions, CLOSE, MouseButton::Left);
        dispatcher.pointer_down(&mut regions, MAXIMIZE, MouseButton::Left);
        let up = dispatcher.pointer_up(&mut regions, CLOSE, MouseButton::Left);
        assert!(actions(&up).is_empty());
    }

    #[test]
    fn test_down_outside_regions_records_nothing() {
        let mut regions = regions();
        let mut dispatcher = InputDispatcher::new();

        let effects = dispatcher.pointer_down(&mut regions, CONTENT, MouseButton::Left);
        assert_eq!(dispatcher.pressed(), None);
        assert!(actions(&effects).is_empty());
    }

    #[test]
    fn test_indicator_pressed_while_button_held() {
        let mut regions = regions();
        let mut dispatcher = InputDispatcher::new();
        let indicator = |effects: &[DispatchEffect]| {
            effects.iter().find_map(|effect| match *effect {
                DispatchEffect::ShowPointer { pressed, .. } => Some(pressed),
                _ => None,
            })
        };

        let effects = dispatcher.pointer_down(&mut regions, CONTENT, MouseButton::Left);
        assert_eq!(indicator(&effects), Some(true));

        let effects = dispatcher.pointer_move(&mut regions, CAPTION, PointerOrigin::Client);
        assert_eq!(indicator(&effects), Some(true));

        let effects = dispatcher.pointer_up(&mut regions, CAPTION, MouseButton::Left);
        assert_eq!(indicator(&effects), Some(false));

        let effects = dispatcher.pointer_move(&mut regions, CONTENT, PointerOrigin::Client);
        assert_eq!(indicator(&effects), Some(false));
    }

    #[test]
    fn test_system_menu_opens_on_press() {
        let mut regions = regions();
        let mut dispatcher = InputDispatcher::new();

        let effects = dispatcher.pointer_down(&mut regions, ICON, MouseButton::Left);
        let request = effects.iter().find_map(|effect| match effect {
            DispatchEffect::Action(request) => Some(*request),
            _ => None,
        });
        assert_eq!(
            request,
            Some(ActionRequest {
                region: RegionId::SystemMenu,
                action: RegionAction::ShowSystemMenu(MenuAnchor::RegionBottomLeft),
                button: MouseButton::Left,
                anchor: Point::new(0.0, 47.0),
            })
        );

        // The release completes a click, but no click binding exists for it
        let up = dispatcher.pointer_up(&mut regions, ICON, MouseButton::Left);
        assert!(actions(&up).is_empty());
    }

    #[test]
    fn test_caption_right_click_anchors_at_pointer() {
        let mut regions = regions();
        let mut dispatcher = InputDispatcher::new();

        dispatcher.pointer_down(&mut regions, CAPTION, MouseButton::Right);
        let effects = dispatcher.pointer_up(&mut regions, CAPTION, MouseButton::Right);
        assert!(effects.iter().any(|effect| matches!(
            effect,
            DispatchEffect::Action(ActionRequest {
                region: RegionId::Caption,
                anchor,
                ..
            }) if *anchor == CAPTION
        )));
    }

    #[test]
    fn test_double_click_on_icon_closes() {
        let mut regions = regions();
        let mut dispatcher = InputDispatcher::new();

        let effects = dispatcher.pointer_double_click(&mut regions, ICON, MouseButton::Left);
        assert_eq!(actions(&effects), vec![RegionAction::Close]);
        assert_eq!(dispatcher.hovered(), Some(RegionId::SystemMenu));

        let up = dispatcher.pointer_up(&mut regions, ICON, MouseButton::Left);
        assert!(actions(&up).is_empty());
    }

    #[test]
    fn test_leave_resets_everything() {
        let mut regions = regions();
        let mut dispatcher = InputDispatcher::new();

        dispatcher.pointer_down(&mut regions, CLOSE, MouseButton::Left);
        let effects = dispatcher.pointer_leave(&mut regions);

        assert_eq!(dispatcher.hovered(), None);
        assert_eq!(dispatcher.pressed(), None);
        assert!(effects.contains(&DispatchEffect::HidePointer));
        assert!(regions.top_down().all(|r| r.visual_state() == VisualState::Normal));
    }

    #[test]
    fn test_non_client_move_synthesizes_client_move() {
        let mut regions = regions();
        let mut dispatcher = InputDispatcher::new();
        let origin = PointerOrigin::NonClient(HitTestCode::MaximizeButton);

        let effects = dispatcher.pointer_move(&mut regions, MAXIMIZE, origin);
        let redeliver = effects
            .iter()
            .position(|e| *e == DispatchEffect::RedeliverClientMove(MAXIMIZE));
        let track = effects
            .iter()
            .position(|e| *e == DispatchEffect::TrackLeave { non_client: true });
        assert!(redeliver.is_some() && track.is_some() && redeliver < track);

        // Client-origin moves are never redelivered
        let effects = dispatcher.pointer_move(&mut regions, MAXIMIZE, PointerOrigin::Client);
        assert!(!effects.iter().any(|e| matches!(e, DispatchEffect::RedeliverClientMove(_))));

        // Regions without the flag are not redelivered either
        let origin = PointerOrigin::NonClient(HitTestCode::CloseButton);
        let effects = dispatcher.pointer_move(&mut regions, CLOSE, origin);
        assert!(!effects.iter().any(|e| matches!(e, DispatchEffect::RedeliverClientMove(_))));
    }

    #[test]
    fn test_stale_ids_are_dropped() {
        let mut regions = regions();
        let mut dispatcher = InputDispatcher::new();

        dispatcher.pointer_down(&mut regions, CLOSE, MouseButton::Left);
        regions.clear();

        let effects = dispatcher.pointer_up(&mut regions, CLOSE, MouseButton::Left);
        assert!(actions(&effects).is_empty());
        assert_eq!(dispatcher.hovered(), None);
        assert_eq!(dispatcher.pressed(), None);
        assert!(!effects.iter().any(|e| matches!(e, DispatchEffect::Left(_))));
    }
}
