//! The rendering collaborator contract.
//!
//! The chrome state machine never draws. It pushes region geometry, visual
//! states and the pointer indicator into a [`RenderTarget`], which owns the
//! actual visuals (a compositor tree, a GPU renderer, a log). After every
//! handled event the target has been told a settled state: at most one region
//! is pressed and at most one is hovered.
//!
//! [`RecordingTarget`] records every call and is the target of choice for
//! tests.

use horizon_chrome_core::RegionId;

use crate::types::{Point, Rect};
use crate::visual_state::VisualState;

/// Receives visual updates from the chrome state machine.
pub trait RenderTarget {
    /// A region's visual state changed.
    fn set_region_visual_state(&mut self, id: RegionId, state: VisualState);

    /// A region's bounds changed (client coordinates, device pixels).
    fn set_region_bounds(&mut self, id: RegionId, bounds: Rect);

    /// The rasterization scale for a region's content changed.
    fn set_rasterization_scale(&mut self, id: RegionId, scale: f32);

    /// Show the pointer indicator at a client point.
    fn show_pointer_indicator(&mut self, position: Point, pressed: bool);

    /// Hide the pointer indicator.
    fn hide_pointer_indicator(&mut self);

    /// The pointer entered a region.
    fn region_entered(&mut self, _id: RegionId) {}

    /// The pointer left a region.
    fn region_left(&mut self, _id: RegionId) {}

    /// The window was maximized or restored; swaps the maximize glyph.
    fn set_window_maximized(&mut self, _maximized: bool) {}
}

impl<T: RenderTarget + ?Sized> RenderTarget for &mut T {
    fn set_region_visual_state(&mut self, id: RegionId, state: VisualState) {
        (**self).set_region_visual_state(id, state);
    }

    fn set_region_bounds(&mut self, id: RegionId, bounds: Rect) {
        (**self).set_region_bounds(id, bounds);
    }

    fn set_rasterization_scale(&mut self, id: RegionId, scale: f32) {
        (**self).set_rasterization_scale(id, scale);
    }

    fn show_pointer_indicator(&mut self, position: Point, pressed: bool) {
        (**self).show_pointer_indicator(position, pressed);
    }

    fn hide_pointer_indicator(&mut self) {
        (**self).hide_pointer_indicator();
    }

    fn region_entered(&mut self, id: RegionId) {
        (**self).region_entered(id);
    }

    fn region_left(&mut self, id: RegionId) {
        (**self).region_left(id);
    }

    fn set_window_maximized(&mut self, maximized: bool) {
        (**self).set_window_maximized(maximized);
    }
}

impl<T: RenderTarget + ?Sized> RenderTarget for Box<T> {
    fn set_region_visual_state(&mut self, id: RegionId, state: VisualState) {
        (**self).set_region_visual_state(id, state);
    }

    fn set_region_bounds(&mut self, id: RegionId, bounds: Rect) {
        (**self).set_region_bounds(id, bounds);
    }

    fn set_rasterization_scale(&mut self, id: RegionId, scale: f32) {
        (**self).set_rasterization_scale(id, scale);
    }

    fn show_pointer_indicator(&mut self, position: Point, pressed: bool) {
        (**self).show_pointer_indicator(position, pressed);
    }

    fn hide_pointer_indicator(&mut self) {
        (**self).hide_pointer_indicator();
    }

    fn region_entered(&mut self, id: RegionId) {
        (**self).region_entered(id);
    }

    fn region_left(&mut self, id: RegionId) {
        (**self).region_left(id);
    }

    fn set_window_maximized(&mut self, maximized: bool) {
        (**self).set_window_maximized(maximized);
    }
}

/// A single call made on a [`RenderTarget`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderCommand {
    /// `set_region_visual_state`
    VisualState(RegionId, VisualState),
    /// `set_region_bounds`
    Bounds(RegionId, Rect),
    /// `set_rasterization_scale`
    RasterizationScale(RegionId, f32),
    /// `show_pointer_indicator`
    ShowPointer { position: Point, pressed: bool },
    /// `hide_pointer_indicator`
    HidePointer,
    /// `region_entered`
    Entered(RegionId),
    /// `region_left`
    Left(RegionId),
    /// `set_window_maximized`
    Maximized(bool),
}

/// A render target that records every call.
#[derive(Debug, Default, Clone)]
pub struct RecordingTarget {
    commands: Vec<RenderCommand>,
}

impl RecordingTarget {
    /// Create an empty recording target.
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands recorded so far, oldest first.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the target empty.
    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Forget all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// The last visual state pushed for a region (`Normal` if none was).
    pub fn visual_state(&self, id: RegionId) -> VisualState {
        self.commands
            .iter()
            .rev()
            .find_map(|command| match *command {
                RenderCommand::VisualState(region, state) if region == id => Some(state),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// The last bounds pushed for a region.
    pub fn bounds(&self, id: RegionId) -> Option<Rect> {
        self.commands.iter().rev().find_map(|command| match *command {
            RenderCommand::Bounds(region, bounds) if region == id => Some(bounds),
            _ => None,
        })
    }

    /// Number of enter/leave notifications recorded.
    pub fn transition_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, RenderCommand::Entered(_) | RenderCommand::Left(_)))
            .count()
    }
}

impl RenderTarget for RecordingTarget {
    fn set_region_visual_state(&mut self, id: RegionId, state: VisualState) {
        self.commands.push(RenderCommand::VisualState(id, state));
    }

    fn set_region_bounds(&mut self, id: RegionId, bounds: Rect) {
        self.commands.push(RenderCommand::Bounds(id, bounds));
    }

    fn set_rasterization_scale(&mut self, id: RegionId, scale: f32) {
        self.commands.push(RenderCommand::RasterizationScale(id, scale));
    }

    fn show_pointer_indicator(&mut self, position: Point, pressed: bool) {
        self.commands.push(RenderCommand::ShowPointer { position, pressed });
    }

    fn hide_pointer_indicator(&mut self) {
        self.commands.push(RenderCommand::HidePointer);
    }

    fn region_entered(&mut self, id: RegionId) {
        self.commands.push(RenderCommand::Entered(id));
    }

    fn region_left(&mut self, id: RegionId) {
        self.commands.push(RenderCommand::Left(id));
    }

    fn set_window_maximized(&mut self, maximized: bool) {
        self.commands.push(RenderCommand::Maximized(maximized));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_target_tracks_last_state() {
        let mut target = RecordingTarget::new();
        assert_eq!(target.visual_state(RegionId::Close), VisualState::Normal);

        target.set_region_visual_state(RegionId::Close, VisualState::Hovered);
        target.set_region_visual_state(RegionId::Minimize, VisualState::Pressed);
        target.set_region_visual_state(RegionId::Close, VisualState::Normal);

        assert_eq!(target.visual_state(RegionId::Close), VisualState::Normal);
        assert_eq!(target.visual_state(RegionId::Minimize), VisualState::Pressed);
        assert_eq!(target.commands().len(), 3);
    }

    #[test]
    fn test_recording_through_mut_ref() {
        fn push(target: &mut impl RenderTarget) {
            target.region_entered(RegionId::Caption);
            target.region_left(RegionId::Caption);
        }

        let mut target = RecordingTarget::new();
        push(&mut &mut target);
        assert_eq!(target.transition_count(), 2);

        let taken = target.take();
        assert_eq!(taken.len(), 2);
        assert!(target.commands().is_empty());
    }

    #[test]
    fn test_boxed_target() {
        let mut boxed: Box<dyn RenderTarget> = Box::new(RecordingTarget::new());
        boxed.set_region_bounds(RegionId::Close, Rect::new(0.0, 0.0, 44.0, 47.0));
        boxed.hide_pointer_indicator();
    }
}
