//! Hit regions.

use horizon_chrome_core::{HitTestCode, RegionId};
use horizon_chrome_render::{Point, Rect, VisualState};

/// An interactive rectangle of the window chrome.
///
/// Bounds are always in client coordinates. The region's visual state is
/// owned by the [`InputDispatcher`](super::InputDispatcher); everything else
/// is fixed when the region is created, except the bounds, which every
/// layout pass rewrites.
#[derive(Debug, Clone, PartialEq)]
pub struct HitRegion {
    id: RegionId,
    bounds: Rect,
    synthesize_client_moves: bool,
    pass_to_default: bool,
    visual_state: VisualState,
}

impl HitRegion {
    /// Create a region with empty bounds.
    ///
    /// Caption regions pass pointer messages on to default handling so the
    /// native drag keeps working; every other id swallows them.
    pub fn new(id: RegionId) -> Self {
        Self {
            id,
            bounds: Rect::ZERO,
            synthesize_client_moves: false,
            pass_to_default: id == RegionId::Caption,
            visual_state: VisualState::Normal,
        }
    }

    /// Set the initial bounds.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Mirror non-client moves over this region into client moves.
    pub fn with_synthesize_client_moves(mut self, synthesize: bool) -> Self {
        self.synthesize_client_moves = synthesize;
        self
    }

    /// Let pointer messages over this region reach default handling.
    pub fn with_pass_to_default(mut self, pass: bool) -> Self {
        self.pass_to_default = pass;
        self
    }

    /// The semantic id.
    #[inline]
    pub fn id(&self) -> RegionId {
        self.id
    }

    /// Bounds in client coordinates.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub(crate) fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Check if a client point is inside the region.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    /// The hit-test code reported for points inside the region.
    #[inline]
    pub fn hit_test_code(&self) -> HitTestCode {
        self.id.hit_test_code()
    }

    /// Whether non-client moves over this region are mirrored as client moves.
    #[inline]
    pub fn synthesizes_client_moves(&self) -> bool {
        self.synthesize_client_moves
    }

    /// Whether pointer messages over this region also get default handling.
    #[inline]
    pub fn passes_to_default(&self) -> bool {
        self.pass_to_default
    }

    /// Current visual state.
    #[inline]
    pub fn visual_state(&self) -> VisualState {
        self.visual_state
    }

    /// Update the visual state, returning whether it changed.
    pub(crate) fn set_visual_state(&mut self, state: VisualState) -> bool {
        if self.visual_state == state {
            return false;
        }
        self.visual_state = state;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_passes_to_default() {
        assert!(HitRegion::new(RegionId::Caption).passes_to_default());
        assert!(!HitRegion::new(RegionId::Close).passes_to_default());
        assert!(!HitRegion::new(RegionId::SystemMenu).passes_to_default());
    }

    #[test]
    fn test_builder() {
        let region = HitRegion::new(RegionId::Maximize)
            .with_bounds(Rect::new(568.0, 0.0, 44.0, 47.0))
            .with_synthesize_client_moves(true);

        assert_eq!(region.id(), RegionId::Maximize);
        assert_eq!(region.hit_test_code(), HitTestCode::MaximizeButton);
        assert!(region.synthesizes_client_moves());
        assert!(region.contains(Point::new(568.0, 0.0)));
        assert!(!region.contains(Point::new(612.0, 0.0)));
        assert_eq!(region.visual_state(), VisualState::Normal);
    }

    #[test]
    fn test_set_visual_state_reports_change() {
        let mut region = HitRegion::new(RegionId::Close);
        assert!(region.set_visual_state(VisualState::Hovered));
        assert!(!region.set_visual_state(VisualState::Hovered));
        assert!(region.set_visual_state(VisualState::Normal));
    }
}
