//! A retained model of the chrome visuals.
//!
//! [`ChromeScene`] is a [`RenderTarget`] that keeps one node per region
//! (bounds, visual state, rasterization scale, palette, glyph) plus the
//! pointer indicator. A compositor or GPU backend reads the resolved fill
//! colors and glyphs from it when it repaints; the scene itself draws nothing.
//!
//! # Example
//!
//! ```
//! use horizon_chrome_core::RegionId;
//! use horizon_chrome_render::{ChromeScene, Color, Rect, RenderTarget, VisualState};
//!
//! let mut scene = ChromeScene::with_default_palettes();
//! scene.set_region_bounds(RegionId::Close, Rect::new(656.0, 0.0, 44.0, 47.0));
//! scene.set_region_visual_state(RegionId::Close, VisualState::Hovered);
//!
//! assert_eq!(scene.fill_color(RegionId::Close), Some(Color::RED));
//! assert!(scene.take_dirty());
//! ```

use std::collections::HashMap;

use horizon_chrome_core::RegionId;
use horizon_chrome_core::logging::targets;

use crate::target::RenderTarget;
use crate::types::{Color, Point, Rect};
use crate::visual_state::{StateColors, VisualState};

/// Glyph drawn on top of a region's background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Horizontal bar.
    Minimize,
    /// Single square.
    Maximize,
    /// Two overlapping squares.
    Restore,
    /// Diagonal cross.
    Close,
}

impl Glyph {
    /// Logical edge length of a glyph before DPI scaling.
    pub const LOGICAL_SIZE: f32 = 16.0;
}

/// Per-region visual node.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Bounds in client coordinates.
    pub bounds: Rect,
    /// Current visual state.
    pub state: VisualState,
    /// Rasterization scale for glyphs.
    pub scale: f32,
    /// Background colors per state.
    pub palette: StateColors,
    /// Glyph, if any.
    pub glyph: Option<Glyph>,
}

impl SceneNode {
    /// Create a node with a palette and optional glyph.
    pub fn new(palette: StateColors, glyph: Option<Glyph>) -> Self {
        Self {
            bounds: Rect::ZERO,
            state: VisualState::Normal,
            scale: 1.0,
            palette,
            glyph,
        }
    }

    /// Resolved background color for the current state.
    pub fn fill_color(&self) -> Color {
        self.palette.color_for(self.state)
    }

    /// Glyph edge length in device pixels.
    pub fn glyph_size(&self) -> f32 {
        Glyph::LOGICAL_SIZE * self.scale
    }
}

/// The pointer indicator (a small dot following the pointer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerIndicator {
    /// Center of the dot, client coordinates.
    pub position: Point,
    /// Whether a button is held.
    pub pressed: bool,
}

impl PointerIndicator {
    /// Indicator color while no button is held.
    pub const COLOR: Color = Color::DARK_RED;
    /// Indicator color while a button is held.
    pub const PRESSED_COLOR: Color = Color::YELLOW;

    /// Resolved color.
    pub fn color(&self) -> Color {
        if self.pressed {
            Self::PRESSED_COLOR
        } else {
            Self::COLOR
        }
    }
}

/// Retained visual model of the window chrome.
#[derive(Debug, Clone, Default)]
pub struct ChromeScene {
    nodes: HashMap<RegionId, SceneNode>,
    pointer: Option<PointerIndicator>,
    maximized: bool,
    dirty: bool,
}

impl ChromeScene {
    /// Create an empty scene. Regions get a node on their first update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene with the standard palettes and glyphs.
    pub fn with_default_palettes() -> Self {
        let button = StateColors::new(Color::TRANSPARENT, Color::NAVAJO_WHITE, Color::LIGHT_GRAY);
        let mut scene = Self::new();
        scene.insert_node(
            RegionId::Caption,
            SceneNode::new(StateColors::uniform(Color::AQUA), None),
        );
        scene.insert_node(
            RegionId::SystemMenu,
            SceneNode::new(StateColors::uniform(Color::BLUE_VIOLET), None),
        );
        scene.insert_node(
            RegionId::Minimize,
            SceneNode::new(button, Some(Glyph::Minimize)),
        );
        scene.insert_node(
            RegionId::Maximize,
            SceneNode::new(button, Some(Glyph::Maximize)),
        );
        scene.insert_node(
            RegionId::Close,
            SceneNode::new(
                StateColors::new(Color::TRANSPARENT, Color::RED, Color::DARK_RED),
                Some(Glyph::Close),
            ),
        );
        scene.dirty = false;
        scene
    }

    /// Insert or replace the node for a region.
    pub fn insert_node(&mut self, id: RegionId, node: SceneNode) {
        self.nodes.insert(id, node);
        self.dirty = true;
    }

    /// The node for a region.
    pub fn node(&self, id: RegionId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Resolved background color for a region.
    pub fn fill_color(&self, id: RegionId) -> Option<Color> {
        self.nodes.get(&id).map(SceneNode::fill_color)
    }

    /// The pointer indicator, if shown.
    pub fn pointer(&self) -> Option<PointerIndicator> {
        self.pointer
    }

    /// Whether the window is currently maximized.
    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    /// Return whether anything changed since the last call, and reset the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn node_mut(&mut self, id: RegionId) -> &mut SceneNode {
        self.nodes
            .entry(id)
            .or_insert_with(|| SceneNode::new(StateColors::uniform(Color::TRANSPARENT), None))
    }
}

impl RenderTarget for ChromeScene {
    fn set_region_visual_state(&mut self, id: RegionId, state: VisualState) {
        let node = self.node_mut(id);
        if node.state != state {
            node.state = state;
            self.dirty = true;
        }
    }

    fn set_region_bounds(&mut self, id: RegionId, bounds: Rect) {
        let node = self.node_mut(id);
        if node.bounds != bounds {
            node.bounds = bounds;
            self.dirty = true;
        }
    }

    fn set_rasterization_scale(&mut self, id: RegionId, scale: f32) {
        let node = self.node_mut(id);
        if node.scale != scale {
            tracing::trace!(target: targets::RENDER, %id, scale, "re-rasterizing region");
            node.scale = scale;
            self.dirty = true;
        }
    }

    fn show_pointer_indicator(&mut self, position: Point, pressed: bool) {
        self.pointer = Some(PointerIndicator { position, pressed });
        self.dirty = true;
    }

    fn hide_pointer_indicator(&mut self) {
        if self.pointer.take().is_some() {
            self.dirty = true;
        }
    }

    fn set_window_maximized(&mut self, maximized: bool) {
        self.maximized = maximized;
        if let Some(node) = self.nodes.get_mut(&RegionId::Maximize) {
            let glyph = if maximized {
                Glyph::Restore
            } else {
                Glyph::Maximize
            };
            if node.glyph != Some(glyph) {
                node.glyph = Some(glyph);
                self.dirty = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palettes() {
        let scene = ChromeScene::with_default_palettes();
        assert_eq!(scene.fill_color(RegionId::Caption), Some(Color::AQUA));
        assert_eq!(scene.fill_color(RegionId::Close), Some(Color::TRANSPARENT));
        assert_eq!(
            scene.node(RegionId::Minimize).and_then(|n| n.glyph),
            Some(Glyph::Minimize)
        );
        assert_eq!(scene.fill_color(RegionId::Client), None);
    }

    #[test]
    fn test_state_changes_resolve_colors() {
        let mut scene = ChromeScene::with_default_palettes();
        assert!(!scene.take_dirty());

        scene.set_region_visual_state(RegionId::Close, VisualState::Pressed);
        assert_eq!(scene.fill_color(RegionId::Close), Some(Color::DARK_RED));
        assert!(scene.take_dirty());

        // Same state again is not a change
        scene.set_region_visual_state(RegionId::Close, VisualState::Pressed);
        assert!(!scene.take_dirty());
    }

    #[test]
    fn test_maximize_glyph_swap() {
        let mut scene = ChromeScene::with_default_palettes();
        scene.set_window_maximized(true);
        assert!(scene.is_maximized());
        assert_eq!(
            scene.node(RegionId::Maximize).and_then(|n| n.glyph),
            Some(Glyph::Restore)
        );

        scene.set_window_maximized(false);
        assert_eq!(
            scene.node(RegionId::Maximize).and_then(|n| n.glyph),
            Some(Glyph::Maximize)
        );
    }

    #[test]
    fn test_pointer_indicator() {
        let mut scene = ChromeScene::new();
        scene.show_pointer_indicator(Point::new(10.0, 10.0), false);
        assert_eq!(scene.pointer().map(|p| p.color()), Some(PointerIndicator::COLOR));

        scene.show_pointer_indicator(Point::new(10.0, 10.0), true);
        assert_eq!(
            scene.pointer().map(|p| p.color()),
            Some(PointerIndicator::PRESSED_COLOR)
        );

        scene.hide_pointer_indicator();
        assert!(scene.pointer().is_none());
    }

    #[test]
    fn test_rasterization_scale_sizes_glyphs() {
        let mut scene = ChromeScene::with_default_palettes();
        scene.set_rasterization_scale(RegionId::Close, 1.5);
        assert_eq!(scene.node(RegionId::Close).map(SceneNode::glyph_size), Some(24.0));
    }

    #[test]
    fn test_unknown_region_gets_node() {
        let mut scene = ChromeScene::new();
        scene.set_region_bounds(RegionId::Client, Rect::new(0.0, 47.0, 700.0, 453.0));
        assert_eq!(
            scene.node(RegionId::Client).map(|n| n.bounds),
            Some(Rect::new(0.0, 47.0, 700.0, 453.0))
        );
    }
}
