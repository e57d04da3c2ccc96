//! Chrome layout.
//!
//! [`LayoutEngine::layout`] maps a client rectangle and a DPI scale to the
//! bounds of every chrome region. It is a pure function: the same inputs
//! always give bit-identical output.
//!
//! ```text
//! ┌──────┬─────────────────────────────┬──────┬──────┬──────┐
//! │ icon │          caption            │ min  │ max  │close │  caption_height
//! ├──────┴─────────────────────────────┴──────┴──────┴──────┤
//! │                  content canvas (optional)              │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The caption spans the full width underneath the buttons; lookups are
//! top-down, so the buttons and icon take precedence where they overlap it.
//! In right-to-left layouts every rectangle is mirrored about the client
//! rectangle.

use horizon_chrome_core::logging::targets;
use horizon_chrome_core::{DpiScale, RegionId, Result};
use horizon_chrome_render::Rect;
use serde::{Deserialize, Serialize};

use super::region::HitRegion;
use super::region_set::RegionSet;

/// Default caption band height, in logical pixels.
pub const DEFAULT_CAPTION_HEIGHT: i32 = 47;

/// Default caption button width, in logical pixels.
pub const DEFAULT_BUTTON_WIDTH: i32 = 44;

/// Horizontal layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutDirection {
    /// Icon on the left, buttons on the right.
    #[default]
    #[serde(rename = "ltr")]
    LeftToRight,
    /// Icon on the right, buttons on the left.
    #[serde(rename = "rtl")]
    RightToLeft,
}

impl LayoutDirection {
    /// Check if this is a right-to-left layout.
    #[inline]
    pub fn is_rtl(self) -> bool {
        self == Self::RightToLeft
    }
}

/// Logical chrome metrics at 96 DPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeMetrics {
    /// Caption band height.
    pub caption_height: i32,
    /// Width of each caption button and of the icon.
    pub button_width: i32,
}

impl Default for ChromeMetrics {
    fn default() -> Self {
        Self {
            caption_height: DEFAULT_CAPTION_HEIGHT,
            button_width: DEFAULT_BUTTON_WIDTH,
        }
    }
}

impl ChromeMetrics {
    /// The metrics in device pixels.
    pub fn scaled(self, dpi: DpiScale) -> Self {
        Self {
            caption_height: dpi.scale(self.caption_height),
            button_width: dpi.scale(self.button_width),
        }
    }
}

/// Result of a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromeLayout {
    bounds: Vec<(RegionId, Rect)>,
    metrics: ChromeMetrics,
    dpi: DpiScale,
}

impl ChromeLayout {
    /// Bounds for a region id.
    pub fn get(&self, id: RegionId) -> Option<Rect> {
        self.bounds
            .iter()
            .find(|(region, _)| *region == id)
            .map(|(_, rect)| *rect)
    }

    /// All bounds in paint order (bottom first).
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, Rect)> + '_ {
        self.bounds.iter().copied()
    }

    /// Metrics in device pixels.
    pub fn metrics(&self) -> ChromeMetrics {
        self.metrics
    }

    /// The DPI scale the layout was computed for.
    pub fn dpi(&self) -> DpiScale {
        self.dpi
    }

    /// The rasterization scale for region content.
    pub fn rasterization_scale(&self) -> f32 {
        self.dpi.factor()
    }
}

/// Computes region bounds from the client rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutEngine {
    metrics: ChromeMetrics,
    direction: LayoutDirection,
    content_canvas: bool,
}

impl LayoutEngine {
    /// Create an engine with default metrics, left-to-right, no canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the logical metrics.
    pub fn with_metrics(mut self, metrics: ChromeMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Set the layout direction.
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Add a content canvas region below the caption band.
    pub fn with_content_canvas(mut self, enabled: bool) -> Self {
        self.content_canvas = enabled;
        self
    }

    /// The logical metrics.
    pub fn metrics(&self) -> ChromeMetrics {
        self.metrics
    }

    /// The layout direction.
    pub fn direction(&self) -> LayoutDirection {
        self.direction
    }

    /// Whether a content canvas is laid out.
    pub fn has_content_canvas(&self) -> bool {
        self.content_canvas
    }

    /// Region ids this engine lays out, in paint order.
    pub fn region_ids(&self) -> impl Iterator<Item = RegionId> {
        let canvas = self.content_canvas.then_some(RegionId::Client);
        canvas.into_iter().chain([
            RegionId::Caption,
            RegionId::SystemMenu,
            RegionId::Minimize,
            RegionId::Maximize,
            RegionId::Close,
        ])
    }

    /// Create the regions this engine lays out, with empty bounds.
    ///
    /// Regions whose id is in `synthesize` mirror non-client moves into
    /// client moves.
    pub fn create_regions(&self, synthesize: &[RegionId]) -> Result<RegionSet> {
        let mut regions = RegionSet::new();
        for id in self.region_ids() {
            regions.insert(
                HitRegion::new(id).with_synthesize_client_moves(synthesize.contains(&id)),
            )?;
        }
        Ok(regions)
    }

    /// Compute bounds for every region.
    pub fn layout(&self, client_rect: Rect, dpi: DpiScale) -> ChromeLayout {
        let metrics = self.metrics.scaled(dpi);
        let caption_height = metrics.caption_height as f32;
        let button_width = metrics.button_width as f32;

        let left = client_rect.left();
        let top = client_rect.top();
        let right = client_rect.right();
        let band_bottom = (top + caption_height).min(client_rect.bottom().max(top));

        let caption = Rect::from_ltrb(left, top, right, band_bottom);
        let icon = Rect::from_ltrb(left, top, left + button_width, band_bottom);
        let close = Rect::from_ltrb(right - button_width, top, right, band_bottom);
        let maximize = close.offset(-button_width, 0.0);
        let minimize = maximize.offset(-button_width, 0.0);

        let mut bounds = Vec::with_capacity(6);
        if self.content_canvas {
            let canvas_bottom = client_rect.bottom().max(band_bottom);
            bounds.push((
                RegionId::Client,
                Rect::from_ltrb(left, band_bottom, right, canvas_bottom),
            ));
        }
        bounds.extend([
            (RegionId::Caption, caption),
            (RegionId::SystemMenu, icon),
            (RegionId::Minimize, minimize),
            (RegionId::Maximize, maximize),
            (RegionId::Close, close),
        ]);

        if self.direction.is_rtl() {
            for (_, rect) in &mut bounds {
                *rect = rect.mirrored_in(&client_rect);
            }
        }

        tracing::debug!(
            target: targets::LAYOUT,
            width = client_rect.width(),
            height = client_rect.height(),
            dpi = dpi.dpi(),
            caption_height = metrics.caption_height,
            button_width = metrics.button_width,
            rtl = self.direction.is_rtl(),
            "layout pass"
        );

        ChromeLayout {
            bounds,
            metrics,
            dpi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Rect {
        Rect::new(0.0, 0.0, 700.0, 500.0)
    }

    #[test]
    fn test_layout_at_96_dpi() {
        let layout = LayoutEngine::new().layout(client(), DpiScale::IDENTITY);

        assert_eq!(layout.get(RegionId::Caption), Some(Rect::new(0.0, 0.0, 700.0, 47.0)));
        assert_eq!(layout.get(RegionId::SystemMenu), Some(Rect::new(0.0, 0.0, 44.0, 47.0)));
        assert_eq!(layout.get(RegionId::Close), Some(Rect::from_ltrb(656.0, 0.0, 700.0, 47.0)));
        assert_eq!(layout.get(RegionId::Maximize), Some(Rect::from_ltrb(612.0, 0.0, 656.0, 47.0)));
        assert_eq!(layout.get(RegionId::Minimize), Some(Rect::from_ltrb(568.0, 0.0, 612.0, 47.0)));
        assert_eq!(layout.get(RegionId::Client), None);
        assert_eq!(layout.rasterization_scale(), 1.0);
    }

    #[test]
    fn test_layout_at_144_dpi() {
        let dpi = DpiScale::new(144).unwrap();
        let layout = LayoutEngine::new().layout(client(), dpi);

        assert_eq!(layout.metrics(), ChromeMetrics { caption_height: 71, button_width: 66 });
        assert_eq!(layout.get(RegionId::Close), Some(Rect::from_ltrb(634.0, 0.0, 700.0, 71.0)));
        assert_eq!(layout.get(RegionId::Minimize), Some(Rect::from_ltrb(502.0, 0.0, 568.0, 71.0)));
        assert_eq!(layout.rasterization_scale(), 1.5);
    }

    #[test]
    fn test_buttons_contiguous() {
        for dpi in [96, 120, 144, 192] {
            let dpi = DpiScale::new(dpi).unwrap();
            let layout = LayoutEngine::new().layout(client(), dpi);
            let min = layout.get(RegionId::Minimize).unwrap();
            let max = layout.get(RegionId::Maximize).unwrap();
            let close = layout.get(RegionId::Close).unwrap();

            assert_eq!(close.right(), 700.0);
            assert_eq!(max.right(), close.left());
            assert_eq!(min.right(), max.left());
            assert!(min.intersect(&max).is_none());
            assert!(max.intersect(&close).is_none());
        }
    }

    #[test]
    fn test_deterministic() {
        let engine = LayoutEngine::new().with_content_canvas(true);
        let dpi = DpiScale::new(120).unwrap();
        assert_eq!(engine.layout(client(), dpi), engine.layout(client(), dpi));
    }

    #[test]
    fn test_content_canvas() {
        let layout = LayoutEngine::new()
            .with_content_canvas(true)
            .layout(client(), DpiScale::IDENTITY);
        assert_eq!(layout.get(RegionId::Client), Some(Rect::new(0.0, 47.0, 700.0, 453.0)));
        assert_eq!(layout.iter().next().map(|(id, _)| id), Some(RegionId::Client));
    }

    #[test]
    fn test_short_window_clamps_band() {
        let layout = LayoutEngine::new()
            .with_content_canvas(true)
            .layout(Rect::new(0.0, 0.0, 700.0, 30.0), DpiScale::IDENTITY);
        assert_eq!(layout.get(RegionId::Caption).map(|r| r.height()), Some(30.0));
        assert!(layout.get(RegionId::Client).is_some_and(|r| r.is_empty()));
    }

    #[test]
    fn test_rtl_mirrors() {
        let layout = LayoutEngine::new()
            .with_direction(LayoutDirection::RightToLeft)
            .layout(client(), DpiScale::IDENTITY);
        assert_eq!(layout.get(RegionId::SystemMenu), Some(Rect::from_ltrb(656.0, 0.0, 700.0, 47.0)));
        assert_eq!(layout.get(RegionId::Close), Some(Rect::from_ltrb(0.0, 0.0, 44.0, 47.0)));
        assert_eq!(layout.get(RegionId::Minimize), Some(Rect::from_ltrb(88.0, 0.0, 132.0, 47.0)));
        assert_eq!(layout.get(RegionId::Caption), Some(Rect::new(0.0, 0.0, 700.0, 47.0)));
    }

    #[test]
    fn test_create_regions() {
        let engine = LayoutEngine::new().with_content_canvas(true);
        let regions = engine.create_regions(&[RegionId::Maximize]).unwrap();
        let ids: Vec<_> = regions.bottom_up().map(HitRegion::id).collect();
        assert_eq!(
            ids,
            vec![
                RegionId::Client,
                RegionId::Caption,
                RegionId::SystemMenu,
                RegionId::Minimize,
                RegionId::Maximize,
                RegionId::Close,
            ]
        );
        assert!(regions.get(RegionId::Maximize).is_some_and(HitRegion::synthesizes_client_moves));
        assert!(!regions.get(RegionId::Close).is_some_and(HitRegion::synthesizes_client_moves));
    }
}
