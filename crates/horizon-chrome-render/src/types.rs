//! Geometry and color.
//!
//! Chrome geometry is in client coordinates (origin at the top-left of the
//! client area) and device pixels. Rectangles are half-open, so two buttons
//! sharing an edge never both claim a point on it.

/// A point in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The client origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero or negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle: origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// The empty rectangle at the client origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Build from left, top, right and bottom edges.
    #[inline]
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// A rectangle of `size` anchored at the client origin.
    #[inline]
    pub fn from_size(size: Size) -> Self {
        Self {
            origin: Point::ZERO,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// The bottom-left corner, where drop-down menus anchor.
    #[inline]
    pub fn bottom_left(&self) -> Point {
        Point::new(self.left(), self.bottom())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Half-open containment: left and top edges in, right and bottom out.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        (self.left()..self.right()).contains(&point.x)
            && (self.top()..self.bottom()).contains(&point.y)
    }

    /// The overlap of two rectangles, if it has area.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let overlap = Rect::from_ltrb(
            self.left().max(other.left()),
            self.top().max(other.top()),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        );
        (!overlap.is_empty()).then_some(overlap)
    }

    /// The same rectangle moved by `(dx, dy)`.
    #[inline]
    pub fn offset(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.left() + dx, self.top() + dy, self.width(), self.height())
    }

    /// Mirror horizontally inside `container`.
    ///
    /// A rectangle flush with the container's left edge ends up flush with
    /// its right edge.
    #[inline]
    pub fn mirrored_in(&self, container: &Rect) -> Rect {
        let left = container.left() + (container.right() - self.right());
        Rect::new(left, self.top(), self.width(), self.height())
    }
}

/// An RGBA color, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

const fn rgb8(r: u8, g: u8, b: u8) -> Color {
    Color::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Self = rgb8(255, 0, 0);
    pub const DARK_RED: Self = rgb8(139, 0, 0);
    pub const NAVAJO_WHITE: Self = rgb8(255, 222, 173);
    pub const LIGHT_GRAY: Self = rgb8(211, 211, 211);
    pub const AQUA: Self = rgb8(0, 255, 255);
    pub const BLUE_VIOLET: Self = rgb8(138, 43, 226);
    pub const YELLOW: Self = rgb8(255, 255, 0);
}
