//! Geometry value types shared by every stage of the pipeline.
//!
//! All coordinates are CSS pixels in viewport space. `Rect` and `Size` keep
//! their components finite and their extents non-negative, so downstream
//! arithmetic never has to re-check for NaN or inverted boxes.

#[cfg(test)]
#[path = "rect_test.rs"]
mod rect_test;

use serde::{Deserialize, Serialize};

/// A point in viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a box. Both are finite and `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "SizeFields")]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Build a size, clamping negative or non-finite extents to zero.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width: extent(width), height: extent(height) }
    }
}

#[derive(Deserialize)]
struct SizeFields {
    width: f64,
    height: f64,
}

impl From<SizeFields> for Size {
    fn from(fields: SizeFields) -> Self {
        Self::new(fields.width, fields.height)
    }
}

/// An immutable rectangle in viewport space.
///
/// Mirrors the shape of a native bounding-rect query: `x`/`y` are the
/// top-left corner and `top`/`left`/`right`/`bottom` are derived edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RectFields")]
pub struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
struct RectFields {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl From<RectFields> for Rect {
    fn from(fields: RectFields) -> Self {
        Self::new(fields.x, fields.y, fields.width, fields.height)
    }
}

impl Rect {
    /// The rect returned for anchors that cannot be measured.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    /// Build a rect. Negative extents become `0`; any non-finite component
    /// collapses the whole rect to [`Rect::ZERO`].
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::try_new(x, y, width, height).unwrap_or(Self::ZERO)
    }

    /// Build a rect, or `None` if any component is NaN or infinite.
    #[must_use]
    pub fn try_new(x: f64, y: f64, width: f64, height: f64) -> Option<Self> {
        if ![x, y, width, height].iter().all(|v| v.is_finite()) {
            return None;
        }
        Some(Self { x, y, width: width.max(0.0), height: height.max(0.0) })
    }

    /// Build a rect from its top-left corner and size.
    #[must_use]
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size { width: self.width, height: self.height }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Whether this is the zero rect produced by an unmeasurable or
    /// non-finite anchor.
    ///
    /// A zero-size rect away from the origin is a valid point anchor (for
    /// example a tracked pointer position) and is not degenerate.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        *self == Self::ZERO
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn extent(value: f64) -> f64 {
    finite_or_zero(value).max(0.0)
}
