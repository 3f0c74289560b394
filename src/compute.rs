//! The positioning pipeline: resolve, then flip, then shift.
//!
//! Everything here is pure. Given the same [`Geometry`] and
//! [`PositionOptions`], [`compute_position`] always yields the same
//! [`PositionResult`].

#[cfg(test)]
#[path = "compute_test.rs"]
mod compute_test;

use serde::{Deserialize, Serialize};

use crate::flip::flip;
use crate::options::PositionOptions;
use crate::overflow::{Overflow, overflow};
use crate::placement::{Placement, resolve_with_offset};
use crate::rect::{Point, Rect, Size};
use crate::shift::shift;

/// Measurements a positioning pass works from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Resolved anchor rect.
    pub anchor: Rect,
    /// Size of the floating panel.
    pub floating: Size,
    /// Visible area the panel must stay inside.
    pub viewport: Rect,
}

impl Geometry {
    #[must_use]
    pub fn new(anchor: Rect, floating: Size, viewport: Rect) -> Self {
        Self { anchor, floating, viewport }
    }

    /// Resolve `placement` and measure the resulting panel rect against the viewport.
    #[must_use]
    pub fn measure(&self, placement: Placement, options: &PositionOptions) -> Candidate {
        let origin = resolve_with_offset(self.anchor, self.floating, placement, options.offset);
        self.candidate_at(placement, origin, options.padding)
    }

    /// Measure the panel at an explicit origin.
    #[must_use]
    pub fn candidate_at(&self, placement: Placement, origin: Point, padding: f64) -> Candidate {
        let rect = Rect::from_origin_size(origin, self.floating);
        Candidate { placement, origin, overflow: overflow(rect, self.viewport, padding) }
    }
}

/// An intermediate position as it moves through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub placement: Placement,
    pub origin: Point,
    pub overflow: Overflow,
}

/// Final output of a positioning pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionResult {
    /// Left offset of the panel, in the anchor's coordinate space.
    pub x: f64,
    /// Top offset of the panel, in the anchor's coordinate space.
    pub y: f64,
    /// Placement actually used; differs from the requested one after a flip.
    pub placement: Placement,
    /// Overflow left over after flip and shift (non-zero for oversized panels).
    pub overflow: Overflow,
}

impl PositionResult {
    /// The offset as CSS lengths, `(left, top)`, e.g. `("32px", "125px")`.
    #[must_use]
    pub fn css_offset(&self) -> (String, String) {
        (css_px(self.x), css_px(self.y))
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<Candidate> for PositionResult {
    fn from(candidate: Candidate) -> Self {
        Self {
            x: candidate.origin.x,
            y: candidate.origin.y,
            placement: candidate.placement,
            overflow: candidate.overflow,
        }
    }
}

fn css_px(value: f64) -> String {
    // Adding zero folds `-0.0` into `0.0`.
    format!("{}px", value + 0.0)
}

/// Run the full pipeline for one frame.
#[must_use]
pub fn compute_position(geometry: &Geometry, options: &PositionOptions) -> PositionResult {
    let options = options.sanitized();
    let mut candidate = geometry.measure(options.placement, &options);
    if options.flip {
        candidate = flip(geometry, &options, candidate);
    }
    if options.shift {
        candidate = shift(geometry, &options, candidate);
    }
    candidate.into()
}
