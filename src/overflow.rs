//! Viewport collision measurement.
//!
//! Both collision strategies read the same [`Overflow`] vector, so a flip
//! decision and the shift that follows it always agree on how far the panel
//! sticks out.

#[cfg(test)]
#[path = "overflow_test.rs"]
mod overflow_test;

use serde::{Deserialize, Serialize};

use crate::placement::Side;
use crate::rect::Rect;

/// How far a rect exceeds the padded viewport on each side. Every component is `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Overflow {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Overflow {
    /// The overflow past the given viewport edge.
    #[must_use]
    pub fn on(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.top,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Whether the rect sits entirely inside the padded viewport.
    #[must_use]
    pub fn fits(&self) -> bool {
        self.top <= 0.0 && self.bottom <= 0.0 && self.left <= 0.0 && self.right <= 0.0
    }
}

/// Measure `candidate` against `viewport` shrunk by `padding` on every side.
#[must_use]
pub fn overflow(candidate: Rect, viewport: Rect, padding: f64) -> Overflow {
    Overflow {
        top: (viewport.top() + padding - candidate.top()).max(0.0),
        bottom: (candidate.bottom() - (viewport.bottom() - padding)).max(0.0),
        left: (viewport.left() + padding - candidate.left()).max(0.0),
        right: (candidate.right() - (viewport.right() - padding)).max(0.0),
    }
}
