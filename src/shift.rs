//! Cross-axis collision strategy.

#[cfg(test)]
#[path = "shift_test.rs"]
mod shift_test;

use crate::compute::{Candidate, Geometry};
use crate::options::PositionOptions;
use crate::placement::Axis;

/// Slide `candidate` along its cross axis into the padded viewport.
///
/// The placement never changes. A panel larger than the viewport on the
/// cross axis is pinned to the leading padded edge and the remaining
/// overflow is left in the returned candidate.
#[must_use]
pub fn shift(geometry: &Geometry, options: &PositionOptions, candidate: Candidate) -> Candidate {
    let Geometry { viewport, floating, .. } = *geometry;
    let padding = options.padding;
    let mut origin = candidate.origin;
    match candidate.placement.side().cross_axis() {
        Axis::Horizontal => {
            origin.x = clamp_cross(origin.x, viewport.left(), viewport.width(), floating.width, padding);
        }
        Axis::Vertical => {
            origin.y = clamp_cross(origin.y, viewport.top(), viewport.height(), floating.height, padding);
        }
    }
    geometry.candidate_at(candidate.placement, origin, padding)
}

/// Clamp a leading coordinate into `[start + padding, start + len - floating_len - padding]`.
fn clamp_cross(value: f64, start: f64, len: f64, floating_len: f64, padding: f64) -> f64 {
    let min = start + padding;
    let max = start + len - floating_len - padding;
    if max < min { min } else { value.clamp(min, max) }
}
