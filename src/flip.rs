//! Main-axis collision strategy.
//!
//! When the panel overflows the viewport edge it extends toward, try the
//! opposite side once. The flip is kept only when the flipped panel clears
//! that side to within `padding` and is strictly better than the original;
//! otherwise the requested placement stands. At most one attempt is made
//! per pass.

#[cfg(test)]
#[path = "flip_test.rs"]
mod flip_test;

use crate::compute::{Candidate, Geometry};
use crate::options::PositionOptions;

/// Apply the flip strategy to `candidate`.
#[must_use]
pub fn flip(geometry: &Geometry, options: &PositionOptions, candidate: Candidate) -> Candidate {
    let main = candidate.overflow.on(candidate.placement.side());
    if main <= 0.0 {
        return candidate;
    }

    let flipped = geometry.measure(candidate.placement.flipped(), options);
    let flipped_main = flipped.overflow.on(flipped.placement.side());

    if flipped_main <= options.padding && flipped_main < main {
        tracing::trace!(from = %candidate.placement, to = %flipped.placement, main, flipped_main, "flip accepted");
        flipped
    } else {
        tracing::trace!(placement = %candidate.placement, main, flipped_main, "flip rejected");
        candidate
    }
}
