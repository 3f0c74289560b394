//! Caller configuration for a positioning pass.

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_OFFSET_PX, DEFAULT_PADDING_PX};
use crate::placement::Placement;

/// Options controlling placement and collision avoidance.
///
/// Deserializes from a partial JSON object; missing fields take their
/// defaults and an unknown `placement` falls back to `bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionOptions {
    /// Requested placement. Flip may resolve to its opposite.
    pub placement: Placement,
    /// Swap to the opposite side when the main axis overflows.
    pub flip: bool,
    /// Slide along the cross axis to stay inside the viewport.
    pub shift: bool,
    /// Required clearance from the viewport edge, in pixels.
    pub padding: f64,
    /// Gap between anchor and panel along the main axis, in pixels.
    pub offset: f64,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            flip: true,
            shift: true,
            padding: DEFAULT_PADDING_PX,
            offset: DEFAULT_OFFSET_PX,
        }
    }
}

impl PositionOptions {
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn with_flip(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    #[must_use]
    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Replace out-of-range values with defaults.
    ///
    /// A negative or non-finite padding becomes [`DEFAULT_PADDING_PX`]; a
    /// non-finite offset becomes [`DEFAULT_OFFSET_PX`].
    #[must_use]
    pub fn sanitized(self) -> Self {
        let padding = if self.padding.is_finite() && self.padding >= 0.0 {
            self.padding
        } else {
            tracing::warn!(padding = self.padding, "invalid padding; using default");
            DEFAULT_PADDING_PX
        };
        let offset = if self.offset.is_finite() {
            self.offset
        } else {
            tracing::warn!(offset = self.offset, "invalid offset; using default");
            DEFAULT_OFFSET_PX
        };
        Self { padding, offset, ..self }
    }
}
