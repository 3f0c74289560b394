//! Shared numeric constants for the positioning engine.

// ── Collision ───────────────────────────────────────────────────

/// Default clearance between the floating panel and the viewport edge, in CSS pixels.
pub const DEFAULT_PADDING_PX: f64 = 4.0;

// ── Placement ───────────────────────────────────────────────────

/// Default gap between anchor and panel along the main axis, in CSS pixels.
pub const DEFAULT_OFFSET_PX: f64 = 0.0;
