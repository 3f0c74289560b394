//! Positioning engine for floating panels (dropdowns, popups, tooltips).
//!
//! Given an anchor rectangle, the size of a floating panel and the visible
//! viewport, the engine computes the top-left offset at which the panel
//! should be drawn. When the requested side would push the panel out of the
//! viewport it flips to the opposite side, then shifts along the cross axis
//! to keep the panel inside the padded viewport.
//!
//! The geometry is pure and browser-free. The optional `dom` feature adds a
//! `web-sys` host that measures real elements, listens for resize, scroll
//! and outside interaction, and writes the result back onto the panel.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`rect`] | `Point`, `Size` and `Rect` value types |
//! | [`anchor`] | Element and virtual anchors resolving to a `Rect` |
//! | [`placement`] | The 12 placements and the unconstrained resolver |
//! | [`overflow`] | Viewport collision measurement |
//! | [`flip`] | Main-axis collision strategy |
//! | [`shift`] | Cross-axis collision strategy |
//! | [`options`] | Caller configuration |
//! | [`compute`] | The pure resolve, flip, shift pipeline |
//! | [`engine`] | Activation lifecycle and recomputation triggers |
//! | `dom` | Browser host (feature `dom`) |
//! | [`consts`] | Shared numeric constants |

pub mod anchor;
pub mod compute;
pub mod consts;
#[cfg(feature = "dom")]
pub mod dom;
pub mod engine;
pub mod flip;
pub mod options;
pub mod overflow;
pub mod placement;
pub mod rect;
pub mod shift;

pub use anchor::{AnchorSource, VirtualAnchor};
pub use compute::{Geometry, PositionResult, compute_position};
pub use engine::{EngineState, Environment, PositionEngine, Trigger};
pub use options::PositionOptions;
pub use overflow::Overflow;
pub use placement::{Alignment, Axis, Placement, PlacementError, Side};
pub use rect::{Point, Rect, Size};
