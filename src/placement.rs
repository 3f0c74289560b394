//! Placements and the unconstrained placement resolver.
//!
//! A [`Placement`] names where the floating panel sits relative to its
//! anchor. It always decomposes into a [`Side`] (which anchor edge the panel
//! touches, and therefore the main axis) and an [`Alignment`] (how the panel
//! lines up with the anchor along the cross axis).
//!
//! [`resolve`] is the first stage of the pipeline: it places the panel
//! against the anchor with no regard for the viewport.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rect::{Point, Rect, Size};

/// Error returned when parsing an unknown placement name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("unknown placement: {0:?}")]
    Unknown(String),
}

/// An axis in viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

/// The anchor edge the floating panel is placed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// The side on the other end of the main axis.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The axis the panel moves along when changing between this side and its opposite.
    #[must_use]
    pub fn main_axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// The axis alignment applies to.
    #[must_use]
    pub fn cross_axis(self) -> Axis {
        match self.main_axis() {
            Axis::Vertical => Axis::Horizontal,
            Axis::Horizontal => Axis::Vertical,
        }
    }
}

/// Cross-axis alignment of the panel against the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Midpoints coincide.
    Center,
    /// Leading edges coincide.
    Start,
    /// Trailing edges coincide.
    End,
}

/// One of the 12 named placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Placement {
    Top,
    TopStart,
    TopEnd,
    #[default]
    Bottom,
    BottomStart,
    BottomEnd,
    Left,
    LeftStart,
    LeftEnd,
    Right,
    RightStart,
    RightEnd,
}

impl Placement {
    /// Every placement, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Top,
        Self::TopStart,
        Self::TopEnd,
        Self::Bottom,
        Self::BottomStart,
        Self::BottomEnd,
        Self::Left,
        Self::LeftStart,
        Self::LeftEnd,
        Self::Right,
        Self::RightStart,
        Self::RightEnd,
    ];

    /// Compose a placement from its side and alignment.
    #[must_use]
    pub fn from_parts(side: Side, alignment: Alignment) -> Self {
        match (side, alignment) {
            (Side::Top, Alignment::Center) => Self::Top,
            (Side::Top, Alignment::Start) => Self::TopStart,
            (Side::Top, Alignment::End) => Self::TopEnd,
            (Side::Bottom, Alignment::Center) => Self::Bottom,
            (Side::Bottom, Alignment::Start) => Self::BottomStart,
            (Side::Bottom, Alignment::End) => Self::BottomEnd,
            (Side::Left, Alignment::Center) => Self::Left,
            (Side::Left, Alignment::Start) => Self::LeftStart,
            (Side::Left, Alignment::End) => Self::LeftEnd,
            (Side::Right, Alignment::Center) => Self::Right,
            (Side::Right, Alignment::Start) => Self::RightStart,
            (Side::Right, Alignment::End) => Self::RightEnd,
        }
    }

    #[must_use]
    pub fn side(self) -> Side {
        match self {
            Self::Top | Self::TopStart | Self::TopEnd => Side::Top,
            Self::Bottom | Self::BottomStart | Self::BottomEnd => Side::Bottom,
            Self::Left | Self::LeftStart | Self::LeftEnd => Side::Left,
            Self::Right | Self::RightStart | Self::RightEnd => Side::Right,
        }
    }

    #[must_use]
    pub fn alignment(self) -> Alignment {
        match self {
            Self::Top | Self::Bottom | Self::Left | Self::Right => Alignment::Center,
            Self::TopStart | Self::BottomStart | Self::LeftStart | Self::RightStart => Alignment::Start,
            Self::TopEnd | Self::BottomEnd | Self::LeftEnd | Self::RightEnd => Alignment::End,
        }
    }

    /// The same alignment on the opposite side.
    #[must_use]
    pub fn flipped(self) -> Self {
        Self::from_parts(self.side().opposite(), self.alignment())
    }

    /// The kebab-case name, e.g. `"bottom-start"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::TopStart => "top-start",
            Self::TopEnd => "top-end",
            Self::Bottom => "bottom",
            Self::BottomStart => "bottom-start",
            Self::BottomEnd => "bottom-end",
            Self::Left => "left",
            Self::LeftStart => "left-start",
            Self::LeftEnd => "left-end",
            Self::Right => "right",
            Self::RightStart => "right-start",
            Self::RightEnd => "right-end",
        }
    }

    /// Parse a placement name, falling back to [`Placement::Bottom`] for anything unknown.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|err: PlacementError| {
            tracing::warn!(%err, "falling back to default placement");
            Self::default()
        })
    }
}

impl FromStr for Placement {
    type Err = PlacementError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let name = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|placement| placement.as_str() == name)
            .ok_or_else(|| PlacementError::Unknown(value.to_owned()))
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Placement {
    fn from(value: String) -> Self {
        Self::parse_or_default(&value)
    }
}

impl From<Placement> for &'static str {
    fn from(placement: Placement) -> Self {
        placement.as_str()
    }
}

/// Place `floating` against `anchor` on the requested side, ignoring the viewport.
///
/// Returns the panel's top-left corner.
#[must_use]
pub fn resolve(anchor: Rect, floating: Size, placement: Placement) -> Point {
    resolve_with_offset(anchor, floating, placement, 0.0)
}

/// Like [`resolve`], with the panel pushed `offset` pixels away from the anchor
/// along the main axis. Negative offsets overlap the anchor.
#[must_use]
pub fn resolve_with_offset(anchor: Rect, floating: Size, placement: Placement, offset: f64) -> Point {
    let alignment = placement.alignment();
    match placement.side() {
        Side::Top => Point::new(
            cross_start(anchor.x(), anchor.width(), floating.width, alignment),
            anchor.y() - floating.height - offset,
        ),
        Side::Bottom => Point::new(
            cross_start(anchor.x(), anchor.width(), floating.width, alignment),
            anchor.bottom() + offset,
        ),
        Side::Left => Point::new(
            anchor.x() - floating.width - offset,
            cross_start(anchor.y(), anchor.height(), floating.height, alignment),
        ),
        Side::Right => Point::new(
            anchor.right() + offset,
            cross_start(anchor.y(), anchor.height(), floating.height, alignment),
        ),
    }
}

/// Leading coordinate of the panel on the cross axis.
fn cross_start(anchor_start: f64, anchor_len: f64, floating_len: f64, alignment: Alignment) -> f64 {
    match alignment {
        Alignment::Center => anchor_start + (anchor_len - floating_len) * 0.5,
        Alignment::Start => anchor_start,
        Alignment::End => anchor_start + anchor_len - floating_len,
    }
}
