#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;
use crate::placement::Placement;
use crate::rect::{Rect, Size};

fn viewport() -> Rect {
    Rect::new(0.0, 0.0, 800.0, 600.0)
}

fn run(anchor: Rect, floating: Size, placement: Placement) -> Candidate {
    let geometry = Geometry::new(anchor, floating, viewport());
    let options = PositionOptions::default().with_placement(placement);
    flip(&geometry, &options, geometry.measure(placement, &options))
}

#[test]
fn no_overflow_keeps_placement() {
    let c = run(Rect::new(388.0, 288.0, 24.0, 24.0), Size::new(150.0, 40.0), Placement::Bottom);
    assert_eq!(c.placement, Placement::Bottom);
}

#[test]
fn bottom_near_lower_edge_flips_to_top() {
    let c = run(Rect::new(100.0, 580.0, 24.0, 24.0), Size::new(100.0, 40.0), Placement::Bottom);
    assert_eq!(c.placement, Placement::Top);
    assert_eq!(c.origin.y, 540.0);
    assert_eq!(c.overflow.top, 0.0);
}

#[test]
fn top_near_upper_edge_flips_to_bottom() {
    let c = run(Rect::new(100.0, 10.0, 24.0, 24.0), Size::new(100.0, 40.0), Placement::TopStart);
    assert_eq!(c.placement, Placement::BottomStart);
    assert_eq!(c.origin.y, 34.0);
}

#[test]
fn left_near_left_edge_flips_to_right() {
    let c = run(Rect::new(20.0, 300.0, 24.0, 24.0), Size::new(100.0, 40.0), Placement::LeftEnd);
    assert_eq!(c.placement, Placement::RightEnd);
}

#[test]
fn right_near_right_edge_flips_to_left() {
    let c = run(Rect::new(760.0, 300.0, 24.0, 24.0), Size::new(100.0, 40.0), Placement::Right);
    assert_eq!(c.placement, Placement::Left);
}

#[test]
fn flip_keeps_alignment() {
    let c = run(Rect::new(100.0, 580.0, 24.0, 24.0), Size::new(100.0, 40.0), Placement::BottomEnd);
    assert_eq!(c.placement, Placement::TopEnd);
}

#[test]
fn both_sides_overflowing_reverts_to_original() {
    // 300px tall panel next to a 24px anchor in the middle of a 400px viewport:
    // neither side has room.
    let geometry = Geometry::new(
        Rect::new(100.0, 180.0, 24.0, 24.0),
        Size::new(100.0, 300.0),
        Rect::new(0.0, 0.0, 800.0, 400.0),
    );
    let options = PositionOptions::default();
    let original = geometry.measure(Placement::Bottom, &options);
    assert!(original.overflow.bottom > 0.0);
    let c = flip(&geometry, &options, original);
    assert_eq!(c, original);
}

#[test]
fn flipped_within_padding_tolerance_is_accepted() {
    // Flipped top edge lands at y = 2, inside the 4px band: overflow 2 <= padding.
    let geometry = Geometry::new(
        Rect::new(100.0, 42.0, 24.0, 24.0),
        Size::new(100.0, 40.0),
        Rect::new(0.0, 0.0, 800.0, 100.0),
    );
    let options = PositionOptions::default();
    let original = geometry.measure(Placement::Bottom, &options);
    assert_eq!(original.overflow.bottom, 10.0);
    let c = flip(&geometry, &options, original);
    assert_eq!(c.placement, Placement::Top);
    assert_eq!(c.overflow.top, 2.0);
}

#[test]
fn flipped_worse_than_original_is_rejected() {
    // Original overflows by 1, flipped by 3: within padding but strictly worse.
    let geometry = Geometry::new(
        Rect::new(100.0, 41.0, 24.0, 4.0),
        Size::new(100.0, 40.0),
        Rect::new(0.0, 0.0, 800.0, 88.0),
    );
    let options = PositionOptions::default();
    let original = geometry.measure(Placement::Bottom, &options);
    assert_eq!(original.overflow.bottom, 1.0);
    let flipped = geometry.measure(Placement::Top, &options);
    assert_eq!(flipped.overflow.top, 3.0);
    assert_eq!(flip(&geometry, &options, original), original);
}

#[test]
fn single_attempt_never_tries_cross_sides() {
    // Short, wide viewport: top and bottom both fail while left/right would fit,
    // but flip only ever considers the opposite side.
    let geometry = Geometry::new(
        Rect::new(400.0, 20.0, 24.0, 24.0),
        Size::new(100.0, 60.0),
        Rect::new(0.0, 0.0, 800.0, 64.0),
    );
    let options = PositionOptions::default().with_placement(Placement::Bottom);
    let c = flip(&geometry, &options, geometry.measure(Placement::Bottom, &options));
    assert_eq!(c.placement.side(), crate::placement::Side::Bottom);
}
