#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

// --- Size ---

#[test]
fn size_clamps_negative_extents() {
    let s = Size::new(-5.0, 12.0);
    assert_eq!(s.width, 0.0);
    assert_eq!(s.height, 12.0);
}

#[test]
fn size_clamps_non_finite_extents() {
    let s = Size::new(f64::NAN, f64::INFINITY);
    assert_eq!(s, Size::new(0.0, 0.0));
}

#[test]
fn size_deserialize_normalizes() {
    let s: Size = serde_json::from_str(r#"{"width":-1,"height":40}"#).unwrap();
    assert_eq!(s, Size::new(0.0, 40.0));
}

// --- Rect edges ---

#[test]
fn rect_edges_derive_from_origin_and_size() {
    let r = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert_eq!(r.left(), 10.0);
    assert_eq!(r.top(), 20.0);
    assert_eq!(r.right(), 40.0);
    assert_eq!(r.bottom(), 60.0);
}

#[test]
fn rect_center() {
    let r = Rect::new(0.0, 0.0, 24.0, 10.0);
    assert_eq!(r.center(), Point::new(12.0, 5.0));
}

#[test]
fn rect_from_origin_size_matches_new() {
    let r = Rect::from_origin_size(Point::new(1.0, 2.0), Size::new(3.0, 4.0));
    assert_eq!(r, Rect::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(r.origin(), Point::new(1.0, 2.0));
    assert_eq!(r.size(), Size::new(3.0, 4.0));
}

#[test]
fn rect_with_any_non_finite_component_is_zero() {
    assert_eq!(Rect::new(f64::NAN, 125.0, 24.0, 24.0), Rect::ZERO);
    assert_eq!(Rect::new(10.0, f64::NEG_INFINITY, 24.0, 24.0), Rect::ZERO);
    assert_eq!(Rect::new(10.0, 10.0, f64::INFINITY, 24.0), Rect::ZERO);
}

#[test]
fn try_new_rejects_non_finite() {
    assert_eq!(Rect::try_new(1.0, 2.0, f64::NAN, 4.0), None);
    assert_eq!(Rect::try_new(1.0, 2.0, -3.0, 4.0), Some(Rect::new(1.0, 2.0, 0.0, 4.0)));
}

#[test]
fn rect_normalizes_negative_size() {
    let r = Rect::new(5.0, 5.0, -10.0, -1.0);
    assert_eq!(r.width(), 0.0);
    assert_eq!(r.height(), 0.0);
}

// --- Degenerate ---

#[test]
fn zero_rect_is_degenerate() {
    assert!(Rect::ZERO.is_degenerate());
    assert!(Rect::default().is_degenerate());
}

#[test]
fn zero_size_point_anchor_is_not_degenerate() {
    assert!(!Rect::new(32.0, 125.0, 0.0, 0.0).is_degenerate());
}

#[test]
fn nan_rect_collapses_to_degenerate() {
    assert!(Rect::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN).is_degenerate());
}

// --- Serde ---

#[test]
fn rect_serializes_as_plain_fields() {
    let json = serde_json::to_value(Rect::new(1.0, 2.0, 3.0, 4.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 1.0, "y": 2.0, "width": 3.0, "height": 4.0 }));
}

#[test]
fn rect_deserialize_normalizes() {
    let r: Rect = serde_json::from_str(r#"{"x":1,"y":2,"width":-3,"height":4}"#).unwrap();
    assert_eq!(r, Rect::new(1.0, 2.0, 0.0, 4.0));
}
