#![allow(clippy::float_cmp)]

use super::*;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["anchorage"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

fn geometry_args(cli: Cli) -> GeometryArgs {
    match cli.command {
        Command::Compute(args) | Command::Sweep(args) => args,
    }
}

// =============================================================
// Literal parsers
// =============================================================

#[test]
fn parse_rect_accepts_four_numbers() {
    assert_eq!(parse_rect("100, 580,24,24").unwrap(), Rect::new(100.0, 580.0, 24.0, 24.0));
}

#[test]
fn parse_rect_accepts_negative_origin() {
    assert_eq!(parse_rect("-10,-5.5,1,1").unwrap().x(), -10.0);
}

#[test]
fn parse_rect_rejects_wrong_arity() {
    assert!(matches!(parse_rect("1,2,3"), Err(CliError::InvalidRect(_))));
}

#[test]
fn parse_rect_rejects_garbage() {
    assert!(parse_rect("1,2,three,4").is_err());
    assert!(parse_rect("1,2,NaN,4").is_err());
}

#[test]
fn parse_size_accepts_either_case() {
    assert_eq!(parse_size("100x40").unwrap(), Size::new(100.0, 40.0));
    assert_eq!(parse_size("800X600").unwrap(), Size::new(800.0, 600.0));
}

#[test]
fn parse_size_rejects_negative() {
    assert!(matches!(parse_size("-1x40"), Err(CliError::InvalidSize(_))));
}

// =============================================================
// Argument handling
// =============================================================

#[test]
fn compute_flips_near_lower_edge() {
    let args = geometry_args(parse(&[
        "compute", "--anchor", "100,580,24,24", "--floating", "100x40", "--viewport", "800x600",
    ]));
    let result = compute_position(&args.geometry(), &args.options().unwrap());
    assert_eq!(result.placement, Placement::Top);
}

#[test]
fn flags_override_json_options() {
    let args = geometry_args(parse(&[
        "compute",
        "--anchor",
        "0,0,10,10",
        "--floating",
        "10x10",
        "--options",
        r#"{"placement":"left","padding":12}"#,
        "--placement",
        "right-end",
        "--no-shift",
    ]));
    let options = args.options().unwrap();
    assert_eq!(options.placement, Placement::RightEnd);
    assert_eq!(options.padding, 12.0);
    assert!(!options.shift);
    assert!(options.flip);
}

#[test]
fn invalid_json_options_are_an_error() {
    let args = geometry_args(parse(&["compute", "--anchor", "0,0,1,1", "--floating", "1x1", "--options", "{"]));
    assert!(matches!(args.options(), Err(CliError::InvalidOptions(_))));
}

#[test]
fn unknown_placement_flag_is_rejected() {
    let argv = ["anchorage", "compute", "--anchor", "0,0,1,1", "--floating", "1x1", "--placement", "middle"];
    assert!(Cli::try_parse_from(argv).is_err());
}

#[test]
fn default_viewport_is_1280_by_720() {
    let args = geometry_args(parse(&["sweep", "--anchor", "0,0,1,1", "--floating", "1x1"]));
    assert_eq!(args.geometry().viewport, Rect::new(0.0, 0.0, 1280.0, 720.0));
}

#[test]
fn negative_padding_falls_back_to_default() {
    let args = geometry_args(parse(&["compute", "--anchor", "0,0,1,1", "--floating", "1x1", "--padding", "-3"]));
    assert_eq!(args.options().unwrap().padding, 4.0);
}

// =============================================================
// Sweep output
// =============================================================

#[test]
fn sweep_prints_every_placement() {
    let geometry = Geometry::new(Rect::new(388.0, 288.0, 24.0, 24.0), Size::new(150.0, 40.0), Rect::new(0.0, 0.0, 800.0, 600.0));
    let lines = sweep_lines(&geometry, &PositionOptions::default());
    assert_eq!(lines.len(), 12);
    assert!(lines.iter().all(|line| line.ends_with("fits")));
    assert!(lines[0].starts_with("top "));
}

#[test]
fn format_row_reports_overflow() {
    let result = PositionResult {
        x: 4.0,
        y: 604.0,
        placement: Placement::Bottom,
        overflow: anchorage::Overflow { bottom: 48.0, ..Default::default() },
    };
    let row = format_row(Placement::Bottom, &result);
    assert!(row.contains("x=     4.0"));
    assert!(row.ends_with("overflows"));
}
