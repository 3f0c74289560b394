use anchorage::{Geometry, Placement, Point, PositionOptions, PositionResult, Rect, Size, compute_position};
use clap::{Args, Parser, Subcommand};

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid rect `{0}`; expected X,Y,WIDTH,HEIGHT")]
    InvalidRect(String),
    #[error("invalid size `{0}`; expected WIDTHxHEIGHT")]
    InvalidSize(String),
    #[error("invalid options JSON: {0}")]
    InvalidOptions(#[source] serde_json::Error),
    #[error("failed to encode result: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "anchorage", about = "Compute floating-panel positions from literal rectangles")]
struct Cli {
    /// Log flip and shift decisions to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Position one panel and print the result as JSON.
    Compute(GeometryArgs),
    /// Position the panel at every placement and print one line per placement.
    Sweep(GeometryArgs),
}

#[derive(Args, Debug)]
struct GeometryArgs {
    /// Anchor rect as X,Y,WIDTH,HEIGHT.
    #[arg(long, value_parser = parse_rect, allow_hyphen_values = true)]
    anchor: Rect,

    /// Floating panel size as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_size)]
    floating: Size,

    /// Viewport size as WIDTHxHEIGHT, origin at 0,0.
    #[arg(long, value_parser = parse_size, default_value = "1280x720")]
    viewport: Size,

    /// Base options as JSON, e.g. '{"placement":"top","padding":8}'.
    #[arg(long, env = "ANCHORAGE_OPTIONS")]
    options: Option<String>,

    #[arg(long)]
    placement: Option<Placement>,

    #[arg(long, default_value_t = false)]
    no_flip: bool,

    #[arg(long, default_value_t = false)]
    no_shift: bool,

    #[arg(long)]
    padding: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    offset: Option<f64>,
}

impl GeometryArgs {
    fn geometry(&self) -> Geometry {
        Geometry::new(self.anchor, self.floating, Rect::from_origin_size(Point::new(0.0, 0.0), self.viewport))
    }

    /// JSON options first, then individual flags on top.
    fn options(&self) -> Result<PositionOptions, CliError> {
        let mut options = match &self.options {
            Some(json) => serde_json::from_str::<PositionOptions>(json).map_err(CliError::InvalidOptions)?,
            None => PositionOptions::default(),
        };
        if let Some(placement) = self.placement {
            options.placement = placement;
        }
        if self.no_flip {
            options.flip = false;
        }
        if self.no_shift {
            options.shift = false;
        }
        if let Some(padding) = self.padding {
            options.padding = padding;
        }
        if let Some(offset) = self.offset {
            options.offset = offset;
        }
        Ok(options.sanitized())
    }
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Compute(args) => run_compute(&args),
        Command::Sweep(args) => run_sweep(&args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { tracing::Level::TRACE } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run_compute(args: &GeometryArgs) -> Result<(), CliError> {
    let options = args.options()?;
    let result = compute_position(&args.geometry(), &options);
    tracing::debug!(requested = %options.placement, resolved = %result.placement, "computed");
    print_json(&result)
}

fn run_sweep(args: &GeometryArgs) -> Result<(), CliError> {
    let options = args.options()?;
    for line in sweep_lines(&args.geometry(), &options) {
        println!("{line}");
    }
    Ok(())
}

fn print_json(result: &PositionResult) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(result).map_err(CliError::Encode)?;
    println!("{text}");
    Ok(())
}

fn sweep_lines(geometry: &Geometry, base: &PositionOptions) -> Vec<String> {
    Placement::ALL
        .iter()
        .map(|&placement| {
            let result = compute_position(geometry, &base.with_placement(placement));
            format_row(placement, &result)
        })
        .collect()
}

fn format_row(requested: Placement, result: &PositionResult) -> String {
    let status = if result.overflow.fits() { "fits" } else { "overflows" };
    format!(
        "{:<13} -> {:<13} x={:>8.1} y={:>8.1} {status}",
        requested.as_str(),
        result.placement.as_str(),
        result.x,
        result.y,
    )
}

fn parse_rect(value: &str) -> Result<Rect, CliError> {
    match parse_numbers(value, ',').as_deref() {
        Some([x, y, width, height]) => Ok(Rect::new(*x, *y, *width, *height)),
        _ => Err(CliError::InvalidRect(value.to_owned())),
    }
}

fn parse_size(value: &str) -> Result<Size, CliError> {
    match parse_numbers(&value.to_ascii_lowercase(), 'x').as_deref() {
        Some([width, height]) if *width >= 0.0 && *height >= 0.0 => Ok(Size::new(*width, *height)),
        _ => Err(CliError::InvalidSize(value.to_owned())),
    }
}

/// Split on `separator` and parse each part; `None` if any part is not a finite number.
fn parse_numbers(value: &str, separator: char) -> Option<Vec<f64>> {
    value
        .split(separator)
        .map(|part| part.trim().parse::<f64>().ok().filter(|n| n.is_finite()))
        .collect()
}
