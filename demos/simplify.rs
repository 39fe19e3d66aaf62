//! Simplify a polyline or loop read from a `lat,lng` text file
//!
//! ```text
//! simplify --input route.csv --threshold 1e-10 --output route_small.csv
//! simplify --input parcel.csv --loop --min-points 6 -v
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use geosimplify_core::{LatLng, Loop, Point};
use geosimplify_io::{read_latlngs, write_latlngs, write_latlngs_to, Delimiter};
use geosimplify_simplification::{SimplifyOptions, VisvalingamSimplifier};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "simplify", about = "Visvalingam simplification of lat/lng sequences")]
struct Args {
    /// Input file with one `lat,lng` pair per line
    #[arg(short, long)]
    input: PathBuf,

    /// Output file; prints to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stop once the cheapest vertex covers at least this many steradians
    #[arg(short, long, default_value_t = 1e-10)]
    threshold: f64,

    /// Never keep fewer than this many points (loops keep at least 4)
    #[arg(short, long = "min-points", default_value_t = 0)]
    min_points: usize,

    /// Allow removals that make the shape cross itself
    #[arg(long)]
    allow_intersections: bool,

    /// Treat the input as a closed loop
    #[arg(long = "loop")]
    closed: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let latlngs = read_latlngs(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let points: Vec<Point> = latlngs.iter().map(|&ll| Point::from_latlng(ll)).collect();

    let simplifier = VisvalingamSimplifier::with_options(SimplifyOptions::new(
        args.threshold,
        args.min_points,
        !args.allow_intersections,
    ));

    let (output, stats) = if args.closed {
        let result = simplifier
            .simplify_loop_with_stats(&Loop::from_points(points))
            .context("Failed to simplify loop")?;
        (result.output.into_vertices(), result.stats)
    } else {
        let result = simplifier
            .simplify_line_with_stats(&points)
            .context("Failed to simplify polyline")?;
        (result.output, result.stats)
    };

    info!(
        input = latlngs.len(),
        output = output.len(),
        deferrals = stats.deferrals,
        stop = ?stats.stop,
        "simplification complete"
    );

    let simplified: Vec<LatLng> = output.iter().map(Point::to_latlng).collect();
    match &args.output {
        Some(path) => write_latlngs(path, &simplified, Delimiter::Comma)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => write_latlngs_to(&mut std::io::stdout().lock(), &simplified, Delimiter::Comma)?,
    }

    eprintln!(
        "Kept {} of {} points ({} removed, {} deferrals)",
        output.len(),
        latlngs.len(),
        stats.removed(),
        stats.deferrals
    );
    Ok(())
}
