#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]
#![allow(warnings)]

use std::{
    error::Error,
    path::{Path, PathBuf},
};

use bucket_table::{
    BucketTable, ConfigError, DefaultEntryHasher, LinearProbe, ProbeStrategy, QuadraticProbe,
    Stats, TableConfig, TableExtensions,
};
use clap::Parser;
use plotters::prelude::*;
use rand::Rng;

const MIN_LOAD_FACTOR: f64 = 0.1;
const MAX_LOAD_FACTOR: f64 = 0.95;

// Plot styling
const FONT_FAMILY: &str = "sans-serif";
const COLORS: [RGBColor; 4] = [
    RGBColor(220, 50, 50),  // Bright red
    RGBColor(50, 90, 220),  // Bright blue
    RGBColor(50, 180, 50),  // Bright green
    RGBColor(180, 50, 180), // Bright magenta
];
const LINE_WIDTH: u32 = 2;
const MARKER_SIZE: u32 = 4;
const TEXT_SIZE: u32 = 16;
const TITLE_SIZE: u32 = 35;

#[derive(Parser, Debug)]
#[command(about = "Sweeps load factors and bucket sizes over a bucket table and plots chain lengths")]
struct Args {
    /// Total slots of every table built
    #[arg(short = 'c', long, default_value_t = 100_000)]
    capacity: usize,

    /// Bucket capacities to compare, comma separated
    #[arg(short = 'b', long, value_delimiter = ',', default_values_t = [8, 32, 128])]
    bucket_sizes: Vec<usize>,

    /// Number of load factors between 0.1 and 0.95
    #[arg(short = 'n', long, default_value_t = 10)]
    steps: usize,

    /// Directory the charts are written to
    #[arg(short = 'o', long, default_value = ".")]
    output_dir: PathBuf,

    /// Print the statistics without drawing charts
    #[arg(long)]
    no_plots: bool,
}

#[derive(Debug, Clone, Copy)]
enum Probe {
    Linear,
    Quadratic,
}

#[derive(Debug, Clone, Copy)]
struct Method {
    name: &'static str,
    probe: Probe,
    overflow: bool,
}

// Table policies to compare
const METHODS: [Method; 4] = [
    Method { name: "Linear", probe: Probe::Linear, overflow: false },
    Method { name: "Linear + Overflow", probe: Probe::Linear, overflow: true },
    Method { name: "Quadratic", probe: Probe::Quadratic, overflow: false },
    Method { name: "Quadratic + Overflow", probe: Probe::Quadratic, overflow: true },
];

// Fills a fresh table with `keys` and snapshots it, rejected inserts included
fn run<P: ProbeStrategy>(config: TableConfig, probe: P, keys: &[u64]) -> Result<Stats, ConfigError> {
    let mut table = BucketTable::new(config, DefaultEntryHasher, probe)?;
    let failures = table.insert_all(keys.iter().copied());
    Ok(table.stats_with_failures(failures))
}

fn measure(method: Method, config: TableConfig, keys: &[u64]) -> Result<Stats, ConfigError> {
    let config = config.with_overflow(method.overflow);
    match method.probe {
        Probe::Linear => run(config, LinearProbe, keys),
        Probe::Quadratic => run(config, QuadraticProbe, keys),
    }
}

fn draw_chart(
    path: &Path,
    caption: &str,
    y_desc: &str,
    x_labels: &[String],
    series: &[(&str, Vec<f64>)],
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series
        .iter()
        .flat_map(|(_, values)| values.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1; // Add 10% margin
    let max_y = if max_y > 0.0 { max_y } else { 1.0 };
    let last_point = x_labels.len().saturating_sub(1);

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (FONT_FAMILY, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..last_point, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_labels(x_labels.len())
        .x_label_formatter(&|x| x_labels.get(*x).cloned().unwrap_or_default())
        .x_desc("Load Factor")
        .y_desc(y_desc)
        .axis_desc_style((FONT_FAMILY, TEXT_SIZE))
        .draw()?;

    for (series_idx, (name, values)) in series.iter().enumerate() {
        let color = &COLORS[series_idx % COLORS.len()];
        let line_style = ShapeStyle::from(color).stroke_width(LINE_WIDTH);

        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(i, &value)| (i, value)),
                line_style,
            ))?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            values
                .iter()
                .enumerate()
                .map(|(i, &value)| Circle::new((i, value), MARKER_SIZE, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let steps = args.steps.max(2);

    let load_factors: Vec<f64> = (0..steps)
        .map(|i| {
            MIN_LOAD_FACTOR + (MAX_LOAD_FACTOR - MIN_LOAD_FACTOR) * (i as f64) / ((steps - 1) as f64)
        })
        .collect();
    let num_keys: Vec<usize> =
        load_factors.iter().map(|&load| (args.capacity as f64 * load) as usize).collect();

    println!("Load factors: {:?}", load_factors);
    println!("Number of keys: {:?}", num_keys);

    // Same keys for every table so the methods are compared fairly
    let mut rng = rand::rng();
    let max_keys_needed = num_keys.iter().copied().max().unwrap_or(0);
    let keys: Vec<u64> = (0..max_keys_needed).map(|_| rng.random()).collect();
    let x_labels: Vec<String> = load_factors.iter().map(|load| format!("{load:.2}")).collect();

    for &bucket_size in &args.bucket_sizes {
        let config = TableConfig::new(args.capacity, bucket_size);
        if let Err(err) = config.validate() {
            eprintln!("Skipping bucket size {bucket_size}: {err}");
            continue;
        }

        println!("Bucket size {} ({} buckets)", bucket_size, config.bucket_count());

        let mut results: Vec<Vec<Stats>> = vec![Vec::with_capacity(steps); METHODS.len()];
        for &n_keys in &num_keys {
            println!("  Testing with {} keys", n_keys);

            for (method_idx, &method) in METHODS.iter().enumerate() {
                let stats = measure(method, config, &keys[..n_keys])?;
                println!("    {}: {}", method.name, stats);
                results[method_idx].push(stats);
            }
        }

        if args.no_plots {
            continue;
        }

        let average: Vec<(&str, Vec<f64>)> = METHODS
            .iter()
            .zip(&results)
            .map(|(method, stats)| {
                (method.name, stats.iter().map(|s| s.avg_chain_length).collect())
            })
            .collect();
        let worst: Vec<(&str, Vec<f64>)> = METHODS
            .iter()
            .zip(&results)
            .map(|(method, stats)| {
                (method.name, stats.iter().map(|s| s.max_chain_length as f64).collect())
            })
            .collect();
        let rejected: Vec<(&str, Vec<f64>)> = METHODS
            .iter()
            .zip(&results)
            .map(|(method, stats)| (method.name, stats.iter().map(|s| s.failures as f64).collect()))
            .collect();

        draw_chart(
            &args.output_dir.join(format!("average_chain_length_b{bucket_size}.png")),
            &format!("Average Chain Length, {bucket_size}-slot Buckets"),
            "Average Chain Length (slots)",
            &x_labels,
            &average,
        )?;
        draw_chart(
            &args.output_dir.join(format!("max_chain_length_b{bucket_size}.png")),
            &format!("Maximum Chain Length, {bucket_size}-slot Buckets"),
            "Maximum Chain Length (slots)",
            &x_labels,
            &worst,
        )?;
        draw_chart(
            &args.output_dir.join(format!("failed_inserts_b{bucket_size}.png")),
            &format!("Rejected Inserts, {bucket_size}-slot Buckets"),
            "Rejected Inserts",
            &x_labels,
            &rejected,
        )?;
    }

    if !args.no_plots {
        println!("Generated charts in {}", args.output_dir.display());
    }

    Ok(())
}
