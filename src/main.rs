//! Geo visit planning tool
//!
//! Reads geographic points from a CSV file, groups them with DBSCAN under the
//! haversine metric, orders every cluster with a nearest-neighbor tour and
//! writes the rows back with `cluster` and `route_order` columns.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use csv::{ReaderBuilder, WriterBuilder};
use geo_routes::cluster::{
    DistanceStats, LocationClusterer, Point, PointSet, angular_to_meters, calculate_eps,
    grid_search, meters_to_angular,
};
use geo_routes::{Error, RouteOptimizer, RoutedPoints};
use rand::SeedableRng;
use rand::rngs::StdRng;


#[derive(Parser)]
#[command(name = "geo_routes")]
#[command(about = "Cluster geo points and plan a visit route per cluster", long_about = None)]
struct Args {
    /// Input CSV file with latitude,longitude columns
    #[arg(short, long, default_value = "points.csv")]
    input: PathBuf,

    /// Output CSV file with cluster and route order columns (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// DBSCAN epsilon parameter (clustering radius in meters)
    #[arg(short, long, default_value_t = 2200.0)]
    eps: f64,

    /// DBSCAN minSamples parameter (points in neighbourhood, itself included)
    #[arg(short, long, default_value_t = 20)]
    min_samples: usize,

    /// Sample size for distance statistics
    #[arg(long, default_value_t = 100)]
    sample_size: usize,

    /// Seed for the distance statistics sample
    #[arg(long)]
    seed: Option<u64>,

    /// Grid search eps candidates in meters (comma separated)
    #[arg(long, value_delimiter = ',')]
    search_eps: Vec<f64>,

    /// Grid search minSamples candidates (comma separated)
    #[arg(long, value_delimiter = ',')]
    search_min_samples: Vec<usize>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let input = read_points_and_csv(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    if input.points.is_empty() {
        anyhow::bail!("no points found in {}", args.input.display());
    }
    log::info!(
        "read {} points from {} (dropped {} rows)",
        input.points.len(),
        args.input.display(),
        input.dropped
    );

    let mut clusterer = LocationClusterer::new(&input.points);

    let sample_size = stats_sample_size(args.sample_size, input.points.len());
    let stats = match args.seed {
        Some(seed) => clusterer.distance_stats(sample_size, &mut StdRng::seed_from_u64(seed)),
        None => clusterer.distance_stats(sample_size, &mut rand::rng()),
    }?;
    log_distance_stats(&stats);

    let (eps, min_samples) = choose_parameters(&args, &input.points)?;
    log::info!(
        "running DBSCAN with eps={:.6} rad ({:.1} m), min_samples={}",
        eps,
        angular_to_meters(eps),
        min_samples
    );
    clusterer.cluster(eps, min_samples)?;

    match clusterer.evaluate() {
        Ok(scores) => {
            log::info!("silhouette score: {:.4}", scores.silhouette);
            log::info!("calinski harabasz score: {:.4}", scores.calinski_harabasz);
            log::info!("davies bouldin score: {:.4}", scores.davies_bouldin);
        }
        Err(e @ Error::InsufficientClusters { .. }) => {
            log::warn!("cluster scores unavailable: {e}, consider a wider eps")
        }
        Err(e) => return Err(e.into()),
    }

    let routed = RouteOptimizer::from_clusterer(&clusterer)?.optimized_points()?;

    match args.output {
        None => write_routed_points(io::stdout().lock(), &input, &routed)
            .context("writing to stdout")?,
        Some(output_file) => {
            let file = File::create(&output_file)
                .with_context(|| format!("creating {}", output_file.display()))?;
            write_routed_points(file, &input, &routed)
                .with_context(|| format!("writing {}", output_file.display()))?;
            log::info!("routed points written to {}", output_file.display());
        }
    }

    Ok(())
}

fn log_distance_stats(stats: &DistanceStats) {
    log::info!("mean distance: {:.1} meters", stats.mean);
    log::info!("median distance: {:.1} meters", stats.median);
    log::info!("min distance: {:.1} meters", stats.min);
    log::info!("max distance: {:.1} meters", stats.max);
    log::debug!(
        "eps for the median distance: {:.6} rad",
        calculate_eps(stats.median)
    );
}

/// Clamps the requested sample size to `1..=available`
fn stats_sample_size(requested: usize, available: usize) -> usize {
    let sample_size = requested.clamp(1, available.max(1));
    if sample_size != requested {
        log::warn!(
            "sample size {} does not fit {} points, using {}",
            requested,
            available,
            sample_size
        );
    }
    sample_size
}

/// Returns `(eps radians, min_samples)`, from grid search when both candidate lists are set
fn choose_parameters(args: &Args, points: &[Point]) -> Result<(f64, usize)> {
    let configured = (meters_to_angular(args.eps), args.min_samples);
    match (args.search_eps.is_empty(), args.search_min_samples.is_empty()) {
        (true, true) => return Ok(configured),
        (false, true) | (true, false) => {
            log::warn!(
                "grid search needs both --search-eps and --search-min-samples, keeping configured parameters"
            );
            return Ok(configured);
        }
        (false, false) => {}
    }

    let eps_values: Vec<f64> = args
        .search_eps
        .iter()
        .map(|&m| meters_to_angular(m))
        .collect();
    match grid_search(points, &eps_values, &args.search_min_samples)? {
        Some(best) => Ok((best.eps, best.min_samples)),
        None => {
            log::warn!("grid search found no valid combination, keeping configured parameters");
            Ok(configured)
        }
    }
}

/// Parsed input: retained points plus the raw CSV rows they came from
struct CsvInput {
    header: Option<Vec<String>>,
    /// Raw record of every retained point, aligned with `points`
    records: Vec<Vec<String>>,
    points: PointSet,
    dropped: usize,
}

/// Reads points and CSV records from a file in a single pass
///
/// Expected format: `latitude,longitude[,...]` (header row is optional).
/// Rows with missing, non-numeric or out of range coordinates are dropped.
fn read_points_and_csv(filename: &PathBuf) -> Result<CsvInput> {
    let file = File::open(filename)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    }

    let header = if rows.first().is_some_and(|r| is_header_row(r)) {
        Some(rows.remove(0))
    } else {
        None
    };

    let mut input = CsvInput {
        header,
        records: Vec::new(),
        points: PointSet::new(),
        dropped: 0,
    };
    for record in rows {
        match parse_point(input.points.len(), &record) {
            Some(point) => {
                input.points.push(point);
                input.records.push(record);
            }
            None => input.dropped += 1,
        }
    }

    if input.dropped > 0 {
        log::warn!("dropped {} rows without valid coordinates", input.dropped);
    }
    Ok(input)
}

/// A header row has two non-empty, non-numeric leading fields
///
/// Anything else is data and goes through [`parse_point`], so a malformed
/// first row is dropped and counted like any other.
fn is_header_row(record: &[String]) -> bool {
    record.len() >= 2
        && record[..2].iter().all(|f| {
            let f = f.trim();
            !f.is_empty() && f.parse::<f64>().is_err()
        })
}

fn parse_point(id: usize, record: &[String]) -> Option<Point> {
    let lat = record.first()?.trim().parse::<f64>().ok()?;
    let lon = record.get(1)?.trim().parse::<f64>().ok()?;
    let point = Point::new(id, lat, lon);
    point.is_valid().then_some(point)
}

/// Writes every retained row with `cluster` and `route_order` columns appended
///
/// Noise rows get label `-1` and an empty route order.
fn write_routed_points<W: Write>(out: W, input: &CsvInput, routed: &RoutedPoints) -> Result<()> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(out);

    if let Some(header) = &input.header {
        let mut row = header.clone();
        row.push("cluster".to_string());
        row.push("route_order".to_string());
        writer.write_record(&row)?;
    }

    for (record, (_, label, order)) in input.records.iter().zip(routed.rows()) {
        let mut row = record.clone();
        row.push(label.to_string());
        row.push(order.map(|o| o.to_string()).unwrap_or_default());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
