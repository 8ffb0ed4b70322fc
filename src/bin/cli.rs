//! voyageline CLI - Debug tool for itinerary classification and route synthesis
//!
//! Usage:
//!   voyageline-cli classify <itinerary.json>
//!   voyageline-cli plan <itinerary.json> [--tables <json>] [--output <file>] [--spacing-km <n>]
//!   voyageline-cli region <lat> <lon>
//!   voyageline-cli tables [--output <file>]
//!
//! Itinerary files hold either a JSON array of events or an object with a
//! `days` array.

use clap::{Parser, Subcommand};
use log::{error, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use voyageline::{
    GeoPoint, ReferenceTables, RouteConfig, VoyageEngine, classify::resolve_category,
    geo_utils::haversine_distance, parse_raw_itinerary,
};

#[derive(Parser)]
#[command(name = "voyageline-cli")]
#[command(about = "Debug tool for itinerary classification and sea routing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every event of an itinerary (day-by-day view)
    Classify {
        /// Itinerary JSON file
        file: PathBuf,
    },

    /// Build the mappable route and rendered path
    Plan {
        /// Itinerary JSON file
        file: PathBuf,

        /// Reference table JSON replacing the built-in table
        #[arg(short, long)]
        tables: Option<PathBuf>,

        /// Write the full plan as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Spacing between interpolated points in kilometers (at least 1)
        #[arg(long, default_value = "100")]
        spacing_km: f64,
    },

    /// Print the region a coordinate belongs to
    Region {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },

    /// Export the built-in reference table
    Tables {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let result = match cli.command {
        Commands::Classify { file } => run_classify(&file),
        Commands::Plan {
            file,
            tables,
            output,
            spacing_km,
        } => run_plan(&file, tables.as_deref(), output.as_deref(), spacing_km),
        Commands::Region { lat, lon } => {
            run_region(lat, lon);
            Ok(())
        }
        Commands::Tables { output } => run_tables(output.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_classify(file: &Path) -> voyageline::Result<()> {
    let events = parse_raw_itinerary(&fs::read_to_string(file)?)?;
    let engine = VoyageEngine::new();
    let stops = engine.classify(&events);

    println!("\n{}", "=".repeat(60));
    println!("Itinerary: {} ({} events)", file.display(), events.len());
    println!("{}", "=".repeat(60));

    for (event, stop) in events.iter().zip(&stops) {
        let (rule, _) = resolve_category(event);
        let coords = stop
            .coordinates
            .map(|c| format!("{:.3}, {:.3}", c.latitude, c.longitude))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  day {:>3}  {:<18} {:<32} [{}] ({})",
            stop.day_index.map(|d| d.to_string()).unwrap_or_else(|| "?".into()),
            stop.category,
            stop.display_name.as_deref().unwrap_or("(unnamed)"),
            coords,
            rule
        );
    }
    Ok(())
}

fn run_plan(
    file: &Path,
    tables_path: Option<&Path>,
    output: Option<&Path>,
    spacing_km: f64,
) -> voyageline::Result<()> {
    let events = parse_raw_itinerary(&fs::read_to_string(file)?)?;

    let custom_tables = match tables_path {
        Some(path) => {
            let tables = ReferenceTables::from_json(&fs::read_to_string(path)?)?;
            info!(
                "Loaded reference tables v{} from {}",
                tables.version(),
                path.display()
            );
            Some(tables)
        }
        None => None,
    };
    let tables = custom_tables
        .as_ref()
        .unwrap_or(ReferenceTables::builtin());

    let config = RouteConfig {
        interpolation_spacing_meters: spacing_km * 1000.0,
        ..RouteConfig::default()
    };
    config.validate()?;
    let engine = VoyageEngine::with_tables(tables).with_config(config);
    let plan = engine.plan(&events);

    println!("\n{}", "=".repeat(60));
    println!(
        "Route: {} events -> {} mappable stops",
        plan.stops.len(),
        plan.route.len()
    );
    println!("{}", "=".repeat(60));

    if plan.is_unmappable() {
        println!("  No mappable route (fewer than two on-water stops with coordinates)");
    }

    for stop in &plan.route {
        let days: Vec<String> = stop.visit_days.iter().map(|d| d.to_string()).collect();
        println!(
            "  #{:<2} {:<28} {:<16} days {:<8} region {}{}",
            stop.index,
            stop.display_name,
            stop.category,
            days.join(","),
            engine.classify_region(&stop.coordinates),
            if stop.is_round_trip_anchor {
                "  (round-trip anchor)"
            } else {
                ""
            }
        );
    }

    let mut legs: Vec<(GeoPoint, GeoPoint, &str, &str)> = plan
        .route
        .windows(2)
        .map(|w| {
            (
                w[0].coordinates,
                w[1].coordinates,
                w[0].display_name.as_str(),
                w[1].display_name.as_str(),
            )
        })
        .collect();
    if let (Some(first), Some(last)) = (plan.route.first(), plan.route.last()) {
        if first.is_round_trip_anchor && plan.route.len() > 1 {
            legs.push((
                last.coordinates,
                first.coordinates,
                last.display_name.as_str(),
                first.display_name.as_str(),
            ));
        }
    }

    println!("\nLegs:");
    for ((start, end, from, to), marker) in legs.iter().zip(&plan.path.bearings) {
        let waypoints = engine.resolve(start, end);
        let via: Vec<&str> = waypoints
            .iter()
            .map(|w| w.label.as_deref().unwrap_or("?"))
            .collect();
        println!(
            "  {} -> {}: {:.0} km direct, bearing {:.0}°, via [{}]",
            from,
            to,
            haversine_distance(start, end) / 1000.0,
            marker.bearing_degrees,
            via.join(", ")
        );
    }
    println!("\nPath points: {}", plan.path.path.len());

    if let Some(path) = output {
        fs::write(path, serde_json::to_string_pretty(&plan)?)?;
        info!("Wrote plan to {}", path.display());
    }
    Ok(())
}

fn run_region(lat: f64, lon: f64) {
    let engine = VoyageEngine::new();
    println!("{}", engine.classify_region(&GeoPoint::new(lat, lon)));
}

fn run_tables(output: Option<&Path>) -> voyageline::Result<()> {
    let json = ReferenceTables::builtin().to_json()?;
    match output {
        Some(path) => {
            fs::write(path, json)?;
            info!("Wrote reference tables to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
