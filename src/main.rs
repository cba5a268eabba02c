use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

use schoolscout::api::{NominatimGeocoder, OverpassSchoolFinder, build_client};
use schoolscout::config::FileConfig;
use schoolscout::domain::{SearchFilters, TypeFilter};
use schoolscout::report::{OutputFormat, render_candidates, render_schools};
use schoolscout::{ProximitySearch, SchoolQuery};

/// Find schools near an address using OpenStreetMap data
///
/// Examples:
///   # Schools within 10 km of an address
///   schoolscout search "1600 Pennsylvania Ave, Washington DC"
///
///   # Only high schools within 5 km, as JSON
///   schoolscout search "Philadelphia" -d 5 -t high-school -f json
///
///   # Search around known coordinates and write GeoJSON for a map
///   schoolscout schools --lat 51.5074 --lon -0.1278 -f geojson > schools.geojson
///
///   # List geocoder matches for an address
///   schoolscout geocode "Springfield"
#[derive(Parser, Debug)]
#[command(name = "schoolscout")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches schoolscout.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the geocoder's matches for an address
    Geocode {
        /// Free-text address
        address: String,
    },

    /// Find schools around a latitude/longitude
    Schools {
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Maximum distance in km (default 10)
        #[arg(short = 'd', long, allow_hyphen_values = true)]
        max_distance: Option<f64>,

        /// School type: all, elementary, high-school or college
        #[arg(short = 't', long = "type")]
        school_type: Option<String>,
    },

    /// Geocode an address and find schools around it
    Search {
        /// Free-text address
        address: String,

        /// Maximum distance in km (default 10)
        #[arg(short = 'd', long, allow_hyphen_values = true)]
        max_distance: Option<f64>,

        /// School type: all, elementary, high-school or college
        #[arg(short = 't', long = "type")]
        school_type: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let file_config = match args.config {
        Some(ref path) => FileConfig::from_path(path)?,
        None => FileConfig::load().unwrap_or_default(),
    };

    let format = match args.format {
        Some(f) => f,
        None => OutputFormat::from_str(&file_config.format, true)
            .map_err(|e| anyhow!("Invalid output format in config: {}", e))?,
    };

    let client = build_client(
        &file_config.user_agent,
        Duration::from_secs(file_config.timeout_secs),
    )?;
    let geocoder = NominatimGeocoder::new(client.clone(), &file_config.nominatim.url);
    let finder = OverpassSchoolFinder::new(
        client,
        &file_config.overpass.url,
        file_config.overpass.query_timeout_secs,
    );
    let pipeline = ProximitySearch::new(geocoder, finder);

    let output = match args.command {
        Command::Geocode { address } => {
            let candidates = with_spinner("Geocoding address...", || pipeline.geocode(&address))?;
            tracing::info!("Found {} candidates for {:?}", candidates.len(), address);
            render_candidates(&candidates, format)?
        }
        Command::Schools {
            lat,
            lon,
            max_distance,
            school_type,
        } => {
            let query = SchoolQuery {
                lat,
                lon,
                max_distance_km: max_distance.or(Some(file_config.max_distance_km)),
                school_type: school_type.or_else(|| Some(file_config.school_type.clone())),
            };
            let (origin, filters) = query.resolve()?;
            let schools = with_spinner("Fetching schools from OpenStreetMap...", || {
                pipeline.schools_near(origin, &filters)
            })?;
            tracing::info!(
                "Found {} schools within {} km",
                schools.len(),
                filters.max_distance_km
            );
            render_schools(origin, &schools, format)?
        }
        Command::Search {
            address,
            max_distance,
            school_type,
        } => {
            let school_type: TypeFilter = school_type
                .as_deref()
                .unwrap_or(&file_config.school_type)
                .parse()?;
            let filters = SearchFilters::new(
                max_distance.unwrap_or(file_config.max_distance_km),
                school_type,
            );
            let results = with_spinner("Searching for schools...", || {
                pipeline.search(&address, &filters)
            })?;
            tracing::info!(
                "Found {} schools within {} km of {}",
                results.schools.len(),
                filters.max_distance_km,
                results
                    .origin
                    .display_name
                    .as_deref()
                    .unwrap_or(address.as_str())
            );
            render_schools(results.origin.coordinate, &results.schools, format)?
        }
    };

    print!("{}", output);
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "schoolscout=debug"
    } else {
        "schoolscout=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run `f` behind a spinner, reporting elapsed time on success.
fn with_spinner<T, E>(message: &str, f: impl FnOnce() -> Result<T, E>) -> Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    let spinner = create_spinner(message);
    let start = Instant::now();
    match f() {
        Ok(value) => {
            spinner.finish_with_message(format!(
                "{} done [{:.1}s]",
                message.trim_end_matches("..."),
                start.elapsed().as_secs_f32()
            ));
            Ok(value)
        }
        Err(e) => {
            spinner.finish_and_clear();
            Err(e).context(message.trim_end_matches("...").to_string())
        }
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
