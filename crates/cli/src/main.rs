use anyhow::{anyhow, Context, Result};
use catalog::{distance_km, Catalog, Coordinate};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{
    ConversationEngine, DeviceRequest, EngineConfig, ExploreView, Explorer, GeolocationError, Response,
    Session, SessionContext, TurnInput,
};
use pipeline::ScoredCandidate;
use sources::FetchOrigin;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, oneshot};

/// Lodgewise - location-aware hotel finder
#[derive(Parser)]
#[command(name = "lodgewise")]
#[command(about = "Find, rank and route to hotels near you", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Never call the POI, routing or copy services
    #[arg(long)]
    offline: bool,

    /// JSON catalog file (overrides the config)
    #[arg(long)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank hotels around a position
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Search radius in meters (defaults to the config value)
        #[arg(long)]
        radius: Option<u32>,
    },

    /// Driving route between two positions
    Route {
        #[arg(long, allow_hyphen_values = true)]
        from_lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        from_lon: f64,

        #[arg(long, allow_hyphen_values = true)]
        to_lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        to_lon: f64,
    },

    /// Chat with the hotel assistant on stdin
    Chat {
        /// Position reported when the assistant asks for your location
        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,

        /// Name used in the greeting
        #[arg(long)]
        name: Option<String>,
    },

    /// List catalog entries
    Catalog {
        /// Only entries whose locality contains this text
        #[arg(long)]
        location: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = EngineConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    if cli.catalog.is_some() {
        config.catalog_path = cli.catalog.clone();
    }

    match cli.command {
        Commands::Nearby { lat, lon, radius } => {
            let radius = radius.unwrap_or(config.search_radius_m);
            handle_nearby(&config, cli.offline, coordinate(lat, lon)?, radius).await?
        }
        Commands::Route {
            from_lat,
            from_lon,
            to_lat,
            to_lon,
        } => {
            let origin = coordinate(from_lat, from_lon)?;
            let destination = coordinate(to_lat, to_lon)?;
            handle_route(&config, cli.offline, origin, destination).await?
        }
        Commands::Chat { lat, lon, name } => {
            let position = match (lat, lon) {
                (Some(lat), Some(lon)) => Some(coordinate(lat, lon)?),
                _ => None,
            };
            handle_chat(&config, cli.offline, position, name)?
        }
        Commands::Catalog { location } => handle_catalog(&config, location)?,
    }

    Ok(())
}

fn coordinate(lat: f64, lon: f64) -> Result<Coordinate> {
    let coordinate = Coordinate::new(lat, lon);
    if !coordinate.is_valid() {
        return Err(anyhow!("{} is not a valid position", coordinate));
    }
    Ok(coordinate)
}

/// Handle the 'nearby' command
///
/// Runs the explorer's geolocation loop with a single fix.
async fn handle_nearby(config: &EngineConfig, offline: bool, anchor: Coordinate, radius_m: u32) -> Result<()> {
    let source = Arc::new(config.candidate_source(offline));
    let planner = Arc::new(config.route_planner(offline));
    let mut explorer = Explorer::new(source, planner)
        .with_radius(radius_m)
        .with_fallback_anchor(config.fallback_anchor);

    let (fix_tx, fix_rx) = mpsc::channel(1);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let (view_tx, mut view_rx) = mpsc::channel(1);

    let start = Instant::now();
    let watcher = tokio::spawn(async move { explorer.watch(fix_rx, shutdown_rx, view_tx).await });
    fix_tx.send(Ok(anchor)).await.context("Explorer stopped early")?;

    let view = view_rx.recv().await.ok_or_else(|| anyhow!("No view produced"))?;
    let _ = shutdown_tx.send(());
    watcher.await??;

    println!("{} Ranked lodgings in {:?}", "✓".green(), start.elapsed());
    print_view(&view);
    Ok(())
}

/// Handle the 'route' command
async fn handle_route(
    config: &EngineConfig,
    offline: bool,
    origin: Coordinate,
    destination: Coordinate,
) -> Result<()> {
    let planner = config.route_planner(offline);
    let waypoints = tokio::task::spawn_blocking(move || planner.route(origin, destination)).await?;

    if waypoints.is_empty() {
        println!("{} No route found from {} to {}", "✗".red(), origin, destination);
        return Ok(());
    }

    let length_km: f64 = waypoints.windows(2).map(|pair| distance_km(pair[0], pair[1])).sum();
    println!(
        "{} {} waypoints, {:.1} km from {} to {}",
        "✓".green(),
        waypoints.len(),
        length_km,
        origin,
        destination
    );
    Ok(())
}

/// Handle the 'chat' command
///
/// `position` answers the assistant's location requests; without it they
/// are denied.
fn handle_chat(
    config: &EngineConfig,
    offline: bool,
    position: Option<Coordinate>,
    name: Option<String>,
) -> Result<()> {
    let catalog = Arc::new(config.catalog()?);
    let mut engine = ConversationEngine::new(catalog).with_result_cap(config.result_cap);
    if let Some(copy) = config.copy_service(offline) {
        engine = engine.with_copy_service(copy);
    }

    let mut context = SessionContext::new(format!("cli-{}", std::process::id()));
    if let Some(name) = name {
        context = context.with_traveler_name(name);
    }
    let mut session = Session::new(context);

    print_response(&engine.greeting(session.context()));

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", ">".bold().cyan());
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text.eq_ignore_ascii_case("quit") || text.eq_ignore_ascii_case("exit") {
            break;
        }

        let mut response = session.respond(&engine, &TurnInput::text(text));
        print_response(&response);

        while response.request == Some(DeviceRequest::Geolocation) {
            let input = match position {
                Some(coordinate) => TurnInput::GeolocationFix(coordinate),
                None => TurnInput::GeolocationFailed(GeolocationError::PermissionDenied),
            };
            response = session.respond(&engine, &input);
            print_response(&response);
        }
    }
    Ok(())
}

/// Handle the 'catalog' command
fn handle_catalog(config: &EngineConfig, location: Option<String>) -> Result<()> {
    let catalog: Catalog = config.catalog()?;
    let entries: Vec<_> = match &location {
        Some(token) => catalog.in_locality(token),
        None => catalog.candidates().iter().collect(),
    };

    let title = match &location {
        Some(token) => format!("Hotels matching '{}':", token),
        None => "All hotels:".to_string(),
    };
    println!("{}", title.bold().blue());
    for candidate in &entries {
        println!("{:>3}. {}", candidate.id, candidate.catalog_line());
    }
    if let Some((low, high)) = catalog.price_range(location.as_deref()) {
        println!("{} entries, Rs.{} - Rs.{} per night", entries.len(), low, high);
    }
    Ok(())
}

fn print_view(view: &ExploreView) {
    let origin = match view.origin {
        FetchOrigin::Provider => "live data".green(),
        FetchOrigin::Synthetic => "sample data".yellow(),
        FetchOrigin::Unavailable => "no data".red(),
    };
    println!("{} around {} ({})", "Lodgings".bold().blue(), view.anchor, origin);

    if view.is_empty() {
        println!("Nothing found nearby.");
        return;
    }

    println!("{}", "Top picks".bold());
    print_scored(&view.top, 1);
    if !view.rest.is_empty() {
        println!("{}", "More places".bold());
        print_scored(&view.rest, view.top.len() + 1);
    }
}

fn print_scored(scored: &[ScoredCandidate], first_rank: usize) {
    for (offset, entry) in scored.iter().enumerate() {
        let candidate = &entry.candidate;
        println!(
            "{}. {} - Score: {:.2}, {:.1} km, {:.1}/5 ({} reviews), Rs.{}/night",
            (first_rank + offset).to_string().green(),
            candidate.name,
            entry.score,
            entry.distance_km,
            candidate.rating,
            candidate.review_count,
            candidate.price_per_night
        );
    }
}

fn print_response(response: &Response) {
    println!("{}", response.text);
    for (rank, hotel) in response.hotels.iter().enumerate() {
        println!("  {}. {}", (rank + 1).to_string().green(), hotel.catalog_line());
    }
    if !response.suggestions.is_empty() {
        let chips = response
            .suggestions
            .iter()
            .map(|s| format!("[{}]", s))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{}", chips.dimmed());
    }
}
