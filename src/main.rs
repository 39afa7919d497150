use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use quinoafit::{AppConfig, Coordinate, SuitabilityError, logging, providers, render_report, web};

#[derive(Parser, Debug)]
#[command(
    name = "quinoafit",
    version,
    about = "Score a location for quinoa cultivation from climate, soil and terrain data"
)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a coordinate and print the suitability report
    Analyze {
        /// Coordinate as "LAT,LON", e.g. "-16.5,-68.15"
        #[arg(value_parser = parse_coordinate, allow_hyphen_values = true)]
        coordinate: Coordinate,

        /// Print the full analysis as JSON instead of the text report
        #[arg(long)]
        json: bool,

        /// Do not reject open-ocean coordinates
        #[arg(long)]
        skip_land_check: bool,
    },
    /// Serve the HTTP API
    Serve {
        /// Port to listen on (overrides the config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn parse_coordinate(input: &str) -> std::result::Result<Coordinate, SuitabilityError> {
    Coordinate::parse(input)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;
    debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Some(Command::Analyze {
            coordinate,
            json,
            skip_land_check,
        }) => {
            let check_land = config.analysis.validate_land && !skip_land_check;
            if let Err(e) = analyze(&config, coordinate, json, check_land).await {
                eprintln!("Error: {}", e.user_message());
                debug!("Analysis error: {}", e);
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Command::Serve { port }) => {
            let analyzer = providers::analyzer_from_config(&config, config.analysis.validate_land)?;
            web::run(Arc::new(analyzer), port.unwrap_or(config.server.port)).await
        }
        None => {
            print_usage_hint(&config, cli.config.as_ref());
            Ok(())
        }
    }
}

async fn analyze(
    config: &AppConfig,
    coordinate: Coordinate,
    json: bool,
    check_land: bool,
) -> quinoafit::Result<()> {
    let analyzer = providers::analyzer_from_config(config, check_land)?;
    let analysis = analyzer
        .analyze(coordinate.latitude, coordinate.longitude)
        .await?;

    if json {
        let output = serde_json::to_string_pretty(&analysis)
            .map_err(|e| SuitabilityError::config(format!("Failed to serialize analysis: {e}")))?;
        println!("{output}");
    } else {
        println!("{}", render_report(&analysis));
        if analysis.is_partial() {
            eprintln!(
                "\nWarning: {} value(s) were missing upstream and scored as 0.",
                analysis.data_gaps.len()
            );
        }
    }

    Ok(())
}

fn print_usage_hint(config: &AppConfig, config_path: Option<&PathBuf>) {
    let path = config_path
        .cloned()
        .or_else(AppConfig::get_config_path)
        .map_or_else(|| "config.toml".to_string(), |p| p.display().to_string());

    println!("QuinoaFit v{}", quinoafit::VERSION);
    println!("Configuration: {path}");
    println!(
        "  window: {} year(s), ending {} day(s) ago",
        config.analysis.window_years, config.analysis.recency_offset_days
    );
    println!("  land check: {}", config.analysis.validate_land);
    println!("  server port: {}", config.server.port);
    println!();
    println!("Usage:");
    println!("  quinoafit analyze <LAT,LON> [--json] [--skip-land-check]");
    println!("  quinoafit serve [--port <PORT>]");
}
