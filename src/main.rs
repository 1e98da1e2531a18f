//! Camara-Scraper main entry point
//!
//! This is the command-line interface for the Camara-Scraper document harvester.

use camara_scraper::browser::Chrome;
use camara_scraper::config::{load_config_with_hash, validate, Config, SiteKind};
use camara_scraper::harvest::{harvest, RunOptions};
use camara_scraper::output::{compute_statistics, print_statistics, read_json_index};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Camara-Scraper: a legislative document harvester
///
/// Walks the paginated document listing of a municipal legislative portal,
/// downloads the files of every document into one folder per document and
/// writes a JSON and CSV index. Interrupted runs resume where they stopped.
#[derive(Parser, Debug)]
#[command(name = "camara-scraper")]
#[command(version)]
#[command(about = "A legislative document harvester", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to the built-in profile of --site)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Built-in portal profile used when no configuration file is given
    #[arg(long, value_enum, default_value_t = SiteKind::Proposituras, conflicts_with = "config")]
    site: SiteKind,

    /// Process a single listing page and stop
    #[arg(long, visible_alias = "uma-pagina")]
    single_page: bool,

    /// Start from page 1, ignoring the checkpoint and previous index
    #[arg(long)]
    fresh: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without scraping
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics of the existing index and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("Using built-in profile: {}", cli.site);
            let cfg = Config::for_site(cli.site);
            validate(&cfg)?;
            cfg
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        let options = RunOptions {
            single_page: cli.single_page,
            fresh: cli.fresh,
        };
        handle_harvest(config, options).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("camara_scraper=info,warn"),
            1 => EnvFilter::new("camara_scraper=debug,info"),
            2 => EnvFilter::new("camara_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be scraped
fn handle_dry_run(config: &Config) {
    println!("=== Camara-Scraper Dry Run ===\n");

    println!("Site:");
    println!("  Kind: {}", config.site.kind);
    println!("  First listing page: {}", config.site.listing_url_for(1));
    println!("  Listing marker: {}", config.site.listing_marker);
    match config.site.max_pages {
        Some(max) => println!("  Max pages per run: {}", max),
        None => println!("  Max pages per run: unlimited"),
    }

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);

    println!("\nRendering:");
    if config.render.enabled {
        let chrome = match &config.render.chrome_path {
            Some(path) => Ok(Chrome::at(path)),
            None => Chrome::discover(),
        };
        match chrome {
            Ok(chrome) => println!("  Chrome: {}", chrome.path().display()),
            Err(e) => println!("  Chrome: unavailable ({})", e),
        }
        println!("  Settle delay: {}ms", config.render.settle_delay_ms);
    } else {
        println!("  Disabled");
    }

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory.display());
    println!("  JSON index: {}", config.output.index_json_path().display());
    println!("  CSV index: {}", config.output.index_csv_path().display());
    println!("  Checkpoint: {}", config.output.checkpoint_path().display());

    println!("\nClassification Rules ({}):", config.classification.len());
    for rule in &config.classification {
        println!("  - \"{}\" -> {}", rule.pattern, rule.kind);
    }
    println!("  (default: {})", config.default_kind);

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: summarizes the existing index
fn handle_stats(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let path = config.output.index_json_path();
    println!("Index: {}\n", path.display());

    let records = read_json_index(&path)?.unwrap_or_default();
    print_statistics(&compute_statistics(&records));

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(
    config: Config,
    options: RunOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if options.fresh {
        tracing::info!("Starting fresh run (ignoring previous state)");
    } else {
        tracing::info!("Starting run (will resume from previous state if any)");
    }

    match harvest(config, options).await {
        Ok(summary) => {
            tracing::info!(
                "Harvest completed successfully: pages {}..={}",
                summary.start_page,
                summary
                    .last_completed_page
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
