// src/main.rs
mod extractors;
mod scrape;
mod utils;
mod wiki;

use clap::error::ErrorKind;
use clap::Parser;
use scrape::{render_result, MoveScraper};
use utils::ScrapeError;
use wiki::{ScrapeConfig, WikiClient};

const USAGE: &str = "Usage: dustloop_scraper <character> <section> <subsection>";

/// Command Line Interface for the Dustloop move scraper
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Character page name, e.g. `Vira`
    character: String,

    /// Section heading, e.g. "Normal Moves"
    section: Option<String>,

    /// Move heading or notation, e.g. "5L" or "Dream Attraction"
    subsection: Option<String>,

    /// List the page's sections and their moves instead of scraping one move
    #[arg(long)]
    outline: bool,

    /// Site root (overrides DUSTLOOP_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Wiki game namespace (overrides DUSTLOOP_GAME)
    #[arg(long)]
    game: Option<String>,

    /// Page fetch timeout in seconds (overrides DUSTLOOP_TIMEOUT_SECS)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments; anything but --help/--version becomes a JSON error
    let output = match Args::try_parse() {
        Ok(args) => {
            tracing::debug!("Starting processing for args: {:?}", args);
            run(args).await
        }
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            tracing::error!("Invalid arguments: {}", e);
            render_result::<()>(Err(ScrapeError::Config(USAGE.to_string())))
        }
    };

    // 3. Exactly one JSON object on stdout, exit code 0 either way
    println!("{}", output);
}

async fn run(args: Args) -> serde_json::Value {
    let config = ScrapeConfig::from_env().with_overrides(args.base_url, args.game, args.timeout_secs);
    tracing::debug!("Using {:?}", config);

    let client = match WikiClient::new(config.clone()) {
        Ok(client) => client,
        Err(e) => return render_result::<()>(Err(e.into())),
    };
    let scraper = MoveScraper::new(client, &config);

    if args.outline {
        return render_result(scraper.outline(&args.character).await);
    }

    match (args.section, args.subsection) {
        (Some(section), Some(subsection)) => {
            render_result(scraper.scrape(&args.character, &section, &subsection).await)
        }
        _ => render_result::<()>(Err(ScrapeError::Config(USAGE.to_string()))),
    }
}
