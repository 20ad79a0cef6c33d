//! landrecords - county land-record search
//!
//! Main entry point for the CLI application.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use landrecords::cli::{self, CommandOutput};
use landrecords::{Config, SearchCriteria};
use tracing_subscriber::EnvFilter;

/// Search county land records through a remote browser executor
#[derive(Parser, Debug)]
#[command(name = "landrecords")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Last name to search for
    #[arg(long, short = 'l', required_unless_present_any = ["parse", "save_config"])]
    last_name: Option<String>,

    /// First name to narrow the search
    #[arg(long, short = 'f')]
    first_name: Option<String>,

    /// Print the step sequence as JSON instead of running it
    #[arg(long, conflicts_with = "parse")]
    plan: bool,

    /// Extract records from a saved results-table HTML file
    #[arg(long, value_name = "FILE")]
    parse: Option<PathBuf>,

    /// Executor endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Executor bearer token
    #[arg(long)]
    token: Option<String>,

    /// Records portal root URL
    #[arg(long)]
    portal_url: Option<String>,

    /// Timeout for each wait step in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    save_config: bool,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build configuration
    let mut config = Config::load()?;

    // Apply CLI overrides
    if let Some(ref endpoint) = args.endpoint {
        config.executor.endpoint = Some(endpoint.clone());
    }

    if let Some(ref token) = args.token {
        config.executor.api_token = Some(token.clone());
    }

    if let Some(ref url) = args.portal_url {
        config.portal.url = url.clone();
    }

    if let Some(timeout) = args.timeout_ms {
        config.portal.wait_timeout_ms = timeout;
    }

    if args.compact {
        config.output.pretty = false;
    }

    if args.debug {
        config.debug = true;
    }

    init_logging(config.debug);

    if args.save_config {
        let path = config.save()?;
        println!("Configuration saved to {}", path.display());
        return Ok(());
    }

    let output = if let Some(ref path) = args.parse {
        cli::parse_file(&config, path)?
    } else {
        let criteria = SearchCriteria {
            surname: args.last_name.clone().context("--last-name is required")?,
            given_name: args.first_name.clone(),
        };

        if args.plan {
            cli::plan(&config, &criteria)?
        } else {
            cli::search(&config, &criteria).await?
        }
    };

    match output {
        CommandOutput::Json(json) => println!("{}", json),
        CommandOutput::Notice(message) => println!("{}", message),
    }

    Ok(())
}

/// Log to stderr so stdout only carries results
fn init_logging(debug: bool) {
    let fallback = if debug { "landrecords=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}
