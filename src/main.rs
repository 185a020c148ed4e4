//! route-lookup
//!
//! Finds the applications bound to a (possibly wildcarded) hostname and
//! optionally targets the org/space owning them.
//!
//! # Architecture Overview
//!
//! ```text
//!   hostname ──▶ ┌──────────────┐   ┌──────────────┐   ┌────────────────┐
//!                │   domain     │──▶│    route     │──▶│  application   │
//!                │   resolver   │   │   resolver   │   │   resolver     │
//!                └──────┬───────┘   └──────┬───────┘   └───────┬────────┘
//!                       │                  │                   │
//!                       ▼                  ▼                   ▼
//!                ┌──────────────────────────────────────────────────────┐
//!                │        platform client (pagination, errors)          │
//!                │        └─▶ HttpConnection (reqwest, bearer token)    │
//!                └──────────────────────────────────────────────────────┘
//!                       ▲
//!                ┌──────┴───────┐
//!                │ org/space    │◀── group by space ◀── sorted bindings
//!                │ cache        │──▶ report lines ──▶ stdout
//!                └──────────────┘──▶ optional retarget
//! ```

use clap::Parser;
use std::path::PathBuf;
use tracing::Instrument;
use uuid::Uuid;

use route_lookup::config::{load_or_default, validate_config, AppStrategy, ConfigError};
use route_lookup::lookup::{LookupEvent, LookupOutcome, ReportSink, RetargetOutcome, RouteLookup};
use route_lookup::observability::logging::init_logging;
use route_lookup::platform::{HttpConnection, PlatformClient};

#[derive(Parser)]
#[command(name = "route-lookup")]
#[command(about = "Look up the applications bound to a route", long_about = None)]
struct Cli {
    /// Hostname to look up, `*` matches within one label (e.g. `*.apps.example.com`)
    hostname: String,

    /// Target the org / space containing the route
    #[arg(short = 't', long)]
    target: bool,

    /// Path to a TOML config file
    #[arg(short, long, env = "ROUTE_LOOKUP_CONFIG")]
    config: Option<PathBuf>,

    /// Control-plane API endpoint, overrides the config file
    #[arg(long, env = "CF_API")]
    api: Option<String>,

    /// Application resolution strategy (mapping or direct)
    #[arg(long)]
    strategy: Option<AppStrategy>,
}

/// Prints report lines as the lookup produces them.
struct TerminalSink;

impl ReportSink for TerminalSink {
    fn emit(&mut self, event: LookupEvent<'_>) {
        match event {
            LookupEvent::Bound { .. } => println!("Bound to:"),
            LookupEvent::Space { org, space } => {
                println!();
                println!("> cf target -o {} -s {}", org.name, space.name);
            }
            LookupEvent::Binding(binding) => match &binding.app {
                Some(app) => println!(
                    "  > cf app {} # route: {} ({})",
                    app.name, binding.hostname, binding.route.guid
                ),
                None => println!(
                    "  > # unbound route: {} ({})",
                    binding.hostname, binding.route.guid
                ),
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(api) = cli.api {
        config.api.endpoint = api;
    }
    if let Some(strategy) = cli.strategy {
        config.lookup.app_strategy = strategy;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability.log_level);

    tracing::debug!(
        endpoint = %config.api.endpoint,
        strategy = ?config.lookup.app_strategy,
        results_per_page = config.lookup.results_per_page,
        "Configuration loaded"
    );

    let conn = HttpConnection::new(&config.api)?;
    let client = PlatformClient::new(conn, config.lookup.results_per_page);
    let lookup = RouteLookup::new(client, config.lookup.app_strategy);

    let span = tracing::info_span!("lookup", invocation_id = %Uuid::new_v4(), hostname = %cli.hostname);
    let outcome = lookup
        .run(&cli.hostname, cli.target, &mut TerminalSink)
        .instrument(span)
        .await?;

    match outcome {
        LookupOutcome::NotBound { reason } => {
            tracing::debug!(%reason, "Nothing bound");
            println!("Not bound to any applications.");
        }
        LookupOutcome::Bound(report) => match report.retarget {
            Some(RetargetOutcome::Changed { org, space }) => {
                println!();
                println!("Changed target to: {}/{}", org, space);
            }
            Some(RetargetOutcome::Unavailable) => {
                println!();
                println!("Retarget unavailable: no application bound to the matching routes.");
            }
            None => {}
        },
    }

    Ok(())
}
