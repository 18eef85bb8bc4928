//! tracedemo CLI
//!
//! Command-line driver for the traced demo calls. Each subcommand wraps one
//! outbound request to a public API in a span and prints the result.

#![allow(clippy::print_stdout)]

mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use config::AppConfig;
use integration_ip::{IpClient, IpifyClient};
use integration_news::{ChroniclingAmericaClient, NewsClient};
use integration_vehicles::{VehiclesClient, VpicClient};
use telemetry::{CallAttributes, CallKind, init_telemetry, trace_call};

/// tracedemo CLI
#[derive(Parser)]
#[command(name = "tracedemo")]
#[command(author, version, about = "Traced demo calls against public APIs", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the OTLP traces endpoint
    #[arg(long, env = "TRACEDEMO_OTLP_ENDPOINT")]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search historic newspaper titles (Chronicling America)
    News {
        /// Search terms
        #[arg(default_value = "oakland")]
        terms: String,

        /// 1-based result page
        #[arg(short, long, default_value = "5")]
        page: u32,
    },

    /// List vehicle manufacturers (NHTSA vPIC)
    Vehicles {
        /// 1-based result page
        #[arg(short, long)]
        page: Option<u32>,
    },

    /// Show the caller's public IP address (ipify)
    Ip,

    /// Run all three demo calls concurrently
    All,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

async fn run_news(config: &AppConfig, terms: &str, page: u32) -> anyhow::Result<()> {
    let client = ChroniclingAmericaClient::new(config.news.clone())?;
    let attributes = CallAttributes::new(
        "GET",
        client.search_url(terms, page),
        "chroniclingamerica-search",
        "chroniclingamerica",
    );

    let results = trace_call("news.search", &attributes, CallKind::Client, || {
        client.search_titles(terms, page)
    })
    .await?;

    println!(
        "📰 {} titles match \"{terms}\" (showing {}-{}):",
        results.total_items, results.start_index, results.end_index
    );
    for item in &results.items {
        let place = item.place_of_publication.as_deref().unwrap_or("unknown");
        println!("   {} — {place}", item.title);
    }

    Ok(())
}

async fn run_vehicles(config: &AppConfig, page: Option<u32>) -> anyhow::Result<()> {
    let client = VpicClient::new(config.vehicles.clone())?;
    let attributes = CallAttributes::new(
        "GET",
        client.manufacturers_url(page),
        "nhtsa-manufacturers",
        "nhtsa-api",
    );

    let list = trace_call(
        "vehicles.manufacturers.list",
        &attributes,
        CallKind::Client,
        || client.list_manufacturers(page),
    )
    .await?;

    println!("🚗 {} manufacturers:", list.count);
    for manufacturer in list.results.iter().take(10) {
        let name = manufacturer
            .common_name
            .as_deref()
            .unwrap_or(&manufacturer.name);
        println!("   {name}");
    }
    if list.results.len() > 10 {
        println!("   ... and {} more", list.results.len() - 10);
    }

    Ok(())
}

async fn run_ip(config: &AppConfig) -> anyhow::Result<()> {
    let client = IpifyClient::new(config.ip.clone())?;
    let attributes = CallAttributes::new("GET", client.ip_url(), "ipify-get-ip", "ipify");

    let result = trace_call("ip.address.get", &attributes, CallKind::Client, || {
        client.current_ip()
    })
    .await?;

    println!("🌐 Public IP: {}", result.ip);

    Ok(())
}

/// Run the three demo calls concurrently and report every failure
async fn run_all(config: &AppConfig) -> anyhow::Result<()> {
    let (news, vehicles, ip) = tokio::join!(
        run_news(config, "oakland", 5),
        run_vehicles(config, None),
        run_ip(config),
    );

    let mut failures = Vec::new();
    for (name, outcome) in [("news", news), ("vehicles", vehicles), ("ip", ip)] {
        if let Err(error) = outcome {
            println!("❌ {name} failed: {error:#}");
            failures.push(name);
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("{} of 3 demo calls failed", failures.len())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.verbose > 0 {
        config.telemetry.log_filter = log_filter_from_verbosity(cli.verbose).to_string();
    }
    if let Some(endpoint) = cli.endpoint {
        config.telemetry.endpoint = endpoint;
    }

    let telemetry = init_telemetry(&config.telemetry)?;

    let outcome = match cli.command {
        Commands::News { terms, page } => run_news(&config, &terms, page).await,
        Commands::Vehicles { page } => run_vehicles(&config, page).await,
        Commands::Ip => run_ip(&config).await,
        Commands::All => run_all(&config).await,
    };

    // Flush pending spans before the process exits, even when a call failed.
    if let Err(error) = telemetry.shutdown() {
        tracing::warn!(%error, "Telemetry shutdown failed");
    }

    outcome
}
