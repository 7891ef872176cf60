//! ups-track - print the normalized shipment timeline for a UPS tracking number
//!
//! Module structure:
//! - `domain/` - Tracking stages, raw and normalized records
//! - `io/` - Carrier transport (UPS web endpoint)
//! - `services/` - Normalization pipeline and lookup service
//! - `infra/` - Configuration

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use ups_track::infra::Config;
use ups_track::io::UpsHttpClient;
use ups_track::services::{ProgressPipeline, TrackingService};

/// Fetch and normalize UPS shipment progress
#[derive(Parser, Debug)]
#[command(name = "ups-track", version, about)]
struct Args {
    /// UPS tracking number, e.g. 1Z0333056837575011
    tracking_id: String,

    /// Path to TOML configuration file (falls back to CONFIG_FILE, then config/ups.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Pretty-print the JSON timeline
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout carries only the JSON timeline.
    // Default: INFO, use RUST_LOG=debug for transport detail
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!(git_hash = env!("GIT_HASH"), "ups-track starting");

    let config = Config::load_from_path(&Config::resolve_config_path(args.config.as_deref()));
    info!(
        config_file = %config.config_file(),
        status_url = %config.status_url(),
        timeout_ms = %config.http_timeout_ms(),
        "config_loaded"
    );

    let client = UpsHttpClient::new(config)?;
    let service = TrackingService::new(client, ProgressPipeline::ups());

    match service.fetch_and_build_progress(&args.tracking_id).await {
        Ok(events) => {
            let json = if args.pretty {
                serde_json::to_string_pretty(&events)?
            } else {
                serde_json::to_string(&events)?
            };
            println!("{}", json);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_upstream_format_change() => {
            // Carrier answered with something outside the known vocabulary or formats
            error!(tracking_id = %args.tracking_id, kind = e.kind(), error = %e, "carrier_format_changed");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            error!(tracking_id = %args.tracking_id, kind = e.kind(), error = %e, "tracking_failed");
            Ok(ExitCode::FAILURE)
        }
    }
}
