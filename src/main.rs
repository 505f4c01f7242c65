//! cdn-sync
//!
//! Keeps a CDN zone's settings in line with a JSON file kept under version
//! control.
//!
//! # Architecture Overview
//!
//! ```text
//!   download:  CDN API ──fetch_settings──▶ ConfigSnapshot ──save──▶ file
//!
//!   upload:    CDN API ──fetch_settings──▶ actual ─┐
//!              file ─────────load────────▶ desired ┴▶ compare_for_update
//!                                                       │
//!                               ConfigMismatch ◀────────┤
//!                                                       ▼
//!              CDN API ◀──────PATCH per key────── apply_plan (or dry run)
//! ```
//!
//! # Usage
//! ```bash
//! cdn-sync --email ops@example.com --key $KEY list-zones
//! cdn-sync download --zone 023e105f... --file zone.json
//! cdn-sync upload --zone 023e105f... --file zone.json --dry-run
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use cdn_sync::api::CdnClient;
use cdn_sync::config::{load_config, ConfigOverrides};
use cdn_sync::observability::init_logging;
use cdn_sync::reconcile::{compare_for_update, unmanaged};
use cdn_sync::store::{load_snapshot, save_snapshot};

#[derive(Parser)]
#[command(name = "cdn-sync")]
#[command(about = "Synchronize CDN zone settings with a local JSON file", long_about = None)]
#[command(version)]
struct Cli {
    /// Account email address
    #[arg(long, env = "CDN_SYNC_EMAIL", global = true)]
    email: Option<String>,

    /// API key
    #[arg(long, env = "CDN_SYNC_KEY", global = true, hide_env_values = true)]
    key: Option<String>,

    /// API root URL
    #[arg(long, env = "CDN_SYNC_ROOT_URL", global = true)]
    root_url: Option<String>,

    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CDN_SYNC_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List zone IDs and names
    ListZones,

    /// Save a zone's current settings to a file
    Download {
        /// Zone ID
        #[arg(long)]
        zone: String,

        /// Destination file
        #[arg(long)]
        file: PathBuf,
    },

    /// Push the settings in a file to a zone
    Upload {
        /// Zone ID
        #[arg(long)]
        zone: String,

        /// Desired-state file
        #[arg(long)]
        file: PathBuf,

        /// Log the changes without submitting them
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let overrides = ConfigOverrides {
        root_url: cli.root_url,
        email: cli.email,
        key: cli.key,
        log_level: cli.log_level,
    };
    let config = load_config(cli.config.as_deref(), overrides).context("Invalid configuration")?;

    init_logging(&config.observability.log_level, cli.verbose);
    tracing::debug!(root_url = %config.api.root_url, "Configuration loaded");

    let client = CdnClient::new(&config)?;

    match cli.command {
        Commands::ListZones => list_zones(&client).await,
        Commands::Download { zone, file } => download(&client, &zone, &file).await,
        Commands::Upload { zone, file, dry_run } => upload(&client, &zone, &file, dry_run).await,
    }
}

async fn list_zones(client: &CdnClient) -> Result<()> {
    let zones = client.list_zones().await.context("Failed to list zones")?;
    for zone in &zones {
        println!("{}\t{}", zone.id, zone.name);
    }
    Ok(())
}

async fn download(client: &CdnClient, zone: &str, file: &Path) -> Result<()> {
    let snapshot = client
        .fetch_settings(zone)
        .await
        .context("Failed to fetch zone settings")?;

    tracing::info!(zone = %zone, settings = snapshot.len(), file = %file.display(), "Saving configuration");
    save_snapshot(&snapshot, file)?;
    Ok(())
}

async fn upload(client: &CdnClient, zone: &str, file: &Path, dry_run: bool) -> Result<()> {
    let actual = client
        .fetch_settings(zone)
        .await
        .context("Failed to fetch zone settings")?;
    let desired = load_snapshot(file)?;

    if dry_run {
        tracing::info!("Dry run mode. Changes won't be submitted");
    }
    tracing::info!(zone = %zone, "Comparing and updating configuration");

    for (key, value) in &unmanaged(&actual, &desired) {
        tracing::info!(key = %key, value = %value, "Missing from local config, leaving unchanged");
    }

    let plan = match compare_for_update(&actual, &desired) {
        Ok(plan) => plan,
        Err(mismatch) => {
            for (key, value) in &mismatch.missing {
                tracing::error!(key = %key, value = %value, "Missing from remote config");
            }
            return Err(mismatch.into());
        }
    };

    if plan.is_empty() {
        tracing::info!("No config changes to make");
        return Ok(());
    }

    match client.apply_plan(zone, &plan, dry_run).await {
        Ok(changed) => {
            tracing::info!(changed = changed.len(), dry_run, "Configuration update finished");
            Ok(())
        }
        Err(e) => {
            if !e.applied.is_empty() {
                tracing::warn!(
                    applied = ?e.applied,
                    "These settings were changed before the failure and remain changed"
                );
            }
            Err(e.into())
        }
    }
}
