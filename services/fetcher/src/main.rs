//! Daily precipitation fetcher.
//!
//! Stateless batch job: one invocation downloads the recent days still
//! missing from the store and exits. The daily cadence comes from an
//! external scheduler (cron at 02:00); a failed run exits non-zero and the
//! next trigger naturally retries.

mod ingest;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use chmi_source::{HppsClient, HppsConfig, MAX_DAY_OFFSET};
use storage::DailyStore;

#[derive(Parser, Debug)]
#[command(name = "fetcher")]
#[command(about = "Download recent CHMI precipitation data into the day store")]
struct Args {
    /// Directory holding the per-date CSV files
    #[arg(long, env = "DATA_DIR", default_value = "data/daily")]
    data_dir: PathBuf,

    /// Most recent day offset to download (0 = today, 1 = yesterday)
    #[arg(long, default_value = "1")]
    min_offset: u32,

    /// Oldest day offset to download
    #[arg(long, default_value = "7")]
    max_offset: u32,

    /// Base URL of the precipitation page
    #[arg(
        long,
        env = "CHMI_BASE_URL",
        default_value = "https://hydro.chmi.cz/hppsoldv/hpps_act_rain.php"
    )]
    base_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// Delay between subpage requests in milliseconds
    #[arg(long, default_value = "500")]
    page_delay_ms: u64,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if args.min_offset > args.max_offset {
        anyhow::bail!(
            "min-offset {} is greater than max-offset {}",
            args.min_offset,
            args.max_offset
        );
    }
    if args.max_offset > MAX_DAY_OFFSET {
        anyhow::bail!(
            "max-offset {} exceeds the {} days the source keeps",
            args.max_offset,
            MAX_DAY_OFFSET
        );
    }

    info!(
        data_dir = %args.data_dir.display(),
        window = format!("{}-{}", args.min_offset, args.max_offset),
        "Starting precipitation fetch run"
    );

    let store = DailyStore::open(&args.data_dir).context("Failed to open day store")?;

    let client = HppsClient::new(HppsConfig {
        base_url: args.base_url.clone(),
        request_timeout: Duration::from_secs(args.timeout_secs),
        page_delay: Duration::from_millis(args.page_delay_ms),
    })
    .context("Failed to create CHMI client")?;

    let today = Utc::now().date_naive();
    let summary = ingest::run_ingestion(&store, &client, today, args.min_offset, args.max_offset)
        .await
        .context("Ingestion run failed")?;

    info!(
        days_written = summary.days_written,
        rows_written = summary.rows_written,
        days_already_present = summary.days_already_present,
        "Fetch run complete"
    );

    Ok(())
}
