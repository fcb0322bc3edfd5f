//! Delivery Averages Binary - per-minute moving average of translation delivery time
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin delivery_averages -- events.json 10
//! cargo run --release --bin delivery_averages -- events.json 10 --backend sqlite
//! ```
//!
//! ## Environment Variables
//!
//! - DELIVERY_OUTPUT_BACKEND - Output backend, `jsonl` or `sqlite` (default: jsonl)
//! - DELIVERY_OUTPUT_PATH - JSONL output file (default: output_file.json)
//! - DELIVERY_DB_PATH - SQLite database path (default: data/delivery_averages.db)
//! - RUST_LOG - Logging level (optional, default: info)

use clap::Parser;
use delivery_window::aggregator_core::{AggregateWriter, WindowSize};
use delivery_window::config::{BackendType, OutputConfig};
use delivery_window::compute_moving_averages_from_path;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "delivery_averages",
    version,
    about = "Compute the moving average translation delivery time for every minute"
)]
struct Cli {
    /// Path to the JSONL file with one translation event per line
    path: PathBuf,

    /// Size of the trailing window, in minutes
    #[arg(allow_negative_numbers = true)]
    window_size: i64,

    /// Output backend
    #[arg(long, value_enum, env = "DELIVERY_OUTPUT_BACKEND", default_value = "jsonl")]
    backend: BackendType,

    /// Output location (overrides DELIVERY_OUTPUT_PATH / DELIVERY_DB_PATH)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = OutputConfig::from_env(cli.backend).with_output_path(cli.output);

    log::info!("🚀 Starting delivery averages");
    log::info!("   Input: {}", cli.path.display());
    log::info!("   Window size: {} minutes", cli.window_size);
    log::info!("   Output: {}", config.output_path.display());

    let averages = compute_moving_averages_from_path(&cli.path, cli.window_size)?;
    let window = WindowSize::new(cli.window_size)?;

    let mut writer = AggregateWriter::new(&config, window)?;
    log::info!("📊 Backend: {}", writer.backend_type());

    let written = writer.write_all(&averages).await?;
    log::info!("✅ Wrote {} minute averages ({} window)", written, window.as_string());

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("❌ Run aborted: {:?}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
