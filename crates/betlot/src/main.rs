//! betlot - Interactive TUI dashboard for betting exports.
//!
//! Usage:
//!   betlot bets.json                         # view an export
//!   betlot bets.json --server http://host:8080
//!   betlot bets.json --min-bets 20 --exclude-tags Politics,Crypto

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;

use betlot_core::model::load_portfolio;
use betlot_core::tui::{AnalysisOptions, App, AppState};

/// Interactive dashboard for betting exports.
#[derive(Parser)]
#[command(name = "betlot", about = "Betting analytics viewer", version = betlot_core::VERSION)]
struct Args {
    /// Path to the betting export (`{ userAddress, bets: [...] }`).
    #[arg(value_name = "EXPORT")]
    export: PathBuf,

    /// CLV service address.
    #[arg(long, default_value = "http://localhost:8080", env = "BETLOT_SERVER")]
    server: String,

    /// Minimum bets a tag needs to appear in the breakdown.
    #[arg(long, default_value = "50", env = "BETLOT_MIN_BETS")]
    min_bets: usize,

    /// Extra tags to exclude from the breakdown, comma-separated.
    #[arg(long, value_delimiter = ',', env = "BETLOT_EXCLUDE_TAGS")]
    exclude_tags: Vec<String>,

    /// UI tick interval in milliseconds.
    #[arg(long, default_value = "250")]
    tick_ms: u64,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "betlot=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let portfolio = match load_portfolio(&args.export) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error loading '{}': {}", args.export.display(), e);
            process::exit(1);
        }
    };

    if portfolio.bets.is_empty() {
        eprintln!("Export '{}' contains no bets", args.export.display());
        process::exit(1);
    }

    let options = AnalysisOptions {
        min_bets: args.min_bets,
        exclude_tags: args.exclude_tags,
    };
    let state = AppState::new(
        portfolio,
        &options,
        args.server,
        Utc::now().date_naive(),
    );

    let app = App::new(state);
    if let Err(e) = app.run(Duration::from_millis(args.tick_ms.max(50))) {
        eprintln!("Error running TUI: {}", e);
        process::exit(1);
    }
}
