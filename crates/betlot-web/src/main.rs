mod handlers;
mod openapi;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use clap::Parser;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use betlot_core::model::load_trade_history;

use openapi::ApiDoc;
use state::{SharedState, TradesIndex};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// ============================================================
// CLI
// ============================================================

#[derive(Parser)]
#[command(name = "betlot-web", about = "betlot CLV service", version = betlot_core::VERSION)]
struct Args {
    /// Listen address.
    #[arg(long, default_value = "0.0.0.0:8080", env = "BETLOT_LISTEN")]
    listen: String,

    /// Path to the trade activity export (`{ userAddress, trades: [...] }`).
    #[arg(long, env = "BETLOT_TRADES")]
    trades: PathBuf,
}

// ============================================================
// Main
// ============================================================

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "betlot_web=info".parse().unwrap()),
        )
        .init();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
        .block_on(async_main(args));
}

async fn async_main(args: Args) {
    let history = match load_trade_history(&args.trades) {
        Ok(h) => h,
        Err(e) => {
            error!(path = %args.trades.display(), error = %e, "failed to load trade history");
            process::exit(1);
        }
    };
    info!(
        version = betlot_core::VERSION,
        user = %history.user_address,
        trades = history.trades.len(),
        "starting"
    );

    let state: SharedState = Arc::new(TradesIndex::new(history));

    let app = Router::new()
        .route("/api/v1/health", get(handlers::handle_health))
        .route("/api/v1/clv", post(handlers::handle_clv))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new());

    let addr: SocketAddr = args.listen.parse().expect("invalid listen address");
    info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");

    axum::serve(listener, app).await.expect("server error");
}
