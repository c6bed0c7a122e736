//! HTTP request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use tracing::{info, warn};

use betlot_core::analysis::compute_clv;
use betlot_core::api::schema::{ApiError, ClvRequest, ClvSummary};

use crate::state::AppState;

// ============================================================
// Health
// ============================================================

#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    )
)]
pub(crate) async fn handle_health() -> &'static str {
    "ok"
}

// ============================================================
// CLV
// ============================================================

#[utoipa::path(
    post,
    path = "/api/v1/clv",
    request_body = ClvRequest,
    responses(
        (status = 200, description = "Computed CLV summary", body = ClvSummary),
        (status = 400, description = "Empty rows or unknown user address", body = ApiError)
    )
)]
pub(crate) async fn handle_clv(
    State(state): AppState,
    Json(request): Json<ClvRequest>,
) -> Result<Json<ClvSummary>, (StatusCode, Json<ApiError>)> {
    let bad_request = |message: &str| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: message.to_string(),
            }),
        )
    };

    if request.rows.is_empty() {
        return Err(bad_request("no rows provided"));
    }
    if request.user_address.is_empty() {
        return Err(bad_request("user_address not provided"));
    }
    if !request
        .user_address
        .eq_ignore_ascii_case(&state.user_address)
    {
        warn!(
            requested = %request.user_address,
            loaded = %state.user_address,
            "clv request for unknown user address"
        );
        return Err(bad_request("no trade history loaded for this user address"));
    }

    let stats = compute_clv(&request.rows, &state.fills);
    info!(
        rows = request.rows.len(),
        computed = stats.computed,
        "clv summary computed"
    );
    Ok(Json(ClvSummary::from(stats)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TradesIndex;
    use betlot_core::analysis::ClvBet;
    use betlot_core::model::{Fill, TradeHistory};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn index() -> Arc<TradesIndex> {
        Arc::new(TradesIndex::new(TradeHistory {
            user_address: "0xABC".into(),
            trades: vec![Fill {
                condition_id: "c1".into(),
                asset: "a1".into(),
                timestamp: 1_699_999_000_000,
                size: 10.0,
                price: 0.5,
            }],
        }))
    }

    fn request(address: &str, rows: Vec<ClvBet>) -> ClvRequest {
        ClvRequest {
            user_address: address.into(),
            rows,
        }
    }

    fn row() -> ClvBet {
        ClvBet {
            condition_id: "c1".into(),
            asset: "a1".into(),
            start_time: Utc.timestamp_opt(1_700_000_000, 0).single(),
            closing_price: Some(0.6),
        }
    }

    #[tokio::test]
    async fn computes_a_summary_for_matching_rows() {
        let response = handle_clv(State(index()), Json(request("0xabc", vec![row()])))
            .await
            .unwrap();
        assert_eq!(response.0.computed, 1);
        assert_eq!(response.0.clv_positive_percent, 100.0);
    }

    #[tokio::test]
    async fn empty_rows_are_rejected() {
        let err = handle_clv(State(index()), Json(request("0xabc", vec![])))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(err.1.0.error, "no rows provided");
    }

    #[tokio::test]
    async fn unknown_address_is_rejected() {
        let err = handle_clv(State(index()), Json(request("0xother", vec![row()])))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert!(err.1.0.error.contains("user address"));
    }
}
