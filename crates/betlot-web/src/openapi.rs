//! OpenAPI documentation definition.

use betlot_core::analysis::ClvBet;
use betlot_core::api::schema::{ApiError, ClvRequest, ClvSummary};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::handle_health,
        crate::handlers::handle_clv,
    ),
    components(schemas(ClvRequest, ClvSummary, ClvBet, ApiError)),
    info(
        title = "betlot API",
        version = "1.0",
        description = "Closing Line Value service — computes CLV summaries for betting exports"
    )
)]
pub(crate) struct ApiDoc;
