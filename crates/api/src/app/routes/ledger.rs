use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::errors;
use crate::app::services::AppServices;

/// The derived available-cash figure, recomputed on every request.
pub async fn balance(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.ops.balance() {
        Ok(balance) => (
            StatusCode::OK,
            Json(serde_json::json!({ "balance": balance })),
        )
            .into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}
