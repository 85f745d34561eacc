use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Json, Router};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/", get(list_entries))
}

/// The audit trail, oldest entry first.
pub async fn list_entries(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.ops.audit_entries() {
        Ok(entries) => {
            (StatusCode::OK, Json(serde_json::json!({ "items": entries }))).into_response()
        }
        Err(e) => errors::op_error_to_response(e),
    }
}
