use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Json, Router};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/", get(list_debts))
}

pub async fn list_debts(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.ops.supplier_debts() {
        Ok(debts) => {
            (StatusCode::OK, Json(serde_json::json!({ "items": debts }))).into_response()
        }
        Err(e) => errors::op_error_to_response(e),
    }
}
