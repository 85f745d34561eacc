use std::sync::Arc;

use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};

use crate::app::errors;
use crate::app::dto;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/", post(create_supplier).get(list_suppliers))
}

pub async fn create_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateNamedBody>,
) -> axum::response::Response {
    match services.ops.create_supplier(body.name) {
        Ok(supplier) => (StatusCode::CREATED, Json(supplier)).into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn list_suppliers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.ops.suppliers() {
        Ok(suppliers) => {
            (StatusCode::OK, Json(serde_json::json!({ "items": suppliers }))).into_response()
        }
        Err(e) => errors::op_error_to_response(e),
    }
}
