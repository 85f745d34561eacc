use std::sync::Arc;

use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};

use crate::app::errors;
use crate::app::dto;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/", post(create_partner).get(list_partners))
}

pub async fn create_partner(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateNamedBody>,
) -> axum::response::Response {
    match services.ops.create_partner(body.name) {
        Ok(partner) => (StatusCode::CREATED, Json(partner)).into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn list_partners(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.ops.partners() {
        Ok(partners) => {
            (StatusCode::OK, Json(serde_json::json!({ "items": partners }))).into_response()
        }
        Err(e) => errors::op_error_to_response(e),
    }
}
