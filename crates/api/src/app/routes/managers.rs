use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use timberledger_core::{ActorId, EntityId, Money};
use timberledger_parties::{ManagerId, PartnerId};

use crate::app::errors;
use crate::app::dto;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_manager).get(list_managers))
        .route("/:id/stock", get(manager_stock))
        .route("/:id/resales", post(manager_resale))
        .route("/:id/take", post(take_money))
}

fn manager_id(id: Uuid) -> ManagerId {
    ManagerId::new(EntityId::from_uuid(id))
}

pub async fn create_manager(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateManagerBody>,
) -> axum::response::Response {
    let partner_id = body
        .partner_id
        .map(|id| PartnerId::new(EntityId::from_uuid(id)));
    match services.ops.create_manager(body.name, partner_id) {
        Ok(manager) => (StatusCode::CREATED, Json(manager)).into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn list_managers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.ops.managers() {
        Ok(managers) => {
            (StatusCode::OK, Json(serde_json::json!({ "items": managers }))).into_response()
        }
        Err(e) => errors::op_error_to_response(e),
    }
}

/// Remaining resellable stock across every company sale linked to the
/// manager.
pub async fn manager_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<Uuid>,
) -> axum::response::Response {
    match services.ops.manager_stock(manager_id(id)) {
        Ok(stock) => (
            StatusCode::OK,
            Json(serde_json::json!({ "available_stock": stock })),
        )
            .into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn manager_resale(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<Uuid>,
    Json(body): Json<dto::ResaleBody>,
) -> axum::response::Response {
    match services.ops.manager_resale(body.into_request(manager_id(id))) {
        Ok(resale) => (StatusCode::CREATED, Json(resale)).into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

/// Admin-initiated take: an already-approved transfer that settles the
/// manager's loans oldest-first.
pub async fn take_money(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<Uuid>,
    Json(body): Json<dto::TakeMoneyBody>,
) -> axum::response::Response {
    match services.ops.take_from_manager(
        manager_id(id),
        Money::from_minor(body.amount),
        body.description.unwrap_or_default(),
        ActorId::from_uuid(body.approver),
    ) {
        Ok(transfer) => (StatusCode::OK, Json(transfer)).into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}
