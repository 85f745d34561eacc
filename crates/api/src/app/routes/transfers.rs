use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use uuid::Uuid;

use timberledger_core::{ActorId, EntityId, Money};
use timberledger_managers::TransferId;
use timberledger_parties::ManagerId;

use crate::app::errors;
use crate::app::dto;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(request_transfer).get(list_transfers))
        .route("/:id/approve", post(approve_transfer))
        .route("/:id/reject", post(reject_transfer))
}

fn transfer_id(id: Uuid) -> TransferId {
    TransferId::new(EntityId::from_uuid(id))
}

pub async fn request_transfer(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RequestTransferBody>,
) -> axum::response::Response {
    match services.ops.request_transfer(
        ManagerId::new(EntityId::from_uuid(body.manager_id)),
        body.destination.into_destination(),
        Money::from_minor(body.amount),
        body.description.unwrap_or_default(),
    ) {
        Ok(transfer) => (StatusCode::CREATED, Json(transfer)).into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn list_transfers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.ops.transfers() {
        Ok(transfers) => {
            (StatusCode::OK, Json(serde_json::json!({ "items": transfers }))).into_response()
        }
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn approve_transfer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<Uuid>,
    Json(body): Json<dto::TransferDecisionBody>,
) -> axum::response::Response {
    decide(services, id, true, body.approver)
}

pub async fn reject_transfer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<Uuid>,
    Json(body): Json<dto::TransferDecisionBody>,
) -> axum::response::Response {
    decide(services, id, false, body.approver)
}

fn decide(
    services: Arc<AppServices>,
    id: Uuid,
    approve: bool,
    approver: Uuid,
) -> axum::response::Response {
    match services
        .ops
        .decide_transfer(transfer_id(id), approve, ActorId::from_uuid(approver))
    {
        Ok(transfer) => (StatusCode::OK, Json(transfer)).into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}
