use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use uuid::Uuid;

use timberledger_core::{EntityId, Money};
use timberledger_ledger::LoanId;

use crate::app::errors;
use crate::app::dto;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_loan).get(list_loans))
        .route("/:id/repay", post(repay_loan))
}

pub async fn create_loan(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateLoanBody>,
) -> axum::response::Response {
    let req = match body.into_request() {
        Ok(req) => req,
        Err(resp) => return resp,
    };
    match services.ops.create_loan(req) {
        Ok(loan) => (StatusCode::CREATED, Json(loan)).into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn list_loans(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.ops.loans() {
        Ok(loans) => {
            (StatusCode::OK, Json(serde_json::json!({ "items": loans }))).into_response()
        }
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn repay_loan(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<Uuid>,
    Json(body): Json<dto::RepayLoanBody>,
) -> axum::response::Response {
    let loan_id = LoanId::new(EntityId::from_uuid(id));
    match services.ops.repay_loan(loan_id, Money::from_minor(body.amount)) {
        Ok(loan) => (StatusCode::OK, Json(loan)).into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}
