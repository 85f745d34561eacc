use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use timberledger_core::{EntityId, Money, Quantity};
use timberledger_orders::OrderId;

use crate::app::errors;
use crate::app::dto;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route("/:id", get(get_order))
        .route("/:id/pay-loan", post(pay_loan))
        .route("/:id/pay-transportation", post(pay_transportation))
        .route("/:id/pay-customs", post(pay_customs))
        .route("/:id/sell", post(sell))
        .route("/:id/increase", post(increase_value))
}

fn order_id(id: Uuid) -> OrderId {
    OrderId::new(EntityId::from_uuid(id))
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateOrderBody>,
) -> axum::response::Response {
    match services.ops.create_order(body.into_request()) {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.ops.orders() {
        Ok(orders) => {
            (StatusCode::OK, Json(serde_json::json!({ "items": orders }))).into_response()
        }
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<Uuid>,
) -> axum::response::Response {
    match services.ops.order(order_id(id)) {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn pay_loan(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<Uuid>,
    Json(body): Json<dto::PayLoanBody>,
) -> axum::response::Response {
    let containers = body
        .containers
        .into_iter()
        .map(dto::ContainerBody::into_spec)
        .collect();
    match services.ops.pay_loan(order_id(id), containers) {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn pay_transportation(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<Uuid>,
    Json(body): Json<dto::PayTransportationBody>,
) -> axum::response::Response {
    match services.ops.pay_transportation(
        order_id(id),
        Money::from_minor(body.cost),
        body.container_indices,
        Quantity::from_units(body.quantity),
    ) {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn pay_customs(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<Uuid>,
    Json(body): Json<dto::PayCustomsBody>,
) -> axum::response::Response {
    match services.ops.pay_customs(
        order_id(id),
        Money::from_minor(body.cost),
        body.quantity.map(Quantity::from_units),
    ) {
        Ok((order, split)) => (
            StatusCode::OK,
            Json(serde_json::json!({ "order": order, "split": split })),
        )
            .into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn sell(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<Uuid>,
    Json(body): Json<dto::SellBody>,
) -> axum::response::Response {
    match services.ops.sell(body.into_request(order_id(id))) {
        Ok(sale) => (StatusCode::CREATED, Json(sale)).into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn increase_value(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<Uuid>,
    Json(body): Json<dto::IncreaseValueBody>,
) -> axum::response::Response {
    match services
        .ops
        .increase_order_value(order_id(id), Quantity::from_units(body.quantity))
    {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}
