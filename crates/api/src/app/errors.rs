//! Consistent JSON error responses.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use timberledger_infra::OpError;

/// Map an operation failure onto the HTTP surface: 4xx for guard and
/// validation failures, 5xx only for internal ones.
pub fn op_error_to_response(err: OpError) -> axum::response::Response {
    match err {
        OpError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        OpError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        OpError::InsufficientFunds {
            required,
            available,
        } => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "insufficient_funds",
            format!("required {required}, available {available}"),
        ),
        OpError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        OpError::Internal(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
