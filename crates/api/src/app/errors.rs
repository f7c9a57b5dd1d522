use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use mechanic_shop_core::DomainError;
use mechanic_shop_infra::StoreError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::ConstraintViolation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "constraint_violation", msg)
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "customer not found"),
    }
}

/// Expected store outcomes map by kind; backend failures become an opaque 500.
pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Domain(e) => domain_error_to_response(e),
        other => {
            tracing::error!(error = %other, "customer store failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal storage error",
            )
        }
    }
}

/// A body axum could not read as JSON is a validation problem, not a 415/422.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(
        StatusCode::BAD_REQUEST,
        "validation_error",
        rejection.body_text(),
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    let message = message.into();
    if status.is_client_error() {
        tracing::warn!(status = status.as_u16(), code, %message, "request rejected");
    }
    (
        status,
        axum::Json(json!({
            "error": message,
            "code": code,
        })),
    )
        .into_response()
}
