use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use mechanic_shop_customers::{codec, CustomerId};
use mechanic_shop_infra::CustomerStore;

use crate::app::errors;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_customer).get(list_customers))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

pub async fn create_customer(
    Extension(store): Extension<Arc<dyn CustomerStore>>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let new = match codec::decode(&body) {
        Ok(n) => n,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match store.insert(new).await {
        Ok(customer) => {
            tracing::info!(customer_id = %customer.id, "customer created");
            (StatusCode::CREATED, Json(codec::encode(&customer))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_customers(
    Extension(store): Extension<Arc<dyn CustomerStore>>,
) -> axum::response::Response {
    match store.list_all().await {
        Ok(customers) => (StatusCode::OK, Json(codec::encode_many(&customers))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_customer(
    Extension(store): Extension<Arc<dyn CustomerStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match store.get_by_id(id).await {
        Ok(customer) => (StatusCode::OK, Json(codec::encode(&customer))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_customer(
    Extension(store): Extension<Arc<dyn CustomerStore>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    // An unknown id is a 404 even when the body is also invalid.
    if let Err(e) = store.get_by_id(id).await {
        return errors::store_error_to_response(e);
    }

    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let changes = match codec::decode_changes(&body) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match store.update(id, changes).await {
        Ok(customer) => {
            tracing::info!(customer_id = %customer.id, "customer updated");
            (StatusCode::OK, Json(codec::encode(&customer))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_customer(
    Extension(store): Extension<Arc<dyn CustomerStore>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match store.delete(id).await {
        Ok(()) => {
            tracing::info!(customer_id = %id, "customer deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Non-integer ids never name a customer, so they are a 404 rather than a 400.
fn parse_id(raw: &str) -> Result<CustomerId, axum::response::Response> {
    raw.parse::<CustomerId>().map_err(|_| {
        errors::json_error(StatusCode::NOT_FOUND, "not_found", "customer not found")
    })
}
