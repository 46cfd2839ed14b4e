//! JSON API over the product store.
//!
//! Thin verb/path mapping: request-shape checks here, everything else in
//! the domain and the store. No login gate on this surface.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value as JsonValue;

use estoque_core::{DomainError, ProductId};
use estoque_inventory::{NewProduct, ProductFilter};

use crate::app::{dto, errors, AppState};

const EMPTY_BODY: &str = "Corpo da requisição não pode ser vazio";
const MOVEMENT_FIELDS_REQUIRED: &str = "Campos 'tipo' e 'quantidade' são obrigatórios.";

pub fn router() -> Router {
    Router::new()
        .route("/produtos", post(create_product).get(list_products))
        .route(
            "/produtos/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/produtos/:id/estoque", post(adjust_stock))
}

/// `POST /produtos`
pub async fn create_product(
    Extension(state): Extension<Arc<AppState>>,
    body: Option<Json<JsonValue>>,
) -> axum::response::Response {
    let Some(body) = usable_body(body) else {
        return errors::json_error(StatusCode::BAD_REQUEST, EMPTY_BODY);
    };

    let new = match NewProduct::parse(&body) {
        Ok(new) => new,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, e.to_string()),
    };

    match state.store.create(&new).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// `GET /produtos?nome=&categoria=`
pub async fn list_products(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<dto::ListProductsQuery>,
) -> axum::response::Response {
    let filter = ProductFilter::new(query.nome, query.categoria);
    match state.store.list(&filter).await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// `GET /produtos/{id}`
pub async fn get_product(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match state.store.get(ProductId::from_raw(id)).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// `PUT /produtos/{id}`
pub async fn update_product(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<i64>,
    body: Option<Json<JsonValue>>,
) -> axum::response::Response {
    let Some(body) = usable_body(body) else {
        return errors::json_error(StatusCode::BAD_REQUEST, EMPTY_BODY);
    };

    match state.store.update(ProductId::from_raw(id), &body).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// `DELETE /produtos/{id}`
pub async fn delete_product(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match state.store.remove(ProductId::from_raw(id)).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => errors::json_error(StatusCode::NOT_FOUND, DomainError::not_found().to_string()),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// `POST /produtos/{id}/estoque`
pub async fn adjust_stock(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<i64>,
    body: Option<Json<JsonValue>>,
) -> axum::response::Response {
    let Some(body) = usable_body(body) else {
        return errors::json_error(StatusCode::BAD_REQUEST, MOVEMENT_FIELDS_REQUIRED);
    };
    let (Some(kind), Some(amount)) = (body.get("tipo"), body.get("quantidade")) else {
        return errors::json_error(StatusCode::BAD_REQUEST, MOVEMENT_FIELDS_REQUIRED);
    };

    match state.store.adjust_stock(ProductId::from_raw(id), kind, amount).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// A missing, null, or empty-object body counts as "no body".
fn usable_body(body: Option<Json<JsonValue>>) -> Option<JsonValue> {
    let Json(body) = body?;
    if body.is_null() || body.as_object().is_some_and(|map| map.is_empty()) {
        return None;
    }
    Some(body)
}
