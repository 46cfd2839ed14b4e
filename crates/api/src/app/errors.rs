use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use estoque_core::DomainError;
use estoque_infra::StoreError;

/// Map a persistence-layer failure onto the JSON API's error contract.
pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Domain(DomainError::NotFound) => {
            json_error(StatusCode::NOT_FOUND, DomainError::NotFound.to_string())
        }
        StoreError::Domain(e) => json_error(StatusCode::BAD_REQUEST, e.to_string()),
        StoreError::Database(e) => {
            tracing::error!(error = %e, "database failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Erro no banco de dados.")
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "erro": message.into(),
        })),
    )
        .into_response()
}
