//! HTTP application wiring (Axum router + shared state).
//!
//! This folder is structured like:
//! - `routes/`: HTTP routes + handlers (JSON API and HTML UI)
//! - `dto.rs`: query/form DTOs shared by the handlers
//! - `errors.rs`: consistent JSON error responses
//! - `views.rs`: server-rendered pages for the interactive UI

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use estoque_auth::{Authenticator, SessionStore};
use estoque_infra::ProductStore;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod views;

/// Shared application state handed to every handler.
pub struct AppState {
    pub store: ProductStore,
    pub sessions: SessionStore,
    pub authenticator: Arc<dyn Authenticator>,
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(store: ProductStore, authenticator: Arc<dyn Authenticator>) -> Router {
    let state = Arc::new(AppState {
        store,
        sessions: SessionStore::default(),
        authenticator,
    });

    // Interactive UI: everything except login/logout sits behind the guard.
    let web_protected = routes::web::protected_router()
        .route_layer(axum::middleware::from_fn(middleware::require_session));
    let web = routes::web::public_router().merge(web_protected);

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::products::router())
        .merge(web)
        .layer(
            ServiceBuilder::new()
                .layer(Extension(state.clone()))
                .layer(axum::middleware::from_fn_with_state(
                    state,
                    middleware::session_context,
                )),
        )
}
