use std::sync::Arc;

use axum::{extract::State, middleware::Next, response::Response};

use crate::app::AppState;
use crate::context::SessionContext;
use crate::cookies::{self, Flash};

/// Resolve the session cookie into an explicit request-scoped marker.
///
/// Every routed request carries a [`SessionContext`] after this layer runs.
pub async fn session_context(
    State(state): State<Arc<AppState>>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let ctx = match cookies::session_token(req.headers()) {
        Some(token) if state.sessions.is_active(token) => SessionContext::Authenticated(token),
        _ => SessionContext::Anonymous,
    };
    req.extensions_mut().insert(ctx);

    next.run(req).await
}

/// Guard wrapping the protected UI routes.
///
/// Anonymous requests never reach the handler; they are sent to the login
/// page with a warning flash.
pub async fn require_session(
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let authenticated = req
        .extensions()
        .get::<SessionContext>()
        .is_some_and(SessionContext::is_authenticated);

    if !authenticated {
        let flash = Flash::warning("Por favor, faça login para acessar esta página.");
        return cookies::redirect_with_flash("/login", flash);
    }

    next.run(req).await
}
