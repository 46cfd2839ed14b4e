use std::sync::Arc;

use estoque_auth::{Authenticator, StaticCredentials};
use estoque_infra::ProductStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    estoque_observability::init();

    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        tracing::info!("DATABASE_URL not set; using sqlite:estoque.db");
        "sqlite:estoque.db?mode=rwc".to_string()
    });
    let username = std::env::var("ESTOQUE_USER").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("ESTOQUE_PASS").unwrap_or_else(|_| {
        tracing::warn!("ESTOQUE_PASS not set; using insecure dev default");
        "1234".to_string()
    });
    let addr = std::env::var("ESTOQUE_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());

    let store = ProductStore::connect(&database_url).await?;
    let authenticator: Arc<dyn Authenticator> = Arc::new(StaticCredentials::new(username, password));

    let app = estoque_api::app::build_app(store, authenticator);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
