//! Interactive UI: the same domain operations as the JSON API, presented as
//! HTML forms behind the session gate.
//!
//! Failure handling follows the notification-and-redirect pattern: the
//! outcome becomes a one-shot flash and the browser is sent back to a page
//! that renders it.

use std::sync::Arc;

use axum::{
    extract::{Extension, Form, Path},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value as JsonValue};

use estoque_core::{DomainError, ProductId};
use estoque_inventory::{NewProduct, ProductFilter};
use estoque_infra::StoreError;

use crate::app::{dto, views, AppState};
use crate::context::SessionContext;
use crate::cookies::{self, Flash};

/// Routes reachable without a session.
pub fn public_router() -> Router {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
}

/// Routes behind the `require_session` guard.
pub fn protected_router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/produto/novo", get(new_product_form).post(create_product))
        .route("/produto/:id", get(product_detail))
        .route("/produto/:id/editar", get(edit_product_form).post(update_product))
        .route("/produto/:id/remover", post(remove_product))
        .route("/produto/:id/estoque", post(adjust_stock))
}

// -------------------------
// Authentication
// -------------------------

pub async fn login_form(headers: HeaderMap) -> Response {
    let flash = cookies::pending_flash(&headers);
    cookies::html(views::login_page(flash.as_ref()), flash.is_some())
}

pub async fn login(
    Extension(state): Extension<Arc<AppState>>,
    Form(form): Form<dto::LoginForm>,
) -> Response {
    let username = form.usuario.unwrap_or_default();
    let password = form.senha.unwrap_or_default();

    if state.authenticator.authenticate(&username, &password) {
        let token = state.sessions.issue();
        tracing::info!(user = %username, "login");
        cookies::login_redirect(token, Flash::success("Login realizado com sucesso!"))
    } else {
        let flash = Flash::danger("Usuário ou senha inválidos.");
        cookies::html(views::login_page(Some(&flash)), false)
    }
}

pub async fn logout(
    Extension(state): Extension<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    if let Some(token) = session.token() {
        state.sessions.revoke(token);
    }
    cookies::logout_redirect(Flash::info("Você foi desconectado."))
}

// -------------------------
// Products
// -------------------------

pub async fn index(Extension(state): Extension<Arc<AppState>>, headers: HeaderMap) -> Response {
    match state.store.list(&ProductFilter::default()).await {
        Ok(products) => {
            let flash = cookies::pending_flash(&headers);
            cookies::html(views::index_page(&products, flash.as_ref()), flash.is_some())
        }
        Err(e) => store_failure(e),
    }
}

pub async fn new_product_form(headers: HeaderMap) -> Response {
    let flash = cookies::pending_flash(&headers);
    cookies::html(
        views::product_form_page("Novo Produto", None, flash.as_ref()),
        flash.is_some(),
    )
}

pub async fn create_product(
    Extension(state): Extension<Arc<AppState>>,
    Form(form): Form<dto::ProductForm>,
) -> Response {
    let body = form_to_json(&form, true);
    let outcome = match NewProduct::parse(&body) {
        Ok(new) => state.store.create(&new).await,
        Err(e) => Err(e.into()),
    };

    let flash = match outcome {
        Ok(product) => Flash::success(format!("Produto '{}' criado com sucesso!", product.name)),
        Err(e) => Flash::danger(format!("Erro ao criar produto: {}", flash_message(e))),
    };
    cookies::redirect_with_flash("/", flash)
}

pub async fn product_detail(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    match state.store.get(ProductId::from_raw(id)).await {
        Ok(product) => {
            let flash = cookies::pending_flash(&headers);
            cookies::html(
                views::product_detail_page(&product, flash.as_ref()),
                flash.is_some(),
            )
        }
        Err(StoreError::Domain(DomainError::NotFound)) => {
            cookies::redirect_with_flash("/", Flash::warning("Produto não encontrado."))
        }
        Err(e) => store_failure(e),
    }
}

pub async fn edit_product_form(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    match state.store.get(ProductId::from_raw(id)).await {
        Ok(product) => {
            let flash = cookies::pending_flash(&headers);
            cookies::html(
                views::product_form_page("Editar Produto", Some(&product), flash.as_ref()),
                flash.is_some(),
            )
        }
        Err(StoreError::Domain(DomainError::NotFound)) => {
            cookies::redirect_with_flash("/", Flash::warning("Produto não encontrado."))
        }
        Err(e) => store_failure(e),
    }
}

pub async fn update_product(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(form): Form<dto::ProductForm>,
) -> Response {
    let body = form_to_json(&form, false);

    match state.store.update(ProductId::from_raw(id), &body).await {
        Ok(product) => cookies::redirect_with_flash(
            &format!("/produto/{id}"),
            Flash::success(format!("Produto '{}' atualizado com sucesso!", product.name)),
        ),
        Err(StoreError::Domain(DomainError::NotFound)) => {
            cookies::redirect_with_flash("/", Flash::warning("Produto não encontrado."))
        }
        Err(e) => cookies::redirect_with_flash(
            &format!("/produto/{id}"),
            Flash::danger(format!("Erro ao atualizar produto: {}", flash_message(e))),
        ),
    }
}

pub async fn remove_product(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Response {
    let id = ProductId::from_raw(id);
    let flash = match state.store.get(id).await {
        Ok(product) => match state.store.remove(id).await {
            Ok(true) => Flash::success(format!("Produto '{}' removido com sucesso!", product.name)),
            Ok(false) | Err(_) => Flash::danger("Erro ao remover o produto."),
        },
        Err(_) => Flash::danger("Erro ao remover o produto."),
    };
    cookies::redirect_with_flash("/", flash)
}

pub async fn adjust_stock(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(form): Form<dto::StockForm>,
) -> Response {
    let detail = format!("/produto/{id}");
    let kind = form.tipo.unwrap_or_default();

    let Ok(amount) = form.quantidade.unwrap_or_default().trim().parse::<i64>() else {
        return cookies::redirect_with_flash(&detail, Flash::danger("Quantidade inválida."));
    };

    let flash = match state
        .store
        .adjust_stock(ProductId::from_raw(id), &json!(kind), &json!(amount))
        .await
    {
        Ok(_) => Flash::success(format!(
            "Operação de '{kind}' de {amount} unidade(s) registrada com sucesso!"
        )),
        Err(e) => Flash::danger(format!("Erro na operação de estoque: {}", flash_message(e))),
    };
    cookies::redirect_with_flash(&detail, flash)
}

// -------------------------
// Helpers
// -------------------------

/// Forward form fields to the domain validators: numeric-looking input is
/// submitted as a JSON number, anything else as the raw string, so the
/// domain layer produces the canonical message either way.
fn form_to_json(form: &dto::ProductForm, include_quantity: bool) -> JsonValue {
    let mut body = json!({
        "nome": form.nome.clone().unwrap_or_default(),
        "categoria": form.categoria.clone().unwrap_or_default(),
        "preco_unitario": number_or_raw(form.preco_unitario.as_deref().unwrap_or("")),
    });
    if include_quantity {
        body["quantidade_inicial"] =
            integer_or_raw(form.quantidade_inicial.as_deref().unwrap_or(""));
    }
    body
}

fn number_or_raw(raw: &str) -> JsonValue {
    raw.trim().parse::<f64>().map_or_else(|_| json!(raw), |n| json!(n))
}

fn integer_or_raw(raw: &str) -> JsonValue {
    raw.trim().parse::<i64>().map_or_else(|_| json!(raw), |n| json!(n))
}

fn flash_message(err: StoreError) -> String {
    match err {
        StoreError::Domain(e) => e.to_string(),
        StoreError::Database(e) => {
            tracing::error!(error = %e, "database failure");
            "Erro no banco de dados.".to_string()
        }
    }
}

fn store_failure(err: StoreError) -> Response {
    if let StoreError::Database(e) = &err {
        tracing::error!(error = %e, "database failure");
    }
    (StatusCode::INTERNAL_SERVER_ERROR, "Erro no banco de dados.").into_response()
}
