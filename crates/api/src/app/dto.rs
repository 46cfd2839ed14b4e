use serde::Deserialize;

// -------------------------
// Query DTOs (JSON API)
// -------------------------

/// Filters accepted by `GET /produtos`.
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub nome: Option<String>,
    pub categoria: Option<String>,
}

// -------------------------
// Form DTOs (interactive UI)
// -------------------------

/// Login form fields. Missing fields simply fail authentication.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub usuario: Option<String>,
    pub senha: Option<String>,
}

/// Product form fields; creation and editing share the template, only
/// creation carries the initial quantity.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub nome: Option<String>,
    pub categoria: Option<String>,
    pub preco_unitario: Option<String>,
    pub quantidade_inicial: Option<String>,
}

/// Stock movement form fields.
#[derive(Debug, Deserialize)]
pub struct StockForm {
    pub tipo: Option<String>,
    pub quantidade: Option<String>,
}
