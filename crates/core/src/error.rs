//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation, stock
/// rules, missing records). Infrastructure concerns belong elsewhere.
///
/// `Display` values are the wire messages served to clients, which is why
/// they are in Portuguese like the rest of the external surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Client-supplied data violated a field constraint.
    #[error("{0}")]
    Validation(String),

    /// A stock decrease asked for more units than are on hand.
    #[error("Estoque insuficiente para a saída.")]
    InsufficientStock { available: i64, requested: i64 },

    /// The referenced product id does not exist.
    #[error("Produto não encontrado.")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
