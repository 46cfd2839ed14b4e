//! SQLite-backed product store.
//!
//! Every operation is one or two single-row statements against the
//! `produtos` table. There is no application-level locking: concurrent
//! writers to the same record race last-write-wins at the storage layer.

use serde_json::Value as JsonValue;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use thiserror::Error;

use estoque_core::{DomainError, ProductId};
use estoque_inventory::{NewProduct, Product, ProductFilter, ProductPatch, StockMovement};

/// Failures surfaced by the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A business rule rejected the operation; passes through unchanged.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The database itself failed. Generic, never retried.
    #[error("Erro no banco de dados.")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS produtos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nome TEXT NOT NULL,
    categoria TEXT NOT NULL,
    preco_unitario REAL NOT NULL,
    quantidade INTEGER NOT NULL
)";

const PRODUCT_COLUMNS: &str = "id, nome, categoria, preco_unitario, quantidade";

/// Product persistence over a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct ProductStore {
    pool: SqlitePool,
}

impl ProductStore {
    /// Open (creating if needed) the database at `url` and ensure the schema.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new().connect(url).await?;
        Self::from_pool(pool).await
    }

    /// In-memory store for tests.
    ///
    /// A single connection keeps every statement on the same transient
    /// database (each `:memory:` connection is otherwise its own database).
    pub async fn in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Insert a validated product and return it as persisted.
    pub async fn create(&self, new: &NewProduct) -> StoreResult<Product> {
        let result = sqlx::query(
            "INSERT INTO produtos (nome, categoria, preco_unitario, quantidade) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&new.name)
        .bind(&new.category)
        .bind(new.unit_price)
        .bind(new.initial_quantity)
        .execute(&self.pool)
        .await?;

        self.get(ProductId::from_raw(result.last_insert_rowid())).await
    }

    /// All products matching the filter, in insertion order.
    ///
    /// Substring matching is case-sensitive (`instr`, not `LIKE`).
    pub async fn list(&self, filter: &ProductFilter) -> StoreResult<Vec<Product>> {
        let mut sql = format!("SELECT {PRODUCT_COLUMNS} FROM produtos");
        let mut conditions = Vec::new();
        if filter.name.is_some() {
            conditions.push("instr(nome, ?) > 0");
        }
        if filter.category.is_some() {
            conditions.push("instr(categoria, ?) > 0");
        }
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY id");

        let mut query = sqlx::query(&sql);
        if let Some(name) = &filter.name {
            query = query.bind(name);
        }
        if let Some(category) = &filter.category {
            query = query.bind(category);
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(row_to_product).collect()
    }

    pub async fn get(&self, id: ProductId) -> StoreResult<Product> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM produtos WHERE id = ?1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row_to_product(&row),
            None => Err(DomainError::not_found().into()),
        }
    }

    /// Apply a partial update and return the record as persisted.
    ///
    /// Existence is checked before the fields are validated, so a missing id
    /// reports `NotFound` even when the body is invalid. A body with no
    /// recognized field is a no-op that returns the current record.
    pub async fn update(&self, id: ProductId, body: &JsonValue) -> StoreResult<Product> {
        let current = self.get(id).await?;
        let patch = ProductPatch::parse(body)?;
        if patch.is_empty() {
            return Ok(current);
        }

        let mut assignments = Vec::new();
        if patch.name.is_some() {
            assignments.push("nome = ?");
        }
        if patch.category.is_some() {
            assignments.push("categoria = ?");
        }
        if patch.unit_price.is_some() {
            assignments.push("preco_unitario = ?");
        }

        let sql = format!("UPDATE produtos SET {} WHERE id = ?", assignments.join(", "));
        let mut query = sqlx::query(&sql);
        if let Some(name) = &patch.name {
            query = query.bind(name);
        }
        if let Some(category) = &patch.category {
            query = query.bind(category);
        }
        if let Some(price) = patch.unit_price {
            query = query.bind(price);
        }
        query.bind(id.as_i64()).execute(&self.pool).await?;

        self.get(id).await
    }

    /// Delete the record; reports whether a row actually went away.
    pub async fn remove(&self, id: ProductId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM produtos WHERE id = ?1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Read the current quantity, apply the movement, write the result back.
    ///
    /// Existence is checked before the movement is validated, so a missing
    /// id reports `NotFound` even when the movement itself is malformed.
    pub async fn adjust_stock(
        &self,
        id: ProductId,
        kind: &JsonValue,
        amount: &JsonValue,
    ) -> StoreResult<Product> {
        let current = self.get(id).await?;
        let movement = StockMovement::parse(kind, amount)?;
        let quantity = movement.apply(current.quantity)?;

        sqlx::query("UPDATE produtos SET quantidade = ?1 WHERE id = ?2")
            .bind(quantity)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        self.get(id).await
    }
}

fn row_to_product(row: &SqliteRow) -> StoreResult<Product> {
    Ok(Product {
        id: ProductId::from_raw(row.try_get("id")?),
        name: row.try_get("nome")?,
        category: row.try_get("categoria")?,
        unit_price: row.try_get("preco_unitario")?,
        quantity: row.try_get("quantidade")?,
    })
}
