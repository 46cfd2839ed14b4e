//! Inventory domain module.
//!
//! This crate contains the business rules for products and stock movements,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage). Clients submit loosely-typed JSON; the parsers here turn it
//! into validated values or the exact error message the surface reports.

pub mod movement;
pub mod product;

pub use movement::{StockDirection, StockMovement};
pub use product::{NewProduct, Product, ProductFilter, ProductPatch};
