//! `estoque-infra` — SQLite-backed persistence for the inventory domain.

pub mod store;

pub use store::{ProductStore, StoreError, StoreResult};
