//! `estoque-auth` — authentication boundary for the interactive UI.
//!
//! This crate is intentionally decoupled from HTTP and storage: credential
//! verification sits behind the [`Authenticator`] trait, and login sessions
//! live in an in-memory [`SessionStore`]. The API crate wires both into its
//! middleware.

pub mod authenticator;
pub mod session;

pub use authenticator::{Authenticator, StaticCredentials};
pub use session::{SessionStore, SessionToken};
