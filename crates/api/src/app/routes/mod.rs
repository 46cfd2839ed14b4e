pub mod products;
pub mod system;
pub mod web;
