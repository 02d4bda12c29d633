//! Cart module
//!
//! Per-cart line storage and the HTTP surface for cart mutation. Lines are
//! priced from the catalog of record at add time; client-supplied prices
//! are never stored.

pub mod handlers;
pub mod models;
pub mod store;

pub use handlers::routes;
pub use models::{CartError, CartLine};
pub use store::CartStore;
