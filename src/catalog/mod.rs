//! Basket catalog module
//!
//! The catalog is the authoritative source for basket identity and pricing.
//! Cart and payment code always read prices from here, never from
//! client-supplied figures.

pub mod fixtures;
pub mod handlers;
pub mod models;

pub use handlers::routes;
pub use models::{Basket, Catalog, CatalogError};
