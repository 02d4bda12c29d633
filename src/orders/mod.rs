//! Orders module
//!
//! Orders are the only state that survives a checkout session: created at
//! submit time, marked paid on payment confirmation, then claimable by gift
//! recipients and reviewable by the buyer.

pub mod handlers;
pub mod models;
pub mod store;

pub use handlers::routes;
pub use models::{GiftShipment, Order, OrderError, OrderStatus, Review, ShippingAddress};
pub use store::OrderStore;
