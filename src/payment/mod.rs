//! Payment module
//!
//! Payment-intent creation and confirmation against an in-memory gateway.
//! The gateway never accepts the client-declared total: every line price
//! and the grand total are recomputed from the catalog of record, and any
//! mismatch rejects the intent.

pub mod gateway;
pub mod handlers;

pub use gateway::{verify_total, PaymentGateway, PaymentIntent};
pub use handlers::routes;

use thiserror::Error;

/// Errors raised by payment operations.
#[derive(Debug, Error, PartialEq)]
pub enum PaymentError {
    /// An order line references a basket the catalog does not know.
    #[error("basket {0} is not in the catalog")]
    UnknownBasket(u32),

    /// Client-declared pricing disagrees with the catalog of record.
    #[error("declared total does not match catalog pricing")]
    PriceMismatch,

    /// No intent under the given id (or it was already confirmed).
    #[error("payment intent not found")]
    IntentNotFound,
}
