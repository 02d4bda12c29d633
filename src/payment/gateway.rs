//! In-memory payment gateway
//!
//! Stands in for the external payment platform: mints intents with client
//! secrets and confirms them exactly once. Pricing verification lives here
//! so no intent can ever be created from unverified figures.

use super::PaymentError;
use crate::catalog::Catalog;
use crate::checkout::OrderItem;
use dashmap::DashMap;
use rust_decimal::Decimal;
use uuid::Uuid;

/// A pending payment intent.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    /// Intent identity.
    pub id: String,

    /// Secret handed to the client for card confirmation.
    pub client_secret: String,

    /// Order this intent pays for.
    pub order_id: String,

    /// Checkout session that created the intent.
    pub session_id: String,

    /// Verified amount to charge.
    pub amount: Decimal,
}

/// Recomputes the order total from the catalog of record.
///
/// Every line's `price_per_item` must match the catalog price for its
/// basket, and the recomputed total must equal the client-declared figure.
/// The client total is only ever used as a cross-check; the returned,
/// recomputed amount is what gets charged.
pub fn verify_total(
    catalog: &Catalog,
    items: &[OrderItem],
    declared_total: Decimal,
) -> Result<Decimal, PaymentError> {
    let mut recomputed = Decimal::ZERO;

    for item in items {
        let basket = catalog
            .get(item.basket_id)
            .ok_or(PaymentError::UnknownBasket(item.basket_id))?;

        if basket.price != item.price_per_item {
            return Err(PaymentError::PriceMismatch);
        }

        recomputed += Decimal::from(item.quantity) * basket.price;
    }

    if recomputed != declared_total {
        return Err(PaymentError::PriceMismatch);
    }

    Ok(recomputed)
}

/// In-memory intent storage, keyed by intent id.
#[derive(Debug, Default)]
pub struct PaymentGateway {
    intents: DashMap<String, PaymentIntent>,
}

impl PaymentGateway {
    /// Creates an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a payment intent for a verified amount.
    pub fn create_intent(&self, order_id: String, session_id: String, amount: Decimal) -> PaymentIntent {
        let id = format!("pi_{}", Uuid::new_v4().simple());
        let intent = PaymentIntent {
            client_secret: format!("{id}_secret_{}", Uuid::new_v4().simple()),
            id: id.clone(),
            order_id,
            session_id,
            amount,
        };

        self.intents.insert(id, intent.clone());
        intent
    }

    /// Confirms an intent, consuming it. Intents confirm exactly once.
    pub fn confirm(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError> {
        self.intents
            .remove(intent_id)
            .map(|(_, intent)| intent)
            .ok_or(PaymentError::IntentNotFound)
    }

    /// Cancels a pending intent so it can never confirm.
    ///
    /// An already-consumed or unknown intent is ignored.
    pub fn cancel(&self, intent_id: &str) {
        self.intents.remove(intent_id);
    }
}
