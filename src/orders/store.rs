//! Order storage
//!
//! In-memory order persistence plus a claim-token index. Claim tokens are
//! single-use: a successful claim records the address and the token can
//! never resolve to an unclaimed shipment again.

use super::models::{Order, OrderError, OrderStatus, Review, ShippingAddress};
use chrono::Utc;
use dashmap::DashMap;

/// In-memory order storage, keyed by order id.
#[derive(Debug, Default)]
pub struct OrderStore {
    orders: DashMap<String, Order>,

    /// Maps claim tokens to order ids, for recipient claims.
    claims: DashMap<String, String>,
}

impl OrderStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Persists a new order and indexes its claim tokens.
    pub fn insert(&self, order: Order) {
        for shipment in &order.gift_shipments {
            self.claims
                .insert(shipment.claim_token.clone(), order.id.clone());
        }
        self.orders.insert(order.id.clone(), order);
    }

    /// Returns a copy of the order.
    pub fn get(&self, order_id: &str) -> Result<Order, OrderError> {
        self.orders
            .get(order_id)
            .map(|o| o.clone())
            .ok_or(OrderError::OrderNotFound)
    }

    /// Deletes a still-unpaid order and de-indexes its claim tokens.
    ///
    /// Used when checkout returns to editing: the order created at submit
    /// time is abandoned and must never become claimable. Paid or unknown
    /// orders are left untouched.
    pub fn void_pending(&self, order_id: &str) {
        let Some(order) = self.orders.get(order_id) else {
            return;
        };
        if order.status != OrderStatus::PendingPayment {
            return;
        }
        let tokens: Vec<String> = order
            .gift_shipments
            .iter()
            .map(|s| s.claim_token.clone())
            .collect();
        drop(order);

        for token in tokens {
            self.claims.remove(&token);
        }
        self.orders.remove(order_id);
    }

    /// Marks the order paid. Used by payment confirmation.
    pub fn mark_paid(&self, order_id: &str) -> Result<(), OrderError> {
        let mut order = self
            .orders
            .get_mut(order_id)
            .ok_or(OrderError::OrderNotFound)?;
        order.status = OrderStatus::Paid;
        Ok(())
    }

    /// Resolves a claim token and records the recipient's address.
    ///
    /// Only paid orders can be claimed, and each shipment only once.
    /// Returns a copy of the updated order.
    pub fn claim(
        &self,
        claim_token: &str,
        address: ShippingAddress,
    ) -> Result<Order, OrderError> {
        let order_id = self
            .claims
            .get(claim_token)
            .map(|id| id.clone())
            .ok_or(OrderError::ClaimTokenInvalid)?;

        let mut order = self
            .orders
            .get_mut(&order_id)
            .ok_or(OrderError::OrderNotFound)?;

        if order.status != OrderStatus::Paid {
            return Err(OrderError::OrderNotPaid);
        }

        let shipment = order
            .gift_shipments
            .iter_mut()
            .find(|s| s.claim_token == claim_token)
            .ok_or(OrderError::ClaimTokenInvalid)?;

        if shipment.shipping_address.is_some() {
            return Err(OrderError::AlreadyClaimed);
        }

        shipment.shipping_address = Some(address);
        Ok(order.clone())
    }

    /// Attaches the buyer's review to a paid order. One review per order.
    pub fn add_review(
        &self,
        order_id: &str,
        rating: u8,
        comment: String,
    ) -> Result<Order, OrderError> {
        if !(1..=5).contains(&rating) {
            return Err(OrderError::InvalidRating);
        }

        let mut order = self
            .orders
            .get_mut(order_id)
            .ok_or(OrderError::OrderNotFound)?;

        if order.status != OrderStatus::Paid {
            return Err(OrderError::OrderNotPaid);
        }
        if order.review.is_some() {
            return Err(OrderError::AlreadyReviewed);
        }

        order.review = Some(Review {
            rating,
            comment,
            created_at: Utc::now(),
        });
        Ok(order.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::models::GiftShipment;
    use rust_decimal::Decimal;

    fn address() -> ShippingAddress {
        ShippingAddress {
            name: "Ana".into(),
            street: "Calle Mayor 1".into(),
            city: "Madrid".into(),
            postal_code: "28001".into(),
        }
    }

    fn order_with_shipment(id: &str, token: &str) -> Order {
        Order {
            id: id.into(),
            buyer_user_id: "user-1".into(),
            sender_name: "Sender".into(),
            sender_email: "sender@example.com".into(),
            status: OrderStatus::PendingPayment,
            personal_items: vec![],
            personal_shipping: None,
            gift_shipments: vec![GiftShipment {
                recipient_name: "Ana".into(),
                recipient_email: "ana@example.com".into(),
                recipient_phone: String::new(),
                personal_note: String::new(),
                items: vec![],
                claim_token: token.into(),
                shipping_address: None,
            }],
            total: Decimal::new(5000, 2),
            review: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn claim_requires_paid_order_and_is_single_use() {
        let store = OrderStore::new();
        store.insert(order_with_shipment("o1", "tok-1"));

        // Unpaid: refused.
        assert!(matches!(
            store.claim("tok-1", address()),
            Err(OrderError::OrderNotPaid)
        ));

        store.mark_paid("o1").unwrap();

        let order = store.claim("tok-1", address()).unwrap();
        assert!(order.gift_shipments[0].shipping_address.is_some());

        // Second claim of the same shipment: refused.
        assert!(matches!(
            store.claim("tok-1", address()),
            Err(OrderError::AlreadyClaimed)
        ));
    }

    #[test]
    fn void_pending_deletes_order_and_claim_tokens() {
        let store = OrderStore::new();
        store.insert(order_with_shipment("o1", "tok-1"));

        store.void_pending("o1");

        assert!(matches!(store.get("o1"), Err(OrderError::OrderNotFound)));
        assert!(matches!(
            store.claim("tok-1", address()),
            Err(OrderError::ClaimTokenInvalid)
        ));
    }

    #[test]
    fn void_pending_leaves_paid_orders_alone() {
        let store = OrderStore::new();
        store.insert(order_with_shipment("o1", "tok-1"));
        store.mark_paid("o1").unwrap();

        store.void_pending("o1");

        assert_eq!(store.get("o1").unwrap().status, OrderStatus::Paid);
    }

    #[test]
    fn unknown_claim_token_is_rejected() {
        let store = OrderStore::new();
        assert!(matches!(
            store.claim("nope", address()),
            Err(OrderError::ClaimTokenInvalid)
        ));
    }

    #[test]
    fn review_bounds_and_uniqueness() {
        let store = OrderStore::new();
        store.insert(order_with_shipment("o1", "tok-1"));
        store.mark_paid("o1").unwrap();

        assert!(matches!(
            store.add_review("o1", 0, String::new()),
            Err(OrderError::InvalidRating)
        ));
        assert!(matches!(
            store.add_review("o1", 6, String::new()),
            Err(OrderError::InvalidRating)
        ));

        let order = store.add_review("o1", 5, "Excelente".into()).unwrap();
        assert_eq!(order.review.as_ref().unwrap().rating, 5);

        assert!(matches!(
            store.add_review("o1", 4, String::new()),
            Err(OrderError::AlreadyReviewed)
        ));
    }
}
