//! Order domain models

use crate::checkout::{CustomerInfo, OrderItem};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
    /// Created at submit time; payment not yet confirmed.
    PendingPayment,
    /// Payment confirmed.
    Paid,
}

/// Shipping address supplied by a gift recipient when claiming.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Addressee name.
    pub name: String,

    /// Street address.
    pub street: String,

    /// City.
    pub city: String,

    /// Postal code.
    pub postal_code: String,
}

/// One recipient's share of a gift order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftShipment {
    /// Recipient display name.
    pub recipient_name: String,

    /// Recipient contact email.
    pub recipient_email: String,

    /// Recipient contact phone.
    pub recipient_phone: String,

    /// Gift note from the sender.
    pub personal_note: String,

    /// Items assigned to this recipient, quantity-aggregated.
    pub items: Vec<OrderItem>,

    /// Single-use token the recipient redeems to supply their address.
    pub claim_token: String,

    /// Address supplied at claim time.
    pub shipping_address: Option<ShippingAddress>,
}

/// Post-purchase review left by the buyer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Star rating, 1 to 5.
    pub rating: u8,

    /// Free-text comment.
    pub comment: String,

    /// When the review was left.
    pub created_at: DateTime<Utc>,
}

/// A persisted order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identity.
    pub id: String,

    /// Authenticated buyer the order belongs to.
    pub buyer_user_id: String,

    /// Sender name, when the order carries gifts.
    pub sender_name: String,

    /// Sender email, when the order carries gifts.
    pub sender_email: String,

    /// Current status.
    pub status: OrderStatus,

    /// Items shipped to the buyer's own address.
    pub personal_items: Vec<OrderItem>,

    /// Buyer shipping details for the personal items.
    pub personal_shipping: Option<CustomerInfo>,

    /// Per-recipient gift shipments.
    pub gift_shipments: Vec<GiftShipment>,

    /// Total charged, recomputed server-side from the catalog.
    pub total: Decimal,

    /// Buyer review, at most one per order.
    pub review: Option<Review>,

    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Errors raised by order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// No order under the given id.
    #[error("order not found")]
    OrderNotFound,

    /// No shipment matches the claim token.
    #[error("claim token is invalid")]
    ClaimTokenInvalid,

    /// Claims and reviews require a paid order.
    #[error("order has not been paid")]
    OrderNotPaid,

    /// The shipment was already claimed.
    #[error("gift has already been claimed")]
    AlreadyClaimed,

    /// The order already carries a review.
    #[error("order has already been reviewed")]
    AlreadyReviewed,

    /// Ratings run from 1 to 5.
    #[error("rating must be between 1 and 5")]
    InvalidRating,
}

/// Request body for POST /orders/claim
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    /// Token from the recipient's gift notification.
    pub claim_token: String,

    /// Where to ship the gift.
    pub shipping_address: ShippingAddress,
}

/// Request body for POST /orders/:order_id/review
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    /// Star rating, 1 to 5.
    pub rating: u8,

    /// Free-text comment.
    #[serde(default)]
    pub comment: String,
}
