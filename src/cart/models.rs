//! Cart domain models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returns the default quantity (1) for added lines
fn default_quantity() -> u32 {
    1
}

/// One entry per distinct basket product in a cart.
///
/// A basket id appears at most once among personal lines and at most once
/// among gift lines; repeats merge by incrementing `quantity`. `is_gift` is
/// fixed when the line is first added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Catalog identity of the basket.
    pub basket_id: u32,

    /// Display name, copied from the catalog.
    pub name: String,

    /// Display category, copied from the catalog.
    pub category: String,

    /// Product image reference, copied from the catalog.
    pub image_ref: String,

    /// Unit price, copied from the catalog.
    pub unit_price: Decimal,

    /// Number of physical baskets this line stands for (>= 1).
    pub quantity: u32,

    /// Whether the line was added in gift mode.
    pub is_gift: bool,
}

/// Errors raised by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The referenced cart has no stored lines.
    #[error("cart not found")]
    CartNotFound,

    /// No line matches the (basket id, gift flag) pair.
    #[error("no cart line for basket {basket_id}")]
    LineNotFound {
        /// Basket id the caller referenced.
        basket_id: u32,
    },

    /// Added lines need a quantity of at least 1.
    #[error("quantity must be at least 1")]
    InvalidQuantity,
}

/// Request body for POST /cart/add
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLineRequest {
    /// Optional cart identifier; a new one is minted when absent.
    pub cart_id: Option<String>,

    /// Catalog id of the basket to add.
    pub basket_id: u32,

    /// Quantity to add (defaults to 1).
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Whether the line is added in gift mode (defaults to false).
    #[serde(default)]
    pub is_gift: bool,
}

/// Request body for POST /cart/remove
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveLineRequest {
    /// Cart identifier.
    pub cart_id: String,

    /// Catalog id of the basket to remove.
    pub basket_id: u32,

    /// Which population the line lives in (gift vs. personal).
    #[serde(default)]
    pub is_gift: bool,
}

/// Request body for POST /cart/quantity
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantityRequest {
    /// Cart identifier.
    pub cart_id: String,

    /// Catalog id of the basket to adjust.
    pub basket_id: u32,

    /// Which population the line lives in (gift vs. personal).
    #[serde(default)]
    pub is_gift: bool,

    /// New quantity; 0 deletes the line.
    pub quantity: u32,
}

/// Request body for POST /cart/clear
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearCartRequest {
    /// Cart identifier.
    pub cart_id: String,
}

/// Response for cart read and mutation operations
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    /// Cart identifier.
    pub cart_id: String,

    /// Current lines, in insertion order.
    pub lines: Vec<CartLine>,

    /// Sum of `quantity * unit_price` over all lines.
    pub subtotal: Decimal,
}
