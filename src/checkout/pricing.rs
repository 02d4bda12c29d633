//! Reduction and pricing
//!
//! Reduces a selected set of units back to quantity-aggregated, priced
//! order lines. All units sharing a basket id carry the same unit price
//! because expansion copies it from the single originating cart line.

use super::units::Unit;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A priced, quantity-aggregated order line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Catalog identity of the basket.
    pub basket_id: u32,

    /// Display name.
    pub basket_name: String,

    /// Display category.
    pub basket_category: String,

    /// Number of units aggregated into this line.
    pub quantity: u32,

    /// Price of one unit.
    pub price_per_item: Decimal,
}

/// Filters `units` to those in `selected` and re-aggregates by basket id.
///
/// Groups appear in first-seen unit order. In personal (non-gift) mode the
/// caller passes the full unit id set.
pub fn reduce(units: &[Unit], selected: &BTreeSet<String>) -> Vec<OrderItem> {
    let mut items: Vec<OrderItem> = Vec::new();

    for unit in units.iter().filter(|u| selected.contains(&u.unique_id)) {
        if let Some(item) = items.iter_mut().find(|i| i.basket_id == unit.basket_id) {
            item.quantity += 1;
        } else {
            items.push(OrderItem {
                basket_id: unit.basket_id,
                basket_name: unit.name.clone(),
                basket_category: unit.category.clone(),
                quantity: 1,
                price_per_item: unit.unit_price,
            });
        }
    }

    items
}

/// Sums `quantity * price_per_item` over all items.
///
/// This figure is recomputed server-side against the catalog before any
/// charge; a client-displayed total is never trusted.
pub fn total(items: &[OrderItem]) -> Decimal {
    items
        .iter()
        .map(|i| Decimal::from(i.quantity) * i.price_per_item)
        .sum()
}

/// Collects the id set of `units`, the "select everything" input for
/// [`reduce`] in personal mode.
pub fn all_ids(units: &[Unit]) -> BTreeSet<String> {
    units.iter().map(|u| u.unique_id.clone()).collect()
}
