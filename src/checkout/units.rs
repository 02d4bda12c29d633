//! Cart line expansion
//!
//! Converts quantity-grouped cart lines into a flat list of individually
//! addressable units, one per physical basket. Expansion is pure and
//! deterministic: identical input always yields identical unit ids, so
//! client selections keyed by unit id survive re-reads.

use crate::cart::CartLine;
use rust_decimal::Decimal;
use serde::Serialize;

/// One physical instance of a basket, derived from a cart line.
///
/// Carries every line field except `quantity`, which is implicitly 1.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// Deterministic identity: `"{basket_id}-{ordinal}"` with the ordinal
    /// counting within the originating line.
    pub unique_id: String,

    /// Catalog identity of the basket.
    pub basket_id: u32,

    /// Display name.
    pub name: String,

    /// Display category.
    pub category: String,

    /// Product image reference.
    pub image_ref: String,

    /// Unit price, copied from the originating line.
    pub unit_price: Decimal,

    /// Whether the unit is in gift mode.
    pub is_gift: bool,
}

/// Expands cart lines into units, in line order, ordinals ascending.
///
/// A line with quantity `n` emits exactly `n` units; a quantity of 0 emits
/// none. The function has no side effects and is referentially stable.
pub fn expand(lines: &[CartLine]) -> Vec<Unit> {
    let mut units = Vec::with_capacity(lines.iter().map(|l| l.quantity as usize).sum());

    for line in lines {
        for ordinal in 0..line.quantity {
            units.push(Unit {
                unique_id: format!("{}-{}", line.basket_id, ordinal),
                basket_id: line.basket_id,
                name: line.name.clone(),
                category: line.category.clone(),
                image_ref: line.image_ref.clone(),
                unit_price: line.unit_price,
                is_gift: line.is_gift,
            });
        }
    }

    units
}
