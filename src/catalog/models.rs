//! Catalog domain models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// A fixed, priced bundle of gourmet products sold as one catalog item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    /// Catalog identity, unique across the whole catalog.
    pub id: u32,

    /// Display name (e.g. "Pareja Gourmet").
    pub name: String,

    /// Display category (e.g. "Ibéricos").
    pub category: String,

    /// Short marketing description.
    pub description: String,

    /// Reference to the product image asset.
    pub image_ref: String,

    /// Unit price in EUR.
    pub price: Decimal,
}

/// Errors raised while building or querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two baskets were registered under the same id.
    #[error("duplicate basket id {0} in catalog")]
    DuplicateId(u32),

    /// Lookup for an id with no catalog entry.
    #[error("basket {0} not found in catalog")]
    BasketNotFound(u32),
}

/// The catalog of record, indexed by basket id.
#[derive(Debug)]
pub struct Catalog {
    baskets: Vec<Basket>,
    by_id: HashMap<u32, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids.
    ///
    /// Id uniqueness is enforced at construction so every downstream lookup
    /// can trust that one id names exactly one basket.
    pub fn new(baskets: Vec<Basket>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(baskets.len());
        for (index, basket) in baskets.iter().enumerate() {
            if by_id.insert(basket.id, index).is_some() {
                return Err(CatalogError::DuplicateId(basket.id));
            }
        }
        Ok(Self { baskets, by_id })
    }

    /// Returns all baskets in display order.
    pub fn baskets(&self) -> &[Basket] {
        &self.baskets
    }

    /// Looks up a basket by id.
    pub fn get(&self, id: u32) -> Option<&Basket> {
        self.by_id.get(&id).map(|&index| &self.baskets[index])
    }
}
