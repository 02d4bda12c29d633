//! Cart line storage
//!
//! In-memory storage for carts, keyed by cart id. Carts persist for the
//! whole shopping session; checkout reads lines from here and writes back
//! quantity changes (single-unit removal, paid-unit cleanup).

use super::models::{CartError, CartLine};
use dashmap::DashMap;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Returns the provided `cart_id` or creates a new UUID string when `None`.
///
/// This guarantees that every cart operation works with a non-empty identifier.
pub fn get_or_create_cart_id(cart_id: Option<String>) -> String {
    cart_id.unwrap_or_else(|| Uuid::new_v4().simple().to_string())
}

/// In-memory cart storage.
///
/// DashMap allows concurrent access without external Mutexes.
#[derive(Debug, Default)]
pub struct CartStore {
    carts: DashMap<String, Vec<CartLine>>,
}

impl CartStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the cart's lines, in insertion order.
    ///
    /// An unknown cart id reads as an empty cart.
    pub fn lines(&self, cart_id: &str) -> Vec<CartLine> {
        self.carts
            .get(cart_id)
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Merges `line` into the cart.
    ///
    /// If a line with the same (basket id, gift flag) already exists, its
    /// quantity is increased by the incoming quantity; otherwise the line is
    /// appended. This keeps each basket id unique within the gift and
    /// personal populations.
    pub fn add_line(&self, cart_id: &str, line: CartLine) {
        let mut lines = self.carts.entry(cart_id.to_string()).or_default();

        if let Some(existing) = lines
            .iter_mut()
            .find(|l| l.basket_id == line.basket_id && l.is_gift == line.is_gift)
        {
            // Aggregate quantities.
            existing.quantity += line.quantity;
        } else {
            lines.push(line);
        }
    }

    /// Removes the line matching (basket id, gift flag) entirely.
    pub fn remove_line(&self, cart_id: &str, basket_id: u32, is_gift: bool) -> Result<(), CartError> {
        let mut lines = self.carts.get_mut(cart_id).ok_or(CartError::CartNotFound)?;

        let before = lines.len();
        lines.retain(|l| !(l.basket_id == basket_id && l.is_gift == is_gift));
        if lines.len() == before {
            return Err(CartError::LineNotFound { basket_id });
        }
        Ok(())
    }

    /// Sets the quantity of the line matching (basket id, gift flag).
    ///
    /// Quantity 0 deletes the line, the same way `decrement_unit` does when
    /// it reaches zero.
    pub fn set_quantity(
        &self,
        cart_id: &str,
        basket_id: u32,
        is_gift: bool,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove_line(cart_id, basket_id, is_gift);
        }

        let mut lines = self.carts.get_mut(cart_id).ok_or(CartError::CartNotFound)?;

        let line = lines
            .iter_mut()
            .find(|l| l.basket_id == basket_id && l.is_gift == is_gift)
            .ok_or(CartError::LineNotFound { basket_id })?;

        line.quantity = quantity;
        Ok(())
    }

    /// Decrements the matching line's quantity by 1, deleting it at zero.
    ///
    /// Used by checkout when a single unit is removed from the summary and
    /// when paid units are cleared after a successful payment. A missing
    /// line is ignored: the cart may legitimately have been edited since
    /// the unit list was expanded.
    pub fn decrement_unit(&self, cart_id: &str, basket_id: u32, is_gift: bool) {
        let Some(mut lines) = self.carts.get_mut(cart_id) else {
            return;
        };

        if let Some(line) = lines
            .iter_mut()
            .find(|l| l.basket_id == basket_id && l.is_gift == is_gift)
        {
            if line.quantity > 1 {
                line.quantity -= 1;
            } else {
                lines.retain(|l| !(l.basket_id == basket_id && l.is_gift == is_gift));
            }
        }
    }

    /// Drops every line in the cart.
    pub fn clear(&self, cart_id: &str) {
        self.carts.remove(cart_id);
    }
}

/// Sum of `quantity * unit_price` over `lines`.
pub fn subtotal(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .map(|l| Decimal::from(l.quantity) * l.unit_price)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(basket_id: u32, quantity: u32, is_gift: bool) -> CartLine {
        CartLine {
            basket_id,
            name: format!("Basket {basket_id}"),
            category: "Test".into(),
            image_ref: String::new(),
            unit_price: Decimal::new(1000, 2),
            quantity,
            is_gift,
        }
    }

    #[test]
    fn add_merges_by_basket_and_gift_flag() {
        let store = CartStore::new();
        store.add_line("c1", line(1, 2, false));
        store.add_line("c1", line(1, 3, false));
        store.add_line("c1", line(1, 1, true));

        let lines = store.lines("c1");
        assert_eq!(lines.len(), 2, "personal and gift populations stay separate");

        let personal = lines.iter().find(|l| !l.is_gift).unwrap();
        assert_eq!(personal.quantity, 5);

        let gift = lines.iter().find(|l| l.is_gift).unwrap();
        assert_eq!(gift.quantity, 1);
    }

    #[test]
    fn decrement_deletes_line_at_zero() {
        let store = CartStore::new();
        store.add_line("c1", line(2, 2, true));

        store.decrement_unit("c1", 2, true);
        assert_eq!(store.lines("c1")[0].quantity, 1);

        store.decrement_unit("c1", 2, true);
        assert!(store.lines("c1").is_empty());
    }

    #[test]
    fn set_quantity_zero_deletes_the_line() {
        let store = CartStore::new();
        store.add_line("c1", line(3, 1, false));
        store.add_line("c1", line(4, 2, false));

        store.set_quantity("c1", 3, false, 0).unwrap();

        let lines = store.lines("c1");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].basket_id, 4);
    }

    #[test]
    fn subtotal_sums_quantity_times_price() {
        let lines = vec![line(1, 2, false), line(2, 1, true)];
        assert_eq!(subtotal(&lines), Decimal::new(3000, 2));
    }
}
