//! Checkout session and stage machine
//!
//! One session per checkout attempt. Units and assignment state live only
//! inside the session and are discarded with it; orders are the only thing
//! that survives payment.

use super::assignment::{GiftAssignment, RecipientDetails};
use super::units::{expand, Unit};
use super::CheckoutError;
use crate::cart::CartLine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Stages of a checkout session.
///
/// Linear: `Auth`, `Customer`, `Payment`, `Success`, in that order. The
/// only backward edge is the explicit "edit information" action from
/// `Payment` back to `Customer`, which preserves entered data. `Success`
/// is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckoutStage {
    /// Waiting for an authenticated user to attach.
    Auth,
    /// Collecting customer data and gift assignments.
    Customer,
    /// A payment intent exists; awaiting confirmation.
    Payment,
    /// Payment confirmed; the session is finished.
    Success,
}

/// Buyer shipping details for personal (non-gift) units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    /// Buyer name.
    pub name: String,

    /// Buyer email.
    pub email: String,

    /// Buyer phone.
    #[serde(default)]
    pub phone: String,

    /// Street address.
    pub street: String,

    /// City.
    pub city: String,

    /// Postal code.
    pub postal_code: String,
}

/// The cart-side identity of a removed unit, used to decrement the
/// originating cart line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemovedUnit {
    /// Basket id of the originating line.
    pub basket_id: u32,

    /// Which population the line lives in.
    pub is_gift: bool,
}

/// One checkout attempt over a cart snapshot.
#[derive(Debug)]
pub struct CheckoutSession {
    /// Session identity.
    pub id: String,

    /// Cart this session was started from.
    pub cart_id: String,

    /// Authenticated buyer, set when the session leaves `Auth`.
    pub user_id: Option<String>,

    /// Current stage.
    pub stage: CheckoutStage,

    /// Gift units, expanded once at session start. Removal leaves ordinal
    /// gaps; ids are never renumbered.
    pub gift_units: Vec<Unit>,

    /// Personal units, expanded once at session start.
    pub personal_units: Vec<Unit>,

    /// Gift assignment state.
    pub assignment: GiftAssignment,

    /// Buyer shipping details, required when personal units exist.
    pub customer: Option<CustomerInfo>,

    /// Payment intent created at submit time.
    pub payment_intent_id: Option<String>,

    /// Order created at submit time.
    pub order_id: Option<String>,
}

impl CheckoutSession {
    /// Creates a session from the cart's current lines.
    ///
    /// Lines are expanded into units exactly once here; gift and personal
    /// populations are kept separate so their reductions stay distinct and
    /// unit ids cannot collide across the two.
    pub fn new(cart_id: String, lines: &[CartLine]) -> Result<Self, CheckoutError> {
        if lines.iter().all(|l| l.quantity == 0) {
            return Err(CheckoutError::EmptyCart);
        }

        let gift_lines: Vec<CartLine> = lines.iter().filter(|l| l.is_gift).cloned().collect();
        let personal_lines: Vec<CartLine> = lines.iter().filter(|l| !l.is_gift).cloned().collect();

        Ok(Self {
            id: Uuid::new_v4().simple().to_string(),
            cart_id,
            user_id: None,
            stage: CheckoutStage::Auth,
            gift_units: expand(&gift_lines),
            personal_units: expand(&personal_lines),
            assignment: GiftAssignment::new(),
            customer: None,
            payment_intent_id: None,
            order_id: None,
        })
    }

    fn require_stage(&self, stage: CheckoutStage) -> Result<(), CheckoutError> {
        if self.stage != stage {
            return Err(CheckoutError::InvalidStage { stage: self.stage });
        }
        Ok(())
    }

    /// Attaches the authenticated user, moving `Auth` to `Customer`.
    pub fn authenticate(&mut self, user_id: String) -> Result<(), CheckoutError> {
        self.require_stage(CheckoutStage::Auth)?;
        self.user_id = Some(user_id);
        self.stage = CheckoutStage::Customer;
        Ok(())
    }

    /// Id set of the session's gift units.
    pub fn gift_unit_ids(&self) -> BTreeSet<String> {
        self.gift_units.iter().map(|u| u.unique_id.clone()).collect()
    }

    /// Sets the sender details.
    pub fn set_sender(&mut self, name: String, email: String) -> Result<(), CheckoutError> {
        self.require_stage(CheckoutStage::Customer)?;
        self.assignment.set_sender(name, email);
        Ok(())
    }

    /// Appends an empty recipient slot, capped at the gift unit count.
    pub fn add_recipient(&mut self) -> Result<(), CheckoutError> {
        self.require_stage(CheckoutStage::Customer)?;
        self.assignment.add_recipient(self.gift_units.len())
    }

    /// Deletes a recipient slot, freeing its assigned units.
    pub fn remove_recipient(&mut self, index: usize) -> Result<(), CheckoutError> {
        self.require_stage(CheckoutStage::Customer)?;
        self.assignment.remove_recipient(index)
    }

    /// Updates a recipient's form fields.
    pub fn update_recipient(
        &mut self,
        index: usize,
        details: RecipientDetails,
    ) -> Result<(), CheckoutError> {
        self.require_stage(CheckoutStage::Customer)?;
        self.assignment.update_recipient(index, details)
    }

    /// Assigns or unassigns a gift unit for a recipient.
    ///
    /// The unit must belong to this session's gift population; assignment
    /// rules (eligibility, disjointness) are enforced by the assignment
    /// state.
    pub fn toggle_assignment(
        &mut self,
        recipient_index: usize,
        unit_id: &str,
        checked: bool,
    ) -> Result<(), CheckoutError> {
        self.require_stage(CheckoutStage::Customer)?;

        if !self.gift_units.iter().any(|u| u.unique_id == unit_id) {
            return Err(CheckoutError::UnknownUnit(unit_id.to_string()));
        }

        self.assignment
            .toggle_assignment(recipient_index, unit_id, checked)
    }

    /// Sets the buyer shipping details.
    pub fn set_customer(&mut self, info: CustomerInfo) -> Result<(), CheckoutError> {
        self.require_stage(CheckoutStage::Customer)?;
        self.customer = Some(info);
        Ok(())
    }

    /// Removes a single unit from the checkout summary.
    ///
    /// Unassigns the unit from whichever recipient holds it and deletes it
    /// from the session's unit list. Remaining unit ids are left untouched;
    /// ordinal gaps stay open so selections keyed by other ids keep
    /// pointing at the right units. The caller decrements the originating
    /// cart line using the returned identity.
    pub fn remove_unit(&mut self, unit_id: &str) -> Result<RemovedUnit, CheckoutError> {
        self.require_stage(CheckoutStage::Customer)?;

        if let Some(pos) = self.gift_units.iter().position(|u| u.unique_id == unit_id) {
            self.assignment.unassign(unit_id);
            let unit = self.gift_units.remove(pos);
            return Ok(RemovedUnit {
                basket_id: unit.basket_id,
                is_gift: true,
            });
        }

        if let Some(pos) = self
            .personal_units
            .iter()
            .position(|u| u.unique_id == unit_id)
        {
            let unit = self.personal_units.remove(pos);
            return Ok(RemovedUnit {
                basket_id: unit.basket_id,
                is_gift: false,
            });
        }

        Err(CheckoutError::UnknownUnit(unit_id.to_string()))
    }

    /// The validation gate run before pricing and payment.
    ///
    /// Delegates gift checks to the assignment state, then requires buyer
    /// shipping details whenever personal units are present. Pricing is
    /// only ever invoked after this gate passes.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        self.require_stage(CheckoutStage::Customer)?;
        self.assignment.validate(&self.gift_unit_ids())?;

        if !self.personal_units.is_empty() && self.customer.is_none() {
            return Err(CheckoutError::CustomerInfoMissing);
        }

        Ok(())
    }

    /// Records the payment intent and order, moving `Customer` to
    /// `Payment`.
    pub fn advance_to_payment(
        &mut self,
        payment_intent_id: String,
        order_id: String,
    ) -> Result<(), CheckoutError> {
        self.require_stage(CheckoutStage::Customer)?;
        self.payment_intent_id = Some(payment_intent_id);
        self.order_id = Some(order_id);
        self.stage = CheckoutStage::Payment;
        Ok(())
    }

    /// Explicit "edit information" action, moving `Payment` back to
    /// `Customer`.
    ///
    /// Entered data is preserved; the stale intent is dropped so submit
    /// mints a fresh one.
    pub fn edit_information(&mut self) -> Result<(), CheckoutError> {
        self.require_stage(CheckoutStage::Payment)?;
        self.payment_intent_id = None;
        self.order_id = None;
        self.stage = CheckoutStage::Customer;
        Ok(())
    }

    /// Payment confirmed, moving `Payment` to `Success`. Terminal.
    pub fn complete(&mut self) -> Result<(), CheckoutError> {
        self.require_stage(CheckoutStage::Payment)?;
        self.stage = CheckoutStage::Success;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::assignment::RecipientDetails;
    use rust_decimal::Decimal;

    fn line(basket_id: u32, quantity: u32, is_gift: bool) -> CartLine {
        CartLine {
            basket_id,
            name: format!("Basket {basket_id}"),
            category: "Test".into(),
            image_ref: String::new(),
            unit_price: Decimal::new(5000, 2),
            quantity,
            is_gift,
        }
    }

    fn customer_session(lines: &[CartLine]) -> CheckoutSession {
        let mut session = CheckoutSession::new("cart-1".into(), lines).unwrap();
        session.authenticate("user-1".into()).unwrap();
        session
    }

    fn ana() -> RecipientDetails {
        RecipientDetails {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_cart_cannot_start_checkout() {
        let result = CheckoutSession::new("cart-1".into(), &[]);
        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[test]
    fn populations_are_split_on_expansion() {
        let session = customer_session(&[line(1, 2, true), line(2, 1, false)]);

        assert_eq!(session.gift_units.len(), 2);
        assert_eq!(session.personal_units.len(), 1);
        assert_eq!(session.personal_units[0].unique_id, "2-0");
    }

    #[test]
    fn mutation_requires_customer_stage() {
        let mut session = CheckoutSession::new("cart-1".into(), &[line(1, 1, true)]).unwrap();

        // Still in Auth: every mutation is refused.
        let err = session.set_sender("S".into(), "s@example.com".into());
        assert!(matches!(err, Err(CheckoutError::InvalidStage { .. })));
    }

    #[test]
    fn remove_unit_unassigns_and_keeps_other_ids() {
        let mut session = customer_session(&[line(1, 3, true)]);
        session.update_recipient(0, ana()).unwrap();
        session.toggle_assignment(0, "1-1", true).unwrap();

        let removed = session.remove_unit("1-1").unwrap();
        assert_eq!(
            removed,
            RemovedUnit {
                basket_id: 1,
                is_gift: true
            }
        );

        // The unit is gone from the assignment and the unit list, and the
        // surviving ids keep their original ordinals (gap stays open).
        assert_eq!(session.assignment.holder_of("1-1"), None);
        let remaining: Vec<&str> = session
            .gift_units
            .iter()
            .map(|u| u.unique_id.as_str())
            .collect();
        assert_eq!(remaining, vec!["1-0", "1-2"]);
    }

    #[test]
    fn remove_unknown_unit_is_an_error() {
        let mut session = customer_session(&[line(1, 1, false)]);
        let err = session.remove_unit("9-9").unwrap_err();
        assert_eq!(err, CheckoutError::UnknownUnit("9-9".into()));
    }

    #[test]
    fn validate_requires_customer_info_for_personal_units() {
        let session = customer_session(&[line(2, 1, false)]);

        assert_eq!(
            session.validate().unwrap_err(),
            CheckoutError::CustomerInfoMissing
        );
    }

    #[test]
    fn stage_machine_is_linear_with_edit_backedge() {
        let mut session = customer_session(&[line(1, 1, true)]);
        session.update_recipient(0, ana()).unwrap();
        session.toggle_assignment(0, "1-0", true).unwrap();
        session
            .set_sender("Sender".into(), "sender@example.com".into())
            .unwrap();
        session.validate().unwrap();

        session
            .advance_to_payment("pi_1".into(), "order_1".into())
            .unwrap();
        assert_eq!(session.stage, CheckoutStage::Payment);

        // Assignments are frozen during payment.
        let err = session.toggle_assignment(0, "1-0", false).unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidStage { .. }));

        // Edit information returns to Customer without losing data.
        session.edit_information().unwrap();
        assert_eq!(session.stage, CheckoutStage::Customer);
        assert_eq!(session.assignment.holder_of("1-0"), Some(0));
        assert!(session.payment_intent_id.is_none());

        session
            .advance_to_payment("pi_2".into(), "order_2".into())
            .unwrap();
        session.complete().unwrap();
        assert_eq!(session.stage, CheckoutStage::Success);

        // Success is terminal.
        assert!(session.edit_information().is_err());
        assert!(session.complete().is_err());
    }
}
