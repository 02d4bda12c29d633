//! Gift assignment state
//!
//! Maintains the mapping from gift units to recipients for one checkout
//! attempt. A unit belongs to at most one recipient; a recipient may only
//! receive assignments once it has a name and at least one contact channel;
//! before payment, every gift unit must be assigned.

use super::CheckoutError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Maximum length of a recipient's personal note.
pub const MAX_PERSONAL_NOTE_LEN: usize = 500;

/// A named, contactable party to whom gift units are assigned.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    /// Recipient display name.
    pub name: String,

    /// Contact email (one of email/phone is required for eligibility).
    pub email: String,

    /// Contact phone (one of email/phone is required for eligibility).
    pub phone: String,

    /// Optional gift note, at most 500 characters.
    pub personal_note: String,

    /// Units assigned to this recipient; disjoint across recipients.
    pub assigned_unit_ids: BTreeSet<String>,
}

impl Recipient {
    /// A recipient may receive assignments only once it has a non-empty
    /// name and at least one contact channel.
    pub fn is_eligible(&self) -> bool {
        !self.name.trim().is_empty()
            && (!self.email.trim().is_empty() || !self.phone.trim().is_empty())
    }
}

/// Form fields for updating a recipient.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientDetails {
    /// Recipient display name.
    #[serde(default)]
    pub name: String,

    /// Contact email.
    #[serde(default)]
    pub email: String,

    /// Contact phone.
    #[serde(default)]
    pub phone: String,

    /// Gift note, at most 500 characters.
    #[serde(default)]
    pub personal_note: String,
}

/// Sender details plus the recipient list for one checkout attempt.
///
/// Recipient order is display order only; it carries no meaning.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GiftAssignment {
    /// Name of the gift sender (the buyer).
    pub sender_name: String,

    /// Email of the gift sender.
    pub sender_email: String,

    /// Recipient slots, starting with one empty slot.
    pub recipients: Vec<Recipient>,
}

impl Default for GiftAssignment {
    fn default() -> Self {
        Self::new()
    }
}

impl GiftAssignment {
    /// Creates an assignment state with a single empty recipient slot.
    pub fn new() -> Self {
        Self {
            sender_name: String::new(),
            sender_email: String::new(),
            recipients: vec![Recipient::default()],
        }
    }

    /// Sets the sender details.
    pub fn set_sender(&mut self, name: String, email: String) {
        self.sender_name = name;
        self.sender_email = email;
    }

    /// Appends an empty recipient slot.
    ///
    /// Refused when there are already as many recipients as gift units:
    /// there cannot be more recipients than baskets to give.
    pub fn add_recipient(&mut self, gift_unit_count: usize) -> Result<(), CheckoutError> {
        if self.recipients.len() >= gift_unit_count {
            return Err(CheckoutError::RecipientLimit);
        }
        self.recipients.push(Recipient::default());
        Ok(())
    }

    /// Deletes the recipient at `index`, implicitly freeing its units.
    ///
    /// Refused when it would leave zero recipient slots.
    pub fn remove_recipient(&mut self, index: usize) -> Result<(), CheckoutError> {
        if index >= self.recipients.len() {
            return Err(CheckoutError::UnknownRecipient(index));
        }
        if self.recipients.len() == 1 {
            return Err(CheckoutError::LastRecipient);
        }
        // Units in the removed slot's set become unassigned again.
        self.recipients.remove(index);
        Ok(())
    }

    /// Updates a recipient's form fields. The assignment set is untouched.
    pub fn update_recipient(
        &mut self,
        index: usize,
        details: RecipientDetails,
    ) -> Result<(), CheckoutError> {
        if details.personal_note.chars().count() > MAX_PERSONAL_NOTE_LEN {
            return Err(CheckoutError::NoteTooLong);
        }

        let recipient = self
            .recipients
            .get_mut(index)
            .ok_or(CheckoutError::UnknownRecipient(index))?;

        recipient.name = details.name;
        recipient.email = details.email;
        recipient.phone = details.phone;
        recipient.personal_note = details.personal_note;
        Ok(())
    }

    /// Adds (`checked = true`) or removes (`checked = false`) `unit_id`
    /// from the recipient's assignment set.
    ///
    /// Adding requires the recipient to be eligible and the unit to be
    /// unassigned elsewhere; a unit never lands in two sets. Removing an
    /// id the recipient does not hold is a no-op.
    pub fn toggle_assignment(
        &mut self,
        index: usize,
        unit_id: &str,
        checked: bool,
    ) -> Result<(), CheckoutError> {
        if index >= self.recipients.len() {
            return Err(CheckoutError::UnknownRecipient(index));
        }

        if !checked {
            self.recipients[index].assigned_unit_ids.remove(unit_id);
            return Ok(());
        }

        if !self.recipients[index].is_eligible() {
            return Err(CheckoutError::RecipientNotEligible);
        }

        if let Some(holder) = self.holder_of(unit_id) {
            if holder != index {
                return Err(CheckoutError::UnitAlreadyAssigned(unit_id.to_string()));
            }
            // Already held by this recipient; checking twice is a no-op.
            return Ok(());
        }

        self.recipients[index]
            .assigned_unit_ids
            .insert(unit_id.to_string());
        Ok(())
    }

    /// Returns the index of the recipient currently holding `unit_id`.
    pub fn holder_of(&self, unit_id: &str) -> Option<usize> {
        self.recipients
            .iter()
            .position(|r| r.assigned_unit_ids.contains(unit_id))
    }

    /// Removes `unit_id` from whichever recipient holds it, if any.
    ///
    /// Returns whether a recipient held the unit.
    pub fn unassign(&mut self, unit_id: &str) -> bool {
        match self.holder_of(unit_id) {
            Some(index) => self.recipients[index].assigned_unit_ids.remove(unit_id),
            None => false,
        }
    }

    /// Union of all recipients' assigned unit ids.
    pub fn assigned_ids(&self) -> BTreeSet<String> {
        self.recipients
            .iter()
            .flat_map(|r| r.assigned_unit_ids.iter().cloned())
            .collect()
    }

    /// The validation gate run before pricing and payment.
    ///
    /// Checks, in order: every recipient holding units has a name and a
    /// contact channel; every gift unit is assigned (full coverage; a
    /// partial assignment never reaches payment); sender details are
    /// present once anything is assigned.
    pub fn validate(&self, gift_unit_ids: &BTreeSet<String>) -> Result<(), CheckoutError> {
        for recipient in &self.recipients {
            if recipient.assigned_unit_ids.is_empty() {
                continue;
            }
            if recipient.name.trim().is_empty() {
                return Err(CheckoutError::MissingRecipientName);
            }
            if recipient.email.trim().is_empty() && recipient.phone.trim().is_empty() {
                return Err(CheckoutError::MissingContact);
            }
        }

        let assigned = self.assigned_ids();
        if &assigned != gift_unit_ids {
            return Err(CheckoutError::IncompleteGiftCoverage);
        }

        if !assigned.is_empty()
            && (self.sender_name.trim().is_empty() || self.sender_email.trim().is_empty())
        {
            return Err(CheckoutError::SenderInfoMissing);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eligible(name: &str) -> RecipientDetails {
        RecipientDetails {
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            ..Default::default()
        }
    }

    fn ids(raw: &[&str]) -> BTreeSet<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn toggle_rejected_for_ineligible_recipient() {
        let mut state = GiftAssignment::new();

        // Empty name: rejected regardless of `checked`.
        let err = state.toggle_assignment(0, "1-0", true).unwrap_err();
        assert_eq!(err, CheckoutError::RecipientNotEligible);
        assert!(state.recipients[0].assigned_unit_ids.is_empty());

        // Unchecking is always a harmless no-op.
        state.toggle_assignment(0, "1-0", false).unwrap();
        assert!(state.recipients[0].assigned_unit_ids.is_empty());
    }

    #[test]
    fn assignments_stay_disjoint() {
        let mut state = GiftAssignment::new();
        state.update_recipient(0, eligible("Ana")).unwrap();
        state.add_recipient(2).unwrap();
        state.update_recipient(1, eligible("Luis")).unwrap();

        state.toggle_assignment(0, "1-0", true).unwrap();

        let err = state.toggle_assignment(1, "1-0", true).unwrap_err();
        assert_eq!(err, CheckoutError::UnitAlreadyAssigned("1-0".into()));

        // Still exactly one holder.
        assert_eq!(state.holder_of("1-0"), Some(0));
        assert!(state.recipients[1].assigned_unit_ids.is_empty());
    }

    #[test]
    fn recipient_limit_tracks_gift_unit_count() {
        let mut state = GiftAssignment::new();

        // One slot already exists; with a single gift unit no more fit.
        assert_eq!(
            state.add_recipient(1).unwrap_err(),
            CheckoutError::RecipientLimit
        );

        state.add_recipient(2).unwrap();
        assert_eq!(state.recipients.len(), 2);
    }

    #[test]
    fn removing_recipient_frees_its_units() {
        let mut state = GiftAssignment::new();
        state.update_recipient(0, eligible("Ana")).unwrap();
        state.add_recipient(2).unwrap();
        state.update_recipient(1, eligible("Luis")).unwrap();
        state.toggle_assignment(1, "2-0", true).unwrap();

        state.remove_recipient(1).unwrap();

        assert_eq!(state.holder_of("2-0"), None);
        assert!(state.assigned_ids().is_empty());
    }

    #[test]
    fn last_recipient_cannot_be_removed() {
        let mut state = GiftAssignment::new();
        assert_eq!(
            state.remove_recipient(0).unwrap_err(),
            CheckoutError::LastRecipient
        );
    }

    #[test]
    fn coverage_gate_requires_every_gift_unit() {
        let gift_ids = ids(&["1-0", "1-1", "2-0"]);

        let mut state = GiftAssignment::new();
        state.set_sender("Sender".into(), "sender@example.com".into());
        state.update_recipient(0, eligible("Ana")).unwrap();
        state.toggle_assignment(0, "1-0", true).unwrap();
        state.toggle_assignment(0, "1-1", true).unwrap();

        // Two of three assigned: rejected.
        assert_eq!(
            state.validate(&gift_ids).unwrap_err(),
            CheckoutError::IncompleteGiftCoverage
        );

        // Assign the third: passes.
        state.toggle_assignment(0, "2-0", true).unwrap();
        state.validate(&gift_ids).unwrap();
    }

    #[test]
    fn sender_required_once_units_are_assigned() {
        let gift_ids = ids(&["1-0"]);

        let mut state = GiftAssignment::new();
        state.update_recipient(0, eligible("Ana")).unwrap();
        state.toggle_assignment(0, "1-0", true).unwrap();

        assert_eq!(
            state.validate(&gift_ids).unwrap_err(),
            CheckoutError::SenderInfoMissing
        );

        state.set_sender("Sender".into(), "sender@example.com".into());
        state.validate(&gift_ids).unwrap();
    }

    #[test]
    fn validate_passes_trivially_without_gift_units() {
        let state = GiftAssignment::new();
        state.validate(&BTreeSet::new()).unwrap();
    }

    #[test]
    fn note_over_limit_is_rejected() {
        let mut state = GiftAssignment::new();
        let details = RecipientDetails {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            personal_note: "x".repeat(MAX_PERSONAL_NOTE_LEN + 1),
            ..Default::default()
        };

        assert_eq!(
            state.update_recipient(0, details).unwrap_err(),
            CheckoutError::NoteTooLong
        );
    }

    #[test]
    fn contact_gate_catches_cleared_fields() {
        let gift_ids = ids(&["1-0"]);

        let mut state = GiftAssignment::new();
        state.set_sender("Sender".into(), "sender@example.com".into());
        state.update_recipient(0, eligible("Ana")).unwrap();
        state.toggle_assignment(0, "1-0", true).unwrap();

        // Clearing contact channels after assignment must fail the gate.
        state
            .update_recipient(
                0,
                RecipientDetails {
                    name: "Ana".into(),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(
            state.validate(&gift_ids).unwrap_err(),
            CheckoutError::MissingContact
        );
    }
}
