//! Checkout request/response models

use super::assignment::RecipientDetails;
use super::pricing::{all_ids, reduce, total};
use super::session::{CheckoutSession, CheckoutStage, CustomerInfo};
use super::units::Unit;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for POST /checkout/start
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartCheckoutRequest {
    /// Cart to check out.
    pub cart_id: String,
}

/// Request body for POST /checkout/:session_id/sender
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderRequest {
    /// Name of the gift sender.
    pub sender_name: String,

    /// Email of the gift sender.
    pub sender_email: String,
}

/// Request body for POST /checkout/:session_id/recipients/remove
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRecipientRequest {
    /// Index of the recipient slot to delete.
    pub index: usize,
}

/// Request body for POST /checkout/:session_id/recipients/update
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipientRequest {
    /// Index of the recipient slot to update.
    pub index: usize,

    /// New form field values.
    #[serde(flatten)]
    pub details: RecipientDetails,
}

/// Request body for POST /checkout/:session_id/assign
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    /// Index of the recipient the toggle belongs to.
    pub recipient_index: usize,

    /// Unit being assigned or unassigned.
    pub unit_id: String,

    /// `true` to assign, `false` to unassign.
    pub checked: bool,
}

/// Request body for POST /checkout/:session_id/units/remove
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveUnitRequest {
    /// Unit to remove from the checkout summary.
    pub unit_id: String,
}

/// Request body for POST /checkout/:session_id/submit
///
/// The client sends the total it displayed; the server recomputes the real
/// total from the catalog and rejects any mismatch.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    /// Client-displayed total, verified but never trusted.
    pub total_amount: Decimal,
}

/// Response for POST /checkout/:session_id/submit
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    /// Client secret for confirming the payment intent.
    pub client_secret: String,

    /// Id of the order created for this payment.
    pub order_id: String,
}

/// Recipient slot as presented to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientView {
    /// Recipient display name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone.
    pub phone: String,

    /// Gift note.
    pub personal_note: String,

    /// Whether the recipient may receive assignments.
    pub eligible: bool,

    /// Units assigned to this recipient.
    pub assigned_unit_ids: Vec<String>,

    /// Units this recipient may select: everything not held by another
    /// recipient. Units assigned elsewhere are hidden, which is what keeps
    /// assignment sets disjoint at the UI level.
    pub selectable_unit_ids: Vec<String>,
}

/// Full session state as presented to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// Session identity.
    pub session_id: String,

    /// Cart the session was started from.
    pub cart_id: String,

    /// Current stage.
    pub stage: CheckoutStage,

    /// Gift units remaining in the session.
    pub gift_units: Vec<Unit>,

    /// Personal units remaining in the session.
    pub personal_units: Vec<Unit>,

    /// Name of the gift sender.
    pub sender_name: String,

    /// Email of the gift sender.
    pub sender_email: String,

    /// Recipient slots.
    pub recipients: Vec<RecipientView>,

    /// Buyer shipping details, when entered.
    pub customer: Option<CustomerInfo>,

    /// Running total over currently assigned gift units.
    pub gift_total: Decimal,

    /// Total over all personal units.
    pub personal_total: Decimal,

    /// Combined total (one charge covers both populations).
    pub total: Decimal,
}

impl SessionView {
    /// Builds the client view of a session, including running totals.
    pub fn from_session(session: &CheckoutSession) -> Self {
        let gift_items = reduce(&session.gift_units, &session.assignment.assigned_ids());
        let personal_items = reduce(&session.personal_units, &all_ids(&session.personal_units));
        let gift_total = total(&gift_items);
        let personal_total = total(&personal_items);

        let recipients = session
            .assignment
            .recipients
            .iter()
            .enumerate()
            .map(|(index, r)| RecipientView {
                name: r.name.clone(),
                email: r.email.clone(),
                phone: r.phone.clone(),
                personal_note: r.personal_note.clone(),
                eligible: r.is_eligible(),
                assigned_unit_ids: r.assigned_unit_ids.iter().cloned().collect(),
                selectable_unit_ids: session
                    .gift_units
                    .iter()
                    .filter(|u| {
                        session
                            .assignment
                            .holder_of(&u.unique_id)
                            .map_or(true, |holder| holder == index)
                    })
                    .map(|u| u.unique_id.clone())
                    .collect(),
            })
            .collect();

        Self {
            session_id: session.id.clone(),
            cart_id: session.cart_id.clone(),
            stage: session.stage,
            gift_units: session.gift_units.clone(),
            personal_units: session.personal_units.clone(),
            sender_name: session.assignment.sender_name.clone(),
            sender_email: session.assignment.sender_email.clone(),
            recipients,
            customer: session.customer.clone(),
            gift_total,
            personal_total,
            total: gift_total + personal_total,
        }
    }
}
