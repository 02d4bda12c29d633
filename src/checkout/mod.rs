//! Checkout module: cart expansion and gift assignment reconciliation
//!
//! One shared, pure reconciler used by every checkout surface:
//!
//! 1. `units` expands quantity-grouped cart lines into individually
//!    addressable units with deterministic ids.
//! 2. `assignment` maps each gift unit to exactly one recipient under
//!    eligibility, disjointness and coverage constraints.
//! 3. `pricing` reduces a selected unit set back to quantity-aggregated,
//!    priced order lines.
//! 4. `session` holds one checkout attempt and its stage machine
//!    (auth, then customer, then payment, then success).

pub mod assignment;
pub mod handlers;
pub mod models;
pub mod pricing;
pub mod session;
pub mod units;

pub use assignment::{GiftAssignment, Recipient};
pub use handlers::routes;
pub use pricing::OrderItem;
pub use session::{CheckoutSession, CheckoutStage, CustomerInfo};
pub use units::{expand, Unit};

use thiserror::Error;

/// Errors raised by checkout operations.
///
/// Variant messages are user-facing; the kebab-case wire codes live in
/// [`crate::error`].
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// No checkout session under the given id.
    #[error("checkout session not found")]
    SessionNotFound,

    /// Checkout cannot start on an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// There cannot be more recipients than gift units to give.
    #[error("cannot add more recipients than gift baskets")]
    RecipientLimit,

    /// At least one recipient slot must remain while gift units exist.
    #[error("at least one recipient is required")]
    LastRecipient,

    /// No recipient at the given index.
    #[error("recipient {0} not found")]
    UnknownRecipient(usize),

    /// Assignment requires a named recipient with a contact channel.
    #[error("recipient needs a name and an email or phone before assignment")]
    RecipientNotEligible,

    /// The unit id does not belong to this session.
    #[error("unit {0} not found in this checkout")]
    UnknownUnit(String),

    /// A unit can belong to at most one recipient. Reaching this from the
    /// API indicates a client state bug, not a user error.
    #[error("unit {0} is already assigned to another recipient")]
    UnitAlreadyAssigned(String),

    /// Personal notes are capped at 500 characters.
    #[error("personal note exceeds 500 characters")]
    NoteTooLong,

    /// A recipient holding units has no name.
    #[error("every recipient with assigned baskets needs a name")]
    MissingRecipientName,

    /// A recipient holding units has neither email nor phone.
    #[error("every recipient with assigned baskets needs an email or phone")]
    MissingContact,

    /// Not every gift unit has been assigned to a recipient.
    #[error("all gift baskets must be assigned to a recipient before payment")]
    IncompleteGiftCoverage,

    /// Sender name/email are required once any unit is assigned.
    #[error("sender name and email are required")]
    SenderInfoMissing,

    /// Buyer shipping details are required when personal units are present.
    #[error("customer shipping details are required")]
    CustomerInfoMissing,

    /// The requested action is not allowed in the session's current stage.
    #[error("action not allowed in stage {stage:?}")]
    InvalidStage {
        /// The stage the session was actually in.
        stage: CheckoutStage,
    },
}
