//! REST API handlers for payment confirmation

use super::PaymentError;
use crate::error::ApiError;
use crate::orders::OrderStatus;
use crate::state::SharedState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

/// Creates routes for payment-related operations
pub fn routes() -> Router<SharedState> {
    Router::new().route("/payment/confirm", post(confirm_payment))
}

/// Request body for POST /payment/confirm
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    /// Intent id returned by submit (alongside the client secret).
    pub payment_intent_id: String,
}

/// Response for POST /payment/confirm
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResponse {
    /// Order the payment settled.
    pub order_id: String,

    /// Order status after confirmation.
    pub status: OrderStatus,
}

/// Endpoint: POST /payment/confirm
/// Finalizes a payment: the order becomes paid, the paid units leave the
/// cart and the finished checkout session is discarded.
async fn confirm_payment(
    State(state): State<SharedState>,
    Json(payload): Json<ConfirmRequest>,
) -> Result<Json<ConfirmResponse>, ApiError> {
    // Intents confirm exactly once; a second confirmation cannot re-run
    // any of the cleanup below.
    let intent = state.payments.confirm(&payload.payment_intent_id)?;

    // The intent must still be the session's current one. A stale intent
    // (its session gone, or superseded after an edit) must not touch the
    // order; nothing has been mutated yet on this branch.
    let (cart_id, units) = {
        let mut session = state
            .sessions
            .get_mut(&intent.session_id)
            .ok_or(PaymentError::IntentNotFound)?;

        if session.payment_intent_id.as_deref() != Some(intent.id.as_str()) {
            return Err(PaymentError::IntentNotFound.into());
        }

        session.complete()?;
        let units: Vec<(u32, bool)> = session
            .gift_units
            .iter()
            .chain(session.personal_units.iter())
            .map(|u| (u.basket_id, u.is_gift))
            .collect();
        (session.cart_id.clone(), units)
    };

    state.orders.mark_paid(&intent.order_id)?;

    for (basket_id, is_gift) in units {
        state.carts.decrement_unit(&cart_id, basket_id, is_gift);
    }

    // Units and recipients live only as long as the checkout attempt; the
    // order is what survives.
    state.sessions.remove(&intent.session_id);

    tracing::info!(order_id = %intent.order_id, amount = %intent.amount, "payment confirmed");

    Ok(Json(ConfirmResponse {
        order_id: intent.order_id,
        status: OrderStatus::Paid,
    }))
}
