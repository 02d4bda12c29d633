//! REST API handlers for checkout sessions
//!
//! Every handler goes through the one shared reconciler in this module's
//! siblings; there is no per-surface copy of the assignment or pricing
//! logic. Mutations respond with the full session view.

use super::models::*;
use super::pricing::{all_ids, reduce};
use super::session::CheckoutSession;
use super::CheckoutError;
use crate::auth::require_user;
use crate::error::ApiError;
use crate::orders::{GiftShipment, Order, OrderStatus};
use crate::payment::verify_total;
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use uuid::Uuid;

/// Creates routes for checkout-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/checkout/start", post(start_checkout))
        .route("/checkout/:session_id", get(get_session))
        .route("/checkout/:session_id/sender", post(set_sender))
        .route("/checkout/:session_id/recipients/add", post(add_recipient))
        .route(
            "/checkout/:session_id/recipients/remove",
            post(remove_recipient),
        )
        .route(
            "/checkout/:session_id/recipients/update",
            post(update_recipient),
        )
        .route("/checkout/:session_id/assign", post(assign_unit))
        .route("/checkout/:session_id/units/remove", post(remove_unit))
        .route("/checkout/:session_id/customer", post(set_customer))
        .route("/checkout/:session_id/submit", post(submit))
        .route("/checkout/:session_id/edit", post(edit_information))
}

/// Applies a mutation to the session and returns the updated view.
fn with_session<F>(state: &SharedState, session_id: &str, op: F) -> Result<SessionView, ApiError>
where
    F: FnOnce(&mut CheckoutSession) -> Result<(), CheckoutError>,
{
    let mut session = state
        .sessions
        .get_mut(session_id)
        .ok_or(CheckoutError::SessionNotFound)?;

    op(&mut session)?;
    Ok(SessionView::from_session(&session))
}

/// Endpoint: POST /checkout/start
/// Opens a checkout session over the cart's current lines. Requires an
/// authenticated user; the session enters the customer stage immediately.
async fn start_checkout(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<StartCheckoutRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let user = require_user(&state.auth, &headers)?;

    let lines = state.carts.lines(&payload.cart_id);
    let mut session = CheckoutSession::new(payload.cart_id, &lines)?;
    session.authenticate(user.id)?;

    let view = SessionView::from_session(&session);
    state.sessions.insert(session.id.clone(), session);

    tracing::info!(session_id = %view.session_id, cart_id = %view.cart_id, "checkout started");
    Ok(Json(view))
}

/// Endpoint: GET /checkout/:session_id
/// Returns the current session state.
async fn get_session(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let session = state
        .sessions
        .get(&session_id)
        .ok_or(CheckoutError::SessionNotFound)?;

    Ok(Json(SessionView::from_session(&session)))
}

/// Endpoint: POST /checkout/:session_id/sender
/// Sets the gift sender's name and email.
async fn set_sender(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    Json(payload): Json<SenderRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let view = with_session(&state, &session_id, |s| {
        s.set_sender(payload.sender_name, payload.sender_email)
    })?;
    Ok(Json(view))
}

/// Endpoint: POST /checkout/:session_id/recipients/add
/// Appends an empty recipient slot, capped at the gift unit count.
async fn add_recipient(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let view = with_session(&state, &session_id, |s| s.add_recipient())?;
    Ok(Json(view))
}

/// Endpoint: POST /checkout/:session_id/recipients/remove
/// Deletes a recipient slot; its assigned units become selectable again.
async fn remove_recipient(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    Json(payload): Json<RemoveRecipientRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let view = with_session(&state, &session_id, |s| s.remove_recipient(payload.index))?;
    Ok(Json(view))
}

/// Endpoint: POST /checkout/:session_id/recipients/update
/// Updates a recipient's form fields (name, contacts, note).
async fn update_recipient(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    Json(payload): Json<UpdateRecipientRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let view = with_session(&state, &session_id, |s| {
        s.update_recipient(payload.index, payload.details)
    })?;
    Ok(Json(view))
}

/// Endpoint: POST /checkout/:session_id/assign
/// Assigns or unassigns a gift unit for a recipient.
async fn assign_unit(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    Json(payload): Json<AssignRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let view = with_session(&state, &session_id, |s| {
        s.toggle_assignment(payload.recipient_index, &payload.unit_id, payload.checked)
    })?;
    Ok(Json(view))
}

/// Endpoint: POST /checkout/:session_id/units/remove
/// Removes a single unit from the checkout summary, unassigning it and
/// decrementing the originating cart line by one.
async fn remove_unit(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    Json(payload): Json<RemoveUnitRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let (view, cart_id, removed) = {
        let mut session = state
            .sessions
            .get_mut(&session_id)
            .ok_or(CheckoutError::SessionNotFound)?;

        let removed = session.remove_unit(&payload.unit_id)?;
        (
            SessionView::from_session(&session),
            session.cart_id.clone(),
            removed,
        )
    };

    state
        .carts
        .decrement_unit(&cart_id, removed.basket_id, removed.is_gift);

    Ok(Json(view))
}

/// Endpoint: POST /checkout/:session_id/customer
/// Sets the buyer's shipping details for personal units.
async fn set_customer(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    Json(payload): Json<crate::checkout::CustomerInfo>,
) -> Result<Json<SessionView>, ApiError> {
    let view = with_session(&state, &session_id, |s| s.set_customer(payload))?;
    Ok(Json(view))
}

/// Endpoint: POST /checkout/:session_id/submit
/// Runs the validation gate, prices the assignment, creates the order and
/// the payment intent, and moves the session to the payment stage.
///
/// Pricing only ever runs after the gate passes, and the charged amount is
/// recomputed from the catalog; the client-declared total is a cross-check.
async fn submit(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    Json(payload): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let mut session = state
        .sessions
        .get_mut(&session_id)
        .ok_or(CheckoutError::SessionNotFound)?;

    session.validate()?;

    // Gift and personal populations reduce separately; one combined charge.
    let gift_items = reduce(&session.gift_units, &session.assignment.assigned_ids());
    let personal_items = reduce(&session.personal_units, &all_ids(&session.personal_units));

    let mut all_items = gift_items;
    all_items.extend(personal_items.iter().cloned());
    let amount = verify_total(&state.catalog, &all_items, payload.total_amount)?;

    let gift_shipments: Vec<GiftShipment> = session
        .assignment
        .recipients
        .iter()
        .filter(|r| !r.assigned_unit_ids.is_empty())
        .map(|r| GiftShipment {
            recipient_name: r.name.clone(),
            recipient_email: r.email.clone(),
            recipient_phone: r.phone.clone(),
            personal_note: r.personal_note.clone(),
            items: reduce(&session.gift_units, &r.assigned_unit_ids),
            claim_token: Uuid::new_v4().simple().to_string(),
            shipping_address: None,
        })
        .collect();

    let order = Order {
        id: Uuid::new_v4().simple().to_string(),
        buyer_user_id: session.user_id.clone().unwrap_or_default(),
        sender_name: session.assignment.sender_name.clone(),
        sender_email: session.assignment.sender_email.clone(),
        status: OrderStatus::PendingPayment,
        personal_items,
        personal_shipping: session.customer.clone(),
        gift_shipments,
        total: amount,
        review: None,
        created_at: Utc::now(),
    };
    let order_id = order.id.clone();
    state.orders.insert(order);

    let intent = state
        .payments
        .create_intent(order_id.clone(), session.id.clone(), amount);
    session.advance_to_payment(intent.id, order_id.clone())?;

    tracing::info!(%order_id, %amount, "checkout submitted");

    Ok(Json(SubmitResponse {
        client_secret: intent.client_secret,
        order_id,
    }))
}

/// Endpoint: POST /checkout/:session_id/edit
/// The explicit "edit information" action: returns the session from the
/// payment stage to the customer stage without discarding entered data.
/// The stale intent is cancelled and the stale order voided, so neither
/// can ever be confirmed or claimed; submit mints fresh ones.
async fn edit_information(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let (view, stale_intent_id, stale_order_id) = {
        let mut session = state
            .sessions
            .get_mut(&session_id)
            .ok_or(CheckoutError::SessionNotFound)?;

        let stale_intent_id = session.payment_intent_id.clone();
        let stale_order_id = session.order_id.clone();
        session.edit_information()?;
        (
            SessionView::from_session(&session),
            stale_intent_id,
            stale_order_id,
        )
    };

    if let Some(intent_id) = stale_intent_id {
        state.payments.cancel(&intent_id);
    }
    if let Some(order_id) = stale_order_id {
        state.orders.void_pending(&order_id);
    }

    Ok(Json(view))
}
