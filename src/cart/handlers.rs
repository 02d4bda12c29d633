//! REST API handlers for cart operations
//!
//! This module implements HTTP endpoints for reading and mutating carts.
//! Every mutation responds with the full cart view so clients never have
//! to reconstruct state locally.

use super::models::*;
use super::store::{get_or_create_cart_id, subtotal};
use crate::catalog::CatalogError;
use crate::error::ApiError;
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart/:cart_id", get(get_cart))
        .route("/cart/add", post(add_line))
        .route("/cart/remove", post(remove_line))
        .route("/cart/quantity", post(set_quantity))
        .route("/cart/clear", post(clear_cart))
}

/// Builds the canonical cart response for `cart_id`.
fn cart_view(state: &SharedState, cart_id: String) -> CartView {
    let lines = state.carts.lines(&cart_id);
    let subtotal = subtotal(&lines);
    CartView {
        cart_id,
        lines,
        subtotal,
    }
}

/// Endpoint: GET /cart/:cart_id
/// Returns the current lines of a cart. Unknown ids read as empty carts.
async fn get_cart(State(state): State<SharedState>, Path(cart_id): Path<String>) -> Json<CartView> {
    Json(cart_view(&state, cart_id))
}

/// Endpoint: POST /cart/add
/// Adds a basket to the cart, merging with an existing line of the same
/// (basket id, gift flag). Name, category and price come from the catalog.
async fn add_line(
    State(state): State<SharedState>,
    Json(payload): Json<AddLineRequest>,
) -> Result<Json<CartView>, ApiError> {
    let basket = state
        .catalog
        .get(payload.basket_id)
        .ok_or(CatalogError::BasketNotFound(payload.basket_id))?;

    if payload.quantity == 0 {
        return Err(CartError::InvalidQuantity.into());
    }

    let cart_id = get_or_create_cart_id(payload.cart_id);

    state.carts.add_line(
        &cart_id,
        CartLine {
            basket_id: basket.id,
            name: basket.name.clone(),
            category: basket.category.clone(),
            image_ref: basket.image_ref.clone(),
            unit_price: basket.price,
            quantity: payload.quantity,
            is_gift: payload.is_gift,
        },
    );

    Ok(Json(cart_view(&state, cart_id)))
}

/// Endpoint: POST /cart/remove
/// Removes an entire line from the cart.
async fn remove_line(
    State(state): State<SharedState>,
    Json(payload): Json<RemoveLineRequest>,
) -> Result<Json<CartView>, ApiError> {
    state
        .carts
        .remove_line(&payload.cart_id, payload.basket_id, payload.is_gift)?;

    Ok(Json(cart_view(&state, payload.cart_id)))
}

/// Endpoint: POST /cart/quantity
/// Sets a line's quantity; 0 deletes the line.
async fn set_quantity(
    State(state): State<SharedState>,
    Json(payload): Json<SetQuantityRequest>,
) -> Result<Json<CartView>, ApiError> {
    state.carts.set_quantity(
        &payload.cart_id,
        payload.basket_id,
        payload.is_gift,
        payload.quantity,
    )?;

    Ok(Json(cart_view(&state, payload.cart_id)))
}

/// Endpoint: POST /cart/clear
/// Drops every line in the cart.
async fn clear_cart(
    State(state): State<SharedState>,
    Json(payload): Json<ClearCartRequest>,
) -> Json<CartView> {
    state.carts.clear(&payload.cart_id);
    Json(cart_view(&state, payload.cart_id))
}
