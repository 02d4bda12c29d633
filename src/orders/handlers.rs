//! REST API handlers for order reads, gift claims and reviews

use super::models::{ClaimRequest, Order, ReviewRequest};
use crate::error::ApiError;
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

/// Creates routes for order-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/orders/:order_id", get(get_order))
        .route("/orders/claim", post(claim_gift))
        .route("/orders/:order_id/review", post(add_review))
}

/// Endpoint: GET /orders/:order_id
/// Returns the order, including claim state per gift shipment.
async fn get_order(
    State(state): State<SharedState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.get(&order_id)?))
}

/// Endpoint: POST /orders/claim
/// A gift recipient redeems their claim token and supplies a shipping
/// address. Tokens resolve once, and only on paid orders.
async fn claim_gift(
    State(state): State<SharedState>,
    Json(payload): Json<ClaimRequest>,
) -> Result<Json<Order>, ApiError> {
    let order = state
        .orders
        .claim(&payload.claim_token, payload.shipping_address)?;

    tracing::info!(order_id = %order.id, "gift shipment claimed");
    Ok(Json(order))
}

/// Endpoint: POST /orders/:order_id/review
/// The buyer leaves a post-purchase review on a paid order.
async fn add_review(
    State(state): State<SharedState>,
    Path(order_id): Path<String>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<Order>, ApiError> {
    let order = state
        .orders
        .add_review(&order_id, payload.rating, payload.comment)?;

    Ok(Json(order))
}
