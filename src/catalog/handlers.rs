//! REST API handlers for catalog browsing

use super::models::{Basket, CatalogError};
use crate::error::ApiError;
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

/// Creates routes for catalog operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/catalog", get(list_baskets))
        .route("/catalog/:basket_id", get(get_basket))
}

/// Endpoint: GET /catalog
/// Returns every basket in the catalog, in display order.
async fn list_baskets(State(state): State<SharedState>) -> Json<Vec<Basket>> {
    Json(state.catalog.baskets().to_vec())
}

/// Endpoint: GET /catalog/:basket_id
/// Returns a single basket by id.
async fn get_basket(
    State(state): State<SharedState>,
    Path(basket_id): Path<u32>,
) -> Result<Json<Basket>, ApiError> {
    let basket = state
        .catalog
        .get(basket_id)
        .ok_or(CatalogError::BasketNotFound(basket_id))?;

    Ok(Json(basket.clone()))
}
