//! Application state
//!
//! Shared state for the whole storefront: the catalog of record plus the
//! in-memory stores for carts, checkout sessions, orders, payment intents
//! and authentication. DashMaps allow concurrent access without external
//! Mutexes.

use crate::auth::{AuthStore, HandoffStore};
use crate::cart::CartStore;
use crate::catalog::{fixtures, Catalog};
use crate::checkout::CheckoutSession;
use crate::orders::OrderStore;
use crate::payment::PaymentGateway;
use dashmap::DashMap;
use std::sync::Arc;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state containing every in-memory store.
#[derive(Debug)]
pub struct AppState {
    /// The catalog of record; all pricing derives from here.
    pub catalog: Catalog,

    /// Cart line storage, keyed by cart id.
    pub carts: CartStore,

    /// Live checkout sessions, keyed by session id.
    pub sessions: DashMap<String, CheckoutSession>,

    /// Persisted orders.
    pub orders: OrderStore,

    /// In-memory payment gateway.
    pub payments: PaymentGateway,

    /// OTP challenges and bearer sessions.
    pub auth: AuthStore,

    /// Pending handoff tokens.
    pub handoff: HandoffStore,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates fresh state over the fixture catalog.
    pub fn new() -> Self {
        // The fixture set is validated by its own unit test; construction
        // can only fail if the fixtures regress.
        let catalog = Catalog::new(fixtures::baskets()).expect("fixture basket ids are unique");

        Self {
            catalog,
            carts: CartStore::new(),
            sessions: DashMap::new(),
            orders: OrderStore::new(),
            payments: PaymentGateway::new(),
            auth: AuthStore::new(),
            handoff: HandoffStore::new(),
        }
    }
}
