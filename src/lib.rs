//! Gift Basket Storefront Library
//!
//! This library provides the backend for a curated gift-basket storefront:
//! catalog browsing, cart management, checkout with gift assignment,
//! payment capture, order/claim handling and passwordless authentication.

// Domain modules
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod payment;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
pub mod state;
