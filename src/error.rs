//! API error boundary
//!
//! Every domain error funnels through [`ApiError`], which maps it to a
//! kebab-case wire code, an HTTP status and a `{"error": {...}}` JSON
//! body. Errors are handled where they occur and presented immediately;
//! nothing is re-thrown past this boundary.

use crate::auth::AuthError;
use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::orders::OrderError;
use crate::payment::PaymentError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Top-level error type returned by every handler.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failures.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Cart storage failures.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Catalog failures.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Checkout reconciler failures.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Order failures.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// Payment failures.
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

impl ApiError {
    /// Stable machine-readable code for clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Auth(e) => match e {
                AuthError::MissingToken | AuthError::InvalidToken => "unauthorized",
                AuthError::InvalidOtp => "invalid-otp",
                AuthError::ExpiredOtp => "expired-otp",
                AuthError::HandoffInvalid => "invalid-handoff",
            },
            Self::Cart(e) => match e {
                CartError::CartNotFound => "cart-not-found",
                CartError::LineNotFound { .. } => "line-not-found",
                CartError::InvalidQuantity => "invalid-quantity",
            },
            Self::Catalog(e) => match e {
                CatalogError::DuplicateId(_) => "duplicate-basket-id",
                CatalogError::BasketNotFound(_) => "basket-not-found",
            },
            Self::Checkout(e) => match e {
                CheckoutError::SessionNotFound => "session-not-found",
                CheckoutError::EmptyCart => "empty-cart",
                CheckoutError::RecipientLimit => "recipient-limit",
                CheckoutError::LastRecipient => "last-recipient",
                CheckoutError::UnknownRecipient(_) => "unknown-recipient",
                CheckoutError::RecipientNotEligible => "recipient-not-eligible",
                CheckoutError::UnknownUnit(_) => "unknown-unit",
                CheckoutError::UnitAlreadyAssigned(_) => "unit-already-assigned",
                CheckoutError::NoteTooLong => "note-too-long",
                CheckoutError::MissingRecipientName => "missing-recipient-name",
                CheckoutError::MissingContact => "missing-contact",
                CheckoutError::IncompleteGiftCoverage => "incomplete-gift-coverage",
                CheckoutError::SenderInfoMissing => "sender-info-missing",
                CheckoutError::CustomerInfoMissing => "customer-info-missing",
                CheckoutError::InvalidStage { .. } => "invalid-stage",
            },
            Self::Order(e) => match e {
                OrderError::OrderNotFound => "order-not-found",
                OrderError::ClaimTokenInvalid => "invalid-claim-token",
                OrderError::OrderNotPaid => "order-not-paid",
                OrderError::AlreadyClaimed => "already-claimed",
                OrderError::AlreadyReviewed => "already-reviewed",
                OrderError::InvalidRating => "invalid-rating",
            },
            Self::Payment(e) => match e {
                PaymentError::UnknownBasket(_) => "unknown-basket",
                PaymentError::PriceMismatch => "price-mismatch",
                PaymentError::IntentNotFound => "intent-not-found",
            },
        }
    }

    /// HTTP status for the error class.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Auth(e) => match e {
                AuthError::HandoffInvalid => StatusCode::NOT_FOUND,
                _ => StatusCode::UNAUTHORIZED,
            },
            Self::Cart(e) => match e {
                CartError::InvalidQuantity => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::NOT_FOUND,
            },
            Self::Catalog(e) => match e {
                CatalogError::DuplicateId(_) => StatusCode::INTERNAL_SERVER_ERROR,
                CatalogError::BasketNotFound(_) => StatusCode::NOT_FOUND,
            },
            Self::Checkout(e) => match e {
                CheckoutError::SessionNotFound
                | CheckoutError::UnknownRecipient(_)
                | CheckoutError::UnknownUnit(_) => StatusCode::NOT_FOUND,
                CheckoutError::UnitAlreadyAssigned(_) | CheckoutError::InvalidStage { .. } => {
                    StatusCode::CONFLICT
                }
                _ => StatusCode::UNPROCESSABLE_ENTITY,
            },
            Self::Order(e) => match e {
                OrderError::OrderNotFound | OrderError::ClaimTokenInvalid => StatusCode::NOT_FOUND,
                OrderError::InvalidRating => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::CONFLICT,
            },
            Self::Payment(e) => match e {
                PaymentError::IntentNotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::UNPROCESSABLE_ENTITY,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        });

        if status.is_server_error() {
            tracing::error!(code = self.code(), %self, "request failed");
        } else {
            tracing::debug!(code = self.code(), %self, "request rejected");
        }

        (status, Json(body)).into_response()
    }
}
