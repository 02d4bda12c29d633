//! Authentication module
//!
//! Passwordless email OTP with bearer session tokens, plus short-lived
//! handoff tokens for carrying state across redirect round-trips. Email
//! delivery is an external concern; codes are only logged at debug level.

pub mod handlers;
pub mod handoff;
pub mod otp;

pub use handlers::routes;
pub use handoff::HandoffStore;
pub use otp::{AuthStore, AuthUser};

use axum::http::HeaderMap;
use thiserror::Error;

/// Errors raised by authentication operations.
#[derive(Debug, Error, PartialEq)]
pub enum AuthError {
    /// No `Authorization: Bearer` header on a protected route.
    #[error("authentication required")]
    MissingToken,

    /// The bearer token matches no active session.
    #[error("session token is invalid")]
    InvalidToken,

    /// The OTP code does not match the one issued for this email.
    #[error("verification code is incorrect")]
    InvalidOtp,

    /// The OTP code was issued too long ago.
    #[error("verification code has expired")]
    ExpiredOtp,

    /// The handoff token is unknown, already consumed or expired.
    #[error("handoff token is invalid")]
    HandoffInvalid,
}

/// Resolves the authenticated user from the `Authorization` header.
pub fn require_user(auth: &AuthStore, headers: &HeaderMap) -> Result<AuthUser, AuthError> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingToken)?;

    auth.user_for_token(token).ok_or(AuthError::InvalidToken)
}
