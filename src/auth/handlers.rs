//! REST API handlers for authentication

use crate::error::ApiError;
use crate::state::SharedState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

/// Creates routes for auth-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/auth/otp/request", post(request_otp))
        .route("/auth/otp/verify", post(verify_otp))
        .route("/auth/handoff/issue", post(issue_handoff))
        .route("/auth/handoff/consume", post(consume_handoff))
}

/// Request body for POST /auth/otp/request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRequest {
    /// Email to send the code to.
    pub email: String,
}

/// Response for POST /auth/otp/request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRequested {
    /// Always "sent"; the code travels by email, never in the response.
    pub status: String,
}

/// Request body for POST /auth/otp/verify
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerifyRequest {
    /// Email the code was issued for.
    pub email: String,

    /// The 6-digit code.
    pub code: String,
}

/// Response for POST /auth/otp/verify
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerified {
    /// Bearer token for subsequent requests.
    pub token: String,

    /// Stable user id.
    pub user_id: String,

    /// Verified email.
    pub email: String,
}

/// Request body for POST /auth/handoff/issue
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffIssueRequest {
    /// Payload to carry across the redirect (e.g. a cart id).
    pub payload: String,
}

/// Response for POST /auth/handoff/issue
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffIssued {
    /// Single-use token.
    pub token: String,

    /// Seconds until the token expires.
    pub expires_in_secs: u64,
}

/// Request body for POST /auth/handoff/consume
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffConsumeRequest {
    /// Token to redeem.
    pub token: String,
}

/// Response for POST /auth/handoff/consume
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffConsumed {
    /// The payload stored at issue time.
    pub payload: String,
}

/// Endpoint: POST /auth/otp/request
/// Issues a sign-in code for the email. Delivery is external; the code is
/// only visible in debug logs here.
async fn request_otp(
    State(state): State<SharedState>,
    Json(payload): Json<OtpRequest>,
) -> Json<OtpRequested> {
    let code = state.auth.request_code(&payload.email);
    tracing::debug!(email = %payload.email, %code, "issued sign-in code");

    Json(OtpRequested {
        status: "sent".to_string(),
    })
}

/// Endpoint: POST /auth/otp/verify
/// Verifies the code and opens a bearer session.
async fn verify_otp(
    State(state): State<SharedState>,
    Json(payload): Json<OtpVerifyRequest>,
) -> Result<Json<OtpVerified>, ApiError> {
    let (token, user) = state.auth.verify(&payload.email, &payload.code)?;

    Ok(Json(OtpVerified {
        token,
        user_id: user.id,
        email: user.email,
    }))
}

/// Endpoint: POST /auth/handoff/issue
/// Mints a single-use token carrying a payload across a redirect.
async fn issue_handoff(
    State(state): State<SharedState>,
    Json(payload): Json<HandoffIssueRequest>,
) -> Json<HandoffIssued> {
    let token = state.handoff.issue(payload.payload);

    Json(HandoffIssued {
        token,
        expires_in_secs: state.handoff.ttl().as_secs(),
    })
}

/// Endpoint: POST /auth/handoff/consume
/// Redeems a handoff token. Works exactly once per token.
async fn consume_handoff(
    State(state): State<SharedState>,
    Json(payload): Json<HandoffConsumeRequest>,
) -> Result<Json<HandoffConsumed>, ApiError> {
    let payload = state.handoff.consume(&payload.token)?;
    Ok(Json(HandoffConsumed { payload }))
}
