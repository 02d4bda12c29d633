//! Passwordless email OTP
//!
//! One active code per email, expiring and single-use. Verifying a code
//! yields a bearer session token tied to a stable per-email user id.

use super::AuthError;
use dashmap::DashMap;
use serde::Serialize;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// How long an issued code stays valid.
const OTP_TTL: Duration = Duration::from_secs(10 * 60);

/// An authenticated user, as seen by protected routes.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    /// Stable user id for this email.
    pub id: String,

    /// The verified email address.
    pub email: String,
}

#[derive(Debug)]
struct OtpChallenge {
    code: String,
    issued: Instant,
}

/// OTP challenges and active bearer sessions.
#[derive(Debug)]
pub struct AuthStore {
    challenges: DashMap<String, OtpChallenge>,
    sessions: DashMap<String, AuthUser>,

    /// Maps each email to a stable user id, so repeat sign-ins keep
    /// their identity.
    users: DashMap<String, String>,

    otp_ttl: Duration,
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthStore {
    /// Creates a store with the standard 10-minute OTP expiry.
    pub fn new() -> Self {
        Self::with_otp_ttl(OTP_TTL)
    }

    /// Creates a store with a custom OTP expiry.
    pub fn with_otp_ttl(otp_ttl: Duration) -> Self {
        Self {
            challenges: DashMap::new(),
            sessions: DashMap::new(),
            users: DashMap::new(),
            otp_ttl,
        }
    }

    /// Issues a fresh 6-digit code for `email`, replacing any earlier one.
    ///
    /// Returns the code so the caller can hand it to the delivery
    /// collaborator (here: a debug log line).
    pub fn request_code(&self, email: &str) -> String {
        let code = format!("{:06}", Uuid::new_v4().as_u128() % 1_000_000);
        self.challenges.insert(
            email.to_string(),
            OtpChallenge {
                code: code.clone(),
                issued: Instant::now(),
            },
        );
        code
    }

    /// Verifies a code, consuming it, and opens a bearer session.
    pub fn verify(&self, email: &str, code: &str) -> Result<(String, AuthUser), AuthError> {
        let challenge = self.challenges.get(email).ok_or(AuthError::InvalidOtp)?;

        if challenge.issued.elapsed() >= self.otp_ttl {
            drop(challenge);
            self.challenges.remove(email);
            return Err(AuthError::ExpiredOtp);
        }
        if challenge.code != code {
            return Err(AuthError::InvalidOtp);
        }
        drop(challenge);

        // Codes are single-use.
        self.challenges.remove(email);

        let user_id = self
            .users
            .entry(email.to_string())
            .or_insert_with(|| Uuid::new_v4().simple().to_string())
            .clone();

        let user = AuthUser {
            id: user_id,
            email: email.to_string(),
        };

        let token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(token.clone(), user.clone());

        Ok((token, user))
    }

    /// Resolves a bearer token to its user.
    pub fn user_for_token(&self, token: &str) -> Option<AuthUser> {
        self.sessions.get(token).map(|u| u.clone())
    }
}
