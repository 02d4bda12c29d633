//! Handoff tokens
//!
//! Short-lived, single-consumer tokens that carry a payload across a
//! redirect round-trip (e.g. "resume checkout for cart X" around an OAuth
//! hop). The token resolves exactly once and expires on its own; this
//! replaces untyped "pending checkout" flags left in ambient storage.

use super::AuthError;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// How long an issued handoff token stays redeemable.
const HANDOFF_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug)]
struct HandoffEntry {
    payload: String,
    issued: Instant,
}

/// Storage for pending handoff tokens.
#[derive(Debug)]
pub struct HandoffStore {
    tokens: DashMap<String, HandoffEntry>,
    ttl: Duration,
}

impl Default for HandoffStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HandoffStore {
    /// Creates a store with the standard 5-minute expiry.
    pub fn new() -> Self {
        Self::with_ttl(HANDOFF_TTL)
    }

    /// Creates a store with a custom expiry.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            tokens: DashMap::new(),
            ttl,
        }
    }

    /// The configured expiry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token carrying `payload`.
    pub fn issue(&self, payload: String) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.tokens.insert(
            token.clone(),
            HandoffEntry {
                payload,
                issued: Instant::now(),
            },
        );
        token
    }

    /// Redeems a token, returning its payload.
    ///
    /// Consuming removes the token: a second consume, or a consume after
    /// expiry, fails the same way an unknown token does.
    pub fn consume(&self, token: &str) -> Result<String, AuthError> {
        let (_, entry) = self.tokens.remove(token).ok_or(AuthError::HandoffInvalid)?;

        if entry.issued.elapsed() >= self.ttl {
            return Err(AuthError::HandoffInvalid);
        }

        Ok(entry.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_resolves_exactly_once() {
        let store = HandoffStore::new();
        let token = store.issue("cart-42".into());

        assert_eq!(store.consume(&token).unwrap(), "cart-42");
        assert_eq!(store.consume(&token), Err(AuthError::HandoffInvalid));
    }

    #[test]
    fn expired_token_is_rejected() {
        let store = HandoffStore::with_ttl(Duration::ZERO);
        let token = store.issue("cart-42".into());

        assert_eq!(store.consume(&token), Err(AuthError::HandoffInvalid));
    }

    #[test]
    fn unknown_token_is_rejected() {
        let store = HandoffStore::new();
        assert_eq!(store.consume("nope"), Err(AuthError::HandoffInvalid));
    }
}
