use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Content embedded in a session token.
///
/// Statelessly reconstructed on every verification; never stored server-side.
/// Timestamps are Unix seconds so the `exp` claim is checked by the decoder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPayload {
    /// Account identifier (subject)
    pub sub: Uuid,

    /// Email the account was authenticated with
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenPayload {
    /// Build a payload valid for `duration` starting now.
    pub fn new(account_id: Uuid, email: impl Into<String>, duration: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: account_id,
            email: email.into(),
            iat: now.timestamp(),
            exp: (now + duration).timestamp(),
        }
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or_default()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }

    /// Check whether the payload is past its validity window.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_payload_window() {
        let id = Uuid::new_v4();
        let payload = TokenPayload::new(id, "ada@example.com", Duration::hours(2));

        assert_eq!(payload.sub, id);
        assert_eq!(payload.email, "ada@example.com");
        assert_eq!(payload.exp - payload.iat, 2 * 60 * 60);
    }

    #[test]
    fn test_is_expired() {
        let mut payload = TokenPayload::new(Uuid::new_v4(), "ada@example.com", Duration::hours(1));
        payload.iat = 1000;
        payload.exp = 2000;

        assert!(!payload.is_expired(1999));
        assert!(!payload.is_expired(2000)); // exactly at expiration
        assert!(payload.is_expired(2001));
    }
}
