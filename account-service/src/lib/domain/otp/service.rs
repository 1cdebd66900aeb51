use std::sync::Arc;

use chrono::Duration;
use rand::Rng;

use crate::domain::otp::errors::OtpError;
use crate::domain::otp::ports::CodeStore;

/// Produce a fixed-length string of decimal digits.
///
/// Not cryptographically hardened; uniqueness across outstanding codes is
/// not guaranteed (collision probability 1/10^length per issuance, and a
/// collision re-binds the code).
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length).map(|_| rng.gen_range('0'..='9')).collect()
}

/// One-time code exchange.
///
/// Binds short numeric codes to an action payload (an email address) in an
/// ephemeral store, and resolves a code back to its payload exactly once.
pub struct OtpExchange<S>
where
    S: CodeStore,
{
    store: Arc<S>,
    code_length: usize,
}

impl<S> OtpExchange<S>
where
    S: CodeStore,
{
    /// Create a new exchange over an ephemeral code store.
    ///
    /// # Arguments
    /// * `store` - Ephemeral key-value store implementation
    /// * `code_length` - Number of decimal digits per code
    pub fn new(store: Arc<S>, code_length: usize) -> Self {
        Self { store, code_length }
    }

    /// Generate a fresh code and bind it to `bound_email` for `ttl`.
    ///
    /// # Errors
    /// * `Storage` - Store write failed
    pub async fn issue(&self, bound_email: &str, ttl: Duration) -> Result<String, OtpError> {
        let code = generate_code(self.code_length);
        self.store.put(&code, bound_email, ttl).await?;

        tracing::debug!(ttl_minutes = ttl.num_minutes(), "One-time code issued");

        Ok(code)
    }

    /// Resolve a code back to its bound email, invalidating it.
    ///
    /// # Errors
    /// * `NotFound` - Code absent, expired, or already redeemed
    /// * `Storage` - Store read failed
    pub async fn redeem(&self, code: &str) -> Result<String, OtpError> {
        self.store.take(code).await?.ok_or(OtpError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use chrono::DateTime;
    use chrono::Utc;
    use tokio::sync::Mutex;

    use super::*;
    use crate::domain::errors::StorageError;

    /// In-memory stand-in for the ephemeral store, with real expiry and
    /// delete-on-read semantics.
    #[derive(Default)]
    struct InMemoryCodeStore {
        entries: Mutex<HashMap<String, (String, DateTime<Utc>)>>,
    }

    #[async_trait]
    impl CodeStore for InMemoryCodeStore {
        async fn put(&self, code: &str, value: &str, ttl: Duration) -> Result<(), StorageError> {
            self.entries
                .lock()
                .await
                .insert(code.to_string(), (value.to_string(), Utc::now() + ttl));
            Ok(())
        }

        async fn take(&self, code: &str) -> Result<Option<String>, StorageError> {
            let entry = self.entries.lock().await.remove(code);
            Ok(entry
                .filter(|(_, expires_at)| *expires_at > Utc::now())
                .map(|(value, _)| value))
        }
    }

    #[test]
    fn test_generate_code_is_fixed_length_decimal() {
        for length in [4, 6, 8] {
            let code = generate_code(length);
            assert_eq!(code.len(), length);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[tokio::test]
    async fn test_issue_then_redeem_returns_bound_email() {
        let exchange = OtpExchange::new(Arc::new(InMemoryCodeStore::default()), 6);

        let code = exchange
            .issue("a@example.com", Duration::minutes(10))
            .await
            .expect("Failed to issue code");
        assert_eq!(code.len(), 6);

        let email = exchange.redeem(&code).await.expect("Failed to redeem code");
        assert_eq!(email, "a@example.com");
    }

    #[tokio::test]
    async fn test_redeem_is_single_use() {
        let exchange = OtpExchange::new(Arc::new(InMemoryCodeStore::default()), 6);

        let code = exchange
            .issue("a@example.com", Duration::minutes(10))
            .await
            .expect("Failed to issue code");

        exchange.redeem(&code).await.expect("Failed to redeem code");

        // Invalidated on first successful redemption
        let result = exchange.redeem(&code).await;
        assert_eq!(result, Err(OtpError::NotFound));
    }

    #[tokio::test]
    async fn test_redeem_expired_code() {
        let exchange = OtpExchange::new(Arc::new(InMemoryCodeStore::default()), 6);

        let code = exchange
            .issue("a@example.com", Duration::minutes(-1))
            .await
            .expect("Failed to issue code");

        let result = exchange.redeem(&code).await;
        assert_eq!(result, Err(OtpError::NotFound));
    }

    #[tokio::test]
    async fn test_redeem_never_issued_code() {
        let exchange = OtpExchange::new(Arc::new(InMemoryCodeStore::default()), 6);

        let result = exchange.redeem("000000").await;
        assert_eq!(result, Err(OtpError::NotFound));
    }
}
