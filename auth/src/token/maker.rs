use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::errors::TokenError;
use super::payload::TokenPayload;

/// Maker for signed, expiring session tokens.
///
/// The sole authority for proving "this request belongs to this account".
/// Uses HS256 (HMAC with SHA-256) over a server-held symmetric key.
pub struct TokenMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenMaker {
    /// Required key size in bytes.
    pub const KEY_LENGTH: usize = 32;

    /// Create a new token maker with a symmetric signing key.
    ///
    /// # Arguments
    /// * `key` - Secret key, exactly 32 bytes (store in environment or vault, never in code)
    ///
    /// # Errors
    /// * `InvalidKeyLength` - Key is not exactly 32 bytes
    pub fn new(key: &[u8]) -> Result<Self, TokenError> {
        if key.len() != Self::KEY_LENGTH {
            return Err(TokenError::InvalidKeyLength {
                expected: Self::KEY_LENGTH,
                actual: key.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(key),
            decoding_key: DecodingKey::from_secret(key),
            algorithm: Algorithm::HS256,
        })
    }

    /// Create a signed token for an account, valid for `duration`.
    ///
    /// The embedded payload carries `issued_at = now` and
    /// `expires_at = now + duration`. Output is an opaque string safe to
    /// hand to a client.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn create_token(
        &self,
        account_id: Uuid,
        email: &str,
        duration: Duration,
    ) -> Result<String, TokenError> {
        let payload = TokenPayload::new(account_id, email, duration);
        let header = Header::new(self.algorithm);

        encode(&header, &payload, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Decode and authenticate a token.
    ///
    /// # Returns
    /// The embedded payload, unchanged
    ///
    /// # Errors
    /// * `ExpiredToken` - Validity window has passed
    /// * `InvalidToken` - Signature check failed or structure is malformed
    pub fn verify_token(&self, token: &str) -> Result<TokenPayload, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // No clock slack: a token one second past its window is expired.
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data =
            decode::<TokenPayload>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::ExpiredToken,
                    _ => TokenError::InvalidToken,
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    const KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn test_rejects_short_key() {
        let result = TokenMaker::new(b"too_short");
        assert_eq!(
            result.err(),
            Some(TokenError::InvalidKeyLength {
                expected: 32,
                actual: 9
            })
        );
    }

    #[test]
    fn test_rejects_long_key() {
        let result = TokenMaker::new(b"0123456789abcdef0123456789abcdef0");
        assert!(matches!(
            result.err(),
            Some(TokenError::InvalidKeyLength { actual: 33, .. })
        ));
    }

    #[test]
    fn test_create_and_verify() {
        let maker = TokenMaker::new(KEY).expect("Failed to create maker");
        let account_id = Uuid::new_v4();

        let token = maker
            .create_token(account_id, "ada@example.com", Duration::minutes(30))
            .expect("Failed to create token");
        assert!(!token.is_empty());

        let payload = maker.verify_token(&token).expect("Failed to verify token");
        assert_eq!(payload.sub, account_id);
        assert_eq!(payload.email, "ada@example.com");

        let now = Utc::now().timestamp();
        assert!(payload.iat <= now);
        assert!(now <= payload.exp);
        assert_eq!(payload.exp - payload.iat, 30 * 60);
    }

    #[test]
    fn test_verify_expired_token() {
        let maker = TokenMaker::new(KEY).expect("Failed to create maker");

        // Window already in the past
        let token = maker
            .create_token(Uuid::new_v4(), "ada@example.com", Duration::seconds(-10))
            .expect("Failed to create token");

        let result = maker.verify_token(&token);
        assert_eq!(result.err(), Some(TokenError::ExpiredToken));
    }

    #[test]
    fn test_verify_corrupted_token() {
        let maker = TokenMaker::new(KEY).expect("Failed to create maker");

        let token = maker
            .create_token(Uuid::new_v4(), "ada@example.com", Duration::minutes(5))
            .expect("Failed to create token");

        let mut corrupted = token.clone();
        corrupted.push('x');
        assert_eq!(maker.verify_token(&corrupted).err(), Some(TokenError::InvalidToken));

        let truncated = &token[..token.len() / 2];
        assert_eq!(maker.verify_token(truncated).err(), Some(TokenError::InvalidToken));

        assert_eq!(
            maker.verify_token("not.a.token").err(),
            Some(TokenError::InvalidToken)
        );
    }

    #[test]
    fn test_verify_with_wrong_key() {
        let maker1 = TokenMaker::new(KEY).expect("Failed to create maker");
        let maker2 = TokenMaker::new(b"another_key_of_exactly_32_bytes!").expect("Failed to create maker");

        let token = maker1
            .create_token(Uuid::new_v4(), "ada@example.com", Duration::minutes(5))
            .expect("Failed to create token");

        assert_eq!(maker2.verify_token(&token).err(), Some(TokenError::InvalidToken));
    }
}
