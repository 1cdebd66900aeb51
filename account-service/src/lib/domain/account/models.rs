use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::errors::AccountIdError;
use crate::domain::account::errors::EmailError;

/// Account aggregate entity.
///
/// Owned by the document store; mutated only through the credential
/// lifecycle service. An account starts unverified and flips to verified
/// exactly once, via one-time-code redemption bound to its own email.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: EmailAddress,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Stored and
/// compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new account with domain types
#[derive(Debug)]
pub struct CreateAccountCommand {
    pub name: String,
    pub email: EmailAddress,
    pub password: String,
}

impl CreateAccountCommand {
    /// Construct a new create account command.
    ///
    /// # Arguments
    /// * `name` - Display name
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by the service)
    pub fn new(name: String, email: EmailAddress, password: String) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_roundtrip() {
        let id = AccountId::new();
        let parsed = AccountId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_account_id_rejects_garbage() {
        let result = AccountId::from_string("not-a-uuid");
        assert!(matches!(result, Err(AccountIdError::InvalidFormat(_))));
    }

    #[test]
    fn test_email_address_valid() {
        let email = EmailAddress::new("ada@example.com".to_string()).unwrap();
        assert_eq!(email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_email_address_invalid() {
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::new("".to_string()).is_err());
    }
}
