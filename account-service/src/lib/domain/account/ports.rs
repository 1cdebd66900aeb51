use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::EmailAddress;

/// Port for credential lifecycle operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Create a new unverified account and issue a verification code bound
    /// to its email.
    ///
    /// # Returns
    /// The created account and the verification code to surface to the
    /// client
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `Storage` - Store operation failed
    async fn create_account(
        &self,
        command: CreateAccountCommand,
    ) -> Result<(Account, String), AccountError>;

    /// Check credentials and return the matching account.
    ///
    /// Token minting stays with the caller; this operation only proves the
    /// password.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `Mismatch` - Password is wrong
    /// * `Storage` - Store operation failed
    async fn login(&self, email: &EmailAddress, password: &str) -> Result<Account, AccountError>;

    /// Mark the account with this email as verified. One-way; called after
    /// a successful code redemption bound to that email.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `Storage` - Store operation failed
    async fn verify_account(&self, email: &str) -> Result<(), AccountError>;

    /// Issue a password-reset code bound to `email`.
    ///
    /// The email is deliberately not checked against existing accounts
    /// here; it is only checked when the code is consumed.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn request_password_reset(&self, email: &EmailAddress) -> Result<String, AccountError>;

    /// Redeem a reset code and replace the account's password.
    ///
    /// # Errors
    /// * `Otp(NotFound)` - Code absent, expired, or already redeemed
    /// * `NotFound` - No account with the bound email
    /// * `Mismatch` - Old password is wrong
    /// * `Storage` - Store operation failed
    async fn reset_password(
        &self,
        code: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError>;

    /// Issue an email-change code bound to the requested address.
    ///
    /// # Errors
    /// * `NoOp` - Requested email equals the current one
    /// * `AlreadyExists` - Requested email belongs to a verified account
    /// * `Storage` - Store operation failed
    async fn request_email_change(
        &self,
        current_email: &EmailAddress,
        requested_email: &EmailAddress,
    ) -> Result<String, AccountError>;

    /// Redeem an email-change code and overwrite the account's email.
    ///
    /// The account re-enters the unverified state: proving control of the
    /// new address again is required.
    ///
    /// # Errors
    /// * `Otp(NotFound)` - Code absent, expired, or already redeemed
    /// * `NotFound` - Account does not exist
    /// * `AlreadyExists` - Pending email got taken in the meantime
    /// * `Storage` - Store operation failed
    async fn confirm_email_change(
        &self,
        id: &AccountId,
        code: &str,
    ) -> Result<Account, AccountError>;

    /// Persist an avatar URL obtained from the object-storage collaborator.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Storage` - Store operation failed
    async fn update_avatar(&self, id: &AccountId, url: String) -> Result<(), AccountError>;

    /// Retrieve an account by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Storage` - Store operation failed
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;

    /// Retrieve a page of accounts.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn list_accounts(&self, limit: i64, offset: i64) -> Result<Vec<Account>, AccountError>;

    /// Delete an account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Storage` - Store operation failed
    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError>;
}

/// Persistence operations for the account aggregate.
///
/// Email uniqueness is a store-level invariant (UNIQUE constraint), not a
/// check-then-insert in the service; concurrent registrations with the same
/// email cannot both succeed.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `Storage` - Store operation failed
    async fn insert(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by email address.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve a page of accounts, newest first.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Account>, AccountError>;

    /// Set verified = true for the account with this email.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `Storage` - Store operation failed
    async fn set_verified(&self, email: &str) -> Result<(), AccountError>;

    /// Overwrite the account's email and reset its verified flag.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `AlreadyExists` - New email is already registered
    /// * `Storage` - Store operation failed
    async fn update_email(&self, id: &AccountId, email: &str) -> Result<(), AccountError>;

    /// Replace the password hash for the account with this email.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `Storage` - Store operation failed
    async fn update_password(&self, email: &str, password_hash: &str)
        -> Result<(), AccountError>;

    /// Persist the avatar URL.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Storage` - Store operation failed
    async fn update_avatar(&self, id: &AccountId, url: &str) -> Result<(), AccountError>;

    /// Remove an account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Storage` - Store operation failed
    async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;
}
