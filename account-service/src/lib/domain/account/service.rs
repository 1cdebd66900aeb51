use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordError;
use auth::PasswordHasher;
use chrono::Duration;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::otp::ports::CodeStore;
use crate::domain::otp::OtpExchange;

/// Credential lifecycle service.
///
/// Orchestrates account creation, login, verification, password reset, and
/// email change by composing the password hasher and the one-time-code
/// exchange against the account repository. All collaborators are injected
/// at construction; the service holds no other shared state.
pub struct AccountService<AR, CS>
where
    AR: AccountRepository,
    CS: CodeStore,
{
    repository: Arc<AR>,
    otp: Arc<OtpExchange<CS>>,
    otp_ttl: Duration,
    password_hasher: PasswordHasher,
}

impl<AR, CS> AccountService<AR, CS>
where
    AR: AccountRepository,
    CS: CodeStore,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `otp` - One-time-code exchange (shared with the inbound layer)
    /// * `otp_ttl` - Validity window for issued codes
    pub fn new(repository: Arc<AR>, otp: Arc<OtpExchange<CS>>, otp_ttl: Duration) -> Self {
        Self {
            repository,
            otp,
            otp_ttl,
            password_hasher: PasswordHasher::new(),
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, AccountError> {
        self.password_hasher
            .hash(password)
            .map_err(AccountError::Password)
    }

    fn check_password(&self, password: &str, stored_hash: &str) -> Result<(), AccountError> {
        self.password_hasher
            .verify(password, stored_hash)
            .map_err(|e| match e {
                PasswordError::Mismatch => AccountError::Mismatch,
                other => AccountError::Password(other),
            })
    }
}

#[async_trait]
impl<AR, CS> AccountServicePort for AccountService<AR, CS>
where
    AR: AccountRepository,
    CS: CodeStore,
{
    async fn create_account(
        &self,
        command: CreateAccountCommand,
    ) -> Result<(Account, String), AccountError> {
        let password_hash = self.hash_password(&command.password)?;

        let now = Utc::now();
        let account = Account {
            id: AccountId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            avatar: None,
            verified: false,
            created_at: now,
            updated_at: now,
        };

        let account = self.repository.insert(account).await?;

        // No rollback: if issuance fails here the account stays persisted
        // as unverified and the client has to request a fresh code.
        let code = self.otp.issue(account.email.as_str(), self.otp_ttl).await?;

        tracing::info!(account_id = %account.id, "Account created");

        Ok((account, code))
    }

    async fn login(&self, email: &EmailAddress, password: &str) -> Result<Account, AccountError> {
        let account = self
            .repository
            .find_by_email(email.as_str())
            .await?
            .ok_or_else(|| AccountError::NotFound(email.to_string()))?;

        self.check_password(password, &account.password_hash)?;

        Ok(account)
    }

    async fn verify_account(&self, email: &str) -> Result<(), AccountError> {
        self.repository.set_verified(email).await
    }

    async fn request_password_reset(&self, email: &EmailAddress) -> Result<String, AccountError> {
        // Existence is only checked when the code is consumed, so this
        // reveals nothing about which emails are registered.
        let code = self.otp.issue(email.as_str(), self.otp_ttl).await?;
        Ok(code)
    }

    async fn reset_password(
        &self,
        code: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        let email = self.otp.redeem(code).await?;

        let account = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AccountError::NotFound(email.clone()))?;

        self.check_password(old_password, &account.password_hash)?;

        let password_hash = self.hash_password(new_password)?;
        self.repository
            .update_password(account.email.as_str(), &password_hash)
            .await?;

        tracing::info!(account_id = %account.id, "Password reset");

        Ok(())
    }

    async fn request_email_change(
        &self,
        current_email: &EmailAddress,
        requested_email: &EmailAddress,
    ) -> Result<String, AccountError> {
        if requested_email == current_email {
            return Err(AccountError::NoOp);
        }

        // A verified holder blocks the change outright. An unverified
        // holder does not; the unique constraint still decides at
        // confirmation time.
        if let Some(existing) = self
            .repository
            .find_by_email(requested_email.as_str())
            .await?
        {
            if existing.verified {
                return Err(AccountError::AlreadyExists(requested_email.to_string()));
            }
        }

        let code = self
            .otp
            .issue(requested_email.as_str(), self.otp_ttl)
            .await?;
        Ok(code)
    }

    async fn confirm_email_change(
        &self,
        id: &AccountId,
        code: &str,
    ) -> Result<Account, AccountError> {
        let pending = self.otp.redeem(code).await?;
        let email = EmailAddress::new(pending)?;

        self.repository.update_email(id, email.as_str()).await?;

        let account = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;

        tracing::info!(account_id = %account.id, "Email changed, verification reset");

        Ok(account)
    }

    async fn update_avatar(&self, id: &AccountId, url: String) -> Result<(), AccountError> {
        self.repository.update_avatar(id, &url).await
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }

    async fn list_accounts(&self, limit: i64, offset: i64) -> Result<Vec<Account>, AccountError> {
        self.repository.list(limit, offset).await
    }

    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError> {
        self.repository.delete(id).await?;

        tracing::info!(account_id = %id, "Account deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::errors::StorageError;
    use crate::domain::otp::errors::OtpError;

    // Define mocks in the test module using mockall
    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn insert(&self, account: Account) -> Result<Account, AccountError>;
            async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;
            async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Account>, AccountError>;
            async fn set_verified(&self, email: &str) -> Result<(), AccountError>;
            async fn update_email(&self, id: &AccountId, email: &str) -> Result<(), AccountError>;
            async fn update_password(&self, email: &str, password_hash: &str) -> Result<(), AccountError>;
            async fn update_avatar(&self, id: &AccountId, url: &str) -> Result<(), AccountError>;
            async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;
        }
    }

    mock! {
        pub TestCodeStore {}

        #[async_trait]
        impl CodeStore for TestCodeStore {
            async fn put(&self, code: &str, value: &str, ttl: Duration) -> Result<(), StorageError>;
            async fn take(&self, code: &str) -> Result<Option<String>, StorageError>;
        }
    }

    fn service(
        repository: MockTestAccountRepository,
        store: MockTestCodeStore,
    ) -> AccountService<MockTestAccountRepository, MockTestCodeStore> {
        let otp = Arc::new(OtpExchange::new(Arc::new(store), 6));
        AccountService::new(Arc::new(repository), otp, Duration::minutes(15))
    }

    fn account_with(email: &str, password_hash: &str, verified: bool) -> Account {
        let now = Utc::now();
        Account {
            id: AccountId::new(),
            name: "Ada".to_string(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: password_hash.to_string(),
            avatar: None,
            verified,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_account_success() {
        let mut repository = MockTestAccountRepository::new();
        let mut store = MockTestCodeStore::new();

        repository
            .expect_insert()
            .withf(|account| {
                account.email.as_str() == "ada@example.com"
                    && !account.verified
                    && account.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(Ok);

        store
            .expect_put()
            .withf(|code, value, _ttl| {
                code.len() == 6
                    && code.chars().all(|c| c.is_ascii_digit())
                    && value == "ada@example.com"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = service(repository, store);

        let command = CreateAccountCommand::new(
            "Ada".to_string(),
            EmailAddress::new("ada@example.com".to_string()).unwrap(),
            "secret7x".to_string(),
        );

        let (account, code) = service.create_account(command).await.unwrap();
        assert_eq!(account.email.as_str(), "ada@example.com");
        assert!(!account.verified);
        assert_eq!(code.len(), 6);
    }

    #[tokio::test]
    async fn test_create_account_duplicate_email() {
        let mut repository = MockTestAccountRepository::new();
        let mut store = MockTestCodeStore::new();

        repository.expect_insert().times(1).returning(|account| {
            Err(AccountError::AlreadyExists(account.email.to_string()))
        });

        store.expect_put().times(0);

        let service = service(repository, store);

        let command = CreateAccountCommand::new(
            "Ada".to_string(),
            EmailAddress::new("ada@example.com".to_string()).unwrap(),
            "secret7x".to_string(),
        );

        let result = service.create_account(command).await;
        assert!(matches!(result, Err(AccountError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repository = MockTestAccountRepository::new();
        let store = MockTestCodeStore::new();

        let hash = PasswordHasher::new().hash("secret7x").unwrap();
        let stored = account_with("ada@example.com", &hash, true);
        let account_id = stored.id;

        repository
            .expect_find_by_email()
            .withf(|email| email == "ada@example.com")
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = service(repository, store);

        let email = EmailAddress::new("ada@example.com".to_string()).unwrap();
        let account = service.login(&email, "secret7x").await.unwrap();
        assert_eq!(account.id, account_id);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestAccountRepository::new();
        let store = MockTestCodeStore::new();

        let hash = PasswordHasher::new().hash("secret7x").unwrap();
        let stored = account_with("ada@example.com", &hash, true);

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = service(repository, store);

        let email = EmailAddress::new("ada@example.com".to_string()).unwrap();
        let result = service.login(&email, "wrongpass").await;
        assert!(matches!(result, Err(AccountError::Mismatch)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repository = MockTestAccountRepository::new();
        let store = MockTestCodeStore::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository, store);

        let email = EmailAddress::new("nobody@example.com".to_string()).unwrap();
        let result = service.login(&email, "secret7x").await;
        assert!(matches!(result, Err(AccountError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_verify_account_delegates_to_repository() {
        let mut repository = MockTestAccountRepository::new();
        let store = MockTestCodeStore::new();

        repository
            .expect_set_verified()
            .withf(|email| email == "ada@example.com")
            .times(1)
            .returning(|_| Ok(()));

        let service = service(repository, store);

        assert!(service.verify_account("ada@example.com").await.is_ok());
    }

    #[tokio::test]
    async fn test_request_password_reset_issues_without_lookup() {
        let repository = MockTestAccountRepository::new();
        let mut store = MockTestCodeStore::new();

        store
            .expect_put()
            .withf(|_, value, _| value == "ada@example.com")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = service(repository, store);

        let email = EmailAddress::new("ada@example.com".to_string()).unwrap();
        let code = service.request_password_reset(&email).await.unwrap();
        assert_eq!(code.len(), 6);
    }

    #[tokio::test]
    async fn test_reset_password_success() {
        let mut repository = MockTestAccountRepository::new();
        let mut store = MockTestCodeStore::new();

        let hash = PasswordHasher::new().hash("secret7x").unwrap();
        let stored = account_with("ada@example.com", &hash, true);

        store
            .expect_take()
            .withf(|code| code == "482913")
            .times(1)
            .returning(|_| Ok(Some("ada@example.com".to_string())));

        repository
            .expect_find_by_email()
            .withf(|email| email == "ada@example.com")
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        repository
            .expect_update_password()
            .withf(|email, password_hash| {
                email == "ada@example.com" && password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = service(repository, store);

        let result = service.reset_password("482913", "secret7x", "n3w_secret").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_reset_password_wrong_old_password() {
        let mut repository = MockTestAccountRepository::new();
        let mut store = MockTestCodeStore::new();

        let hash = PasswordHasher::new().hash("secret7x").unwrap();
        let stored = account_with("ada@example.com", &hash, true);

        store
            .expect_take()
            .times(1)
            .returning(|_| Ok(Some("ada@example.com".to_string())));

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        repository.expect_update_password().times(0);

        let service = service(repository, store);

        let result = service.reset_password("482913", "wrongpass", "n3w_secret").await;
        assert!(matches!(result, Err(AccountError::Mismatch)));
    }

    #[tokio::test]
    async fn test_reset_password_unknown_code() {
        let repository = MockTestAccountRepository::new();
        let mut store = MockTestCodeStore::new();

        store.expect_take().times(1).returning(|_| Ok(None));

        let service = service(repository, store);

        let result = service.reset_password("000000", "secret7x", "n3w_secret").await;
        assert!(matches!(result, Err(AccountError::Otp(OtpError::NotFound))));
    }

    #[tokio::test]
    async fn test_request_email_change_same_email_is_noop() {
        let repository = MockTestAccountRepository::new();
        let store = MockTestCodeStore::new();

        let service = service(repository, store);

        let email = EmailAddress::new("ada@example.com".to_string()).unwrap();
        let result = service.request_email_change(&email, &email).await;
        assert!(matches!(result, Err(AccountError::NoOp)));
    }

    #[tokio::test]
    async fn test_request_email_change_taken_by_verified_account() {
        let mut repository = MockTestAccountRepository::new();
        let store = MockTestCodeStore::new();

        let holder = account_with("bob@example.com", "$argon2id$other", true);

        repository
            .expect_find_by_email()
            .withf(|email| email == "bob@example.com")
            .times(1)
            .returning(move |_| Ok(Some(holder.clone())));

        let service = service(repository, store);

        let current = EmailAddress::new("ada@example.com".to_string()).unwrap();
        let requested = EmailAddress::new("bob@example.com".to_string()).unwrap();
        let result = service.request_email_change(&current, &requested).await;
        assert!(matches!(result, Err(AccountError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_request_email_change_success() {
        let mut repository = MockTestAccountRepository::new();
        let mut store = MockTestCodeStore::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        store
            .expect_put()
            .withf(|_, value, _| value == "bob@example.com")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = service(repository, store);

        let current = EmailAddress::new("ada@example.com".to_string()).unwrap();
        let requested = EmailAddress::new("bob@example.com".to_string()).unwrap();
        let code = service.request_email_change(&current, &requested).await.unwrap();
        assert_eq!(code.len(), 6);
    }

    #[tokio::test]
    async fn test_confirm_email_change_success() {
        let mut repository = MockTestAccountRepository::new();
        let mut store = MockTestCodeStore::new();

        let mut updated = account_with("bob@example.com", "$argon2id$hash", false);
        let account_id = updated.id;
        updated.verified = false;

        store
            .expect_take()
            .withf(|code| code == "111222")
            .times(1)
            .returning(|_| Ok(Some("bob@example.com".to_string())));

        repository
            .expect_update_email()
            .withf(move |id, email| *id == account_id && email == "bob@example.com")
            .times(1)
            .returning(|_, _| Ok(()));

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(updated.clone())));

        let service = service(repository, store);

        let account = service.confirm_email_change(&account_id, "111222").await.unwrap();
        assert_eq!(account.email.as_str(), "bob@example.com");
        assert!(!account.verified);
    }

    #[tokio::test]
    async fn test_confirm_email_change_unknown_code() {
        let repository = MockTestAccountRepository::new();
        let mut store = MockTestCodeStore::new();

        store.expect_take().times(1).returning(|_| Ok(None));

        let service = service(repository, store);

        let result = service.confirm_email_change(&AccountId::new(), "111222").await;
        assert!(matches!(result, Err(AccountError::Otp(OtpError::NotFound))));
    }

    #[tokio::test]
    async fn test_get_account_not_found() {
        let mut repository = MockTestAccountRepository::new();
        let store = MockTestCodeStore::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository, store);

        let result = service.get_account(&AccountId::new()).await;
        assert!(matches!(result, Err(AccountError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_accounts_passes_page_through() {
        let mut repository = MockTestAccountRepository::new();
        let store = MockTestCodeStore::new();

        repository
            .expect_list()
            .with(eq(10), eq(20))
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = service(repository, store);

        let accounts = service.list_accounts(10, 20).await.unwrap();
        assert!(accounts.is_empty());
    }

    #[tokio::test]
    async fn test_delete_account() {
        let mut repository = MockTestAccountRepository::new();
        let store = MockTestCodeStore::new();

        let id = AccountId::new();
        repository
            .expect_delete()
            .withf(move |got| *got == id)
            .times(1)
            .returning(|_| Ok(()));

        let service = service(repository, store);

        assert!(service.delete_account(&id).await.is_ok());
    }
}
