use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountRepository;
use crate::domain::errors::StorageError;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn account_from_row(row: &PgRow) -> Result<Account, AccountError> {
    Ok(Account {
        id: AccountId(row.try_get("id").map_err(storage)?),
        name: row.try_get("name").map_err(storage)?,
        email: EmailAddress::new(row.try_get("email").map_err(storage)?)?,
        password_hash: row.try_get("password_hash").map_err(storage)?,
        avatar: row.try_get("avatar").map_err(storage)?,
        verified: row.try_get("verified").map_err(storage)?,
        created_at: row.try_get("created_at").map_err(storage)?,
        updated_at: row.try_get("updated_at").map_err(storage)?,
    })
}

fn storage(e: sqlx::Error) -> StorageError {
    StorageError(e.to_string())
}

/// Map an insert/update failure, turning a violation of the email UNIQUE
/// constraint into `AlreadyExists`.
fn map_write_error(e: sqlx::Error, email: &str) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("accounts_email_key") {
            return AccountError::AlreadyExists(email.to_string());
        }
    }
    AccountError::Storage(storage(e))
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn insert(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, name, email, password_hash, avatar, verified, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(account.id.0)
        .bind(&account.name)
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(&account.avatar)
        .bind(account.verified)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, account.email.as_str()))?;

        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, avatar, verified, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, avatar, verified, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Account>, AccountError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, avatar, verified, created_at, updated_at
            FROM accounts
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        rows.iter().map(account_from_row).collect()
    }

    async fn set_verified(&self, email: &str) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET verified = TRUE, updated_at = now()
            WHERE email = $1
            "#,
        )
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(email.to_string()));
        }

        Ok(())
    }

    async fn update_email(&self, id: &AccountId, email: &str) -> Result<(), AccountError> {
        // The new address has not been proven yet, so verified drops with it.
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET email = $2, verified = FALSE, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, email))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn update_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET password_hash = $2, updated_at = now()
            WHERE email = $1
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(email.to_string()));
        }

        Ok(())
    }

    async fn update_avatar(&self, id: &AccountId, url: &str) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET avatar = $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(url)
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            DELETE FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
