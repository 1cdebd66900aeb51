use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::errors::StorageError;
use crate::domain::otp::ports::CodeStore;

/// Ephemeral code store backed by the `otp_codes` table.
///
/// Redemption is a single `DELETE ... RETURNING`, so look-up and
/// invalidation happen atomically at the store: two concurrent redemptions
/// of the same code cannot both succeed. Expired rows are filtered in the
/// same statement and get overwritten or cleaned up opportunistically.
pub struct PostgresCodeStore {
    pool: PgPool,
}

impl PostgresCodeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CodeStore for PostgresCodeStore {
    async fn put(&self, code: &str, value: &str, ttl: Duration) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO otp_codes (code, bound_email, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (code)
            DO UPDATE SET bound_email = EXCLUDED.bound_email, expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(code)
        .bind(value)
        .bind(Utc::now() + ttl)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError(e.to_string()))?;

        Ok(())
    }

    async fn take(&self, code: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query(
            r#"
            DELETE FROM otp_codes
            WHERE code = $1 AND expires_at > now()
            RETURNING bound_email
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError(e.to_string()))?;

        row.map(|r| r.try_get("bound_email"))
            .transpose()
            .map_err(|e| StorageError(e.to_string()))
    }
}
