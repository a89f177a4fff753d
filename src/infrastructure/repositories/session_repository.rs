use crate::infrastructure::db::DbPool;
use crate::{domain::auth::User, error::AppResult};
use std::sync::Arc;

/// The signed-in user lives in a single slot, like a browser's local storage entry
const USER_SLOT: &str = "user";

pub struct SessionRepository {
    pool: Arc<DbPool>,
}

impl SessionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Load the persisted user, if any.
    /// A payload that cannot be decoded is reported as an error.
    pub async fn load(&self) -> AppResult<Option<User>> {
        let pool = self.pool.as_ref();
        let payload = sqlx::query_scalar::<_, String>(
            r#"
            SELECT payload
            FROM sessions
            WHERE slot = ?1
            "#,
        )
        .bind(USER_SLOT)
        .fetch_optional(pool)
        .await?;

        match payload {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    /// Persist the signed-in user, replacing any previous one
    pub async fn save(&self, user: &User) -> AppResult<()> {
        let pool = self.pool.as_ref();
        let payload = serde_json::to_string(user)?;

        sqlx::query(
            r#"
            INSERT INTO sessions (slot, payload)
            VALUES (?1, ?2)
            ON CONFLICT (slot) DO UPDATE SET payload = excluded.payload
            "#,
        )
        .bind(USER_SLOT)
        .bind(payload)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Forget the signed-in user
    pub async fn clear(&self) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE slot = ?1
            "#,
        )
        .bind(USER_SLOT)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
