use crate::domain::likes::{LikeSet, LikeStore};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;

/// SQLite-backed like sets, one row per storage key
pub struct LikeRepository {
    pool: Arc<DbPool>,
}

impl LikeRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeStore for LikeRepository {
    async fn get(&self, key: &str) -> AppResult<LikeSet> {
        let pool = self.pool.as_ref();
        let liked_ids = sqlx::query_scalar::<_, String>(
            r#"
            SELECT liked_ids
            FROM user_likes
            WHERE key = ?1
            "#,
        )
        .bind(key)
        .fetch_optional(pool)
        .await?;

        match liked_ids {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(LikeSet::new()),
        }
    }

    async fn set(&self, key: &str, likes: &LikeSet) -> AppResult<()> {
        let pool = self.pool.as_ref();
        let liked_ids = serde_json::to_string(likes)?;
        let now = chrono::Utc::now();

        sqlx::query(
            r#"
            INSERT INTO user_likes (key, liked_ids, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (key) DO UPDATE
            SET liked_ids = excluded.liked_ids, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(liked_ids)
        .bind(now)
        .execute(pool)
        .await?;

        Ok(())
    }
}
