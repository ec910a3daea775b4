// SQLite SessionStore Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use queueboard_core::port::{SessionStore, TimeProvider};
use queueboard_core::Result;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, info};

const UPSERT_SQL: &str = r#"
    INSERT INTO session_entries (session_id, key, value, updated_at)
    VALUES (?, ?, ?, ?)
    ON CONFLICT (session_id, key)
    DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
"#;

/// Session store backed by the `session_entries` table.
///
/// Every instance is scoped to one session id; sessions sharing a database
/// never see each other's keys.
pub struct SqliteSessionStore {
    pool: SqlitePool,
    session_id: String,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteSessionStore {
    pub fn new(
        pool: SqlitePool,
        session_id: impl Into<String>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            pool,
            session_id: session_id.into(),
            time_provider,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Discard everything stored for this session
    ///
    /// # Returns
    /// Number of keys deleted
    pub async fn end_session(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM session_entries WHERE session_id = ?")
            .bind(&self.session_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        info!(
            session_id = %self.session_id,
            keys = result.rows_affected(),
            "Session ended"
        );
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        sqlx::query_scalar("SELECT value FROM session_entries WHERE session_id = ? AND key = ?")
            .bind(&self.session_id)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = self.time_provider.now_millis();

        sqlx::query(UPSERT_SQL)
            .bind(&self.session_id)
            .bind(key)
            .bind(value)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(session_id = %self.session_id, key, bytes = value.len(), "Session key written");
        Ok(())
    }

    async fn set_many(&self, entries: &[(String, String)]) -> Result<()> {
        let now = self.time_provider.now_millis();
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        for (key, value) in entries {
            sqlx::query(UPSERT_SQL)
                .bind(&self.session_id)
                .bind(key)
                .bind(value)
                .bind(now)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        }

        tx.commit().await.map_err(map_sqlx_error)?;

        debug!(session_id = %self.session_id, keys = entries.len(), "Session keys written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations};
    use queueboard_core::AppError;

    struct FixedTime(i64);

    impl TimeProvider for FixedTime {
        fn now_millis(&self) -> i64 {
            self.0
        }
    }

    async fn setup() -> SqlitePool {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let pool = setup().await;
        let store = SqliteSessionStore::new(pool, "tab-1", Arc::new(FixedTime(1000)));

        assert_eq!(store.get("queue").await.unwrap(), None);
        store.set("queue", r#"["A"]"#).await.unwrap();
        store.set("queue", r#"["A","B"]"#).await.unwrap();
        assert_eq!(
            store.get("queue").await.unwrap().as_deref(),
            Some(r#"["A","B"]"#)
        );
    }

    #[tokio::test]
    async fn test_set_records_update_time() {
        let pool = setup().await;
        let store = SqliteSessionStore::new(pool.clone(), "tab-1", Arc::new(FixedTime(4242)));
        store.set("history", "[]").await.unwrap();

        let updated_at: i64 = sqlx::query_scalar(
            "SELECT updated_at FROM session_entries WHERE session_id = 'tab-1' AND key = 'history'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(updated_at, 4242);
    }

    #[tokio::test]
    async fn test_set_many_writes_all_keys() {
        let pool = setup().await;
        let store = SqliteSessionStore::new(pool, "tab-1", Arc::new(FixedTime(1)));
        store.set("history", r#"[{"value":"B","index":1}]"#).await.unwrap();

        store
            .set_many(&[
                ("queue".to_string(), r#"["A"]"#.to_string()),
                ("history".to_string(), "[]".to_string()),
            ])
            .await
            .unwrap();

        assert_eq!(store.get("queue").await.unwrap().as_deref(), Some(r#"["A"]"#));
        assert_eq!(store.get("history").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_set_many_is_all_or_nothing() {
        let pool = setup().await;
        sqlx::query(
            r#"
            CREATE TRIGGER reject_history BEFORE INSERT ON session_entries
            WHEN NEW.key = 'history'
            BEGIN
                SELECT RAISE(ABORT, 'history rejected');
            END
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();
        let store = SqliteSessionStore::new(pool, "tab-1", Arc::new(FixedTime(1)));

        let result = store
            .set_many(&[
                ("queue".to_string(), r#"["A"]"#.to_string()),
                ("history".to_string(), "[]".to_string()),
            ])
            .await;

        assert!(matches!(result, Err(AppError::Storage(_))));
        assert_eq!(store.get("queue").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let pool = setup().await;
        let first = SqliteSessionStore::new(pool.clone(), "tab-1", Arc::new(FixedTime(1)));
        let second = SqliteSessionStore::new(pool, "tab-2", Arc::new(FixedTime(1)));

        first.set("queue", r#"["A"]"#).await.unwrap();
        assert_eq!(second.get("queue").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_end_session() {
        let pool = setup().await;
        let first = SqliteSessionStore::new(pool.clone(), "tab-1", Arc::new(FixedTime(1)));
        let second = SqliteSessionStore::new(pool, "tab-2", Arc::new(FixedTime(1)));

        first.set("queue", "[]").await.unwrap();
        first.set("history", "[]").await.unwrap();
        second.set("queue", "[]").await.unwrap();

        assert_eq!(first.end_session().await.unwrap(), 2);
        assert_eq!(first.get("queue").await.unwrap(), None);
        assert_eq!(second.get("queue").await.unwrap().as_deref(), Some("[]"));
    }
}
