use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::profile::models::ProfileId;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;
use crate::domain::session::models::SessionFilter;
use crate::domain::session::models::SessionId;
use crate::domain::session::ports::SessionStore;

pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn session_from_row(row: &PgRow) -> Result<Session, SessionError> {
    Ok(Session {
        id: SessionId(
            row.try_get::<Uuid, _>("id")
                .map_err(|e| SessionError::DatabaseError(e.to_string()))?,
        ),
        account_id: ProfileId(
            row.try_get::<Uuid, _>("account_id")
                .map_err(|e| SessionError::DatabaseError(e.to_string()))?,
        ),
        refresh_token_hash: row
            .try_get("refresh_token_hash")
            .map_err(|e| SessionError::DatabaseError(e.to_string()))?,
        expires_at: row
            .try_get::<DateTime<Utc>, _>("expires_at")
            .map_err(|e| SessionError::DatabaseError(e.to_string()))?,
        ip_address: row
            .try_get("ip_address")
            .map_err(|e| SessionError::DatabaseError(e.to_string()))?,
        user_agent: row
            .try_get("user_agent")
            .map_err(|e| SessionError::DatabaseError(e.to_string()))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| SessionError::DatabaseError(e.to_string()))?,
    })
}

pub(crate) fn insert_session_sql() -> &'static str {
    r#"
    INSERT INTO sessions (id, account_id, refresh_token_hash, expires_at, ip_address, user_agent, created_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    "#
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, SessionError> {
        let row = sqlx::query(
            r#"
            SELECT id, account_id, refresh_token_hash, expires_at, ip_address, user_agent, created_at
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        row.as_ref().map(session_from_row).transpose()
    }

    async fn find_one(&self, filter: &SessionFilter) -> Result<Option<Session>, SessionError> {
        // NULL-tolerant filter: unset fields match every row
        let row = sqlx::query(
            r#"
            SELECT id, account_id, refresh_token_hash, expires_at, ip_address, user_agent, created_at
            FROM sessions
            WHERE ($1::uuid IS NULL OR id = $1)
              AND ($2::uuid IS NULL OR account_id = $2)
            LIMIT 1
            "#,
        )
        .bind(filter.id.map(|id| id.0))
        .bind(filter.account_id.map(|id| id.0))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        row.as_ref().map(session_from_row).transpose()
    }

    async fn create(&self, session: Session) -> Result<(), SessionError> {
        sqlx::query(insert_session_sql())
            .bind(session.id.0)
            .bind(session.account_id.0)
            .bind(&session.refresh_token_hash)
            .bind(session.expires_at)
            .bind(&session.ip_address)
            .bind(&session.user_agent)
            .bind(session.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn remove(&self, id: &SessionId) -> Result<bool, SessionError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_matching(
        &self,
        id: &SessionId,
        refresh_token_hash: &str,
    ) -> Result<bool, SessionError> {
        // Conditional delete: a no-op if the row was already replaced or
        // removed by a concurrent request
        let result =
            sqlx::query("DELETE FROM sessions WHERE id = $1 AND refresh_token_hash = $2")
                .bind(id.0)
                .bind(refresh_token_hash)
                .execute(&self.pool)
                .await
                .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_all_for_account(&self, account_id: &ProfileId) -> Result<u64, SessionError> {
        let result = sqlx::query("DELETE FROM sessions WHERE account_id = $1")
            .bind(account_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| SessionError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
