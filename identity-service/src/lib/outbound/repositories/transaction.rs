use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::Transaction;

use crate::domain::profile::models::ProfileId;
use crate::domain::profile::models::ProfileUpdate;
use crate::domain::session::models::Session;
use crate::domain::transaction::StoreWrite;
use crate::domain::transaction::TransactionCoordinator;
use crate::domain::transaction::TransactionError;
use crate::outbound::repositories::session::insert_session_sql;

/// Runs a unit of work inside a single database transaction.
///
/// Every write in the set executes against the same transaction; the first
/// failure aborts it and nothing is committed (the transaction rolls back on
/// drop). The underlying error is carried to the caller untranslated.
pub struct PostgresTransactionCoordinator {
    pool: PgPool,
}

impl PostgresTransactionCoordinator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn apply(
        tx: &mut Transaction<'_, Postgres>,
        write: StoreWrite,
    ) -> Result<(), TransactionError> {
        match write {
            StoreWrite::CreateSession(session) => Self::create_session(tx, session).await,
            StoreWrite::UpdateProfile { id, update } => {
                Self::update_profile(tx, id, update).await
            }
        }
    }

    async fn create_session(
        tx: &mut Transaction<'_, Postgres>,
        session: Session,
    ) -> Result<(), TransactionError> {
        sqlx::query(insert_session_sql())
            .bind(session.id.0)
            .bind(session.account_id.0)
            .bind(&session.refresh_token_hash)
            .bind(session.expires_at)
            .bind(&session.ip_address)
            .bind(&session.user_agent)
            .bind(session.created_at)
            .execute(&mut **tx)
            .await
            .map_err(|e| TransactionError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn update_profile(
        tx: &mut Transaction<'_, Postgres>,
        id: ProfileId,
        update: ProfileUpdate,
    ) -> Result<(), TransactionError> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                status = COALESCE($4, status),
                login_count = COALESCE($5, login_count)
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(update.first_name)
        .bind(update.last_name)
        .bind(update.status.map(|s| s.as_str()))
        .bind(update.login_count)
        .execute(&mut **tx)
        .await
        .map_err(|e| TransactionError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TransactionError::ProfileNotFound(id.to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl TransactionCoordinator for PostgresTransactionCoordinator {
    async fn run(&self, writes: Vec<StoreWrite>) -> Result<(), TransactionError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| TransactionError::DatabaseError(e.to_string()))?;

        for write in writes {
            if let Err(e) = Self::apply(&mut tx, write).await {
                tracing::error!(error = %e, "Rolling back transaction");
                return Err(e);
            }
        }

        tx.commit()
            .await
            .map_err(|e| TransactionError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
