use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::CredentialId;
use crate::domain::credential::models::EmailAddress;
use crate::domain::credential::ports::CredentialStore;
use crate::domain::profile::models::ProfileId;

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn credential_from_row(row: &PgRow) -> Result<Credential, CredentialError> {
    let email: String = row
        .try_get("email")
        .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;

    Ok(Credential {
        id: CredentialId(
            row.try_get::<Uuid, _>("id")
                .map_err(|e| CredentialError::DatabaseError(e.to_string()))?,
        ),
        account_id: ProfileId(
            row.try_get::<Uuid, _>("account_id")
                .map_err(|e| CredentialError::DatabaseError(e.to_string()))?,
        ),
        email: EmailAddress::new(email)?,
        password_hash: row
            .try_get("password_hash")
            .map_err(|e| CredentialError::DatabaseError(e.to_string()))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| CredentialError::DatabaseError(e.to_string()))?,
    })
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, CredentialError> {
        let row = sqlx::query(
            r#"
            SELECT id, account_id, email, password_hash, created_at
            FROM credentials
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;

        row.as_ref().map(credential_from_row).transpose()
    }

    async fn create(&self, credential: Credential) -> Result<Credential, CredentialError> {
        sqlx::query(
            r#"
            INSERT INTO credentials (id, account_id, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(credential.id.0)
        .bind(credential.account_id.0)
        .bind(credential.email.as_str())
        .bind(&credential.password_hash)
        .bind(credential.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("credentials_email_key")
                {
                    return CredentialError::EmailAlreadyExists(
                        credential.email.as_str().to_string(),
                    );
                }
            }
            CredentialError::DatabaseError(e.to_string())
        })?;

        Ok(credential)
    }
}
