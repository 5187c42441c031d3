use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::AccountStatus;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileId;
use crate::domain::profile::models::ProfileUpdate;
use crate::domain::profile::ports::ProfileStore;

pub struct PostgresProfileStore {
    pool: PgPool,
}

impl PostgresProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn profile_from_row(row: &PgRow) -> Result<Profile, ProfileError> {
    let status: String = row
        .try_get("status")
        .map_err(|e| ProfileError::DatabaseError(e.to_string()))?;

    Ok(Profile {
        id: ProfileId(
            row.try_get::<Uuid, _>("id")
                .map_err(|e| ProfileError::DatabaseError(e.to_string()))?,
        ),
        first_name: row
            .try_get("first_name")
            .map_err(|e| ProfileError::DatabaseError(e.to_string()))?,
        last_name: row
            .try_get("last_name")
            .map_err(|e| ProfileError::DatabaseError(e.to_string()))?,
        status: AccountStatus::from_str(&status)?,
        login_count: row
            .try_get("login_count")
            .map_err(|e| ProfileError::DatabaseError(e.to_string()))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| ProfileError::DatabaseError(e.to_string()))?,
    })
}

#[async_trait]
impl ProfileStore for PostgresProfileStore {
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileError> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, status, login_count, created_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProfileError::DatabaseError(e.to_string()))?;

        row.as_ref().map(profile_from_row).transpose()
    }

    async fn create(&self, profile: Profile) -> Result<Profile, ProfileError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, first_name, last_name, status, login_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(profile.id.0)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.status.as_str())
        .bind(profile.login_count)
        .bind(profile.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ProfileError::DatabaseError(e.to_string()))?;

        Ok(profile)
    }

    async fn update(
        &self,
        id: &ProfileId,
        update: ProfileUpdate,
    ) -> Result<Profile, ProfileError> {
        let row = sqlx::query(
            r#"
            UPDATE profiles
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                status = COALESCE($4, status),
                login_count = COALESCE($5, login_count)
            WHERE id = $1
            RETURNING id, first_name, last_name, status, login_count, created_at
            "#,
        )
        .bind(id.0)
        .bind(update.first_name)
        .bind(update.last_name)
        .bind(update.status.map(|s| s.as_str()))
        .bind(update.login_count)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProfileError::DatabaseError(e.to_string()))?;

        match row {
            Some(row) => profile_from_row(&row),
            None => Err(ProfileError::NotFound(id.to_string())),
        }
    }

    async fn remove(&self, id: &ProfileId) -> Result<(), ProfileError> {
        sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ProfileError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
