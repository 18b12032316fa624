use anyhow::Context;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::applications::store::ApplicationStore;
use crate::errors::AppError;
use crate::models::{Application, ApplicationRow, NewApplication};

const COLUMNS: &str =
    "id, link, company, role, type, location, country, status, application_date, notes";

/// `applications` table in PostgreSQL. See `schema.sql`.
#[derive(Clone)]
pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool of up to 10 connections to `database_url`.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;

        info!("PostgreSQL connection pool established");
        Ok(Self::new(pool))
    }
}

fn into_application(row: ApplicationRow) -> Result<Application, AppError> {
    Ok(Application::try_from(row)?)
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn list(&self) -> Result<Vec<Application>, AppError> {
        let rows = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {COLUMNS} FROM applications"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(into_application).collect()
    }

    async fn insert(&self, new: NewApplication) -> Result<Application, AppError> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            INSERT INTO applications
                (link, company, role, type, location, country, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&new.link)
        .bind(&new.company)
        .bind(&new.role)
        .bind(new.job_type.as_str())
        .bind(new.location.as_str())
        .bind(&new.country)
        .bind(new.status.as_str())
        .bind(&new.notes)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted application {}", row.id);
        into_application(row)
    }

    async fn replace(
        &self,
        id: Uuid,
        fields: NewApplication,
    ) -> Result<Option<Application>, AppError> {
        // The CTE reads the row before the UPDATE touches it, so RETURNING
        // yields the pre-update values in the same statement.
        let previous = sqlx::query_as::<_, ApplicationRow>(
            r#"
            WITH previous AS (
                SELECT * FROM applications WHERE id = $1 FOR UPDATE
            )
            UPDATE applications AS a
            SET link = $2, company = $3, role = $4, type = $5,
                location = $6, country = $7, status = $8, notes = $9
            FROM previous
            WHERE a.id = previous.id
            RETURNING previous.id, previous.link, previous.company, previous.role,
                      previous.type, previous.location, previous.country,
                      previous.status, previous.application_date, previous.notes
            "#,
        )
        .bind(id)
        .bind(&fields.link)
        .bind(&fields.company)
        .bind(&fields.role)
        .bind(fields.job_type.as_str())
        .bind(fields.location.as_str())
        .bind(&fields.country)
        .bind(fields.status.as_str())
        .bind(&fields.notes)
        .fetch_optional(&self.pool)
        .await?;

        if previous.is_some() {
            info!("Replaced application {id}");
        }
        previous.map(into_application).transpose()
    }

    async fn remove(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            info!("Deleted application {id}");
        }
        Ok(removed)
    }
}
