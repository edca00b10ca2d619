use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use super::model::{ApplicationRecord, NewApplication};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("document store error: {0}")]
    Backend(String),
}

/// Document-store collaborator holding application metadata. Production
/// implementation is a Postgres table; tests use [`MemoryApplicationStore`].
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Persists one record and returns its generated id.
    async fn insert(&self, application: NewApplication) -> Result<Uuid, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ApplicationRecord>, StoreError>;
}

pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn insert(&self, application: NewApplication) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO applications
                (id, applicant_type,
                 reporting_manager_name, reporting_manager_title,
                 reporting_manager_phone, reporting_manager_email,
                 reporting_hr_name, reporting_hr_title,
                 reporting_hr_email, reporting_hr_phone,
                 applying_role, current_ctc, expected_salary, linkedin_profile,
                 total_experience, total_internships, role_specific_note,
                 resume_path, role_specific_file_path,
                 location_confirmation, schedule_confirmation)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                    $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)
            "#,
        )
        .bind(id)
        .bind(application.applicant_type.as_str())
        .bind(&application.reporting_manager_name)
        .bind(&application.reporting_manager_title)
        .bind(&application.reporting_manager_phone)
        .bind(&application.reporting_manager_email)
        .bind(&application.reporting_hr_name)
        .bind(&application.reporting_hr_title)
        .bind(&application.reporting_hr_email)
        .bind(&application.reporting_hr_phone)
        .bind(&application.applying_role)
        .bind(&application.current_ctc)
        .bind(&application.expected_salary)
        .bind(&application.linkedin_profile)
        .bind(&application.total_experience)
        .bind(&application.total_internships)
        .bind(&application.role_specific_note)
        .bind(&application.resume_path)
        .bind(&application.role_specific_file_path)
        .bind(application.location_confirmation.as_str())
        .bind(application.schedule_confirmation.as_str())
        .execute(&self.pool)
        .await?;

        info!("Inserted application record {id}");
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ApplicationRecord>, StoreError> {
        let record = sqlx::query_as::<_, ApplicationRecord>(
            "SELECT * FROM applications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}

#[cfg(test)]
pub use memory::MemoryApplicationStore;
