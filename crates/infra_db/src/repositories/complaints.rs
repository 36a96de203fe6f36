//! Complaint store adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use core_kernel::{ComplaintKey, ConsumerKey, PortError};
use domain_complaints::{Complaint, ComplaintStatus, ComplaintStore};

use crate::error::DatabaseError;

const COMPLAINT_COLUMNS: &str = "complaint_key, consumer_key, kind, category, problem, \
     landmark, status, admin_response, created_at, updated_at";

/// PostgreSQL-backed [`ComplaintStore`].
#[derive(Debug, Clone)]
pub struct PgComplaintStore {
    pool: PgPool,
}

impl PgComplaintStore {
    /// Creates a store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ComplaintRow {
    complaint_key: String,
    consumer_key: String,
    kind: String,
    category: String,
    problem: String,
    landmark: Option<String>,
    status: String,
    admin_response: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ComplaintRow {
    fn into_domain(self) -> Result<Complaint, DatabaseError> {
        let status = self
            .status
            .parse::<ComplaintStatus>()
            .map_err(|e| DatabaseError::corrupt("status", e))?;

        Ok(Complaint {
            complaint_key: ComplaintKey::new(self.complaint_key),
            consumer_key: ConsumerKey::new(self.consumer_key),
            kind: self.kind,
            category: self.category,
            problem: self.problem,
            landmark: self.landmark,
            status,
            admin_response: self.admin_response,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn into_complaints(rows: Vec<ComplaintRow>) -> Result<Vec<Complaint>, PortError> {
    rows.into_iter()
        .map(|row| row.into_domain().map_err(PortError::from))
        .collect()
}

#[async_trait]
impl ComplaintStore for PgComplaintStore {
    async fn save(&self, complaint: &Complaint) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO complaints (
                complaint_key, consumer_key, kind, category, problem,
                landmark, status, admin_response, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (complaint_key) DO UPDATE SET
                kind = EXCLUDED.kind,
                category = EXCLUDED.category,
                problem = EXCLUDED.problem,
                landmark = EXCLUDED.landmark,
                status = EXCLUDED.status,
                admin_response = EXCLUDED.admin_response,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(complaint.complaint_key.as_str())
        .bind(complaint.consumer_key.as_str())
        .bind(&complaint.kind)
        .bind(&complaint.category)
        .bind(&complaint.problem)
        .bind(&complaint.landmark)
        .bind(complaint.status.as_str())
        .bind(&complaint.admin_response)
        .bind(complaint.created_at)
        .bind(complaint.updated_at)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(())
    }

    async fn find_by_key(&self, key: &ComplaintKey) -> Result<Option<Complaint>, PortError> {
        let row = sqlx::query_as::<_, ComplaintRow>(&format!(
            "SELECT {COMPLAINT_COLUMNS} FROM complaints WHERE complaint_key = $1"
        ))
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        row.map(|row| row.into_domain().map_err(PortError::from))
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<Complaint>, PortError> {
        let rows = sqlx::query_as::<_, ComplaintRow>(&format!(
            "SELECT {COMPLAINT_COLUMNS} FROM complaints"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;
        into_complaints(rows)
    }

    async fn find_by_customer(
        &self,
        consumer: &ConsumerKey,
    ) -> Result<Vec<Complaint>, PortError> {
        let rows = sqlx::query_as::<_, ComplaintRow>(&format!(
            "SELECT {COMPLAINT_COLUMNS} FROM complaints WHERE consumer_key = $1"
        ))
        .bind(consumer.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;
        into_complaints(rows)
    }

    async fn find_by_customer_and_status(
        &self,
        consumer: &ConsumerKey,
        status: ComplaintStatus,
    ) -> Result<Vec<Complaint>, PortError> {
        let rows = sqlx::query_as::<_, ComplaintRow>(&format!(
            "SELECT {COMPLAINT_COLUMNS} FROM complaints WHERE consumer_key = $1 AND status = $2"
        ))
        .bind(consumer.as_str())
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;
        into_complaints(rows)
    }

    async fn exists_by_key(&self, key: &ComplaintKey) -> Result<bool, PortError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM complaints WHERE complaint_key = $1)",
        )
        .bind(key.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)?;
        Ok(exists)
    }

    async fn delete(&self, key: &ComplaintKey) -> Result<(), PortError> {
        sqlx::query("DELETE FROM complaints WHERE complaint_key = $1")
            .bind(key.as_str())
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(())
    }
}
