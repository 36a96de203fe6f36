//! User store adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::PortError;
use domain_customers::{AccountStatus, User, UserRole, UserStore};

use crate::error::DatabaseError;

const USER_COLUMNS: &str = "id, username, email, password, role, status, department, created_at";

/// PostgreSQL-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Creates a store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password: String,
    role: String,
    status: String,
    department: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_domain(self) -> Result<User, DatabaseError> {
        let role = self
            .role
            .parse::<UserRole>()
            .map_err(|e| DatabaseError::corrupt("role", e))?;
        let status = self
            .status
            .parse::<AccountStatus>()
            .map_err(|e| DatabaseError::corrupt("status", e))?;

        Ok(User {
            id: self.id,
            username: self.username,
            email: self.email,
            password: self.password,
            role,
            status,
            department: self.department,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn save(&self, user: &User) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password, role, status, department, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                username = EXCLUDED.username,
                email = EXCLUDED.email,
                password = EXCLUDED.password,
                role = EXCLUDED.role,
                status = EXCLUDED.status,
                department = EXCLUDED.department
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.role.as_str())
        .bind(user.status.as_str())
        .bind(&user.department)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, PortError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        row.map(|row| row.into_domain().map_err(PortError::from))
            .transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, PortError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        row.map(|row| row.into_domain().map_err(PortError::from))
            .transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, PortError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)?;
        Ok(exists)
    }
}
