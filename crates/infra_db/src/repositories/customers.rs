//! Customer store adapter
//!
//! Implements [`CustomerStore`] for the customer domain and doubles as the
//! [`CustomerDirectory`] that billing and complaints use to resolve
//! consumer keys.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{ConsumerKey, CustomerDirectory, PortError};
use domain_customers::{Customer, CustomerStore};

use crate::error::DatabaseError;

const CUSTOMER_COLUMNS: &str = "consumer_key, user_id, name, email, mobile, address, city, \
     state, pincode, created_at, updated_at";

/// PostgreSQL-backed [`CustomerStore`] and [`CustomerDirectory`].
#[derive(Debug, Clone)]
pub struct PgCustomerStore {
    pool: PgPool,
}

impl PgCustomerStore {
    /// Creates a store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    consumer_key: String,
    user_id: Uuid,
    name: String,
    email: String,
    mobile: String,
    address: String,
    city: String,
    state: String,
    pincode: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CustomerRow {
    fn into_domain(self) -> Customer {
        Customer {
            consumer_key: ConsumerKey::new(self.consumer_key),
            user_id: self.user_id,
            name: self.name,
            email: self.email,
            mobile: self.mobile,
            address: self.address,
            city: self.city,
            state: self.state,
            pincode: self.pincode,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn save(&self, customer: &Customer) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO customers (
                consumer_key, user_id, name, email, mobile, address,
                city, state, pincode, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (consumer_key) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                mobile = EXCLUDED.mobile,
                address = EXCLUDED.address,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                pincode = EXCLUDED.pincode,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(customer.consumer_key.as_str())
        .bind(customer.user_id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.mobile)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.state)
        .bind(&customer.pincode)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Customer>, PortError> {
        let rows = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(rows.into_iter().map(CustomerRow::into_domain).collect())
    }

    async fn find_by_consumer_key(
        &self,
        consumer: &ConsumerKey,
    ) -> Result<Option<Customer>, PortError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE consumer_key = $1"
        ))
        .bind(consumer.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(row.map(CustomerRow::into_domain))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Customer>, PortError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(row.map(CustomerRow::into_domain))
    }

    async fn exists_by_consumer_key(&self, consumer: &ConsumerKey) -> Result<bool, PortError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM customers WHERE consumer_key = $1)",
        )
        .bind(consumer.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)?;
        Ok(exists)
    }

    async fn delete(&self, consumer: &ConsumerKey) -> Result<(), PortError> {
        sqlx::query("DELETE FROM customers WHERE consumer_key = $1")
            .bind(consumer.as_str())
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(())
    }
}

#[async_trait]
impl CustomerDirectory for PgCustomerStore {
    async fn exists(&self, consumer: &ConsumerKey) -> Result<bool, PortError> {
        self.exists_by_consumer_key(consumer).await
    }
}
