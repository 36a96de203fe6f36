//! Bill store adapter
//!
//! PostgreSQL implementation of [`BillStore`]. The bill key is the primary
//! key; `save` upserts the full record so issuance, payment application,
//! and admin corrections all go through one statement.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use core_kernel::{BillKey, ConsumerKey, PaymentKey, PortError};
use domain_billing::{Bill, BillStatus, BillStore};

use crate::error::DatabaseError;

const BILL_COLUMNS: &str = "bill_key, consumer_key, billing_period, amount_due, issue_date, \
     due_date, status, payment_key, payment_date, previous_reading, current_reading, \
     units_consumed, rate_per_unit, additional_charges, created_at, updated_at";

/// PostgreSQL-backed [`BillStore`].
#[derive(Debug, Clone)]
pub struct PgBillStore {
    pool: PgPool,
}

impl PgBillStore {
    /// Creates a store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BillRow {
    bill_key: String,
    consumer_key: String,
    billing_period: String,
    amount_due: Decimal,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    status: String,
    payment_key: Option<String>,
    payment_date: Option<NaiveDate>,
    previous_reading: Option<i64>,
    current_reading: Option<i64>,
    units_consumed: Option<i64>,
    rate_per_unit: Option<Decimal>,
    additional_charges: Option<Decimal>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BillRow {
    fn into_domain(self) -> Result<Bill, DatabaseError> {
        let status = self
            .status
            .parse::<BillStatus>()
            .map_err(|e| DatabaseError::corrupt("status", e))?;

        Ok(Bill {
            bill_key: BillKey::new(self.bill_key),
            consumer_key: ConsumerKey::new(self.consumer_key),
            billing_period: self.billing_period,
            amount_due: self.amount_due,
            issue_date: self.issue_date,
            due_date: self.due_date,
            status,
            payment_key: self.payment_key.map(PaymentKey::new),
            payment_date: self.payment_date,
            previous_reading: self.previous_reading,
            current_reading: self.current_reading,
            units_consumed: self.units_consumed,
            rate_per_unit: self.rate_per_unit,
            additional_charges: self.additional_charges,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn into_bills(rows: Vec<BillRow>) -> Result<Vec<Bill>, PortError> {
    rows.into_iter()
        .map(|row| row.into_domain().map_err(PortError::from))
        .collect()
}

#[async_trait]
impl BillStore for PgBillStore {
    async fn save(&self, bill: &Bill) -> Result<(), PortError> {
        sqlx::query(
            r#"
            INSERT INTO bills (
                bill_key, consumer_key, billing_period, amount_due, issue_date,
                due_date, status, payment_key, payment_date, previous_reading,
                current_reading, units_consumed, rate_per_unit, additional_charges,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ON CONFLICT (bill_key) DO UPDATE SET
                consumer_key = EXCLUDED.consumer_key,
                billing_period = EXCLUDED.billing_period,
                amount_due = EXCLUDED.amount_due,
                issue_date = EXCLUDED.issue_date,
                due_date = EXCLUDED.due_date,
                status = EXCLUDED.status,
                payment_key = EXCLUDED.payment_key,
                payment_date = EXCLUDED.payment_date,
                previous_reading = EXCLUDED.previous_reading,
                current_reading = EXCLUDED.current_reading,
                units_consumed = EXCLUDED.units_consumed,
                rate_per_unit = EXCLUDED.rate_per_unit,
                additional_charges = EXCLUDED.additional_charges,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(bill.bill_key.as_str())
        .bind(bill.consumer_key.as_str())
        .bind(&bill.billing_period)
        .bind(bill.amount_due)
        .bind(bill.issue_date)
        .bind(bill.due_date)
        .bind(bill.status.as_str())
        .bind(bill.payment_key.as_ref().map(|key| key.as_str()))
        .bind(bill.payment_date)
        .bind(bill.previous_reading)
        .bind(bill.current_reading)
        .bind(bill.units_consumed)
        .bind(bill.rate_per_unit)
        .bind(bill.additional_charges)
        .bind(bill.created_at)
        .bind(bill.updated_at)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(())
    }

    async fn find_by_key(&self, key: &BillKey) -> Result<Option<Bill>, PortError> {
        let row = sqlx::query_as::<_, BillRow>(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE bill_key = $1"
        ))
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        row.map(|row| row.into_domain().map_err(PortError::from))
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<Bill>, PortError> {
        let rows = sqlx::query_as::<_, BillRow>(&format!("SELECT {BILL_COLUMNS} FROM bills"))
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        into_bills(rows)
    }

    async fn find_by_customer(&self, consumer: &ConsumerKey) -> Result<Vec<Bill>, PortError> {
        let rows = sqlx::query_as::<_, BillRow>(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE consumer_key = $1"
        ))
        .bind(consumer.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;
        into_bills(rows)
    }

    async fn find_by_customer_and_status(
        &self,
        consumer: &ConsumerKey,
        status: BillStatus,
    ) -> Result<Vec<Bill>, PortError> {
        let rows = sqlx::query_as::<_, BillRow>(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE consumer_key = $1 AND status = $2"
        ))
        .bind(consumer.as_str())
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;
        into_bills(rows)
    }

    async fn find_by_status(&self, status: BillStatus) -> Result<Vec<Bill>, PortError> {
        let rows = sqlx::query_as::<_, BillRow>(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE status = $1"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;
        into_bills(rows)
    }

    async fn find_with_payments(&self) -> Result<Vec<Bill>, PortError> {
        let rows = sqlx::query_as::<_, BillRow>(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE payment_key IS NOT NULL"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;
        into_bills(rows)
    }

    async fn find_with_payments_by_customer(
        &self,
        consumer: &ConsumerKey,
    ) -> Result<Vec<Bill>, PortError> {
        let rows = sqlx::query_as::<_, BillRow>(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE consumer_key = $1 AND payment_key IS NOT NULL"
        ))
        .bind(consumer.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;
        into_bills(rows)
    }

    async fn exists_by_key(&self, key: &BillKey) -> Result<bool, PortError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM bills WHERE bill_key = $1)",
        )
        .bind(key.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)?;
        Ok(exists)
    }

    async fn exists_by_payment_key(&self, key: &PaymentKey) -> Result<bool, PortError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM bills WHERE payment_key = $1)",
        )
        .bind(key.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)?;
        Ok(exists)
    }

    async fn delete(&self, key: &BillKey) -> Result<(), PortError> {
        sqlx::query("DELETE FROM bills WHERE bill_key = $1")
            .bind(key.as_str())
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(())
    }

    async fn count_all(&self) -> Result<i64, PortError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bills")
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(count)
    }

    async fn count_by_status(&self, status: BillStatus) -> Result<i64, PortError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bills WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(count)
    }

    async fn sum_amount_by_status(&self, status: BillStatus) -> Result<Decimal, PortError> {
        let sum = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount_due), 0) FROM bills WHERE status = $1",
        )
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from)?;
        Ok(sum)
    }
}
