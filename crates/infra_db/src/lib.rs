//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL adapters behind the domain ports:
//! [`domain_billing::BillStore`], [`domain_complaints::ComplaintStore`],
//! [`domain_customers::UserStore`], [`domain_customers::CustomerStore`],
//! and [`core_kernel::CustomerDirectory`].
//!
//! # Architecture
//!
//! Each adapter owns its SQL and maps between database rows and domain
//! types. Status and role columns are stored as their wire-format text and
//! parsed back through the domain `FromStr` implementations; a value that
//! fails to parse surfaces as a storage error rather than a panic.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, PgBillStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/ebm")).await?;
//! let bills = PgBillStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;

pub use pool::{DatabasePool, DatabaseConfig, create_pool, create_pool_from_url};
pub use error::DatabaseError;
pub use repositories::{PgBillStore, PgComplaintStore, PgCustomerStore, PgUserStore};

/// Embedded schema migrations, applied at startup.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Applies all pending migrations to the target database.
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
}
