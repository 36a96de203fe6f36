//! Customer Domain Ports

use async_trait::async_trait;
use uuid::Uuid;

use core_kernel::{ConsumerKey, PortError};

use crate::customer::Customer;
use crate::user::User;

/// Persistence gateway for login records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts or fully overwrites a user, keyed by id.
    async fn save(&self, user: &User) -> Result<(), PortError>;

    /// Looks a user up by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, PortError>;

    /// Looks a user up by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, PortError>;

    /// True if any user is registered with this email.
    async fn exists_by_email(&self, email: &str) -> Result<bool, PortError>;
}

/// Persistence gateway for customer accounts.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Inserts or fully overwrites a customer, keyed by consumer number.
    async fn save(&self, customer: &Customer) -> Result<(), PortError>;

    /// All customers.
    async fn find_all(&self) -> Result<Vec<Customer>, PortError>;

    /// Looks a customer up by consumer number.
    async fn find_by_consumer_key(
        &self,
        consumer: &ConsumerKey,
    ) -> Result<Option<Customer>, PortError>;

    /// Looks the customer account attached to a login record up.
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Customer>, PortError>;

    /// True if this consumer number is taken.
    async fn exists_by_consumer_key(&self, consumer: &ConsumerKey) -> Result<bool, PortError>;

    /// Removes a customer by consumer number. Absence is not an error here.
    async fn delete(&self, consumer: &ConsumerKey) -> Result<(), PortError>;
}
