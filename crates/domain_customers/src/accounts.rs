//! Customer account administration
//!
//! Listing, profile updates, and deletion of customer accounts. Deleting a
//! customer does not cascade to their bills; those remain addressable by
//! key.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use core_kernel::ConsumerKey;

use crate::customer::{Customer, CustomerProfile};
use crate::error::CustomerError;
use crate::ports::CustomerStore;

/// Admin-facing customer account operations.
#[derive(Clone)]
pub struct CustomerAccounts {
    customers: Arc<dyn CustomerStore>,
}

impl CustomerAccounts {
    /// Creates the service over the customer store.
    pub fn new(customers: Arc<dyn CustomerStore>) -> Self {
        Self { customers }
    }

    /// All registered customers.
    pub async fn list_customers(&self) -> Result<Vec<Customer>, CustomerError> {
        Ok(self.customers.find_all().await?)
    }

    /// Looks a customer up by consumer number.
    pub async fn get_customer(&self, consumer: &ConsumerKey) -> Result<Customer, CustomerError> {
        self.customers
            .find_by_consumer_key(consumer)
            .await?
            .ok_or_else(|| CustomerError::CustomerNotFound(consumer.to_string()))
    }

    /// Updates the profile of the customer attached to a login record.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        profile: CustomerProfile,
    ) -> Result<Customer, CustomerError> {
        let mut customer = self
            .customers
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| CustomerError::CustomerNotFound(user_id.to_string()))?;

        customer.apply_profile(profile);
        self.customers.save(&customer).await?;

        info!(consumer = %customer.consumer_key, "customer profile updated");
        Ok(customer)
    }

    /// Removes a customer account by consumer number.
    pub async fn delete_customer(&self, consumer: &ConsumerKey) -> Result<(), CustomerError> {
        if !self.customers.exists_by_consumer_key(consumer).await? {
            return Err(CustomerError::CustomerNotFound(consumer.to_string()));
        }
        self.customers.delete(consumer).await?;
        info!(consumer = %consumer, "customer deleted");
        Ok(())
    }
}
