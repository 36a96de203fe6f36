//! Registration flows
//!
//! Customer registration creates both a login record and a customer account
//! in one step; admin registration creates only the login record. Both
//! reject duplicate emails with a conflict, and customer registration
//! additionally rejects a taken consumer number.

use std::sync::Arc;
use tracing::info;

use core_kernel::ConsumerKey;

use crate::customer::Customer;
use crate::error::CustomerError;
use crate::ports::{CustomerStore, UserStore};
use crate::user::User;

/// Payload for customer self-registration.
#[derive(Debug, Clone)]
pub struct RegisterCustomer {
    pub consumer_key: ConsumerKey,
    pub username: String,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub password: String,
}

/// Payload for programmatic admin registration.
#[derive(Debug, Clone)]
pub struct RegisterAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
    pub department: String,
}

/// Service creating login records and customer accounts.
#[derive(Clone)]
pub struct RegistrationService {
    users: Arc<dyn UserStore>,
    customers: Arc<dyn CustomerStore>,
}

impl RegistrationService {
    /// Creates the service over the given ports.
    pub fn new(users: Arc<dyn UserStore>, customers: Arc<dyn CustomerStore>) -> Self {
        Self { users, customers }
    }

    /// Registers a customer, creating user and account together.
    ///
    /// # Errors
    ///
    /// - [`CustomerError::EmailAlreadyRegistered`] on duplicate email
    /// - [`CustomerError::ConsumerKeyTaken`] on duplicate consumer number
    pub async fn register_customer(
        &self,
        request: RegisterCustomer,
    ) -> Result<Customer, CustomerError> {
        if self.users.exists_by_email(&request.email).await? {
            return Err(CustomerError::EmailAlreadyRegistered(request.email));
        }
        if self
            .customers
            .exists_by_consumer_key(&request.consumer_key)
            .await?
        {
            return Err(CustomerError::ConsumerKeyTaken(
                request.consumer_key.to_string(),
            ));
        }

        let user = User::customer(
            request.username,
            request.email.clone(),
            request.password,
        );
        self.users.save(&user).await?;

        let now = chrono::Utc::now();
        let customer = Customer {
            consumer_key: request.consumer_key,
            user_id: user.id,
            name: request.name,
            email: request.email,
            mobile: request.mobile,
            address: request.address,
            city: request.city,
            state: request.state,
            pincode: request.pincode,
            created_at: now,
            updated_at: now,
        };
        self.customers.save(&customer).await?;

        info!(consumer = %customer.consumer_key, "customer registered");
        Ok(customer)
    }

    /// Registers an admin login record.
    ///
    /// # Errors
    ///
    /// [`CustomerError::EmailAlreadyRegistered`] on duplicate email.
    pub async fn register_admin(&self, request: RegisterAdmin) -> Result<User, CustomerError> {
        if self.users.exists_by_email(&request.email).await? {
            return Err(CustomerError::EmailAlreadyRegistered(request.email));
        }

        let user = User::admin(
            request.username,
            request.email,
            request.password,
            request.department,
        );
        self.users.save(&user).await?;

        info!(username = %user.username, "admin registered");
        Ok(user)
    }
}
