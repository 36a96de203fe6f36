//! Customer DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::ConsumerKey;
use domain_customers::{Customer, CustomerProfile, RegisterCustomer};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterCustomerRequest {
    #[validate(length(min = 1))]
    pub consumer_id: String,
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub mobile: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub state: String,
    #[validate(length(min = 1))]
    pub pincode: String,
    #[validate(length(min = 6))]
    pub password: String,
}

impl From<RegisterCustomerRequest> for RegisterCustomer {
    fn from(request: RegisterCustomerRequest) -> Self {
        RegisterCustomer {
            consumer_key: ConsumerKey::new(request.consumer_id),
            username: request.username,
            name: request.name,
            email: request.email,
            mobile: request.mobile,
            address: request.address,
            city: request.city,
            state: request.state,
            pincode: request.pincode,
            password: request.password,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub state: String,
    #[validate(length(min = 1))]
    pub pincode: String,
    #[validate(length(min = 1))]
    pub mobile: String,
}

impl From<UpdateProfileRequest> for CustomerProfile {
    fn from(request: UpdateProfileRequest) -> Self {
        CustomerProfile {
            name: request.name,
            address: request.address,
            city: request.city,
            state: request.state,
            pincode: request.pincode,
            mobile: request.mobile,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub consumer_id: String,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            consumer_id: customer.consumer_key.into(),
            user_id: customer.user_id,
            name: customer.name,
            email: customer.email,
            mobile: customer.mobile,
            address: customer.address,
            city: customer.city,
            state: customer.state,
            pincode: customer.pincode,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}
