//! Customer accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::ConsumerKey;

/// A customer account, referenced by bills and complaints through its
/// consumer number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Consumer number; chosen at registration, unique
    pub consumer_key: ConsumerKey,
    /// The login record this account belongs to
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

/// Profile fields a customer may change after registration.
#[derive(Debug, Clone)]
pub struct CustomerProfile {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub mobile: String,
}

impl Customer {
    /// Overwrites the profile fields.
    pub fn apply_profile(&mut self, profile: CustomerProfile) {
        self.name = profile.name;
        self.address = profile.address;
        self.city = profile.city;
        self.state = profile.state;
        self.pincode = profile.pincode;
        self.mobile = profile.mobile;
        self.updated_at = Utc::now();
    }
}
