//! Login records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Role of a login record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Customer,
}

impl UserRole {
    /// Wire representation, matching the JSON and database encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Customer => "CUSTOMER",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(UserRole::Admin),
            "CUSTOMER" => Ok(UserRole::Customer),
            other => Err(format!("unknown user role: {other}")),
        }
    }
}

/// Whether the login record may be used to sign in.
///
/// Accounts start `Active`; deactivation is an administrative action and
/// blocks login without deleting the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    /// Wire representation, matching the JSON and database encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Inactive => "INACTIVE",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(AccountStatus::Active),
            "INACTIVE" => Ok(AccountStatus::Inactive),
            other => Err(format!("unknown account status: {other}")),
        }
    }
}

/// A login record for a customer or an admin.
///
/// The stored password is compared directly at login. This mirrors the
/// system being replaced; hardening the credential store is tracked
/// separately and out of scope here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Unique across all users
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub role: UserRole,
    /// Inactive accounts keep their data but cannot log in
    pub status: AccountStatus,
    /// Admin users only
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a customer login record.
    pub fn customer(username: String, email: String, password: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password,
            role: UserRole::Customer,
            status: AccountStatus::Active,
            department: None,
            created_at: Utc::now(),
        }
    }

    /// Creates an admin login record.
    pub fn admin(username: String, email: String, password: String, department: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password,
            role: UserRole::Admin,
            status: AccountStatus::Active,
            department: Some(department),
            created_at: Utc::now(),
        }
    }

    /// Compares the supplied password against the stored value.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    /// True while the account may sign in.
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}
