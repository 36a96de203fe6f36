//! Authentication DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_customers::{RegisterAdmin, User};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub username: String,
    pub user_type: String,
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterAdminRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1))]
    pub department: String,
}

impl From<RegisterAdminRequest> for RegisterAdmin {
    fn from(request: RegisterAdminRequest) -> Self {
        RegisterAdmin {
            username: request.username,
            email: request.email,
            password: request.password,
            department: request.department,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub department: Option<String>,
}

impl From<User> for AdminResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role.as_str().to_string(),
            department: user.department,
        }
    }
}
