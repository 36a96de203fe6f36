//! Login flow
//!
//! Verifies the supplied credentials against the stored login record and
//! returns the user's identity. Session-token minting is the API layer's
//! concern; this service only answers "who is this".

use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::error::CustomerError;
use crate::ports::UserStore;
use crate::user::UserRole;

/// Identity returned on a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub message: String,
    pub username: String,
    pub role: UserRole,
    pub user_id: Uuid,
}

/// Credential verification service.
#[derive(Clone)]
pub struct LoginService {
    users: Arc<dyn UserStore>,
}

impl LoginService {
    /// Creates the service over the user store.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Verifies username and password.
    ///
    /// # Errors
    ///
    /// - [`CustomerError::InvalidCredentials`] on an unknown username or a
    ///   password mismatch; the two cases are not distinguished
    /// - [`CustomerError::AccountInactive`] when the credentials match but
    ///   the account is deactivated; status is only checked after the
    ///   password
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, CustomerError> {
        let user = match self.users.find_by_username(username).await? {
            Some(user) => user,
            None => {
                warn!(username, "login attempt for unknown user");
                return Err(CustomerError::InvalidCredentials);
            }
        };

        if !user.password_matches(password) {
            warn!(username, "login attempt with wrong password");
            return Err(CustomerError::InvalidCredentials);
        }

        if !user.is_active() {
            warn!(username, "login attempt on inactive account");
            return Err(CustomerError::AccountInactive);
        }

        Ok(LoginOutcome {
            message: "Login successful".to_string(),
            username: user.username,
            role: user.role,
            user_id: user.id,
        })
    }
}
