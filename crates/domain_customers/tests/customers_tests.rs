//! Comprehensive tests for domain_customers

use std::sync::Arc;

use core_kernel::ConsumerKey;
use domain_customers::{
    AccountStatus, CustomerAccounts, CustomerError, CustomerProfile, LoginService,
    RegisterAdmin, RegisterCustomer, RegistrationService, UserRole, UserStore,
};
use test_utils::{fixtures, MemoryCustomerStore, MemoryUserStore};

fn register_request(consumer: ConsumerKey, email: &str) -> RegisterCustomer {
    RegisterCustomer {
        consumer_key: consumer,
        username: "meera.devi".to_string(),
        name: "Meera Devi".to_string(),
        email: email.to_string(),
        mobile: "9876543210".to_string(),
        address: "12 Power Colony".to_string(),
        city: "Jaipur".to_string(),
        state: "Rajasthan".to_string(),
        pincode: "302001".to_string(),
        password: "secret123".to_string(),
    }
}

struct Services {
    registration: RegistrationService,
    login: LoginService,
    accounts: CustomerAccounts,
    users: Arc<MemoryUserStore>,
}

fn services() -> Services {
    let users = Arc::new(MemoryUserStore::new());
    let customers = Arc::new(MemoryCustomerStore::new());
    Services {
        registration: RegistrationService::new(users.clone(), customers.clone()),
        login: LoginService::new(users.clone()),
        accounts: CustomerAccounts::new(customers),
        users,
    }
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn customer_registration_creates_user_and_account() {
    let svc = services();

    let customer = svc
        .registration
        .register_customer(register_request(fixtures::consumer_key(), "meera@example.com"))
        .await
        .unwrap();

    assert_eq!(customer.consumer_key, fixtures::consumer_key());
    assert_eq!(customer.email, "meera@example.com");

    let user = svc
        .users
        .find_by_username("meera.devi")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.id, customer.user_id);
    assert_eq!(user.role, UserRole::Customer);
    assert!(user.department.is_none());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let svc = services();
    svc.registration
        .register_customer(register_request(fixtures::consumer_key(), "meera@example.com"))
        .await
        .unwrap();

    let err = svc
        .registration
        .register_customer(register_request(
            fixtures::other_consumer_key(),
            "meera@example.com",
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, CustomerError::EmailAlreadyRegistered(_)));
}

#[tokio::test]
async fn duplicate_consumer_key_is_a_conflict() {
    let svc = services();
    svc.registration
        .register_customer(register_request(fixtures::consumer_key(), "meera@example.com"))
        .await
        .unwrap();

    let err = svc
        .registration
        .register_customer(register_request(fixtures::consumer_key(), "second@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, CustomerError::ConsumerKeyTaken(_)));
}

#[tokio::test]
async fn admin_registration_creates_login_record_only() {
    let svc = services();

    let admin = svc
        .registration
        .register_admin(RegisterAdmin {
            username: "ops.admin".to_string(),
            email: "ops@example.com".to_string(),
            password: "admin123".to_string(),
            department: "Operations".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(admin.role, UserRole::Admin);
    assert_eq!(admin.department.as_deref(), Some("Operations"));
    assert!(svc.accounts.list_customers().await.unwrap().is_empty());
}

#[tokio::test]
async fn admin_and_customer_emails_share_one_namespace() {
    let svc = services();
    svc.registration
        .register_admin(RegisterAdmin {
            username: "ops.admin".to_string(),
            email: "shared@example.com".to_string(),
            password: "admin123".to_string(),
            department: "Operations".to_string(),
        })
        .await
        .unwrap();

    let err = svc
        .registration
        .register_customer(register_request(fixtures::consumer_key(), "shared@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, CustomerError::EmailAlreadyRegistered(_)));
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn login_returns_identity_for_valid_credentials() {
    let svc = services();
    let customer = svc
        .registration
        .register_customer(register_request(fixtures::consumer_key(), "meera@example.com"))
        .await
        .unwrap();

    let outcome = svc.login.login("meera.devi", "secret123").await.unwrap();

    assert_eq!(outcome.message, "Login successful");
    assert_eq!(outcome.username, "meera.devi");
    assert_eq!(outcome.role, UserRole::Customer);
    assert_eq!(outcome.user_id, customer.user_id);
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_user_alike() {
    let svc = services();
    svc.registration
        .register_customer(register_request(fixtures::consumer_key(), "meera@example.com"))
        .await
        .unwrap();

    let wrong = svc
        .login
        .login("meera.devi", "not-the-password")
        .await
        .unwrap_err();
    let unknown = svc.login.login("nobody", "secret123").await.unwrap_err();

    // The two failures are indistinguishable to the caller.
    assert_eq!(wrong.to_string(), unknown.to_string());
    assert!(matches!(wrong, CustomerError::InvalidCredentials));
    assert_eq!(wrong.to_string(), "Invalid username or password");
}

#[tokio::test]
async fn login_refuses_deactivated_accounts() {
    let svc = services();
    svc.registration
        .register_customer(register_request(fixtures::consumer_key(), "meera@example.com"))
        .await
        .unwrap();

    let mut user = svc
        .users
        .find_by_username("meera.devi")
        .await
        .unwrap()
        .unwrap();
    user.status = AccountStatus::Inactive;
    svc.users.save(&user).await.unwrap();

    let err = svc.login.login("meera.devi", "secret123").await.unwrap_err();
    assert!(matches!(err, CustomerError::AccountInactive));
    assert_eq!(err.to_string(), "Account is inactive. Please contact support.");

    // A wrong password on the same account still reports bad credentials,
    // not account state.
    let err = svc
        .login
        .login("meera.devi", "not-the-password")
        .await
        .unwrap_err();
    assert!(matches!(err, CustomerError::InvalidCredentials));
}

// ============================================================================
// Account administration
// ============================================================================

#[tokio::test]
async fn profile_update_overwrites_contact_fields() {
    let svc = services();
    let customer = svc
        .registration
        .register_customer(register_request(fixtures::consumer_key(), "meera@example.com"))
        .await
        .unwrap();

    let updated = svc
        .accounts
        .update_profile(
            customer.user_id,
            CustomerProfile {
                name: "Meera D.".to_string(),
                address: "7 Grid Lane".to_string(),
                city: "Udaipur".to_string(),
                state: "Rajasthan".to_string(),
                pincode: "313001".to_string(),
                mobile: "9000000000".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Meera D.");
    assert_eq!(updated.city, "Udaipur");
    // Identity fields stay put.
    assert_eq!(updated.consumer_key, customer.consumer_key);
    assert_eq!(updated.email, customer.email);
}

#[tokio::test]
async fn profile_update_for_unknown_user_fails() {
    let svc = services();

    let err = svc
        .accounts
        .update_profile(
            uuid::Uuid::new_v4(),
            CustomerProfile {
                name: "Nobody".to_string(),
                address: String::new(),
                city: String::new(),
                state: String::new(),
                pincode: String::new(),
                mobile: String::new(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, CustomerError::CustomerNotFound(_)));
}

#[tokio::test]
async fn get_and_delete_customer_by_consumer_key() {
    let svc = services();
    svc.registration
        .register_customer(register_request(fixtures::consumer_key(), "meera@example.com"))
        .await
        .unwrap();

    let fetched = svc
        .accounts
        .get_customer(&fixtures::consumer_key())
        .await
        .unwrap();
    assert_eq!(fetched.email, "meera@example.com");

    svc.accounts
        .delete_customer(&fixtures::consumer_key())
        .await
        .unwrap();

    let err = svc
        .accounts
        .get_customer(&fixtures::consumer_key())
        .await
        .unwrap_err();
    assert!(matches!(err, CustomerError::CustomerNotFound(_)));

    let err = svc
        .accounts
        .delete_customer(&fixtures::consumer_key())
        .await
        .unwrap_err();
    assert!(matches!(err, CustomerError::CustomerNotFound(_)));
}
