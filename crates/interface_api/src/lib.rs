//! HTTP API Layer
//!
//! This crate provides the REST API for the electricity bill management
//! backend using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for bills, complaints, customers, auth
//! - **Middleware**: JWT authentication and audit logging
//! - **DTOs**: Request/Response data transfer objects with validation
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(pool, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::KeyAllocator;
use domain_billing::BillingLedger;
use domain_complaints::ComplaintDesk;
use domain_customers::{CustomerAccounts, LoginService, RegistrationService};
use infra_db::{PgBillStore, PgComplaintStore, PgCustomerStore, PgUserStore};

use crate::config::ApiConfig;
use crate::handlers::{auth as auth_handlers, bills, complaints, customers, health};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub billing: BillingLedger,
    pub complaints: ComplaintDesk,
    pub registration: RegistrationService,
    pub login: LoginService,
    pub accounts: CustomerAccounts,
    pub pool: PgPool,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the domain services over the PostgreSQL adapters.
    pub fn new(pool: PgPool, config: ApiConfig) -> Self {
        let bills = Arc::new(PgBillStore::new(pool.clone()));
        let complaint_store = Arc::new(PgComplaintStore::new(pool.clone()));
        let customer_store = Arc::new(PgCustomerStore::new(pool.clone()));
        let users = Arc::new(PgUserStore::new(pool.clone()));
        let allocator = Arc::new(KeyAllocator::new());

        Self {
            billing: BillingLedger::new(bills, customer_store.clone(), allocator.clone()),
            complaints: ComplaintDesk::new(complaint_store, customer_store.clone(), allocator),
            registration: RegistrationService::new(users.clone(), customer_store.clone()),
            login: LoginService::new(users),
            accounts: CustomerAccounts::new(customer_store),
            pool,
            config,
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    let state = AppState::new(pool, config);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Public API routes: login and both registration flows
    let public_api_routes = Router::new()
        .route("/auth/login", post(auth_handlers::login))
        .route("/auth/register/admin", post(auth_handlers::register_admin))
        .route("/customers/register", post(customers::register));

    // Bill routes
    let bill_routes = Router::new()
        .route("/", post(bills::create_bill))
        .route("/", get(bills::list_bills))
        .route("/pay", post(bills::pay_bill))
        .route("/stats", get(bills::bill_stats))
        .route("/payments", get(bills::payment_history))
        .route(
            "/payments/customer/:consumer_id",
            get(bills::payment_history_by_customer),
        )
        .route("/customer/:consumer_id", get(bills::bills_by_customer))
        .route(
            "/customer/:consumer_id/pending",
            get(bills::pending_bills_by_customer),
        )
        .route(
            "/customer/:consumer_id/paid",
            get(bills::paid_bills_by_customer),
        )
        .route("/status/:status", get(bills::bills_by_status))
        .route("/:bill_id", get(bills::get_bill))
        .route("/:bill_id", put(bills::update_bill))
        .route("/:bill_id", delete(bills::delete_bill));

    // Complaint routes
    let complaint_routes = Router::new()
        .route("/", post(complaints::create_complaint))
        .route("/", get(complaints::list_complaints))
        .route(
            "/customer/:consumer_id",
            get(complaints::complaints_by_customer),
        )
        .route("/:complaint_id", get(complaints::get_complaint))
        .route("/:complaint_id", put(complaints::update_complaint))
        .route("/:complaint_id", delete(complaints::delete_complaint))
        .route(
            "/:complaint_id/status",
            put(complaints::update_complaint_status),
        );

    // Customer routes
    let customer_routes = Router::new()
        .route("/", get(customers::list_customers))
        .route("/profile/:user_id", put(customers::update_profile))
        .route("/:consumer_id", delete(customers::delete_customer));

    // Protected API routes
    let protected_api_routes = Router::new()
        .nest("/bills", bill_routes)
        .nest("/complaints", complaint_routes)
        .nest("/customers", customer_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api", public_api_routes.merge(protected_api_routes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
