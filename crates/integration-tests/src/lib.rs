//! Integration tests for the customer management service.
//!
//! # Running Tests
//!
//! ```bash
//! # Repository tests against a scratch database
//! DATABASE_URL=postgres://localhost/customers_test \
//!     cargo test -p customer-management-integration-tests -- --ignored customer_repository
//!
//! # HTTP tests against a running server
//! SERVER_BASE_URL=http://127.0.0.1:8080 \
//!     cargo test -p customer-management-integration-tests -- --ignored customers_api
//! ```
//!
//! # Test Categories
//!
//! - `customer_repository` - `PostgreSQL` repository behaviour (needs `DATABASE_URL`)
//! - `customers_api` - HTTP API end to end (needs `SERVER_BASE_URL`)
//!
//! Every test is `#[ignore]`d so a plain `cargo test` passes without
//! infrastructure.

use secrecy::SecretString;
use sqlx::PgPool;

/// Default server address when `SERVER_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Base URL of the server under test, without a trailing slash.
#[must_use]
pub fn server_base_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("SERVER_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Connect to `DATABASE_URL` and apply the server migrations.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset, the database is unreachable or a
/// migration fails.
#[allow(clippy::expect_used)]
pub async fn migrated_pool() -> PgPool {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = customer_management_server::db::create_pool(&SecretString::from(url))
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("../server/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// An email address no other test run will use.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.test", uuid::Uuid::new_v4().simple())
}
