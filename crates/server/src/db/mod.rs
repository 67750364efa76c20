//! Database operations for the customer `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `customers` - Customer records (email is unique)
//!
//! # Layers
//!
//! - [`queries`] - Typed query facade: one function per SQL statement
//! - [`customers`] - `PostgreSQL`-backed [`CustomerRepository`]
//!
//! Consumers only see `Arc<dyn CustomerRepository>`; the concrete type stays
//! private to this module and is built by [`customer_repository`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p customer-management-cli -- migrate
//! ```

pub mod customers;
pub mod queries;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use customer_management_core::CustomerId;

use crate::models::{Customer, CustomerFields};

pub use customers::customer_repository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No customer matched the lookup, update or delete.
    ///
    /// Callers should match on this variant (or use [`RepositoryError::is_not_found`])
    /// rather than inspect the message.
    #[error("customer not found")]
    NotFound,

    /// Any other database failure, labelled with the operation that failed.
    #[error("{operation}: {source}")]
    Database {
        /// Short label such as `"create customer"`.
        operation: &'static str,
        /// Underlying sqlx error.
        #[source]
        source: sqlx::Error,
    },
}

impl RepositoryError {
    /// Returns a closure that wraps a `sqlx::Error` with an operation label.
    ///
    /// `sqlx::Error::RowNotFound` becomes [`RepositoryError::NotFound`].
    pub(crate) fn from_sqlx(operation: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| match source {
            sqlx::Error::RowNotFound => Self::NotFound,
            source => Self::Database { operation, source },
        }
    }

    /// Whether this is the not-found sentinel.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Persistence operations for customers.
///
/// Every method issues exactly one statement. Lookups, updates and deletes
/// that match no row return [`RepositoryError::NotFound`].
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers, ordered by ascending id.
    async fn list(&self) -> Result<Vec<Customer>, RepositoryError>;

    /// Load a customer by id.
    async fn find_by_id(&self, id: CustomerId) -> Result<Customer, RepositoryError>;

    /// Load a customer by email.
    async fn find_by_email(&self, email: &str) -> Result<Customer, RepositoryError>;

    /// Insert a customer and return it with its generated id and timestamps.
    ///
    /// A duplicate email surfaces as [`RepositoryError::Database`].
    async fn create(&self, fields: &CustomerFields) -> Result<Customer, RepositoryError>;

    /// Replace all mutable fields of a customer and refresh `updated_at`.
    async fn update(
        &self,
        id: CustomerId,
        fields: &CustomerFields,
    ) -> Result<Customer, RepositoryError>;

    /// Delete the customer with this email.
    async fn delete_by_email(&self, email: &str) -> Result<(), RepositoryError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
