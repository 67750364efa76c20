//! `PostgreSQL` customer repository.
//!
//! Wraps the [`queries`](super::queries) facade and normalizes its errors:
//! "no rows" becomes [`RepositoryError::NotFound`], anything else is labelled
//! with the operation that failed.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use customer_management_core::CustomerId;

use super::{CustomerRepository, RepositoryError, queries};
use crate::models::{Customer, CustomerFields};

/// Build the `PostgreSQL`-backed repository.
///
/// The pool is shared: `PgPool` is reference counted and safe to use from
/// concurrent requests.
#[must_use]
pub fn customer_repository(pool: PgPool) -> Arc<dyn CustomerRepository> {
    Arc::new(PgCustomerRepository { pool })
}

/// Repository for customer database operations.
struct PgCustomerRepository {
    pool: PgPool,
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    #[instrument(name = "customers.repo.list", skip(self))]
    async fn list(&self) -> Result<Vec<Customer>, RepositoryError> {
        queries::list_customers(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx("list customers"))
    }

    #[instrument(name = "customers.repo.find_by_id", skip(self))]
    async fn find_by_id(&self, id: CustomerId) -> Result<Customer, RepositoryError> {
        queries::get_customer_by_id(&self.pool, id)
            .await
            .map_err(RepositoryError::from_sqlx("get customer by id"))
    }

    #[instrument(name = "customers.repo.find_by_email", skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Customer, RepositoryError> {
        queries::get_customer_by_email(&self.pool, email)
            .await
            .map_err(RepositoryError::from_sqlx("get customer by email"))
    }

    #[instrument(name = "customers.repo.create", skip(self, fields), fields(email = %fields.email))]
    async fn create(&self, fields: &CustomerFields) -> Result<Customer, RepositoryError> {
        queries::create_customer(&self.pool, fields)
            .await
            .map_err(RepositoryError::from_sqlx("create customer"))
    }

    #[instrument(name = "customers.repo.update", skip(self, fields), fields(email = %fields.email))]
    async fn update(
        &self,
        id: CustomerId,
        fields: &CustomerFields,
    ) -> Result<Customer, RepositoryError> {
        queries::update_customer(&self.pool, id, fields)
            .await
            .map_err(RepositoryError::from_sqlx("update customer"))
    }

    #[instrument(name = "customers.repo.delete_by_email", skip(self))]
    async fn delete_by_email(&self, email: &str) -> Result<(), RepositoryError> {
        let result = queries::delete_customer_by_email(&self.pool, email)
            .await
            .map_err(RepositoryError::from_sqlx("delete customer"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        queries::ping(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx("ping"))
    }
}
