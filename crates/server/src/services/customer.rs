//! Customer service.
//!
//! One method per use case, each a single repository call. Errors are
//! wrapped in [`ServiceError`] with a context string; the repository error
//! stays reachable through [`std::error::Error::source`] and
//! [`ServiceError::is_not_found`].

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument};

use customer_management_core::CustomerId;

use crate::db::{CustomerRepository, RepositoryError};
use crate::models::{Customer, CustomerFields};

/// A repository failure with the use case that triggered it.
#[derive(Debug, Error)]
#[error("{context}: {source}")]
pub struct ServiceError {
    context: &'static str,
    #[source]
    source: RepositoryError,
}

impl ServiceError {
    fn wrap(context: &'static str) -> impl FnOnce(RepositoryError) -> Self {
        move |source| Self { context, source }
    }

    /// Whether the underlying repository error is the not-found sentinel.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.source.is_not_found()
    }

    /// The context string added by the service.
    #[must_use]
    pub const fn context(&self) -> &'static str {
        self.context
    }

    /// The wrapped repository error.
    #[must_use]
    pub const fn repository_error(&self) -> &RepositoryError {
        &self.source
    }
}

/// Customer use cases over an abstract repository.
#[derive(Clone)]
pub struct CustomerService {
    repository: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    /// Create a new customer service.
    #[must_use]
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    /// List all customers.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the repository fails.
    #[instrument(name = "customers.service.list", skip(self))]
    pub async fn list(&self) -> Result<Vec<Customer>, ServiceError> {
        let customers = self
            .repository
            .list()
            .await
            .map_err(ServiceError::wrap("customer not found"))?;
        debug!(count = customers.len(), "Listed customers");
        Ok(customers)
    }

    /// Get a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` (not found or storage failure).
    #[instrument(name = "customers.service.get_by_id", skip(self))]
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Customer, ServiceError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(ServiceError::wrap("no customer with this id has found"))
    }

    /// Get a customer by email.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` (not found or storage failure).
    #[instrument(name = "customers.service.get_by_email", skip(self))]
    pub async fn get_by_email(&self, email: &str) -> Result<Customer, ServiceError> {
        self.repository
            .find_by_email(email)
            .await
            .map_err(ServiceError::wrap("no customer with this email has found"))
    }

    /// Create a customer.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` on storage failure, including a duplicate email.
    #[instrument(name = "customers.service.create", skip(self, fields), fields(email = %fields.email))]
    pub async fn create(&self, fields: CustomerFields) -> Result<Customer, ServiceError> {
        let customer = self
            .repository
            .create(&fields)
            .await
            .map_err(ServiceError::wrap("no customer created"))?;
        debug!(customer_id = %customer.id, "Created customer");
        Ok(customer)
    }

    /// Replace the name, email and password of a customer.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` (not found or storage failure).
    #[instrument(name = "customers.service.update", skip(self, fields), fields(email = %fields.email))]
    pub async fn update(
        &self,
        id: CustomerId,
        fields: CustomerFields,
    ) -> Result<Customer, ServiceError> {
        self.repository
            .update(id, &fields)
            .await
            .map_err(ServiceError::wrap("no information has changed"))
    }

    /// Delete the customer with this email.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` (not found or storage failure).
    #[instrument(name = "customers.service.delete_by_email", skip(self))]
    pub async fn delete_by_email(&self, email: &str) -> Result<(), ServiceError> {
        self.repository
            .delete_by_email(email)
            .await
            .map_err(ServiceError::wrap("delete customer"))
    }

    /// Whether the backing store answers.
    pub async fn is_ready(&self) -> bool {
        self.repository.ping().await.is_ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::error::Error as _;

    use super::*;
    use crate::test_support::{InMemoryCustomerRepository, fields};

    fn service() -> (CustomerService, Arc<InMemoryCustomerRepository>) {
        let repository = Arc::new(InMemoryCustomerRepository::default());
        (CustomerService::new(repository.clone()), repository)
    }

    #[tokio::test]
    async fn test_create_assigns_new_id() {
        let (service, _) = service();

        let first = service.create(fields("Ada", "ada@example.com")).await.unwrap();
        let second = service.create(fields("Grace", "grace@example.com")).await.unwrap();

        assert_eq!(first.name, "Ada");
        assert_eq!(first.email, "ada@example.com");
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_storage_error() {
        let (service, repository) = service();
        service.create(fields("Ada", "ada@example.com")).await.unwrap();

        let err = service
            .create(fields("Other Ada", "ada@example.com"))
            .await
            .unwrap_err();

        assert!(!err.is_not_found());
        assert_eq!(err.context(), "no customer created");
        assert!(matches!(
            err.repository_error(),
            RepositoryError::Database { .. }
        ));
        assert_eq!(repository.len(), 1);
    }

    #[tokio::test]
    async fn test_not_found_survives_wrapping() {
        let (service, _) = service();

        let err = service.get_by_id(CustomerId::new(99)).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "no customer with this id has found: customer not found"
        );

        // Identity check through the std error chain, not the message
        let source = err
            .source()
            .and_then(|e| e.downcast_ref::<RepositoryError>())
            .unwrap();
        assert!(matches!(source, RepositoryError::NotFound));

        let err = service.get_by_email("nobody@example.com").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_orders_by_id() {
        let (service, _) = service();
        for (name, email) in [("C", "c@x.io"), ("A", "a@x.io"), ("B", "b@x.io")] {
            service.create(fields(name, email)).await.unwrap();
        }
        service.delete_by_email("a@x.io").await.unwrap();

        let customers = service.list().await.unwrap();
        let names: Vec<_> = customers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["C", "B"]);
        assert!(customers.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn test_update_missing_id_changes_nothing() {
        let (service, repository) = service();
        let existing = service.create(fields("Ada", "ada@example.com")).await.unwrap();

        let err = service
            .update(CustomerId::new(existing.id.as_i32() + 1), fields("X", "x@x.io"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(repository.snapshot(), vec![existing]);
    }

    #[tokio::test]
    async fn test_update_missing_id_with_taken_email_is_not_found() {
        let (service, repository) = service();
        let existing = service.create(fields("Ada", "ada@example.com")).await.unwrap();

        let err = service
            .update(CustomerId::new(9999), fields("X", "ada@example.com"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.context(), "no information has changed");
        assert_eq!(repository.snapshot(), vec![existing]);
    }

    #[tokio::test]
    async fn test_update_to_taken_email_is_storage_error() {
        let (service, _) = service();
        service.create(fields("Ada", "ada@example.com")).await.unwrap();
        let grace = service.create(fields("Grace", "grace@example.com")).await.unwrap();

        let err = service
            .update(grace.id, fields("Grace", "ada@example.com"))
            .await
            .unwrap_err();

        assert!(!err.is_not_found());
        assert!(matches!(
            err.repository_error(),
            RepositoryError::Database { .. }
        ));
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let (service, _) = service();
        let existing = service.create(fields("Ada", "ada@example.com")).await.unwrap();

        let updated = service
            .update(existing.id, fields("Ada L.", "lovelace@example.com"))
            .await
            .unwrap();

        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.name, "Ada L.");
        assert_eq!(updated.email, "lovelace@example.com");
        assert!(updated.updated_at >= existing.updated_at);
        assert_eq!(updated.created_at, existing.created_at);
    }

    #[tokio::test]
    async fn test_delete_removes_only_matching_row() {
        let (service, repository) = service();
        let keep = service.create(fields("Keep", "keep@example.com")).await.unwrap();
        service.create(fields("Drop", "drop@example.com")).await.unwrap();

        service.delete_by_email("drop@example.com").await.unwrap();

        assert_eq!(repository.snapshot(), vec![keep]);
    }

    #[tokio::test]
    async fn test_delete_missing_email_is_not_found() {
        let (service, _) = service();
        let err = service.delete_by_email("ghost@example.com").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.context(), "delete customer");
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_not_found() {
        let (service, repository) = service();
        repository.fail_with_pool_timeout();

        let err = service.list().await.unwrap_err();
        assert!(!err.is_not_found());
        assert!(!service.is_ready().await);
    }
}
