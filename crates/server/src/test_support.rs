//! In-memory [`CustomerRepository`] for unit and router tests.
//!
//! Mirrors the `PostgreSQL` behaviour the upper layers rely on: serial ids,
//! a unique email constraint reported as a database error, ordering by id,
//! and the not-found sentinel for misses.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use customer_management_core::{CustomerId, Password};

use crate::db::{CustomerRepository, RepositoryError};
use crate::models::{Customer, CustomerFields};

#[derive(Default)]
struct Table {
    rows: Vec<Customer>,
    next_id: i32,
    failing: bool,
    delay: Option<Duration>,
}

/// Customer table held in a `Vec`.
#[derive(Default)]
pub struct InMemoryCustomerRepository {
    table: Mutex<Table>,
}

impl InMemoryCustomerRepository {
    fn table(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every subsequent call fail as if the pool timed out.
    pub fn fail_with_pool_timeout(&self) {
        self.table().failing = true;
    }

    /// Make every subsequent call sleep for `delay` before touching the table.
    pub fn delay_calls(&self, delay: Duration) {
        self.table().delay = Some(delay);
    }

    async fn pause(&self) {
        let delay = self.table().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.table().rows.len()
    }

    /// Copy of the stored rows in id order.
    pub fn snapshot(&self) -> Vec<Customer> {
        self.table().rows.clone()
    }

    fn guard(&self, operation: &'static str) -> Result<MutexGuard<'_, Table>, RepositoryError> {
        let table = self.table();
        if table.failing {
            return Err(RepositoryError::Database {
                operation,
                source: sqlx::Error::PoolTimedOut,
            });
        }
        Ok(table)
    }
}

fn unique_violation(operation: &'static str) -> RepositoryError {
    RepositoryError::Database {
        operation,
        source: sqlx::Error::Protocol(
            "duplicate key value violates unique constraint \"customers_email_key\"".to_string(),
        ),
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn list(&self) -> Result<Vec<Customer>, RepositoryError> {
        self.pause().await;
        Ok(self.guard("list customers")?.rows.clone())
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Customer, RepositoryError> {
        self.pause().await;
        self.guard("get customer by id")?
            .rows
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_email(&self, email: &str) -> Result<Customer, RepositoryError> {
        self.pause().await;
        self.guard("get customer by email")?
            .rows
            .iter()
            .find(|c| c.email == email)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn create(&self, fields: &CustomerFields) -> Result<Customer, RepositoryError> {
        self.pause().await;
        let mut table = self.guard("create customer")?;
        if table.rows.iter().any(|c| c.email == fields.email) {
            return Err(unique_violation("create customer"));
        }

        table.next_id += 1;
        let now = Utc::now();
        let customer = Customer {
            id: CustomerId::new(table.next_id),
            name: fields.name.clone(),
            email: fields.email.clone(),
            password: fields.password.clone(),
            created_at: now,
            updated_at: now,
        };
        table.rows.push(customer.clone());
        Ok(customer)
    }

    async fn update(
        &self,
        id: CustomerId,
        fields: &CustomerFields,
    ) -> Result<Customer, RepositoryError> {
        self.pause().await;
        let mut table = self.guard("update customer")?;
        // `WHERE id = $1` matches nothing before any constraint is checked
        if !table.rows.iter().any(|c| c.id == id) {
            return Err(RepositoryError::NotFound);
        }
        if table
            .rows
            .iter()
            .any(|c| c.id != id && c.email == fields.email)
        {
            return Err(unique_violation("update customer"));
        }

        let row = table
            .rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepositoryError::NotFound)?;
        row.name.clone_from(&fields.name);
        row.email.clone_from(&fields.email);
        row.password = fields.password.clone();
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete_by_email(&self, email: &str) -> Result<(), RepositoryError> {
        self.pause().await;
        let mut table = self.guard("delete customer")?;
        let before = table.rows.len();
        table.rows.retain(|c| c.email != email);
        if table.rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.pause().await;
        self.guard("ping").map(|_| ())
    }
}

/// Build `CustomerFields` with a fixed password.
#[allow(clippy::unwrap_used)]
pub fn fields(name: &str, email: &str) -> CustomerFields {
    CustomerFields {
        name: name.to_string(),
        email: email.to_string(),
        password: Password::parse("correct horse battery staple").unwrap(),
    }
}
