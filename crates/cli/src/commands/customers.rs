//! Customer inspection commands.
//!
//! Output omits passwords.

use customer_management_server::db::customer_repository;
use customer_management_server::models::Customer;
use customer_management_server::services::{CustomerService, ServiceError};
use thiserror::Error;

use super::{ConnectError, connect};

/// Errors that can occur during customer commands.
#[derive(Debug, Error)]
pub enum CustomersError {
    /// Could not reach the database.
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// The service call failed.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

async fn service() -> Result<CustomerService, ConnectError> {
    let pool = connect().await?;
    Ok(CustomerService::new(customer_repository(pool)))
}

fn format_row(customer: &Customer) -> String {
    format!(
        "{:>6}  {:<24}  {:<32}  {}",
        customer.id.as_i32(),
        customer.name,
        customer.email,
        customer.created_at.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Print every customer.
///
/// # Errors
///
/// Returns `CustomersError` if the database is unreachable or the query fails.
#[allow(clippy::print_stdout)]
pub async fn list() -> Result<(), CustomersError> {
    let customers = service().await?.list().await?;

    println!("{:>6}  {:<24}  {:<32}  created", "id", "name", "email");
    for customer in &customers {
        println!("{}", format_row(customer));
    }
    tracing::info!(count = customers.len(), "Listed customers");
    Ok(())
}

/// Print the customer with this email.
///
/// # Errors
///
/// Returns `CustomersError` if no customer has this email or the query fails.
#[allow(clippy::print_stdout)]
pub async fn show(email: &str) -> Result<(), CustomersError> {
    let customer = service().await?.get_by_email(email).await?;
    println!("{}", format_row(&customer));
    Ok(())
}
