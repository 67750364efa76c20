//! Typed query facade over the `customers` table.
//!
//! One function per statement. Functions accept any `PgExecutor` so they run
//! against the pool or inside a caller-owned transaction, and they return raw
//! `sqlx::Error`s: translating "no rows" is the repository's job.

use sqlx::PgExecutor;
use sqlx::postgres::PgQueryResult;

use customer_management_core::CustomerId;

use crate::models::{Customer, CustomerFields};

const CREATE_CUSTOMER: &str = r"
    INSERT INTO customers (name, email, password)
    VALUES ($1, $2, $3)
    RETURNING id, name, email, password, created_at, updated_at
";

const GET_CUSTOMER_BY_ID: &str = r"
    SELECT id, name, email, password, created_at, updated_at
    FROM customers
    WHERE id = $1
";

const GET_CUSTOMER_BY_EMAIL: &str = r"
    SELECT id, name, email, password, created_at, updated_at
    FROM customers
    WHERE email = $1
";

const LIST_CUSTOMERS: &str = r"
    SELECT id, name, email, password, created_at, updated_at
    FROM customers
    ORDER BY id ASC
";

const UPDATE_CUSTOMER: &str = r"
    UPDATE customers
    SET name = $2, email = $3, password = $4, updated_at = NOW()
    WHERE id = $1
    RETURNING id, name, email, password, created_at, updated_at
";

const DELETE_CUSTOMER_BY_EMAIL: &str = r"
    DELETE FROM customers
    WHERE email = $1
";

/// `INSERT ... RETURNING` the new row.
///
/// # Errors
///
/// Returns `sqlx::Error` on failure, including unique violations on `email`.
pub async fn create_customer<'e, E>(
    executor: E,
    fields: &CustomerFields,
) -> Result<Customer, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Customer>(CREATE_CUSTOMER)
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.password)
        .fetch_one(executor)
        .await
}

/// Fetch one customer by id.
///
/// # Errors
///
/// Returns `sqlx::Error::RowNotFound` if no customer has this id.
pub async fn get_customer_by_id<'e, E>(executor: E, id: CustomerId) -> Result<Customer, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Customer>(GET_CUSTOMER_BY_ID)
        .bind(id)
        .fetch_one(executor)
        .await
}

/// Fetch one customer by email.
///
/// # Errors
///
/// Returns `sqlx::Error::RowNotFound` if no customer has this email.
pub async fn get_customer_by_email<'e, E>(executor: E, email: &str) -> Result<Customer, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Customer>(GET_CUSTOMER_BY_EMAIL)
        .bind(email)
        .fetch_one(executor)
        .await
}

/// Fetch every customer, ordered by id.
///
/// # Errors
///
/// Returns `sqlx::Error` if the query fails.
pub async fn list_customers<'e, E>(executor: E) -> Result<Vec<Customer>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Customer>(LIST_CUSTOMERS)
        .fetch_all(executor)
        .await
}

/// `UPDATE ... RETURNING` the changed row.
///
/// # Errors
///
/// Returns `sqlx::Error::RowNotFound` if no customer has this id.
pub async fn update_customer<'e, E>(
    executor: E,
    id: CustomerId,
    fields: &CustomerFields,
) -> Result<Customer, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Customer>(UPDATE_CUSTOMER)
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.password)
        .fetch_one(executor)
        .await
}

/// Delete by email. The result carries the number of rows removed.
///
/// # Errors
///
/// Returns `sqlx::Error` if the statement fails.
pub async fn delete_customer_by_email<'e, E>(
    executor: E,
    email: &str,
) -> Result<PgQueryResult, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(DELETE_CUSTOMER_BY_EMAIL)
        .bind(email)
        .execute(executor)
        .await
}

/// `SELECT 1`, used by the readiness check.
///
/// # Errors
///
/// Returns `sqlx::Error` if the database is unreachable.
pub async fn ping<'e, E>(executor: E) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query("SELECT 1").execute(executor).await.map(|_| ())
}
