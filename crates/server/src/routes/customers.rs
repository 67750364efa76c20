//! Customer route handlers.
//!
//! Handlers decode the request, call one [`CustomerService`] method and map
//! the outcome to a status code. Request bodies are JSON; every decoding
//! failure is reported as `400 invalid request body`.
//!
//! [`CustomerService`]: crate::services::CustomerService

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use customer_management_core::{CustomerId, Password};

use crate::error::{AppError, Result};
use crate::models::{Customer, CustomerFields};
use crate::state::AppState;

/// Body for create and update.
///
/// Missing fields decode as empty strings and are rejected by the presence
/// check. No `Debug` impl: the password arrives in clear.
#[derive(Deserialize)]
pub struct CustomerRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl CustomerRequest {
    /// Presence checks only; no format validation.
    fn into_fields(self) -> Result<CustomerFields> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name is required".to_string()));
        }
        if self.email.trim().is_empty() {
            return Err(AppError::BadRequest("email is required".to_string()));
        }
        let password = Password::parse(&self.password)
            .map_err(|_| AppError::BadRequest("password is required".to_string()))?;

        Ok(CustomerFields {
            name: self.name,
            email: self.email,
            password,
        })
    }
}

/// Public view of a customer: no password, no timestamps.
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
        }
    }
}

type JsonBody = std::result::Result<Json<CustomerRequest>, JsonRejection>;
type IdPath = std::result::Result<Path<CustomerId>, PathRejection>;

fn decode_body(body: JsonBody) -> Result<CustomerFields> {
    let Json(request) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        AppError::BadRequest("invalid request body".to_string())
    })?;
    request.into_fields()
}

fn decode_id(path: IdPath) -> Result<CustomerId> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::BadRequest("invalid customer id".to_string()))
}

/// Create a customer.
///
/// `POST /customers`
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<(StatusCode, Json<CustomerResponse>)> {
    let fields = decode_body(body)?;

    let customer = state
        .customers()
        .create(fields)
        .await
        .map_err(AppError::service("could not create customer"))?;

    tracing::info!(customer_id = %customer.id, "Customer created");
    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// List every stored customer record, password included.
///
/// `GET /customer`
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>> {
    let customers = state
        .customers()
        .list()
        .await
        .map_err(AppError::service_verbose("failed to fetch customers"))?;
    Ok(Json(customers))
}

/// `GET /customers/{id}`
#[instrument(skip(state, path))]
pub async fn show(
    State(state): State<AppState>,
    path: IdPath,
) -> Result<Json<CustomerResponse>> {
    let id = decode_id(path)?;

    let customer = state
        .customers()
        .get_by_id(id)
        .await
        .map_err(AppError::service("could not fetch customer"))?;
    Ok(Json(customer.into()))
}

/// Replace name, email and password.
///
/// `PUT /customers/{id}`
#[instrument(skip(state, path, body))]
pub async fn update(
    State(state): State<AppState>,
    path: IdPath,
    body: JsonBody,
) -> Result<Json<CustomerResponse>> {
    let id = decode_id(path)?;
    let fields = decode_body(body)?;

    let customer = state
        .customers()
        .update(id, fields)
        .await
        .map_err(AppError::service("could not update customer"))?;

    tracing::info!(customer_id = %customer.id, "Customer updated");
    Ok(Json(customer.into()))
}

/// `GET /customers/email/{email}`
#[instrument(skip(state))]
pub async fn show_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<CustomerResponse>> {
    let customer = state
        .customers()
        .get_by_email(&email)
        .await
        .map_err(AppError::service("could not fetch customer"))?;
    Ok(Json(customer.into()))
}

/// `DELETE /customers/email/{email}`
#[instrument(skip(state))]
pub async fn delete_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<StatusCode> {
    state
        .customers()
        .delete_by_email(&email)
        .await
        .map_err(AppError::service("could not delete customer"))?;

    tracing::info!("Customer deleted");
    Ok(StatusCode::NO_CONTENT)
}
