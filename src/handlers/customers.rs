use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::customer::{Customer, CustomerSort};
use crate::domain::input::SortOrder;
use crate::errors::AppError;
use crate::state::AppState;

use super::{ErrorResponse, MessageResponse};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCustomersParams {
    #[serde(default)]
    pub sort: CustomerSort,
    #[serde(default)]
    pub order: SortOrder,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/customers
#[utoipa::path(
    get,
    path = "/api/customers",
    params(ListCustomersParams),
    responses(
        (status = 200, description = "All customers", body = [CustomerResponse]),
        (status = 400, description = "Invalid query", body = ErrorResponse),
    ),
    tag = "customers"
)]
pub async fn list_customers(
    state: web::Data<AppState>,
    query: web::Query<ListCustomersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let customers = web::block(move || state.customers.list_customers(params.sort, params.order)).await??;
    let body: Vec<CustomerResponse> = customers.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/customers/{id}
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer UUID")),
    responses(
        (status = 200, description = "Customer found", body = CustomerResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse),
    ),
    tag = "customers"
)]
pub async fn get_customer(state: web::Data<AppState>, path: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let customer = web::block(move || state.customers.get_customer(id)).await??;
    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

/// POST /api/customers
#[utoipa::path(
    post,
    path = "/api/customers",
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
    ),
    tag = "customers"
)]
pub async fn create_customer(
    state: web::Data<AppState>,
    body: web::Json<CustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let customer = web::block(move || state.customers.create_customer(&body.name, &body.email)).await??;
    Ok(HttpResponse::Created().json(CustomerResponse::from(customer)))
}

/// PUT /api/customers/{id}
#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer UUID")),
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = CustomerResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
    ),
    tag = "customers"
)]
pub async fn update_customer(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let customer = web::block(move || state.customers.update_customer(id, &body.name, &body.email)).await??;
    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

/// DELETE /api/customers/{id}
///
/// Removes the customer with its sales and prices.
#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer UUID")),
    responses(
        (status = 200, description = "Customer deleted", body = MessageResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse),
    ),
    tag = "customers"
)]
pub async fn delete_customer(state: web::Data<AppState>, path: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || state.customers.delete_customer(id)).await??;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Customer deleted successfully")))
}
