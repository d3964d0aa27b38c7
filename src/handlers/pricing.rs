use std::collections::BTreeMap;

use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::pricing::{CustomerPrice, PriceListEntry};
use crate::errors::AppError;
use crate::state::AppState;

use super::ErrorResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct PriceListEntryResponse {
    pub product_id: Uuid,
    pub name: String,
    pub capital_per_kilo: String,
    /// The customer's own price, or the capital when none is set.
    pub price_per_kilo: String,
    pub has_custom_price: bool,
    /// Kilos of this product the customer has bought.
    pub total_purchased: String,
}

impl From<PriceListEntry> for PriceListEntryResponse {
    fn from(e: PriceListEntry) -> Self {
        Self {
            product_id: e.product_id,
            name: e.name,
            capital_per_kilo: e.capital_per_kilo.to_string(),
            price_per_kilo: e.price_per_kilo.to_string(),
            has_custom_price: e.has_custom_price,
            total_purchased: e.total_purchased.to_string(),
        }
    }
}

/// Product UUID to decimal price per kilo, e.g. `{"<uuid>": "105.00"}`
#[derive(Debug, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct SetPricesRequest(pub BTreeMap<Uuid, String>);

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerPriceResponse {
    pub product_id: Uuid,
    pub price_per_kilo: String,
    pub updated_at: DateTime<Utc>,
}

impl From<CustomerPrice> for CustomerPriceResponse {
    fn from(p: CustomerPrice) -> Self {
        Self {
            product_id: p.product_id,
            price_per_kilo: p.price_per_kilo.to_string(),
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SetPricesResponse {
    pub message: String,
    pub updates: Vec<CustomerPriceResponse>,
}

/// GET /api/customers/{id}/products
///
/// Every product with the price this customer pays, most purchased first.
#[utoipa::path(
    get,
    path = "/api/customers/{id}/products",
    params(("id" = Uuid, Path, description = "Customer UUID")),
    responses(
        (status = 200, description = "Customer price list", body = [PriceListEntryResponse]),
        (status = 404, description = "Customer not found", body = ErrorResponse),
    ),
    tag = "pricing"
)]
pub async fn get_price_list(state: web::Data<AppState>, path: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let entries = web::block(move || state.pricing.price_list(customer_id)).await??;
    let body: Vec<PriceListEntryResponse> = entries.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// PUT /api/customers/{id}/products
///
/// Saves the customer's prices. The whole batch is rejected when any price is
/// not above the product's capital.
#[utoipa::path(
    put,
    path = "/api/customers/{id}/products",
    params(("id" = Uuid, Path, description = "Customer UUID")),
    request_body = SetPricesRequest,
    responses(
        (status = 200, description = "Prices saved", body = SetPricesResponse),
        (status = 400, description = "Invalid price or unknown product", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse),
    ),
    tag = "pricing"
)]
pub async fn set_prices(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<SetPricesRequest>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let body = body.into_inner();
    let saved = web::block(move || state.pricing.set_prices(customer_id, &body.0)).await??;
    Ok(HttpResponse::Ok().json(SetPricesResponse {
        message: "Prices updated successfully!".to_string(),
        updates: saved.into_iter().map(Into::into).collect(),
    }))
}
