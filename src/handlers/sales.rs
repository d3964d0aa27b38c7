use actix_web::{web, HttpResponse};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::sale_service::{SaleDraft, SaleEdit};
use crate::domain::input::SortOrder;
use crate::domain::sale::{RawSaleLine, SaleFilter, SaleLineView, SaleSort, SaleView};
use crate::errors::AppError;
use crate::state::AppState;

use super::{ErrorResponse, MessageResponse};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaleLineRequest {
    pub product_id: Uuid,
    /// Kilos sold as a decimal string, e.g. "2.5"
    pub quantity: String,
    /// Price per kilo; defaults to the customer's price for the product.
    pub price: Option<String>,
}

impl From<SaleLineRequest> for RawSaleLine {
    fn from(l: SaleLineRequest) -> Self {
        RawSaleLine {
            product_id: l.product_id,
            quantity: l.quantity,
            price: l.price,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSaleRequest {
    pub customer_id: Uuid,
    /// Defaults to now; may be in the past.
    pub created_at: Option<DateTime<Utc>>,
    /// Optional check value; must equal the sum of the lines.
    pub total: Option<String>,
    #[serde(default)]
    pub lines: Vec<SaleLineRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSaleRequest {
    pub customer_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub total: Option<String>,
    /// When non-empty, replaces every line of the sale.
    pub lines: Option<Vec<SaleLineRequest>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaleLineResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub capital_per_kilo: String,
    pub quantity: String,
    pub price: String,
    pub amount: String,
}

impl From<SaleLineView> for SaleLineResponse {
    fn from(l: SaleLineView) -> Self {
        Self {
            amount: l.amount().to_string(),
            id: l.id,
            product_id: l.product_id,
            product_name: l.product_name,
            capital_per_kilo: l.capital_per_kilo.to_string(),
            quantity: l.quantity.to_string(),
            price: l.price.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaleResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub created_at: DateTime<Utc>,
    pub total: String,
    /// Margin over capital across all lines.
    pub net: String,
    pub lines: Vec<SaleLineResponse>,
}

impl From<SaleView> for SaleResponse {
    fn from(s: SaleView) -> Self {
        Self {
            net: s.net().to_string(),
            id: s.id,
            customer_id: s.customer_id,
            customer_name: s.customer_name,
            created_at: s.created_at,
            total: s.total.to_string(),
            lines: s.lines.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListSalesParams {
    pub customer: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub sort: SaleSort,
    pub order: Option<SortOrder>,
}

impl From<ListSalesParams> for SaleFilter {
    fn from(p: ListSalesParams) -> Self {
        SaleFilter {
            customer: p.customer,
            from: p.from,
            to: p.to,
            sort: p.sort,
            order: p.order,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/sales
#[utoipa::path(
    get,
    path = "/api/sales",
    params(ListSalesParams),
    responses(
        (status = 200, description = "Matching sales", body = [SaleResponse]),
        (status = 400, description = "Invalid query", body = ErrorResponse),
    ),
    tag = "sales"
)]
pub async fn list_sales(
    state: web::Data<AppState>,
    query: web::Query<ListSalesParams>,
) -> Result<HttpResponse, AppError> {
    let filter = SaleFilter::from(query.into_inner());
    let sales = web::block(move || state.sales.list_sales(&filter)).await??;
    let body: Vec<SaleResponse> = sales.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/sales/{id}
#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    params(("id" = Uuid, Path, description = "Sale UUID")),
    responses(
        (status = 200, description = "Sale found", body = SaleResponse),
        (status = 404, description = "Sale not found", body = ErrorResponse),
    ),
    tag = "sales"
)]
pub async fn get_sale(state: web::Data<AppState>, path: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let sale = web::block(move || state.sales.get_sale(id)).await??;
    Ok(HttpResponse::Ok().json(SaleResponse::from(sale)))
}

/// POST /api/sales
///
/// Records a sale and its lines in one transaction. The total is computed
/// from the lines.
#[utoipa::path(
    post,
    path = "/api/sales",
    request_body = CreateSaleRequest,
    responses(
        (status = 201, description = "Sale created", body = SaleResponse),
        (status = 400, description = "Invalid lines, total, customer or product", body = ErrorResponse),
    ),
    tag = "sales"
)]
pub async fn create_sale(
    state: web::Data<AppState>,
    body: web::Json<CreateSaleRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let draft = SaleDraft {
        customer_id: body.customer_id,
        created_at: body.created_at,
        total: body.total,
        lines: body.lines.into_iter().map(Into::into).collect(),
    };
    let sale = web::block(move || state.sales.create_sale(draft)).await??;
    Ok(HttpResponse::Created().json(SaleResponse::from(sale)))
}

/// PUT /api/sales/{id}
#[utoipa::path(
    put,
    path = "/api/sales/{id}",
    params(("id" = Uuid, Path, description = "Sale UUID")),
    request_body = UpdateSaleRequest,
    responses(
        (status = 200, description = "Sale updated", body = SaleResponse),
        (status = 400, description = "Invalid lines, total or customer", body = ErrorResponse),
        (status = 404, description = "Sale not found", body = ErrorResponse),
    ),
    tag = "sales"
)]
pub async fn update_sale(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateSaleRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let edit = SaleEdit {
        customer_id: body.customer_id,
        created_at: body.created_at,
        total: body.total,
        lines: body.lines.map(|lines| lines.into_iter().map(Into::into).collect()),
    };
    let sale = web::block(move || state.sales.update_sale(id, edit)).await??;
    Ok(HttpResponse::Ok().json(SaleResponse::from(sale)))
}

/// DELETE /api/sales/{id}
#[utoipa::path(
    delete,
    path = "/api/sales/{id}",
    params(("id" = Uuid, Path, description = "Sale UUID")),
    responses(
        (status = 200, description = "Sale deleted", body = MessageResponse),
        (status = 404, description = "Sale not found", body = ErrorResponse),
    ),
    tag = "sales"
)]
pub async fn delete_sale(state: web::Data<AppState>, path: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    web::block(move || state.sales.delete_sale(id)).await??;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Sale deleted")))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use crate::handlers::configure;
    use crate::test_utils::InMemoryStore;

    use super::*;

    #[actix_web::test]
    async fn create_returns_computed_total() {
        let store = InMemoryStore::new();
        let seed = store.seed();
        let app = test::init_service(App::new().app_data(web::Data::new(store.app_state())).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/sales")
            .set_json(json!({
                "customer_id": seed.customer_a,
                "created_at": "2025-11-03T10:00:00Z",
                "lines": [
                    { "product_id": seed.rice, "quantity": "2", "price": "100" },
                    { "product_id": seed.beans, "quantity": "1" }
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["total"], "320");
        assert_eq!(body["net"], "140");
        assert_eq!(body["customer_name"], "Customer A");
        assert_eq!(body["created_at"], "2025-11-03T10:00:00Z");
    }

    #[actix_web::test]
    async fn create_rejects_bad_sales() {
        let store = InMemoryStore::new();
        let seed = store.seed();
        let app = test::init_service(App::new().app_data(web::Data::new(store.app_state())).configure(configure)).await;

        for body in [
            json!({ "customer_id": seed.customer_a, "lines": [] }),
            json!({
                "customer_id": seed.customer_a,
                "total": "999",
                "lines": [{ "product_id": seed.rice, "quantity": "1", "price": "100" }]
            }),
            json!({
                "customer_id": seed.customer_a,
                "lines": [{ "product_id": seed.rice, "quantity": "0", "price": "100" }]
            }),
            json!({
                "customer_id": Uuid::new_v4(),
                "lines": [{ "product_id": seed.rice, "quantity": "1" }]
            }),
        ] {
            let req = test::TestRequest::post().uri("/api/sales").set_json(body).to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[actix_web::test]
    async fn list_filters_by_customer_and_date() {
        let store = InMemoryStore::new();
        store.seed();
        let app = test::init_service(App::new().app_data(web::Data::new(store.app_state())).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/sales").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["customer_name"], "Customer B");

        let req = test::TestRequest::get()
            .uri("/api/sales?customer=customer%20a")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let req = test::TestRequest::get()
            .uri("/api/sales?from=2025-10-02&to=2025-10-31")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["customer_name"], "Customer B");

        let req = test::TestRequest::get().uri("/api/sales?from=yesterday").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn update_and_delete() {
        let store = InMemoryStore::new();
        let seed = store.seed();
        let app = test::init_service(App::new().app_data(web::Data::new(store.app_state())).configure(configure)).await;
        let sale_id = store.sales_of(seed.customer_a)[0].id;
        let uri = format!("/api/sales/{sale_id}");

        let req = test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "lines": [{ "product_id": seed.rice, "quantity": "3", "price": "100" }] }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], "300");
        assert_eq!(body["lines"].as_array().unwrap().len(), 1);

        let req = test::TestRequest::delete().uri(&uri).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Sale deleted");

        let req = test::TestRequest::get().uri(&uri).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
