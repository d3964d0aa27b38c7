use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::analytics::{AnalyticsReport, Dashboard};
use crate::errors::AppError;
use crate::state::AppState;

use super::ErrorResponse;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyticsParams {
    /// Full month name, three-letter abbreviation (or "Sept") or 1-12,
    /// case-insensitive; "all" for no filter
    pub month: Option<String>,
    /// Year of the month filter (default current year)
    pub year: Option<i32>,
}

/// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses((status = 200, description = "Counts, monthly sales and rankings", body = Dashboard)),
    tag = "analytics"
)]
pub async fn get_dashboard(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let dashboard = web::block(move || state.analytics.dashboard()).await??;
    Ok(HttpResponse::Ok().json(dashboard))
}

/// GET /api/analytics
///
/// Totals, 12-month trend, same-period comparison and summary, optionally
/// narrowed to one month.
#[utoipa::path(
    get,
    path = "/api/analytics",
    params(AnalyticsParams),
    responses(
        (status = 200, description = "Analytics report", body = AnalyticsReport),
        (status = 400, description = "Unknown month", body = ErrorResponse),
    ),
    tag = "analytics"
)]
pub async fn get_analytics(
    state: web::Data<AppState>,
    query: web::Query<AnalyticsParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let report =
        web::block(move || state.analytics.report(params.month.as_deref(), params.year, Utc::now())).await??;
    Ok(HttpResponse::Ok().json(report))
}
