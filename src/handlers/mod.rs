pub mod analytics;
pub mod customers;
pub mod pricing;
pub mod products;
pub mod sales;
pub mod users;

use actix_web::web;
use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

fn bad_request(err: impl std::fmt::Display) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Registers every `/api` route plus extractor settings that turn malformed
/// bodies, paths and query strings into `400 {"error": ...}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| bad_request(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _| bad_request(err)))
        .app_data(web::PathConfig::default().error_handler(|err, _| bad_request(err)))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/customers")
                        .route("", web::get().to(customers::list_customers))
                        .route("", web::post().to(customers::create_customer))
                        .route("/{id}", web::get().to(customers::get_customer))
                        .route("/{id}", web::put().to(customers::update_customer))
                        .route("/{id}", web::delete().to(customers::delete_customer))
                        .route("/{id}/products", web::get().to(pricing::get_price_list))
                        .route("/{id}/products", web::put().to(pricing::set_prices)),
                )
                .service(
                    web::scope("/products")
                        .route("", web::get().to(products::list_products))
                        .route("", web::post().to(products::create_product))
                        .route("/{id}", web::get().to(products::get_product))
                        .route("/{id}", web::put().to(products::update_product))
                        .route("/{id}", web::delete().to(products::delete_product)),
                )
                .service(
                    web::scope("/sales")
                        .route("", web::get().to(sales::list_sales))
                        .route("", web::post().to(sales::create_sale))
                        .route("/{id}", web::get().to(sales::get_sale))
                        .route("/{id}", web::put().to(sales::update_sale))
                        .route("/{id}", web::delete().to(sales::delete_sale)),
                )
                .service(
                    web::scope("/users")
                        .route("", web::get().to(users::list_users))
                        .route("", web::post().to(users::create_user)),
                )
                .route("/dashboard", web::get().to(analytics::get_dashboard))
                .route("/analytics", web::get().to(analytics::get_analytics)),
        );
}
