pub mod analytics_service;
pub mod customer_service;
pub mod pricing_service;
pub mod product_service;
pub mod sale_service;
pub mod user_service;

pub use analytics_service::AnalyticsService;
pub use customer_service::CustomerService;
pub use pricing_service::PricingService;
pub use product_service::ProductService;
pub use sale_service::SaleService;
pub use user_service::UserService;
