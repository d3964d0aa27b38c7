use utoipa::OpenApi;

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(title = "Trade Desk API", description = "Customers, products, pricing, sales and analytics"),
    paths(
        handlers::customers::list_customers,
        handlers::customers::get_customer,
        handlers::customers::create_customer,
        handlers::customers::update_customer,
        handlers::customers::delete_customer,
        handlers::pricing::get_price_list,
        handlers::pricing::set_prices,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::sales::list_sales,
        handlers::sales::get_sale,
        handlers::sales::create_sale,
        handlers::sales::update_sale,
        handlers::sales::delete_sale,
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::analytics::get_dashboard,
        handlers::analytics::get_analytics,
    ),
    tags(
        (name = "customers", description = "Customer records"),
        (name = "pricing", description = "Per-customer prices"),
        (name = "products", description = "Products and their capital"),
        (name = "sales", description = "Sales and line items"),
        (name = "users", description = "Application users"),
        (name = "analytics", description = "Dashboard and reports"),
    )
)]
pub struct ApiDoc;
