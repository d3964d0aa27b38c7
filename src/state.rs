use std::sync::Arc;

use chrono::FixedOffset;

use crate::application::{
    AnalyticsService, CustomerService, PricingService, ProductService, SaleService, UserService,
};
use crate::db::DbPool;
use crate::infrastructure::{
    DieselCustomerRepository, DieselPricingRepository, DieselProductRepository, DieselSaleRepository,
    DieselStatsRepository, DieselUserRepository,
};

/// Services shared by every worker of the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub customers: CustomerService,
    pub products: ProductService,
    pub pricing: PricingService,
    pub sales: SaleService,
    pub users: UserService,
    pub analytics: AnalyticsService,
}

impl AppState {
    pub fn new(pool: DbPool, report_offset: FixedOffset) -> Self {
        let customers = Arc::new(DieselCustomerRepository::new(pool.clone()));
        let products = Arc::new(DieselProductRepository::new(pool.clone()));
        let pricing = Arc::new(DieselPricingRepository::new(pool.clone()));
        let sales = Arc::new(DieselSaleRepository::new(pool.clone()));

        Self {
            customers: CustomerService::new(customers.clone()),
            products: ProductService::new(products.clone()),
            pricing: PricingService::new(customers.clone(), products.clone(), pricing.clone()),
            sales: SaleService::new(sales.clone(), customers, products, pricing, report_offset),
            users: UserService::new(Arc::new(DieselUserRepository::new(pool.clone()))),
            analytics: AnalyticsService::new(sales, Arc::new(DieselStatsRepository::new(pool)), report_offset),
        }
    }
}
