use std::collections::BTreeMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::{CustomerRepository, PricingRepository, ProductRepository};
use crate::domain::pricing::{build_price_list, validate_price_updates, CustomerPrice, PriceListEntry};

#[derive(Clone)]
pub struct PricingService {
    customers: Arc<dyn CustomerRepository>,
    products: Arc<dyn ProductRepository>,
    pricing: Arc<dyn PricingRepository>,
}

impl PricingService {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        products: Arc<dyn ProductRepository>,
        pricing: Arc<dyn PricingRepository>,
    ) -> Self {
        Self {
            customers,
            products,
            pricing,
        }
    }

    fn ensure_customer(&self, customer_id: Uuid) -> Result<(), DomainError> {
        match self.customers.find_by_id(customer_id)? {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound("Customer")),
        }
    }

    /// Every product with the price this customer pays and how much of it
    /// they have bought.
    pub fn price_list(&self, customer_id: Uuid) -> Result<Vec<PriceListEntry>, DomainError> {
        self.ensure_customer(customer_id)?;
        let products = self.products.list()?;
        let prices = self.pricing.prices_for_customer(customer_id)?;
        let purchased = self.pricing.purchased_quantities(customer_id)?;
        Ok(build_price_list(products, &prices, &purchased))
    }

    pub fn set_prices(
        &self,
        customer_id: Uuid,
        raw: &BTreeMap<Uuid, String>,
    ) -> Result<Vec<CustomerPrice>, DomainError> {
        self.ensure_customer(customer_id)?;
        let products = self.products.list()?;
        let updates = validate_price_updates(&products, raw)?;
        self.pricing.upsert_prices(customer_id, updates)
    }
}
