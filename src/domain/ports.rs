use std::collections::HashMap;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::analytics::EntityCounts;
use super::customer::{Customer, CustomerInput};
use super::errors::DomainError;
use super::pricing::{CustomerPrice, PriceUpdate};
use super::product::{Product, ProductInput};
use super::sale::{NewSale, SaleChanges, SaleView};
use super::user::{User, UserInput};

pub trait CustomerRepository: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<Customer>, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError>;
    fn create(&self, input: CustomerInput) -> Result<Customer, DomainError>;
    fn update(&self, id: Uuid, input: CustomerInput) -> Result<Customer, DomainError>;
    /// Removes the customer together with its sales, their lines and its
    /// prices.
    fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<Product>, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError>;
    fn create(&self, input: ProductInput) -> Result<Product, DomainError>;
    fn update(&self, id: Uuid, input: ProductInput) -> Result<Product, DomainError>;
    /// Removes the product, its sale lines and prices, and recomputes the
    /// totals of the sales that lost lines.
    fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

pub trait PricingRepository: Send + Sync + 'static {
    fn prices_for_customer(&self, customer_id: Uuid) -> Result<Vec<CustomerPrice>, DomainError>;
    /// Kilos bought per product over all of the customer's sales.
    fn purchased_quantities(&self, customer_id: Uuid) -> Result<HashMap<Uuid, BigDecimal>, DomainError>;
    fn upsert_prices(
        &self,
        customer_id: Uuid,
        updates: Vec<PriceUpdate>,
    ) -> Result<Vec<CustomerPrice>, DomainError>;
}

pub trait SaleRepository: Send + Sync + 'static {
    /// All sales, newest first.
    fn list(&self) -> Result<Vec<SaleView>, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<SaleView>, DomainError>;
    fn create(&self, sale: NewSale) -> Result<Uuid, DomainError>;
    fn update(&self, id: Uuid, changes: SaleChanges) -> Result<(), DomainError>;
    fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

pub trait UserRepository: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<User>, DomainError>;
    fn create(&self, input: UserInput) -> Result<User, DomainError>;
}

pub trait StatsRepository: Send + Sync + 'static {
    fn counts(&self) -> Result<EntityCounts, DomainError>;
}
