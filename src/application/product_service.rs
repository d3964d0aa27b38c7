use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{Product, ProductInput};

#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    pub fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        let mut products = self.repo.list()?;
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    pub fn get_product(&self, id: Uuid) -> Result<Product, DomainError> {
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound("Product"))
    }

    pub fn create_product(&self, name: &str, capital_per_kilo: &str) -> Result<Product, DomainError> {
        self.repo.create(ProductInput::parse(name, capital_per_kilo)?)
    }

    pub fn update_product(&self, id: Uuid, name: &str, capital_per_kilo: &str) -> Result<Product, DomainError> {
        self.repo.update(id, ProductInput::parse(name, capital_per_kilo)?)
    }

    pub fn delete_product(&self, id: Uuid) -> Result<(), DomainError> {
        log::info!("Deleting product {id} with its sale lines and prices");
        self.repo.delete(id)
    }
}
