use std::sync::Arc;

use uuid::Uuid;

use crate::domain::customer::{sort_customers, Customer, CustomerInput, CustomerSort};
use crate::domain::errors::DomainError;
use crate::domain::input::SortOrder;
use crate::domain::ports::CustomerRepository;

#[derive(Clone)]
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self { repo }
    }

    pub fn list_customers(&self, sort: CustomerSort, order: SortOrder) -> Result<Vec<Customer>, DomainError> {
        let mut customers = self.repo.list()?;
        sort_customers(&mut customers, sort, order);
        Ok(customers)
    }

    pub fn get_customer(&self, id: Uuid) -> Result<Customer, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Customer"))
    }

    pub fn create_customer(&self, name: &str, email: &str) -> Result<Customer, DomainError> {
        self.repo.create(CustomerInput::parse(name, email)?)
    }

    pub fn update_customer(&self, id: Uuid, name: &str, email: &str) -> Result<Customer, DomainError> {
        self.repo.update(id, CustomerInput::parse(name, email)?)
    }

    pub fn delete_customer(&self, id: Uuid) -> Result<(), DomainError> {
        log::info!("Deleting customer {id} with its sales and prices");
        self.repo.delete(id)
    }
}
