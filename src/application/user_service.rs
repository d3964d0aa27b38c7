use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::user::{User, UserInput};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.repo.list()
    }

    pub fn create_user(&self, name: &str, email: &str) -> Result<User, DomainError> {
        self.repo.create(UserInput::parse(name, email)?)
    }
}
