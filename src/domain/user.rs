use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::input;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UserInput {
    pub name: String,
    pub email: String,
}

impl UserInput {
    pub fn parse(name: &str, email: &str) -> Result<Self, DomainError> {
        Ok(Self {
            name: input::required_text("name", name)?,
            email: input::email(email)?,
        })
    }
}
