use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::input;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// Cost basis per kilo.
    pub capital_per_kilo: BigDecimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub capital_per_kilo: BigDecimal,
}

impl ProductInput {
    pub fn parse(name: &str, capital_per_kilo: &str) -> Result<Self, DomainError> {
        Ok(Self {
            name: input::required_text("name", name)?,
            capital_per_kilo: input::non_negative_decimal("capital_per_kilo", capital_per_kilo)?,
        })
    }
}
