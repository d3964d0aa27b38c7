use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::DomainError;
use super::input::{self, SortOrder};

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for creating or replacing a customer.
#[derive(Debug, Clone)]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
}

impl CustomerInput {
    pub fn parse(name: &str, email: &str) -> Result<Self, DomainError> {
        Ok(Self {
            name: input::required_text("name", name)?,
            email: input::email(email)?,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CustomerSort {
    #[default]
    Name,
    Email,
}

/// Sorts customers case-insensitively on the chosen field.
pub fn sort_customers(customers: &mut [Customer], field: CustomerSort, order: SortOrder) {
    customers.sort_by(|a, b| {
        let ordering = match field {
            CustomerSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            CustomerSort::Email => a.email.to_lowercase().cmp(&b.email.to_lowercase()),
        };
        order.apply(ordering)
    });
}
