//! Parsing and validation helpers shared by the request-facing services.

use std::cmp::Ordering;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use serde::Deserialize;
use utoipa::ToSchema;

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Orients an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Trims `value` and rejects it when nothing is left.
pub fn required_text(field: &str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid(format!("Missing {field}")));
    }
    Ok(trimmed.to_string())
}

pub fn email(value: &str) -> Result<String, DomainError> {
    let email = required_text("email", value)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(DomainError::invalid(format!("Invalid email '{email}'"))),
    }
}

pub fn decimal(field: &str, value: &str) -> Result<BigDecimal, DomainError> {
    BigDecimal::from_str(value.trim())
        .map_err(|e| DomainError::invalid(format!("Invalid {field} '{value}': {e}")))
}

pub fn non_negative_decimal(field: &str, value: &str) -> Result<BigDecimal, DomainError> {
    let parsed = decimal(field, value)?;
    if parsed < BigDecimal::zero() {
        return Err(DomainError::invalid(format!("{field} must not be negative")));
    }
    Ok(parsed)
}

pub fn positive_decimal(field: &str, value: &str) -> Result<BigDecimal, DomainError> {
    let parsed = decimal(field, value)?;
    if parsed <= BigDecimal::zero() {
        return Err(DomainError::invalid(format!("{field} must be greater than zero")));
    }
    Ok(parsed)
}
