pub mod customer_repo;
pub mod models;
pub mod pricing_repo;
pub mod product_repo;
pub mod sale_repo;
pub mod seed;
pub mod stats_repo;
pub mod user_repo;

#[cfg(test)]
mod test_db;

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::errors::DomainError;

pub use customer_repo::DieselCustomerRepository;
pub use pricing_repo::DieselPricingRepository;
pub use product_repo::DieselProductRepository;
pub use sale_repo::DieselSaleRepository;
pub use seed::{seed_demo_data, SeedReport};
pub use stats_repo::DieselStatsRepository;
pub use user_repo::DieselUserRepository;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<DieselError> for DomainError {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::NotFound => DomainError::NotFound("Record"),
            DieselError::DatabaseError(kind, info) => {
                let message = info.details().unwrap_or_else(|| info.message()).to_string();
                match kind {
                    DatabaseErrorKind::UniqueViolation => DomainError::Conflict(message),
                    DatabaseErrorKind::ForeignKeyViolation | DatabaseErrorKind::CheckViolation => {
                        DomainError::InvalidInput(message)
                    }
                    _ => DomainError::Internal(info.message().to_string()),
                }
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}
