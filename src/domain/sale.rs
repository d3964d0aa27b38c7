use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::DomainError;
use super::input::{self, SortOrder};

/// A sale line joined with the product it sold.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleLineView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub capital_per_kilo: BigDecimal,
    pub quantity: BigDecimal,
    pub price: BigDecimal,
}

impl SaleLineView {
    pub fn amount(&self) -> BigDecimal {
        &self.price * &self.quantity
    }

    /// Margin over cost basis for this line.
    pub fn net(&self) -> BigDecimal {
        (&self.price - &self.capital_per_kilo) * &self.quantity
    }
}

/// A sale with its customer name and line items, as read back for listing
/// and analytics.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleView {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub created_at: DateTime<Utc>,
    pub total: BigDecimal,
    pub lines: Vec<SaleLineView>,
}

impl SaleView {
    pub fn net(&self) -> BigDecimal {
        self.lines
            .iter()
            .fold(BigDecimal::zero(), |acc, line| acc + line.net())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleLineInput {
    pub product_id: Uuid,
    pub quantity: BigDecimal,
    pub price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct NewSale {
    pub customer_id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
    pub total: BigDecimal,
    pub lines: Vec<SaleLineInput>,
}

/// Partial update of a sale. `lines`, when present, replaces every line and
/// `total` carries the recomputed sum.
#[derive(Debug, Clone, Default)]
pub struct SaleChanges {
    pub customer_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub replacement: Option<(BigDecimal, Vec<SaleLineInput>)>,
}

/// A line as submitted by a client, before price resolution.
#[derive(Debug, Clone)]
pub struct RawSaleLine {
    pub product_id: Uuid,
    pub quantity: String,
    pub price: Option<String>,
}

/// Parses submitted lines. Lines without a price are priced with
/// `default_price`.
pub fn parse_lines<F>(raw: &[RawSaleLine], mut default_price: F) -> Result<Vec<SaleLineInput>, DomainError>
where
    F: FnMut(Uuid) -> Result<BigDecimal, DomainError>,
{
    if raw.is_empty() {
        return Err(DomainError::invalid("A sale needs at least one product"));
    }

    raw.iter()
        .map(|line| {
            let quantity = input::positive_decimal("quantity", &line.quantity)?;
            let price = match &line.price {
                Some(price) => input::non_negative_decimal("price", price)?,
                None => default_price(line.product_id)?,
            };
            Ok(SaleLineInput {
                product_id: line.product_id,
                quantity,
                price,
            })
        })
        .collect()
}

pub fn lines_total(lines: &[SaleLineInput]) -> BigDecimal {
    lines
        .iter()
        .fold(BigDecimal::zero(), |acc, l| acc + &l.price * &l.quantity)
}

/// Accepts a client-declared total only when it equals the computed one.
pub fn check_declared_total(declared: Option<&str>, computed: &BigDecimal) -> Result<(), DomainError> {
    let Some(declared) = declared else {
        return Ok(());
    };
    let declared = input::decimal("total", declared)?;
    if &declared != computed {
        return Err(DomainError::invalid(format!(
            "Total {declared} does not match line items ({computed})"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SaleSort {
    #[default]
    CreatedAt,
    Total,
    Customer,
}

#[derive(Debug, Clone, Default)]
pub struct SaleFilter {
    /// Case-insensitive substring of the customer name.
    pub customer: Option<String>,
    /// Inclusive local calendar day bounds.
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub sort: SaleSort,
    pub order: Option<SortOrder>,
}

impl SaleFilter {
    /// Filters and sorts `sales`. Without an explicit order, newest (or
    /// largest) comes first.
    pub fn apply(&self, sales: Vec<SaleView>, offset: FixedOffset) -> Vec<SaleView> {
        let needle = self
            .customer
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut kept: Vec<SaleView> = sales
            .into_iter()
            .filter(|sale| {
                needle
                    .as_ref()
                    .map_or(true, |n| sale.customer_name.to_lowercase().contains(n))
            })
            .filter(|sale| {
                let day = sale.created_at.with_timezone(&offset).date_naive();
                self.from.map_or(true, |from| day >= from) && self.to.map_or(true, |to| day <= to)
            })
            .collect();

        let order = self.order.unwrap_or(SortOrder::Desc);
        kept.sort_by(|a, b| {
            let ordering = match self.sort {
                SaleSort::CreatedAt => a.created_at.cmp(&b.created_at),
                SaleSort::Total => a.total.cmp(&b.total),
                SaleSort::Customer => a
                    .customer_name
                    .to_lowercase()
                    .cmp(&b.customer_name.to_lowercase()),
            };
            order.apply(ordering)
        });
        kept
    }
}
