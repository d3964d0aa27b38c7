//! Per-customer product pricing.
//!
//! A customer may carry its own price per kilo for any product. Products
//! without one are offered at their capital per kilo. Stored prices must stay
//! strictly above the product's capital.

use std::collections::{BTreeMap, HashMap};

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::input;
use super::product::Product;

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerPrice {
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub price_per_kilo: BigDecimal,
    pub updated_at: DateTime<Utc>,
}

/// A validated `(product, price)` pair ready to be upserted.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceUpdate {
    pub product_id: Uuid,
    pub price_per_kilo: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceListEntry {
    pub product_id: Uuid,
    pub name: String,
    pub capital_per_kilo: BigDecimal,
    pub price_per_kilo: BigDecimal,
    pub has_custom_price: bool,
    pub total_purchased: BigDecimal,
}

/// Joins the catalogue with a customer's prices and purchase history.
///
/// Entries are ordered by quantity purchased (most first), then by name.
pub fn build_price_list(
    products: Vec<Product>,
    prices: &[CustomerPrice],
    purchased: &HashMap<Uuid, BigDecimal>,
) -> Vec<PriceListEntry> {
    let custom: HashMap<Uuid, &BigDecimal> = prices
        .iter()
        .map(|p| (p.product_id, &p.price_per_kilo))
        .collect();

    let mut entries: Vec<PriceListEntry> = products
        .into_iter()
        .map(|product| {
            let custom_price = custom.get(&product.id).map(|p| (*p).clone());
            PriceListEntry {
                product_id: product.id,
                has_custom_price: custom_price.is_some(),
                price_per_kilo: custom_price.unwrap_or_else(|| product.capital_per_kilo.clone()),
                total_purchased: purchased
                    .get(&product.id)
                    .cloned()
                    .unwrap_or_else(BigDecimal::zero),
                capital_per_kilo: product.capital_per_kilo,
                name: product.name,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.total_purchased
            .cmp(&a.total_purchased)
            .then_with(|| a.name.cmp(&b.name))
    });
    entries
}

/// Resolves the unit price a customer pays for a product.
pub fn effective_price(product: &Product, prices: &[CustomerPrice]) -> BigDecimal {
    prices
        .iter()
        .find(|p| p.product_id == product.id)
        .map(|p| p.price_per_kilo.clone())
        .unwrap_or_else(|| product.capital_per_kilo.clone())
}

/// Validates a raw `{ product_id: price }` batch against the catalogue.
///
/// The batch is all-or-nothing: the first bad entry rejects everything.
pub fn validate_price_updates(
    products: &[Product],
    raw: &BTreeMap<Uuid, String>,
) -> Result<Vec<PriceUpdate>, DomainError> {
    if raw.is_empty() {
        return Err(DomainError::invalid("No prices supplied"));
    }

    let catalogue: HashMap<Uuid, &Product> = products.iter().map(|p| (p.id, p)).collect();

    raw.iter()
        .map(|(product_id, value)| {
            let product = catalogue
                .get(product_id)
                .ok_or_else(|| DomainError::invalid(format!("Unknown product {product_id}")))?;
            let price = input::decimal("price_per_kilo", value)?;
            if price <= product.capital_per_kilo {
                return Err(DomainError::invalid(format!(
                    "Retail price for {} must be higher than {}",
                    product.name, product.capital_per_kilo
                )));
            }
            Ok(PriceUpdate {
                product_id: *product_id,
                price_per_kilo: price,
            })
        })
        .collect()
}
