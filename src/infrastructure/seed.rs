//! Demo dataset for a fresh database: two products, two customers with their
//! own prices, and one sale per customer.

use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::sale::{lines_total, SaleLineInput};
use crate::schema::{customer_products, customers, products, sales};

use super::models::{NewCustomerPriceRow, NewCustomerRow, NewProductRow, NewSaleRow};
use super::sale_repo::insert_lines;

/// Rows written by [`seed_demo_data`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub products: usize,
    pub customers: usize,
    pub prices: usize,
    pub sales: usize,
}

/// (name, capital per kilo)
const PRODUCTS: [(&str, i32); 2] = [("Rice", 50), ("Beans", 80)];

/// (name, email, [rice price, beans price], [rice kilos, beans kilos])
const CUSTOMERS: [(&str, &str, [i32; 2], [i32; 2]); 2] = [
    ("Customer A", "a@example.com", [100, 120], [5, 3]),
    ("Customer B", "b@example.com", [110, 130], [10, 7]),
];

/// Inserts the demo dataset in one transaction.
///
/// Returns `Ok(None)` without writing anything when the database already
/// holds customers.
pub fn seed_demo_data(pool: &DbPool) -> Result<Option<SeedReport>, DomainError> {
    let mut conn = pool.get()?;

    conn.transaction::<_, DomainError, _>(|conn| {
        let existing: i64 = customers::table.count().get_result(conn)?;
        if existing > 0 {
            log::info!("Database already has {existing} customers, skipping seed");
            return Ok(None);
        }

        let mut product_ids = Vec::with_capacity(PRODUCTS.len());
        for (name, capital) in PRODUCTS {
            let id = Uuid::new_v4();
            diesel::insert_into(products::table)
                .values(&NewProductRow {
                    id,
                    name,
                    capital_per_kilo: &BigDecimal::from(capital),
                })
                .execute(conn)?;
            product_ids.push(id);
        }

        let now = Utc::now();
        let mut report = SeedReport {
            products: product_ids.len(),
            customers: 0,
            prices: 0,
            sales: 0,
        };

        for (name, email, prices, kilos) in CUSTOMERS {
            let customer_id = Uuid::new_v4();
            diesel::insert_into(customers::table)
                .values(&NewCustomerRow {
                    id: customer_id,
                    name,
                    email,
                })
                .execute(conn)?;
            report.customers += 1;

            let price_values: Vec<BigDecimal> = prices.iter().map(|&p| BigDecimal::from(p)).collect();
            let price_rows: Vec<NewCustomerPriceRow> = product_ids
                .iter()
                .zip(&price_values)
                .map(|(&product_id, price)| NewCustomerPriceRow {
                    customer_id,
                    product_id,
                    price_per_kilo: price,
                    updated_at: now,
                })
                .collect();
            report.prices += diesel::insert_into(customer_products::table)
                .values(&price_rows)
                .execute(conn)?;

            let lines: Vec<SaleLineInput> = product_ids
                .iter()
                .zip(price_values.iter().zip(kilos))
                .map(|(&product_id, (price, quantity))| SaleLineInput {
                    product_id,
                    quantity: BigDecimal::from(quantity),
                    price: price.clone(),
                })
                .collect();
            let sale_id = Uuid::new_v4();
            diesel::insert_into(sales::table)
                .values(&NewSaleRow {
                    id: sale_id,
                    customer_id,
                    total: lines_total(&lines),
                    created_at: now,
                })
                .execute(conn)?;
            insert_lines(conn, sale_id, lines)?;
            report.sales += 1;
        }

        log::info!(
            "Seeded {} products, {} customers, {} prices and {} sales",
            report.products,
            report.customers,
            report.prices,
            report.sales
        );
        Ok(Some(report))
    })
}
