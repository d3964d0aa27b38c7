use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::PricingRepository;
use crate::domain::pricing::{CustomerPrice, PriceUpdate};
use crate::schema::{customer_products, sale_products, sales};

use super::models::{CustomerPriceRow, NewCustomerPriceRow};

pub struct DieselPricingRepository {
    pool: DbPool,
}

impl DieselPricingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl PricingRepository for DieselPricingRepository {
    fn prices_for_customer(&self, customer_id: Uuid) -> Result<Vec<CustomerPrice>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = customer_products::table
            .filter(customer_products::customer_id.eq(customer_id))
            .select(CustomerPriceRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(CustomerPrice::from).collect())
    }

    fn purchased_quantities(&self, customer_id: Uuid) -> Result<HashMap<Uuid, BigDecimal>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows: Vec<(Uuid, Option<BigDecimal>)> = sale_products::table
            .inner_join(sales::table)
            .filter(sales::customer_id.eq(customer_id))
            .group_by(sale_products::product_id)
            .select((sale_products::product_id, diesel::dsl::sum(sale_products::quantity)))
            .load(&mut conn)?;
        Ok(rows
            .into_iter()
            .filter_map(|(product_id, total)| total.map(|t| (product_id, t)))
            .collect())
    }

    fn upsert_prices(
        &self,
        customer_id: Uuid,
        updates: Vec<PriceUpdate>,
    ) -> Result<Vec<CustomerPrice>, DomainError> {
        let mut conn = self.pool.get()?;
        let now = Utc::now();
        let rows: Vec<NewCustomerPriceRow> = updates
            .iter()
            .map(|u| NewCustomerPriceRow {
                customer_id,
                product_id: u.product_id,
                price_per_kilo: &u.price_per_kilo,
                updated_at: now,
            })
            .collect();

        conn.transaction::<_, DomainError, _>(|conn| {
            let saved = diesel::insert_into(customer_products::table)
                .values(&rows)
                .on_conflict((customer_products::customer_id, customer_products::product_id))
                .do_update()
                .set((
                    customer_products::price_per_kilo.eq(excluded(customer_products::price_per_kilo)),
                    customer_products::updated_at.eq(excluded(customer_products::updated_at)),
                ))
                .returning(CustomerPriceRow::as_returning())
                .get_results(conn)?;
            log::debug!("Saved {} prices for customer {customer_id}", saved.len());
            Ok(saved.into_iter().map(CustomerPrice::from).collect())
        })
    }
}
