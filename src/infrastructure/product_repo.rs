use bigdecimal::{BigDecimal, Zero};
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{Product, ProductInput};
use crate::schema::{customer_products, products, sale_products, sales};

use super::models::{NewProductRow, ProductChangeset, ProductRow};

pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Rewrites `sales.total` from the lines that remain on each sale.
fn recompute_totals(conn: &mut PgConnection, sale_ids: &[Uuid]) -> Result<(), DomainError> {
    for &sale_id in sale_ids {
        let lines: Vec<(BigDecimal, BigDecimal)> = sale_products::table
            .filter(sale_products::sale_id.eq(sale_id))
            .select((sale_products::quantity, sale_products::price))
            .load(conn)?;
        let total = lines
            .iter()
            .fold(BigDecimal::zero(), |acc, (quantity, price)| acc + price * quantity);
        diesel::update(sales::table.find(sale_id))
            .set(sales::total.eq(total))
            .execute(conn)?;
    }
    Ok(())
}

impl ProductRepository for DieselProductRepository {
    fn list(&self) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = products::table
            .select(ProductRow::as_select())
            .order(products::name.asc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = products::table
            .find(id)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Product::from))
    }

    fn create(&self, input: ProductInput) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(products::table)
            .values(&NewProductRow {
                id: Uuid::new_v4(),
                name: &input.name,
                capital_per_kilo: &input.capital_per_kilo,
            })
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn update(&self, id: Uuid, input: ProductInput) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::update(products::table.find(id))
            .set(&ProductChangeset {
                name: &input.name,
                capital_per_kilo: &input.capital_per_kilo,
            })
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .optional()?;
        row.map(Product::from).ok_or(DomainError::NotFound("Product"))
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let affected: Vec<Uuid> = sale_products::table
                .filter(sale_products::product_id.eq(id))
                .select(sale_products::sale_id)
                .distinct()
                .load(conn)?;

            diesel::delete(sale_products::table.filter(sale_products::product_id.eq(id))).execute(conn)?;
            diesel::delete(customer_products::table.filter(customer_products::product_id.eq(id)))
                .execute(conn)?;
            if diesel::delete(products::table.find(id)).execute(conn)? == 0 {
                return Err(DomainError::NotFound("Product"));
            }

            recompute_totals(conn, &affected)
        })
    }
}
