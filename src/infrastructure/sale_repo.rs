use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::SaleRepository;
use crate::domain::sale::{NewSale, SaleChanges, SaleLineInput, SaleLineView, SaleView};
use crate::schema::{customers, products, sale_products, sales};

use super::models::{NewSaleLineRow, NewSaleRow, SaleChangeset, SaleLineRow, SaleRow};

pub struct DieselSaleRepository {
    pool: DbPool,
}

impl DieselSaleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Attaches line items (with product name and capital) to each sale header,
/// preserving the order of `headers`.
fn with_lines(conn: &mut PgConnection, headers: Vec<(SaleRow, String)>) -> Result<Vec<SaleView>, DomainError> {
    let ids: Vec<Uuid> = headers.iter().map(|(sale, _)| sale.id).collect();
    let lines: Vec<(SaleLineRow, String, BigDecimal)> = sale_products::table
        .inner_join(products::table)
        .filter(sale_products::sale_id.eq_any(ids))
        .order(products::name.asc())
        .select((SaleLineRow::as_select(), products::name, products::capital_per_kilo))
        .load(conn)?;

    let mut by_sale: HashMap<Uuid, Vec<SaleLineView>> = HashMap::new();
    for (line, product_name, capital_per_kilo) in lines {
        by_sale.entry(line.sale_id).or_default().push(SaleLineView {
            id: line.id,
            product_id: line.product_id,
            product_name,
            capital_per_kilo,
            quantity: line.quantity,
            price: line.price,
        });
    }

    Ok(headers
        .into_iter()
        .map(|(sale, customer_name)| SaleView {
            lines: by_sale.remove(&sale.id).unwrap_or_default(),
            id: sale.id,
            customer_id: sale.customer_id,
            customer_name,
            created_at: sale.created_at,
            total: sale.total,
        })
        .collect())
}

pub(super) fn insert_lines(conn: &mut PgConnection, sale_id: Uuid, lines: Vec<SaleLineInput>) -> Result<(), DomainError> {
    let rows: Vec<NewSaleLineRow> = lines
        .into_iter()
        .map(|l| NewSaleLineRow {
            id: Uuid::new_v4(),
            sale_id,
            product_id: l.product_id,
            quantity: l.quantity,
            price: l.price,
        })
        .collect();
    diesel::insert_into(sale_products::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

impl SaleRepository for DieselSaleRepository {
    fn list(&self) -> Result<Vec<SaleView>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let headers = sales::table
                .inner_join(customers::table)
                .order(sales::created_at.desc())
                .select((SaleRow::as_select(), customers::name))
                .load(conn)?;
            with_lines(conn, headers)
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<SaleView>, DomainError> {
        let mut conn = self.pool.get()?;

        let header = sales::table
            .inner_join(customers::table)
            .filter(sales::id.eq(id))
            .select((SaleRow::as_select(), customers::name))
            .first(&mut conn)
            .optional()?;

        let Some(header) = header else {
            return Ok(None);
        };
        Ok(with_lines(&mut conn, vec![header])?.pop())
    }

    fn create(&self, sale: NewSale) -> Result<Uuid, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let sale_id = Uuid::new_v4();
            diesel::insert_into(sales::table)
                .values(&NewSaleRow {
                    id: sale_id,
                    customer_id: sale.customer_id,
                    total: sale.total,
                    created_at: sale.created_at.unwrap_or_else(Utc::now),
                })
                .execute(conn)?;
            insert_lines(conn, sale_id, sale.lines)?;
            Ok(sale_id)
        })
    }

    fn update(&self, id: Uuid, changes: SaleChanges) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let exists = sales::table
                .find(id)
                .select(sales::id)
                .first::<Uuid>(conn)
                .optional()?;
            if exists.is_none() {
                return Err(DomainError::NotFound("Sale"));
            }

            let (total, lines) = match changes.replacement {
                Some((total, lines)) => (Some(total), Some(lines)),
                None => (None, None),
            };
            let changeset = SaleChangeset {
                customer_id: changes.customer_id,
                total,
                created_at: changes.created_at,
            };
            if !changeset.is_empty() {
                diesel::update(sales::table.find(id)).set(&changeset).execute(conn)?;
            }

            if let Some(lines) = lines {
                diesel::delete(sale_products::table.filter(sale_products::sale_id.eq(id))).execute(conn)?;
                insert_lines(conn, id, lines)?;
            }
            Ok(())
        })
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            diesel::delete(sale_products::table.filter(sale_products::sale_id.eq(id))).execute(conn)?;
            match diesel::delete(sales::table.find(id)).execute(conn)? {
                0 => Err(DomainError::NotFound("Sale")),
                _ => Ok(()),
            }
        })
    }
}
