use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::customer::{Customer, CustomerInput};
use crate::domain::errors::DomainError;
use crate::domain::ports::CustomerRepository;
use crate::schema::{customer_products, customers, sale_products, sales};

use super::models::{CustomerChangeset, CustomerRow, NewCustomerRow};

pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CustomerRepository for DieselCustomerRepository {
    fn list(&self) -> Result<Vec<Customer>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = customers::table
            .select(CustomerRow::as_select())
            .order(customers::name.asc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = customers::table
            .find(id)
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Customer::from))
    }

    fn create(&self, input: CustomerInput) -> Result<Customer, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(customers::table)
            .values(&NewCustomerRow {
                id: Uuid::new_v4(),
                name: &input.name,
                email: &input.email,
            })
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn update(&self, id: Uuid, input: CustomerInput) -> Result<Customer, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::update(customers::table.find(id))
            .set(&CustomerChangeset {
                name: &input.name,
                email: &input.email,
            })
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)
            .optional()?;
        row.map(Customer::from).ok_or(DomainError::NotFound("Customer"))
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let sale_ids = sales::table
                .filter(sales::customer_id.eq(id))
                .select(sales::id);
            diesel::delete(sale_products::table.filter(sale_products::sale_id.eq_any(sale_ids)))
                .execute(conn)?;
            diesel::delete(sales::table.filter(sales::customer_id.eq(id))).execute(conn)?;
            diesel::delete(customer_products::table.filter(customer_products::customer_id.eq(id)))
                .execute(conn)?;

            match diesel::delete(customers::table.find(id)).execute(conn)? {
                0 => Err(DomainError::NotFound("Customer")),
                _ => Ok(()),
            }
        })
    }
}
