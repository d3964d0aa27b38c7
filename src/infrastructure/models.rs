use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::customer::Customer;
use crate::domain::pricing::CustomerPrice;
use crate::domain::product::Product;
use crate::domain::user::User;
use crate::schema::{customer_products, customers, products, sale_products, sales, users};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = customers)]
pub struct CustomerChangeset<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = customers)]
pub struct NewCustomerRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub capital_per_kilo: BigDecimal,
    pub created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            capital_per_kilo: row.capital_per_kilo,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub capital_per_kilo: &'a BigDecimal,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = products)]
pub struct ProductChangeset<'a> {
    pub name: &'a str,
    pub capital_per_kilo: &'a BigDecimal,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = customer_products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerPriceRow {
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub price_per_kilo: BigDecimal,
    pub updated_at: DateTime<Utc>,
}

impl From<CustomerPriceRow> for CustomerPrice {
    fn from(row: CustomerPriceRow) -> Self {
        CustomerPrice {
            customer_id: row.customer_id,
            product_id: row.product_id,
            price_per_kilo: row.price_per_kilo,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = customer_products)]
pub struct NewCustomerPriceRow<'a> {
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub price_per_kilo: &'a BigDecimal,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = sales)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SaleRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub total: BigDecimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = sales)]
pub struct NewSaleRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub total: BigDecimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = sale_products)]
#[diesel(belongs_to(SaleRow, foreign_key = sale_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SaleLineRow {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub product_id: Uuid,
    pub quantity: BigDecimal,
    pub price: BigDecimal,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = sale_products)]
pub struct NewSaleLineRow {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub product_id: Uuid,
    pub quantity: BigDecimal,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
}

/// Columns of `sales` touched by an edit; `None` fields are left as they are.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = sales)]
pub struct SaleChangeset {
    pub customer_id: Option<Uuid>,
    pub total: Option<BigDecimal>,
    pub created_at: Option<DateTime<Utc>>,
}

impl SaleChangeset {
    pub fn is_empty(&self) -> bool {
        self.customer_id.is_none() && self.total.is_none() && self.created_at.is_none()
    }
}
