use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::{CustomerRepository, PricingRepository, ProductRepository, SaleRepository};
use crate::domain::pricing::effective_price;
use crate::domain::sale::{
    check_declared_total, lines_total, parse_lines, NewSale, RawSaleLine, SaleChanges, SaleFilter,
    SaleLineInput, SaleView,
};

/// A sale as submitted for creation.
#[derive(Debug, Clone)]
pub struct SaleDraft {
    pub customer_id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
    pub total: Option<String>,
    pub lines: Vec<RawSaleLine>,
}

/// A partial edit of an existing sale.
#[derive(Debug, Clone, Default)]
pub struct SaleEdit {
    pub customer_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub total: Option<String>,
    pub lines: Option<Vec<RawSaleLine>>,
}

#[derive(Clone)]
pub struct SaleService {
    sales: Arc<dyn SaleRepository>,
    customers: Arc<dyn CustomerRepository>,
    products: Arc<dyn ProductRepository>,
    pricing: Arc<dyn PricingRepository>,
    report_offset: FixedOffset,
}

impl SaleService {
    pub fn new(
        sales: Arc<dyn SaleRepository>,
        customers: Arc<dyn CustomerRepository>,
        products: Arc<dyn ProductRepository>,
        pricing: Arc<dyn PricingRepository>,
        report_offset: FixedOffset,
    ) -> Self {
        Self {
            sales,
            customers,
            products,
            pricing,
            report_offset,
        }
    }

    pub fn list_sales(&self, filter: &SaleFilter) -> Result<Vec<SaleView>, DomainError> {
        Ok(filter.apply(self.sales.list()?, self.report_offset))
    }

    pub fn get_sale(&self, id: Uuid) -> Result<SaleView, DomainError> {
        self.sales.find_by_id(id)?.ok_or(DomainError::NotFound("Sale"))
    }

    fn ensure_customer(&self, customer_id: Uuid) -> Result<(), DomainError> {
        match self.customers.find_by_id(customer_id)? {
            Some(_) => Ok(()),
            None => Err(DomainError::invalid(format!("Unknown customer {customer_id}"))),
        }
    }

    /// Parses lines, pricing the ones without a price from the customer's
    /// price list.
    fn priced_lines(&self, customer_id: Uuid, raw: &[RawSaleLine]) -> Result<Vec<SaleLineInput>, DomainError> {
        let needs_prices = raw.iter().any(|l| l.price.is_none());
        let (products, prices) = if needs_prices {
            (self.products.list()?, self.pricing.prices_for_customer(customer_id)?)
        } else {
            (Vec::new(), Vec::new())
        };

        parse_lines(raw, |product_id| {
            products
                .iter()
                .find(|p| p.id == product_id)
                .map(|p| effective_price(p, &prices))
                .ok_or_else(|| DomainError::invalid(format!("Unknown product {product_id}")))
        })
    }

    pub fn create_sale(&self, draft: SaleDraft) -> Result<SaleView, DomainError> {
        self.ensure_customer(draft.customer_id)?;
        let lines = self.priced_lines(draft.customer_id, &draft.lines)?;
        let total = lines_total(&lines);
        check_declared_total(draft.total.as_deref(), &total)?;

        let id = self.sales.create(NewSale {
            customer_id: draft.customer_id,
            created_at: draft.created_at,
            total,
            lines,
        })?;
        self.get_sale(id)
    }

    /// Applies `edit`. Non-empty `lines` replace every existing line and the
    /// total follows them.
    pub fn update_sale(&self, id: Uuid, edit: SaleEdit) -> Result<SaleView, DomainError> {
        let existing = self.get_sale(id)?;

        let customer_id = edit.customer_id.unwrap_or(existing.customer_id);
        if customer_id != existing.customer_id {
            self.ensure_customer(customer_id)?;
        }

        let replacement = match edit.lines.filter(|lines| !lines.is_empty()) {
            Some(raw) => {
                let lines = self.priced_lines(customer_id, &raw)?;
                let total = lines_total(&lines);
                check_declared_total(edit.total.as_deref(), &total)?;
                Some((total, lines))
            }
            None => {
                check_declared_total(edit.total.as_deref(), &existing.total)?;
                None
            }
        };

        self.sales.update(
            id,
            SaleChanges {
                customer_id: edit.customer_id,
                created_at: edit.created_at,
                replacement,
            },
        )?;
        self.get_sale(id)
    }

    pub fn delete_sale(&self, id: Uuid) -> Result<(), DomainError> {
        log::info!("Deleting sale {id}");
        self.sales.delete(id)
    }
}
