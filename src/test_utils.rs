//! Shared test utilities.
//!
//! [`InMemoryStore`] implements every repository port over plain vectors so
//! services and handlers can be exercised without PostgreSQL. It mirrors the
//! database's constraints that the services rely on: unique emails, foreign
//! keys and cascading deletes.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use uuid::Uuid;

use crate::application::{
    AnalyticsService, CustomerService, PricingService, ProductService, SaleService, UserService,
};
use crate::domain::analytics::EntityCounts;
use crate::domain::customer::{Customer, CustomerInput};
use crate::domain::errors::DomainError;
use crate::domain::ports::{
    CustomerRepository, PricingRepository, ProductRepository, SaleRepository, StatsRepository,
    UserRepository,
};
use crate::domain::pricing::{CustomerPrice, PriceUpdate};
use crate::domain::product::{Product, ProductInput};
use crate::domain::sale::{lines_total, NewSale, SaleChanges, SaleLineInput, SaleLineView, SaleView};
use crate::domain::user::{User, UserInput};
use crate::state::AppState;

/// Ids of the rows created by [`InMemoryStore::seed`].
#[derive(Debug, Clone, Copy)]
pub struct Seed {
    pub customer_a: Uuid,
    pub customer_b: Uuid,
    pub rice: Uuid,
    pub beans: Uuid,
}

struct StoredSale {
    id: Uuid,
    customer_id: Uuid,
    created_at: DateTime<Utc>,
    total: BigDecimal,
    lines: Vec<(Uuid, SaleLineInput)>,
}

#[derive(Default)]
struct State {
    customers: Vec<Customer>,
    products: Vec<Product>,
    prices: Vec<CustomerPrice>,
    sales: Vec<StoredSale>,
    users: Vec<User>,
}

impl State {
    fn view(&self, sale: &StoredSale) -> SaleView {
        let customer_name = self
            .customers
            .iter()
            .find(|c| c.id == sale.customer_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        SaleView {
            id: sale.id,
            customer_id: sale.customer_id,
            customer_name,
            created_at: sale.created_at,
            total: sale.total.clone(),
            lines: sale
                .lines
                .iter()
                .map(|(id, line)| {
                    let product = self.products.iter().find(|p| p.id == line.product_id);
                    SaleLineView {
                        id: *id,
                        product_id: line.product_id,
                        product_name: product.map(|p| p.name.clone()).unwrap_or_default(),
                        capital_per_kilo: product
                            .map(|p| p.capital_per_kilo.clone())
                            .unwrap_or_else(BigDecimal::zero),
                        quantity: line.quantity.clone(),
                        price: line.price.clone(),
                    }
                })
                .collect(),
        }
    }

    fn has_customer(&self, id: Uuid) -> bool {
        self.customers.iter().any(|c| c.id == id)
    }

    fn check_lines(&self, lines: &[SaleLineInput]) -> Result<(), DomainError> {
        match lines
            .iter()
            .find(|l| !self.products.iter().any(|p| p.id == l.product_id))
        {
            Some(l) => Err(DomainError::invalid(format!("Unknown product {}", l.product_id))),
            None => Ok(()),
        }
    }

    fn email_taken<'a>(mut emails: impl Iterator<Item = (Uuid, &'a str)>, email: &str, except: Option<Uuid>) -> bool {
        emails.any(|(id, e)| Some(id) != except && e.eq_ignore_ascii_case(email))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).expect("valid decimal")
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("store poisoned")
    }

    /// Two products, two customers with their own prices, and one two-line
    /// sale each in October 2025.
    pub fn seed(&self) -> Seed {
        let mut state = self.lock();
        let now = Utc::now();
        let seed = Seed {
            customer_a: Uuid::new_v4(),
            customer_b: Uuid::new_v4(),
            rice: Uuid::new_v4(),
            beans: Uuid::new_v4(),
        };

        state.products.push(Product {
            id: seed.rice,
            name: "Rice".to_string(),
            capital_per_kilo: dec("50"),
            created_at: now,
        });
        state.products.push(Product {
            id: seed.beans,
            name: "Beans".to_string(),
            capital_per_kilo: dec("80"),
            created_at: now,
        });
        for (id, name, email) in [
            (seed.customer_a, "Customer A", "a@example.com"),
            (seed.customer_b, "Customer B", "b@example.com"),
        ] {
            state.customers.push(Customer {
                id,
                name: name.to_string(),
                email: email.to_string(),
                created_at: now,
            });
        }
        for (customer_id, product_id, price) in [
            (seed.customer_a, seed.rice, "100"),
            (seed.customer_a, seed.beans, "120"),
            (seed.customer_b, seed.rice, "110"),
            (seed.customer_b, seed.beans, "130"),
        ] {
            state.prices.push(CustomerPrice {
                customer_id,
                product_id,
                price_per_kilo: dec(price),
                updated_at: now,
            });
        }

        let sales = [
            (seed.customer_a, 1, [("5", "100"), ("3", "120")]),
            (seed.customer_b, 2, [("10", "110"), ("7", "130")]),
        ];
        for (customer_id, day, [(rice_kg, rice_price), (beans_kg, beans_price)]) in sales {
            let lines = vec![
                SaleLineInput {
                    product_id: seed.rice,
                    quantity: dec(rice_kg),
                    price: dec(rice_price),
                },
                SaleLineInput {
                    product_id: seed.beans,
                    quantity: dec(beans_kg),
                    price: dec(beans_price),
                },
            ];
            state.sales.push(StoredSale {
                id: Uuid::new_v4(),
                customer_id,
                created_at: Utc
                    .with_ymd_and_hms(2025, 10, day, 4, 0, 0)
                    .single()
                    .expect("valid date"),
                total: lines_total(&lines),
                lines: lines.into_iter().map(|l| (Uuid::new_v4(), l)).collect(),
            });
        }
        seed
    }

    pub fn sales_of(&self, customer_id: Uuid) -> Vec<SaleView> {
        let state = self.lock();
        state
            .sales
            .iter()
            .filter(|s| s.customer_id == customer_id)
            .map(|s| state.view(s))
            .collect()
    }

    pub fn prices_of(&self, customer_id: Uuid) -> Vec<CustomerPrice> {
        self.lock()
            .prices
            .iter()
            .filter(|p| p.customer_id == customer_id)
            .cloned()
            .collect()
    }

    /// Application state wired entirely to this store.
    pub fn app_state(&self) -> AppState {
        let shared = Arc::new(self.clone());
        let offset = FixedOffset::east_opt(0).expect("valid offset");
        AppState {
            customers: CustomerService::new(shared.clone()),
            products: ProductService::new(shared.clone()),
            pricing: PricingService::new(shared.clone(), shared.clone(), shared.clone()),
            sales: SaleService::new(shared.clone(), shared.clone(), shared.clone(), shared.clone(), offset),
            users: UserService::new(shared.clone()),
            analytics: AnalyticsService::new(shared.clone(), shared, offset),
        }
    }
}

impl CustomerRepository for InMemoryStore {
    fn list(&self) -> Result<Vec<Customer>, DomainError> {
        Ok(self.lock().customers.clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        Ok(self.lock().customers.iter().find(|c| c.id == id).cloned())
    }

    fn create(&self, input: CustomerInput) -> Result<Customer, DomainError> {
        let mut state = self.lock();
        let emails = state.customers.iter().map(|c| (c.id, c.email.as_str()));
        if State::email_taken(emails, &input.email, None) {
            return Err(DomainError::Conflict(format!("Email {} already exists", input.email)));
        }
        let customer = Customer {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            created_at: Utc::now(),
        };
        state.customers.push(customer.clone());
        Ok(customer)
    }

    fn update(&self, id: Uuid, input: CustomerInput) -> Result<Customer, DomainError> {
        let mut state = self.lock();
        let emails = state.customers.iter().map(|c| (c.id, c.email.as_str()));
        if State::email_taken(emails, &input.email, Some(id)) {
            return Err(DomainError::Conflict(format!("Email {} already exists", input.email)));
        }
        let customer = state
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DomainError::NotFound("Customer"))?;
        customer.name = input.name;
        customer.email = input.email;
        Ok(customer.clone())
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut state = self.lock();
        if !state.has_customer(id) {
            return Err(DomainError::NotFound("Customer"));
        }
        state.sales.retain(|s| s.customer_id != id);
        state.prices.retain(|p| p.customer_id != id);
        state.customers.retain(|c| c.id != id);
        Ok(())
    }
}

impl ProductRepository for InMemoryStore {
    fn list(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.lock().products.clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        Ok(self.lock().products.iter().find(|p| p.id == id).cloned())
    }

    fn create(&self, input: ProductInput) -> Result<Product, DomainError> {
        let product = Product {
            id: Uuid::new_v4(),
            name: input.name,
            capital_per_kilo: input.capital_per_kilo,
            created_at: Utc::now(),
        };
        self.lock().products.push(product.clone());
        Ok(product)
    }

    fn update(&self, id: Uuid, input: ProductInput) -> Result<Product, DomainError> {
        let mut state = self.lock();
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::NotFound("Product"))?;
        product.name = input.name;
        product.capital_per_kilo = input.capital_per_kilo;
        Ok(product.clone())
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut state = self.lock();
        if !state.products.iter().any(|p| p.id == id) {
            return Err(DomainError::NotFound("Product"));
        }
        for sale in state.sales.iter_mut() {
            let before = sale.lines.len();
            sale.lines.retain(|(_, l)| l.product_id != id);
            if sale.lines.len() != before {
                sale.total = sale
                    .lines
                    .iter()
                    .fold(BigDecimal::zero(), |acc, (_, l)| acc + &l.price * &l.quantity);
            }
        }
        state.prices.retain(|p| p.product_id != id);
        state.products.retain(|p| p.id != id);
        Ok(())
    }
}

impl PricingRepository for InMemoryStore {
    fn prices_for_customer(&self, customer_id: Uuid) -> Result<Vec<CustomerPrice>, DomainError> {
        Ok(self.prices_of(customer_id))
    }

    fn purchased_quantities(&self, customer_id: Uuid) -> Result<HashMap<Uuid, BigDecimal>, DomainError> {
        let state = self.lock();
        let mut totals: HashMap<Uuid, BigDecimal> = HashMap::new();
        for (_, line) in state
            .sales
            .iter()
            .filter(|s| s.customer_id == customer_id)
            .flat_map(|s| &s.lines)
        {
            *totals.entry(line.product_id).or_insert_with(BigDecimal::zero) += &line.quantity;
        }
        Ok(totals)
    }

    fn upsert_prices(
        &self,
        customer_id: Uuid,
        updates: Vec<PriceUpdate>,
    ) -> Result<Vec<CustomerPrice>, DomainError> {
        let mut state = self.lock();
        let now = Utc::now();
        let mut saved = Vec::with_capacity(updates.len());
        for update in updates {
            let row = CustomerPrice {
                customer_id,
                product_id: update.product_id,
                price_per_kilo: update.price_per_kilo,
                updated_at: now,
            };
            match state
                .prices
                .iter_mut()
                .find(|p| p.customer_id == customer_id && p.product_id == row.product_id)
            {
                Some(existing) => *existing = row.clone(),
                None => state.prices.push(row.clone()),
            }
            saved.push(row);
        }
        Ok(saved)
    }
}

impl SaleRepository for InMemoryStore {
    fn list(&self) -> Result<Vec<SaleView>, DomainError> {
        let state = self.lock();
        let mut sales: Vec<SaleView> = state.sales.iter().map(|s| state.view(s)).collect();
        sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sales)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<SaleView>, DomainError> {
        let state = self.lock();
        Ok(state.sales.iter().find(|s| s.id == id).map(|s| state.view(s)))
    }

    fn create(&self, sale: NewSale) -> Result<Uuid, DomainError> {
        let mut state = self.lock();
        if !state.has_customer(sale.customer_id) {
            return Err(DomainError::invalid(format!("Unknown customer {}", sale.customer_id)));
        }
        state.check_lines(&sale.lines)?;
        let id = Uuid::new_v4();
        state.sales.push(StoredSale {
            id,
            customer_id: sale.customer_id,
            created_at: sale.created_at.unwrap_or_else(Utc::now),
            total: sale.total,
            lines: sale.lines.into_iter().map(|l| (Uuid::new_v4(), l)).collect(),
        });
        Ok(id)
    }

    fn update(&self, id: Uuid, changes: SaleChanges) -> Result<(), DomainError> {
        let mut state = self.lock();
        if let Some(customer_id) = changes.customer_id {
            if !state.has_customer(customer_id) {
                return Err(DomainError::invalid(format!("Unknown customer {customer_id}")));
            }
        }
        if let Some((_, lines)) = &changes.replacement {
            state.check_lines(lines)?;
        }
        let sale = state
            .sales
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(DomainError::NotFound("Sale"))?;
        if let Some(customer_id) = changes.customer_id {
            sale.customer_id = customer_id;
        }
        if let Some(created_at) = changes.created_at {
            sale.created_at = created_at;
        }
        if let Some((total, lines)) = changes.replacement {
            sale.total = total;
            sale.lines = lines.into_iter().map(|l| (Uuid::new_v4(), l)).collect();
        }
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut state = self.lock();
        let before = state.sales.len();
        state.sales.retain(|s| s.id != id);
        if state.sales.len() == before {
            return Err(DomainError::NotFound("Sale"));
        }
        Ok(())
    }
}

impl UserRepository for InMemoryStore {
    fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.lock().users.clone())
    }

    fn create(&self, input: UserInput) -> Result<User, DomainError> {
        let mut state = self.lock();
        let emails = state.users.iter().map(|u| (u.id, u.email.as_str()));
        if State::email_taken(emails, &input.email, None) {
            return Err(DomainError::Conflict(format!("Email {} already exists", input.email)));
        }
        let user = User {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }
}

impl StatsRepository for InMemoryStore {
    fn counts(&self) -> Result<EntityCounts, DomainError> {
        let state = self.lock();
        Ok(EntityCounts {
            customers: state.customers.len() as i64,
            products: state.products.len() as i64,
            users: state.users.len() as i64,
        })
    }
}
