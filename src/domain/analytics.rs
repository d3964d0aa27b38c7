//! Sales analytics.
//!
//! Everything here is a pure function over [`SaleView`] records and a
//! reference instant. Calendar questions (which month, which day) are
//! answered in the offset carried by `now`, so a sale made late in the
//! evening lands on the business's local day rather than the UTC one.
//!
//! Money stays in `BigDecimal` end to end. Percentages are rounded half-up to
//! one decimal place, averages to two.

use std::collections::{BTreeMap, HashMap};

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use chrono::{DateTime, Datelike, FixedOffset, Month, Months, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::errors::DomainError;
use super::sale::SaleView;

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Rolling trend window: six months back through five months ahead.
const TREND_MONTHS_BEFORE: u32 = 6;
const TREND_LEN: u32 = 12;

/// A single calendar month used to narrow a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthScope {
    pub year: i32,
    pub month: Month,
}

impl MonthScope {
    /// Accepts a full name (`"october"`), a three-letter abbreviation
    /// (`"Oct"`, plus `"Sept"`) or a number (`"10"`), case-insensitive. A
    /// missing year means the year of `now`.
    pub fn parse(month: &str, year: Option<i32>, now: DateTime<FixedOffset>) -> Result<Self, DomainError> {
        let trimmed = month.trim();
        let month = match trimmed.parse::<usize>() {
            Ok(n) if (1..=12).contains(&n) => MONTHS[n - 1],
            Ok(_) => return Err(DomainError::invalid(format!("Invalid month '{trimmed}'"))),
            Err(_) if trimmed.eq_ignore_ascii_case("sept") => Month::September,
            Err(_) => trimmed
                .parse::<Month>()
                .map_err(|_| DomainError::invalid(format!("Invalid month '{trimmed}'")))?,
        };
        Ok(Self {
            year: year.unwrap_or_else(|| now.year()),
            month,
        })
    }

    fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.number_from_month(), 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month.number_from_month()
    }

    pub fn label(&self) -> String {
        self.first_day()
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| format!("{} {}", self.month.name(), self.year))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Totals {
    #[schema(value_type = String)]
    pub gross: BigDecimal,
    #[schema(value_type = String)]
    pub net: BigDecimal,
    #[schema(value_type = String)]
    pub profit_percent: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthBucket {
    /// `YYYY-MM`
    pub key: String,
    /// `Mon YYYY`
    pub label: String,
    #[schema(value_type = String)]
    pub gross: BigDecimal,
    #[schema(value_type = String)]
    pub net: BigDecimal,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PeriodTotals {
    pub from: NaiveDate,
    pub to: NaiveDate,
    #[schema(value_type = String)]
    pub gross: BigDecimal,
    #[schema(value_type = String)]
    pub net: BigDecimal,
    #[schema(value_type = String)]
    pub profit_percent: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PeriodComparison {
    pub current: PeriodTotals,
    pub previous: PeriodTotals,
    #[schema(value_type = String)]
    pub gross_change: BigDecimal,
    #[schema(value_type = String)]
    pub gross_change_percent: BigDecimal,
    #[schema(value_type = String)]
    pub net_change: BigDecimal,
    #[schema(value_type = String)]
    pub net_change_percent: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SaleHighlight {
    pub sale_id: Uuid,
    pub customer_name: String,
    #[schema(value_type = String)]
    pub total: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BusinessSummary {
    pub sale_count: usize,
    #[schema(value_type = String)]
    pub average_per_day: BigDecimal,
    #[schema(value_type = String)]
    pub average_sale_value: BigDecimal,
    #[schema(value_type = String)]
    pub min_sale_total: BigDecimal,
    #[schema(value_type = String)]
    pub max_sale_total: BigDecimal,
    #[schema(value_type = String)]
    pub average_profit_per_sale: BigDecimal,
    #[schema(value_type = String)]
    pub min_sale_net: BigDecimal,
    #[schema(value_type = String)]
    pub max_sale_net: BigDecimal,
    pub highest_sale: Option<SaleHighlight>,
    pub lowest_sale: Option<SaleHighlight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CustomerRank {
    pub customer_id: Uuid,
    pub name: String,
    #[schema(value_type = String)]
    pub total: BigDecimal,
    #[schema(value_type = String)]
    pub share_percent: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductRank {
    pub product_id: Uuid,
    pub name: String,
    #[schema(value_type = String)]
    pub quantity: BigDecimal,
    #[schema(value_type = String)]
    pub sales_value: BigDecimal,
    #[schema(value_type = String)]
    pub net: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlySales {
    pub key: String,
    pub label: String,
    #[schema(value_type = String)]
    pub gross: BigDecimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct EntityCounts {
    pub customers: i64,
    pub products: i64,
    pub users: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardStats {
    pub customers: i64,
    pub products: i64,
    pub users: i64,
    #[schema(value_type = String)]
    pub total_sales: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub sales_by_month: Vec<MonthlySales>,
    pub customers: Vec<CustomerRank>,
    pub products: Vec<ProductRank>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AnalyticsReport {
    /// `"All time"` or the selected month, e.g. `"Oct 2026"`.
    pub scope: String,
    pub totals: Totals,
    pub monthly_trend: Vec<MonthBucket>,
    pub comparison: PeriodComparison,
    pub summary: BusinessSummary,
}

// ── Primitives ───────────────────────────────────────────────────────────────

fn local_date(at: &DateTime<Utc>, offset: &FixedOffset) -> NaiveDate {
    at.with_timezone(offset).date_naive()
}

fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn days_in_month(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .map(|next| next.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31)
}

fn round(value: BigDecimal, scale: i64) -> BigDecimal {
    value.with_scale_round(scale, RoundingMode::HalfUp)
}

/// `part / whole × 100`, or zero when `whole` is zero.
pub fn percent_of(part: &BigDecimal, whole: &BigDecimal) -> BigDecimal {
    if whole.is_zero() {
        return BigDecimal::zero();
    }
    let hundred = BigDecimal::from(100);
    round(part * &hundred / whole, 1)
}

/// Relative change from `previous` to `current`, or zero without a baseline.
pub fn change_percent(current: &BigDecimal, previous: &BigDecimal) -> BigDecimal {
    percent_of(&(current - previous), previous)
}

fn average(sum: &BigDecimal, count: u64) -> BigDecimal {
    if count == 0 {
        return BigDecimal::zero();
    }
    round(sum / &BigDecimal::from(count), 2)
}

// ── Aggregates ───────────────────────────────────────────────────────────────

/// Sum of recorded sale totals.
pub fn gross_sales<'a>(sales: impl IntoIterator<Item = &'a SaleView>) -> BigDecimal {
    sales
        .into_iter()
        .fold(BigDecimal::zero(), |acc, s| acc + &s.total)
}

/// Gross minus cost basis over every sold kilo.
pub fn net_sales<'a>(sales: impl IntoIterator<Item = &'a SaleView>) -> BigDecimal {
    sales
        .into_iter()
        .fold(BigDecimal::zero(), |acc, s| acc + s.net())
}

pub fn totals(sales: &[SaleView]) -> Totals {
    let gross = gross_sales(sales);
    let net = net_sales(sales);
    Totals {
        profit_percent: percent_of(&net, &gross),
        gross,
        net,
    }
}

pub fn filter_by_month(sales: &[SaleView], scope: MonthScope, offset: FixedOffset) -> Vec<SaleView> {
    sales
        .iter()
        .filter(|s| scope.contains(local_date(&s.created_at, &offset)))
        .cloned()
        .collect()
}

/// Twelve month buckets around `now`: six before its month, the month
/// itself, and five after.
pub fn monthly_trend(sales: &[SaleView], now: DateTime<FixedOffset>) -> Vec<MonthBucket> {
    if sales.is_empty() {
        return Vec::new();
    }

    let offset = *now.offset();
    let mut by_month: HashMap<String, (BigDecimal, BigDecimal)> = HashMap::new();
    for sale in sales {
        let entry = by_month
            .entry(month_key(local_date(&sale.created_at, &offset)))
            .or_insert_with(|| (BigDecimal::zero(), BigDecimal::zero()));
        entry.0 += &sale.total;
        entry.1 += sale.net();
    }

    let current = first_of_month(now.date_naive());
    let Some(start) = current.checked_sub_months(Months::new(TREND_MONTHS_BEFORE)) else {
        return Vec::new();
    };

    (0..TREND_LEN)
        .filter_map(|i| start.checked_add_months(Months::new(i)))
        .map(|month| {
            let key = month_key(month);
            let (gross, net) = by_month
                .remove(&key)
                .unwrap_or_else(|| (BigDecimal::zero(), BigDecimal::zero()));
            MonthBucket {
                label: month_label(month),
                is_current: month == current,
                key,
                gross,
                net,
            }
        })
        .collect()
}

fn period_totals(sales: &[SaleView], from: NaiveDate, to: NaiveDate, offset: &FixedOffset) -> PeriodTotals {
    let in_period: Vec<&SaleView> = sales
        .iter()
        .filter(|s| {
            let day = local_date(&s.created_at, offset);
            day >= from && day <= to
        })
        .collect();
    let gross = gross_sales(in_period.iter().copied());
    let net = net_sales(in_period.iter().copied());
    PeriodTotals {
        from,
        to,
        profit_percent: percent_of(&net, &gross),
        gross,
        net,
    }
}

/// Month-to-date against the same days of the previous month.
///
/// When the previous month is shorter than today's day number, the whole of
/// it is counted.
pub fn same_period_comparison(sales: &[SaleView], now: DateTime<FixedOffset>) -> PeriodComparison {
    let offset = *now.offset();
    let today = now.date_naive();
    let current_start = first_of_month(today);
    let previous_start = current_start
        .checked_sub_months(Months::new(1))
        .unwrap_or(current_start);
    let previous_last_day = today.day().min(days_in_month(previous_start));
    let previous_end = previous_start
        .with_day(previous_last_day)
        .unwrap_or(previous_start);

    let current = period_totals(sales, current_start, today, &offset);
    let previous = period_totals(sales, previous_start, previous_end, &offset);

    PeriodComparison {
        gross_change: &current.gross - &previous.gross,
        gross_change_percent: change_percent(&current.gross, &previous.gross),
        net_change: &current.net - &previous.net,
        net_change_percent: change_percent(&current.net, &previous.net),
        current,
        previous,
    }
}

fn highlight(sale: &SaleView) -> SaleHighlight {
    SaleHighlight {
        sale_id: sale.id,
        customer_name: sale.customer_name.clone(),
        total: sale.total.clone(),
    }
}

/// Counts, averages and extremes for a set of sales.
///
/// With a month scope the daily average spreads over that month's days;
/// otherwise over the days since the earliest sale, today included.
pub fn business_summary(
    sales: &[SaleView],
    scope: Option<MonthScope>,
    now: DateTime<FixedOffset>,
) -> BusinessSummary {
    let offset = *now.offset();
    let count = sales.len() as u64;
    let gross = gross_sales(sales);
    let net = net_sales(sales);
    let nets: Vec<BigDecimal> = sales.iter().map(SaleView::net).collect();

    let days = match scope {
        Some(scope) => scope.first_day().map(days_in_month).unwrap_or(30) as i64,
        None => sales
            .iter()
            .map(|s| local_date(&s.created_at, &offset))
            .min()
            .map(|earliest| now.date_naive().signed_duration_since(earliest).num_days() + 1)
            .unwrap_or(1)
            .max(1),
    };

    let mut highest: Option<&SaleView> = None;
    let mut lowest: Option<&SaleView> = None;
    for sale in sales {
        if highest.map_or(true, |h| sale.total > h.total) {
            highest = Some(sale);
        }
        if lowest.map_or(true, |l| sale.total < l.total) {
            lowest = Some(sale);
        }
    }

    BusinessSummary {
        sale_count: sales.len(),
        average_per_day: if count == 0 {
            BigDecimal::zero()
        } else {
            round(BigDecimal::from(count) / &BigDecimal::from(days), 2)
        },
        average_sale_value: average(&gross, count),
        min_sale_total: lowest.map(|s| s.total.clone()).unwrap_or_else(BigDecimal::zero),
        max_sale_total: highest.map(|s| s.total.clone()).unwrap_or_else(BigDecimal::zero),
        average_profit_per_sale: average(&net, count),
        min_sale_net: nets.iter().min().cloned().unwrap_or_else(BigDecimal::zero),
        max_sale_net: nets.iter().max().cloned().unwrap_or_else(BigDecimal::zero),
        highest_sale: highest.map(highlight),
        lowest_sale: lowest.map(highlight),
    }
}

/// Customers by summed sale totals, largest first, then by name.
pub fn customer_ranking(sales: &[SaleView]) -> Vec<CustomerRank> {
    let gross = gross_sales(sales);
    let mut by_customer: HashMap<Uuid, (String, BigDecimal)> = HashMap::new();
    for sale in sales {
        let entry = by_customer
            .entry(sale.customer_id)
            .or_insert_with(|| (sale.customer_name.clone(), BigDecimal::zero()));
        entry.1 += &sale.total;
    }

    let mut ranks: Vec<CustomerRank> = by_customer
        .into_iter()
        .map(|(customer_id, (name, total))| CustomerRank {
            customer_id,
            share_percent: percent_of(&total, &gross),
            name,
            total,
        })
        .collect();
    ranks.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    ranks
}

/// Products by sales value (Σ price × quantity per line), largest first,
/// then by name.
pub fn product_ranking(sales: &[SaleView]) -> Vec<ProductRank> {
    let mut by_product: HashMap<Uuid, ProductRank> = HashMap::new();
    for line in sales.iter().flat_map(|s| &s.lines) {
        let entry = by_product.entry(line.product_id).or_insert_with(|| ProductRank {
            product_id: line.product_id,
            name: line.product_name.clone(),
            quantity: BigDecimal::zero(),
            sales_value: BigDecimal::zero(),
            net: BigDecimal::zero(),
        });
        entry.quantity += &line.quantity;
        entry.sales_value += line.amount();
        entry.net += line.net();
    }

    let mut ranks: Vec<ProductRank> = by_product.into_values().collect();
    ranks.sort_by(|a, b| {
        b.sales_value
            .cmp(&a.sales_value)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranks
}

/// Gross per calendar month, oldest first. Months without sales are omitted.
pub fn sales_by_month(sales: &[SaleView], offset: FixedOffset) -> Vec<MonthlySales> {
    let mut by_month: BTreeMap<String, (String, BigDecimal)> = BTreeMap::new();
    for sale in sales {
        let date = local_date(&sale.created_at, &offset);
        let entry = by_month
            .entry(month_key(date))
            .or_insert_with(|| (month_label(date), BigDecimal::zero()));
        entry.1 += &sale.total;
    }
    by_month
        .into_iter()
        .map(|(key, (label, gross))| MonthlySales { key, label, gross })
        .collect()
}

pub fn dashboard(counts: EntityCounts, sales: &[SaleView], offset: FixedOffset) -> Dashboard {
    Dashboard {
        stats: DashboardStats {
            customers: counts.customers,
            products: counts.products,
            users: counts.users,
            total_sales: gross_sales(sales),
        },
        sales_by_month: sales_by_month(sales, offset),
        customers: customer_ranking(sales),
        products: product_ranking(sales),
    }
}

/// The analytics page: totals and summary follow `scope`, while the trend
/// and the month-to-date comparison always look at every sale.
pub fn analytics_report(
    sales: &[SaleView],
    scope: Option<MonthScope>,
    now: DateTime<FixedOffset>,
) -> AnalyticsReport {
    let scoped: Vec<SaleView> = match scope {
        Some(scope) => filter_by_month(sales, scope, *now.offset()),
        None => sales.to_vec(),
    };

    AnalyticsReport {
        scope: scope.map_or_else(|| "All time".to_string(), |s| s.label()),
        totals: totals(&scoped),
        monthly_trend: monthly_trend(sales, now),
        comparison: same_period_comparison(sales, now),
        summary: business_summary(&scoped, scope, now),
    }
}
