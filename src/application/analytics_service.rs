use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};

use crate::domain::analytics::{self, AnalyticsReport, Dashboard, MonthScope};
use crate::domain::errors::DomainError;
use crate::domain::ports::{SaleRepository, StatsRepository};

#[derive(Clone)]
pub struct AnalyticsService {
    sales: Arc<dyn SaleRepository>,
    stats: Arc<dyn StatsRepository>,
    report_offset: FixedOffset,
}

impl AnalyticsService {
    pub fn new(sales: Arc<dyn SaleRepository>, stats: Arc<dyn StatsRepository>, report_offset: FixedOffset) -> Self {
        Self {
            sales,
            stats,
            report_offset,
        }
    }

    pub fn dashboard(&self) -> Result<Dashboard, DomainError> {
        let counts = self.stats.counts()?;
        let sales = self.sales.list()?;
        Ok(analytics::dashboard(counts, &sales, self.report_offset))
    }

    /// Builds the analytics report as seen at `now`, optionally narrowed to
    /// one month.
    pub fn report(
        &self,
        month: Option<&str>,
        year: Option<i32>,
        now: DateTime<Utc>,
    ) -> Result<AnalyticsReport, DomainError> {
        let now = now.with_timezone(&self.report_offset);
        let scope = match month.map(str::trim).filter(|m| !m.is_empty() && !m.eq_ignore_ascii_case("all")) {
            Some(month) => Some(MonthScope::parse(month, year, now)?),
            None => None,
        };
        let sales = self.sales.list()?;
        Ok(analytics::analytics_report(&sales, scope, now))
    }
}
