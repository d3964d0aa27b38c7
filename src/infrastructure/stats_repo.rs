use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::analytics::EntityCounts;
use crate::domain::errors::DomainError;
use crate::domain::ports::StatsRepository;
use crate::schema::{customers, products, users};

pub struct DieselStatsRepository {
    pool: DbPool,
}

impl DieselStatsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl StatsRepository for DieselStatsRepository {
    fn counts(&self) -> Result<EntityCounts, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            Ok(EntityCounts {
                customers: customers::table.count().get_result(conn)?,
                products: products::table.count().get_result(conn)?,
                users: users::table.count().get_result(conn)?,
            })
        })
    }
}
