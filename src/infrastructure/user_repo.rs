use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::user::{User, UserInput};
use crate::schema::users;

use super::models::{NewUserRow, UserRow};

pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for DieselUserRepository {
    fn list(&self) -> Result<Vec<User>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = users::table
            .select(UserRow::as_select())
            .order(users::created_at.asc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    fn create(&self, input: UserInput) -> Result<User, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(users::table)
            .values(&NewUserRow {
                id: Uuid::new_v4(),
                name: &input.name,
                email: &input.email,
            })
            .returning(UserRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_db::setup_db;

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn create_list_and_reject_duplicate_email() {
        let (_container, pool) = setup_db().await;
        let repo = DieselUserRepository::new(pool);
        let input = UserInput::parse("Admin", "admin@example.com").expect("valid user");

        let user = repo.create(input.clone()).expect("create failed");

        assert_eq!(repo.list().expect("list failed"), vec![user]);
        assert!(matches!(repo.create(input), Err(DomainError::Conflict(_))));
    }
}
