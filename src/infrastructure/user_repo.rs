use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::user::{NewUser, User};
use crate::schema::users;

use super::models::{NewUserRow, UserRow};

#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for DieselUserRepository {
    fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;

        let user = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(user.map(User::from))
    }

    fn insert_user(&self, user: NewUser) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;

        let id = diesel::insert_into(users::table)
            .values(&NewUserRow {
                first_name: user.first_name,
                last_name: user.last_name,
                email: user.email,
                password: user.password,
            })
            .returning(users::id)
            .get_result(&mut conn)?;

        Ok(id)
    }

    fn update_password(&self, user_id: i32, password_hash: &str) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let updated = diesel::update(users::table.find(user_id))
            .set((
                users::password.eq(password_hash),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        if updated == 0 {
            return Err(DomainError::NotFound("User"));
        }
        Ok(())
    }
}
