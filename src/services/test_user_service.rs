use sqlx::PgPool;

use crate::database::models::{Test, TestUser, TestUserWithTest};
use crate::database::{Database, DatabaseError};

/// The isolated TestUser/Test one-to-one pair. No HTTP surface.
pub struct TestUserService {
    pool: PgPool,
}

impl TestUserService {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// Create a test user together with its single test row
    pub async fn create_with_test(
        &self,
        name: &str,
        email: &str,
        code: &str,
    ) -> Result<(TestUser, Test), DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let user = sqlx::query_as::<_, TestUser>(
            "INSERT INTO t_users (name, email) VALUES ($1, $2) RETURNING id, name, email",
        )
        .bind(name)
        .bind(email)
        .fetch_one(&mut *tx)
        .await?;
        let test = sqlx::query_as::<_, Test>(
            "INSERT INTO tests (code, user_id) VALUES ($1, $2) RETURNING id, code, user_id",
        )
        .bind(code)
        .bind(user.id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok((user, test))
    }

    /// Attach a second test to a user that already has one. Always rejected by the schema.
    pub async fn add_test(&self, user_id: i32, code: &str) -> Result<Test, DatabaseError> {
        let test = sqlx::query_as::<_, Test>(
            "INSERT INTO tests (code, user_id) VALUES ($1, $2) RETURNING id, code, user_id",
        )
        .bind(code)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(test)
    }

    pub async fn find_with_test(&self, id: i32) -> Result<TestUserWithTest, DatabaseError> {
        sqlx::query_as::<_, TestUserWithTest>(
            "SELECT tu.id, tu.name, tu.email, \
               (SELECT json_build_object('id', t.id, 'code', t.code, 'user_id', t.user_id) \
                FROM tests t WHERE t.user_id = tu.id) AS test \
             FROM t_users tu WHERE tu.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound("TestUser not found!".to_string()))
    }
}
