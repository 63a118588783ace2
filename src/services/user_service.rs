use serde::Serialize;
use sqlx::PgPool;
use tracing::info;

use crate::database::models::user::USER_COLUMNS;
use crate::database::models::{NewUser, User, UserChanges, UserRecord};
use crate::database::repository::{unique_as_validation, Repository};
use crate::database::{Database, DatabaseError, IncludeSet};

const FIRST_NAME_KEY: &str = "users_first_name_key";
const FIRST_NAME_TAKEN: &str = "first_name must be unique";

/// `findAndCountAll` shaped page of users
#[derive(Debug, Clone, Serialize)]
pub struct UserPage {
    pub count: i64,
    pub rows: Vec<UserRecord>,
}

#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

pub struct UserService {
    pool: PgPool,
    repo: Repository<User>,
}

impl UserService {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
            repo: Repository::new(db.pool().clone()),
        }
    }

    pub async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let user = user.normalized()?;
        let sql = format!(
            "INSERT INTO users (first_name, last_name) VALUES ($1, $2) RETURNING {}",
            USER_COLUMNS
        );
        let created = sqlx::query_as::<_, User>(&sql)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| unique_as_validation(e.into(), FIRST_NAME_KEY, FIRST_NAME_TAKEN))?;
        info!("Created user {} ({})", created.id, created.first_name);
        Ok(created)
    }

    /// Insert every user or none of them
    pub async fn create_many(&self, users: Vec<NewUser>) -> Result<Vec<User>, DatabaseError> {
        let users = users
            .into_iter()
            .map(NewUser::normalized)
            .collect::<Result<Vec<_>, _>>()?;

        let sql = format!(
            "INSERT INTO users (first_name, last_name) VALUES ($1, $2) RETURNING {}",
            USER_COLUMNS
        );
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(users.len());
        for user in &users {
            let row = sqlx::query_as::<_, User>(&sql)
                .bind(&user.first_name)
                .bind(&user.last_name)
                .fetch_one(&mut *tx)
                .await;
            match row {
                Ok(row) => created.push(row),
                Err(e) => {
                    tx.rollback().await?;
                    return Err(unique_as_validation(e.into(), FIRST_NAME_KEY, FIRST_NAME_TAKEN));
                }
            }
        }
        tx.commit().await?;
        info!("Bulk created {} users", created.len());
        Ok(created)
    }

    /// Live users with the requested associations, plus the total live count
    pub async fn list(&self, include: &IncludeSet, page: Page) -> Result<UserPage, DatabaseError> {
        let sql = format!(
            "SELECT {}, {}, {} FROM users u WHERE u.deleted_at IS NULL ORDER BY u.id LIMIT $1 OFFSET $2",
            qualified_user_columns(),
            include.contacts_column(),
            include.subjects_column()
        );
        let rows = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;
        let count = self.repo.count_live().await?;
        Ok(UserPage { count, rows })
    }

    pub async fn find(&self, id: i32, include: &IncludeSet) -> Result<UserRecord, DatabaseError> {
        let sql = format!(
            "SELECT {}, {}, {} FROM users u WHERE u.id = $1 AND u.deleted_at IS NULL",
            qualified_user_columns(),
            include.contacts_column(),
            include.subjects_column()
        );
        sqlx::query_as::<_, UserRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(Repository::<User>::not_found)
    }

    /// Apply the provided fields to a live user
    pub async fn update(&self, id: i32, changes: UserChanges) -> Result<User, DatabaseError> {
        let changes = changes.normalized()?;
        let sql = format!(
            "UPDATE users SET \
               first_name = COALESCE($2, first_name), \
               last_name = COALESCE($3, last_name), \
               updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {}",
            USER_COLUMNS
        );
        let updated = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(&changes.first_name)
            .bind(&changes.last_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| unique_as_validation(e.into(), FIRST_NAME_KEY, FIRST_NAME_TAKEN))?;
        updated.ok_or_else(Repository::<User>::not_found)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        self.repo.soft_delete(id).await?;
        info!("Soft deleted user {}", id);
        Ok(())
    }

    pub async fn restore(&self, id: i32) -> Result<User, DatabaseError> {
        let user = self
            .repo
            .restore(id)
            .await
            .map_err(|e| unique_as_validation(e, FIRST_NAME_KEY, FIRST_NAME_TAKEN))?;
        info!("Restored user {}", id);
        Ok(user)
    }
}

/// `USER_COLUMNS` against the `u` alias used by the eager-loading queries
fn qualified_user_columns() -> &'static str {
    "u.id, u.first_name, u.last_name, \
     concat_ws(' ', u.first_name, u.last_name) AS full_name, \
     u.created_at, u.updated_at, u.deleted_at"
}
