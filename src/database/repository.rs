use sqlx::{self, postgres::PgRow, FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::database::models::{Customer, Profile, User};

/// A table whose rows are retired by stamping `deleted_at` instead of being removed.
pub trait Paranoid {
    const TABLE: &'static str;
    /// Select list used when the row is returned
    const COLUMNS: &'static str;
    /// Human label for not-found messages
    const LABEL: &'static str;
}

impl Paranoid for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static str = crate::database::models::user::USER_COLUMNS;
    const LABEL: &'static str = "User";
}

impl Paranoid for Customer {
    const TABLE: &'static str = "customers";
    const COLUMNS: &'static str = "id, name, phone_number, created_at, updated_at, deleted_at";
    const LABEL: &'static str = "Customer";
}

impl Paranoid for Profile {
    const TABLE: &'static str = "profiles";
    const COLUMNS: &'static str = "id, name, created_at, updated_at, deleted_at";
    const LABEL: &'static str = "Profile";
}

/// Shared reads and soft-delete lifecycle for paranoid tables
pub struct Repository<T> {
    pool: PgPool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Repository<T>
where
    T: Paranoid + for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn not_found() -> DatabaseError {
        DatabaseError::NotFound(format!("{} not found!", T::LABEL))
    }

    /// All live rows, oldest first
    pub async fn select_live(&self) -> Result<Vec<T>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE deleted_at IS NULL ORDER BY id",
            T::COLUMNS,
            T::TABLE
        );
        Ok(sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?)
    }

    pub async fn select_one(&self, id: i32) -> Result<Option<T>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1 AND deleted_at IS NULL",
            T::COLUMNS,
            T::TABLE
        );
        Ok(sqlx::query_as::<_, T>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    pub async fn select_404(&self, id: i32) -> Result<T, DatabaseError> {
        self.select_one(id).await?.ok_or_else(Self::not_found)
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DatabaseError> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1 AND deleted_at IS NULL)",
            T::TABLE
        );
        let (found,): (bool,) = sqlx::query_as(&sql).bind(id).fetch_one(&self.pool).await?;
        Ok(found)
    }

    pub async fn count_live(&self) -> Result<i64, DatabaseError> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE deleted_at IS NULL", T::TABLE);
        let (count,): (i64,) = sqlx::query_as(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// Stamp `deleted_at`. Rows that are missing or already deleted are reported as not found.
    pub async fn soft_delete(&self, id: i32) -> Result<(), DatabaseError> {
        let sql = format!(
            "UPDATE {} SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
            T::TABLE
        );
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(Self::not_found());
        }
        Ok(())
    }

    /// Clear `deleted_at` and return the row as it now reads.
    /// Restoring a live row is a no-op.
    pub async fn restore(&self, id: i32) -> Result<T, DatabaseError> {
        let sql = format!(
            "UPDATE {} SET deleted_at = NULL WHERE id = $1 RETURNING {}",
            T::TABLE,
            T::COLUMNS
        );
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(Self::not_found)
    }
}

/// Turn a unique violation on `constraint` into a client facing validation error.
pub fn unique_as_validation(err: DatabaseError, constraint: &str, message: &str) -> DatabaseError {
    if err.is_unique_violation() && err.constraint() == Some(constraint) {
        DatabaseError::Validation(message.to_string())
    } else {
        err
    }
}
