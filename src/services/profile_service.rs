use sqlx::PgPool;
use tracing::info;

use crate::database::models::{Customer, CustomerWithGrants, NewProfile, Profile};
use crate::database::repository::{unique_as_validation, Paranoid, Repository};
use crate::database::{Database, DatabaseError};

use super::customer_service::find_or_create_profile;

const NAME_KEY: &str = "profiles_name_key";

pub struct ProfileService {
    pool: PgPool,
    repo: Repository<Profile>,
}

impl ProfileService {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
            repo: Repository::new(db.pool().clone()),
        }
    }

    pub async fn list(&self) -> Result<Vec<Profile>, DatabaseError> {
        self.repo.select_live().await
    }

    /// Three-level eager load: customer -> grants -> profile.
    /// Grants pointing at soft-deleted profiles are left out.
    pub async fn customer_profile(&self, customer_id: i32) -> Result<CustomerWithGrants, DatabaseError> {
        sqlx::query_as::<_, CustomerWithGrants>(
            "SELECT c.id, c.name, c.phone_number, c.created_at, c.updated_at, c.deleted_at, \
               COALESCE((SELECT json_agg(json_build_object( \
                   'id', g.id, \
                   'self_granted', g.self_granted, \
                   'status', g.status, \
                   'profile', json_build_object('id', p.id, 'name', p.name)) ORDER BY g.id) \
                 FROM grants g JOIN profiles p ON p.id = g.profile_id AND p.deleted_at IS NULL \
                 WHERE g.customer_id = c.id), '[]'::json) AS grants \
             FROM customers c WHERE c.id = $1 AND c.deleted_at IS NULL",
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(Repository::<Customer>::not_found)
    }

    /// Returns the live profile with this name, creating it when absent
    pub async fn create(&self, profile: NewProfile) -> Result<Profile, DatabaseError> {
        profile.validate()?;
        let mut conn = self.pool.acquire().await?;
        let profile = find_or_create_profile(&mut *conn, &profile).await?;
        info!("Profile {} ({}) ready", profile.id, profile.name);
        Ok(profile)
    }

    pub async fn update(&self, id: i32, changes: NewProfile) -> Result<Profile, DatabaseError> {
        changes.validate()?;
        let sql = format!(
            "UPDATE profiles SET name = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            <Profile as Paranoid>::COLUMNS
        );
        let updated = sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .bind(changes.name.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| unique_as_validation(e.into(), NAME_KEY, "profile name is already in use"))?;
        updated.ok_or_else(Repository::<Profile>::not_found)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        self.repo.soft_delete(id).await?;
        info!("Soft deleted profile {}", id);
        Ok(())
    }

    pub async fn restore(&self, id: i32) -> Result<Profile, DatabaseError> {
        self.repo
            .restore(id)
            .await
            .map_err(|e| unique_as_validation(e, NAME_KEY, "profile name is already in use"))
    }
}
