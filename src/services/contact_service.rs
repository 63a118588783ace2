use sqlx::PgPool;
use tracing::info;

use crate::database::models::{Contact, ContactWithOwner, NewContact, User};
use crate::database::{Database, DatabaseError, Repository};

pub struct ContactService {
    pool: PgPool,
    users: Repository<User>,
}

impl ContactService {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
            users: Repository::new(db.pool().clone()),
        }
    }

    /// Attach a new contact to a live user
    pub async fn create(&self, user_id: i32, contact: NewContact) -> Result<Contact, DatabaseError> {
        contact.validate()?;
        if !self.users.exists(user_id).await? {
            return Err(Repository::<User>::not_found());
        }

        let created = sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (current_address, permanent_address, user_id) \
             VALUES ($1, $2, $3) \
             RETURNING id, current_address, permanent_address, user_id, created_at, updated_at",
        )
        .bind(&contact.current_address)
        .bind(&contact.permanent_address)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        info!("Created contact {} for user {}", created.id, user_id);
        Ok(created)
    }

    /// Every contact with a restricted view of its owner
    pub async fn list(&self) -> Result<Vec<ContactWithOwner>, DatabaseError> {
        let rows = sqlx::query_as::<_, ContactWithOwner>(
            "SELECT c.id, c.current_address, c.permanent_address, c.user_id, c.created_at, c.updated_at, \
               (SELECT json_build_object( \
                   'id', u.id, \
                   'first_name', u.first_name, \
                   'last_name', u.last_name, \
                   'full_name', concat_ws(' ', u.first_name, u.last_name)) \
                FROM users u WHERE u.id = c.user_id AND u.deleted_at IS NULL) AS user \
             FROM contacts c ORDER BY c.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
