use sqlx::PgPool;
use tracing::info;

use crate::database::associations;
use crate::database::models::{NewSubject, Subject, SubjectWithUsers, User};
use crate::database::{Database, DatabaseError, Repository};

const SUBJECT_WITH_USERS: &str = "SELECT s.id, s.title, s.created_at, s.updated_at, \
       COALESCE((SELECT json_agg(json_build_object( \
           'id', u.id, \
           'first_name', u.first_name, \
           'last_name', u.last_name, \
           'full_name', concat_ws(' ', u.first_name, u.last_name)) ORDER BY u.id) \
         FROM users u JOIN user_subjects us ON us.user_id = u.id \
         WHERE us.subject_id = s.id AND u.deleted_at IS NULL), '[]'::json) AS users \
     FROM subjects s";

pub struct SubjectService {
    pool: PgPool,
    users: Repository<User>,
}

impl SubjectService {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
            users: Repository::new(db.pool().clone()),
        }
    }

    fn not_found() -> DatabaseError {
        DatabaseError::NotFound("Subject not found!".to_string())
    }

    pub async fn create(&self, subject: NewSubject) -> Result<Subject, DatabaseError> {
        subject.validate()?;
        let created = sqlx::query_as::<_, Subject>(
            "INSERT INTO subjects (title) VALUES ($1) RETURNING id, title, created_at, updated_at",
        )
        .bind(subject.title.trim())
        .fetch_one(&self.pool)
        .await?;
        info!("Created subject {} ({})", created.id, created.title);
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<SubjectWithUsers>, DatabaseError> {
        let sql = format!("{} ORDER BY s.id", SUBJECT_WITH_USERS);
        Ok(sqlx::query_as::<_, SubjectWithUsers>(&sql).fetch_all(&self.pool).await?)
    }

    pub async fn find(&self, id: i32) -> Result<SubjectWithUsers, DatabaseError> {
        let sql = format!("{} WHERE s.id = $1", SUBJECT_WITH_USERS);
        sqlx::query_as::<_, SubjectWithUsers>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(Self::not_found)
    }

    /// Link a live user to an existing subject. Returns true when the link is new.
    pub async fn assign(&self, user_id: i32, subject_id: i32) -> Result<bool, DatabaseError> {
        if !self.users.exists(user_id).await? {
            return Err(Repository::<User>::not_found());
        }
        let (subject_exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM subjects WHERE id = $1)")
                .bind(subject_id)
                .fetch_one(&self.pool)
                .await?;
        if !subject_exists {
            return Err(Self::not_found());
        }

        let mut conn = self.pool.acquire().await?;
        let created = associations::add_subject(&mut *conn, user_id, subject_id).await?;
        info!(user_id, subject_id, created, "Subject assigned");
        Ok(created)
    }

    /// Hard delete. Junction rows go with it.
    pub async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Self::not_found());
        }
        info!("Deleted subject {}", id);
        Ok(())
    }
}
