use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};

use super::user::UserSummary;
use crate::database::manager::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subject {
    pub id: i32,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub id: i32,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SubjectWithUsers {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub subject: Subject,
    pub users: Json<Vec<UserSummary>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubject {
    pub title: String,
}

impl NewSubject {
    pub fn validate(&self) -> Result<(), DatabaseError> {
        if self.title.trim().is_empty() {
            return Err(DatabaseError::Validation("title is required".to_string()));
        }
        Ok(())
    }
}
