use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};

use super::contact::ContactSummary;
use super::subject::SubjectSummary;
use crate::database::manager::DatabaseError;

/// Appended to every last name on write.
pub const LAST_NAME_SUFFIX: &str = " 😄";

/// Column list shared by every user query. `full_name` is derived, never stored.
pub const USER_COLUMNS: &str = "id, first_name, last_name, \
     concat_ws(' ', first_name, last_name) AS full_name, \
     created_at, updated_at, deleted_at";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A user together with whichever associations were requested.
/// Associations that were not requested are omitted from the JSON.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserRecord {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Json<Vec<ContactSummary>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Json<Vec<SubjectSummary>>>,
}

/// Restricted view of a user, used when a user is nested under another entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserChanges {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Upper-case a first name after checking it is non-empty and alphabetic.
pub fn normalize_first_name(first_name: &str) -> Result<String, DatabaseError> {
    let trimmed = first_name.trim();
    if trimmed.is_empty() {
        return Err(DatabaseError::Validation("first_name is required".to_string()));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DatabaseError::Validation(
            "Name should contain only alphabets".to_string(),
        ));
    }
    Ok(trimmed.to_uppercase())
}

pub fn decorate_last_name(last_name: &str) -> String {
    format!("{}{}", last_name, LAST_NAME_SUFFIX)
}

impl NewUser {
    /// Apply the write-side field rules
    pub fn normalized(self) -> Result<Self, DatabaseError> {
        Ok(Self {
            first_name: normalize_first_name(&self.first_name)?,
            last_name: self.last_name.as_deref().map(decorate_last_name),
        })
    }
}

impl UserChanges {
    pub fn normalized(self) -> Result<Self, DatabaseError> {
        Ok(Self {
            first_name: self.first_name.as_deref().map(normalize_first_name).transpose()?,
            last_name: self.last_name.as_deref().map(decorate_last_name),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }
}
