use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};

use super::user::UserSummary;
use crate::database::manager::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub id: i32,
    pub current_address: String,
    pub permanent_address: Option<String>,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contact nested under its owning user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSummary {
    pub id: i32,
    pub current_address: String,
    pub permanent_address: Option<String>,
}

/// Contact joined with its owner. `user` is null when the owner is soft-deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContactWithOwner {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub contact: Contact,
    pub user: Option<Json<UserSummary>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContact {
    pub current_address: String,
    #[serde(default)]
    pub permanent_address: Option<String>,
}

impl NewContact {
    pub fn validate(&self) -> Result<(), DatabaseError> {
        if self.current_address.trim().is_empty() {
            return Err(DatabaseError::Validation("current_address is required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_current_address_is_rejected() {
        let contact = NewContact {
            current_address: "  ".to_string(),
            permanent_address: Some("Home".to_string()),
        };
        assert!(matches!(contact.validate(), Err(DatabaseError::Validation(_))));
    }

    #[test]
    fn permanent_address_is_optional() {
        let contact: NewContact = serde_json::from_str(r#"{"current_address":"12 Main St"}"#).unwrap();
        assert!(contact.validate().is_ok());
        assert!(contact.permanent_address.is_none());
    }
}
