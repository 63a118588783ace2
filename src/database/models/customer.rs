use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};

use super::grant::GrantWithProfile;
use super::profile::NewProfile;
use crate::database::manager::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Customer -> grants -> profile
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CustomerWithGrants {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub customer: Customer,
    pub grants: Json<Vec<GrantWithProfile>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    #[serde(default, alias = "phoneNumber")]
    pub phone_number: Option<String>,
}

impl NewCustomer {
    pub fn validate(&self) -> Result<(), DatabaseError> {
        if self.name.trim().is_empty() {
            return Err(DatabaseError::Validation("customer name is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "phoneNumber")]
    pub phone_number: Option<String>,
}

impl CustomerChanges {
    pub fn validate(&self) -> Result<(), DatabaseError> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(DatabaseError::Validation("customer name must not be blank".to_string()));
        }
        Ok(())
    }
}

fn default_grant_status() -> String {
    "active".to_string()
}

/// Find-or-create a customer and a profile, then link them through a grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRequest {
    pub customer: NewCustomer,
    pub profile: NewProfile,
    #[serde(default, alias = "selfGranted")]
    pub self_granted: bool,
    #[serde(default = "default_grant_status")]
    pub status: String,
}

impl LinkRequest {
    pub fn validate(&self) -> Result<(), DatabaseError> {
        self.customer.validate()?;
        self.profile.validate()?;
        if self.status.trim().is_empty() {
            return Err(DatabaseError::Validation("status must not be blank".to_string()));
        }
        Ok(())
    }
}
