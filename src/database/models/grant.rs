use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::profile::ProfileSummary;

/// Junction row between a customer and a profile.
///
/// This one table backs both navigations: customer <-> profile as a
/// many-to-many, and customer -> grants / profile -> grants as one-to-many.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Grant {
    pub id: i32,
    pub customer_id: i32,
    pub profile_id: i32,
    pub self_granted: bool,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantWithProfile {
    pub id: i32,
    pub self_granted: bool,
    pub status: String,
    pub profile: ProfileSummary,
}
