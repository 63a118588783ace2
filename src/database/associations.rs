//! Relationship wiring between entities.
//!
//! - users 1-M contacts (`contacts.user_id`)
//! - users M-N subjects through `user_subjects` (timestamps only)
//! - customers M-N profiles through `grants`, which is also a first-class row
//!   with its own id, `self_granted` flag and `status`
//!
//! Eager loading is expressed as correlated `json_agg` sub-selects so the
//! primary entity and its related rows come back in one round trip.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use sqlx::PgConnection;

use crate::database::manager::DatabaseError;
use crate::database::models::Grant;

/// Related data that can be loaded alongside a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Include {
    Contacts,
    Subjects,
}

impl Include {
    pub const ALL: [Include; 2] = [Include::Contacts, Include::Subjects];

    pub fn as_str(&self) -> &'static str {
        match self {
            Include::Contacts => "contacts",
            Include::Subjects => "subjects",
        }
    }
}

impl fmt::Display for Include {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown include '{0}', expected one of: contacts, subjects")]
pub struct UnknownInclude(pub String);

impl FromStr for Include {
    type Err = UnknownInclude;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contacts" | "contact" => Ok(Include::Contacts),
            "subjects" | "subject" => Ok(Include::Subjects),
            other => Err(UnknownInclude(other.to_string())),
        }
    }
}

/// The set of associations to eager-load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeSet(BTreeSet<Include>);

impl IncludeSet {
    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    pub fn only(include: Include) -> Self {
        Self(BTreeSet::from([include]))
    }

    /// Parse a comma separated list such as `contacts,subjects`.
    /// A missing parameter yields `default`; an empty one yields nothing.
    pub fn parse(raw: Option<&str>, default: IncludeSet) -> Result<Self, UnknownInclude> {
        let Some(raw) = raw else {
            return Ok(default);
        };
        let mut set = BTreeSet::new();
        for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
            set.insert(part.parse::<Include>()?);
        }
        Ok(Self(set))
    }

    pub fn contains(&self, include: Include) -> bool {
        self.0.contains(&include)
    }

    pub fn iter(&self) -> impl Iterator<Item = Include> + '_ {
        self.0.iter().copied()
    }

    /// Select-list expression for the contacts of user alias `u`
    pub fn contacts_column(&self) -> &'static str {
        if self.contains(Include::Contacts) {
            "COALESCE((SELECT json_agg(json_build_object(\
                'id', c.id, \
                'current_address', c.current_address, \
                'permanent_address', c.permanent_address) ORDER BY c.id) \
              FROM contacts c WHERE c.user_id = u.id), '[]'::json) AS contacts"
        } else {
            "NULL::json AS contacts"
        }
    }

    /// Select-list expression for the subjects of user alias `u`
    pub fn subjects_column(&self) -> &'static str {
        if self.contains(Include::Subjects) {
            "COALESCE((SELECT json_agg(json_build_object(\
                'id', s.id, \
                'title', s.title) ORDER BY s.id) \
              FROM subjects s JOIN user_subjects us ON us.subject_id = s.id \
              WHERE us.user_id = u.id), '[]'::json) AS subjects"
        } else {
            "NULL::json AS subjects"
        }
    }
}

/// Link a user to a subject. Linking an existing pair is a no-op.
/// Returns true when a new junction row was written.
pub async fn add_subject(
    conn: &mut PgConnection,
    user_id: i32,
    subject_id: i32,
) -> Result<bool, DatabaseError> {
    let result = sqlx::query(
        "INSERT INTO user_subjects (user_id, subject_id) VALUES ($1, $2) \
         ON CONFLICT (user_id, subject_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(subject_id)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Link a customer to a profile through a grant.
/// Re-linking an existing pair refreshes the grant's attributes.
pub async fn add_profile(
    conn: &mut PgConnection,
    customer_id: i32,
    profile_id: i32,
    self_granted: bool,
    status: &str,
) -> Result<Grant, DatabaseError> {
    let grant = sqlx::query_as::<_, Grant>(
        "INSERT INTO grants (customer_id, profile_id, self_granted, status) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (customer_id, profile_id) \
         DO UPDATE SET self_granted = EXCLUDED.self_granted, status = EXCLUDED.status \
         RETURNING id, customer_id, profile_id, self_granted, status",
    )
    .bind(customer_id)
    .bind(profile_id)
    .bind(self_granted)
    .bind(status)
    .fetch_one(conn)
    .await?;
    Ok(grant)
}
