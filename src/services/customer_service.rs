use serde::Serialize;
use sqlx::{PgConnection, PgPool};
use tracing::{error, info};

use crate::database::associations;
use crate::database::models::{
    Customer, CustomerChanges, Grant, LinkRequest, NewCustomer, NewProfile, Profile,
};
use crate::database::repository::{unique_as_validation, Paranoid, Repository};
use crate::database::{Database, DatabaseError};

const PHONE_NUMBER_KEY: &str = "customers_phone_number_key";

/// What a customer/profile link produced
#[derive(Debug, Clone, Serialize)]
pub struct LinkOutcome {
    pub customer: Customer,
    pub profile: Profile,
    pub grant: Grant,
}

pub struct CustomerService {
    pool: PgPool,
    repo: Repository<Customer>,
}

impl CustomerService {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
            repo: Repository::new(db.pool().clone()),
        }
    }

    pub async fn list(&self) -> Result<Vec<Customer>, DatabaseError> {
        self.repo.select_live().await
    }

    pub async fn find(&self, id: i32) -> Result<Customer, DatabaseError> {
        self.repo.select_404(id).await
    }

    /// Find-or-create the customer (by phone number) and the profile (by name)
    /// and link them through a grant, all inside one transaction.
    pub async fn create_and_link(&self, request: LinkRequest) -> Result<LinkOutcome, DatabaseError> {
        request.validate()?;

        let mut tx = self.pool.begin().await?;
        match link_in(&mut *tx, &request).await {
            Ok(outcome) => {
                tx.commit().await?;
                info!(
                    customer_id = outcome.customer.id,
                    profile_id = outcome.profile.id,
                    grant_id = outcome.grant.id,
                    "Customer and profile linked"
                );
                Ok(outcome)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    error!("Rollback after failed customer link also failed: {}", rollback);
                }
                Err(e)
            }
        }
    }

    pub async fn update(&self, id: i32, changes: CustomerChanges) -> Result<Customer, DatabaseError> {
        changes.validate()?;
        let sql = format!(
            "UPDATE customers SET \
               name = COALESCE($2, name), \
               phone_number = COALESCE($3, phone_number), \
               updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {}",
            <Customer as Paranoid>::COLUMNS
        );
        let updated = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .bind(changes.name.as_deref().map(str::trim))
            .bind(&changes.phone_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                unique_as_validation(e.into(), PHONE_NUMBER_KEY, "phone_number is already in use")
            })?;
        updated.ok_or_else(Repository::<Customer>::not_found)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DatabaseError> {
        self.repo.soft_delete(id).await?;
        info!("Soft deleted customer {}", id);
        Ok(())
    }

    pub async fn restore(&self, id: i32) -> Result<Customer, DatabaseError> {
        self.repo.restore(id).await.map_err(|e| {
            unique_as_validation(e, PHONE_NUMBER_KEY, "phone_number is already in use")
        })
    }
}

async fn link_in(conn: &mut PgConnection, request: &LinkRequest) -> Result<LinkOutcome, DatabaseError> {
    let customer = find_or_create_customer(conn, &request.customer).await?;
    let profile = find_or_create_profile(conn, &request.profile).await?;
    let grant = associations::add_profile(
        conn,
        customer.id,
        profile.id,
        request.self_granted,
        request.status.trim(),
    )
    .await?;
    Ok(LinkOutcome { customer, profile, grant })
}

/// Race-safe find-or-create keyed on the live phone number.
///
/// The insert waits on any concurrent uncommitted insert of the same number;
/// if that one commits the insert becomes a no-op and the follow-up select
/// sees the committed row. Customers without a phone number have no lookup
/// key and are always created.
pub async fn find_or_create_customer(
    conn: &mut PgConnection,
    customer: &NewCustomer,
) -> Result<Customer, DatabaseError> {
    let columns = <Customer as Paranoid>::COLUMNS;
    let name = customer.name.trim();

    let Some(phone_number) = customer.phone_number.as_deref() else {
        let sql = format!("INSERT INTO customers (name) VALUES ($1) RETURNING {}", columns);
        return Ok(sqlx::query_as::<_, Customer>(&sql).bind(name).fetch_one(&mut *conn).await?);
    };

    let insert = format!(
        "INSERT INTO customers (name, phone_number) VALUES ($1, $2) \
         ON CONFLICT (phone_number) WHERE deleted_at IS NULL DO NOTHING \
         RETURNING {}",
        columns
    );
    if let Some(created) = sqlx::query_as::<_, Customer>(&insert)
        .bind(name)
        .bind(phone_number)
        .fetch_optional(&mut *conn)
        .await?
    {
        return Ok(created);
    }

    let select = format!(
        "SELECT {} FROM customers WHERE phone_number = $1 AND deleted_at IS NULL",
        columns
    );
    sqlx::query_as::<_, Customer>(&select)
        .bind(phone_number)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(Repository::<Customer>::not_found)
}

/// Race-safe find-or-create keyed on the live profile name
pub async fn find_or_create_profile(
    conn: &mut PgConnection,
    profile: &NewProfile,
) -> Result<Profile, DatabaseError> {
    let columns = <Profile as Paranoid>::COLUMNS;
    let name = profile.name.trim();

    let insert = format!(
        "INSERT INTO profiles (name) VALUES ($1) \
         ON CONFLICT (name) WHERE deleted_at IS NULL DO NOTHING \
         RETURNING {}",
        columns
    );
    if let Some(created) = sqlx::query_as::<_, Profile>(&insert)
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?
    {
        return Ok(created);
    }

    let select = format!("SELECT {} FROM profiles WHERE name = $1 AND deleted_at IS NULL", columns);
    sqlx::query_as::<_, Profile>(&select)
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(Repository::<Profile>::not_found)
}
