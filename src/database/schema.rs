use sqlx::PgPool;
use tracing::debug;

use super::manager::DatabaseError;

/// Idempotent DDL, applied in order. Each entry is a single statement.
///
/// Soft-deletable tables (`users`, `customers`, `profiles`) carry a nullable
/// `deleted_at`; their uniqueness constraints only cover live rows.
pub const STATEMENTS: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS users (
        id          SERIAL PRIMARY KEY,
        first_name  TEXT NOT NULL,
        last_name   TEXT,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        deleted_at  TIMESTAMPTZ
    )"#,
    r#"CREATE UNIQUE INDEX IF NOT EXISTS users_first_name_key
        ON users (first_name) WHERE deleted_at IS NULL"#,
    r#"CREATE TABLE IF NOT EXISTS contacts (
        id                 SERIAL PRIMARY KEY,
        current_address    TEXT NOT NULL,
        permanent_address  TEXT,
        user_id            INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        created_at         TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at         TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE INDEX IF NOT EXISTS contacts_user_id_idx ON contacts (user_id)"#,
    r#"CREATE TABLE IF NOT EXISTS subjects (
        id          SERIAL PRIMARY KEY,
        title       TEXT NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS user_subjects (
        user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        subject_id  INTEGER NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        PRIMARY KEY (user_id, subject_id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS customers (
        id            SERIAL PRIMARY KEY,
        name          TEXT NOT NULL,
        phone_number  TEXT,
        created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        deleted_at    TIMESTAMPTZ
    )"#,
    r#"CREATE UNIQUE INDEX IF NOT EXISTS customers_phone_number_key
        ON customers (phone_number) WHERE deleted_at IS NULL"#,
    r#"CREATE TABLE IF NOT EXISTS profiles (
        id          SERIAL PRIMARY KEY,
        name        TEXT NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        deleted_at  TIMESTAMPTZ
    )"#,
    r#"CREATE UNIQUE INDEX IF NOT EXISTS profiles_name_key
        ON profiles (name) WHERE deleted_at IS NULL"#,
    r#"CREATE TABLE IF NOT EXISTS grants (
        id            SERIAL PRIMARY KEY,
        customer_id   INTEGER NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
        profile_id    INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
        self_granted  BOOLEAN NOT NULL DEFAULT FALSE,
        status        TEXT NOT NULL DEFAULT 'active',
        UNIQUE (customer_id, profile_id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS t_users (
        id     SERIAL PRIMARY KEY,
        name   TEXT,
        email  TEXT
    )"#,
    r#"CREATE TABLE IF NOT EXISTS tests (
        id       SERIAL PRIMARY KEY,
        code     TEXT,
        user_id  INTEGER NOT NULL UNIQUE REFERENCES t_users(id) ON DELETE CASCADE
    )"#,
];

/// Advisory lock key held while the schema is applied, so that concurrent
/// start-ups do not race on `CREATE TABLE`.
const SCHEMA_LOCK_KEY: i64 = 0x636c_6173_7372_6f6f;

pub async fn apply(pool: &PgPool) -> Result<(), DatabaseError> {
    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    for statement in STATEMENTS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    debug!("Applied {} schema statements", STATEMENTS.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_statement_is_idempotent() {
        for statement in STATEMENTS {
            assert!(
                statement.contains("IF NOT EXISTS"),
                "statement would fail on second run: {}",
                statement
            );
            assert!(!statement.trim_end().ends_with(';'));
        }
    }

    #[test]
    fn junction_table_follows_its_endpoints() {
        let position = |needle: &str| {
            STATEMENTS
                .iter()
                .position(|s| s.contains(needle))
                .unwrap_or_else(|| panic!("missing {}", needle))
        };
        assert!(position("TABLE IF NOT EXISTS users") < position("TABLE IF NOT EXISTS user_subjects"));
        assert!(position("TABLE IF NOT EXISTS subjects") < position("TABLE IF NOT EXISTS user_subjects"));
        assert!(position("TABLE IF NOT EXISTS customers") < position("TABLE IF NOT EXISTS grants"));
        assert!(position("TABLE IF NOT EXISTS profiles") < position("TABLE IF NOT EXISTS grants"));
        assert!(position("TABLE IF NOT EXISTS t_users") < position("TABLE IF NOT EXISTS tests"));
    }
}
