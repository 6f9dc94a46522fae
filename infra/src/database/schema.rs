//! Table definitions for the verification records
//!
//! One row per user in each table; the primary key on `user_id` is what
//! turns a second `create` into a duplicate-key error.

use sqlx::MySqlPool;

use crate::InfrastructureError;

const CREATE_PINS: &str = r#"
    CREATE TABLE IF NOT EXISTS pins (
        user_id CHAR(36) NOT NULL PRIMARY KEY,
        pin_hash VARCHAR(255) NOT NULL,
        sent_at DATETIME(6) NOT NULL
    )
"#;

const CREATE_ATTEMPTS: &str = r#"
    CREATE TABLE IF NOT EXISTS attempts (
        user_id CHAR(36) NOT NULL PRIMARY KEY,
        attempts INT UNSIGNED NOT NULL DEFAULT 0,
        created_at DATETIME(6) NOT NULL
    )
"#;

const CREATE_BLOCKS: &str = r#"
    CREATE TABLE IF NOT EXISTS blocks (
        user_id CHAR(36) NOT NULL PRIMARY KEY,
        blocked_at DATETIME(6) NOT NULL
    )
"#;

/// Create the pins, attempts and blocks tables when missing
pub async fn ensure_schema(pool: &MySqlPool) -> Result<(), InfrastructureError> {
    for statement in [CREATE_PINS, CREATE_ATTEMPTS, CREATE_BLOCKS] {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("Database schema is up to date");
    Ok(())
}
