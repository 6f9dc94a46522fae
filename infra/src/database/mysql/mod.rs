//! MySQL implementations of the core store traits

pub mod attempt_store_impl;
pub mod block_store_impl;
pub mod pin_store_impl;

pub use attempt_store_impl::MySqlAttemptStore;
pub use block_store_impl::MySqlBlockStore;
pub use pin_store_impl::MySqlPinStore;

use mp_core::errors::DomainError;
use uuid::Uuid;

/// Map an INSERT failure, turning a duplicate key into `Conflict`
pub(crate) fn insert_error(error: sqlx::Error, resource: &str, user_id: Uuid) -> DomainError {
    match &error {
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            DomainError::conflict(resource, user_id)
        }
        _ => query_error(&format!("Failed to create {}", resource), error),
    }
}

/// Wrap any other query failure
pub(crate) fn query_error(context: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(error = %error, "{}", context);
    DomainError::infrastructure(context, error)
}

/// Zero affected rows on UPDATE/DELETE means the row was missing
pub(crate) fn require_row(
    rows_affected: u64,
    resource: &str,
    user_id: Uuid,
) -> Result<(), DomainError> {
    if rows_affected == 0 {
        return Err(DomainError::not_found(resource, user_id));
    }
    Ok(())
}
