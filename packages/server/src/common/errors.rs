use thiserror::Error;

use super::auth::AuthError;

/// Core error taxonomy for the booking and credit subsystem.
///
/// Every mutating operation validates role, ownership and state before
/// touching the ledger or booking row, so any of the rejection arms below
/// implies zero side effects. `Database` and `Internal` are logged with
/// detail server-side and surfaced to callers as opaque messages.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed or out-of-range input.
    #[error("{0}")]
    Validation(String),

    /// Role or ownership mismatch.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Missing entity.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Reservation would overdraw the venue's balance.
    #[error("Insufficient credits: requested {requested}, available {available}")]
    InsufficientCredits { requested: i32, available: i32 },

    /// Transition not present in the booking state table, or not permitted
    /// for the caller's role.
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// State conflict (duplicate rating, unavailable provider, ...).
    #[error("{0}")]
    Conflict(String),

    /// Unexpected storage failure.
    #[error("Storage error: {0}")]
    Database(#[from] sqlx::Error),

    /// Anything else unexpected.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CoreError {
    /// Stable machine-readable code, attached to GraphQL errors as an
    /// extension. Collaborating HTTP layers map these onto status classes
    /// (VALIDATION -> 400, UNAUTHORIZED -> 403, NOT_FOUND -> 404,
    /// CONFLICT -> 409, INTERNAL -> 500).
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::Validation(_) => "VALIDATION",
            CoreError::Auth(_) => "UNAUTHORIZED",
            CoreError::NotFound(_) => "NOT_FOUND",
            CoreError::InsufficientCredits { .. }
            | CoreError::InvalidTransition { .. }
            | CoreError::Conflict(_) => "CONFLICT",
            CoreError::Database(_) | CoreError::Internal(_) => "INTERNAL",
        }
    }

    /// True for the arms that must not leak detail to callers.
    pub fn is_internal(&self) -> bool {
        matches!(self, CoreError::Database(_) | CoreError::Internal(_))
    }
}

/// Postgres unique-violation check, for mapping duplicate inserts onto
/// `CoreError::Conflict` instead of an opaque storage error.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23505")
        .unwrap_or(false)
}
