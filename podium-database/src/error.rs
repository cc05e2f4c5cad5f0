use thiserror::Error;

/// Errors surfaced by the player store and rank recalculation.
///
/// Every failure path maps to one of these kinds; callers never see a bare
/// backend error. `RecalculationConflict` and `StoreUnavailable` are
/// retryable; a retried recalculation converges because the pass is
/// idempotent over current state.
#[derive(Debug, Error)]
pub enum PodiumError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid player identifier: {0}")]
    InvalidIdentifier(String),

    #[error("email already registered")]
    DuplicateIdentity,

    #[error("player not found")]
    NotFound,

    #[error("rank recalculation conflicted with a concurrent pass; retry")]
    RecalculationConflict,

    #[error("storage backend unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),
}

/// Map a sqlx failure onto the store's error kinds.
///
/// Postgres error codes: 23505 is a unique-constraint violation (duplicate
/// email on insert), 55P03 is a lock acquisition timeout (another
/// recalculation pass holds the advisory lock past our deadline).
pub(crate) fn map_sqlx_err(err: sqlx::Error) -> PodiumError {
    if matches!(err, sqlx::Error::RowNotFound) {
        return PodiumError::NotFound;
    }

    if let sqlx::Error::Database(ref db_err) = err {
        match db_err.code().as_deref() {
            Some("23505") => return PodiumError::DuplicateIdentity,
            Some("55P03") => return PodiumError::RecalculationConflict,
            _ => {}
        }
    }

    PodiumError::StoreUnavailable(err)
}
