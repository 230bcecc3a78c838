//! Store error taxonomy

/// Database error type
///
/// `NotFound` is an ordinary outcome for lookups by id and is kept apart
/// from driver failures, which are split by the direction of the call.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("store read failed: {0}")]
    Read(#[source] sqlx::Error),

    #[error("store write failed: {0}")]
    Write(#[source] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: i64 },
}

impl DbError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
