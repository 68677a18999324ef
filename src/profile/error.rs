use std::sync::Arc;

/// Failure kinds visible to callers of the profile operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Covers both malformed credential requests and failed verification.
    #[error("invalid profile key credential request")]
    InvalidRequest,
    #[error("dependency unavailable: {0}")]
    Unavailable(String),
}

/// Failure raised by a storage collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("stored record for {record} is malformed: {reason}")]
    Malformed { record: String, reason: String },
    /// Failure of a load whose result was shared between concurrent callers.
    #[error("{0}")]
    Shared(Arc<StoreError>),
}

impl From<StoreError> for ProfileError {
    fn from(err: StoreError) -> Self {
        ProfileError::Unavailable(err.to_string())
    }
}
