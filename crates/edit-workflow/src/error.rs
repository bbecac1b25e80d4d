use thiserror::Error;

/// Failures reported by a [`CategoryStore`](crate::CategoryStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("category not found")]
    NotFound,

    /// The store refused the write, e.g. a slug conflict.
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn rejected(message: impl Into<String>) -> Self {
        StoreError::Rejected(message.into())
    }

    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}
