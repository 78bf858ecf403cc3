/// Errors from document store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No document with the requested name exists.
    #[error("document not found: {name}")]
    NotFound { name: String },

    /// A listing was requested while the store holds no documents.
    #[error("no documents found")]
    EmptyCollection,

    /// The store cannot serve the call, e.g. writes after shutdown.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn not_found(name: impl Into<String>) -> Self {
        StoreError::NotFound { name: name.into() }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
