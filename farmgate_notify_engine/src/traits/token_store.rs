use thiserror::Error;

/// Read-only access to the per-user device token documents.
#[allow(async_fn_in_trait)]
pub trait TokenStore: Clone {
    /// Fetch the deduplicated set of non-empty device tokens known for `user_id`.
    ///
    /// A user without a token document resolves to an empty set; that is a normal state, not an
    /// error. Callers must skip the lookup entirely when they have no user identifier to begin
    /// with. Errors are reserved for the store itself misbehaving (unreachable, rejecting the
    /// lookup, returning an undecodable document).
    async fn fetch_device_tokens(&self, user_id: &str) -> Result<Vec<String>, TokenStoreError>;
}

#[derive(Debug, Clone, Error)]
pub enum TokenStoreError {
    #[error("Could not initialize the token store client. {0}")]
    Initialization(String),
    #[error("The token store could not be reached. {0}")]
    Unreachable(String),
    #[error("Could not decode the token store response. {0}")]
    Decode(String),
    #[error("The token store rejected the lookup. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}
