use thiserror::Error;

#[derive(Debug, Error)]
pub enum FcmApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid send request: {0}")]
    SendRequestError(String),
    #[error("Invalid send response: {0}")]
    SendResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Send failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}
