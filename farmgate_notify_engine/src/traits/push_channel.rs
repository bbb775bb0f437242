use thiserror::Error;

use crate::db_types::NotificationPayload;

/// The outcome the gateway reported for a single recipient. The entry at index `i` of
/// [`PushResponse::outcomes`] corresponds to the token at index `i` of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenOutcome {
    pub success: bool,
    /// The gateway's error classification string, present on failure.
    pub error_code: Option<String>,
}

impl TokenOutcome {
    pub fn ok() -> Self {
        Self { success: true, error_code: None }
    }

    pub fn failed<S: Into<String>>(code: S) -> Self {
        Self { success: false, error_code: Some(code.into()) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushResponse {
    pub success_count: u32,
    pub failure_count: u32,
    pub outcomes: Vec<TokenOutcome>,
}

/// One-shot batched delivery to a set of device tokens.
#[allow(async_fn_in_trait)]
pub trait PushChannel: Clone {
    /// Send `payload` to every token in `tokens` as a single multicast request.
    ///
    /// Partial failure is reported through the response, never as an error; an `Err` means the
    /// gateway itself could not be used (unreachable, throttled, rejected the whole request).
    async fn send_multicast(
        &self,
        tokens: &[String],
        payload: &NotificationPayload,
    ) -> Result<PushResponse, PushChannelError>;
}

#[derive(Debug, Clone, Error)]
pub enum PushChannelError {
    #[error("The push gateway could not be reached. {0}")]
    Unreachable(String),
    #[error("The push gateway rejected the request. {0}")]
    Rejected(String),
    #[error("The push gateway response could not be decoded. {0}")]
    MalformedResponse(String),
}
