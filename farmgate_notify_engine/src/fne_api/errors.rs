use thiserror::Error;

use crate::traits::{PushChannelError, TokenStoreError};

/// Failures of the notification flow's collaborators.
///
/// Expected absences (missing records, no tokens, no status transition) never surface here;
/// handlers treat those as clean no-ops. Anything that does surface means the single trigger
/// invocation failed and should be reported to the hosting platform for redelivery.
#[derive(Debug, Clone, Error)]
pub enum NotifyFlowError {
    #[error("Could not resolve device tokens. {0}")]
    TokenStore(#[from] TokenStoreError),
    #[error("Push dispatch failed. {0}")]
    PushChannel(#[from] PushChannelError),
}
