use log::*;

use crate::{
    db_types::{DispatchResult, NotificationPayload},
    traits::{PushChannel, PushChannelError},
};

/// Marker substrings in gateway error codes identifying a token that will never be deliverable
/// again: the app instance was unregistered, or the token is structurally invalid.
const DEAD_TOKEN_MARKERS: [&str; 2] = ["registration-token-not-registered", "invalid-argument"];

/// `Dispatcher` sends one batched push request to a set of device tokens and classifies the
/// per-recipient outcomes into the typed [`DispatchResult`].
#[derive(Clone)]
pub struct Dispatcher<P> {
    channel: P,
}

impl<P> Dispatcher<P> {
    pub fn new(channel: P) -> Self {
        Self { channel }
    }
}

impl<P> Dispatcher<P>
where P: PushChannel
{
    /// Send `payload` to every token in `tokens` as one multicast request.
    ///
    /// An empty token set is a no-op that returns [`DispatchResult::empty`] without contacting
    /// the gateway. Partial failure is a normal outcome of multicast delivery and is reported
    /// through the result, never as an error; tokens whose error classification marks them as
    /// permanently dead are collected in `invalid_tokens`. They are left in the token store;
    /// pruning would need a write path to the store, which this service does not have.
    pub async fn dispatch(
        &self,
        tokens: &[String],
        payload: &NotificationPayload,
    ) -> Result<DispatchResult, PushChannelError> {
        if tokens.is_empty() {
            trace!("📨️ No tokens to address, skipping dispatch");
            return Ok(DispatchResult::empty());
        }
        debug!("📨️ Dispatching \"{}\" to {} recipients", payload.title, tokens.len());
        let response = self.channel.send_multicast(tokens, payload).await?;
        let mut invalid_tokens = Vec::new();
        for (idx, outcome) in response.outcomes.iter().enumerate() {
            if outcome.success {
                continue;
            }
            let code = outcome.error_code.as_deref().unwrap_or("");
            if is_dead_token_code(code) {
                if let Some(token) = tokens.get(idx) {
                    invalid_tokens.push(token.clone());
                }
            }
        }
        if !invalid_tokens.is_empty() {
            info!("📨️ Invalid tokens detected: {}", invalid_tokens.len());
        }
        Ok(DispatchResult {
            success_count: response.success_count,
            failure_count: response.failure_count,
            invalid_tokens,
        })
    }
}

pub fn is_dead_token_code(code: &str) -> bool {
    DEAD_TOKEN_MARKERS.iter().any(|marker| code.contains(marker))
}

#[cfg(test)]
mod test {
    use super::is_dead_token_code;

    #[test]
    fn dead_token_classification() {
        assert!(is_dead_token_code("messaging/registration-token-not-registered"));
        assert!(is_dead_token_code("messaging/invalid-argument"));
        assert!(!is_dead_token_code("messaging/internal-error"));
        assert!(!is_dead_token_code("messaging/quota-exceeded"));
        assert!(!is_dead_token_code(""));
    }
}
