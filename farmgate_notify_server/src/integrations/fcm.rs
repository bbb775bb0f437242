//! Wiring between the notification engine and the FCM delivery gateway.
use farmgate_notify_engine::{
    db_types::NotificationPayload,
    events::{EventHandlers, EventHooks},
    traits::{PushChannel, PushChannelError, PushResponse, TokenOutcome},
};
use fcm_tools::{FcmApi, FcmApiError, FcmConfig, MulticastMessage, Notification};
use futures::future::BoxFuture;
use log::*;

/// Adapter giving the engine's dispatcher access to the FCM gateway client.
#[derive(Clone)]
pub struct FcmPush {
    api: FcmApi,
}

impl FcmPush {
    pub fn new(config: FcmConfig) -> Result<Self, FcmApiError> {
        Ok(Self { api: FcmApi::new(config)? })
    }
}

impl PushChannel for FcmPush {
    async fn send_multicast(
        &self,
        tokens: &[String],
        payload: &NotificationPayload,
    ) -> Result<PushResponse, PushChannelError> {
        let notification = Notification { title: payload.title.clone(), body: payload.body.clone() };
        let message = MulticastMessage::new(tokens.to_vec(), notification, payload.data.clone());
        let response = self.api.send_multicast(&message).await.map_err(|e| match e {
            FcmApiError::QueryError { status, message } => {
                PushChannelError::Rejected(format!("Error {status}. {message}"))
            },
            FcmApiError::JsonError(e) => PushChannelError::MalformedResponse(e),
            other => PushChannelError::Unreachable(other.to_string()),
        })?;
        let outcomes = response
            .responses
            .into_iter()
            .map(|r| TokenOutcome { success: r.success, error_code: r.error.map(|e| e.code) })
            .collect();
        Ok(PushResponse {
            success_count: response.success_count,
            failure_count: response.failure_count,
            outcomes,
        })
    }
}

pub const DISPATCH_EVENT_BUFFER_SIZE: usize = 25;

/// Assigns the delivery observability hook.
///
/// Every dispatch publishes a `DispatchCompletedEvent`; the hook records the delivery counts
/// and any tokens the gateway classified as permanently invalid. Invalid tokens are logged
/// only: the token documents are owned by the mobile apps' registration flow, and this service
/// has no write path to the store.
pub fn create_dispatch_event_handlers() -> EventHandlers {
    let mut hooks = EventHooks::default();
    hooks.on_dispatch_completed(|ev| {
        let fut: BoxFuture<'static, ()> = Box::pin(async move {
            info!(
                "🔔️ Push for order [{}] to user {}: {}. Completed at {}.",
                ev.order_id, ev.user_id, ev.result, ev.completed_at
            );
            if !ev.result.invalid_tokens.is_empty() {
                warn!(
                    "🔔️ {} tokens for user {} are no longer deliverable: {}",
                    ev.result.invalid_tokens.len(),
                    ev.user_id,
                    ev.result.invalid_tokens.join(", ")
                );
            }
        });
        fut
    });
    EventHandlers::new(DISPATCH_EVENT_BUFFER_SIZE, hooks)
}
