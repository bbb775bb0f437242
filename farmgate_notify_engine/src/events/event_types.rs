use chrono::{DateTime, Utc};

use crate::db_types::{DispatchResult, OrderId};

/// Published after every push dispatch so that hosting code can observe delivery outcomes
/// without coupling to the notification flow itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchCompletedEvent {
    pub order_id: OrderId,
    /// The counterparty the notification was addressed to (the farmer or the buyer).
    pub user_id: String,
    /// When the dispatch finished, engine-side.
    pub completed_at: DateTime<Utc>,
    pub result: DispatchResult,
}

impl DispatchCompletedEvent {
    pub fn new(order_id: OrderId, user_id: impl Into<String>, result: DispatchResult) -> Self {
        Self { order_id, user_id: user_id.into(), completed_at: Utc::now(), result }
    }
}
