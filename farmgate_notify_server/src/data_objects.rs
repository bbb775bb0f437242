use std::fmt::Display;

use farmgate_notify_engine::db_types::{OrderFields, OrderId};
use serde::{Deserialize, Serialize};

/// Callback body for a document-created event on the order collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedTrigger {
    pub order_id: OrderId,
    pub fields: OrderFields,
}

/// Callback body for a document-updated event: the snapshots either side of the write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdatedTrigger {
    pub order_id: OrderId,
    pub before: OrderFields,
    pub after: OrderFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}
