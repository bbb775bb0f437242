use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Delivery hints are fixed configuration; the gateway interprets them per platform.
pub const ANDROID_PRIORITY: &str = "high";
pub const ANDROID_CHANNEL_ID: &str = "default_channel";
pub const APNS_SOUND: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidNotification {
    #[serde(rename = "channelId")]
    pub channel_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidConfig {
    pub priority: String,
    pub notification: AndroidNotification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aps {
    pub sound: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApnsPayload {
    pub aps: Aps,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApnsConfig {
    pub payload: ApnsPayload,
}

/// One batched send request addressed to every token in `tokens`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MulticastMessage {
    pub notification: Notification,
    pub data: BTreeMap<String, String>,
    pub tokens: Vec<String>,
    pub android: AndroidConfig,
    pub apns: ApnsConfig,
}

impl MulticastMessage {
    /// Builds a multicast message with the standard delivery hints applied: high-priority
    /// delivery on the default channel for Android, and the default alert sound for APNS.
    pub fn new(tokens: Vec<String>, notification: Notification, data: BTreeMap<String, String>) -> Self {
        Self {
            notification,
            data,
            tokens,
            android: AndroidConfig {
                priority: ANDROID_PRIORITY.to_string(),
                notification: AndroidNotification { channel_id: ANDROID_CHANNEL_ID.to_string() },
            },
            apns: ApnsConfig { payload: ApnsPayload { aps: Aps { sound: APNS_SOUND.to_string() } } },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendError {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// The per-recipient outcome. The entry at index `i` corresponds to `tokens[i]` in the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SendError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MulticastResponse {
    pub success_count: u32,
    pub failure_count: u32,
    pub responses: Vec<SendOutcome>,
}
