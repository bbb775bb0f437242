use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

//--------------------------------------        OrderId        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S: Into<String>> From<S> for OrderId {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

//--------------------------------------      OrderFields      ---------------------------------------------------------
/// The fields of an order document as observed in a lifecycle event snapshot.
///
/// Orders are written by the marketplace's order-management system; this service only ever reads
/// them, so every field is optional and absence is handled at the point of use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderFields {
    pub id: Option<String>,
    pub farmer_id: Option<String>,
    pub buyer_id: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<String>,
    pub status: Option<String>,
}

//--------------------------------------   DeviceTokenRecord   ---------------------------------------------------------
/// A per-user device token document.
///
/// Two historical shapes coexist: an array-valued `tokens` field and a singular legacy `token`
/// field. Records may hold either, both, or neither, and the array may contain duplicates and
/// empty strings left behind by old app versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceTokenRecord {
    pub tokens: Vec<String>,
    pub token: Option<String>,
}

impl DeviceTokenRecord {
    /// The union of both field shapes, with empty entries dropped and duplicates removed.
    /// First-seen order is preserved.
    pub fn device_tokens(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut result = Vec::new();
        for token in self.tokens.iter().chain(self.token.iter()) {
            if token.is_empty() {
                continue;
            }
            if seen.insert(token.as_str()) {
                result.push(token.clone());
            }
        }
        result
    }
}

//--------------------------------------  NotificationPayload  ---------------------------------------------------------
/// An ephemeral notification, built per dispatch and never persisted.
///
/// The data map identifies the event type and carries denormalized entity identifiers so that
/// the mobile apps can route a tap without a further lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub data: BTreeMap<String, String>,
}

//--------------------------------------    DispatchResult     ---------------------------------------------------------
/// The outcome of one batched dispatch.
///
/// Counts are the gateway-reported aggregates. `invalid_tokens` lists the recipients whose
/// tokens the gateway classified as permanently dead; they are reported for observability and
/// are never removed from the token store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResult {
    pub success_count: u32,
    pub failure_count: u32,
    pub invalid_tokens: Vec<String>,
}

impl DispatchResult {
    /// The result of dispatching to nobody: the gateway is not contacted at all.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl Display for DispatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} delivered, {} failed", self.success_count, self.failure_count)?;
        if !self.invalid_tokens.is_empty() {
            write!(f, " ({} tokens look permanently invalid)", self.invalid_tokens.len())?;
        }
        Ok(())
    }
}
