//! A minimal model of the document store's typed value envelopes.
//!
//! Firestore wraps every field value in a tagged envelope (`stringValue`, `arrayValue`, ...).
//! Only the shapes the token documents actually use are modeled here; anything else decodes to
//! an empty envelope and is ignored.
use std::collections::HashMap;

use serde::Deserialize;

use crate::db_types::DeviceTokenRecord;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub fields: HashMap<String, FieldValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldValue {
    pub string_value: Option<String>,
    pub array_value: Option<ArrayValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArrayValue {
    pub values: Vec<FieldValue>,
}

impl Document {
    /// Unwrap the two token field shapes out of their envelopes. Entries that are not strings
    /// are dropped; empty strings and duplicates survive to this point and are filtered by
    /// [`DeviceTokenRecord::device_tokens`].
    pub fn into_token_record(mut self) -> DeviceTokenRecord {
        let tokens = self
            .fields
            .remove("tokens")
            .and_then(|v| v.array_value)
            .map(|arr| arr.values.into_iter().filter_map(|v| v.string_value).collect())
            .unwrap_or_default();
        let token = self.fields.remove("token").and_then(|v| v.string_value);
        DeviceTokenRecord { tokens, token }
    }
}
