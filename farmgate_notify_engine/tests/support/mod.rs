//! In-memory stand-ins for the engine's collaborators.
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use farmgate_notify_engine::{
    db_types::{DeviceTokenRecord, NotificationPayload},
    traits::{PushChannel, PushChannelError, PushResponse, TokenOutcome, TokenStore, TokenStoreError},
};

pub fn init_test_logging() {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
}

#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    records: Arc<Mutex<HashMap<String, DeviceTokenRecord>>>,
    outage: Arc<Mutex<Option<TokenStoreError>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user_id: &str, record: DeviceTokenRecord) {
        self.records.lock().unwrap().insert(user_id.to_string(), record);
    }

    /// Make every subsequent lookup fail, simulating a store outage.
    pub fn set_outage(&self, error: TokenStoreError) {
        *self.outage.lock().unwrap() = Some(error);
    }
}

impl TokenStore for MemoryTokenStore {
    async fn fetch_device_tokens(&self, user_id: &str) -> Result<Vec<String>, TokenStoreError> {
        if let Some(error) = self.outage.lock().unwrap().clone() {
            return Err(error);
        }
        let records = self.records.lock().unwrap();
        Ok(records.get(user_id).map(|r| r.device_tokens()).unwrap_or_default())
    }
}

#[derive(Debug, Clone)]
pub struct RecordedPush {
    pub tokens: Vec<String>,
    pub payload: NotificationPayload,
}

/// A push channel that records every multicast it receives. By default every recipient is
/// reported as delivered; a scripted response or error overrides that.
#[derive(Clone, Default)]
pub struct RecordingPusher {
    calls: Arc<Mutex<Vec<RecordedPush>>>,
    script: Arc<Mutex<Option<Result<PushResponse, PushChannelError>>>>,
}

impl RecordingPusher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(&self, response: PushResponse) {
        *self.script.lock().unwrap() = Some(Ok(response));
    }

    pub fn fail_with(&self, error: PushChannelError) {
        *self.script.lock().unwrap() = Some(Err(error));
    }

    pub fn calls(&self) -> Vec<RecordedPush> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl PushChannel for RecordingPusher {
    async fn send_multicast(
        &self,
        tokens: &[String],
        payload: &NotificationPayload,
    ) -> Result<PushResponse, PushChannelError> {
        self.calls.lock().unwrap().push(RecordedPush { tokens: tokens.to_vec(), payload: payload.clone() });
        match self.script.lock().unwrap().clone() {
            Some(result) => result,
            None => Ok(PushResponse {
                success_count: tokens.len() as u32,
                failure_count: 0,
                outcomes: tokens.iter().map(|_| TokenOutcome::ok()).collect(),
            }),
        }
    }
}
