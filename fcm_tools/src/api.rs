use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};

use crate::{config::FcmConfig, data_objects::{MulticastMessage, MulticastResponse}, FcmApiError};

#[derive(Clone)]
pub struct FcmApi {
    config: FcmConfig,
    client: Arc<Client>,
}

impl FcmApi {
    pub fn new(config: FcmConfig) -> Result<Self, FcmApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let bearer = format!("Bearer {}", config.access_token.reveal());
        let val = HeaderValue::from_str(&bearer).map_err(|e| FcmApiError::Initialization(e.to_string()))?;
        headers.insert("Authorization", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| FcmApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn url(&self) -> String {
        format!("{}/messages:sendMulticast", self.config.endpoint)
    }

    /// Send one batched request addressed to every token in the message.
    ///
    /// Partial failure is reported in the response body, not as an error; only transport
    /// problems and non-2xx statuses surface as [`FcmApiError`].
    pub async fn send_multicast(&self, message: &MulticastMessage) -> Result<MulticastResponse, FcmApiError> {
        let url = self.url();
        trace!("🔔️ Sending multicast request to {} recipients: {url}", message.tokens.len());
        let response = self
            .client
            .post(url)
            .json(message)
            .send()
            .await
            .map_err(|e| FcmApiError::SendResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("🔔️ Multicast request accepted. {}", response.status());
            let result =
                response.json::<MulticastResponse>().await.map_err(|e| FcmApiError::JsonError(e.to_string()))?;
            debug!(
                "🔔️ Multicast delivery report: {} ok, {} failed",
                result.success_count, result.failure_count
            );
            Ok(result)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| FcmApiError::SendResponseError(e.to_string()))?;
            Err(FcmApiError::QueryError { status, message })
        }
    }
}
