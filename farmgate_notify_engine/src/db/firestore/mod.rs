mod documents;

use std::sync::Arc;

use fgn_common::Secret;
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    StatusCode,
};

use crate::{
    db::firestore::documents::Document,
    traits::{TokenStore, TokenStoreError},
};

#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    /// Base URL of the document store REST surface, without a trailing slash.
    pub base_url: String,
    pub project_id: String,
    /// Bearer credential for the REST surface. Leave blank when talking to an emulator.
    pub access_token: Secret<String>,
    /// The collection holding the per-user device token documents.
    pub token_collection: String,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            base_url: "https://firestore.googleapis.com/v1".to_string(),
            project_id: "farmgate-market".to_string(),
            access_token: Secret::default(),
            token_collection: "deviceTokens".to_string(),
        }
    }
}

impl FirestoreConfig {
    pub fn new_from_env_or_default() -> Self {
        let defaults = FirestoreConfig::default();
        let base_url = std::env::var("FGN_FIRESTORE_BASE_URL").unwrap_or_else(|_| {
            info!("📇️ FGN_FIRESTORE_BASE_URL not set, using {}", defaults.base_url);
            defaults.base_url.clone()
        });
        let base_url = base_url.trim_end_matches('/').to_string();
        let project_id = std::env::var("FGN_FIRESTORE_PROJECT_ID").unwrap_or_else(|_| {
            warn!("📇️ FGN_FIRESTORE_PROJECT_ID not set, using (probably useless) default");
            defaults.project_id.clone()
        });
        let access_token = Secret::new(std::env::var("FGN_FIRESTORE_ACCESS_TOKEN").unwrap_or_else(|_| {
            warn!("📇️ FGN_FIRESTORE_ACCESS_TOKEN not set. Lookups will only work against an emulator.");
            String::default()
        }));
        let token_collection = std::env::var("FGN_FIRESTORE_TOKEN_COLLECTION").unwrap_or_else(|_| {
            info!("📇️ FGN_FIRESTORE_TOKEN_COLLECTION not set, using {}", defaults.token_collection);
            defaults.token_collection.clone()
        });
        Self { base_url, project_id, access_token, token_collection }
    }
}

/// Read-only [`TokenStore`] backend over the Firestore REST surface.
#[derive(Clone)]
pub struct FirestoreDocStore {
    config: FirestoreConfig,
    client: Arc<Client>,
}

impl FirestoreDocStore {
    pub fn new(config: FirestoreConfig) -> Result<Self, TokenStoreError> {
        let mut headers = HeaderMap::with_capacity(1);
        if !config.access_token.is_blank() {
            let bearer = format!("Bearer {}", config.access_token.reveal());
            let val =
                HeaderValue::from_str(&bearer).map_err(|e| TokenStoreError::Initialization(e.to_string()))?;
            headers.insert("Authorization", val);
        }
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| TokenStoreError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    fn document_url(&self, collection: &str, doc_id: &str) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{collection}/{doc_id}",
            self.config.base_url, self.config.project_id
        )
    }
}

impl TokenStore for FirestoreDocStore {
    async fn fetch_device_tokens(&self, user_id: &str) -> Result<Vec<String>, TokenStoreError> {
        let url = self.document_url(&self.config.token_collection, user_id);
        trace!("📇️ Fetching token document: {url}");
        let response =
            self.client.get(url).send().await.map_err(|e| TokenStoreError::Unreachable(e.to_string()))?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("📇️ No token document for user {user_id}");
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| TokenStoreError::Decode(e.to_string()))?;
            return Err(TokenStoreError::QueryError { status, message });
        }
        let document = response.json::<Document>().await.map_err(|e| TokenStoreError::Decode(e.to_string()))?;
        let tokens = document.into_token_record().device_tokens();
        trace!("📇️ Resolved {} device tokens for user {user_id}", tokens.len());
        Ok(tokens)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn document_urls_follow_the_rest_shape() {
        let config = FirestoreConfig {
            base_url: "http://localhost:8080/v1".to_string(),
            project_id: "demo".to_string(),
            ..FirestoreConfig::default()
        };
        let store = FirestoreDocStore::new(config).unwrap();
        assert_eq!(
            store.document_url("deviceTokens", "farmer-1"),
            "http://localhost:8080/v1/projects/demo/databases/(default)/documents/deviceTokens/farmer-1"
        );
    }
}
