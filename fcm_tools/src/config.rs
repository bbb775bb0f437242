use fgn_common::Secret;
use log::*;

#[derive(Debug, Clone, Default)]
pub struct FcmConfig {
    /// Base URL of the push delivery gateway, without a trailing slash.
    /// e.g. "https://fcm.googleapis.com/v1/projects/farmgate-market"
    pub endpoint: String,
    /// Bearer credential presented to the gateway on every request.
    pub access_token: Secret<String>,
}

impl FcmConfig {
    pub fn new_from_env_or_default() -> Self {
        let endpoint = std::env::var("FGN_FCM_ENDPOINT").unwrap_or_else(|_| {
            warn!("🔔️ FGN_FCM_ENDPOINT not set, using (probably useless) default");
            "https://fcm.googleapis.com/v1/projects/farmgate-market".to_string()
        });
        let endpoint = endpoint.trim_end_matches('/').to_string();
        let access_token = Secret::new(std::env::var("FGN_FCM_ACCESS_TOKEN").unwrap_or_else(|_| {
            warn!("🔔️ FGN_FCM_ACCESS_TOKEN not set, using (probably useless) default");
            "fcm_00000000000000".to_string()
        }));
        Self { endpoint, access_token }
    }
}
