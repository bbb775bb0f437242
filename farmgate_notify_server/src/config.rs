use std::env;

use farmgate_notify_engine::FirestoreConfig;
use fcm_tools::FcmConfig;
use fgn_common::{env_flag, Secret};
use log::*;

const DEFAULT_FGN_HOST: &str = "127.0.0.1";
const DEFAULT_FGN_PORT: u16 = 8380;
const DEFAULT_FGN_REGION: &str = "us-central1";
const DEFAULT_MAX_INSTANCES: usize = 10;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Deployment region label. Operational metadata only; it is recorded at startup so that
    /// fleet logs can be correlated, and never changes behaviour.
    pub region: String,
    /// Upper bound on concurrently running trigger-processing workers.
    pub max_instances: usize,
    /// Document store holding the per-user device token records.
    pub firestore: FirestoreConfig,
    /// Push delivery gateway configuration.
    pub fcm: FcmConfig,
    /// Shared secret the event relay uses to sign callback bodies.
    pub trigger_hmac_secret: Secret<String>,
    /// When false, trigger callbacks are accepted without a signature check. Local development
    /// only.
    pub trigger_hmac_checks: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_FGN_HOST.to_string(),
            port: DEFAULT_FGN_PORT,
            region: DEFAULT_FGN_REGION.to_string(),
            max_instances: DEFAULT_MAX_INSTANCES,
            firestore: FirestoreConfig::default(),
            fcm: FcmConfig::default(),
            trigger_hmac_secret: Secret::default(),
            trigger_hmac_checks: true,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("FGN_HOST").ok().unwrap_or_else(|| DEFAULT_FGN_HOST.into());
        let port = env::var("FGN_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for FGN_PORT. {e} Using the default, {DEFAULT_FGN_PORT}, instead."
                    );
                    DEFAULT_FGN_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_FGN_PORT);
        let region = env::var("FGN_REGION").ok().unwrap_or_else(|| {
            info!("🪛️ FGN_REGION is not set. Using the default region, {DEFAULT_FGN_REGION}.");
            DEFAULT_FGN_REGION.into()
        });
        let max_instances = env::var("FGN_MAX_INSTANCES")
            .map(|s| {
                s.parse::<usize>().ok().filter(|n| *n > 0).unwrap_or_else(|| {
                    error!(
                        "🪛️ {s} is not a valid value for FGN_MAX_INSTANCES. Using the default, \
                         {DEFAULT_MAX_INSTANCES}, instead."
                    );
                    DEFAULT_MAX_INSTANCES
                })
            })
            .ok()
            .unwrap_or(DEFAULT_MAX_INSTANCES);
        let trigger_hmac_secret = Secret::new(env::var("FGN_TRIGGER_HMAC_SECRET").unwrap_or_else(|_| {
            error!(
                "🪛️ FGN_TRIGGER_HMAC_SECRET is not set. Trigger callbacks cannot be verified without it. Set it to \
                 the shared secret configured on the event relay."
            );
            String::default()
        }));
        let trigger_hmac_checks = env_flag("FGN_TRIGGER_HMAC_CHECKS", true);
        if !trigger_hmac_checks {
            warn!(
                "🚨️ Trigger signature checks are disabled. Anyone who can reach this server can inject order \
                 events. Do not run production like this."
            );
        }
        let firestore = FirestoreConfig::new_from_env_or_default();
        let fcm = FcmConfig::new_from_env_or_default();
        Self { host, port, region, max_instances, firestore, fcm, trigger_hmac_secret, trigger_hmac_checks }
    }
}
