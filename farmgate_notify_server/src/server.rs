use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use farmgate_notify_engine::{events::EventProducers, FirestoreDocStore, NotifyFlowApi};
use log::*;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::fcm::{create_dispatch_event_handlers, FcmPush},
    middleware::HmacMiddlewareFactory,
    routes::{health, OrderCreatedTriggerRoute, OrderUpdatedTriggerRoute},
};

/// Header carrying the event relay's request signature.
pub const TRIGGER_SIGNATURE_HEADER: &str = "X-Relay-Signature";

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let store =
        FirestoreDocStore::new(config.firestore.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let push = FcmPush::new(config.fcm.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let handlers = create_dispatch_event_handlers();
    let producers = handlers.producers();
    handlers.start_handlers().await;
    let srv = create_server_instance(config, store, push, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    store: FirestoreDocStore,
    push: FcmPush,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let host = config.host.clone();
    let port = config.port;
    // The instance cap is operational tuning; each worker handles its trigger invocations
    // independently.
    let workers = config.max_instances;
    debug!("🚀️ Trigger routes are limited to {workers} concurrent workers");
    let srv = HttpServer::new(move || {
        let api = NotifyFlowApi::new(store.clone(), push.clone(), producers.clone());
        let hmac = HmacMiddlewareFactory::new(
            TRIGGER_SIGNATURE_HEADER,
            config.trigger_hmac_secret.clone(),
            config.trigger_hmac_checks,
        );
        let trigger_scope = web::scope("/trigger")
            .wrap(hmac)
            .service(OrderCreatedTriggerRoute::<FirestoreDocStore, FcmPush>::new())
            .service(OrderUpdatedTriggerRoute::<FirestoreDocStore, FcmPush>::new());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("fgn::access_log"))
            .app_data(web::Data::new(api))
            .service(health)
            .service(trigger_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .workers(workers)
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}
