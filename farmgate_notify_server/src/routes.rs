//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module
//! neat and tidy 🙏
//!
//! Trigger handlers deliberately stay thin: they unwrap the relay callback into plain order
//! snapshots and delegate to the engine's notification flow. Anything the flow reports as an
//! expected absence is answered with a 200 so the relay does not redeliver; collaborator
//! failures surface as 502 so that it does.
use actix_web::{get, web, HttpResponse, Responder};
use farmgate_notify_engine::{
    traits::{PushChannel, TokenStore},
    NotifyFlowApi,
};
use log::*;
use serde_json::json;

use crate::{
    data_objects::{JsonResponse, OrderCreatedTrigger, OrderUpdatedTrigger},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("🚀️ Received health check request");
    HttpResponse::Ok().json(json!({"status": "ok"}))
}

route!(order_created_trigger => Post "/order_created" impl TokenStore, PushChannel);
pub async fn order_created_trigger<TTokenStore, TPushChannel>(
    body: web::Json<OrderCreatedTrigger>,
    api: web::Data<NotifyFlowApi<TTokenStore, TPushChannel>>,
) -> Result<HttpResponse, ServerError>
where
    TTokenStore: TokenStore + 'static,
    TPushChannel: PushChannel + 'static,
{
    let OrderCreatedTrigger { order_id, fields } = body.into_inner();
    trace!("🧺️ Received order-created trigger for order [{order_id}]");
    let response = match api.handle_order_created(order_id.clone(), fields).await {
        Ok(Some(result)) => {
            info!("🧺️ Farmer notified of new order [{order_id}]. {result}");
            JsonResponse::success(format!("Farmer notified. {result}."))
        },
        Ok(None) => {
            debug!("🧺️ Order-created trigger for [{order_id}] had nothing to notify.");
            JsonResponse::success("Nothing to notify.")
        },
        Err(e) => {
            warn!("🧺️ Order-created trigger for [{order_id}] failed. {e}");
            return Err(e.into());
        },
    };
    Ok(HttpResponse::Ok().json(response))
}

route!(order_updated_trigger => Post "/order_updated" impl TokenStore, PushChannel);
pub async fn order_updated_trigger<TTokenStore, TPushChannel>(
    body: web::Json<OrderUpdatedTrigger>,
    api: web::Data<NotifyFlowApi<TTokenStore, TPushChannel>>,
) -> Result<HttpResponse, ServerError>
where
    TTokenStore: TokenStore + 'static,
    TPushChannel: PushChannel + 'static,
{
    let OrderUpdatedTrigger { order_id, before, after } = body.into_inner();
    trace!("🧺️ Received order-updated trigger for order [{order_id}]");
    let response = match api.handle_order_updated(order_id.clone(), before, after).await {
        Ok(Some(result)) => {
            info!("🧺️ Buyer notified of order [{order_id}] status change. {result}");
            JsonResponse::success(format!("Buyer notified. {result}."))
        },
        Ok(None) => {
            debug!("🧺️ Order-updated trigger for [{order_id}] had nothing to notify.");
            JsonResponse::success("Nothing to notify.")
        },
        Err(e) => {
            warn!("🧺️ Order-updated trigger for [{order_id}] failed. {e}");
            return Err(e.into());
        },
    };
    Ok(HttpResponse::Ok().json(response))
}
