use std::{collections::BTreeMap, fmt::Debug};

use log::*;

use crate::{
    db_types::{DispatchResult, NotificationPayload, OrderFields, OrderId},
    events::{DispatchCompletedEvent, EventProducers},
    fne_api::{dispatch_api::Dispatcher, errors::NotifyFlowError},
    traits::{PushChannel, TokenStore},
};

/// `NotifyFlowApi` is the primary API for reacting to order lifecycle events: it resolves the
/// counterparty's device tokens, composes the notification and runs the batched dispatch.
///
/// Each call is a stateless, single-shot reaction to one external event. The hosting platform
/// may run many calls concurrently (including for the same order); nothing here needs mutual
/// exclusion because the flow only reads shared state, and a duplicate notification under
/// at-least-once event delivery is acceptable.
#[derive(Clone)]
pub struct NotifyFlowApi<S, P> {
    store: S,
    dispatcher: Dispatcher<P>,
    producers: EventProducers,
}

impl<S, P> Debug for NotifyFlowApi<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NotifyFlowApi")
    }
}

impl<S, P> NotifyFlowApi<S, P> {
    pub fn new(store: S, channel: P, producers: EventProducers) -> Self {
        Self { store, dispatcher: Dispatcher::new(channel), producers }
    }
}

impl<S, P> NotifyFlowApi<S, P>
where
    S: TokenStore,
    P: PushChannel,
{
    /// React to a newly created order document: notify the farmer that an order came in.
    ///
    /// Expected absences resolve to `Ok(None)` without contacting the gateway:
    /// * the document carries no farmer identifier, or
    /// * the farmer has no registered device tokens.
    ///
    /// Collaborator failures (store or gateway unreachable) propagate so the invocation can be
    /// reported as failed and redelivered by the platform.
    pub async fn handle_order_created(
        &self,
        order_id: OrderId,
        fields: OrderFields,
    ) -> Result<Option<DispatchResult>, NotifyFlowError> {
        let Some(farmer_id) = non_empty(&fields.farmer_id) else {
            debug!("🧺️ Order [{order_id}] carries no farmer id. Nothing to notify.");
            return Ok(None);
        };
        let tokens = self.store.fetch_device_tokens(farmer_id).await?;
        if tokens.is_empty() {
            info!("🧺️ No device tokens for farmer {farmer_id}. Order [{order_id}] goes unannounced.");
            return Ok(None);
        }
        let payload = order_created_payload(&order_id, &fields);
        let result = self.dispatcher.dispatch(&tokens, &payload).await?;
        debug!("🧺️ Order [{order_id}] creation notice to farmer {farmer_id}: {result}");
        self.publish_dispatch_completed(&order_id, farmer_id, &result).await;
        Ok(Some(result))
    }

    /// React to a modified order document: notify the buyer, but only on a status transition.
    ///
    /// Expected absences resolve to `Ok(None)` without contacting the gateway:
    /// * the status is unchanged between the two snapshots (other field changes never notify),
    /// * the after-snapshot carries no buyer identifier, or
    /// * the buyer has no registered device tokens.
    pub async fn handle_order_updated(
        &self,
        order_id: OrderId,
        before: OrderFields,
        after: OrderFields,
    ) -> Result<Option<DispatchResult>, NotifyFlowError> {
        if before.status == after.status {
            trace!("🧺️ Order [{order_id}] modified without a status transition. Nothing to do.");
            return Ok(None);
        }
        let Some(buyer_id) = non_empty(&after.buyer_id) else {
            debug!("🧺️ Order [{order_id}] carries no buyer id. Nothing to notify.");
            return Ok(None);
        };
        let tokens = self.store.fetch_device_tokens(buyer_id).await?;
        if tokens.is_empty() {
            info!("🧺️ No device tokens for buyer {buyer_id}. Order [{order_id}] update goes unannounced.");
            return Ok(None);
        }
        let payload = order_updated_payload(&order_id, &after);
        let result = self.dispatcher.dispatch(&tokens, &payload).await?;
        debug!("🧺️ Order [{order_id}] status notice to buyer {buyer_id}: {result}");
        self.publish_dispatch_completed(&order_id, buyer_id, &result).await;
        Ok(Some(result))
    }

    async fn publish_dispatch_completed(&self, order_id: &OrderId, user_id: &str, result: &DispatchResult) {
        for producer in &self.producers.dispatch_completed_producer {
            let event = DispatchCompletedEvent::new(order_id.clone(), user_id, result.clone());
            producer.publish_event(event).await;
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn order_created_payload(order_id: &OrderId, fields: &OrderFields) -> NotificationPayload {
    let product_name = non_empty(&fields.product_name).unwrap_or("New order");
    let body = match non_empty(&fields.quantity) {
        Some(qty) => format!("{qty} x {product_name}"),
        None => product_name.to_string(),
    };
    let mut data = BTreeMap::new();
    data.insert("type".to_string(), "order_created".to_string());
    data.insert("orderId".to_string(), document_order_id(order_id, fields));
    data.insert("farmerId".to_string(), fields.farmer_id.clone().unwrap_or_default());
    data.insert("buyerId".to_string(), fields.buyer_id.clone().unwrap_or_default());
    data.insert("productId".to_string(), fields.product_id.clone().unwrap_or_default());
    data.insert("status".to_string(), non_empty(&fields.status).unwrap_or("pending").to_string());
    NotificationPayload { title: format!("New Order: {product_name}"), body, data }
}

fn order_updated_payload(order_id: &OrderId, after: &OrderFields) -> NotificationPayload {
    let product_name = non_empty(&after.product_name).unwrap_or("Order");
    let status = after.status.clone().unwrap_or_default();
    let mut data = BTreeMap::new();
    data.insert("type".to_string(), "order_updated".to_string());
    data.insert("orderId".to_string(), document_order_id(order_id, after));
    data.insert("buyerId".to_string(), after.buyer_id.clone().unwrap_or_default());
    data.insert("farmerId".to_string(), after.farmer_id.clone().unwrap_or_default());
    data.insert("productId".to_string(), after.product_id.clone().unwrap_or_default());
    data.insert("status".to_string(), status.clone());
    NotificationPayload { title: "Order Updated".to_string(), body: format!("{product_name}: {status}"), data }
}

/// The order id advertised in the data map: the document's own `id` field when present, falling
/// back to the trigger's order id parameter.
fn document_order_id(order_id: &OrderId, fields: &OrderFields) -> String {
    non_empty(&fields.id).map(str::to_string).unwrap_or_else(|| order_id.to_string())
}
