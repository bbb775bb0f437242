use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex},
};

use farmgate_notify_engine::{
    db_types::{DeviceTokenRecord, OrderFields, OrderId},
    events::{DispatchCompletedEvent, EventHandlers, EventHooks, EventProducers},
    traits::{PushChannelError, PushResponse, TokenOutcome, TokenStore, TokenStoreError},
    Dispatcher,
    NotifyFlowApi,
    NotifyFlowError,
};
use support::{init_test_logging, MemoryTokenStore, RecordingPusher};

mod support;

fn flow(store: MemoryTokenStore, pusher: RecordingPusher) -> NotifyFlowApi<MemoryTokenStore, RecordingPusher> {
    NotifyFlowApi::new(store, pusher, EventProducers::default())
}

fn farmer_record() -> DeviceTokenRecord {
    DeviceTokenRecord { tokens: vec!["A".into(), "".into(), "A".into(), "B".into()], token: Some("C".into()) }
}

fn created_fields() -> OrderFields {
    OrderFields {
        id: None,
        farmer_id: Some("farmer-1".into()),
        buyer_id: Some("buyer-1".into()),
        product_id: Some("prod-9".into()),
        product_name: Some("Tomatoes".into()),
        quantity: Some("5".into()),
        status: Some("pending".into()),
    }
}

#[tokio::test]
async fn store_resolves_unique_non_empty_tokens() {
    init_test_logging();
    let store = MemoryTokenStore::new();
    store.insert("farmer-1", farmer_record());
    let tokens = store.fetch_device_tokens("farmer-1").await.unwrap();
    assert_eq!(tokens, vec!["A".to_string(), "B".into(), "C".into()]);
}

#[tokio::test]
async fn unknown_user_resolves_to_empty_set() {
    init_test_logging();
    let store = MemoryTokenStore::new();
    let tokens = store.fetch_device_tokens("nobody").await.unwrap();
    assert!(tokens.is_empty());
}

#[tokio::test]
async fn empty_dispatch_never_contacts_the_gateway() {
    init_test_logging();
    let pusher = RecordingPusher::new();
    let dispatcher = Dispatcher::new(pusher.clone());
    let payload = farmgate_notify_engine::db_types::NotificationPayload {
        title: "t".into(),
        body: "b".into(),
        data: Default::default(),
    };
    let result = dispatcher.dispatch(&[], &payload).await.unwrap();
    assert_eq!(result.success_count, 0);
    assert_eq!(result.failure_count, 0);
    assert!(result.invalid_tokens.is_empty());
    assert_eq!(pusher.call_count(), 0);
}

#[tokio::test]
async fn order_created_notifies_the_farmer() {
    init_test_logging();
    let store = MemoryTokenStore::new();
    store.insert("farmer-1", farmer_record());
    let pusher = RecordingPusher::new();
    let api = flow(store, pusher.clone());

    let result = api.handle_order_created(OrderId::from("ord-1"), created_fields()).await.unwrap();
    let result = result.expect("a dispatch should have happened");
    assert_eq!(result.success_count, 3);
    assert_eq!(result.failure_count, 0);

    let calls = pusher.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].tokens, vec!["A".to_string(), "B".into(), "C".into()]);
    assert_eq!(calls[0].payload.title, "New Order: Tomatoes");
    assert_eq!(calls[0].payload.body, "5 x Tomatoes");
    assert_eq!(calls[0].payload.data["type"], "order_created");
    assert_eq!(calls[0].payload.data["orderId"], "ord-1");
}

#[tokio::test]
async fn order_created_body_without_quantity_is_the_product_name() {
    init_test_logging();
    let store = MemoryTokenStore::new();
    store.insert("farmer-1", farmer_record());
    let pusher = RecordingPusher::new();
    let api = flow(store, pusher.clone());

    let mut fields = created_fields();
    fields.quantity = None;
    api.handle_order_created(OrderId::from("ord-1"), fields).await.unwrap();
    assert_eq!(pusher.calls()[0].payload.body, "Tomatoes");
}

#[tokio::test]
async fn order_created_without_farmer_id_is_a_no_op() {
    init_test_logging();
    let store = MemoryTokenStore::new();
    store.insert("farmer-1", farmer_record());
    let pusher = RecordingPusher::new();
    let api = flow(store, pusher.clone());

    let mut fields = created_fields();
    fields.farmer_id = None;
    let result = api.handle_order_created(OrderId::from("ord-1"), fields).await.unwrap();
    assert!(result.is_none());
    assert_eq!(pusher.call_count(), 0);
}

#[tokio::test]
async fn order_created_without_tokens_is_a_no_op() {
    init_test_logging();
    let store = MemoryTokenStore::new();
    let pusher = RecordingPusher::new();
    let api = flow(store, pusher.clone());

    let result = api.handle_order_created(OrderId::from("ord-1"), created_fields()).await.unwrap();
    assert!(result.is_none());
    assert_eq!(pusher.call_count(), 0);
}

#[tokio::test]
async fn order_updated_without_status_transition_is_a_no_op() {
    init_test_logging();
    let store = MemoryTokenStore::new();
    store.insert("buyer-1", farmer_record());
    let pusher = RecordingPusher::new();
    let api = flow(store, pusher.clone());

    let before = created_fields();
    let mut after = created_fields();
    // other fields change, status does not
    after.quantity = Some("12".into());
    after.product_name = Some("Heirloom Tomatoes".into());
    let result = api.handle_order_updated(OrderId::from("ord-1"), before, after).await.unwrap();
    assert!(result.is_none());
    assert_eq!(pusher.call_count(), 0);
}

#[tokio::test]
async fn order_updated_without_buyer_id_is_a_no_op() {
    init_test_logging();
    let store = MemoryTokenStore::new();
    let pusher = RecordingPusher::new();
    let api = flow(store, pusher.clone());

    let before = created_fields();
    let mut after = created_fields();
    after.status = Some("shipped".into());
    after.buyer_id = None;
    let result = api.handle_order_updated(OrderId::from("ord-1"), before, after).await.unwrap();
    assert!(result.is_none());
    assert_eq!(pusher.call_count(), 0);
}

#[tokio::test]
async fn status_transition_notifies_the_buyer_exactly_once() {
    init_test_logging();
    let store = MemoryTokenStore::new();
    store.insert("buyer-1", DeviceTokenRecord { tokens: vec!["A".into(), "B".into()], token: None });
    let pusher = RecordingPusher::new();
    let api = flow(store, pusher.clone());

    let before = created_fields();
    let mut after = created_fields();
    after.status = Some("shipped".into());
    let result = api.handle_order_updated(OrderId::from("ord-1"), before, after).await.unwrap();
    let result = result.expect("a dispatch should have happened");
    assert_eq!(result.success_count, 2);

    let calls = pusher.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].tokens, vec!["A".to_string(), "B".into()]);
    assert_eq!(calls[0].payload.title, "Order Updated");
    assert_eq!(calls[0].payload.body, "Tomatoes: shipped");
    assert_eq!(calls[0].payload.data["type"], "order_updated");
    assert_eq!(calls[0].payload.data["status"], "shipped");
    assert_eq!(calls[0].payload.data["buyerId"], "buyer-1");
}

#[tokio::test]
async fn dead_tokens_are_reported_but_counts_come_from_the_gateway() {
    init_test_logging();
    let store = MemoryTokenStore::new();
    store.insert(
        "buyer-1",
        DeviceTokenRecord { tokens: vec!["A".into(), "B".into(), "C".into()], token: None },
    );
    let pusher = RecordingPusher::new();
    pusher.respond_with(PushResponse {
        success_count: 2,
        failure_count: 1,
        outcomes: vec![
            TokenOutcome::ok(),
            TokenOutcome::failed("messaging/registration-token-not-registered"),
            TokenOutcome::ok(),
        ],
    });
    let api = flow(store, pusher.clone());

    let before = created_fields();
    let mut after = created_fields();
    after.status = Some("shipped".into());
    let result = api.handle_order_updated(OrderId::from("ord-1"), before, after).await.unwrap();
    let result = result.unwrap();
    assert_eq!(result.success_count, 2);
    assert_eq!(result.failure_count, 1);
    assert_eq!(result.invalid_tokens, vec!["B".to_string()]);
}

#[tokio::test]
async fn transient_failures_are_not_classified_as_dead_tokens() {
    init_test_logging();
    let pusher = RecordingPusher::new();
    pusher.respond_with(PushResponse {
        success_count: 1,
        failure_count: 1,
        outcomes: vec![TokenOutcome::failed("messaging/internal-error"), TokenOutcome::ok()],
    });
    let dispatcher = Dispatcher::new(pusher);
    let payload = farmgate_notify_engine::db_types::NotificationPayload {
        title: "t".into(),
        body: "b".into(),
        data: Default::default(),
    };
    let result = dispatcher.dispatch(&["A".to_string(), "B".to_string()], &payload).await.unwrap();
    assert_eq!(result.failure_count, 1);
    assert!(result.invalid_tokens.is_empty());
}

#[tokio::test]
async fn store_outage_propagates_out_of_the_flow() {
    init_test_logging();
    let store = MemoryTokenStore::new();
    store.set_outage(TokenStoreError::Unreachable("connection refused".into()));
    let pusher = RecordingPusher::new();
    let api = flow(store, pusher.clone());

    let err = api.handle_order_created(OrderId::from("ord-1"), created_fields()).await.unwrap_err();
    assert!(matches!(err, NotifyFlowError::TokenStore(_)));
    assert_eq!(pusher.call_count(), 0);
}

#[tokio::test]
async fn gateway_outage_propagates_out_of_the_flow() {
    init_test_logging();
    let store = MemoryTokenStore::new();
    store.insert("farmer-1", farmer_record());
    let pusher = RecordingPusher::new();
    pusher.fail_with(PushChannelError::Unreachable("timed out".into()));
    let api = flow(store, pusher);

    let err = api.handle_order_created(OrderId::from("ord-1"), created_fields()).await.unwrap_err();
    assert!(matches!(err, NotifyFlowError::PushChannel(_)));
}

#[tokio::test]
async fn dispatch_completed_events_reach_subscribed_hooks() {
    init_test_logging();
    let seen: Arc<Mutex<Vec<DispatchCompletedEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let mut hooks = EventHooks::default();
    hooks.on_dispatch_completed(move |ev| {
        let sink = sink.clone();
        Box::pin(async move {
            sink.lock().unwrap().push(ev);
        }) as Pin<Box<dyn Future<Output = ()> + Send>>
    });
    let handlers = EventHandlers::new(8, hooks);
    let producers = handlers.producers();

    let store = MemoryTokenStore::new();
    store.insert("farmer-1", farmer_record());
    let pusher = RecordingPusher::new();
    let api = NotifyFlowApi::new(store, pusher, producers);

    api.handle_order_created(OrderId::from("ord-1"), created_fields()).await.unwrap();
    api.handle_order_created(OrderId::from("ord-2"), created_fields()).await.unwrap();
    drop(api);

    // With every producer dropped, the handler drains its queue and shuts down.
    if let Some(handler) = handlers.on_dispatch_completed {
        handler.start_handler().await;
    }
    // handler tasks run concurrently, so only membership is guaranteed
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    for order in ["ord-1", "ord-2"] {
        let event = seen
            .iter()
            .find(|ev| ev.order_id == OrderId::from(order))
            .unwrap_or_else(|| panic!("no event for {order}"));
        assert_eq!(event.user_id, "farmer-1");
        assert_eq!(event.result.success_count, 3);
    }
}
