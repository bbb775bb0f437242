use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{DispatchCompletedEvent, EventHandler, EventProducer, Handler};

#[derive(Default, Clone)]
pub struct EventProducers {
    pub dispatch_completed_producer: Vec<EventProducer<DispatchCompletedEvent>>,
}

pub struct EventHandlers {
    pub on_dispatch_completed: Option<EventHandler<DispatchCompletedEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_dispatch_completed = hooks.on_dispatch_completed.map(|f| EventHandler::new(buffer_size, f));
        Self { on_dispatch_completed }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_dispatch_completed {
            result.dispatch_completed_producer.push(handler.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_dispatch_completed {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_dispatch_completed: Option<Handler<DispatchCompletedEvent>>,
}

impl EventHooks {
    pub fn on_dispatch_completed<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(DispatchCompletedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_dispatch_completed = Some(Arc::new(f));
        self
    }
}
