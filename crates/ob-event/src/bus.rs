//! Event bus
//!
//! Handlers are keyed by event name and invoked synchronously, in
//! registration order. Publishing to a name with no subscribers is a
//! silent no-op. Handler faults are logged and do not abort the publish.

use std::collections::HashMap;

/// Identifies one subscription, for later removal
pub type SubscriptionId = u64;

/// What a subscriber returns; an `Err` is logged and swallowed by the bus
pub type HandlerResult = anyhow::Result<()>;

struct Subscriber<E> {
    id: SubscriptionId,
    handler: Box<dyn FnMut(&E) -> HandlerResult>,
}

/// Synchronous publish/subscribe over one payload type
pub struct EventBus<E> {
    topics: HashMap<String, Vec<Subscriber<E>>>,
    next_id: SubscriptionId,
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            topics: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register a handler under an event name.
    ///
    /// Multiple handlers per name are allowed; they run in registration
    /// order on every publish.
    pub fn subscribe(
        &mut self,
        name: impl Into<String>,
        handler: impl FnMut(&E) -> HandlerResult + 'static,
    ) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;

        self.topics.entry(name.into()).or_default().push(Subscriber {
            id,
            handler: Box::new(handler),
        });

        id
    }

    /// Remove a subscription. Returns false when the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for subscribers in self.topics.values_mut() {
            if let Some(pos) = subscribers.iter().position(|s| s.id == id) {
                subscribers.remove(pos);
                return true;
            }
        }

        false
    }

    /// Invoke every handler registered for `name` with `payload`.
    ///
    /// A handler returning `Err` is reported through the `log` facade and
    /// does not prevent the remaining handlers from running. Returns the
    /// number of handlers invoked; zero subscribers is not an error.
    pub fn publish(&mut self, name: &str, payload: &E) -> usize {
        let Some(subscribers) = self.topics.get_mut(name) else {
            return 0;
        };

        log::trace!("event {name} ({} subscribers)", subscribers.len());

        let mut invoked = 0;
        for subscriber in subscribers.iter_mut() {
            invoked += 1;
            if let Err(err) = (subscriber.handler)(payload) {
                log::error!("handler {} for '{name}' failed: {err:#}", subscriber.id);
            }
        }

        invoked
    }

    /// Number of handlers currently registered for `name`
    pub fn subscriber_count(&self, name: &str) -> usize {
        self.topics.get(name).map_or(0, Vec::len)
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let mut bus: EventBus<u32> = EventBus::new();
        assert_eq!(bus.publish("missing", &1), 0);
    }

    #[test]
    fn test_handlers_run_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut bus: EventBus<u32> = EventBus::new();

        for tag in ["first", "second", "third"] {
            let sink = Rc::clone(&order);
            bus.subscribe("tick", move |_| {
                sink.borrow_mut().push(tag);
                Ok(())
            });
        }

        assert_eq!(bus.publish("tick", &0), 3);
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_faulting_handler_does_not_starve_later_ones() {
        let reached = Rc::new(RefCell::new(false));
        let mut bus: EventBus<u32> = EventBus::new();

        bus.subscribe("tick", |_| anyhow::bail!("boom"));

        let sink = Rc::clone(&reached);
        bus.subscribe("tick", move |_| {
            *sink.borrow_mut() = true;
            Ok(())
        });

        assert_eq!(bus.publish("tick", &0), 2);
        assert!(*reached.borrow());
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut bus: EventBus<u32> = EventBus::new();

        let sink = Rc::clone(&count);
        let id = bus.subscribe("tick", move |_| {
            *sink.borrow_mut() += 1;
            Ok(())
        });

        bus.publish("tick", &0);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish("tick", &0);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(bus.subscriber_count("tick"), 0);
    }

    #[test]
    fn test_payload_passed_by_reference() {
        let seen = Rc::new(RefCell::new(0u32));
        let mut bus: EventBus<u32> = EventBus::new();

        let sink = Rc::clone(&seen);
        bus.subscribe("tick", move |value| {
            *sink.borrow_mut() = *value;
            Ok(())
        });

        bus.publish("tick", &42);
        assert_eq!(*seen.borrow(), 42);
    }
}
