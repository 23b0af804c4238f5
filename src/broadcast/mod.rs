//! In-process event broadcaster.
//!
//! Decouples publishers from subscribers: [`Broadcaster::publish`] fans an
//! event out to every subscriber currently registered on the topic, through
//! each subscriber's optional predicate, into a bounded per-subscriber queue.
//! [`Broadcaster::subscribe`] returns a [`Subscription`], a cancellable
//! stream over that queue. Events published before a subscriber registered
//! are never delivered (no buffering, no replay).
//!
//! ## Backpressure
//!
//! Each subscriber owns a bounded queue (capacity set at construction).
//! Delivery uses `try_send`: when a subscriber's queue is full the event is
//! dropped for that subscriber only and logged at debug level. Publishers
//! never block on slow consumers.
//!
//! ## Failure containment
//!
//! A panicking predicate or a gone receiver affects only that subscriber:
//! the event is skipped (or the subscriber pruned) and delivery to the
//! remaining subscribers continues. `publish` itself never fails.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};

use futures::Stream;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub mod topics;

/// Per-subscriber delivery predicate. Receives the event payload; returning
/// false silently skips delivery to that subscriber. Registration-scoped
/// context belongs in the closure's captures.
pub type Filter<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

struct Subscriber<T> {
    id: u64,
    filter: Option<Filter<T>>,
    tx: mpsc::Sender<T>,
}

struct Registry<T> {
    topics: RwLock<HashMap<String, Vec<Subscriber<T>>>>,
    next_id: AtomicU64,
    queue_capacity: usize,
}

/// Topic-keyed publish/subscribe hub. Cheap to clone; all clones share one
/// registry. Construct once at startup and hand clones to publishers and
/// subscription resolvers.
pub struct Broadcaster<T> {
    registry: Arc<Registry<T>>,
}

impl<T> Clone for Broadcaster<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T> Broadcaster<T> {
    /// Create a broadcaster whose subscribers each buffer at most
    /// `queue_capacity` undelivered events.
    pub fn new(queue_capacity: usize) -> Self {
        assert!(queue_capacity > 0, "queue capacity must be non-zero");
        Self {
            registry: Arc::new(Registry {
                topics: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(0),
                queue_capacity,
            }),
        }
    }

    /// Remove a subscriber from the registry. Idempotent: unknown or
    /// already-removed handles are a no-op. Dropping the [`Subscription`]
    /// does this implicitly.
    #[allow(dead_code)]
    pub fn unsubscribe(&self, handle: &SubscriberHandle) {
        self.remove(&handle.topic, &[handle.id]);
    }

    /// Number of subscribers currently registered on `topic`.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.registry
            .topics
            .read()
            .get(topic)
            .map_or(0, Vec::len)
    }

    fn remove(&self, topic: &str, ids: &[u64]) {
        let mut topics = self.registry.topics.write();
        if let Some(subs) = topics.get_mut(topic) {
            subs.retain(|s| !ids.contains(&s.id));
            if subs.is_empty() {
                topics.remove(topic);
            }
        }
    }
}

impl<T: Clone + Send + 'static> Broadcaster<T> {
    /// Offer `payload` to every subscriber currently registered on `topic`,
    /// in registration order. Never blocks and never fails: full queues drop
    /// the event for that subscriber, gone receivers are pruned.
    pub fn publish(&self, topic: &str, payload: T) {
        // Snapshot the subscriber list so delivery happens outside the
        // registry lock; a slow consumer must not block registration.
        let targets: Vec<(u64, Option<Filter<T>>, mpsc::Sender<T>)> = {
            let topics = self.registry.topics.read();
            match topics.get(topic) {
                Some(subs) => subs
                    .iter()
                    .map(|s| (s.id, s.filter.clone(), s.tx.clone()))
                    .collect(),
                None => return,
            }
        };

        let mut closed = Vec::new();
        for (id, filter, tx) in targets {
            if let Some(filter) = filter {
                match catch_unwind(AssertUnwindSafe(|| filter(&payload))) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(_) => {
                        warn!(topic, subscriber = id, "subscriber filter panicked, event skipped");
                        continue;
                    }
                }
            }
            match tx.try_send(payload.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    debug!(topic, subscriber = id, "subscriber queue full, event dropped");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => closed.push(id),
            }
        }

        if !closed.is_empty() {
            self.remove(topic, &closed);
        }
    }

    /// Register a subscriber receiving every event published to `topic`
    /// after this call returns.
    pub fn subscribe(&self, topic: &str) -> Subscription<T> {
        self.register(topic, None)
    }

    /// Register a subscriber receiving only events for which `filter`
    /// returns true.
    pub fn subscribe_with<F>(&self, topic: &str, filter: F) -> Subscription<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.register(topic, Some(Arc::new(filter)))
    }

    fn register(&self, topic: &str, filter: Option<Filter<T>>) -> Subscription<T> {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(self.registry.queue_capacity);
        self.registry
            .topics
            .write()
            .entry(topic.to_owned())
            .or_default()
            .push(Subscriber { id, filter, tx });
        Subscription {
            handle: SubscriberHandle {
                topic: topic.to_owned(),
                id,
            },
            rx,
            broadcaster: self.clone(),
        }
    }
}

/// Identifies one registration for explicit teardown via
/// [`Broadcaster::unsubscribe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberHandle {
    topic: String,
    id: u64,
}

/// A live event stream for one subscriber. Infinite and non-restartable:
/// yields matching payloads in publish order until the subscription is
/// cancelled. Dropping it unregisters the subscriber and frees any
/// buffered-but-undelivered events.
pub struct Subscription<T> {
    handle: SubscriberHandle,
    rx: mpsc::Receiver<T>,
    broadcaster: Broadcaster<T>,
}

impl<T> Subscription<T> {
    /// Handle for explicit teardown (transports that do not just drop the
    /// stream)
    #[allow(dead_code)]
    pub fn handle(&self) -> &SubscriberHandle {
        &self.handle
    }

    /// Receive the next matching event. Returns `None` once the
    /// subscription has been torn down via [`Broadcaster::unsubscribe`].
    #[allow(dead_code)]
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}

impl<T> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.broadcaster.remove(&self.handle.topic, &[self.handle.id]);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio_stream::StreamExt;

    use super::*;

    #[tokio::test]
    async fn delivers_in_publish_order() {
        let bus: Broadcaster<u32> = Broadcaster::new(16);
        let mut sub = bus.subscribe("orders");

        bus.publish("orders", 1);
        bus.publish("orders", 2);
        bus.publish("orders", 3);

        assert_eq!(sub.recv().await, Some(1));
        assert_eq!(sub.recv().await, Some(2));
        assert_eq!(sub.recv().await, Some(3));
    }

    #[tokio::test]
    async fn late_subscriber_never_sees_earlier_events() {
        let bus: Broadcaster<&str> = Broadcaster::new(16);
        bus.publish("feed", "early");

        let mut sub = bus.subscribe("feed");
        bus.publish("feed", "late");

        assert_eq!(sub.recv().await, Some("late"));
    }

    #[tokio::test]
    async fn filter_gates_delivery_silently() {
        let bus: Broadcaster<u32> = Broadcaster::new(16);
        let mut evens = bus.subscribe_with("numbers", |n: &u32| n % 2 == 0);
        let mut all = bus.subscribe_with("numbers", |_: &u32| true);

        for n in 1..=4 {
            bus.publish("numbers", n);
        }

        assert_eq!(evens.recv().await, Some(2));
        assert_eq!(evens.recv().await, Some(4));
        assert_eq!(all.recv().await, Some(1));
        assert_eq!(all.recv().await, Some(2));
        assert_eq!(all.recv().await, Some(3));
        assert_eq!(all.recv().await, Some(4));
    }

    #[tokio::test]
    async fn panicking_filter_does_not_break_other_subscribers() {
        let bus: Broadcaster<u32> = Broadcaster::new(16);
        let _broken = bus.subscribe_with("feed", |_: &u32| panic!("bad predicate"));
        let mut healthy = bus.subscribe("feed");

        bus.publish("feed", 7);
        bus.publish("feed", 8);

        assert_eq!(healthy.recv().await, Some(7));
        assert_eq!(healthy.recv().await, Some(8));
    }

    #[tokio::test]
    async fn unsubscribe_is_idempotent_and_terminates_the_stream() {
        let bus: Broadcaster<u32> = Broadcaster::new(16);
        let mut sub = bus.subscribe("feed");
        let handle = sub.handle().clone();

        bus.unsubscribe(&handle);
        bus.unsubscribe(&handle);

        assert_eq!(bus.subscriber_count("feed"), 0);
        bus.publish("feed", 1);
        assert_eq!(sub.recv().await, None);
    }

    #[tokio::test]
    async fn topics_are_isolated() {
        let bus: Broadcaster<u32> = Broadcaster::new(16);
        let mut sub_b = bus.subscribe("b");

        bus.publish("a", 42);

        let timed_out = tokio::time::timeout(Duration::from_millis(50), sub_b.recv())
            .await
            .is_err();
        assert!(timed_out, "subscriber on topic b observed an event from topic a");
    }

    #[tokio::test]
    async fn full_queue_drops_newest_for_that_subscriber_only() {
        let bus: Broadcaster<u32> = Broadcaster::new(2);
        let mut stalled = bus.subscribe("feed");
        let mut draining = bus.subscribe("feed");

        // `draining` keeps up; `stalled` never consumes and overflows at 2.
        bus.publish("feed", 1);
        bus.publish("feed", 2);
        assert_eq!(draining.recv().await, Some(1));
        assert_eq!(draining.recv().await, Some(2));

        bus.publish("feed", 3);
        assert_eq!(draining.recv().await, Some(3));

        assert_eq!(stalled.recv().await, Some(1));
        assert_eq!(stalled.recv().await, Some(2));

        // The overflowed event is gone for `stalled`; later publishes
        // are delivered again.
        bus.publish("feed", 4);
        assert_eq!(stalled.recv().await, Some(4));
    }

    #[tokio::test]
    async fn dropping_a_subscription_unregisters_it() {
        let bus: Broadcaster<u32> = Broadcaster::new(16);
        let sub = bus.subscribe("feed");
        assert_eq!(bus.subscriber_count("feed"), 1);

        drop(sub);
        assert_eq!(bus.subscriber_count("feed"), 0);

        // Publishing to a now-empty topic is a no-op.
        bus.publish("feed", 1);
    }

    #[tokio::test]
    async fn subscription_implements_stream() {
        let bus: Broadcaster<u32> = Broadcaster::new(16);
        let mut sub = bus.subscribe("feed");

        bus.publish("feed", 10);
        bus.publish("feed", 20);

        assert_eq!(sub.next().await, Some(10));
        assert_eq!(sub.next().await, Some(20));
    }
}
