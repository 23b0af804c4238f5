//! Periodic change announcer.
//!
//! Publishes the current wall-clock time to the change feed at a fixed
//! interval, from process startup until shutdown. Fire-and-forget: a slow
//! subscriber hits the broadcaster's bounded-queue drop policy, never this
//! loop.

use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::EventBus;
use crate::broadcast::topics;

/// Spawn the fixed-interval publisher. Each tick publishes the current time
/// as RFC 2822 text to `something_changed`.
pub fn start_ticker(
    broadcaster: EventBus,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(ticker_loop(broadcaster, interval, cancel))
}

async fn ticker_loop(broadcaster: EventBus, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                let now = Utc::now().to_rfc2822();
                debug!(timestamp = %now, "publishing tick");
                broadcaster.publish(topics::SOMETHING_CHANGED, Value::String(now));
            }
        }
    }
}
