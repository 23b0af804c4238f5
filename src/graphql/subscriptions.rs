//! GraphQL subscriptions for real-time updates
//!
//! Subscriptions allow clients to receive push updates over WebSocket.

use async_graphql::{Context, Subscription};
use futures::Stream;
use tokio_stream::StreamExt;

use crate::EventBus;
use crate::broadcast::topics;

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Subscribe to change announcements. The registered predicate passes
    /// everything through; non-string payloads on the feed are skipped.
    async fn new_message<'ctx>(&self, ctx: &Context<'ctx>) -> impl Stream<Item = String> + 'ctx {
        let bus = ctx.data_unchecked::<EventBus>();
        bus.subscribe_with(topics::SOMETHING_CHANGED, |_payload| true)
            .filter_map(|payload| payload.as_str().map(str::to_owned))
    }
}
