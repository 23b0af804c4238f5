//! GraphQL schema definition with queries, mutations, and subscriptions
//!
//! This is the single API surface for the herald server.

use async_graphql::{MergedObject, Schema};

use crate::EventBus;

use super::mutations::MessageMutations;
use super::queries::{CatalogQueries, DemoQueries, SystemQueries};
use super::subscriptions::SubscriptionRoot;

/// The GraphQL schema type
pub type HeraldSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(SystemQueries, CatalogQueries, DemoQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(MessageMutations);

/// Build the GraphQL schema with all resolvers
pub fn build_schema(broadcaster: EventBus) -> HeraldSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        SubscriptionRoot,
    )
    .data(broadcaster)
    .finish()
}
