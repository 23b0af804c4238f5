//! GraphQL API with subscriptions for real-time updates
//!
//! This module provides a GraphQL API using async-graphql with support for
//! queries, mutations, and subscriptions over WebSocket.
//!
//! This is the single API surface for the herald server.

pub mod errors;
pub mod mutations;
pub mod queries;
pub mod scalars;
mod schema;
mod subscriptions;
pub mod transforms;
pub mod types;

pub use schema::{HeraldSchema, build_schema};
