pub mod messages;

pub use messages::MessageMutations;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, Object, Result};

    pub(crate) use crate::EventBus;
    pub(crate) use crate::broadcast::topics;
    pub(crate) use crate::graphql::errors;
}
