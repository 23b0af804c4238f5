pub mod catalog;
pub mod demo;
pub mod system;

pub use catalog::CatalogQueries;
pub use demo::DemoQueries;
pub use system::SystemQueries;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Object, Result};

    pub(crate) use crate::graphql::types::*;
}
