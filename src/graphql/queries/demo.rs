use async_graphql::Json;
use chrono::Utc;

use super::prelude::*;
use crate::graphql::errors;
use crate::graphql::scalars::Date;
use crate::graphql::transforms;

#[derive(Default)]
pub struct DemoQueries;

#[Object]
impl DemoQueries {
    /// Always fails with the authentication-required error shape
    async fn authentication_error(&self) -> Result<String> {
        Err(errors::authentication_error())
    }

    /// Arbitrary JSON payload
    async fn json_test(&self) -> Result<Json<serde_json::Value>> {
        Ok(Json(serde_json::json!({ "test": "json type" })))
    }

    /// Constant passed through the uppercase response transform
    async fn directive_test(&self) -> Result<String> {
        Ok(transforms::uppercase("abc".to_string()))
    }

    /// Current server time as a Date scalar (millisecond timestamp)
    async fn server_time(&self) -> Result<Date> {
        Ok(Date(Utc::now()))
    }
}
