//! GraphQL error taxonomy and boundary scrubbing
//!
//! Three client-visible failure shapes: authentication required
//! (`UNAUTHENTICATED`, terminal for the request), invalid user input
//! (`BAD_USER_INPUT`, retryable, carries the offending argument names), and
//! everything else. Before a response leaves the server every error is
//! logged with full detail; messages carrying the sensitive prefix are
//! replaced with an opaque message.

use async_graphql::{Error, ErrorExtensions, Response};
use tracing::error;

/// Error messages with this prefix never reach clients verbatim.
const SENSITIVE_PREFIX: &str = "Database Error: ";

const OPAQUE_MESSAGE: &str = "Internal server error";

/// Caller lacks required credentials. Not retryable.
pub fn authentication_error() -> Error {
    Error::new("must authenticate").extend_with(|_, e| e.set("code", "UNAUTHENTICATED"))
}

/// A caller-supplied value failed validation. `invalid_args` names the
/// offending arguments for client display; retryable after correction.
pub fn user_input_error(message: impl Into<String>, invalid_args: &[&str]) -> Error {
    let args: Vec<String> = invalid_args.iter().map(|s| s.to_string()).collect();
    Error::new(message).extend_with(move |_, e| {
        e.set("code", "BAD_USER_INPUT");
        e.set("invalidArgs", args);
    })
}

/// Log every request error server-side and redact sensitive messages
/// before the response crosses the transport boundary.
pub fn scrub_response(mut response: Response) -> Response {
    for err in &mut response.errors {
        error!(message = %err.message, path = ?err.path, "graphql request error");
        if err.message.starts_with(SENSITIVE_PREFIX) {
            err.message = OPAQUE_MESSAGE.to_string();
            err.extensions = None;
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use async_graphql::ServerError;

    use super::*;

    #[test]
    fn sensitive_messages_are_replaced() {
        let response = Response::from_errors(vec![ServerError::new(
            "Database Error: connection refused",
            None,
        )]);
        let scrubbed = scrub_response(response);
        assert_eq!(scrubbed.errors.len(), 1);
        assert_eq!(scrubbed.errors[0].message, "Internal server error");
        assert!(scrubbed.errors[0].extensions.is_none());
    }

    #[test]
    fn ordinary_messages_pass_through() {
        let response =
            Response::from_errors(vec![ServerError::new("must authenticate", None)]);
        let scrubbed = scrub_response(response);
        assert_eq!(scrubbed.errors[0].message, "must authenticate");
    }
}
