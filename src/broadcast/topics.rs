//! Canonical topic names published by this server.

/// Timestamped change announcements, fed by the ticker and the
/// `postMessage` mutation; backs the `newMessage` subscription.
pub const SOMETHING_CHANGED: &str = "something_changed";
