//! Helpers for inspecting messages read off the twitter filter stream.
//! The stream interleaves statuses with control notices (`delete`, `limit`, ...) which carry no
//! `text`.

use serde_json::Value;

/// true if the message is a status rather than a control notice
pub fn is_status(message: &Value) -> bool {
    message.get("text").is_some()
}

/// The handle of the status author, used as the partition key on the data stream
pub fn author_screen_name(message: &Value) -> Option<&str> {
    message.get("user")?.get("screen_name")?.as_str()
}
