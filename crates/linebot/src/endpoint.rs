//! Messaging API endpoint paths.
//!
//! Paths are relative to the client's endpoint base and are joined onto the
//! base path with [`join_path`].

use crate::error::{Error, Result};

/// Default API root.
pub const API_ENDPOINT_BASE: &str = "https://api.line.me";

/// Send a push message.
pub const PUSH_MESSAGE: &str = "/v2/bot/message/push";

/// Send a reply message.
pub const REPLY_MESSAGE: &str = "/v2/bot/message/reply";

/// Send the same message to multiple users.
pub const MULTICAST: &str = "/v2/bot/message/multicast";

/// Path for the content (image, video, audio, file) of a received message.
pub fn message_content(message_id: &str) -> Result<String> {
    Ok(format!("/v2/bot/message/{}/content", segment(message_id)?))
}

/// Path to leave a group chat.
pub fn leave_group(group_id: &str) -> Result<String> {
    Ok(format!("/v2/bot/group/{}/leave", segment(group_id)?))
}

/// Path to leave a multi-person chat room.
pub fn leave_room(room_id: &str) -> Result<String> {
    Ok(format!("/v2/bot/room/{}/leave", segment(room_id)?))
}

/// Path for a user's profile.
pub fn profile(user_id: &str) -> Result<String> {
    Ok(format!("/v2/bot/profile/{}", segment(user_id)?))
}

/// Join an endpoint path onto a base path.
///
/// Empty segments and `.` are dropped and `..` removes the previous segment
/// (never climbing above the root). The result is always rooted and carries
/// no trailing slash unless it is the root itself.
pub fn join_path(base: &str, endpoint: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in base.split('/').chain(endpoint.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Percent-encode an identifier as a single path segment.
///
/// Empty, `.` and `..` are rejected: they would be dropped or climb a level
/// when the path is joined, whether encoded or not.
fn segment(id: &str) -> Result<String> {
    match id {
        "" | "." | ".." => Err(Error::InvalidEndpoint(id.to_string())),
        id => Ok(urlencoding::encode(id).into_owned()),
    }
}
