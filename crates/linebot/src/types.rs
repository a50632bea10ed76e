//! Request and response types for the Messaging API.
//!
//! Field names follow the wire format (camelCase).

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────────────────────────────────────

/// A message object, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Message {
    /// Plain text.
    Text { text: String },
    /// Image hosted at an HTTPS URL.
    Image {
        original_content_url: String,
        preview_image_url: String,
    },
    /// Video hosted at an HTTPS URL.
    Video {
        original_content_url: String,
        preview_image_url: String,
    },
    /// Audio hosted at an HTTPS URL; `duration` in milliseconds.
    Audio {
        original_content_url: String,
        duration: u64,
    },
    /// A location pin.
    Location {
        title: String,
        address: String,
        latitude: f64,
        longitude: f64,
    },
    /// A sticker from a sticker package.
    Sticker { package_id: String, sticker_id: String },
}

impl Message {
    /// A text message.
    pub fn text(text: impl Into<String>) -> Self {
        Message::Text { text: text.into() }
    }

    /// An image message.
    pub fn image(original_content_url: impl Into<String>, preview_image_url: impl Into<String>) -> Self {
        Message::Image {
            original_content_url: original_content_url.into(),
            preview_image_url: preview_image_url.into(),
        }
    }

    /// A sticker message.
    pub fn sticker(package_id: impl Into<String>, sticker_id: impl Into<String>) -> Self {
        Message::Sticker {
            package_id: package_id.into(),
            sticker_id: sticker_id.into(),
        }
    }
}

/// Request to push messages to a user, group or room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushMessageRequest {
    /// Recipient ID.
    pub to: String,
    /// Messages to send.
    pub messages: Vec<Message>,
}

impl PushMessageRequest {
    pub fn new(to: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            to: to.into(),
            messages,
        }
    }
}

/// Request to reply to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyMessageRequest {
    /// Reply token received with the webhook event.
    pub reply_token: String,
    /// Messages to send.
    pub messages: Vec<Message>,
}

impl ReplyMessageRequest {
    pub fn new(reply_token: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            reply_token: reply_token.into(),
            messages,
        }
    }
}

/// Request to send the same messages to several users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MulticastRequest {
    /// Recipient user IDs.
    pub to: Vec<String>,
    /// Messages to send.
    pub messages: Vec<Message>,
}

impl MulticastRequest {
    pub fn new(to: Vec<String>, messages: Vec<Message>) -> Self {
        Self { to, messages }
    }
}

/// Binary content of a received message.
#[derive(Debug, Clone)]
pub struct MessageContent {
    /// `Content-Type` reported by the API.
    pub content_type: Option<String>,
    /// Raw bytes.
    pub body: Vec<u8>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Profiles
// ─────────────────────────────────────────────────────────────────────────────

/// A user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub display_name: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_wire_shape() {
        assert_eq!(
            serde_json::to_value(Message::text("hello")).unwrap(),
            json!({"type": "text", "text": "hello"})
        );
        assert_eq!(
            serde_json::to_value(Message::image("https://e.test/o.jpg", "https://e.test/p.jpg")).unwrap(),
            json!({
                "type": "image",
                "originalContentUrl": "https://e.test/o.jpg",
                "previewImageUrl": "https://e.test/p.jpg"
            })
        );
        assert_eq!(
            serde_json::to_value(Message::sticker("1", "1")).unwrap(),
            json!({"type": "sticker", "packageId": "1", "stickerId": "1"})
        );
    }

    #[test]
    fn test_location_decodes() {
        let message: Message = serde_json::from_value(json!({
            "type": "location",
            "title": "my location",
            "address": "Tokyo",
            "latitude": 35.65910807942215,
            "longitude": 139.70372892916203
        }))
        .unwrap();
        assert!(matches!(message, Message::Location { ref title, .. } if title == "my location"));
    }

    #[test]
    fn test_reply_request_uses_camel_case() {
        let request = ReplyMessageRequest::new("nHuyWiB7yP5Zw52FIkcQobQuGDXCTA", vec![Message::text("hi")]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "replyToken": "nHuyWiB7yP5Zw52FIkcQobQuGDXCTA",
                "messages": [{"type": "text", "text": "hi"}]
            })
        );
    }

    #[test]
    fn test_profile_optional_fields() {
        let profile: Profile = serde_json::from_value(json!({
            "displayName": "LINE taro",
            "userId": "U4af4980629"
        }))
        .unwrap();
        assert_eq!(profile.display_name, "LINE taro");
        assert_eq!(profile.picture_url, None);
        assert_eq!(profile.status_message, None);
    }
}
