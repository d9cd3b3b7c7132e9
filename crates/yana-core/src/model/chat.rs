use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient::null_as_default;

/// Pre-defined response offered instead of free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuickReply {
    /// Button label, also sent as the user's response.
    pub label: String,
    /// Analytics/flow event attached to this reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    /// Continuation token the assistant expects for this reply.
    pub next_key: String,
}

impl QuickReply {
    /// Create a reply without an event name.
    pub fn new(label: impl Into<String>, next_key: impl Into<String>) -> Self {
        Self { label: label.into(), event_name: None, next_key: next_key.into() }
    }

    /// Attach an event name.
    #[must_use]
    pub fn with_event(mut self, event_name: impl Into<String>) -> Self {
        self.event_name = Some(event_name.into());
        self
    }

    /// Response payload for choosing this reply.
    pub fn to_payload(&self) -> ResponsePayload {
        ResponsePayload {
            event_name: self.event_name.clone().filter(|name| !name.is_empty()),
            next_key: self.next_key.clone(),
            user_response: self.label.clone(),
        }
    }
}

/// Conversation slice, persisted under `CHAT`.
///
/// `user_response_failed` and `yana_messages_delivered` are transient edge
/// flags: the app consumes each one (resets it to `false`) right after acting
/// on its rising edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatState {
    /// Read-only hint shown before the input.
    #[serde(deserialize_with = "null_as_default")]
    pub input_default_value: String,
    /// Input placeholder. Empty falls back to the localized default.
    #[serde(deserialize_with = "null_as_default")]
    pub input_placeholder: String,
    /// Continuation token for the next free-text response.
    #[serde(deserialize_with = "null_as_default")]
    pub next_key: String,
    /// Options for the current turn, in display order.
    #[serde(deserialize_with = "null_as_default")]
    pub quick_replies: Vec<QuickReply>,
    /// The last submitted response failed.
    #[serde(deserialize_with = "null_as_default")]
    pub user_response_failed: bool,
    /// New assistant messages finished arriving.
    #[serde(deserialize_with = "null_as_default")]
    pub yana_messages_delivered: bool,
    /// Fields owned by other screens (message history, ...), kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Submission sent to the messaging collaborator.
///
/// Fire-and-forget: the outcome arrives later as a chat store update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePayload {
    /// Event attached to a quick reply. `None` for free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    /// Continuation token being answered.
    pub next_key: String,
    /// What the user said.
    pub user_response: String,
}
