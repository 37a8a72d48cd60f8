use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::action::Action;

/// The envelope every cross-frame message travels in.
///
/// `key` is an opaque correlation token supplied by the caller and echoed
/// unchanged in replies; the bridge never interprets it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Payload>,
}

/// Payload of a data-transfer message. Extra fields on the wire are dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Envelope {
    /// Decode an envelope from a raw platform message event.
    ///
    /// Cross-origin noise is common on the message channel, so the filter is
    /// deliberately forgiving: the payload is accepted only if it is already
    /// a JSON object, or a string whose contents parse as one. Anything else
    /// is dropped silently — `None` here is a filter decision, not an error.
    pub fn from_event(raw: &Value) -> Option<Self> {
        let data = match raw {
            Value::String(text) => match serde_json::from_str::<Value>(text) {
                Ok(parsed) => parsed,
                Err(_) => {
                    debug!(len = text.len(), "dropping non-JSON string message");
                    return None;
                }
            },
            other => other.clone(),
        };

        if !data.is_object() {
            debug!("dropping non-object message payload");
            return None;
        }

        match serde_json::from_value::<Envelope>(data) {
            Ok(envelope) => Some(envelope),
            Err(err) => {
                debug!(%err, "dropping message that does not fit the envelope");
                None
            }
        }
    }

    /// Build the reply to a `get-data` request, echoing the request's key.
    pub fn data_reply(key: Option<Value>, content: String) -> Self {
        Self {
            action: Action::GetData,
            key,
            value: Some(Payload {
                content: Some(content),
            }),
        }
    }

    /// The unsolicited change signal posted to the host on every document
    /// model mutation.
    pub fn track_change() -> Self {
        Self {
            action: Action::TrackChange,
            key: None,
            value: None,
        }
    }

    /// The `value.content` string, if this message carries one.
    pub fn content(&self) -> Option<&str> {
        self.value.as_ref()?.content.as_deref()
    }
}
