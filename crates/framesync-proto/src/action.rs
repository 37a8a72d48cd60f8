use serde::{Deserialize, Serialize};

/// Every action tag that can appear on the wire.
///
/// Only the mode switches and data-transfer tags are consumed by the bridge;
/// `TrackChange`, `Save`, `FreeDraft`, and `HandShake` are part of the shared
/// enumeration so hosts and the editor agree on spellings, but are reserved
/// for collaborators outside this crate. Tags we have never heard of decode
/// as `Unknown` and are ignored at dispatch rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    Preview,
    TemporaryPreview,
    Edit,
    GetData,
    SetData,
    Load,
    TrackChange,
    Save,
    FreeDraft,
    HandShake,
    Unknown,
}

impl Action {
    /// Wire spelling of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Preview => "preview",
            Action::TemporaryPreview => "temporaryPreview",
            Action::Edit => "edit",
            Action::GetData => "get-data",
            Action::SetData => "set-data",
            Action::Load => "load",
            Action::TrackChange => "track-change",
            Action::Save => "save",
            Action::FreeDraft => "free-draft",
            Action::HandShake => "hand-shake",
            Action::Unknown => "unknown",
        }
    }

    /// Decode a wire tag; anything unrecognized maps to `Unknown`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "preview" => Action::Preview,
            "temporaryPreview" => Action::TemporaryPreview,
            "edit" => Action::Edit,
            "get-data" => Action::GetData,
            "set-data" => Action::SetData,
            "load" => Action::Load,
            "track-change" => Action::TrackChange,
            "save" => Action::Save,
            "free-draft" => Action::FreeDraft,
            "hand-shake" => Action::HandShake,
            _ => Action::Unknown,
        }
    }

    /// Whether the bridge actively handles this action.
    pub fn is_handled(&self) -> bool {
        matches!(
            self,
            Action::Preview
                | Action::TemporaryPreview
                | Action::Edit
                | Action::GetData
                | Action::SetData
                | Action::Load
        )
    }
}

impl From<String> for Action {
    fn from(tag: String) -> Self {
        Action::from_tag(&tag)
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.as_str().to_string()
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
