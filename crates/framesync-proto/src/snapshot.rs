use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything the editor hands out when asked for its state: the serializable
/// document tree plus the flattened markup and stylesheet derived from it.
///
/// Produced on demand for `get-data`; the bridge never persists one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    #[serde(rename = "projectData")]
    pub project_data: Value,
    pub html: String,
    pub css: String,
}

impl ProjectSnapshot {
    pub fn new(project_data: Value, html: impl Into<String>, css: impl Into<String>) -> Self {
        Self {
            project_data,
            html: html.into(),
            css: css.into(),
        }
    }
}
