#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("message has no value.content")]
    MissingContent,

    #[error("decoded payload has no projectData field")]
    MissingProjectData,

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            ProtocolError::MissingContent.to_string(),
            "message has no value.content"
        );
        assert_eq!(
            ProtocolError::MissingProjectData.to_string(),
            "decoded payload has no projectData field"
        );
    }

    #[test]
    fn json_error_converts() {
        let err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let proto: ProtocolError = err.into();
        assert!(matches!(proto, ProtocolError::Json(_)));
        assert!(proto.to_string().starts_with("json error:"));
    }
}
