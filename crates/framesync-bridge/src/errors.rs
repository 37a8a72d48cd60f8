#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Protocol(#[from] framesync_proto::ProtocolError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use framesync_proto::ProtocolError;

    #[test]
    fn protocol_error_converts() {
        let err: BridgeError = ProtocolError::MissingContent.into();
        assert!(matches!(err, BridgeError::Protocol(_)));
        assert_eq!(err.to_string(), "message has no value.content");
    }
}
