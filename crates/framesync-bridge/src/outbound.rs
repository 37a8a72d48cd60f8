use framesync_proto::Envelope;

/// Handler name used when delivering payloads to a native-app shell.
pub const NATIVE_HANDLER: &str = "editorBridge";

/// Reply path back to whichever window sent the message.
///
/// Implementations post with wildcard origin — addressing is the sink's
/// concern, the session only hands it finished envelopes.
pub trait MessageSink {
    fn post(&mut self, envelope: &Envelope);
}

/// Alternate delivery path for hosts that are not browser windows (for
/// example a mobile shell embedding the editor). When present, `get-data`
/// replies go here in addition to, never instead of, the [`MessageSink`].
pub trait NativeChannel {
    fn deliver(&mut self, handler: &str, envelope: &Envelope);
}
