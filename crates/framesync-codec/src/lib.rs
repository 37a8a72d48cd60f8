//! Payload codec for cross-frame project snapshots.
//!
//! Snapshots are serialized to JSON text, LZ4-compressed, and base64-encoded
//! so the result survives any channel that can carry a string. The wire
//! carries no version flag: some hosts still send plain uncompressed JSON, so
//! decoding starts with a fingerprint probe — a non-empty string drawn
//! entirely from the base64 alphabet (and so containing neither `{` nor `"`)
//! is treated as compressed, anything else is parsed as JSON directly.
//! `safe_decompress` never fails; input it cannot make sense of comes back
//! as opaque text for the caller to ignore.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value;
use tracing::warn;

mod errors;

pub use errors::CodecError;

pub type Result<T> = std::result::Result<T, CodecError>;

/// Outcome of the probe-then-decide decode path.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The content resolved to structured JSON.
    Object(Value),
    /// The content stayed opaque text (unparsable, or a decode failure fell
    /// back to the input unchanged).
    Text(String),
}

impl Decoded {
    pub fn as_object(&self) -> Option<&Value> {
        match self {
            Decoded::Object(value) => Some(value),
            Decoded::Text(_) => None,
        }
    }
}

/// Compress UTF-8 text into the base64 wire form.
pub fn compress(text: &str) -> String {
    let packed = lz4_flex::compress_prepend_size(text.as_bytes());
    BASE64.encode(packed)
}

/// Serialize a JSON value and compress it.
pub fn compress_value(value: &Value) -> String {
    compress(&value.to_string())
}

/// Exact inverse of [`compress`].
pub fn decompress(encoded: &str) -> Result<String> {
    let packed = BASE64.decode(encoded)?;
    let bytes = lz4_flex::decompress_size_prepended(&packed)?;
    Ok(String::from_utf8(bytes)?)
}

/// Fingerprint probe: does this look like a compressed payload?
///
/// Compressed output is non-empty and drawn only from the base64 alphabet
/// plus `=` padding. JSON text always contains `{` or `"`, neither of which
/// is in that alphabet, so the two forms cannot collide on real payloads. A
/// bare JSON scalar (e.g. `42`) does sniff as compressed; decoding it fails
/// and falls back to returning the input, which callers treat as a no-op.
pub fn looks_compressed(content: &str) -> bool {
    !content.is_empty()
        && content
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'=')
}

/// Decode a content string of unknown provenance.
pub fn safe_decompress(content: &str) -> Decoded {
    if looks_compressed(content) {
        let text = match decompress(content) {
            Ok(text) => text,
            Err(err) => {
                warn!(%err, len = content.len(), "decompression failed, passing content through");
                return Decoded::Text(content.to_string());
            }
        };
        return match serde_json::from_str(&text) {
            Ok(value) => Decoded::Object(value),
            Err(_) => Decoded::Text(text),
        };
    }

    match serde_json::from_str(content) {
        Ok(value) => Decoded::Object(value),
        Err(_) => Decoded::Text(content.to_string()),
    }
}
