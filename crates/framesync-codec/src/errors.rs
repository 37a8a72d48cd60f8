#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("lz4 decompress error: {0}")]
    Decompress(#[from] lz4_flex::block::DecompressError),

    #[error("payload is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
