use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShareError {
    #[error("Share code is empty")]
    Empty,

    #[error("Invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Share code too short: {len} bytes")]
    TooShort { len: usize },

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("Share payload too large: {size} bytes")]
    PayloadTooLarge { size: usize },

    #[error("Decompression error: {0}")]
    Decompression(#[from] lz4_flex::block::DecompressError),

    #[error("Invalid share JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported share payload shape")]
    UnsupportedShape,

    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),
}

impl ShareError {
    /// True when the inbound code itself is bad; such sources are skipped.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, ShareError::Serialization(_))
    }
}
