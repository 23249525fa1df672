//! Shared error type across castwire crates.

use thiserror::Error;

/// Stable error codes (used in logs, CLI output and test vectors).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A read ran past the current limit.
    TruncatedBuffer,
    /// Tag carried a wire type outside 0..=5.
    InvalidWireType,
    /// A length prefix pointed past the end of the buffer.
    LengthOverflow,
    /// Input was not valid base64.
    Base64Decode,
    /// Gzip payload could not be inflated.
    GzipDecode,
    /// Envelope carried no payload.
    MalformedEnvelope,
    /// Bad configuration / options.
    InvalidConfig,
    /// I/O failure in a consumer (CLI).
    Io,
}

impl ErrorCode {
    /// String representation used in logs and JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::TruncatedBuffer => "TRUNCATED_BUFFER",
            ErrorCode::InvalidWireType => "INVALID_WIRE_TYPE",
            ErrorCode::LengthOverflow => "LENGTH_OVERFLOW",
            ErrorCode::Base64Decode => "BASE64_DECODE",
            ErrorCode::GzipDecode => "GZIP_DECODE",
            ErrorCode::MalformedEnvelope => "MALFORMED_ENVELOPE",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::Io => "IO",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, CastwireError>;

/// Unified error type used by core and cli.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CastwireError {
    #[error("truncated buffer: needed {needed} bytes, {available} available")]
    TruncatedBuffer { needed: usize, available: usize },
    #[error("invalid wire type: {0}")]
    InvalidWireType(u32),
    #[error("length prefix {declared} exceeds buffer ({remaining} bytes remain)")]
    LengthOverflow { declared: usize, remaining: usize },
    #[error("base64 decode failed: {0}")]
    Base64Decode(String),
    #[error("gzip decode failed: {0}")]
    GzipDecode(String),
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("io: {0}")]
    Io(String),
}

impl CastwireError {
    /// Map to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            CastwireError::TruncatedBuffer { .. } => ErrorCode::TruncatedBuffer,
            CastwireError::InvalidWireType(_) => ErrorCode::InvalidWireType,
            CastwireError::LengthOverflow { .. } => ErrorCode::LengthOverflow,
            CastwireError::Base64Decode(_) => ErrorCode::Base64Decode,
            CastwireError::GzipDecode(_) => ErrorCode::GzipDecode,
            CastwireError::MalformedEnvelope(_) => ErrorCode::MalformedEnvelope,
            CastwireError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            CastwireError::Io(_) => ErrorCode::Io,
        }
    }

    /// Low-level read failures. These end a field loop but never a batch.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            CastwireError::TruncatedBuffer { .. }
                | CastwireError::InvalidWireType(_)
                | CastwireError::LengthOverflow { .. }
        )
    }
}
