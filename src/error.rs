//! Error types for decode sessions.
//!
//! Two layers: [`ErrorCode`] mirrors the engine's numeric status codes one to
//! one, and [`Error`] adds the usage errors a session detects itself before
//! the engine is ever called.
//!
//! See: <https://opus-codec.org/docs/opus_api-1.3.1/group__opus__errorcodes.html>

use crate::defines::{
    OPUS_ALLOC_FAIL, OPUS_BAD_ARG, OPUS_BUFFER_TOO_SMALL, OPUS_INTERNAL_ERROR, OPUS_INVALID_PACKET,
    OPUS_INVALID_STATE, OPUS_UNIMPLEMENTED,
};
use thiserror::Error;

/// Engine status codes.
///
/// Unknown codes are preserved in the [`Unknown`](ErrorCode::Unknown) variant
/// so that no status is ever collapsed into a generic failure.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Error)]
pub enum ErrorCode {
    /// One or more invalid/out of range arguments.
    #[error("invalid argument")]
    BadArg,
    /// Not enough room in the output buffer.
    #[error("buffer too small")]
    BufferTooSmall,
    /// An internal error was detected.
    #[error("internal error")]
    InternalError,
    /// The compressed data passed is corrupted.
    #[error("corrupted stream")]
    InvalidPacket,
    /// Invalid/unsupported request number.
    #[error("request not implemented")]
    Unimplemented,
    /// The decoder structure is invalid or already freed.
    #[error("invalid state")]
    InvalidState,
    /// Memory allocation has failed.
    #[error("memory allocation failed")]
    AllocFail,
    /// A status code outside the documented set.
    #[error("unknown error ({0})")]
    Unknown(i32),
}

impl From<i32> for ErrorCode {
    fn from(value: i32) -> Self {
        match value {
            OPUS_BAD_ARG => ErrorCode::BadArg,
            OPUS_BUFFER_TOO_SMALL => ErrorCode::BufferTooSmall,
            OPUS_INTERNAL_ERROR => ErrorCode::InternalError,
            OPUS_INVALID_PACKET => ErrorCode::InvalidPacket,
            OPUS_UNIMPLEMENTED => ErrorCode::Unimplemented,
            OPUS_INVALID_STATE => ErrorCode::InvalidState,
            OPUS_ALLOC_FAIL => ErrorCode::AllocFail,
            other => ErrorCode::Unknown(other),
        }
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::BadArg => OPUS_BAD_ARG,
            ErrorCode::BufferTooSmall => OPUS_BUFFER_TOO_SMALL,
            ErrorCode::InternalError => OPUS_INTERNAL_ERROR,
            ErrorCode::InvalidPacket => OPUS_INVALID_PACKET,
            ErrorCode::Unimplemented => OPUS_UNIMPLEMENTED,
            ErrorCode::InvalidState => OPUS_INVALID_STATE,
            ErrorCode::AllocFail => OPUS_ALLOC_FAIL,
            ErrorCode::Unknown(n) => n,
        }
    }
}

/// Errors returned by [`DecodeSession`](crate::DecodeSession).
///
/// The first four variants are usage errors: they are detected before the
/// engine is touched and retrying the same call cannot succeed. Everything
/// the engine reports arrives as [`Error::Engine`] with the original code.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Error)]
pub enum Error {
    /// `initialize` was called on a session that already holds state.
    #[error("opus decoder already initialized")]
    AlreadyInitialized,
    /// The session has not been initialized.
    #[error("opus decoder uninitialized")]
    Uninitialized,
    /// Channel count other than 1 or 2.
    #[error("number of channels must be 1 or 2: {0}")]
    InvalidChannelCount(i32),
    /// The output buffer has no room for a single sample.
    #[error("opus: target buffer empty")]
    EmptyOutputBuffer,
    /// The decoding engine returned a failure status.
    #[error("opus: {0}")]
    Engine(#[from] ErrorCode),
}

impl Error {
    /// The engine status code carried by this error, if it came from the
    /// engine.
    pub fn code(&self) -> Option<i32> {
        match self {
            Error::Engine(code) => Some((*code).into()),
            _ => None,
        }
    }

    /// Whether this is a usage error detected before calling the engine.
    pub fn is_usage(&self) -> bool {
        !matches!(self, Error::Engine(_))
    }
}

/// A specialized [`Result`](std::result::Result) type for session operations.
pub type Result<T> = std::result::Result<T, Error>;
