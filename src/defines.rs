//! Status codes returned by the decoding engine.
//!
//! See: <https://opus-codec.org/docs/opus_api-1.3.1/group__opus__errorcodes.html>

/// No error.
pub const OPUS_OK: i32 = 0;
/// One or more invalid/out of range arguments.
pub const OPUS_BAD_ARG: i32 = -1;
/// Not enough bytes allocated in the buffer.
pub const OPUS_BUFFER_TOO_SMALL: i32 = -2;
/// An internal error was detected.
pub const OPUS_INTERNAL_ERROR: i32 = -3;
/// The compressed data passed is corrupted.
pub const OPUS_INVALID_PACKET: i32 = -4;
/// Invalid/unsupported request number.
pub const OPUS_UNIMPLEMENTED: i32 = -5;
/// A decoder structure is invalid or already freed.
pub const OPUS_INVALID_STATE: i32 = -6;
/// Memory allocation has failed.
pub const OPUS_ALLOC_FAIL: i32 = -7;
