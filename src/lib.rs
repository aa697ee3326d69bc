//! Stateful Opus decode sessions.
//!
//! A [`DecodeSession`] turns one Opus packet per call into interleaved PCM,
//! conceals lost packets (pass an empty packet) and can recover a lost frame
//! from the in-band FEC data of the packet that follows it. The bitstream
//! decoding itself is done by an [`Engine`](engine::Engine), by default the
//! reference libopus decoder.

mod defines;
pub mod engine;
mod enums;
mod error;
mod session;

pub use crate::defines::{
    OPUS_ALLOC_FAIL, OPUS_BAD_ARG, OPUS_BUFFER_TOO_SMALL, OPUS_INTERNAL_ERROR, OPUS_INVALID_PACKET,
    OPUS_INVALID_STATE, OPUS_OK, OPUS_UNIMPLEMENTED,
};
pub use enums::{Channels, SampleRate};
pub use error::{Error, ErrorCode, Result};
pub use session::DecodeSession;
