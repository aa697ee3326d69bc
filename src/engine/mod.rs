//! The seam between a [`DecodeSession`](crate::DecodeSession) and the
//! component that turns Opus bitstreams into samples.
//!
//! An engine is a set of associated functions working on caller-owned state
//! memory, mirroring the `opus_decoder_get_size` / `opus_decoder_init` /
//! `opus_decode` family. Status codes stay raw `i32` here; the session maps
//! them into [`Error`](crate::Error).

pub mod libopus;
mod state;

pub use libopus::Libopus;
pub use state::StateBlock;

/// A decoding engine operating on an opaque [`StateBlock`].
///
/// Return values follow the libopus convention: zero or a non-negative
/// count on success, a negative status code on failure.
pub trait Engine {
    /// Bytes of state required for `channels`. Zero or negative when the
    /// channel count is unsupported.
    fn state_size(channels: i32) -> i32;

    /// Initializes a freshly zeroed state block.
    ///
    /// # Safety
    ///
    /// `state` must have been allocated with at least
    /// `Self::state_size(channels)` bytes.
    unsafe fn init(state: &mut StateBlock, sample_rate: i32, channels: i32) -> i32;

    /// Decodes one packet (empty: lost) into `pcm`.
    ///
    /// `frame_size` is the per-channel capacity of `pcm`. Returns the
    /// per-channel count written.
    ///
    /// # Safety
    ///
    /// `state` must have been initialized by a successful [`Engine::init`]
    /// and `pcm` must hold at least `frame_size * channels` samples for the
    /// channel count `state` was initialized with.
    unsafe fn decode(
        state: &mut StateBlock,
        packet: &[u8],
        pcm: &mut [i16],
        frame_size: i32,
        fec: bool,
    ) -> i32;

    /// Float variant of [`Engine::decode`].
    ///
    /// # Safety
    ///
    /// Same requirements as [`Engine::decode`].
    unsafe fn decode_float(
        state: &mut StateBlock,
        packet: &[u8],
        pcm: &mut [f32],
        frame_size: i32,
        fec: bool,
    ) -> i32;

    /// Per-channel samples `packet` would decode to at the state's rate.
    ///
    /// # Safety
    ///
    /// `state` must have been initialized by a successful [`Engine::init`].
    unsafe fn packet_samples(state: &StateBlock, packet: &[u8]) -> i32;
}
