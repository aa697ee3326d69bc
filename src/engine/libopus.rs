//! Engine backed by the reference C libopus decoder.
//!
//! Upstream C: `src/opus_decoder.c` (`opus_decoder_get_size`,
//! `opus_decoder_init`, `opus_decode`, `opus_decode_float`,
//! `opus_decoder_get_nb_samples`)

use std::ptr;

use audiopus_sys as ffi;

use super::{Engine, StateBlock};
use crate::defines::OPUS_BAD_ARG;

/// The libopus decoder, linked through `audiopus_sys`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Libopus;

/// Splits a packet into the pointer/length pair libopus expects. A lost
/// packet is passed as a null pointer.
fn packet_parts(packet: &[u8]) -> Option<(*const u8, i32)> {
    let len = i32::try_from(packet.len()).ok()?;
    let data = if packet.is_empty() {
        ptr::null()
    } else {
        packet.as_ptr()
    };
    Some((data, len))
}

impl Engine for Libopus {
    fn state_size(channels: i32) -> i32 {
        // SAFETY: pure size query, no memory is touched.
        unsafe { ffi::opus_decoder_get_size(channels) }
    }

    unsafe fn init(state: &mut StateBlock, sample_rate: i32, channels: i32) -> i32 {
        ffi::opus_decoder_init(state.as_mut_ptr(), sample_rate, channels)
    }

    unsafe fn decode(
        state: &mut StateBlock,
        packet: &[u8],
        pcm: &mut [i16],
        frame_size: i32,
        fec: bool,
    ) -> i32 {
        let Some((data, len)) = packet_parts(packet) else {
            return OPUS_BAD_ARG;
        };
        ffi::opus_decode(
            state.as_mut_ptr(),
            data,
            len,
            pcm.as_mut_ptr(),
            frame_size,
            i32::from(fec),
        )
    }

    unsafe fn decode_float(
        state: &mut StateBlock,
        packet: &[u8],
        pcm: &mut [f32],
        frame_size: i32,
        fec: bool,
    ) -> i32 {
        let Some((data, len)) = packet_parts(packet) else {
            return OPUS_BAD_ARG;
        };
        ffi::opus_decode_float(
            state.as_mut_ptr(),
            data,
            len,
            pcm.as_mut_ptr(),
            frame_size,
            i32::from(fec),
        )
    }

    unsafe fn packet_samples(state: &StateBlock, packet: &[u8]) -> i32 {
        match packet_parts(packet) {
            Some((data, len)) if len > 0 => {
                ffi::opus_decoder_get_nb_samples(state.as_ptr(), data, len)
            }
            _ => OPUS_BAD_ARG,
        }
    }
}
