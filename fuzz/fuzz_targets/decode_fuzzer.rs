//! Decode session fuzzer, modelled on upstream opus_decode_fuzzer.c
//!
//! Treats input data as concatenated packets encoded by opus_demo:
//!   bytes 0..3: packet length (big-endian)
//!   bytes 4..7: encoder final range (byte 4 bit 0 reused as FEC flag)
//!   bytes 8+  : Opus packet including ToC
//!
//! Sample rate and channel count come from the first packet's ToC.
//!
//! Run with: cargo +nightly fuzz run decode_fuzzer
#![no_main]

use libfuzzer_sys::fuzz_target;
use opus_session::{DecodeSession, Error};

const MAX_PACKET: usize = 1500;
/// 4 bytes packet length + 4 bytes encoder final range
const SETUP_BYTE_COUNT: usize = 8;

const SAMP_FREQS: [i32; 5] = [8000, 12000, 16000, 24000, 48000];

/// Output rate matching the coded bandwidth of a ToC byte.
fn rate_for_toc(toc: u8) -> i32 {
    let config = toc >> 3;
    let bw_idx = match config {
        0..=3 | 16..=19 => 0,
        4..=7 => 1,
        8..=11 | 20..=23 => 2,
        12..=13 | 24..=27 => 3,
        _ => 4,
    };
    SAMP_FREQS[bw_idx]
}

fuzz_target!(|data: &[u8]| {
    // Not enough data to set up the decoder (+1 for the ToC byte)
    if data.len() < SETUP_BYTE_COUNT + 1 {
        return;
    }

    let toc = data[SETUP_BYTE_COUNT];
    let channels = if toc & 0x4 != 0 { 2 } else { 1 };
    let Ok(mut session) = DecodeSession::new(rate_for_toc(toc), channels) else {
        return;
    };
    let mut pcm = vec![0i16; session.max_output_len().unwrap_or(1)];

    let mut i = 0usize;
    while i + SETUP_BYTE_COUNT <= data.len() {
        let len = u32::from_be_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]) as usize;
        if len > MAX_PACKET {
            break;
        }
        // Byte 4 is repurposed: bit 0 determines if FEC is used
        let fec = data[i + 4] & 1 == 1;

        let result = if len == 0 {
            // Lost packet: conceal one frame of the last decoded duration.
            let frame = session.last_packet_duration().unwrap_or(120).max(1);
            let end = (frame * channels as usize).min(pcm.len());
            session.decode(&[], &mut pcm[..end], fec)
        } else {
            if i + SETUP_BYTE_COUNT + len > data.len() {
                break;
            }
            let packet = &data[i + SETUP_BYTE_COUNT..i + SETUP_BYTE_COUNT + len];
            session.decode(packet, &mut pcm, fec)
        };

        match result {
            Ok(n) => assert!(n * channels as usize <= pcm.len()),
            Err(Error::Engine(_)) => {}
            Err(err) => panic!("usage error on a valid session: {err}"),
        }

        i += SETUP_BYTE_COUNT + len;
    }
});
