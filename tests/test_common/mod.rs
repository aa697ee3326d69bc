//! Shared test infrastructure for the integration tests.
//!
//! Provides a deterministic RNG, synthetic PCM, and packet streams produced
//! by the libopus encoder (through the `opus` crate).

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};

use opus_session::{Channels, SampleRate};

// ---------------------------------------------------------------------------
// Deterministic RNG — Marsaglia MWC
// ---------------------------------------------------------------------------

/// Marsaglia Multiply-With-Carry RNG, the same generator the upstream
/// libopus tests use as `fast_rand()`.
pub struct TestRng {
    rz: u32,
    rw: u32,
}

impl TestRng {
    pub fn new(seed: u32) -> Self {
        Self { rz: seed, rw: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.rz = 36969u32
            .wrapping_mul(self.rz & 65535)
            .wrapping_add(self.rz >> 16);
        self.rw = 18000u32
            .wrapping_mul(self.rw & 65535)
            .wrapping_add(self.rw >> 16);
        (self.rz << 16).wrapping_add(self.rw)
    }

    pub fn fill_bytes(&mut self, out: &mut [u8]) {
        for b in out {
            *b = (self.next_u32() >> 24) as u8;
        }
    }
}

// ---------------------------------------------------------------------------
// Seed management
// ---------------------------------------------------------------------------

static GLOBAL_SEED: AtomicU32 = AtomicU32::new(0);

/// Get test seed from `TEST_SEED` environment variable, or derive one from
/// the clock and print it for reproducibility.
pub fn get_test_seed() -> u32 {
    let seed = match std::env::var("TEST_SEED") {
        Ok(val) => {
            let seed: u32 = val.parse().expect("TEST_SEED must be a valid u32");
            eprintln!("Using TEST_SEED={seed}");
            seed
        }
        Err(_) => {
            let seed = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .subsec_nanos();
            eprintln!("Random seed: {seed} (set TEST_SEED={seed} to reproduce)");
            seed
        }
    };
    GLOBAL_SEED.store(seed, Ordering::Relaxed);
    seed
}

// ---------------------------------------------------------------------------
// Synthetic audio and packet streams
// ---------------------------------------------------------------------------

/// Conservative MTU-sized packet buffer.
pub const MAX_PACKET_SIZE: usize = 1500;

/// All sample rates supported by Opus.
pub const SAMPLE_RATES: &[i32] = &[8000, 12000, 16000, 24000, 48000];

/// Deterministic interleaved 16-bit PCM: two detuned tones with a slow
/// amplitude wobble so the encoder sees voice-like activity.
pub fn generate_pcm(
    rate: SampleRate,
    channels: Channels,
    frames: usize,
    frame_ms: usize,
) -> Vec<i16> {
    let per_channel = frames * rate.samples_in_ms(frame_ms);
    let fs = rate.hz() as f64;
    let mut pcm = Vec::with_capacity(per_channel * channels.count());
    for i in 0..per_channel {
        let t = i as f64 / fs;
        let envelope = 0.6 + 0.4 * (t * std::f64::consts::TAU * 3.0).sin();
        let sample = envelope
            * ((t * std::f64::consts::TAU * 220.0).sin() * 9000.0
                + (t * std::f64::consts::TAU * 1330.0).sin() * 3000.0);
        for ch in 0..channels.count() {
            let pan = if ch == 0 { 1.0 } else { 0.8 };
            pcm.push((sample * pan) as i16);
        }
    }
    pcm
}

/// Encoder settings for a test packet stream.
#[derive(Clone, Copy, Debug)]
pub struct StreamParams {
    pub rate: SampleRate,
    pub channels: Channels,
    pub frame_ms: usize,
    pub bitrate: i32,
    pub fec: bool,
}

impl StreamParams {
    pub fn new(rate: SampleRate, channels: Channels) -> Self {
        Self {
            rate,
            channels,
            frame_ms: 20,
            bitrate: 32000,
            fec: false,
        }
    }

    pub fn with_fec(mut self) -> Self {
        self.fec = true;
        self.bitrate = 24000;
        self
    }

    pub fn frame_samples(&self) -> usize {
        self.rate.samples_in_ms(self.frame_ms)
    }
}

fn opus_channels(channels: Channels) -> opus::Channels {
    match channels {
        Channels::Mono => opus::Channels::Mono,
        Channels::Stereo => opus::Channels::Stereo,
    }
}

/// Encode `frames` frames of synthetic audio into a packet stream.
pub fn encode_stream(params: StreamParams, frames: usize) -> Vec<Vec<u8>> {
    let application = if params.fec {
        opus::Application::Voip
    } else {
        opus::Application::Audio
    };
    let mut encoder = opus::Encoder::new(
        params.rate.hz() as u32,
        opus_channels(params.channels),
        application,
    )
    .unwrap_or_else(|err| panic!("opus::Encoder::new({params:?}) failed: {err}"));
    encoder
        .set_bitrate(opus::Bitrate::Bits(params.bitrate))
        .unwrap();
    if params.fec {
        encoder.set_inband_fec(true).unwrap();
        encoder.set_packet_loss_perc(25).unwrap();
    }

    let pcm = generate_pcm(params.rate, params.channels, frames, params.frame_ms);
    let frame_len = params.frame_samples() * params.channels.count();
    let mut output = vec![0u8; MAX_PACKET_SIZE];
    pcm.chunks_exact(frame_len)
        .map(|frame| {
            let len = encoder
                .encode(frame, &mut output)
                .unwrap_or_else(|err| panic!("encode failed: {err}"));
            assert!(len > 0, "encoder produced an empty packet");
            output[..len].to_vec()
        })
        .collect()
}
