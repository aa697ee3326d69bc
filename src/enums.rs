//! Typed stream parameters.
//!
//! A session accepts raw integers too (the engine rejects bad sample rates
//! itself), but these enums make the valid values explicit.

use crate::error::{Error, ErrorCode};

/// Channel count configuration.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Channels {
    /// Mono (single channel).
    Mono,
    /// Stereo (two channels, interleaved).
    Stereo,
}

impl Channels {
    /// Number of interleaved samples per sample frame.
    pub fn count(self) -> usize {
        match self {
            Channels::Mono => 1,
            Channels::Stereo => 2,
        }
    }
}

impl TryFrom<i32> for Channels {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Channels::Mono),
            2 => Ok(Channels::Stereo),
            other => Err(Error::InvalidChannelCount(other)),
        }
    }
}

impl From<Channels> for i32 {
    fn from(value: Channels) -> Self {
        match value {
            Channels::Mono => 1,
            Channels::Stereo => 2,
        }
    }
}

/// Output sample rate of a decode session.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SampleRate {
    /// 8 kHz.
    Hz8000,
    /// 12 kHz.
    Hz12000,
    /// 16 kHz.
    Hz16000,
    /// 24 kHz.
    Hz24000,
    /// 48 kHz.
    Hz48000,
}

impl SampleRate {
    /// All supported rates, lowest first.
    pub const ALL: [SampleRate; 5] = [
        SampleRate::Hz8000,
        SampleRate::Hz12000,
        SampleRate::Hz16000,
        SampleRate::Hz24000,
        SampleRate::Hz48000,
    ];

    /// Rate in Hz.
    pub fn hz(self) -> i32 {
        self.into()
    }

    /// Samples per channel in `ms` milliseconds of audio.
    pub fn samples_in_ms(self, ms: usize) -> usize {
        self.hz() as usize * ms / 1000
    }

    /// Samples per channel in the longest frame a packet can carry (120 ms).
    pub fn max_frame_samples(self) -> usize {
        self.samples_in_ms(120)
    }
}

impl TryFrom<i32> for SampleRate {
    type Error = ErrorCode;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            8000 => Ok(SampleRate::Hz8000),
            12000 => Ok(SampleRate::Hz12000),
            16000 => Ok(SampleRate::Hz16000),
            24000 => Ok(SampleRate::Hz24000),
            48000 => Ok(SampleRate::Hz48000),
            _ => Err(ErrorCode::BadArg),
        }
    }
}

impl From<SampleRate> for i32 {
    fn from(value: SampleRate) -> Self {
        match value {
            SampleRate::Hz8000 => 8000,
            SampleRate::Hz12000 => 12000,
            SampleRate::Hz16000 => 16000,
            SampleRate::Hz24000 => 24000,
            SampleRate::Hz48000 => 48000,
        }
    }
}
