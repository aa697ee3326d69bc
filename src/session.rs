//! Decode sessions.
//!
//! A [`DecodeSession`] is bound to one logical Opus stream. It is created
//! uninitialized (or initialized in one step via [`DecodeSession::new`]),
//! moves to the initialized state exactly once, and from then on decodes one
//! packet per call until it is dropped.

use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::engine::{Engine, Libopus, StateBlock};
use crate::enums::{Channels, SampleRate};
use crate::error::{Error, ErrorCode, Result};

/// Everything a session holds once initialized.
#[derive(Debug)]
struct Stream {
    state: StateBlock,
    sample_rate: SampleRate,
    channels: Channels,
    last_packet_duration: Option<usize>,
}

#[derive(Debug)]
enum SessionState {
    Uninitialized,
    Initialized(Stream),
}

/// A stateful Opus decoding context for a single stream.
///
/// Not safe for concurrent use: every decode adapts the engine's internal
/// predictors, which is why decoding takes `&mut self`. Use one session per
/// stream; sessions are `Send` and can live on different threads.
///
/// ```no_run
/// use opus_session::DecodeSession;
///
/// # fn main() -> opus_session::Result<()> {
/// let mut session = DecodeSession::new(48000, 2)?;
/// let mut pcm = vec![0i16; session.max_output_len().unwrap_or_default()];
/// # let packet: &[u8] = &[];
/// let samples_per_channel = session.decode(packet, &mut pcm, false)?;
/// let audio = &pcm[..samples_per_channel * 2];
/// # let _ = audio;
/// # Ok(())
/// # }
/// ```
pub struct DecodeSession<E: Engine = Libopus> {
    inner: SessionState,
    engine: PhantomData<fn() -> E>,
}

impl<E: Engine> fmt::Debug for DecodeSession<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeSession")
            .field("inner", &self.inner)
            .finish()
    }
}

impl DecodeSession<Libopus> {
    /// Allocates a libopus-backed session and initializes it.
    ///
    /// Either returns a ready session or the initialization error; a
    /// half-initialized session is never handed out.
    pub fn new(sample_rate: i32, channels: i32) -> Result<Self> {
        Self::open(sample_rate, channels)
    }

    /// Typed form of [`DecodeSession::new`].
    pub fn with_config(sample_rate: SampleRate, channels: Channels) -> Result<Self> {
        Self::open(sample_rate.into(), channels.into())
    }
}

impl<E: Engine> Default for DecodeSession<E> {
    fn default() -> Self {
        Self::uninitialized()
    }
}

impl<E: Engine> DecodeSession<E> {
    /// A session holding no state yet. Call [`initialize`](Self::initialize)
    /// before decoding.
    pub fn uninitialized() -> Self {
        Self {
            inner: SessionState::Uninitialized,
            engine: PhantomData,
        }
    }

    /// Allocates a session on engine `E` and initializes it in one step.
    pub fn open(sample_rate: i32, channels: i32) -> Result<Self> {
        let mut session = Self::uninitialized();
        session.initialize(sample_rate, channels)?;
        Ok(session)
    }

    /// Binds the session to a sample rate and channel count.
    ///
    /// The state block is sized by asking the engine, then handed to the
    /// engine's initialization routine. On any failure the block is released
    /// and the session stays uninitialized. Sample rates are validated by the
    /// engine (libopus accepts 8, 12, 16, 24 and 48 kHz).
    pub fn initialize(&mut self, sample_rate: i32, channels: i32) -> Result<()> {
        if self.is_initialized() {
            return Err(Error::AlreadyInitialized);
        }
        let layout = Channels::try_from(channels)?;

        let size = E::state_size(channels);
        let size = usize::try_from(size)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(ErrorCode::BadArg)?;
        let mut state = StateBlock::zeroed(size)?;

        // SAFETY: `state` was sized by `E::state_size(channels)`.
        let status = unsafe { E::init(&mut state, sample_rate, channels) };
        if status != 0 {
            let code = ErrorCode::from(status);
            debug!(sample_rate, channels, %code, "decoder initialization failed");
            return Err(code.into());
        }
        // Rates an engine accepts beyond the typed set are still refused.
        let sample_rate = SampleRate::try_from(sample_rate)?;

        trace!(?sample_rate, ?layout, state_bytes = size, "decoder initialized");
        self.inner = SessionState::Initialized(Stream {
            state,
            sample_rate,
            channels: layout,
            last_packet_duration: None,
        });
        Ok(())
    }

    /// Decodes one packet into interleaved `i16` samples.
    ///
    /// An empty `packet` means the packet was lost: the engine conceals it
    /// from its prior state, filling the whole per-channel capacity of
    /// `pcm`. To conceal exactly one lost frame, pass a buffer sized to
    /// [`last_packet_duration`](Self::last_packet_duration).
    ///
    /// With `fec` set and a non-empty `packet` (the one *after* the loss),
    /// the engine rebuilds the lost slice from that packet's in-band
    /// redundancy if present, falling back to concealment otherwise. The
    /// buffer should then be sized to the lost slice's duration.
    ///
    /// Concealment and FEC synthesize whole 2.5 ms steps, so for those
    /// requests the per-channel capacity is rounded down to a multiple of
    /// 2.5 ms at the session rate. A buffer with no room for a single sample
    /// per channel is rejected with [`Error::EmptyOutputBuffer`].
    ///
    /// Returns the number of samples written **per channel**. On error the
    /// contents of `pcm` are undefined.
    pub fn decode(&mut self, packet: &[u8], pcm: &mut [i16], fec: bool) -> Result<usize> {
        let stream = self.stream_mut()?;
        let frame_size = stream.frame_capacity(pcm.len(), packet.is_empty() || fec)?;
        // SAFETY: the state was initialized and `pcm` holds at least
        // `frame_size * channels` samples.
        let ret = unsafe { E::decode(&mut stream.state, packet, pcm, frame_size, fec) };
        stream.finish_decode(ret, packet.len(), fec)
    }

    /// Decodes one packet into interleaved `f32` samples.
    ///
    /// Same contract as [`decode`](Self::decode).
    pub fn decode_float(&mut self, packet: &[u8], pcm: &mut [f32], fec: bool) -> Result<usize> {
        let stream = self.stream_mut()?;
        let frame_size = stream.frame_capacity(pcm.len(), packet.is_empty() || fec)?;
        // SAFETY: as in `decode`.
        let ret = unsafe { E::decode_float(&mut stream.state, packet, pcm, frame_size, fec) };
        stream.finish_decode(ret, packet.len(), fec)
    }

    /// Number of samples per channel `packet` decodes to at this session's
    /// sample rate, without decoding it.
    pub fn packet_samples(&self, packet: &[u8]) -> Result<usize> {
        let stream = self.stream()?;
        // SAFETY: the state was initialized.
        let ret = unsafe { E::packet_samples(&stream.state, packet) };
        usize::try_from(ret).map_err(|_| Error::Engine(ret.into()))
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.inner, SessionState::Initialized(_))
    }

    pub fn sample_rate(&self) -> Option<SampleRate> {
        self.stream().ok().map(|s| s.sample_rate)
    }

    pub fn channels(&self) -> Option<Channels> {
        self.stream().ok().map(|s| s.channels)
    }

    /// Per-channel duration, in samples, of the last successful decode.
    pub fn last_packet_duration(&self) -> Option<usize> {
        self.stream().ok().and_then(|s| s.last_packet_duration)
    }

    /// Length of an interleaved buffer holding the longest possible frame
    /// (120 ms) at this session's rate.
    pub fn max_output_len(&self) -> Option<usize> {
        self.stream()
            .ok()
            .map(|s| s.sample_rate.max_frame_samples() * s.channels.count())
    }

    fn stream(&self) -> Result<&Stream> {
        match &self.inner {
            SessionState::Initialized(stream) => Ok(stream),
            SessionState::Uninitialized => Err(Error::Uninitialized),
        }
    }

    fn stream_mut(&mut self) -> Result<&mut Stream> {
        match &mut self.inner {
            SessionState::Initialized(stream) => Ok(stream),
            SessionState::Uninitialized => Err(Error::Uninitialized),
        }
    }
}

impl Stream {
    /// Per-channel capacity of an interleaved buffer of `len` samples.
    ///
    /// For loss and FEC requests the capacity is floored to whole 2.5 ms
    /// steps, unless that leaves nothing.
    fn frame_capacity(&self, len: usize, synthesized: bool) -> Result<i32> {
        let mut per_channel = len / self.channels.count();
        if per_channel == 0 {
            return Err(Error::EmptyOutputBuffer);
        }
        if synthesized {
            let step = self.sample_rate.hz() as usize / 400;
            let floored = per_channel - per_channel % step;
            if floored > 0 {
                per_channel = floored;
            }
        }
        // Capacities beyond i32::MAX are clamped; the engine never needs
        // more than 120 ms anyway.
        Ok(i32::try_from(per_channel).unwrap_or(i32::MAX))
    }

    fn finish_decode(&mut self, ret: i32, packet_len: usize, fec: bool) -> Result<usize> {
        match usize::try_from(ret) {
            Ok(samples) => {
                self.last_packet_duration = Some(samples);
                Ok(samples)
            }
            Err(_) => {
                let code = ErrorCode::from(ret);
                debug!(packet_len, fec, %code, "decode failed");
                Err(code.into())
            }
        }
    }
}
