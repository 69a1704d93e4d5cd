//! Pulse-stream decoder.
//!
//! [`Decoder`] turns measured carrier-on durations back into frames. Each call
//! to [`Decoder::receive_frame`] is one self-contained attempt that walks four
//! states:
//!
//! 1. **Await start**: read pulses with a `14 × ERR` timeout. Pulses inside the
//!    start band `[5 × ERR, 7 × ERR]` extend a run; anything else, a timeout
//!    included, resets it. `start_bits` consecutive in-band pulses synchronize.
//!    The preamble is made of zero-bits, which are shorter than start pulses, so
//!    it never extends a run and any amount of it is discarded.
//! 2. **Synced**: skip a `2 × ERR` guard past the trailing edge of the last
//!    start pulse.
//! 3. **Reading bits**: read 24 pulses with a `10 × ERR` timeout, most
//!    significant bit first. A pulse below `ERR` or above `5 × ERR`, or a
//!    timeout, ends the attempt and everything collected so far is dropped.
//! 4. **Complete**: split into address, command and inverted command and check
//!    the inverse.
//!
//! Nothing carries over between attempts. The transmitter repeats every frame,
//! so a failed attempt is ordinary noise; loop on `receive_frame`, or use
//! [`Decoder::listen`] which does that for a bounded number of attempts.

use crate::consts::{DEFAULT_SYNC_BUDGET, FRAME_BITS};
use crate::fmt::{debug, trace, warning};
use crate::frame::{Frame, ReceiveError};
use crate::profile::{ProfileError, TimingProfile};
use crate::pulse::PulseSource;

/// Running totals of receive outcomes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct ReceiveStats {
    /// Frames that passed the inverse check.
    pub rx_good: u32,
    /// Frames whose inverse check failed.
    pub rx_bad: u32,
    /// Attempts that synchronized but ended early.
    pub rx_incomplete: u32,
    /// Attempts that never synchronized.
    pub rx_no_start: u32,
}

impl ReceiveStats {
    fn record(&mut self, result: &Result<Frame, ReceiveError>) {
        let counter = match result {
            Ok(frame) if frame.valid => &mut self.rx_good,
            Ok(_) | Err(ReceiveError::InverseMismatch(_)) => &mut self.rx_bad,
            Err(ReceiveError::Incomplete { .. }) => &mut self.rx_incomplete,
            Err(ReceiveError::NoStart) => &mut self.rx_no_start,
        };
        *counter = counter.wrapping_add(1);
    }
}

/// Decodes frames from a [`PulseSource`].
///
/// The decoder's `TimingProfile` must use the same ERR and start bit count as
/// the transmitter. Only those two fields are read; preamble length and repeat
/// count are transmit-side settings.
#[derive(Debug)]
pub struct Decoder<P>
where
    P: PulseSource,
{
    source: P,
    profile: TimingProfile,
    sync_budget: u16,
    /// Outcome counters since construction.
    pub stats: ReceiveStats,
}

impl<P> Decoder<P>
where
    P: PulseSource,
{
    /// Creates a decoder reading from `source`.
    ///
    /// # Errors
    /// Fails if `profile` has a zero or overflowing ERR, or no start bits. See
    /// [`TimingProfile::validate_receive`].
    pub fn new(source: P, profile: TimingProfile) -> Result<Self, ProfileError> {
        profile.validate_receive()?;
        Ok(Self {
            source,
            profile,
            sync_budget: DEFAULT_SYNC_BUDGET,
            stats: ReceiveStats::default(),
        })
    }

    /// Sets how many pulse reads one attempt may spend looking for a start
    /// sequence before giving up with [`ReceiveError::NoStart`].
    pub fn with_sync_budget(mut self, reads: u16) -> Self {
        self.sync_budget = reads;
        self
    }

    /// The timing frames are decoded with.
    pub fn profile(&self) -> &TimingProfile {
        &self.profile
    }

    /// Returns the pulse source.
    pub fn release(self) -> P {
        self.source
    }

    /// Makes one attempt at receiving a frame.
    ///
    /// # Returns
    /// - `Ok(frame)`: 24 bits were read; `frame.valid` tells whether the inverse
    ///   check held
    /// - `Err(ReceiveError::NoStart)`: no start sequence within the sync budget
    /// - `Err(ReceiveError::Incomplete { bits })`: synchronized, but the frame
    ///   ended after `bits` bits
    pub fn receive_frame(&mut self) -> Result<Frame, ReceiveError> {
        let result = self.await_start().and_then(|()| self.read_bits());
        self.stats.record(&result);
        result
    }

    /// Retries [`receive_frame`](Self::receive_frame) up to `attempts` times.
    ///
    /// Returns the first frame that passes the inverse check, or the error of
    /// the last attempt; a mismatched frame counts as
    /// [`ReceiveError::InverseMismatch`].
    pub fn listen(&mut self, attempts: u16) -> Result<Frame, ReceiveError> {
        let mut last = ReceiveError::NoStart;
        for _ in 0..attempts {
            match self.receive_frame().and_then(Frame::validated) {
                Ok(frame) => return Ok(frame),
                Err(err) => last = err,
            }
        }
        Err(last)
    }

    fn await_start(&mut self) -> Result<(), ReceiveError> {
        let timeout = self.profile.start_timeout_us();
        let mut run: u8 = 0;
        for _ in 0..self.sync_budget {
            match self.source.measure_pulse(timeout) {
                Some(duration) if self.profile.is_start(duration) => {
                    run += 1;
                    if run >= self.profile.start_bits {
                        trace!("rx sync after {} start pulses", run);
                        self.source.skip(self.profile.guard_us());
                        return Ok(());
                    }
                }
                _ => run = 0,
            }
        }
        Err(ReceiveError::NoStart)
    }

    fn read_bits(&mut self) -> Result<Frame, ReceiveError> {
        let profile = self.profile;
        let timeout = profile.bit_timeout_us();
        let mut payload: u32 = 0;
        for count in 0..FRAME_BITS {
            let bit = self
                .source
                .measure_pulse(timeout)
                .and_then(|duration| profile.classify_bit(duration));
            match bit {
                Some(bit) => payload = (payload << 1) | u32::from(bit),
                None => {
                    debug!("rx frame ended after {} bits", count);
                    return Err(ReceiveError::Incomplete { bits: count });
                }
            }
        }

        let frame = Frame::from_bits(payload);
        if frame.valid {
            debug!("rx {}", frame);
        } else {
            warning!("rx {}", frame);
        }
        Ok(frame)
    }
}
