//! Pulse timing shared by the encoder and the decoder.
//!
//! A [`TimingProfile`] is parameterized by a single base unit, ERR, in
//! microseconds. Every pulse the encoder emits and every window the decoder
//! applies is a whole multiple of it:
//!
//! | Symbol | Burst      | Space      |
//! |--------|------------|------------|
//! | 0      | `2 × ERR`  | `2 × ERR`  |
//! | 1      | `4 × ERR`  | `4 × ERR`  |
//! | start  | `6 × ERR`  | `6 × ERR`  |
//! | stop   | none       | `8 × ERR`  |
//!
//! Burst and space of a symbol are equally long so the channel carries no net
//! DC bias.
//!
//! ## Contract
//!
//! `err_us`, `start_bits` and the 8-bit MSB-first byte layout must match between
//! an encoder and a decoder that are meant to interoperate. Nothing on the wire
//! identifies them, so a mismatch is never reported as such: it only shows up as
//! persistent `NoStart` or `Incomplete` results on the receiving side.

use thiserror::Error;

use crate::consts::{
    DEFAULT_ERR_US, DEFAULT_PREAMBLE_BITS, DEFAULT_REPEAT_COUNT, DEFAULT_START_BITS,
    DEFAULT_TRAILING_EDGE_COMPENSATION_US, FRAME_BITS, MAX_ERR_MULTIPLE, MAX_TELEGRAM_PULSES,
    width, window,
};

/// Reasons a [`TimingProfile`] cannot be used.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum ProfileError {
    /// ERR is zero, so every pulse would be zero length.
    #[error("base unit ERR must be non-zero")]
    ZeroErr,
    /// ERR is so large that the longest decoder window overflows `u32`.
    #[error("base unit ERR of {0} us overflows the decoder windows")]
    ErrTooLarge(u32),
    /// A frame needs at least one start pulse to be found.
    #[error("at least one start bit is required")]
    NoStartBits,
    /// A telegram needs at least one frame.
    #[error("at least one frame repetition is required")]
    NoRepeats,
    /// The telegram would not fit in [`MAX_TELEGRAM_PULSES`].
    #[error("telegram of {0} pulses exceeds the pulse buffer")]
    TelegramTooLong(usize),
    /// The requested bit rate is not a positive, finite number.
    #[error("bit rate must be positive and finite")]
    InvalidBitRate,
}

/// One carrier-on interval followed by one carrier-off interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Pulse {
    /// Carrier-on time in microseconds. Zero means the carrier stays off.
    pub burst_us: u32,
    /// Carrier-off time in microseconds.
    pub space_us: u32,
}

/// The symbols a telegram is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Symbol {
    /// A zero data bit, also used for the preamble.
    Zero,
    /// A one data bit.
    One,
    /// One pulse of the start sequence.
    Start,
    /// The carrier-off gap closing a frame.
    Stop,
}

impl Symbol {
    /// The data symbol for the lowest bit of `bit`.
    pub const fn from_bit(bit: u8) -> Self {
        if bit & 1 == 1 { Symbol::One } else { Symbol::Zero }
    }

    /// The pulse this symbol is sent as under `profile`.
    pub const fn pulse(self, profile: &TimingProfile) -> Pulse {
        match self {
            Symbol::Zero => Pulse::symmetric(profile.bit0_us()),
            Symbol::One => Pulse::symmetric(profile.bit1_us()),
            Symbol::Start => Pulse::symmetric(profile.start_us()),
            Symbol::Stop => Pulse {
                burst_us: 0,
                space_us: profile.stop_gap_us(),
            },
        }
    }
}

impl Pulse {
    const fn symmetric(us: u32) -> Self {
        Self {
            burst_us: us,
            space_us: us,
        }
    }
}

/// Protocol timing, derived from the base unit ERR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct TimingProfile {
    /// Base time unit (ERR) in microseconds.
    pub err_us: u32,
    /// Zero-bits sent before the first frame. Transmit side only.
    pub preamble_bits: u16,
    /// Start pulses opening each frame. Must match on both ends.
    pub start_bits: u8,
    /// Frames per telegram. Transmit side only.
    pub repeat_count: u8,
    /// Microseconds taken off every space to make up for pin toggling time.
    pub trailing_edge_compensation_us: u32,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingProfile {
    /// The factory profile (ERR = 150 µs, 32 preamble bits, 4 start bits, 3 repeats).
    pub const fn new() -> Self {
        Self {
            err_us: DEFAULT_ERR_US,
            preamble_bits: DEFAULT_PREAMBLE_BITS,
            start_bits: DEFAULT_START_BITS,
            repeat_count: DEFAULT_REPEAT_COUNT,
            trailing_edge_compensation_us: DEFAULT_TRAILING_EDGE_COMPENSATION_US,
        }
    }

    /// Derives ERR from a nominal bit rate.
    ///
    /// An average data bit (half zeros, half ones) lasts `6 × ERR` including its
    /// space, so `ERR = 1 / (6 × bits_per_second)`, rounded to the nearest µs.
    pub fn for_bit_rate(bits_per_second: f32) -> Result<Self, ProfileError> {
        if !bits_per_second.is_finite() || bits_per_second <= 0.0 {
            return Err(ProfileError::InvalidBitRate);
        }
        let err_us = libm::roundf(1_000_000.0 / (6.0 * bits_per_second));
        if err_us > u32::MAX as f32 {
            return Err(ProfileError::InvalidBitRate);
        }
        let profile = Self::new().with_err_us(err_us as u32);
        profile.validate()?;
        Ok(profile)
    }

    /// Returns the profile with a different base unit.
    pub const fn with_err_us(mut self, err_us: u32) -> Self {
        self.err_us = err_us;
        self
    }

    /// Returns the profile with a different preamble length.
    pub const fn with_preamble_bits(mut self, preamble_bits: u16) -> Self {
        self.preamble_bits = preamble_bits;
        self
    }

    /// Returns the profile with a different start sequence length.
    pub const fn with_start_bits(mut self, start_bits: u8) -> Self {
        self.start_bits = start_bits;
        self
    }

    /// Returns the profile with a different number of frame repetitions.
    pub const fn with_repeat_count(mut self, repeat_count: u8) -> Self {
        self.repeat_count = repeat_count;
        self
    }

    /// Returns the profile with a different trailing-edge compensation.
    pub const fn with_trailing_edge_compensation_us(mut self, us: u32) -> Self {
        self.trailing_edge_compensation_us = us;
        self
    }

    /// Checks that the profile can be encoded and decoded.
    pub fn validate(&self) -> Result<(), ProfileError> {
        self.validate_receive()?;
        if self.repeat_count == 0 {
            return Err(ProfileError::NoRepeats);
        }
        let pulses = self.telegram_pulses();
        if pulses > MAX_TELEGRAM_PULSES {
            return Err(ProfileError::TelegramTooLong(pulses));
        }
        Ok(())
    }

    /// Checks only the fields a decoder reads: ERR and the start bit count.
    ///
    /// Preamble length and repeat count are transmit-side settings and are not
    /// looked at.
    pub fn validate_receive(&self) -> Result<(), ProfileError> {
        if self.err_us == 0 {
            return Err(ProfileError::ZeroErr);
        }
        if self.err_us.checked_mul(MAX_ERR_MULTIPLE).is_none() {
            return Err(ProfileError::ErrTooLarge(self.err_us));
        }
        if self.start_bits == 0 {
            return Err(ProfileError::NoStartBits);
        }
        Ok(())
    }

    /// Number of pulses (stop gaps included) in one telegram.
    pub const fn telegram_pulses(&self) -> usize {
        self.preamble_bits as usize + self.repeat_count as usize * self.frame_pulses()
    }

    /// Number of pulses (stop gap included) in one frame.
    pub const fn frame_pulses(&self) -> usize {
        self.start_bits as usize + FRAME_BITS as usize + 1
    }

    const fn err_times(&self, multiple: u32) -> u32 {
        self.err_us.saturating_mul(multiple)
    }

    /// Burst and space width of a zero bit.
    pub const fn bit0_us(&self) -> u32 {
        self.err_times(width::BIT0)
    }

    /// Burst and space width of a one bit.
    pub const fn bit1_us(&self) -> u32 {
        self.err_times(width::BIT1)
    }

    /// Burst and space width of a start pulse.
    pub const fn start_us(&self) -> u32 {
        self.err_times(width::START)
    }

    /// Carrier-off time closing every frame.
    pub const fn stop_gap_us(&self) -> u32 {
        self.err_times(width::STOP_GAP)
    }

    /// Per-pulse timeout while hunting for the start sequence.
    pub const fn start_timeout_us(&self) -> u32 {
        self.err_times(window::START_TIMEOUT)
    }

    /// Per-pulse timeout while reading payload bits.
    pub const fn bit_timeout_us(&self) -> u32 {
        self.err_times(window::BIT_TIMEOUT)
    }

    /// Delay skipped between the last start pulse and the first payload bit.
    pub const fn guard_us(&self) -> u32 {
        self.err_times(window::GUARD)
    }

    /// Whether `duration_us` falls in the inclusive start band `[5 × ERR, 7 × ERR]`.
    pub const fn is_start(&self, duration_us: u32) -> bool {
        duration_us >= self.err_times(window::START_MIN)
            && duration_us <= self.err_times(window::START_MAX)
    }

    /// Classifies a payload pulse.
    ///
    /// Returns `None` for anything below `ERR` or above `5 × ERR`, `Some(1)` above
    /// `3 × ERR` and `Some(0)` otherwise. Both ends of the accepted range are
    /// inclusive, the one threshold is exclusive.
    pub const fn classify_bit(&self, duration_us: u32) -> Option<u8> {
        if duration_us < self.err_times(window::BIT_MIN)
            || duration_us > self.err_times(window::BIT_MAX)
        {
            None
        } else if duration_us > self.err_times(window::BIT_ONE_ABOVE) {
            Some(1)
        } else {
            Some(0)
        }
    }
}
