//! Constants used across the remote control protocol.
//!
//! This module defines the protocol-wide defaults for pulse timing, frame layout
//! and the factory command registry.
//!
//! ## Key Concepts
//!
//! - **ERR**: the base time unit in microseconds. Every pulse width and every
//!   decoder window is a whole multiple of it.
//! - **Frame layout**: start sequence, then address, command and inverted command,
//!   each 8 bits, most significant bit first.
//! - **Registry**: the address and command bytes a physical remote sends.
//!
//! ERR, the start bit count and the byte layout are contractual: an encoder and a
//! decoder that disagree on any of them fail silently, there is no version field
//! on the wire.

/// Default base time unit (ERR) in microseconds.
pub const DEFAULT_ERR_US: u32 = 150;

/// Default number of zero-bits sent ahead of the first frame so the receiver's
/// gain control can settle.
pub const DEFAULT_PREAMBLE_BITS: u16 = 32;

/// Default number of start pulses marking the beginning of each frame.
pub const DEFAULT_START_BITS: u8 = 4;

/// Default number of times the frame is repeated inside one telegram.
pub const DEFAULT_REPEAT_COUNT: u8 = 3;

/// Default amount, in microseconds, each space is shortened to compensate for
/// the time spent toggling the output pin.
pub const DEFAULT_TRAILING_EDGE_COMPENSATION_US: u32 = 4;

/// Default number of pulse reads the decoder spends looking for a start
/// sequence before reporting `NoStart`.
pub const DEFAULT_SYNC_BUDGET: u16 = 256;

/// Bits per byte on the wire, sent most significant bit first.
pub const BITS_PER_BYTE: u8 = 8;

/// Bytes in one frame: address, command, inverted command.
pub const FRAME_BYTES: u8 = 3;

/// Payload bits in one frame.
pub const FRAME_BITS: u8 = BITS_PER_BYTE * FRAME_BYTES;

/// Width multipliers, in units of ERR.
pub mod width {
    /// Zero bit: burst and space each last `2 × ERR`.
    pub const BIT0: u32 = 2;
    /// One bit: burst and space each last `4 × ERR`.
    pub const BIT1: u32 = 4;
    /// Start pulse: burst and space each last `6 × ERR`.
    pub const START: u32 = 6;
    /// Minimum carrier-off time closing every frame.
    pub const STOP_GAP: u32 = 8;
}

/// Decoder windows, in units of ERR.
pub mod window {
    /// Lower edge (inclusive) of the start-pulse acceptance band.
    pub const START_MIN: u32 = 5;
    /// Upper edge (inclusive) of the start-pulse acceptance band.
    pub const START_MAX: u32 = 7;
    /// Per-pulse timeout while waiting for the start sequence.
    pub const START_TIMEOUT: u32 = 14;
    /// Delay skipped after the last start pulse.
    pub const GUARD: u32 = 2;
    /// Per-pulse timeout while reading payload bits.
    pub const BIT_TIMEOUT: u32 = 10;
    /// Payload pulses shorter than this are noise.
    pub const BIT_MIN: u32 = 1;
    /// Payload pulses longer than this are ones.
    pub const BIT_ONE_ABOVE: u32 = 3;
    /// Payload pulses longer than this end the frame.
    pub const BIT_MAX: u32 = 5;
}

/// Largest multiplier applied to ERR anywhere in the protocol.
pub const MAX_ERR_MULTIPLE: u32 = window::START_TIMEOUT;

/// Capacity of a materialized telegram (see `Telegram::to_vec`).
///
/// The default telegram uses `32 + 3 × (4 + 24 + 1) = 119` pulses.
pub const MAX_TELEGRAM_PULSES: usize = 160;

/// Factory device address shared by every key of one remote.
pub const DEFAULT_ADDRESS: u8 = 0x5a;

/// Factory command bytes for KEY1..KEY5.
pub const DEFAULT_COMMANDS: [u8; 5] = [0x01, 0x02, 0x04, 0x08, 0x10];

/// Default time, in milliseconds, a key must stay pressed to count as a press.
pub const DEFAULT_DEBOUNCE_MS: u32 = 20;
