//! The address/command triple carried by every frame.

use core::fmt;

use thiserror::Error;

/// One frame as seen on the wire: address, command and inverted command.
///
/// A frame is valid when `inverse_command == !command`. The decoder builds a
/// `Frame` only after all 24 payload bits have arrived, so a `Frame` is never
/// partial; `valid` reports whether the integrity check held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Frame {
    /// Device address, identical for every key of one remote.
    pub address: u8,
    /// Command byte.
    pub command: u8,
    /// Bitwise complement of `command`, as received.
    pub inverse_command: u8,
    /// Whether `inverse_command` is the complement of `command`.
    pub valid: bool,
}

/// Routine, non-fatal reasons a receive attempt produced no usable frame.
///
/// The protocol has no acknowledgment, so the only recovery is to try again:
/// the transmitter repeats every frame and the receiver is expected to loop.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum ReceiveError {
    /// No start sequence was seen within the sync budget.
    #[error("no start sequence found")]
    NoStart,
    /// Synchronized, but the frame ended after `bits` of the 24 payload bits.
    #[error("frame ended after {bits} of 24 bits")]
    Incomplete {
        /// Payload bits collected before the abort.
        bits: u8,
    },
    /// All 24 bits arrived but the inverted command did not match.
    #[error("inverse mismatch in {0}")]
    InverseMismatch(Frame),
}

impl Frame {
    /// A valid frame for `command` sent from `address`.
    pub const fn new(address: u8, command: u8) -> Self {
        Self {
            address,
            command,
            inverse_command: !command,
            valid: true,
        }
    }

    /// A frame from its three raw bytes, with `valid` computed.
    pub const fn from_parts(address: u8, command: u8, inverse_command: u8) -> Self {
        Self {
            address,
            command,
            inverse_command,
            valid: inverse_command == !command,
        }
    }

    /// Splits a 24-bit payload: address in bits 23..16, command in 15..8,
    /// inverted command in 7..0. Higher bits are ignored.
    pub const fn from_bits(bits: u32) -> Self {
        Self::from_parts((bits >> 16) as u8, (bits >> 8) as u8, bits as u8)
    }

    /// The three bytes in transmission order.
    pub const fn bytes(&self) -> [u8; 3] {
        [self.address, self.command, self.inverse_command]
    }

    /// Turns a frame that failed the integrity check into an error.
    pub const fn validated(self) -> Result<Self, ReceiveError> {
        if self.valid {
            Ok(self)
        } else {
            Err(ReceiveError::InverseMismatch(self))
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "addr=0x{:02x} cmd=0x{:02x} inv=0x{:02x}{}",
            self.address,
            self.command,
            self.inverse_command,
            if self.valid { "" } else { " (mismatch)" }
        )
    }
}
