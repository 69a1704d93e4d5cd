//! Telegram layout.
//!
//! A telegram is everything one button press puts on the air:
//!
//! ```text
//! [preamble: N × 0] ( [start × S] [address] [command] [!command] [stop gap] ) × R
//! ```
//!
//! Bytes go out most significant bit first. The preamble lets the receiver's gain
//! control settle and is discarded by the decoder; each of the `R` frames is a
//! self-contained decode attempt.
//!
//! [`Telegram`] does not buffer anything. [`Telegram::symbols`] computes each
//! symbol from its position, so walking a telegram costs no memory on the
//! target.

#[cfg(not(feature = "std"))]
use heapless::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::consts::MAX_TELEGRAM_PULSES;
use crate::consts::FRAME_BITS;
use crate::frame::Frame;
use crate::profile::{ProfileError, Pulse, Symbol, TimingProfile};

/// One complete transmission for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Telegram {
    profile: TimingProfile,
    frame: Frame,
}

impl Telegram {
    /// The telegram sending `command` from `address`.
    pub const fn new(profile: TimingProfile, address: u8, command: u8) -> Self {
        Self::from_frame(profile, Frame::new(address, command))
    }

    /// The telegram sending `frame` as is, inverse byte included.
    pub const fn from_frame(profile: TimingProfile, frame: Frame) -> Self {
        Self { profile, frame }
    }

    /// The frame repeated in this telegram.
    pub const fn frame(&self) -> Frame {
        self.frame
    }

    /// The timing this telegram is laid out with.
    pub const fn profile(&self) -> &TimingProfile {
        &self.profile
    }

    /// Every symbol of the telegram in transmission order.
    pub fn symbols(&self) -> Symbols {
        Symbols {
            profile: self.profile,
            payload: payload_bits(&self.frame),
            index: 0,
            len: self.profile.telegram_pulses(),
        }
    }

    /// Every pulse of the telegram in transmission order.
    pub fn pulses(&self) -> impl ExactSizeIterator<Item = Pulse> + use<> {
        let profile = self.profile;
        self.symbols().map(move |symbol| symbol.pulse(&profile))
    }

    /// The carrier-on intervals a receiver measures, in order.
    ///
    /// Stop gaps carry no burst and are skipped.
    pub fn bursts(&self) -> impl Iterator<Item = u32> + use<> {
        self.pulses()
            .map(|pulse| pulse.burst_us)
            .filter(|&burst| burst > 0)
    }

    /// Materializes the pulse list.
    ///
    /// Fails if the profile is invalid, which also guarantees the list fits.
    #[cfg(not(feature = "std"))]
    pub fn to_vec(&self) -> Result<Vec<Pulse, MAX_TELEGRAM_PULSES>, ProfileError> {
        self.profile.validate()?;
        Ok(self.pulses().collect())
    }

    /// Materializes the pulse list.
    ///
    /// Fails if the profile is invalid.
    #[cfg(feature = "std")]
    pub fn to_vec(&self) -> Result<Vec<Pulse>, ProfileError> {
        self.profile.validate()?;
        Ok(self.pulses().collect())
    }
}

fn payload_bits(frame: &Frame) -> u32 {
    frame
        .bytes()
        .iter()
        .fold(0u32, |bits, &byte| (bits << 8) | u32::from(byte))
}

/// Iterator over the symbols of a [`Telegram`].
#[derive(Debug, Clone)]
pub struct Symbols {
    profile: TimingProfile,
    payload: u32,
    index: usize,
    len: usize,
}

impl Symbols {
    fn symbol_at(&self, index: usize) -> Symbol {
        let preamble = self.profile.preamble_bits as usize;
        if index < preamble {
            return Symbol::Zero;
        }
        let offset = (index - preamble) % self.profile.frame_pulses();
        let start_bits = self.profile.start_bits as usize;
        if offset < start_bits {
            return Symbol::Start;
        }
        let bit = offset - start_bits;
        if bit < FRAME_BITS as usize {
            let shift = FRAME_BITS as usize - 1 - bit;
            Symbol::from_bit((self.payload >> shift) as u8)
        } else {
            Symbol::Stop
        }
    }
}

impl Iterator for Symbols {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        if self.index >= self.len {
            return None;
        }
        let symbol = self.symbol_at(self.index);
        self.index += 1;
        Some(symbol)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Symbols {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    fn profile() -> TimingProfile {
        TimingProfile::new().with_err_us(100)
    }

    #[test]
    fn test_telegram_layout() {
        let telegram = Telegram::new(profile(), 0xa5, 0x01);
        let symbols: Vec<Symbol> = telegram.symbols().collect();
        assert_eq!(symbols.len(), 32 + 3 * 29);
        assert!(symbols[..32].iter().all(|&s| s == Symbol::Zero));

        let frame = &symbols[32..32 + 29];
        assert!(frame[..4].iter().all(|&s| s == Symbol::Start));
        // 0xa5 = 1010_0101
        let address: Vec<Symbol> = [1u8, 0, 1, 0, 0, 1, 0, 1]
            .iter()
            .map(|&b| Symbol::from_bit(b))
            .collect();
        assert_eq!(&frame[4..12], address.as_slice());
        // 0x01 then 0xfe
        assert_eq!(frame[19], Symbol::One);
        assert!(frame[12..19].iter().all(|&s| s == Symbol::Zero));
        assert!(frame[20..27].iter().all(|&s| s == Symbol::One));
        assert_eq!(frame[27], Symbol::Zero);
        assert_eq!(frame[28], Symbol::Stop);

        // Every repetition is identical.
        assert_eq!(&symbols[32..61], &symbols[61..90]);
        assert_eq!(&symbols[61..90], &symbols[90..119]);
    }

    #[test]
    fn test_telegram_without_preamble() {
        let telegram = Telegram::new(profile().with_preamble_bits(0).with_repeat_count(1), 0, 0);
        let symbols: Vec<Symbol> = telegram.symbols().collect();
        assert_eq!(symbols.len(), 29);
        assert_eq!(symbols[0], Symbol::Start);
        assert_eq!(symbols[28], Symbol::Stop);
    }

    #[test]
    fn test_bursts_skip_stop_gaps() {
        let telegram = Telegram::new(profile(), 0x5a, 0x10);
        let bursts: Vec<u32> = telegram.bursts().collect();
        assert_eq!(bursts.len(), 32 + 3 * 28);
        assert!(bursts.iter().all(|&b| b == 200 || b == 400 || b == 600));
    }

    #[test]
    fn test_to_vec_matches_pulses() {
        let telegram = Telegram::new(profile(), 0x5a, 0x10);
        let pulses = telegram.to_vec().unwrap();
        assert_eq!(pulses.len(), telegram.pulses().len());
        assert_eq!(
            pulses.last(),
            Some(&Pulse {
                burst_us: 0,
                space_us: 800
            })
        );
    }

    #[test]
    fn test_to_vec_rejects_invalid_profile() {
        let telegram = Telegram::new(profile().with_repeat_count(0), 0x5a, 0x10);
        assert_eq!(telegram.to_vec(), Err(ProfileError::NoRepeats));
    }
}
