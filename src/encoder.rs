//! Telegram transmitter.
//!
//! [`Encoder`] keys a 433 MHz OOK transmitter (FS1000A and similar) through a
//! complete [`Telegram`]: the pin is driven high for each burst and low for each
//! space, with a busy-wait [`DelayNs`] holding every level.
//!
//! Sending is open loop and runs to completion. There is no acknowledgment, so
//! the only defense against a lost frame is the `repeat_count` repetitions in
//! the telegram. A transmission is not cancellable either: once started, all
//! repetitions go out even if the button is released part way through.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::fmt::debug;
use crate::frame::Frame;
use crate::profile::{Pulse, TimingProfile};
use crate::telegram::Telegram;

/// Drives an OOK transmitter pin through telegrams.
///
/// ## Type Parameters
///
/// - `TX`: A type implementing [`embedded_hal::digital::OutputPin`] wired to the
///   transmitter data input (`HIGH` = carrier on)
/// - `D`: A type implementing [`embedded_hal::delay::DelayNs`] with microsecond
///   accuracy
///
/// ## Example
///
/// ```rust
/// # use embedded_hal_mock::eh1::delay::NoopDelay;
/// # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
/// use remote433::encoder::Encoder;
/// use remote433::profile::TimingProfile;
///
/// # let tx = Pin::new(&[PinTransaction::set(PinState::Low)]);
/// let encoder = Encoder::new(tx, NoopDelay::new(), TimingProfile::new(), 0x5a);
/// # let (mut tx, _) = encoder.release();
/// # tx.done();
/// ```
#[derive(Debug)]
pub struct Encoder<TX, D>
where
    TX: OutputPin,
    D: DelayNs,
{
    tx: TX,
    delay: D,
    profile: TimingProfile,
    address: u8,
}

impl<TX, D> Encoder<TX, D>
where
    TX: OutputPin,
    D: DelayNs,
{
    /// Creates an encoder sending from `address`.
    ///
    /// # Notes
    /// TX is driven `LOW` initially (carrier off).
    pub fn new(tx: TX, delay: D, profile: TimingProfile, address: u8) -> Self {
        let mut encoder = Self {
            tx,
            delay,
            profile,
            address,
        };
        encoder.carrier(false);
        encoder
    }

    /// The device address sent in every frame.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// The timing telegrams are sent with.
    pub fn profile(&self) -> &TimingProfile {
        &self.profile
    }

    /// Returns the pin and the delay.
    pub fn release(self) -> (TX, D) {
        (self.tx, self.delay)
    }

    pub(crate) fn delay_mut(&mut self) -> &mut D {
        &mut self.delay
    }

    /// Sends one telegram carrying `command`.
    ///
    /// Blocks for the whole telegram: preamble, then `repeat_count` frames of
    /// start sequence, address, `command`, `!command` and stop gap. Calling it
    /// twice with the same command drives the pin identically.
    pub fn transmit(&mut self, command: u8) {
        self.transmit_frame(Frame::new(self.address, command));
    }

    /// Sends one telegram carrying `frame` exactly as given.
    ///
    /// Unlike [`transmit`](Self::transmit) this does not recompute the inverse
    /// byte or use the encoder's address, which makes it possible to put a
    /// deliberately broken frame on the air.
    pub fn transmit_frame(&mut self, frame: Frame) {
        debug!("tx {} x{}", frame, self.profile.repeat_count);
        let telegram = Telegram::from_frame(self.profile, frame);
        for pulse in telegram.pulses() {
            self.emit(pulse);
        }
    }

    /// Sends one burst/space pair.
    fn emit(&mut self, pulse: Pulse) {
        if pulse.burst_us == 0 {
            // Stop gap: the line is already off.
            self.delay.delay_us(pulse.space_us);
            return;
        }
        self.carrier(true);
        self.delay.delay_us(pulse.burst_us);
        self.carrier(false);
        self.delay.delay_us(
            pulse
                .space_us
                .saturating_sub(self.profile.trailing_edge_compensation_us),
        );
    }

    fn carrier(&mut self, on: bool) {
        if on {
            let _ = self.tx.set_high();
        } else {
            let _ = self.tx.set_low(); // Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use std::vec::Vec;

    /// Records every delay in microseconds.
    #[derive(Debug, Default)]
    struct RecordingDelay {
        delays: Vec<u32>,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.delays.push(ns / 1_000);
        }

        fn delay_us(&mut self, us: u32) {
            self.delays.push(us);
        }
    }

    /// An output pin that accepts anything.
    #[derive(Debug, Default)]
    struct LoosePin {
        writes: usize,
    }

    impl ErrorType for LoosePin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for LoosePin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.writes += 1;
            Ok(())
        }
    }

    fn profile() -> TimingProfile {
        TimingProfile::new().with_err_us(100)
    }

    #[test]
    fn test_encoder_initialization_drives_low() {
        let tx = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let encoder = Encoder::new(tx, NoopDelay::new(), profile(), 0x5a);
        assert_eq!(encoder.address(), 0x5a);
        let (mut tx, _) = encoder.release();
        tx.done();
    }

    #[test]
    fn test_transmit_toggles_pin_per_pulse() {
        let p = profile().with_preamble_bits(2).with_repeat_count(1);
        // Initial low, then high/low for every pulse except the stop gap.
        let mut expectations = Vec::new();
        expectations.push(PinTransaction::set(PinState::Low));
        for _ in 0..(2 + 4 + 24) {
            expectations.push(PinTransaction::set(PinState::High));
            expectations.push(PinTransaction::set(PinState::Low));
        }
        let tx = PinMock::new(&expectations);

        let mut encoder = Encoder::new(tx, NoopDelay::new(), p, 0x5a);
        encoder.transmit(0x10);
        let (mut tx, _) = encoder.release();
        tx.done();
    }

    #[test]
    fn test_transmit_timing_with_compensation() {
        let p = profile()
            .with_preamble_bits(1)
            .with_start_bits(1)
            .with_repeat_count(1)
            .with_trailing_edge_compensation_us(5);
        let mut encoder = Encoder::new(LoosePin::default(), RecordingDelay::default(), p, 0x00);
        encoder.transmit(0xff);
        let (_, delay) = encoder.release();

        let mut expected: Vec<u32> = Vec::new();
        // Preamble zero.
        expected.extend([200, 195]);
        // Start.
        expected.extend([600, 595]);
        // Address 0x00.
        for _ in 0..8 {
            expected.extend([200, 195]);
        }
        // Command 0xff.
        for _ in 0..8 {
            expected.extend([400, 395]);
        }
        // Inverse 0x00.
        for _ in 0..8 {
            expected.extend([200, 195]);
        }
        // Stop gap, uncompensated.
        expected.push(800);
        assert_eq!(delay.delays, expected);
    }

    #[test]
    fn test_transmit_is_deterministic() {
        let mut first =
            Encoder::new(LoosePin::default(), RecordingDelay::default(), profile(), 0x5a);
        first.transmit(0x42);
        let mut second =
            Encoder::new(LoosePin::default(), RecordingDelay::default(), profile(), 0x5a);
        second.transmit(0x42);
        second.transmit(0x42);

        let (first_pin, first_delay) = first.release();
        let (second_pin, second_delay) = second.release();
        let once = first_delay.delays.len();
        assert_eq!(second_delay.delays.len(), 2 * once);
        assert_eq!(&second_delay.delays[..once], first_delay.delays.as_slice());
        assert_eq!(&second_delay.delays[once..], first_delay.delays.as_slice());
        assert_eq!(second_pin.writes - 1, 2 * (first_pin.writes - 1));
    }

    #[test]
    fn test_compensation_saturates() {
        let p = profile()
            .with_preamble_bits(1)
            .with_repeat_count(1)
            .with_trailing_edge_compensation_us(10_000);
        let mut encoder = Encoder::new(LoosePin::default(), RecordingDelay::default(), p, 0);
        encoder.transmit(0);
        let (_, delay) = encoder.release();
        assert_eq!(&delay.delays[..2], &[200u32, 0]);
        assert_eq!(delay.delays.last(), Some(&800));
    }
}
