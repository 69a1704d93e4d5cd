//! The remote control: keypad in, telegrams out.
//!
//! [`Remote`] ties a [`Keypad`], a [`CommandRegistry`] and an [`Encoder`]
//! together. Each call to [`Remote::service`] is one wake-up: scan the keys
//! with debouncing and, if one is held, send its command once.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

#[cfg(feature = "wake-isr")]
use crate::event::WakeLatch;
use crate::consts::DEFAULT_DEBOUNCE_MS;
use crate::encoder::Encoder;
use crate::fmt::debug;
use crate::keypad::{CommandRegistry, Key, Keypad};
use crate::profile::TimingProfile;

/// A battery-powered five key remote.
///
/// ## Example
///
/// ```rust
/// # use embedded_hal_mock::eh1::delay::NoopDelay;
/// # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
/// use remote433::keypad::{CommandRegistry, Keypad};
/// use remote433::profile::TimingProfile;
/// use remote433::remote::Remote;
///
/// # let tx = Pin::new(&[PinTransaction::set(PinState::Low)]);
/// # let up = || Pin::new(&[PinTransaction::get(PinState::High)]);
/// # let buttons = [up(), up(), up(), up(), up()];
/// let keypad = Keypad::new(buttons, None);
/// let mut remote = Remote::new(
///     tx,
///     NoopDelay::new(),
///     keypad,
///     CommandRegistry::default(),
///     TimingProfile::new(),
/// );
///
/// // Called once per wake-up; nothing is held here.
/// assert_eq!(remote.service(), None);
/// # let (encoder, keypad) = remote.release();
/// # let (mut tx, _) = encoder.release();
/// # tx.done();
/// # for mut b in keypad.release() { b.done(); }
/// ```
#[derive(Debug)]
pub struct Remote<TX, D, B>
where
    TX: OutputPin,
    D: DelayNs,
    B: InputPin,
{
    encoder: Encoder<TX, D>,
    keypad: Keypad<B>,
    registry: CommandRegistry,
    debounce_ms: u32,
}

impl<TX, D, B> Remote<TX, D, B>
where
    TX: OutputPin,
    D: DelayNs,
    B: InputPin,
{
    /// Creates a remote sending `registry` commands from `registry`'s address.
    pub fn new(
        tx: TX,
        delay: D,
        keypad: Keypad<B>,
        registry: CommandRegistry,
        profile: TimingProfile,
    ) -> Self {
        Self {
            encoder: Encoder::new(tx, delay, profile, registry.address()),
            keypad,
            registry,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }

    /// Sets how long a key must stay held before it counts.
    pub fn with_debounce_ms(mut self, debounce_ms: u32) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    /// The key to command mapping.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Returns the encoder and the keypad.
    pub fn release(self) -> (Encoder<TX, D>, Keypad<B>) {
        (self.encoder, self.keypad)
    }

    /// Handles one wake-up.
    ///
    /// Returns the key whose command was sent, or `None` if no key was held
    /// steadily. The telegram is always sent in full; releasing the key part way
    /// through does not cut it short.
    pub fn service(&mut self) -> Option<Key> {
        let key = self
            .keypad
            .debounced(self.encoder.delay_mut(), self.debounce_ms)?;
        let command = self.registry.command(key);
        debug!("{} pressed, command {}", key, command);
        self.encoder.transmit(command);
        Some(key)
    }

    /// Blocks until `latch` is signalled, then handles one wake-up.
    ///
    /// Edges that arrive while the press is being handled (contact bounce, the
    /// release of the same key) are dropped, so one press sends at most one
    /// telegram.
    #[cfg(feature = "wake-isr")]
    pub fn run_once(&mut self, latch: &WakeLatch) -> Option<Key> {
        let _ = nb::block!(latch.poll());
        let key = self.service();
        let _ = latch.poll();
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use std::vec::Vec;

    fn button(levels: &[PinState]) -> PinMock {
        let expectations: Vec<PinTransaction> =
            levels.iter().map(|&s| PinTransaction::get(s)).collect();
        PinMock::new(&expectations)
    }

    /// Initial low, then one high/low pair per burst of a default telegram.
    fn telegram_writes() -> Vec<PinTransaction> {
        let bursts = TimingProfile::new().telegram_pulses() - 3;
        let mut writes = Vec::new();
        writes.push(PinTransaction::set(PinState::Low));
        for _ in 0..bursts {
            writes.push(PinTransaction::set(PinState::High));
            writes.push(PinTransaction::set(PinState::Low));
        }
        writes
    }

    fn finish<D: DelayNs>(remote: Remote<PinMock, D, PinMock>) {
        let (encoder, keypad) = remote.release();
        let (mut tx, _) = encoder.release();
        tx.done();
        for mut b in keypad.release() {
            b.done();
        }
    }

    #[test]
    fn test_press_sends_one_telegram() {
        use PinState::{High as Up, Low as Down};
        let tx = PinMock::new(&telegram_writes());
        let buttons = [
            button(&[Up, Up]),
            button(&[Down, Down]),
            button(&[]),
            button(&[]),
            button(&[]),
        ];
        let mut remote = Remote::new(
            tx,
            NoopDelay::new(),
            Keypad::new(buttons, None),
            CommandRegistry::default(),
            TimingProfile::new(),
        );
        assert_eq!(remote.service(), Some(Key::Key2));
        assert_eq!(remote.registry().command(Key::Key2), 0x02);
        finish(remote);
    }

    #[test]
    fn test_no_press_sends_nothing() {
        let tx = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let buttons = [
            button(&[PinState::High]),
            button(&[PinState::High]),
            button(&[PinState::High]),
            button(&[PinState::High]),
            button(&[PinState::High]),
        ];
        let mut remote = Remote::new(
            tx,
            NoopDelay::new(),
            Keypad::new(buttons, None),
            CommandRegistry::default(),
            TimingProfile::new(),
        )
        .with_debounce_ms(5);
        assert_eq!(remote.service(), None);
        finish(remote);
    }

    #[cfg(feature = "wake-isr")]
    #[test]
    fn test_run_once_waits_for_wake() {
        let latch = WakeLatch::new();
        latch.signal();
        let tx = PinMock::new(&telegram_writes());
        let buttons = [
            button(&[PinState::Low, PinState::Low]),
            button(&[]),
            button(&[]),
            button(&[]),
            button(&[]),
        ];
        let mut remote = Remote::new(
            tx,
            NoopDelay::new(),
            Keypad::new(buttons, None),
            CommandRegistry::default(),
            TimingProfile::new(),
        );
        assert_eq!(remote.run_once(&latch), Some(Key::Key1));
        assert!(!latch.is_pending());
        finish(remote);
    }

    /// Signals the latch from inside the debounce wait, like a bouncing
    /// contact firing the pin-change interrupt again.
    #[cfg(feature = "wake-isr")]
    #[derive(Debug)]
    struct BouncingDelay<'a>(&'a WakeLatch);

    #[cfg(feature = "wake-isr")]
    impl DelayNs for BouncingDelay<'_> {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, _ms: u32) {
            self.0.signal();
        }
    }

    #[cfg(feature = "wake-isr")]
    #[test]
    fn test_bounce_during_press_does_not_rearm() {
        let latch = WakeLatch::new();
        latch.signal();
        let tx = PinMock::new(&telegram_writes());
        let buttons = [
            button(&[PinState::Low, PinState::Low]),
            button(&[]),
            button(&[]),
            button(&[]),
            button(&[]),
        ];
        let mut remote = Remote::new(
            tx,
            BouncingDelay(&latch),
            Keypad::new(buttons, None),
            CommandRegistry::default(),
            TimingProfile::new(),
        );
        assert_eq!(remote.run_once(&latch), Some(Key::Key1));
        // A second run_once would block instead of sending again.
        assert!(!latch.is_pending());
        finish(remote);
    }
}
