use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

use super::PulseSource;

/// Measures pulses by sampling an input pin at a fixed interval.
///
/// This is the blocking counterpart of a timer-capture peripheral, for targets
/// where the receiver output is wired to a plain GPIO. Resolution is one
/// `tick_us`; a measured width is always a whole number of ticks.
///
/// # Example
/// ```rust
/// # use embedded_hal_mock::eh1::delay::NoopDelay;
/// # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
/// use remote433::pulse::{PolledPulseSource, PulseSource};
///
/// # let rx = Pin::new(&[
/// #     PinTransaction::get(PinState::Low),
/// #     PinTransaction::get(PinState::Low),
/// #     PinTransaction::get(PinState::High),
/// #     PinTransaction::get(PinState::High),
/// #     PinTransaction::get(PinState::High),
/// #     PinTransaction::get(PinState::Low),
/// # ]);
/// let mut source = PolledPulseSource::new(rx, NoopDelay::new(), 10, None);
/// assert_eq!(source.measure_pulse(1_000), Some(20));
/// # let (mut rx, _) = source.release();
/// # rx.done();
/// ```
#[derive(Debug)]
pub struct PolledPulseSource<RX, D>
where
    RX: InputPin,
    D: DelayNs,
{
    rx: RX,
    delay: D,
    tick_us: u32,
    inverted: bool,
}

impl<RX, D> PolledPulseSource<RX, D>
where
    RX: InputPin,
    D: DelayNs,
{
    /// Creates a source sampling `rx` every `tick_us` microseconds.
    ///
    /// # Arguments
    /// - `rx`: The receiver data output.
    /// - `delay`: The busy-wait used between samples.
    /// - `tick_us`: Sampling interval; clamped to at least 1 µs.
    /// - `rx_inverted`: Whether the receiver drives its output low while the
    ///   carrier is present.
    pub fn new(rx: RX, delay: D, tick_us: u32, rx_inverted: Option<bool>) -> Self {
        Self {
            rx,
            delay,
            tick_us: tick_us.max(1),
            inverted: rx_inverted.unwrap_or(false),
        }
    }

    /// Returns the pin and the delay.
    pub fn release(self) -> (RX, D) {
        (self.rx, self.delay)
    }

    fn carrier(&mut self) -> bool {
        // A failed read counts as no carrier.
        if self.inverted {
            !self.rx.is_high().unwrap_or(true)
        } else {
            self.rx.is_high().unwrap_or(false)
        }
    }

    fn wait_tick(&mut self, elapsed: &mut u32, timeout_us: u32) -> bool {
        if *elapsed >= timeout_us {
            return false;
        }
        self.delay.delay_us(self.tick_us);
        *elapsed = elapsed.saturating_add(self.tick_us);
        true
    }
}

impl<RX, D> PulseSource for PolledPulseSource<RX, D>
where
    RX: InputPin,
    D: DelayNs,
{
    fn measure_pulse(&mut self, timeout_us: u32) -> Option<u32> {
        let mut elapsed = 0;

        // Let a pulse already in progress run out; its start was missed.
        while self.carrier() {
            if !self.wait_tick(&mut elapsed, timeout_us) {
                return None;
            }
        }
        while !self.carrier() {
            if !self.wait_tick(&mut elapsed, timeout_us) {
                return None;
            }
        }

        let mut width = 0u32;
        while self.carrier() {
            if !self.wait_tick(&mut elapsed, timeout_us) {
                return None;
            }
            width = width.saturating_add(self.tick_us);
        }
        Some(width)
    }

    fn skip(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}
