//! Sources of measured pulse durations for the decoder.
//!
//! The decoder never touches a pin directly. It pulls carrier-on durations from
//! a [`PulseSource`], which either measures them live or replays a capture:
//!
//! - [`Replay`]: replays durations captured elsewhere (logic analyzer, tests,
//!   a host-side simulation of the encoder)
//! - `PolledPulseSource`: samples an `InputPin` at a fixed interval using a
//!   `DelayNs` (feature `delay-loop`)

#[cfg(feature = "delay-loop")]
mod polled;
#[cfg_attr(feature = "delay-loop", allow(unused_imports))]
#[cfg(feature = "delay-loop")]
pub use polled::*;

/// Measures the carrier-on intervals of an incoming signal.
pub trait PulseSource {
    /// Measures the next high interval.
    ///
    /// Returns its length in microseconds, or `None` if no complete pulse was
    /// seen within `timeout_us`.
    fn measure_pulse(&mut self, timeout_us: u32) -> Option<u32>;

    /// Lets `us` microseconds pass without measuring.
    fn skip(&mut self, us: u32);
}

impl<T: PulseSource + ?Sized> PulseSource for &mut T {
    fn measure_pulse(&mut self, timeout_us: u32) -> Option<u32> {
        (**self).measure_pulse(timeout_us)
    }

    fn skip(&mut self, us: u32) {
        (**self).skip(us)
    }
}

/// Replays captured pulse durations.
///
/// A duration longer than the timeout it is read with reads as a timeout, the
/// same way a live measurement would give up on it. Once the capture runs out
/// every read times out. Skipping is a no-op: captured durations already
/// exclude the gaps between pulses.
#[derive(Debug, Clone)]
pub struct Replay<I> {
    durations: I,
}

impl<I> Replay<I>
where
    I: Iterator<Item = u32>,
{
    /// Replays `durations` in order.
    pub fn new<T>(durations: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            durations: durations.into_iter(),
        }
    }

    /// The durations not yet read.
    pub fn remaining(self) -> I {
        self.durations
    }
}

impl<I> PulseSource for Replay<I>
where
    I: Iterator<Item = u32>,
{
    fn measure_pulse(&mut self, timeout_us: u32) -> Option<u32> {
        self.durations
            .next()
            .filter(|&duration| duration <= timeout_us)
    }

    fn skip(&mut self, _us: u32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_yields_then_times_out() {
        let mut replay = Replay::new([100u32, 200]);
        assert_eq!(replay.measure_pulse(1_000), Some(100));
        assert_eq!(replay.measure_pulse(1_000), Some(200));
        assert_eq!(replay.measure_pulse(1_000), None);
    }

    #[test]
    fn test_replay_drops_pulses_past_the_timeout() {
        let mut replay = Replay::new([1_500u32, 300]);
        assert_eq!(replay.measure_pulse(1_000), None);
        assert_eq!(replay.measure_pulse(1_000), Some(300));
    }

    fn read_one<P: PulseSource>(mut source: P) -> Option<u32> {
        source.skip(10);
        source.measure_pulse(100)
    }

    #[test]
    fn test_replay_through_mut_ref() {
        let mut replay = Replay::new([42u32]);
        assert_eq!(read_one(&mut replay), Some(42));
        assert_eq!(replay.remaining().next(), None);
    }
}
