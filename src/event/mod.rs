//! Wake-up signalling between a pin-change interrupt and the main loop.
//!
//! The remote spends its life asleep. A level change on any key pin wakes it
//! through an interrupt, and the interrupt handler does nothing but set a
//! [`WakeLatch`]. The main loop polls the latch with `nb`, scans the keypad once
//! and goes back to sleep, so at most one telegram is sent per wake-up and
//! transmissions never overlap.
//!
//! The latch lives in a `static` shared with the ISR and is guarded by
//! `critical_section::Mutex`. Use [`init_wake_latch!`](crate::init_wake_latch)
//! and [`signal_wake!`](crate::signal_wake) to declare and set it.

use core::cell::Cell;
use core::convert::Infallible;
use core::fmt;

use critical_section::Mutex;

mod macros;

/// A one-shot "something happened" flag safe to set from an interrupt.
pub struct WakeLatch {
    pending: Mutex<Cell<bool>>,
}

impl WakeLatch {
    /// Creates a cleared latch, usable in a `static`.
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(false)),
        }
    }

    /// Sets the latch. Call from the pin-change ISR.
    pub fn signal(&self) {
        critical_section::with(|cs| self.pending.borrow(cs).set(true));
    }

    /// Whether the latch is set, without clearing it.
    pub fn is_pending(&self) -> bool {
        critical_section::with(|cs| self.pending.borrow(cs).get())
    }

    /// Clears the latch and returns `Ok` if it was set.
    ///
    /// # Example
    /// ```rust
    /// use remote433::event::WakeLatch;
    ///
    /// static LATCH: WakeLatch = WakeLatch::new();
    ///
    /// LATCH.signal();
    /// nb::block!(LATCH.poll()).unwrap();
    /// assert!(LATCH.poll().is_err());
    /// ```
    pub fn poll(&self) -> nb::Result<(), Infallible> {
        critical_section::with(|cs| {
            if self.pending.borrow(cs).replace(false) {
                Ok(())
            } else {
                Err(nb::Error::WouldBlock)
            }
        })
    }
}

impl Default for WakeLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WakeLatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WakeLatch").finish_non_exhaustive()
    }
}
