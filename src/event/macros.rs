/// Declares a static [`WakeLatch`](crate::event::WakeLatch) shared between the
/// pin-change ISR and the main loop.
///
/// Without an argument the static is named `WAKE_LATCH`.
///
/// # Example
/// ```rust
/// remote433::init_wake_latch!();
///
/// fn main() {
///     assert!(!WAKE_LATCH.is_pending());
/// }
/// ```
#[macro_export]
macro_rules! init_wake_latch {
    () => {
        $crate::init_wake_latch!(WAKE_LATCH);
    };
    ( $name:ident ) => {
        pub static $name: $crate::event::WakeLatch = $crate::event::WakeLatch::new();
    };
}

/// Sets a latch declared with [`init_wake_latch!`](crate::init_wake_latch).
///
/// Intended for the body of the pin-change interrupt handler.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn PCINT0() {
///     signal_wake!();
/// }
/// ```
#[macro_export]
macro_rules! signal_wake {
    () => {
        $crate::signal_wake!(WAKE_LATCH)
    };
    ( $name:ident ) => {
        $name.signal()
    };
}
