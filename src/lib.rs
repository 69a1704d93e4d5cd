//! # remote433
//!
//! A portable, no_std Rust core for battery-powered 433 MHz ASK/OOK remote
//! controls, compatible with cheap transmitter/receiver pairs like the FS1000A
//! and XY-MK-5V.
//!
//! The crate covers the bit-level timing protocol only:
//! - an [`Encoder`](encoder::Encoder) that keys the transmitter through a
//!   telegram of pulse-width coded bits using `embedded-hal` pins and delays
//! - a [`Decoder`](decoder::Decoder) that classifies measured pulse durations
//!   and assembles validated address/command frames
//! - a [`Remote`](remote::Remote) tying five debounced keys to the encoder
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` support and replaces `heapless::Vec`s with
//! `std::vec::Vec`s |
//! | `delay-loop`          | Adds `PolledPulseSource`, which measures pulses by polling an `InputPin` |
//! | `wake-isr` (default)  | Adds the `critical_section` based wake latch for pin-change interrupts |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Wire format
//!
//! | Symbol | Burst      | Space      |
//! |--------|------------|------------|
//! | 0      | `2 × ERR`  | `2 × ERR`  |
//! | 1      | `4 × ERR`  | `4 × ERR`  |
//! | start  | `6 × ERR`  | `6 × ERR`  |
//! | stop   | none       | `≥ 8 × ERR`|
//!
//! A telegram is a preamble of zero-bits followed by the same frame repeated:
//! start pulses, address, command and inverted command, MSB first, then the
//! stop gap. See [`telegram`] for the layout and [`profile`] for the timing.
//!
//! ## Usage
//!
//! Transmitter side, once per wake-up:
//!
//! ```rust,ignore
//! use remote433::keypad::{CommandRegistry, Keypad};
//! use remote433::profile::TimingProfile;
//! use remote433::remote::Remote;
//!
//! remote433::init_wake_latch!();
//!
//! let keypad = Keypad::new([k1, k2, k3, k4, k5], None);
//! let mut remote = Remote::new(tx, delay, keypad, CommandRegistry::default(), TimingProfile::new());
//! loop {
//!     remote.run_once(&WAKE_LATCH);
//!     sleep();
//! }
//! ```
//!
//! Receiver side:
//!
//! ```rust,ignore
//! use remote433::decoder::Decoder;
//! use remote433::pulse::PolledPulseSource;
//!
//! let source = PolledPulseSource::new(rx, delay, 10, None);
//! let mut decoder = Decoder::new(source, TimingProfile::new())?;
//! loop {
//!     if let Ok(frame) = decoder.listen(3) {
//!         // frame.address, frame.command
//!     }
//! }
//! ```
//!
//! ## Integration Notes
//!
//! - ERR, the start bit count and the byte layout must match on both ends. A
//!   mismatch is not detectable on the wire; it only shows up as persistent
//!   `NoStart` or `Incomplete` results.
//! - Timing precision matters on the transmit side; use a delay calibrated to
//!   the core clock.
//! - Every receive failure is routine. Keep calling the decoder.
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "wake-isr")]
pub use critical_section;

#[cfg(not(feature = "std"))]
pub use heapless;

pub(crate) mod fmt;

pub mod consts;
pub mod decoder;
pub mod encoder;
#[cfg(feature = "wake-isr")]
pub mod event;
pub mod frame;
pub mod keypad;
pub mod profile;
pub mod pulse;
pub mod remote;
pub mod telegram;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use frame::{Frame, ReceiveError};
pub use profile::TimingProfile;
