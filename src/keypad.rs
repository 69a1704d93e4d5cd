//! Buttons and the command registry.
//!
//! A remote has five keys. Each maps to one command byte, and every command
//! from one physical remote carries the same device address. The mapping is
//! fixed when the firmware is built or initialized and never changes at run
//! time.

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

use crate::consts::{DEFAULT_ADDRESS, DEFAULT_COMMANDS};

/// Number of keys on the remote.
pub const KEY_COUNT: usize = 5;

/// A physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Key {
    /// KEY1
    Key1,
    /// KEY2
    Key2,
    /// KEY3
    Key3,
    /// KEY4
    Key4,
    /// KEY5
    Key5,
}

impl Key {
    /// All keys in scan order.
    pub const ALL: [Key; KEY_COUNT] = [Key::Key1, Key::Key2, Key::Key3, Key::Key4, Key::Key5];

    /// Zero-based position of the key.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KEY{}", self.index() + 1)
    }
}

/// Maps keys to command bytes for one device address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct CommandRegistry {
    address: u8,
    commands: [u8; KEY_COUNT],
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS, DEFAULT_COMMANDS)
    }
}

impl CommandRegistry {
    /// A registry sending `commands[n]` for key `n + 1` from `address`.
    pub const fn new(address: u8, commands: [u8; KEY_COUNT]) -> Self {
        Self { address, commands }
    }

    /// The device address.
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// The command byte for `key`.
    pub const fn command(&self, key: Key) -> u8 {
        self.commands[key.index()]
    }

    /// The key mapped to `command`, if any.
    pub fn key(&self, command: u8) -> Option<Key> {
        Key::ALL
            .into_iter()
            .find(|&key| self.command(key) == command)
    }
}

/// Five push buttons read through input pins.
///
/// Buttons are active low by default (pin pulled up, switch to ground). When
/// several keys are held, the lowest numbered one wins.
#[derive(Debug)]
pub struct Keypad<B>
where
    B: InputPin,
{
    buttons: [B; KEY_COUNT],
    active_low: bool,
}

impl<B> Keypad<B>
where
    B: InputPin,
{
    /// Creates a keypad from the KEY1..KEY5 pins.
    ///
    /// # Arguments
    /// - `buttons`: One pin per key, KEY1 first.
    /// - `active_low`: Whether a pressed key reads low. Defaults to `true`.
    pub fn new(buttons: [B; KEY_COUNT], active_low: Option<bool>) -> Self {
        Self {
            buttons,
            active_low: active_low.unwrap_or(true),
        }
    }

    /// Returns the pins.
    pub fn release(self) -> [B; KEY_COUNT] {
        self.buttons
    }

    fn pressed(&mut self, key: Key) -> bool {
        let button = &mut self.buttons[key.index()];
        // A failed read counts as released.
        if self.active_low {
            button.is_low().unwrap_or(false)
        } else {
            button.is_high().unwrap_or(false)
        }
    }

    /// Returns the first pressed key, reading pins in KEY1..KEY5 order and
    /// stopping at the first hit.
    pub fn scan(&mut self) -> Option<Key> {
        Key::ALL.into_iter().find(|&key| self.pressed(key))
    }

    /// Scans twice, `settle_ms` apart, and returns the key only if both scans
    /// agree.
    pub fn debounced<D: DelayNs>(&mut self, delay: &mut D, settle_ms: u32) -> Option<Key> {
        let first = self.scan()?;
        delay.delay_ms(settle_ms);
        match self.scan() {
            Some(second) if second == first => Some(first),
            _ => None,
        }
    }
}
