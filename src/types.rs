//! Shared types used across the firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

use crate::config::{PAYLOAD_LENGTH, SEQUENCE_FIELD_LEN};

/// Transmit power setting in dBm
///
/// Only values present in the active calibration table are ever held by
/// the power controller; the type itself accepts any `i8`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PowerLevel(i8);

impl PowerLevel {
    /// Create a power level from dBm
    #[must_use]
    pub const fn from_dbm(dbm: i8) -> Self {
        Self(dbm)
    }

    /// Get the power level in dBm
    #[must_use]
    pub const fn as_dbm(self) -> i8 {
        self.0
    }

    /// Byte written into the packet payload for this level
    ///
    /// Two's complement reinterpretation, so -3 dBm becomes `0xFD`.
    #[must_use]
    pub const fn raw_byte(self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Debug for PowerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PowerLevel({} dBm)", self.0)
    }
}

impl fmt::Display for PowerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} dBm", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PowerLevel {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} dBm", self.0);
    }
}

/// Requested power step, derived from one button sample
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Adjustment {
    /// Step to the next higher supported level
    Increase,
    /// Step to the next lower supported level
    Decrease,
    /// Leave the level unchanged
    #[default]
    None,
}

impl Adjustment {
    /// Resolve a latched button sample into a single step
    ///
    /// Decrease is checked first, so holding both buttons steps down.
    #[must_use]
    pub const fn from_buttons(event: ButtonEvent) -> Self {
        if event.down {
            Self::Decrease
        } else if event.up {
            Self::Increase
        } else {
            Self::None
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Adjustment {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Increase => defmt::write!(f, "UP"),
            Self::Decrease => defmt::write!(f, "DOWN"),
            Self::None => defmt::write!(f, "-"),
        }
    }
}

/// Debounced observation of the two adjustment buttons
///
/// A flag is set when its button was held at any point between press
/// detection and full release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ButtonEvent {
    /// Increase button (right) was pressed
    pub up: bool,
    /// Decrease button (left) was pressed
    pub down: bool,
}

impl ButtonEvent {
    /// No button latched
    pub const NONE: Self = Self::new(false, false);

    /// Create a button observation
    #[must_use]
    pub const fn new(up: bool, down: bool) -> Self {
        Self { up, down }
    }

    /// Check if both buttons were latched
    #[must_use]
    pub const fn is_both(&self) -> bool {
        self.up && self.down
    }

    /// Check if any button was latched
    #[must_use]
    pub const fn is_any(&self) -> bool {
        self.up || self.down
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ButtonEvent {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Buttons(up={}, down={})", self.up, self.down);
    }
}

/// Process-wide packet sequence counter
///
/// Persists across bursts and wraps modulo 2^16.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SequenceCounter(u16);

impl SequenceCounter {
    /// Create a counter whose next value is `start`
    #[must_use]
    pub const fn new(start: u16) -> Self {
        Self(start)
    }

    /// Value the next call to [`Self::next_value`] will return
    #[must_use]
    pub const fn peek(&self) -> u16 {
        self.0
    }

    /// Take the current value and advance, wrapping 65535 to 0
    pub fn next_value(&mut self) -> u16 {
        let value = self.0;
        self.0 = self.0.wrapping_add(1);
        value
    }
}

/// Fixed-length packet payload
///
/// Bytes 0..2 carry the big-endian sequence number, the rest are filled
/// with the raw byte of the TX power used for the burst.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    buf: [u8; PAYLOAD_LENGTH],
}

impl Packet {
    /// Create an all-zero packet
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: [0; PAYLOAD_LENGTH],
        }
    }

    /// Rewrite the payload for the next transmit attempt
    pub fn fill(&mut self, sequence: u16, level: PowerLevel) {
        self.buf[..SEQUENCE_FIELD_LEN].copy_from_slice(&sequence.to_be_bytes());
        self.buf[SEQUENCE_FIELD_LEN..].fill(level.raw_byte());
    }

    /// Sequence number stored in the header
    #[must_use]
    pub const fn sequence(&self) -> u16 {
        u16::from_be_bytes([self.buf[0], self.buf[1]])
    }

    /// Payload bytes after the sequence number
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.buf[SEQUENCE_FIELD_LEN..]
    }

    /// Whole payload as handed to the radio
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Payload length in bytes
    #[must_use]
    pub const fn len(&self) -> usize {
        PAYLOAD_LENGTH
    }

    /// Always false; packets have a fixed non-zero length
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl Default for Packet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Packet(seq={}, fill={:#04x})", self.sequence(), self.buf[SEQUENCE_FIELD_LEN])
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Packet {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Packet(seq={}, fill={=u8:#x})", self.sequence(), self.buf[SEQUENCE_FIELD_LEN]);
    }
}

/// Indicator LED state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LedState {
    /// LED is off
    #[default]
    Off,
    /// LED is on
    On,
}

impl LedState {
    /// Toggle the LED state
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }

    /// Build from a pin level
    #[must_use]
    pub const fn from_high(high: bool) -> Self {
        if high {
            Self::On
        } else {
            Self::Off
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for LedState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Off => defmt::write!(f, "OFF"),
            Self::On => defmt::write!(f, "ON"),
        }
    }
}
