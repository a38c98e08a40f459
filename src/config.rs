//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the packet transmitter.
//! Packet layout, burst timing, button handling and the TX power window are
//! centralized here, together with the runtime [`BurstConfig`] record.

/// Payload length of every transmitted packet in bytes
pub const PAYLOAD_LENGTH: usize = 30;

/// Bytes at the start of the payload holding the big-endian sequence number
pub const SEQUENCE_FIELD_LEN: usize = 2;

/// Packets sent per radio session
pub const BURST_LENGTH: u16 = 10;

/// Upper bound on a configured burst (sizes the per-burst outcome log)
pub const MAX_BURST_LENGTH: usize = 32;

/// Delay after each packet in microseconds (200 ms)
pub const PACKET_INTERVAL_US: u32 = 200_000;

/// Delay after each packet when measuring current draw, in seconds
pub const POWER_MEASUREMENT_INTERVAL_S: u32 = 5;

/// Button debounce time in milliseconds
pub const BUTTON_DEBOUNCE_MS: u32 = 10;

/// Button polling period while waiting for press/release, in microseconds
pub const BUTTON_POLL_US: u32 = 1_000;

/// Lowest TX power the buttons can select (dBm)
pub const TX_POWER_MIN_DBM: i8 = 0;

/// Highest TX power the buttons can select (dBm)
pub const TX_POWER_MAX_DBM: i8 = 20;

/// TX power at startup (dBm)
pub const DEFAULT_TX_POWER_DBM: i8 = 0;

/// Synthesizer frequency programmed by the FS command (MHz)
pub const SYNTH_FREQUENCY_MHZ: u16 = 0x096F;

/// Fractional part of the synthesizer frequency (1/65536 MHz)
pub const SYNTH_FRACT_FREQ: u16 = 0x0000;

/// First sequence number after reset
pub const SEQUENCE_START: u16 = 0;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments for the nRF52840-DK

    /// LED1: lit while the Decrease button is held
    pub const LED_DOWN: &str = "P0.13";

    /// LED2: lit while the Increase button is held
    pub const LED_UP: &str = "P0.14";

    /// LED3: toggled after every transmit attempt
    pub const LED_ACTIVITY: &str = "P0.15";

    /// LED4: lit when the transmitter halts on a fault
    pub const LED_FAULT: &str = "P0.16";

    /// Left button, TX power down (active low)
    pub const BUTTON_LEFT: &str = "P0.11";

    /// Right button, TX power up (active low)
    pub const BUTTON_RIGHT: &str = "P0.12";
}

/// Runtime burst parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BurstConfig {
    /// Transmit attempts per session (clamped to [`MAX_BURST_LENGTH`])
    pub burst_length: u16,
    /// Delay after every transmit attempt in microseconds
    pub packet_interval_us: u32,
    /// Toggle the activity indicator after every attempt
    pub toggle_indicator: bool,
}

impl BurstConfig {
    /// Standard operation: 10 packets, 200 ms apart, LED blinking
    #[must_use]
    pub const fn new() -> Self {
        Self {
            burst_length: BURST_LENGTH,
            packet_interval_us: PACKET_INTERVAL_US,
            toggle_indicator: true,
        }
    }

    /// Current measurement: 5 s between packets and the LED left dark
    #[must_use]
    pub const fn power_measurement() -> Self {
        Self {
            burst_length: BURST_LENGTH,
            packet_interval_us: POWER_MEASUREMENT_INTERVAL_S * 1_000_000,
            toggle_indicator: false,
        }
    }

    /// Configuration selected by the `power-measurement` build feature
    #[must_use]
    pub const fn active() -> Self {
        if cfg!(feature = "power-measurement") {
            Self::power_measurement()
        } else {
            Self::new()
        }
    }

    /// Override the burst length (returns new config)
    #[must_use]
    pub const fn with_burst_length(self, burst_length: u16) -> Self {
        Self {
            burst_length,
            ..self
        }
    }

    /// Override the packet interval (returns new config)
    #[must_use]
    pub const fn with_packet_interval_us(self, packet_interval_us: u32) -> Self {
        Self {
            packet_interval_us,
            ..self
        }
    }

    /// Effective burst length after clamping
    #[must_use]
    pub const fn effective_burst_length(&self) -> u16 {
        if self.burst_length as usize > MAX_BURST_LENGTH {
            MAX_BURST_LENGTH as u16
        } else {
            self.burst_length
        }
    }
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self::active()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for BurstConfig {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Burst({} pkts, {}us, led={})",
            self.burst_length,
            self.packet_interval_us,
            self.toggle_indicator
        );
    }
}
