//! Radio Command Descriptors
//!
//! Setup, frequency-synthesis and transmit command records handed to the
//! radio driver, the scheduling parameters applied to them, and the raw
//! event/status codes the driver reports back.
//!
//! The core fills in two transmit fields (payload and its length) and
//! reads back two values (the termination event mask returned by the
//! driver and the status word written into the descriptor).

use crate::config::{SYNTH_FRACT_FREQ, SYNTH_FREQUENCY_MHZ};

/// Bit mask returned by the driver when a scheduled command's wait ends
pub type EventMask = u64;

/// Termination event bits
pub mod event {
    use super::EventMask;

    /// A radio operation command finished
    pub const CMD_DONE: EventMask = 1 << 0;
    /// A stand-alone command or the last command in a chain finished
    pub const LAST_CMD_DONE: EventMask = 1 << 1;
    /// A foreground command finished
    pub const FG_CMD_DONE: EventMask = 1 << 2;
    /// The last foreground command in a chain finished
    pub const LAST_FG_CMD_DONE: EventMask = 1 << 3;
    /// Graceful termination requested by a cancel/flush
    pub const CMD_STOPPED: EventMask = 1 << 61;
    /// Cancelled before it was started
    pub const CMD_CANCELLED: EventMask = 1 << 62;
    /// Abrupt termination requested by a cancel/flush
    pub const CMD_ABORTED: EventMask = 1 << 63;
}

/// Command status words written into the descriptor
pub mod status {
    /// Not yet submitted
    pub const IDLE: u16 = 0x0000;
    /// Running
    pub const ACTIVE: u16 = 0x0002;
    /// Generic command finished normally (FS)
    pub const DONE_OK: u16 = 0x0400;
    /// Generic command saw an illegal parameter (FS)
    pub const ERROR_PAR: u16 = 0x0800;

    /// Packet transmitted successfully
    pub const IEEE_DONE_OK: u16 = 0x2400;
    /// CMD_STOP received while transmitting; packet finished
    pub const IEEE_DONE_STOPPED: u16 = 0x2402;
    /// CMD_ABORT received while transmitting
    pub const IEEE_DONE_ABORT: u16 = 0x2403;
    /// Illegal parameter
    pub const IEEE_ERROR_PAR: u16 = 0x2800;
    /// Sent without a radio setup command
    pub const IEEE_ERROR_NO_SETUP: u16 = 0x2801;
    /// Sent without the synthesizer being programmed
    pub const IEEE_ERROR_NO_FS: u16 = 0x2802;
    /// TX underflow during operation
    pub const IEEE_ERROR_TXUNF: u16 = 0x2805;
}

/// PHY the radio is configured for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadioMode {
    /// IEEE 802.15.4, 250 kbps O-QPSK, 2.4 GHz
    Ieee802154,
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Ieee802154 => defmt::write!(f, "IEEE 802.15.4"),
        }
    }
}

/// Radio setup command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadioSetup {
    /// PHY mode
    pub mode: RadioMode,
    /// LO divider (0 for 2.4 GHz)
    pub lo_divider: u8,
    /// Differential RF front end
    pub differential: bool,
    /// External bias resistor
    pub external_bias: bool,
    /// Analog configuration mode
    pub analog_cfg_mode: u8,
    /// Skip powering the synthesizer up during setup
    pub no_fs_power_up: bool,
}

impl RadioSetup {
    /// IEEE 802.15.4 setup for a differential front end with external bias
    pub const IEEE_802_15_4: Self = Self {
        mode: RadioMode::Ieee802154,
        lo_divider: 0,
        differential: true,
        external_bias: true,
        analog_cfg_mode: 0,
        no_fs_power_up: false,
    };
}

impl Default for RadioSetup {
    fn default() -> Self {
        Self::IEEE_802_15_4
    }
}

/// Frequency synthesizer programming command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FsCommand {
    /// Integer part of the frequency in MHz
    pub frequency_mhz: u16,
    /// Fractional part in 1/65536 MHz
    pub fract_freq: u16,
    /// Program the synthesizer for TX rather than RX
    pub tx_mode: bool,
    /// Status written by the driver
    pub status: u16,
}

impl FsCommand {
    /// Create an FS command
    #[must_use]
    pub const fn new(frequency_mhz: u16, fract_freq: u16) -> Self {
        Self {
            frequency_mhz,
            fract_freq,
            tx_mode: false,
            status: status::IDLE,
        }
    }

    /// Frequency in kHz, rounding the fractional part down
    #[must_use]
    pub const fn frequency_khz(&self) -> u32 {
        self.frequency_mhz as u32 * 1000 + (self.fract_freq as u32 * 1000) / 65_536
    }

    /// Reset the status word before resubmission
    pub fn reset(&mut self) {
        self.status = status::IDLE;
    }
}

impl Default for FsCommand {
    fn default() -> Self {
        Self::new(SYNTH_FREQUENCY_MHZ, SYNTH_FRACT_FREQ)
    }
}

/// Transmit framing options
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TxOptions {
    /// Payload already carries the PHY header
    pub include_phy_header: bool,
    /// Payload already carries the CRC
    pub include_crc: bool,
}

/// IEEE 802.15.4 transmit command
///
/// Started immediately on submission; the driver writes `status`
/// before its wait returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TxCommand<'a> {
    /// Framing options
    pub options: TxOptions,
    /// Payload bytes
    pub payload: &'a [u8],
    /// Status written by the driver
    pub status: u16,
}

impl<'a> TxCommand<'a> {
    /// Create a transmit command for a payload
    #[must_use]
    pub const fn new(payload: &'a [u8], options: TxOptions) -> Self {
        Self {
            options,
            payload,
            status: status::IDLE,
        }
    }

    /// Payload length in bytes
    #[must_use]
    pub const fn payload_len(&self) -> usize {
        self.payload.len()
    }
}

/// Scheduling policy applied to every command of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleParams {
    /// Absolute radio time to start at, `None` for as soon as possible
    pub start_time: Option<u32>,
    /// Allow the driver to delay the start arbitrarily
    pub allow_delay: bool,
    /// Absolute radio time to end by, `None` to run until done
    pub end_time: Option<u32>,
}

impl ScheduleParams {
    /// Start as soon as possible, no deadline, best effort
    pub const IMMEDIATE: Self = Self {
        start_time: None,
        allow_delay: true,
        end_time: None,
    };
}

impl Default for ScheduleParams {
    fn default() -> Self {
        Self::IMMEDIATE
    }
}
