//! Transmit Outcome Classification
//!
//! Two closed enumerations describe a finished command: how the wait for
//! it ended ([`TerminationReason`]) and what the hardware did
//! ([`CommandStatus`]). Both are checked, because a normally completed
//! wait can still carry an error status such as a TX underflow. Any raw
//! value outside either set is a fatal [`RadioFault`].

use heapless::Vec;

use super::command::{event, status, EventMask};
use crate::config::MAX_BURST_LENGTH;
use crate::error::{RadioFault, RadioResult};
use crate::types::PowerLevel;

/// Why a scheduled command's wait returned
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// Stand-alone command, or the last of a chain, finished
    Completed,
    /// Cancelled before it started
    CancelledBeforeStart,
    /// Abruptly aborted
    AbortedAbruptly,
    /// Gracefully stopped
    StoppedGracefully,
    /// Last foreground command finished
    CompletedAsLastForeground,
}

impl TerminationReason {
    /// Number of variants
    pub const COUNT: usize = 5;

    /// All variants in index order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Completed,
        Self::CancelledBeforeStart,
        Self::AbortedAbruptly,
        Self::StoppedGracefully,
        Self::CompletedAsLastForeground,
    ];

    /// Event mask that maps to this reason
    #[must_use]
    pub const fn event_mask(self) -> EventMask {
        match self {
            Self::Completed => event::LAST_CMD_DONE,
            Self::CancelledBeforeStart => event::CMD_CANCELLED,
            Self::AbortedAbruptly => event::CMD_ABORTED,
            Self::StoppedGracefully => event::CMD_STOPPED,
            Self::CompletedAsLastForeground => event::LAST_FG_CMD_DONE,
        }
    }

    /// Stable index for counters
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<EventMask> for TerminationReason {
    type Error = RadioFault;

    /// Exact-match the mask; combined or unknown bits are rejected
    fn try_from(mask: EventMask) -> Result<Self, Self::Error> {
        match mask {
            event::LAST_CMD_DONE => Ok(Self::Completed),
            event::CMD_CANCELLED => Ok(Self::CancelledBeforeStart),
            event::CMD_ABORTED => Ok(Self::AbortedAbruptly),
            event::CMD_STOPPED => Ok(Self::StoppedGracefully),
            event::LAST_FG_CMD_DONE => Ok(Self::CompletedAsLastForeground),
            other => Err(RadioFault::UnrecognizedTermination(other)),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TerminationReason {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Completed => defmt::write!(f, "LastCmdDone"),
            Self::CancelledBeforeStart => defmt::write!(f, "Cancelled"),
            Self::AbortedAbruptly => defmt::write!(f, "Aborted"),
            Self::StoppedGracefully => defmt::write!(f, "Stopped"),
            Self::CompletedAsLastForeground => defmt::write!(f, "LastFgCmdDone"),
        }
    }
}

/// What the transmit command reported in its status word
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandStatus {
    /// Packet transmitted
    Ok,
    /// Stop received while transmitting; packet completed
    StoppedWhileTransmitting,
    /// Abort received while transmitting
    AbortedWhileTransmitting,
    /// Illegal parameter
    IllegalParameter,
    /// No radio setup
    MissingRadioSetup,
    /// Synthesizer not programmed
    MissingFrequencySetup,
    /// TX underflow
    TxUnderflow,
}

impl CommandStatus {
    /// Number of variants
    pub const COUNT: usize = 7;

    /// All variants in index order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Ok,
        Self::StoppedWhileTransmitting,
        Self::AbortedWhileTransmitting,
        Self::IllegalParameter,
        Self::MissingRadioSetup,
        Self::MissingFrequencySetup,
        Self::TxUnderflow,
    ];

    /// Status word that maps to this status
    #[must_use]
    pub const fn raw(self) -> u16 {
        match self {
            Self::Ok => status::IEEE_DONE_OK,
            Self::StoppedWhileTransmitting => status::IEEE_DONE_STOPPED,
            Self::AbortedWhileTransmitting => status::IEEE_DONE_ABORT,
            Self::IllegalParameter => status::IEEE_ERROR_PAR,
            Self::MissingRadioSetup => status::IEEE_ERROR_NO_SETUP,
            Self::MissingFrequencySetup => status::IEEE_ERROR_NO_FS,
            Self::TxUnderflow => status::IEEE_ERROR_TXUNF,
        }
    }

    /// Stable index for counters
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Check if the packet left the antenna intact
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl TryFrom<u16> for CommandStatus {
    type Error = RadioFault;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        match raw {
            status::IEEE_DONE_OK => Ok(Self::Ok),
            status::IEEE_DONE_STOPPED => Ok(Self::StoppedWhileTransmitting),
            status::IEEE_DONE_ABORT => Ok(Self::AbortedWhileTransmitting),
            status::IEEE_ERROR_PAR => Ok(Self::IllegalParameter),
            status::IEEE_ERROR_NO_SETUP => Ok(Self::MissingRadioSetup),
            status::IEEE_ERROR_NO_FS => Ok(Self::MissingFrequencySetup),
            status::IEEE_ERROR_TXUNF => Ok(Self::TxUnderflow),
            other => Err(RadioFault::UnrecognizedStatus(other)),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for CommandStatus {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Ok => defmt::write!(f, "DONE_OK"),
            Self::StoppedWhileTransmitting => defmt::write!(f, "DONE_STOPPED"),
            Self::AbortedWhileTransmitting => defmt::write!(f, "DONE_ABORT"),
            Self::IllegalParameter => defmt::write!(f, "ERROR_PAR"),
            Self::MissingRadioSetup => defmt::write!(f, "ERROR_NO_SETUP"),
            Self::MissingFrequencySetup => defmt::write!(f, "ERROR_NO_FS"),
            Self::TxUnderflow => defmt::write!(f, "ERROR_TXUNF"),
        }
    }
}

/// Classified result of one transmit attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransmitOutcome {
    /// How the wait ended
    pub reason: TerminationReason,
    /// What the hardware reported
    pub status: CommandStatus,
}

impl TransmitOutcome {
    /// Normal completion with a clean status
    pub const DELIVERED: Self = Self {
        reason: TerminationReason::Completed,
        status: CommandStatus::Ok,
    };

    /// Classify raw driver values
    ///
    /// The termination mask is checked first, so a pair with both values
    /// unknown reports the termination fault.
    pub fn classify(mask: EventMask, raw_status: u16) -> RadioResult<Self> {
        let reason = TerminationReason::try_from(mask)?;
        let status = CommandStatus::try_from(raw_status)?;
        Ok(Self { reason, status })
    }

    /// Check if this is a clean normal completion
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        *self == Self::DELIVERED
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TransmitOutcome {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}/{}", self.reason, self.status);
    }
}

/// Outcome log of one burst
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BurstReport {
    power: PowerLevel,
    first_sequence: u16,
    outcomes: Vec<TransmitOutcome, MAX_BURST_LENGTH>,
}

impl BurstReport {
    /// Start an empty report
    #[must_use]
    pub const fn new(power: PowerLevel, first_sequence: u16) -> Self {
        Self {
            power,
            first_sequence,
            outcomes: Vec::new(),
        }
    }

    /// Append an outcome; attempts beyond capacity are not stored
    pub fn record(&mut self, outcome: TransmitOutcome) {
        if self.outcomes.push(outcome).is_err() {
            warn!("burst report full, outcome dropped");
        }
    }

    /// Power level used for the whole burst
    #[must_use]
    pub const fn power(&self) -> PowerLevel {
        self.power
    }

    /// Sequence number of the first packet
    #[must_use]
    pub const fn first_sequence(&self) -> u16 {
        self.first_sequence
    }

    /// Attempts recorded
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.outcomes.len()
    }

    /// Recorded outcomes in transmit order
    #[must_use]
    pub fn outcomes(&self) -> &[TransmitOutcome] {
        &self.outcomes
    }

    /// Attempts that ended with `reason`
    #[must_use]
    pub fn count_reason(&self, reason: TerminationReason) -> usize {
        self.outcomes.iter().filter(|o| o.reason == reason).count()
    }

    /// Attempts that reported `status`
    #[must_use]
    pub fn count_status(&self, status: CommandStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Per-reason counters, indexed by [`TerminationReason::index`]
    #[must_use]
    pub fn reason_histogram(&self) -> [usize; TerminationReason::COUNT] {
        let mut counts = [0; TerminationReason::COUNT];
        for outcome in &self.outcomes {
            counts[outcome.reason.index()] += 1;
        }
        counts
    }

    /// Per-status counters, indexed by [`CommandStatus::index`]
    #[must_use]
    pub fn status_histogram(&self) -> [usize; CommandStatus::COUNT] {
        let mut counts = [0; CommandStatus::COUNT];
        for outcome in &self.outcomes {
            counts[outcome.status.index()] += 1;
        }
        counts
    }

    /// Check if every attempt was a clean completion
    #[must_use]
    pub fn all_delivered(&self) -> bool {
        self.outcomes.iter().all(TransmitOutcome::is_delivered)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for BurstReport {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Burst(pwr={}, seq={}.., sent={}, ok={})",
            self.power,
            self.first_sequence,
            self.outcomes.len(),
            self.count_status(CommandStatus::Ok)
        );
    }
}
