//! Fatal fault types
//!
//! Anything that lands here ends the burst loop. Expected radio outcomes
//! (the closed termination/status sets) are never errors; see
//! [`crate::radio::outcome`].

use core::fmt;

use crate::types::PowerLevel;

/// Unrecoverable radio or configuration fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioFault {
    /// Radio peripheral could not be acquired
    AcquireFailed,
    /// Driver rejected the calibration entry for the session
    TxPowerRejected,
    /// Power level has no calibration table entry
    PowerNotCalibrated(PowerLevel),
    /// Calibration table is empty, unsorted, or misses the allowed range
    InvalidCalibration,
    /// Command wait ended with an event mask outside the known set
    UnrecognizedTermination(u64),
    /// Command descriptor reported a status outside the known set
    UnrecognizedStatus(u16),
}

impl RadioFault {
    /// Get error code
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::AcquireFailed => 0x0001,
            Self::TxPowerRejected => 0x0002,
            Self::PowerNotCalibrated(_) => 0x0010,
            Self::InvalidCalibration => 0x0011,
            Self::UnrecognizedTermination(_) => 0x0020,
            Self::UnrecognizedStatus(_) => 0x0021,
        }
    }

    /// True for the "unrecognized hardware outcome" faults
    #[must_use]
    pub const fn is_hardware_outcome(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedTermination(_) | Self::UnrecognizedStatus(_)
        )
    }
}

impl fmt::Display for RadioFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AcquireFailed => write!(f, "radio peripheral could not be acquired"),
            Self::TxPowerRejected => write!(f, "radio rejected TX power entry"),
            Self::PowerNotCalibrated(level) => {
                write!(f, "no calibration entry for {level}")
            }
            Self::InvalidCalibration => write!(f, "invalid TX power calibration table"),
            Self::UnrecognizedTermination(mask) => {
                write!(f, "unrecognized termination event mask {mask:#018x}")
            }
            Self::UnrecognizedStatus(status) => {
                write!(f, "unrecognized command status {status:#06x}")
            }
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioFault {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::AcquireFailed => defmt::write!(f, "AcquireFailed"),
            Self::TxPowerRejected => defmt::write!(f, "TxPowerRejected"),
            Self::PowerNotCalibrated(level) => defmt::write!(f, "PowerNotCalibrated({})", level),
            Self::InvalidCalibration => defmt::write!(f, "InvalidCalibration"),
            Self::UnrecognizedTermination(mask) => {
                defmt::write!(f, "UnrecognizedTermination({=u64:#x})", mask);
            }
            Self::UnrecognizedStatus(status) => {
                defmt::write!(f, "UnrecognizedStatus({=u16:#x})", status);
            }
        }
    }
}

/// Result alias for fallible radio operations
pub type RadioResult<T> = Result<T, RadioFault>;
