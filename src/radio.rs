//! Radio Control Logic
//!
//! Command descriptors, outcome classification, the scoped radio session
//! and the burst state machine that ties them together.

pub mod command;
pub mod outcome;
pub mod session;
pub mod state;
pub mod transmit;

pub use outcome::{BurstReport, CommandStatus, TerminationReason, TransmitOutcome};
pub use session::{RadioSession, RfCore};
pub use state::{BurstController, BurstState};
pub use transmit::TransmissionScheduler;
