//! Transmit Control
//!
//! Issues transmit commands against a synthesized radio session and
//! classifies each outcome.

use super::command::{TxCommand, TxOptions};
use super::outcome::{CommandStatus, TerminationReason, TransmitOutcome};
use super::session::{RadioSession, RfCore};
use crate::error::RadioResult;

/// Transmit command issuer for one session
///
/// Obtained from [`RadioSession::schedule_frequency_synthesis`], so the
/// synthesizer is always programmed before the first packet. Every
/// command starts as soon as possible, has no deadline, and is awaited
/// until it terminates.
pub struct TransmissionScheduler<'s, 'r, R: RfCore> {
    session: &'s mut RadioSession<'r, R>,
    options: TxOptions,
    attempts: u32,
}

impl<'s, 'r, R: RfCore> TransmissionScheduler<'s, 'r, R> {
    pub(crate) fn new(session: &'s mut RadioSession<'r, R>) -> Self {
        Self {
            session,
            options: TxOptions::default(),
            attempts: 0,
        }
    }

    /// Transmit attempts issued so far
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Framing options applied to every packet
    #[must_use]
    pub const fn options(&self) -> TxOptions {
        self.options
    }

    /// Send one payload and classify how it ended
    ///
    /// Any of the known termination reasons and statuses is returned as an
    /// outcome; a value outside either set is a fatal fault.
    pub async fn transmit(&mut self, payload: &[u8]) -> RadioResult<TransmitOutcome> {
        let mut cmd = TxCommand::new(payload, self.options);
        self.attempts = self.attempts.wrapping_add(1);

        let mask = self.session.run_tx(&mut cmd).await;
        let outcome = TransmitOutcome::classify(mask, cmd.status)?;

        if outcome.reason != TerminationReason::Completed {
            warn!("tx {} terminated: {:?}", self.attempts, outcome.reason);
        }
        if outcome.status != CommandStatus::Ok {
            warn!("tx {} status: {:?}", self.attempts, outcome.status);
        }
        trace!("tx {} -> {:?}", self.attempts, outcome);

        Ok(outcome)
    }

    /// Power the radio down until the next command
    pub fn yield_radio(&mut self) {
        self.session.yield_radio();
    }
}
