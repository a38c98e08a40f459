//! Radio Session
//!
//! Exclusive, scoped ownership of the radio peripheral for one burst.
//!
//! [`RadioSession`] mutably borrows the driver, so at most one session
//! can exist at a time, and releases the peripheral in `Drop`, so every
//! exit from a burst (including `?` on a fatal fault) closes it exactly
//! once. Transmit access is only handed out after frequency synthesis has
//! been scheduled on the session.

use super::command::{EventMask, FsCommand, RadioSetup, ScheduleParams, TxCommand};
use super::outcome::TerminationReason;
use super::transmit::TransmissionScheduler;
use crate::error::RadioResult;

/// Radio peripheral capability
///
/// Implemented once per target radio. `run_fs` and `run_tx` suspend the
/// caller until the driver's wait for the command returns, and report the
/// termination event mask; `run_tx` also writes the command status into
/// the descriptor.
#[allow(async_fn_in_trait)]
pub trait RfCore {
    /// Calibration-table hardware setting this radio consumes
    type TxPowerSetting: Copy;

    /// Acquire the peripheral and apply the setup command
    fn open(&mut self, setup: &RadioSetup) -> RadioResult<()>;

    /// Program the PA for the session
    fn set_tx_power(&mut self, setting: Self::TxPowerSetting) -> RadioResult<()>;

    /// Schedule a frequency synthesizer command
    async fn run_fs(&mut self, cmd: &mut FsCommand, params: &ScheduleParams) -> EventMask;

    /// Schedule a transmit command and wait for it to terminate
    async fn run_tx(&mut self, cmd: &mut TxCommand<'_>, params: &ScheduleParams) -> EventMask;

    /// Let the radio power down until the next command
    fn yield_radio(&mut self);

    /// Release the peripheral
    fn close(&mut self);
}

/// Live handle to an open radio
pub struct RadioSession<'r, R: RfCore> {
    rf: &'r mut R,
    params: ScheduleParams,
}

impl<'r, R: RfCore> RadioSession<'r, R> {
    /// Acquire the radio and program the TX power for the session
    ///
    /// If the power setting is rejected the radio is released again
    /// before the fault is returned.
    pub fn open(
        rf: &'r mut R,
        setup: &RadioSetup,
        power: R::TxPowerSetting,
        params: ScheduleParams,
    ) -> RadioResult<Self> {
        rf.open(setup)?;
        debug!("radio session opened ({:?})", setup.mode);
        let mut session = Self { rf, params };
        session.rf.set_tx_power(power)?;
        Ok(session)
    }

    /// Scheduling policy of this session
    #[must_use]
    pub const fn params(&self) -> &ScheduleParams {
        &self.params
    }

    /// Program the operating frequency and unlock transmission
    ///
    /// Returns once the driver has accepted the command. An unknown
    /// termination mask is fatal.
    pub async fn schedule_frequency_synthesis(
        &mut self,
        fs: &mut FsCommand,
    ) -> RadioResult<TransmissionScheduler<'_, 'r, R>> {
        fs.reset();
        let mask = self.rf.run_fs(fs, &self.params).await;
        let reason = TerminationReason::try_from(mask)?;
        debug!(
            "synthesizer at {} kHz ({:?}, status {:#x})",
            fs.frequency_khz(),
            reason,
            fs.status
        );
        Ok(TransmissionScheduler::new(self))
    }

    pub(crate) async fn run_tx(&mut self, cmd: &mut TxCommand<'_>) -> EventMask {
        self.rf.run_tx(cmd, &self.params).await
    }

    pub(crate) fn yield_radio(&mut self) {
        self.rf.yield_radio();
    }

    /// Release the radio now
    pub fn close(self) {
        drop(self);
    }
}

impl<R: RfCore> Drop for RadioSession<'_, R> {
    fn drop(&mut self) {
        self.rf.close();
        debug!("radio session closed");
    }
}
