//! Burst State Machine
//!
//! Top-level driver of the transmitter:
//!
//! ```text
//! Idle → SamplingInput → AdjustingPower → OpeningSession
//!      → SynthesizingFrequency → TransmittingBurst → ClosingSession → Idle
//! ```
//!
//! The cycle repeats forever. A fatal fault leaves the loop in `Halted`;
//! the radio session is released on that path as on every other.

use embedded_hal::digital::StatefulOutputPin;
use embedded_hal_async::delay::DelayNs;

use super::command::{FsCommand, RadioSetup, ScheduleParams};
use super::outcome::BurstReport;
use super::session::{RadioSession, RfCore};
use crate::config::{BurstConfig, SEQUENCE_START};
use crate::error::{RadioFault, RadioResult};
use crate::input::ControlInput;
use crate::power::PowerLevelController;
use crate::types::{Adjustment, LedState, Packet, PowerLevel, SequenceCounter};

/// Burst controller state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BurstState {
    /// Between cycles
    #[default]
    Idle,
    /// Waiting for a button press and release
    SamplingInput,
    /// Applying the latched adjustment
    AdjustingPower,
    /// Acquiring the radio
    OpeningSession,
    /// Programming the synthesizer
    SynthesizingFrequency,
    /// Sending the packet burst
    TransmittingBurst,
    /// Releasing the radio
    ClosingSession,
    /// Stopped on a fatal fault
    Halted,
}

impl BurstState {
    /// Check if the radio is owned in this state
    #[must_use]
    pub const fn holds_radio(self) -> bool {
        matches!(
            self,
            Self::SynthesizingFrequency | Self::TransmittingBurst | Self::ClosingSession
        )
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for BurstState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Idle => defmt::write!(f, "IDLE"),
            Self::SamplingInput => defmt::write!(f, "SAMPLE"),
            Self::AdjustingPower => defmt::write!(f, "ADJUST"),
            Self::OpeningSession => defmt::write!(f, "OPEN"),
            Self::SynthesizingFrequency => defmt::write!(f, "FS"),
            Self::TransmittingBurst => defmt::write!(f, "TX"),
            Self::ClosingSession => defmt::write!(f, "CLOSE"),
            Self::Halted => defmt::write!(f, "HALT"),
        }
    }
}

/// Cyclic button → power → burst driver
pub struct BurstController<'t, R, I, A, D>
where
    R: RfCore,
{
    rf: R,
    input: I,
    activity: A,
    delay: D,
    power: PowerLevelController<'t, R::TxPowerSetting>,
    config: BurstConfig,
    setup: RadioSetup,
    fs: FsCommand,
    params: ScheduleParams,
    sequence: SequenceCounter,
    packet: Packet,
    state: BurstState,
    cycles: u32,
}

impl<'t, R, I, A, D> BurstController<'t, R, I, A, D>
where
    R: RfCore,
    I: ControlInput,
    A: StatefulOutputPin,
    D: DelayNs,
{
    /// Create a controller for the IEEE 802.15.4 setup
    pub fn new(
        rf: R,
        input: I,
        activity: A,
        delay: D,
        power: PowerLevelController<'t, R::TxPowerSetting>,
        config: BurstConfig,
    ) -> Self {
        Self {
            rf,
            input,
            activity,
            delay,
            power,
            config,
            setup: RadioSetup::default(),
            fs: FsCommand::default(),
            params: ScheduleParams::IMMEDIATE,
            sequence: SequenceCounter::new(SEQUENCE_START),
            packet: Packet::new(),
            state: BurstState::Idle,
            cycles: 0,
        }
    }

    /// Continue numbering from an existing counter (returns new controller)
    #[must_use]
    pub fn with_sequence(self, sequence: SequenceCounter) -> Self {
        Self { sequence, ..self }
    }

    /// Use a different synthesizer command (returns new controller)
    #[must_use]
    pub fn with_frequency(self, fs: FsCommand) -> Self {
        Self { fs, ..self }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> BurstState {
        self.state
    }

    /// Current TX power
    #[must_use]
    pub const fn power_level(&self) -> PowerLevel {
        self.power.current_level()
    }

    /// Sequence counter (next value to be sent)
    #[must_use]
    pub const fn sequence(&self) -> SequenceCounter {
        self.sequence
    }

    /// Completed cycles
    #[must_use]
    pub const fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Burst parameters
    #[must_use]
    pub const fn config(&self) -> BurstConfig {
        self.config
    }

    /// Radio driver
    #[must_use]
    pub const fn rf(&self) -> &R {
        &self.rf
    }

    /// Control input
    #[must_use]
    pub const fn input(&self) -> &I {
        &self.input
    }

    /// Activity indicator state
    pub fn activity_led(&mut self) -> LedState {
        LedState::from_high(self.activity.is_set_high().unwrap_or(false))
    }

    /// Run cycles until a fatal fault, and return it
    pub async fn run(&mut self) -> RadioFault {
        loop {
            if let Err(fault) = self.run_cycle().await {
                return fault;
            }
        }
    }

    /// Run one full Idle → Idle cycle
    ///
    /// Blocks on the control input, then sends one burst. Recoverable radio
    /// outcomes are collected in the returned report; a fatal fault stops
    /// the burst, releases the radio and leaves the controller `Halted`.
    pub async fn run_cycle(&mut self) -> RadioResult<BurstReport> {
        match self.cycle().await {
            Ok(report) => {
                Self::transition(&mut self.state, BurstState::Idle);
                self.cycles = self.cycles.wrapping_add(1);
                info!(
                    "burst done: {} pkts at {:?}, {} delivered",
                    report.attempts(),
                    report.power(),
                    report.outcomes().iter().filter(|o| o.is_delivered()).count()
                );
                Ok(report)
            }
            Err(fault) => {
                Self::transition(&mut self.state, BurstState::Halted);
                error!("fatal radio fault: {:?}", fault);
                Err(fault)
            }
        }
    }

    async fn cycle(&mut self) -> RadioResult<BurstReport> {
        Self::transition(&mut self.state, BurstState::SamplingInput);
        let buttons = self.input.sample().await;

        Self::transition(&mut self.state, BurstState::AdjustingPower);
        let level = self.power.adjust(Adjustment::from_buttons(buttons));
        self.input.clear_latch();
        let setting = self.power.to_hardware_index(level)?;

        Self::transition(&mut self.state, BurstState::OpeningSession);
        let mut session = RadioSession::open(&mut self.rf, &self.setup, setting, self.params)?;

        Self::transition(&mut self.state, BurstState::SynthesizingFrequency);
        let mut scheduler = session.schedule_frequency_synthesis(&mut self.fs).await?;

        Self::transition(&mut self.state, BurstState::TransmittingBurst);
        let mut report = BurstReport::new(level, self.sequence.peek());
        for _ in 0..self.config.effective_burst_length() {
            let sequence = self.sequence.next_value();
            self.packet.fill(sequence, level);

            let outcome = scheduler.transmit(self.packet.as_bytes()).await?;
            report.record(outcome);

            if self.config.toggle_indicator {
                let _ = self.activity.toggle();
            }
            scheduler.yield_radio();
            self.delay.delay_us(self.config.packet_interval_us).await;
        }

        Self::transition(&mut self.state, BurstState::ClosingSession);
        session.close();

        Ok(report)
    }

    fn transition(state: &mut BurstState, next: BurstState) {
        trace!("{:?} -> {:?}", *state, next);
        *state = next;
    }
}
