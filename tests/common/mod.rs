//! Shared host-side test doubles
//!
//! Mocks for the radio, the control input and the `embedded-hal` pin and
//! delay traits. LEDs and delays share their log through `Rc` so a test
//! can keep a handle after moving the mock into the code under test.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};
use embedded_hal_async::delay::DelayNs;

use rf_packet_tx::error::{RadioFault, RadioResult};
use rf_packet_tx::input::ControlInput;
use rf_packet_tx::power::PaSetting;
use rf_packet_tx::radio::command::{
    event, status, EventMask, FsCommand, RadioSetup, ScheduleParams, TxCommand,
};
use rf_packet_tx::radio::RfCore;
use rf_packet_tx::types::ButtonEvent;

// ============================================================================
// Radio
// ============================================================================

/// Driver call, in the order it reached the mock
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RfCall<E> {
    Open,
    SetPower(E),
    Fs(u16),
    Tx(Vec<u8>),
    Yield,
    Close,
}

/// Scriptable radio; unscripted commands complete normally
pub struct MockRf<E = PaSetting> {
    pub calls: Vec<RfCall<E>>,
    pub tx_script: VecDeque<(EventMask, u16)>,
    pub fs_result: EventMask,
    pub fail_open: bool,
    pub reject_power: bool,
    pub is_open: bool,
}

impl<E> MockRf<E> {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            tx_script: VecDeque::new(),
            fs_result: event::LAST_CMD_DONE,
            fail_open: false,
            reject_power: false,
            is_open: false,
        }
    }

    /// Queue raw results for the next transmit commands
    pub fn script(mut self, results: &[(EventMask, u16)]) -> Self {
        self.tx_script.extend(results.iter().copied());
        self
    }

    pub fn count(&self, pred: impl Fn(&RfCall<E>) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn opens(&self) -> usize {
        self.count(|c| matches!(c, RfCall::Open))
    }

    pub fn closes(&self) -> usize {
        self.count(|c| matches!(c, RfCall::Close))
    }

    pub fn yields(&self) -> usize {
        self.count(|c| matches!(c, RfCall::Yield))
    }

    pub fn payloads(&self) -> Vec<Vec<u8>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RfCall::Tx(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    /// Sequence numbers carried by the transmitted payloads
    pub fn sequences(&self) -> Vec<u16> {
        self.payloads()
            .iter()
            .map(|p| u16::from_be_bytes([p[0], p[1]]))
            .collect()
    }

    pub fn powers(&self) -> Vec<E>
    where
        E: Clone,
    {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RfCall::SetPower(e) => Some(e.clone()),
                _ => None,
            })
            .collect()
    }
}

impl<E> Default for MockRf<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Copy> RfCore for MockRf<E> {
    type TxPowerSetting = E;

    fn open(&mut self, _setup: &RadioSetup) -> RadioResult<()> {
        assert!(!self.is_open, "radio opened twice");
        if self.fail_open {
            return Err(RadioFault::AcquireFailed);
        }
        self.is_open = true;
        self.calls.push(RfCall::Open);
        Ok(())
    }

    fn set_tx_power(&mut self, setting: E) -> RadioResult<()> {
        assert!(self.is_open, "power set on a closed radio");
        if self.reject_power {
            return Err(RadioFault::TxPowerRejected);
        }
        self.calls.push(RfCall::SetPower(setting));
        Ok(())
    }

    async fn run_fs(&mut self, cmd: &mut FsCommand, _params: &ScheduleParams) -> EventMask {
        assert!(self.is_open, "FS on a closed radio");
        cmd.status = status::DONE_OK;
        self.calls.push(RfCall::Fs(cmd.frequency_mhz));
        self.fs_result
    }

    async fn run_tx(&mut self, cmd: &mut TxCommand<'_>, _params: &ScheduleParams) -> EventMask {
        assert!(self.is_open, "TX on a closed radio");
        self.calls.push(RfCall::Tx(cmd.payload.to_vec()));
        let (mask, raw) = self
            .tx_script
            .pop_front()
            .unwrap_or((event::LAST_CMD_DONE, status::IEEE_DONE_OK));
        cmd.status = raw;
        mask
    }

    fn yield_radio(&mut self) {
        self.calls.push(RfCall::Yield);
    }

    fn close(&mut self) {
        assert!(self.is_open, "radio closed twice");
        self.is_open = false;
        self.calls.push(RfCall::Close);
    }
}

// ============================================================================
// Control input
// ============================================================================

/// Hands out queued button events; `NONE` once the queue is empty
#[derive(Default)]
pub struct ScriptedInput {
    pub events: VecDeque<ButtonEvent>,
    pub samples: usize,
    pub clears: usize,
}

impl ScriptedInput {
    pub fn new(events: &[ButtonEvent]) -> Self {
        Self {
            events: events.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl ControlInput for ScriptedInput {
    async fn sample(&mut self) -> ButtonEvent {
        self.samples += 1;
        self.events.pop_front().unwrap_or(ButtonEvent::NONE)
    }

    fn clear_latch(&mut self) {
        self.clears += 1;
    }
}

// ============================================================================
// Pins
// ============================================================================

/// Active-low button; each read consumes one scripted "pressed" flag
pub struct MockButton {
    pressed: VecDeque<bool>,
    pub reads: usize,
}

impl MockButton {
    pub fn new(pressed: &[bool]) -> Self {
        Self {
            pressed: pressed.iter().copied().collect(),
            reads: 0,
        }
    }
}

impl ErrorType for MockButton {
    type Error = Infallible;
}

impl InputPin for MockButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.reads += 1;
        Ok(self.pressed.pop_front().unwrap_or(false))
    }
}

/// Output pin recording every level written
#[derive(Clone, Default)]
pub struct MockLed {
    log: Rc<RefCell<Vec<bool>>>,
}

impl MockLed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_lit(&self) -> bool {
        self.log.borrow().last().copied().unwrap_or(false)
    }

    pub fn writes(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn history(&self) -> Vec<bool> {
        self.log.borrow().clone()
    }
}

impl ErrorType for MockLed {
    type Error = Infallible;
}

impl OutputPin for MockLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(true);
        Ok(())
    }
}

impl StatefulOutputPin for MockLed {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.is_lit())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_lit())
    }
}

// ============================================================================
// Delay
// ============================================================================

/// One recorded delay request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wait {
    Ns(u32),
    Us(u32),
    Ms(u32),
}

/// Delay that returns immediately and records the request
#[derive(Clone, Default)]
pub struct MockDelay {
    log: Rc<RefCell<Vec<Wait>>>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waits(&self) -> Vec<Wait> {
        self.log.borrow().clone()
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Wait::Ns(ns));
    }

    async fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(Wait::Us(us));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Wait::Ms(ms));
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub const DOWN: ButtonEvent = ButtonEvent::new(false, true);
pub const UP: ButtonEvent = ButtonEvent::new(true, false);
pub const BOTH: ButtonEvent = ButtonEvent::new(true, true);
