//! nRF52840 IEEE 802.15.4 radio driver
//!
//! Implements [`RfCore`] on top of `embassy_nrf::radio::ieee802154`.
//!
//! The nRF RADIO has no command queue, so the command descriptors are
//! emulated: the synthesizer command selects the 802.15.4 channel and a
//! transmit command performs one `try_send`. Both report
//! `LAST_CMD_DONE` once the driver returns and write the status word the
//! classifier expects.

use embassy_nrf::radio::ieee802154::{Packet, Radio};
use embassy_nrf::radio::Instance;

use crate::error::RadioResult;
use crate::radio::command::{
    event, status, EventMask, FsCommand, RadioSetup, ScheduleParams, TxCommand,
};
use crate::radio::RfCore;

/// First channel of the 2.4 GHz O-QPSK PHY
const FIRST_CHANNEL: u8 = 11;

/// Last channel of the 2.4 GHz O-QPSK PHY
const LAST_CHANNEL: u8 = 26;

/// Center frequency of channel 11 in MHz
const FIRST_CHANNEL_MHZ: u16 = 2405;

/// Channel spacing in MHz
const CHANNEL_SPACING_MHZ: u16 = 5;

/// Map a synthesizer frequency onto an 802.15.4 channel
///
/// Only exact channel centers are accepted.
#[must_use]
pub fn channel_for(frequency_mhz: u16, fract_freq: u16) -> Option<u8> {
    if fract_freq != 0 || frequency_mhz < FIRST_CHANNEL_MHZ {
        return None;
    }
    let offset = frequency_mhz - FIRST_CHANNEL_MHZ;
    if offset % CHANNEL_SPACING_MHZ != 0 {
        return None;
    }
    let channel = u8::try_from(offset / CHANNEL_SPACING_MHZ)
        .ok()?
        .checked_add(FIRST_CHANNEL)?;
    (channel <= LAST_CHANNEL).then_some(channel)
}

/// [`RfCore`] over the nRF52840 RADIO peripheral
pub struct Ieee802154Rf<'d, T: Instance> {
    radio: Radio<'d, T>,
    packet: Packet,
    open: bool,
    synthesized: bool,
}

impl<'d, T: Instance> Ieee802154Rf<'d, T> {
    /// Wrap an initialized radio
    pub fn new(radio: Radio<'d, T>) -> Self {
        Self {
            radio,
            packet: Packet::new(),
            open: false,
            synthesized: false,
        }
    }
}

impl<T: Instance> RfCore for Ieee802154Rf<'_, T> {
    type TxPowerSetting = i8;

    fn open(&mut self, setup: &RadioSetup) -> RadioResult<()> {
        defmt::trace!("radio open: {}", setup.mode);
        self.open = true;
        self.synthesized = false;
        Ok(())
    }

    fn set_tx_power(&mut self, setting: i8) -> RadioResult<()> {
        self.radio.set_transmission_power(setting);
        defmt::debug!("TXPOWER = {} dBm", setting);
        Ok(())
    }

    async fn run_fs(&mut self, cmd: &mut FsCommand, _params: &ScheduleParams) -> EventMask {
        match channel_for(cmd.frequency_mhz, cmd.fract_freq) {
            Some(channel) if self.open => {
                self.radio.set_channel(channel);
                self.synthesized = true;
                cmd.status = status::DONE_OK;
            }
            _ => {
                self.synthesized = false;
                cmd.status = status::ERROR_PAR;
            }
        }
        event::LAST_CMD_DONE
    }

    async fn run_tx(&mut self, cmd: &mut TxCommand<'_>, _params: &ScheduleParams) -> EventMask {
        cmd.status = if !self.open {
            status::IEEE_ERROR_NO_SETUP
        } else if !self.synthesized {
            status::IEEE_ERROR_NO_FS
        } else {
            self.packet.copy_from_slice(cmd.payload);
            match self.radio.try_send(&mut self.packet).await {
                Ok(()) => status::IEEE_DONE_OK,
                Err(_) => status::IEEE_DONE_ABORT,
            }
        };
        event::LAST_CMD_DONE
    }

    fn yield_radio(&mut self) {
        // The driver disables the RADIO after every transfer
    }

    fn close(&mut self) {
        self.open = false;
        self.synthesized = false;
    }
}
