//! Packet Burst Transmitter Main Application
//!
//! Entry point for the nRF52840-DK firmware.
//! Initializes hardware and runs the burst loop until a fatal fault.

#![no_std]
#![no_main]

use defmt::{error, info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::config::{Config, HfclkSource};
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::radio::ieee802154;
use embassy_nrf::{bind_interrupts, peripherals, radio};
use {defmt_rtt as _, panic_probe as _};

use rf_packet_tx::hal::ieee802154::Ieee802154Rf;
use rf_packet_tx::power::TX_POWER_TABLE_NRF52840;
use rf_packet_tx::prelude::*;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    RADIO => radio::InterruptHandler<peripherals::RADIO>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Packet burst transmitter v{}", env!("CARGO_PKG_VERSION"));

    // The radio needs the external 32 MHz crystal
    let mut config = Config::default();
    config.hfclk_source = HfclkSource::ExternalXtal;
    let p = embassy_nrf::init(config);

    info!("Peripherals initialized");

    // Buttons are active low; LEDs are driven active high
    let left = Input::new(p.P0_11, Pull::Up);
    let right = Input::new(p.P0_12, Pull::Up);
    let led_down = Output::new(p.P0_13, Level::Low, OutputDrive::Standard);
    let led_up = Output::new(p.P0_14, Level::Low, OutputDrive::Standard);
    let led_activity = Output::new(p.P0_15, Level::Low, OutputDrive::Standard);
    let mut led_fault = Output::new(p.P0_16, Level::Low, OutputDrive::Standard);

    let buttons = ButtonSampler::new(left, right, led_down, led_up, Delay);

    let rf = Ieee802154Rf::new(ieee802154::Radio::new(p.RADIO, Irqs));

    let table = unwrap!(CalibrationTable::new(TX_POWER_TABLE_NRF52840));
    let power = unwrap!(PowerLevelController::with_defaults(table));

    let config = BurstConfig::active();
    info!("{} at {}", config, power.current_level());

    let mut controller = BurstController::new(rf, buttons, led_activity, Delay, power, config);

    let fault = controller.run().await;

    error!("halted in {}: {} (code {=u16:#x})", controller.state(), fault, fault.code());
    led_fault.set_high();
    defmt::panic!("unrecoverable radio fault");
}
