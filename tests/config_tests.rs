//! Configuration and Constants Tests
//!
//! Tests to verify configuration values are valid and consistent.
//! Run with: cargo test --test config_tests

use rf_packet_tx::config::*;
use rf_packet_tx::radio::command::FsCommand;

// =============================================================================
// Packet Layout Tests
// =============================================================================

#[test]
fn payload_fits_sequence_field() {
    assert_eq!(PAYLOAD_LENGTH, 30);
    assert_eq!(SEQUENCE_FIELD_LEN, 2);
    assert!(PAYLOAD_LENGTH > SEQUENCE_FIELD_LEN);
}

#[test]
fn payload_fits_802154_frame() {
    // aMaxPHYPacketSize is 127 including the 2-byte FCS
    assert!(PAYLOAD_LENGTH <= 125);
}

// =============================================================================
// Burst Timing Tests
// =============================================================================

#[test]
fn burst_defaults() {
    assert_eq!(BURST_LENGTH, 10);
    assert_eq!(PACKET_INTERVAL_US, 200_000);
    assert!(usize::from(BURST_LENGTH) <= MAX_BURST_LENGTH);
}

#[test]
fn burst_config_new_uses_constants() {
    let cfg = BurstConfig::new();
    assert_eq!(cfg.burst_length, BURST_LENGTH);
    assert_eq!(cfg.packet_interval_us, PACKET_INTERVAL_US);
    assert!(cfg.toggle_indicator);
}

#[test]
fn burst_config_power_measurement() {
    let cfg = BurstConfig::power_measurement();
    assert_eq!(cfg.burst_length, BURST_LENGTH);
    assert_eq!(cfg.packet_interval_us, 5_000_000);
    assert!(!cfg.toggle_indicator);
}

#[test]
fn burst_config_default_follows_feature() {
    let expected = if cfg!(feature = "power-measurement") {
        BurstConfig::power_measurement()
    } else {
        BurstConfig::new()
    };
    assert_eq!(BurstConfig::default(), expected);
    assert_eq!(BurstConfig::active(), expected);
}

#[test]
fn burst_config_builders() {
    let cfg = BurstConfig::new()
        .with_burst_length(3)
        .with_packet_interval_us(50);
    assert_eq!(cfg.burst_length, 3);
    assert_eq!(cfg.packet_interval_us, 50);
    assert_eq!(cfg.effective_burst_length(), 3);
}

#[test]
fn burst_length_is_clamped() {
    let cfg = BurstConfig::new().with_burst_length(1000);
    assert_eq!(usize::from(cfg.effective_burst_length()), MAX_BURST_LENGTH);
}

// =============================================================================
// Button Timing Tests
// =============================================================================

#[test]
fn debounce_longer_than_poll() {
    assert_eq!(BUTTON_DEBOUNCE_MS, 10);
    assert!(BUTTON_DEBOUNCE_MS * 1_000 > BUTTON_POLL_US);
}

// =============================================================================
// TX Power Window Tests
// =============================================================================

#[test]
fn power_window_valid() {
    assert_eq!(TX_POWER_MIN_DBM, 0);
    assert_eq!(TX_POWER_MAX_DBM, 20);
    assert!((TX_POWER_MIN_DBM..=TX_POWER_MAX_DBM).contains(&DEFAULT_TX_POWER_DBM));
}

// =============================================================================
// Frequency Tests
// =============================================================================

#[test]
fn synth_frequency_is_channel_13() {
    assert_eq!(SYNTH_FREQUENCY_MHZ, 2415);
    assert_eq!(SYNTH_FRACT_FREQ, 0);
    // 2405 MHz + 5 MHz * (k - 11)
    assert_eq!((SYNTH_FREQUENCY_MHZ - 2405) / 5 + 11, 13);
}

#[test]
fn fs_command_default() {
    let fs = FsCommand::default();
    assert_eq!(fs.frequency_mhz, SYNTH_FREQUENCY_MHZ);
    assert_eq!(fs.frequency_khz(), 2_415_000);
    assert!(!fs.tx_mode);
}

#[test]
fn fs_command_fractional_khz() {
    // 0x8000 / 65536 = 0.5 MHz
    let fs = FsCommand::new(2405, 0x8000);
    assert_eq!(fs.frequency_khz(), 2_405_500);
}

// =============================================================================
// Pin Tests
// =============================================================================

#[test]
fn pins_are_distinct() {
    let all = [
        pins::LED_DOWN,
        pins::LED_UP,
        pins::LED_ACTIVITY,
        pins::LED_FAULT,
        pins::BUTTON_LEFT,
        pins::BUTTON_RIGHT,
    ];
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
