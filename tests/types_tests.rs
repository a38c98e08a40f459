//! Types Module Tests
//!
//! Tests for domain types (PowerLevel, SequenceCounter, Packet, etc.)
//! Run with: cargo test --test types_tests

use rf_packet_tx::config::PAYLOAD_LENGTH;
use rf_packet_tx::types::{Adjustment, ButtonEvent, LedState, Packet, PowerLevel, SequenceCounter};

// =============================================================================
// PowerLevel Tests
// =============================================================================

#[test]
fn test_power_level_dbm_roundtrip() {
    assert_eq!(PowerLevel::from_dbm(14).as_dbm(), 14);
    assert_eq!(PowerLevel::from_dbm(-20).as_dbm(), -20);
}

#[test]
fn test_power_level_raw_byte_is_twos_complement() {
    assert_eq!(PowerLevel::from_dbm(0).raw_byte(), 0x00);
    assert_eq!(PowerLevel::from_dbm(20).raw_byte(), 0x14);
    assert_eq!(PowerLevel::from_dbm(-3).raw_byte(), 0xFD);
}

#[test]
fn test_power_level_ordering() {
    assert!(PowerLevel::from_dbm(10) < PowerLevel::from_dbm(14));
    assert!(PowerLevel::from_dbm(-1) < PowerLevel::from_dbm(0));
}

#[test]
fn test_power_level_display() {
    assert_eq!(format!("{}", PowerLevel::from_dbm(5)), "5 dBm");
    assert_eq!(format!("{:?}", PowerLevel::from_dbm(-9)), "PowerLevel(-9 dBm)");
}

// =============================================================================
// Adjustment Tests
// =============================================================================

#[test]
fn test_adjustment_from_buttons() {
    assert_eq!(Adjustment::from_buttons(ButtonEvent::NONE), Adjustment::None);
    assert_eq!(
        Adjustment::from_buttons(ButtonEvent::new(true, false)),
        Adjustment::Increase
    );
    assert_eq!(
        Adjustment::from_buttons(ButtonEvent::new(false, true)),
        Adjustment::Decrease
    );
}

#[test]
fn test_adjustment_both_buttons_decrease_wins() {
    let both = ButtonEvent::new(true, true);
    assert!(both.is_both());
    assert_eq!(Adjustment::from_buttons(both), Adjustment::Decrease);
}

#[test]
fn test_adjustment_default_is_none() {
    assert_eq!(Adjustment::default(), Adjustment::None);
}

#[test]
fn test_button_event_flags() {
    assert!(!ButtonEvent::NONE.is_any());
    assert!(ButtonEvent::new(true, false).is_any());
    assert!(!ButtonEvent::new(false, true).is_both());
}

// =============================================================================
// SequenceCounter Tests
// =============================================================================

#[test]
fn test_sequence_counter_returns_then_advances() {
    let mut seq = SequenceCounter::new(7);
    assert_eq!(seq.next_value(), 7);
    assert_eq!(seq.next_value(), 8);
    assert_eq!(seq.peek(), 9);
}

#[test]
fn test_sequence_counter_wraps() {
    let mut seq = SequenceCounter::new(u16::MAX - 1);
    assert_eq!(seq.next_value(), 65534);
    assert_eq!(seq.next_value(), 65535);
    assert_eq!(seq.next_value(), 0);
    assert_eq!(seq.peek(), 1);
}

// =============================================================================
// Packet Tests
// =============================================================================

#[test]
fn test_packet_new_is_zeroed() {
    let packet = Packet::new();
    assert_eq!(packet.len(), PAYLOAD_LENGTH);
    assert!(!packet.is_empty());
    assert!(packet.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn test_packet_fill_layout() {
    let mut packet = Packet::new();
    packet.fill(0x1234, PowerLevel::from_dbm(14));

    let bytes = packet.as_bytes();
    assert_eq!(bytes.len(), 30);
    assert_eq!(&bytes[..2], &[0x12, 0x34]);
    assert!(bytes[2..].iter().all(|&b| b == 14));
    assert_eq!(packet.sequence(), 0x1234);
    assert_eq!(packet.body().len(), 28);
}

#[test]
fn test_packet_refill_overwrites_everything() {
    let mut packet = Packet::new();
    packet.fill(0xFFFF, PowerLevel::from_dbm(20));
    packet.fill(1, PowerLevel::from_dbm(-3));

    assert_eq!(packet.sequence(), 1);
    assert!(packet.body().iter().all(|&b| b == 0xFD));
}

// =============================================================================
// LedState Tests
// =============================================================================

#[test]
fn test_led_state_toggle() {
    assert_eq!(LedState::Off.toggle(), LedState::On);
    assert_eq!(LedState::On.toggle(), LedState::Off);
    assert_eq!(LedState::from_high(true), LedState::On);
    assert_eq!(LedState::default(), LedState::Off);
}
