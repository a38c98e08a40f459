//! Hardware Abstraction Layer
//!
//! Binds the portable radio logic to nRF52840 peripherals.
//! This module isolates hardware-specific code; everything above it
//! talks to the radio through [`crate::radio::RfCore`].

pub mod ieee802154;
