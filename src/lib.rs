//! IEEE 802.15.4 Packet Burst Transmitter Library
//!
//! This library provides the core functionality for a button-controlled
//! 2.4 GHz test transmitter. Every press of one of two buttons steps the
//! TX power through a calibration table, then a burst of sequence-numbered
//! packets is sent at that power inside one scoped radio session.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │        BurstController (sample → adjust → burst)             │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      RADIO LAYER                             │
//! │  RadioSession  │  TransmissionScheduler  │  Outcome classes  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │  RfCore (nRF52840 802.15.4)  │  Buttons  │  LEDs  │  Delay   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Type-driven design**: Custom types enforce invariants at compile time
//! - **Scoped ownership**: The radio is released on every exit from a burst
//! - **No unsafe in application code**: All unsafe isolated in HAL layers
//! - **Functional core, imperative shell**: Hardware behind traits, logic host-testable
//! - **Explicit error handling**: Unknown hardware outcomes are fatal `Result`s

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[macro_use]
mod fmt;

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_nrf;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// `RfCore` implementation for the nRF52840 radio.
#[cfg(feature = "embedded")]
pub mod hal;

/// Radio Control Logic
///
/// Command descriptors, sessions, transmit scheduling and the burst loop.
pub mod radio;

/// TX Power Control
///
/// Calibration tables and the power step controller.
pub mod power;

/// Button Input
///
/// Debounced two-button sampling.
pub mod input;

/// Fatal fault types
pub mod error;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::error::{RadioFault, RadioResult};
    pub use crate::input::{ButtonSampler, ControlInput};
    pub use crate::power::{CalibrationTable, PowerLevelController, PowerRange, TxPowerEntry};
    pub use crate::radio::{BurstController, BurstReport, BurstState, RfCore};
    pub use crate::types::*;

    // Common traits
    pub use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};
    pub use embedded_hal_async::delay::DelayNs;

    // Embassy
    #[cfg(feature = "embedded")]
    pub use embassy_time::{Delay, Duration, Instant, Timer};

    // Logging
    #[cfg(feature = "embedded")]
    pub use defmt::{debug, error, info, trace, warn};
}
