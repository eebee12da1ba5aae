//! Kettlestat Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that chip-specific HALs
//! implement, so the drivers and the thermostat stay board-agnostic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  kettlestat-firmware                    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kettlestat-drivers                     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kettlestat-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  kettlestat-hal-rp2040                  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`port::MaskedPort`] - Output port written by bit-set / bit-clear only
//! - [`adc::AnalogInput`] - Analog conversions at a requested resolution

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod port;

// Re-export key items at crate root for convenience
pub use adc::{AdcError, AnalogInput, Conversion};
pub use port::{MaskedPort, PortPin};
