//! RP2040-specific HAL for the kettle thermostat firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `kettlestat-hal` traits, plus the timing-critical pieces:
//!
//! - SIO masked output port (implements `kettlestat_hal::MaskedPort`)
//! - Cycle-counted one-wire LED serializer (implements `SmartLedsWrite`)
//! - 10 µs servo tick on TIMER alarm 1
//! - ADC input with resolution scaling (implements `kettlestat_hal::AnalogInput`)

#![no_std]

pub mod adc;
pub mod one_wire;
pub mod servo_timer;
pub mod sio;

/// System clock frequency (RP2040 default)
pub const SYS_CLK_HZ: u32 = 125_000_000;

// Re-export shared traits from kettlestat-hal for convenience
pub use kettlestat_hal::{AnalogInput, MaskedPort, PortPin};

pub use adc::RpAnalog;
pub use one_wire::OneWireLed;
pub use servo_timer::TickTimer;
pub use sio::SioPort;
