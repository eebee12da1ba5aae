//! Board-agnostic core logic for the kettle thermostat firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Indicator colors and the one-wire LED bitstream timing model
//! - Software servo pulse scheduling shared with the timer interrupt
//! - Thermostat state machine with hysteresis
//! - Configuration types and the `kettle.toml` parser
//! - Collaborator traits (sensor classifier, relay, indicator, buzzer, servo)

#![no_std]
#![deny(unsafe_code)]

pub mod bitstream;
pub mod color;
pub mod config;
pub mod servo;
pub mod state;
pub mod traits;
