//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in kettlestat-core for the kettle's peripherals:
//!
//! - Heating relay on a GPIO (active-high or active-low)
//! - Single-pixel status LED over any `smart-leds` writer
//! - Active buzzer
//! - Servo positioner feeding the shared pulse width
//! - Analog sensor classifier for the shared presence/temperature input

#![no_std]
#![deny(unsafe_code)]

pub mod buzzer;
pub mod led;
pub mod relay;
pub mod sensor;
pub mod servo;

pub use buzzer::Buzzer;
pub use led::StatusLed;
pub use relay::GpioRelay;
pub use sensor::AnalogClassifier;
pub use servo::ServoPositioner;
