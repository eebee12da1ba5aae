//! Heating relay outputs

pub mod gpio;

pub use gpio::GpioRelay;
