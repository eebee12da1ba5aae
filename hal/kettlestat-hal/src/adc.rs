//! Analog input abstraction
//!
//! Presence and temperature share one converter. Each read names the
//! channel and the resolution the caller's thresholds are expressed in;
//! the HAL rescales from the converter's native width.

/// Errors from an analog conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// Channel index not wired on this board
    UnknownChannel,
    /// Converter reported a failed conversion
    Conversion,
}

/// One conversion request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Conversion {
    /// Board channel index
    pub channel: u8,
    /// Width of the returned value
    pub resolution_bits: u8,
}

/// Trait for analog inputs
pub trait AnalogInput {
    /// Run one conversion, blocking until it completes
    ///
    /// The result is in `0..(1 << conversion.resolution_bits)`.
    fn read(&mut self, conversion: &Conversion) -> Result<u16, AdcError>;
}

/// Convert a raw reading between resolutions
///
/// Narrowing drops low bits, widening shifts left. Widths are clamped to
/// 16 bits.
pub fn rescale(raw: u16, from_bits: u8, to_bits: u8) -> u16 {
    let from = from_bits.min(16);
    let to = to_bits.min(16);
    if to < from {
        raw >> (from - to)
    } else {
        ((raw as u32) << (to - from)) as u16
    }
}
