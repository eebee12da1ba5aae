//! ADC input
//!
//! RP2040 has a single 12-bit ADC with 4 external channels:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29
//!
//! Board channel indices are the order the channels were handed to
//! [`RpAnalog::new`], not the ADC channel numbers.

use embassy_rp::adc::{Adc, Blocking, Channel};
use kettlestat_hal::adc::{rescale, AdcError, AnalogInput, Conversion};

/// Native ADC resolution
pub const NATIVE_BITS: u8 = 12;

/// Board channel of the presence/button line
pub const PRESENCE_CHANNEL: u8 = 0;

/// Board channel of the temperature sensor
pub const TEMPERATURE_CHANNEL: u8 = 1;

pub struct RpAnalog<'d> {
    adc: Adc<'d, Blocking>,
    inputs: [Channel<'d>; 2],
}

impl<'d> RpAnalog<'d> {
    pub fn new(adc: Adc<'d, Blocking>, presence: Channel<'d>, temperature: Channel<'d>) -> Self {
        Self {
            adc,
            inputs: [presence, temperature],
        }
    }
}

impl AnalogInput for RpAnalog<'_> {
    fn read(&mut self, conversion: &Conversion) -> Result<u16, AdcError> {
        let input = self
            .inputs
            .get_mut(conversion.channel as usize)
            .ok_or(AdcError::UnknownChannel)?;
        let raw = self
            .adc
            .blocking_read(input)
            .map_err(|_| AdcError::Conversion)?;
        Ok(rescale(raw, NATIVE_BITS, conversion.resolution_bits))
    }
}
