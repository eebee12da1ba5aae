//! Analog sensor classifier
//!
//! Presence and temperature come from two channels of the same converter,
//! each read at the resolution its thresholds are expressed in. A failed
//! conversion must never close the relay: presence reads as nothing there
//! and temperature reads as boiling.

use kettlestat_core::config::{ClassifierThresholds, KettleConfig, TemperatureScale};
use kettlestat_core::state::{Presence, TemperatureBucket, TemperatureReading};
use kettlestat_core::traits::SensorClassifier;
use kettlestat_hal::adc::{AnalogInput, Conversion};

pub struct AnalogClassifier<A> {
    adc: A,
    presence: Conversion,
    temperature: Conversion,
    thresholds: ClassifierThresholds,
    scale: TemperatureScale,
    faults: u32,
}

impl<A: AnalogInput> AnalogClassifier<A> {
    /// # Arguments
    /// - `adc`: Converter shared by both lines
    /// - `presence_channel`: Board channel of the water/button line
    /// - `temperature_channel`: Board channel of the temperature sensor
    pub fn new(adc: A, config: &KettleConfig, presence_channel: u8, temperature_channel: u8) -> Self {
        Self {
            adc,
            presence: Conversion {
                channel: presence_channel,
                resolution_bits: config.classifier.resolution_bits,
            },
            temperature: Conversion {
                channel: temperature_channel,
                resolution_bits: config.temperature.resolution_bits,
            },
            thresholds: config.classifier,
            scale: config.temperature,
            faults: 0,
        }
    }

    /// Conversions that failed since start
    pub fn faults(&self) -> u32 {
        self.faults
    }
}

impl<A: AnalogInput> SensorClassifier for AnalogClassifier<A> {
    fn classify_presence(&mut self) -> Presence {
        match self.adc.read(&self.presence) {
            Ok(raw) => self.thresholds.classify(raw),
            Err(_) => {
                self.faults = self.faults.wrapping_add(1);
                Presence::None
            }
        }
    }

    fn classify_temperature(&mut self) -> TemperatureReading {
        match self.adc.read(&self.temperature) {
            Ok(level) => self.scale.reading(level),
            Err(_) => {
                self.faults = self.faults.wrapping_add(1);
                TemperatureReading {
                    level: u16::MAX,
                    bucket: TemperatureBucket::T100,
                }
            }
        }
    }
}
