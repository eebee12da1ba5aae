//! Configuration types
//!
//! Calibration of the sensor line, the setpoint table, the servo table and
//! the indicator palette. Nothing here is persisted: the firmware embeds
//! `kettle.toml` and parses it at every boot.

pub mod parse;
pub mod types;

pub use parse::{parse, ParseError};
pub use types::*;

/// Widest conversion any supported ADC produces
pub const MAX_RESOLUTION_BITS: u8 = 16;

/// A configuration value that cannot work on the appliance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Resolution is zero or wider than the converter
    InvalidResolution,
    /// Button band does not sit above the water band
    ClassifierOverlap,
    /// Button threshold leaves no value to classify as a press
    ButtonUnreachable,
    /// Bucket floors are not strictly increasing
    BucketsNotIncreasing,
    /// A bucket floor is above the largest temperature reading
    BucketUnreachable,
    /// Setpoint targets are not strictly increasing
    TargetsNotIncreasing,
    /// No temperature reading can rise above a target
    TargetUnreachable,
    /// Hysteresis is not smaller than every target
    HysteresisTooLarge,
    /// Default setpoint is outside the target table
    DefaultSetpointOutOfRange,
    /// Selection would time out immediately
    ZeroSelectTimeout,
    /// Servo frame has no ticks
    ZeroFrame,
    /// Servo pulse widths are not strictly increasing
    ServoTableNotIncreasing,
    /// A pulse is as long as the whole frame
    PulseExceedsFrame,
}

impl KettleConfig {
    /// Check every cross-field constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.classifier;
        check_resolution(c.resolution_bits)?;
        if c.object_above > c.button_above {
            return Err(ConfigError::ClassifierOverlap);
        }
        if c.button_above as u32 >= max_value(c.resolution_bits) {
            return Err(ConfigError::ButtonUnreachable);
        }

        let t = &self.temperature;
        check_resolution(t.resolution_bits)?;
        if !strictly_increasing(&t.bucket_floors) {
            return Err(ConfigError::BucketsNotIncreasing);
        }
        let hottest = max_value(t.resolution_bits);
        if t.bucket_floors.iter().any(|&f| f as u32 > hottest) {
            return Err(ConfigError::BucketUnreachable);
        }

        let s = &self.setpoints;
        if !strictly_increasing(&s.targets) {
            return Err(ConfigError::TargetsNotIncreasing);
        }
        // Holding needs a reading strictly above the target
        if s.targets.iter().any(|&target| target as u32 >= hottest) {
            return Err(ConfigError::TargetUnreachable);
        }
        if s.targets.iter().any(|&target| t.hysteresis >= target) {
            return Err(ConfigError::HysteresisTooLarge);
        }
        if s.default_index as usize >= s.targets.len() {
            return Err(ConfigError::DefaultSetpointOutOfRange);
        }
        if s.select_timeout_s == 0 {
            return Err(ConfigError::ZeroSelectTimeout);
        }

        let servo = &self.servo;
        if servo.frame_ticks == 0 {
            return Err(ConfigError::ZeroFrame);
        }
        if !strictly_increasing(&servo.pulse_ticks) {
            return Err(ConfigError::ServoTableNotIncreasing);
        }
        if servo.pulse_ticks.iter().any(|&w| w >= servo.frame_ticks) {
            return Err(ConfigError::PulseExceedsFrame);
        }

        Ok(())
    }
}

fn check_resolution(bits: u8) -> Result<(), ConfigError> {
    if bits == 0 || bits > MAX_RESOLUTION_BITS {
        return Err(ConfigError::InvalidResolution);
    }
    Ok(())
}

/// Largest raw value at a resolution
fn max_value(bits: u8) -> u32 {
    (1u32 << bits) - 1
}

fn strictly_increasing(values: &[u16]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}
