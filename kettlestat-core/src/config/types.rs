//! Configuration type definitions
//!
//! The reference calibration lives in the `Default` impls. `kettle.toml`
//! overrides individual keys on top of it.

use crate::color::Palette;
use crate::servo::ServoTable;
use crate::state::{Presence, Setpoint, TemperatureBucket, TemperatureReading};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of temperature bucket floors (T50 through T100)
pub const BUCKET_FLOORS: usize = 6;

/// Value bands of the shared presence/button line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct ClassifierThresholds {
    /// Conversion width the thresholds are expressed in
    pub resolution_bits: u8,
    /// Readings below this are `None`
    pub object_above: u16,
    /// Readings above this are `Button`
    pub button_above: u16,
}

impl ClassifierThresholds {
    /// Classify one reading of the presence line
    ///
    /// Values from `object_above` to `button_above` inclusive are water.
    pub fn classify(&self, raw: u16) -> Presence {
        if raw < self.object_above {
            Presence::None
        } else if raw > self.button_above {
            Presence::Button
        } else {
            Presence::Object
        }
    }
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            resolution_bits: 8,
            object_above: 150,
            button_above: 240,
        }
    }
}

/// Temperature line scaling and hysteresis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct TemperatureScale {
    /// Conversion width of the temperature line
    pub resolution_bits: u8,
    /// Lowest level of each bucket from T50 to T100, strictly increasing
    pub bucket_floors: [u16; BUCKET_FLOORS],
    /// Relay closes again below `target - hysteresis`
    pub hysteresis: u16,
}

impl TemperatureScale {
    /// Display bucket for a level
    pub fn bucket(&self, level: u16) -> TemperatureBucket {
        let reached = self.bucket_floors.iter().filter(|&&f| level >= f).count();
        TemperatureBucket::from_floors_reached(reached)
    }

    pub fn reading(&self, level: u16) -> TemperatureReading {
        TemperatureReading {
            level,
            bucket: self.bucket(level),
        }
    }
}

impl Default for TemperatureScale {
    fn default() -> Self {
        Self {
            resolution_bits: 10,
            bucket_floors: [500, 600, 700, 800, 900, 1000],
            hysteresis: 50,
        }
    }
}

/// Target level of each setpoint and selection behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct SetpointTable {
    /// Temperature-line level per setpoint, in button order
    pub targets: [u16; Setpoint::COUNT],
    /// Setpoint selected at boot; later selections persist until power-off
    pub default_index: u8,
    /// Selection falls back to startup after this long without a press
    pub select_timeout_s: u32,
}

impl Default for SetpointTable {
    fn default() -> Self {
        Self {
            targets: [600, 700, 800, 950, 1000],
            default_index: Setpoint::Mate as u8,
            select_timeout_s: 30,
        }
    }
}

/// Complete kettle configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct KettleConfig {
    pub classifier: ClassifierThresholds,
    pub temperature: TemperatureScale,
    pub setpoints: SetpointTable,
    pub servo: ServoTable,
    pub palette: Palette,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_bands() {
        let c = ClassifierThresholds::default();
        assert_eq!(c.classify(0), Presence::None);
        assert_eq!(c.classify(149), Presence::None);
        assert_eq!(c.classify(150), Presence::Object);
        assert_eq!(c.classify(240), Presence::Object);
        assert_eq!(c.classify(241), Presence::Button);
        assert_eq!(c.classify(255), Presence::Button);
    }

    #[test]
    fn test_bucket_floors() {
        let t = TemperatureScale::default();
        assert_eq!(t.bucket(0), TemperatureBucket::Cold);
        assert_eq!(t.bucket(499), TemperatureBucket::Cold);
        assert_eq!(t.bucket(500), TemperatureBucket::T50);
        assert_eq!(t.bucket(799), TemperatureBucket::T70);
        assert_eq!(t.bucket(1000), TemperatureBucket::T100);
        assert_eq!(t.bucket(1023), TemperatureBucket::T100);
    }

    #[test]
    fn test_reading_keeps_level() {
        let r = TemperatureScale::default().reading(812);
        assert_eq!(r.level, 812);
        assert_eq!(r.bucket, TemperatureBucket::T80);
    }
}
