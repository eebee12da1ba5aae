//! Sensor classifications and the events derived from them

use crate::servo::ServoPosition;

/// What the shared analog line currently reads as
///
/// The same input serves as water sensor and pushbutton. Readings in the
/// gap between the two bands classify as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Presence {
    /// Nothing on the sensor, or an ambiguous reading
    #[default]
    None,
    /// Kettle with water in place
    Object,
    /// Button held
    Button,
}

/// Coarse water temperature, one step per thermometer servo position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureBucket {
    #[default]
    Cold,
    T50,
    T60,
    T70,
    T80,
    T90,
    T100,
}

impl TemperatureBucket {
    /// Buckets from coldest to hottest
    pub const ALL: [TemperatureBucket; 7] = [
        TemperatureBucket::Cold,
        TemperatureBucket::T50,
        TemperatureBucket::T60,
        TemperatureBucket::T70,
        TemperatureBucket::T80,
        TemperatureBucket::T90,
        TemperatureBucket::T100,
    ];

    /// Bucket for the number of floors a reading has reached
    pub fn from_floors_reached(n: usize) -> Self {
        Self::ALL[n.min(Self::ALL.len() - 1)]
    }

    /// Thermometer position showing this bucket
    pub fn servo_position(self) -> ServoPosition {
        match self {
            TemperatureBucket::Cold => ServoPosition::Cold,
            TemperatureBucket::T50 => ServoPosition::T50,
            TemperatureBucket::T60 => ServoPosition::T60,
            TemperatureBucket::T70 => ServoPosition::T70,
            TemperatureBucket::T80 => ServoPosition::T80,
            TemperatureBucket::T90 => ServoPosition::T90,
            TemperatureBucket::T100 => ServoPosition::T100,
        }
    }
}

/// One temperature conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureReading {
    /// Scaled converter value, compared against setpoint targets
    pub level: u16,
    /// Display bucket for the thermometer servo
    pub bucket: TemperatureBucket,
}

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Classified reading of the shared sensor line
    Presence(Presence),
    /// Water fell below target minus hysteresis
    BelowBand,
    /// Water rose above target
    AboveTarget,
    /// No button press for the selection timeout
    SelectTimeout,
}
