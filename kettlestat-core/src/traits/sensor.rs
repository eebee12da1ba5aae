//! Sensor classification trait

use crate::state::{Presence, TemperatureReading};

/// Classifies the shared analog input
///
/// Both queries are polled once per control-loop step. They must return
/// within a bounded time and never fail: an unreadable input classifies
/// as the value that keeps the relay open (`Presence::None`, or a
/// temperature above every target).
pub trait SensorClassifier {
    /// Read the presence/button line
    fn classify_presence(&mut self) -> Presence;

    /// Read the temperature line
    fn classify_temperature(&mut self) -> TemperatureReading;
}
