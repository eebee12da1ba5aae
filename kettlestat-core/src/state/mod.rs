//! Thermostat state machine
//!
//! `State::transition` is the pure transition table. `Thermostat` wraps it
//! with the selected setpoint, the hysteresis band and the selection
//! timeout, and turns every control-loop step into a set of outputs.

pub mod events;
pub mod machine;
pub mod setpoint;
pub mod thermostat;

pub use events::{Event, Presence, TemperatureBucket, TemperatureReading};
pub use machine::State;
pub use setpoint::Setpoint;
pub use thermostat::{Chirp, Outputs, Thermostat, Tone};
