//! Hardware abstraction traits
//!
//! These traits define the interface between the thermostat logic and the
//! board-specific drivers.

pub mod outputs;
pub mod sensor;

pub use outputs::{Annunciator, Indicator, RelayOutput, ServoTarget};
pub use sensor::SensorClassifier;
