//! Sensor classifier implementations

pub mod analog;

pub use analog::AnalogClassifier;
