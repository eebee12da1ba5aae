//! Output traits driven by the thermostat

use crate::color::Color;
use crate::servo::ServoPosition;
use crate::state::Chirp;

/// Heating element relay
pub trait RelayOutput {
    /// Close (heat) or open the relay
    fn set_closed(&mut self, closed: bool);

    /// Check if the relay is currently closed
    fn is_closed(&self) -> bool;
}

/// Status LED
pub trait Indicator {
    /// Show a color until the next call
    fn show(&mut self, color: Color);
}

/// Buzzer
///
/// Implementations may queue the pattern; the caller must not wait for it.
pub trait Annunciator {
    fn chirp(&mut self, chirp: Chirp);
}

/// Indicator servo
pub trait ServoTarget {
    /// Move the servo to a table position
    fn point_at(&mut self, position: ServoPosition);
}
