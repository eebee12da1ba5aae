//! Servo positioner
//!
//! Translates table positions into pulse widths for the timer interrupt.
//! The interrupt owns the servo pin; this side only stores the width.

use kettlestat_core::servo::{PulseWidth, ServoPosition, ServoTable};
use kettlestat_core::traits::ServoTarget;

pub struct ServoPositioner<'a> {
    width: &'a PulseWidth,
    table: ServoTable,
    position: ServoPosition,
}

impl<'a> ServoPositioner<'a> {
    /// Create a positioner and park the servo at `Off`
    pub fn new(width: &'a PulseWidth, table: ServoTable) -> Self {
        let mut positioner = Self {
            width,
            table,
            position: ServoPosition::Off,
        };
        positioner.point_at(ServoPosition::Off);
        positioner
    }

    pub fn position(&self) -> ServoPosition {
        self.position
    }
}

impl ServoTarget for ServoPositioner<'_> {
    fn point_at(&mut self, position: ServoPosition) {
        self.position = position;
        self.width.set(self.table.width(position));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parks_on_creation() {
        let width = PulseWidth::new(0);
        let servo = ServoPositioner::new(&width, ServoTable::default());
        assert_eq!(servo.position(), ServoPosition::Off);
        assert_eq!(width.get(), 60);
    }

    #[test]
    fn test_point_at_updates_shared_width() {
        let width = PulseWidth::new(0);
        let mut servo = ServoPositioner::new(&width, ServoTable::default());
        servo.point_at(ServoPosition::Boil);
        assert_eq!(width.get(), 149);
        servo.point_at(ServoPosition::T100);
        assert_eq!(width.get(), 273);
        assert_eq!(servo.position(), ServoPosition::T100);
    }
}
