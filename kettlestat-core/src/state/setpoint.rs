//! Selectable brew temperatures

use crate::servo::ServoPosition;

/// Target temperature chosen in `TemperatureSelect`
///
/// Each press of the button advances to the next entry, wrapping from
/// `Boil` back to `WhiteTea`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Setpoint {
    WhiteTea,
    GreenTea,
    #[default]
    Mate,
    BlackTea,
    Boil,
}

impl Setpoint {
    /// Number of selectable setpoints
    pub const COUNT: usize = 5;

    /// Setpoints in button order
    pub const ALL: [Setpoint; Self::COUNT] = [
        Setpoint::WhiteTea,
        Setpoint::GreenTea,
        Setpoint::Mate,
        Setpoint::BlackTea,
        Setpoint::Boil,
    ];

    /// Index into the setpoint target table
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The setpoint one button press later
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    /// Dial position showing this setpoint
    pub fn servo_position(self) -> ServoPosition {
        match self {
            Setpoint::WhiteTea => ServoPosition::WhiteTea,
            Setpoint::GreenTea => ServoPosition::GreenTea,
            Setpoint::Mate => ServoPosition::Mate,
            Setpoint::BlackTea => ServoPosition::BlackTea,
            Setpoint::Boil => ServoPosition::Boil,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps() {
        assert_eq!(Setpoint::WhiteTea.next(), Setpoint::GreenTea);
        assert_eq!(Setpoint::Boil.next(), Setpoint::WhiteTea);
    }

    #[test]
    fn test_full_cycle_returns_home() {
        for start in Setpoint::ALL {
            let mut s = start;
            for _ in 0..Setpoint::COUNT {
                s = s.next();
            }
            assert_eq!(s, start);
        }
    }

    #[test]
    fn test_default_is_mate_on_dial_three() {
        assert_eq!(Setpoint::default(), Setpoint::Mate);
        assert_eq!(Setpoint::default().servo_position().index(), 3);
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Setpoint::from_index(0), Some(Setpoint::WhiteTea));
        assert_eq!(Setpoint::from_index(4), Some(Setpoint::Boil));
        assert_eq!(Setpoint::from_index(5), None);
    }
}
