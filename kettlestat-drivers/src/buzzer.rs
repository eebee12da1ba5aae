//! Active buzzer
//!
//! The buzzer has its own oscillator, so a tone is just the pin held high.
//! Pattern timing belongs to the caller.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;

pub struct Buzzer<P> {
    pin: P,
    sounding: bool,
}

impl<P: OutputPin<Error = Infallible>> Buzzer<P> {
    /// Create a silent buzzer
    pub fn new(pin: P) -> Self {
        let mut buzzer = Self {
            pin,
            sounding: false,
        };
        buzzer.sound(false);
        buzzer
    }

    /// Start or stop the tone
    pub fn sound(&mut self, on: bool) {
        self.sounding = on;
        self.pin.set_state(on.into()).unwrap_or_else(|e| match e {});
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType;

    struct MockPin {
        high: bool,
        writes: u8,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_starts_silent() {
        let buzzer = Buzzer::new(MockPin {
            high: true,
            writes: 0,
        });
        assert!(!buzzer.is_sounding());
        assert!(!buzzer.pin.high);
        assert_eq!(buzzer.pin.writes, 1);
    }

    #[test]
    fn test_sound_follows_pin() {
        let mut buzzer = Buzzer::new(MockPin {
            high: false,
            writes: 0,
        });
        buzzer.sound(true);
        assert!(buzzer.is_sounding());
        assert!(buzzer.pin.high);
        buzzer.sound(false);
        assert!(!buzzer.pin.high);
    }
}
