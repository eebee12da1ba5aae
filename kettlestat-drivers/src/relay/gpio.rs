//! GPIO relay output
//!
//! Switches the heating element through a relay or SSR driven by one pin.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use kettlestat_core::traits::RelayOutput;

/// GPIO relay output
///
/// The pin can be configured as active-high (default) or active-low.
pub struct GpioRelay<P> {
    pin: P,
    /// If true, relay closed = pin LOW
    inverted: bool,
    /// Current logical state (true = heating)
    closed: bool,
}

impl<P: OutputPin<Error = Infallible>> GpioRelay<P> {
    /// Create a new relay output, initially open
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin driving the relay
    /// - `inverted`: If true, the relay closes when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut relay = Self {
            pin,
            inverted,
            closed: false,
        };
        relay.set_closed(false);
        relay
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: OutputPin<Error = Infallible>> RelayOutput for GpioRelay<P> {
    fn set_closed(&mut self, closed: bool) {
        self.closed = closed;

        let result = if closed != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.unwrap_or_else(|e| match e {});
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new() -> Self {
            // Floating high so a missing initial write shows up
            Self { high: true }
        }
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn test_active_high_relay() {
        let mut relay = GpioRelay::new_active_high(MockPin::new());

        // Initially open
        assert!(!relay.is_closed());
        assert!(!relay.pin.high);

        relay.set_closed(true);
        assert!(relay.is_closed());
        assert!(relay.pin.high);

        relay.set_closed(false);
        assert!(!relay.is_closed());
        assert!(!relay.pin.high);
    }

    #[test]
    fn test_active_low_relay() {
        let mut relay = GpioRelay::new_active_low(MockPin::new());

        // Initially open (pin is high for active-low)
        assert!(!relay.is_closed());
        assert!(relay.pin.high);

        relay.set_closed(true);
        assert!(relay.is_closed());
        assert!(!relay.pin.high);
    }

    #[test]
    fn test_relay_trait() {
        let mut relay = GpioRelay::new_active_high(MockPin::new());

        fn check_relay<R: RelayOutput>(r: &mut R) {
            assert!(!r.is_closed());
            r.set_closed(true);
            assert!(r.is_closed());
        }

        check_relay(&mut relay);
    }
}
