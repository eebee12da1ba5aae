//! Masked output port
//!
//! The servo line is written from the timer interrupt while the relay,
//! buzzer and LED lines are written from the control loop. When all of them
//! share one port register, a read-modify-write from either side can undo
//! the other side's write. Ports here therefore only expose atomic
//! bit-set and bit-clear operations; a full-register write is never offered.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

/// Output port with atomic set/clear registers
///
/// Methods take `&self`: the hardware makes each operation atomic, so the
/// same port can be used from interrupt and thread context at once.
pub trait MaskedPort {
    /// Drive every pin in `mask` high, leaving the others untouched
    fn set_bits(&self, mask: u32);

    /// Drive every pin in `mask` low, leaving the others untouched
    fn clear_bits(&self, mask: u32);

    /// Current output latch value
    fn output_bits(&self) -> u32;
}

impl<P: MaskedPort> MaskedPort for &P {
    fn set_bits(&self, mask: u32) {
        (**self).set_bits(mask)
    }

    fn clear_bits(&self, mask: u32) {
        (**self).clear_bits(mask)
    }

    fn output_bits(&self) -> u32 {
        (**self).output_bits()
    }
}

/// One pin of a masked port
pub struct PortPin<P> {
    port: P,
    mask: u32,
}

impl<P: MaskedPort> PortPin<P> {
    /// Wrap pin `bit` (0..=31) of `port`
    pub fn new(port: P, bit: u8) -> Self {
        Self {
            port,
            mask: 1 << (bit & 31),
        }
    }

    /// Bit mask of this pin within the port
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Drive the pin to a level
    pub fn set_level(&mut self, high: bool) {
        if high {
            self.port.set_bits(self.mask);
        } else {
            self.port.clear_bits(self.mask);
        }
    }
}

impl<P> ErrorType for PortPin<P> {
    type Error = Infallible;
}

impl<P: MaskedPort> OutputPin for PortPin<P> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.port.clear_bits(self.mask);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.port.set_bits(self.mask);
        Ok(())
    }
}

impl<P: MaskedPort> StatefulOutputPin for PortPin<P> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.port.output_bits() & self.mask != 0)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.port.output_bits() & self.mask == 0)
    }
}
