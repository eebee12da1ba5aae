//! Cycle-counted one-wire LED serializer
//!
//! The LED line is bit-banged by a short Thumb loop whose instruction
//! timing is the protocol timing. Every path between two writes to the
//! SIO set/clear registers has a fixed cycle cost, including the branch
//! that decides the bit value:
//!
//! ```text
//!   rising edge ─ str SET
//!                 lsls  (bit -> carry)            1
//!                 bcs   taken 2 / not taken 1
//!                 0: nop, movs, movs, b (1+1+1+2)  1: movs, movs, nop, nop
//!                 both paths: 8 cycles including the store
//!                 high loop: subs/bne × n          3n - 1
//!  falling edge ─ str CLR                          1
//!                 low loop: subs/bne × m           3m - 1
//!                 subs r4; bne next bit            1 + 2
//! ```
//!
//! which gives high = 3n + 7 and low = 3m + 3 cycles. The loop counts come
//! from [`LoopCost::solve`] at compile time. The routine lives in RAM so
//! flash cache misses cannot stretch a bit, and it runs inside a critical
//! section so the servo interrupt cannot either.

use core::arch::asm;
use core::convert::Infallible;

use embassy_rp::gpio::Output;
use kettlestat_core::bitstream::{BitTiming, Bitstream, DelayLoops, LoopCost, ProtocolWindow};
use kettlestat_core::color::Color;
use kettlestat_hal::port::MaskedPort;
use smart_leds::{SmartLedsWrite, RGB8};

use crate::sio::SioPort;
use crate::SYS_CLK_HZ;

/// Cycle cost of the serializer loop below
pub const SERIALIZER_COST: LoopCost = LoopCost {
    high_overhead: 7,
    low_overhead: 3,
    per_loop: 3,
};

/// Delay-loop counts at the system clock
pub const LOOPS: DelayLoops = match SERIALIZER_COST.solve(SYS_CLK_HZ, &ProtocolWindow::WS2812B) {
    Ok(loops) => loops,
    Err(_) => panic!("one-wire serializer cannot meet WS2812B timing at SYS_CLK_HZ"),
};

/// Resulting per-bit timing in cycles
pub const TIMING: BitTiming = SERIALIZER_COST.timing(&LOOPS);

const _: () = assert!(LOOPS.is_balanced());
const _: () = assert!(TIMING.one_high > TIMING.zero_high);

/// Reset latch in cycles
const RESET_CYCLES: u32 = ProtocolWindow::WS2812B.reset_us * (SYS_CLK_HZ / 1_000_000);

/// Single-wire WS2812 writer on a SIO-controlled pin
pub struct OneWireLed<'d> {
    /// Keeps the pin configured as a SIO output
    _pin: Output<'d>,
    mask: u32,
}

impl<'d> OneWireLed<'d> {
    /// # Arguments
    /// - `pin`: The data pin, already configured as an output driven low
    /// - `gpio`: Its bank 0 GPIO number
    pub fn new(pin: Output<'d>, gpio: u8) -> Self {
        Self {
            _pin: pin,
            mask: 1 << gpio,
        }
    }
}

impl SmartLedsWrite for OneWireLed<'_> {
    type Error = Infallible;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let set_register = SioPort::set_register();
        let mask = self.mask;

        critical_section::with(|_| {
            for pixel in iterator {
                let pixel: RGB8 = pixel.into();
                let word = Bitstream::word(Color::new(pixel.r, pixel.g, pixel.b));
                // SAFETY: `set_register` is the SIO GPIO_OUT_SET alias and
                // `mask` selects only the pin this driver owns.
                unsafe { transmit(word, set_register, mask) };
            }
            SioPort.clear_bits(mask);
        });

        cortex_m::asm::delay(RESET_CYCLES);
        Ok(())
    }
}

/// Shift out the top 24 bits of `word`, MSB first
///
/// # Safety
/// `set_register` must be the address of a SIO `GPIO_OUT_SET` register
/// with its `GPIO_OUT_CLR` alias four bytes above. Must be called with
/// interrupts disabled for the timing to hold.
#[inline(never)]
#[link_section = ".data.ram_func"]
unsafe fn transmit(word: u32, set_register: u32, mask: u32) {
    asm!(
        "movs r4, #24",
        "2:",
        "str r2, [r1, #0]",
        "lsls r0, r0, #1",
        "bcs 3f",
        "nop",
        "movs r5, #{zero_high}",
        "movs r3, #{zero_low}",
        "b 4f",
        "3:",
        "movs r5, #{one_high}",
        "movs r3, #{one_low}",
        "nop",
        "nop",
        "4:",
        "subs r5, #1",
        "bne 4b",
        "str r2, [r1, #4]",
        "5:",
        "subs r3, #1",
        "bne 5b",
        "subs r4, #1",
        "bne 2b",
        zero_high = const LOOPS.zero_high,
        zero_low = const LOOPS.zero_low,
        one_high = const LOOPS.one_high,
        one_low = const LOOPS.one_low,
        inout("r0") word => _,
        in("r1") set_register,
        in("r2") mask,
        out("r3") _,
        out("r4") _,
        out("r5") _,
        options(nostack),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_counts_at_125mhz() {
        assert_eq!(LOOPS.zero_high, 14);
        assert_eq!(LOOPS.one_high, 31);
        assert_eq!(LOOPS.zero_low, 35);
        assert_eq!(LOOPS.one_low, 18);
    }

    #[test]
    fn test_period_is_157_cycles() {
        assert_eq!(TIMING.period, 157);
        assert_eq!(TIMING.frame_cycles(), 24 * 157);
    }

    #[test]
    fn test_reset_latch() {
        assert_eq!(RESET_CYCLES, 35_000);
    }
}
