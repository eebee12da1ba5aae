//! SIO output port
//!
//! The SIO block has separate set and clear aliases of the GPIO output
//! register. Writing a mask to either changes only those pins in one bus
//! cycle, so interrupt and thread code can share bank 0 safely.

use embassy_rp::pac;
use kettlestat_hal::port::MaskedPort;

/// GPIO bank 0 output register
#[derive(Debug, Clone, Copy, Default)]
pub struct SioPort;

impl SioPort {
    /// Address of `GPIO_OUT_SET`
    ///
    /// `GPIO_OUT_CLR` follows at offset 4.
    pub fn set_register() -> u32 {
        pac::SIO.gpio_out(0).value_set().as_ptr() as u32
    }
}

impl MaskedPort for SioPort {
    fn set_bits(&self, mask: u32) {
        pac::SIO.gpio_out(0).value_set().write_value(mask);
    }

    fn clear_bits(&self, mask: u32) {
        pac::SIO.gpio_out(0).value_clr().write_value(mask);
    }

    fn output_bits(&self) -> u32 {
        pac::SIO.gpio_out(0).value().read()
    }
}
