//! Single-pixel status LED
//!
//! Wraps any `smart-leds` writer. The pixel is rewritten on every call so a
//! frame garbled by noise is repaired on the next control-loop step.

use kettlestat_core::color::Color;
use kettlestat_core::traits::Indicator;
use smart_leds::{SmartLedsWrite, RGB8};

pub struct StatusLed<W> {
    writer: W,
    current: Color,
    failed_writes: u32,
}

impl<W: SmartLedsWrite<Color = RGB8>> StatusLed<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            current: Color::OFF,
            failed_writes: 0,
        }
    }

    /// Color most recently sent
    pub fn current(&self) -> Color {
        self.current
    }

    /// Number of writes the underlying driver rejected
    pub fn failed_writes(&self) -> u32 {
        self.failed_writes
    }
}

impl<W: SmartLedsWrite<Color = RGB8>> Indicator for StatusLed<W> {
    fn show(&mut self, color: Color) {
        self.current = color;
        let pixel = RGB8::new(color.r, color.g, color.b);
        if self.writer.write(core::iter::once(pixel)).is_err() {
            self.failed_writes = self.failed_writes.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the last frame written
    struct MockStrip {
        last: Option<RGB8>,
        pixels: usize,
        fail: bool,
    }

    impl SmartLedsWrite for MockStrip {
        type Error = ();
        type Color = RGB8;

        fn write<T, I>(&mut self, iterator: T) -> Result<(), ()>
        where
            T: IntoIterator<Item = I>,
            I: Into<RGB8>,
        {
            if self.fail {
                return Err(());
            }
            self.pixels = 0;
            for pixel in iterator {
                self.last = Some(pixel.into());
                self.pixels += 1;
            }
            Ok(())
        }
    }

    fn strip(fail: bool) -> MockStrip {
        MockStrip {
            last: None,
            pixels: 0,
            fail,
        }
    }

    #[test]
    fn test_show_writes_one_pixel() {
        let mut led = StatusLed::new(strip(false));
        led.show(Color::new(20, 200, 50));
        assert_eq!(led.writer.pixels, 1);
        assert_eq!(led.writer.last, Some(RGB8::new(20, 200, 50)));
        assert_eq!(led.current(), Color::new(20, 200, 50));
    }

    #[test]
    fn test_write_errors_are_counted() {
        let mut led = StatusLed::new(strip(true));
        led.show(Color::RED);
        led.show(Color::RED);
        assert_eq!(led.failed_writes(), 2);
        assert_eq!(led.current(), Color::RED);
    }
}
