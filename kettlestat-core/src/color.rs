//! Indicator colors

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One RGB value for the status LED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "[u8; 3]", into = "[u8; 3]")
)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const OFF: Self = Self::new(0, 0, 0);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
    pub const YELLOW: Self = Self::new(255, 255, 0);
    pub const MAGENTA: Self = Self::new(255, 0, 255);

    /// Create a color from its channel intensities
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel bytes in transmission order (green, red, blue)
    pub const fn wire_bytes(self) -> [u8; 3] {
        [self.g, self.r, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Indicator color for each thermostat state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct Palette {
    /// Waiting for a button press
    pub idle: Color,
    /// Choosing the target temperature
    pub selecting: Color,
    /// Relay closed, water below the hysteresis band
    pub heating: Color,
    /// Relay open, water at target
    pub holding: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            idle: Color::BLUE,
            selecting: Color::YELLOW,
            heating: Color::RED,
            holding: Color::new(20, 200, 50),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_order_is_grb() {
        let c = Color::new(0x11, 0x22, 0x33);
        assert_eq!(c.wire_bytes(), [0x22, 0x11, 0x33]);
    }

    #[test]
    fn test_array_conversion() {
        let c: Color = [1, 2, 3].into();
        assert_eq!(c, Color::new(1, 2, 3));
        let raw: [u8; 3] = c.into();
        assert_eq!(raw, [1, 2, 3]);
    }

    #[test]
    fn test_default_palette_is_distinct() {
        let p = Palette::default();
        let all = [p.idle, p.selecting, p.heating, p.holding];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
