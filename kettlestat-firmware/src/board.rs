//! Board pin assignment
//!
//! Reference wiring for a Pico-sized RP2040 board. Pins driven by plain
//! embassy outputs (relay GPIO4, buzzer GPIO5) and the analog lines
//! (GPIO26 presence/button, GPIO27 temperature) are fixed by the peripheral
//! handles taken in `main`. The servo and LED lines are also written through
//! raw SIO masks, so their numbers live here and `main` checks them against
//! the handles.

/// Servo signal, driven from the timer interrupt
pub const SERVO_GPIO: u8 = 2;

/// WS2812 status LED data line
pub const LED_GPIO: u8 = 3;

/// Relay board closes the contact on a low input
pub const RELAY_ACTIVE_LOW: bool = false;
