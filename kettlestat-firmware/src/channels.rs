//! State shared between tasks and the servo interrupt
//!
//! The control task publishes the servo pulse width, the timer interrupt
//! publishes the seconds clock. Both are single atomics, so neither side
//! ever waits on the other.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use kettlestat_core::servo::{PulseWidth, SecondsClock};
use kettlestat_core::state::Chirp;

/// Chirp requested by the thermostat, played by the buzzer task
///
/// A newer chirp replaces one that has not started yet.
pub static CHIRP: Signal<CriticalSectionRawMutex, Chirp> = Signal::new();

/// High time of the servo pulse in ticks
pub static PULSE_WIDTH: PulseWidth = PulseWidth::new(0);

/// Seconds elapsed since the servo tick started
pub static CLOCK: SecondsClock = SecondsClock::new();
