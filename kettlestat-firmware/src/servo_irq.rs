//! Servo tick interrupt
//!
//! Every 10 µs the handler advances the pulse scheduler and drives the
//! servo pin through the SIO set/clear registers. The scheduler and the pin
//! are owned by the interrupt; thread code only touches `PULSE_WIDTH`.

use core::cell::RefCell;

use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use kettlestat_core::servo::ServoPulseScheduler;
use kettlestat_hal::PortPin;
use kettlestat_hal_rp2040::{SioPort, TickTimer};

use crate::channels::{CLOCK, PULSE_WIDTH};

struct ServoLine {
    timer: TickTimer,
    scheduler: ServoPulseScheduler<'static>,
    pin: PortPin<SioPort>,
}

static SERVO_LINE: Mutex<CriticalSectionRawMutex, RefCell<Option<ServoLine>>> =
    Mutex::new(RefCell::new(None));

/// Start the servo waveform on `gpio`
///
/// The pin must already be a SIO output.
pub fn start(gpio: u8, frame_ticks: u16) {
    SERVO_LINE.lock(|line| {
        *line.borrow_mut() = Some(ServoLine {
            timer: TickTimer::start(),
            scheduler: ServoPulseScheduler::new(frame_ticks, &CLOCK),
            pin: PortPin::new(SioPort, gpio),
        });
    });

    // Above the executor, so only the LED critical section can delay a tick
    interrupt::TIMER_IRQ_1.set_priority(Priority::P1);
    unsafe { interrupt::TIMER_IRQ_1.enable() };
}

#[interrupt]
unsafe fn TIMER_IRQ_1() {
    SERVO_LINE.lock(|line| {
        if let Some(line) = line.borrow_mut().as_mut() {
            let width = PULSE_WIDTH.get();
            let mut level = None;
            for _ in 0..line.timer.acknowledge() {
                level = Some(line.scheduler.on_tick(width));
            }
            if let Some(level) = level {
                line.pin.set_level(level.is_high());
            }
        }
    });
}
