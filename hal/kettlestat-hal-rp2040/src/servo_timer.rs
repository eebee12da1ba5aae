//! Servo tick source
//!
//! TIMER alarm 0 belongs to the embassy time driver, so the servo tick uses
//! alarm 1 and its own interrupt line (`TIMER_IRQ_1`). Each deadline is the
//! previous deadline plus one tick, so handler latency never accumulates
//! into drift.
//!
//! An RP2040 alarm fires when the low 32 bits of the counter *equal* the
//! armed value. A deadline that is already in the past would only fire
//! after the counter wraps (~71 minutes), so a late handler skips ahead and
//! reports how many ticks it owes.

use embassy_rp::pac;
use kettlestat_core::servo::TICK_US;

/// Alarm used for the servo tick
pub const ALARM: usize = 1;

/// Smallest lead a new deadline must have over the counter
const MIN_LEAD_US: u32 = 2;

pub struct TickTimer {
    deadline: u32,
}

impl TickTimer {
    /// Arm the first tick and enable the alarm interrupt
    ///
    /// The NVIC line still has to be enabled by the caller.
    pub fn start() -> Self {
        let now = pac::TIMER.timerawl().read();
        let deadline = now.wrapping_add(TICK_US);
        pac::TIMER.alarm(ALARM).write_value(deadline);
        pac::TIMER.inte().modify(|w| w.set_alarm(ALARM, true));
        Self { deadline }
    }

    /// Acknowledge the alarm and arm the next tick
    ///
    /// Returns the number of ticks that have elapsed since the previous
    /// call; 1 unless the handler ran late.
    pub fn acknowledge(&mut self) -> u32 {
        pac::TIMER.intr().write(|w| w.set_alarm(ALARM, true));

        let now = pac::TIMER.timerawl().read();
        let (next, ticks) = next_deadline(self.deadline, now);
        pac::TIMER.alarm(ALARM).write_value(next);
        self.deadline = next;
        ticks
    }
}

/// Next deadline after `deadline` that is safely ahead of `now`
fn next_deadline(deadline: u32, now: u32) -> (u32, u32) {
    let mut next = deadline.wrapping_add(TICK_US);
    let mut ticks = 1;
    while (next.wrapping_sub(now) as i32) < MIN_LEAD_US as i32 {
        next = next.wrapping_add(TICK_US);
        ticks += 1;
    }
    (next, ticks)
}
