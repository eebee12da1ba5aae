//! Software servo pulse generation
//!
//! A hobby servo expects one high pulse per 20 ms frame, 0.6 to 2.7 ms wide.
//! Without a free PWM channel the pulse is built from a fixed-rate timer
//! interrupt: every tick the scheduler advances a counter and tells the
//! handler whether the line should be high.
//!
//! The control loop never touches the servo pin. It only stores a new
//! [`PulseWidth`], which the interrupt reads on its next tick.

use portable_atomic::{AtomicU16, AtomicU32, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timer quantum in microseconds
pub const TICK_US: u32 = 10;

/// Ticks per second at [`TICK_US`]
pub const TICKS_PER_SECOND: u32 = 1_000_000 / TICK_US;

/// Default frame length in ticks (20 ms)
pub const FRAME_TICKS: u16 = 2000;

/// Frames per second at the default frame length
pub const FRAMES_PER_SECOND: u32 = TICKS_PER_SECOND / FRAME_TICKS as u32;

/// Servo line level for the current tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

/// Target pulse width in ticks, shared with the timer interrupt
///
/// A single 16-bit cell: the interrupt reads it once per tick and the
/// control loop overwrites it whenever the servo target changes. A stale
/// read costs at most one tick (10 µs) of pulse error.
pub struct PulseWidth(AtomicU16);

impl PulseWidth {
    pub const fn new(ticks: u16) -> Self {
        Self(AtomicU16::new(ticks))
    }

    pub fn set(&self, ticks: u16) {
        self.0.store(ticks, Ordering::Relaxed);
    }

    pub fn get(&self) -> u16 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Whole seconds counted from completed servo frames
pub struct SecondsClock(AtomicU32);

impl SecondsClock {
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Seconds since the scheduler started
    pub fn now(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }

    fn advance(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for SecondsClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-tick servo waveform state, owned by the timer interrupt
pub struct ServoPulseScheduler<'a> {
    frame_ticks: u16,
    frames_per_second: u16,
    tick: u16,
    frames: u16,
    clock: &'a SecondsClock,
}

impl<'a> ServoPulseScheduler<'a> {
    /// Create a scheduler with the given frame length
    ///
    /// `frame_ticks` must be non-zero. The seconds clock advances once per
    /// `TICKS_PER_SECOND / frame_ticks` frames.
    pub fn new(frame_ticks: u16, clock: &'a SecondsClock) -> Self {
        let frame_ticks = frame_ticks.max(1);
        let frames_per_second = (TICKS_PER_SECOND / frame_ticks as u32).clamp(1, u16::MAX as u32);
        Self {
            frame_ticks,
            frames_per_second: frames_per_second as u16,
            tick: 0,
            frames: 0,
            clock,
        }
    }

    /// Advance one tick and return the level the servo line should take
    ///
    /// The line is high for ticks `1..=width` of each frame, so a frame
    /// carries `min(width, frame_ticks)` high ticks.
    pub fn on_tick(&mut self, width: u16) -> Level {
        if self.tick >= self.frame_ticks {
            self.tick = 0;
            self.frames += 1;
            if self.frames >= self.frames_per_second {
                self.frames = 0;
                self.clock.advance();
            }
        }

        self.tick += 1;
        if self.tick <= width {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Named slots of the servo position table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ServoPosition {
    /// Parked, nothing selected
    Off = 0,
    // Setpoint positions
    WhiteTea,
    GreenTea,
    Mate,
    BlackTea,
    Boil,
    // Thermometer positions
    Cold,
    T50,
    T60,
    T70,
    T80,
    T90,
    T100,
}

impl ServoPosition {
    /// Number of table slots
    pub const COUNT: usize = 13;

    pub const ALL: [ServoPosition; Self::COUNT] = [
        ServoPosition::Off,
        ServoPosition::WhiteTea,
        ServoPosition::GreenTea,
        ServoPosition::Mate,
        ServoPosition::BlackTea,
        ServoPosition::Boil,
        ServoPosition::Cold,
        ServoPosition::T50,
        ServoPosition::T60,
        ServoPosition::T70,
        ServoPosition::T80,
        ServoPosition::T90,
        ServoPosition::T100,
    ];

    /// Index into the pulse-width table
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Pulse width for each servo position, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct ServoTable {
    /// Ticks per servo frame
    pub frame_ticks: u16,
    /// Strictly increasing widths, indexed by [`ServoPosition`]
    pub pulse_ticks: [u16; ServoPosition::COUNT],
}

impl ServoTable {
    /// Pulse width for a position
    pub fn width(&self, position: ServoPosition) -> u16 {
        self.pulse_ticks[position.index()]
    }
}

impl Default for ServoTable {
    fn default() -> Self {
        Self {
            frame_ticks: FRAME_TICKS,
            pulse_ticks: [
                60, 77, 95, 113, 131, 149, 166, 184, 202, 220, 238, 255, 273,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn high_ticks(scheduler: &mut ServoPulseScheduler, width: u16, ticks: u32) -> u32 {
        (0..ticks)
            .filter(|_| scheduler.on_tick(width).is_high())
            .count() as u32
    }

    #[test]
    fn test_pulse_width_per_frame() {
        let clock = SecondsClock::new();
        let mut scheduler = ServoPulseScheduler::new(FRAME_TICKS, &clock);
        for _ in 0..3 {
            assert_eq!(high_ticks(&mut scheduler, 113, FRAME_TICKS as u32), 113);
        }
    }

    #[test]
    fn test_pulse_leads_the_frame() {
        let clock = SecondsClock::new();
        let mut scheduler = ServoPulseScheduler::new(10, &clock);
        let levels: [Level; 10] = core::array::from_fn(|_| scheduler.on_tick(3));
        assert!(levels[..3].iter().all(|l| l.is_high()));
        assert!(levels[3..].iter().all(|l| !l.is_high()));
    }

    #[test]
    fn test_zero_width_stays_low() {
        let clock = SecondsClock::new();
        let mut scheduler = ServoPulseScheduler::new(FRAME_TICKS, &clock);
        assert_eq!(high_ticks(&mut scheduler, 0, 4 * FRAME_TICKS as u32), 0);
    }

    #[test]
    fn test_oversized_width_saturates() {
        let clock = SecondsClock::new();
        let mut scheduler = ServoPulseScheduler::new(100, &clock);
        assert_eq!(high_ticks(&mut scheduler, 500, 300), 300);
    }

    #[test]
    fn test_width_change_takes_effect_next_frame() {
        let clock = SecondsClock::new();
        let mut scheduler = ServoPulseScheduler::new(100, &clock);
        assert_eq!(high_ticks(&mut scheduler, 20, 100), 20);
        assert_eq!(high_ticks(&mut scheduler, 40, 100), 40);
    }

    #[test]
    fn test_seconds_clock_from_frames() {
        let clock = SecondsClock::new();
        let mut scheduler = ServoPulseScheduler::new(FRAME_TICKS, &clock);
        // One tick into the 51st frame completes the first 50 frames
        for _ in 0..(FRAMES_PER_SECOND * FRAME_TICKS as u32 + 1) {
            scheduler.on_tick(0);
        }
        assert_eq!(clock.now(), 1);
    }

    #[test]
    fn test_shared_pulse_width() {
        let width = PulseWidth::new(60);
        assert_eq!(width.get(), 60);
        width.set(273);
        assert_eq!(width.get(), 273);
    }

    #[test]
    fn test_default_table_is_increasing() {
        let table = ServoTable::default();
        assert!(table.pulse_ticks.windows(2).all(|w| w[0] < w[1]));
        assert!(table.pulse_ticks.iter().all(|&w| w < table.frame_ticks));
    }

    #[test]
    fn test_position_indices() {
        for (i, pos) in ServoPosition::ALL.iter().enumerate() {
            assert_eq!(pos.index(), i);
        }
        let table = ServoTable::default();
        assert_eq!(table.width(ServoPosition::Off), 60);
        assert_eq!(table.width(ServoPosition::Mate), 113);
        assert_eq!(table.width(ServoPosition::T100), 273);
    }
}
