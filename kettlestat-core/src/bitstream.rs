//! One-wire LED bitstream model
//!
//! A WS2812-style LED latches 24 bits per frame: green, red, blue, each
//! most-significant bit first. Every bit starts with a rising edge and the
//! falling edge lands early for a 0 and late for a 1. The line then stays
//! low until the next bit's rising edge.
//!
//! The serializer that drives the line is hand-timed, so the only thing
//! keeping it on protocol is cycle arithmetic. This module is that
//! arithmetic: which bits go out and in what order, what each instruction
//! path costs, and whether the result lands inside the protocol window.
//!
//! # Delay-loop serializer model
//!
//! ```text
//!        ┌── high_overhead + per_loop·n ──┐
//!  ──────┘                                └── low_overhead + per_loop·m ──┐
//!        ^ rising edge                    ^ falling edge                  ^ next rising edge
//! ```
//!
//! A 1 moves loop iterations from the low phase into the high phase.
//! `n + m` stays fixed, so every bit costs the same number of cycles
//! whatever the data is.

use crate::color::Color;

/// Data bits in one LED frame
pub const BITS_PER_FRAME: u32 = 24;

/// Largest loop count a serializer can load as an 8-bit immediate
pub const MAX_LOOP_COUNT: u32 = 255;

const NS_PER_S: u64 = 1_000_000_000;

/// Convert nanoseconds to processor cycles, rounded to nearest
pub const fn ns_to_cycles(ns: u32, clock_hz: u32) -> u32 {
    ((ns as u64 * clock_hz as u64 + NS_PER_S / 2) / NS_PER_S) as u32
}

/// Convert processor cycles to nanoseconds, rounded down
pub const fn cycles_to_ns(cycles: u32, clock_hz: u32) -> u32 {
    (cycles as u64 * NS_PER_S / clock_hz as u64) as u32
}

/// Bits of one frame in transmission order
#[derive(Debug, Clone)]
pub struct Bitstream {
    word: u32,
    remaining: u8,
}

impl Bitstream {
    /// Start a frame for the given color
    pub const fn new(color: Color) -> Self {
        Self {
            word: Self::word(color),
            remaining: BITS_PER_FRAME as u8,
        }
    }

    /// The frame packed into the top 24 bits of a word
    ///
    /// Serializers shift this left one bit at a time and transmit the
    /// carry, which gives green, red, blue order with MSB first.
    pub const fn word(color: Color) -> u32 {
        let [g, r, b] = color.wire_bytes();
        ((g as u32) << 24) | ((r as u32) << 16) | ((b as u32) << 8)
    }
}

impl Iterator for Bitstream {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.remaining == 0 {
            return None;
        }
        let bit = self.word & 0x8000_0000 != 0;
        self.word <<= 1;
        self.remaining -= 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Bitstream {}

/// Inclusive range in nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NsRange {
    pub min: u32,
    pub max: u32,
}

impl NsRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn contains(&self, ns: u32) -> bool {
        ns >= self.min && ns <= self.max
    }

    /// Midpoint of the range, used as the solver's target
    pub const fn nominal(&self) -> u32 {
        self.min + (self.max - self.min) / 2
    }
}

/// Timing tolerances of a one-wire LED protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProtocolWindow {
    /// High time of a 0 bit
    pub zero_high: NsRange,
    /// High time of a 1 bit
    pub one_high: NsRange,
    /// Low time of a 0 bit
    pub zero_low: NsRange,
    /// Low time of a 1 bit
    pub one_low: NsRange,
    /// Full bit period
    pub period: NsRange,
    /// Minimum low time that latches the frame (µs)
    pub reset_us: u32,
}

impl ProtocolWindow {
    /// WS2812B datasheet values (±150 ns per phase, ±600 ns per period)
    pub const WS2812B: Self = Self {
        zero_high: NsRange::new(250, 550),
        one_high: NsRange::new(650, 950),
        zero_low: NsRange::new(700, 1000),
        one_low: NsRange::new(300, 600),
        period: NsRange::new(650, 1850),
        reset_us: 280,
    };
}

/// Why a serializer cannot meet the protocol at a given clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    /// Fixed instruction overhead alone exceeds a protocol phase
    ClockTooSlow,
    /// 0-bit high time outside the window
    ZeroHighOutOfWindow,
    /// 1-bit high time outside the window
    OneHighOutOfWindow,
    /// A low phase outside the window
    LowOutOfWindow,
    /// Bit period outside the window
    PeriodOutOfWindow,
    /// A loop count does not fit an 8-bit immediate
    LoopCountOverflow,
}

/// Delay-loop iteration counts for each phase of each symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DelayLoops {
    pub zero_high: u32,
    pub one_high: u32,
    pub zero_low: u32,
    pub one_low: u32,
}

impl DelayLoops {
    /// Both symbols spend the same number of loop iterations
    pub const fn is_balanced(&self) -> bool {
        self.zero_high + self.zero_low == self.one_high + self.one_low
    }
}

/// Cycle cost of a delay-loop serializer
///
/// `high_overhead` covers everything between the rising-edge store and the
/// falling-edge store apart from the delay loop, including the look-ahead
/// that decides the next bit. `low_overhead` covers the falling-edge store
/// to the next rising-edge store. Both must already be equal on every
/// branch the serializer can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoopCost {
    pub high_overhead: u32,
    pub low_overhead: u32,
    pub per_loop: u32,
}

impl LoopCost {
    /// Choose loop counts that put both symbols inside `window`
    pub const fn solve(
        &self,
        clock_hz: u32,
        window: &ProtocolWindow,
    ) -> Result<DelayLoops, TimingError> {
        if clock_hz == 0 || self.per_loop == 0 {
            return Err(TimingError::ClockTooSlow);
        }

        let fixed = self.high_overhead + self.low_overhead;
        let period = ns_to_cycles(window.period.nominal(), clock_hz);
        if period <= fixed + 2 * self.per_loop {
            return Err(TimingError::ClockTooSlow);
        }

        let zero_high = self.high_loops(ns_to_cycles(window.zero_high.nominal(), clock_hz));
        let one_high = self.high_loops(ns_to_cycles(window.one_high.nominal(), clock_hz));
        let total = (period - fixed + self.per_loop / 2) / self.per_loop;
        if total <= one_high {
            return Err(TimingError::PeriodOutOfWindow);
        }

        let loops = DelayLoops {
            zero_high,
            one_high,
            zero_low: total - zero_high,
            one_low: total - one_high,
        };
        if loops.zero_high > MAX_LOOP_COUNT
            || loops.one_high > MAX_LOOP_COUNT
            || loops.zero_low > MAX_LOOP_COUNT
            || loops.one_low > MAX_LOOP_COUNT
        {
            return Err(TimingError::LoopCountOverflow);
        }

        match self.timing(&loops).check(clock_hz, window) {
            Ok(()) => Ok(loops),
            Err(e) => Err(e),
        }
    }

    /// Cycles each phase takes with the given loop counts
    pub const fn timing(&self, loops: &DelayLoops) -> BitTiming {
        let zero_high = self.high_overhead + self.per_loop * loops.zero_high;
        let zero_low = self.low_overhead + self.per_loop * loops.zero_low;
        BitTiming {
            zero_high,
            one_high: self.high_overhead + self.per_loop * loops.one_high,
            period: zero_high + zero_low,
        }
    }

    const fn high_loops(&self, cycles: u32) -> u32 {
        if cycles <= self.high_overhead + self.per_loop {
            return 1;
        }
        (cycles - self.high_overhead + self.per_loop / 2) / self.per_loop
    }
}

/// High and low time of one bit, in cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Slot {
    pub high: u32,
    pub low: u32,
}

/// Per-symbol cycle counts of a serializer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitTiming {
    pub zero_high: u32,
    pub one_high: u32,
    pub period: u32,
}

impl BitTiming {
    /// Line shape of a single bit
    pub const fn slot(&self, bit: bool) -> Slot {
        let high = if bit { self.one_high } else { self.zero_high };
        Slot {
            high,
            low: self.period - high,
        }
    }

    /// Line shape of every bit of a frame, in transmission order
    pub fn frame(self, color: Color) -> impl Iterator<Item = Slot> {
        Bitstream::new(color).map(move |bit| self.slot(bit))
    }

    /// Cycles spent on one frame, excluding the reset latch
    pub const fn frame_cycles(&self) -> u32 {
        BITS_PER_FRAME * self.period
    }

    /// Check every phase against the protocol window
    pub const fn check(&self, clock_hz: u32, window: &ProtocolWindow) -> Result<(), TimingError> {
        if self.one_high <= self.zero_high || self.period <= self.one_high {
            return Err(TimingError::OneHighOutOfWindow);
        }
        if !window
            .zero_high
            .contains(cycles_to_ns(self.zero_high, clock_hz))
        {
            return Err(TimingError::ZeroHighOutOfWindow);
        }
        if !window.one_high.contains(cycles_to_ns(self.one_high, clock_hz)) {
            return Err(TimingError::OneHighOutOfWindow);
        }
        let zero = self.slot(false);
        let one = self.slot(true);
        if !window.zero_low.contains(cycles_to_ns(zero.low, clock_hz))
            || !window.one_low.contains(cycles_to_ns(one.low, clock_hz))
        {
            return Err(TimingError::LowOutOfWindow);
        }
        if !window.period.contains(cycles_to_ns(self.period, clock_hz)) {
            return Err(TimingError::PeriodOutOfWindow);
        }
        Ok(())
    }
}
