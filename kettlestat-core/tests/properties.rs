//! Property tests for the timing and control invariants

use kettlestat_core::bitstream::{BitTiming, Bitstream, LoopCost, ProtocolWindow};
use kettlestat_core::color::Color;
use kettlestat_core::config::KettleConfig;
use kettlestat_core::servo::{SecondsClock, ServoPulseScheduler, ServoTable};
use kettlestat_core::state::{Presence, Setpoint, State, Thermostat};
use proptest::prelude::*;

const SERIALIZER: LoopCost = LoopCost {
    high_overhead: 7,
    low_overhead: 3,
    per_loop: 3,
};

fn color() -> impl Strategy<Value = Color> {
    any::<[u8; 3]>().prop_map(Color::from)
}

fn presence() -> impl Strategy<Value = Presence> {
    prop_oneof![
        Just(Presence::None),
        Just(Presence::Object),
        Just(Presence::Button),
    ]
}

proptest! {
    #[test]
    fn frame_is_24_bits_grb_msb_first(c in color()) {
        let bits: Vec<bool> = Bitstream::new(c).collect();
        prop_assert_eq!(bits.len(), 24);
        for (i, byte) in [c.g, c.r, c.b].into_iter().enumerate() {
            for bit in 0..8 {
                prop_assert_eq!(bits[i * 8 + bit], byte & (0x80 >> bit) != 0);
            }
        }
    }

    #[test]
    fn frame_duration_is_data_independent(c in color()) {
        let loops = SERIALIZER.solve(125_000_000, &ProtocolWindow::WS2812B).unwrap();
        let timing: BitTiming = SERIALIZER.timing(&loops);
        let mut total = 0;
        for slot in timing.frame(c) {
            prop_assert!(slot.high == timing.zero_high || slot.high == timing.one_high);
            prop_assert_eq!(slot.high + slot.low, timing.period);
            total += slot.high + slot.low;
        }
        prop_assert_eq!(total, timing.frame_cycles());
    }

    #[test]
    fn solved_timing_meets_window(clock_mhz in 48u32..=200) {
        let clock_hz = clock_mhz * 1_000_000;
        if let Ok(loops) = SERIALIZER.solve(clock_hz, &ProtocolWindow::WS2812B) {
            prop_assert!(loops.is_balanced());
            let timing = SERIALIZER.timing(&loops);
            prop_assert_eq!(timing.check(clock_hz, &ProtocolWindow::WS2812B), Ok(()));
            prop_assert!(timing.one_high > timing.zero_high);
        }
    }

    #[test]
    fn servo_high_ticks_match_width(width in 0u16..2000, frames in 1usize..4) {
        let clock = SecondsClock::new();
        let mut scheduler = ServoPulseScheduler::new(2000, &clock);
        for _ in 0..frames {
            let high = (0..2000).filter(|_| scheduler.on_tick(width).is_high()).count();
            prop_assert_eq!(high, width as usize);
        }
    }

    #[test]
    fn servo_table_widths_fit_frame(index in 0usize..13) {
        let table = ServoTable::default();
        let pos = kettlestat_core::servo::ServoPosition::ALL[index];
        prop_assert!(table.width(pos) < table.frame_ticks);
    }

    #[test]
    fn relay_closed_only_while_heating(
        steps in prop::collection::vec((presence(), 0u16..1024), 1..200)
    ) {
        let config = KettleConfig::default();
        let mut thermostat = Thermostat::new(&config);
        for (i, (p, level)) in steps.into_iter().enumerate() {
            let out = thermostat.step(p, config.temperature.reading(level), i as u32);
            prop_assert_eq!(out.relay_closed, out.state == State::Heating);
        }
    }

    #[test]
    fn no_relay_chatter_inside_band(levels in prop::collection::vec(750u16..=800, 1..50)) {
        let config = KettleConfig::default();
        let mut thermostat = Thermostat::new(&config);
        thermostat.step(Presence::Button, config.temperature.reading(0), 0);
        thermostat.step(Presence::Object, config.temperature.reading(0), 1);
        // Mate target 800: push above it once
        thermostat.step(Presence::Object, config.temperature.reading(801), 2);
        prop_assert_eq!(thermostat.state(), State::HoldingAtTarget);
        for level in levels {
            let out = thermostat.step(Presence::Object, config.temperature.reading(level), 3);
            prop_assert_eq!(out.state, State::HoldingAtTarget);
            prop_assert!(out.chirp.is_none());
        }
    }

    #[test]
    fn selection_cycles_back(presses in 0usize..20) {
        let config = KettleConfig::default();
        let mut thermostat = Thermostat::new(&config);
        thermostat.step(Presence::Button, config.temperature.reading(0), 0);
        for _ in 0..presses {
            thermostat.step(Presence::None, config.temperature.reading(0), 0);
            thermostat.step(Presence::Button, config.temperature.reading(0), 0);
        }
        let expected = Setpoint::ALL[(Setpoint::Mate.index() + presses) % Setpoint::COUNT];
        prop_assert_eq!(thermostat.setpoint(), expected);
    }

    #[test]
    fn held_button_counts_once(hold in 1usize..50) {
        let config = KettleConfig::default();
        let mut thermostat = Thermostat::new(&config);
        for _ in 0..hold {
            thermostat.step(Presence::Button, config.temperature.reading(0), 0);
        }
        let out = thermostat.step(Presence::None, config.temperature.reading(0), 0);
        prop_assert_eq!(out.state, State::TemperatureSelect);
        prop_assert_eq!(thermostat.setpoint(), Setpoint::Mate);
    }
}

#[test]
fn end_to_end_scenario() {
    let config = KettleConfig::default();
    let scale = config.temperature;
    let mut thermostat = Thermostat::new(&config);

    let out = thermostat.step(Presence::None, scale.reading(300), 0);
    assert_eq!(out.state, State::Startup);
    assert!(!out.relay_closed);
    assert_eq!(out.servo.index(), 0);

    let out = thermostat.step(Presence::Button, scale.reading(300), 1);
    assert_eq!(out.state, State::TemperatureSelect);
    assert_eq!(out.servo.index(), 3);

    let out = thermostat.step(Presence::Object, scale.reading(300), 2);
    assert_eq!(out.state, State::Heating);
    assert!(out.relay_closed);

    let out = thermostat.step(Presence::Object, scale.reading(850), 3);
    assert_eq!(out.state, State::HoldingAtTarget);
    assert!(!out.relay_closed);
    assert_eq!(out.servo, scale.bucket(850).servo_position());

    let out = thermostat.step(Presence::None, scale.reading(850), 4);
    assert_eq!(out.state, State::Startup);
    assert!(!out.relay_closed);
    assert_eq!(out.servo.index(), 0);
}
