//! Thermostat controller
//!
//! Owns the machine state and the selected setpoint. Every control-loop
//! step feeds it one presence classification and one temperature reading;
//! it answers with the complete set of outputs for that step.

use crate::color::{Color, Palette};
use crate::config::{KettleConfig, SetpointTable};
use crate::servo::ServoPosition;
use crate::traits::{Annunciator, Indicator, RelayOutput, ServoTarget};

use super::events::{Event, Presence, TemperatureReading};
use super::machine::State;
use super::setpoint::Setpoint;

/// Buzzer pattern requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Chirp {
    /// Short acknowledgement
    Ack,
    /// Two short tones, target reached
    Double,
}

/// One tone of a chirp pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tone {
    /// Buzzer on time
    pub on_ms: u32,
    /// Silence after the tone
    pub off_ms: u32,
}

impl Chirp {
    /// Tones making up this chirp
    pub fn pattern(self) -> &'static [Tone] {
        match self {
            Chirp::Ack => &[Tone {
                on_ms: 100,
                off_ms: 0,
            }],
            Chirp::Double => &[
                Tone {
                    on_ms: 60,
                    off_ms: 60,
                },
                Tone {
                    on_ms: 60,
                    off_ms: 0,
                },
            ],
        }
    }

    /// Total pattern length in milliseconds
    pub fn duration_ms(self) -> u32 {
        self.pattern().iter().map(|t| t.on_ms + t.off_ms).sum()
    }
}

/// Everything the hardware should do after one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outputs {
    pub state: State,
    pub relay_closed: bool,
    pub servo: ServoPosition,
    pub indicator: Color,
    /// Set only on the step that changed something audible
    pub chirp: Option<Chirp>,
}

impl Outputs {
    /// Drive the output collaborators
    pub fn apply<R, S, I, A>(&self, relay: &mut R, servo: &mut S, indicator: &mut I, buzzer: &mut A)
    where
        R: RelayOutput,
        S: ServoTarget,
        I: Indicator,
        A: Annunciator,
    {
        relay.set_closed(self.relay_closed);
        servo.point_at(self.servo);
        indicator.show(self.indicator);
        if let Some(chirp) = self.chirp {
            buzzer.chirp(chirp);
        }
    }
}

/// The kettle controller
#[derive(Debug, Clone)]
pub struct Thermostat {
    state: State,
    setpoint: Setpoint,
    /// Presence seen on the previous step, for press detection
    last_presence: Presence,
    /// Seconds-clock value of the last selection input
    last_input_s: u32,
    setpoints: SetpointTable,
    hysteresis: u16,
    palette: Palette,
}

impl Thermostat {
    pub fn new(config: &KettleConfig) -> Self {
        let mut thermostat = Self {
            state: State::Startup,
            setpoint: Setpoint::default(),
            last_presence: Presence::None,
            last_input_s: 0,
            setpoints: config.setpoints,
            hysteresis: config.temperature.hysteresis,
            palette: config.palette,
        };
        thermostat.setpoint = thermostat.default_setpoint();
        thermostat
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn setpoint(&self) -> Setpoint {
        self.setpoint
    }

    /// Converter level the water is heated to
    pub fn target_level(&self) -> u16 {
        self.setpoints.targets[self.setpoint.index()]
    }

    /// Below this level the relay closes again
    pub fn band_floor(&self) -> u16 {
        self.target_level().saturating_sub(self.hysteresis)
    }

    /// Advance one control-loop step
    ///
    /// `now_s` is the frame-derived seconds clock; it only drives the
    /// selection timeout.
    pub fn step(&mut self, presence: Presence, reading: TemperatureReading, now_s: u32) -> Outputs {
        let previous = self.state;
        let mut chirp = None;

        // A held button is one press: only the step it first appears on counts
        let pressed = presence == Presence::Button && self.last_presence != Presence::Button;
        self.last_presence = presence;

        if previous == State::TemperatureSelect && pressed {
            self.setpoint = self.setpoint.next();
            self.last_input_s = now_s;
            chirp = Some(Chirp::Ack);
        }

        let mut next = match presence {
            Presence::Button if !pressed => previous,
            _ => previous.transition(Event::Presence(presence)),
        };

        // Timeout and band checks only apply when presence left the state alone.
        // The band is not checked on the step that entered the thermostat loop,
        // so heating always starts with the relay closed.
        if next == previous {
            if previous == State::TemperatureSelect
                && now_s.wrapping_sub(self.last_input_s) >= self.setpoints.select_timeout_s
            {
                next = previous.transition(Event::SelectTimeout);
            } else if previous.is_thermostatic() {
                if reading.level < self.band_floor() {
                    next = previous.transition(Event::BelowBand);
                } else if reading.level > self.target_level() {
                    next = previous.transition(Event::AboveTarget);
                }
            }
        }

        if next != previous {
            if next == State::TemperatureSelect {
                self.last_input_s = now_s;
            }
            chirp = Some(match next {
                State::HoldingAtTarget => Chirp::Double,
                _ => Chirp::Ack,
            });
        }

        self.state = next;
        self.outputs(reading, chirp)
    }

    fn outputs(&self, reading: TemperatureReading, chirp: Option<Chirp>) -> Outputs {
        let (servo, indicator) = match self.state {
            State::Startup => (ServoPosition::Off, self.palette.idle),
            State::TemperatureSelect => (self.setpoint.servo_position(), self.palette.selecting),
            State::Heating => (reading.bucket.servo_position(), self.palette.heating),
            State::HoldingAtTarget => (reading.bucket.servo_position(), self.palette.holding),
        };

        Outputs {
            state: self.state,
            relay_closed: self.state.heater_allowed(),
            servo,
            indicator,
            chirp,
        }
    }

    fn default_setpoint(&self) -> Setpoint {
        Setpoint::from_index(self.setpoints.default_index as usize).unwrap_or_default()
    }
}
