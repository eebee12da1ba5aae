//! State machine definition
//!
//! Relay, servo and indicator behavior is a function of the current state
//! and an event.

use super::events::{Event, Presence};

/// Machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Servo parked, relay open, waiting for a button press
    #[default]
    Startup,
    /// Servo shows the selected setpoint, waiting for water
    TemperatureSelect,
    /// Relay closed, water below the hysteresis band
    Heating,
    /// Relay open, water reached the target
    HoldingAtTarget,
}

impl State {
    /// Check if the thermostat loop is running in this state
    pub fn is_thermostatic(&self) -> bool {
        matches!(self, State::Heating | State::HoldingAtTarget)
    }

    /// Check if this state allows the heating relay to close
    pub fn heater_allowed(&self) -> bool {
        matches!(self, State::Heating)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use State::*;

        match (self, event) {
            // Startup transitions
            (Startup, Event::Presence(Presence::Button)) => TemperatureSelect,

            // TemperatureSelect transitions
            (TemperatureSelect, Event::Presence(Presence::Object)) => Heating,
            (TemperatureSelect, Event::SelectTimeout) => Startup,

            // Water removed ends the thermostat loop
            (Heating | HoldingAtTarget, Event::Presence(Presence::None)) => Startup,

            // Hysteresis
            (Heating, Event::AboveTarget) => HoldingAtTarget,
            (HoldingAtTarget, Event::BelowBand) => Heating,

            // Default: stay in current state
            _ => self,
        }
    }
}
