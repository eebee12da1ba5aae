//! Thermostat control loop
//!
//! Samples both analog lines, steps the thermostat and drives the outputs
//! at a fixed rate.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Ticker};

use kettlestat_core::state::{Chirp, Thermostat};
use kettlestat_core::traits::{Annunciator, RelayOutput, SensorClassifier};
use kettlestat_drivers::{AnalogClassifier, GpioRelay, ServoPositioner, StatusLed};
use kettlestat_hal_rp2040::{OneWireLed, RpAnalog};

use crate::channels::{CHIRP, CLOCK};

/// Control loop period
const STEP_PERIOD_MS: u64 = 100;

/// Peripherals owned by the control loop
pub struct ControlHardware {
    pub classifier: AnalogClassifier<RpAnalog<'static>>,
    pub relay: GpioRelay<Output<'static>>,
    pub led: StatusLed<OneWireLed<'static>>,
    pub servo: ServoPositioner<'static>,
    pub thermostat: Thermostat,
}

/// Hands chirps to the buzzer task
struct SignalAnnunciator;

impl Annunciator for SignalAnnunciator {
    fn chirp(&mut self, chirp: Chirp) {
        CHIRP.signal(chirp);
    }
}

#[embassy_executor::task]
pub async fn control_task(hw: ControlHardware) {
    let ControlHardware {
        mut classifier,
        mut relay,
        mut led,
        mut servo,
        mut thermostat,
    } = hw;
    let mut buzzer = SignalAnnunciator;

    info!(
        "Control task started, setpoint {} (level {})",
        thermostat.setpoint(),
        thermostat.target_level()
    );

    let mut ticker = Ticker::every(Duration::from_millis(STEP_PERIOD_MS));
    let mut state = thermostat.state();
    let mut faults = 0;
    let mut failed_writes = 0;

    loop {
        let presence = classifier.classify_presence();
        let reading = classifier.classify_temperature();
        let outputs = thermostat.step(presence, reading, CLOCK.now());
        outputs.apply(&mut relay, &mut servo, &mut led, &mut buzzer);

        if outputs.state != state {
            info!(
                "{} -> {} (level {}, setpoint {}, relay {}, dial {}, led {})",
                state,
                outputs.state,
                reading.level,
                thermostat.setpoint(),
                relay.is_closed(),
                servo.position(),
                led.current()
            );
            state = outputs.state;
        }

        if classifier.faults() != faults {
            faults = classifier.faults();
            warn!("ADC conversion failed ({} total)", faults);
        }
        if led.failed_writes() != failed_writes {
            failed_writes = led.failed_writes();
            warn!("Status LED write failed ({} total)", failed_writes);
        }

        ticker.next().await;
    }
}
