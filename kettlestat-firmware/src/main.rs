//! Kettlestat - Kettle Thermostat Firmware
//!
//! Main firmware binary for an RP2040 kettle controller. One analog line
//! tells an empty base from a kettle of water from a held button, a second
//! one reads the water temperature. The firmware selects a tea setpoint,
//! switches the heating relay with hysteresis, and reports through a dial
//! servo, a status LED and a buzzer.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel};
use embassy_rp::gpio::{Level, Output, Pin, Pull};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use kettlestat_core::state::Thermostat;
use kettlestat_drivers::{AnalogClassifier, Buzzer, GpioRelay, ServoPositioner, StatusLed};
use kettlestat_hal_rp2040::adc::{PRESENCE_CHANNEL, TEMPERATURE_CHANNEL};
use kettlestat_hal_rp2040::{one_wire, OneWireLed, RpAnalog};

use crate::channels::PULSE_WIDTH;
use crate::tasks::ControlHardware;

mod board;
mod channels;
mod config;
mod servo_irq;
mod tasks;

// Keeps the servo pin configured as a SIO output; the interrupt drives it
static SERVO_PIN: StaticCell<Output<'static>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Kettlestat firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    info!(
        "Classifier: object above {}, button above {} ({} bits)",
        config.classifier.object_above,
        config.classifier.button_above,
        config.classifier.resolution_bits
    );
    info!(
        "Temperature: {} bits, hysteresis {}",
        config.temperature.resolution_bits, config.temperature.hysteresis
    );
    info!(
        "LED serializer: high {}/{} cycles, period {} cycles",
        one_wire::TIMING.zero_high,
        one_wire::TIMING.one_high,
        one_wire::TIMING.period
    );

    // Servo: park the width before the first tick, then start the interrupt
    let servo = ServoPositioner::new(&PULSE_WIDTH, config.servo);
    assert_eq!(p.PIN_2.pin(), board::SERVO_GPIO);
    let _servo_pin = SERVO_PIN.init(Output::new(p.PIN_2, Level::Low));
    servo_irq::start(board::SERVO_GPIO, config.servo.frame_ticks);
    info!("Servo tick started on GPIO{}", board::SERVO_GPIO);

    // Status LED
    assert_eq!(p.PIN_3.pin(), board::LED_GPIO);
    let led_pin = Output::new(p.PIN_3, Level::Low);
    let led = StatusLed::new(OneWireLed::new(led_pin, board::LED_GPIO));

    // Relay, open before anything else can run
    let relay = if board::RELAY_ACTIVE_LOW {
        GpioRelay::new_active_low(Output::new(p.PIN_4, Level::High))
    } else {
        GpioRelay::new_active_high(Output::new(p.PIN_4, Level::Low))
    };

    let buzzer = Buzzer::new(Output::new(p.PIN_5, Level::Low));

    // Analog lines: GPIO26 presence/button, GPIO27 temperature
    let adc = Adc::new_blocking(p.ADC, Default::default());
    let presence = Channel::new_pin(p.PIN_26, Pull::None);
    let temperature = Channel::new_pin(p.PIN_27, Pull::None);
    let classifier = AnalogClassifier::new(
        RpAnalog::new(adc, presence, temperature),
        &config,
        PRESENCE_CHANNEL,
        TEMPERATURE_CHANNEL,
    );

    let hardware = ControlHardware {
        classifier,
        relay,
        led,
        servo,
        thermostat: Thermostat::new(&config),
    };

    // Spawn tasks
    spawner.spawn(tasks::buzzer_task(buzzer)).unwrap();
    spawner.spawn(tasks::control_task(hardware)).unwrap();

    info!("All tasks spawned, firmware running");
}
