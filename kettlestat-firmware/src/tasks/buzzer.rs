//! Buzzer task
//!
//! Plays each chirp the thermostat requests. The control loop never waits
//! for a tone to finish.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::Timer;

use kettlestat_drivers::Buzzer;

use crate::channels::CHIRP;

#[embassy_executor::task]
pub async fn buzzer_task(mut buzzer: Buzzer<Output<'static>>) {
    info!("Buzzer task started");

    loop {
        let chirp = CHIRP.wait().await;
        debug!("Chirp {} ({} ms)", chirp, chirp.duration_ms());

        for tone in chirp.pattern() {
            buzzer.sound(true);
            Timer::after_millis(tone.on_ms as u64).await;
            buzzer.sound(false);
            if tone.off_ms > 0 {
                Timer::after_millis(tone.off_ms as u64).await;
            }
        }
    }
}
