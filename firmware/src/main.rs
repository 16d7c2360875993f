#![no_std]
#![no_main]

#[cfg(feature = "defmt")]
use defmt_rtt as _;

use panic_halt as _;

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

use paddlekeyer_firmware::*;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    #[cfg(feature = "defmt")]
    defmt::info!("paddle keyer starting");

    let hardware = KeyerHardware::init(PinConfig::default());

    let config = KeyerConfig::from_wpm(KeyerMode::Iambic, true, 2, 24)
        .unwrap_or_else(|_| default_config());
    #[cfg(feature = "defmt")]
    defmt::info!("mode {}, {} wpm", config.mode, config.wpm());

    let controller = KeyerController::new(
        hardware.dot_paddle,
        hardware.dash_paddle,
        hardware.key_output,
        hardware.speed_pot,
        config,
    );
    spawner.must_spawn(keyer_tick_task(controller));

    // supervision loop
    loop {
        Timer::after(Duration::from_secs(1)).await;
        #[cfg(feature = "defmt")]
        defmt::trace!("heartbeat");
    }
}
