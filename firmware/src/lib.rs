#![no_std]

//! Firmware library: hardware seam and keyer tasks
//!
//! Real pin and ADC wiring goes through [`hardware`]; until a silicon
//! target is selected a mock implementation stands in, so the task layout
//! and the core engine are exercised end to end.

pub use embassy_executor::Spawner;
pub use embassy_time::Duration;
pub use static_cell::StaticCell;

pub use keyer_core::*;

pub use crate::hardware::*;
pub use crate::tasks::*;

/// Scheduler period; one tick of the keying engine
pub const TICK_PERIOD: Duration = Duration::from_millis(1);

pub mod hardware {
    //! Pin assignment and the mock hardware standing in for the target HAL

    use keyer_core::hal::{HalError, InputPaddle, OutputKey, SpeedControl};
    use keyer_core::timing::SPEED_RAW_FULL_SCALE;

    /// Signal assignment for the three keyer lines and the speed pot
    #[derive(Copy, Clone, Debug)]
    pub struct PinConfig {
        pub dot_pin: u8,
        pub dash_pin: u8,
        pub key_pin: u8,
        pub speed_adc_channel: u8,
    }

    impl Default for PinConfig {
        fn default() -> Self {
            Self {
                dot_pin: 0,
                dash_pin: 1,
                key_pin: 2,
                speed_adc_channel: 0,
            }
        }
    }

    /// Mock paddle line
    #[derive(Debug, Default)]
    pub struct MockPaddle {
        pressed: bool,
    }

    impl MockPaddle {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_pressed(&mut self, pressed: bool) {
            self.pressed = pressed;
        }
    }

    impl InputPaddle for MockPaddle {
        type Error = HalError;

        fn is_pressed(&mut self) -> Result<bool, Self::Error> {
            Ok(self.pressed)
        }
    }

    /// Mock key line
    #[derive(Debug, Default)]
    pub struct MockKeyOutput {
        state: bool,
    }

    impl MockKeyOutput {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn is_active(&self) -> bool {
            self.state
        }
    }

    impl OutputKey for MockKeyOutput {
        type Error = HalError;

        fn set_state(&mut self, state: bool) -> Result<(), Self::Error> {
            #[cfg(feature = "defmt")]
            if state != self.state {
                defmt::debug!("key {}", if state { "down" } else { "up" });
            }
            self.state = state;
            Ok(())
        }

        fn get_state(&self) -> Result<bool, Self::Error> {
            Ok(self.state)
        }
    }

    /// Mock speed pot
    #[derive(Debug)]
    pub struct MockSpeedPot {
        raw: u16,
    }

    impl MockSpeedPot {
        pub fn new(raw: u16) -> Self {
            Self {
                raw: raw.min(SPEED_RAW_FULL_SCALE),
            }
        }

        pub fn set_raw(&mut self, raw: u16) {
            self.raw = raw.min(SPEED_RAW_FULL_SCALE);
        }
    }

    impl SpeedControl for MockSpeedPot {
        type Error = HalError;

        fn read_raw(&mut self) -> Result<u16, Self::Error> {
            Ok(self.raw)
        }
    }

    /// The full hardware set behind the three collaborator seams
    #[derive(Debug)]
    pub struct KeyerHardware {
        pub dot_paddle: MockPaddle,
        pub dash_paddle: MockPaddle,
        pub key_output: MockKeyOutput,
        pub speed_pot: MockSpeedPot,
    }

    impl KeyerHardware {
        pub fn init(_pins: PinConfig) -> Self {
            #[cfg(feature = "defmt")]
            defmt::info!("using mock hardware");
            Self {
                dot_paddle: MockPaddle::new(),
                dash_paddle: MockPaddle::new(),
                key_output: MockKeyOutput::new(),
                // mid-scale pot: 115-tick unit
                speed_pot: MockSpeedPot::new(512),
            }
        }
    }
}

pub mod tasks {
    //! Embassy task wrappers over the core keyer loop

    use super::hardware::{MockKeyOutput, MockPaddle, MockSpeedPot};
    use super::TICK_PERIOD;
    use keyer_core::controller::{keyer_task, KeyerController};

    pub type FirmwareController =
        KeyerController<MockPaddle, MockPaddle, MockKeyOutput, MockSpeedPot>;

    /// Fixed-period tick task over the controller
    #[embassy_executor::task]
    pub async fn keyer_tick_task(controller: FirmwareController) {
        keyer_task(controller, TICK_PERIOD).await
    }
}

mod time_driver;
