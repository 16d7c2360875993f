//! Tick-loop glue between the collaborators and the state machine
//!
//! `KeyerController` owns the three hardware seams and the FSM. One
//! `run_tick` per scheduler iteration: refresh the unit duration when the
//! sampling cadence is due, read both paddles, advance the FSM, and drive
//! the key line when its level changes.

use crate::fsm::KeyerFsm;
use crate::hal::{HalError, InputPaddle, OutputKey, SpeedControl};
use crate::timing::{speed_sample_due, unit_ticks};
use crate::types::KeyerConfig;

/// Owns the injected collaborators and the keying state machine.
///
/// All four collaborators share one error type so `run_tick` can propagate
/// any hardware fault unchanged.
pub struct KeyerController<DOT, DASH, KEY, SPD> {
    dot: DOT,
    dash: DASH,
    key: KEY,
    speed: SPD,
    fsm: KeyerFsm,
}

impl<E, DOT, DASH, KEY, SPD> KeyerController<DOT, DASH, KEY, SPD>
where
    E: From<HalError>,
    DOT: InputPaddle<Error = E>,
    DASH: InputPaddle<Error = E>,
    KEY: OutputKey<Error = E>,
    SPD: SpeedControl<Error = E>,
{
    /// Wire the collaborators to a fresh state machine
    pub fn new(dot: DOT, dash: DASH, key: KEY, speed: SPD, config: KeyerConfig) -> Self {
        Self {
            dot,
            dash,
            key,
            speed,
            fsm: KeyerFsm::new(config),
        }
    }

    /// Execute one scheduler tick and return the key level decided for it.
    ///
    /// The speed control is sampled when the shared tick counter reads a
    /// multiple of the sampling interval at the top of the tick. The key
    /// line is written only on level changes.
    pub fn run_tick(&mut self) -> Result<bool, E> {
        if speed_sample_due(self.fsm.tick_counter()) {
            let raw = self.speed.read_raw()?;
            self.fsm.set_unit(unit_ticks(raw));
        }

        let dot_raw = self.dot.is_pressed()?;
        let dash_raw = self.dash.is_pressed()?;

        let previous = self.fsm.key_down();
        let level = self.fsm.tick(dot_raw, dash_raw);
        if level != previous {
            self.key.set_state(level)?;
        }
        Ok(level)
    }

    /// The owned state machine
    pub fn fsm(&self) -> &KeyerFsm {
        &self.fsm
    }

    /// Mutable access, for reconfiguration between ticks
    pub fn fsm_mut(&mut self) -> &mut KeyerFsm {
        &mut self.fsm
    }

    /// Current configuration
    pub fn config(&self) -> &KeyerConfig {
        self.fsm.config()
    }
}

/// Async task running the controller on a fixed tick period.
///
/// Collaborator faults skip the tick; the loop itself never stops.
#[cfg(feature = "embassy-time")]
pub async fn keyer_task<E, DOT, DASH, KEY, SPD>(
    mut controller: KeyerController<DOT, DASH, KEY, SPD>,
    tick_period: embassy_time::Duration,
) -> !
where
    E: From<HalError>,
    DOT: InputPaddle<Error = E>,
    DASH: InputPaddle<Error = E>,
    KEY: OutputKey<Error = E>,
    SPD: SpeedControl<Error = E>,
{
    use embassy_time::Timer;

    #[cfg(feature = "defmt")]
    defmt::info!("keyer task started");

    loop {
        if controller.run_tick().is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("collaborator fault, tick skipped");
        }
        Timer::after(tick_period).await;
    }
}
