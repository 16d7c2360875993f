//! Host-based tests for the paddle keyer engine
//!
//! Scenario tests drive the full controller over mock hardware through
//! scripted paddle patterns; property tests drive the state machine
//! directly with randomized inputs.

pub use keyer_core::test_utils::{PaddleScript, TickHarness, Waveform};
pub use keyer_core::types::{Element, KeyerConfig, KeyerMode};

/// Scenario configuration with immediate release acceptance, so waveform
/// timing is exact against scripted tick offsets
pub fn scenario_config(mode: KeyerMode, autospace: bool, unit: u32) -> KeyerConfig {
    KeyerConfig::new(mode, autospace, 0, unit)
        .unwrap_or_else(|e| panic!("scenario config rejected: {e}"))
}

/// Render a waveform's completed marks as morse
pub fn morse(wave: &Waveform, unit: u32) -> String {
    wave.elements(unit)
        .iter()
        .map(|e| match e {
            Element::Dot => '.',
            Element::Dash => '-',
        })
        .collect()
}

#[cfg(test)]
mod element_timing_tests;
#[cfg(test)]
mod hal_adapter_tests;
