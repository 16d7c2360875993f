#![cfg_attr(not(feature = "std"), no_std)]

//! # Paddlekeyer Core
//!
//! Tick-driven dual-paddle keyer engine for embedded systems.
//! Supports last-pressed and iambic arbitration with optional autospacing.

pub mod controller;
pub mod debounce;
pub mod fsm;
pub mod hal;
pub mod timing;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod test_utils;


pub use controller::*;
pub use debounce::*;
pub use fsm::*;
pub use hal::*;
pub use timing::*;
pub use types::*;

/// Keyer library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration for most amateur radio applications
pub fn default_config() -> KeyerConfig {
    KeyerConfig {
        mode: KeyerMode::Iambic,
        autospace: true,
        debounce: 2,
        unit: 50, // 24 WPM at the 1 ms reference tick
    }
}
