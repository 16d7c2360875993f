//! Hardware abstraction for the keyer collaborators
//!
//! The engine needs exactly three capabilities: two paddle line reads, one
//! key line write, and a raw speed-control sample. Each is a small trait so
//! the core runs unchanged against real pins, mocks, or simulations.

use embedded_hal::digital::{InputPin, OutputPin};

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
    /// Analog sample failed
    AdcError,
    /// Hardware not initialized
    NotInitialized,
    /// Invalid configuration
    InvalidConfig,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::AdcError => write!(f, "Analog sample failed"),
            HalError::NotInitialized => write!(f, "Hardware not initialized"),
            HalError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Trait for paddle input reads
pub trait InputPaddle {
    type Error: From<HalError>;

    /// Raw active-level read: is the paddle currently closed
    fn is_pressed(&mut self) -> Result<bool, Self::Error>;
}

/// Trait for key output control
pub trait OutputKey {
    type Error: From<HalError>;

    /// Set key output state (true = key down, false = key up)
    fn set_state(&mut self, state: bool) -> Result<(), Self::Error>;

    /// Get current key output state
    fn get_state(&self) -> Result<bool, Self::Error>;
}

/// Trait for the speed-control sample source
pub trait SpeedControl {
    type Error: From<HalError>;

    /// Raw 10-bit sample, 0..=1023
    fn read_raw(&mut self) -> Result<u16, Self::Error>;
}

/// Paddle input over an embedded-hal pin, active low (pulled up, grounded
/// when pressed)
pub struct EmbeddedHalPaddle<P> {
    pin: P,
}

impl<P> EmbeddedHalPaddle<P>
where
    P: InputPin,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P> InputPaddle for EmbeddedHalPaddle<P>
where
    P: InputPin,
{
    type Error = HalError;

    fn is_pressed(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_low().map_err(|_| HalError::GpioError)
    }
}

/// Key output over an embedded-hal pin, optionally inverted
pub struct EmbeddedHalKeyOutput<P> {
    pin: P,
    inverted: bool,
    state: bool,
}

impl<P> EmbeddedHalKeyOutput<P>
where
    P: OutputPin,
{
    pub fn new(pin: P, inverted: bool) -> Self {
        Self {
            pin,
            inverted,
            state: false,
        }
    }
}

impl<P> OutputKey for EmbeddedHalKeyOutput<P>
where
    P: OutputPin,
{
    type Error = HalError;

    fn set_state(&mut self, state: bool) -> Result<(), Self::Error> {
        let level = state != self.inverted;
        if level {
            self.pin.set_high().map_err(|_| HalError::GpioError)?;
        } else {
            self.pin.set_low().map_err(|_| HalError::GpioError)?;
        }
        self.state = state;
        Ok(())
    }

    fn get_state(&self) -> Result<bool, Self::Error> {
        Ok(self.state)
    }
}

/// Speed source pinned to one raw value, for builds without a speed pot
#[derive(Copy, Clone, Debug)]
pub struct FixedSpeed {
    raw: u16,
}

impl FixedSpeed {
    pub const fn new(raw: u16) -> Self {
        let raw = if raw > crate::timing::SPEED_RAW_FULL_SCALE {
            crate::timing::SPEED_RAW_FULL_SCALE
        } else {
            raw
        };
        Self { raw }
    }

    /// Pin the source so the sampled unit comes out at `unit` ticks
    pub const fn from_unit_ticks(unit: u32) -> Self {
        let unit = if unit < crate::timing::MIN_UNIT_TICKS {
            crate::timing::MIN_UNIT_TICKS
        } else if unit > crate::timing::MAX_UNIT_TICKS {
            crate::timing::MAX_UNIT_TICKS
        } else {
            unit
        };
        Self::new(((unit - crate::timing::MIN_UNIT_TICKS) * 6) as u16)
    }
}

impl SpeedControl for FixedSpeed {
    type Error = HalError;

    fn read_raw(&mut self) -> Result<u16, Self::Error> {
        Ok(self.raw)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing
    //!
    //! State sits behind `RefCell` and the traits are implemented on shared
    //! references, so a test keeps the owner to poke and inspect while the
    //! controller holds `&Mock` collaborators.

    use super::*;
    use core::cell::RefCell;

    #[derive(Default)]
    pub struct MockPaddle {
        pressed: RefCell<bool>,
    }

    impl MockPaddle {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_pressed(&self, pressed: bool) {
            *self.pressed.borrow_mut() = pressed;
        }
    }

    impl InputPaddle for &MockPaddle {
        type Error = HalError;

        fn is_pressed(&mut self) -> Result<bool, Self::Error> {
            Ok(*self.pressed.borrow())
        }
    }

    #[derive(Default)]
    pub struct MockKeyOutput {
        state: RefCell<bool>,
        writes: RefCell<u32>,
    }

    impl MockKeyOutput {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn is_active(&self) -> bool {
            *self.state.borrow()
        }

        /// Number of `set_state` calls observed
        pub fn write_count(&self) -> u32 {
            *self.writes.borrow()
        }
    }

    impl OutputKey for &MockKeyOutput {
        type Error = HalError;

        fn set_state(&mut self, state: bool) -> Result<(), Self::Error> {
            *self.state.borrow_mut() = state;
            *self.writes.borrow_mut() += 1;
            Ok(())
        }

        fn get_state(&self) -> Result<bool, Self::Error> {
            Ok(*self.state.borrow())
        }
    }

    pub struct MockSpeedPot {
        raw: RefCell<u16>,
    }

    impl MockSpeedPot {
        pub fn new(raw: u16) -> Self {
            Self {
                raw: RefCell::new(raw.min(crate::timing::SPEED_RAW_FULL_SCALE)),
            }
        }

        pub fn set_raw(&self, raw: u16) {
            *self.raw.borrow_mut() = raw.min(crate::timing::SPEED_RAW_FULL_SCALE);
        }
    }

    impl SpeedControl for &MockSpeedPot {
        type Error = HalError;

        fn read_raw(&mut self) -> Result<u16, Self::Error> {
            Ok(*self.raw.borrow())
        }
    }
}
