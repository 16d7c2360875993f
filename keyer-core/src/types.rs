//! Core data types for the paddle keyer

/// Morse code elements
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(Hash))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Element {
    /// Dot (short element)
    Dot,
    /// Dash (long element)
    Dash,
}

impl Element {
    /// Returns the duration of this element in units
    pub const fn duration_units(&self) -> u32 {
        match self {
            Element::Dot => 1,
            Element::Dash => 3,
        }
    }

    /// Returns the opposite element
    pub const fn opposite(&self) -> Element {
        match self {
            Element::Dot => Element::Dash,
            Element::Dash => Element::Dot,
        }
    }
}

/// Dual-paddle arbitration policies
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyerMode {
    /// The most recently pressed, still-held paddle takes priority
    LastPressed,
    /// Holding both paddles yields strict dot/dash alternation
    Iambic,
}

impl KeyerMode {
    /// Returns true if this mode alternates elements under a squeeze
    pub const fn is_iambic(&self) -> bool {
        matches!(self, KeyerMode::Iambic)
    }
}

/// Send phases of one element channel
///
/// `Pending` can persist for several ticks while the autospacing gate
/// withholds dispatch.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendState {
    /// Idle, nothing queued
    Off,
    /// Queued, waiting for the dispatch gate
    Pending,
    /// Key asserted for the element's duration
    On,
    /// Key deasserted for the element's trailing gap
    Space,
}

impl SendState {
    /// Returns true while the element owns the key-line window
    pub const fn is_active(&self) -> bool {
        matches!(self, SendState::On | SendState::Space)
    }
}

/// Keyer configuration parameters
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyerConfig {
    /// Arbitration policy
    pub mode: KeyerMode,
    /// Enable the autospacing heuristic
    pub autospace: bool,
    /// Release-filter threshold in ticks
    pub debounce: u8,
    /// Initial unit duration in ticks, replaced by speed-control samples
    pub unit: u32,
}

impl Default for KeyerConfig {
    fn default() -> Self {
        Self {
            mode: KeyerMode::Iambic,
            autospace: true,
            debounce: 2,
            unit: 50,
        }
    }
}

impl KeyerConfig {
    /// Create a new configuration with validation
    pub fn new(
        mode: KeyerMode,
        autospace: bool,
        debounce: u8,
        unit: u32,
    ) -> Result<Self, &'static str> {
        if debounce > 64 {
            return Err("debounce must be at most 64 ticks");
        }
        if unit == 0 || unit > 1000 {
            return Err("unit must be between 1 and 1000 ticks");
        }

        Ok(Self {
            mode,
            autospace,
            debounce,
            unit,
        })
    }

    /// Create a configuration from a speed in words per minute
    /// (PARIS standard, 1 ms tick: unit ticks = 1200 / WPM)
    pub fn from_wpm(
        mode: KeyerMode,
        autospace: bool,
        debounce: u8,
        wpm: u32,
    ) -> Result<Self, &'static str> {
        if wpm == 0 || wpm > 100 {
            return Err("WPM must be between 1 and 100");
        }
        Self::new(mode, autospace, debounce, 1200 / wpm)
    }

    /// Get words per minute from the current unit timing (1 ms tick)
    pub fn wpm(&self) -> u32 {
        (1200 / self.unit).max(1)
    }

    /// Get the dash duration in ticks
    pub fn dash_ticks(&self) -> u32 {
        self.unit * Element::Dash.duration_units()
    }
}
