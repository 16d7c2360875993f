//! The keying decision engine
//!
//! One `tick` call per scheduler iteration: filter the raw paddle reads,
//! track which paddle was pressed last, arbitrate element requests into the
//! one-slot memory, gate dispatch through the autospacing heuristic, and
//! advance the element phases. The returned bool is the key-line level
//! decided for the tick.

use crate::debounce::PaddleDebouncer;
use crate::types::{Element, KeyerConfig, KeyerMode, SendState};

/// Silence level at which the dispatch gate is always open
const FREE_SEND_SPACES: u16 = 7;

/// Saturation bound for the silence counter
const SPACES_OVERFLOW_LIMIT: u16 = 32766;

/// Per-element channel: debounce history, the filtered paddle level from
/// the previous tick, and the send phase.
struct Channel {
    debouncer: PaddleDebouncer,
    pressed: bool,
    send: SendState,
}

impl Channel {
    fn new(debounce: u8) -> Self {
        Self {
            debouncer: PaddleDebouncer::new(debounce),
            pressed: false,
            send: SendState::Off,
        }
    }
}

/// Tick-driven keyer state machine.
///
/// Owns all keying state exclusively; collaborators only supply raw paddle
/// levels and consume the key-line decision.
pub struct KeyerFsm {
    config: KeyerConfig,
    dot: Channel,
    dash: Channel,
    last_pressed: Option<Element>,
    memory: Option<Element>,
    counter: u32,
    spaces: u16,
    unit: u32,
    key_down: bool,
}

impl KeyerFsm {
    /// Create a new state machine with the given configuration
    pub fn new(config: KeyerConfig) -> Self {
        Self {
            config,
            dot: Channel::new(config.debounce),
            dash: Channel::new(config.debounce),
            last_pressed: None,
            memory: None,
            counter: 0,
            spaces: 0,
            unit: config.unit.max(1),
            key_down: false,
        }
    }

    /// Advance one tick from the raw paddle reads and return the key level
    pub fn tick(&mut self, dot_raw: bool, dash_raw: bool) -> bool {
        let dot_now = self.dot.debouncer.update(dot_raw);
        let dash_now = self.dash.debouncer.update(dash_raw);

        self.track_last_pressed(dot_now, dash_now);
        self.arbitrate(Element::Dot);
        self.arbitrate(Element::Dash);
        let dispatched = self.dispatch();
        if !dispatched {
            self.advance();
        }

        self.key_down
    }

    /// Maintain the last-pressed tracker from paddle edges.
    ///
    /// First match wins: a press edge claims the tracker, a release only
    /// clears it if that paddle still held the claim. Edges are detected
    /// against the filtered levels of the previous tick.
    fn track_last_pressed(&mut self, dot_now: bool, dash_now: bool) {
        if dot_now && !self.dot.pressed {
            self.last_pressed = Some(Element::Dot);
        } else if dash_now && !self.dash.pressed {
            self.last_pressed = Some(Element::Dash);
        } else if !dot_now && self.last_pressed == Some(Element::Dot) {
            self.last_pressed = None;
        } else if !dash_now && self.last_pressed == Some(Element::Dash) {
            self.last_pressed = None;
        }
        self.dot.pressed = dot_now;
        self.dash.pressed = dash_now;
    }

    /// Promote a requested element to `Pending`, or latch it into memory
    /// when the other element holds the key-line window.
    fn arbitrate(&mut self, element: Element) {
        let other = element.opposite();
        let requested = self.channel(element).pressed || self.memory == Some(element);
        if !requested || self.channel(element).send != SendState::Off {
            return;
        }
        let other_idle = self.channel(other).send == SendState::Off;

        match self.config.mode {
            KeyerMode::LastPressed => {
                if other_idle
                    && (self.last_pressed != Some(other) || self.memory == Some(element))
                {
                    self.channel_mut(element).send = SendState::Pending;
                } else if self.last_pressed == Some(element) && self.memory.is_none() {
                    self.memory = Some(element);
                }
            }
            KeyerMode::Iambic => {
                if other_idle
                    && (!self.channel(other).pressed || self.memory == Some(element))
                {
                    self.channel_mut(element).send = SendState::Pending;
                } else if self.memory.is_none() {
                    self.memory = Some(element);
                }
            }
        }
    }

    /// Whether a pending element may start this tick.
    ///
    /// With autospacing off the gate is always open. With it on, dispatch
    /// is immediate on the exact tick one silence window completes, within
    /// the letter-space band, or past the free-send ceiling; anything else
    /// waits for the next boundary.
    fn gate_open(&self) -> bool {
        if !self.config.autospace {
            return true;
        }
        (self.counter == 0 && self.spaces == 1)
            || (3..5).contains(&self.spaces)
            || self.spaces >= FREE_SEND_SPACES
    }

    /// Start at most one pending element, dot evaluated first
    fn dispatch(&mut self) -> bool {
        if !self.gate_open() {
            return false;
        }
        for element in [Element::Dot, Element::Dash] {
            if self.channel(element).send == SendState::Pending {
                if self.memory == Some(element) {
                    self.memory = None;
                }
                self.channel_mut(element).send = SendState::On;
                self.key_down = true;
                self.counter = 0;
                self.spaces = 0;
                #[cfg(feature = "defmt")]
                defmt::debug!("keying {}", element);
                return true;
            }
        }
        false
    }

    /// Advance the current phase; runs only on ticks without a dispatch.
    ///
    /// The single counter times the on window, the trailing space, and idle
    /// silence in turn.
    fn advance(&mut self) {
        self.counter += 1;
        if self.dot.send == SendState::On {
            if self.counter >= self.unit {
                self.dot.send = SendState::Space;
                self.key_down = false;
                self.counter = 0;
            }
        } else if self.dot.send == SendState::Space {
            if self.counter >= self.unit {
                self.dot.send = SendState::Off;
                if self.config.autospace {
                    self.spaces = 1;
                }
                self.counter = 0;
            }
        } else if self.dash.send == SendState::On {
            if self.counter >= Element::Dash.duration_units() * self.unit {
                self.dash.send = SendState::Space;
                self.key_down = false;
                self.counter = 0;
            }
        } else if self.dash.send == SendState::Space {
            if self.counter >= self.unit {
                self.dash.send = SendState::Off;
                if self.config.autospace {
                    self.spaces = 1;
                }
                self.counter = 0;
            }
        } else if self.counter >= self.unit {
            self.spaces += 1;
            self.counter = 0;
        }
        if self.spaces > SPACES_OVERFLOW_LIMIT {
            self.spaces = FREE_SEND_SPACES;
        }
    }

    fn channel(&self, element: Element) -> &Channel {
        match element {
            Element::Dot => &self.dot,
            Element::Dash => &self.dash,
        }
    }

    fn channel_mut(&mut self, element: Element) -> &mut Channel {
        match element {
            Element::Dot => &mut self.dot,
            Element::Dash => &mut self.dash,
        }
    }

    /// Key-line level decided on the last tick
    pub fn key_down(&self) -> bool {
        self.key_down
    }

    /// Send phase of the given element
    pub fn send_state(&self, element: Element) -> SendState {
        self.channel(element).send
    }

    /// Queued element, if any
    pub fn memory(&self) -> Option<Element> {
        self.memory
    }

    /// Paddle deemed most recently pressed and still held
    pub fn last_pressed(&self) -> Option<Element> {
        self.last_pressed
    }

    /// Filtered pressed state of the given paddle
    pub fn paddle_pressed(&self, element: Element) -> bool {
        self.channel(element).pressed
    }

    /// Ticks since the last phase transition (the shared counter)
    pub fn tick_counter(&self) -> u32 {
        self.counter
    }

    /// Completed silence windows since the last trailing space ended
    pub fn spaces(&self) -> u16 {
        self.spaces
    }

    /// Current unit duration in ticks
    pub fn unit(&self) -> u32 {
        self.unit
    }

    /// Replace the unit duration with a fresh speed sample
    pub fn set_unit(&mut self, unit: u32) {
        self.unit = unit.max(1);
    }

    /// Get current configuration
    pub fn config(&self) -> &KeyerConfig {
        &self.config
    }

    /// Update configuration; debounce history restarts, timing state keeps
    pub fn set_config(&mut self, config: KeyerConfig) {
        self.config = config;
        self.dot.debouncer.set_threshold(config.debounce);
        self.dash.debouncer.set_threshold(config.debounce);
    }

    /// Return to the power-on state, keeping the last sampled unit
    pub fn reset(&mut self) {
        let debounce = self.config.debounce;
        self.dot = Channel::new(debounce);
        self.dash = Channel::new(debounce);
        self.last_pressed = None;
        self.memory = None;
        self.counter = 0;
        self.spaces = 0;
        self.key_down = false;
    }
}
