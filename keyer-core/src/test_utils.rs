//! Host-side simulation helpers
//!
//! A scripted paddle pattern drives a full controller over mock hardware,
//! and the resulting key-line waveform is captured as level transitions for
//! analysis. One harness run models one scenario from power-on.

use heapless::Vec;

use crate::controller::KeyerController;
use crate::hal::mock::{MockKeyOutput, MockPaddle, MockSpeedPot};
use crate::timing::{MAX_UNIT_TICKS, MIN_UNIT_TICKS};
use crate::types::{Element, KeyerConfig};

/// Maximum scripted paddle edges per scenario
pub const MAX_SCRIPT_EVENTS: usize = 64;

/// Maximum captured key-line transitions per scenario
pub const MAX_TRANSITIONS: usize = 256;

/// One scripted paddle edge
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PaddleEvent {
    /// Tick at which the edge is applied, before that tick runs
    pub tick: u32,
    pub paddle: Element,
    pub pressed: bool,
}

/// A sequence of paddle edges at tick offsets
#[derive(Clone, Debug, Default)]
pub struct PaddleScript {
    events: Vec<PaddleEvent, MAX_SCRIPT_EVENTS>,
}

impl PaddleScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press `paddle` at `tick`
    pub fn press(mut self, paddle: Element, tick: u32) -> Self {
        self.events
            .push(PaddleEvent {
                tick,
                paddle,
                pressed: true,
            })
            .ok();
        self
    }

    /// Release `paddle` at `tick`
    pub fn release(mut self, paddle: Element, tick: u32) -> Self {
        self.events
            .push(PaddleEvent {
                tick,
                paddle,
                pressed: false,
            })
            .ok();
        self
    }

    /// Hold `paddle` over the half-open tick range `from..to`
    pub fn hold(self, paddle: Element, from: u32, to: u32) -> Self {
        self.press(paddle, from).release(paddle, to)
    }

    /// Hold both paddles over `from..to`, dot edge first
    pub fn squeeze(self, from: u32, to: u32) -> Self {
        self.hold(Element::Dot, from, to).hold(Element::Dash, from, to)
    }

    fn apply(&self, tick: u32, dot: &MockPaddle, dash: &MockPaddle) {
        for event in self.events.iter().filter(|e| e.tick == tick) {
            match event.paddle {
                Element::Dot => dot.set_pressed(event.pressed),
                Element::Dash => dash.set_pressed(event.pressed),
            }
        }
    }
}

/// Captured key-line activity over one scenario
#[derive(Clone, Debug)]
pub struct Waveform {
    transitions: Vec<(u32, bool), MAX_TRANSITIONS>,
    ticks: u32,
}

impl Waveform {
    /// All `(tick, new_level)` transitions, in order
    pub fn transitions(&self) -> &[(u32, bool)] {
        &self.transitions
    }

    /// Number of ticks the scenario ran
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Key level during the given tick
    pub fn level_at(&self, tick: u32) -> bool {
        let mut level = false;
        for &(at, new_level) in self.transitions.iter() {
            if at > tick {
                break;
            }
            level = new_level;
        }
        level
    }

    /// Tick of the first key-down edge
    pub fn first_mark_start(&self) -> Option<u32> {
        self.transitions
            .iter()
            .find(|&&(_, level)| level)
            .map(|&(tick, _)| tick)
    }

    /// Lengths of completed key-down runs, in ticks
    pub fn mark_runs(&self) -> Vec<u32, 64> {
        let mut runs = Vec::new();
        let mut rise = None;
        for &(tick, level) in self.transitions.iter() {
            match (level, rise) {
                (true, None) => rise = Some(tick),
                (false, Some(start)) => {
                    runs.push(tick - start).ok();
                    rise = None;
                }
                _ => {}
            }
        }
        runs
    }

    /// Lengths of key-up runs between consecutive marks, in ticks
    pub fn gap_runs(&self) -> Vec<u32, 64> {
        let mut gaps = Vec::new();
        let mut fall = None;
        for &(tick, level) in self.transitions.iter() {
            match (level, fall) {
                (false, _) => fall = Some(tick),
                (true, Some(start)) => {
                    gaps.push(tick - start).ok();
                    fall = None;
                }
                _ => {}
            }
        }
        gaps
    }

    /// Classify completed marks as elements by their length against `unit`
    pub fn elements(&self, unit: u32) -> Vec<Element, 64> {
        let mut elements = Vec::new();
        for run in self.mark_runs() {
            let element = if run >= unit * Element::Dash.duration_units() {
                Element::Dash
            } else {
                Element::Dot
            };
            elements.push(element).ok();
        }
        elements
    }
}

/// Drives a controller over mock hardware for a scripted scenario.
///
/// The speed pot is pinned so the sampled unit equals the configured one
/// (clamped into the pot's band), keeping timing constant over the run.
pub struct TickHarness {
    pub dot: MockPaddle,
    pub dash: MockPaddle,
    pub key: MockKeyOutput,
    pub speed: MockSpeedPot,
    config: KeyerConfig,
}

impl TickHarness {
    pub fn new(config: KeyerConfig) -> Self {
        let unit = config.unit.clamp(MIN_UNIT_TICKS, MAX_UNIT_TICKS);
        Self {
            dot: MockPaddle::new(),
            dash: MockPaddle::new(),
            key: MockKeyOutput::new(),
            speed: MockSpeedPot::new(((unit - MIN_UNIT_TICKS) * 6) as u16),
            config,
        }
    }

    /// Run `ticks` scheduler ticks from power-on and capture the waveform
    pub fn run(&self, script: &PaddleScript, ticks: u32) -> Waveform {
        let mut controller = KeyerController::new(
            &self.dot,
            &self.dash,
            &self.key,
            &self.speed,
            self.config,
        );

        let mut transitions = Vec::new();
        let mut level = false;
        for tick in 0..ticks {
            script.apply(tick, &self.dot, &self.dash);
            let now = controller
                .run_tick()
                .unwrap_or_else(|_| unreachable!("mock collaborators are infallible"));
            if now != level {
                transitions.push((tick, now)).ok();
                level = now;
            }
        }
        Waveform { transitions, ticks }
    }
}
