//! Timing base: speed-control scaling and sampling cadence

/// Full-scale raw sample from the speed control (10-bit converter)
pub const SPEED_RAW_FULL_SCALE: u16 = 1023;

/// Ticks between speed samples, measured on the shared tick counter
pub const SPEED_SAMPLE_INTERVAL: u32 = 10;

/// Unit duration at a zero raw sample
pub const MIN_UNIT_TICKS: u32 = 30;

/// Unit duration at a full-scale raw sample
pub const MAX_UNIT_TICKS: u32 = 200;

/// Map a raw speed-control sample to the unit duration in ticks.
///
/// Linear over the 10-bit band: 0 maps to 30 ticks, 1023 to 200 ticks.
/// Wider samples are clamped into the band.
pub const fn unit_ticks(raw: u16) -> u32 {
    let raw = if raw > SPEED_RAW_FULL_SCALE {
        SPEED_RAW_FULL_SCALE
    } else {
        raw
    };
    MIN_UNIT_TICKS + (raw / 6) as u32
}

/// Whether the speed control is due for a sample this tick.
///
/// The cadence rides on the shared tick counter read at the top of the
/// tick, so dispatches (which zero the counter) realign sampling.
pub const fn speed_sample_due(tick_counter: u32) -> bool {
    tick_counter % SPEED_SAMPLE_INTERVAL == 0
}
