/// Fixed timing for the study cycle
use std::time::Duration;

use crate::timer::minutes;

pub const SHORT_BREAK_DURATION: Duration = Duration::from_secs(20);
pub const LONG_BREAK_DURATION: Duration = minutes(20);
/// Accumulated study time that triggers a long break.
pub const STUDY_CYCLE_DURATION: Duration = minutes(90);
pub const MIN_INTERVAL: Duration = minutes(3);
pub const MAX_INTERVAL: Duration = minutes(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub short_break: Duration,
    pub long_break: Duration,
    pub study_cycle: Duration,
    /// Bounds (inclusive) of the random study interval between short breaks.
    pub min_interval: Duration,
    pub max_interval: Duration,
}

impl Config {
    pub fn new() -> Self {
        Self {
            short_break: SHORT_BREAK_DURATION,
            long_break: LONG_BREAK_DURATION,
            study_cycle: STUDY_CYCLE_DURATION,
            min_interval: MIN_INTERVAL,
            max_interval: MAX_INTERVAL,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
