//! Calendar system for time-of-day and season tracking
//!
//! A day is 240 ticks (10 ticks per hour). Seasons cycle every 100 ticks and
//! each season carries a fixed baseline for food spawning and energy decay.

use serde::{Deserialize, Serialize};

use crate::core::constants::{TICKS_PER_DAY, TICKS_PER_HOUR};
use crate::core::types::Tick;

/// Time of day periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Dawn,  // 05:00-08:00
    Day,   // 08:00-18:00
    Dusk,  // 18:00-21:00
    Night, // 21:00-05:00
}

impl TimeOfDay {
    pub fn from_hour(hour: f64) -> Self {
        if (5.0..8.0).contains(&hour) {
            TimeOfDay::Dawn
        } else if (8.0..18.0).contains(&hour) {
            TimeOfDay::Day
        } else if (18.0..21.0).contains(&hour) {
            TimeOfDay::Dusk
        } else {
            TimeOfDay::Night
        }
    }

    pub fn from_tick(tick: Tick) -> Self {
        Self::from_hour(hour_of_day(tick))
    }

    /// (food spawn factor, energy decay factor) applied every tick
    pub fn rule_factors(&self) -> (f64, f64) {
        match self {
            TimeOfDay::Dawn => (1.2, 0.9),
            TimeOfDay::Day => (1.5, 1.1),
            TimeOfDay::Dusk => (0.8, 1.0),
            TimeOfDay::Night => (0.3, 0.8),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Dawn => "dawn",
            TimeOfDay::Day => "day",
            TimeOfDay::Dusk => "dusk",
            TimeOfDay::Night => "night",
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fractional hour of the day for a tick
pub fn hour_of_day(tick: Tick) -> f64 {
    (tick % TICKS_PER_DAY) as f64 / TICKS_PER_HOUR
}

/// Season cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn next(&self) -> Self {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Autumn,
            Season::Autumn => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    /// Baseline (food spawn rate, energy decay) reapplied on season change
    pub fn baseline(&self) -> (f64, f64) {
        match self {
            Season::Spring => (0.4, 1.5),
            Season::Summer => (0.5, 2.0),
            Season::Autumn => (0.3, 2.5),
            Season::Winter => (0.1, 3.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
