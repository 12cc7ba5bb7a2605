//! Ecosystem events and the bounded event log

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::calendar::Season;
use crate::core::constants::MAX_LOG_ENTRIES;
use crate::core::types::{AgentId, Tick};
use crate::entity::agent::DeathCause;
use crate::entity::species::Species;
use crate::environment::resources::Weather;
use crate::simulation::disaster::Disaster;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    SeasonChanged { season: Season },
    WeatherChanged { weather: Weather },
    Disaster { disaster: Disaster, forced: bool },
    Birth { parent: AgentId, child: AgentId, species: Species },
    Death { agent: AgentId, name: String, cause: Option<DeathCause> },
    Predation { predator: AgentId, prey: AgentId },
    DroughtKill,
}

/// An entry in the event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcoEvent {
    pub tick: Tick,
    pub kind: EventKind,
}

/// The most recent events, oldest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<EcoEvent>,
    capacity: usize,
}

impl EventLog {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LOG_ENTRIES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, tick: Tick, kind: EventKind) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(EcoEvent { tick, kind });
    }

    pub fn iter(&self) -> impl Iterator<Item = &EcoEvent> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of what happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: Tick,
    pub season_changed: Option<Season>,
    pub weather_drawn: Option<Weather>,
    pub food_spawned: bool,
    pub disaster: Option<Disaster>,
    pub births: usize,
    pub deaths: usize,
    pub kills: usize,
    pub decomposed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_drops_oldest_when_full() {
        let mut log = EventLog::with_capacity(3);
        for tick in 0..5 {
            log.record(tick, EventKind::DroughtKill);
        }
        assert_eq!(log.len(), 3);
        let ticks: Vec<Tick> = log.iter().map(|e| e.tick).collect();
        assert_eq!(ticks, vec![2, 3, 4]);
    }

    #[test]
    fn test_zero_capacity_log_stays_empty() {
        let mut log = EventLog::with_capacity(0);
        log.record(1, EventKind::DroughtKill);
        assert!(log.is_empty());
    }
}
