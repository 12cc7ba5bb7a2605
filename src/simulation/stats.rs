//! Read-only views of an ecosystem: aggregate statistics and sorted agent
//! lists

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::calendar::{Season, TimeOfDay};
use crate::core::error::{EcoError, Result};
use crate::core::types::Tick;
use crate::entity::agent::Agent;
use crate::entity::species::Species;
use crate::environment::food::FoodKind;
use crate::environment::resources::Weather;
use crate::rules::ruleset::Mode;
use crate::simulation::ecosystem::Ecosystem;

/// Snapshot of an ecosystem between ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total: usize,
    pub herbivores: usize,
    pub carnivores: usize,
    pub omnivores: usize,
    pub average_energy: f64,
    pub average_health: f64,
    pub average_age: f64,
    pub food: usize,
    pub plant_count: usize,
    pub meat_count: usize,
    pub season: Season,
    pub weather: Weather,
    pub time: Tick,
    pub time_of_day: TimeOfDay,
    pub soil_nutrition: f64,
    pub oxygen_level: f64,
    pub water_level: f64,
    pub decomposing_bodies: usize,
    pub mode: Mode,
}

impl Statistics {
    pub fn collect(ecosystem: &Ecosystem) -> Self {
        let living: Vec<&Agent> = ecosystem.agents().iter().filter(|a| a.alive).collect();
        let count = |species: Species| living.iter().filter(|a| a.species == species).count();
        let mean = |value: fn(&Agent) -> f64| {
            if living.is_empty() {
                0.0
            } else {
                living.iter().map(|a| value(a)).sum::<f64>() / living.len() as f64
            }
        };

        let food = ecosystem.food();
        let field = ecosystem.resources();

        Self {
            total: living.len(),
            herbivores: count(Species::Herbivore),
            carnivores: count(Species::Carnivore),
            omnivores: count(Species::Omnivore),
            average_energy: mean(|a| a.energy),
            average_health: mean(|a| a.health),
            average_age: mean(|a| a.age),
            food: food.len(),
            plant_count: food.count(FoodKind::Plant),
            meat_count: food.count(FoodKind::Meat),
            season: ecosystem.rules().season,
            weather: field.weather,
            time: ecosystem.time(),
            time_of_day: TimeOfDay::from_tick(ecosystem.time()),
            soil_nutrition: field.soil_nutrition,
            oxygen_level: field.oxygen_level,
            water_level: field.water_level,
            decomposing_bodies: ecosystem.decomposition().len(),
            mode: ecosystem.mode(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        format!(
            "t={} {} {} {} | {} alive (H{} C{} O{}) | food {} (plant {} meat {}) | soil {:.1} O2 {:.1} water {:.1} | decomposing {}",
            self.time,
            self.season,
            self.time_of_day,
            self.weather,
            self.total,
            self.herbivores,
            self.carnivores,
            self.omnivores,
            self.food,
            self.plant_count,
            self.meat_count,
            self.soil_nutrition,
            self.oxygen_level,
            self.water_level,
            self.decomposing_bodies,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentSortKey {
    Name,
    Species,
    Energy,
    Health,
    Age,
}

impl AgentSortKey {
    pub const ALL: [AgentSortKey; 5] = [
        AgentSortKey::Name,
        AgentSortKey::Species,
        AgentSortKey::Energy,
        AgentSortKey::Health,
        AgentSortKey::Age,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentSortKey::Name => "name",
            AgentSortKey::Species => "species",
            AgentSortKey::Energy => "energy",
            AgentSortKey::Health => "health",
            AgentSortKey::Age => "age",
        }
    }

    /// The key after this one, wrapping
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn compare(&self, a: &Agent, b: &Agent) -> Ordering {
        match self {
            AgentSortKey::Name => a.name.cmp(&b.name),
            AgentSortKey::Species => a.species.as_str().cmp(b.species.as_str()),
            AgentSortKey::Energy => OrderedFloat(a.energy).cmp(&OrderedFloat(b.energy)),
            AgentSortKey::Health => OrderedFloat(a.health).cmp(&OrderedFloat(b.health)),
            AgentSortKey::Age => OrderedFloat(a.age).cmp(&OrderedFloat(b.age)),
        }
    }
}

impl fmt::Display for AgentSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentSortKey {
    type Err = EcoError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        AgentSortKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| EcoError::UnknownSortKey(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = EcoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(EcoError::UnknownSortKey(other.to_string())),
        }
    }
}

/// Stable sort of a borrowed agent list. Ties keep their original order in
/// both directions.
pub fn sort_agents(agents: &[Agent], key: AgentSortKey, order: SortOrder) -> Vec<&Agent> {
    let mut view: Vec<&Agent> = agents.iter().collect();
    view.sort_by(|a, b| match order {
        SortOrder::Ascending => key.compare(a, b),
        SortOrder::Descending => key.compare(b, a),
    });
    view
}
