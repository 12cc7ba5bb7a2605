//! Disasters - discrete shocks to rules and agent vitals
//!
//! Natural disasters fire from the tick with probability `disaster_chance`
//! and draw from a mode-dependent pool. Forced disasters come from the
//! command interface, always draw from the four basic kinds and use their
//! own, milder effect table. Effects are never reversed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::random::RandomEventSource;
use crate::entity::agent::Agent;
use crate::entity::species::Species;
use crate::rules::ruleset::{Mode, RuleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disaster {
    Drought,
    Flood,
    Disease,
    PredatorSurge,
    Wildfire,
    Earthquake,
    Blizzard,
    Heatwave,
}

const BASIC_POOL: [Disaster; 4] = [
    Disaster::Drought,
    Disaster::Flood,
    Disaster::Disease,
    Disaster::PredatorSurge,
];

const ADVANCED_POOL: [Disaster; 8] = [
    Disaster::Drought,
    Disaster::Flood,
    Disaster::Disease,
    Disaster::PredatorSurge,
    Disaster::Wildfire,
    Disaster::Earthquake,
    Disaster::Blizzard,
    Disaster::Heatwave,
];

impl Disaster {
    /// Disasters that can strike naturally in `mode`
    pub fn pool(mode: Mode) -> &'static [Disaster] {
        match mode {
            Mode::Basic => &BASIC_POOL,
            Mode::Advanced => &ADVANCED_POOL,
        }
    }

    /// Disasters available to the command interface, regardless of mode
    pub fn forced_pool() -> &'static [Disaster] {
        &BASIC_POOL
    }

    /// Uniform pick from a non-empty pool
    pub fn pick(pool: &[Disaster], rng: &mut dyn RandomEventSource) -> Disaster {
        pool[rng.index(pool.len())]
    }

    /// Natural effect table
    pub fn apply(&self, rules: &mut RuleSet, agents: &mut [Agent], rng: &mut dyn RandomEventSource) {
        match self {
            Disaster::Drought => {
                rules.food_spawn_rate *= 0.2;
                rules.resource_regeneration *= 0.3;
            }
            Disaster::Flood => {
                agents.iter_mut().for_each(|a| a.health -= 20.0);
                rules.max_food *= 0.7;
            }
            Disaster::Disease => {
                let spread = rules.disease_spread * 3.0;
                for agent in agents.iter_mut() {
                    if rng.chance(spread) {
                        agent.health -= 30.0;
                    }
                }
            }
            Disaster::PredatorSurge => {
                rules.energy_decay *= 1.5;
                rules.predation_efficiency *= 1.3;
            }
            Disaster::Wildfire => {
                rules.food_spawn_rate *= 0.1;
                agents
                    .iter_mut()
                    .filter(|a| a.species == Species::Herbivore)
                    .for_each(|a| a.health -= 25.0);
            }
            Disaster::Earthquake => {
                agents.iter_mut().for_each(|a| a.health -= 15.0);
                rules.max_food *= 0.8;
            }
            Disaster::Blizzard => {
                rules.food_spawn_rate *= 0.05;
                agents.iter_mut().for_each(|a| a.energy -= 10.0);
            }
            Disaster::Heatwave => {
                rules.energy_decay *= 1.8;
                rules.water_availability *= 0.4;
            }
        }
    }

    /// Effect table for disasters forced through the command interface
    pub fn apply_forced(
        &self,
        rules: &mut RuleSet,
        agents: &mut [Agent],
        rng: &mut dyn RandomEventSource,
    ) {
        match self {
            Disaster::Drought => rules.food_spawn_rate = 0.05,
            Disaster::Flood => agents.iter_mut().for_each(|a| a.health -= 20.0),
            Disaster::Disease => {
                for agent in agents.iter_mut() {
                    if rng.chance(0.3) {
                        agent.health -= 30.0;
                    }
                }
            }
            Disaster::PredatorSurge => rules.energy_decay *= 1.5,
            // Outside the forced pool; only reachable when applied directly
            Disaster::Wildfire | Disaster::Earthquake | Disaster::Blizzard | Disaster::Heatwave => {
                self.apply(rules, agents, rng)
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Disaster::Drought => "drought",
            Disaster::Flood => "flood",
            Disaster::Disease => "disease",
            Disaster::PredatorSurge => "predator_surge",
            Disaster::Wildfire => "wildfire",
            Disaster::Earthquake => "earthquake",
            Disaster::Blizzard => "blizzard",
            Disaster::Heatwave => "heatwave",
        }
    }
}

impl fmt::Display for Disaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
