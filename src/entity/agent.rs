//! Agent - a single animal living on the plane
//!
//! Per tick an agent ages, pays the rule-driven energy and health decay,
//! reacts to the time of day, wanders and tries to eat. Death is permanent:
//! once `alive` is false no later update touches the agent again.

use serde::{Deserialize, Serialize};

use crate::core::calendar::TimeOfDay;
use crate::core::constants::*;
use crate::core::random::RandomEventSource;
use crate::core::types::{AgentId, Bounds, Tick, Vec2};
use crate::entity::species::{Feeding, Species};
use crate::environment::food::{FoodKind, FoodPool};
use crate::rules::ruleset::RuleSet;

/// Why an agent died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeathCause {
    Starvation,
    Illness,
    OldAge,
    Predation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub species: Species,
    pub name: String,
    pub energy: f64,
    pub health: f64,
    pub age: f64,
    pub alive: bool,
    pub position: Vec2,
    /// Movement multiplier. Drifts multiplicatively with the time of day.
    pub speed: f64,
    pub max_age: f64,
    pub cause_of_death: Option<DeathCause>,
}

/// What an agent ate during its update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    Nothing,
    Foraged(FoodKind),
    Hunted(AgentId),
}

/// Rounded, read-only view of an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStatus {
    pub id: AgentId,
    pub species: Species,
    pub name: String,
    pub energy: i64,
    pub health: i64,
    pub age: i64,
    pub alive: bool,
    pub position: Vec2,
}

impl Agent {
    pub fn new(id: AgentId, species: Species, name: impl Into<String>) -> Self {
        Self::with_vitals(id, species, name, MAX_VITAL, MAX_VITAL, 0.0)
    }

    pub fn with_vitals(
        id: AgentId,
        species: Species,
        name: impl Into<String>,
        energy: f64,
        health: f64,
        age: f64,
    ) -> Self {
        Self {
            id,
            species,
            name: name.into(),
            energy,
            health,
            age,
            alive: true,
            position: Vec2::default(),
            speed: species.base_speed(),
            max_age: species.max_age(),
            cause_of_death: None,
        }
    }

    /// One tick of life. No-op for dead agents.
    pub fn update(&mut self, env: &mut Surroundings<'_>) -> FeedOutcome {
        if !self.alive {
            return FeedOutcome::Nothing;
        }

        self.age += AGE_PER_TICK;
        self.energy -= env.rules.energy_decay;
        self.health -= env.rules.health_decay;
        if !self.check_vitals() {
            return FeedOutcome::Nothing;
        }

        self.apply_time_of_day(TimeOfDay::from_tick(env.time));
        if !self.check_vitals() {
            return FeedOutcome::Nothing;
        }

        self.wander(env.bounds, &mut *env.rng);
        self.feed(env)
    }

    /// Re-evaluate the death condition. Returns whether the agent is alive.
    pub fn check_vitals(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        let cause = if self.energy <= 0.0 {
            Some(DeathCause::Starvation)
        } else if self.health <= 0.0 {
            Some(DeathCause::Illness)
        } else if self.age > self.max_age {
            Some(DeathCause::OldAge)
        } else {
            None
        };
        if let Some(cause) = cause {
            self.kill(cause);
        }
        self.alive
    }

    pub fn kill(&mut self, cause: DeathCause) {
        if self.alive {
            self.alive = false;
            self.cause_of_death = Some(cause);
        }
    }

    /// Energy cost and compounding speed adjustment for the time of day
    pub fn apply_time_of_day(&mut self, time_of_day: TimeOfDay) {
        match time_of_day {
            TimeOfDay::Dawn => {
                self.energy -= 0.5;
                self.speed *= 1.2;
            }
            TimeOfDay::Day => match self.species {
                Species::Herbivore => self.energy -= 0.3,
                Species::Carnivore => self.energy -= 0.8,
                Species::Omnivore => {}
            },
            TimeOfDay::Dusk => {
                self.energy -= 0.4;
                self.speed *= 0.9;
            }
            TimeOfDay::Night => {
                if self.species == Species::Carnivore {
                    self.speed *= 1.3;
                } else {
                    self.energy -= 0.2;
                    self.speed *= 0.7;
                }
            }
        }
    }

    /// Random step of up to half the current speed per axis, clamped to the plane
    pub fn wander(&mut self, bounds: Bounds, rng: &mut dyn RandomEventSource) {
        let dx = (rng.next_f64() - 0.5) * self.speed;
        let dy = (rng.next_f64() - 0.5) * self.speed;
        self.position = bounds.clamp(self.position + Vec2::new(dx, dy));
    }

    fn feed(&mut self, env: &mut Surroundings<'_>) -> FeedOutcome {
        match self.species.feeding() {
            Feeding::Hunt => match env.neighbors.nearest_prey(self.position, HUNT_RADIUS) {
                Some(prey) => {
                    prey.kill(DeathCause::Predation);
                    let prey_id = prey.id;
                    self.gain(PREY_ENERGY, PREY_HEALTH);
                    FeedOutcome::Hunted(prey_id)
                }
                None => FeedOutcome::Nothing,
            },
            Feeding::Forage(diet) => match env.food.take_nearest(self.position, diet, FORAGE_RADIUS) {
                Some(item) => {
                    self.gain(item.energy, item.health);
                    FeedOutcome::Foraged(item.kind)
                }
                None => FeedOutcome::Nothing,
            },
        }
    }

    fn gain(&mut self, energy: f64, health: f64) {
        self.energy = (self.energy + energy).min(MAX_VITAL);
        self.health = (self.health + health).min(MAX_VITAL);
    }

    /// Offspring under `id` iff both vitals exceed `threshold` and a 10%
    /// trial succeeds. The parent pays nothing.
    pub fn reproduce(
        &self,
        id: AgentId,
        threshold: f64,
        rng: &mut dyn RandomEventSource,
    ) -> Option<Agent> {
        if self.energy > threshold && self.health > threshold && rng.chance(REPRODUCTION_CHANCE) {
            Some(Agent::with_vitals(
                id,
                self.species,
                format!("{}_child", self.name),
                OFFSPRING_ENERGY,
                OFFSPRING_HEALTH,
                0.0,
            ))
        } else {
            None
        }
    }

    pub fn status(&self) -> AgentStatus {
        AgentStatus {
            id: self.id,
            species: self.species,
            name: self.name.clone(),
            energy: self.energy.round() as i64,
            health: self.health.round() as i64,
            age: self.age.round() as i64,
            alive: self.alive,
            position: self.position,
        }
    }
}

/// The other agents of the population, minus the one being updated
#[derive(Debug, Default)]
pub struct Neighbors<'a> {
    before: &'a mut [Agent],
    after: &'a mut [Agent],
}

impl<'a> Neighbors<'a> {
    /// Split `agents` into the agent at `index` and everyone else
    pub fn split(agents: &'a mut [Agent], index: usize) -> Option<(&'a mut Agent, Neighbors<'a>)> {
        if index >= agents.len() {
            return None;
        }
        let (before, rest) = agents.split_at_mut(index);
        let (agent, after) = rest.split_first_mut()?;
        Some((agent, Neighbors { before, after }))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> + '_ {
        self.before.iter_mut().chain(self.after.iter_mut())
    }

    /// Nearest live prey strictly within `radius`. The closest candidate
    /// wins even when another in range comes earlier in the list; only
    /// equal distances fall back to list order.
    pub fn nearest_prey(&mut self, position: Vec2, radius: f64) -> Option<&mut Agent> {
        self.iter_mut()
            .filter(|a| a.alive && a.species.is_prey())
            .map(|a| (a.position.distance(&position), a))
            .filter(|(d, _)| *d < radius)
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, a)| a)
    }
}

/// Everything an agent can see and touch while it updates
pub struct Surroundings<'a> {
    pub rules: &'a RuleSet,
    pub time: Tick,
    pub bounds: Bounds,
    pub food: &'a mut FoodPool,
    pub neighbors: Neighbors<'a>,
    pub rng: &'a mut dyn RandomEventSource,
}
