//! Ecosystem - owns every agent, food item, resource pool and rule, and
//! advances them one tick at a time
//!
//! Tick order:
//! season -> weather -> decomposition -> oxygen -> soil -> water ->
//! time-of-day rule modulation -> food spawn -> disaster -> agent updates ->
//! reproduction -> harvest of the dead
//!
//! The ecosystem is the single writer of its state. Commands issued from the
//! outside (`add_agent`, `add_food`, `force_disaster`, `set_rule`, ...) are
//! expected to run between ticks.

use tracing::{debug, info, trace};

use crate::core::calendar::TimeOfDay;
use crate::core::config::SimulationConfig;
use crate::core::constants::*;
use crate::core::error::Result;
use crate::core::random::{ChaChaSource, RandomEventSource};
use crate::core::types::{AgentId, Bounds, FoodId, Tick, Vec2};
use crate::entity::agent::{Agent, FeedOutcome, Neighbors, Surroundings};
use crate::entity::species::Species;
use crate::environment::decomposition::DecompositionQueue;
use crate::environment::food::{FoodKind, FoodPool};
use crate::environment::resources::{ResourceField, WaterStress};
use crate::rules::ruleset::{Mode, RuleKey, RulePatch, RuleSet, RuleValue};
use crate::simulation::disaster::Disaster;
use crate::simulation::events::{EventKind, EventLog, TickReport};
use crate::simulation::stats::{sort_agents, AgentSortKey, SortOrder, Statistics};

/// Starting roster used by `populate_default`
const DEFAULT_ROSTER: [(Species, &str); 10] = [
    (Species::Herbivore, "Bambi"),
    (Species::Herbivore, "Thumper"),
    (Species::Herbivore, "Flower"),
    (Species::Carnivore, "Simba"),
    (Species::Carnivore, "ShereKhan"),
    (Species::Omnivore, "Baloo"),
    (Species::Omnivore, "Winnie"),
    (Species::Herbivore, "Rabbit"),
    (Species::Carnivore, "Mowgli"),
    (Species::Omnivore, "Yogi"),
];

/// Gated spawn attempts made by `populate_default`
const DEFAULT_FOOD_ATTEMPTS: usize = 20;

const RANDOM_NAMES: [&str; 8] = [
    "Leo", "Mia", "Max", "Luna", "Charlie", "Bella", "Cooper", "Lucy",
];

pub struct Ecosystem {
    bounds: Bounds,
    mode: Mode,
    time: Tick,
    agents: Vec<Agent>,
    food: FoodPool,
    resources: ResourceField,
    decomposition: DecompositionQueue,
    rules: RuleSet,
    events: EventLog,
    rng: Box<dyn RandomEventSource>,
    next_agent_id: u32,
}

impl Ecosystem {
    /// Empty ecosystem drawing randomness from entropy
    pub fn new(width: f64, height: f64, mode: Mode) -> Self {
        Self::with_random(width, height, mode, Box::new(ChaChaSource::from_entropy()))
    }

    /// Empty ecosystem with a reproducible random source
    pub fn seeded(width: f64, height: f64, mode: Mode, seed: u64) -> Self {
        Self::with_random(width, height, mode, Box::new(ChaChaSource::seeded(seed)))
    }

    /// Empty ecosystem with an injected random source
    pub fn with_random(width: f64, height: f64, mode: Mode, rng: Box<dyn RandomEventSource>) -> Self {
        Self {
            bounds: Bounds::new(width, height),
            mode,
            time: 0,
            agents: Vec::new(),
            food: FoodPool::new(),
            resources: ResourceField::new(),
            decomposition: DecompositionQueue::new(),
            rules: RuleSet::for_mode(mode),
            events: EventLog::new(),
            rng,
            next_agent_id: 1,
        }
    }

    /// Empty ecosystem built from a validated configuration
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut ecosystem = match config.seed {
            Some(seed) => Self::seeded(config.width, config.height, config.mode, seed),
            None => Self::new(config.width, config.height, config.mode),
        };
        ecosystem.update_rules(&config.rules)?;
        Ok(ecosystem)
    }

    /// Add the default ten-animal roster and make the initial food spawn
    /// attempts
    pub fn populate_default(&mut self) {
        for (species, name) in DEFAULT_ROSTER {
            self.add_agent(species, name);
        }
        for _ in 0..DEFAULT_FOOD_ATTEMPTS {
            self.food.spawn(
                self.rules.max_food,
                self.rules.food_spawn_rate,
                self.bounds,
                self.rng.as_mut(),
            );
        }
    }

    /// Throw away all state and start over in `mode` with the default
    /// roster. The random source and plane size are kept.
    pub fn restart(&mut self, mode: Mode) {
        info!(%mode, "restarting ecosystem");
        let rng = std::mem::replace(&mut self.rng, Box::new(ChaChaSource::seeded(0)));
        *self = Self::with_random(self.bounds.width, self.bounds.height, mode, rng);
        self.populate_default();
    }

    pub fn set_random_source(&mut self, rng: Box<dyn RandomEventSource>) {
        self.rng = rng;
    }

    // === TICK ===

    /// Advance the simulation by one tick
    pub fn tick(&mut self) -> TickReport {
        self.time += 1;
        let mut report = TickReport {
            tick: self.time,
            ..Default::default()
        };

        if self.time % SEASON_LENGTH == 0 {
            let season = self.rules.advance_season();
            info!(tick = self.time, %season, "season changed");
            self.events.record(self.time, EventKind::SeasonChanged { season });
            report.season_changed = Some(season);
        }

        self.update_weather(&mut report);
        report.decomposed = self.decomposition.advance(&mut self.resources);
        self.update_oxygen();
        self.update_soil();
        self.update_water();

        self.rules.modulate_for(TimeOfDay::from_tick(self.time));

        report.food_spawned = self
            .food
            .spawn(
                self.rules.max_food,
                self.rules.food_spawn_rate,
                self.bounds,
                self.rng.as_mut(),
            )
            .is_some();

        report.disaster = self.roll_disaster();
        report.kills = self.update_agents();
        report.births = self.reproduce();
        report.deaths = self.harvest_dead();

        trace!(
            tick = self.time,
            population = self.agents.len(),
            food = self.food.len(),
            births = report.births,
            deaths = report.deaths,
            "tick complete"
        );
        report
    }

    fn update_weather(&mut self, report: &mut TickReport) {
        let previous = self.resources.weather;
        if let Some(weather) = self.resources.update_weather(self.time, self.rng.as_mut()) {
            report.weather_drawn = Some(weather);
            if weather != previous {
                info!(tick = self.time, %weather, "weather changed");
                self.events.record(self.time, EventKind::WeatherChanged { weather });
            }
        }
    }

    fn update_oxygen(&mut self) {
        let low = self
            .resources
            .update_oxygen(self.food.plant_count(), self.agents.len());
        if low {
            self.damage_living(HYPOXIA_DAMAGE);
        }
    }

    fn update_soil(&mut self) {
        if self.resources.update_soil(self.food.plant_count()) {
            self.rules.throttle_food_spawn(SOIL_SPAWN_THROTTLE);
        }
    }

    fn update_water(&mut self) {
        let stress = self
            .resources
            .update_water(self.agents.len(), self.food.len());
        if stress == WaterStress::None {
            return;
        }

        self.damage_living(THIRST_DAMAGE);
        if stress == WaterStress::Severe
            && self.rng.chance(DROUGHT_KILL_CHANCE)
            && self.food.remove_random(self.rng.as_mut()).is_some()
        {
            debug!(tick = self.time, "drought killed a food item");
            self.events.record(self.time, EventKind::DroughtKill);
        }
    }

    fn damage_living(&mut self, amount: f64) {
        self.agents
            .iter_mut()
            .filter(|a| a.alive)
            .for_each(|a| a.health -= amount);
    }

    fn roll_disaster(&mut self) -> Option<Disaster> {
        if !self.rng.chance(self.rules.disaster_chance) {
            return None;
        }
        let disaster = Disaster::pick(Disaster::pool(self.mode), self.rng.as_mut());
        disaster.apply(&mut self.rules, &mut self.agents, self.rng.as_mut());
        info!(tick = self.time, %disaster, "disaster struck");
        self.events.record(
            self.time,
            EventKind::Disaster {
                disaster,
                forced: false,
            },
        );
        Some(disaster)
    }

    /// Update every agent in list order. Returns the number of kills.
    fn update_agents(&mut self) -> usize {
        let mut kills = 0;
        for idx in 0..self.agents.len() {
            let Some((agent, neighbors)) = Neighbors::split(&mut self.agents, idx) else {
                continue;
            };
            let mut env = Surroundings {
                rules: &self.rules,
                time: self.time,
                bounds: self.bounds,
                food: &mut self.food,
                neighbors,
                rng: self.rng.as_mut(),
            };
            if let FeedOutcome::Hunted(prey) = agent.update(&mut env) {
                kills += 1;
                debug!(tick = self.time, predator = agent.id.0, prey = prey.0, "predation");
                self.events.record(
                    self.time,
                    EventKind::Predation {
                        predator: agent.id,
                        prey,
                    },
                );
            }
        }
        kills
    }

    /// Offspring of every living agent join the list after the pass, so
    /// newborns never reproduce in the tick they are born.
    fn reproduce(&mut self) -> usize {
        let threshold = self.rules.reproduction_threshold;
        let mut offspring = Vec::new();

        for parent in self.agents.iter().filter(|a| a.alive) {
            let id = AgentId(self.next_agent_id);
            if let Some(child) = parent.reproduce(id, threshold, self.rng.as_mut()) {
                self.next_agent_id += 1;
                debug!(tick = self.time, parent = parent.id.0, child = id.0, "birth");
                self.events.record(
                    self.time,
                    EventKind::Birth {
                        parent: parent.id,
                        child: id,
                        species: child.species,
                    },
                );
                offspring.push(child);
            }
        }

        let births = offspring.len();
        for child in offspring {
            self.spawn_at_random(child);
        }
        births
    }

    /// Move the dead into the decomposition queue
    fn harvest_dead(&mut self) -> usize {
        let (dead, living): (Vec<Agent>, Vec<Agent>) =
            std::mem::take(&mut self.agents).into_iter().partition(|a| !a.alive);
        self.agents = living;

        let deaths = dead.len();
        for agent in dead {
            debug!(
                tick = self.time,
                agent = agent.id.0,
                name = %agent.name,
                cause = ?agent.cause_of_death,
                "death"
            );
            self.events.record(
                self.time,
                EventKind::Death {
                    agent: agent.id,
                    name: agent.name.clone(),
                    cause: agent.cause_of_death,
                },
            );
            self.decomposition.push(agent, self.time);
        }
        deaths
    }

    fn spawn_at_random(&mut self, mut agent: Agent) -> AgentId {
        let x = self.rng.next_f64() * self.bounds.width;
        let y = self.rng.next_f64() * self.bounds.height;
        agent.position = Vec2::new(x, y);
        let id = agent.id;
        self.agents.push(agent);
        id
    }

    fn next_id(&mut self) -> AgentId {
        let id = AgentId(self.next_agent_id);
        self.next_agent_id += 1;
        id
    }

    // === COMMANDS ===

    /// Spawn a fresh agent with species defaults at a random position
    pub fn add_agent(&mut self, species: Species, name: impl Into<String>) -> AgentId {
        let agent = Agent::new(self.next_id(), species, name);
        self.spawn_at_random(agent)
    }

    /// Spawn an agent of random species with a random name
    pub fn add_random_agent(&mut self) -> AgentId {
        let species = Species::ALL[self.rng.index(Species::ALL.len())];
        let name = RANDOM_NAMES[self.rng.index(RANDOM_NAMES.len())];
        self.add_agent(species, name)
    }

    /// Insert a prepared agent, keeping its vitals and position. The agent
    /// is given a fresh id, which is returned.
    pub fn place_agent(&mut self, mut agent: Agent) -> AgentId {
        agent.id = self.next_id();
        agent.position = self.bounds.clamp(agent.position);
        let id = agent.id;
        self.agents.push(agent);
        id
    }

    /// Forced food spawn: `count` attempts, capacity-gated but without the
    /// per-tick Bernoulli trial. Returns how many items were created.
    pub fn add_food(&mut self, count: usize) -> usize {
        (0..count)
            .filter(|_| {
                self.food
                    .spawn_forced(self.rules.max_food, self.bounds, self.rng.as_mut())
                    .is_some()
            })
            .count()
    }

    /// Put one food item at an exact position, ignoring capacity
    pub fn place_food(&mut self, kind: FoodKind, position: Vec2) -> FoodId {
        self.food.place(kind, self.bounds.clamp(position))
    }

    /// Apply one of the four basic disasters right now, bypassing the
    /// probability gate
    pub fn force_disaster(&mut self) -> Disaster {
        let disaster = Disaster::pick(Disaster::forced_pool(), self.rng.as_mut());
        disaster.apply_forced(&mut self.rules, &mut self.agents, self.rng.as_mut());
        info!(tick = self.time, %disaster, "disaster forced");
        self.events.record(
            self.time,
            EventKind::Disaster {
                disaster,
                forced: true,
            },
        );
        disaster
    }

    /// Overwrite one rule. Invalid values are rejected and change nothing.
    pub fn set_rule(&mut self, key: RuleKey, value: RuleValue) -> Result<()> {
        self.rules.set(key, value)?;
        info!(rule = %key, %value, "rule updated");
        Ok(())
    }

    /// Rule-editor path: parse raw text for a named rule, then set it
    pub fn set_rule_from_input(&mut self, key: &str, input: &str) -> Result<RuleValue> {
        let key: RuleKey = key.parse()?;
        let value = key.parse_input(input)?;
        self.set_rule(key, value)?;
        Ok(value)
    }

    /// Merge a partial rule mapping
    pub fn update_rules(&mut self, patch: &RulePatch) -> Result<()> {
        self.rules.merge(patch)
    }

    // === READ-ONLY VIEWS ===

    pub fn statistics(&self) -> Statistics {
        Statistics::collect(self)
    }

    pub fn agent_list(&self, key: AgentSortKey, order: SortOrder) -> Vec<&Agent> {
        sort_agents(&self.agents, key, order)
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn food(&self) -> &FoodPool {
        &self.food
    }

    pub fn resources(&self) -> &ResourceField {
        &self.resources
    }

    pub fn decomposition(&self) -> &DecompositionQueue {
        &self.decomposition
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn time(&self) -> Tick {
        self.time
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_extinct(&self) -> bool {
        self.agents.is_empty()
    }
}
