//! Simulation constants - all tunable engine values in one place
//!
//! Rule-driven rates (energy decay, spawn rate, ...) live in `RuleSet`.
//! Everything here is fixed for the lifetime of an ecosystem.

// Time constants
pub const TICKS_PER_DAY: u64 = 240;
pub const TICKS_PER_HOUR: f64 = 10.0;
pub const SEASON_LENGTH: u64 = 100;
pub const WEATHER_INTERVAL: u64 = 50;

// Agent lifecycle
pub const AGE_PER_TICK: f64 = 0.1;
pub const MAX_VITAL: f64 = 100.0;
pub const OFFSPRING_ENERGY: f64 = 80.0;
pub const OFFSPRING_HEALTH: f64 = 90.0;
pub const REPRODUCTION_CHANCE: f64 = 0.1;

// Feeding
pub const FORAGE_RADIUS: f64 = 5.0;
pub const HUNT_RADIUS: f64 = 8.0;
pub const FOOD_ENERGY: f64 = 20.0;
pub const FOOD_HEALTH: f64 = 10.0;
pub const PREY_ENERGY: f64 = 30.0;
pub const PREY_HEALTH: f64 = 20.0;

// Resource pools
pub const RESOURCE_START: f64 = 100.0;
pub const RESOURCE_CEILING: f64 = 200.0;
pub const WATER_REGEN_CEILING: f64 = 100.0;
pub const WATER_REGEN_PER_TICK: f64 = 0.5;
pub const RAIN_WATER_GAIN: f64 = 30.0;
pub const DROUGHT_WATER_LOSS: f64 = 20.0;
pub const RAIN_CHANCE: f64 = 0.3;
pub const DROUGHT_CHANCE: f64 = 0.2;

// Oxygen
pub const OXYGEN_PER_PLANT: f64 = 0.3;
pub const OXYGEN_PER_AGENT: f64 = 0.5;
pub const OXYGEN_LOW: f64 = 30.0;
pub const HYPOXIA_DAMAGE: f64 = 2.0;

// Soil
pub const SOIL_DECAY: f64 = 0.1;
pub const SOIL_PER_PLANT: f64 = 0.05;
pub const SOIL_LOW: f64 = 30.0;
pub const SOIL_SPAWN_THROTTLE: f64 = 0.7;

// Water
pub const WATER_PER_AGENT: f64 = 0.3;
pub const WATER_PER_FOOD: f64 = 0.2;
pub const WATER_LOW: f64 = 20.0;
pub const WATER_SEVERE: f64 = 10.0;
pub const THIRST_DAMAGE: f64 = 1.5;
pub const DROUGHT_KILL_CHANCE: f64 = 0.2;

// Decomposition
pub const DECOMPOSITION_TICKS: u32 = 20;
pub const DECOMPOSITION_TRICKLE: f64 = 0.5;
pub const DECOMPOSITION_LUMP: f64 = 15.0;

// Event log
pub const MAX_LOG_ENTRIES: usize = 50;
