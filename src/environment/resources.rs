//! Resource field - the shared continuous pools of the environment
//!
//! Soil nutrition, oxygen and water each follow their own per-tick law.
//! Soil and oxygen are capped at 200. Water is capped at 200 for rain bursts
//! but only regenerates up to 100 in clear weather.

use serde::{Deserialize, Serialize};

use crate::core::constants::*;
use crate::core::random::RandomEventSource;
use crate::core::types::Tick;

/// Current weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    #[default]
    Clear,
    Rainy,
    Drought,
}

impl Weather {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Clear => "clear",
            Weather::Rainy => "rainy",
            Weather::Drought => "drought",
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How badly the water pool is stressed after consumption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterStress {
    None,
    /// Below 20: every agent loses health
    Thirst,
    /// Below 10: thirst, and plants may die off
    Severe,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceField {
    pub soil_nutrition: f64,
    pub oxygen_level: f64,
    pub water_level: f64,
    pub weather: Weather,
}

impl Default for ResourceField {
    fn default() -> Self {
        Self {
            soil_nutrition: RESOURCE_START,
            oxygen_level: RESOURCE_START,
            water_level: RESOURCE_START,
            weather: Weather::Clear,
        }
    }
}

impl ResourceField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weather step. Every 50th tick the weather is redrawn; clear weather
    /// then trickles water back up to 100.
    ///
    /// Returns the newly drawn weather on redraw ticks.
    pub fn update_weather(&mut self, time: Tick, rng: &mut dyn RandomEventSource) -> Option<Weather> {
        let mut drawn = None;

        if time % WEATHER_INTERVAL == 0 {
            let roll = rng.next_f64();
            let weather = if roll < RAIN_CHANCE {
                self.water_level = (self.water_level + RAIN_WATER_GAIN).min(RESOURCE_CEILING);
                Weather::Rainy
            } else if roll < RAIN_CHANCE + DROUGHT_CHANCE {
                self.water_level = (self.water_level - DROUGHT_WATER_LOSS).max(0.0);
                Weather::Drought
            } else {
                Weather::Clear
            };
            self.weather = weather;
            drawn = Some(weather);
        }

        if self.weather == Weather::Clear && self.water_level < WATER_REGEN_CEILING {
            self.water_level = (self.water_level + WATER_REGEN_PER_TICK).min(WATER_REGEN_CEILING);
        }

        drawn
    }

    /// Oxygen step. Returns true when the level is low enough to hurt agents.
    pub fn update_oxygen(&mut self, plant_count: usize, agent_count: usize) -> bool {
        let production = plant_count as f64 * OXYGEN_PER_PLANT;
        let consumption = agent_count as f64 * OXYGEN_PER_AGENT;
        self.oxygen_level = (self.oxygen_level + production - consumption).clamp(0.0, RESOURCE_CEILING);
        self.oxygen_level < OXYGEN_LOW
    }

    /// Soil step. Returns true when the soil is depleted enough to throttle
    /// food spawning.
    pub fn update_soil(&mut self, plant_count: usize) -> bool {
        self.soil_nutrition = (self.soil_nutrition - SOIL_DECAY).max(0.0);
        self.soil_nutrition = (self.soil_nutrition - plant_count as f64 * SOIL_PER_PLANT).max(0.0);
        self.soil_nutrition < SOIL_LOW
    }

    /// Water step: agents and food items drink from the pool
    pub fn update_water(&mut self, agent_count: usize, food_count: usize) -> WaterStress {
        let consumption = agent_count as f64 * WATER_PER_AGENT + food_count as f64 * WATER_PER_FOOD;
        self.water_level = (self.water_level - consumption).max(0.0);

        if self.water_level < WATER_SEVERE {
            WaterStress::Severe
        } else if self.water_level < WATER_LOW {
            WaterStress::Thirst
        } else {
            WaterStress::None
        }
    }

    /// Credit nutrition back into the soil (decomposition)
    pub fn enrich_soil(&mut self, amount: f64) {
        self.soil_nutrition = (self.soil_nutrition + amount).min(RESOURCE_CEILING);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::ScriptedSource;

    #[test]
    fn test_weather_only_redraws_on_interval() {
        let mut field = ResourceField::new();
        let mut rng = ScriptedSource::constant(0.1);
        assert_eq!(field.update_weather(49, &mut rng), None);
        assert_eq!(field.weather, Weather::Clear);
        assert_eq!(field.update_weather(50, &mut rng), Some(Weather::Rainy));
        assert_eq!(field.water_level, 130.0);
    }

    #[test]
    fn test_rain_caps_at_200_but_clear_regen_caps_at_100() {
        let mut field = ResourceField::new();
        field.water_level = 190.0;
        let mut rain = ScriptedSource::constant(0.0);
        field.update_weather(50, &mut rain);
        assert_eq!(field.water_level, 200.0);

        // Clear weather never pushes above 100, and does not drain an excess
        let mut clear = ScriptedSource::constant(0.9);
        field.update_weather(100, &mut clear);
        assert_eq!(field.weather, Weather::Clear);
        assert_eq!(field.water_level, 200.0);

        field.water_level = 99.8;
        field.update_weather(101, &mut clear);
        assert_eq!(field.water_level, 100.0);
    }

    #[test]
    fn test_drought_drains_and_floors() {
        let mut field = ResourceField::new();
        field.water_level = 15.0;
        let mut rng = ScriptedSource::constant(0.4);
        assert_eq!(field.update_weather(0, &mut rng), Some(Weather::Drought));
        assert_eq!(field.water_level, 0.0);
        // No clear-weather regen during drought
        field.update_weather(1, &mut rng);
        assert_eq!(field.water_level, 0.0);
    }

    #[test]
    fn test_oxygen_balance() {
        let mut field = ResourceField::new();
        // 10 plants * 0.3 - 2 agents * 0.5 = +2
        assert!(!field.update_oxygen(10, 2));
        assert!((field.oxygen_level - 102.0).abs() < 1e-9);

        field.oxygen_level = 31.0;
        assert!(field.update_oxygen(0, 4));
        assert!((field.oxygen_level - 29.0).abs() < 1e-9);

        field.oxygen_level = 199.0;
        field.update_oxygen(100, 0);
        assert_eq!(field.oxygen_level, 200.0);

        field.oxygen_level = 1.0;
        field.update_oxygen(0, 100);
        assert_eq!(field.oxygen_level, 0.0);
    }

    #[test]
    fn test_soil_decay_and_depletion_signal() {
        let mut field = ResourceField::new();
        assert!(!field.update_soil(20));
        // 100 - 0.1 - 20 * 0.05
        assert!((field.soil_nutrition - 98.9).abs() < 1e-9);

        field.soil_nutrition = 30.05;
        assert!(field.update_soil(0));

        field.soil_nutrition = 0.05;
        field.update_soil(10);
        assert_eq!(field.soil_nutrition, 0.0);
    }

    #[test]
    fn test_water_stress_levels() {
        let mut field = ResourceField::new();
        assert_eq!(field.update_water(10, 10), WaterStress::None);
        assert!((field.water_level - 95.0).abs() < 1e-9);

        field.water_level = 20.4;
        assert_eq!(field.update_water(1, 1), WaterStress::Thirst);

        field.water_level = 10.0;
        assert_eq!(field.update_water(1, 0), WaterStress::Severe);

        field.water_level = 0.1;
        field.update_water(5, 5);
        assert_eq!(field.water_level, 0.0);
    }

    #[test]
    fn test_enrich_soil_caps() {
        let mut field = ResourceField::new();
        field.soil_nutrition = 195.0;
        field.enrich_soil(15.0);
        assert_eq!(field.soil_nutrition, 200.0);
    }
}
