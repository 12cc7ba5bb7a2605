//! Rule set - the named, tunable parameters of an ecosystem
//!
//! Rules are seeded from a mode preset and then mutated in place by season
//! transitions, time-of-day modulation, soil depletion and disasters. None of
//! those multiplicative adjustments is ever renormalized; rates drift.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::calendar::{Season, TimeOfDay};
use crate::core::error::{EcoError, Result};

/// Preset family an ecosystem is seeded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Basic,
    Advanced,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Basic => "basic",
            Mode::Advanced => "advanced",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Mode::Basic => Mode::Advanced,
            Mode::Advanced => Mode::Basic,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = EcoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Mode::Basic),
            "advanced" => Ok(Mode::Advanced),
            other => Err(EcoError::UnknownMode(other.to_string())),
        }
    }
}

/// Every rule that can be read or overwritten by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKey {
    EnergyDecay,
    HealthDecay,
    FoodSpawnRate,
    MaxFood,
    DisasterChance,
    ReproductionThreshold,
    AgingRate,
    PredationEfficiency,
    DiseaseSpread,
    MigrationPattern,
    CompetitionFactor,
    WeatherVariability,
    ResourceRegeneration,
    WaterAvailability,
}

impl RuleKey {
    pub const ALL: [RuleKey; 14] = [
        RuleKey::EnergyDecay,
        RuleKey::HealthDecay,
        RuleKey::FoodSpawnRate,
        RuleKey::MaxFood,
        RuleKey::DisasterChance,
        RuleKey::ReproductionThreshold,
        RuleKey::AgingRate,
        RuleKey::PredationEfficiency,
        RuleKey::DiseaseSpread,
        RuleKey::MigrationPattern,
        RuleKey::CompetitionFactor,
        RuleKey::WeatherVariability,
        RuleKey::ResourceRegeneration,
        RuleKey::WaterAvailability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKey::EnergyDecay => "energyDecay",
            RuleKey::HealthDecay => "healthDecay",
            RuleKey::FoodSpawnRate => "foodSpawnRate",
            RuleKey::MaxFood => "maxFood",
            RuleKey::DisasterChance => "disasterChance",
            RuleKey::ReproductionThreshold => "reproductionThreshold",
            RuleKey::AgingRate => "agingRate",
            RuleKey::PredationEfficiency => "predationEfficiency",
            RuleKey::DiseaseSpread => "diseaseSpread",
            RuleKey::MigrationPattern => "migrationPattern",
            RuleKey::CompetitionFactor => "competitionFactor",
            RuleKey::WeatherVariability => "weatherVariability",
            RuleKey::ResourceRegeneration => "resourceRegeneration",
            RuleKey::WaterAvailability => "waterAvailability",
        }
    }

    /// Rules that are probabilities and must stay within [0, 1]
    pub fn is_probability(&self) -> bool {
        matches!(
            self,
            RuleKey::FoodSpawnRate | RuleKey::DisasterChance | RuleKey::DiseaseSpread
        )
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, RuleKey::MigrationPattern)
    }

    /// Parse raw editor input for this rule.
    ///
    /// Probability inputs are clamped into [0, 1] and max food is truncated
    /// to a whole number, matching what the rule editor accepts. Anything
    /// that does not parse is rejected.
    pub fn parse_input(&self, text: &str) -> Result<RuleValue> {
        let text = text.trim();
        if self.is_flag() {
            return match text.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(RuleValue::Flag(true)),
                "false" | "no" | "off" | "0" => Ok(RuleValue::Flag(false)),
                _ => Err(EcoError::InvalidRuleValue {
                    key: self.as_str().to_string(),
                    reason: format!("expected true/false, got {:?}", text),
                }),
            };
        }

        let value: f64 = text.parse().map_err(|_| EcoError::InvalidRuleValue {
            key: self.as_str().to_string(),
            reason: format!("not a number: {:?}", text),
        })?;
        if !value.is_finite() {
            return Err(EcoError::InvalidRuleValue {
                key: self.as_str().to_string(),
                reason: "value must be finite".into(),
            });
        }

        let value = match self {
            key if key.is_probability() => value.clamp(0.0, 1.0),
            RuleKey::MaxFood => value.trunc(),
            _ => value,
        };
        Ok(RuleValue::Number(value))
    }

    fn validate(&self, value: RuleValue) -> Result<()> {
        let invalid = |reason: String| EcoError::InvalidRuleValue {
            key: self.as_str().to_string(),
            reason,
        };

        let number = match (self.is_flag(), value) {
            (true, RuleValue::Flag(_)) => return Ok(()),
            (true, RuleValue::Number(_)) => {
                return Err(EcoError::RuleTypeMismatch {
                    key: self.as_str().to_string(),
                    expected: "boolean",
                })
            }
            (false, RuleValue::Flag(_)) => {
                return Err(EcoError::RuleTypeMismatch {
                    key: self.as_str().to_string(),
                    expected: "numeric",
                })
            }
            (false, RuleValue::Number(n)) => n,
        };

        if !number.is_finite() {
            return Err(invalid("value must be finite".into()));
        }
        if self.is_probability() && !(0.0..=1.0).contains(&number) {
            return Err(invalid(format!("{} is outside [0, 1]", number)));
        }
        if *self == RuleKey::ReproductionThreshold && !(0.0..=100.0).contains(&number) {
            return Err(invalid(format!("{} is outside [0, 100]", number)));
        }
        if number < 0.0 {
            return Err(invalid(format!("{} is negative", number)));
        }
        Ok(())
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKey {
    type Err = EcoError;

    /// Accepts both `foodSpawnRate` and `food_spawn_rate` spellings
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().replace(['_', '-'], "").to_ascii_lowercase();
        RuleKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str().to_ascii_lowercase() == wanted)
            .ok_or_else(|| EcoError::UnknownRule(s.to_string()))
    }
}

/// A single rule value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Number(f64),
    Flag(bool),
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleValue::Number(n) => write!(f, "{}", n),
            RuleValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

/// Partial rule mapping merged key-wise into a `RuleSet`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulePatch {
    #[serde(alias = "energyDecay")]
    pub energy_decay: Option<f64>,
    #[serde(alias = "healthDecay")]
    pub health_decay: Option<f64>,
    #[serde(alias = "foodSpawnRate")]
    pub food_spawn_rate: Option<f64>,
    #[serde(alias = "maxFood")]
    pub max_food: Option<f64>,
    pub climate: Option<String>,
    pub season: Option<Season>,
    #[serde(alias = "disasterChance")]
    pub disaster_chance: Option<f64>,
    #[serde(alias = "reproductionThreshold")]
    pub reproduction_threshold: Option<f64>,
    #[serde(alias = "agingRate")]
    pub aging_rate: Option<f64>,
    #[serde(alias = "predationEfficiency")]
    pub predation_efficiency: Option<f64>,
    #[serde(alias = "diseaseSpread")]
    pub disease_spread: Option<f64>,
    #[serde(alias = "migrationPattern")]
    pub migration_pattern: Option<bool>,
    #[serde(alias = "competitionFactor")]
    pub competition_factor: Option<f64>,
    #[serde(alias = "weatherVariability")]
    pub weather_variability: Option<f64>,
    #[serde(alias = "resourceRegeneration")]
    pub resource_regeneration: Option<f64>,
    #[serde(alias = "waterAvailability")]
    pub water_availability: Option<f64>,
}

impl RulePatch {
    pub fn is_empty(&self) -> bool {
        *self == RulePatch::default()
    }

    /// Keyed values present in this patch (climate and season excluded)
    pub fn entries(&self) -> Vec<(RuleKey, RuleValue)> {
        let numbers = [
            (RuleKey::EnergyDecay, self.energy_decay),
            (RuleKey::HealthDecay, self.health_decay),
            (RuleKey::FoodSpawnRate, self.food_spawn_rate),
            (RuleKey::MaxFood, self.max_food),
            (RuleKey::DisasterChance, self.disaster_chance),
            (RuleKey::ReproductionThreshold, self.reproduction_threshold),
            (RuleKey::AgingRate, self.aging_rate),
            (RuleKey::PredationEfficiency, self.predation_efficiency),
            (RuleKey::DiseaseSpread, self.disease_spread),
            (RuleKey::CompetitionFactor, self.competition_factor),
            (RuleKey::WeatherVariability, self.weather_variability),
            (RuleKey::ResourceRegeneration, self.resource_regeneration),
            (RuleKey::WaterAvailability, self.water_availability),
        ];

        let mut entries: Vec<(RuleKey, RuleValue)> = numbers
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, RuleValue::Number(v))))
            .collect();
        if let Some(flag) = self.migration_pattern {
            entries.push((RuleKey::MigrationPattern, RuleValue::Flag(flag)));
        }
        entries
    }
}

/// The live rule values of one ecosystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub energy_decay: f64,
    pub health_decay: f64,
    pub food_spawn_rate: f64,
    pub max_food: f64,
    pub climate: String,
    pub season: Season,
    pub disaster_chance: f64,
    pub reproduction_threshold: f64,
    pub aging_rate: f64,
    pub predation_efficiency: f64,
    pub disease_spread: f64,
    pub migration_pattern: bool,
    pub competition_factor: f64,
    pub weather_variability: f64,
    pub resource_regeneration: f64,
    pub water_availability: f64,
    /// Bumped on every accepted external edit
    #[serde(skip)]
    version: u64,
}

impl RuleSet {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Basic => Self::basic(),
            Mode::Advanced => Self::advanced(),
        }
    }

    pub fn basic() -> Self {
        Self {
            energy_decay: 2.0,
            health_decay: 1.0,
            food_spawn_rate: 0.3,
            max_food: 50.0,
            climate: "temperate".into(),
            season: Season::Spring,
            disaster_chance: 0.01,
            reproduction_threshold: 70.0,
            aging_rate: 0.1,
            predation_efficiency: 0.5,
            disease_spread: 0.05,
            migration_pattern: false,
            competition_factor: 0.2,
            weather_variability: 0.2,
            resource_regeneration: 0.4,
            water_availability: 1.0,
            version: 0,
        }
    }

    pub fn advanced() -> Self {
        Self {
            energy_decay: 1.5,
            health_decay: 0.8,
            food_spawn_rate: 0.25,
            max_food: 75.0,
            climate: "temperate".into(),
            season: Season::Spring,
            disaster_chance: 0.02,
            reproduction_threshold: 75.0,
            aging_rate: 0.15,
            predation_efficiency: 0.7,
            disease_spread: 0.1,
            migration_pattern: true,
            competition_factor: 0.3,
            weather_variability: 0.4,
            resource_regeneration: 0.6,
            water_availability: 1.0,
            version: 0,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get(&self, key: RuleKey) -> RuleValue {
        match key {
            RuleKey::EnergyDecay => RuleValue::Number(self.energy_decay),
            RuleKey::HealthDecay => RuleValue::Number(self.health_decay),
            RuleKey::FoodSpawnRate => RuleValue::Number(self.food_spawn_rate),
            RuleKey::MaxFood => RuleValue::Number(self.max_food),
            RuleKey::DisasterChance => RuleValue::Number(self.disaster_chance),
            RuleKey::ReproductionThreshold => RuleValue::Number(self.reproduction_threshold),
            RuleKey::AgingRate => RuleValue::Number(self.aging_rate),
            RuleKey::PredationEfficiency => RuleValue::Number(self.predation_efficiency),
            RuleKey::DiseaseSpread => RuleValue::Number(self.disease_spread),
            RuleKey::MigrationPattern => RuleValue::Flag(self.migration_pattern),
            RuleKey::CompetitionFactor => RuleValue::Number(self.competition_factor),
            RuleKey::WeatherVariability => RuleValue::Number(self.weather_variability),
            RuleKey::ResourceRegeneration => RuleValue::Number(self.resource_regeneration),
            RuleKey::WaterAvailability => RuleValue::Number(self.water_availability),
        }
    }

    /// Overwrite one rule. Rejected values leave the set untouched.
    pub fn set(&mut self, key: RuleKey, value: RuleValue) -> Result<()> {
        key.validate(value)?;
        self.write(key, value);
        self.version += 1;
        Ok(())
    }

    /// Key-wise merge of a partial mapping. All-or-nothing.
    pub fn merge(&mut self, patch: &RulePatch) -> Result<()> {
        let entries = patch.entries();
        for (key, value) in &entries {
            key.validate(*value)?;
        }

        for (key, value) in entries {
            self.write(key, value);
        }
        if let Some(climate) = &patch.climate {
            self.climate = climate.clone();
        }
        if let Some(season) = patch.season {
            self.season = season;
        }
        if !patch.is_empty() {
            self.version += 1;
        }
        Ok(())
    }

    fn write(&mut self, key: RuleKey, value: RuleValue) {
        match (key, value) {
            (RuleKey::MigrationPattern, RuleValue::Flag(flag)) => self.migration_pattern = flag,
            (_, RuleValue::Flag(_)) | (RuleKey::MigrationPattern, _) => {}
            (key, RuleValue::Number(n)) => {
                let slot = match key {
                    RuleKey::EnergyDecay => &mut self.energy_decay,
                    RuleKey::HealthDecay => &mut self.health_decay,
                    RuleKey::FoodSpawnRate => &mut self.food_spawn_rate,
                    RuleKey::MaxFood => &mut self.max_food,
                    RuleKey::DisasterChance => &mut self.disaster_chance,
                    RuleKey::ReproductionThreshold => &mut self.reproduction_threshold,
                    RuleKey::AgingRate => &mut self.aging_rate,
                    RuleKey::PredationEfficiency => &mut self.predation_efficiency,
                    RuleKey::DiseaseSpread => &mut self.disease_spread,
                    RuleKey::CompetitionFactor => &mut self.competition_factor,
                    RuleKey::WeatherVariability => &mut self.weather_variability,
                    RuleKey::ResourceRegeneration => &mut self.resource_regeneration,
                    RuleKey::WaterAvailability => &mut self.water_availability,
                    RuleKey::MigrationPattern => return,
                };
                *slot = n;
            }
        }
    }

    /// Advance the season and overwrite the spawn/decay baseline
    pub fn advance_season(&mut self) -> Season {
        self.season = self.season.next();
        let (food_spawn_rate, energy_decay) = self.season.baseline();
        self.food_spawn_rate = food_spawn_rate;
        self.energy_decay = energy_decay;
        self.season
    }

    /// Compounding time-of-day modulation, applied once per tick
    pub fn modulate_for(&mut self, time_of_day: TimeOfDay) {
        let (spawn_factor, decay_factor) = time_of_day.rule_factors();
        self.food_spawn_rate *= spawn_factor;
        self.energy_decay *= decay_factor;
    }

    pub fn throttle_food_spawn(&mut self, factor: f64) {
        self.food_spawn_rate *= factor;
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::basic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ_by_mode() {
        let basic = RuleSet::for_mode(Mode::Basic);
        let advanced = RuleSet::for_mode(Mode::Advanced);
        assert_eq!(basic.reproduction_threshold, 70.0);
        assert_eq!(advanced.reproduction_threshold, 75.0);
        assert_eq!(basic.max_food, 50.0);
        assert_eq!(advanced.max_food, 75.0);
        assert!(!basic.migration_pattern);
        assert!(advanced.migration_pattern);
    }

    #[test]
    fn test_rule_key_parses_both_spellings() {
        assert_eq!("foodSpawnRate".parse::<RuleKey>().unwrap(), RuleKey::FoodSpawnRate);
        assert_eq!("food_spawn_rate".parse::<RuleKey>().unwrap(), RuleKey::FoodSpawnRate);
        assert_eq!("MAX_FOOD".parse::<RuleKey>().unwrap(), RuleKey::MaxFood);
        assert!(matches!(
            "gravity".parse::<RuleKey>(),
            Err(EcoError::UnknownRule(_))
        ));
    }

    #[test]
    fn test_every_key_round_trips_through_get_and_set() {
        let mut rules = RuleSet::basic();
        for key in RuleKey::ALL {
            let value = rules.get(key);
            rules.set(key, value).unwrap();
            assert_eq!(rules.get(key), value);
        }
        assert_eq!(rules.version(), RuleKey::ALL.len() as u64);
    }

    #[test]
    fn test_set_rejects_out_of_range_and_leaves_rules_unchanged() {
        let mut rules = RuleSet::basic();
        let before = rules.clone();

        assert!(rules.set(RuleKey::DisasterChance, RuleValue::Number(1.5)).is_err());
        assert!(rules.set(RuleKey::EnergyDecay, RuleValue::Number(-1.0)).is_err());
        assert!(rules.set(RuleKey::HealthDecay, RuleValue::Number(f64::NAN)).is_err());
        assert!(rules.set(RuleKey::ReproductionThreshold, RuleValue::Number(120.0)).is_err());
        assert!(matches!(
            rules.set(RuleKey::MigrationPattern, RuleValue::Number(1.0)),
            Err(EcoError::RuleTypeMismatch { .. })
        ));
        assert!(matches!(
            rules.set(RuleKey::MaxFood, RuleValue::Flag(true)),
            Err(EcoError::RuleTypeMismatch { .. })
        ));

        assert_eq!(rules, before);
        assert_eq!(rules.version(), 0);
    }

    #[test]
    fn test_parse_input_clamps_probabilities() {
        assert_eq!(
            RuleKey::FoodSpawnRate.parse_input("1.7").unwrap(),
            RuleValue::Number(1.0)
        );
        assert_eq!(
            RuleKey::DisasterChance.parse_input("-0.2").unwrap(),
            RuleValue::Number(0.0)
        );
        assert_eq!(RuleKey::MaxFood.parse_input("42.9").unwrap(), RuleValue::Number(42.0));
        assert_eq!(
            RuleKey::MigrationPattern.parse_input("yes").unwrap(),
            RuleValue::Flag(true)
        );
    }

    #[test]
    fn test_parse_input_rejects_garbage() {
        assert!(RuleKey::EnergyDecay.parse_input("fast").is_err());
        assert!(RuleKey::EnergyDecay.parse_input("inf").is_err());
        assert!(RuleKey::MigrationPattern.parse_input("maybe").is_err());
    }

    #[test]
    fn test_merge_is_all_or_nothing() {
        let mut rules = RuleSet::basic();
        let patch = RulePatch {
            energy_decay: Some(4.0),
            disaster_chance: Some(2.0),
            ..Default::default()
        };
        assert!(rules.merge(&patch).is_err());
        assert_eq!(rules.energy_decay, 2.0);

        let patch = RulePatch {
            energy_decay: Some(4.0),
            climate: Some("arid".into()),
            migration_pattern: Some(true),
            ..Default::default()
        };
        rules.merge(&patch).unwrap();
        assert_eq!(rules.energy_decay, 4.0);
        assert_eq!(rules.climate, "arid");
        assert!(rules.migration_pattern);
        assert_eq!(rules.health_decay, 1.0, "untouched keys keep their value");
        assert_eq!(rules.version(), 1);
    }

    #[test]
    fn test_advance_season_overwrites_baseline() {
        let mut rules = RuleSet::basic();
        rules.food_spawn_rate = 0.0001;
        rules.energy_decay = 99.0;
        assert_eq!(rules.advance_season(), Season::Summer);
        assert_eq!(rules.food_spawn_rate, 0.5);
        assert_eq!(rules.energy_decay, 2.0);
    }

    #[test]
    fn test_time_of_day_modulation_compounds() {
        let mut rules = RuleSet::basic();
        rules.modulate_for(TimeOfDay::Day);
        rules.modulate_for(TimeOfDay::Day);
        assert!((rules.food_spawn_rate - 0.3 * 1.5 * 1.5).abs() < 1e-12);
        assert!((rules.energy_decay - 2.0 * 1.1 * 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_soil_throttle_stacks_with_modulation() {
        let mut rules = RuleSet::basic();
        rules.throttle_food_spawn(0.7);
        rules.modulate_for(TimeOfDay::Dusk);
        rules.throttle_food_spawn(0.7);
        assert!((rules.food_spawn_rate - 0.3 * 0.7 * 0.8 * 0.7).abs() < 1e-12);
        assert_eq!(rules.version(), 0);
    }
}
