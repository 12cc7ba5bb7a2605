//! Species definitions
//!
//! The species set is closed: herbivores, carnivores and omnivores. Traits
//! and feeding behavior are dispatched by matching on the tag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{EcoError, Result};
use crate::environment::food::FoodKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Herbivore,
    Carnivore,
    Omnivore,
}

/// What food items an agent will eat off the ground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Diet {
    Herbivore,
    Carnivore,
    Omnivore,
}

impl Diet {
    pub fn accepts(&self, kind: FoodKind) -> bool {
        match self {
            Diet::Omnivore => true,
            Diet::Herbivore => kind == FoodKind::Plant,
            Diet::Carnivore => kind == FoodKind::Meat,
        }
    }
}

/// How a species finds its meals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feeding {
    /// Eats food items matching the diet
    Forage(Diet),
    /// Kills live non-carnivores
    Hunt,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Herbivore, Species::Carnivore, Species::Omnivore];

    pub fn diet(&self) -> Diet {
        match self {
            Species::Herbivore => Diet::Herbivore,
            Species::Carnivore => Diet::Carnivore,
            Species::Omnivore => Diet::Omnivore,
        }
    }

    pub fn feeding(&self) -> Feeding {
        match self {
            Species::Carnivore => Feeding::Hunt,
            other => Feeding::Forage(other.diet()),
        }
    }

    /// Starting speed multiplier
    pub fn base_speed(&self) -> f64 {
        match self {
            Species::Herbivore => 1.5,
            Species::Carnivore => 2.0,
            Species::Omnivore => 1.8,
        }
    }

    pub fn max_age(&self) -> f64 {
        match self {
            Species::Herbivore => 50.0,
            Species::Carnivore => 40.0,
            Species::Omnivore => 45.0,
        }
    }

    /// Whether carnivores may prey on this species
    pub fn is_prey(&self) -> bool {
        *self != Species::Carnivore
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Herbivore => "herbivore",
            Species::Carnivore => "carnivore",
            Species::Omnivore => "omnivore",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = EcoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "herbivore" | "h" => Ok(Species::Herbivore),
            "carnivore" | "c" => Ok(Species::Carnivore),
            "omnivore" | "o" => Ok(Species::Omnivore),
            other => Err(EcoError::UnknownSpecies(other.to_string())),
        }
    }
}
