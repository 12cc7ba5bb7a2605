//! Food pool - discrete plant and meat items scattered over the plane
//!
//! Items spawn subject to a capacity (`max_food`) and, for natural spawning,
//! a per-tick Bernoulli trial. They disappear when eaten or killed off by
//! severe drought.

use serde::{Deserialize, Serialize};

use crate::core::constants::{FOOD_ENERGY, FOOD_HEALTH};
use crate::core::random::RandomEventSource;
use crate::core::types::{Bounds, FoodId, Vec2};
use crate::entity::species::Diet;

/// Type of food item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodKind {
    Plant,
    Meat,
}

/// A single edible item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: FoodId,
    pub kind: FoodKind,
    pub position: Vec2,
    pub energy: f64,
    pub health: f64,
}

/// All food currently on the plane
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodPool {
    items: Vec<FoodItem>,
    next_id: u32,
}

impl FoodPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn count(&self, kind: FoodKind) -> usize {
        self.items.iter().filter(|f| f.kind == kind).count()
    }

    pub fn plant_count(&self) -> usize {
        self.count(FoodKind::Plant)
    }

    pub fn has_capacity(&self, max_food: f64) -> bool {
        (self.items.len() as f64) < max_food
    }

    /// Natural spawn: capacity gate, then one Bernoulli trial at `spawn_rate`
    pub fn spawn(
        &mut self,
        max_food: f64,
        spawn_rate: f64,
        bounds: Bounds,
        rng: &mut dyn RandomEventSource,
    ) -> Option<FoodId> {
        if !self.has_capacity(max_food) || !rng.chance(spawn_rate) {
            return None;
        }
        Some(self.spawn_random(bounds, rng))
    }

    /// Forced spawn: capacity gate only
    pub fn spawn_forced(
        &mut self,
        max_food: f64,
        bounds: Bounds,
        rng: &mut dyn RandomEventSource,
    ) -> Option<FoodId> {
        if !self.has_capacity(max_food) {
            return None;
        }
        Some(self.spawn_random(bounds, rng))
    }

    fn spawn_random(&mut self, bounds: Bounds, rng: &mut dyn RandomEventSource) -> FoodId {
        let kind = if rng.next_f64() > 0.5 {
            FoodKind::Plant
        } else {
            FoodKind::Meat
        };
        let x = rng.next_f64() * bounds.width;
        let y = rng.next_f64() * bounds.height;
        self.place(kind, Vec2::new(x, y))
    }

    /// Put an item at an exact position, ignoring capacity
    pub fn place(&mut self, kind: FoodKind, position: Vec2) -> FoodId {
        let id = FoodId(self.next_id);
        self.next_id += 1;
        self.items.push(FoodItem {
            id,
            kind,
            position,
            energy: FOOD_ENERGY,
            health: FOOD_HEALTH,
        });
        id
    }

    /// Nearest item the diet accepts strictly within `radius`, if any
    pub fn nearest(&self, position: Vec2, diet: Diet, radius: f64) -> Option<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, f)| diet.accepts(f.kind))
            .map(|(idx, f)| (idx, f.position.distance(&position)))
            .filter(|(_, d)| *d < radius)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(idx, _)| idx)
    }

    /// Remove and return the nearest acceptable item within `radius`
    pub fn take_nearest(&mut self, position: Vec2, diet: Diet, radius: f64) -> Option<FoodItem> {
        let idx = self.nearest(position, diet, radius)?;
        Some(self.items.remove(idx))
    }

    /// Remove one uniformly chosen item
    pub fn remove_random(&mut self, rng: &mut dyn RandomEventSource) -> Option<FoodItem> {
        if self.items.is_empty() {
            return None;
        }
        let idx = rng.index(self.items.len());
        Some(self.items.remove(idx))
    }
}
