//! Shared environment: continuous resource pools, food items and the
//! decomposition queue

pub mod decomposition;
pub mod food;
pub mod resources;

pub use decomposition::{DecomposingBody, DecompositionQueue};
pub use food::{FoodItem, FoodKind, FoodPool};
pub use resources::{ResourceField, WaterStress, Weather};
