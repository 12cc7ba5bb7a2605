//! Ecosim - discrete-time ecological simulation of herbivores, carnivores
//! and omnivores sharing food, soil, oxygen and water

pub mod core;
pub mod entity;
pub mod environment;
pub mod rules;
pub mod simulation;
