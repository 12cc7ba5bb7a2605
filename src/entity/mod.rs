//! Agents and their species

pub mod agent;
pub mod species;

pub use agent::{Agent, AgentStatus, DeathCause, FeedOutcome, Neighbors, Surroundings};
pub use species::{Diet, Feeding, Species};
