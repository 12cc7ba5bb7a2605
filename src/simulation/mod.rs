//! Simulation - the ecosystem orchestrator, disasters, events and
//! statistics

pub mod disaster;
pub mod ecosystem;
pub mod events;
pub mod stats;

pub use disaster::Disaster;
pub use ecosystem::Ecosystem;
pub use events::{EcoEvent, EventKind, EventLog, TickReport};
pub use stats::{sort_agents, AgentSortKey, SortOrder, Statistics};
