pub mod calendar;
pub mod config;
pub mod constants;
pub mod error;
pub mod random;
pub mod types;

pub use calendar::{Season, TimeOfDay};
pub use error::{EcoError, Result};
pub use random::{ChaChaSource, RandomEventSource, ScriptedSource};
