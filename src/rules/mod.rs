//! Rule system - mode presets, named rule access and TOML overrides

pub mod loader;
pub mod ruleset;

pub use loader::{load_rule_patch, parse_rule_patch};
pub use ruleset::{Mode, RuleKey, RulePatch, RuleSet, RuleValue};
