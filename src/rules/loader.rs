//! Load rule overrides from TOML
//!
//! Accepts either a bare table of rules or a document with a `[rules]`
//! section. Both camelCase and snake_case keys are understood.

use std::fs;
use std::path::Path;

use crate::core::error::{EcoError, Result};
use crate::rules::ruleset::RulePatch;

/// Load a rule patch from a TOML file
pub fn load_rule_patch(path: &Path) -> Result<RulePatch> {
    let content = fs::read_to_string(path)?;
    parse_rule_patch(&content)
}

/// Parse a rule patch from TOML text
pub fn parse_rule_patch(content: &str) -> Result<RulePatch> {
    let document: toml::Value = content.parse()?;

    let table = match document.get("rules") {
        Some(rules) if rules.is_table() => rules.clone(),
        Some(_) => {
            return Err(EcoError::InvalidConfig(
                "`rules` must be a table".to_string(),
            ))
        }
        None => document,
    };

    Ok(table.try_into::<RulePatch>()?)
}
