//! Document budget limits.
//!
//! A budget bounds the size of a generated document: the final input list,
//! the sum of per-musician setups, and the monitor mixes the console has to
//! provide. Named profiles cover the usual venue sizes.

use serde::{Deserialize, Serialize};

/// Limits checked by the document and setup validators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentBudget {
    /// Profile identifier (e.g., "default", "strict", "festival").
    pub name: String,
    /// Maximum number of channels in the final input list.
    pub max_inputs: usize,
    /// Maximum number of inputs summed over all musician setups.
    pub max_setup_inputs: usize,
    /// Maximum number of monitor mixes (aux sends).
    pub monitor_mix_limit: usize,
}

impl Default for DocumentBudget {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            max_inputs: Self::DEFAULT_MAX_INPUTS,
            max_setup_inputs: Self::DEFAULT_MAX_SETUP_INPUTS,
            monitor_mix_limit: Self::DEFAULT_MONITOR_MIX_LIMIT,
        }
    }
}

impl DocumentBudget {
    /// Default maximum number of input list channels.
    pub const DEFAULT_MAX_INPUTS: usize = 32;

    /// Default maximum number of inputs over all setups.
    pub const DEFAULT_MAX_SETUP_INPUTS: usize = 30;

    /// Default maximum number of monitor mixes.
    pub const DEFAULT_MONITOR_MIX_LIMIT: usize = 6;

    /// Creates a budget with default limits and the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Small club desks.
    pub fn strict() -> Self {
        Self {
            name: "strict".to_string(),
            max_inputs: 24,
            max_setup_inputs: 24,
            monitor_mix_limit: 4,
        }
    }

    /// Festival stages with large consoles.
    pub fn festival() -> Self {
        Self {
            name: "festival".to_string(),
            max_inputs: 48,
            max_setup_inputs: 46,
            monitor_mix_limit: 8,
        }
    }

    /// Looks up a named profile.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "strict" => Some(Self::strict()),
            "festival" => Some(Self::festival()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget() {
        let budget = DocumentBudget::default();
        assert_eq!(budget.name, "default");
        assert_eq!(budget.max_inputs, 32);
        assert_eq!(budget.max_setup_inputs, 30);
        assert_eq!(budget.monitor_mix_limit, 6);
    }

    #[test]
    fn test_by_name() {
        assert!(DocumentBudget::by_name("default").is_some());
        assert_eq!(DocumentBudget::by_name("strict").unwrap().max_inputs, 24);
        assert_eq!(DocumentBudget::by_name("festival").unwrap().max_inputs, 48);
        assert!(DocumentBudget::by_name("stadium").is_none());
    }

    #[test]
    fn test_new_keeps_default_limits() {
        let budget = DocumentBudget::new("club");
        assert_eq!(budget.name, "club");
        assert_eq!(budget.max_inputs, DocumentBudget::DEFAULT_MAX_INPUTS);
    }

    #[test]
    fn test_budget_roundtrips_through_json() {
        let json = serde_json::to_string(&DocumentBudget::festival()).unwrap();
        let parsed: DocumentBudget = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, DocumentBudget::festival());
    }
}
