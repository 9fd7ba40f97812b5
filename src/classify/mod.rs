//! Rule-based archetype classification.
//!
//! A [`Classifier`] walks an ordered list of rules and names a deck after the
//! first rule it satisfies. Order is priority: a refined archetype has to
//! appear before the broader rule it refines or it is never reached.
//!
//! Rule sets are plain values ([`RuleSet`]); callers build the one they need
//! (the bundled [`pioneer::rule_set`], or one loaded from a TOML file) and
//! hand it to the classifier.

pub mod audit;
pub mod pioneer;
mod rules;

pub use rules::*;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::Deck;

/// Archetype name for decks no rule matches.
pub const UNCLASSIFIED: &str = "Unclassified";

/// Errors that can occur while loading a rule set.
#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("Failed to read rule set: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse rule set: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid rule set: {0}")]
    ValidationError(String),
}

/// A predicate over deck composition that names an archetype.
pub trait ClassificationRule: std::fmt::Debug + Send + Sync {
    /// Archetype assigned when the rule matches.
    fn deck_name(&self) -> &str;

    /// Whether the deck belongs to this archetype.
    fn satisfied_by(&self, deck: &Deck) -> bool;

    /// Key cards shown as the reason for a match.
    fn heroes(&self) -> &[String] {
        &[]
    }
}

/// A named, versioned list of rules in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub name: String,

    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub rules: Vec<RuleDef>,
}

fn default_version() -> u32 {
    1
}

impl RuleSet {
    pub fn new(name: impl Into<String>, version: u32, rules: Vec<RuleDef>) -> Self {
        Self {
            name: name.into(),
            version,
            rules,
        }
    }

    /// Parse and validate a rule set from TOML.
    pub fn from_toml_str(contents: &str) -> Result<Self, RuleSetError> {
        let rule_set: RuleSet = toml::from_str(contents)?;
        rule_set.validate()?;
        Ok(rule_set)
    }

    /// Load a rule set from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, RuleSetError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validate the rule set.
    pub fn validate(&self) -> Result<(), RuleSetError> {
        if self.name.trim().is_empty() {
            return Err(RuleSetError::ValidationError(
                "Rule set name must not be empty".to_string(),
            ));
        }

        for (i, rule) in self.rules.iter().enumerate() {
            if rule.deck_name().trim().is_empty() {
                return Err(RuleSetError::ValidationError(format!(
                    "Rule #{} has an empty archetype name",
                    i + 1
                )));
            }
            if let RuleDef::Simple(simple) = rule {
                // An empty card list would match every deck.
                if simple.cards.is_empty() {
                    return Err(RuleSetError::ValidationError(format!(
                        "Rule '{}' lists no cards",
                        simple.name
                    )));
                }
            }
        }

        Ok(())
    }

    /// Label used in logs, e.g. "pioneer v3".
    pub fn label(&self) -> String {
        format!("{} v{}", self.name, self.version)
    }
}

/// First-match archetype classifier.
#[derive(Debug)]
pub struct Classifier {
    label: String,
    rules: Vec<Box<dyn ClassificationRule>>,
}

impl Classifier {
    /// Create a classifier over rules in priority order.
    pub fn new(rules: Vec<Box<dyn ClassificationRule>>) -> Self {
        Self {
            label: "custom".to_string(),
            rules,
        }
    }

    /// Create a classifier from a rule set, keeping its order.
    pub fn from_rule_set(rule_set: RuleSet) -> Self {
        let label = rule_set.label();
        let rules = rule_set
            .rules
            .into_iter()
            .map(|r| Box::new(r) as Box<dyn ClassificationRule>)
            .collect();
        Self { label, rules }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The first rule the deck satisfies.
    pub fn matching_rule(&self, deck: &Deck) -> Option<&dyn ClassificationRule> {
        self.rules
            .iter()
            .map(|r| r.as_ref())
            .find(|r| r.satisfied_by(deck))
    }

    /// Archetype name for a deck, or [`UNCLASSIFIED`].
    pub fn classify(&self, deck: &Deck) -> &str {
        match self.matching_rule(deck) {
            Some(rule) => rule.deck_name(),
            None => {
                debug!("No rule in {} matched deck", self.label);
                UNCLASSIFIED
            }
        }
    }

    /// Hero cards of the matching rule, empty if nothing matched.
    pub fn find_hero(&self, deck: &Deck) -> &[String] {
        self.matching_rule(deck).map(|r| r.heroes()).unwrap_or(&[])
    }

    /// Archetype name and hero cards in one pass.
    pub fn classify_with_heroes(&self, deck: &Deck) -> (&str, &[String]) {
        match self.matching_rule(deck) {
            Some(rule) => (rule.deck_name(), rule.heroes()),
            None => (UNCLASSIFIED, &[]),
        }
    }

    /// Names of every rule the deck satisfies, in rule order.
    pub fn all_matches(&self, deck: &Deck) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|r| r.satisfied_by(deck))
            .map(|r| r.deck_name())
            .collect()
    }
}

impl From<RuleSet> for Classifier {
    fn from(rule_set: RuleSet) -> Self {
        Self::from_rule_set(rule_set)
    }
}
