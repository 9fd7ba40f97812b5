//! Concrete classification rules.
//!
//! Two shapes cover the hand-authored rule sets:
//! - [`SimpleRule`]: three or more main-deck copies of every listed card
//! - [`CompositeRule`]: an arbitrary [`Condition`] tree

use serde::{Deserialize, Serialize};

use super::ClassificationRule;
use crate::models::Deck;

/// Matches decks running at least three main-deck copies of every card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleRule {
    pub name: String,
    pub cards: Vec<String>,

    /// Defaults to `cards` when empty
    #[serde(default)]
    pub heroes: Vec<String>,
}

impl SimpleRule {
    pub fn new(name: impl Into<String>, cards: &[&str]) -> Self {
        Self {
            name: name.into(),
            cards: cards.iter().map(|c| c.to_string()).collect(),
            heroes: Vec::new(),
        }
    }

    /// Builder method to report different hero cards than the key cards.
    pub fn with_heroes(mut self, heroes: &[&str]) -> Self {
        self.heroes = heroes.iter().map(|c| c.to_string()).collect();
        self
    }
}

impl ClassificationRule for SimpleRule {
    fn deck_name(&self) -> &str {
        &self.name
    }

    fn satisfied_by(&self, deck: &Deck) -> bool {
        self.cards.iter().all(|card| deck.contains_at_least_three(card))
    }

    fn heroes(&self) -> &[String] {
        if self.heroes.is_empty() {
            &self.cards
        } else {
            &self.heroes
        }
    }
}

/// Boolean test over deck composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Main deck and sideboard together hold `count` or more copies
    AtLeast { count: u32, card: String },

    /// Main deck alone holds three or more copies
    ThreeInMain { card: String },

    /// Main deck runs `count` or more creatures
    MinCreatures { count: u32 },

    /// Main deck runs `count` or fewer creatures
    MaxCreatures { count: u32 },

    All { of: Vec<Condition> },

    Any { of: Vec<Condition> },

    Not { condition: Box<Condition> },
}

impl Condition {
    pub fn at_least(count: u32, card: &str) -> Self {
        Condition::AtLeast {
            count,
            card: card.to_string(),
        }
    }

    pub fn three(card: &str) -> Self {
        Condition::ThreeInMain {
            card: card.to_string(),
        }
    }

    /// Any copy in main deck or sideboard.
    pub fn plays(card: &str) -> Self {
        Self::at_least(1, card)
    }

    pub fn min_creatures(count: u32) -> Self {
        Condition::MinCreatures { count }
    }

    pub fn max_creatures(count: u32) -> Self {
        Condition::MaxCreatures { count }
    }

    pub fn all(of: Vec<Condition>) -> Self {
        Condition::All { of }
    }

    pub fn any(of: Vec<Condition>) -> Self {
        Condition::Any { of }
    }

    pub fn not(condition: Condition) -> Self {
        Condition::Not {
            condition: Box::new(condition),
        }
    }

    /// Evaluate the condition against a deck.
    pub fn evaluate(&self, deck: &Deck) -> bool {
        match self {
            Condition::AtLeast { count, card } => deck.contains_at_least(*count, card),
            Condition::ThreeInMain { card } => deck.contains_at_least_three(card),
            Condition::MinCreatures { count } => deck.maindeck_creatures() >= *count,
            Condition::MaxCreatures { count } => deck.maindeck_creatures() <= *count,
            Condition::All { of } => of.iter().all(|c| c.evaluate(deck)),
            Condition::Any { of } => of.iter().any(|c| c.evaluate(deck)),
            Condition::Not { condition } => !condition.evaluate(deck),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::AtLeast { count, card } => write!(f, "{}+ {}", count, card),
            Condition::ThreeInMain { card } => write!(f, "3+ {} (main)", card),
            Condition::MinCreatures { count } => write!(f, "creatures >= {}", count),
            Condition::MaxCreatures { count } => write!(f, "creatures <= {}", count),
            Condition::All { of } => write_joined(f, of, " and "),
            Condition::Any { of } => write_joined(f, of, " or "),
            Condition::Not { condition } => write!(f, "not {}", condition),
        }
    }
}

fn write_joined(
    f: &mut std::fmt::Formatter<'_>,
    conditions: &[Condition],
    separator: &str,
) -> std::fmt::Result {
    write!(f, "(")?;
    for (i, c) in conditions.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", c)?;
    }
    write!(f, ")")
}

/// Matches decks satisfying an arbitrary condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeRule {
    pub name: String,
    pub condition: Condition,

    #[serde(default)]
    pub heroes: Vec<String>,
}

impl CompositeRule {
    pub fn new(name: impl Into<String>, condition: Condition) -> Self {
        Self {
            name: name.into(),
            condition,
            heroes: Vec::new(),
        }
    }

    pub fn with_heroes(mut self, heroes: &[&str]) -> Self {
        self.heroes = heroes.iter().map(|c| c.to_string()).collect();
        self
    }
}

impl ClassificationRule for CompositeRule {
    fn deck_name(&self) -> &str {
        &self.name
    }

    fn satisfied_by(&self, deck: &Deck) -> bool {
        self.condition.evaluate(deck)
    }

    fn heroes(&self) -> &[String] {
        &self.heroes
    }
}

/// A rule as written in a rule-set file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleDef {
    Simple(SimpleRule),
    Composite(CompositeRule),
}

impl RuleDef {
    /// Human-readable summary of what the rule requires.
    pub fn describe(&self) -> String {
        match self {
            RuleDef::Simple(rule) => rule
                .cards
                .iter()
                .map(|c| format!("3+ {} (main)", c))
                .collect::<Vec<_>>()
                .join(" and "),
            RuleDef::Composite(rule) => rule.condition.to_string(),
        }
    }
}

impl ClassificationRule for RuleDef {
    fn deck_name(&self) -> &str {
        match self {
            RuleDef::Simple(rule) => rule.deck_name(),
            RuleDef::Composite(rule) => rule.deck_name(),
        }
    }

    fn satisfied_by(&self, deck: &Deck) -> bool {
        match self {
            RuleDef::Simple(rule) => rule.satisfied_by(deck),
            RuleDef::Composite(rule) => rule.satisfied_by(deck),
        }
    }

    fn heroes(&self) -> &[String] {
        match self {
            RuleDef::Simple(rule) => rule.heroes(),
            RuleDef::Composite(rule) => rule.heroes(),
        }
    }
}

impl From<SimpleRule> for RuleDef {
    fn from(rule: SimpleRule) -> Self {
        RuleDef::Simple(rule)
    }
}

impl From<CompositeRule> for RuleDef {
    fn from(rule: CompositeRule) -> Self {
        RuleDef::Composite(rule)
    }
}
