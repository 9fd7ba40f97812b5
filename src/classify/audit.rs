//! Rule-set maintenance reports.
//!
//! Lists decks no rule recognises and decks several rules claim, so the
//! rule set can be extended or reordered.

use serde::Serialize;
use tracing::info;

use super::Classifier;
use crate::models::{Deck, Tournament};

/// A deck no rule matched.
#[derive(Debug, Clone, Serialize)]
pub struct UnclassifiedEntry {
    pub player: String,
    pub link: String,
    pub deck: Deck,
}

/// A deck matched by more than one rule.
#[derive(Debug, Clone, Serialize)]
pub struct AmbiguousEntry {
    pub player: String,
    pub link: String,

    /// Matching archetypes in rule order; the first one wins
    pub matches: Vec<String>,
}

/// Every deck the classifier cannot name.
pub fn unclassified_entries(
    tournaments: &[Tournament],
    classifier: &Classifier,
) -> Vec<UnclassifiedEntry> {
    let entries: Vec<UnclassifiedEntry> = tournaments
        .iter()
        .flat_map(|t| {
            t.players
                .iter()
                .filter(move |p| classifier.matching_rule(&p.deck).is_none())
                .map(move |p| UnclassifiedEntry {
                    player: p.name.clone(),
                    link: t.deck_link(&p.name),
                    deck: p.deck.clone(),
                })
        })
        .collect();

    info!(
        "{} unclassified decks across {} tournaments ({})",
        entries.len(),
        tournaments.len(),
        classifier.label()
    );
    entries
}

/// Every deck that more than one rule matches.
pub fn ambiguous_entries(tournaments: &[Tournament], classifier: &Classifier) -> Vec<AmbiguousEntry> {
    let mut entries = Vec::new();
    for tournament in tournaments {
        for player in &tournament.players {
            let matches = classifier.all_matches(&player.deck);
            if matches.len() > 1 {
                entries.push(AmbiguousEntry {
                    player: player.name.clone(),
                    link: tournament.deck_link(&player.name),
                    matches: matches.into_iter().map(String::from).collect(),
                });
            }
        }
    }

    info!(
        "{} decks matched by more than one rule ({})",
        entries.len(),
        classifier.label()
    );
    entries
}
