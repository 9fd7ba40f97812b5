//! Card-choice breakdown within one archetype.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use super::{to_percent, wilson_score_interval, Z_95};
use crate::models::{DeckResult, WinRate};

/// A card at a specific copy count. Four copies and two copies of the same
/// card are different choices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CardChoice {
    pub quantity: u32,
    pub name: String,
}

impl std::fmt::Display for CardChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x {}", self.quantity, self.name)
    }
}

/// Record of every deck that made a given card choice.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CardChoiceStats {
    pub wins: u32,
    pub losses: u32,

    /// First deck seen with this choice
    pub example_link: Option<String>,
}

impl CardChoiceStats {
    pub fn total_games(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn win_rate(&self) -> WinRate {
        let (mean, lower, upper) = wilson_score_interval(self.wins, self.losses, Z_95);
        WinRate {
            mean: to_percent(mean),
            lower_bound: to_percent(lower),
            upper_bound: to_percent(upper),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeckAnalysis {
    pub deck_name: String,
    pub wins: u32,
    pub losses: u32,

    /// Choices in order of first appearance
    pub cards: IndexMap<CardChoice, CardChoiceStats>,
}

impl DeckAnalysis {
    pub fn new(deck_name: impl Into<String>) -> Self {
        Self {
            deck_name: deck_name.into(),
            ..Default::default()
        }
    }

    /// Break down every result labelled `deck_name`. Other results are ignored.
    pub fn from_results(deck_name: &str, results: &[DeckResult]) -> Self {
        let mut analysis = Self::new(deck_name);
        for result in results.iter().filter(|r| r.deck_name == deck_name) {
            analysis.add(result);
        }

        debug!(
            "Analysed '{}': {} card choices over {} games",
            deck_name,
            analysis.cards.len(),
            analysis.total_games()
        );
        analysis
    }

    /// Fold one result into the totals and into each card choice of its deck.
    pub fn add(&mut self, result: &DeckResult) {
        self.wins += result.wins;
        self.losses += result.losses;

        for card in result.deck.combined() {
            let stats = self
                .cards
                .entry(CardChoice {
                    quantity: card.quantity,
                    name: card.name,
                })
                .or_default();
            stats.wins += result.wins;
            stats.losses += result.losses;
            if stats.example_link.is_none() {
                stats.example_link = Some(result.link.clone());
            }
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn win_rate(&self) -> WinRate {
        let (mean, lower, upper) = wilson_score_interval(self.wins, self.losses, Z_95);
        WinRate {
            mean: to_percent(mean),
            lower_bound: to_percent(lower),
            upper_bound: to_percent(upper),
        }
    }

    /// Wins and losses of every deck playing `name`, at any copy count.
    pub fn card_record(&self, name: &str) -> (u32, u32) {
        self.cards
            .iter()
            .filter(|(choice, _)| choice.name == name)
            .fold((0, 0), |(w, l), (_, stats)| (w + stats.wins, l + stats.losses))
    }

    /// Choices with at least `min_matches` games, best win rate first.
    ///
    /// Ties keep first-seen order.
    pub fn ranked_choices(&self, min_matches: u32) -> Vec<(&CardChoice, &CardChoiceStats)> {
        let mut ranked: Vec<_> = self
            .cards
            .iter()
            .filter(|(_, stats)| stats.total_games() >= min_matches)
            .collect();
        ranked.sort_by(|a, b| b.1.win_rate().mean.total_cmp(&a.1.win_rate().mean));
        ranked
    }
}
