//! Per-player performance samples.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Deck;

/// One player's performance in one tournament, after classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckResult {
    pub deck: Deck,

    /// Archetype assigned by the classifier
    pub deck_name: String,

    pub wins: u32,

    pub losses: u32,

    /// Tournament start time
    pub date: DateTime<Utc>,

    /// Link to the decklist at the source
    pub link: String,

    /// Cards the matching rule reported as the reason for the archetype
    #[serde(default)]
    pub heroes: Vec<String>,
}

impl DeckResult {
    /// Games played.
    pub fn total_games(&self) -> u32 {
        self.wins + self.losses
    }
}
