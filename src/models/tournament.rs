//! Tournament and participant models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Deck;

/// Identifier assigned to a tournament by the source.
pub type TournamentId = u64;

/// A player's finish in a tournament.
///
/// Rank and record are independent: tie-breakers at the source mean a
/// better record does not always mean a better rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentParticipant {
    /// Display name of the player
    pub name: String,

    /// Final rank (1 = winner)
    pub rank: u32,

    pub wins: u32,

    pub losses: u32,

    /// Registered deck
    pub deck: Deck,
}

impl TournamentParticipant {
    /// Create a new participant.
    pub fn new(name: impl Into<String>, rank: u32, wins: u32, losses: u32, deck: Deck) -> Self {
        Self {
            name: name.into(),
            rank,
            wins,
            losses,
            deck,
        }
    }
}

/// A tournament as published by the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,

    /// Tournament name, e.g. "Pioneer Challenge 64"
    pub description: String,

    /// Format (e.g., "pioneer")
    pub format: String,

    /// Published standings, usually truncated to the top 32
    pub players: Vec<TournamentParticipant>,

    pub start_time: DateTime<Utc>,

    /// Decklist page at the source
    pub link: String,

    /// Total number of entrants, 0 if the source did not report it
    #[serde(default)]
    pub player_count: u32,
}

impl Tournament {
    /// Create a new tournament without participants.
    pub fn new(
        id: TournamentId,
        description: impl Into<String>,
        format: impl Into<String>,
        start_time: DateTime<Utc>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            format: format.into(),
            players: Vec::new(),
            start_time,
            link: link.into(),
            player_count: 0,
        }
    }

    /// Builder method to set participants.
    pub fn with_players(mut self, players: Vec<TournamentParticipant>) -> Self {
        self.players = players;
        self
    }

    /// Builder method to set the total entrant count.
    pub fn with_player_count(mut self, count: u32) -> Self {
        self.player_count = count;
        self
    }

    /// Total entrants, falling back to the published standings when the
    /// source did not report a count.
    pub fn entrants(&self) -> u32 {
        if self.player_count > 0 {
            self.player_count
        } else {
            self.players.len() as u32
        }
    }

    /// Link to one participant's decklist on the tournament page.
    pub fn deck_link(&self, player_name: &str) -> String {
        format!("{}#deck_{}", self.link, player_name)
    }

    /// Days elapsed between the tournament start and `now`.
    pub fn age_in_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.start_time).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tournament() -> Tournament {
        Tournament::new(
            12623703,
            "Pioneer Challenge 64",
            "pioneer",
            Utc.with_ymd_and_hms(2024, 3, 30, 10, 0, 0).unwrap(),
            "https://www.mtgo.com/decklist/pioneer-challenge-64-2024-03-3012623703",
        )
    }

    #[test]
    fn test_entrants_prefers_reported_count() {
        let t = tournament()
            .with_players(vec![TournamentParticipant::new(
                "p1",
                1,
                3,
                0,
                Deck::default(),
            )])
            .with_player_count(64);
        assert_eq!(t.entrants(), 64);
    }

    #[test]
    fn test_entrants_falls_back_to_standings() {
        let t = tournament().with_players(vec![
            TournamentParticipant::new("p1", 1, 3, 0, Deck::default()),
            TournamentParticipant::new("p2", 2, 2, 1, Deck::default()),
        ]);
        assert_eq!(t.entrants(), 2);
    }

    #[test]
    fn test_deck_link() {
        let t = tournament();
        assert_eq!(
            t.deck_link("Karlov"),
            "https://www.mtgo.com/decklist/pioneer-challenge-64-2024-03-3012623703#deck_Karlov"
        );
    }

    #[test]
    fn test_age_in_days() {
        let t = tournament();
        let now = Utc.with_ymd_and_hms(2024, 4, 2, 9, 0, 0).unwrap();
        assert_eq!(t.age_in_days(now), 2);
    }

    #[test]
    fn test_tournament_serialization() {
        let t = tournament().with_player_count(64);
        let json = serde_json::to_string(&t).unwrap();
        let deserialized: Tournament = serde_json::from_str(&json).unwrap();

        assert_eq!(t, deserialized);
    }

    #[test]
    fn test_player_count_defaults_to_zero() {
        let json = r#"{
            "id": 1,
            "description": "Test Tournament",
            "format": "pioneer",
            "players": [],
            "start_time": "2024-03-30T10:00:00Z",
            "link": "https://www.mtgo.com/decklist/1"
        }"#;
        let t: Tournament = serde_json::from_str(json).unwrap();
        assert_eq!(t.player_count, 0);
    }
}
