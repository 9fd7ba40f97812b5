//! Tournaments annotated with archetype names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Tournament, TournamentId, TournamentParticipant};
use crate::classify::Classifier;

/// A participant together with the archetype of their deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedTournamentParticipant {
    pub participant: TournamentParticipant,
    pub deck_name: String,
}

impl ClassifiedTournamentParticipant {
    pub fn rank(&self) -> u32 {
        self.participant.rank
    }
}

/// A tournament whose participants have been classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedTournament {
    pub id: TournamentId,
    pub description: String,
    pub format: String,
    pub start_time: DateTime<Utc>,
    pub link: String,

    /// Total entrants (see `Tournament::entrants`)
    pub player_count: u32,

    pub players: Vec<ClassifiedTournamentParticipant>,
}

impl ClassifiedTournament {
    /// Classify every participant of a tournament, keeping standings order.
    pub fn from_tournament(tournament: &Tournament, classifier: &Classifier) -> Self {
        let players = tournament
            .players
            .iter()
            .map(|p| ClassifiedTournamentParticipant {
                deck_name: classifier.classify(&p.deck).to_string(),
                participant: p.clone(),
            })
            .collect();

        Self {
            id: tournament.id,
            description: tournament.description.clone(),
            format: tournament.format.clone(),
            start_time: tournament.start_time,
            link: tournament.link.clone(),
            player_count: tournament.entrants(),
            players,
        }
    }
}
