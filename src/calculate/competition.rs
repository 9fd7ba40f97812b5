//! Rank-based competition scores.
//!
//! Each finish scores `(N - rank) / (N - 1)` where `N` is the number of
//! published standings: 1.0 for first place, 0.0 for last. Finishes are
//! weighted by the tournament's total entrant count, so doing well in a
//! large field counts for more.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{ClassifiedTournament, CompetitionScore};

#[derive(Debug, Default)]
struct Accumulator {
    weighted_score: f64,
    weight: f64,
    entries: u32,
}

/// Competition scores per archetype across a set of tournaments.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompetitionScoreListing {
    /// Scores in order of first appearance
    pub scores: IndexMap<String, CompetitionScore>,

    /// Total finishes contributing to any score
    pub matches_seen: u32,
}

impl CompetitionScoreListing {
    /// Score every archetype in the given tournaments.
    ///
    /// Tournaments with fewer than two published standings have no rank
    /// spread to score and are skipped.
    pub fn from_tournaments(tournaments: &[ClassifiedTournament]) -> Self {
        let mut acc: IndexMap<String, Accumulator> = IndexMap::new();

        for tournament in tournaments {
            let n = tournament.players.len();
            if n < 2 {
                warn!(
                    "Skipping tournament {} for competition scores: {} ranked participant(s)",
                    tournament.id, n
                );
                continue;
            }

            let n = n as f64;
            let weight = if tournament.player_count > 0 {
                f64::from(tournament.player_count)
            } else {
                n
            };

            for player in &tournament.players {
                let rank = player.rank();
                if rank == 0 || rank as usize > tournament.players.len() {
                    warn!(
                        "Skipping {} in tournament {}: rank {} outside 1..={}",
                        player.participant.name,
                        tournament.id,
                        rank,
                        tournament.players.len()
                    );
                    continue;
                }
                let score = (n - f64::from(rank)) / (n - 1.0);
                let entry = acc.entry(player.deck_name.clone()).or_default();
                entry.weighted_score += score * weight;
                entry.weight += weight;
                entry.entries += 1;
            }
        }

        let scores: IndexMap<String, CompetitionScore> = acc
            .into_iter()
            .map(|(name, a)| {
                (
                    name,
                    CompetitionScore {
                        score: a.weighted_score / a.weight,
                        number_of_entries: a.entries,
                    },
                )
            })
            .collect();
        let matches_seen: u32 = scores.values().map(|s| s.number_of_entries).sum();

        debug!(
            "Scored {} archetypes from {} finishes",
            scores.len(),
            matches_seen
        );
        Self {
            scores,
            matches_seen,
        }
    }

    pub fn get(&self, deck_name: &str) -> Option<&CompetitionScore> {
        self.scores.get(deck_name)
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Fraction of all scored finishes that belong to an archetype.
    pub fn share(&self, deck_name: &str) -> Option<f64> {
        if self.matches_seen == 0 {
            return None;
        }
        self.get(deck_name)
            .map(|s| f64::from(s.number_of_entries) / f64::from(self.matches_seen))
    }

    /// Archetypes ordered by score, best first.
    pub fn sorted_by_score(&self) -> Vec<(&str, &CompetitionScore)> {
        let mut sorted: Vec<_> = self
            .scores
            .iter()
            .map(|(name, score)| (name.as_str(), score))
            .collect();
        sorted.sort_by(|a, b| b.1.score.total_cmp(&a.1.score));
        sorted
    }
}
