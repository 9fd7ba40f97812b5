//! Result extraction and per-archetype aggregation.

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use tracing::{debug, info};

use super::{to_percent, wilson_score_interval, StatsError, Z_95};
use crate::classify::Classifier;
use crate::models::{DeckResult, DeckStat, Tournament, WinRate};

/// Flatten tournaments into one classified result per participant.
///
/// Results follow tournament order, then standings order.
pub fn extract_results(tournaments: &[Tournament], classifier: &Classifier) -> Vec<DeckResult> {
    let mut results = Vec::with_capacity(tournaments.iter().map(|t| t.players.len()).sum());

    for tournament in tournaments {
        for player in &tournament.players {
            let (deck_name, heroes) = classifier.classify_with_heroes(&player.deck);
            results.push(DeckResult {
                deck: player.deck.clone(),
                deck_name: deck_name.to_string(),
                wins: player.wins,
                losses: player.losses,
                date: tournament.start_time,
                link: tournament.deck_link(&player.name),
                heroes: heroes.to_vec(),
            });
        }
    }

    debug!(
        "Extracted {} results from {} tournaments",
        results.len(),
        tournaments.len()
    );
    results
}

/// Working set of results plus the population play rates are measured
/// against.
///
/// Filtering by age resets the population; splitting an archetype by card
/// choice does not, so a drill-down keeps the play rates of the full field.
#[derive(Debug, Clone)]
pub struct ResultHandler {
    population: usize,
    results: Vec<DeckResult>,
}

impl ResultHandler {
    pub fn new(results: Vec<DeckResult>) -> Self {
        Self {
            population: results.len(),
            results,
        }
    }

    pub fn results(&self) -> &[DeckResult] {
        &self.results
    }

    /// Number of results play rates are divided by.
    pub fn population(&self) -> usize {
        self.population
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Drop results older than `max_days` before `now`.
    ///
    /// `None` or `Some(0)` keeps everything. Either way the population is
    /// reset to the remaining results.
    pub fn filter(&mut self, max_days: Option<u32>, now: DateTime<Utc>) {
        if let Some(days) = max_days.filter(|d| *d > 0) {
            let max_age = Duration::days(i64::from(days));
            let before = self.results.len();
            self.results.retain(|r| now - r.date <= max_age);
            debug!(
                "Filtered results to the last {} days: {} -> {}",
                days,
                before,
                self.results.len()
            );
        }

        self.population = self.results.len();
    }

    /// Keep only one archetype and relabel it by how many copies of each card
    /// a deck plays, e.g. `"Izzet Phoenix (4x Arclight Phoenix)"`.
    ///
    /// With several cards the labels chain in the order given.
    pub fn split_deck_by_cards(&mut self, deck: &str, cards: &[String]) {
        let before = self.results.len();
        self.results.retain(|r| r.deck_name == deck);

        for result in &mut self.results {
            for card in cards {
                let count = result.deck.count(card);
                result.deck_name = format!("{} ({}x {})", result.deck_name, count, card);
            }
        }

        info!(
            "Split '{}' by {} card(s): kept {} of {} results",
            deck,
            cards.len(),
            self.results.len(),
            before
        );
    }

    /// Pooled win rate of a set of results with a 95% Wilson interval.
    pub fn calculate_win_rate(results: &[DeckResult]) -> WinRate {
        let wins = results.iter().map(|r| r.wins).sum();
        let losses = results.iter().map(|r| r.losses).sum();
        let (mean, lower, upper) = wilson_score_interval(wins, losses, Z_95);

        WinRate {
            mean: to_percent(mean),
            lower_bound: to_percent(lower),
            upper_bound: to_percent(upper),
        }
    }

    /// Share of the population labelled `deck`, in percent.
    pub fn calculate_play_rate(&self, deck: &str) -> Result<f64, StatsError> {
        if self.population == 0 {
            return Err(StatsError::EmptyPopulation(deck.to_string()));
        }

        let count = self.results.iter().filter(|r| r.deck_name == deck).count();
        Ok(to_percent(count as f64 / self.population as f64))
    }

    /// Statistics for every archetype in the working set, in first-seen order.
    pub fn calculate_deck_stats(&self) -> Result<Vec<DeckStat>, StatsError> {
        let mut decks: IndexMap<&str, Vec<DeckResult>> = IndexMap::new();
        for result in &self.results {
            decks
                .entry(result.deck_name.as_str())
                .or_default()
                .push(result.clone());
        }

        let mut stats = Vec::with_capacity(decks.len());
        for (name, results) in &decks {
            let example = results.first();
            stats.push(DeckStat {
                name: name.to_string(),
                win_rate: Self::calculate_win_rate(results),
                play_rate: self.calculate_play_rate(name)?,
                total_matches: results.iter().map(|r| r.total_games()).sum(),
                example_link: example.map(|r| r.link.clone()),
                heroes: example.map(|r| r.heroes.clone()).unwrap_or_default(),
            });
        }

        debug!(
            "Computed stats for {} archetypes over a population of {}",
            stats.len(),
            self.population
        );
        Ok(stats)
    }
}
