//! Tournament storage.
//!
//! The engine only ever reads materialized tournaments; this module holds the
//! repository interface it reads them through and two adapters:
//! - [`InMemoryRepository`] for tests and one-off runs
//! - [`JsonlRepository`], the on-disk store under the data directory

pub mod jsonl;

pub use jsonl::JsonlRepository;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{Tournament, TournamentId};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn tournaments_dir(&self) -> PathBuf {
        self.data_dir.join("tournaments")
    }

    pub fn tournaments_path(&self) -> PathBuf {
        self.tournaments_dir().join("tournaments.jsonl")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Whether a tournament started fewer than `max_days` whole days before `now`.
/// `0` means no limit.
pub fn is_recent(tournament: &Tournament, max_days: u32, now: DateTime<Utc>) -> bool {
    max_days == 0 || tournament.age_in_days(now) < i64::from(max_days)
}

/// Where tournaments come from.
///
/// Implementations keep insertion order and store each tournament id once.
pub trait TournamentRepository {
    /// Store a tournament. Returns `false` if its id is already present, in
    /// which case nothing is written.
    fn add(&mut self, tournament: Tournament) -> Result<bool, StorageError>;

    fn get(&self, id: TournamentId) -> Result<Tournament, StorageError>;

    fn list_ids(&self) -> Result<Vec<TournamentId>, StorageError>;

    /// Source links of every stored tournament, so a scraper can skip them.
    fn list_cached_links(&self) -> Result<Vec<String>, StorageError>;

    /// Stored tournaments within `max_days` of `now` (`0` = all).
    fn load_all(&self, max_days: u32, now: DateTime<Utc>) -> Result<Vec<Tournament>, StorageError>;

    fn list_ids_within(
        &self,
        max_days: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<TournamentId>, StorageError> {
        Ok(self
            .load_all(max_days, now)?
            .iter()
            .map(|t| t.id)
            .collect())
    }

    /// Store several tournaments, returning how many were new.
    fn add_all(&mut self, tournaments: Vec<Tournament>) -> Result<usize, StorageError> {
        let mut added = 0;
        for tournament in tournaments {
            if self.add(tournament)? {
                added += 1;
            }
        }
        Ok(added)
    }
}

/// Repository backed by a `Vec`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tournaments: Vec<Tournament>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TournamentRepository for InMemoryRepository {
    fn add(&mut self, tournament: Tournament) -> Result<bool, StorageError> {
        if self.tournaments.iter().any(|t| t.id == tournament.id) {
            return Ok(false);
        }
        self.tournaments.push(tournament);
        Ok(true)
    }

    fn get(&self, id: TournamentId) -> Result<Tournament, StorageError> {
        self.tournaments
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StorageError::TournamentNotFound(id))
    }

    fn list_ids(&self) -> Result<Vec<TournamentId>, StorageError> {
        Ok(self.tournaments.iter().map(|t| t.id).collect())
    }

    fn list_cached_links(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.tournaments.iter().map(|t| t.link.clone()).collect())
    }

    fn load_all(&self, max_days: u32, now: DateTime<Utc>) -> Result<Vec<Tournament>, StorageError> {
        Ok(self
            .tournaments
            .iter()
            .filter(|t| is_recent(t, max_days, now))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    fn tournament(id: TournamentId, day: u32) -> Tournament {
        Tournament::new(
            id,
            "Pioneer League",
            "pioneer",
            Utc.with_ymd_and_hms(2024, 4, day, 12, 0, 0).unwrap(),
            format!("https://www.mtgo.com/decklist/pioneer-league-{}", id),
        )
    }

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));

        assert_eq!(config.tournaments_dir(), PathBuf::from("/data/tournaments"));
        assert_eq!(
            config.tournaments_path(),
            PathBuf::from("/data/tournaments/tournaments.jsonl")
        );
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_is_recent() {
        let now = Utc.with_ymd_and_hms(2024, 4, 15, 11, 0, 0).unwrap();

        // 13 days 23 hours old counts as 13 whole days
        assert!(is_recent(&tournament(1, 1), 14, now));
        assert!(!is_recent(&tournament(1, 1), 13, now));
        assert!(is_recent(&tournament(1, 1), 0, now));
    }

    #[test]
    fn test_in_memory_add_once() {
        let mut repo = InMemoryRepository::new();

        assert!(repo.add(tournament(1, 1)).unwrap());
        assert!(!repo.add(tournament(1, 2)).unwrap());
        assert!(repo.add(tournament(2, 2)).unwrap());

        assert_eq!(repo.list_ids().unwrap().len(), 2);
        assert_eq!(repo.get(1).unwrap().start_time.day(), 1);
    }

    #[test]
    fn test_in_memory_get_missing() {
        let repo = InMemoryRepository::new();
        assert!(matches!(
            repo.get(42),
            Err(StorageError::TournamentNotFound(42))
        ));
    }

    #[test]
    fn test_in_memory_keeps_insertion_order() {
        let mut repo = InMemoryRepository::new();
        let added = repo
            .add_all(vec![tournament(3, 3), tournament(1, 1), tournament(2, 2)])
            .unwrap();

        assert_eq!(added, 3);
        assert_eq!(repo.list_ids().unwrap(), vec![3, 1, 2]);
        assert_eq!(
            repo.list_cached_links().unwrap()[0],
            "https://www.mtgo.com/decklist/pioneer-league-3"
        );
    }

    #[test]
    fn test_in_memory_recency() {
        let mut repo = InMemoryRepository::new();
        repo.add_all(vec![tournament(1, 1), tournament(2, 10), tournament(3, 20)])
            .unwrap();
        let now = Utc.with_ymd_and_hms(2024, 4, 21, 12, 0, 0).unwrap();

        assert_eq!(repo.list_ids_within(14, now).unwrap(), vec![2, 3]);
        assert_eq!(repo.load_all(0, now).unwrap().len(), 3);
    }
}
