//! JSONL (JSON Lines) storage.
//!
//! One tournament per line, appended as tournaments are imported. The file is
//! never rewritten; a repeated id is ignored on write and on read.

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::{is_recent, StorageConfig, StorageError, TournamentRepository};
use crate::models::{Tournament, TournamentId};

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append entities to the file, creating it if needed.
    pub fn append_batch(&self, entities: &[T]) -> Result<usize, StorageError> {
        if entities.is_empty() {
            return Ok(0);
        }

        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
        }

        writer.flush()?;
        debug!("Appended {} entities to {:?}", entities.len(), self.path);

        Ok(entities.len())
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Read all entities from the file. A missing file reads as empty and
    /// lines that fail to parse are logged and skipped.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!("Failed to parse line {} in {:?}: {}", idx + 1, self.path, e);
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }
}

/// Read a tournament import file: either a JSON array or JSON Lines.
pub fn read_tournament_file(path: &Path) -> Result<Vec<Tournament>, StorageError> {
    let contents = fs::read_to_string(path)?;
    if contents.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(&contents)?);
    }
    JsonlReader::new(path.to_path_buf()).read_all()
}

/// Tournament store at `<data_dir>/tournaments/tournaments.jsonl`.
pub struct JsonlRepository {
    path: PathBuf,
}

impl JsonlRepository {
    pub fn new(config: &StorageConfig) -> Self {
        Self::at(config.tournaments_path())
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored tournament, first copy of each id wins.
    fn read_unique(&self) -> Result<Vec<Tournament>, StorageError> {
        let mut seen = HashSet::new();
        let mut tournaments: Vec<Tournament> = JsonlReader::new(self.path.clone()).read_all()?;
        tournaments.retain(|t| seen.insert(t.id));
        Ok(tournaments)
    }
}

impl TournamentRepository for JsonlRepository {
    fn add(&mut self, tournament: Tournament) -> Result<bool, StorageError> {
        Ok(self.add_all(vec![tournament])? == 1)
    }

    fn add_all(&mut self, tournaments: Vec<Tournament>) -> Result<usize, StorageError> {
        let mut known: HashSet<TournamentId> = self.list_ids()?.into_iter().collect();
        let total = tournaments.len();
        let fresh: Vec<Tournament> = tournaments
            .into_iter()
            .filter(|t| known.insert(t.id))
            .collect();

        let written = JsonlWriter::new(self.path.clone()).append_batch(&fresh)?;
        info!(
            "Stored {} new tournaments in {:?} ({} already present)",
            written,
            self.path,
            total - written
        );
        Ok(written)
    }

    fn get(&self, id: TournamentId) -> Result<Tournament, StorageError> {
        self.read_unique()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or(StorageError::TournamentNotFound(id))
    }

    fn list_ids(&self) -> Result<Vec<TournamentId>, StorageError> {
        Ok(self.read_unique()?.iter().map(|t| t.id).collect())
    }

    fn list_cached_links(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.read_unique()?.into_iter().map(|t| t.link).collect())
    }

    fn load_all(&self, max_days: u32, now: DateTime<Utc>) -> Result<Vec<Tournament>, StorageError> {
        let mut tournaments = self.read_unique()?;
        tournaments.retain(|t| is_recent(t, max_days, now));
        debug!(
            "Loaded {} tournaments from {:?} (max_days = {})",
            tournaments.len(),
            self.path,
            max_days
        );
        Ok(tournaments)
    }
}
