//! Persistence of finished games
//!
//! A [`ResultSink`] receives each game once, at completion, together with its
//! interaction log and invalid attempts. [`JsonlSink`] appends one JSON object
//! per game to a file; [`MemorySink`] keeps them in memory.

use super::result::{GameResult, InteractionRecord, InvalidAttempt};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write results to '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode game result: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Malformed record on line {line} of '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Destination for finished games
pub trait ResultSink: Send + Sync {
    /// Persist one game; returns the id it was stored under
    ///
    /// # Errors
    ///
    /// Returns `SinkError` if the game could not be stored.
    fn save_game_result(
        &self,
        result: &GameResult,
        interactions: &[InteractionRecord],
        invalid_attempts: &[InvalidAttempt],
    ) -> Result<Uuid, SinkError>;
}

/// A persisted game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredGame {
    pub id: Uuid,
    pub saved_at: DateTime<Local>,
    pub result: GameResult,
    pub interactions: Vec<InteractionRecord>,
    pub invalid_attempts: Vec<InvalidAttempt>,
}

impl StoredGame {
    fn new(
        result: &GameResult,
        interactions: &[InteractionRecord],
        invalid_attempts: &[InvalidAttempt],
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            saved_at: Local::now(),
            result: result.clone(),
            interactions: interactions.to_vec(),
            invalid_attempts: invalid_attempts.to_vec(),
        }
    }
}

/// Appends games to a JSON-lines file
#[derive(Debug)]
pub struct JsonlSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonlSink {
    /// Open `path` for appending, creating it and its parent directories
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Io` if the file cannot be opened.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let path = path.into();
        let io_err = |source| SinkError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(io_err)?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back every game stored in a JSON-lines file
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Io` if the file cannot be read and
    /// `SinkError::Decode` for a line that is not a stored game.
    pub fn read(path: &Path) -> Result<Vec<StoredGame>, SinkError> {
        let io_err = |source| SinkError::Io {
            path: path.to_path_buf(),
            source,
        };
        let reader = BufReader::new(File::open(path).map_err(io_err)?);

        let mut games = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(io_err)?;
            if line.trim().is_empty() {
                continue;
            }
            let game = serde_json::from_str(&line).map_err(|source| SinkError::Decode {
                path: path.to_path_buf(),
                line: i + 1,
                source,
            })?;
            games.push(game);
        }
        Ok(games)
    }
}

impl ResultSink for JsonlSink {
    fn save_game_result(
        &self,
        result: &GameResult,
        interactions: &[InteractionRecord],
        invalid_attempts: &[InvalidAttempt],
    ) -> Result<Uuid, SinkError> {
        let game = StoredGame::new(result, interactions, invalid_attempts);
        let mut line = serde_json::to_string(&game)?;
        line.push('\n');

        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(line.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| SinkError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(game.id)
    }
}

/// Keeps games in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    games: Mutex<Vec<StoredGame>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored game
    #[must_use]
    pub fn games(&self) -> Vec<StoredGame> {
        self.games
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ResultSink for MemorySink {
    fn save_game_result(
        &self,
        result: &GameResult,
        interactions: &[InteractionRecord],
        invalid_attempts: &[InvalidAttempt],
    ) -> Result<Uuid, SinkError> {
        let game = StoredGame::new(result, interactions, invalid_attempts);
        let id = game.id;
        self.games
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(game);
        Ok(id)
    }
}
