//! High score table
//!
//! Tracks the top 10 runs. Persisted as JSON next to the settings file on
//! native builds; the browser build keeps it in memory for the session.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the run
    pub score: u64,
    /// Seed of the run, to replay the level
    pub seed: u64,
    /// Wall-clock Unix time (ms) when the run ended
    pub timestamp: f64,
}

/// Best runs, kept sorted and capped at [`MAX_HIGH_SCORES`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    /// Sorted by score, best first
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score would make the table
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Insert a run; returns its rank (1-indexed) if it made the table
    pub fn add_score(&mut self, score: u64, seed: u64, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            seed,
            timestamp,
        };
        // Ties keep the older run ahead
        let index = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(index, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(index + 1)
    }

    /// Best score so far, if any run made the table
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// No run has made the table yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load the table, starting fresh when the file is missing or unreadable
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = std::fs::read_to_string(path)
            .ok()
            .and_then(|json| serde_json::from_str::<HighScores>(&json).ok());

        match loaded {
            Some(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Write the table as JSON, replacing the file
    pub fn save_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));
    }

    #[test]
    fn test_sorted_insert_and_rank() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(50, 1, 0.0), Some(1));
        assert_eq!(scores.add_score(80, 2, 1.0), Some(1));
        assert_eq!(scores.add_score(60, 3, 2.0), Some(2));
        assert_eq!(scores.add_score(60, 4, 3.0), Some(3));

        let order: Vec<_> = scores.entries.iter().map(|e| e.seed).collect();
        assert_eq!(order, vec![2, 3, 4, 1]);
        assert_eq!(scores.top_score(), Some(80));
    }

    #[test]
    fn test_table_is_capped() {
        let mut scores = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(i * 10, i, 0.0);
        }
        assert!(!scores.qualifies(5));
        assert_eq!(scores.add_score(5, 99, 0.0), None);
        assert_eq!(scores.add_score(1000, 99, 0.0), Some(1));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("tilt_tide_scores_{}.json", std::process::id()));
        let mut scores = HighScores::new();
        scores.add_score(321, 7, 1234.5);
        scores.save_to(&path).unwrap();

        let loaded = HighScores::load_from(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, scores);
    }
}
