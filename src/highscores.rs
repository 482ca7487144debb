//! High score leaderboard
//!
//! Persisted as a line-oriented `name,score` ledger file, best score first,
//! at most five lines. A missing or mangled file never fails a load: the
//! ledger comes back padded with placeholder entries instead.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HIGH_SCORES;

/// Name used for padding entries
const PLACEHOLDER_NAME: &str = "-----";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create an empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// An empty leaderboard padded to [`MAX_HIGH_SCORES`] placeholders
    pub fn placeholder() -> Self {
        let mut scores = Self::new();
        scores.pad();
        scores
    }

    fn pad(&mut self) {
        while self.entries.len() < MAX_HIGH_SCORES {
            self.entries.push(HighScoreEntry {
                name: PLACEHOLDER_NAME.to_string(),
                score: 0,
            });
        }
    }

    /// Check if a score is worthy of the leaderboard: room left, or better
    /// than the lowest kept entry
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't
    /// qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a score to the leaderboard if it qualifies.
    /// Returns the rank achieved (1-indexed) or None.
    pub fn add_score(&mut self, name: &str, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
        };

        // Insertion point in the descending order
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// The best kept score, if any non-placeholder entry exists
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score).filter(|&s| s > 0)
    }

    /// Load the ledger from a `name,score` file.
    ///
    /// A missing or unreadable file yields the placeholder ledger.
    /// Malformed lines are skipped individually; the rest still load.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                log::info!(
                    "no high score ledger at {:?} ({err}), starting fresh",
                    path.as_ref()
                );
                return Self::placeholder();
            }
        };

        let mut scores = Self::new();
        for line in text.lines() {
            let Some((name, score)) = line.split_once(',') else {
                log::debug!("skipping malformed ledger line: {line:?}");
                continue;
            };
            let Ok(score) = score.trim().parse::<u64>() else {
                log::debug!("skipping malformed ledger line: {line:?}");
                continue;
            };
            scores.entries.push(HighScoreEntry {
                name: name.to_string(),
                score,
            });
        }

        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        scores.pad();
        log::info!("loaded {} high score entries", scores.entries.len());
        scores
    }

    /// Write the ledger back out, best score first, at most
    /// [`MAX_HIGH_SCORES`] lines
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut out = String::new();
        for entry in self.entries.iter().take(MAX_HIGH_SCORES) {
            out.push_str(&entry.name);
            out.push(',');
            out.push_str(&entry.score.to_string());
            out.push('\n');
        }
        fs::write(path, out)
    }
}
