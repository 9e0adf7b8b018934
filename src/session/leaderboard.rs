//! Top-N high score table. Persisting it is up to the caller.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub initials: String,
    pub score: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    capacity: usize,
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    pub fn from_entries(mut entries: Vec<LeaderboardEntry>, capacity: usize) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    pub fn from_json(json: &str, capacity: usize) -> Result<Self, ConfigError> {
        let entries: Vec<LeaderboardEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries, capacity))
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Entries, best first.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn best(&self) -> Option<&LeaderboardEntry> {
        self.entries.first()
    }

    pub fn best_score(&self) -> u64 {
        self.best().map_or(0, |e| e.score)
    }

    /// Insert a score and return its 0-based rank if it made the table.
    ///
    /// Ties keep the older entry ahead.
    pub fn record(&mut self, initials: &str, score: u64) -> Option<usize> {
        let rank = self.entries.partition_point(|e| e.score >= score);
        if rank >= self.capacity {
            return None;
        }
        self.entries.insert(
            rank,
            LeaderboardEntry {
                initials: normalize_initials(initials),
                score,
            },
        );
        self.entries.truncate(self.capacity);
        Some(rank)
    }
}

/// Upper-case, at most three characters, `N/A` when blank.
fn normalize_initials(initials: &str) -> String {
    let trimmed = initials.trim();
    if trimmed.is_empty() {
        return "N/A".to_string();
    }
    trimmed.to_uppercase().chars().take(3).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_top_n() {
        let mut board = Leaderboard::new(3);
        assert_eq!(board.record("abc", 100), Some(0));
        assert_eq!(board.record("def", 300), Some(0));
        assert_eq!(board.record("ghi", 200), Some(1));
        assert_eq!(board.record("jkl", 50), None);
        assert_eq!(board.record("mno", 200), Some(2));

        let scores: Vec<u64> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 200, 200]);
        assert_eq!(board.entries()[1].initials, "GHI");
        assert_eq!(board.best_score(), 300);
    }

    #[test]
    fn test_initials_normalized() {
        let mut board = Leaderboard::new(5);
        board.record("  ", 10);
        board.record("zoey", 20);
        assert_eq!(board.entries()[0].initials, "ZOE");
        assert_eq!(board.entries()[1].initials, "N/A");
    }

    #[test]
    fn test_json_snapshot() {
        let json = r#"[{"initials": "AAA", "score": 5}, {"initials": "BBB", "score": 50}]"#;
        let board = Leaderboard::from_json(json, 5).unwrap();
        assert_eq!(board.best().unwrap().initials, "BBB");

        let restored = Leaderboard::from_json(&board.to_json().unwrap(), 5).unwrap();
        assert_eq!(restored, board);
    }
}
