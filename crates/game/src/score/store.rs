use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighscoreEntry {
    pub account: String,
    pub total_kills: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub is_new_highscore: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("score store unavailable: {0}")]
    Unavailable(String),
    #[error("account name must not be empty")]
    EmptyAccount,
}

/// Persistent per-account high scores.
pub trait ScoreStore {
    /// Stores `kills` unless the account already has an equal or higher score.
    fn save_highscore(&mut self, account: &str, kills: u32) -> Result<SaveOutcome, ScoreError>;
    fn highscore(&self, account: &str) -> Result<Option<u32>, ScoreError>;
    /// Best scores first.
    fn leaderboard(&self, limit: usize) -> Result<Vec<HighscoreEntry>, ScoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Rc<RefCell<S>> {
    fn save_highscore(&mut self, account: &str, kills: u32) -> Result<SaveOutcome, ScoreError> {
        self.borrow_mut().save_highscore(account, kills)
    }

    fn highscore(&self, account: &str) -> Result<Option<u32>, ScoreError> {
        self.borrow().highscore(account)
    }

    fn leaderboard(&self, limit: usize) -> Result<Vec<HighscoreEntry>, ScoreError> {
        self.borrow().leaderboard(limit)
    }
}

#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    scores: HashMap<String, u32>,
    saves: usize,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save_highscore` calls received, accepted or not.
    pub fn save_calls(&self) -> usize {
        self.saves
    }
}

impl ScoreStore for MemoryScoreStore {
    fn save_highscore(&mut self, account: &str, kills: u32) -> Result<SaveOutcome, ScoreError> {
        if account.is_empty() {
            return Err(ScoreError::EmptyAccount);
        }
        self.saves += 1;

        let best = self.scores.entry(account.to_string()).or_insert(0);
        let is_new_highscore = kills > *best;
        if is_new_highscore {
            *best = kills;
        }
        Ok(SaveOutcome { is_new_highscore })
    }

    fn highscore(&self, account: &str) -> Result<Option<u32>, ScoreError> {
        Ok(self.scores.get(account).copied())
    }

    fn leaderboard(&self, limit: usize) -> Result<Vec<HighscoreEntry>, ScoreError> {
        let mut entries: Vec<HighscoreEntry> = self
            .scores
            .iter()
            .map(|(account, kills)| HighscoreEntry {
                account: account.clone(),
                total_kills: *kills,
            })
            .collect();
        entries.sort_by(|a, b| {
            b.total_kills
                .cmp(&a.total_kills)
                .then_with(|| a.account.cmp(&b.account))
        });
        entries.truncate(limit);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_the_maximum() {
        let mut store = MemoryScoreStore::new();
        assert!(store.save_highscore("ana", 5).unwrap().is_new_highscore);
        assert!(!store.save_highscore("ana", 3).unwrap().is_new_highscore);
        assert!(!store.save_highscore("ana", 5).unwrap().is_new_highscore);
        assert_eq!(store.highscore("ana").unwrap(), Some(5));
        assert_eq!(store.highscore("bo").unwrap(), None);
    }

    #[test]
    fn leaderboard_is_descending_and_limited() {
        let mut store = MemoryScoreStore::new();
        store.save_highscore("a", 2).unwrap();
        store.save_highscore("b", 9).unwrap();
        store.save_highscore("c", 4).unwrap();

        let board = store.leaderboard(2).unwrap();
        let names: Vec<_> = board.iter().map(|e| e.account.as_str()).collect();
        assert_eq!(names, ["b", "c"]);
    }

    #[test]
    fn empty_account_is_rejected() {
        let mut store = MemoryScoreStore::new();
        assert!(matches!(
            store.save_highscore("", 1),
            Err(ScoreError::EmptyAccount)
        ));
    }
}
