mod reporter;
mod store;

pub use reporter::{DEFAULT_DEBOUNCE_MS, ScoreReporter};
pub use store::{HighscoreEntry, MemoryScoreStore, SaveOutcome, ScoreError, ScoreStore};
