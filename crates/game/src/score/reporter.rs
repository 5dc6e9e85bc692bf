use super::ScoreStore;

pub const DEFAULT_DEBOUNCE_MS: u64 = 2000;

/// Forwards the local player's kill count to a [`ScoreStore`] once kills
/// have stopped arriving for `debounce_ms`.
pub struct ScoreReporter {
    account: String,
    store: Box<dyn ScoreStore>,
    debounce_ms: u64,
    pending: Option<(u32, u64)>,
    last_saved: u32,
}

impl ScoreReporter {
    pub fn new(account: impl Into<String>, store: Box<dyn ScoreStore>, debounce_ms: u64) -> Self {
        Self {
            account: account.into(),
            store,
            debounce_ms,
            pending: None,
            last_saved: 0,
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn last_saved(&self) -> u32 {
        self.last_saved
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Notes a new kill total. Restarts the debounce window.
    pub fn record(&mut self, kills: u32, now_ms: u64) {
        self.pending = Some((kills, now_ms));
    }

    /// Saves the pending total once the window has elapsed. Store failures
    /// are logged and dropped.
    pub fn tick(&mut self, now_ms: u64) {
        let Some((kills, recorded_at)) = self.pending else {
            return;
        };
        if now_ms.saturating_sub(recorded_at) < self.debounce_ms {
            return;
        }
        self.pending = None;

        if kills <= self.last_saved {
            return;
        }

        match self.store.save_highscore(&self.account, kills) {
            Ok(outcome) => {
                self.last_saved = kills;
                if outcome.is_new_highscore {
                    log::info!("new highscore for {}: {kills} kills", self.account);
                }
            }
            Err(err) => log::warn!("failed to save highscore for {}: {err}", self.account),
        }
    }
}
