use serde::{Deserialize, Serialize};

use crate::net::NetworkError;
use crate::player::{Loadout, Weapon};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LobbyPhase {
    Connect,
    Lobby,
    InGame,
}

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("cannot launch from the {0:?} phase")]
    WrongPhase(LobbyPhase),
    #[error("session initialization failed: {0}")]
    Network(#[from] NetworkError),
}

/// Pre-game flow: pick an account, pick a loadout, then launch the session.
#[derive(Debug)]
pub struct Lobby {
    phase: LobbyPhase,
    account: Option<String>,
    loadout: Loadout,
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new()
    }
}

impl Lobby {
    pub fn new() -> Self {
        Self {
            phase: LobbyPhase::Connect,
            account: None,
            loadout: Loadout::default(),
        }
    }

    pub fn phase(&self) -> LobbyPhase {
        self.phase
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    /// Leaves the connect screen. An empty account plays anonymously and
    /// never reports scores.
    pub fn continue_with(&mut self, account: &str) -> bool {
        if self.phase != LobbyPhase::Connect {
            return false;
        }

        let account = account.trim();
        if account.is_empty() {
            self.account = None;
        } else {
            self.account = Some(account.to_string());
            self.loadout.name = account.to_string();
        }
        self.phase = LobbyPhase::Lobby;
        true
    }

    pub fn select_weapon(&mut self, weapon: Weapon) -> bool {
        if self.phase != LobbyPhase::Lobby {
            return false;
        }
        self.loadout.weapon = weapon;
        true
    }

    pub fn select_skin(&mut self, skin: &str) -> bool {
        if self.phase != LobbyPhase::Lobby {
            return false;
        }
        self.loadout.skin = skin.to_string();
        true
    }

    /// Runs `init` with the chosen loadout. On failure the error is logged and
    /// the lobby stays where it is so the player can retry.
    pub fn launch<N, F>(&mut self, init: F) -> Result<N, LaunchError>
    where
        F: FnOnce(&Loadout) -> Result<N, NetworkError>,
    {
        if self.phase != LobbyPhase::Lobby {
            return Err(LaunchError::WrongPhase(self.phase));
        }

        match init(&self.loadout) {
            Ok(network) => {
                log::info!(
                    "launching as {} with {}",
                    self.loadout.name,
                    self.loadout.weapon.display_name()
                );
                self.phase = LobbyPhase::InGame;
                Ok(network)
            }
            Err(err) => {
                log::error!("failed to start session: {err}");
                Err(LaunchError::Network(err))
            }
        }
    }
}
