use crate::input::Intent;
use crate::player::{Loadout, PlayerId};
use crate::replication::{Channel, PlayerKey, ReplicatedValue};

use super::CodecError;

#[derive(Debug, Clone, PartialEq)]
pub enum RosterEvent {
    Joined { player: PlayerId, loadout: Loadout },
    Left { player: PlayerId },
}

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("session is full ({capacity} players)")]
    SessionFull { capacity: usize },
    #[error("session closed")]
    Closed,
    #[error("only the host may write replicated state")]
    NotHost,
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// The shared-state transport as seen by the simulation.
///
/// Player slots and session channels are last-write-visible: readers only
/// ever observe the most recent value that has reached them.
pub trait Network {
    fn is_host(&self) -> bool;
    fn current_player_id(&self) -> PlayerId;

    /// Delivers pending traffic and reports players that joined or left.
    fn poll(&mut self) -> Result<Vec<RosterEvent>, NetworkError>;

    fn get_state(&self, player: PlayerId, key: PlayerKey) -> Option<&ReplicatedValue>;
    fn set_state(
        &mut self,
        player: PlayerId,
        key: PlayerKey,
        value: ReplicatedValue,
    ) -> Result<(), NetworkError>;

    fn shared_state(&self, channel: Channel) -> Option<&ReplicatedValue>;
    fn set_shared_state(
        &mut self,
        channel: Channel,
        value: ReplicatedValue,
    ) -> Result<(), NetworkError>;

    /// Sends the local player's input to the host.
    fn send_intent(&mut self, intent: Intent) -> Result<(), NetworkError>;
    /// Input received from guests since the last call, oldest first. Host only.
    fn take_intents(&mut self) -> Vec<(PlayerId, Intent)>;
}
