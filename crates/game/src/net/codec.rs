use rkyv::util::AlignedVec;
use rkyv::{Archive, Deserialize, Serialize, rancor};

use crate::input::Intent;
use crate::player::{Loadout, PlayerId};
use crate::replication::{Channel, PlayerKey, ReplicatedValue};

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub enum Message {
    Joined {
        player: PlayerId,
        loadout: Loadout,
    },
    Quit {
        player: PlayerId,
    },
    PlayerState {
        player: PlayerId,
        key: PlayerKey,
        value: ReplicatedValue,
    },
    SharedState {
        channel: Channel,
        value: ReplicatedValue,
    },
    Intent {
        player: PlayerId,
        intent: Intent,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("serialization failed: {0}")]
    Serialize(rancor::Error),
    #[error("deserialization failed: {0}")]
    Deserialize(rancor::Error),
}

impl Message {
    pub fn encode(&self) -> Result<AlignedVec, CodecError> {
        rkyv::to_bytes::<rancor::Error>(self).map_err(CodecError::Serialize)
    }

    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        rkyv::from_bytes::<Self, rancor::Error>(data).map_err(CodecError::Deserialize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{Projectile, ProjectileId};

    #[test]
    fn bullet_list_survives_the_wire() {
        let message = Message::SharedState {
            channel: Channel::Bullets,
            value: ReplicatedValue::Bullets(vec![Projectile {
                id: ProjectileId::new(2, 900),
                origin: [1.0, 1.4, -3.5],
                angle: 0.25,
                owner: 2,
                damage: 10,
            }]),
        };

        let bytes = message.encode().unwrap();
        assert_eq!(Message::decode(&bytes).unwrap(), message);
    }

    #[test]
    fn garbage_is_rejected() {
        let mut bytes = AlignedVec::<16>::new();
        bytes.extend_from_slice(&[0xff; 3]);
        assert!(matches!(
            Message::decode(&bytes),
            Err(CodecError::Deserialize(_))
        ));
    }
}
