mod channel;
mod dirty;
mod ephemeral;
mod role;
mod roster;
mod sync;

pub use channel::{Channel, PlayerKey, ReplicatedValue};
pub use dirty::DirtyFields;
pub use ephemeral::EffectLists;
pub use role::Role;
pub use roster::Roster;
pub use sync::{consume_player, publish_player};
