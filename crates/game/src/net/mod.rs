mod codec;
mod loopback;
mod network;

pub use codec::{CodecError, Message};
pub use loopback::{LoopbackHub, LoopbackPeer};
pub use network::{Network, NetworkError, RosterEvent};
