pub mod camera;
pub mod combat;
pub mod event;
pub mod input;
pub mod lobby;
pub mod net;
pub mod physics;
pub mod player;
pub mod replication;
pub mod score;
pub mod simulation;
pub mod spawn;

pub use camera::{CameraRig, ViewMode};
pub use combat::{CombatConfig, CombatModel, HitEffect, HitOutcome, Projectile, ProjectileId};
pub use event::{EventQueue, GameEvent, PendingEvent};
pub use input::{InputConfig, InputEvent, InputSampler, Intent, Joystick, Key, PointerCapture};
pub use lobby::{LaunchError, Lobby, LobbyPhase};
pub use net::{CodecError, LoopbackHub, LoopbackPeer, Network, NetworkError, RosterEvent};
pub use physics::{BodyId, BodyKind, BodyTag, BulletTag, Intersection, Physics, PhysicsWorld};
pub use player::{
    AnimationState, ControlScheme, JumpMode, Loadout, MovementConfig, Player, PlayerController,
    PlayerId, Weapon,
};
pub use replication::{Channel, PlayerKey, ReplicatedValue, Role, Roster};
pub use score::{HighscoreEntry, MemoryScoreStore, ScoreError, ScoreReporter, ScoreStore};
pub use simulation::{FixedTimestep, Frame, PlayerView, SessionConfig, SimulationLoop};
pub use spawn::{SpawnSelector, SpawnSource};
