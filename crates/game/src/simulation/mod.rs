mod config;
mod frame;
mod guest;
mod host;
mod role;
mod tick;

pub use config::SessionConfig;
pub use frame::{Frame, PlayerView};
pub use guest::GuestSimulation;
pub use host::HostSimulation;
pub use role::{RoleSimulation, TickContext};
pub use tick::{FixedTimestep, SimulationLoop};
