use crate::event::EventQueue;
use crate::input::Intent;
use crate::net::Network;
use crate::physics::Physics;
use crate::player::{Player, PlayerId};
use crate::replication::{EffectLists, Role, Roster};

/// Collaborators and shared state borrowed for the duration of one tick.
pub struct TickContext<'a> {
    pub now_ms: u64,
    pub dt: f32,
    pub local_id: PlayerId,
    pub physics: &'a mut dyn Physics,
    pub network: &'a mut dyn Network,
    pub effects: &'a mut EffectLists,
    pub events: &'a mut EventQueue,
}

/// Behavior that differs between the host and guests.
pub trait RoleSimulation {
    fn role(&self) -> Role;

    fn on_join(&mut self, ctx: &mut TickContext<'_>, player: &mut Player);
    fn on_leave(&mut self, ctx: &mut TickContext<'_>, player: &Player);

    /// Runs once per tick before any player is simulated.
    fn begin(&mut self, ctx: &mut TickContext<'_>, local_intent: &Intent);
    fn simulate(&mut self, ctx: &mut TickContext<'_>, player: &mut Player);
    /// Runs once per tick after every player has been simulated.
    fn settle(&mut self, ctx: &mut TickContext<'_>, roster: &mut Roster);
}
