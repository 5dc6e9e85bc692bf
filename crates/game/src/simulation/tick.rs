use crate::camera::{CameraRig, ViewMode};
use crate::event::{EventQueue, GameEvent, PendingEvent};
use crate::input::Intent;
use crate::net::{Network, RosterEvent};
use crate::physics::Physics;
use crate::player::{Player, PlayerId};
use crate::replication::{EffectLists, Role, Roster};
use crate::score::{ScoreReporter, ScoreStore};
use crate::spawn::SpawnSelector;

use super::guest::GuestSimulation;
use super::host::HostSimulation;
use super::role::{RoleSimulation, TickContext};
use super::{Frame, PlayerView, SessionConfig};

pub struct FixedTimestep {
    tick_rate: u32,
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(tick_rate: u32) -> Self {
        let tick_rate = tick_rate.max(1);
        Self {
            tick_rate,
            dt: 1.0 / tick_rate as f32,
            accumulator: 0.0,
        }
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn accumulate(&mut self, delta: f32) {
        self.accumulator += delta.min(0.25);
    }

    pub fn consume_tick(&mut self) -> bool {
        if self.accumulator >= self.dt {
            self.accumulator -= self.dt;
            true
        } else {
            false
        }
    }
}

/// Per-frame orchestration for one participant. The only place that talks
/// to the physics engine and the network.
pub struct SimulationLoop<P, N> {
    config: SessionConfig,
    local_id: PlayerId,
    elapsed_ms: f64,
    physics: P,
    network: N,
    roster: Roster,
    effects: EffectLists,
    events: EventQueue,
    strategy: Box<dyn RoleSimulation>,
    view_mode: ViewMode,
    scores: Option<ScoreReporter>,
    reported_kills: u32,
}

impl<P: Physics, N: Network> SimulationLoop<P, N> {
    /// Resolves the role from the network once; `spawns` is only consulted on the host.
    pub fn new(config: SessionConfig, physics: P, network: N, spawns: SpawnSelector) -> Self {
        let role = Role::from_host_flag(network.is_host());
        let strategy: Box<dyn RoleSimulation> = match role {
            Role::Host => Box::new(HostSimulation::new(&config, spawns)),
            Role::Guest => Box::new(GuestSimulation::new(&config)),
        };
        let local_id = network.current_player_id();
        log::debug!("player {local_id} simulating as {role:?}");

        Self {
            events: EventQueue::new(config.event_capacity),
            config,
            local_id,
            elapsed_ms: 0.0,
            physics,
            network,
            roster: Roster::new(),
            effects: EffectLists::new(),
            strategy,
            view_mode: ViewMode::default(),
            scores: None,
            reported_kills: 0,
        }
    }

    /// Reports the local player's kills to `store` under the configured
    /// account. Without an account nothing is reported.
    pub fn with_score_store(mut self, store: Box<dyn ScoreStore>) -> Self {
        match &self.config.account {
            Some(account) => {
                self.scores = Some(ScoreReporter::new(
                    account.clone(),
                    store,
                    self.config.highscore_debounce_ms,
                ));
            }
            None => log::debug!("no account configured, scores will not be saved"),
        }
        self
    }

    pub fn role(&self) -> Role {
        self.strategy.role()
    }

    pub fn local_id(&self) -> PlayerId {
        self.local_id
    }

    pub fn now_ms(&self) -> u64 {
        self.elapsed_ms as u64
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.roster.get(id)
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut N {
        &mut self.network
    }

    pub fn effects(&self) -> &EffectLists {
        &self.effects
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<PendingEvent> {
        self.events.drain()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.config.viewport_width = width;
    }

    pub fn tick(&mut self, dt: f32, intent: Intent) -> Frame {
        self.elapsed_ms += f64::from(dt) * 1000.0;
        let now_ms = self.now_ms();

        let roster_events = match self.network.poll() {
            Ok(events) => events,
            Err(err) => {
                log::warn!("network poll failed: {err}");
                Vec::new()
            }
        };

        let mut ctx = TickContext {
            now_ms,
            dt,
            local_id: self.local_id,
            physics: &mut self.physics,
            network: &mut self.network,
            effects: &mut self.effects,
            events: &mut self.events,
        };

        for event in roster_events {
            match event {
                RosterEvent::Joined { player, loadout } => {
                    if self.roster.contains(player) {
                        continue;
                    }
                    let name = loadout.name.clone();
                    let mut joined = Player::new(player, loadout, self.config.combat.max_health);
                    self.strategy.on_join(&mut ctx, &mut joined);
                    self.roster.insert(joined);
                    ctx.events.push(
                        now_ms,
                        GameEvent::PlayerJoined {
                            player_id: player,
                            name,
                        },
                    );
                }
                RosterEvent::Left { player } => {
                    let Some(left) = self.roster.remove(player) else {
                        continue;
                    };
                    self.strategy.on_leave(&mut ctx, &left);
                    ctx.events
                        .push(now_ms, GameEvent::PlayerLeft { player_id: player });
                }
            }
        }

        self.strategy.begin(&mut ctx, &intent);
        for player in self.roster.iter_mut() {
            self.strategy.simulate(&mut ctx, player);
        }
        self.strategy.settle(&mut ctx, &mut self.roster);

        self.report_scores(now_ms);
        self.frame(now_ms)
    }

    fn report_scores(&mut self, now_ms: u64) {
        let Some(scores) = self.scores.as_mut() else {
            return;
        };

        if let Some(local) = self.roster.get(self.local_id) {
            let kills = local.vitals().kills();
            if kills > self.reported_kills {
                self.reported_kills = kills;
                scores.record(kills, now_ms);
            }
        }
        scores.tick(now_ms);
    }

    fn frame(&self, now_ms: u64) -> Frame {
        let camera = self
            .roster
            .get(self.local_id)
            .map(|local| {
                CameraRig::follow(
                    local.position,
                    local.motion.look,
                    self.config.viewport_width,
                    self.view_mode,
                )
            })
            .unwrap_or_default();

        Frame {
            now_ms,
            local_id: self.local_id,
            players: self.roster.iter().map(PlayerView::from).collect(),
            bullets: self.effects.bullets().to_vec(),
            hits: self.effects.hits().to_vec(),
            camera,
            view_mode: self.view_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_timestep_accumulation() {
        let mut ts = FixedTimestep::new(60);

        ts.accumulate(1.0 / 30.0);
        assert!(ts.consume_tick());
        assert!(ts.consume_tick());
        assert!(!ts.consume_tick());
    }

    #[test]
    fn long_stalls_are_clamped() {
        let mut ts = FixedTimestep::new(10);
        ts.accumulate(5.0);

        let mut ticks = 0;
        while ts.consume_tick() {
            ticks += 1;
        }
        assert_eq!(ticks, 2);
    }
}
