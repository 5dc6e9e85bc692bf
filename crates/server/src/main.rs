mod bots;
mod config;
mod events;
mod level;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use arena::{
    ControlScheme, FixedTimestep, JumpMode, Lobby, LoopbackHub, LoopbackPeer, MemoryScoreStore,
    PhysicsWorld, ScoreStore, SimulationLoop, SpawnSelector, Weapon,
};
use bots::BotDriver;
use config::HostConfig;
use level::build_arena;

type Participant = SimulationLoop<PhysicsWorld, LoopbackPeer>;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SchemeArg {
    Character,
    Strafe,
    Autoface,
}

impl From<SchemeArg> for ControlScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Character => ControlScheme::CharacterRelative,
            SchemeArg::Strafe => ControlScheme::Strafe,
            SchemeArg::Autoface => ControlScheme::AutoFace,
        }
    }
}

#[derive(Parser)]
#[command(name = "arena-host")]
#[command(about = "Headless arena session with scripted bots")]
struct Args {
    #[arg(short, long, default_value_t = 3)]
    bots: usize,

    #[arg(short, long, default_value_t = 3600, help = "Frames to simulate")]
    frames: u32,

    #[arg(short, long, default_value_t = 60)]
    tick_rate: u32,

    #[arg(long, value_enum, default_value_t = SchemeArg::Strafe)]
    scheme: SchemeArg,

    #[arg(long, help = "Allow up to five jumps before landing")]
    multi_jump: bool,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 0, help = "Polls each message spends in flight")]
    delay: u64,

    #[arg(long, help = "Sleep between frames to run at wall-clock speed")]
    realtime: bool,

    #[arg(long, default_value = "host", help = "Account of the hosting player")]
    account: String,
}

struct Seat {
    sim: Participant,
    driver: BotDriver,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = HostConfig {
        tick_rate: args.tick_rate,
        bots: args.bots,
        frames: args.frames,
        delay_polls: args.delay,
        seed: args.seed,
        control_scheme: args.scheme.into(),
        jump_mode: if args.multi_jump {
            JumpMode::multi()
        } else {
            JumpMode::Single
        },
        realtime: args.realtime,
        ..Default::default()
    };

    let hub = LoopbackHub::default().with_delay(config.delay_polls);
    let store = Rc::new(RefCell::new(MemoryScoreStore::new()));

    let mut seats = Vec::with_capacity(config.bots + 1);
    for index in 0..=config.bots {
        let account = if index == 0 {
            args.account.clone()
        } else {
            format!("bot-{index}")
        };
        let weapon = Weapon::ALL[index % Weapon::ALL.len()];
        let seat = join(&hub, &config, index, &account, weapon, &store)
            .with_context(|| format!("{account} failed to join"))?;
        seats.push(seat);
    }

    log::info!(
        "session running with {} participants at {} Hz",
        seats.len(),
        config.tick_rate
    );
    run(&config, &mut seats);

    print_scoreboard(&seats[0].sim);
    print_leaderboard(&*store.borrow())?;
    Ok(())
}

fn join(
    hub: &LoopbackHub,
    config: &HostConfig,
    index: usize,
    account: &str,
    weapon: Weapon,
    store: &Rc<RefCell<MemoryScoreStore>>,
) -> Result<Seat> {
    let mut lobby = Lobby::new();
    lobby.continue_with(account);
    lobby.select_weapon(weapon);

    let peer = lobby.launch(|loadout| hub.connect(loadout.clone()))?;

    let (physics, markers) = build_arena(config.arena_half_size);
    let spawns = SpawnSelector::scan(&markers);
    let session = config.session(index, lobby.account().map(str::to_owned));

    let sim = SimulationLoop::new(session, physics, peer, spawns)
        .with_score_store(Box::new(store.clone()));
    log::info!(
        "{account} joined as player {} ({:?}) with {}",
        sim.local_id(),
        sim.role(),
        weapon.display_name()
    );

    Ok(Seat {
        sim,
        driver: BotDriver::new(config.seed.map(|seed| seed ^ (index as u64 + 1))),
    })
}

fn run(config: &HostConfig, seats: &mut [Seat]) {
    let mut timestep = FixedTimestep::new(config.tick_rate);
    let frame = Duration::from_secs_f32(timestep.dt());

    for _ in 0..config.frames {
        let started = Instant::now();
        timestep.accumulate(timestep.dt());

        while timestep.consume_tick() {
            let dt = timestep.dt();
            for seat in seats.iter_mut() {
                let intent = seat.driver.next_intent();
                seat.sim.tick(dt, intent);
            }
        }

        if let Some(host) = seats.first_mut() {
            for event in host.sim.drain_events() {
                events::log_event(&event);
            }
        }
        for guest in seats.iter_mut().skip(1) {
            guest.sim.drain_events();
        }

        if config.realtime {
            if let Some(remaining) = frame.checked_sub(started.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
    }
}

fn print_scoreboard(host: &Participant) {
    let mut players: Vec<_> = host.roster().iter().collect();
    players.sort_by(|a, b| {
        b.vitals()
            .kills()
            .cmp(&a.vitals().kills())
            .then(a.vitals().deaths().cmp(&b.vitals().deaths()))
    });

    println!("{:<4} {:<16} {:>6} {:>6}", "ID", "NAME", "KILLS", "DEATHS");
    for player in players {
        println!(
            "{:<4} {:<16} {:>6} {:>6}",
            player.id,
            player.loadout.name,
            player.vitals().kills(),
            player.vitals().deaths()
        );
    }
}

fn print_leaderboard(store: &dyn ScoreStore) -> Result<()> {
    let entries = store.leaderboard(10)?;
    if entries.is_empty() {
        println!("no highscores saved");
        return Ok(());
    }

    println!();
    println!("{:<16} {:>6}", "ACCOUNT", "BEST");
    for entry in entries {
        println!("{:<16} {:>6}", entry.account, entry.total_kills);
    }
    Ok(())
}
