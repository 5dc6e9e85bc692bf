#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeState {
    Alive,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The target was already dead.
    Ignored,
    Damaged { health: u8 },
    Killed,
}

/// Health and score counters for one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vitals {
    health: u8,
    dead: bool,
    kills: u32,
    deaths: u32,
}

impl Vitals {
    pub fn new(max_health: u8) -> Self {
        Self {
            health: max_health,
            dead: false,
            kills: 0,
            deaths: 0,
        }
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    pub fn life(&self) -> LifeState {
        if self.dead || self.health == 0 {
            LifeState::Dead
        } else {
            LifeState::Alive
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life() == LifeState::Alive
    }

    pub fn apply_damage(&mut self, amount: u8) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::Ignored;
        }

        let remaining = self.health.saturating_sub(amount);
        if remaining == 0 {
            self.health = 0;
            self.dead = true;
            self.deaths += 1;
            DamageOutcome::Killed
        } else {
            self.health = remaining;
            DamageOutcome::Damaged { health: remaining }
        }
    }

    pub fn revive(&mut self, max_health: u8) {
        self.health = max_health;
        self.dead = false;
    }

    pub fn credit_kill(&mut self) {
        self.kills += 1;
    }

    /// Overwrites everything with values received from the host.
    pub fn mirror(&mut self, health: u8, dead: bool, kills: u32, deaths: u32) {
        self.health = health;
        self.dead = dead;
        self.kills = kills;
        self.deaths = deaths;
    }
}
