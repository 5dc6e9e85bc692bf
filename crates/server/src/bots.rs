use arena::Intent;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Ticks a bot keeps the same movement keys before picking new ones.
const STEER_TICKS: u32 = 45;

/// Scripted stand-in for a human at the keyboard.
pub struct BotDriver {
    rng: StdRng,
    held: Intent,
    ticks_left: u32,
}

impl BotDriver {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            held: Intent::default(),
            ticks_left: 0,
        }
    }

    pub fn next_intent(&mut self) -> Intent {
        if self.ticks_left == 0 {
            self.ticks_left = STEER_TICKS + self.rng.gen_range(0..STEER_TICKS);
            self.held = Intent {
                move_forward: self.rng.gen_bool(0.7),
                strafe_left: self.rng.gen_bool(0.2),
                strafe_right: self.rng.gen_bool(0.2),
                fire: self.rng.gen_bool(0.5),
                ..Default::default()
            };
        }
        self.ticks_left -= 1;

        Intent {
            look_delta_x: self.rng.gen_range(-4.0..4.0),
            jump: self.rng.gen_ratio(1, 120),
            ..self.held
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_bots_are_repeatable() {
        let mut a = BotDriver::new(Some(3));
        let mut b = BotDriver::new(Some(3));

        for _ in 0..200 {
            assert_eq!(a.next_intent(), b.next_intent());
        }
    }

    #[test]
    fn held_keys_persist_between_steering_changes() {
        let mut bot = BotDriver::new(Some(11));
        let first = bot.next_intent();
        let second = bot.next_intent();

        assert_eq!(first.move_forward, second.move_forward);
        assert_eq!(first.fire, second.fire);
    }
}
