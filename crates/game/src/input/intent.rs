use rkyv::{Archive, Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub struct JoystickInput {
    pub angle: f32,
    pub magnitude: f32,
}

/// Device-independent description of what a player wants to do this tick.
///
/// Held states (`move_*`, `strafe_*`, `turn_*`, `fire`) mirror the keys that are
/// down right now. `jump` and `respawn` are one-shot: they are set once per
/// key press and cleared by whoever consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug))]
pub struct Intent {
    pub move_forward: bool,
    pub move_back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub fire: bool,
    pub jump: bool,
    pub respawn: bool,
    pub look_delta_x: f32,
    pub look_delta_y: f32,
    pub joystick: Option<JoystickInput>,
}

impl Intent {
    pub fn is_firing(&self) -> bool {
        self.fire
    }

    /// +1 forward, -1 back, 0 when neither or both are held.
    pub fn forward_axis(&self) -> f32 {
        axis(self.move_forward, self.move_back)
    }

    /// +1 right, -1 left.
    pub fn strafe_axis(&self) -> f32 {
        axis(self.strafe_right, self.strafe_left)
    }

    pub fn wants_keyboard_move(&self) -> bool {
        self.move_forward || self.move_back || self.strafe_left || self.strafe_right
    }

    pub fn has_movement(&self) -> bool {
        self.joystick.is_some() || self.wants_keyboard_move()
    }

    /// Folds a newer intent into this one without losing one-shot actions or
    /// look motion that has not been consumed yet.
    pub fn merge(&mut self, newer: Intent) {
        let jump = self.jump || newer.jump;
        let respawn = self.respawn || newer.respawn;
        let look_x = self.look_delta_x + newer.look_delta_x;
        let look_y = self.look_delta_y + newer.look_delta_y;

        *self = newer;
        self.jump = jump;
        self.respawn = respawn;
        self.look_delta_x = look_x;
        self.look_delta_y = look_y;
    }

    pub fn clear_one_shots(&mut self) {
        self.jump = false;
        self.respawn = false;
        self.look_delta_x = 0.0;
        self.look_delta_y = 0.0;
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposing_keys_cancel() {
        let intent = Intent {
            move_forward: true,
            move_back: true,
            strafe_right: true,
            ..Default::default()
        };

        assert_eq!(intent.forward_axis(), 0.0);
        assert_eq!(intent.strafe_axis(), 1.0);
        assert!(intent.wants_keyboard_move());
    }

    #[test]
    fn merge_keeps_pending_actions() {
        let mut buffered = Intent {
            jump: true,
            look_delta_x: 0.1,
            ..Default::default()
        };
        let newer = Intent {
            move_forward: true,
            look_delta_x: 0.2,
            ..Default::default()
        };

        buffered.merge(newer);
        assert!(buffered.jump);
        assert!(buffered.move_forward);
        assert!((buffered.look_delta_x - 0.3).abs() < 1e-6);

        buffered.clear_one_shots();
        assert!(!buffered.jump);
        assert!(buffered.move_forward);
        assert_eq!(buffered.look_delta_x, 0.0);
    }
}
