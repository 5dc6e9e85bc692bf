#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookAngles {
    pub fn apply_delta(&mut self, dx: f32, dy: f32, pitch_limit: f32) {
        self.yaw -= dx;
        self.pitch = (self.pitch - dy).clamp(-pitch_limit, pitch_limit);
    }
}

#[derive(Debug, Clone)]
pub struct MotionState {
    pub look: LookAngles,
    pub facing: f32,
    pub jump_count: u8,
    pub was_grounded: bool,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            look: LookAngles::default(),
            facing: 0.0,
            jump_count: 0,
            was_grounded: true,
        }
    }
}

impl MotionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_jumps(&mut self) {
        self.jump_count = 0;
        self.was_grounded = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_never_flips_the_camera() {
        let mut look = LookAngles::default();
        look.apply_delta(0.0, -10.0, std::f32::consts::FRAC_PI_3);
        assert!((look.pitch - std::f32::consts::FRAC_PI_3).abs() < 1e-6);

        look.apply_delta(0.5, 20.0, std::f32::consts::FRAC_PI_3);
        assert!((look.pitch + std::f32::consts::FRAC_PI_3).abs() < 1e-6);
        assert!((look.yaw + 0.5).abs() < 1e-6);
    }
}
