use super::JoystickInput;

/// State of the on-screen stick and its fire button, as reported by the touch UI.
#[derive(Debug, Clone, Copy, Default)]
pub struct Joystick {
    angle: Option<f32>,
    magnitude: f32,
    pressed: bool,
    fire: bool,
}

impl Joystick {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_stick(&mut self, angle: f32, magnitude: f32) {
        self.angle = Some(angle);
        self.magnitude = magnitude.clamp(0.0, 1.0);
        self.pressed = true;
    }

    pub fn release_stick(&mut self) {
        self.angle = None;
        self.magnitude = 0.0;
        self.pressed = false;
    }

    pub fn set_fire(&mut self, pressed: bool) {
        self.fire = pressed;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn angle(&self) -> Option<f32> {
        self.angle
    }

    pub fn is_fire_pressed(&self) -> bool {
        self.fire
    }

    /// Stick direction, only while it is held with a known angle.
    pub fn input(&self) -> Option<JoystickInput> {
        if !self.pressed {
            return None;
        }
        self.angle.map(|angle| JoystickInput {
            angle,
            magnitude: self.magnitude,
        })
    }
}
