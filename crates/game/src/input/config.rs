use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub mouse_sensitivity: f32,
    pub touch_sensitivity: f32,

    /// Touches left of this fraction of the viewport width belong to the joystick side.
    pub touch_camera_min_x: f32,

    pub fire_zone_size: f32,
    pub joystick_zone_size: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.002,
            touch_sensitivity: 0.005,

            touch_camera_min_x: 0.3,

            fire_zone_size: 150.0,
            joystick_zone_size: 200.0,
        }
    }
}
