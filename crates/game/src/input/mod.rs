mod config;
mod intent;
mod joystick;
mod sampler;

pub use config::InputConfig;
pub use intent::{Intent, JoystickInput};
pub use joystick::Joystick;
pub use sampler::{
    InputEvent, InputSampler, Key, LookLock, MouseButton, PointerCapture, TouchPoint, Viewport,
};
