use std::collections::HashSet;

use super::{InputConfig, Intent, Joystick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    R,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Raw events delivered by the platform layer. Touch events carry the touches
/// still active after the event, in platform order.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    MouseDown(MouseButton),
    MouseUp(MouseButton),
    MouseMove { dx: f32, dy: f32 },
    PointerLockChanged { engaged: bool },
    TouchStart(Vec<TouchPoint>),
    TouchMove(Vec<TouchPoint>),
    TouchEnd(Vec<TouchPoint>),
    Resize(Viewport),
}

/// Exclusive pointer capture owned by the platform.
pub trait PointerCapture {
    fn request(&mut self);
    fn release(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookLock {
    #[default]
    Released,
    Requested,
    Engaged,
}

#[derive(Default)]
pub struct InputSampler {
    config: InputConfig,
    viewport: Viewport,
    keys_held: HashSet<Key>,
    primary_held: bool,
    jump_pending: bool,
    respawn_pending: bool,
    look_delta: (f32, f32),
    look_lock: LookLock,
    camera_touch: Option<TouchPoint>,
    joystick: Joystick,
}

impl InputSampler {
    pub fn new(config: InputConfig, viewport: Viewport) -> Self {
        Self {
            config,
            viewport,
            ..Default::default()
        }
    }

    pub fn look_lock(&self) -> LookLock {
        self.look_lock
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn joystick(&self) -> &Joystick {
        &self.joystick
    }

    pub fn joystick_mut(&mut self) -> &mut Joystick {
        &mut self.joystick
    }

    pub fn is_key_held(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn handle(&mut self, event: InputEvent, capture: &mut dyn PointerCapture) {
        match event {
            InputEvent::KeyDown(Key::Escape) => {
                self.key_down(Key::Escape);
                self.release_look(capture);
            }
            InputEvent::KeyDown(key) => self.key_down(key),
            InputEvent::KeyUp(key) => {
                self.keys_held.remove(&key);
            }
            InputEvent::MouseDown(MouseButton::Primary) => {
                self.primary_held = true;
                if self.look_lock == LookLock::Released {
                    capture.request();
                    self.look_lock = LookLock::Requested;
                }
            }
            InputEvent::MouseUp(MouseButton::Primary) => self.primary_held = false,
            InputEvent::MouseDown(_) | InputEvent::MouseUp(_) => {}
            InputEvent::MouseMove { dx, dy } => {
                if self.look_lock == LookLock::Engaged {
                    let sensitivity = self.config.mouse_sensitivity;
                    self.add_look(dx * sensitivity, dy * sensitivity);
                }
            }
            InputEvent::PointerLockChanged { engaged: true } => {
                self.look_lock = LookLock::Engaged;
            }
            InputEvent::PointerLockChanged { engaged: false } => self.release_look(capture),
            InputEvent::TouchStart(touches) => self.touch_start(&touches),
            InputEvent::TouchMove(touches) => self.touch_move(&touches),
            InputEvent::TouchEnd(touches) => self.touch_end(&touches),
            InputEvent::Resize(viewport) => self.viewport = viewport,
        }
    }

    /// Builds this tick's intent and consumes one-shot actions and look motion.
    pub fn sample(&mut self) -> Intent {
        let held = |keys: &[Key]| keys.iter().any(|k| self.keys_held.contains(k));

        let intent = Intent {
            move_forward: held(&[Key::W, Key::ArrowUp]),
            move_back: held(&[Key::S, Key::ArrowDown]),
            strafe_left: held(&[Key::A]),
            strafe_right: held(&[Key::D]),
            turn_left: held(&[Key::ArrowLeft]),
            turn_right: held(&[Key::ArrowRight]),
            fire: held(&[Key::Space]) || self.primary_held || self.joystick.is_fire_pressed(),
            jump: self.jump_pending,
            respawn: self.respawn_pending,
            look_delta_x: self.look_delta.0,
            look_delta_y: self.look_delta.1,
            joystick: self.joystick.input(),
        };

        self.jump_pending = false;
        self.respawn_pending = false;
        self.look_delta = (0.0, 0.0);
        intent
    }

    /// Whether a point falls on the on-screen fire button or joystick.
    pub fn in_control_zone(&self, point: TouchPoint) -> bool {
        let Viewport { width, height } = self.viewport;
        let fire = self.config.fire_zone_size;
        let stick = self.config.joystick_zone_size;

        let bottom_right = point.x > width - fire && point.y > height - fire;
        let bottom_left = point.x < stick && point.y > height - stick;
        bottom_right || bottom_left
    }

    fn is_camera_touch(&self, point: TouchPoint) -> bool {
        point.x > self.viewport.width * self.config.touch_camera_min_x && !self.in_control_zone(point)
    }

    fn key_down(&mut self, key: Key) {
        let newly_pressed = self.keys_held.insert(key);
        if !newly_pressed {
            return;
        }
        match key {
            Key::Enter => self.jump_pending = true,
            Key::R => self.respawn_pending = true,
            _ => {}
        }
    }

    fn add_look(&mut self, dx: f32, dy: f32) {
        self.look_delta.0 += dx;
        self.look_delta.1 += dy;
    }

    fn release_look(&mut self, capture: &mut dyn PointerCapture) {
        if self.look_lock != LookLock::Released {
            capture.release();
        }
        self.look_lock = LookLock::Released;
        self.look_delta = (0.0, 0.0);
        self.camera_touch = None;
    }

    fn touch_start(&mut self, touches: &[TouchPoint]) {
        let Some(&latest) = touches.last() else {
            return;
        };
        if self.is_camera_touch(latest) {
            self.camera_touch = Some(latest);
        }
    }

    fn touch_move(&mut self, touches: &[TouchPoint]) {
        let Some(last) = self.camera_touch else {
            return;
        };
        let Some(&touch) = touches.iter().find(|t| self.is_camera_touch(**t)) else {
            return;
        };

        let sensitivity = self.config.touch_sensitivity;
        self.add_look((touch.x - last.x) * sensitivity, (touch.y - last.y) * sensitivity);
        self.camera_touch = Some(touch);
    }

    fn touch_end(&mut self, remaining: &[TouchPoint]) {
        if !remaining.iter().any(|t| self.is_camera_touch(*t)) {
            self.camera_touch = None;
        }
    }
}
