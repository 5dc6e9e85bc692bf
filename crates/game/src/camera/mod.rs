use glam::Vec3;

use crate::player::LookAngles;

/// Viewports narrower than this get the tighter follow distance.
pub const COMPACT_VIEWPORT_WIDTH: f32 = 1024.0;

const TARGET_HEIGHT: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    ThirdPerson,
    FirstPerson,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::ThirdPerson => Self::FirstPerson,
            Self::FirstPerson => Self::ThirdPerson,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub eye: Vec3,
    pub target: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 5.0, -8.0),
            target: Vec3::new(0.0, TARGET_HEIGHT, 0.0),
        }
    }
}

impl CameraRig {
    pub fn follow(position: Vec3, look: LookAngles, viewport_width: f32, mode: ViewMode) -> Self {
        let target = position + Vec3::Y * TARGET_HEIGHT;

        match mode {
            ViewMode::ThirdPerson => {
                let (height, distance) = if viewport_width < COMPACT_VIEWPORT_WIDTH {
                    (4.0, 6.0)
                } else {
                    (5.0, 8.0)
                };

                let (sin_yaw, cos_yaw) = look.yaw.sin_cos();
                let (sin_pitch, cos_pitch) = look.pitch.sin_cos();
                let eye = Vec3::new(
                    position.x - sin_yaw * distance * cos_pitch,
                    position.y + height + sin_pitch * distance,
                    position.z - cos_yaw * distance * cos_pitch,
                );

                Self { eye, target }
            }
            ViewMode::FirstPerson => {
                let (sin_yaw, cos_yaw) = look.yaw.sin_cos();
                let (sin_pitch, cos_pitch) = look.pitch.sin_cos();
                let forward = Vec3::new(sin_yaw * cos_pitch, -sin_pitch, cos_yaw * cos_pitch);

                Self {
                    eye: target,
                    target: target + forward,
                }
            }
        }
    }
}
