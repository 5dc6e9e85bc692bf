#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Run,
    IdleShoot,
    RunShoot,
    Death,
}

impl AnimationState {
    pub fn from_motion(moving: bool, firing: bool) -> Self {
        match (moving, firing) {
            (false, false) => Self::Idle,
            (true, false) => Self::Run,
            (false, true) => Self::IdleShoot,
            (true, true) => Self::RunShoot,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Run => "Run",
            Self::IdleShoot => "Idle_Shoot",
            Self::RunShoot => "Run_Shoot",
            Self::Death => "Death",
        }
    }
}
