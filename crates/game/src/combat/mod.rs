mod config;
mod model;
mod projectile;
mod vitals;

pub use config::CombatConfig;
pub use model::{CombatModel, FireState, HitOutcome};
pub use projectile::{HitEffect, Projectile, ProjectileId};
pub use vitals::{DamageOutcome, LifeState, Vitals};
