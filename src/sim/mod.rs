//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, lent in by the caller
//! - No rendering or platform dependencies

pub mod collision;
pub mod effect;
pub mod projection;
pub mod state;
pub mod tick;

pub use collision::{capsules_collide, segment_distance_sq};
pub use effect::{Effect, GainEffect, SplashEffect, SplashOptions};
pub use projection::{Camera, WorldHint};
pub use state::{
    BackgroundObject, Enemy, EnemyState, GameRunner, ObjectKind, RunnerEvent, SessionParams,
    create_background_object,
};
pub use tick::tick;
