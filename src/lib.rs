//! Rhinoceros - a charge-and-rush arcade runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (projection, collisions, entities, runner tick)
//! - `game`: Title/Playing/GameOver mode machine driving the simulation
//! - `input`: Touch snapshots, tracking and scripted touch playback
//! - `renderer`: Display-list construction for an external rasteriser
//! - `audio`: Sound cues and volume handling over a pluggable backend
//! - `telemetry`: Best-effort play logging

pub mod audio;
pub mod game;
pub mod highscores;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod telemetry;

pub use game::{Game, GameMode};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (one update + one draw per tick)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Logical screen size
    pub const SCREEN_WIDTH: f32 = 640.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Player anchor (feet), fixed on screen
    pub const RHINO_X: f32 = 170.0;
    pub const RHINO_Y: f32 = 370.0;
    pub const RHINO_R: f32 = 10.0;
    /// World scroll speed while charging / rushing (pixels per tick)
    pub const RHINO_SPEED: f32 = 2.5;
    pub const RHINO_RUSH_SPEED: f32 = 6.0;

    /// Enemy collision radius
    pub const ENEMY_R: f32 = 8.0;
    /// Enemy walking speed, added on top of the scroll speed
    pub const ENEMY_BASE_SPEED: f32 = 1.5;
    /// No enemies spawn before this tick
    pub const ENEMY_SPAWN_DELAY_TICKS: u64 = 120;
    /// One-in-N chance per tick for enemy/tree/cloud spawns
    pub const SPAWN_ONE_IN: u32 = 60;

    /// Charge gauge capacity (also the longest possible rush, in ticks)
    pub const GAUGE_MAX: u32 = 300;
    /// Ticks the hit pose stays up after a successful hit
    pub const HIT_POSE_TICKS: u64 = 10;

    /// Camera height above the ground plane (y grows downward)
    pub const CAMERA_Y: f32 = -100.0;
    /// Distance from the eye to the projection plane
    pub const SCREEN_Z: f32 = 50.0;
    /// World depth of the player's ground contact point.
    ///
    /// Solves `RHINO_Y = SCREEN_HEIGHT/2 + (0 - CAMERA_Y) * SCREEN_Z / z` for z.
    pub const RHINO_Z: f32 = -CAMERA_Y * SCREEN_Z / (RHINO_Y - SCREEN_HEIGHT / 2.0);

    /// Ticks the game-over screen ignores touches
    pub const GAME_OVER_GRACE_TICKS: u64 = 60;
}
