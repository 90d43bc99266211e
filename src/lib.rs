//! Sky Pop - a balloon-popping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (balloons, power-ups, scoring, particles)
//! - `events`: Notification queue the driver drains each frame
//! - `renderer`: Read-only frame snapshots + Canvas2D drawing on wasm
//! - `platform`: Pointer/time scaling between browser and sim space
//! - `persistence`: Best-score storage contract
//! - `audio`: Sound cues mapped from game events

pub mod audio;
pub mod events;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use events::GameEvent;
pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Simulation-space canvas size (portrait). All gameplay coordinates
    /// live in this space; the platform layer scales pointer input into it.
    pub const SIM_WIDTH: f32 = 480.0;
    pub const SIM_HEIGHT: f32 = 800.0;

    /// Longest frame delta the driver will feed the engine (tab switches
    /// would otherwise produce a huge catch-up step)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Lives cap; hearts cannot restore beyond this
    pub const MAX_LIVES: u8 = 3;

    /// Balloon spawn bounds
    pub const BALLOON_MIN_RADIUS: f32 = 20.0;
    pub const BALLOON_MAX_RADIUS: f32 = 42.0;
    /// Seconds a balloon may stay on screen before it counts as a miss
    pub const BALLOON_LIFESPAN: f32 = 50.0;
    /// Spawn speed varies around the difficulty base speed by this factor
    pub const SPEED_JITTER: f32 = 0.25;

    /// Horizontal wobble while rising
    pub const WOBBLE_FREQ: f32 = 2.0;
    pub const WOBBLE_AMPLITUDE: f32 = 12.0;

    /// Combo window and bonus scaling (bonus = combo * step)
    pub const COMBO_WINDOW: f32 = 2.0;
    pub const COMBO_BONUS_STEP: u64 = 10;

    /// Magnet attraction: pull strength ramps with distance to center,
    /// capped so nearby balloons don't orbit forever
    pub const MAGNET_FALLOFF: f32 = 200.0;
    pub const MAGNET_MAX_PULL: f32 = 2.0;

    /// Particle pool cap before settings apply a quality preset
    pub const DEFAULT_MAX_PARTICLES: usize = 250;

    /// Slow-motion effect speed factor
    pub const SLOW_FACTOR: f32 = 0.5;
    /// Score multiplier while the Multiplier effect is active
    pub const SCORE_MULTIPLIER: u64 = 2;
}

/// Linear interpolation helper used by the renderer
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}
