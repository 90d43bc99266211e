//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit delta-time only, no wall clock
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod engine;
pub mod particles;
pub mod powerup;
pub mod state;
pub mod tuning;

pub use engine::Engine;
pub use particles::{Particle, ParticleSystem};
pub use powerup::{ActiveEffect, PowerUp, PowerUpRegistry};
pub use state::{Balloon, BalloonKind, GamePhase, Rgb};
pub use tuning::{Difficulty, DifficultyProfile};
