//! Notification boundary between the simulation core and the outside world.
//!
//! The engine appends events while it mutates state; the driver drains the
//! queue once per frame and fans the events out to audio/HUD. The core never
//! blocks on, or hears back from, any handler.

use crate::sim::powerup::PowerUp;
use crate::sim::state::BalloonKind;

/// Discrete gameplay notifications, in emission order within a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A balloon was popped; `points` is the multiplied base award
    BalloonPopped { kind: BalloonKind, points: u64 },
    PowerUpActivated { kind: PowerUp, duration: f32 },
    /// Periodic countdown update for an effect still running
    PowerUpTicked { kind: PowerUp, remaining: f32 },
    PowerUpExpired { kind: PowerUp },
    LifeLost { remaining: u8 },
    LifeGained { lives: u8 },
    /// Combo counter advanced past 1
    ComboReached { combo: u32 },
    /// Streak lost, by miss or by timeout
    ComboBroken,
    ScoreChanged { score: u64, multiplier: u32 },
    /// Emitted exactly once per session, with the final score
    GameOver { score: u64 },
}
