//! Data-driven game balance: difficulty profiles and fixed bonus values.
//!
//! Everything here is consumed at `start` time or via pure lookups; nothing
//! is mutated at runtime.

use serde::{Deserialize, Serialize};

/// Named difficulty level selected on the start screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                spawn_interval_ms: 1200.0,
                base_speed: 60.0,
                bomb_chance: 0.05,
                powerup_chance: 0.10,
            },
            Difficulty::Medium => DifficultyProfile {
                spawn_interval_ms: 900.0,
                base_speed: 90.0,
                bomb_chance: 0.10,
                powerup_chance: 0.08,
            },
            Difficulty::Hard => DifficultyProfile {
                spawn_interval_ms: 600.0,
                base_speed: 130.0,
                bomb_chance: 0.15,
                powerup_chance: 0.06,
            },
        }
    }
}

/// The four tunables a difficulty maps to, applied at `start` only
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    /// Milliseconds between spawns
    pub spawn_interval_ms: f32,
    /// Base rise speed in sim units/sec (individual balloons jitter around it)
    pub base_speed: f32,
    /// Probability a spawn is a bomb (rolled first)
    pub bomb_chance: f32,
    /// Probability a spawn is a power-up, uniform over the five kinds
    /// (rolled after the bomb chance)
    pub powerup_chance: f32,
}

impl DifficultyProfile {
    pub fn spawn_interval_secs(&self) -> f32 {
        self.spawn_interval_ms / 1000.0
    }
}

/// Chance that a non-bomb, non-power-up spawn is a Special balloon
pub const SPECIAL_CHANCE: f32 = 0.08;

/// Chance that a spawn is a Heart, rolled after the power-up slice and only
/// while the player is below max lives
pub const HEART_CHANCE: f32 = 0.05;

/// Flat score for popping any power-up balloon is its table value; these two
/// are the remaining fixed awards.
pub const DEFUSED_BOMB_POINTS: u64 = 3;

/// Timed effect durations in seconds
pub fn effect_duration(kind: super::powerup::PowerUp) -> f32 {
    use super::powerup::PowerUp;
    match kind {
        PowerUp::Slow => 6.0,
        PowerUp::Multiplier => 8.0,
        PowerUp::Freeze => 3.0,
        PowerUp::Magnet => 5.0,
        PowerUp::Defuser => 10.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::powerup::PowerUp;

    #[test]
    fn test_profiles_are_sane() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let p = d.profile();
            assert!(p.spawn_interval_ms > 0.0);
            assert!(p.base_speed > 0.0);
            // Weighted draw must leave room for normal balloons
            assert!(p.bomb_chance + p.powerup_chance + SPECIAL_CHANCE < 1.0);
        }
    }

    #[test]
    fn test_harder_means_faster() {
        let easy = Difficulty::Easy.profile();
        let hard = Difficulty::Hard.profile();
        assert!(hard.spawn_interval_ms < easy.spawn_interval_ms);
        assert!(hard.base_speed > easy.base_speed);
        assert!(hard.bomb_chance > easy.bomb_chance);
    }

    #[test]
    fn test_round_trip_names() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_effect_durations_positive() {
        for kind in PowerUp::ALL {
            assert!(effect_duration(kind) > 0.0);
        }
    }
}
