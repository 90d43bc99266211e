//! Core simulation types: balloons, categories, colors, session phase.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::powerup::PowerUp;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session started yet (menu screen)
    Idle,
    /// Active gameplay
    Running,
    /// Session frozen; the renderer keeps drawing the last snapshot
    Paused,
    /// Run ended, final score settled
    Ended,
}

/// An RGB color picked once at balloon creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Balloon palette for normal/special balloons (power-ups carry fixed colors)
pub const BALLOON_PALETTE: [Rgb; 8] = [
    Rgb::new(235, 87, 87),
    Rgb::new(242, 153, 74),
    Rgb::new(242, 201, 76),
    Rgb::new(111, 207, 151),
    Rgb::new(86, 204, 242),
    Rgb::new(94, 129, 244),
    Rgb::new(187, 107, 217),
    Rgb::new(240, 120, 180),
];

/// Balloon category. Immutable after creation; determines point value,
/// visual glyph, and pop-time behavior via a single exhaustive dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalloonKind {
    Normal,
    Special,
    Heart,
    Bomb,
    Slow,
    Multiplier,
    Freeze,
    Magnet,
    Defuser,
}

impl BalloonKind {
    /// Every category, in spawn-roll order
    pub const ALL: [BalloonKind; 9] = [
        BalloonKind::Normal,
        BalloonKind::Special,
        BalloonKind::Heart,
        BalloonKind::Bomb,
        BalloonKind::Slow,
        BalloonKind::Multiplier,
        BalloonKind::Freeze,
        BalloonKind::Magnet,
        BalloonKind::Defuser,
    ];

    /// Static point value. Bombs carry a negative marker value; pop
    /// resolution uses the absolute value where a score is awarded.
    pub fn points(self) -> i32 {
        match self {
            BalloonKind::Normal => 1,
            BalloonKind::Special => 3,
            BalloonKind::Heart => 0,
            BalloonKind::Bomb => -1,
            BalloonKind::Slow
            | BalloonKind::Multiplier
            | BalloonKind::Freeze
            | BalloonKind::Magnet
            | BalloonKind::Defuser => 5,
        }
    }

    /// Glyph drawn inside the balloon
    pub fn emoji(self) -> &'static str {
        match self {
            BalloonKind::Normal => "🎈",
            BalloonKind::Special => "⭐",
            BalloonKind::Heart => "❤️",
            BalloonKind::Bomb => "💣",
            BalloonKind::Slow => "🐌",
            BalloonKind::Multiplier => "✨",
            BalloonKind::Freeze => "❄️",
            BalloonKind::Magnet => "🧲",
            BalloonKind::Defuser => "🛡️",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BalloonKind::Normal => "Balloon",
            BalloonKind::Special => "Star Balloon",
            BalloonKind::Heart => "Heart",
            BalloonKind::Bomb => "Bomb",
            BalloonKind::Slow => "Slow Motion",
            BalloonKind::Multiplier => "Score x2",
            BalloonKind::Freeze => "Freeze",
            BalloonKind::Magnet => "Magnet",
            BalloonKind::Defuser => "Defuser",
        }
    }

    /// The timed effect this category grants on pop, if any
    pub fn power_up(self) -> Option<PowerUp> {
        match self {
            BalloonKind::Slow => Some(PowerUp::Slow),
            BalloonKind::Multiplier => Some(PowerUp::Multiplier),
            BalloonKind::Freeze => Some(PowerUp::Freeze),
            BalloonKind::Magnet => Some(PowerUp::Magnet),
            BalloonKind::Defuser => Some(PowerUp::Defuser),
            _ => None,
        }
    }

    /// Expiring on screen costs a life, except for the categories the
    /// player is better off ignoring.
    pub fn miss_costs_life(self) -> bool {
        !matches!(self, BalloonKind::Bomb | BalloonKind::Heart)
    }
}

impl From<PowerUp> for BalloonKind {
    fn from(kind: PowerUp) -> Self {
        match kind {
            PowerUp::Slow => BalloonKind::Slow,
            PowerUp::Multiplier => BalloonKind::Multiplier,
            PowerUp::Freeze => BalloonKind::Freeze,
            PowerUp::Magnet => BalloonKind::Magnet,
            PowerUp::Defuser => BalloonKind::Defuser,
        }
    }
}

/// A single rising balloon
#[derive(Debug, Clone, PartialEq)]
pub struct Balloon {
    pub id: u32,
    pub kind: BalloonKind,
    /// Current position; x already includes the wobble offset
    pub pos: Vec2,
    /// Linear velocity (y negative: balloons rise)
    pub vel: Vec2,
    pub radius: f32,
    /// X the wobble oscillates around
    pub anchor_x: f32,
    /// Current horizontal wobble offset
    pub wobble: f32,
    pub wobble_phase: f32,
    pub color: Rgb,
    /// Sim-clock second this balloon spawned at
    pub spawned_at: f32,
    /// Seconds on screen before the balloon expires
    pub lifespan: f32,
}

impl Balloon {
    pub fn age(&self, clock: f32) -> f32 {
        clock - self.spawned_at
    }

    pub fn expired(&self, clock: f32) -> bool {
        self.age(clock) >= self.lifespan
    }

    /// Fully above the top edge (balloons rise and leave upward)
    pub fn exited_top(&self) -> bool {
        self.pos.y + self.radius < 0.0
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Point-in-circle hit test in sim space
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance_squared(point) <= self.radius * self.radius
    }
}
