//! Cosmetic particle bursts spawned off gameplay events.
//!
//! Purely additive: nothing in the simulation reads particle data back.
//! The system keeps its own RNG stream so visual noise never perturbs
//! gameplay determinism.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use super::state::Rgb;

/// Gold/white accent colors for combo and firework bursts
const SPARK_COLORS: [Rgb; 3] = [
    Rgb::new(255, 215, 90),
    Rgb::new(255, 240, 160),
    Rgb::new(255, 255, 255),
];

/// Combo burst size stops growing past this streak length
const COMBO_BURST_CAP: u32 = 10;

/// A single decorative particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Rgb,
    /// 1 → 0; doubles as render alpha
    pub life: f32,
    decay: f32,
    gravity: f32,
    friction: f32,
}

/// Append-only pool with per-tick integration and a hard cap
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    max_particles: usize,
    rng: Pcg32,
}

impl ParticleSystem {
    pub fn new(seed: u64, max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            max_particles,
            // Offset stream so the visual RNG never mirrors the gameplay RNG
            rng: Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
        }
    }

    pub fn set_max_particles(&mut self, max: usize) {
        self.max_particles = max;
        self.particles.truncate(max);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Integrate positions, decay life, drop dead particles
    pub fn tick(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.pos += p.vel * dt;
            p.vel.y += p.gravity * dt;
            p.vel *= p.friction.powf(dt * 60.0);
            p.life -= p.decay * dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    fn push(&mut self, p: Particle) {
        if self.particles.len() < self.max_particles {
            self.particles.push(p);
        }
    }

    /// Plain pop burst in the balloon's color
    pub fn pop_burst(&mut self, at: Vec2, color: Rgb) {
        for _ in 0..12 {
            let angle = self.rng.random_range(0.0..TAU);
            let speed = self.rng.random_range(60.0..220.0);
            let radius = self.rng.random_range(2.0..5.0);
            let decay = self.rng.random_range(1.2..2.0);
            self.push(Particle {
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                radius,
                color,
                life: 1.0,
                decay,
                gravity: 180.0,
                friction: 0.96,
            });
        }
    }

    /// Radial firework: evenly spaced spokes, slower decay, no gravity
    pub fn firework(&mut self, at: Vec2, color: Rgb) {
        let spokes = 24;
        for i in 0..spokes {
            let angle = TAU * (i as f32 / spokes as f32);
            let speed = self.rng.random_range(150.0..280.0);
            let radius = self.rng.random_range(2.5..4.5);
            let decay = self.rng.random_range(0.8..1.2);
            self.push(Particle {
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                radius,
                color,
                life: 1.0,
                decay,
                gravity: 0.0,
                friction: 0.94,
            });
        }
    }

    /// Small upward sparkle, used on power-up pickups
    pub fn sparkle(&mut self, at: Vec2, color: Rgb) {
        for _ in 0..8 {
            let angle: f32 = self.rng.random_range(-2.6..-0.5);
            let speed = self.rng.random_range(80.0..160.0);
            let radius = self.rng.random_range(1.5..3.0);
            let decay = self.rng.random_range(1.5..2.5);
            self.push(Particle {
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                radius,
                color,
                life: 1.0,
                decay,
                gravity: 60.0,
                friction: 0.98,
            });
        }
    }

    /// Golden explosion scaled by combo length, capped
    pub fn combo_burst(&mut self, at: Vec2, combo: u32) {
        let count = 6 + combo.min(COMBO_BURST_CAP) * 3;
        for _ in 0..count {
            let angle = self.rng.random_range(0.0..TAU);
            let speed = self.rng.random_range(100.0..300.0);
            let color = SPARK_COLORS[self.rng.random_range(0..SPARK_COLORS.len())];
            let radius = self.rng.random_range(2.0..4.0);
            let decay = self.rng.random_range(1.0..1.8);
            self.push(Particle {
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                radius,
                color,
                life: 1.0,
                decay,
                gravity: 120.0,
                friction: 0.95,
            });
        }
    }

    /// Single faint trailing particle behind a rising balloon
    pub fn trail(&mut self, at: Vec2, color: Rgb) {
        let drift = self.rng.random_range(-12.0..12.0);
        let vel_y = self.rng.random_range(20.0..50.0);
        let radius = self.rng.random_range(1.0..2.5);
        self.push(Particle {
            pos: at,
            vel: Vec2::new(drift, vel_y),
            radius,
            color,
            life: 0.5,
            decay: 1.5,
            gravity: 0.0,
            friction: 0.99,
        });
    }
}
