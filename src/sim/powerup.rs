//! Timed global effects: activation, countdown, and derived queries.
//!
//! At most one instance per effect type is ever active. Re-activating a type
//! that is already running replaces it with a fresh full duration; durations
//! never stack.

use serde::{Deserialize, Serialize};

use crate::consts::{SCORE_MULTIPLIER, SLOW_FACTOR};
use crate::events::GameEvent;

/// Effect types, one per power-up balloon category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUp {
    Slow,
    Multiplier,
    Freeze,
    Magnet,
    Defuser,
}

impl PowerUp {
    pub const ALL: [PowerUp; 5] = [
        PowerUp::Slow,
        PowerUp::Multiplier,
        PowerUp::Freeze,
        PowerUp::Magnet,
        PowerUp::Defuser,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PowerUp::Slow => "Slow Motion",
            PowerUp::Multiplier => "Score x2",
            PowerUp::Freeze => "Freeze",
            PowerUp::Magnet => "Magnet",
            PowerUp::Defuser => "Defuser",
        }
    }
}

/// One running effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveEffect {
    pub kind: PowerUp,
    pub total: f32,
    pub remaining: f32,
}

impl ActiveEffect {
    /// Remaining fraction in [0, 1] for HUD timer bars
    pub fn fraction(&self) -> f32 {
        if self.total > 0.0 {
            (self.remaining / self.total).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Registry of currently-active effects, owned and driven by the engine
#[derive(Debug, Clone, Default)]
pub struct PowerUpRegistry {
    active: Vec<ActiveEffect>,
}

impl PowerUpRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an effect. An already-active entry of the same type is
    /// deactivated first (with its notification) and replaced outright.
    pub fn activate(&mut self, kind: PowerUp, duration: f32, events: &mut Vec<GameEvent>) {
        if let Some(idx) = self.active.iter().position(|e| e.kind == kind) {
            self.active.remove(idx);
            events.push(GameEvent::PowerUpExpired { kind });
        }
        self.active.push(ActiveEffect {
            kind,
            total: duration,
            remaining: duration,
        });
        events.push(GameEvent::PowerUpActivated { kind, duration });
    }

    /// Advance all countdowns; expired entries are removed with a
    /// deactivate notification, live ones report their remaining time.
    pub fn tick(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        let mut idx = 0;
        while idx < self.active.len() {
            self.active[idx].remaining -= dt;
            if self.active[idx].remaining <= 0.0 {
                let kind = self.active[idx].kind;
                self.active.remove(idx);
                events.push(GameEvent::PowerUpExpired { kind });
            } else {
                let e = self.active[idx];
                events.push(GameEvent::PowerUpTicked {
                    kind: e.kind,
                    remaining: e.remaining,
                });
                idx += 1;
            }
        }
    }

    pub fn is_active(&self, kind: PowerUp) -> bool {
        self.active.iter().any(|e| e.kind == kind)
    }

    /// Deactivate everything (game over / reset)
    pub fn clear_all(&mut self, events: &mut Vec<GameEvent>) {
        for e in self.active.drain(..) {
            events.push(GameEvent::PowerUpExpired { kind: e.kind });
        }
    }

    pub fn effects(&self) -> &[ActiveEffect] {
        &self.active
    }

    // Derived queries the engine and renderer consume

    pub fn slow_factor(&self) -> f32 {
        if self.is_active(PowerUp::Slow) { SLOW_FACTOR } else { 1.0 }
    }

    pub fn score_multiplier(&self) -> u64 {
        if self.is_active(PowerUp::Multiplier) { SCORE_MULTIPLIER } else { 1 }
    }

    pub fn freeze_active(&self) -> bool {
        self.is_active(PowerUp::Freeze)
    }

    pub fn magnet_active(&self) -> bool {
        self.is_active(PowerUp::Magnet)
    }

    pub fn defuser_active(&self) -> bool {
        self.is_active(PowerUp::Defuser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activate(reg: &mut PowerUpRegistry, kind: PowerUp, duration: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        reg.activate(kind, duration, &mut events);
        events
    }

    #[test]
    fn test_activate_then_query() {
        let mut reg = PowerUpRegistry::new();
        assert!(!reg.is_active(PowerUp::Slow));
        assert_eq!(reg.slow_factor(), 1.0);

        let events = activate(&mut reg, PowerUp::Slow, 6.0);
        assert!(reg.is_active(PowerUp::Slow));
        assert_eq!(reg.slow_factor(), 0.5);
        assert_eq!(
            events,
            vec![GameEvent::PowerUpActivated {
                kind: PowerUp::Slow,
                duration: 6.0
            }]
        );
    }

    #[test]
    fn test_reactivation_replaces_never_stacks() {
        let mut reg = PowerUpRegistry::new();
        activate(&mut reg, PowerUp::Multiplier, 8.0);

        let mut events = Vec::new();
        reg.tick(5.0, &mut events);
        assert!((reg.effects()[0].remaining - 3.0).abs() < 1e-5);

        // Re-activate: one entry, full duration again, deactivate fired first
        let events = activate(&mut reg, PowerUp::Multiplier, 8.0);
        assert_eq!(reg.effects().len(), 1);
        assert!((reg.effects()[0].remaining - 8.0).abs() < 1e-5);
        assert_eq!(
            events[0],
            GameEvent::PowerUpExpired {
                kind: PowerUp::Multiplier
            }
        );
    }

    #[test]
    fn test_tick_expires_and_notifies() {
        let mut reg = PowerUpRegistry::new();
        activate(&mut reg, PowerUp::Freeze, 3.0);

        let mut events = Vec::new();
        reg.tick(1.0, &mut events);
        assert!(matches!(events[0], GameEvent::PowerUpTicked { .. }));
        assert!(reg.freeze_active());

        events.clear();
        reg.tick(2.5, &mut events);
        assert_eq!(
            events,
            vec![GameEvent::PowerUpExpired {
                kind: PowerUp::Freeze
            }]
        );
        assert!(!reg.freeze_active());
        assert!(reg.effects().is_empty());
    }

    #[test]
    fn test_clear_all() {
        let mut reg = PowerUpRegistry::new();
        activate(&mut reg, PowerUp::Magnet, 5.0);
        activate(&mut reg, PowerUp::Defuser, 10.0);
        assert!(reg.magnet_active() && reg.defuser_active());

        let mut events = Vec::new();
        reg.clear_all(&mut events);
        assert!(reg.effects().is_empty());
        assert_eq!(events.len(), 2);
        assert!(!reg.magnet_active());
        assert!(!reg.defuser_active());
    }

    #[test]
    fn test_score_multiplier_query() {
        let mut reg = PowerUpRegistry::new();
        assert_eq!(reg.score_multiplier(), 1);
        activate(&mut reg, PowerUp::Multiplier, 8.0);
        assert_eq!(reg.score_multiplier(), 2);
    }
}
