//! The simulation engine: spawning, movement, input resolution, scoring.
//!
//! The engine is the sole mutator of gameplay state. The driver calls
//! `update` once per frame with an explicit delta time and forwards taps via
//! `handle_input`; everything else reads snapshots.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use super::particles::ParticleSystem;
use super::powerup::{PowerUp, PowerUpRegistry};
use super::state::{BALLOON_PALETTE, Balloon, BalloonKind, GamePhase, Rgb};
use super::tuning::{
    DEFUSED_BOMB_POINTS, Difficulty, DifficultyProfile, HEART_CHANCE, SPECIAL_CHANCE,
    effect_duration,
};
use crate::consts::*;
use crate::events::GameEvent;

/// Owns the balloon collection, the power-up registry, the particle pool,
/// and every session counter.
#[derive(Debug, Clone)]
pub struct Engine {
    pub seed: u64,
    pub score: u64,
    /// Best score seen; fed in from the persistence collaborator at startup
    /// and updated at game over. Survives `reset`.
    pub high_score: u64,
    pub lives: u8,
    /// Reserved for future progression; never drives mechanics
    pub level: u32,
    pub combo: u32,
    /// Seconds left before the streak times out
    pub combo_timer: f32,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    /// Sim-clock seconds since `start`
    pub clock: f32,
    pub balloons: Vec<Balloon>,
    pub particles: ParticleSystem,
    pub powerups: PowerUpRegistry,
    profile: DifficultyProfile,
    events: Vec<GameEvent>,
    rng: Pcg32,
    last_spawn: f32,
    next_id: u32,
}

impl Engine {
    pub fn new(seed: u64) -> Self {
        let difficulty = Difficulty::default();
        Self {
            seed,
            score: 0,
            high_score: 0,
            lives: MAX_LIVES,
            level: 1,
            combo: 0,
            combo_timer: 0.0,
            phase: GamePhase::Idle,
            difficulty,
            clock: 0.0,
            balloons: Vec::new(),
            particles: ParticleSystem::new(seed, DEFAULT_MAX_PARTICLES),
            powerups: PowerUpRegistry::new(),
            profile: difficulty.profile(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            last_spawn: 0.0,
            next_id: 1,
        }
    }

    /// Begin a fresh session with the given difficulty tuning
    pub fn start(&mut self, difficulty: Difficulty) {
        self.clear_session();
        self.difficulty = difficulty;
        self.profile = difficulty.profile();
        self.phase = GamePhase::Running;
        log::info!("session started ({})", difficulty.as_str());
    }

    /// Freeze the simulation; the renderer keeps drawing the last state
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
        }
    }

    /// Resume from pause. Delta time is driver-supplied, so there is no
    /// catch-up jump to defend against here.
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
        }
    }

    /// Back to the idle screen. Only the best score survives.
    pub fn reset(&mut self) {
        self.clear_session();
        self.phase = GamePhase::Idle;
    }

    fn clear_session(&mut self) {
        self.score = 0;
        self.lives = MAX_LIVES;
        self.level = 1;
        self.combo = 0;
        self.combo_timer = 0.0;
        self.clock = 0.0;
        self.last_spawn = 0.0;
        self.balloons.clear();
        self.particles.clear();
        self.powerups.clear_all(&mut self.events);
    }

    /// Take this frame's pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance the simulation by `dt` seconds. No-op unless running.
    ///
    /// Frame order is fixed: combo countdown, spawn, move, cull, then the
    /// particle and power-up ticks, then the game-over check.
    pub fn update(&mut self, dt: f32) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.clock += dt;

        if self.combo > 0 {
            self.combo_timer -= dt;
            if self.combo_timer <= 0.0 {
                self.combo = 0;
                self.combo_timer = 0.0;
                self.events.push(GameEvent::ComboBroken);
            }
        }

        if self.clock - self.last_spawn >= self.profile.spawn_interval_secs() {
            self.spawn_balloon();
            self.last_spawn = self.clock;
        }

        self.move_balloons(dt);
        self.cull_balloons();

        self.particles.tick(dt);
        self.powerups.tick(dt, &mut self.events);

        if self.lives == 0 {
            self.end_game();
        }
    }

    /// Resolve a tap/click in sim coordinates. No-op unless running.
    /// Newest balloons are tested first so the one drawn on top wins;
    /// at most one balloon pops per tap. A clean miss breaks the streak.
    pub fn handle_input(&mut self, point: Vec2) {
        if self.phase != GamePhase::Running {
            return;
        }
        match self.balloons.iter().rposition(|b| b.contains(point)) {
            Some(idx) => {
                let balloon = self.balloons.remove(idx);
                self.pop(balloon);
            }
            None => self.break_combo(),
        }
    }

    // --- spawning ---

    fn spawn_balloon(&mut self) {
        let kind = self.roll_kind();
        let radius = self
            .rng
            .random_range(BALLOON_MIN_RADIUS..=BALLOON_MAX_RADIUS);
        let x = self.rng.random_range(radius..(SIM_WIDTH - radius));
        let speed = self.profile.base_speed
            * self
                .rng
                .random_range((1.0 - SPEED_JITTER)..(1.0 + SPEED_JITTER));
        let color = self.color_for(kind);
        let id = self.next_id;
        self.next_id += 1;
        self.balloons.push(Balloon {
            id,
            kind,
            pos: Vec2::new(x, SIM_HEIGHT + radius),
            vel: Vec2::new(0.0, -speed),
            radius,
            anchor_x: x,
            wobble: 0.0,
            wobble_phase: self.rng.random_range(0.0..TAU),
            color,
            spawned_at: self.clock,
            lifespan: BALLOON_LIFESPAN,
        });
    }

    /// Weighted category draw: bomb slice first, then the power-up slice
    /// (uniform over the five kinds), then heart/special slivers, else normal.
    fn roll_kind(&mut self) -> BalloonKind {
        let roll: f32 = self.rng.random();
        let bomb_end = self.profile.bomb_chance;
        let powerup_end = bomb_end + self.profile.powerup_chance;
        let heart_end = powerup_end + HEART_CHANCE;
        let special_end = heart_end + SPECIAL_CHANCE;

        if roll < bomb_end {
            BalloonKind::Bomb
        } else if roll < powerup_end {
            let idx = self.rng.random_range(0..PowerUp::ALL.len());
            PowerUp::ALL[idx].into()
        } else if roll < heart_end && self.lives < MAX_LIVES {
            BalloonKind::Heart
        } else if roll < special_end {
            BalloonKind::Special
        } else {
            BalloonKind::Normal
        }
    }

    fn color_for(&mut self, kind: BalloonKind) -> Rgb {
        match kind {
            BalloonKind::Normal | BalloonKind::Special => {
                BALLOON_PALETTE[self.rng.random_range(0..BALLOON_PALETTE.len())]
            }
            BalloonKind::Heart => Rgb::new(235, 80, 100),
            BalloonKind::Bomb => Rgb::new(52, 52, 64),
            BalloonKind::Slow => Rgb::new(150, 110, 220),
            BalloonKind::Multiplier => Rgb::new(255, 200, 60),
            BalloonKind::Freeze => Rgb::new(120, 200, 255),
            BalloonKind::Magnet => Rgb::new(200, 60, 60),
            BalloonKind::Defuser => Rgb::new(90, 190, 140),
        }
    }

    // --- movement & culling ---

    /// Freeze halts everything. Otherwise balloons either drift toward the
    /// canvas center (magnet) or rise with a sinusoidal wobble, both scaled
    /// by the slow-motion factor.
    fn move_balloons(&mut self, dt: f32) {
        if self.powerups.freeze_active() {
            return;
        }
        let slow = self.powerups.slow_factor();
        let magnet = self.powerups.magnet_active();
        let center = Vec2::new(SIM_WIDTH / 2.0, SIM_HEIGHT / 2.0);
        let clock = self.clock;
        let mut trails: Vec<(Vec2, Rgb)> = Vec::new();

        for b in &mut self.balloons {
            if magnet {
                let to_center = center - b.pos;
                let dist = to_center.length();
                if dist > 1.0 {
                    let pull = (dist / MAGNET_FALLOFF).min(MAGNET_MAX_PULL);
                    b.pos += to_center / dist * b.speed() * pull * slow * dt;
                    // keep the wobble anchor in step so normal drift resumes
                    // without a sideways jump when the magnet expires
                    b.anchor_x = b.pos.x - b.wobble;
                }
            } else {
                b.pos.y += b.vel.y * slow * dt;
                b.wobble = (b.age(clock) * WOBBLE_FREQ + b.wobble_phase).sin() * WOBBLE_AMPLITUDE;
                b.pos.x = b.anchor_x + b.wobble;
            }
            if b.kind == BalloonKind::Special {
                trails.push((b.pos + Vec2::new(0.0, b.radius), b.color));
            }
        }
        for (pos, color) in trails {
            self.particles.trail(pos, color);
        }
    }

    /// A balloon that escapes off the top was simply survived — no penalty.
    /// One that times out while still on screen counts as a miss and costs a
    /// life, unless ignoring it was the right play (bomb, heart).
    fn cull_balloons(&mut self) {
        let clock = self.clock;
        let mut misses = 0u32;
        self.balloons.retain(|b| {
            if b.exited_top() {
                return false;
            }
            if b.expired(clock) {
                if b.kind.miss_costs_life() {
                    misses += 1;
                }
                return false;
            }
            true
        });
        for _ in 0..misses {
            self.lose_life();
        }
    }

    // --- pop resolution & scoring ---

    fn pop(&mut self, balloon: Balloon) {
        let at = balloon.pos;
        let mut points = 0u64;

        match balloon.kind {
            BalloonKind::Normal => {
                points = self.add_score(balloon.kind.points().unsigned_abs() as u64);
                self.advance_combo(at);
            }
            BalloonKind::Special => {
                points = self.add_score(balloon.kind.points().unsigned_abs() as u64);
                self.advance_combo(at);
                self.particles.firework(at, balloon.color);
            }
            BalloonKind::Heart => {
                if self.lives < MAX_LIVES {
                    self.lives += 1;
                    self.events.push(GameEvent::LifeGained { lives: self.lives });
                }
            }
            BalloonKind::Bomb => {
                if self.powerups.defuser_active() {
                    points = self.add_score(DEFUSED_BOMB_POINTS);
                } else {
                    self.lose_life();
                }
            }
            BalloonKind::Slow
            | BalloonKind::Multiplier
            | BalloonKind::Freeze
            | BalloonKind::Magnet
            | BalloonKind::Defuser => {
                if let Some(effect) = balloon.kind.power_up() {
                    self.powerups
                        .activate(effect, effect_duration(effect), &mut self.events);
                    self.particles.sparkle(at, balloon.color);
                    points = self.add_score(balloon.kind.points().unsigned_abs() as u64);
                    self.advance_combo(at);
                }
            }
        }

        self.particles.pop_burst(at, balloon.color);
        self.events.push(GameEvent::BalloonPopped {
            kind: balloon.kind,
            points,
        });
    }

    fn advance_combo(&mut self, at: Vec2) {
        self.combo += 1;
        self.combo_timer = COMBO_WINDOW;
        if self.combo > 1 {
            // The bonus is its own addition so an active multiplier applies
            // to it independently of the base award
            self.add_score(self.combo as u64 * COMBO_BONUS_STEP);
            self.events.push(GameEvent::ComboReached { combo: self.combo });
            self.particles.combo_burst(at, self.combo);
        }
    }

    fn break_combo(&mut self) {
        if self.combo > 0 {
            self.combo = 0;
            self.combo_timer = 0.0;
            self.events.push(GameEvent::ComboBroken);
        }
    }

    fn add_score(&mut self, base: u64) -> u64 {
        let multiplier = self.powerups.score_multiplier();
        let awarded = base * multiplier;
        self.score += awarded;
        self.events.push(GameEvent::ScoreChanged {
            score: self.score,
            multiplier: multiplier as u32,
        });
        awarded
    }

    fn lose_life(&mut self) {
        if self.lives == 0 {
            return;
        }
        self.lives -= 1;
        self.break_combo();
        self.events.push(GameEvent::LifeLost {
            remaining: self.lives,
        });
    }

    fn end_game(&mut self) {
        self.phase = GamePhase::Ended;
        self.powerups.clear_all(&mut self.events);
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!("game over, final score {}", self.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn running_engine() -> Engine {
        let mut e = Engine::new(12345);
        e.start(Difficulty::Medium);
        e.drain_events();
        e
    }

    fn add_balloon(e: &mut Engine, kind: BalloonKind, x: f32, y: f32) -> Vec2 {
        let id = e.balloons.last().map(|b| b.id + 1).unwrap_or(1000);
        e.balloons.push(Balloon {
            id,
            kind,
            pos: Vec2::new(x, y),
            vel: Vec2::new(0.0, -90.0),
            radius: 30.0,
            anchor_x: x,
            wobble: 0.0,
            wobble_phase: 0.0,
            color: Rgb::new(200, 80, 80),
            spawned_at: e.clock,
            lifespan: BALLOON_LIFESPAN,
        });
        Vec2::new(x, y)
    }

    fn activate(e: &mut Engine, kind: PowerUp) {
        let mut sink = Vec::new();
        e.powerups.activate(kind, effect_duration(kind), &mut sink);
    }

    #[test]
    fn test_phase_transitions() {
        let mut e = Engine::new(1);
        assert_eq!(e.phase, GamePhase::Idle);

        // Idle: both entry points are silent no-ops
        e.update(DT);
        e.handle_input(Vec2::new(100.0, 100.0));
        assert_eq!(e.clock, 0.0);

        e.start(Difficulty::Easy);
        assert_eq!(e.phase, GamePhase::Running);

        e.pause();
        assert_eq!(e.phase, GamePhase::Paused);
        let clock = e.clock;
        e.update(1.0);
        assert_eq!(e.clock, clock);

        e.resume();
        assert_eq!(e.phase, GamePhase::Running);

        e.reset();
        assert_eq!(e.phase, GamePhase::Idle);
    }

    #[test]
    fn test_spawn_after_interval() {
        let mut e = running_engine();
        assert!(e.balloons.is_empty());

        // Medium spawns every 0.9s; one balloon, still near the bottom edge
        for _ in 0..60 {
            e.update(DT);
        }
        assert_eq!(e.balloons.len(), 1);
        let b = &e.balloons[0];
        assert!(b.radius >= BALLOON_MIN_RADIUS && b.radius <= BALLOON_MAX_RADIUS);
        assert!(b.speed() > 0.0);
        assert!(b.anchor_x >= b.radius && b.anchor_x <= SIM_WIDTH - b.radius);
        assert!(b.pos.y > SIM_HEIGHT - 30.0);
    }

    #[test]
    fn test_one_spawn_per_update() {
        let mut e = running_engine();
        // A long frame covers multiple spawn intervals but still spawns
        // exactly one balloon
        e.update(2.0);
        assert_eq!(e.balloons.len(), 1);
        e.update(2.0);
        assert_eq!(e.balloons.len(), 2);
    }

    #[test]
    fn test_pop_scores_and_combos() {
        let mut e = running_engine();
        let at = add_balloon(&mut e, BalloonKind::Normal, 200.0, 400.0);

        e.handle_input(at);
        assert_eq!(e.score, 1);
        assert_eq!(e.combo, 1);
        assert!(e.balloons.is_empty());

        let events = e.drain_events();
        assert!(events.contains(&GameEvent::BalloonPopped {
            kind: BalloonKind::Normal,
            points: 1
        }));
    }

    #[test]
    fn test_five_pop_combo_run() {
        let mut e = running_engine();
        for _ in 0..5 {
            let at = add_balloon(&mut e, BalloonKind::Normal, 200.0, 400.0);
            e.handle_input(at);
        }
        // 5 base points + combo bonuses 20+30+40+50
        assert_eq!(e.score, 145);
        assert_eq!(e.combo, 5);
    }

    #[test]
    fn test_multiplier_doubles_each_addition() {
        let mut e = running_engine();
        activate(&mut e, PowerUp::Multiplier);

        let at = add_balloon(&mut e, BalloonKind::Normal, 200.0, 400.0);
        e.drain_events();
        e.handle_input(at);
        assert_eq!(e.score, 2);

        // Second pop: base 1x2 plus combo bonus 20x2, added separately
        let at = add_balloon(&mut e, BalloonKind::Normal, 200.0, 400.0);
        e.handle_input(at);
        assert_eq!(e.score, 2 + 2 + 40);
        let score_events: Vec<_> = e
            .drain_events()
            .into_iter()
            .filter(|ev| matches!(ev, GameEvent::ScoreChanged { multiplier: 2, .. }))
            .collect();
        assert_eq!(score_events.len(), 3);
    }

    #[test]
    fn test_heart_restores_capped() {
        let mut e = running_engine();
        e.lives = 2;
        let at = add_balloon(&mut e, BalloonKind::Heart, 100.0, 300.0);
        e.drain_events();
        e.handle_input(at);
        assert_eq!(e.lives, 3);
        assert_eq!(e.score, 0);
        assert_eq!(e.combo, 0);
        assert!(
            e.drain_events()
                .contains(&GameEvent::LifeGained { lives: 3 })
        );

        // At the cap a heart is a dud, no event either
        let at = add_balloon(&mut e, BalloonKind::Heart, 100.0, 300.0);
        e.handle_input(at);
        assert_eq!(e.lives, 3);
        assert!(
            !e.drain_events()
                .iter()
                .any(|ev| matches!(ev, GameEvent::LifeGained { .. }))
        );
    }

    #[test]
    fn test_bomb_costs_life_and_combo() {
        let mut e = running_engine();
        let at = add_balloon(&mut e, BalloonKind::Normal, 200.0, 400.0);
        e.handle_input(at);
        assert_eq!(e.combo, 1);

        let at = add_balloon(&mut e, BalloonKind::Bomb, 200.0, 400.0);
        e.handle_input(at);
        assert_eq!(e.lives, 2);
        assert_eq!(e.combo, 0);
        assert_eq!(e.score, 1);
    }

    #[test]
    fn test_defuser_converts_bombs() {
        let mut e = running_engine();
        activate(&mut e, PowerUp::Defuser);

        let at = add_balloon(&mut e, BalloonKind::Bomb, 200.0, 400.0);
        e.handle_input(at);
        assert_eq!(e.lives, 3);
        assert_eq!(e.score, DEFUSED_BOMB_POINTS);
    }

    #[test]
    fn test_three_bombs_end_the_run() {
        let mut e = running_engine();
        for _ in 0..3 {
            let at = add_balloon(&mut e, BalloonKind::Bomb, 200.0, 400.0);
            e.handle_input(at);
        }
        assert_eq!(e.lives, 0);
        // Game over lands on the next update, not inside the pop
        assert_eq!(e.phase, GamePhase::Running);

        activate(&mut e, PowerUp::Slow);
        e.drain_events();
        e.update(DT);
        assert_eq!(e.phase, GamePhase::Ended);
        assert!(e.powerups.effects().is_empty());

        let events = e.drain_events();
        let game_overs = events
            .iter()
            .filter(|ev| matches!(ev, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);

        // Ended phase: everything is a no-op, no second notification
        e.update(DT);
        e.handle_input(Vec2::new(200.0, 400.0));
        assert!(e.drain_events().is_empty());
    }

    #[test]
    fn test_miss_breaks_combo() {
        let mut e = running_engine();
        for _ in 0..4 {
            let at = add_balloon(&mut e, BalloonKind::Normal, 200.0, 400.0);
            e.handle_input(at);
        }
        assert_eq!(e.combo, 4);

        e.drain_events();
        e.handle_input(Vec2::new(10.0, 10.0));
        assert_eq!(e.combo, 0);
        assert!(e.drain_events().contains(&GameEvent::ComboBroken));
    }

    #[test]
    fn test_combo_times_out_without_input() {
        let mut e = running_engine();
        let at = add_balloon(&mut e, BalloonKind::Normal, 200.0, 400.0);
        e.handle_input(at);
        let at = add_balloon(&mut e, BalloonKind::Normal, 200.0, 400.0);
        e.handle_input(at);
        assert_eq!(e.combo, 2);

        e.drain_events();
        e.update(COMBO_WINDOW + 0.1);
        assert_eq!(e.combo, 0);
        assert!(e.drain_events().contains(&GameEvent::ComboBroken));
    }

    #[test]
    fn test_exit_top_is_free() {
        let mut e = running_engine();
        add_balloon(&mut e, BalloonKind::Normal, 200.0, -40.0);
        e.update(DT);
        assert!(e.balloons.is_empty());
        assert_eq!(e.lives, 3);
    }

    #[test]
    fn test_expiry_on_screen_costs_a_life() {
        let mut e = running_engine();
        add_balloon(&mut e, BalloonKind::Normal, 200.0, 400.0);
        e.balloons.last_mut().unwrap().spawned_at = -(BALLOON_LIFESPAN + 1.0);

        e.drain_events();
        e.update(DT);
        assert!(e.balloons.is_empty());
        assert_eq!(e.lives, 2);
        assert!(
            e.drain_events()
                .contains(&GameEvent::LifeLost { remaining: 2 })
        );
    }

    #[test]
    fn test_bomb_and_heart_expire_free() {
        let mut e = running_engine();
        add_balloon(&mut e, BalloonKind::Bomb, 100.0, 400.0);
        e.balloons.last_mut().unwrap().spawned_at = -(BALLOON_LIFESPAN + 1.0);
        add_balloon(&mut e, BalloonKind::Heart, 300.0, 400.0);
        e.balloons.last_mut().unwrap().spawned_at = -(BALLOON_LIFESPAN + 1.0);

        e.update(DT);
        assert!(e.balloons.is_empty());
        assert_eq!(e.lives, 3);
    }

    #[test]
    fn test_freeze_halts_motion() {
        let mut e = running_engine();
        add_balloon(&mut e, BalloonKind::Normal, 200.0, 400.0);
        activate(&mut e, PowerUp::Freeze);

        let before = e.balloons[0].pos;
        e.update(DT);
        assert_eq!(e.balloons[0].pos, before);
    }

    #[test]
    fn test_slow_halves_displacement() {
        let mut e = running_engine();
        add_balloon(&mut e, BalloonKind::Normal, 200.0, 400.0);
        e.update(0.1);
        let normal_dy = 400.0 - e.balloons[0].pos.y;

        let mut e = running_engine();
        add_balloon(&mut e, BalloonKind::Normal, 200.0, 400.0);
        activate(&mut e, PowerUp::Slow);
        e.update(0.1);
        let slow_dy = 400.0 - e.balloons[0].pos.y;

        assert!((slow_dy - normal_dy * 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_magnet_pulls_toward_center() {
        let mut e = running_engine();
        add_balloon(&mut e, BalloonKind::Normal, 60.0, 700.0);
        activate(&mut e, PowerUp::Magnet);

        let center = Vec2::new(SIM_WIDTH / 2.0, SIM_HEIGHT / 2.0);
        let before = e.balloons[0].pos.distance(center);
        e.update(0.1);
        let after = e.balloons[0].pos.distance(center);
        assert!(after < before);
    }

    #[test]
    fn test_newest_balloon_wins_overlap() {
        let mut e = running_engine();
        add_balloon(&mut e, BalloonKind::Normal, 200.0, 400.0);
        add_balloon(&mut e, BalloonKind::Bomb, 210.0, 400.0);

        // Tap the overlap: the bomb spawned later, so it pops
        e.handle_input(Vec2::new(205.0, 400.0));
        assert_eq!(e.balloons.len(), 1);
        assert_eq!(e.balloons[0].kind, BalloonKind::Normal);
        assert_eq!(e.lives, 2);
    }

    #[test]
    fn test_reset_preserves_high_score_only() {
        let mut e = running_engine();
        for _ in 0..3 {
            let at = add_balloon(&mut e, BalloonKind::Normal, 200.0, 400.0);
            e.handle_input(at);
        }
        activate(&mut e, PowerUp::Magnet);
        e.lives = 0;
        e.update(DT);
        let best = e.high_score;
        assert!(best > 0);

        e.reset();
        assert_eq!(e.phase, GamePhase::Idle);
        assert_eq!(e.score, 0);
        assert_eq!(e.lives, MAX_LIVES);
        assert_eq!(e.combo, 0);
        assert!(e.balloons.is_empty());
        assert!(e.particles.is_empty());
        assert!(e.powerups.effects().is_empty());
        assert_eq!(e.high_score, best);
    }

    #[test]
    fn test_powerup_pop_activates_and_scores() {
        let mut e = running_engine();
        let at = add_balloon(&mut e, BalloonKind::Freeze, 200.0, 400.0);
        e.drain_events();
        e.handle_input(at);

        assert!(e.powerups.freeze_active());
        assert_eq!(e.score, 5);
        assert_eq!(e.combo, 1);
        let events = e.drain_events();
        assert!(events.iter().any(|ev| matches!(
            ev,
            GameEvent::PowerUpActivated {
                kind: PowerUp::Freeze,
                ..
            }
        )));
    }

    #[test]
    fn test_score_never_decreases() {
        let mut e = running_engine();
        let mut last = 0;
        for i in 0..20 {
            let kind = match i % 4 {
                0 => BalloonKind::Normal,
                1 => BalloonKind::Bomb,
                2 => BalloonKind::Special,
                _ => BalloonKind::Heart,
            };
            let at = add_balloon(&mut e, kind, 200.0, 400.0);
            e.handle_input(at);
            assert!(e.score >= last);
            last = e.score;
        }
    }

    mod spawn_bounds {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn spawned_balloons_respect_bounds(seed in any::<u64>()) {
                let mut e = Engine::new(seed);
                e.start(Difficulty::Hard);
                for _ in 0..120 {
                    e.update(0.1);
                }
                // Spawned balloons may have risen, but radius/speed bounds
                // hold for every one of them
                prop_assert!(!e.balloons.is_empty());
                for b in &e.balloons {
                    prop_assert!(b.radius >= BALLOON_MIN_RADIUS);
                    prop_assert!(b.radius <= BALLOON_MAX_RADIUS);
                    prop_assert!(b.speed() > 0.0);
                    prop_assert!(b.anchor_x >= b.radius);
                    prop_assert!(b.anchor_x <= SIM_WIDTH - b.radius);
                }
            }
        }
    }
}
