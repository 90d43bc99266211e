//! Audio collaborator: game events mapped to short procedural cues.
//!
//! Cues are simple oscillator envelopes on wasm (no sample assets); the sim
//! core never calls in here directly — the driver forwards drained events.

use crate::events::GameEvent;
use crate::sim::state::BalloonKind;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Plain balloon pop
    Pop,
    /// Special (star) balloon pop
    Sparkle,
    /// Life restored
    Heart,
    /// Bomb went off
    Explosion,
    /// Bomb absorbed by the defuser
    Defused,
    /// Power-up collected
    PowerUp,
    /// Power-up ran out
    PowerDown,
    /// Combo milestone
    Combo,
    /// Life lost
    LifeLost,
    /// Run ended
    GameOver,
}

/// Which cue, if any, a game event should trigger
pub fn cue_for(event: &GameEvent) -> Option<SoundCue> {
    match event {
        GameEvent::BalloonPopped { kind, points } => match kind {
            BalloonKind::Special => Some(SoundCue::Sparkle),
            BalloonKind::Heart => Some(SoundCue::Heart),
            // A defused bomb still awarded points; a live one is the
            // LifeLost cue's job
            BalloonKind::Bomb if *points > 0 => Some(SoundCue::Defused),
            BalloonKind::Bomb => Some(SoundCue::Explosion),
            _ => Some(SoundCue::Pop),
        },
        GameEvent::PowerUpActivated { .. } => Some(SoundCue::PowerUp),
        GameEvent::PowerUpExpired { .. } => Some(SoundCue::PowerDown),
        GameEvent::ComboReached { .. } => Some(SoundCue::Combo),
        GameEvent::LifeLost { .. } => Some(SoundCue::LifeLost),
        GameEvent::GameOver { .. } => Some(SoundCue::GameOver),
        GameEvent::PowerUpTicked { .. }
        | GameEvent::LifeGained { .. }
        | GameEvent::ComboBroken
        | GameEvent::ScoreChanged { .. } => None,
    }
}

/// Frequency sweep + duration for each cue (played only in wasm32)
#[allow(dead_code)]
fn cue_params(cue: SoundCue) -> (f32, f32, f64) {
    match cue {
        SoundCue::Pop => (520.0, 880.0, 0.08),
        SoundCue::Sparkle => (880.0, 1760.0, 0.15),
        SoundCue::Heart => (440.0, 660.0, 0.2),
        SoundCue::Explosion => (220.0, 60.0, 0.3),
        SoundCue::Defused => (330.0, 490.0, 0.12),
        SoundCue::PowerUp => (523.0, 1046.0, 0.25),
        SoundCue::PowerDown => (660.0, 330.0, 0.2),
        SoundCue::Combo => (700.0, 1400.0, 0.18),
        SoundCue::LifeLost => (300.0, 150.0, 0.35),
        SoundCue::GameOver => (440.0, 110.0, 0.8),
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<web_sys::AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        let ctx = {
            let ctx = web_sys::AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            ctx
        };
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Resume the audio context (required after first user gesture)
    #[cfg(target_arch = "wasm32")]
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn resume(&self) {}

    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    #[allow(dead_code)]
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Forward a drained game event; most map to one cue, some to none
    pub fn handle(&self, event: &GameEvent) {
        if let Some(cue) = cue_for(event) {
            self.play(cue);
        }
    }

    /// Play a cue: one oscillator with an exponential pitch sweep and a
    /// decaying gain envelope.
    #[cfg(target_arch = "wasm32")]
    pub fn play(&self, cue: SoundCue) {
        use web_sys::OscillatorType;

        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let (freq_start, freq_end, duration) = cue_params(cue);
        let now = ctx.current_time();

        let Ok(osc) = ctx.create_oscillator() else {
            return;
        };
        let Ok(gain) = ctx.create_gain() else { return };

        osc.set_type(match cue {
            SoundCue::Explosion | SoundCue::LifeLost => OscillatorType::Sawtooth,
            SoundCue::GameOver => OscillatorType::Triangle,
            _ => OscillatorType::Sine,
        });
        osc.frequency().set_value(freq_start);
        let _ = osc
            .frequency()
            .exponential_ramp_to_value_at_time(freq_end.max(1.0), now + duration);

        gain.gain().set_value(vol * 0.3);
        let _ = gain
            .gain()
            .exponential_ramp_to_value_at_time(0.0001, now + duration);

        let _ = osc.connect_with_audio_node(&gain);
        let _ = gain.connect_with_audio_node(&ctx.destination());
        let _ = osc.start();
        let _ = osc.stop_with_when(now + duration + 0.05);
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self, _cue: SoundCue) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::powerup::PowerUp;

    #[test]
    fn test_cue_mapping() {
        assert_eq!(
            cue_for(&GameEvent::BalloonPopped {
                kind: BalloonKind::Normal,
                points: 1
            }),
            Some(SoundCue::Pop)
        );
        assert_eq!(
            cue_for(&GameEvent::BalloonPopped {
                kind: BalloonKind::Bomb,
                points: 0
            }),
            Some(SoundCue::Explosion)
        );
        assert_eq!(
            cue_for(&GameEvent::BalloonPopped {
                kind: BalloonKind::Bomb,
                points: 3
            }),
            Some(SoundCue::Defused)
        );
        assert_eq!(
            cue_for(&GameEvent::PowerUpActivated {
                kind: PowerUp::Slow,
                duration: 6.0
            }),
            Some(SoundCue::PowerUp)
        );
        // Per-tick countdown noise would be unbearable
        assert_eq!(
            cue_for(&GameEvent::PowerUpTicked {
                kind: PowerUp::Slow,
                remaining: 3.0
            }),
            None
        );
    }

    #[test]
    fn test_volume_controls() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(2.0);
        audio.set_sfx_volume(0.5);
        assert!((audio.effective_volume() - 0.5).abs() < 1e-6);

        audio.set_muted(true);
        assert_eq!(audio.effective_volume(), 0.0);
    }

    #[test]
    fn test_every_cue_has_params() {
        for cue in [
            SoundCue::Pop,
            SoundCue::Sparkle,
            SoundCue::Heart,
            SoundCue::Explosion,
            SoundCue::Defused,
            SoundCue::PowerUp,
            SoundCue::PowerDown,
            SoundCue::Combo,
            SoundCue::LifeLost,
            SoundCue::GameOver,
        ] {
            let (start, end, duration) = cue_params(cue);
            assert!(start > 0.0 && end > 0.0 && duration > 0.0);
        }
    }
}
