//! Rendering collaborator.
//!
//! The engine hands out `FrameSnapshot` copies; the renderer only ever reads
//! them. Drawing itself is a Canvas2D pass, wasm-only.

use crate::sim::powerup::PowerUp;
use crate::sim::state::GamePhase;
use crate::sim::{Balloon, Engine, Particle};

/// Remaining-time readout for one active effect, for HUD timer bars
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectStatus {
    pub kind: PowerUp,
    /// Remaining fraction in [0, 1]
    pub fraction: f32,
}

/// Everything the render path needs for one frame, copied out of the engine
/// so the draw side can never observe (or cause) a torn mutation.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub balloons: Vec<Balloon>,
    pub particles: Vec<Particle>,
    pub score: u64,
    pub high_score: u64,
    pub lives: u8,
    pub combo: u32,
    pub phase: GamePhase,
    pub effects: Vec<EffectStatus>,
    pub freeze_active: bool,
}

impl FrameSnapshot {
    pub fn capture(engine: &Engine) -> Self {
        Self {
            balloons: engine.balloons.clone(),
            particles: engine.particles.particles().to_vec(),
            score: engine.score,
            high_score: engine.high_score,
            lives: engine.lives,
            combo: engine.combo,
            phase: engine.phase,
            effects: engine
                .powerups
                .effects()
                .iter()
                .map(|e| EffectStatus {
                    kind: e.kind,
                    fraction: e.fraction(),
                })
                .collect(),
            freeze_active: engine.powerups.freeze_active(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod canvas {
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use super::FrameSnapshot;
    use crate::consts::{SIM_HEIGHT, SIM_WIDTH};
    use crate::sim::Rgb;

    fn css_rgba(c: Rgb, alpha: f32) -> String {
        format!("rgba({},{},{},{:.3})", c.r, c.g, c.b, alpha.clamp(0.0, 1.0))
    }

    /// Canvas2D drawing pass. All coordinates are simulation units; the
    /// context is scaled once at construction to cover the backing store.
    pub struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
    }

    impl CanvasRenderer {
        pub fn new(canvas: &HtmlCanvasElement, dpr: f64) -> Option<Self> {
            let rect = canvas.get_bounding_client_rect();
            canvas.set_width((rect.width() * dpr) as u32);
            canvas.set_height((rect.height() * dpr) as u32);

            let ctx = canvas
                .get_context("2d")
                .ok()??
                .dyn_into::<CanvasRenderingContext2d>()
                .ok()?;
            let sx = rect.width() * dpr / SIM_WIDTH as f64;
            let sy = rect.height() * dpr / SIM_HEIGHT as f64;
            ctx.scale(sx, sy).ok()?;
            Some(Self { ctx })
        }

        pub fn render(&self, snap: &FrameSnapshot) {
            if let Err(e) = self.try_render(snap) {
                log::warn!("Render error: {:?}", e);
            }
        }

        fn try_render(&self, snap: &FrameSnapshot) -> Result<(), JsValue> {
            let ctx = &self.ctx;

            // Sky backdrop; freeze gets an icy cast
            let sky = if snap.freeze_active {
                "#bcd9f0"
            } else {
                "#aee3f5"
            };
            ctx.set_fill_style_str(sky);
            ctx.fill_rect(0.0, 0.0, SIM_WIDTH as f64, SIM_HEIGHT as f64);

            for p in &snap.particles {
                // Particles shrink and fade out together
                let radius = p.radius * crate::lerp(0.4, 1.0, p.life);
                ctx.set_global_alpha(p.life.clamp(0.0, 1.0) as f64);
                ctx.set_fill_style_str(&css_rgba(p.color, 1.0));
                ctx.begin_path();
                ctx.arc(
                    p.pos.x as f64,
                    p.pos.y as f64,
                    radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                )?;
                ctx.fill();
            }
            ctx.set_global_alpha(1.0);

            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            for b in &snap.balloons {
                let (x, y, r) = (b.pos.x as f64, b.pos.y as f64, b.radius as f64);

                // String hanging below the balloon
                ctx.set_stroke_style_str("rgba(90,90,90,0.6)");
                ctx.begin_path();
                ctx.move_to(x, y + r);
                ctx.line_to(x, y + r + 14.0);
                ctx.stroke();

                ctx.set_fill_style_str(&css_rgba(b.color, 0.9));
                ctx.begin_path();
                ctx.arc(x, y, r, 0.0, std::f64::consts::TAU)?;
                ctx.fill();

                ctx.set_font(&format!("{}px serif", (r * 0.9) as u32));
                ctx.fill_text(b.kind.emoji(), x, y)?;
            }

            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
