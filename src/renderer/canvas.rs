//! Canvas 2D backend

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{PARTICLE_RADIUS, css_rgba, placeholder_sprite, trail_strokes};
use crate::settings::Settings;
use crate::sim::GameState;

/// Canvas-backed renderer state
pub struct CanvasRenderState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: u32,
    height: u32,
    dpr: f64,
}

impl CanvasRenderState {
    pub fn new(canvas: HtmlCanvasElement, dpr: f64) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "getContext('2d') threw".to_string())?
            .ok_or_else(|| "2D context unavailable".to_string())?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "not a CanvasRenderingContext2d".to_string())?;

        let width = canvas.width();
        let height = canvas.height();
        log::info!("Canvas renderer ready ({}x{} @{}x)", width, height, dpr);
        Ok(Self {
            canvas,
            ctx,
            width,
            height,
            dpr: dpr.max(1.0),
        })
    }

    /// Match the backing store to a new CSS size
    pub fn resize(&mut self, css_width: f64, css_height: f64) {
        self.width = (css_width * self.dpr).round().max(1.0) as u32;
        self.height = (css_height * self.dpr).round().max(1.0) as u32;
        self.canvas.set_width(self.width);
        self.canvas.set_height(self.height);
    }

    /// Draw one frame: fruit, then effects, then the blade on top
    pub fn render(&self, state: &GameState, settings: &Settings) {
        let ctx = &self.ctx;
        // Simulation runs in CSS pixels
        let _ = ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);
        ctx.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);

        let shaded = settings.quality.fruit_shading();
        for proj in &state.projectiles {
            ctx.save();
            let _ = ctx.translate(proj.pos.x as f64, proj.pos.y as f64);
            let _ = ctx.rotate(proj.rotation as f64);
            for blob in placeholder_sprite(proj.kind, proj.radius, shaded) {
                ctx.set_fill_style_str(&css_rgba(blob.color, blob.alpha));
                ctx.begin_path();
                let _ = ctx.ellipse(
                    blob.offset.x as f64,
                    blob.offset.y as f64,
                    blob.radii.x as f64,
                    blob.radii.y as f64,
                    0.0,
                    0.0,
                    TAU,
                );
                ctx.fill();
            }
            ctx.restore();
        }

        if settings.effective_flashes() {
            for flash in &state.effects.flashes {
                ctx.set_fill_style_str(&css_rgba(flash.color, flash.alpha()));
                ctx.begin_path();
                let _ = ctx.arc(flash.pos.x as f64, flash.pos.y as f64, flash.radius as f64, 0.0, TAU);
                ctx.fill();
            }
        }

        for p in &state.effects.particles {
            ctx.set_fill_style_str(&css_rgba(p.color, p.life));
            ctx.begin_path();
            let _ = ctx.arc(p.pos.x as f64, p.pos.y as f64, PARTICLE_RADIUS as f64, 0.0, TAU);
            ctx.fill();
        }

        if settings.trails {
            ctx.set_line_cap("round");
            for stroke in trail_strokes(&state.trail) {
                ctx.set_stroke_style_str(&css_rgba(stroke.color, stroke.alpha));
                ctx.set_line_width(stroke.width as f64);
                ctx.begin_path();
                ctx.move_to(stroke.from.x as f64, stroke.from.y as f64);
                ctx.line_to(stroke.to.x as f64, stroke.to.y as f64);
                ctx.stroke();
            }
        }
    }
}
