//! Canvas 2D render backend.
//!
//! Draw order is back to front: grid, particles, rings, text, icons. Particle
//! micro-textures become small canvases on first sight and are dropped when
//! the engine disposes the particle. Ring textures are reduced to one colour
//! per segment whenever the engine uploads them.

use crate::assets::LoadedAssets;
use crate::constants::*;
use crate::dom;
use crate::input;
use fnv::FnvHashMap;
use glam::{Mat4, Vec3};
use splash_core::{FrameView, GlitchTexture, MicroTexture, Particle, ParticleId, RenderBackend, Scene};
use std::cell::RefCell;
use std::f32::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys as web;

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

pub struct CanvasBackend {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    document: web::Document,
    assets: Rc<RefCell<LoadedAssets>>,
    ring_paint: FnvHashMap<usize, Vec<String>>,
    particle_sprites: FnvHashMap<ParticleId, web::HtmlCanvasElement>,
}

impl CanvasBackend {
    pub fn new(
        document: web::Document,
        canvas: web::HtmlCanvasElement,
        assets: Rc<RefCell<LoadedAssets>>,
    ) -> anyhow::Result<Self> {
        let ctx = dom::context_2d(&canvas)?;
        Ok(Self {
            canvas,
            ctx,
            document,
            assets,
            ring_paint: FnvHashMap::default(),
            particle_sprites: FnvHashMap::default(),
        })
    }

    fn image_canvas(&self, bytes: &[u8], width: u32, height: u32) -> anyhow::Result<web::HtmlCanvasElement> {
        let c: web::HtmlCanvasElement = self
            .document
            .create_element("canvas")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| anyhow::anyhow!("created element is not a canvas"))?;
        c.set_width(width);
        c.set_height(height);
        let data = web::ImageData::new_with_u8_clamped_array_and_sh(Clamped(bytes), width, height)
            .map_err(js_err)?;
        dom::context_2d(&c)?.put_image_data(&data, 0.0, 0.0).map_err(js_err)?;
        Ok(c)
    }

    fn sprite_for(&mut self, p: &Particle) -> anyhow::Result<web::HtmlCanvasElement> {
        if let Some(c) = self.particle_sprites.get(&p.id) {
            return Ok(c.clone());
        }
        let size = MicroTexture::SIZE as u32;
        let c = self.image_canvas(p.texture.bytes(), size, size)?;
        self.particle_sprites.insert(p.id, c.clone());
        Ok(c)
    }

    fn font(&self, px: f32) -> String {
        let assets = self.assets.borrow();
        let family = assets.font_family.as_deref().unwrap_or(FALLBACK_FONT_FAMILY);
        format!("700 {:.0}px \"{}\", {}", px.max(1.0), family, FALLBACK_FONT_FAMILY)
    }

    fn draw_grid(&self, vp: Mat4, w: f32, h: f32, opacity: f32) {
        let ctx = &self.ctx;
        ctx.set_global_alpha(GRID_ALPHA * opacity as f64);
        ctx.set_stroke_style_str(GRID_COLOR);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        let steps = (2.0 * GRID_HALF_EXTENT / GRID_STEP) as i32;
        for i in 0..=steps {
            let v = -GRID_HALF_EXTENT + i as f32 * GRID_STEP;
            for (a, b) in [
                (Vec3::new(v, -GRID_HALF_EXTENT, GRID_Z), Vec3::new(v, GRID_HALF_EXTENT, GRID_Z)),
                (Vec3::new(-GRID_HALF_EXTENT, v, GRID_Z), Vec3::new(GRID_HALF_EXTENT, v, GRID_Z)),
            ] {
                if let (Some(pa), Some(pb)) = (input::project(vp, a, w, h), input::project(vp, b, w, h)) {
                    ctx.move_to(pa.x as f64, pa.y as f64);
                    ctx.line_to(pb.x as f64, pb.y as f64);
                }
            }
        }
        ctx.stroke();
    }

    /// One bad sprite skips that particle, not the frame.
    fn draw_particles(&mut self, scene: &Scene, vp: Mat4, w: f32, h: f32) {
        if !scene.particles.is_enabled() {
            return;
        }
        self.ctx.set_image_smoothing_enabled(false);
        for p in scene.particles.iter() {
            let Some((c, size)) = input::project_sized(vp, p.position, PARTICLE_SIZE, w, h) else {
                continue;
            };
            let sprite = match self.sprite_for(p) {
                Ok(sprite) => sprite,
                Err(e) => {
                    log::warn!("[render] particle {:?} sprite failed: {e:?}", p.id);
                    continue;
                }
            };
            let half = size as f64 * 0.5;
            self.ctx.set_global_alpha(p.opacity.clamp(0.0, 1.0) as f64);
            if let Err(e) = self.ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
                &sprite,
                c.x as f64 - half,
                c.y as f64 - half,
                size as f64,
                size as f64,
            ) {
                log::warn!("[render] particle {:?} draw failed: {:?}", p.id, js_err(e));
            }
        }
        self.ctx.set_image_smoothing_enabled(true);
    }

    fn draw_rings(&self, scene: &Scene, vp: Mat4, w: f32, h: f32) {
        let group = &scene.rings;
        if group.opacity <= 0.0 {
            return;
        }
        let ctx = &self.ctx;
        ctx.set_global_alpha(group.opacity.clamp(0.0, 1.0) as f64);
        ctx.set_line_width(RING_LINE_WIDTH_PX);
        ctx.set_line_cap("round");
        for ring in group.rings.iter() {
            let radius = RING_RADIUS * ring.scale * (1.0 + ring.index as f32 * 0.25);
            let paint = self.ring_paint.get(&ring.index);
            let step = TAU / RING_SEGMENTS as f32;
            for s in 0..RING_SEGMENTS {
                let a0 = s as f32 * step;
                let p0 = input::ring_point(radius, a0, ring.rotation, group.rotation_x, ring.z);
                let p1 = input::ring_point(radius, a0 + step, ring.rotation, group.rotation_x, ring.z);
                let (Some(s0), Some(s1)) = (input::project(vp, p0, w, h), input::project(vp, p1, w, h)) else {
                    continue;
                };
                let color = paint
                    .and_then(|rows| rows.get(s))
                    .map(String::as_str)
                    .unwrap_or(RING_PLAIN_COLOR);
                ctx.set_stroke_style_str(color);
                ctx.begin_path();
                ctx.move_to(s0.x as f64, s0.y as f64);
                ctx.line_to(s1.x as f64, s1.y as f64);
                ctx.stroke();
            }
        }
    }

    fn draw_text(&self, scene: &Scene, vp: Mat4, w: f32, h: f32) -> anyhow::Result<()> {
        let ctx = &self.ctx;
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_fill_style_str("#ffffff");
        ctx.set_global_alpha(scene.text.opacity.clamp(0.0, 1.0) as f64);
        if let Some((c, size)) = input::project_sized(vp, Vec3::ZERO, TITLE_SIZE, w, h) {
            ctx.set_font(&self.font(size));
            ctx.fill_text(TITLE_TEXT, c.x as f64, c.y as f64).map_err(js_err)?;
        }
        for (word, &x) in WORDS.iter().zip(scene.text.word_offsets.iter()) {
            if x == 0.0 {
                continue;
            }
            if let Some((c, size)) = input::project_sized(vp, Vec3::new(x, 0.0, 0.0), WORD_SIZE, w, h) {
                ctx.set_font(&self.font(size));
                ctx.fill_text(word, c.x as f64, c.y as f64).map_err(js_err)?;
            }
        }
        if scene.scroll_hint_opacity > 0.0 {
            ctx.set_global_alpha(scene.scroll_hint_opacity.clamp(0.0, 1.0) as f64);
            if let Some((c, size)) = input::project_sized(vp, SCROLL_HINT_POS, SCROLL_HINT_SIZE, w, h) {
                ctx.set_font(&self.font(size));
                ctx.fill_text(SCROLL_HINT_TEXT, c.x as f64, c.y as f64).map_err(js_err)?;
            }
        }
        Ok(())
    }

    fn draw_icons(&self, scene: &Scene, vp: Mat4, w: f32, h: f32) -> anyhow::Result<()> {
        let assets = self.assets.borrow();
        let Some(sheet) = assets.icon_sheet.as_ref() else {
            return Ok(());
        };
        let n = scene.icons.len().max(1) as f64;
        let cell_w = sheet.width() as f64 / n;
        let cell_h = sheet.height() as f64;
        for (i, icon) in scene.icons.iter().enumerate() {
            if icon.opacity <= 0.0 {
                continue;
            }
            let Some((c, size)) = input::project_sized(vp, icon.world_position(), ICON_SIZE, w, h) else {
                continue;
            };
            let half = size as f64 * 0.5;
            self.ctx.set_global_alpha(icon.opacity.clamp(0.0, 1.0) as f64);
            self.ctx
                .draw_image_with_image_bitmap_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    sheet,
                    cell_w * i as f64,
                    0.0,
                    cell_w,
                    cell_h,
                    c.x as f64 - half,
                    c.y as f64 - half,
                    size as f64,
                    size as f64,
                )
                .map_err(js_err)?;
        }
        Ok(())
    }
}

impl RenderBackend for CanvasBackend {
    fn submit_scene(&mut self, scene: &Scene) -> anyhow::Result<()> {
        self.ring_paint.clear();
        self.particle_sprites.clear();
        log::info!(
            "[render] canvas {}x{}, {} rings, {} icons",
            self.canvas.width(),
            self.canvas.height(),
            scene.rings.rings.len(),
            scene.icons.len()
        );
        Ok(())
    }

    fn upload_ring_texture(&mut self, ring: usize, texture: &GlitchTexture) -> anyhow::Result<()> {
        let texels = texture.texels();
        let rows = (0..RING_SEGMENTS)
            .map(|s| {
                let angle = (s as f32 + 0.5) / RING_SEGMENTS as f32 * TAU;
                let row = input::texel_row(angle, texture.height());
                input::row_color(texels, texture.width(), row)
            })
            .collect();
        self.ring_paint.insert(ring, rows);
        Ok(())
    }

    fn render_frame(&mut self, frame: &FrameView<'_>) -> anyhow::Result<()> {
        let w = self.canvas.width() as f32;
        let h = self.canvas.height() as f32;
        let mut pose = *frame.pose;
        pose.aspect = w / h.max(1.0);
        let vp = pose.view_proj();
        let scene = frame.scene;

        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str(BACKGROUND_COLOR);
        self.ctx.fill_rect(0.0, 0.0, w as f64, h as f64);

        if scene.grid.visible {
            self.draw_grid(vp, w, h, scene.grid.opacity);
        }
        self.draw_particles(scene, vp, w, h);
        self.draw_rings(scene, vp, w, h);
        self.draw_text(scene, vp, w, h)?;
        self.draw_icons(scene, vp, w, h)?;
        self.ctx.set_global_alpha(1.0);
        Ok(())
    }

    fn release_particle(&mut self, id: ParticleId) {
        self.particle_sprites.remove(&id);
    }
}
