//! Frame driver tying the scene, scheduler, reveal and controller together.

use crate::constants::*;
use crate::controller::{CameraPose, Controller, Viewport};
use crate::error::{Result, SplashError};
use crate::particles::{FieldParams, ParticleId};
use crate::reveal::{Asset, AssetGate, GlitchClock, Reveal, RevealContext, RevealPhase};
use crate::scene::{InteractiveTarget, Node, Scene, SceneScheduler};
use crate::texture::{GlitchTexture, TextureGenerator};
use glam::Vec3;
use smallvec::SmallVec;

/// Icon placement and the action it triggers.
#[derive(Clone, Debug)]
pub struct IconSpec {
    pub position: Vec3,
    pub action: String,
}

/// Construction-time parameters.
///
/// - `seed` feeds every random stream (textures, particles, glitch clock)
/// - `far_distance` / `rest_distance` bound the intro camera approach
/// - `max_swing_deg` is the orbit swing at the pointer extremes
#[derive(Clone, Debug)]
pub struct SplashParams {
    pub seed: u64,
    pub far_distance: f32,
    pub rest_distance: f32,
    pub max_swing_deg: f32,
    pub fov_deg: f32,
    pub burst: usize,
    pub field: FieldParams,
    pub icons: Vec<IconSpec>,
    pub viewport: Viewport,
}

impl Default for SplashParams {
    fn default() -> Self {
        let actions = [
            "https://github.com/",
            "https://www.linkedin.com/",
            "mailto:hello@example.com",
        ];
        Self {
            seed: 42,
            far_distance: CAMERA_FAR_DISTANCE,
            rest_distance: CAMERA_REST_DISTANCE,
            max_swing_deg: CAMERA_MAX_SWING_DEG,
            fov_deg: CAMERA_FOV_DEG,
            burst: PARTICLE_BURST,
            field: FieldParams::default(),
            icons: ICON_POSITIONS
                .iter()
                .zip(actions)
                .map(|(&position, action)| IconSpec {
                    position,
                    action: action.to_string(),
                })
                .collect(),
            viewport: Viewport::default(),
        }
    }
}

/// What the render collaborator sees each frame.
pub struct FrameView<'a> {
    pub now_ms: f64,
    pub scene: &'a Scene,
    pub pose: &'a CameraPose,
}

/// The rendering collaborator. The engine never manages the backend itself.
pub trait RenderBackend {
    /// Called once, before the first frame.
    fn submit_scene(&mut self, scene: &Scene) -> anyhow::Result<()>;
    /// Called before `render_frame` whenever a ring texture is new or mutated.
    /// An `Err` leaves the texture dirty, so the next frame retries.
    fn upload_ring_texture(&mut self, _ring: usize, _texture: &GlitchTexture) -> anyhow::Result<()> {
        Ok(())
    }
    fn render_frame(&mut self, frame: &FrameView<'_>) -> anyhow::Result<()>;
    /// Release anything tied to a disposed particle.
    fn release_particle(&mut self, _id: ParticleId) {}
}

/// Per-frame outputs for the DOM collaborator.
#[derive(Clone, Debug, Default)]
pub struct FrameOutput {
    pub overlay_opacity: f32,
    pub cursor_transform: String,
    pub hovered: Option<usize>,
    /// Actions confirmed by a click this frame.
    pub actions: SmallVec<[String; 1]>,
}

#[inline]
fn derive_seed(seed: u64, stream: u64) -> u64 {
    seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

pub struct SplashEngine {
    pub scene: Scene,
    pub params: SplashParams,
    scheduler: SceneScheduler,
    reveal: Reveal,
    assets: AssetGate,
    textures: TextureGenerator,
    glitch: GlitchClock,
    controller: Controller,
    last_ms: Option<f64>,
    submitted: bool,
    pose: Option<CameraPose>,
}

impl SplashEngine {
    pub fn new(params: SplashParams) -> Self {
        let icons = params
            .icons
            .iter()
            .map(|i| InteractiveTarget::new(i.position, i.action.clone()))
            .collect();
        let scene = Scene::new(
            params.far_distance,
            params.field.clone(),
            icons,
            derive_seed(params.seed, 1),
        );
        Self {
            scene,
            scheduler: SceneScheduler::new(),
            reveal: Reveal::new(),
            assets: AssetGate::default(),
            textures: TextureGenerator::from_seed(derive_seed(params.seed, 2)),
            glitch: GlitchClock::from_seed(derive_seed(params.seed, 3)),
            controller: Controller::new(params.viewport, params.max_swing_deg, params.fov_deg),
            last_ms: None,
            submitted: false,
            pose: None,
            params,
        }
    }

    pub fn asset_ready(&mut self, asset: Asset) {
        log::info!("[assets] {} ready", asset.name());
        self.assets.mark_ready(asset);
    }

    /// Record a load failure. The reveal will never start; the error is
    /// returned for the caller to surface.
    pub fn asset_failed(&mut self, asset: Asset, reason: impl Into<String>) -> SplashError {
        let err = self.assets.mark_failed(asset, reason);
        log::error!("[assets] {err}");
        err
    }

    pub fn assets(&self) -> &AssetGate {
        &self.assets
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.controller.pointer_moved(x, y);
    }

    pub fn click(&mut self) {
        self.controller.click();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.controller.resize(Viewport { width, height });
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn reveal(&self) -> &Reveal {
        &self.reveal
    }

    pub fn scheduler(&self) -> &SceneScheduler {
        &self.scheduler
    }

    pub fn glitch(&self) -> &GlitchClock {
        &self.glitch
    }

    /// Last camera pose computed by [`frame`](Self::frame).
    pub fn pose(&self) -> Option<&CameraPose> {
        self.pose.as_ref()
    }

    /// Start the reveal if every asset has resolved. `Ok(false)` while waiting.
    pub fn try_start_reveal(&mut self, now_ms: f64) -> Result<bool> {
        if self.reveal.is_started() {
            return Ok(true);
        }
        if !self.assets.is_open()? {
            return Ok(false);
        }
        let mut ctx = RevealContext {
            now: now_ms,
            scene: &mut self.scene,
            scheduler: &mut self.scheduler,
            textures: &mut self.textures,
            glitch: &mut self.glitch,
            far_distance: self.params.far_distance,
            rest_distance: self.params.rest_distance,
            burst: self.params.burst,
        };
        self.reveal.start(&mut ctx)?;
        Ok(true)
    }

    /// Run one frame at `now_ms`. Every subsystem sees this single sample.
    pub fn frame(&mut self, now_ms: f64, backend: &mut dyn RenderBackend) -> FrameOutput {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / TICK_MS).clamp(0.0, MAX_TICKS_PER_FRAME as f64) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);

        if !self.submitted {
            if let Err(e) = backend.submit_scene(&self.scene) {
                log::error!("[frame] scene submit failed: {e:?}");
            }
            self.submitted = true;
        }

        if !self.reveal.is_started() {
            // Failures were already reported through `asset_failed`.
            _ = self.try_start_reveal(now_ms);
        }

        let events = self.scheduler.tick(now_ms, &mut self.scene);
        if !events.is_empty() {
            let mut ctx = RevealContext {
                now: now_ms,
                scene: &mut self.scene,
                scheduler: &mut self.scheduler,
                textures: &mut self.textures,
                glitch: &mut self.glitch,
                far_distance: self.params.far_distance,
                rest_distance: self.params.rest_distance,
                burst: self.params.burst,
            };
            for event in events {
                self.reveal.handle(event, &mut ctx);
            }
        }

        let cf = self
            .controller
            .update(self.scene.camera.distance, &mut self.scene.icons);
        let mut actions = SmallVec::new();
        if let Some(i) = cf.clicked {
            if let Some(target) = self.scene.icons.get(i) {
                log::info!("[pointer] action {}", target.action);
                actions.push(target.action.clone());
            }
        }

        self.scene.spin_rings(dt);

        self.scene.particles.spawn_trial();
        for id in self.scene.particles.advance(dt) {
            self.scheduler.cancel_target(Node::Particle(id));
            backend.release_particle(id);
        }

        self.glitch.poll(now_ms, &mut self.scene, &mut self.textures);
        for ring in self.scene.rings.rings.iter_mut() {
            let Some(tex) = ring.texture.as_mut() else {
                continue;
            };
            if !tex.is_dirty() {
                continue;
            }
            // Stays dirty on failure so the next frame retries.
            match backend.upload_ring_texture(ring.index, tex) {
                Ok(()) => {
                    tex.take_dirty();
                }
                Err(e) => log::warn!("[frame] ring {} texture upload failed: {e:?}", ring.index),
            }
        }

        let view = FrameView {
            now_ms,
            scene: &self.scene,
            pose: &cf.pose,
        };
        if let Err(e) = backend.render_frame(&view) {
            log::error!("[frame] render error: {e:?}");
        }
        self.pose = Some(cf.pose);

        FrameOutput {
            overlay_opacity: self.scene.overlay_opacity,
            cursor_transform: self.controller.cursor().transform(),
            hovered: cf.hovered,
            actions,
        }
    }

    pub fn phase_entered(&self, phase: RevealPhase) -> bool {
        self.reveal.has_entered(phase)
    }
}
