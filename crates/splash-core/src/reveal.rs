//! Multi-phase reveal choreography.
//!
//! Phases are gated on the completion of their predecessor, never on absolute
//! timestamps. [`PHASE_TABLE`] lists each phase with the phase it waits for;
//! [`Reveal`] enters phases as gate tweens complete.

use crate::constants::*;
use crate::easing::Easing;
use crate::error::{Result, SplashError};
use crate::scene::{Cue, Node, Prop, Scene, SceneScheduler};
use crate::texture::TextureGenerator;
use crate::tween::{TweenEvent, TweenSpec};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealPhase {
    /// Camera approach, overlay fade out, title fade in.
    Intro,
    /// Ring group turns from edge-on to face-on.
    RotateIn,
    /// Rings scale, pop and spin up; the word pair slides apart.
    Spread,
    /// Glitch textures, grid and particle burst.
    Background,
    /// Scroll hint and social icons.
    Icons,
    /// Scroll-hint pulse and the glitch clock. Never completes.
    Idle,
}

impl RevealPhase {
    pub const COUNT: usize = 6;

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PhaseStep {
    pub phase: RevealPhase,
    pub after: Option<RevealPhase>,
}

pub const PHASE_TABLE: [PhaseStep; RevealPhase::COUNT] = [
    PhaseStep { phase: RevealPhase::Intro, after: None },
    PhaseStep { phase: RevealPhase::RotateIn, after: Some(RevealPhase::Intro) },
    PhaseStep { phase: RevealPhase::Spread, after: Some(RevealPhase::RotateIn) },
    PhaseStep { phase: RevealPhase::Background, after: Some(RevealPhase::RotateIn) },
    PhaseStep { phase: RevealPhase::Icons, after: Some(RevealPhase::Background) },
    PhaseStep { phase: RevealPhase::Idle, after: Some(RevealPhase::Icons) },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Asset {
    Font,
    IconImage,
}

impl Asset {
    pub fn name(self) -> &'static str {
        match self {
            Asset::Font => "font",
            Asset::IconImage => "icon-image",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum AssetState {
    #[default]
    Pending,
    Ready,
    Failed(String),
}

/// Tracks the assets the reveal depends on.
#[derive(Clone, Debug, Default)]
pub struct AssetGate {
    font: AssetState,
    icon_image: AssetState,
}

impl AssetGate {
    fn state_mut(&mut self, asset: Asset) -> &mut AssetState {
        match asset {
            Asset::Font => &mut self.font,
            Asset::IconImage => &mut self.icon_image,
        }
    }

    pub fn mark_ready(&mut self, asset: Asset) {
        *self.state_mut(asset) = AssetState::Ready;
    }

    pub fn mark_failed(&mut self, asset: Asset, reason: impl Into<String>) -> SplashError {
        let reason = reason.into();
        *self.state_mut(asset) = AssetState::Failed(reason.clone());
        SplashError::AssetLoad {
            asset: asset.name().to_string(),
            reason,
        }
    }

    /// `Ok(true)` once every asset resolved, `Ok(false)` while any is pending,
    /// `Err` if any failed.
    pub fn is_open(&self) -> Result<bool> {
        for (asset, state) in [(Asset::Font, &self.font), (Asset::IconImage, &self.icon_image)] {
            if let AssetState::Failed(reason) = state {
                return Err(SplashError::AssetLoad {
                    asset: asset.name().to_string(),
                    reason: reason.clone(),
                });
            }
        }
        Ok(self.font == AssetState::Ready && self.icon_image == AssetState::Ready)
    }
}

/// Single recurring timer that mutates a random ring's texture.
pub struct GlitchClock<R = StdRng> {
    rng: R,
    next_at: Option<f64>,
}

impl GlitchClock<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GlitchClock<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, next_at: None }
    }

    /// Arm the timer unless it is already armed.
    pub fn arm(&mut self, now: f64) {
        if self.next_at.is_none() {
            self.next_at = Some(now + self.next_delay());
        }
    }

    pub fn next_at(&self) -> Option<f64> {
        self.next_at
    }

    fn next_delay(&mut self) -> f64 {
        self.rng.gen_range(GLITCH_DELAY_MIN_MS..=GLITCH_DELAY_MAX_MS)
    }

    /// Fire if due: mutate one textured ring and re-arm. Returns the ring index.
    pub fn poll<G: Rng>(
        &mut self,
        now: f64,
        scene: &mut Scene,
        textures: &mut TextureGenerator<G>,
    ) -> Option<usize> {
        let due = self.next_at?;
        if now < due {
            return None;
        }
        self.next_at = Some(now + self.next_delay());
        let textured: Vec<usize> = scene
            .rings
            .rings
            .iter()
            .filter(|r| r.texture.is_some())
            .map(|r| r.index)
            .collect();
        if textured.is_empty() {
            return None;
        }
        let pick = textured[self.rng.gen_range(0..textured.len())];
        let tex = scene.rings.rings[pick].texture.as_mut()?;
        let clump = textures.mutate(tex);
        log::debug!("[glitch] ring {} rows {}+{}", pick, clump.y0, clump.rows);
        Some(pick)
    }
}

/// Everything a phase needs while it is being entered.
pub struct RevealContext<'a> {
    pub now: f64,
    pub scene: &'a mut Scene,
    pub scheduler: &'a mut SceneScheduler,
    pub textures: &'a mut TextureGenerator,
    pub glitch: &'a mut GlitchClock,
    pub far_distance: f32,
    pub rest_distance: f32,
    pub burst: usize,
}

/// Phase state machine.
#[derive(Debug, Default)]
pub struct Reveal {
    entered: [bool; RevealPhase::COUNT],
    completed: [bool; RevealPhase::COUNT],
}

impl Reveal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.entered.iter().any(|e| *e)
    }

    pub fn has_entered(&self, phase: RevealPhase) -> bool {
        self.entered[phase.slot()]
    }

    pub fn has_completed(&self, phase: RevealPhase) -> bool {
        self.completed[phase.slot()]
    }

    /// Enter every phase without a predecessor.
    pub fn start(&mut self, ctx: &mut RevealContext<'_>) -> Result<()> {
        if self.is_started() {
            return Err(SplashError::RevealAlreadyStarted);
        }
        let roots = PHASE_TABLE
            .iter()
            .filter(|s| s.after.is_none())
            .map(|s| s.phase)
            .collect();
        self.run(roots, ctx);
        Ok(())
    }

    /// Feed a scheduler event; enters successor phases on completion.
    pub fn handle(&mut self, event: TweenEvent<Cue>, ctx: &mut RevealContext<'_>) {
        if let TweenEvent::Completed {
            cue: Cue::PhaseDone(phase),
            ..
        } = event
        {
            let next = self.complete(phase);
            self.run(next, ctx);
        }
    }

    fn complete(&mut self, phase: RevealPhase) -> VecDeque<RevealPhase> {
        if std::mem::replace(&mut self.completed[phase.slot()], true) {
            return VecDeque::new();
        }
        log::info!("[reveal] {:?} complete", phase);
        PHASE_TABLE
            .iter()
            .filter(|s| s.after == Some(phase))
            .map(|s| s.phase)
            .collect()
    }

    fn run(&mut self, mut queue: VecDeque<RevealPhase>, ctx: &mut RevealContext<'_>) {
        while let Some(phase) = queue.pop_front() {
            if std::mem::replace(&mut self.entered[phase.slot()], true) {
                continue;
            }
            log::info!("[reveal] entering {:?} at {:.0}ms", phase, ctx.now);
            match enter(phase, ctx) {
                Ok(true) => {}
                Ok(false) => queue.extend(self.complete(phase)),
                Err(e) => {
                    log::error!("[reveal] {:?} could not be scheduled: {e}", phase);
                    queue.extend(self.complete(phase));
                }
            }
        }
    }
}

/// Schedule a phase's tweens and side effects. `Ok(true)` when the phase
/// stays open on a gate tween, `Ok(false)` when it has nothing to wait for.
fn enter(phase: RevealPhase, ctx: &mut RevealContext<'_>) -> Result<bool> {
    let now = ctx.now;
    let done = Cue::PhaseDone(phase);
    let gate = match phase {
        RevealPhase::Intro => {
            ctx.scheduler
                .schedule(now, TweenSpec::to([Node::Overlay], Prop::Opacity, 0.0, INTRO_MS))?;
            ctx.scheduler.schedule(
                now,
                TweenSpec::to([Node::Title], Prop::Opacity, 1.0, INTRO_MS).easing(Easing::OutQuad),
            )?;
            ctx.scheduler.schedule(
                now,
                TweenSpec::to([Node::Camera], Prop::Distance, ctx.rest_distance, INTRO_MS)
                    .from(ctx.far_distance)
                    .easing(Easing::OutExpo)
                    .on_complete(done),
            )?
        }
        RevealPhase::RotateIn => {
            ctx.scheduler.schedule(
                now,
                TweenSpec::to([Node::RingGroup], Prop::Opacity, 1.0, RING_FADE_MS),
            )?;
            ctx.scheduler.schedule(
                now,
                TweenSpec::to([Node::RingGroup], Prop::RotationX, 0.0, RING_ROTATE_IN_MS)
                    .from(RING_EDGE_ON_ANGLE)
                    .easing(Easing::InOutCubic)
                    .on_complete(done),
            )?
        }
        RevealPhase::Spread => {
            let spread_scale = |node: Node, _: usize| -> f32 {
                // ring_index is the 1-based ring number minus one.
                RING_SCALE_BASE + RING_SCALE_STEP * ring_index(node) as f32
            };
            let pop_depth = |node: Node, _: usize| -> f32 { RING_POP_DEPTH * ring_index(node) as f32 };
            let steady_spin = |node: Node, _: usize| -> f32 {
                RING_SPIN.get(ring_index(node)).copied().unwrap_or(0.0)
            };
            let word_x = |_: Node, i: usize| -> f32 {
                if i == 0 {
                    -WORD_SPREAD_X
                } else {
                    WORD_SPREAD_X
                }
            };

            // The innermost ring keeps its size.
            let outer: Vec<Node> = ctx.scene.ring_nodes().skip(1).collect();
            ctx.scheduler.schedule(
                now,
                TweenSpec::per_index(outer, Prop::Scale, &spread_scale, SPREAD_MS)
                    .easing(Easing::OutExpo),
            )?;
            ctx.scheduler.schedule(
                now,
                TweenSpec::per_index(ctx.scene.ring_nodes(), Prop::Z, &pop_depth, SPREAD_MS)
                    .easing(Easing::OutBack),
            )?;
            ctx.scheduler.schedule(
                now,
                TweenSpec::per_index([Node::Word(0), Node::Word(1)], Prop::OffsetX, &word_x, SPREAD_MS)
                    .easing(Easing::OutExpo),
            )?;
            ctx.scheduler.schedule(
                now,
                TweenSpec::per_index(ctx.scene.ring_nodes(), Prop::Spin, &steady_spin, SPREAD_MS)
                    .easing(Easing::InOutQuad)
                    .on_complete(done),
            )?
        }
        RevealPhase::Background => {
            for ring in ctx.scene.rings.rings.iter_mut() {
                match ctx.textures.generate(true) {
                    Ok(tex) => {
                        log::info!("[glitch] ring {} textured, {} clumps", ring.index, tex.clumps().len());
                        ring.texture = Some(tex);
                    }
                    Err(e) => log::warn!("[glitch] ring {} keeps shared material: {e}", ring.index),
                }
            }
            ctx.scene.grid.visible = true;
            ctx.scheduler.schedule(
                now,
                TweenSpec::to([Node::Grid], Prop::Opacity, 1.0, GRID_FADE_MS).from(0.0),
            )?;

            ctx.scene.particles.set_enabled(true);
            let burst = ctx.scene.particles.spawn_burst(ctx.burst);
            for &id in &burst {
                if let Some(p) = ctx.scene.particles.get_mut(id) {
                    p.opacity = 0.0;
                }
            }
            log::info!("[particles] burst of {}", burst.len());
            let stagger = |_: Node, i: usize| -> f32 { i as f32 * BURST_STAGGER_MS as f32 };
            ctx.scheduler.schedule(
                now,
                TweenSpec::to(burst.into_iter().map(Node::Particle), Prop::Opacity, 1.0, BURST_FADE_MS)
                    .stagger(&stagger)
                    .on_complete(done),
            )?
        }
        RevealPhase::Icons => {
            let targets: Vec<Node> = std::iter::once(Node::ScrollHint)
                .chain(ctx.scene.icon_nodes())
                .collect();
            ctx.scheduler.schedule(
                now,
                TweenSpec::to(targets, Prop::Opacity, 1.0, ICON_FADE_MS)
                    .easing(Easing::OutQuad)
                    .on_complete(done),
            )?
        }
        RevealPhase::Idle => {
            ctx.glitch.arm(now);
            // The pulse never completes, which keeps Idle open for good.
            ctx.scheduler.schedule(
                now,
                TweenSpec::to([Node::ScrollHint], Prop::Opacity, SCROLL_HINT_DIM, SCROLL_HINT_PULSE_MS)
                    .from(1.0)
                    .easing(Easing::InOutQuad)
                    .alternate_forever(),
            )?
        }
    };
    Ok(gate.is_some())
}

#[inline]
fn ring_index(node: Node) -> usize {
    match node {
        Node::Ring(i) => i,
        _ => 0,
    }
}
