use splash_core::constants::TICK_MS;
use splash_core::{
    Asset, FrameView, ParticleId, RenderBackend, RevealPhase, Scene, SplashEngine,
    SplashParams, PHASE_TABLE,
};

/// Render backend that only reports what it would draw.
#[derive(Default)]
struct LogBackend {
    frames: u64,
    released: u64,
}

impl RenderBackend for LogBackend {
    fn submit_scene(&mut self, scene: &Scene) -> anyhow::Result<()> {
        log::info!(
            "[render] scene: {} rings, {} icons",
            scene.rings.rings.len(),
            scene.icons.len()
        );
        Ok(())
    }

    fn render_frame(&mut self, frame: &FrameView<'_>) -> anyhow::Result<()> {
        self.frames += 1;
        // Once a second is plenty for a console.
        if self.frames % 60 == 0 {
            let s = frame.scene;
            log::info!(
                "[render] t={:.0}ms camera={:.2} rings={:.2} particles={} grid={:.2}",
                frame.now_ms,
                s.camera.distance,
                s.rings.opacity,
                s.particles.len(),
                s.grid.opacity
            );
        }
        Ok(())
    }

    fn release_particle(&mut self, _id: ParticleId) {
        self.released += 1;
    }
}

fn parse_args() -> anyhow::Result<(f64, u64)> {
    let mut args = std::env::args().skip(1);
    let seconds = match args.next() {
        Some(s) => s.parse::<f64>()?,
        None => 12.0,
    };
    let seed = match args.next() {
        Some(s) => s.parse::<u64>()?,
        None => 42,
    };
    if !(seconds.is_finite() && seconds > 0.0) {
        anyhow::bail!("duration must be positive, got {seconds}");
    }
    Ok((seconds, seed))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (seconds, seed) = parse_args()?;
    let params = SplashParams {
        seed,
        ..SplashParams::default()
    };
    let (w, h) = (params.viewport.width, params.viewport.height);
    log::info!("[native] running {seconds}s with seed {seed}");

    let mut engine = SplashEngine::new(params);
    let mut backend = LogBackend::default();
    engine.asset_ready(Asset::Font);
    engine.asset_ready(Asset::IconImage);

    let mut seen = [false; RevealPhase::COUNT];
    let mut aim_frames = 0u32;
    let mut clicked = false;
    let end_ms = seconds * 1000.0;
    let mut now = 0.0;

    while now <= end_ms {
        let icons_in = engine.reveal().has_completed(RevealPhase::Icons);
        if icons_in && !clicked {
            // Settle on the first icon for a few frames, then click it.
            let first_icon = engine.scene.icons.first().map(|i| i.world_position());
            let aim = engine
                .pose()
                .zip(first_icon)
                .and_then(|(pose, icon)| pose.project(icon, w, h));
            if let Some(px) = aim {
                engine.pointer_moved(px.x, px.y);
            }
            aim_frames += 1;
            if aim_frames == 10 {
                engine.click();
                clicked = true;
            }
        } else {
            let a = (now / 4000.0) as f32 * std::f32::consts::TAU;
            engine.pointer_moved(w * (0.5 + 0.35 * a.cos()), h * (0.5 + 0.35 * a.sin()));
        }

        let out = engine.frame(now, &mut backend);
        for action in &out.actions {
            log::info!("[native] would open {action}");
        }

        for step in PHASE_TABLE.iter() {
            let slot = &mut seen[step.phase as usize];
            if !*slot && engine.phase_entered(step.phase) {
                *slot = true;
                log::info!("[native] {:?} entered at {:.0}ms", step.phase, now);
            }
        }
        now += TICK_MS;
    }

    log::info!(
        "[native] done: {} frames, {} particles live, {} released",
        backend.frames,
        engine.scene.particles.len(),
        backend.released
    );
    Ok(())
}
