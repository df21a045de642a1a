//! Background particle field.
//!
//! Particles drift left to right across the field and are disposed as soon as
//! they cross the far edge. The pool has no capacity limit: population settles
//! around `spawn probability × crossing time` on its own.

use crate::constants::*;
use crate::error::Result;
use crate::texture::{MicroTexture, TextureGenerator};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

#[derive(Clone, Debug)]
pub struct Particle {
    pub id: ParticleId,
    pub position: Vec3,
    pub speed: f32,
    pub opacity: f32,
    pub texture: MicroTexture,
    origin_x: f32,
    age_ticks: f32,
}

/// Tunables for the pool; `Default` uses the scene constants.
#[derive(Clone, Debug)]
pub struct FieldParams {
    pub half_width: f32,
    pub half_height: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub spawn_probability: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            half_width: FIELD_HALF_WIDTH,
            half_height: FIELD_HALF_HEIGHT,
            z_near: PARTICLE_Z_NEAR,
            z_far: PARTICLE_Z_FAR,
            speed_min: PARTICLE_SPEED_MIN,
            speed_max: PARTICLE_SPEED_MAX,
            spawn_probability: PARTICLE_SPAWN_PROBABILITY,
        }
    }
}

impl FieldParams {
    /// Ticks a particle of `speed` needs to cross the whole field.
    pub fn crossing_ticks(&self, speed: f32) -> f32 {
        2.0 * self.half_width / (speed * PARTICLE_DRIFT_PER_TICK)
    }
}

pub struct ParticlePool<R = StdRng> {
    particles: Vec<Particle>,
    params: FieldParams,
    rng: R,
    textures: TextureGenerator<R>,
    next_id: u64,
    enabled: bool,
}

impl ParticlePool<StdRng> {
    pub fn from_seed(params: FieldParams, seed: u64) -> Self {
        Self::with_rngs(
            params,
            StdRng::seed_from_u64(seed),
            StdRng::seed_from_u64(seed.rotate_left(17) ^ 0xA5A5_5A5A_C3C3_3C3C),
        )
    }
}

impl<R: Rng> ParticlePool<R> {
    /// `rng` drives placement and spawn trials, `texture_rng` the micro-textures.
    pub fn with_rngs(params: FieldParams, rng: R, texture_rng: R) -> Self {
        Self {
            particles: Vec::new(),
            params,
            rng,
            textures: TextureGenerator::with_rng(texture_rng),
            next_id: 0,
            enabled: false,
        }
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    /// Enabled pools are visible and run the per-tick spawn trial.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.iter_mut().find(|p| p.id == id)
    }

    /// Create one particle at `initial_x` (default: the near edge) with a
    /// random height, depth, speed and micro-texture.
    pub fn spawn(&mut self, initial_x: Option<f32>) -> Result<ParticleId> {
        let speed = sample(&mut self.rng, self.params.speed_min, self.params.speed_max);
        self.spawn_with_speed(initial_x, speed)
    }

    /// Same as [`spawn`](Self::spawn) with a fixed speed.
    pub fn spawn_with_speed(&mut self, initial_x: Option<f32>, speed: f32) -> Result<ParticleId> {
        let texture = self.textures.micro_texture()?;
        let p = &self.params;
        let x = initial_x.unwrap_or(-p.half_width);
        let y = sample(&mut self.rng, -p.half_height, p.half_height);
        let z = sample(&mut self.rng, p.z_far, p.z_near);
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        self.particles.push(Particle {
            id,
            position: Vec3::new(x, y, z),
            speed,
            opacity: 1.0,
            texture,
            origin_x: x,
            age_ticks: 0.0,
        });
        Ok(id)
    }

    /// Spawn `count` particles spread evenly across the full width.
    /// Failed spawns are skipped.
    pub fn spawn_burst(&mut self, count: usize) -> Vec<ParticleId> {
        let span = 2.0 * self.params.half_width;
        let mut ids = Vec::with_capacity(count);
        for i in 0..count {
            let x = -self.params.half_width + span * (i as f32 + self.rng.gen::<f32>()) / count as f32;
            match self.spawn(Some(x)) {
                Ok(id) => ids.push(id),
                Err(e) => log::warn!("[particles] burst spawn skipped: {e}"),
            }
        }
        ids
    }

    /// Bernoulli spawn trial for one tick. No-op while disabled.
    pub fn spawn_trial(&mut self) -> Option<ParticleId> {
        // gen_bool panics outside [0, 1]; NaN counts as never.
        let p = self.params.spawn_probability;
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        if !self.enabled || !self.rng.gen_bool(p) {
            return None;
        }
        match self.spawn(None) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("[particles] spawn skipped: {e}");
                None
            }
        }
    }

    /// Advance every particle by `dt` ticks and dispose those past the far
    /// edge. Disposed particles drop their textures here; the returned ids
    /// let the caller release anything else tied to them.
    pub fn advance(&mut self, dt: f32) -> SmallVec<[ParticleId; 4]> {
        let far = self.params.half_width;
        let mut disposed = SmallVec::new();
        self.particles.retain_mut(|p| {
            p.age_ticks += dt;
            p.position.x = p.origin_x + p.speed * PARTICLE_DRIFT_PER_TICK * p.age_ticks;
            if p.position.x >= far {
                disposed.push(p.id);
                false
            } else {
                true
            }
        });
        disposed
    }
}

#[inline]
fn sample<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}
