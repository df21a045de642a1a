//! Timed sequencing and procedural state for the splash scene.
//!
//! Everything here is platform-free: the web and native front-ends feed the
//! engine a clock sample, pointer input and asset results each frame and
//! hand it a [`RenderBackend`](engine::RenderBackend) to draw with.

pub mod constants;
pub mod controller;
pub mod easing;
pub mod engine;
pub mod error;
pub mod particles;
pub mod reveal;
pub mod scene;
pub mod texture;
pub mod tween;

pub use controller::*;
pub use easing::Easing;
pub use engine::*;
pub use error::{Result, SplashError};
pub use particles::{FieldParams, Particle, ParticleId, ParticlePool};
pub use reveal::{Asset, AssetGate, GlitchClock, Reveal, RevealPhase, PHASE_TABLE};
pub use scene::*;
pub use texture::{Clump, GlitchTexture, MicroTexture, TextureGenerator};
pub use tween::{Animatable, Scheduler, TweenEvent, TweenHandle, TweenSpec, ValueSpec};
