//! Owned scene state mutated by tweens, the controller and the frame loop.

use crate::constants::*;
use crate::particles::{FieldParams, ParticleId, ParticlePool};
use crate::texture::GlitchTexture;
use crate::tween::{Animatable, Scheduler};
use glam::Vec3;
use smallvec::SmallVec;

/// Addressable scene nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    Camera,
    Overlay,
    Title,
    /// Word pair flanking the rings, 0 = left, 1 = right.
    Word(usize),
    RingGroup,
    Ring(usize),
    Grid,
    Particle(ParticleId),
    ScrollHint,
    Icon(usize),
}

/// Animatable properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prop {
    Distance,
    Opacity,
    RotationX,
    Scale,
    Z,
    Spin,
    OffsetX,
}

/// Begin/complete cues attached to tweens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    PhaseDone(crate::reveal::RevealPhase),
}

pub type SceneScheduler = Scheduler<Node, Prop, Cue>;

#[derive(Clone, Debug)]
pub struct CameraState {
    pub distance: f32,
}

#[derive(Clone, Debug)]
pub struct Ring {
    pub index: usize,
    /// Angle around the ring's own axis, integrated from `spin`.
    pub rotation: f32,
    /// Radians per tick.
    pub spin: f32,
    pub scale: f32,
    pub z: f32,
    /// `None` while the ring still uses the shared material.
    pub texture: Option<GlitchTexture>,
}

#[derive(Clone, Debug)]
pub struct RingGroup {
    pub rotation_x: f32,
    pub opacity: f32,
    pub rings: SmallVec<[Ring; RING_COUNT]>,
}

#[derive(Clone, Debug)]
pub struct TextState {
    pub opacity: f32,
    pub word_offsets: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct Grid {
    pub visible: bool,
    pub opacity: f32,
}

/// Hoverable surface bound to an external action.
#[derive(Clone, Debug)]
pub struct InteractiveTarget {
    pub position: Vec3,
    pub action: String,
    pub depth_offset: f32,
    pub opacity: f32,
}

impl InteractiveTarget {
    pub fn new(position: Vec3, action: impl Into<String>) -> Self {
        Self {
            position,
            action: action.into(),
            depth_offset: 0.0,
            opacity: 0.0,
        }
    }

    /// Position including the hover depth offset.
    pub fn world_position(&self) -> Vec3 {
        self.position + Vec3::Z * self.depth_offset
    }
}

pub struct Scene {
    pub camera: CameraState,
    pub overlay_opacity: f32,
    pub text: TextState,
    pub rings: RingGroup,
    pub grid: Grid,
    pub particles: ParticlePool,
    pub scroll_hint_opacity: f32,
    pub icons: Vec<InteractiveTarget>,
}

impl Scene {
    /// Pre-reveal state: camera far away, overlay opaque, everything else hidden.
    pub fn new(
        far_distance: f32,
        field: FieldParams,
        icons: Vec<InteractiveTarget>,
        particle_seed: u64,
    ) -> Self {
        let rings = (0..RING_COUNT)
            .map(|index| Ring {
                index,
                rotation: 0.0,
                spin: 0.0,
                scale: 1.0,
                z: 0.0,
                texture: None,
            })
            .collect();
        Self {
            camera: CameraState {
                distance: far_distance,
            },
            overlay_opacity: 1.0,
            text: TextState {
                opacity: 0.0,
                word_offsets: [0.0, 0.0],
            },
            rings: RingGroup {
                rotation_x: RING_EDGE_ON_ANGLE,
                opacity: 0.0,
                rings,
            },
            grid: Grid::default(),
            particles: ParticlePool::from_seed(field, particle_seed),
            scroll_hint_opacity: 0.0,
            icons,
        }
    }

    /// Integrate ring rotation from the current spin speeds.
    pub fn spin_rings(&mut self, dt_ticks: f32) {
        for ring in self.rings.rings.iter_mut().filter(|r| r.spin != 0.0) {
            ring.rotation = (ring.rotation + ring.spin * dt_ticks) % std::f32::consts::TAU;
        }
    }

    pub fn ring_nodes(&self) -> impl Iterator<Item = Node> {
        (0..self.rings.rings.len()).map(Node::Ring)
    }

    pub fn icon_nodes(&self) -> impl Iterator<Item = Node> {
        (0..self.icons.len()).map(Node::Icon)
    }

    fn slot(&mut self, node: Node, prop: Prop) -> Option<&mut f32> {
        Some(match (node, prop) {
            (Node::Camera, Prop::Distance) => &mut self.camera.distance,
            (Node::Overlay, Prop::Opacity) => &mut self.overlay_opacity,
            (Node::Title, Prop::Opacity) => &mut self.text.opacity,
            (Node::Word(i), Prop::OffsetX) => self.text.word_offsets.get_mut(i)?,
            (Node::RingGroup, Prop::RotationX) => &mut self.rings.rotation_x,
            (Node::RingGroup, Prop::Opacity) => &mut self.rings.opacity,
            (Node::Ring(i), prop) => {
                let ring = self.rings.rings.get_mut(i)?;
                match prop {
                    Prop::Scale => &mut ring.scale,
                    Prop::Z => &mut ring.z,
                    Prop::Spin => &mut ring.spin,
                    _ => return None,
                }
            }
            (Node::Grid, Prop::Opacity) => &mut self.grid.opacity,
            (Node::Particle(id), Prop::Opacity) => &mut self.particles.get_mut(id)?.opacity,
            (Node::ScrollHint, Prop::Opacity) => &mut self.scroll_hint_opacity,
            (Node::Icon(i), Prop::Opacity) => &mut self.icons.get_mut(i)?.opacity,
            _ => return None,
        })
    }
}

impl Animatable for Scene {
    type Target = Node;
    type Property = Prop;

    fn get(&self, target: Node, property: Prop) -> Option<f32> {
        match (target, property) {
            (Node::Camera, Prop::Distance) => Some(self.camera.distance),
            (Node::Overlay, Prop::Opacity) => Some(self.overlay_opacity),
            (Node::Title, Prop::Opacity) => Some(self.text.opacity),
            (Node::Word(i), Prop::OffsetX) => self.text.word_offsets.get(i).copied(),
            (Node::RingGroup, Prop::RotationX) => Some(self.rings.rotation_x),
            (Node::RingGroup, Prop::Opacity) => Some(self.rings.opacity),
            (Node::Ring(i), prop) => {
                let ring = self.rings.rings.get(i)?;
                match prop {
                    Prop::Scale => Some(ring.scale),
                    Prop::Z => Some(ring.z),
                    Prop::Spin => Some(ring.spin),
                    _ => None,
                }
            }
            (Node::Grid, Prop::Opacity) => Some(self.grid.opacity),
            (Node::Particle(id), Prop::Opacity) => self.particles.get(id).map(|p| p.opacity),
            (Node::ScrollHint, Prop::Opacity) => Some(self.scroll_hint_opacity),
            (Node::Icon(i), Prop::Opacity) => self.icons.get(i).map(|t| t.opacity),
            _ => None,
        }
    }

    fn set(&mut self, target: Node, property: Prop, value: f32) -> bool {
        match self.slot(target, property) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}
