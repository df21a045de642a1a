//! Pointer-driven camera orbit, hover picking and cursor smoothing.

use crate::constants::*;
use crate::scene::InteractiveTarget;
use glam::{Mat4, Vec2, Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Map a pixel position to [-1, 1] on both axes, y pointing up.
#[inline]
pub fn normalize_pointer(px: Vec2, viewport: Viewport) -> Vec2 {
    let w = viewport.width.max(1.0);
    let h = viewport.height.max(1.0);
    Vec2::new(
        ((px.x / w) * 2.0 - 1.0).clamp(-1.0, 1.0),
        (1.0 - (px.y / h) * 2.0).clamp(-1.0, 1.0),
    )
}

/// Eye position on a sphere of radius `distance`, swung by up to `max_swing`
/// radians: yaw from the horizontal pointer axis, pitch from the vertical.
#[inline]
pub fn orbit_eye(distance: f32, ndc: Vec2, max_swing: f32) -> Vec3 {
    let yaw = ndc.x * max_swing;
    let pitch = ndc.y * max_swing;
    Vec3::new(
        distance * yaw.sin(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    )
}

/// One step of exponential smoothing toward `target`.
#[inline]
pub fn smooth_toward(current: f32, target: f32, blend: f32) -> f32 {
    current + (target - current) * blend
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Camera placement for one frame.
#[derive(Clone, Copy, Debug)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fovy_radians: f32,
    pub aspect: f32,
}

impl CameraPose {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, CAMERA_ZNEAR, CAMERA_ZFAR)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray from the eye through a normalized device position.
    pub fn ray_through(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        (self.eye, (p1 - self.eye).normalize())
    }

    /// Pixel position (y down) of a world point in a `width`×`height`
    /// viewport, or `None` when it sits behind the eye.
    pub fn project(&self, world: Vec3, width: f32, height: f32) -> Option<Vec2> {
        let clip = self.view_proj() * world.extend(1.0);
        if clip.w <= 1e-5 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * width,
            (1.0 - ndc.y) * 0.5 * height,
        ))
    }
}

/// Smoothed cursor indicator state, in CSS pixels and degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorState {
    pub x: f32,
    pub y: f32,
    pub rotation_deg: f32,
    pub scale: f32,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation_deg: 0.0,
            scale: 1.0,
        }
    }
}

impl CursorState {
    /// CSS transform for the cursor element.
    pub fn transform(&self) -> String {
        format!(
            "translate({:.1}px, {:.1}px) rotate({:.2}deg) scale({:.3})",
            self.x, self.y, self.rotation_deg, self.scale
        )
    }
}

/// Result of one controller update.
#[derive(Clone, Debug)]
pub struct ControllerFrame {
    pub pose: CameraPose,
    pub hovered: Option<usize>,
    /// Index of the target whose action fires this frame.
    pub clicked: Option<usize>,
}

pub struct Controller {
    viewport: Viewport,
    pointer_px: Vec2,
    click_pending: bool,
    max_swing: f32,
    fovy: f32,
    cursor: CursorState,
    hovered: Option<usize>,
}

impl Controller {
    pub fn new(viewport: Viewport, max_swing_deg: f32, fov_deg: f32) -> Self {
        Self {
            viewport,
            pointer_px: Vec2::new(viewport.width * 0.5, viewport.height * 0.5),
            click_pending: false,
            max_swing: max_swing_deg.to_radians(),
            fovy: fov_deg.to_radians(),
            cursor: CursorState::default(),
            hovered: None,
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer_px = Vec2::new(x, y);
    }

    /// Latch a click; it is resolved against the hover state on the next update.
    pub fn click(&mut self) {
        self.click_pending = true;
    }

    pub fn ndc(&self) -> Vec2 {
        normalize_pointer(self.pointer_px, self.viewport)
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Place the camera at `distance`, pick against `targets` and smooth the
    /// hover feedback. Called once per frame.
    pub fn update(&mut self, distance: f32, targets: &mut [InteractiveTarget]) -> ControllerFrame {
        let ndc = self.ndc();
        let pose = CameraPose {
            eye: orbit_eye(distance, ndc, self.max_swing),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy_radians: self.fovy,
            aspect: self.viewport.aspect(),
        };

        let (ro, rd) = pose.ray_through(ndc);
        let mut best = None::<(usize, f32)>;
        for (i, target) in targets.iter().enumerate() {
            if target.opacity < ICON_VISIBLE_MIN {
                continue;
            }
            if let Some(t) = ray_sphere(ro, rd, target.world_position(), ICON_PICK_RADIUS) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((i, t)),
                }
            }
        }
        let hovered = best.map(|(i, _)| i);

        for (i, target) in targets.iter_mut().enumerate() {
            let goal = if hovered == Some(i) { HOVER_DEPTH } else { 0.0 };
            target.depth_offset = smooth_toward(target.depth_offset, goal, HOVER_BLEND);
        }

        let (rot_goal, scale_goal) = if hovered.is_some() {
            (CURSOR_HOVER_ROTATION_DEG, CURSOR_HOVER_SCALE)
        } else {
            (0.0, 1.0)
        };
        self.cursor.x = self.pointer_px.x;
        self.cursor.y = self.pointer_px.y;
        self.cursor.rotation_deg = smooth_toward(self.cursor.rotation_deg, rot_goal, HOVER_BLEND);
        self.cursor.scale = smooth_toward(self.cursor.scale, scale_goal, HOVER_BLEND);

        if hovered != self.hovered {
            log::debug!("[pointer] hover {:?} -> {:?}", self.hovered, hovered);
        }
        self.hovered = hovered;

        let clicked = if std::mem::take(&mut self.click_pending) {
            hovered
        } else {
            None
        };

        ControllerFrame {
            pose,
            hovered,
            clicked,
        }
    }
}
