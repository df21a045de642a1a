use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use std::f32::consts::TAU;
use web_sys as web;

/// Pointer position in CSS pixels relative to the canvas' top-left corner.
#[inline]
pub fn pointer_css_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

/// Project a world point into canvas pixels. `None` when the point sits
/// behind the eye.
#[inline]
pub fn project(view_proj: Mat4, world: Vec3, width: f32, height: f32) -> Option<Vec2> {
    let clip = view_proj * Vec4::new(world.x, world.y, world.z, 1.0);
    if clip.w <= 1e-5 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Vec2::new(
        (ndc.x + 1.0) * 0.5 * width,
        (1.0 - ndc.y) * 0.5 * height,
    ))
}

/// Projected centre and on-screen length of a vertical world segment of
/// `world_size` starting at `world`.
#[inline]
pub fn project_sized(
    view_proj: Mat4,
    world: Vec3,
    world_size: f32,
    width: f32,
    height: f32,
) -> Option<(Vec2, f32)> {
    let c = project(view_proj, world, width, height)?;
    let e = project(view_proj, world + Vec3::Y * world_size, width, height)?;
    Some((c, (e - c).length()))
}

/// Point on a ring of `radius` at `angle`, spun about its own axis by `spin`,
/// tilted about X by `tilt` and pushed forward by `z`.
#[inline]
pub fn ring_point(radius: f32, angle: f32, spin: f32, tilt: f32, z: f32) -> Vec3 {
    let a = angle + spin;
    let local = Vec3::new(radius * a.cos(), radius * a.sin(), 0.0);
    Quat::from_rotation_x(tilt) * local + Vec3::Z * z
}

/// Texture row for an angle around the ring. Rows wrap with the angle.
#[inline]
pub fn texel_row(angle: f32, height: usize) -> usize {
    if height == 0 {
        return 0;
    }
    let turn = angle.rem_euclid(TAU) / TAU;
    ((turn * height as f32) as usize).min(height - 1)
}

/// Average colour of one texture row as a CSS `rgb()` string.
pub fn row_color(texels: &[[u8; 4]], width: usize, row: usize) -> String {
    let start = row * width;
    let Some(px) = texels.get(start..start + width) else {
        return "rgb(255,255,255)".to_string();
    };
    let mut sum = [0u32; 3];
    for t in px {
        for c in 0..3 {
            sum[c] += t[c] as u32;
        }
    }
    let n = width.max(1) as u32;
    format!("rgb({},{},{})", sum[0] / n, sum[1] / n, sum[2] / n)
}

/// `mailto:` links replace the page location; everything else opens a tab.
#[inline]
pub fn is_mail_link(action: &str) -> bool {
    action
        .get(..7)
        .is_some_and(|s| s.eq_ignore_ascii_case("mailto:"))
}
