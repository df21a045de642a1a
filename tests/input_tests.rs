// Host-side tests for pure input and projection helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::{Mat4, Vec2, Vec3};
use input::*;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

fn camera(eye_z: f32) -> Mat4 {
    let proj = Mat4::perspective_rh(75f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, eye_z), Vec3::ZERO, Vec3::Y);
    proj * view
}

#[test]
fn origin_projects_to_canvas_centre() {
    let p = project(camera(12.0), Vec3::ZERO, 1600.0, 900.0).unwrap();
    assert!((p - Vec2::new(800.0, 450.0)).length() < 1e-3);
}

#[test]
fn screen_y_grows_downward() {
    let vp = camera(12.0);
    let up = project(vp, Vec3::new(0.0, 2.0, 0.0), 1600.0, 900.0).unwrap();
    let right = project(vp, Vec3::new(2.0, 0.0, 0.0), 1600.0, 900.0).unwrap();
    assert!(up.y < 450.0);
    assert!(right.x > 800.0);
}

#[test]
fn points_behind_the_eye_are_culled() {
    assert!(project(camera(12.0), Vec3::new(0.0, 0.0, 20.0), 1600.0, 900.0).is_none());
}

#[test]
fn projected_size_shrinks_with_distance() {
    let vp = camera(12.0);
    let (_, near) = project_sized(vp, Vec3::new(0.0, 0.0, 0.0), 1.0, 1600.0, 900.0).unwrap();
    let (_, far) = project_sized(vp, Vec3::new(0.0, 0.0, -60.0), 1.0, 1600.0, 900.0).unwrap();
    assert!(near > far);
    assert!(far > 0.0);
}

#[test]
fn edge_on_ring_collapses_to_a_line() {
    for i in 0..16 {
        let a = i as f32 / 16.0 * TAU;
        let p = ring_point(3.0, a, 0.0, FRAC_PI_2, 0.0);
        assert!(p.y.abs() < 1e-5);
        let face = ring_point(3.0, a, 0.0, 0.0, 0.5);
        assert!((face.truncate().length() - 3.0).abs() < 1e-4);
        assert_eq!(face.z, 0.5);
    }
}

#[test]
fn spin_rotates_the_ring_in_its_own_plane() {
    let a = ring_point(1.0, 0.0, FRAC_PI_2, 0.0, 0.0);
    assert!((a - Vec3::Y).length() < 1e-6);
}

#[test]
fn texel_rows_wrap_with_the_angle() {
    assert_eq!(texel_row(0.0, 256), 0);
    assert_eq!(texel_row(PI, 256), 128);
    assert_eq!(texel_row(TAU, 256), 0);
    assert_eq!(texel_row(-0.001, 256), 255);
    assert_eq!(texel_row(1.0, 0), 0);
}

#[test]
fn row_color_averages_the_band() {
    let texels = [[255, 255, 255, 255], [255, 40, 90, 255], [0, 0, 0, 255], [0, 0, 0, 255]];
    assert_eq!(row_color(&texels, 2, 0), "rgb(255,147,172)");
    assert_eq!(row_color(&texels, 2, 1), "rgb(0,0,0)");
    assert_eq!(row_color(&texels, 2, 5), "rgb(255,255,255)");
}

#[test]
fn mail_links_are_recognised() {
    assert!(is_mail_link("mailto:hello@example.com"));
    assert!(is_mail_link("MAILTO:x@y.z"));
    assert!(!is_mail_link("https://github.com/"));
    assert!(!is_mail_link("mail"));
}
