use glam::{Vec2, Vec3};
use splash_core::constants::*;
use splash_core::{
    normalize_pointer, orbit_eye, ray_sphere, smooth_toward, Controller, CursorState,
    InteractiveTarget, Viewport,
};

fn viewport() -> Viewport {
    Viewport {
        width: 800.0,
        height: 600.0,
    }
}

fn visible_target(position: Vec3) -> InteractiveTarget {
    let mut t = InteractiveTarget::new(position, "https://example.com/");
    t.opacity = 1.0;
    t
}

#[test]
fn pointer_normalizes_to_unit_square_with_y_up() {
    let vp = viewport();
    assert_eq!(normalize_pointer(Vec2::new(0.0, 0.0), vp), Vec2::new(-1.0, 1.0));
    assert_eq!(normalize_pointer(Vec2::new(800.0, 600.0), vp), Vec2::new(1.0, -1.0));
    assert_eq!(normalize_pointer(Vec2::new(400.0, 300.0), vp), Vec2::ZERO);
    assert_eq!(normalize_pointer(Vec2::new(-50.0, 900.0), vp), Vec2::new(-1.0, -1.0));
}

#[test]
fn orbit_eye_swings_with_the_pointer() {
    let max = CAMERA_MAX_SWING_DEG.to_radians();
    let centered = orbit_eye(12.0, Vec2::ZERO, max);
    assert!((centered - Vec3::new(0.0, 0.0, 12.0)).length() < 1e-5);

    let right = orbit_eye(12.0, Vec2::new(1.0, 0.0), max);
    assert!((right.x - 12.0 * max.sin()).abs() < 1e-5);
    assert!(right.y.abs() < 1e-6);

    let up = orbit_eye(12.0, Vec2::new(0.0, 1.0), max);
    assert!(up.y > 0.0);
    assert!(up.z < 12.0);
}

#[test]
fn hover_smoothing_converges_from_below() {
    let mut x = 0.0_f32;
    let mut prev = x;
    for _ in 0..10 {
        let expected = x + (2.0 - x) * 0.15;
        x = smooth_toward(x, 2.0, 0.15);
        assert_eq!(x, expected);
        assert!(x > prev);
        assert!(x < 2.0);
        prev = x;
    }
}

#[test]
fn ray_sphere_hits_in_front_only() {
    let hit = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 1.0);
    assert!((hit.unwrap() - 4.0).abs() < 1e-5);
    assert!(ray_sphere(Vec3::ZERO, -Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 1.0).is_none());
    assert!(ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 5.0), 1.0).is_none());
}

#[test]
fn hovered_target_moves_forward_like_the_recurrence() {
    let mut ctl = Controller::new(viewport(), CAMERA_MAX_SWING_DEG, CAMERA_FOV_DEG);
    ctl.pointer_moved(400.0, 300.0);
    let mut targets = vec![visible_target(Vec3::ZERO)];

    let mut expected = 0.0_f32;
    for _ in 0..10 {
        let frame = ctl.update(CAMERA_REST_DISTANCE, &mut targets);
        assert_eq!(frame.hovered, Some(0));
        expected += (HOVER_DEPTH - expected) * HOVER_BLEND;
        assert!((targets[0].depth_offset - expected).abs() < 1e-6);
        assert!(targets[0].depth_offset < HOVER_DEPTH);
    }
    assert!(ctl.cursor().scale > 1.0);
    assert!(ctl.cursor().rotation_deg > 0.0);
}

#[test]
fn missed_targets_relax_back_to_zero() {
    let mut ctl = Controller::new(viewport(), CAMERA_MAX_SWING_DEG, CAMERA_FOV_DEG);
    ctl.pointer_moved(0.0, 0.0);
    let mut targets = vec![visible_target(Vec3::ZERO)];
    targets[0].depth_offset = 1.0;
    for _ in 0..5 {
        let frame = ctl.update(CAMERA_REST_DISTANCE, &mut targets);
        assert_eq!(frame.hovered, None);
    }
    assert!(targets[0].depth_offset < 1.0 && targets[0].depth_offset > 0.0);
}

#[test]
fn hidden_targets_are_not_hittable() {
    let mut ctl = Controller::new(viewport(), CAMERA_MAX_SWING_DEG, CAMERA_FOV_DEG);
    ctl.pointer_moved(400.0, 300.0);
    let mut targets = vec![InteractiveTarget::new(Vec3::ZERO, "x")];
    assert_eq!(ctl.update(CAMERA_REST_DISTANCE, &mut targets).hovered, None);
}

#[test]
fn nearest_target_wins() {
    let mut ctl = Controller::new(viewport(), CAMERA_MAX_SWING_DEG, CAMERA_FOV_DEG);
    ctl.pointer_moved(400.0, 300.0);
    let mut targets = vec![
        visible_target(Vec3::new(0.0, 0.0, -3.0)),
        visible_target(Vec3::new(0.0, 0.0, 3.0)),
    ];
    assert_eq!(ctl.update(CAMERA_REST_DISTANCE, &mut targets).hovered, Some(1));
}

#[test]
fn click_fires_once_per_click_and_only_on_hit() {
    let mut ctl = Controller::new(viewport(), CAMERA_MAX_SWING_DEG, CAMERA_FOV_DEG);
    let mut targets = vec![visible_target(Vec3::ZERO)];

    ctl.pointer_moved(400.0, 300.0);
    ctl.click();
    assert_eq!(ctl.update(CAMERA_REST_DISTANCE, &mut targets).clicked, Some(0));
    assert_eq!(ctl.update(CAMERA_REST_DISTANCE, &mut targets).clicked, None);

    // A click over empty space is dropped, not carried to a later hover.
    ctl.pointer_moved(0.0, 0.0);
    ctl.click();
    assert_eq!(ctl.update(CAMERA_REST_DISTANCE, &mut targets).clicked, None);
    ctl.pointer_moved(400.0, 300.0);
    assert_eq!(ctl.update(CAMERA_REST_DISTANCE, &mut targets).clicked, None);
}

#[test]
fn camera_follows_the_current_distance() {
    let mut ctl = Controller::new(viewport(), CAMERA_MAX_SWING_DEG, CAMERA_FOV_DEG);
    ctl.pointer_moved(400.0, 300.0);
    let mut targets = Vec::new();
    let far = ctl.update(CAMERA_FAR_DISTANCE, &mut targets).pose;
    let near = ctl.update(CAMERA_REST_DISTANCE, &mut targets).pose;
    assert!((far.eye.length() - CAMERA_FAR_DISTANCE).abs() < 1e-4);
    assert!((near.eye.length() - CAMERA_REST_DISTANCE).abs() < 1e-4);
}

#[test]
fn cursor_transform_uses_css_syntax() {
    let cursor = CursorState {
        x: 10.0,
        y: 20.0,
        rotation_deg: 45.0,
        scale: 1.6,
    };
    assert_eq!(
        cursor.transform(),
        "translate(10.0px, 20.0px) rotate(45.00deg) scale(1.600)"
    );
    assert_eq!(
        CursorState::default().transform(),
        "translate(0.0px, 0.0px) rotate(0.00deg) scale(1.000)"
    );
}

#[test]
fn projection_maps_the_origin_to_the_viewport_centre() {
    let mut ctl = Controller::new(viewport(), CAMERA_MAX_SWING_DEG, CAMERA_FOV_DEG);
    ctl.pointer_moved(400.0, 300.0);
    let pose = ctl.update(CAMERA_REST_DISTANCE, &mut []).pose;

    let centre = pose.project(Vec3::ZERO, 800.0, 600.0).expect("origin in view");
    assert!((centre - Vec2::new(400.0, 300.0)).length() < 1e-3);

    // Up in the world is up on screen; pixel y grows downward.
    let above = pose.project(Vec3::Y, 800.0, 600.0).expect("in view");
    assert!(above.y < centre.y);

    let behind = pose.eye + (pose.eye - pose.target).normalize() * 5.0;
    assert_eq!(pose.project(behind, 800.0, 600.0), None);
}

#[test]
fn projected_point_picks_back_to_the_same_target() {
    let mut ctl = Controller::new(viewport(), CAMERA_MAX_SWING_DEG, CAMERA_FOV_DEG);
    let mut targets = vec![visible_target(Vec3::new(2.0, -1.0, 0.0))];
    let mut frame = ctl.update(CAMERA_REST_DISTANCE, &mut targets);
    assert_eq!(frame.hovered, None);

    // The pointer swings the eye, so aim again from each new pose.
    for _ in 0..10 {
        let px = frame
            .pose
            .project(targets[0].world_position(), 800.0, 600.0)
            .expect("in view");
        ctl.pointer_moved(px.x, px.y);
        frame = ctl.update(CAMERA_REST_DISTANCE, &mut targets);
    }
    assert_eq!(frame.hovered, Some(0));
}
