use splash_core::constants::*;

#[test]
fn ring_spin_decreases_outward() {
    assert!(RING_SPIN.windows(2).all(|w| w[0] > w[1]));
    assert!(RING_SPIN.iter().all(|s| *s > 0.0));
}

#[test]
fn particle_band_sits_behind_the_foreground() {
    assert!(PARTICLE_Z_FAR < PARTICLE_Z_NEAR);
    assert!(PARTICLE_Z_NEAR < FOREGROUND_Z_MIN);
}

#[test]
fn ranges_are_ordered() {
    assert!(CLUMP_COUNT_MIN <= CLUMP_COUNT_MAX);
    assert!(CLUMP_WIDTH_MIN <= CLUMP_WIDTH_MAX && CLUMP_WIDTH_MAX <= TEXTURE_WIDTH);
    assert!(CLUMP_HEIGHT_MIN <= CLUMP_HEIGHT_MAX && CLUMP_HEIGHT_MAX <= TEXTURE_HEIGHT);
    assert!(PARTICLE_SPEED_MIN < PARTICLE_SPEED_MAX);
    assert!(GLITCH_DELAY_MIN_MS < GLITCH_DELAY_MAX_MS);
    assert!((0.0..=1.0).contains(&CLUMP_FILL_PROBABILITY));
    assert!((0.0..=1.0).contains(&PARTICLE_SPAWN_PROBABILITY));
}

#[test]
fn camera_approaches_from_afar() {
    assert!(CAMERA_FAR_DISTANCE > CAMERA_REST_DISTANCE);
    assert!(CAMERA_REST_DISTANCE > CAMERA_ZNEAR);
    assert!(HOVER_BLEND > 0.0 && HOVER_BLEND < 1.0);
    assert!(HOVER_DEPTH < CAMERA_REST_DISTANCE);
}

#[test]
fn micro_texture_tiles_evenly() {
    assert_eq!(MICRO_TEXTURE_SIZE % MICRO_CELL_SIZE, 0);
}
