use glam::Vec3;

// Shared tuning constants for the splash scene.

// Camera
pub const CAMERA_FAR_DISTANCE: f32 = 40.0; // distance at which the intro starts
pub const CAMERA_REST_DISTANCE: f32 = 12.0; // resting orbit distance
pub const CAMERA_MAX_SWING_DEG: f32 = 5.0; // max orbit swing at the pointer extremes
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Reveal timings (milliseconds)
pub const INTRO_MS: f64 = 400.0;
pub const RING_ROTATE_IN_MS: f64 = 2000.0;
pub const RING_FADE_MS: f64 = 300.0;
pub const SPREAD_MS: f64 = 2000.0;
pub const GRID_FADE_MS: f64 = 1200.0;
pub const BURST_FADE_MS: f64 = 600.0;
pub const BURST_STAGGER_MS: f64 = 25.0;
pub const ICON_FADE_MS: f64 = 800.0;
pub const SCROLL_HINT_PULSE_MS: f64 = 1200.0;
pub const SCROLL_HINT_DIM: f32 = 0.3;

// Idle glitch clock (milliseconds)
pub const GLITCH_DELAY_MIN_MS: f64 = 1000.0;
pub const GLITCH_DELAY_MAX_MS: f64 = 5000.0;

// Rings
pub const RING_COUNT: usize = 3;
/// Steady spin per ring in radians per tick, inner ring first.
pub const RING_SPIN: [f32; RING_COUNT] = [0.012, 0.007, 0.003];
pub const RING_SCALE_BASE: f32 = 1.1; // ring i (1-based) spreads to BASE + STEP * (i - 1)
pub const RING_SCALE_STEP: f32 = 0.1;
pub const RING_POP_DEPTH: f32 = 0.35; // forward pop per nesting index
pub const RING_EDGE_ON_ANGLE: f32 = std::f32::consts::FRAC_PI_2;

// Text
pub const WORD_SPREAD_X: f32 = 6.5; // flanking offset of the word pair

// Glitch texture
pub const TEXTURE_WIDTH: usize = 32; // radial axis, clamped
pub const TEXTURE_HEIGHT: usize = 256; // circumferential axis, wraps
pub const TEXTURE_BASE_COLOR: [u8; 4] = [255, 255, 255, 255];
pub const TEXTURE_ALT_COLOR: [u8; 4] = [255, 40, 90, 255];
pub const CLUMP_COUNT_MIN: usize = 8;
pub const CLUMP_COUNT_MAX: usize = 12;
pub const CLUMP_WIDTH_MIN: usize = 2;
pub const CLUMP_WIDTH_MAX: usize = 6;
pub const CLUMP_HEIGHT_MIN: usize = 12;
pub const CLUMP_HEIGHT_MAX: usize = 48;
pub const CLUMP_FILL_PROBABILITY: f64 = 0.85;

// Particle micro-texture
pub const MICRO_TEXTURE_SIZE: usize = 8;
pub const MICRO_CELL_SIZE: usize = 2;
pub const MICRO_ALPHA: u8 = 110;

// Particle field
pub const FIELD_HALF_WIDTH: f32 = 262.5; // spawn at -W, dispose at +W
pub const FIELD_HALF_HEIGHT: f32 = 60.0;
pub const PARTICLE_Z_NEAR: f32 = -30.0; // depth band, strictly behind the foreground
pub const PARTICLE_Z_FAR: f32 = -80.0;
pub const PARTICLE_SPEED_MIN: f32 = 0.2;
pub const PARTICLE_SPEED_MAX: f32 = 0.6;
pub const PARTICLE_DRIFT_PER_TICK: f32 = 2.0; // world units per unit speed per tick
pub const PARTICLE_SPAWN_PROBABILITY: f64 = 0.02; // per tick, once enabled
pub const PARTICLE_BURST: usize = 40;

// Foreground layer (rings and text) never sits behind this depth.
pub const FOREGROUND_Z_MIN: f32 = 0.0;

// Interaction
pub const HOVER_BLEND: f32 = 0.15; // x += (target - x) * HOVER_BLEND, per frame
pub const HOVER_DEPTH: f32 = 2.0; // forward offset of a hovered target
pub const ICON_PICK_RADIUS: f32 = 0.9;
pub const ICON_VISIBLE_MIN: f32 = 0.05; // targets below this opacity are not hittable
pub const CURSOR_HOVER_ROTATION_DEG: f32 = 45.0;
pub const CURSOR_HOVER_SCALE: f32 = 1.6;

// Default layout for the social icons and scroll hint.
pub const ICON_POSITIONS: [Vec3; 3] = [
    Vec3::new(-2.0, -6.0, 0.5),
    Vec3::new(0.0, -6.0, 0.5),
    Vec3::new(2.0, -6.0, 0.5),
];

// Frame pacing
pub const TICK_MS: f64 = 1000.0 / 60.0;
pub const MAX_TICKS_PER_FRAME: f32 = 4.0; // dt clamp after stalls
