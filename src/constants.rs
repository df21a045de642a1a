/// Page wiring and Canvas 2D drawing constants for the browser front-end.
///
/// World-space sizes share units with the scene layout in `splash_core`.
use glam::Vec3;

// DOM element ids
pub const CANVAS_ID: &str = "splash-canvas";
pub const OVERLAY_ID: &str = "splash-overlay";
pub const CURSOR_ID: &str = "splash-cursor";
pub const ERROR_ID: &str = "splash-error";

// Assets the reveal waits for
pub const FONT_URL: &str = "assets/font.json";
pub const ICON_SHEET_URL: &str = "assets/icons.png";
pub const FALLBACK_FONT_FAMILY: &str = "sans-serif";

// Text
pub const TITLE_TEXT: &str = "HELLO";
pub const WORDS: [&str; 2] = ["CREATIVE", "DEVELOPER"];
pub const TITLE_SIZE: f32 = 1.4; // world units, cap height
pub const WORD_SIZE: f32 = 0.7;
pub const SCROLL_HINT_TEXT: &str = "scroll";
pub const SCROLL_HINT_POS: Vec3 = Vec3::new(0.0, -8.5, 0.5);
pub const SCROLL_HINT_SIZE: f32 = 0.45;

// Rings
pub const RING_RADIUS: f32 = 3.2; // before per-ring scale
pub const RING_SEGMENTS: usize = 96;
pub const RING_LINE_WIDTH_PX: f64 = 5.0;
pub const RING_PLAIN_COLOR: &str = "#f4f4f4";

// Background
pub const BACKGROUND_COLOR: &str = "#05060a";
pub const GRID_Z: f32 = -45.0; // grid plane, inside the particle depth band
pub const GRID_HALF_EXTENT: f32 = 160.0;
pub const GRID_STEP: f32 = 16.0;
pub const GRID_ALPHA: f64 = 0.18;
pub const GRID_COLOR: &str = "#5a6ea0";

// Sprites
pub const PARTICLE_SIZE: f32 = 1.8; // world units
pub const ICON_SIZE: f32 = 1.1;

// Hover class toggled on the cursor element
pub const CURSOR_HOVER_CLASS: &str = "hover";
