// Shared tuning constants used by the generation core and the native shell.

// Walker
pub const SPEED_NOISE_CHANNEL: f64 = 1000.0; // decorrelates speed noise from heading noise
pub const MAX_STEP_SPEED: f64 = 0.01;
pub const STRAND_TIME_OFFSET: f64 = 1000.0; // per-line offset into the shared noise field

// Ribbon
pub const LINE_WIDTH: f32 = 0.04;
pub const WIDTH_FLOOR: f32 = 0.1; // strands taper to this, never to zero

// Animation
pub const PROGRESS_PER_FRAME: f32 = 0.005; // at an ideal 60 Hz frame
pub const IDEAL_FRAME_MS: f32 = 1000.0 / 60.0;
pub const SWAY_RATE: f64 = 0.001; // radians of phase per millisecond
pub const SWAY_AMPLITUDE: f32 = 0.1;

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_Z: f32 = 10.0;
pub const CAMERA_ZNEAR: f32 = 0.01;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Auto-fit search
pub const FIT_SCALE_STEP: f32 = 0.05;
pub const FIT_MAX_ATTEMPTS: u32 = 50;
pub const FIT_TOP_MARGIN: f32 = 0.2; // fraction of viewport height the silhouette may reach

// Interaction
pub const ORBIT_DAMPING: f32 = 0.2;

// Backgrounds, selected by the invert flag
pub const BACKGROUND_DARK: [f32; 3] = [0.0, 0.0, 0.0];
pub const BACKGROUND_LIGHT: [f32; 3] = [1.0, 1.0, 1.0];
