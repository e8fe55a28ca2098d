use std::ops::{Range, RangeInclusive};

// --- Physics ---
pub const GRAVITY: f64 = 200.0; // World units per second squared, +y is down

// --- Rocket ---
pub const ROCKET_BASE_RADIUS: f64 = 3.0;
pub const ROCKET_MIN_RADIUS: f64 = 1.0;
pub const ROCKET_RADIUS_GROWTH: f64 = 5.0; // Added as the rocket slows towards its apex
pub const ROCKET_RADIUS_SPEED: f64 = 300.0; // Upward speed at which the rocket is smallest
pub const ROCKET_SPAWN_MARGIN: f64 = 100.0;
pub const ROCKET_VELOCITY_X_RANGE: RangeInclusive<i32> = -100..=100;
pub const ROCKET_VELOCITY_Y_RANGE: RangeInclusive<i32> = -500..=-300;

// --- Explosion ---
pub const PARTICLE_COUNT_RANGE: RangeInclusive<usize> = 5..=70;
pub const PARTICLE_SPEED_RANGE: RangeInclusive<u32> = 100..=350;
pub const RESPAWN_WAVES_RANGE: RangeInclusive<usize> = 1..=4;
pub const RESPAWN_INTERVAL_RANGE: Range<f64> = 0.005..0.03; // Seconds between waves
pub const PARTICLE_LIFE_RANGE: Range<f64> = 0.5..1.3;
pub const PARTICLE_RADIUS_RANGE: Range<f64> = 2.0..6.0;
pub const SMALL_WAVE_THRESHOLD: usize = 10;
pub const SMALL_WAVE_RADIUS_BOOST: Range<f64> = 1.0..1.5;
pub const WHITE_BLEND: f64 = 0.3;
pub const END_HUE_OFFSET: f64 = 0.2;

// --- Glow marker ---
pub const GLOW_FADE_SECONDS: f64 = 0.75;
pub const GLOW_MAX_ALPHA: f64 = 100.0;
pub const GLOW_SCALE: f64 = 1.1;
pub const GLOW_TEXTURE_SIZE: f64 = 512.0; // Diameter of the glow at scale 1.0

// --- Launch scheduling ---
pub const LAUNCH_INTERVAL_MIN: f64 = 0.03;
pub const LAUNCH_INTERVAL_MAX: f64 = 0.45;
pub const LAUNCH_INTERVAL_DRIFT_SECONDS: f64 = 1.0; // Time to glide between two random targets
pub const COLOR_CYCLE_SECONDS: f64 = 20.0;
pub const COLOR_CYCLE_OFFSET: f64 = 0.5;
pub const HUE_JITTER: f64 = 0.1;

// --- Frame loop ---
pub const WORLD_HEIGHT: f64 = 950.0; // Viewport height in world units, width follows the terminal
pub const MAX_FRAME_DELTA: f64 = 0.1;
pub const DEBUG_FRAME_DELTA: f64 = 1.0 / 60.0;
pub const FRAME_POLL_MILLIS: u64 = 16;
pub const DEBUG_WIDTH: u16 = 80;
pub const DEBUG_HEIGHT: u16 = 24;
pub const LOG_FILE: &str = "fireworks.log";
