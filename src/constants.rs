// --- World Constants ---
pub const WORLD_WIDTH: f64 = 288.0;
pub const WORLD_HEIGHT: f64 = 512.0;
pub const GROUND_LEVEL: f64 = 96.0;

// --- Player ---
pub const GRAVITY: f64 = -600.0; // Units per second squared
pub const FLAP_IMPULSE: f64 = 260.0;
pub const PLAYER_SIZE: f64 = 32.0;
pub const PLAYER_START_X: f64 = 20.0;
pub const PLAYER_START_Y: f64 = 350.0;
pub const PLAYER_CEILING_MARGIN: f64 = 24.0;
pub const PLAYER_FRAME_INTERVAL: f64 = 0.12; // Seconds per flap frame

// --- Pipes ---
pub const PIPE_WIDTH: f64 = 52.0;
pub const PIPE_GAP: f64 = 120.0;
pub const PIPE_GAP_MARGIN: f64 = 150.0; // Gap centre stays this far from floor and ceiling
pub const PIPE_TOP_LIFT: f64 = 14.0;

// --- Flyer ---
pub const FLYER_SCALE: f64 = 0.7; // Relative to pipe width
pub const FLYER_HITBOX_SCALE: f64 = 0.75;
pub const FLYER_WAVE_FREQUENCY: f64 = 3.0;
pub const FLYER_WAVE_AMPLITUDE: f64 = 40.0;
pub const FLYER_FRAME_RATE: f64 = 10.0; // Frames per second

pub const INITIAL_OBSTACLE_X: [f64; 3] = [350.0, 550.0, 750.0]; // Pipe, pipe, flyer

// --- Frame Loop ---
pub const FRAME_DT: f64 = 1.0 / 30.0;
pub const MAX_FRAME_DT: f64 = 0.05;
pub const INPUT_POLL_MILLIS: u64 = 33;

pub const DEBUG_WIDTH: u16 = 80;
pub const DEBUG_HEIGHT: u16 = 24;
