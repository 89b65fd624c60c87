// Game timing constants
pub const TICK_INTERVAL_MS: u64 = 16;
pub const TICK_SECONDS: f32 = 1.0 / 60.0;

// Logical viewport (portrait, Flappy Bird proportions)
pub const VIEW_WIDTH: f32 = 288.0;
pub const VIEW_HEIGHT: f32 = 512.0;
pub const SCENE_CENTER_X: f32 = 144.0;

// Physics constants. Tuned empirically in the original game; kept verbatim.
pub const GRAVITY_Y: f32 = 300.0;
pub const FLAP_VELOCITY_Y: f32 = -400.0;
pub const DRIFT_VELOCITY_Y: f32 = 120.0;
pub const SCROLL_VELOCITY_X: f32 = -100.0;

// Flap feel: upward impulse overrides drift for a few ticks, bird tilts
// nose-up on flap and drifts nose-down one degree per tick afterwards.
pub const FLAP_GRACE_TICKS: u32 = 5;
pub const FLAP_TILT_DEG: f32 = -15.0;
pub const TILT_STEP_DEG: f32 = 1.0;
pub const MAX_TILT_DEG: f32 = 90.0;

// Obstacle spawning and cleanup
pub const SPAWN_INTERVAL_TICKS: u32 = 130;
pub const PIPE_SPAWN_X: f32 = 288.0;
pub const PIPE_TOP_OFFSET_RANGE: i32 = 120;
pub const PIPE_VERTICAL_GAP: f32 = 420.0;
pub const PIPE_DESPAWN_X: f32 = -50.0;

// Gap sensor sits centered in the opening between a pipe pair
pub const GAP_SENSOR_OFFSET_Y: f32 = 210.0;

// Scene placement
pub const PLAYER_SPAWN_X: f32 = 60.0;
pub const PLAYER_SPAWN_Y: f32 = 265.0;
pub const PLAYER_HITBOX_WIDTH: f32 = 28.0;
pub const PLAYER_HITBOX_HEIGHT: f32 = 20.0;
pub const GROUND_X: f32 = 144.0;
pub const GROUND_Y: f32 = 458.0;
pub const MESSAGE_Y: f32 = 150.0;
pub const GAME_OVER_BANNER_Y: f32 = 206.0;
pub const RESTART_BUTTON_Y: f32 = 300.0;

// Scoreboard layout
pub const SCOREBOARD_Y: f32 = 30.0;
pub const DIGIT_WIDTH: f32 = 25.0;

// Background palette cycle length (one texture per score modulo slot)
pub const BACKGROUND_COUNT: u32 = 8;
