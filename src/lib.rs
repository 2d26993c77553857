//! Terra Blast - two-player side-view artillery sandbox
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, physics, explosions, camera)
//! - `input`: Key bindings mapped to logical per-player actions
//! - `session`: Connection registry that hands out player slots
//! - `settings`: Match configuration loaded from JSON

pub mod error;
pub mod input;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Edge length of one terrain block in world units
    pub const BLOCK_SIZE: f32 = 50.0;

    /// Player body
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Hitbox padding per side (60 x 72 hitbox for a 50 x 50 body)
    pub const PLAYER_PADDING_X: f32 = 5.0;
    pub const PLAYER_PADDING_Y: f32 = 11.0;
    pub const PLAYER_MAX_HEALTH: u32 = 100;

    /// Player movement (per tick, 60 Hz)
    pub const PLAYER_GRAVITY: f32 = 0.5;
    pub const JUMP_IMPULSE: f32 = -12.0;
    pub const MOVE_ACCEL: f32 = 0.8;
    pub const MAX_SPEED: f32 = 7.0;
    /// Multiplicative damping when no horizontal input is held
    pub const FRICTION: f32 = 0.9;
    /// Horizontal speeds below this snap to zero
    pub const STOP_EPSILON: f32 = 0.1;

    /// Bomb charging
    pub const MAX_CHARGE_TICKS: u32 = 90;
    pub const MIN_THROW_STRENGTH: f32 = 4.0;
    pub const MAX_THROW_STRENGTH: f32 = 12.0;
    pub const THROW_COOLDOWN_TICKS: u32 = 30;

    /// Bomb flight
    pub const BOMB_RADIUS: f32 = 8.0;
    pub const BOMB_GRAVITY: f32 = 0.3;
    pub const BOMB_LAUNCH_VY: f32 = -5.0;
    pub const BOMB_FUSE_TICKS: u32 = 120;
    pub const BOMB_BOUNCE: f32 = 0.6;
    pub const BOMB_GROUND_FRICTION: f32 = 0.8;
    /// Vertical bounce speeds below this settle to zero
    pub const BOMB_REST_SPEED: f32 = 0.5;

    /// Explosion
    pub const EXPLOSION_BASE_RADIUS: f32 = 100.0;
    pub const EXPLOSION_BASE_DAMAGE: f32 = 40.0;
    pub const DAMAGE_RADIUS_FACTOR: f32 = 1.2;
    pub const EXPLOSION_EFFECT_TICKS: u32 = 60;

    /// Trajectory preview sampling
    pub const PREVIEW_SAMPLE_EVERY: u32 = 3;
    pub const PREVIEW_MAX_STEPS: u32 = 60;

    /// Spawn clearance above the surface block
    pub const SPAWN_CLEARANCE: f32 = 100.0;
}

/// Linear interpolation from `a` to `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
