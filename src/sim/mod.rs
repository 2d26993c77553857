//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (per-explosion PCG streams)
//! - Stable iteration order (players by id, cells row-major)
//! - No rendering or platform dependencies

pub mod body;
pub mod bomb;
pub mod camera;
pub mod collision;
pub mod explosion;
pub mod noise;
pub mod player;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod trajectory;

pub use body::{Aabb, Body};
pub use bomb::Bomb;
pub use camera::{Camera, CameraSettings};
pub use collision::{Bounce, Resolution, overlaps_grid, resolve_body, resolve_bomb};
pub use explosion::Explosion;
pub use noise::NoiseField;
pub use player::{Facing, Player};
pub use state::{GameEvent, GameState, RngState, Snapshot};
pub use terrain::{Block, GridCoord, Material, TerrainGrid, TerrainParams};
pub use tick::{ActionState, TickInput, tick};
pub use trajectory::preview;
