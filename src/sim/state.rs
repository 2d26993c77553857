//! Match state: terrain, players, camera, and the outgoing event queue

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::noise::NoiseField;
use super::player::Player;
use super::terrain::{GridCoord, Material, TerrainGrid, TerrainParams};
use crate::consts::BLOCK_SIZE;
use crate::session::SessionRegistry;
use crate::{Settings, SimError};

/// RNG state wrapper for serialization
///
/// Each explosion draws from its own PCG stream, numbered in trigger order,
/// so craters depend only on the match seed and the explosion sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Generator for the next explosion
    pub fn next_stream(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Fire-and-forget notifications for renderer and audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BombThrown {
        player: u32,
        bomb: u32,
        origin: Vec2,
        velocity: Vec2,
    },
    Explosion {
        bomb: u32,
        owner: u32,
        origin: Vec2,
        size: f32,
    },
    BlocksDestroyed {
        bomb: u32,
        cells: Vec<GridCoord>,
    },
    PlayerDamaged {
        player: u32,
        amount: u32,
        health: u32,
    },
    PlayerLanded {
        player: u32,
    },
}

/// Read-only view handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub players: Vec<Player>,
    /// Occupied cells, row-major
    pub cells: Vec<(GridCoord, Material)>,
    pub camera: Camera,
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Terrain seed; also seeds explosion streams
    pub seed: u64,
    pub rng_state: RngState,
    /// Ticks since the match started
    pub time_ticks: u64,
    pub params: TerrainParams,
    pub grid: TerrainGrid,
    /// Players ordered by id (id = slot)
    pub players: Vec<Player>,
    pub camera: Camera,
    /// Whether a thrower is hurt by their own bombs
    pub self_damage: bool,
    /// Pending events; drained by the frontend
    pub events: Vec<GameEvent>,
    /// Next bomb id
    next_id: u32,
}

impl GameState {
    /// Start a match with one player per configured spawn position
    pub fn new(settings: &Settings) -> Result<Self, SimError> {
        let slots: Vec<usize> = (0..settings.spawn_xs.len()).collect();
        Self::with_slots(settings, &slots)
    }

    /// Start a match with one player per connected session
    pub fn from_sessions(settings: &Settings, sessions: &SessionRegistry) -> Result<Self, SimError> {
        let slots: Vec<usize> = sessions.connected().map(|session| session.slot).collect();
        Self::with_slots(settings, &slots)
    }

    fn with_slots(settings: &Settings, slots: &[usize]) -> Result<Self, SimError> {
        settings.validate()?;
        if slots.is_empty() {
            return Err(SimError::NoPlayers);
        }

        let noise = NoiseField::generate(settings.seed);
        let params = settings.terrain.clone();
        let grid = TerrainGrid::generate(&noise, &params);

        let mut players = Vec::with_capacity(slots.len());
        for &slot in slots {
            let x = *settings
                .spawn_xs
                .get(slot)
                .ok_or(SimError::InvalidSettings("player slot has no spawn position"))?;
            let column = (x / BLOCK_SIZE).floor() as i32;
            let y = grid.spawn_y(column, &params);
            log::info!("Player {} spawns at ({}, {}) over column {}", slot, x, y, column);
            players.push(Player::new(slot as u32, Vec2::new(x, y)));
        }
        players.sort_by_key(|p| p.id);

        let centers: Vec<Vec2> = players.iter().map(Player::center).collect();
        let camera = Camera::new(&centers, settings.viewport, settings.camera.clone())?;

        log::info!(
            "Match started: seed={} players={} self_damage={}",
            settings.seed,
            players.len(),
            settings.self_damage
        );

        Ok(Self {
            seed: settings.seed,
            rng_state: RngState::new(settings.seed),
            time_ticks: 0,
            params,
            grid,
            players,
            camera,
            self_damage: settings.self_damage,
            events: Vec::new(),
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Centers of all players, in id order
    pub fn player_centers(&self) -> Vec<Vec2> {
        self.players.iter().map(Player::center).collect()
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            players: self.players.clone(),
            cells: self.grid.sorted_cells(),
            camera: self.camera.clone(),
        }
    }
}
