//! Fixed-timestep simulation tick
//!
//! Order per tick: player input, player physics and bombs (per player, in id
//! order), explosion resolution, camera. Explosions are resolved after every
//! body has moved, so all bodies see the same terrain during a tick.

use serde::{Deserialize, Serialize};

use super::bomb::Bomb;
use super::player::{Detonation, Throw};
use super::state::{GameEvent, GameState};

/// Logical actions held by one player this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionState {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub throw_bomb: bool,
}

/// Input for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Held actions indexed by player id; missing entries mean nothing held
    pub actions: Vec<ActionState>,
}

impl TickInput {
    pub fn new(actions: Vec<ActionState>) -> Self {
        Self { actions }
    }

    pub fn actions_for(&self, player: u32) -> ActionState {
        self.actions.get(player as usize).copied().unwrap_or_default()
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;
    let mut detonations = Vec::new();

    for i in 0..state.players.len() {
        let actions = input.actions_for(state.players[i].id);
        if let Some(throw) = state.players[i].handle_input(&actions) {
            spawn_bomb(state, i, throw);
        }

        let player = &mut state.players[i];
        let was_grounded = player.body.on_ground;
        let result = player.step(&state.grid);
        if result.landed && !was_grounded {
            log::debug!("Player {} landed at {:?}", player.id, player.body.pos);
            state.events.push(GameEvent::PlayerLanded { player: player.id });
        }

        detonations.extend(player.update_bombs(&state.grid));
    }

    for detonation in detonations {
        resolve_detonation(state, detonation);
    }

    let centers = state.player_centers();
    state.camera.update(&centers);
}

fn spawn_bomb(state: &mut GameState, index: usize, throw: Throw) {
    let id = state.next_entity_id();
    let player = &mut state.players[index];
    player
        .bombs
        .push(Bomb::new(id, player.id, throw.origin, throw.velocity));
    log::debug!(
        "Player {} threw bomb {} at charge {:.2}",
        player.id,
        id,
        throw.charge_ratio
    );
    let owner = player.id;
    state.events.push(GameEvent::BombThrown {
        player: owner,
        bomb: id,
        origin: throw.origin,
        velocity: throw.velocity,
    });
}

/// Apply an explosion's terrain destruction and splash damage
fn resolve_detonation(state: &mut GameState, detonation: Detonation) {
    let Detonation {
        bomb_id,
        owner,
        explosion,
    } = detonation;

    log::info!(
        "Bomb {} (player {}) exploded at ({:.1}, {:.1})",
        bomb_id,
        owner,
        explosion.origin.x,
        explosion.origin.y
    );
    state.events.push(GameEvent::Explosion {
        bomb: bomb_id,
        owner,
        origin: explosion.origin,
        size: explosion.size,
    });

    let mut rng = state.rng_state.next_stream();
    let destroyed = explosion.destroy_terrain(&mut state.grid, &mut rng);
    if !destroyed.is_empty() {
        log::debug!("Bomb {} destroyed {} blocks", bomb_id, destroyed.len());
        state.events.push(GameEvent::BlocksDestroyed {
            bomb: bomb_id,
            cells: destroyed,
        });
    }

    for player in &mut state.players {
        if player.id == owner && !state.self_damage {
            continue;
        }
        let amount = player.apply_damage(explosion.damage_at(player.center()));
        if amount == 0 {
            continue;
        }
        log::info!("Player {} took {} damage ({} left)", player.id, amount, player.health);
        state.events.push(GameEvent::PlayerDamaged {
            player: player.id,
            amount,
            health: player.health,
        });
    }
}
