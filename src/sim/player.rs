//! Player bodies: walking, jumping, charging and throwing bombs

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::bomb::Bomb;
use super::collision::{Resolution, resolve_body};
use super::explosion::Explosion;
use super::terrain::TerrainGrid;
use super::tick::ActionState;
use super::trajectory;
use crate::consts::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// A released throw, before the bomb is given an id
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throw {
    pub origin: Vec2,
    pub velocity: Vec2,
    pub charge_ratio: f32,
}

/// A bomb whose fuse ran out this tick
#[derive(Debug, Clone, PartialEq)]
pub struct Detonation {
    pub bomb_id: u32,
    pub owner: u32,
    pub explosion: Explosion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub body: Body,
    pub facing: Facing,
    pub is_jumping: bool,
    /// 0..=PLAYER_MAX_HEALTH
    pub health: u32,
    /// Live bombs, including ones still playing their explosion
    pub bombs: Vec<Bomb>,
    pub bomb_cooldown: u32,
    pub is_charging: bool,
    /// Held ticks, capped at MAX_CHARGE_TICKS
    pub charge_time: u32,
    /// Cached preview while charging; empty otherwise
    pub trajectory: Vec<Vec2>,
}

impl Player {
    /// Create a player with its base box top-left at `pos`
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            body: Body::new(
                pos,
                Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
                Vec2::new(PLAYER_PADDING_X, PLAYER_PADDING_Y),
                PLAYER_GRAVITY,
            ),
            facing: Facing::default(),
            is_jumping: false,
            health: PLAYER_MAX_HEALTH,
            bombs: Vec::new(),
            bomb_cooldown: 0,
            is_charging: false,
            charge_time: 0,
            trajectory: Vec::new(),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Current charge as a fraction of the maximum
    pub fn charge_ratio(&self) -> f32 {
        self.charge_time as f32 / MAX_CHARGE_TICKS as f32
    }

    /// Where a thrown bomb starts (chest height)
    pub fn throw_origin(&self) -> Vec2 {
        self.body.pos + Vec2::new(self.body.size.x / 2.0, self.body.size.y / 4.0)
    }

    /// Apply one tick of held actions; returns a throw on release
    pub fn handle_input(&mut self, actions: &ActionState) -> Option<Throw> {
        let vel = &mut self.body.vel;
        if actions.move_left {
            vel.x -= MOVE_ACCEL;
            self.facing = Facing::Left;
        } else if actions.move_right {
            vel.x += MOVE_ACCEL;
            self.facing = Facing::Right;
        } else {
            vel.x *= FRICTION;
        }

        vel.x = vel.x.clamp(-MAX_SPEED, MAX_SPEED);
        if vel.x.abs() < STOP_EPSILON {
            vel.x = 0.0;
        }

        if actions.jump && self.body.on_ground && !self.is_jumping {
            self.body.vel.y = JUMP_IMPULSE;
            self.is_jumping = true;
            self.body.on_ground = false;
        }

        let mut thrown = None;
        if actions.throw_bomb && self.bomb_cooldown == 0 && !self.is_charging {
            self.is_charging = true;
            self.charge_time = 0;
        } else if actions.throw_bomb && self.is_charging {
            self.charge_time = (self.charge_time + 1).min(MAX_CHARGE_TICKS);
            self.trajectory = self.preview();
        } else if !actions.throw_bomb && self.is_charging {
            thrown = Some(self.release());
            self.is_charging = false;
            self.charge_time = 0;
            self.trajectory.clear();
        } else if !self.is_charging {
            self.trajectory.clear();
        }

        if self.bomb_cooldown > 0 && !self.is_charging {
            self.bomb_cooldown -= 1;
        }

        thrown
    }

    /// Preview of a throw at the current charge
    pub fn preview(&self) -> Vec<Vec2> {
        trajectory::preview(
            self.throw_origin(),
            self.facing,
            self.charge_ratio(),
            self.body.pos.y + self.body.size.y * 2.0,
        )
    }

    fn release(&mut self) -> Throw {
        let charge_ratio = self.charge_ratio();
        self.bomb_cooldown = THROW_COOLDOWN_TICKS;
        Throw {
            origin: self.throw_origin(),
            velocity: trajectory::launch_velocity(self.facing, charge_ratio),
            charge_ratio,
        }
    }

    /// Gravity, integration, and collision for the player body
    pub fn step(&mut self, grid: &TerrainGrid) -> Resolution {
        self.body.apply_gravity();
        self.body.integrate();
        let result = resolve_body(&mut self.body, grid);
        if self.body.on_ground {
            self.is_jumping = false;
        }
        result
    }

    /// Advance owned bombs; drops finished ones after the pass
    pub fn update_bombs(&mut self, grid: &TerrainGrid) -> Vec<Detonation> {
        let owner = self.id;
        let detonations = self
            .bombs
            .iter_mut()
            .filter_map(|bomb| {
                bomb.update(grid).map(|explosion| Detonation {
                    bomb_id: bomb.id,
                    owner,
                    explosion,
                })
            })
            .collect();
        self.bombs.retain(Bomb::is_active);
        detonations
    }

    /// Subtract health, flooring at zero; returns the amount actually lost
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_sub(amount);
        before - self.health
    }
}
