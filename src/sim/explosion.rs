//! Explosions: probabilistic terrain destruction and falloff damage
//!
//! Destruction draws from a caller-supplied generator, so a seeded stream
//! makes the carved crater reproducible.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::terrain::{GridCoord, TerrainGrid};
use crate::consts::*;

/// Probability that a cell `distance` from the origin is destroyed
///
/// Linear falloff: 1 at the origin, 0 at and beyond `radius`.
#[inline]
pub fn destruction_chance(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 || distance >= radius {
        return 0.0;
    }
    1.0 - distance / radius
}

/// Damage dealt at `distance` from the origin
///
/// `round(max_damage * (1 - distance / damage_radius))`, zero outside the
/// radius and for a degenerate radius.
pub fn falloff_damage(distance: f32, damage_radius: f32, max_damage: f32) -> u32 {
    if damage_radius <= 0.0 || distance >= damage_radius {
        return 0;
    }
    let factor = (1.0 - distance / damage_radius).max(0.0);
    (max_damage * factor).round().max(0.0) as u32
}

/// A triggered bomb's blast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub origin: Vec2,
    /// Size multiplier applied to the base radius and damage
    pub size: f32,
    /// Terrain destruction radius
    pub radius: f32,
    /// Player damage radius
    pub damage_radius: f32,
    /// Damage at the origin
    pub max_damage: f32,
    /// Ticks left in the visual effect
    pub ticks_remaining: u32,
}

impl Explosion {
    pub fn new(origin: Vec2, size: f32) -> Self {
        let radius = EXPLOSION_BASE_RADIUS * size;
        Self {
            origin,
            size,
            radius,
            damage_radius: radius * DAMAGE_RADIUS_FACTOR,
            max_damage: EXPLOSION_BASE_DAMAGE * size,
            ticks_remaining: EXPLOSION_EFFECT_TICKS,
        }
    }

    /// Remove blocks around the origin; returns the destroyed cells in
    /// row-major order
    ///
    /// Every occupied cell in the bounding square whose center lies inside
    /// the radius consumes exactly one draw from `rng`.
    pub fn destroy_terrain(&self, grid: &mut TerrainGrid, rng: &mut impl Rng) -> Vec<GridCoord> {
        let mut destroyed = Vec::new();
        if self.radius <= 0.0 {
            return destroyed;
        }

        let center = GridCoord::containing(self.origin);
        let reach = (self.radius / BLOCK_SIZE).ceil() as i32;

        for gy in center.y - reach..=center.y + reach {
            for gx in center.x - reach..=center.x + reach {
                let coord = GridCoord::new(gx, gy);
                if !grid.is_solid(coord) {
                    continue;
                }
                let distance = coord.center().distance(self.origin);
                if distance >= self.radius {
                    continue;
                }
                if rng.random::<f32>() < destruction_chance(distance, self.radius) {
                    grid.remove(coord);
                    destroyed.push(coord);
                }
            }
        }

        destroyed
    }

    /// Damage to a body whose center is at `target`
    pub fn damage_at(&self, target: Vec2) -> u32 {
        falloff_damage(target.distance(self.origin), self.damage_radius, self.max_damage)
    }

    /// Advance the effect by one tick; false once it has played out
    pub fn advance(&mut self) -> bool {
        self.ticks_remaining = self.ticks_remaining.saturating_sub(1);
        self.ticks_remaining > 0
    }
}
