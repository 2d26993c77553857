//! Kinematic body shared by players and bombs
//!
//! Position is the top-left corner of the base box. The collision hitbox is
//! the base box grown by a symmetric padding on each side.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::terrain::GridCoord;
use crate::consts::BLOCK_SIZE;

/// Axis-aligned box in world space (`min` is top-left)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// World-space box of a grid cell
    #[inline]
    pub fn of_cell(coord: GridCoord) -> Self {
        let min = coord.min_corner();
        Self {
            min,
            max: min + Vec2::splat(BLOCK_SIZE),
        }
    }

    /// Strict overlap; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Penetration depth on each axis (the smaller of the two overlap extents)
    #[inline]
    pub fn penetration(&self, other: &Aabb) -> Vec2 {
        Vec2::new(
            (self.max.x - other.min.x).min(other.max.x - self.min.x),
            (self.max.y - other.min.y).min(other.max.y - self.min.y),
        )
    }

    /// Inclusive range of grid cells this box can touch
    pub fn cell_span(&self) -> (GridCoord, GridCoord) {
        (GridCoord::containing(self.min), GridCoord::containing(self.max))
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Position/velocity state with gravity integration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left of the base box
    pub pos: Vec2,
    pub vel: Vec2,
    /// Base box dimensions
    pub size: Vec2,
    /// Hitbox padding per side
    pub padding: Vec2,
    /// Downward acceleration per tick
    pub gravity: f32,
    pub on_ground: bool,
    pub active: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, padding: Vec2, gravity: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            padding,
            gravity,
            on_ground: false,
            active: true,
        }
    }

    /// Collision box (base box expanded by padding)
    #[inline]
    pub fn hitbox(&self) -> Aabb {
        Aabb {
            min: self.pos - self.padding,
            max: self.pos + self.size + self.padding,
        }
    }

    /// Center of the base box
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Airborne bodies accelerate downward; grounded ones hold still
    pub fn apply_gravity(&mut self) {
        if !self.on_ground {
            self.vel.y += self.gravity;
        }
    }

    /// Explicit Euler step; collisions are corrected afterwards
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Move so the hitbox bottom sits at `y`
    pub fn set_hitbox_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y - self.padding.y;
    }

    /// Move so the hitbox top sits at `y`
    pub fn set_hitbox_top(&mut self, y: f32) {
        self.pos.y = y + self.padding.y;
    }

    /// Move so the hitbox right edge sits at `x`
    pub fn set_hitbox_right(&mut self, x: f32) {
        self.pos.x = x - self.size.x - self.padding.x;
    }

    /// Move so the hitbox left edge sits at `x`
    pub fn set_hitbox_left(&mut self, x: f32) {
        self.pos.x = x + self.padding.x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hitbox_includes_padding() {
        let body = Body::new(Vec2::new(100.0, 40.0), Vec2::new(50.0, 50.0), Vec2::new(5.0, 11.0), 0.5);
        let hb = body.hitbox();
        assert_eq!(hb.min, Vec2::new(95.0, 29.0));
        assert_eq!(hb.max, Vec2::new(155.0, 101.0));
        assert_eq!(body.center(), Vec2::new(125.0, 65.0));
    }

    #[test]
    fn test_gravity_only_when_airborne() {
        let mut body = Body::new(Vec2::ZERO, Vec2::splat(10.0), Vec2::ZERO, 0.5);
        body.apply_gravity();
        body.integrate();
        assert_eq!(body.vel.y, 0.5);
        assert_eq!(body.pos.y, 0.5);

        body.on_ground = true;
        body.vel.y = 0.0;
        body.apply_gravity();
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_edge_setters_round_trip() {
        let mut body = Body::new(Vec2::ZERO, Vec2::new(50.0, 50.0), Vec2::new(5.0, 11.0), 0.5);
        body.set_hitbox_bottom(200.0);
        assert_eq!(body.hitbox().max.y, 200.0);
        body.set_hitbox_top(300.0);
        assert_eq!(body.hitbox().min.y, 300.0);
        body.set_hitbox_right(400.0);
        assert_eq!(body.hitbox().max.x, 400.0);
        body.set_hitbox_left(-50.0);
        assert_eq!(body.hitbox().min.x, -50.0);
    }

    #[test]
    fn test_touching_boxes_do_not_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(50.0));
        let b = Aabb::of_cell(GridCoord::new(1, 0));
        assert!(!a.overlaps(&b));

        let c = Aabb::new(Vec2::new(40.0, 45.0), Vec2::new(60.0, 70.0));
        assert!(c.overlaps(&b));
        assert_eq!(c.penetration(&b), Vec2::new(10.0, 5.0));
    }
}
