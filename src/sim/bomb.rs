//! Thrown bombs: ballistic flight, bounce, fuse, and explosion effect

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::{Bounce, resolve_bomb};
use super::explosion::Explosion;
use super::terrain::TerrainGrid;
use crate::consts::*;

/// A bomb owned by a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bomb {
    pub id: u32,
    /// Id of the throwing player
    pub owner: u32,
    pub body: Body,
    pub radius: f32,
    /// Explosion size multiplier
    pub size: f32,
    /// Ticks until the fuse runs out
    pub ttl: u32,
    /// Set on the trigger tick; the bomb lingers until the effect ends
    pub explosion: Option<Explosion>,
}

impl Bomb {
    /// Spawn a bomb centered on `center` with launch velocity `vel`
    pub fn new(id: u32, owner: u32, center: Vec2, vel: Vec2) -> Self {
        let mut body = Body::new(
            center - Vec2::splat(BOMB_RADIUS),
            Vec2::splat(BOMB_RADIUS * 2.0),
            Vec2::ZERO,
            BOMB_GRAVITY,
        );
        body.vel = vel;
        Self {
            id,
            owner,
            body,
            radius: BOMB_RADIUS,
            size: 1.0,
            ttl: BOMB_FUSE_TICKS,
            explosion: None,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    #[inline]
    pub fn is_exploding(&self) -> bool {
        self.explosion.is_some()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.body.active
    }

    /// Advance one tick
    ///
    /// Returns the explosion on the tick the fuse runs out; that is the only
    /// tick on which its physical effects should be applied.
    pub fn update(&mut self, grid: &TerrainGrid) -> Option<Explosion> {
        if let Some(explosion) = &mut self.explosion {
            if !explosion.advance() {
                self.body.active = false;
            }
            return None;
        }

        self.body.apply_gravity();
        self.body.integrate();

        self.ttl = self.ttl.saturating_sub(1);
        if self.ttl == 0 {
            return Some(self.detonate());
        }

        if resolve_bomb(&mut self.body, grid) != Bounce::None {
            log::trace!("bomb {} bounced at {:?}", self.id, self.center());
        }
        None
    }

    /// Trigger the explosion at the current center
    pub fn detonate(&mut self) -> Explosion {
        let explosion = Explosion::new(self.center(), self.size);
        self.explosion = Some(explosion.clone());
        self.body.vel = Vec2::ZERO;
        self.radius = 0.0;
        explosion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuse_triggers_once() {
        let grid = TerrainGrid::new();
        let mut bomb = Bomb::new(1, 0, Vec2::ZERO, Vec2::new(4.0, BOMB_LAUNCH_VY));

        let mut triggers = 0;
        let mut trigger_tick = 0;
        for t in 1..=BOMB_FUSE_TICKS + EXPLOSION_EFFECT_TICKS + 5 {
            if bomb.update(&grid).is_some() {
                triggers += 1;
                trigger_tick = t;
            }
        }
        assert_eq!(triggers, 1);
        assert_eq!(trigger_tick, BOMB_FUSE_TICKS);
        assert!(bomb.is_exploding());
        assert!(!bomb.is_active());
    }

    #[test]
    fn test_explosion_lingers_for_effect() {
        let grid = TerrainGrid::new();
        let mut bomb = Bomb::new(1, 0, Vec2::ZERO, Vec2::ZERO);
        bomb.ttl = 1;
        let explosion = bomb.update(&grid).expect("fuse of one tick");
        assert_eq!(explosion.origin, bomb.center());
        assert_eq!(bomb.radius, 0.0);

        for _ in 0..EXPLOSION_EFFECT_TICKS {
            assert!(bomb.is_active());
            bomb.update(&grid);
        }
        assert!(!bomb.is_active());
    }

    #[test]
    fn test_flight_is_ballistic() {
        let grid = TerrainGrid::new();
        let start = Vec2::new(10.0, 20.0);
        let mut bomb = Bomb::new(1, 0, start, Vec2::new(6.0, BOMB_LAUNCH_VY));

        bomb.update(&grid);
        let expected = start + Vec2::new(6.0, BOMB_LAUNCH_VY + BOMB_GRAVITY);
        assert!((bomb.center() - expected).length() < 1e-5);
        assert_eq!(bomb.ttl, BOMB_FUSE_TICKS - 1);
    }
}
