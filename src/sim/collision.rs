//! Collision detection and response against the block grid
//!
//! Bodies are integrated first and corrected afterwards (discrete scheme), so
//! a very fast body can tunnel through a one-cell wall. Each overlapping cell
//! is resolved along the axis of smaller penetration; ties go horizontal.
//! A face shared with another solid cell is never used as an exit, which
//! keeps bodies from snagging on the seams between adjacent blocks.

use glam::Vec2;

use super::body::{Aabb, Body};
use super::terrain::{GridCoord, TerrainGrid};
use crate::consts::*;

/// Re-scan limit when one correction pushes the body into an earlier cell
pub const MAX_RESOLVE_PASSES: usize = 4;

/// Distance within which a hitbox bottom counts as resting on a block top
const CONTACT_EPSILON: f32 = 1e-3;

/// Axis a penetration is resolved along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Minimum-translation axis for a penetration pair
///
/// Vertical only when strictly shallower; equal depths resolve horizontally.
#[inline]
pub fn resolution_axis(penetration: Vec2) -> Axis {
    if penetration.y < penetration.x {
        Axis::Vertical
    } else {
        Axis::Horizontal
    }
}

/// Cell face a hitbox is pushed out through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// Body ends up on top of the block
    Top,
    /// Body ends up under the block
    Bottom,
    /// Body ends up left of the block
    Left,
    /// Body ends up right of the block
    Right,
}

impl Face {
    /// Cell on the other side of this face
    pub fn neighbor(self, coord: GridCoord) -> GridCoord {
        match self {
            Face::Top => GridCoord::new(coord.x, coord.y - 1),
            Face::Bottom => GridCoord::new(coord.x, coord.y + 1),
            Face::Left => GridCoord::new(coord.x - 1, coord.y),
            Face::Right => GridCoord::new(coord.x + 1, coord.y),
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Face::Top | Face::Bottom => Axis::Vertical,
            Face::Left | Face::Right => Axis::Horizontal,
        }
    }
}

/// Pick the exit face for a hitbox overlapping `coord`
///
/// The minimum-penetration axis wins unless its face is buried against a
/// solid neighbor while the other axis's face is open.
pub fn exit_face(hb: &Aabb, coord: GridCoord, grid: &TerrainGrid) -> Face {
    let cell = Aabb::of_cell(coord);
    let vertical = if hb.min.y < cell.min.y {
        Face::Top
    } else {
        Face::Bottom
    };
    let horizontal = if hb.min.x < cell.min.x {
        Face::Left
    } else {
        Face::Right
    };

    let (primary, secondary) = match resolution_axis(hb.penetration(&cell)) {
        Axis::Vertical => (vertical, horizontal),
        Axis::Horizontal => (horizontal, vertical),
    };

    if grid.is_solid(primary.neighbor(coord)) && !grid.is_solid(secondary.neighbor(coord)) {
        secondary
    } else {
        primary
    }
}

/// Move a body so its hitbox sits flush against `face` of `cell`
fn snap_to_face(body: &mut Body, cell: &Aabb, face: Face) {
    match face {
        Face::Top => body.set_hitbox_bottom(cell.min.y),
        Face::Bottom => body.set_hitbox_top(cell.max.y),
        Face::Left => body.set_hitbox_right(cell.min.x),
        Face::Right => body.set_hitbox_left(cell.max.x),
    }
}

/// Occupied cells under the hitbox that it strictly overlaps, row-major
fn overlapping_cells(hb: &Aabb, grid: &TerrainGrid) -> impl Iterator<Item = GridCoord> {
    let (lo, hi) = hb.cell_span();
    let hb = *hb;
    (lo.y..=hi.y)
        .flat_map(move |gy| (lo.x..=hi.x).map(move |gx| GridCoord::new(gx, gy)))
        .filter(move |&coord| grid.is_solid(coord) && hb.overlaps(&Aabb::of_cell(coord)))
}

/// True if the box overlaps any occupied cell
pub fn overlaps_grid(hb: &Aabb, grid: &TerrainGrid) -> bool {
    overlapping_cells(hb, grid).next().is_some()
}

/// Y of a block top the hitbox bottom is resting on, if any
fn supporting_surface(hb: &Aabb, grid: &TerrainGrid) -> Option<f32> {
    let row = (hb.max.y / BLOCK_SIZE).round();
    let top = row * BLOCK_SIZE;
    if (hb.max.y - top).abs() > CONTACT_EPSILON {
        return None;
    }

    let first = (hb.min.x / BLOCK_SIZE).floor() as i32;
    let last = (hb.max.x / BLOCK_SIZE).ceil() as i32 - 1;
    (first..=last)
        .any(|gx| grid.is_solid(GridCoord::new(gx, row as i32)))
        .then_some(top)
}

/// What a solid-body resolution did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Snapped onto a block top while falling
    pub landed: bool,
    /// Snapped under a block while rising
    pub hit_ceiling: bool,
    /// Snapped against a block side
    pub hit_wall: bool,
    /// Number of cell corrections applied
    pub corrections: u32,
}

/// Resolve a solid body (player) against the grid
///
/// Clears `on_ground`, then pushes the body out of every overlapping cell.
/// A body moving down onto a block top lands: `vel.y = 0` and `on_ground`.
/// A body left exactly touching a block top (no penetration) is grounded too.
/// The body never overlaps an occupied cell afterwards.
pub fn resolve_body(body: &mut Body, grid: &TerrainGrid) -> Resolution {
    body.on_ground = false;
    let unresolved = body.clone();
    let mut result = Resolution::default();

    for _ in 0..MAX_RESOLVE_PASSES {
        if !resolve_pass(body, grid, &mut result) {
            break;
        }
    }

    if overlaps_grid(&body.hitbox(), grid) {
        // Per-cell corrections cycled between cells; restart from the
        // integrated position with a single whole-body move
        log::debug!("resolution cycled at {:?}, escaping", unresolved.pos);
        *body = unresolved;
        result = Resolution {
            corrections: result.corrections,
            ..Default::default()
        };
        escape_overlap(body, grid, &mut result);
    }

    if !body.on_ground && body.vel.y >= 0.0 {
        if let Some(top) = supporting_surface(&body.hitbox(), grid) {
            // Falling exactly onto a block top is a landing too
            result.landed = body.vel.y > 0.0;
            body.set_hitbox_bottom(top);
            body.vel.y = 0.0;
            body.on_ground = true;
        }
    }

    result
}

/// One scan over the cells under the hitbox; returns true if anything moved
fn resolve_pass(body: &mut Body, grid: &TerrainGrid, result: &mut Resolution) -> bool {
    let mut hb = body.hitbox();
    let (lo, hi) = hb.cell_span();
    let mut moved = false;

    for gy in lo.y..=hi.y {
        for gx in lo.x..=hi.x {
            let coord = GridCoord::new(gx, gy);
            if !grid.is_solid(coord) {
                continue;
            }
            let cell = Aabb::of_cell(coord);
            if !hb.overlaps(&cell) {
                continue;
            }

            let face = exit_face(&hb, coord, grid);
            snap_to_face(body, &cell, face);
            apply_contact(body, face, result);
            moved = true;
            // A correction can expose a cell that did not overlap before
            hb = body.hitbox();
        }
    }

    moved
}

/// Velocity and flag updates for a body pushed out through `face`
fn apply_contact(body: &mut Body, face: Face, result: &mut Resolution) {
    match face {
        Face::Top => {
            if body.vel.y >= 0.0 {
                body.vel.y = 0.0;
                body.on_ground = true;
                result.landed = true;
            }
        }
        Face::Bottom => {
            if body.vel.y < 0.0 {
                body.vel.y = 0.0;
                result.hit_ceiling = true;
            }
        }
        Face::Left => {
            body.vel.x = body.vel.x.min(0.0);
            result.hit_wall = true;
        }
        Face::Right => {
            body.vel.x = body.vel.x.max(0.0);
            result.hit_wall = true;
        }
    }
    result.corrections += 1;
}

/// Move the body to the nearest clear spot flush against a face of a cell
/// it overlaps; lift it straight up when no such spot is clear
fn escape_overlap(body: &mut Body, grid: &TerrainGrid, result: &mut Resolution) {
    let hb = body.hitbox();
    let mut best: Option<(f32, Body, Face)> = None;

    for coord in overlapping_cells(&hb, grid) {
        let cell = Aabb::of_cell(coord);
        for face in [Face::Top, Face::Left, Face::Right, Face::Bottom] {
            let mut candidate = body.clone();
            snap_to_face(&mut candidate, &cell, face);
            if overlaps_grid(&candidate.hitbox(), grid) {
                continue;
            }
            let shift = candidate.pos.distance_squared(body.pos);
            if best.as_ref().is_none_or(|(nearest, ..)| shift < *nearest) {
                best = Some((shift, candidate, face));
            }
        }
    }

    let face = match best {
        Some((_, candidate, face)) => {
            *body = candidate;
            face
        }
        None => {
            lift_clear(body, grid);
            Face::Top
        }
    };
    apply_contact(body, face, result);
}

/// Raise the hitbox bottom to the highest overlapped block top until clear
fn lift_clear(body: &mut Body, grid: &TerrainGrid) {
    // Each step rises by at least one row
    for _ in 0..=grid.len() {
        let hb = body.hitbox();
        let Some(top) = overlapping_cells(&hb, grid)
            .map(|coord| Aabb::of_cell(coord).min.y)
            .reduce(f32::min)
        else {
            return;
        };
        body.set_hitbox_bottom(top);
    }
}

/// Outcome of a bomb contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounce {
    None,
    Floor,
    Ceiling,
    Wall,
}

/// Resolve a bouncing body (bomb) against the grid
///
/// Floor contact reflects and damps vertical speed and applies ground
/// friction; slow bounces settle to rest. Ceiling contact reflects vertical
/// speed, wall contact horizontal speed, both without friction. Each axis is
/// reflected at most once per tick.
pub fn resolve_bomb(body: &mut Body, grid: &TerrainGrid) -> Bounce {
    body.on_ground = false;
    let mut bounce = Bounce::None;
    let mut reflected_x = false;
    let mut reflected_y = false;

    let hb = body.hitbox();
    let cells: Vec<GridCoord> = overlapping_cells(&hb, grid).collect();
    for coord in cells {
        let hb = body.hitbox();
        let cell = Aabb::of_cell(coord);
        if !hb.overlaps(&cell) {
            continue;
        }

        let face = exit_face(&hb, coord, grid);
        snap_to_face(body, &cell, face);
        match face.axis() {
            Axis::Vertical if !reflected_y => {
                reflected_y = true;
                body.vel.y = -body.vel.y * BOMB_BOUNCE;
                if face == Face::Top {
                    settle_on_ground(body);
                    bounce = Bounce::Floor;
                } else if bounce == Bounce::None {
                    bounce = Bounce::Ceiling;
                }
            }
            Axis::Horizontal if !reflected_x => {
                reflected_x = true;
                body.vel.x = -body.vel.x * BOMB_BOUNCE;
                if bounce == Bounce::None {
                    bounce = Bounce::Wall;
                }
            }
            _ => {}
        }
    }

    if !body.on_ground && body.vel.y >= 0.0 {
        if let Some(top) = supporting_surface(&body.hitbox(), grid) {
            body.set_hitbox_bottom(top);
            body.vel.y = 0.0;
            settle_on_ground(body);
        }
    }

    bounce
}

/// Ground friction and rest snapping after a floor contact
fn settle_on_ground(body: &mut Body) {
    body.vel.x *= BOMB_GROUND_FRICTION;
    if body.vel.y.abs() < BOMB_REST_SPEED {
        body.vel.y = 0.0;
        body.on_ground = true;
    }
    if body.vel.x.abs() < STOP_EPSILON {
        body.vel.x = 0.0;
    }
}
