//! Axis-aligned footprint collision and bounds checking.
//!
//! Furniture never rotates, so every footprint projects to an
//! axis-aligned rectangle on the floor (x, z). Two rectangles overlap
//! exactly when their centres are closer than the sum of their
//! half-extents on both axes.

use serde::Serialize;

use crate::error::PlacementError;
use crate::room::RoomBoundary;
use crate::types::{Footprint, ItemId, PlacedItem, PlacementConfig, Position};

/// Floor projection of an item: centre plus half-extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2d {
    pub x: f64,
    pub z: f64,
    pub half_width: f64,
    pub half_depth: f64,
}

impl Aabb2d {
    pub fn new(x: f64, z: f64, half_width: f64, half_depth: f64) -> Self {
        Aabb2d {
            x,
            z,
            half_width,
            half_depth,
        }
    }

    pub fn at(position: &Position, footprint: &Footprint) -> Self {
        Aabb2d::new(
            position.x,
            position.z,
            footprint.half_width(),
            footprint.half_depth(),
        )
    }

    pub fn of(item: &PlacedItem) -> Self {
        Aabb2d::at(&item.position, &item.size)
    }
}

/// True if the rectangles, each grown by `buffer` in total separation,
/// overlap. Touching at exactly the buffered distance is NOT overlap.
pub fn overlaps(a: &Aabb2d, b: &Aabb2d, buffer: f64) -> bool {
    (a.x - b.x).abs() < a.half_width + b.half_width + buffer
        && (a.z - b.z).abs() < a.half_depth + b.half_depth + buffer
}

/// True if the rectangle lies within the room, kept `margin` away from
/// every wall. Touching the margin line is in bounds.
pub fn within_bounds(item: &Aabb2d, room: &RoomBoundary, margin: f64) -> bool {
    let max_x = room.half_width() - margin;
    let max_z = room.half_depth() - margin;
    -max_x <= item.x - item.half_width
        && item.x + item.half_width <= max_x
        && -max_z <= item.z - item.half_depth
        && item.z + item.half_depth <= max_z
}

/// Check a footprint against the walls and every item in `scene`
/// except `exclude`. Reports the first item hit, in scene order.
pub fn check_footprint(
    candidate: &Aabb2d,
    exclude: Option<ItemId>,
    scene: &[PlacedItem],
    room: &RoomBoundary,
    config: &PlacementConfig,
) -> Result<(), PlacementError> {
    if !within_bounds(candidate, room, config.boundary_margin) {
        return Err(PlacementError::OutOfBounds);
    }
    for other in scene {
        if Some(other.id) == exclude {
            continue;
        }
        if overlaps(candidate, &Aabb2d::of(other), config.separation_buffer) {
            return Err(PlacementError::Collision { with: other.id });
        }
    }
    Ok(())
}

/// Check that `candidate` is within the room and does not overlap any
/// other item. An item never collides with its own stored copy.
pub fn check_placement(
    candidate: &PlacedItem,
    scene: &[PlacedItem],
    room: &RoomBoundary,
    config: &PlacementConfig,
) -> Result<(), PlacementError> {
    check_footprint(&Aabb2d::of(candidate), Some(candidate.id), scene, room, config)
}

pub fn is_legal(
    candidate: &PlacedItem,
    scene: &[PlacedItem],
    room: &RoomBoundary,
    config: &PlacementConfig,
) -> bool {
    check_placement(candidate, scene, room, config).is_ok()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    OutOfBounds { id: ItemId },
    Overlap { a: ItemId, b: ItemId },
}

/// Every broken invariant in `scene`. Empty for any scene built only
/// through validated adds and moves.
pub fn find_violations(
    scene: &[PlacedItem],
    room: &RoomBoundary,
    config: &PlacementConfig,
) -> Vec<Violation> {
    let mut out = Vec::new();
    let boxes: Vec<Aabb2d> = scene.iter().map(Aabb2d::of).collect();
    for (item, bx) in scene.iter().zip(&boxes) {
        if !within_bounds(bx, room, config.boundary_margin) {
            out.push(Violation::OutOfBounds { id: item.id });
        }
    }
    for i in 0..scene.len() {
        for j in (i + 1)..scene.len() {
            if overlaps(&boxes[i], &boxes[j], config.separation_buffer) {
                out.push(Violation::Overlap {
                    a: scene[i].id,
                    b: scene[j].id,
                });
            }
        }
    }
    out
}
