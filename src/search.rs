//! Initial placement search for newly added items.
//!
//! Probes a fixed, bounded sequence of floor positions radiating out from
//! the room centre and keeps the first legal one. The sequence depends
//! only on the room and the config, so the same occupancy always yields
//! the same placement.

use std::f64::consts::TAU;

use crate::collision::{check_footprint, Aabb2d};
use crate::room::RoomBoundary;
use crate::types::{Footprint, PlacedItem, PlacementConfig, Position};

fn quantize_position(value: f64) -> f64 {
    // Quantize to the nearest 0.01; `+ 0.0` folds -0.0 into 0.0.
    (value * 100.0).round() / 100.0 + 0.0
}

/// Candidate (x, z) positions: the centre, then rings of evenly spaced
/// directions at growing radius.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    step: f64,
    directions: u32,
    next: u32,
    total: u32,
}

impl ProbeSequence {
    pub fn new(room: &RoomBoundary, config: &PlacementConfig) -> Self {
        let directions = config.probe_directions.max(1);
        let total = config.max_attempts;
        let rings = total.saturating_sub(1).div_ceil(directions);
        let step = if rings == 0 {
            0.0
        } else {
            room.half_width().max(room.half_depth()) / rings as f64
        };
        ProbeSequence {
            step,
            directions,
            next: 0,
            total,
        }
    }
}

impl Iterator for ProbeSequence {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<(f64, f64)> {
        if self.next >= self.total {
            return None;
        }
        let i = self.next;
        self.next += 1;
        if i == 0 {
            return Some((0.0, 0.0));
        }
        let ring = (i - 1) / self.directions + 1;
        let dir = (i - 1) % self.directions;
        let radius = ring as f64 * self.step;
        let angle = dir as f64 * TAU / self.directions as f64;
        Some((
            quantize_position(radius * angle.cos()),
            quantize_position(radius * angle.sin()),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total.saturating_sub(self.next) as usize;
        (left, Some(left))
    }
}

/// Find a legal resting position for a new item of the given footprint,
/// or `None` if every probe within the attempt budget is blocked.
pub fn find_initial_position(
    footprint: &Footprint,
    scene: &[PlacedItem],
    room: &RoomBoundary,
    config: &PlacementConfig,
) -> Option<Position> {
    let y = footprint.rest_y();
    for (attempt, (x, z)) in ProbeSequence::new(room, config).enumerate() {
        let candidate = Aabb2d::new(x, z, footprint.half_width(), footprint.half_depth());
        if check_footprint(&candidate, None, scene, room, config).is_ok() {
            log::debug!("placement found at ({x}, {z}) after {} probes", attempt + 1);
            return Some(Position::new(x, y, z));
        }
    }
    None
}
