//! Room types and their floor boundaries.
//!
//! Every room is a rectangle centred on the origin. The x axis runs along
//! the width, the z axis along the depth.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Footprint;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoomType {
    LivingRoom,
    Kitchen,
    Bedroom,
    MasterBedroom,
    Hall,
    Other(String),
}

impl RoomType {
    pub const ALL: [RoomType; 5] = [
        RoomType::LivingRoom,
        RoomType::Kitchen,
        RoomType::Bedroom,
        RoomType::MasterBedroom,
        RoomType::Hall,
    ];

    pub fn tag(&self) -> &str {
        match self {
            RoomType::LivingRoom => "living-room",
            RoomType::Kitchen => "kitchen",
            RoomType::Bedroom => "bedroom",
            RoomType::MasterBedroom => "master-bedroom",
            RoomType::Hall => "hall",
            RoomType::Other(tag) => tag,
        }
    }

    pub fn boundary(&self) -> RoomBoundary {
        boundary_for(self)
    }
}

impl From<String> for RoomType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "living-room" => RoomType::LivingRoom,
            "kitchen" => RoomType::Kitchen,
            "bedroom" => RoomType::Bedroom,
            "master-bedroom" => RoomType::MasterBedroom,
            "hall" => RoomType::Hall,
            _ => RoomType::Other(tag),
        }
    }
}

impl From<&str> for RoomType {
    fn from(tag: &str) -> Self {
        RoomType::from(tag.to_string())
    }
}

impl From<RoomType> for String {
    fn from(r: RoomType) -> Self {
        r.tag().to_string()
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Floor rectangle of a room, centred at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomBoundary {
    pub width: f64,
    pub depth: f64,
}

impl RoomBoundary {
    pub const BASELINE: RoomBoundary = RoomBoundary {
        width: 10.0,
        depth: 10.0,
    };

    pub fn new(width: f64, depth: f64) -> Self {
        RoomBoundary { width, depth }
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_depth(&self) -> f64 {
        self.depth / 2.0
    }

    /// Pull an item centre back so its footprint sits inside the walls
    /// (less `margin`). Items wider than the room end up centred.
    pub fn clamp_center(&self, footprint: &Footprint, margin: f64, x: f64, z: f64) -> (f64, f64) {
        let max_x = (self.half_width() - margin - footprint.half_width()).max(0.0);
        let max_z = (self.half_depth() - margin - footprint.half_depth()).max(0.0);
        (x.clamp(-max_x, max_x), z.clamp(-max_z, max_z))
    }
}

/// Boundary for a room type. Unknown rooms get the baseline 10 x 10.
pub fn boundary_for(room: &RoomType) -> RoomBoundary {
    match room {
        RoomType::LivingRoom => RoomBoundary::new(10.0, 10.0),
        RoomType::Kitchen => RoomBoundary::new(9.0, 8.0),
        RoomType::Bedroom => RoomBoundary::new(10.0, 9.0),
        RoomType::MasterBedroom => RoomBoundary::new(12.0, 11.0),
        RoomType::Hall => RoomBoundary::new(12.0, 5.0),
        RoomType::Other(_) => RoomBoundary::BASELINE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for room in RoomType::ALL {
            assert_eq!(RoomType::from(room.tag()), room);
        }
        assert_eq!(RoomType::from("attic"), RoomType::Other("attic".into()));
    }

    #[test]
    fn unknown_room_gets_baseline() {
        assert_eq!(boundary_for(&RoomType::from("attic")), RoomBoundary::BASELINE);
    }

    #[test]
    fn shipped_rooms_are_distinct() {
        let all: Vec<RoomBoundary> = RoomType::ALL.iter().map(boundary_for).collect();
        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                assert_ne!(all[i], all[j]);
            }
        }
    }

    #[test]
    fn hall_is_wide_and_shallow() {
        let hall = boundary_for(&RoomType::Hall);
        assert!(hall.width >= 2.0 * hall.depth);
    }

    #[test]
    fn clamp_keeps_footprint_inside() {
        let room = RoomBoundary::new(10.0, 10.0);
        let fp = Footprint::new(2.0, 1.0, 1.0);
        let (x, z) = room.clamp_center(&fp, 0.1, 9.0, -9.0);
        assert!((x - 3.9).abs() < 1e-9);
        assert!((z + 4.4).abs() < 1e-9);
        assert_eq!(room.clamp_center(&fp, 0.1, 1.0, 2.0), (1.0, 2.0));
    }

    #[test]
    fn clamp_centres_oversized_item() {
        let room = RoomBoundary::new(10.0, 10.0);
        let fp = Footprint::new(12.0, 1.0, 1.0);
        assert_eq!(room.clamp_center(&fp, 0.1, 3.0, 0.0).0, 0.0);
    }
}
