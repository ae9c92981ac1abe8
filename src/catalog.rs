//! Furniture catalogue: placeable templates per room type.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::room::RoomType;
use crate::types::{Color, Footprint, FurnitureKind, ItemTemplate};

/// Colours offered for new furniture.
pub const PALETTE: [&str; 24] = [
    "#455a64", "#607d8b", "#90a4ae", "#bcaaa4", "#8d6e63", "#5d4037", "#7986cb", "#9fa8da",
    "#ffcc80", "#ffab91", "#a5d6a7", "#81c784", "#fff59d", "#e6ee9c", "#9b87f5", "#7E69AB",
    "#D6BCFA", "#F2FCE2", "#FEF7CD", "#FEC6A1", "#E5DEFF", "#FFDEE2", "#FDE1D3", "#D3E4FD",
];

type Entry = (u32, &'static str, &'static str, &'static str, [f64; 3], &'static str);

const LIVING_ROOM: &[Entry] = &[
    (1, "Modern L-Shaped Sofa", "l-shaped-sofa", "#607d8b", [3.0, 1.0, 1.5], "fabric"),
    (2, "Minimalist Coffee Table", "coffee-table", "#b0bec5", [2.0, 0.5, 1.0], "wood"),
    (3, "Bookshelf", "bookshelf", "#795548", [2.0, 3.0, 0.8], "wood"),
    (4, "Accent Chair", "accent-chair", "#d6bcfa", [1.2, 1.0, 1.2], "fabric"),
    (5, "TV Console", "tv-console", "#6d4c41", [3.0, 0.8, 0.6], "wood"),
    (6, "Area Rug", "rug", "#b39ddb", [4.0, 0.05, 3.0], "fabric"),
    (7, "Pendant Light", "pendant-light", "#ffab91", [0.4, 2.0, 0.4], "metal"),
    (8, "Indoor Plant", "indoor-plant", "#81c784", [0.4, 1.2, 0.4], "default"),
];

const KITCHEN: &[Entry] = &[
    (1, "Dining Table Set", "dining-table-set", "#8d6e63", [2.5, 0.8, 1.5], "wood"),
    (2, "Kitchen Island", "cube", "#90a4ae", [2.0, 1.0, 1.5], "wood"),
    (3, "Bar Stool", "cylinder", "#616161", [0.4, 0.8, 0.4], "metal"),
    (4, "Cabinet", "cube", "#eceff1", [1.5, 1.8, 0.6], "wood"),
    (5, "Refrigerator", "cube", "#cfd8dc", [1.2, 2.5, 0.8], "metal"),
    (6, "Pendant Light", "pendant-light", "#ffcc80", [0.3, 0.4, 0.3], "metal"),
    (7, "Wine Rack", "cube", "#8d6e63", [0.6, 1.2, 0.3], "wood"),
    (8, "Kitchen Rug", "rug", "#b0bec5", [2.0, 0.05, 1.0], "fabric"),
];

const BEDROOM: &[Entry] = &[
    (1, "Bed with Bedding", "bed", "#a1887f", [3.0, 1.0, 2.0], "fabric"),
    (2, "Nightstand", "cube", "#a1887f", [1.0, 0.8, 1.0], "wood"),
    (3, "Dresser", "cube", "#8d6e63", [2.0, 1.2, 0.8], "wood"),
    (4, "Accent Chair", "accent-chair", "#90caf9", [0.8, 1.0, 0.8], "fabric"),
    (5, "Table Lamp", "pendant-light", "#e0e0e0", [0.3, 0.6, 0.3], "metal"),
    (6, "Wardrobe", "cube", "#8d6e63", [2.0, 4.0, 1.0], "wood"),
    (7, "Bedroom Rug", "rug", "#ce93d8", [2.5, 0.05, 3.0], "fabric"),
    (8, "Indoor Plant", "indoor-plant", "#81c784", [0.4, 1.2, 0.4], "default"),
];

const MASTER_BEDROOM: &[Entry] = &[
    (1, "Luxury King Bed", "bed", "#5d4037", [3.5, 1.2, 2.2], "fabric"),
    (2, "Elegant Dresser", "cube", "#5d4037", [3.0, 1.2, 0.8], "wood"),
    (3, "Chaise Lounge", "cube", "#9fa8da", [2.0, 0.8, 0.8], "fabric"),
    (4, "Floor Lamp", "cylinder", "#9e9e9e", [0.3, 2.0, 0.3], "metal"),
    (5, "Luxury Area Rug", "rug", "#ce93d8", [3.0, 0.05, 2.5], "fabric"),
    (6, "Bedside Table", "cube", "#5d4037", [1.0, 0.8, 1.0], "wood"),
    (7, "Decorative Mirror", "cube", "#b0bec5", [1.8, 2.5, 0.1], "glass"),
    (8, "Pendant Light", "pendant-light", "#ffcc80", [0.5, 2.0, 0.5], "metal"),
];

const HALL: &[Entry] = &[
    (1, "Console Table", "cube", "#8d6e63", [2.0, 0.8, 0.6], "wood"),
    (2, "Wall Mirror", "cube", "#b0bec5", [1.5, 2.0, 0.1], "glass"),
    (3, "Coat Rack", "cylinder", "#795548", [0.3, 2.0, 0.3], "wood"),
    (4, "Bench", "cube", "#a1887f", [2.0, 0.5, 0.8], "wood"),
    (5, "Runner Rug", "rug", "#9fa8da", [1.0, 0.05, 3.0], "fabric"),
    (6, "Wall Sconce", "pendant-light", "#ffcc80", [0.2, 0.4, 0.2], "metal"),
    (7, "Floor Plant", "indoor-plant", "#558b2f", [0.4, 1.5, 0.4], "default"),
    (8, "Key Holder", "cube", "#a1887f", [0.4, 0.6, 0.15], "wood"),
];

fn build(entries: &[Entry]) -> Vec<ItemTemplate> {
    entries
        .iter()
        .map(|&(id, name, kind, color, [w, h, d], material)| ItemTemplate {
            id,
            name: name.to_string(),
            kind: FurnitureKind::from(kind),
            color: Color::from_table(color),
            size: Some(Footprint::new(w, h, d)),
            material_type: Some(material.to_string()),
            description: None,
        })
        .collect()
}

/// Templates keyed by room type, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    rooms: HashMap<RoomType, Vec<ItemTemplate>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalogue shipped with the designer: eight pieces for each of
    /// the five room types.
    pub fn builtin() -> Self {
        let mut rooms = HashMap::new();
        rooms.insert(RoomType::LivingRoom, build(LIVING_ROOM));
        rooms.insert(RoomType::Kitchen, build(KITCHEN));
        rooms.insert(RoomType::Bedroom, build(BEDROOM));
        rooms.insert(RoomType::MasterBedroom, build(MASTER_BEDROOM));
        rooms.insert(RoomType::Hall, build(HALL));
        Catalog { rooms }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn insert(&mut self, room: RoomType, templates: Vec<ItemTemplate>) {
        self.rooms.insert(room, templates);
    }

    /// Templates for a room; empty for rooms the catalogue does not cover.
    pub fn templates(&self, room: &RoomType) -> &[ItemTemplate] {
        self.rooms.get(room).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn template(&self, room: &RoomType, id: u32) -> Option<&ItemTemplate> {
        self.templates(room).iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_room() {
        let catalog = Catalog::builtin();
        for room in RoomType::ALL {
            assert_eq!(catalog.templates(&room).len(), 8, "room {room}");
        }
        assert!(catalog.templates(&RoomType::from("attic")).is_empty());
    }

    #[test]
    fn builtin_entries_are_valid() {
        for table in [LIVING_ROOM, KITCHEN, BEDROOM, MASTER_BEDROOM, HALL] {
            for &(id, name, _, color, size, _) in table {
                assert!(Color::parse(color).is_ok(), "{id} {name}: {color}");
                assert!(Footprint::try_from(size).is_ok(), "{id} {name}: {size:?}");
            }
        }
    }

    #[test]
    fn palette_is_valid() {
        for c in PALETTE {
            assert!(Color::parse(c).is_ok(), "{c}");
        }
    }

    #[test]
    fn builtin_lookup() {
        let catalog = Catalog::builtin();
        let sofa = catalog.template(&RoomType::LivingRoom, 1).unwrap();
        assert_eq!(sofa.kind, FurnitureKind::LShapedSofa);
        assert_eq!(sofa.footprint(), Footprint::new(3.0, 1.0, 1.5));
        assert!(catalog.template(&RoomType::LivingRoom, 99).is_none());
    }

    #[test]
    fn parses_catalog_json() {
        let json = r##"{
            "hall": [
                {"id": 1, "name": "Bench", "type": "cube", "color": "#a1887f",
                 "size": [2, 0.5, 0.8], "materialType": "wood"}
            ]
        }"##;
        let catalog = Catalog::from_json(json).expect("parse");
        let bench = catalog.template(&RoomType::Hall, 1).unwrap();
        assert_eq!(bench.name, "Bench");
        assert_eq!(bench.footprint(), Footprint::new(2.0, 0.5, 0.8));
    }

    #[test]
    fn bad_template_rejects_whole_catalog() {
        let json = r##"{"hall": [{"id": 1, "name": "Bench", "type": "cube", "color": "red"}]}"##;
        assert!(Catalog::from_json(json).is_err());
    }
}
