//! Data types matching the room layout JSON schema.
//!
//! Every persisted struct here derives Serialize + Deserialize so it can
//! round-trip through the layout interchange format. Footprints and
//! positions travel as `[w, h, d]` / `[x, y, z]` arrays.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;

// -- Geometry ------------------------------------------------------

/// Item extents: width (x), height (y), depth (z). Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 3]", into = "[f64; 3]")]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Footprint {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Footprint {
            width,
            height,
            depth,
        }
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_depth(&self) -> f64 {
        self.depth / 2.0
    }

    /// Resting height of the item centre above the floor.
    pub fn rest_y(&self) -> f64 {
        self.height / 2.0
    }
}

impl TryFrom<[f64; 3]> for Footprint {
    type Error = String;

    fn try_from(v: [f64; 3]) -> Result<Self, Self::Error> {
        if v.iter().all(|d| d.is_finite() && *d > 0.0) {
            Ok(Footprint::new(v[0], v[1], v[2]))
        } else {
            Err(format!(
                "footprint dimensions must be positive, got [{}, {}, {}]",
                v[0], v[1], v[2]
            ))
        }
    }
}

impl From<Footprint> for [f64; 3] {
    fn from(f: Footprint) -> Self {
        [f.width, f.height, f.depth]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Position { x, y, z }
    }

    /// Same height, new planar coordinates.
    pub fn with_xz(&self, x: f64, z: f64) -> Self {
        Position { x, y: self.y, z }
    }
}

impl From<[f64; 3]> for Position {
    fn from(v: [f64; 3]) -> Self {
        Position::new(v[0], v[1], v[2])
    }
}

impl From<Position> for [f64; 3] {
    fn from(p: Position) -> Self {
        [p.x, p.y, p.z]
    }
}

// -- Colour --------------------------------------------------------

/// A `#RRGGBB` colour. Letter case is preserved as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    pub fn parse(s: &str) -> Result<Self, String> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| format!("colour {s:?} must start with '#'"))?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("colour {s:?} is not of the form #RRGGBB"));
        }
        Ok(Color(s.to_string()))
    }

    /// For compile-time tables whose entries are checked by tests.
    pub(crate) fn from_table(s: &'static str) -> Self {
        Color(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color("#607d8b".to_string())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::parse(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// -- Furniture archetypes ------------------------------------------

/// Shape archetype of a piece of furniture.
///
/// The renderer decides what mesh to draw for each kind; this crate only
/// cares about the default footprint used when a catalogue entry omits
/// its size. Unknown tags survive a round trip through `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FurnitureKind {
    LShapedSofa,
    CoffeeTable,
    Bookshelf,
    AccentChair,
    TvConsole,
    Rug,
    PendantLight,
    IndoorPlant,
    DiningTableSet,
    Bed,
    Cube,
    Cylinder,
    Sphere,
    Other(String),
}

const KIND_TAGS: &[(FurnitureKind, &str)] = &[
    (FurnitureKind::LShapedSofa, "l-shaped-sofa"),
    (FurnitureKind::CoffeeTable, "coffee-table"),
    (FurnitureKind::Bookshelf, "bookshelf"),
    (FurnitureKind::AccentChair, "accent-chair"),
    (FurnitureKind::TvConsole, "tv-console"),
    (FurnitureKind::Rug, "rug"),
    (FurnitureKind::PendantLight, "pendant-light"),
    (FurnitureKind::IndoorPlant, "indoor-plant"),
    (FurnitureKind::DiningTableSet, "dining-table-set"),
    (FurnitureKind::Bed, "bed"),
    (FurnitureKind::Cube, "cube"),
    (FurnitureKind::Cylinder, "cylinder"),
    (FurnitureKind::Sphere, "sphere"),
];

impl FurnitureKind {
    pub fn tag(&self) -> &str {
        if let FurnitureKind::Other(tag) = self {
            return tag;
        }
        KIND_TAGS
            .iter()
            .find(|(k, _)| k == self)
            .map(|(_, t)| *t)
            .unwrap_or("cube")
    }

    /// Footprint used when a template does not carry its own size.
    pub fn default_footprint(&self) -> Footprint {
        let [w, h, d] = match self {
            FurnitureKind::LShapedSofa => [3.0, 1.0, 1.5],
            FurnitureKind::CoffeeTable => [2.0, 0.5, 1.0],
            FurnitureKind::Bookshelf => [2.0, 3.0, 0.8],
            FurnitureKind::AccentChair => [1.2, 1.0, 1.2],
            FurnitureKind::TvConsole => [3.0, 0.8, 0.6],
            FurnitureKind::Rug => [2.0, 0.05, 1.0],
            FurnitureKind::PendantLight => [0.4, 2.0, 0.4],
            FurnitureKind::IndoorPlant => [0.4, 1.2, 0.4],
            FurnitureKind::DiningTableSet => [2.5, 0.8, 1.5],
            FurnitureKind::Bed => [3.0, 1.0, 2.0],
            FurnitureKind::Cylinder => [0.4, 0.8, 0.4],
            FurnitureKind::Sphere => [0.5, 0.5, 0.5],
            FurnitureKind::Cube | FurnitureKind::Other(_) => [1.0, 1.0, 1.0],
        };
        Footprint::new(w, h, d)
    }
}

impl From<String> for FurnitureKind {
    fn from(tag: String) -> Self {
        KIND_TAGS
            .iter()
            .find(|(_, t)| *t == tag)
            .map(|(k, _)| k.clone())
            .unwrap_or(FurnitureKind::Other(tag))
    }
}

impl From<&str> for FurnitureKind {
    fn from(tag: &str) -> Self {
        FurnitureKind::from(tag.to_string())
    }
}

impl From<FurnitureKind> for String {
    fn from(k: FurnitureKind) -> Self {
        k.tag().to_string()
    }
}

// -- Catalogue / scene items ---------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Catalogue entry. Loaded once per room type and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTemplate {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FurnitureKind,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Footprint>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "materialTag")]
    pub material_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ItemTemplate {
    pub fn footprint(&self) -> Footprint {
        self.size.unwrap_or_else(|| self.kind.default_footprint())
    }
}

/// A piece of furniture standing in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: FurnitureKind,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_type: Option<String>,
    pub size: Footprint,
    pub position: Position,
}

// -- Engine configuration ------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DragPolicy {
    /// Illegal drag targets leave the item where it was.
    #[default]
    Reject,
    /// Pull the target back inside the walls, then validate.
    ClampToRoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoomSwitchPolicy {
    /// Re-validate against the new walls and drop items that no longer fit.
    #[default]
    Evict,
    /// Keep every item, even ones now outside the walls.
    Keep,
}

fn default_separation_buffer() -> f64 {
    0.1
}
fn default_boundary_margin() -> f64 {
    0.1
}
fn default_max_attempts() -> u32 {
    40
}
fn default_probe_directions() -> u32 {
    8
}

fn distance<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let v = f64::deserialize(d)?;
    check_distance("distance", v).map_err(D::Error::custom)
}

fn check_distance(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidDistance { field, value })
    }
}

/// Placement tuning. A negative buffer or margin would let items overlap
/// or cross walls, so both are checked on deserialization and by
/// [`PlacementConfig::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    #[serde(default = "default_separation_buffer", deserialize_with = "distance")]
    pub separation_buffer: f64,
    #[serde(default = "default_boundary_margin", deserialize_with = "distance")]
    pub boundary_margin: f64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_probe_directions")]
    pub probe_directions: u32,
    #[serde(default)]
    pub drag_policy: DragPolicy,
    #[serde(default)]
    pub room_switch: RoomSwitchPolicy,
}

impl PlacementConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_distance("separation_buffer", self.separation_buffer)?;
        check_distance("boundary_margin", self.boundary_margin)?;
        Ok(())
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            separation_buffer: 0.1,
            boundary_margin: 0.1,
            max_attempts: 40,
            probe_directions: 8,
            drag_policy: DragPolicy::Reject,
            room_switch: RoomSwitchPolicy::Evict,
        }
    }
}

// -- Tests ---------------------------------------------------------
