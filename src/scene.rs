//! The authoritative collection of placed items.
//!
//! Adds and moves only commit after validation, so every scene reached
//! through this API satisfies the no-overlap and in-bounds invariants.
//! `replace_all` is the one exception: it installs a restored layout as-is.

use serde::Serialize;

use crate::collision::check_placement;
use crate::error::PlacementError;
use crate::room::RoomBoundary;
use crate::search::find_initial_position;
use crate::types::{Color, ItemId, ItemTemplate, PlacedItem, PlacementConfig, Position};

/// Change notifications for the renderer and other observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SceneEvent {
    Added { id: ItemId },
    Selected { id: ItemId },
    Deselected { id: ItemId },
    Moved { id: ItemId, from: Position, to: Position },
    Removed { id: ItemId },
    Evicted { id: ItemId },
    Replaced { count: usize },
}

#[derive(Debug, Clone)]
pub struct SceneStore {
    items: Vec<PlacedItem>,
    next_id: u64,
    events: Vec<SceneEvent>,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneStore {
    pub fn new() -> Self {
        SceneStore {
            items: Vec::new(),
            next_id: 1,
            events: Vec::new(),
        }
    }

    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&PlacedItem> {
        self.items.iter().find(|it| it.id == id)
    }

    fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|it| it.id == id)
    }

    /// Place a new item from `template` in `color`. The id is only
    /// consumed when the item actually lands in the scene.
    pub fn add(
        &mut self,
        template: &ItemTemplate,
        color: Color,
        room: &RoomBoundary,
        config: &PlacementConfig,
    ) -> Result<ItemId, PlacementError> {
        let id = ItemId(self.next_id);
        let next_id = self.next_id.checked_add(1).ok_or(PlacementError::IdsExhausted)?;
        let footprint = template.footprint();
        let Some(position) = find_initial_position(&footprint, &self.items, room, config) else {
            log::debug!("no space for {:?} ({} items in scene)", template.name, self.items.len());
            return Err(PlacementError::NoSpace);
        };
        self.next_id = next_id;
        self.items.push(PlacedItem {
            id,
            kind: template.kind.clone(),
            color,
            material_type: template.material_type.clone(),
            size: footprint,
            position,
        });
        log::debug!("added {} {:?} at {:?}", id, template.name, position);
        self.events.push(SceneEvent::Added { id });
        Ok(id)
    }

    /// Move an item to new floor coordinates, keeping its height. On
    /// rejection nothing changes.
    pub fn move_to(
        &mut self,
        id: ItemId,
        x: f64,
        z: f64,
        room: &RoomBoundary,
        config: &PlacementConfig,
    ) -> Result<Position, PlacementError> {
        let idx = self.index_of(id).ok_or(PlacementError::UnknownItem(id))?;
        let from = self.items[idx].position;
        let mut candidate = self.items[idx].clone();
        candidate.position = from.with_xz(x, z);
        if let Err(e) = check_placement(&candidate, &self.items, room, config) {
            log::debug!("move of {id} to ({x}, {z}) rejected: {e}");
            return Err(e);
        }
        let to = candidate.position;
        if to != from {
            self.items[idx].position = to;
            self.events.push(SceneEvent::Moved { id, from, to });
        }
        Ok(to)
    }

    /// Remove an item. Removal only relaxes constraints, so nothing is
    /// re-checked.
    pub fn remove(&mut self, id: ItemId) -> Option<PlacedItem> {
        let idx = self.index_of(id)?;
        let item = self.items.remove(idx);
        log::debug!("removed {id}");
        self.events.push(SceneEvent::Removed { id });
        Some(item)
    }

    pub(crate) fn evict(&mut self, id: ItemId) -> Option<PlacedItem> {
        let idx = self.index_of(id)?;
        let item = self.items.remove(idx);
        self.events.push(SceneEvent::Evicted { id });
        Some(item)
    }

    pub fn snapshot(&self) -> Vec<PlacedItem> {
        self.items.clone()
    }

    /// Swap in a whole layout without validating it. Fresh ids continue
    /// past the highest id seen so far. A layout holding `u64::MAX` leaves
    /// no fresh ids, so later adds fail with `IdsExhausted`.
    pub fn replace_all(&mut self, items: Vec<PlacedItem>) {
        let max_id = items.iter().map(|it| it.id.0).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id.saturating_add(1));
        self.items = items;
        log::debug!("scene replaced with {} items", self.items.len());
        self.events.push(SceneEvent::Replaced {
            count: self.items.len(),
        });
    }

    pub(crate) fn emit(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Footprint, FurnitureKind};

    fn template(size: [f64; 3]) -> ItemTemplate {
        ItemTemplate {
            id: 1,
            name: "Sofa".into(),
            kind: FurnitureKind::LShapedSofa,
            color: Color::parse("#607d8b").unwrap(),
            size: Some(Footprint::new(size[0], size[1], size[2])),
            material_type: Some("fabric".into()),
            description: None,
        }
    }

    fn grey() -> Color {
        Color::parse("#455a64").unwrap()
    }

    fn room10() -> RoomBoundary {
        RoomBoundary::new(10.0, 10.0)
    }

    #[test]
    fn add_at_centre() {
        let mut scene = SceneStore::new();
        let cfg = PlacementConfig::default();
        let id = scene.add(&template([3.0, 1.0, 1.5]), grey(), &room10(), &cfg).unwrap();
        let item = scene.get(id).unwrap();
        assert_eq!(item.position, Position::new(0.0, 0.5, 0.0));
        assert_eq!(item.color, grey());
        assert_eq!(item.material_type.as_deref(), Some("fabric"));
        assert_eq!(scene.drain_events(), vec![SceneEvent::Added { id }]);
    }

    #[test]
    fn add_too_wide_leaves_scene_unchanged() {
        let mut scene = SceneStore::new();
        let cfg = PlacementConfig::default();
        let r = scene.add(&template([12.0, 1.0, 1.0]), grey(), &room10(), &cfg);
        assert_eq!(r, Err(PlacementError::NoSpace));
        assert!(scene.is_empty());
        assert!(scene.drain_events().is_empty());
    }

    #[test]
    fn ids_are_monotonic() {
        let mut scene = SceneStore::new();
        let cfg = PlacementConfig::default();
        let a = scene.add(&template([1.0, 1.0, 1.0]), grey(), &room10(), &cfg).unwrap();
        let _ = scene.add(&template([12.0, 1.0, 1.0]), grey(), &room10(), &cfg);
        let b = scene.add(&template([1.0, 1.0, 1.0]), grey(), &room10(), &cfg).unwrap();
        scene.remove(b);
        let c = scene.add(&template([1.0, 1.0, 1.0]), grey(), &room10(), &cfg).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn move_into_collision_rejected() {
        let mut scene = SceneStore::new();
        let cfg = PlacementConfig::default();
        let a = scene.add(&template([3.0, 1.0, 1.5]), grey(), &room10(), &cfg).unwrap();
        let b = scene.add(&template([2.0, 0.5, 1.0]), grey(), &room10(), &cfg).unwrap();
        let before = scene.snapshot();
        let r = scene.move_to(b, 1.0, 0.0, &room10(), &cfg);
        assert_eq!(r, Err(PlacementError::Collision { with: a }));
        assert_eq!(scene.snapshot(), before);
    }

    #[test]
    fn move_keeps_height() {
        let mut scene = SceneStore::new();
        let cfg = PlacementConfig::default();
        let a = scene.add(&template([2.0, 0.5, 1.0]), grey(), &room10(), &cfg).unwrap();
        scene.drain_events();
        let to = scene.move_to(a, 2.0, -3.0, &room10(), &cfg).unwrap();
        assert_eq!(to, Position::new(2.0, 0.25, -3.0));
        assert_eq!(
            scene.drain_events(),
            vec![SceneEvent::Moved {
                id: a,
                from: Position::new(0.0, 0.25, 0.0),
                to,
            }]
        );
    }

    #[test]
    fn move_in_place_is_noop() {
        let mut scene = SceneStore::new();
        let cfg = PlacementConfig::default();
        let a = scene.add(&template([3.0, 1.0, 1.5]), grey(), &room10(), &cfg).unwrap();
        scene.drain_events();
        let before = scene.snapshot();
        assert!(scene.move_to(a, 0.0, 0.0, &room10(), &cfg).is_ok());
        assert_eq!(scene.snapshot(), before);
        assert!(scene.drain_events().is_empty());
    }

    #[test]
    fn move_unknown_item() {
        let mut scene = SceneStore::new();
        let r = scene.move_to(ItemId(9), 0.0, 0.0, &room10(), &PlacementConfig::default());
        assert_eq!(r, Err(PlacementError::UnknownItem(ItemId(9))));
    }

    #[test]
    fn remove_then_larger_fits() {
        let mut scene = SceneStore::new();
        let cfg = PlacementConfig::default();
        let a = scene.add(&template([1.0, 1.0, 1.0]), grey(), &room10(), &cfg).unwrap();
        assert!(scene.remove(a).is_some());
        assert!(scene.snapshot().is_empty());
        let b = scene.add(&template([4.0, 1.0, 3.0]), grey(), &room10(), &cfg).unwrap();
        assert_eq!(scene.get(b).unwrap().position, Position::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn replace_all_bumps_next_id() {
        let mut scene = SceneStore::new();
        let cfg = PlacementConfig::default();
        let mut restored = SceneStore::new();
        for _ in 0..3 {
            restored.add(&template([1.0, 1.0, 1.0]), grey(), &room10(), &cfg).unwrap();
        }
        scene.replace_all(restored.snapshot());
        assert_eq!(scene.len(), 3);
        let id = scene.add(&template([1.0, 1.0, 1.0]), grey(), &room10(), &cfg).unwrap();
        assert_eq!(id, ItemId(4));
    }

    #[test]
    fn replace_all_with_max_id_exhausts_ids() {
        let mut scene = SceneStore::new();
        let cfg = PlacementConfig::default();
        let mut restored = SceneStore::new();
        restored.add(&template([1.0, 1.0, 1.0]), grey(), &room10(), &cfg).unwrap();
        let mut items = restored.snapshot();
        items[0].id = ItemId(u64::MAX);
        scene.replace_all(items);
        scene.drain_events();

        let before = scene.snapshot();
        let r = scene.add(&template([1.0, 1.0, 1.0]), grey(), &room10(), &cfg);
        assert_eq!(r, Err(PlacementError::IdsExhausted));
        assert_eq!(scene.snapshot(), before);
        assert!(scene.drain_events().is_empty());
    }

    #[test]
    fn last_id_below_max_is_still_issued() {
        let mut scene = SceneStore::new();
        let cfg = PlacementConfig::default();
        let mut restored = SceneStore::new();
        restored.add(&template([1.0, 1.0, 1.0]), grey(), &room10(), &cfg).unwrap();
        let mut items = restored.snapshot();
        items[0].id = ItemId(u64::MAX - 2);
        scene.replace_all(items);
        let id = scene.add(&template([1.0, 1.0, 1.0]), grey(), &room10(), &cfg).unwrap();
        assert_eq!(id, ItemId(u64::MAX - 1));
        let r = scene.add(&template([1.0, 1.0, 1.0]), grey(), &room10(), &cfg);
        assert_eq!(r, Err(PlacementError::IdsExhausted));
    }
}
