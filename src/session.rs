//! A furnishing session: one active room, its catalogue, and its scene.
//!
//! All editing goes through a `DesignSession` value that the host owns and
//! passes to whatever needs it. There is no global state.

use std::future::Future;

use crate::catalog::Catalog;
use crate::collision::{find_violations, Violation};
use crate::error::{ConfigError, LoadError, PlacementError, SaveError};
use crate::persist::{parse_layout, serialize_layout, storage_key, DownloadArtifact, LayoutStore};
use crate::room::{RoomBoundary, RoomType};
use crate::scene::{SceneEvent, SceneStore};
use crate::service::{DesignService, ServiceResponse};
use crate::types::{Color, ItemId, ItemTemplate, PlacedItem, PlacementConfig, Position, RoomSwitchPolicy};

#[derive(Debug, Clone)]
pub struct DesignSession {
    room_type: RoomType,
    room: RoomBoundary,
    catalog: Catalog,
    config: PlacementConfig,
    scene: SceneStore,
    selected_color: Color,
}

impl DesignSession {
    /// Session on the built-in catalogue with default placement rules.
    pub fn new(room_type: RoomType) -> Self {
        Self::build(room_type, Catalog::builtin(), PlacementConfig::default())
    }

    /// Session with a custom catalogue and rules. Fails if the config
    /// would weaken the no-overlap or in-bounds checks.
    pub fn with_config(
        room_type: RoomType,
        catalog: Catalog,
        config: PlacementConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(room_type, catalog, config))
    }

    fn build(room_type: RoomType, catalog: Catalog, config: PlacementConfig) -> Self {
        let room = room_type.boundary();
        DesignSession {
            room_type,
            room,
            catalog,
            config,
            scene: SceneStore::new(),
            selected_color: Color::default(),
        }
    }

    pub fn room_type(&self) -> &RoomType {
        &self.room_type
    }

    pub fn room(&self) -> &RoomBoundary {
        &self.room
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Templates offered for the active room.
    pub fn templates(&self) -> &[ItemTemplate] {
        self.catalog.templates(&self.room_type)
    }

    pub fn scene(&self) -> &SceneStore {
        &self.scene
    }

    pub fn items(&self) -> &[PlacedItem] {
        self.scene.items()
    }

    pub fn snapshot(&self) -> Vec<PlacedItem> {
        self.scene.snapshot()
    }

    pub fn selected_color(&self) -> &Color {
        &self.selected_color
    }

    pub fn set_selected_color(&mut self, color: Color) {
        self.selected_color = color;
    }

    // -- Editing ---------------------------------------------------

    /// Add a catalogue piece for the active room in the selected colour.
    pub fn add_from_catalog(&mut self, template_id: u32) -> Result<ItemId, PlacementError> {
        let template = self
            .catalog
            .template(&self.room_type, template_id)
            .ok_or(PlacementError::UnknownTemplate(template_id))?;
        self.scene
            .add(template, self.selected_color.clone(), &self.room, &self.config)
    }

    pub fn add(&mut self, template: &ItemTemplate, color: Color) -> Result<ItemId, PlacementError> {
        self.scene.add(template, color, &self.room, &self.config)
    }

    pub fn move_item(&mut self, id: ItemId, x: f64, z: f64) -> Result<Position, PlacementError> {
        self.scene.move_to(id, x, z, &self.room, &self.config)
    }

    pub fn remove(&mut self, id: ItemId) -> Option<PlacedItem> {
        self.scene.remove(id)
    }

    pub fn replace_all(&mut self, items: Vec<PlacedItem>) {
        self.scene.replace_all(items);
    }

    /// Make a different room active. Under the evict policy, items that
    /// no longer fit the new walls are removed and their ids returned.
    pub fn switch_room(&mut self, room_type: RoomType) -> Vec<ItemId> {
        self.room = room_type.boundary();
        self.room_type = room_type;
        if self.config.room_switch == RoomSwitchPolicy::Keep {
            return Vec::new();
        }
        let evicted: Vec<ItemId> = find_violations(self.scene.items(), &self.room, &self.config)
            .into_iter()
            .filter_map(|v| match v {
                Violation::OutOfBounds { id } => Some(id),
                Violation::Overlap { .. } => None,
            })
            .collect();
        for id in &evicted {
            self.scene.evict(*id);
        }
        if !evicted.is_empty() {
            log::warn!(
                "switching to {} evicted {} item(s) that no longer fit",
                self.room_type,
                evicted.len()
            );
        }
        evicted
    }

    /// Every invariant the current scene breaks. Only a restored layout
    /// can produce a non-empty list.
    pub fn audit(&self) -> Vec<Violation> {
        find_violations(self.scene.items(), &self.room, &self.config)
    }

    pub(crate) fn emit(&mut self, event: SceneEvent) {
        self.scene.emit(event);
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        self.scene.drain_events()
    }

    // -- Persistence -----------------------------------------------

    pub fn save_design<S: LayoutStore>(&self, store: &S) -> Result<(), SaveError> {
        let json = serialize_layout(self.scene.items())?;
        store
            .put(&storage_key(&self.room_type), &json)
            .map_err(|e| SaveError::Store(e.to_string()))
    }

    /// Restore the saved design for the active room. On any failure the
    /// current scene is left exactly as it was.
    pub fn load_design<S: LayoutStore>(&mut self, store: &S) -> Result<usize, LoadError> {
        let key = storage_key(&self.room_type);
        let json = store
            .get(&key)
            .map_err(|e| LoadError::Store(e.to_string()))?
            .ok_or(LoadError::NotFound { key })?;
        let items = parse_layout(&json).inspect_err(|e| {
            log::warn!("failed to load design for {}: {e}", self.room_type);
        })?;
        let count = items.len();
        self.scene.replace_all(items);
        Ok(count)
    }

    pub fn download(&self) -> Result<DownloadArtifact, serde_json::Error> {
        DownloadArtifact::new(&self.room_type, self.scene.items())
    }

    // -- Remote service --------------------------------------------
    //
    // These take a snapshot up front and do not borrow the session, so
    // editing can continue while a call is in flight.

    pub fn save_remote<'s, S: DesignService>(
        &self,
        service: &'s S,
    ) -> impl Future<Output = Result<ServiceResponse, S::Error>> + Send + 's {
        service.save_furniture_state(self.scene.snapshot())
    }

    pub fn download_remote<'s, S: DesignService>(
        &self,
        service: &'s S,
    ) -> impl Future<Output = Result<ServiceResponse, S::Error>> + Send + 's {
        service.download_design(self.scene.snapshot())
    }

    /// Report an item's committed position.
    pub fn report_transform<'s, S: DesignService>(
        &self,
        service: &'s S,
        id: ItemId,
    ) -> Result<impl Future<Output = Result<ServiceResponse, S::Error>> + Send + 's, PlacementError>
    {
        let item = self.scene.get(id).ok_or(PlacementError::UnknownItem(id))?;
        Ok(service.transform_object(id, item.position))
    }
}
