//! Layout persistence: JSON encoding, the key-value store seam, and the
//! downloadable design file.

use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::sync::RwLock;

use crate::error::LoadError;
use crate::room::RoomType;
use crate::types::PlacedItem;

pub fn serialize_layout(items: &[PlacedItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Parse a persisted layout. Either every item parses or nothing is
/// returned; repeated ids are rejected.
pub fn parse_layout(json: &str) -> Result<Vec<PlacedItem>, LoadError> {
    let items: Vec<PlacedItem> = serde_json::from_str(json)?;
    let mut seen = HashSet::new();
    for item in &items {
        if !seen.insert(item.id) {
            return Err(LoadError::DuplicateId(item.id));
        }
    }
    Ok(items)
}

/// One saved design per room type.
pub fn storage_key(room: &RoomType) -> String {
    format!("design-{}", room.tag())
}

/// A string key-value store for saved layouts.
///
/// All methods take `&self` so implementations backed by browser storage
/// or a database can handle their own locking.
pub trait LayoutStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// The stored value, or None if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    fn put(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

impl<S: LayoutStore> LayoutStore for &S {
    type Error = S::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (*self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (*self).put(key, value)
    }
}

/// In-memory layout store, for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemoryLayoutStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryLayoutStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutStore for MemoryLayoutStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        Ok(data.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A design file ready to hand to the browser as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadArtifact {
    pub file_name: String,
    pub contents: String,
}

impl DownloadArtifact {
    pub fn new(room: &RoomType, items: &[PlacedItem]) -> Result<Self, serde_json::Error> {
        Ok(DownloadArtifact {
            file_name: format!("{}-design.json", room.tag()),
            contents: serde_json::to_string_pretty(items)?,
        })
    }
}
