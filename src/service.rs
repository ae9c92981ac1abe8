//! Remote design service seam.
//!
//! The designer reports moves and saves to a backend. The shipped
//! implementation is a mock that always acknowledges; a real network
//! client implements the same trait.

use std::convert::Infallible;
use std::future::Future;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::types::{ItemId, PlacedItem, Position};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub success: bool,
    pub message: String,
}

impl ServiceResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        ServiceResponse {
            success: true,
            message: message.into(),
        }
    }
}

/// Async backend for design state.
///
/// Callers must treat both the `Err` case and `success == false` as a
/// failed round trip. Item lists are passed by value: they are snapshots
/// taken when the call was made.
pub trait DesignService: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn transform_object(
        &self,
        id: ItemId,
        position: Position,
    ) -> impl Future<Output = Result<ServiceResponse, Self::Error>> + Send;

    fn save_furniture_state(
        &self,
        items: Vec<PlacedItem>,
    ) -> impl Future<Output = Result<ServiceResponse, Self::Error>> + Send;

    fn download_design(
        &self,
        items: Vec<PlacedItem>,
    ) -> impl Future<Output = Result<ServiceResponse, Self::Error>> + Send;
}

/// Always-successful stand-in backend. Remembers the last saved state.
#[derive(Debug, Default)]
pub struct MockDesignService {
    last_saved: RwLock<Option<Vec<PlacedItem>>>,
}

impl MockDesignService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_saved(&self) -> Option<Vec<PlacedItem>> {
        self.last_saved
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl DesignService for MockDesignService {
    type Error = Infallible;

    async fn transform_object(
        &self,
        id: ItemId,
        position: Position,
    ) -> Result<ServiceResponse, Self::Error> {
        log::debug!("mock transform of {id} to {position:?}");
        Ok(ServiceResponse::ok("Object transformed successfully"))
    }

    async fn save_furniture_state(
        &self,
        items: Vec<PlacedItem>,
    ) -> Result<ServiceResponse, Self::Error> {
        *self.last_saved.write().unwrap_or_else(|e| e.into_inner()) = Some(items);
        Ok(ServiceResponse::ok("Furniture state saved successfully"))
    }

    async fn download_design(
        &self,
        _items: Vec<PlacedItem>,
    ) -> Result<ServiceResponse, Self::Error> {
        Ok(ServiceResponse::ok("Design ready for download"))
    }
}
