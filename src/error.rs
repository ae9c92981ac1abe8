//! Rejection and failure types.
//!
//! None of these are fatal: a rejected placement leaves the scene untouched
//! and a failed load leaves the previous scene in place.

use crate::types::ItemId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementError {
    #[error("item would stick out of the room")]
    OutOfBounds,
    #[error("item would collide with {with}")]
    Collision { with: ItemId },
    #[error("not enough space to place the item")]
    NoSpace,
    #[error("no item {0} in the scene")]
    UnknownItem(ItemId),
    #[error("no catalogue template with id {0}")]
    UnknownTemplate(u32),
    #[error("item {0} must be selected before it can be dragged")]
    NotSelected(ItemId),
    #[error("item {0} is already being dragged")]
    AlreadyDragging(ItemId),
    #[error("no drag in progress")]
    NotDragging,
    #[error("item ids are exhausted")]
    IdsExhausted,
}

/// A placement config that would weaken the scene invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidDistance { field: &'static str, value: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no saved design under {key:?}")]
    NotFound { key: String },
    #[error("saved design is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("saved design repeats item id {0}")]
    DuplicateId(ItemId),
    #[error("layout store error: {0}")]
    Store(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to encode design: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("layout store error: {0}")]
    Store(String),
}
