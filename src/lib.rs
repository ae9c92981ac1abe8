//! Roomplan furniture placement engine.
//!
//! Keeps a scene of furniture footprints inside a rectangular room with
//! no two items overlapping and nothing crossing the walls. New items are
//! placed by a deterministic ring search; moves and drags are validated
//! before they are committed.
//!
//! With the `python` feature, exposes `place_json` and `audit_json`,
//! which take and return JSON strings.

pub mod catalog;
pub mod collision;
pub mod error;
pub mod interaction;
pub mod persist;
pub mod room;
pub mod scene;
pub mod search;
pub mod service;
pub mod session;
pub mod types;

pub use catalog::Catalog;
pub use error::{ConfigError, LoadError, PlacementError, SaveError};
pub use interaction::{DragController, DragOutcome, InteractionState, Ray};
pub use room::{RoomBoundary, RoomType};
pub use scene::{SceneEvent, SceneStore};
pub use session::DesignSession;
pub use types::{
    Color, DragPolicy, Footprint, FurnitureKind, ItemId, ItemTemplate, PlacedItem,
    PlacementConfig, Position, RoomSwitchPolicy,
};

#[cfg(feature = "python")]
mod python {
    use pyo3::prelude::*;
    use serde::{Deserialize, Serialize};

    use crate::collision::{find_violations, Violation};
    use crate::persist::parse_layout;
    use crate::room::RoomType;
    use crate::search::find_initial_position;
    use crate::types::{ItemTemplate, PlacedItem, PlacementConfig, Position};

    #[derive(Deserialize)]
    struct PlaceRequest {
        room_type: RoomType,
        #[serde(default)]
        config: PlacementConfig,
        #[serde(default)]
        layout: Vec<PlacedItem>,
        template: ItemTemplate,
    }

    #[derive(Serialize)]
    struct PlaceResponse {
        position: Option<Position>,
    }

    #[derive(Serialize)]
    struct AuditResponse {
        violations: Vec<Violation>,
    }

    fn value_error(msg: String) -> PyErr {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(msg)
    }

    /// Find where a new item would land.
    ///
    /// Takes a JSON request `{room_type, config?, layout, template}` and
    /// returns `{position: [x, y, z] | null}`.
    #[pyfunction]
    fn place_json(request_json: &str) -> PyResult<String> {
        let req: PlaceRequest = serde_json::from_str(request_json)
            .map_err(|e| value_error(format!("Invalid place request JSON: {e}")))?;
        req.config
            .validate()
            .map_err(|e| value_error(format!("Invalid placement config: {e}")))?;

        let room = req.room_type.boundary();
        let position =
            find_initial_position(&req.template.footprint(), &req.layout, &room, &req.config);

        serde_json::to_string(&PlaceResponse { position })
            .map_err(|e| value_error(format!("Failed to serialize place response: {e}")))
    }

    /// List every invariant a stored layout breaks in the given room.
    #[pyfunction]
    fn audit_json(room_type: &str, layout_json: &str) -> PyResult<String> {
        let layout = parse_layout(layout_json)
            .map_err(|e| value_error(format!("Invalid layout JSON: {e}")))?;
        let room = RoomType::from(room_type.to_string()).boundary();
        let violations = find_violations(&layout, &room, &PlacementConfig::default());

        serde_json::to_string(&AuditResponse { violations })
            .map_err(|e| value_error(format!("Failed to serialize audit: {e}")))
    }

    /// Roomplan engine, importable from Python.
    #[pymodule]
    fn roomplan(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(place_json, m)?)?;
        m.add_function(wrap_pyfunction!(audit_json, m)?)?;
        Ok(())
    }
}
