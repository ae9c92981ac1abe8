//! Pointer and gizmo input for selecting and dragging furniture.
//!
//! Turns a continuous stream of pointer rays into discrete scene moves.
//! Each frame's target is validated before it is committed, so an item
//! only ever shows legal positions.
//!
//! Per item: `Idle -> Selected -> Dragging -> Selected -> Idle`. Deselecting
//! from any state returns to `Idle`.

use crate::error::PlacementError;
use crate::scene::SceneEvent;
use crate::session::DesignSession;
use crate::types::{DragPolicy, ItemId, PlacedItem, Position};

const PARALLEL_EPS: f64 = 1e-9;

/// A pick ray from the camera through the pointer, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: [f64; 3],
    pub direction: [f64; 3],
}

impl Ray {
    pub fn new(origin: [f64; 3], direction: [f64; 3]) -> Self {
        Ray { origin, direction }
    }

    /// Where the ray meets the horizontal plane at height `y`, as (x, z).
    /// None for rays parallel to the plane or pointing away from it.
    pub fn hit_horizontal_plane(&self, y: f64) -> Option<(f64, f64)> {
        let dy = self.direction[1];
        if dy.abs() <= PARALLEL_EPS {
            return None;
        }
        let t = (y - self.origin[1]) / dy;
        if t < 0.0 {
            return None;
        }
        Some((
            self.origin[0] + t * self.direction[0],
            self.origin[2] + t * self.direction[2],
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub id: ItemId,
    /// Position when the drag started; restored on cancel.
    pub start: Position,
    /// Item centre minus the grab point, on the floor plane.
    grab_offset: (f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Selected(ItemId),
    Dragging(DragState),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// The item now stands here.
    Committed(Position),
    /// The target was illegal; the item stays where it was.
    Rejected(PlacementError),
    /// The pointer ray never reached the floor plane.
    Missed,
}

#[derive(Debug, Default)]
pub struct DragController {
    state: InteractionState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn selected(&self) -> Option<ItemId> {
        match self.state {
            InteractionState::Idle => None,
            InteractionState::Selected(id) => Some(id),
            InteractionState::Dragging(d) => Some(d.id),
        }
    }

    /// Camera orbiting is suspended while an item is selected.
    pub fn orbit_enabled(&self) -> bool {
        matches!(self.state, InteractionState::Idle)
    }

    /// Click on an item. Returns false if the item is not in the scene.
    pub fn click_item(&mut self, session: &mut DesignSession, id: ItemId) -> bool {
        if session.scene().get(id).is_none() {
            return false;
        }
        if self.selected() == Some(id) {
            return true;
        }
        self.deselect(session);
        self.state = InteractionState::Selected(id);
        session.emit(SceneEvent::Selected { id });
        true
    }

    /// Click on empty space.
    pub fn click_background(&mut self, session: &mut DesignSession) {
        self.deselect(session);
    }

    /// Drop the selection. A drag in progress is cancelled first.
    pub fn deselect(&mut self, session: &mut DesignSession) {
        if matches!(self.state, InteractionState::Dragging(_)) {
            self.cancel_drag(session);
        }
        if let InteractionState::Selected(id) = self.state {
            self.state = InteractionState::Idle;
            session.emit(SceneEvent::Deselected { id });
        }
    }

    /// Start dragging the selected item. `ray` is the pointer ray at
    /// press time, used to keep the grab point under the cursor.
    pub fn begin_drag(
        &mut self,
        session: &DesignSession,
        id: ItemId,
        ray: Option<&Ray>,
    ) -> Result<(), PlacementError> {
        match self.state {
            InteractionState::Selected(sel) if sel == id => {}
            InteractionState::Dragging(drag) if drag.id == id => {
                return Err(PlacementError::AlreadyDragging(id));
            }
            _ => return Err(PlacementError::NotSelected(id)),
        }
        let item = session
            .scene()
            .get(id)
            .ok_or(PlacementError::UnknownItem(id))?;
        let start = item.position;
        let grab_offset = ray
            .and_then(|r| r.hit_horizontal_plane(start.y))
            .map(|(hx, hz)| (start.x - hx, start.z - hz))
            .unwrap_or((0.0, 0.0));
        self.state = InteractionState::Dragging(DragState {
            id,
            start,
            grab_offset,
        });
        Ok(())
    }

    /// Follow the pointer for one frame.
    pub fn drag_move(&mut self, session: &mut DesignSession, ray: &Ray) -> DragOutcome {
        let InteractionState::Dragging(drag) = self.state else {
            return DragOutcome::Rejected(PlacementError::NotDragging);
        };
        let Some(item) = session.scene().get(drag.id) else {
            return self.lost(session, drag.id);
        };
        let Some((hx, hz)) = ray.hit_horizontal_plane(item.position.y) else {
            return DragOutcome::Missed;
        };
        let (x, z) = (hx + drag.grab_offset.0, hz + drag.grab_offset.1);
        let (x, z) = constrain(session, item, x, z);
        commit(session, drag.id, x, z)
    }

    /// Translate-gizmo update carrying the item's full new position.
    /// Height is ignored; only the floor coordinates move.
    pub fn gizmo_move(&mut self, session: &mut DesignSession, position: Position) -> DragOutcome {
        let Some(id) = self.selected() else {
            return DragOutcome::Rejected(PlacementError::NotDragging);
        };
        let Some(item) = session.scene().get(id) else {
            return self.lost(session, id);
        };
        let (x, z) = constrain(session, item, position.x, position.z);
        commit(session, id, x, z)
    }

    /// Release the pointer. The item keeps its last legal position.
    pub fn end_drag(&mut self) {
        if let InteractionState::Dragging(drag) = self.state {
            self.state = InteractionState::Selected(drag.id);
        }
    }

    /// Abort the drag and put the item back where it started.
    pub fn cancel_drag(&mut self, session: &mut DesignSession) {
        let InteractionState::Dragging(drag) = self.state else {
            return;
        };
        if let Err(e) = session.move_item(drag.id, drag.start.x, drag.start.z) {
            log::debug!("could not restore {} to drag start: {e}", drag.id);
        }
        self.state = InteractionState::Selected(drag.id);
    }

    /// The selected item vanished from the scene under us.
    fn lost(&mut self, session: &mut DesignSession, id: ItemId) -> DragOutcome {
        self.state = InteractionState::Idle;
        session.emit(SceneEvent::Deselected { id });
        DragOutcome::Rejected(PlacementError::UnknownItem(id))
    }

    /// Delete whatever is selected and return to idle.
    pub fn delete_selected(&mut self, session: &mut DesignSession) -> Option<PlacedItem> {
        let id = self.selected()?;
        self.state = InteractionState::Idle;
        session.remove(id)
    }
}

fn constrain(session: &DesignSession, item: &PlacedItem, x: f64, z: f64) -> (f64, f64) {
    match session.config().drag_policy {
        DragPolicy::Reject => (x, z),
        DragPolicy::ClampToRoom => {
            session
                .room()
                .clamp_center(&item.size, session.config().boundary_margin, x, z)
        }
    }
}

fn commit(session: &mut DesignSession, id: ItemId, x: f64, z: f64) -> DragOutcome {
    match session.move_item(id, x, z) {
        Ok(p) => DragOutcome::Committed(p),
        Err(e) => DragOutcome::Rejected(e),
    }
}
