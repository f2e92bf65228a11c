//! Connection routing.
//!
//! A connection is drawn in two steps: [`begin_connection`] captures what is selected
//! as the pending source, and [`complete_connection`] resolves it against the clicked
//! target screen, computing where the arrow leaves the source and where it touches
//! the target. Both points are stored on the new [`Connection`] as a snapshot.

use crate::constants::{COMPONENT_CONNECTION_DESCRIPTION, SCREEN_CONNECTION_DESCRIPTION};
use crate::geometry::edge_intersection;
use crate::types::*;
use log::{debug, info};
use uuid::Uuid;

/// The screen, and optionally the component, a connection in progress starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSource {
    /// Screen the arrow starts from (the owner when starting from a component)
    pub screen_id: ScreenId,
    /// Component the arrow starts from, if any
    pub component_id: Option<ComponentId>,
}

/// Captures the current selection as a pending connection source.
///
/// A selected component wins over a selected screen. Returns `None` when nothing is
/// selected, in which case no connection can be started.
pub fn begin_connection(project: &Project) -> Option<PendingSource> {
    if let Some(component_id) = project.selected_component_id {
        let owner = project.component_owner(component_id)?;
        return Some(PendingSource {
            screen_id: owner.id,
            component_id: Some(component_id),
        });
    }
    project.selected_screen_id.map(|screen_id| PendingSource {
        screen_id,
        component_id: None,
    })
}

/// Computes the `(start, end)` points of an arrow from `source` to `target`.
///
/// From a component, the arrow leaves the component's boundary facing the target's
/// center (component boxes are offset by the header height). From a whole screen,
/// it leaves the screen's center. It ends where it enters the target's boundary.
/// Returns `None` if any referenced entity is missing.
pub fn route(project: &Project, source: PendingSource, target: &Screen) -> Option<(Position, Position)> {
    let source_screen = project.screen(source.screen_id)?;
    let target_center = target.center();

    let start = match source.component_id {
        Some(component_id) => {
            let component = source_screen.component(component_id)?;
            let origin = component.absolute_origin(source_screen);
            let center = component.absolute_center(source_screen);
            edge_intersection(origin, component.size, target_center.delta_from(center))
        }
        None => source_screen.center(),
    };

    let end = edge_intersection(target.position, target.size, start.delta_from(target_center));
    Some((start, end))
}

/// Resolves a pending source against the clicked target screen.
///
/// Self-connections (target equal to the source's screen) are silently dropped. An
/// empty `description` is replaced by `"Click"` for component sources and `"Navigate"`
/// for screen sources. Returns the id of the appended connection, or `None` when
/// nothing was created.
pub fn complete_connection(
    project: &mut Project,
    source: PendingSource,
    target_screen_id: ScreenId,
    description: &str,
) -> Option<ConnectionId> {
    if source.screen_id == target_screen_id {
        debug!("connection cancelled: source and target are screen {target_screen_id}");
        return None;
    }
    let Some(target) = project.screen(target_screen_id) else {
        debug!("connection cancelled: unknown target screen {target_screen_id}");
        return None;
    };
    let Some((start_point, end_point)) = route(project, source, target) else {
        debug!("connection cancelled: source {source:?} no longer exists");
        return None;
    };

    let description = if description.is_empty() {
        match source.component_id {
            Some(_) => COMPONENT_CONNECTION_DESCRIPTION,
            None => SCREEN_CONNECTION_DESCRIPTION,
        }
    } else {
        description
    };

    let connection = Connection {
        id: Uuid::new_v4(),
        from_screen_id: source.screen_id,
        to_screen_id: target_screen_id,
        from_component_id: source.component_id,
        description: description.to_string(),
        start_point,
        end_point,
    };
    let id = connection.id;
    info!(
        "connected {} -> {} ({:?} to {:?})",
        source.screen_id, target_screen_id, start_point, end_point
    );
    project.connections.push(connection);
    Some(id)
}
