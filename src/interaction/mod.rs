//! Pointer and keyboard interaction state machine.
//!
//! [`EditorSession`] owns the [`Project`] together with everything that is only
//! meaningful while the user is interacting: the active [`Gesture`], the pending
//! connection description, the inline label edit and the open screen menu. Input
//! arrives as plain canvas coordinates (optionally already resolved to a
//! [`HitTarget`]) and leaves as entity-model mutations, so the whole machine can be
//! driven without any rendering surface.
//!
//! # Gestures
//!
//! - `Idle` to `DraggingScreen`: pointer-down on a screen header.
//! - `Idle` to `DraggingComponent`: pointer-down on a component body.
//! - `Idle` to `ResizingComponent`: pointer-down on the selected component's handle.
//! - `Idle` to `Connecting`: [`EditorSession::start_connection`] with something selected.
//! - Drag and resize end on pointer-up; connecting ends on the next click.

mod capture;

#[cfg(test)]
mod tests;

pub use capture::{InputSurface, PointerCapture};
pub use hit_test::{hit_test, screen_frame_size, HitTarget};

use crate::constants::{CONTENT_HEIGHT, CONTENT_WIDTH, DEFAULT_COMPONENT_HEIGHT, DEFAULT_COMPONENT_WIDTH};
use crate::constants::{MIN_COMPONENT_HEIGHT, MIN_COMPONENT_WIDTH};
use crate::routing::{begin_connection, complete_connection, PendingSource};
use crate::types::*;
use log::{debug, trace};

/// The pointer gesture currently in progress.
///
/// Drag and resize gestures hold a [`PointerCapture`]; leaving the gesture drops it.
#[derive(Debug, Default)]
pub enum Gesture {
    /// Nothing in progress
    #[default]
    Idle,
    /// Moving a screen by its header
    DraggingScreen {
        /// Screen being moved
        screen_id: ScreenId,
        /// Pointer minus screen position at gesture start
        grab_offset: (f32, f32),
        /// Global pointer subscription for the gesture's lifetime
        _capture: PointerCapture,
    },
    /// Moving a component inside its screen
    DraggingComponent {
        /// Component being moved
        component_id: ComponentId,
        /// Pointer minus component position at gesture start
        grab_offset: (f32, f32),
        /// Global pointer subscription for the gesture's lifetime
        _capture: PointerCapture,
    },
    /// Resizing a component from its bottom-right handle
    ResizingComponent {
        /// Component being resized
        component_id: ComponentId,
        /// Size at gesture start
        start_size: Size,
        /// Pointer at gesture start
        start_pointer: Position,
        /// Global pointer subscription for the gesture's lifetime
        _capture: PointerCapture,
    },
    /// Waiting for the user to click the target screen of a new connection
    Connecting {
        /// What the connection starts from
        source: PendingSource,
    },
}

/// Payload-free view of [`Gesture`], convenient for comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    /// See [`Gesture::Idle`]
    Idle,
    /// See [`Gesture::DraggingScreen`]
    DraggingScreen,
    /// See [`Gesture::DraggingComponent`]
    DraggingComponent,
    /// See [`Gesture::ResizingComponent`]
    ResizingComponent,
    /// See [`Gesture::Connecting`]
    Connecting,
}

impl Gesture {
    /// The gesture's state without its payload.
    pub fn state(&self) -> GestureState {
        match self {
            Gesture::Idle => GestureState::Idle,
            Gesture::DraggingScreen { .. } => GestureState::DraggingScreen,
            Gesture::DraggingComponent { .. } => GestureState::DraggingComponent,
            Gesture::ResizingComponent { .. } => GestureState::ResizingComponent,
            Gesture::Connecting { .. } => GestureState::Connecting,
        }
    }
}

/// An inline label edit on one component.
///
/// Draft text is written to the component as it is typed; cancelling restores
/// `original`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEdit {
    /// Component whose label is being edited
    pub component_id: ComponentId,
    /// Text currently in the edit field
    pub draft: String,
    /// Label before editing began
    pub original: String,
}

/// The project plus all transient interaction state.
#[derive(Debug, Default)]
pub struct EditorSession {
    project: Project,
    gesture: Gesture,
    /// Description typed for the connection being drawn
    pub connection_description: String,
    label_edit: Option<LabelEdit>,
    open_menu: Option<ScreenId>,
    surface: InputSurface,
}

impl EditorSession {
    /// Creates a session over an empty project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session over an existing project.
    pub fn with_project(project: Project) -> Self {
        Self {
            project,
            ..Self::default()
        }
    }

    /// The document being edited.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// The active gesture.
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// The active gesture's state.
    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    /// The input surface gestures capture the pointer on.
    pub fn input_surface(&self) -> &InputSurface {
        &self.surface
    }

    /// The pending connection source while connecting.
    pub fn pending_source(&self) -> Option<PendingSource> {
        match self.gesture {
            Gesture::Connecting { source } => Some(source),
            _ => None,
        }
    }

    /// The inline label edit in progress, if any.
    pub fn label_edit(&self) -> Option<&LabelEdit> {
        self.label_edit.as_ref()
    }

    /// The screen whose menu is open, if any.
    pub fn open_menu(&self) -> Option<ScreenId> {
        self.open_menu
    }

    /// Closes the screen menu.
    pub fn close_menu(&mut self) {
        self.open_menu = None;
    }

    fn set_gesture(&mut self, next: Gesture) {
        let from = self.gesture.state();
        let to = next.state();
        if from != to {
            debug!("gesture {from:?} -> {to:?}");
        }
        self.gesture = next;
    }

    /// Whether a connection can be started right now.
    pub fn can_start_connection(&self) -> bool {
        matches!(self.gesture, Gesture::Idle) && begin_connection(&self.project).is_some()
    }

    // Pointer input

    /// Pointer-down at a canvas point; resolves the target by hit-testing.
    pub fn pointer_down(&mut self, point: Position) {
        let target = hit_test(&self.project, point);
        self.pointer_down_on(target, point);
    }

    /// Pointer-down on an already resolved target.
    pub fn pointer_down_on(&mut self, target: HitTarget, point: Position) {
        trace!("pointer down on {target:?} at {point:?}");
        if let Some(edit) = &self.label_edit {
            if target == HitTarget::Body(edit.component_id) {
                return;
            }
            self.commit_label_edit();
        }

        match self.gesture {
            Gesture::Idle => self.pointer_down_idle(target, point),
            Gesture::Connecting { source } => {
                match target.screen_id(&self.project) {
                    Some(target_screen) => {
                        complete_connection(
                            &mut self.project,
                            source,
                            target_screen,
                            &self.connection_description,
                        );
                    }
                    None => debug!("connection cancelled: clicked empty canvas"),
                }
                self.end_connection();
            }
            _ => trace!("pointer down ignored during {:?}", self.gesture.state()),
        }
    }

    fn pointer_down_idle(&mut self, target: HitTarget, point: Position) {
        self.open_menu = None;
        match target {
            HitTarget::Canvas => self.project.clear_selection(),
            HitTarget::Header(screen_id) => {
                let Some(screen) = self.project.screen(screen_id) else {
                    return;
                };
                let grab_offset = point.delta_from(screen.position);
                self.project.select_screen(screen_id);
                let capture = self.surface.capture();
                self.set_gesture(Gesture::DraggingScreen {
                    screen_id,
                    grab_offset,
                    _capture: capture,
                });
            }
            HitTarget::MenuButton(screen_id) => {
                self.project.select_screen(screen_id);
                self.open_menu = Some(screen_id);
            }
            HitTarget::ContentBackground(_) => {}
            HitTarget::Body(component_id) => {
                let Some(component) = self.project.component(component_id) else {
                    return;
                };
                let grab_offset = point.delta_from(component.position);
                self.project.select_component(component_id);
                let capture = self.surface.capture();
                self.set_gesture(Gesture::DraggingComponent {
                    component_id,
                    grab_offset,
                    _capture: capture,
                });
            }
            HitTarget::ResizeHandle(component_id) => {
                let Some(component) = self.project.component(component_id) else {
                    return;
                };
                let start_size = component.size;
                self.project.select_component(component_id);
                let capture = self.surface.capture();
                self.set_gesture(Gesture::ResizingComponent {
                    component_id,
                    start_size,
                    start_pointer: point,
                    _capture: capture,
                });
            }
        }
    }

    /// Pointer-move anywhere on the input surface.
    pub fn pointer_move(&mut self, point: Position) {
        let applied = match &self.gesture {
            Gesture::DraggingScreen {
                screen_id,
                grab_offset,
                ..
            } => {
                let position =
                    Position::new(point.x - grab_offset.0, point.y - grab_offset.1).clamp_non_negative();
                trace!("drag screen {screen_id} to {position:?}");
                self.project
                    .update_screen(*screen_id, ScreenUpdate::position(position))
            }
            Gesture::DraggingComponent {
                component_id,
                grab_offset,
                ..
            } => match self.project.component(*component_id) {
                Some(component) => {
                    let size = component.size;
                    let x = (point.x - grab_offset.0)
                        .min(CONTENT_WIDTH - size.width)
                        .max(0.0);
                    let y = (point.y - grab_offset.1)
                        .min(CONTENT_HEIGHT - size.height)
                        .max(0.0);
                    trace!("drag component {component_id} to ({x}, {y})");
                    self.project
                        .update_component(*component_id, ComponentUpdate::position(Position::new(x, y)))
                }
                None => false,
            },
            Gesture::ResizingComponent {
                component_id,
                start_size,
                start_pointer,
                ..
            } => match self.project.component(*component_id) {
                Some(component) => {
                    let position = component.position;
                    let (dx, dy) = point.delta_from(*start_pointer);
                    let width = (start_size.width + dx)
                        .min(CONTENT_WIDTH - position.x)
                        .max(MIN_COMPONENT_WIDTH);
                    let height = (start_size.height + dy)
                        .min(CONTENT_HEIGHT - position.y)
                        .max(MIN_COMPONENT_HEIGHT);
                    trace!("resize component {component_id} to {width}x{height}");
                    self.project
                        .update_component(*component_id, ComponentUpdate::size(Size::new(width, height)))
                }
                None => false,
            },
            Gesture::Idle | Gesture::Connecting { .. } => true,
        };
        if !applied {
            debug!("gesture target vanished; returning to idle");
            self.set_gesture(Gesture::Idle);
        }
    }

    /// Pointer-up anywhere on the input surface. Ends drag and resize gestures.
    pub fn pointer_up(&mut self) {
        match self.gesture {
            Gesture::DraggingScreen { .. }
            | Gesture::DraggingComponent { .. }
            | Gesture::ResizingComponent { .. } => self.set_gesture(Gesture::Idle),
            Gesture::Idle | Gesture::Connecting { .. } => {}
        }
    }

    /// Double-click at a canvas point; resolves the target by hit-testing.
    pub fn double_click(&mut self, point: Position) -> Option<ComponentId> {
        let target = hit_test(&self.project, point);
        self.double_click_on(target, point)
    }

    /// Double-click on an already resolved target.
    ///
    /// On a screen's empty content area this creates a component centered under the
    /// pointer and selects it. On a component body it starts editing the label.
    /// Returns the id of a created component.
    pub fn double_click_on(&mut self, target: HitTarget, point: Position) -> Option<ComponentId> {
        if !matches!(self.gesture, Gesture::Idle) {
            return None;
        }
        match target {
            HitTarget::ContentBackground(screen_id) => {
                let screen = self.project.screen(screen_id)?;
                let content = screen.content_origin();
                let position = Position::new(
                    point.x - content.x - DEFAULT_COMPONENT_WIDTH / 2.0,
                    point.y - content.y - DEFAULT_COMPONENT_HEIGHT / 2.0,
                )
                .clamp_non_negative();
                let label = format!("Component {}", screen.components.len() + 1);
                let id = self
                    .project
                    .add_component(WireframeComponent::new(screen_id, position, label))?;
                self.project.select_component(id);
                Some(id)
            }
            HitTarget::Body(component_id) => {
                self.begin_label_edit(component_id);
                None
            }
            _ => None,
        }
    }

    // Connections

    /// Starts drawing a connection from the current selection.
    ///
    /// Only possible while idle with a screen or component selected; otherwise
    /// nothing happens and `false` is returned.
    pub fn start_connection(&mut self) -> bool {
        if !matches!(self.gesture, Gesture::Idle) {
            return false;
        }
        let Some(source) = begin_connection(&self.project) else {
            debug!("start connection ignored: nothing selected");
            return false;
        };
        self.open_menu = None;
        self.set_gesture(Gesture::Connecting { source });
        true
    }

    /// Abandons the connection being drawn.
    pub fn cancel_connection(&mut self) {
        if matches!(self.gesture, Gesture::Connecting { .. }) {
            self.end_connection();
        }
    }

    fn end_connection(&mut self) {
        self.connection_description.clear();
        self.set_gesture(Gesture::Idle);
    }

    // Label editing

    /// Starts editing a component's label inline. Any other edit is committed first.
    pub fn begin_label_edit(&mut self, component_id: ComponentId) -> bool {
        if self.label_edit.as_ref().map(|e| e.component_id) == Some(component_id) {
            return true;
        }
        self.commit_label_edit();
        let Some(component) = self.project.component(component_id) else {
            return false;
        };
        debug!("editing label of {component_id}");
        self.label_edit = Some(LabelEdit {
            component_id,
            draft: component.label.clone(),
            original: component.label.clone(),
        });
        self.project.select_component(component_id);
        true
    }

    /// Replaces the draft label and shows it on the component immediately.
    pub fn set_label_draft(&mut self, text: impl Into<String>) {
        let Some(edit) = &mut self.label_edit else {
            return;
        };
        edit.draft = text.into();
        let update = ComponentUpdate::label(edit.draft.clone());
        let component_id = edit.component_id;
        self.project.update_component(component_id, update);
    }

    /// Finishes the label edit, keeping the draft (Enter or focus loss).
    pub fn commit_label_edit(&mut self) {
        if let Some(edit) = self.label_edit.take() {
            debug!("label of {} committed as {:?}", edit.component_id, edit.draft);
            self.project
                .update_component(edit.component_id, ComponentUpdate::label(edit.draft));
        }
    }

    /// Abandons the label edit, restoring the label it started from (Escape).
    pub fn cancel_label_edit(&mut self) {
        if let Some(edit) = self.label_edit.take() {
            debug!("label edit of {} cancelled", edit.component_id);
            self.project
                .update_component(edit.component_id, ComponentUpdate::label(edit.original));
        }
    }

    // Keyboard

    /// Enter: commits a label edit.
    pub fn key_enter(&mut self) {
        self.commit_label_edit();
    }

    /// Escape: cancels a label edit, otherwise a connection in progress, otherwise
    /// closes the screen menu.
    pub fn key_escape(&mut self) {
        if self.label_edit.is_some() {
            self.cancel_label_edit();
        } else if matches!(self.gesture, Gesture::Connecting { .. }) {
            self.cancel_connection();
        } else {
            self.open_menu = None;
        }
    }

    /// Delete or Backspace: removes the selected component unless its label is being edited.
    pub fn key_delete(&mut self) -> bool {
        if self.label_edit.is_some() {
            return false;
        }
        match self.project.selected_component_id {
            Some(id) => self.delete_component(id),
            None => false,
        }
    }

    // Commands shared with toolbar, menus and the property panel

    /// Adds a screen and selects it.
    pub fn add_screen(&mut self) -> ScreenId {
        self.project.add_screen()
    }

    /// Duplicates a screen and selects the copy.
    pub fn duplicate_screen(&mut self, id: ScreenId) -> Option<ScreenId> {
        self.open_menu = None;
        self.project.duplicate_screen(id)
    }

    /// Applies a sparse screen update.
    pub fn update_screen(&mut self, id: ScreenId, update: ScreenUpdate) -> bool {
        self.project.update_screen(id, update)
    }

    /// Applies a sparse component update.
    pub fn update_component(&mut self, id: ComponentId, update: ComponentUpdate) -> bool {
        self.project.update_component(id, update)
    }

    /// Selects a screen.
    pub fn select_screen(&mut self, id: ScreenId) -> bool {
        self.project.select_screen(id)
    }

    /// Selects a component.
    pub fn select_component(&mut self, id: ComponentId) -> bool {
        self.project.select_component(id)
    }

    /// Deletes a screen, ending any gesture or edit that involved it.
    pub fn delete_screen(&mut self, id: ScreenId) -> bool {
        let Some(screen) = self.project.screen(id) else {
            return false;
        };
        let owns = |component_id: ComponentId| screen.component(component_id).is_some();
        let gesture_involved = match &self.gesture {
            Gesture::Idle => false,
            Gesture::DraggingScreen { screen_id, .. } => *screen_id == id,
            Gesture::DraggingComponent { component_id, .. }
            | Gesture::ResizingComponent { component_id, .. } => owns(*component_id),
            Gesture::Connecting { source } => source.screen_id == id,
        };
        let edit_involved = self
            .label_edit
            .as_ref()
            .is_some_and(|e| owns(e.component_id));

        if gesture_involved {
            self.connection_description.clear();
            self.set_gesture(Gesture::Idle);
        }
        if edit_involved {
            self.label_edit = None;
        }
        if self.open_menu == Some(id) {
            self.open_menu = None;
        }
        self.project.delete_screen(id)
    }

    /// Deletes a component, ending any gesture or edit that involved it.
    pub fn delete_component(&mut self, id: ComponentId) -> bool {
        let gesture_involved = match &self.gesture {
            Gesture::DraggingComponent { component_id, .. }
            | Gesture::ResizingComponent { component_id, .. } => *component_id == id,
            Gesture::Connecting { source } => source.component_id == Some(id),
            _ => false,
        };
        if gesture_involved {
            self.connection_description.clear();
            self.set_gesture(Gesture::Idle);
        }
        if self.label_edit.as_ref().map(|e| e.component_id) == Some(id) {
            self.label_edit = None;
        }
        self.project.delete_component(id)
    }

    /// Removes everything from the project and resets all transient state.
    pub fn clear_project(&mut self) {
        self.set_gesture(Gesture::Idle);
        self.connection_description.clear();
        self.label_edit = None;
        self.open_menu = None;
        self.project.clear();
    }
}
