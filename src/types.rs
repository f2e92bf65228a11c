//! Core data types for the wireframe editor.
//!
//! This module defines the entity model (screens, the components placed inside them,
//! and the connections drawn between them) together with every mutation the editor
//! performs on a [`Project`]. Mutations never fail: requests naming an unknown id are
//! ignored, and out-of-range geometry is clamped into range before it is stored.

use crate::constants::*;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for screens.
pub type ScreenId = Uuid;

/// Unique identifier for components. Globally unique across all screens.
pub type ComponentId = Uuid;

/// Unique identifier for connections.
pub type ConnectionId = Uuid;

/// A point in canvas coordinates, origin top-left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Position {
    /// The canvas origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a position from its coordinates.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns this position moved by `(dx, dy)`.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns the vector from `other` to `self`.
    pub fn delta_from(self, other: Position) -> (f32, f32) {
        (self.x - other.x, self.y - other.y)
    }

    /// Clamps both axes to be non-negative.
    pub fn clamp_non_negative(self) -> Self {
        Self::new(self.x.max(0.0), self.y.max(0.0))
    }
}

/// Width and height of a box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent
    pub width: f32,
    /// Vertical extent
    pub height: f32,
}

impl Size {
    /// Creates a size from its extents.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The fixed size every screen is created with.
    pub const fn screen() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    /// Center of a box of this size whose top-left corner is `origin`.
    pub fn center_at(self, origin: Position) -> Position {
        origin.offset(self.width / 2.0, self.height / 2.0)
    }

    /// Whether `point` lies inside a box of this size anchored at `origin` (edges inclusive).
    pub fn contains(self, origin: Position, point: Position) -> bool {
        point.x >= origin.x
            && point.x <= origin.x + self.width
            && point.y >= origin.y
            && point.y <= origin.y + self.height
    }
}

/// The fixed palette a component's color is chosen from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentColor {
    /// `#3B82F6`
    #[default]
    Blue,
    /// `#10B981`
    Green,
    /// `#F59E0B`
    Yellow,
    /// `#EF4444`
    Red,
    /// `#8B5CF6`
    Purple,
    /// `#F97316`
    Orange,
    /// `#06B6D4`
    Cyan,
    /// `#84CC16`
    Lime,
}

impl ComponentColor {
    /// Every palette entry, in display order.
    pub const ALL: [ComponentColor; 8] = [
        ComponentColor::Blue,
        ComponentColor::Green,
        ComponentColor::Yellow,
        ComponentColor::Red,
        ComponentColor::Purple,
        ComponentColor::Orange,
        ComponentColor::Cyan,
        ComponentColor::Lime,
    ];

    /// Red, green and blue channels.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ComponentColor::Blue => (0x3B, 0x82, 0xF6),
            ComponentColor::Green => (0x10, 0xB9, 0x81),
            ComponentColor::Yellow => (0xF5, 0x9E, 0x0B),
            ComponentColor::Red => (0xEF, 0x44, 0x44),
            ComponentColor::Purple => (0x8B, 0x5C, 0xF6),
            ComponentColor::Orange => (0xF9, 0x73, 0x16),
            ComponentColor::Cyan => (0x06, 0xB6, 0xD4),
            ComponentColor::Lime => (0x84, 0xCC, 0x16),
        }
    }

    /// CSS-style hex string, e.g. `#3B82F6`.
    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            ComponentColor::Blue => "Blue",
            ComponentColor::Green => "Green",
            ComponentColor::Yellow => "Yellow",
            ComponentColor::Red => "Red",
            ComponentColor::Purple => "Purple",
            ComponentColor::Orange => "Orange",
            ComponentColor::Cyan => "Cyan",
            ComponentColor::Lime => "Lime",
        }
    }
}

/// A labelled box placed inside a screen's content area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireframeComponent {
    /// Unique identifier for this component
    pub id: ComponentId,
    /// Top-left corner relative to the owning screen's content area
    pub position: Position,
    /// Current size, bounded by the content area
    pub size: Size,
    /// Free text shown inside the box
    pub label: String,
    /// Border and text color
    pub color: ComponentColor,
    /// Screen that owns this component
    pub screen_id: ScreenId,
}

impl WireframeComponent {
    /// Creates a component of the default size, clamped into the content area.
    pub fn new(screen_id: ScreenId, position: Position, label: impl Into<String>) -> Self {
        let mut component = Self {
            id: Uuid::new_v4(),
            position,
            size: Size::new(DEFAULT_COMPONENT_WIDTH, DEFAULT_COMPONENT_HEIGHT),
            label: label.into(),
            color: ComponentColor::default(),
            screen_id,
        };
        component.clamp_to_content();
        component
    }

    /// Forces size and position back inside the content area.
    ///
    /// Size is bounded first, then position is bounded using the final size, so
    /// `position + size` never leaves the `CONTENT_WIDTH x CONTENT_HEIGHT` area.
    pub fn clamp_to_content(&mut self) {
        self.size.width = self
            .size
            .width
            .min(CONTENT_WIDTH)
            .max(MIN_COMPONENT_WIDTH);
        self.size.height = self
            .size
            .height
            .min(CONTENT_HEIGHT)
            .max(MIN_COMPONENT_HEIGHT);
        self.position.x = self
            .position
            .x
            .min(CONTENT_WIDTH - self.size.width)
            .max(0.0);
        self.position.y = self
            .position
            .y
            .min(CONTENT_HEIGHT - self.size.height)
            .max(0.0);
    }

    /// Absolute canvas position of the top-left corner, given the owning screen.
    pub fn absolute_origin(&self, screen: &Screen) -> Position {
        let content = screen.content_origin();
        content.offset(self.position.x, self.position.y)
    }

    /// Absolute canvas position of the center, given the owning screen.
    pub fn absolute_center(&self, screen: &Screen) -> Position {
        self.size.center_at(self.absolute_origin(screen))
    }
}

/// A navigable box representing one application view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    /// Unique identifier for this screen
    pub id: ScreenId,
    /// Top-left corner on the canvas
    pub position: Position,
    /// Fixed size assigned at creation
    pub size: Size,
    /// Title shown in the header
    pub title: String,
    /// Owned components; insertion order is drawing order
    pub components: Vec<WireframeComponent>,
}

impl Screen {
    /// Creates an empty screen of the canonical size.
    pub fn new(title: impl Into<String>, position: Position) -> Self {
        Self {
            id: Uuid::new_v4(),
            position: position.clamp_non_negative(),
            size: Size::screen(),
            title: title.into(),
            components: Vec::new(),
        }
    }

    /// Absolute center of the screen box.
    pub fn center(&self) -> Position {
        self.size.center_at(self.position)
    }

    /// Top-left corner of the content area, below the header.
    pub fn content_origin(&self) -> Position {
        self.position.offset(0.0, HEADER_HEIGHT)
    }

    /// Looks up an owned component.
    pub fn component(&self, id: ComponentId) -> Option<&WireframeComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    fn component_mut(&mut self, id: ComponentId) -> Option<&mut WireframeComponent> {
        self.components.iter_mut().find(|c| c.id == id)
    }

    /// Deep copy with fresh ids for the screen and every component.
    fn duplicate(&self) -> Self {
        let id = Uuid::new_v4();
        let components = self
            .components
            .iter()
            .map(|c| WireframeComponent {
                id: Uuid::new_v4(),
                screen_id: id,
                ..c.clone()
            })
            .collect();
        Self {
            id,
            position: self.position.offset(DUPLICATE_OFFSET, DUPLICATE_OFFSET),
            size: self.size,
            title: format!("{} Copy", self.title),
            components,
        }
    }
}

/// A directional annotated arrow from a screen (or one of its components) to another screen.
///
/// The endpoints are absolute canvas coordinates captured when the connection was
/// created. They are not updated when either end moves afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Unique identifier for this connection
    pub id: ConnectionId,
    /// Screen the arrow starts from
    pub from_screen_id: ScreenId,
    /// Screen the arrow points to
    pub to_screen_id: ScreenId,
    /// Component the arrow starts from, when it does not start at the whole screen
    pub from_component_id: Option<ComponentId>,
    /// Label drawn at the segment midpoint
    pub description: String,
    /// Where the arrow leaves its source
    pub start_point: Position,
    /// Where the arrow touches its target
    pub end_point: Position,
}

/// Sparse set of screen fields to merge onto an existing screen.
///
/// The size is deliberately absent: screens keep their canonical size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenUpdate {
    /// New title
    pub title: Option<String>,
    /// New top-left corner, clamped to be non-negative
    pub position: Option<Position>,
}

impl ScreenUpdate {
    /// An update that only moves the screen.
    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    /// An update that only renames the screen.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Sparse set of component fields to merge onto an existing component.
///
/// The owning screen is deliberately absent: a component never changes owner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentUpdate {
    /// New content-relative position
    pub position: Option<Position>,
    /// New size
    pub size: Option<Size>,
    /// New label
    pub label: Option<String>,
    /// New palette color
    pub color: Option<ComponentColor>,
}

impl ComponentUpdate {
    /// An update that only moves the component.
    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    /// An update that only resizes the component.
    pub fn size(size: Size) -> Self {
        Self {
            size: Some(size),
            ..Default::default()
        }
    }

    /// An update that only relabels the component.
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    /// An update that only recolors the component.
    pub fn color(color: ComponentColor) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }
}

/// The whole editable document: screens, connections and the current selection.
///
/// At most one of `selected_screen_id` and `selected_component_id` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// All screens, in creation order
    pub screens: Vec<Screen>,
    /// All connections, in creation order
    pub connections: Vec<Connection>,
    /// Currently selected screen, if any
    pub selected_screen_id: Option<ScreenId>,
    /// Currently selected component, if any
    pub selected_component_id: Option<ComponentId>,
}

impl Project {
    /// Creates an empty project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a screen by id.
    pub fn screen(&self, id: ScreenId) -> Option<&Screen> {
        self.screens.iter().find(|s| s.id == id)
    }

    fn screen_mut(&mut self, id: ScreenId) -> Option<&mut Screen> {
        self.screens.iter_mut().find(|s| s.id == id)
    }

    /// Finds the screen that owns the given component.
    pub fn component_owner(&self, id: ComponentId) -> Option<&Screen> {
        self.screens.iter().find(|s| s.component(id).is_some())
    }

    /// Looks up a component by id, scanning every screen.
    pub fn component(&self, id: ComponentId) -> Option<&WireframeComponent> {
        self.screens.iter().find_map(|s| s.component(id))
    }

    /// The selected screen, if the selection is a screen.
    pub fn selected_screen(&self) -> Option<&Screen> {
        self.selected_screen_id.and_then(|id| self.screen(id))
    }

    /// The selected component, if the selection is a component.
    pub fn selected_component(&self) -> Option<&WireframeComponent> {
        self.selected_component_id.and_then(|id| self.component(id))
    }

    /// Appends a new screen to the right of the existing ones and selects it.
    ///
    /// The n-th screen (0-based) is placed at `(50 + 450 * n, 50)` and titled `Screen {n+1}`.
    pub fn add_screen(&mut self) -> ScreenId {
        let count = self.screens.len();
        let screen = Screen::new(
            format!("Screen {}", count + 1),
            Position::new(SCREEN_MARGIN + SCREEN_SPACING * count as f32, SCREEN_MARGIN),
        );
        let id = screen.id;
        info!("added screen {id} ({})", screen.title);
        self.screens.push(screen);
        self.select_screen(id);
        id
    }

    /// Deep-copies a screen and its components under fresh ids, offset from the original.
    ///
    /// The copy is appended and selected. Returns `None` when `id` is unknown.
    pub fn duplicate_screen(&mut self, id: ScreenId) -> Option<ScreenId> {
        let Some(copy) = self.screen(id).map(Screen::duplicate) else {
            debug!("duplicate ignored: unknown screen {id}");
            return None;
        };
        let copy_id = copy.id;
        info!("duplicated screen {id} as {copy_id}");
        self.screens.push(copy);
        self.select_screen(copy_id);
        Some(copy_id)
    }

    /// Merges `update` onto the matching screen.
    ///
    /// Returns `false` when `id` is unknown.
    pub fn update_screen(&mut self, id: ScreenId, update: ScreenUpdate) -> bool {
        let Some(screen) = self.screen_mut(id) else {
            debug!("update ignored: unknown screen {id}");
            return false;
        };
        if let Some(title) = update.title {
            screen.title = title;
        }
        if let Some(position) = update.position {
            screen.position = position.clamp_non_negative();
        }
        true
    }

    /// Removes a screen, its components, and every connection touching it.
    ///
    /// Selection pointing into the removed screen is cleared. Returns `false` when
    /// `id` is unknown.
    pub fn delete_screen(&mut self, id: ScreenId) -> bool {
        let Some(index) = self.screens.iter().position(|s| s.id == id) else {
            debug!("delete ignored: unknown screen {id}");
            return false;
        };
        let removed = self.screens.remove(index);
        let before = self.connections.len();
        self.connections
            .retain(|c| c.from_screen_id != id && c.to_screen_id != id);
        info!(
            "deleted screen {id} and {} connection(s)",
            before - self.connections.len()
        );

        if self.selected_screen_id == Some(id) {
            self.selected_screen_id = None;
        }
        if let Some(selected) = self.selected_component_id {
            if removed.component(selected).is_some() {
                self.selected_component_id = None;
            }
        }
        true
    }

    /// Adds a component to the screen named by its `screen_id`, clamped into the content area.
    ///
    /// Returns `None` when the owning screen does not exist.
    pub fn add_component(&mut self, mut component: WireframeComponent) -> Option<ComponentId> {
        let screen_id = component.screen_id;
        let Some(screen) = self.screen_mut(screen_id) else {
            debug!("add component ignored: unknown screen {screen_id}");
            return None;
        };
        component.clamp_to_content();
        let id = component.id;
        info!("added component {id} to screen {screen_id}");
        screen.components.push(component);
        Some(id)
    }

    /// Merges `update` onto the matching component, then clamps it into the content area.
    ///
    /// Returns `false` when `id` is unknown.
    pub fn update_component(&mut self, id: ComponentId, update: ComponentUpdate) -> bool {
        let Some(component) = self
            .screens
            .iter_mut()
            .find_map(|s| s.component_mut(id))
        else {
            debug!("update ignored: unknown component {id}");
            return false;
        };
        if let Some(position) = update.position {
            component.position = position;
        }
        if let Some(size) = update.size {
            component.size = size;
        }
        if let Some(label) = update.label {
            component.label = label;
        }
        if let Some(color) = update.color {
            component.color = color;
        }
        component.clamp_to_content();
        true
    }

    /// Removes a component from its owning screen, clearing its selection.
    ///
    /// Returns `false` when `id` is unknown.
    pub fn delete_component(&mut self, id: ComponentId) -> bool {
        let mut removed = false;
        for screen in &mut self.screens {
            let before = screen.components.len();
            screen.components.retain(|c| c.id != id);
            if screen.components.len() != before {
                removed = true;
                break;
            }
        }
        if !removed {
            debug!("delete ignored: unknown component {id}");
            return false;
        }
        info!("deleted component {id}");
        if self.selected_component_id == Some(id) {
            self.selected_component_id = None;
        }
        true
    }

    /// Selects a screen and clears any component selection.
    ///
    /// Selecting an unknown id leaves nothing selected and returns `false`.
    pub fn select_screen(&mut self, id: ScreenId) -> bool {
        self.selected_component_id = None;
        if self.screen(id).is_none() {
            debug!("select ignored: unknown screen {id}");
            self.selected_screen_id = None;
            return false;
        }
        self.selected_screen_id = Some(id);
        true
    }

    /// Selects a component and clears any screen selection.
    ///
    /// Selecting an unknown id leaves nothing selected and returns `false`.
    pub fn select_component(&mut self, id: ComponentId) -> bool {
        self.selected_screen_id = None;
        if self.component(id).is_none() {
            debug!("select ignored: unknown component {id}");
            self.selected_component_id = None;
            return false;
        }
        self.selected_component_id = Some(id);
        true
    }

    /// Clears both selection fields.
    pub fn clear_selection(&mut self) {
        self.selected_screen_id = None;
        self.selected_component_id = None;
    }

    /// Removes every screen and connection.
    pub fn clear(&mut self) {
        info!(
            "cleared project ({} screen(s), {} connection(s))",
            self.screens.len(),
            self.connections.len()
        );
        *self = Self::default();
    }
}
