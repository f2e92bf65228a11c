//! Shared application-wide constants.
//! Centralizes the geometry every part of the editor agrees on.

// Screens
/// Canonical screen width in canvas units. Screens are never resized.
pub const SCREEN_WIDTH: f32 = 400.0;
/// Canonical screen height in canvas units.
pub const SCREEN_HEIGHT: f32 = 300.0;
/// Height of the title bar drawn above a screen's content area.
pub const HEADER_HEIGHT: f32 = 40.0;
/// Width of the menu button at the right end of a screen header.
pub const MENU_BUTTON_WIDTH: f32 = 32.0;
/// Horizontal distance between consecutively added screens.
pub const SCREEN_SPACING: f32 = 450.0;
/// Left/top margin of the first added screen.
pub const SCREEN_MARGIN: f32 = 50.0;
/// Offset applied on both axes to a duplicated screen.
pub const DUPLICATE_OFFSET: f32 = 50.0;

// Content area
/// Width of the area components may occupy, independent of the component's own size.
pub const CONTENT_WIDTH: f32 = 400.0;
/// Height of the area components may occupy.
pub const CONTENT_HEIGHT: f32 = 300.0;

// Components
/// Smallest allowed component width.
pub const MIN_COMPONENT_WIDTH: f32 = 40.0;
/// Smallest allowed component height.
pub const MIN_COMPONENT_HEIGHT: f32 = 20.0;
/// Size given to components created by double-click.
pub const DEFAULT_COMPONENT_WIDTH: f32 = 100.0;
/// Height given to components created by double-click.
pub const DEFAULT_COMPONENT_HEIGHT: f32 = 50.0;
/// Side of the square resize handle in a selected component's bottom-right corner.
pub const RESIZE_HANDLE_SIZE: f32 = 10.0;

// Connections
/// Length of an arrow head along the connection direction.
pub const ARROW_HEAD_LENGTH: f32 = 10.0;
/// Nominal width of a connection label box; the label is centered on the midpoint.
pub const LABEL_BOX_WIDTH: f32 = 150.0;
/// Vertical offset of the label box above the midpoint.
pub const LABEL_BOX_RAISE: f32 = 10.0;
/// Description used for connections that start at a whole screen.
pub const SCREEN_CONNECTION_DESCRIPTION: &str = "Navigate";
/// Description used for connections that start at a component.
pub const COMPONENT_CONNECTION_DESCRIPTION: &str = "Click";

// Canvas
/// Spacing of the background grid.
pub const GRID_SIZE: f32 = 20.0;
/// Corner rounding of screen frames and components.
pub const CORNER_RADIUS: f32 = 4.0;
