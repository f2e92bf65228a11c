//! # Wireframer
//!
//! A wireframe editor for sketching application flows. The canvas holds fixed-size
//! **screens**; each screen holds labelled, coloured **components** confined to its
//! content area, and **connections** link a screen or component to another screen.
//!
//! ## Features
//! - Drag screens by their title bar and components within their screen
//! - Resize the selected component from its corner handle
//! - Double-click inside a screen to add a component, or on a component to rename it
//! - Draw connections from the selection to a target screen, routed edge to edge
//! - Duplicate and delete screens from their menu
//! - Property panel for titles, labels, colours, positions and sizes
//!
//! The editing engine ([`EditorSession`], [`Project`] and the routing and geometry
//! helpers) has no dependency on the user interface and can be driven directly.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod geometry;
pub mod interaction;
pub mod routing;
mod types;
mod ui;

pub use interaction::{EditorSession, Gesture, GestureState, HitTarget};
pub use routing::PendingSource;
pub use types::*;
pub use ui::{EditorSettings, WireframerApp};

/// Runs the wireframe editor with default window options.
///
/// This function initializes the egui application window and starts the main event loop.
/// Editor settings saved by a previous run are restored.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use wireframer::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Wireframer",
        options,
        Box::new(|cc| Ok(Box::new(WireframerApp::new(cc)))),
    )
}
