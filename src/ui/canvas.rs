//! Canvas input handling and coordinate conversion.
//!
//! Turns egui pointer state into [`EditorSession`](crate::interaction::EditorSession)
//! calls. Model coordinates are canvas-relative: the canvas's top-left corner is the
//! model origin.

use super::state::WireframerApp;
use crate::types::Position;
use eframe::egui;

impl WireframerApp {
    /// Converts a screen-space point to model coordinates.
    ///
    /// # Arguments
    ///
    /// * `pos` - Position in screen space (pixels)
    pub fn canvas_to_model(&self, pos: egui::Pos2) -> Position {
        Position::new(pos.x - self.canvas_origin.x, pos.y - self.canvas_origin.y)
    }

    /// Converts a model point to screen space.
    pub fn model_to_canvas(&self, position: Position) -> egui::Pos2 {
        egui::pos2(
            position.x + self.canvas_origin.x,
            position.y + self.canvas_origin.y,
        )
    }

    /// Converts a model rectangle to screen space.
    pub fn model_rect(&self, origin: Position, width: f32, height: f32) -> egui::Rect {
        egui::Rect::from_min_size(self.model_to_canvas(origin), egui::vec2(width, height))
    }

    /// Forwards this frame's pointer activity to the session.
    ///
    /// Presses only count when they land on the canvas. Once a gesture holds the
    /// pointer capture, moves and the release are forwarded wherever they happen.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `response` - The response from the canvas widget
    pub fn handle_canvas_input(&mut self, ui: &egui::Ui, response: &egui::Response) {
        let (pressed, released, moved, pointer) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.delta() != egui::Vec2::ZERO,
                i.pointer.latest_pos(),
            )
        });
        if let Some(pointer) = pointer {
            let point = self.canvas_to_model(pointer);
            if pressed && response.contains_pointer() {
                self.session.pointer_down(point);
            }
            if moved && self.session.input_surface().is_captured() {
                self.session.pointer_move(point);
            }
        }
        // The release may arrive together with the pointer leaving the window
        if released {
            self.session.pointer_up();
        }
        if let Some(pointer) = pointer {
            if response.double_clicked() {
                self.session.double_click(self.canvas_to_model(pointer));
            }
        }
    }
}
