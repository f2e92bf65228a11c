//! Canvas rendering for screens, components and connections.
//!
//! Drawing order matches hit-testing order: screens in project order, each with its
//! components in order, so whatever is drawn last is what a click lands on.
//! Connections are drawn above all screens.

use super::state::WireframerApp;
use crate::constants::*;
use crate::geometry::{arrow_head, label_origin};
use crate::interaction::{screen_frame_size, GestureState};
use crate::types::*;
use eframe::egui;
use eframe::epaint::StrokeKind;

const SELECTION_COLOR: egui::Color32 = egui::Color32::from_rgb(100, 150, 255);
const CONNECTION_COLOR: egui::Color32 = egui::Color32::from_rgb(0xF5, 0x9E, 0x0B);

/// Screen colour of a palette entry, used for a component's border and label.
pub(super) fn palette_color(color: ComponentColor) -> egui::Color32 {
    let (r, g, b) = color.rgb();
    egui::Color32::from_rgb(r, g, b)
}

impl WireframerApp {
    /// Renders every project element on the canvas.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `canvas_rect` - The screen-space rectangle of the canvas area
    pub fn render_project(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        if self.settings.show_grid {
            self.draw_grid(painter, canvas_rect);
        }

        let project = self.session.project();
        for screen in &project.screens {
            self.draw_screen(painter, screen);
        }
        for connection in &project.connections {
            self.draw_connection(painter, connection);
        }

        if self.session.gesture_state() == GestureState::Connecting {
            self.draw_connecting_hint(painter, canvas_rect);
        }
    }

    /// Draws a fixed grid behind everything.
    pub fn draw_grid(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let stroke = egui::Stroke::new(
            1.0,
            egui::Color32::from_rgba_unmultiplied(128, 128, 128, 32),
        );

        let mut x = canvas_rect.min.x;
        while x <= canvas_rect.max.x {
            painter.line_segment(
                [
                    egui::pos2(x, canvas_rect.min.y),
                    egui::pos2(x, canvas_rect.max.y),
                ],
                stroke,
            );
            x += GRID_SIZE;
        }

        let mut y = canvas_rect.min.y;
        while y <= canvas_rect.max.y {
            painter.line_segment(
                [
                    egui::pos2(canvas_rect.min.x, y),
                    egui::pos2(canvas_rect.max.x, y),
                ],
                stroke,
            );
            y += GRID_SIZE;
        }
    }

    /// Draws a screen frame: header with title and menu button, then the content area
    /// and its components.
    fn draw_screen(&self, painter: &egui::Painter, screen: &Screen) {
        let project = self.session.project();
        let frame = screen_frame_size();
        let frame_rect = self.model_rect(screen.position, frame.width, frame.height);
        let header_rect = self.model_rect(screen.position, CONTENT_WIDTH, HEADER_HEIGHT);
        let content_rect =
            self.model_rect(screen.content_origin(), CONTENT_WIDTH, CONTENT_HEIGHT);

        let (background, header_fill, text_color) = if self.settings.dark_mode {
            (
                egui::Color32::from_gray(250),
                egui::Color32::from_gray(60),
                egui::Color32::from_gray(230),
            )
        } else {
            (
                egui::Color32::WHITE,
                egui::Color32::from_gray(225),
                egui::Color32::from_gray(30),
            )
        };

        painter.rect_filled(frame_rect, CORNER_RADIUS, background);
        painter.rect_filled(header_rect, CORNER_RADIUS, header_fill);
        painter.text(
            header_rect.left_center() + egui::vec2(10.0, 0.0),
            egui::Align2::LEFT_CENTER,
            &screen.title,
            egui::FontId::proportional(14.0),
            text_color,
        );

        let menu_rect = egui::Rect::from_min_max(
            egui::pos2(header_rect.max.x - MENU_BUTTON_WIDTH, header_rect.min.y),
            header_rect.max,
        );
        painter.text(
            menu_rect.center(),
            egui::Align2::CENTER_CENTER,
            "⋮",
            egui::FontId::proportional(16.0),
            text_color,
        );

        let content_painter = painter.with_clip_rect(content_rect);
        for component in &screen.components {
            self.draw_component(&content_painter, screen, component);
        }

        let selected = project.selected_screen_id == Some(screen.id);
        let stroke = if selected {
            egui::Stroke::new(2.0, SELECTION_COLOR)
        } else {
            egui::Stroke::new(1.0, egui::Color32::from_gray(140))
        };
        painter.rect_stroke(frame_rect, CORNER_RADIUS, stroke, StrokeKind::Outside);
    }

    fn draw_component(&self, painter: &egui::Painter, screen: &Screen, component: &WireframeComponent) {
        let rect = self.model_rect(
            component.absolute_origin(screen),
            component.size.width,
            component.size.height,
        );
        let color = palette_color(component.color);
        painter.rect_filled(rect, CORNER_RADIUS, egui::Color32::WHITE);
        painter.rect_stroke(
            rect,
            CORNER_RADIUS,
            egui::Stroke::new(2.0, color),
            StrokeKind::Inside,
        );

        let editing = self
            .session
            .label_edit()
            .is_some_and(|edit| edit.component_id == component.id);
        if !editing {
            painter
                .with_clip_rect(rect.intersect(painter.clip_rect()))
                .text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    &component.label,
                    egui::FontId::proportional(13.0),
                    color,
                );
        }

        if self.session.project().selected_component_id == Some(component.id) {
            painter.rect_stroke(
                rect,
                CORNER_RADIUS,
                egui::Stroke::new(2.0, SELECTION_COLOR),
                StrokeKind::Outside,
            );
            let handle = egui::Rect::from_min_max(
                rect.max - egui::vec2(RESIZE_HANDLE_SIZE, RESIZE_HANDLE_SIZE),
                rect.max,
            );
            painter.rect_filled(handle, 1.0, SELECTION_COLOR);
        }
    }

    /// Draws a connection from its stored endpoints: line, arrow head and label.
    pub fn draw_connection(&self, painter: &egui::Painter, connection: &Connection) {
        // Zero-length connections are not drawn
        let Some(head) = arrow_head(connection.start_point, connection.end_point) else {
            return;
        };
        let start = self.model_to_canvas(connection.start_point);
        let end = self.model_to_canvas(connection.end_point);
        painter.line_segment([start, end], egui::Stroke::new(2.0, CONNECTION_COLOR));

        painter.add(egui::Shape::convex_polygon(
            vec![
                self.model_to_canvas(head.tip),
                self.model_to_canvas(head.left),
                self.model_to_canvas(head.right),
            ],
            CONNECTION_COLOR,
            egui::Stroke::NONE,
        ));

        let label_rect = self.model_rect(
            label_origin(connection.start_point, connection.end_point),
            LABEL_BOX_WIDTH,
            2.0 * LABEL_BOX_RAISE,
        );
        painter.rect_filled(label_rect, CORNER_RADIUS, egui::Color32::from_black_alpha(180));
        painter.text(
            label_rect.center(),
            egui::Align2::CENTER_CENTER,
            &connection.description,
            egui::FontId::proportional(12.0),
            egui::Color32::WHITE,
        );
    }

    /// Marks the pending source while waiting for the target click.
    fn draw_connecting_hint(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let Some(source) = self.session.pending_source() else {
            return;
        };
        let project = self.session.project();
        let Some(screen) = project.screen(source.screen_id) else {
            return;
        };
        let rect = match source.component_id.and_then(|id| screen.component(id)) {
            Some(component) => self.model_rect(
                component.absolute_origin(screen),
                component.size.width,
                component.size.height,
            ),
            None => {
                let frame = screen_frame_size();
                self.model_rect(screen.position, frame.width, frame.height)
            }
        };
        painter.rect_stroke(
            rect.expand(3.0),
            CORNER_RADIUS,
            egui::Stroke::new(2.0, CONNECTION_COLOR),
            StrokeKind::Outside,
        );
        painter.text(
            canvas_rect.left_bottom() + egui::vec2(10.0, -10.0),
            egui::Align2::LEFT_BOTTOM,
            "Click a target screen, or empty canvas to cancel",
            egui::FontId::proportional(13.0),
            CONNECTION_COLOR,
        );
    }
}
