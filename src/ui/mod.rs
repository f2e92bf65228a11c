//! User interface for the wireframe editor.
//!
//! This module only translates: egui input becomes
//! [`EditorSession`](crate::interaction::EditorSession) calls, and the session's
//! project is painted back onto the canvas.
//!
//! # Module Organization
//!
//! - `state` - Persisted settings and the main WireframerApp
//! - `canvas` - Coordinate conversion and pointer forwarding
//! - `rendering` - Drawing screens, components and connections

mod canvas;
mod rendering;
mod state;


pub use state::{EditorSettings, WireframerApp, SETTINGS_KEY};

use crate::constants::*;
use crate::interaction::GestureState;
use crate::types::*;
use eframe::egui;
use log::warn;

impl eframe::App for WireframerApp {
    /// Persist the editor settings between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.settings.to_json() {
            Ok(json) => {
                storage.set_string(SETTINGS_KEY, json);
            }
            Err(err) => {
                warn!("failed to serialize editor settings: {err}");
            }
        }
    }

    /// Main update function called by egui for each frame.
    ///
    /// Lays out the toolbar, the properties panel and the canvas, after routing
    /// keyboard shortcuts to the session.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals = if self.settings.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        self.handle_keyboard(ctx);

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::SidePanel::right("properties_panel")
            .resizable(true)
            .default_width(self.settings.properties_panel_width)
            .show(ctx, |ui| {
                self.settings.properties_panel_width = ui.available_width().max(180.0);
                self.draw_properties_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });

        if self.pending_clear {
            self.draw_clear_confirmation(ctx);
        }
    }
}

impl WireframerApp {
    /// Routes Enter, Escape and Delete/Backspace to the session.
    ///
    /// Delete and Backspace are left alone while a text field has focus, so typing
    /// in the property panel never removes a component.
    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        let (enter, escape, delete) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Enter),
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace),
            )
        });
        if enter {
            self.session.key_enter();
        }
        if escape {
            self.session.key_escape();
        }
        if delete && !ctx.wants_keyboard_input() {
            self.session.key_delete();
        }
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Add Screen").clicked() {
                self.session.add_screen();
            }

            ui.separator();

            if self.session.gesture_state() == GestureState::Connecting {
                ui.label("Description:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.session.connection_description)
                        .hint_text("Click / Navigate")
                        .desired_width(160.0),
                );
                if ui.button("Cancel").clicked() {
                    self.session.cancel_connection();
                }
            } else {
                let can_connect = self.session.can_start_connection();
                let button = ui
                    .add_enabled(can_connect, egui::Button::new("Connect"))
                    .on_disabled_hover_text("Select a screen or component first");
                if button.clicked() {
                    self.session.start_connection();
                }
            }

            ui.separator();

            if ui.button("Clear All").clicked() {
                self.request_clear();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let theme = if self.settings.dark_mode { "☀ Light" } else { "🌙 Dark" };
                if ui.button(theme).clicked() {
                    self.settings.dark_mode = !self.settings.dark_mode;
                }
                ui.checkbox(&mut self.settings.show_grid, "Grid");
            });
        });
    }

    /// Asks for confirmation before the whole project is removed.
    pub fn request_clear(&mut self) {
        self.pending_clear = true;
    }

    /// Removes every screen and connection after the user confirmed.
    pub fn confirm_clear(&mut self) {
        if self.pending_clear {
            self.pending_clear = false;
            self.session.clear_project();
        }
    }

    /// Dismisses the confirmation and keeps the project.
    pub fn cancel_clear(&mut self) {
        self.pending_clear = false;
    }

    fn draw_clear_confirmation(&mut self, ctx: &egui::Context) {
        egui::Window::new("Clear wireframe?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("Are you sure you want to clear the entire wireframe?");
                ui.horizontal(|ui| {
                    if ui.button("Clear").clicked() {
                        self.confirm_clear();
                    }
                    if ui.button("Cancel").clicked() {
                        self.cancel_clear();
                    }
                });
            });
    }

    fn draw_properties_panel(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.heading("Properties");
                ui.separator();

                let project = self.session.project();
                let component = project.selected_component().cloned();
                let screen = project.selected_screen().cloned();
                if let Some(component) = component {
                    self.draw_component_properties(ui, &component);
                } else if let Some(screen) = screen {
                    self.draw_screen_properties(ui, &screen);
                } else {
                    Self::draw_no_selection_info(ui);
                }
            });
    }

    fn draw_screen_properties(&mut self, ui: &mut egui::Ui, screen: &Screen) {
        ui.label("Type: Screen");
        ui.separator();

        ui.label("Title:");
        let mut title = screen.title.clone();
        if ui.text_edit_singleline(&mut title).changed() {
            self.session.update_screen(screen.id, ScreenUpdate::title(title));
        }

        ui.label("Position:");
        let mut position = screen.position;
        let changed = ui
            .horizontal(|ui| {
                let x = ui.add(egui::DragValue::new(&mut position.x).prefix("x: ").range(0.0..=f32::MAX));
                let y = ui.add(egui::DragValue::new(&mut position.y).prefix("y: ").range(0.0..=f32::MAX));
                x.changed() || y.changed()
            })
            .inner;
        if changed {
            self.session.update_screen(screen.id, ScreenUpdate::position(position));
        }

        ui.label(format!("Components: {}", screen.components.len()));
        ui.separator();

        ui.horizontal(|ui| {
            if ui.button("Duplicate").clicked() {
                self.session.duplicate_screen(screen.id);
            }
            if ui.button("Delete").clicked() {
                self.session.delete_screen(screen.id);
            }
        });
    }

    fn draw_component_properties(&mut self, ui: &mut egui::Ui, component: &WireframeComponent) {
        ui.label("Type: Component");
        ui.separator();

        ui.label("Label:");
        let mut label = component.label.clone();
        if ui.text_edit_singleline(&mut label).changed() {
            self.session.update_component(component.id, ComponentUpdate::label(label));
        }

        ui.label("Color:");
        let mut color = component.color;
        egui::ComboBox::from_id_salt("component_color")
            .selected_text(color.name())
            .show_ui(ui, |ui| {
                for option in ComponentColor::ALL {
                    ui.selectable_value(&mut color, option, option.name())
                        .on_hover_text(option.hex());
                }
            });
        if color != component.color {
            self.session.update_component(component.id, ComponentUpdate::color(color));
        }

        ui.label("Position:");
        let mut position = component.position;
        let moved = ui
            .horizontal(|ui| {
                let x = ui.add(egui::DragValue::new(&mut position.x).prefix("x: "));
                let y = ui.add(egui::DragValue::new(&mut position.y).prefix("y: "));
                x.changed() || y.changed()
            })
            .inner;
        if moved {
            self.session
                .update_component(component.id, ComponentUpdate::position(position));
        }

        ui.label("Size:");
        let mut size = component.size;
        let resized = ui
            .horizontal(|ui| {
                let w = ui.add(
                    egui::DragValue::new(&mut size.width)
                        .prefix("w: ")
                        .range(MIN_COMPONENT_WIDTH..=CONTENT_WIDTH),
                );
                let h = ui.add(
                    egui::DragValue::new(&mut size.height)
                        .prefix("h: ")
                        .range(MIN_COMPONENT_HEIGHT..=CONTENT_HEIGHT),
                );
                w.changed() || h.changed()
            })
            .inner;
        if resized {
            self.session.update_component(component.id, ComponentUpdate::size(size));
        }

        ui.separator();
        if ui.button("Delete Component").clicked() {
            self.session.delete_component(component.id);
        }
    }

    fn draw_no_selection_info(ui: &mut egui::Ui) {
        ui.label("Nothing selected.");
        ui.add_space(8.0);
        ui.label("Drag a screen by its title bar.");
        ui.label("Double-click inside a screen to add a component.");
        ui.label("Double-click a component to rename it.");
    }

    fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        self.canvas_origin = response.rect.min;

        self.handle_canvas_input(ui, &response);
        self.render_project(&painter, response.rect);

        self.draw_label_editor(ui);
        if let Some(screen_id) = self.session.open_menu() {
            self.draw_screen_menu(ui.ctx(), screen_id);
        }
    }

    /// Overlays a text field on the component whose label is being edited.
    fn draw_label_editor(&mut self, ui: &mut egui::Ui) {
        let Some(edit) = self.session.label_edit() else {
            return;
        };
        let project = self.session.project();
        let Some(screen) = project.component_owner(edit.component_id) else {
            return;
        };
        let Some(component) = screen.component(edit.component_id) else {
            return;
        };
        let rect = self.model_rect(
            component.absolute_origin(screen),
            component.size.width,
            component.size.height,
        );

        let mut draft = edit.draft.clone();
        let response = ui.put(
            rect.shrink(2.0),
            egui::TextEdit::singleline(&mut draft).horizontal_align(egui::Align::Center),
        );
        if !response.has_focus() {
            response.request_focus();
        }
        if response.changed() {
            self.session.set_label_draft(draft);
        }
    }

    /// Pops up Duplicate/Delete under a screen's menu button.
    fn draw_screen_menu(&mut self, ctx: &egui::Context, screen_id: ScreenId) {
        let Some(screen) = self.session.project().screen(screen_id) else {
            self.session.close_menu();
            return;
        };
        let anchor = self.model_to_canvas(
            screen
                .position
                .offset(CONTENT_WIDTH - MENU_BUTTON_WIDTH, HEADER_HEIGHT),
        );

        egui::Area::new(egui::Id::new(("screen_menu", screen_id)))
            .order(egui::Order::Foreground)
            .fixed_pos(anchor)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    if ui.button("Duplicate").clicked() {
                        self.session.duplicate_screen(screen_id);
                    }
                    if ui.button("Delete").clicked() {
                        self.session.delete_screen(screen_id);
                    }
                });
            });
    }
}
