//! UI components using egui.

use egui::{Align2, Color32, Context, CornerRadius, Frame, Margin, RichText, Stroke, Vec2};
use polydraw_core::controller::SceneController;
use polydraw_core::input::Command;

/// Actions that can be triggered by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Close the pending vertices into a polygon.
    Complete,
    /// Spawn a copy of the last polygon.
    Copy,
    /// Clear the scene.
    Reset,
}

impl UiAction {
    /// The controller command this action triggers.
    pub fn command(self) -> Command {
        match self {
            UiAction::Complete => Command::Complete,
            UiAction::Copy => Command::Copy,
            UiAction::Reset => Command::Reset,
        }
    }
}

/// Snapshot of controller state shown in the status line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub state_name: &'static str,
    pub pending_vertices: usize,
    pub placed_shapes: usize,
    pub copied_shapes: usize,
    pub copy_mode: bool,
}

impl UiState {
    pub fn from_controller(controller: &SceneController) -> Self {
        Self {
            state_name: controller.state().name(),
            pending_vertices: controller.pending_vertices().len(),
            placed_shapes: controller.placed_shapes().len(),
            copied_shapes: controller.copied_shapes().len(),
            copy_mode: controller.is_copy_mode(),
        }
    }

    /// One-line status text.
    pub fn status_text(&self) -> String {
        format!(
            "{} | vertices: {} | polygons: {} | copies: {}",
            self.state_name, self.pending_vertices, self.placed_shapes, self.copied_shapes
        )
    }
}

/// Render all UI panels and return the triggered action, if any.
pub fn render_ui(ctx: &Context, ui_state: &UiState) -> Option<UiAction> {
    let action = render_command_panel(ctx);
    render_status_bar(ctx, ui_state);
    action
}

fn panel_frame() -> Frame {
    Frame::new()
        .fill(Color32::from_rgba_unmultiplied(250, 250, 252, 250))
        .corner_radius(CornerRadius::same(8))
        .stroke(Stroke::new(1.0, Color32::from_gray(220)))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 6,
            offset: [0, 2],
            color: Color32::from_black_alpha(10),
        })
        .inner_margin(Margin::symmetric(12, 6))
}

fn render_command_panel(ctx: &Context) -> Option<UiAction> {
    let mut action = None;

    egui::Area::new(egui::Id::new("command_panel"))
        .anchor(Align2::LEFT_TOP, Vec2::new(12.0, 12.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing = Vec2::new(6.0, 0.0);

                    if ui.button("Complete").on_hover_text("Enter").clicked() {
                        action = Some(UiAction::Complete);
                    }
                    if ui.button("Copy").on_hover_text("C").clicked() {
                        action = Some(UiAction::Copy);
                    }
                    if ui.button("Reset").on_hover_text("Escape").clicked() {
                        action = Some(UiAction::Reset);
                    }
                });
            });
        });

    action
}

fn render_status_bar(ctx: &Context, ui_state: &UiState) {
    egui::Area::new(egui::Id::new("status_bar"))
        .anchor(Align2::LEFT_BOTTOM, Vec2::new(12.0, -12.0))
        .interactable(false)
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                let color = if ui_state.copy_mode {
                    Color32::from_rgb(0xFF, 0x58, 0x33)
                } else {
                    Color32::from_gray(80)
                };
                ui.label(RichText::new(ui_state.status_text()).size(12.0).color(color));
            });
        });
}
