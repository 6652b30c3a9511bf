use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::crafting::{CraftStation, RecipeRegistry, WorkflowState};
use crate::interaction::CursorRay;
use crate::inventory::{Inventory, InventoryService};
use crate::progress::ProgressTracker;

/// Tracks debug panel visibility.
#[derive(Resource, Default)]
pub struct DebugUiState {
    pub visible: bool,
}

/// Toggles debug panel visibility on F3 press.
pub fn toggle_debug_panel(keyboard: Res<ButtonInput<KeyCode>>, mut state: ResMut<DebugUiState>) {
    if keyboard.just_pressed(KeyCode::F3) {
        state.visible = !state.visible;
    }
}

enum StockEdit {
    Add(String),
    Take(String),
}

/// Draws the debug inspector panel using egui.
#[allow(clippy::too_many_arguments)]
pub fn draw_debug_panel(
    mut contexts: EguiContexts,
    state: Res<DebugUiState>,
    station: Res<CraftStation>,
    registry: Res<RecipeRegistry>,
    tracker: Res<ProgressTracker>,
    cursor: Res<CursorRay>,
    mut inventory: ResMut<Inventory>,
    diagnostics: Res<DiagnosticsStore>,
) -> Result {
    if !state.visible {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;

    let panel_frame = egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 30, 200))
        .inner_margin(egui::Margin::same(8))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(60)));

    let mut edits = Vec::new();

    egui::SidePanel::left("debug_panel")
        .default_width(260.0)
        .resizable(false)
        .frame(panel_frame)
        .show(ctx, |ui| {
            ui.heading("Debug Panel");
            ui.separator();

            egui::CollapsingHeader::new(egui::RichText::new("Performance").strong())
                .default_open(false)
                .show(ui, |ui| {
                    let fps_text = diagnostics
                        .get(&FrameTimeDiagnosticsPlugin::FPS)
                        .and_then(|d| d.smoothed())
                        .map(|v| format!("{v:.1}"))
                        .unwrap_or_else(|| "...".to_string());
                    ui.label(format!("FPS: {fps_text}"));
                });

            egui::CollapsingHeader::new(egui::RichText::new("Workflow").strong())
                .default_open(true)
                .show(ui, |ui| {
                    egui::Grid::new("workflow_grid")
                        .num_columns(2)
                        .spacing([20.0, 4.0])
                        .show(ui, |ui| {
                            ui.label("State:");
                            match station.workflow.state() {
                                WorkflowState::Idle => ui.label("Idle"),
                                WorkflowState::Placing => {
                                    ui.colored_label(egui::Color32::LIGHT_BLUE, "Placing")
                                }
                            };
                            ui.end_row();

                            ui.label("Item at:");
                            match station.workflow.session() {
                                Some(session) => {
                                    let p = session.position;
                                    ui.monospace(format!("{:.1}, {:.1}, {:.1}", p.x, p.y, p.z))
                                }
                                None => ui.label("-"),
                            };
                            ui.end_row();

                            ui.label("Ray length:");
                            ui.monospace(format!("{:.0}", station.workflow.tuning().max_distance));
                            ui.end_row();

                            ui.label("Cursor:");
                            ui.label(if cursor.0.is_some() { "in window" } else { "outside" });
                            ui.end_row();

                            ui.label("Progress:");
                            ui.monospace(format!("{}/{}", tracker.placed, tracker.goal));
                            ui.end_row();
                        });

                    if let Some(reason) = &station.disabled {
                        ui.colored_label(egui::Color32::LIGHT_RED, reason.to_string());
                    }
                });

            egui::CollapsingHeader::new(egui::RichText::new("Recipes").strong())
                .default_open(false)
                .show(ui, |ui| {
                    let craftable = registry.craftable_recipes(&*inventory);
                    ui.label(format!("{}/{} craftable", craftable.len(), registry.len()));
                    for recipe in registry.iter() {
                        let color = if !station.offers(&recipe.id) {
                            egui::Color32::DARK_GRAY
                        } else if craftable.iter().any(|r| r.id == recipe.id) {
                            egui::Color32::LIGHT_GREEN
                        } else {
                            egui::Color32::GRAY
                        };
                        ui.colored_label(color, &recipe.display_name);
                    }
                });

            egui::CollapsingHeader::new(egui::RichText::new("Inventory").strong())
                .default_open(true)
                .show(ui, |ui| {
                    egui::Grid::new("inventory_grid")
                        .num_columns(3)
                        .spacing([12.0, 4.0])
                        .show(ui, |ui| {
                            for (name, count) in inventory.snapshot() {
                                ui.label(&name);
                                ui.monospace(count.to_string());
                                ui.horizontal(|ui| {
                                    if ui.small_button("-").clicked() {
                                        edits.push(StockEdit::Take(name.clone()));
                                    }
                                    if ui.small_button("+").clicked() {
                                        edits.push(StockEdit::Add(name.clone()));
                                    }
                                });
                                ui.end_row();
                            }
                        });
                });
        });

    for edit in edits {
        match edit {
            StockEdit::Add(name) => {
                inventory.add(&name, 1);
            }
            StockEdit::Take(name) => {
                if let Err(err) = inventory.decrement(&name, 1) {
                    debug!("Debug stock edit rejected: {err}");
                }
            }
        }
    }

    Ok(())
}
