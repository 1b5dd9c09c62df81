use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::LADDER_COLOR;
use crate::data::assay::AssayType;
use crate::data::run::RunSource;
use crate::state::{AppState, PlotView};

// ---------------------------------------------------------------------------
// Left side panel – ladder, range and sample widgets
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Run");
    ui.separator();

    let Some(analysis) = &state.analysis else {
        ui.label("No run loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let labels: Vec<String> = analysis.table.sample_labels().map(str::to_string).collect();
    let ladder = analysis.ladder.clone();
    let run_dir = analysis.files.dir.display().to_string();
    let rows = analysis.table.len();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.label(RichText::new(run_dir).small());
            ui.label(format!("{} · {rows} rows", state.assay));
            ui.separator();

            // ---- Size window ----
            ui.strong(format!("Size range [{}]", ladder.unit));
            ui.horizontal(|ui: &mut Ui| {
                ui.add(egui::DragValue::new(&mut state.min_lim).speed(1.0).prefix("min "));
                ui.add(egui::DragValue::new(&mut state.max_lim).speed(1.0).prefix("max "));
            });
            if state.min_lim >= state.max_lim {
                ui.label(RichText::new("min must be below max").color(Color32::RED));
            }
            ui.separator();

            // ---- Samples ----
            ui.checkbox(
                &mut state.show_ladder,
                RichText::new("Ladder").color(LADDER_COLOR),
            );
            ui.horizontal(|ui: &mut Ui| {
                ui.strong(format!(
                    "Samples  ({}/{})",
                    state.visible_samples.len(),
                    labels.len()
                ));
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });
            for label in &labels {
                let mut text = RichText::new(state.legend_name(label));
                if let Some(cm) = &state.color_map {
                    text = text.color(cm.color_for(label));
                }
                let mut checked = state.visible_samples.contains(label);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_sample(label);
                }
            }
            ui.separator();

            // ---- Ladder table ----
            egui::CollapsingHeader::new(RichText::new("Ladder peaks").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    TableBuilder::new(ui)
                        .striped(true)
                        .vscroll(false)
                        .column(Column::auto())
                        .column(Column::remainder())
                        .header(18.0, |mut header| {
                            header.col(|ui| {
                                ui.strong(format!("Size [{}]", ladder.unit));
                            });
                            header.col(|ui| {
                                ui.strong("Time [s]");
                            });
                        })
                        .body(|mut body| {
                            for p in &ladder.points {
                                body.row(16.0, |mut row| {
                                    row.col(|ui| {
                                        ui.label(format!("{}", p.expected_size));
                                    });
                                    row.col(|ui| {
                                        ui.label(format!("{:.2}", p.migration_time));
                                    });
                                });
                            }
                        });
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open run folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        let mut assay = state.assay;
        egui::ComboBox::from_id_salt("assay_type")
            .selected_text(assay.name())
            .show_ui(ui, |ui: &mut Ui| {
                for a in AssayType::ALL {
                    ui.selectable_value(&mut assay, a, a.name());
                }
            });
        if assay != state.assay {
            state.set_assay(assay);
        }

        ui.separator();

        ui.selectable_value(&mut state.view, PlotView::Overlay, "Overlay");
        ui.selectable_value(&mut state.view, PlotView::Linearity, "Linearity");

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open BioAnalyzer run folder")
        .pick_folder();

    if let Some(dir) = folder {
        match state.load(RunSource::from_dir(&dir)) {
            Ok(()) => {
                if let Some(analysis) = &state.analysis {
                    log::info!(
                        "Loaded {} samples from {}",
                        analysis.table.samples.len(),
                        analysis.files.dir.display()
                    );
                }
            }
            Err(e) => {
                log::error!("Failed to load run: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
