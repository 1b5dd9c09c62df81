use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::color::LADDER_COLOR;
use crate::data::run::RunAnalysis;
use crate::state::{AppState, PlotView};

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the active plot in the central panel.
pub fn central_plot(ui: &mut Ui, state: &AppState) {
    let analysis = match &state.analysis {
        Some(a) => a,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a run folder to view traces  (File → Open run folder…)");
            });
            return;
        }
    };

    match state.view {
        PlotView::Overlay => overlay_plot(ui, state, analysis),
        PlotView::Linearity => linearity_plot(ui, analysis),
    }
}

// ---------------------------------------------------------------------------
// Sample overlay: intensity vs calibrated size
// ---------------------------------------------------------------------------

/// `[size, intensity]` points of one column, limited to the size window.
fn sized_points(size: &[f64], intensity: &[f64], min: f64, max: f64) -> PlotPoints<'static> {
    size.iter()
        .zip(intensity)
        .filter(|(&s, _)| s >= min && s <= max)
        .map(|(&s, &y)| [s, y])
        .collect()
}

fn overlay_plot(ui: &mut Ui, state: &AppState, analysis: &RunAnalysis) {
    let table = &analysis.table;
    let (min, max) = (state.min_lim, state.max_lim);

    Plot::new("overlay_plot")
        .legend(Legend::default())
        .x_axis_label(format!("Size [{}]", table.unit))
        .y_axis_label("Intensity")
        .include_x(min)
        .include_x(max)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if state.show_ladder {
                let line = Line::new(sized_points(&table.size, &table.ladder, min, max))
                    .name("Ladder")
                    .color(LADDER_COLOR)
                    .width(1.5);
                plot_ui.line(line);
            }

            for label in table.sample_labels() {
                if !state.visible_samples.contains(label) {
                    continue;
                }
                let Some(intensity) = table.sample(label) else {
                    continue;
                };
                let color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(label))
                    .unwrap_or(eframe::egui::Color32::LIGHT_BLUE);

                let line = Line::new(sized_points(&table.size, intensity, min, max))
                    .name(state.legend_name(label))
                    .color(color)
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Linearity check: ladder size vs migration time
// ---------------------------------------------------------------------------

fn linearity_plot(ui: &mut Ui, analysis: &RunAnalysis) {
    let ladder = &analysis.ladder;
    let knots: Vec<[f64; 2]> = analysis
        .calibration
        .knots()
        .map(|(time, size)| [size, time])
        .collect();

    Plot::new("linearity_plot")
        .legend(Legend::default())
        .x_axis_label(format!("Size [{}]", ladder.unit))
        .y_axis_label("Migration time [s]")
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(knots.clone()))
                    .name("Ladder")
                    .color(LADDER_COLOR)
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(knots))
                    .name("Ladder")
                    .color(LADDER_COLOR)
                    .radius(4.0),
            );
        });
}
