use eframe::egui;

use crate::data::run::RunAnalysis;
use crate::state::AppState;
use crate::ui::{panels, plot};

const APP_NAME: &str = "Rusty BioAnalyzer";

/// Trace viewer window over one analysed run.
pub struct BioAnalyzerApp {
    pub state: AppState,
    /// Title last sent to the viewport; resent only when the run changes.
    title: String,
}

impl BioAnalyzerApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            title: String::new(),
        }
    }
}

/// "Rusty BioAnalyzer – <run> (<assay>)", or the bare name with no run.
pub fn window_title(state: &AppState) -> String {
    match (&state.source, &state.analysis) {
        (Some(source), Some(analysis)) => {
            format!("{APP_NAME} – {} ({})", source.run, analysis.assay)
        }
        _ => APP_NAME.to_string(),
    }
}

/// One-line summary of the loaded run for the status bar.
pub fn run_summary(analysis: &RunAnalysis) -> String {
    let (first, last) = analysis
        .calibration
        .knots()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (t, _)| {
            (lo.min(t), hi.max(t))
        });
    format!(
        "{} · {} sample(s) · {} rows · ladder peaks {first:.2}–{last:.2} s",
        analysis.files.dir.display(),
        analysis.table.samples.len(),
        analysis.table.len(),
    )
}

impl eframe::App for BioAnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let title = window_title(&self.state);
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // Bottom panels must be added before the central plot claims the rest.
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let text = match &self.state.analysis {
                Some(analysis) => run_summary(analysis),
                None => "No run loaded".to_string(),
            };
            ui.small(text);
        });

        egui::SidePanel::left("samples_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            plot::central_plot(ui, &self.state);
        });
    }
}
