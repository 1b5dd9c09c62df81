mod app;
mod cli;
mod color;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Result};
use app::BioAnalyzerApp;
use clap::Parser;
use eframe::egui;

use crate::data::export::export_run;
use crate::state::{AppState, PlotView};

fn main() -> Result<()> {
    env_logger::init();
    let args = cli::Args::parse();

    let (min_lim, max_lim) = args.plot_range()?;
    let mut state = AppState::new(args.assay_type);
    state.strict = args.strict;
    state.load(args.source())?;
    state.select_samples(&args.samples, &args.labels)?;
    state.show_ladder = !args.no_ladder;
    state.min_lim = min_lim;
    state.max_lim = max_lim;
    if args.linearity {
        state.view = PlotView::Linearity;
    }

    if let Some(analysis) = &state.analysis {
        println!("Data files in {}:", analysis.files.dir.display());
        for file in &analysis.files.files {
            println!("  {}", file.display());
        }

        if let Some(dir) = &args.export {
            for path in export_run(dir, &analysis.table, &analysis.ladder)? {
                println!("Wrote {}", path.display());
            }
        }
    }

    if args.nogui {
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(app::window_title(&state))
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty BioAnalyzer",
        options,
        Box::new(|_cc| Ok(Box::new(BioAnalyzerApp::new(state)))),
    )
    .map_err(|e| anyhow!("plot window failed: {e}"))
}
