use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Context, Result};

use crate::color::ColorMap;
use crate::data::assay::AssayType;
use crate::data::error::{AnalysisError, AnalysisResult};
use crate::data::run::{RunAnalysis, RunSource};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which plot the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotView {
    /// Intensity vs calibrated size for the ladder and selected samples.
    Overlay,
    /// Ladder size vs migration time.
    Linearity,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Where the current run was loaded from.
    pub source: Option<RunSource>,

    pub assay: AssayType,

    /// Fail instead of warn on ambiguous folders / ragged traces.
    pub strict: bool,

    /// Loaded run (None until a run folder has been analysed).
    pub analysis: Option<RunAnalysis>,

    /// Labels of the samples drawn in the overlay.
    pub visible_samples: BTreeSet<String>,

    /// Legend text replacing a sample label in the overlay.
    pub legend_names: BTreeMap<String, String>,

    pub show_ladder: bool,

    /// Overlay size axis range.
    pub min_lim: f64,
    pub max_lim: f64,

    pub view: PlotView,

    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(assay: AssayType) -> Self {
        let (min_lim, max_lim) = assay.size_range();
        Self {
            source: None,
            assay,
            strict: false,
            analysis: None,
            visible_samples: BTreeSet::new(),
            legend_names: BTreeMap::new(),
            show_ladder: true,
            min_lim,
            max_lim,
            view: PlotView::Overlay,
            color_map: None,
            status_message: None,
        }
    }

    /// Ingest a freshly analysed run: every sample visible, new colours.
    /// Legend names are kept only when the same run is re-analysed.
    pub fn set_analysis(&mut self, source: RunSource, analysis: RunAnalysis) {
        self.visible_samples = analysis
            .table
            .sample_labels()
            .map(str::to_string)
            .collect();
        self.color_map = Some(ColorMap::new(analysis.table.sample_labels()));
        if self.source.as_ref() != Some(&source) {
            self.legend_names.clear();
        }
        self.assay = analysis.assay;
        self.source = Some(source);
        self.analysis = Some(analysis);
        self.status_message = None;
    }

    /// Restrict the overlay to `keys`, each a sample label or its well
    /// number. `labels`, when given, pairs positionally with `keys` and
    /// renames the legend entries. An empty `keys` keeps every sample.
    pub fn select_samples(&mut self, keys: &[String], labels: &[String]) -> AnalysisResult<()> {
        let Some(analysis) = &self.analysis else {
            return Ok(());
        };
        if !labels.is_empty() && labels.len() != keys.len() {
            return Err(AnalysisError::LabelCountMismatch {
                labels: labels.len(),
                samples: keys.len(),
            });
        }
        if keys.is_empty() {
            return Ok(());
        }

        let table = &analysis.table;
        let mut visible = BTreeSet::new();
        let mut legend_names = BTreeMap::new();
        for (i, key) in keys.iter().enumerate() {
            let label = table
                .resolve_sample(key)
                .ok_or_else(|| AnalysisError::UnknownSample {
                    name: key.clone(),
                    available: table.sample_labels().map(str::to_string).collect(),
                })?;
            if let Some(name) = labels.get(i) {
                legend_names.insert(label.to_string(), name.clone());
            }
            visible.insert(label.to_string());
        }
        self.visible_samples = visible;
        self.legend_names = legend_names;
        Ok(())
    }

    /// Legend text of a sample: its custom label, else the label itself.
    pub fn legend_name<'a>(&'a self, label: &'a str) -> &'a str {
        self.legend_names.get(label).map_or(label, String::as_str)
    }

    /// Analyse `source` with the current assay, replacing the loaded run.
    pub fn load(&mut self, source: RunSource) -> Result<()> {
        let analysis = RunAnalysis::load(&source, self.assay, self.strict).with_context(|| {
            format!(
                "analysing run '{}' under {}",
                source.run,
                source.root.display()
            )
        })?;
        self.set_analysis(source, analysis);
        Ok(())
    }

    /// Re-run the analysis of the current source, keeping the error in the
    /// status line instead of propagating it.
    pub fn reload(&mut self) {
        let Some(source) = self.source.clone() else {
            return;
        };
        if let Err(e) = self.load(source) {
            log::error!("Failed to load run: {e:#}");
            self.analysis = None;
            self.status_message = Some(format!("Error: {e:#}"));
        }
    }

    /// Switch kit; resets the size range to the new ladder span and
    /// re-analyses the run.
    pub fn set_assay(&mut self, assay: AssayType) {
        if assay == self.assay {
            return;
        }
        self.assay = assay;
        (self.min_lim, self.max_lim) = assay.size_range();
        self.reload();
    }

    pub fn toggle_sample(&mut self, label: &str) {
        if !self.visible_samples.remove(label) {
            self.visible_samples.insert(label.to_string());
        }
    }

    pub fn select_all(&mut self) {
        if let Some(analysis) = &self.analysis {
            self.visible_samples = analysis
                .table
                .sample_labels()
                .map(str::to_string)
                .collect();
        }
    }

    pub fn select_none(&mut self) {
        self.visible_samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    fn loaded() -> (tempfile::TempDir, AppState) {
        let root = tempfile::tempdir().unwrap();
        let run = root.path().join("run_0110");
        std::fs::create_dir_all(&run).unwrap();
        let times = [20.0, 22.0, 24.0, 26.0, 28.0, 30.0, 32.0];
        fixtures::write_run(&run, AssayType::PicoRna, &times, 40, &["Sample1", "Sample2"]);

        let mut state = AppState::new(AssayType::PicoRna);
        state.load(RunSource::from_dir(&run)).unwrap();
        (root, state)
    }

    #[test]
    fn loading_shows_every_sample() {
        let (_root, state) = loaded();
        assert_eq!(
            state.visible_samples.iter().collect::<Vec<_>>(),
            ["Sample1", "Sample2"]
        );
        assert!(state.color_map.is_some());
        assert_eq!((state.min_lim, state.max_lim), (25.0, 6000.0));
    }

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn selecting_unknown_sample_is_an_error() {
        let (_root, mut state) = loaded();
        let err = state
            .select_samples(&keys(&["Sample2", "Sample7"]), &[])
            .unwrap_err();
        match err {
            AnalysisError::UnknownSample { name, available } => {
                assert_eq!(name, "Sample7");
                assert_eq!(available, ["Sample1", "Sample2"]);
            }
            other => panic!("unexpected error {other:?}"),
        }
        // Nothing was narrowed by the failed selection.
        assert_eq!(state.visible_samples.len(), 2);
    }

    #[test]
    fn samples_are_selected_by_label_or_well() {
        let (_root, mut state) = loaded();
        state.select_samples(&keys(&["2"]), &[]).unwrap();
        assert_eq!(state.visible_samples.iter().collect::<Vec<_>>(), ["Sample2"]);

        state.select_samples(&keys(&["Sample1"]), &[]).unwrap();
        assert_eq!(state.visible_samples.iter().collect::<Vec<_>>(), ["Sample1"]);

        state.select_samples(&[], &[]).unwrap();
        assert_eq!(state.visible_samples.iter().collect::<Vec<_>>(), ["Sample1"]);
    }

    #[test]
    fn labels_rename_legend_entries() {
        let (_root, mut state) = loaded();
        state
            .select_samples(&keys(&["2", "Sample1"]), &keys(&["treated", "control"]))
            .unwrap();
        assert_eq!(state.visible_samples.len(), 2);
        assert_eq!(state.legend_name("Sample2"), "treated");
        assert_eq!(state.legend_name("Sample1"), "control");

        // Legend names survive a reload of the same run.
        state.reload();
        assert_eq!(state.legend_name("Sample2"), "treated");
    }

    #[test]
    fn unlabelled_samples_keep_their_label() {
        let (_root, state) = loaded();
        assert_eq!(state.legend_name("Sample1"), "Sample1");
    }

    #[test]
    fn label_count_must_match_samples() {
        let (_root, mut state) = loaded();
        let err = state
            .select_samples(&keys(&["Sample1", "Sample2"]), &keys(&["only one"]))
            .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::LabelCountMismatch {
                labels: 1,
                samples: 2
            }
        ));
    }

    #[test]
    fn toggling_and_bulk_selection() {
        let (_root, mut state) = loaded();
        state.toggle_sample("Sample1");
        assert!(!state.visible_samples.contains("Sample1"));
        state.toggle_sample("Sample1");
        assert!(state.visible_samples.contains("Sample1"));
        state.select_none();
        assert!(state.visible_samples.is_empty());
        state.select_all();
        assert_eq!(state.visible_samples.len(), 2);
    }

    #[test]
    fn failed_reload_keeps_error_in_status() {
        let (_root, mut state) = loaded();
        // The fixture ladder has 7 peaks; HS DNA needs 15.
        state.set_assay(AssayType::HsDna);
        assert!(state.analysis.is_none());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("ladder block")));
        assert_eq!((state.min_lim, state.max_lim), (35.0, 10380.0));
    }
}
