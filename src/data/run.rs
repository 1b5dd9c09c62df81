use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use super::assay::AssayType;
use super::calibration::Calibration;
use super::error::{AnalysisError, AnalysisResult};
use super::ladder::{load_ladder, Ladder};
use super::locator::{locate_run, FileRole, RunFiles};
use super::table::{well_number, AssembledTable};
use super::trace::{load_trace, Trace};

// ---------------------------------------------------------------------------
// RunAnalysis – the complete result for one assay run
// ---------------------------------------------------------------------------

/// Where to look for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSource {
    /// Search root, walked recursively.
    pub root: PathBuf,
    /// Substring identifying the run folder.
    pub run: String,
}

impl RunSource {
    /// Use the last component of `root` as the run name. `.`/`..` are
    /// resolved first so that e.g. `run_a/..` names the parent folder.
    pub fn from_dir(root: &Path) -> Self {
        let resolved = std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        let run = resolved
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            root: root.to_path_buf(),
            run,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunAnalysis {
    pub assay: AssayType,
    pub files: RunFiles,
    pub ladder: Ladder,
    pub calibration: Calibration,
    pub table: AssembledTable,
}

impl RunAnalysis {
    /// Locate the run folder and analyse it.
    pub fn load(source: &RunSource, assay: AssayType, strict: bool) -> AnalysisResult<Self> {
        let files = locate_run(&source.root, &source.run, strict)?;
        Self::from_files(files, assay, strict)
    }

    /// Parse the ladder, results and sample exports of `files`, calibrate
    /// and assemble the table.
    pub fn from_files(files: RunFiles, assay: AssayType, strict: bool) -> AnalysisResult<Self> {
        let ladder_file = single(&files, FileRole::Ladder)
            .map_err(|found| AnalysisError::MissingLadderFile { found })?;
        let results_file = single(&files, FileRole::Results)
            .map_err(|found| AnalysisError::MissingResultsFile { found })?;

        let ladder_trace = load_trace(ladder_file, assay)?;

        let mut sample_files: Vec<&PathBuf> = files.with_role(FileRole::Sample).collect();
        sample_files.sort_by(|a, b| sample_order(a, b));
        let samples = sample_files
            .into_iter()
            .map(|path| -> AnalysisResult<(String, Trace)> {
                Ok((file_label(path), load_trace(path, assay)?))
            })
            .collect::<AnalysisResult<Vec<_>>>()?;

        let ladder = load_ladder(results_file, assay)?;
        let calibration = Calibration::from_ladder(&ladder)?;
        let table =
            AssembledTable::build(&ladder_trace, samples, &calibration, ladder.unit, strict)?;
        log::info!(
            "Assembled {} rows x {} samples ({assay})",
            table.len(),
            table.samples.len()
        );

        Ok(Self {
            assay,
            files,
            ladder,
            calibration,
            table,
        })
    }
}

/// The one file with `role`, or the number of candidates found.
fn single(files: &RunFiles, role: FileRole) -> Result<&PathBuf, usize> {
    let found: Vec<&PathBuf> = files.with_role(role).collect();
    match found.as_slice() {
        [one] => Ok(*one),
        other => Err(other.len()),
    }
}

/// File stem used as the column label.
pub fn file_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `Sample2` before `Sample10`; unnumbered files after numbered ones.
fn sample_order(a: &Path, b: &Path) -> Ordering {
    let (la, lb) = (file_label(a), file_label(b));
    match (well_number(&la), well_number(&lb)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| la.cmp(&lb)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => la.cmp(&lb),
    }
}
