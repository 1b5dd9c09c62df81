use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::error::{AnalysisError, AnalysisResult};

// ---------------------------------------------------------------------------
// File roles
// ---------------------------------------------------------------------------

/// What an exported CSV holds, decided by its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Ladder,
    Results,
    Sample,
}

impl FileRole {
    pub fn of(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        if name.contains("Results") {
            FileRole::Results
        } else if name.contains("Ladder") {
            FileRole::Ladder
        } else {
            FileRole::Sample
        }
    }
}

/// The CSV exports of one run folder.
#[derive(Debug, Clone, PartialEq)]
pub struct RunFiles {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

impl RunFiles {
    pub fn with_role(&self, role: FileRole) -> impl Iterator<Item = &PathBuf> + '_ {
        self.files.iter().filter(move |p| FileRole::of(p) == role)
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Find the run folder under `root` whose path contains `run` and list its
/// CSV exports.
///
/// Folders without CSV files are ignored. When several folders qualify, the
/// last one in walk order is used and a warning is logged; with `strict` the
/// ambiguity is an error instead.
pub fn locate_run(root: &Path, run: &str, strict: bool) -> AnalysisResult<RunFiles> {
    // Every path contains the empty string.
    if run.trim().is_empty() {
        return Err(AnalysisError::RunFolderNotFound {
            root: root.to_path_buf(),
            run: run.to_string(),
        });
    }

    let mut candidates: Vec<RunFiles> = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| AnalysisError::Io {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
            source: e.into(),
        })?;
        if !entry.file_type().is_dir() || !entry.path().to_string_lossy().contains(run) {
            continue;
        }
        let files = csv_files_in(entry.path())?;
        if !files.is_empty() {
            candidates.push(RunFiles {
                dir: entry.into_path(),
                files,
            });
        }
    }

    if candidates.len() > 1 {
        let dirs: Vec<PathBuf> = candidates.iter().map(|c| c.dir.clone()).collect();
        if strict {
            return Err(AnalysisError::AmbiguousRunFolder {
                run: run.to_string(),
                candidates: dirs,
            });
        }
        log::warn!(
            "{} folders match '{run}', using the last one: {:?}",
            dirs.len(),
            dirs
        );
    }

    let found = candidates.pop().ok_or_else(|| AnalysisError::RunFolderNotFound {
        root: root.to_path_buf(),
        run: run.to_string(),
    })?;
    log::info!(
        "Run folder {} ({} CSV files)",
        found.dir.display(),
        found.files.len()
    );
    Ok(found)
}

/// `.csv` files directly inside `dir`, sorted by name.
fn csv_files_in(dir: &Path) -> AnalysisResult<Vec<PathBuf>> {
    let io_err = |source: std::io::Error| AnalysisError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_csv = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
