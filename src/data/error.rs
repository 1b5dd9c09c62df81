use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// AnalysisError – every fatal condition of a run analysis
// ---------------------------------------------------------------------------

/// Errors raised while locating, parsing and calibrating one assay run.
///
/// None of these are recoverable: the caller aborts the analysis and reports
/// the message.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Assay type '{0}' is not supported. Choose 'HS_DNA', 'pico_RNA', or 'small_RNA'.")]
    UnsupportedAssayType(String),

    #[error("No CSV files found in any folder matching '{run}' under {}", root.display())]
    RunFolderNotFound { root: PathBuf, run: String },

    #[error("{} folders match '{run}' and contain CSV files: {candidates:?}", candidates.len())]
    AmbiguousRunFolder { run: String, candidates: Vec<PathBuf> },

    #[error("Expected exactly one Results file in the run folder, found {found}")]
    MissingResultsFile { found: usize },

    #[error("Expected exactly one Ladder file in the run folder, found {found}")]
    MissingLadderFile { found: usize },

    #[error("{}: ladder marker line 'Sample Name,Ladder' not found", path.display())]
    MalformedLadderMarker { path: PathBuf },

    #[error(
        "{}: ladder block needs {expected} rows after the marker, only {available} present",
        path.display()
    )]
    TruncatedLadderBlock {
        path: PathBuf,
        expected: usize,
        available: usize,
    },

    #[error("{}, line {line}: bad ladder row: {reason}", path.display())]
    MalformedLadderRow {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("{}, line {line}: bad data row: {reason}", path.display())]
    MalformedDataRow {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("{}: no data rows after the instrument header", path.display())]
    EmptyTrace { path: PathBuf },

    #[error("Ladder has {points} point(s); at least 2 are needed to calibrate")]
    DegenerateLadder { points: usize },

    #[error("Trace '{name}' has {rows} rows but the ladder trace has {expected}")]
    TraceLengthMismatch {
        name: String,
        rows: usize,
        expected: usize,
    },

    #[error("No sample '{name}' in this run; available: {available:?}")]
    UnknownSample {
        name: String,
        available: Vec<String>,
    },

    #[error("{labels} legend label(s) given for {samples} selected sample(s)")]
    LabelCountMismatch { labels: usize, samples: usize },

    #[error("Plot range is empty: min_lim {min} must be below max_lim {max}")]
    InvalidPlotRange { min: f64, max: f64 },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Read a whole file, tagging any IO failure with its path.
pub fn read_bytes(path: &std::path::Path) -> AnalysisResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })
}
