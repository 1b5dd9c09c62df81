use std::path::Path;

use encoding_rs::SHIFT_JIS;

use super::assay::{AssayType, HEADER_LINES};
use super::error::{read_bytes, AnalysisError, AnalysisResult};

// ---------------------------------------------------------------------------
// Trace – one channel of an electropherogram
// ---------------------------------------------------------------------------

/// Intensity signal of one well (ladder or sample) over migration time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    /// Migration time in seconds, increasing.
    pub time: Vec<f64>,
    /// Fluorescence intensity, same length as `time`.
    pub intensity: Vec<f64>,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Load `[time, intensity]` rows from one instrument trace export.
///
/// The data block is lines `[HEADER_LINES, cutoff)` where `cutoff` depends on
/// the assay kit. Shorter files yield every row after the header.
pub fn load_trace(path: &Path, assay: AssayType) -> AnalysisResult<Trace> {
    let bytes = read_bytes(path)?;
    let trace = parse_trace(&bytes, assay, path)?;
    log::debug!("{}: {} data rows", path.display(), trace.len());
    Ok(trace)
}

pub(crate) fn parse_trace(bytes: &[u8], assay: AssayType, path: &Path) -> AnalysisResult<Trace> {
    let cutoff = assay.profile().cutoff;
    let mut trace = Trace::default();

    // Shift-JIS trail bytes never take the values of CR or LF, so splitting
    // the raw bytes on '\n' is safe before decoding.
    for (idx, raw) in bytes
        .split_inclusive(|&b| b == b'\n')
        .enumerate()
        .take(cutoff)
        .skip(HEADER_LINES)
    {
        let line_no = idx + 1;
        let (text, _, had_errors) = SHIFT_JIS.decode(raw);
        if had_errors {
            return Err(malformed(path, line_no, "not valid Shift-JIS text".into()));
        }
        let (time, intensity) = parse_row(&text).map_err(|r| malformed(path, line_no, r))?;
        trace.time.push(time);
        trace.intensity.push(intensity);
    }

    if trace.is_empty() {
        return Err(AnalysisError::EmptyTrace {
            path: path.to_path_buf(),
        });
    }
    Ok(trace)
}

fn parse_row(line: &str) -> Result<(f64, f64), String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let tokens: Vec<&str> = line.split(',').collect();
    if tokens.len() != 2 {
        return Err(format!("expected 2 fields, got {} in '{line}'", tokens.len()));
    }
    let parse = |tok: &str| {
        tok.trim()
            .parse::<f64>()
            .map_err(|_| format!("'{tok}' is not a number"))
    };
    Ok((parse(tokens[0])?, parse(tokens[1])?))
}

fn malformed(path: &Path, line: usize, reason: String) -> AnalysisError {
    AnalysisError::MalformedDataRow {
        path: path.to_path_buf(),
        line,
        reason,
    }
}
