use std::path::Path;

use encoding_rs::SHIFT_JIS;
use serde::Serialize;

use super::assay::{AssayType, LADDER_MARKER, LADDER_ROW_OFFSET};
use super::error::{read_bytes, AnalysisError, AnalysisResult};

// ---------------------------------------------------------------------------
// Ladder – reference peaks extracted from the Results export
// ---------------------------------------------------------------------------

/// A ladder peak: known fragment size and the time it was observed at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LadderPoint {
    #[serde(rename = "size")]
    pub expected_size: f64,
    pub migration_time: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ladder {
    pub assay: AssayType,
    /// One point per reference size, in kit order.
    pub points: Vec<LadderPoint>,
    /// "nt" or "bp".
    pub unit: &'static str,
}

impl Ladder {
    pub fn sizes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.expected_size)
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.migration_time)
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Read the ladder peak table of a Results export.
///
/// Layout:
/// ```text
///   ...
///   Sample Name,Ladder        <- marker
///   (3 lines)
///   peak row 1                <- marker + 4
///   ...
///   peak row N                N = number of reference sizes of the kit
/// ```
/// The migration time sits a fixed number of fields from the end of each
/// peak row.
pub fn load_ladder(path: &Path, assay: AssayType) -> AnalysisResult<Ladder> {
    let bytes = read_bytes(path)?;
    let ladder = parse_ladder(&bytes, assay, path)?;
    log::info!(
        "Ladder: {} points from {} ({} .. {} s)",
        ladder.points.len(),
        path.display(),
        ladder.points[0].migration_time,
        ladder.points[ladder.points.len() - 1].migration_time,
    );
    Ok(ladder)
}

pub(crate) fn parse_ladder(bytes: &[u8], assay: AssayType, path: &Path) -> AnalysisResult<Ladder> {
    let profile = assay.profile();
    let lines: Vec<&[u8]> = bytes.split_inclusive(|&b| b == b'\n').collect();

    let marker = lines
        .iter()
        .position(|l| *l == LADDER_MARKER)
        .ok_or_else(|| AnalysisError::MalformedLadderMarker {
            path: path.to_path_buf(),
        })?;

    let first = marker + LADDER_ROW_OFFSET;
    let wanted = profile.ladder_sizes.len();
    let available = lines.len().saturating_sub(first);
    if available < wanted {
        return Err(AnalysisError::TruncatedLadderBlock {
            path: path.to_path_buf(),
            expected: wanted,
            available,
        });
    }

    let points = profile
        .ladder_sizes
        .iter()
        .zip(&lines[first..first + wanted])
        .enumerate()
        .map(|(i, (&size, raw))| -> AnalysisResult<LadderPoint> {
            let line = first + i + 1;
            let bad = |reason: String| AnalysisError::MalformedLadderRow {
                path: path.to_path_buf(),
                line,
                reason,
            };
            let (text, _, had_errors) = SHIFT_JIS.decode(raw);
            if had_errors {
                return Err(bad("not valid Shift-JIS text".into()));
            }
            let fields: Vec<&str> = text.split(',').collect();
            let field = fields
                .len()
                .checked_sub(profile.time_field_from_end)
                .map(|idx| fields[idx])
                .ok_or_else(|| {
                    bad(format!(
                        "{} fields, migration time expected {} from the end",
                        fields.len(),
                        profile.time_field_from_end
                    ))
                })?;
            let migration_time = field
                .trim()
                .parse::<f64>()
                .map_err(|_| bad(format!("migration time '{}' is not a number", field.trim())))?;
            Ok(LadderPoint {
                expected_size: size,
                migration_time,
            })
        })
        .collect::<AnalysisResult<Vec<_>>>()?;

    Ok(Ladder {
        assay,
        points,
        unit: profile.unit,
    })
}
