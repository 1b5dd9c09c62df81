use super::calibration::Calibration;
use super::error::{AnalysisError, AnalysisResult};
use super::trace::Trace;

// ---------------------------------------------------------------------------
// AssembledTable – every trace of a run on the ladder's time grid
// ---------------------------------------------------------------------------

/// One intensity column, labelled by the file stem it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleColumn {
    pub label: String,
    pub intensity: Vec<f64>,
}

/// Row-aligned table: `time`, `ladder`, one column per sample, `size`.
///
/// Rows are aligned by index. Samples are assumed to share the ladder's time
/// grid; nothing is resampled.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledTable {
    pub time: Vec<f64>,
    pub ladder: Vec<f64>,
    pub samples: Vec<SampleColumn>,
    /// Calibrated fragment size for each row.
    pub size: Vec<f64>,
    pub unit: &'static str,
}

impl AssembledTable {
    /// Align `samples` with the ladder trace and size every row.
    ///
    /// Traces of different lengths are cut to the shortest one, with a
    /// warning. With `strict` any length difference is an error.
    pub fn build(
        ladder: &Trace,
        samples: Vec<(String, Trace)>,
        calibration: &Calibration,
        unit: &'static str,
        strict: bool,
    ) -> AnalysisResult<Self> {
        let expected = ladder.len();
        let mut rows = expected;
        for (name, trace) in &samples {
            if trace.len() == expected {
                continue;
            }
            if strict {
                return Err(AnalysisError::TraceLengthMismatch {
                    name: name.clone(),
                    rows: trace.len(),
                    expected,
                });
            }
            log::warn!(
                "Trace '{name}' has {} rows, ladder has {expected}; extra rows are dropped",
                trace.len()
            );
            rows = rows.min(trace.len());
        }

        let time = ladder.time[..rows].to_vec();
        let size = calibration.apply(&time);
        let samples = samples
            .into_iter()
            .map(|(label, mut trace)| {
                trace.intensity.truncate(rows);
                SampleColumn {
                    label,
                    intensity: trace.intensity,
                }
            })
            .collect();

        Ok(Self {
            time,
            ladder: ladder.intensity[..rows].to_vec(),
            samples,
            size,
            unit,
        })
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Header of the size column, e.g. `size[bp]`.
    pub fn size_label(&self) -> String {
        format!("size[{}]", self.unit)
    }

    pub fn column_names(&self) -> Vec<String> {
        let mut names = vec!["time".to_string(), "ladder".to_string()];
        names.extend(self.samples.iter().map(|s| s.label.clone()));
        names.push(self.size_label());
        names
    }

    pub fn sample(&self, label: &str) -> Option<&[f64]> {
        self.samples
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.intensity.as_slice())
    }

    /// Resolve a user-supplied sample key: an exact label, or a well number
    /// matching the trailing number of exactly one label (`3` → `..._Sample3`).
    pub fn resolve_sample(&self, key: &str) -> Option<&str> {
        if let Some(label) = self.sample_labels().find(|l| *l == key) {
            return Some(label);
        }
        let well: u32 = key.trim().parse().ok()?;
        let mut hits = self.sample_labels().filter(|l| well_number(l) == Some(well));
        match (hits.next(), hits.next()) {
            (Some(label), None) => Some(label),
            _ => None,
        }
    }

    pub fn sample_labels(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.samples.iter().map(|s| s.label.as_str())
    }
}

/// Trailing well number of a stem such as `2019-10-10_Sample12`.
pub fn well_number(label: &str) -> Option<u32> {
    let digits = label.len() - label.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    label[label.len() - digits..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(rows: usize, offset: f64) -> Trace {
        Trace {
            time: (0..rows).map(|i| 20.0 + i as f64 * 0.05).collect(),
            intensity: (0..rows).map(|i| offset + i as f64).collect(),
        }
    }

    fn calibration() -> Calibration {
        Calibration::from_points([(20.0, 25.0), (25.0, 200.0)]).unwrap()
    }

    #[test]
    fn aligns_ladder_and_sample_rows() {
        let ladder = trace(100, 0.0);
        let table = AssembledTable::build(
            &ladder,
            vec![("Sample1".into(), trace(100, 1000.0))],
            &calibration(),
            "nt",
            true,
        )
        .unwrap();

        assert_eq!(table.len(), 100);
        assert_eq!(table.column_names(), ["time", "ladder", "Sample1", "size[nt]"]);
        assert_eq!(table.time, ladder.time);
        assert_eq!(table.ladder, ladder.intensity);
        assert_eq!(table.sample("Sample1").unwrap()[99], 1099.0);
        assert_eq!(table.size[0], 25.0);
        assert_eq!(table.size.len(), 100);
    }

    #[test]
    fn size_column_follows_calibration() {
        let ladder = trace(10, 0.0);
        let cal = calibration();
        let table = AssembledTable::build(&ladder, Vec::new(), &cal, "nt", false).unwrap();
        for (t, s) in table.time.iter().zip(&table.size) {
            assert_eq!(*s, cal.size_at(*t));
        }
    }

    #[test]
    fn shorter_sample_truncates_table() {
        let table = AssembledTable::build(
            &trace(100, 0.0),
            vec![("Sample1".into(), trace(100, 0.0)), ("Sample2".into(), trace(80, 0.0))],
            &calibration(),
            "bp",
            false,
        )
        .unwrap();
        assert_eq!(table.len(), 80);
        assert!(table.samples.iter().all(|s| s.intensity.len() == 80));
    }

    #[test]
    fn longer_sample_is_cut_to_ladder() {
        let table = AssembledTable::build(
            &trace(50, 0.0),
            vec![("Sample1".into(), trace(60, 0.0))],
            &calibration(),
            "bp",
            false,
        )
        .unwrap();
        assert_eq!(table.len(), 50);
        assert_eq!(table.sample("Sample1").unwrap().len(), 50);
    }

    #[test]
    fn strict_rejects_length_mismatch() {
        let err = AssembledTable::build(
            &trace(100, 0.0),
            vec![("Sample2".into(), trace(99, 0.0))],
            &calibration(),
            "bp",
            true,
        )
        .unwrap_err();
        match err {
            AnalysisError::TraceLengthMismatch {
                name,
                rows,
                expected,
            } => {
                assert_eq!(name, "Sample2");
                assert_eq!(rows, 99);
                assert_eq!(expected, 100);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn well_numbers() {
        assert_eq!(well_number("Sample12"), Some(12));
        assert_eq!(well_number("2019_Sample3"), Some(3));
        assert_eq!(well_number("Blank"), None);
    }

    #[test]
    fn samples_resolve_by_label_or_well() {
        let table = AssembledTable::build(
            &trace(5, 0.0),
            vec![
                ("2019-10-10_Sample1".into(), trace(5, 0.0)),
                ("2019-10-10_Sample12".into(), trace(5, 0.0)),
            ],
            &calibration(),
            "nt",
            true,
        )
        .unwrap();
        assert_eq!(table.resolve_sample("12"), Some("2019-10-10_Sample12"));
        assert_eq!(table.resolve_sample("1"), Some("2019-10-10_Sample1"));
        assert_eq!(table.resolve_sample("2019-10-10_Sample1"), Some("2019-10-10_Sample1"));
        assert_eq!(table.resolve_sample("4"), None);
        assert_eq!(table.resolve_sample("Sample1"), None);
    }
}
