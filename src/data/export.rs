use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::ladder::Ladder;
use super::table::AssembledTable;

// ---------------------------------------------------------------------------
// CSV export of an analysed run
// ---------------------------------------------------------------------------

pub const TABLE_FILE: &str = "assembled.csv";
pub const LADDER_FILE: &str = "ladder.csv";

/// Write `assembled.csv` and `ladder.csv` into `dir` (created if needed).
/// Returns the written paths.
pub fn export_run(dir: &Path, table: &AssembledTable, ladder: &Ladder) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating export folder {}", dir.display()))?;

    let table_path = dir.join(TABLE_FILE);
    write_table(&table_path, table)
        .with_context(|| format!("writing {}", table_path.display()))?;

    let ladder_path = dir.join(LADDER_FILE);
    write_ladder(&ladder_path, ladder)
        .with_context(|| format!("writing {}", ladder_path.display()))?;

    Ok(vec![table_path, ladder_path])
}

/// `time,ladder,<samples...>,size[unit]`, one line per table row.
pub fn write_table(path: &Path, table: &AssembledTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.column_names())?;

    for row in 0..table.len() {
        let mut record = Vec::with_capacity(table.samples.len() + 3);
        record.push(table.time[row].to_string());
        record.push(table.ladder[row].to_string());
        record.extend(table.samples.iter().map(|s| s.intensity[row].to_string()));
        record.push(table.size[row].to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// `size,migration_time` for every ladder peak.
pub fn write_ladder(path: &Path, ladder: &Ladder) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for point in &ladder.points {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::assay::AssayType;
    use crate::data::calibration::Calibration;
    use crate::data::ladder::LadderPoint;
    use crate::data::trace::Trace;

    fn ladder() -> Ladder {
        Ladder {
            assay: AssayType::SmallRna,
            points: vec![
                LadderPoint {
                    expected_size: 4.0,
                    migration_time: 20.5,
                },
                LadderPoint {
                    expected_size: 20.0,
                    migration_time: 24.0,
                },
            ],
            unit: "nt",
        }
    }

    #[test]
    fn writes_table_and_ladder() {
        let ladder = ladder();
        let cal = Calibration::from_ladder(&ladder).unwrap();
        let trace = Trace {
            time: vec![20.5, 24.0],
            intensity: vec![1.0, 2.5],
        };
        let table = AssembledTable::build(
            &trace,
            vec![("Sample1".into(), trace.clone())],
            &cal,
            ladder.unit,
            true,
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("export");
        let written = export_run(&out, &table, &ladder).unwrap();
        assert_eq!(written, [out.join(TABLE_FILE), out.join(LADDER_FILE)]);

        let table_csv = std::fs::read_to_string(out.join(TABLE_FILE)).unwrap();
        assert_eq!(
            table_csv,
            "time,ladder,Sample1,size[nt]\n20.5,1,1,4\n24,2.5,2.5,20\n"
        );

        let ladder_csv = std::fs::read_to_string(out.join(LADDER_FILE)).unwrap();
        assert_eq!(ladder_csv, "size,migration_time\n4.0,20.5\n20.0,24.0\n");
    }
}
