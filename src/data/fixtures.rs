//! Synthetic instrument exports for tests.

use std::fs;
use std::path::Path;

use encoding_rs::SHIFT_JIS;

use super::assay::{AssayType, HEADER_LINES};

/// A trace export: 18 header lines (one in Shift-JIS) then `time,intensity`
/// rows, CRLF terminated.
pub fn trace_bytes(rows: &[(f64, f64)]) -> Vec<u8> {
    let mut out = Vec::new();
    for i in 0..HEADER_LINES {
        if i == 1 {
            let (header, _, _) = SHIFT_JIS.encode("試料名,サンプル");
            out.extend_from_slice(&header);
            out.extend_from_slice(b"\r\n");
        } else {
            out.extend_from_slice(format!("Header{i},value\r\n").as_bytes());
        }
    }
    for (t, v) in rows {
        out.extend_from_slice(format!("{t},{v}\r\n").as_bytes());
    }
    out
}

/// A Results export whose ladder peak rows carry `times` in the column the
/// assay reads them from.
pub fn results_bytes(assay: AssayType, times: &[f64]) -> Vec<u8> {
    let mut text = String::from("Data File Name,run.xad\r\nSample Name,Sample1\r\n\r\n");
    text.push_str("Sample Name,Ladder\r\n\r\nPeak Table\r\n");
    text.push_str("Size [bp],Conc.,Molarity,Observations,Time,Area,Aligned\r\n");
    for (i, t) in times.iter().enumerate() {
        match assay {
            // ...,time,<4 trailing statistics>
            AssayType::HsDna => text.push_str(&format!("{i},1.0,{t},12.5,3.1,0.8,1\r\n")),
            // ...,time,<2 trailing columns>
            _ => text.push_str(&format!("{i},1.0,{t},12.5,Ladder Peak\r\n")),
        }
    }
    text.push_str("\r\nSample Name,Sample2\r\n");
    text.into_bytes()
}

/// Populate `dir` with Ladder, Results and sample exports of `rows` rows on a
/// shared time grid.
pub fn write_run(
    dir: &Path,
    assay: AssayType,
    ladder_times: &[f64],
    rows: usize,
    samples: &[&str],
) {
    let grid = |offset: f64| -> Vec<(f64, f64)> {
        (0..rows)
            .map(|i| (15.0 + i as f64 * 0.25, offset + (i % 7) as f64))
            .collect()
    };
    fs::write(dir.join("Ladder.csv"), trace_bytes(&grid(0.0))).unwrap();
    fs::write(dir.join("Results.csv"), results_bytes(assay, ladder_times)).unwrap();
    for (n, name) in samples.iter().enumerate() {
        fs::write(dir.join(format!("{name}.csv")), trace_bytes(&grid(n as f64))).unwrap();
    }
}
