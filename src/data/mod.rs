/// Data layer: locating, parsing and calibrating one assay run.
///
/// Architecture:
/// ```text
///   run folder (Ladder.csv, Results.csv, Sample*.csv)
///        │
///        ▼
///   ┌──────────┐
///   │ locator  │  walk search root → RunFiles
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │  trace   │   │  ladder  │  Results.csv → LadderPoints
///   └──────────┘   └──────────┘
///        │              │
///        │              ▼
///        │        ┌─────────────┐
///        │        │ calibration │  time → size interpolant
///        │        └─────────────┘
///        ▼              │
///   ┌──────────┐        │
///   │  table   │◄───────┘  row-aligned traces + size column
///   └──────────┘
/// ```
/// `run` drives the whole chain; `export` writes the result as CSV.

pub mod assay;
pub mod calibration;
pub mod error;
pub mod export;
pub mod ladder;
pub mod locator;
pub mod run;
pub mod table;
pub mod trace;

#[cfg(test)]
pub(crate) mod fixtures;
