use std::path::PathBuf;

use clap::Parser;

use crate::data::assay::AssayType;
use crate::data::error::AnalysisError;
use crate::data::run::RunSource;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Folder to search for the run folder (searched recursively)
    #[arg(long = "in_dir", visible_alias = "in-dir", value_name = "PATH")]
    pub in_dir: PathBuf,

    /// Assay kit the run was measured with: HS_DNA, pico_RNA or small_RNA
    #[arg(long = "assay_type", visible_alias = "assay-type", value_name = "ASSAY")]
    pub assay_type: AssayType,

    /// Run folder name (substring match); defaults to the last component of --in_dir
    #[arg(long)]
    pub run: Option<String>,

    /// Lower bound of the overlay size axis; defaults to the smallest ladder size
    #[arg(long = "min_lim", visible_alias = "min-lim", allow_negative_numbers = true)]
    pub min_lim: Option<i64>,

    /// Upper bound of the overlay size axis; defaults to the largest ladder size
    #[arg(long = "max_lim", visible_alias = "max-lim", allow_negative_numbers = true)]
    pub max_lim: Option<i64>,

    /// Samples to overlay, by file stem or well number (default: all)
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub samples: Vec<String>,

    /// Legend labels for the --samples entries, in the same order
    #[arg(long, value_delimiter = ',', num_args = 1.., requires = "samples")]
    pub labels: Vec<String>,

    /// Hide the ladder trace in the overlay
    #[arg(long, default_value_t = false)]
    pub no_ladder: bool,

    /// Open on the ladder linearity check instead of the overlay
    #[arg(long, default_value_t = false)]
    pub linearity: bool,

    /// Fail on ambiguous run folders and mismatched trace lengths
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Write assembled.csv and ladder.csv into this folder
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Run without GUI (print, export, exit)
    #[arg(long, default_value_t = false)]
    pub nogui: bool,
}

impl Args {
    pub fn source(&self) -> RunSource {
        match &self.run {
            Some(run) => RunSource {
                root: self.in_dir.clone(),
                run: run.clone(),
            },
            None => RunSource::from_dir(&self.in_dir),
        }
    }

    /// Overlay x range, falling back to the kit's ladder span.
    pub fn plot_range(&self) -> Result<(f64, f64), AnalysisError> {
        let (lo, hi) = self.assay_type.size_range();
        let min = self.min_lim.map_or(lo, |v| v as f64);
        let max = self.max_lim.map_or(hi, |v| v as f64);
        if min >= max {
            return Err(AnalysisError::InvalidPlotRange { min, max });
        }
        Ok((min, max))
    }
}
