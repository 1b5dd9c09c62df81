use std::fmt;
use std::str::FromStr;

use super::error::AnalysisError;

// ---------------------------------------------------------------------------
// Instrument export format constants
// ---------------------------------------------------------------------------

/// Lines of instrument header preceding the data block of every trace export.
pub const HEADER_LINES: usize = 18;

/// Exact marker line opening the ladder block of a Results export.
pub const LADDER_MARKER: &[u8] = b"Sample Name,Ladder\r\n";

/// Ladder peak rows start this many lines below the marker.
pub const LADDER_ROW_OFFSET: usize = 4;

// ---------------------------------------------------------------------------
// AssayType – the reagent kit a run was measured with
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssayType {
    HsDna,
    PicoRna,
    SmallRna,
}

/// Per-kit layout of the exported files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssayProfile {
    /// Exclusive end line of the data block in a trace export.
    pub cutoff: usize,
    /// Reference ladder fragment sizes, in ladder peak order (kit guide).
    pub ladder_sizes: &'static [f64],
    /// Position of the migration time column, counted from the end of a row.
    pub time_field_from_end: usize,
    /// Unit the sizes are expressed in.
    pub unit: &'static str,
}

static HS_DNA: AssayProfile = AssayProfile {
    cutoff: 2139,
    ladder_sizes: &[
        35.0, 50.0, 100.0, 150.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0, 1000.0, 2000.0,
        3000.0, 7000.0, 10380.0,
    ],
    // HS DNA results carry two extra trailing statistics columns.
    time_field_from_end: 5,
    unit: "bp",
};

static PICO_RNA: AssayProfile = AssayProfile {
    cutoff: 1438,
    ladder_sizes: &[25.0, 200.0, 500.0, 1000.0, 2000.0, 4000.0, 6000.0],
    time_field_from_end: 3,
    unit: "nt",
};

static SMALL_RNA: AssayProfile = AssayProfile {
    cutoff: 1218,
    ladder_sizes: &[4.0, 20.0, 40.0, 60.0, 80.0, 100.0, 150.0],
    time_field_from_end: 3,
    unit: "nt",
};

impl AssayType {
    pub const ALL: [AssayType; 3] = [AssayType::HsDna, AssayType::PicoRna, AssayType::SmallRna];

    pub fn profile(self) -> &'static AssayProfile {
        match self {
            AssayType::HsDna => &HS_DNA,
            AssayType::PicoRna => &PICO_RNA,
            AssayType::SmallRna => &SMALL_RNA,
        }
    }

    /// Name as used by the instrument software and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            AssayType::HsDna => "HS_DNA",
            AssayType::PicoRna => "pico_RNA",
            AssayType::SmallRna => "small_RNA",
        }
    }

    /// Smallest and largest reference ladder size.
    pub fn size_range(self) -> (f64, f64) {
        let sizes = self.profile().ladder_sizes;
        (sizes[0], sizes[sizes.len() - 1])
    }
}

impl fmt::Display for AssayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AssayType {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssayType::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| AnalysisError::UnsupportedAssayType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_instrument_names() {
        assert_eq!("HS_DNA".parse::<AssayType>().unwrap(), AssayType::HsDna);
        assert_eq!("pico_RNA".parse::<AssayType>().unwrap(), AssayType::PicoRna);
        assert_eq!("small_RNA".parse::<AssayType>().unwrap(), AssayType::SmallRna);
    }

    #[test]
    fn rejects_unknown_kits() {
        let err = "hs_dna".parse::<AssayType>().unwrap_err();
        assert!(matches!(err, AnalysisError::UnsupportedAssayType(ref s) if s == "hs_dna"));
    }

    #[test]
    fn export_layout_constants() {
        assert_eq!(HEADER_LINES, 18);
        assert_eq!(LADDER_ROW_OFFSET, 4);
        assert_eq!(LADDER_MARKER, b"Sample Name,Ladder\r\n");
        assert_eq!(AssayType::HsDna.profile().cutoff, 2139);
        assert_eq!(AssayType::PicoRna.profile().cutoff, 1438);
        assert_eq!(AssayType::SmallRna.profile().cutoff, 1218);
        assert_eq!(AssayType::HsDna.profile().time_field_from_end, 5);
        assert_eq!(AssayType::PicoRna.profile().time_field_from_end, 3);
    }

    #[test]
    fn ladder_lengths_match_kits() {
        assert_eq!(AssayType::HsDna.profile().ladder_sizes.len(), 15);
        assert_eq!(AssayType::PicoRna.profile().ladder_sizes.len(), 7);
        assert_eq!(AssayType::SmallRna.profile().ladder_sizes.len(), 7);
    }

    #[test]
    fn units_and_ranges() {
        assert_eq!(AssayType::HsDna.profile().unit, "bp");
        assert_eq!(AssayType::SmallRna.profile().unit, "nt");
        assert_eq!(AssayType::PicoRna.size_range(), (25.0, 6000.0));
        assert_eq!(AssayType::HsDna.size_range(), (35.0, 10380.0));
    }

    #[test]
    fn display_round_trips_name() {
        for assay in AssayType::ALL {
            assert_eq!(assay.to_string().parse::<AssayType>().unwrap(), assay);
        }
    }
}
