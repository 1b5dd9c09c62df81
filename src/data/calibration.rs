use super::error::{AnalysisError, AnalysisResult};
use super::ladder::Ladder;

// ---------------------------------------------------------------------------
// Calibration – migration time → fragment size
// ---------------------------------------------------------------------------

/// Piecewise-linear interpolant through the ladder peaks.
///
/// Outside the ladder's time range the first/last segment is extended, so
/// sample peaks eluting slightly before the smallest marker or after the
/// largest one still get a size.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    /// Knot times, sorted ascending.
    times: Vec<f64>,
    /// Knot sizes, paired with `times`.
    sizes: Vec<f64>,
}

impl Calibration {
    /// Fit through `(time, size)` pairs. Knots are sorted by time; repeated
    /// or out-of-order times are not rejected and give a degenerate curve.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> AnalysisResult<Self> {
        let mut knots: Vec<(f64, f64)> = points.into_iter().collect();
        if knots.len() < 2 {
            return Err(AnalysisError::DegenerateLadder {
                points: knots.len(),
            });
        }
        knots.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (times, sizes) = knots.into_iter().unzip();
        Ok(Self { times, sizes })
    }

    pub fn from_ladder(ladder: &Ladder) -> AnalysisResult<Self> {
        Self::from_points(ladder.times().zip(ladder.sizes()))
    }

    /// Size at migration time `t`.
    pub fn size_at(&self, t: f64) -> f64 {
        // First knot >= t, clamped so that [hi-1, hi] is always a segment.
        let hi = self
            .times
            .partition_point(|&x| x < t)
            .clamp(1, self.times.len() - 1);
        let lo = hi - 1;
        let (t0, t1) = (self.times[lo], self.times[hi]);
        let (y0, y1) = (self.sizes[lo], self.sizes[hi]);
        let w = (t - t0) / (t1 - t0);
        // Weighted form is exact at both knots (w = 0 or 1).
        (1.0 - w) * y0 + w * y1
    }

    pub fn apply(&self, times: &[f64]) -> Vec<f64> {
        times.iter().map(|&t| self.size_at(t)).collect()
    }

    pub fn knots(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.sizes.iter().copied())
    }
}
